fn main() -> Result<(), Box<dyn std::error::Error>> {
    lochat::cli::main()
}
