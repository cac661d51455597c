//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::inference::{InferenceClient, OllamaClient};

/// Send `prompt` once and write the reply, or the error text, to `out`.
/// Returns whether the server answered.
pub async fn say<C: InferenceClient, W: Write>(
    client: &C,
    prompt: &str,
    model: &str,
    out: &mut W,
) -> io::Result<bool> {
    let (text, answered) = match client.generate(prompt, model).await {
        Ok(reply) => (reply, true),
        Err(err) => (err.to_string(), false),
    };
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(answered)
}

pub async fn run_say(prompt: Vec<String>, model: &str, base_url: &str) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: lochat say <prompt>");
        std::process::exit(1);
    }

    let client = OllamaClient::new(base_url);
    let mut stdout = io::stdout();
    if !say(&client, &prompt, model, &mut stdout).await? {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inference::InferenceError;
    use crate::utils::test_utils::ScriptedClient;

    #[tokio::test]
    async fn prints_reply_and_reports_success() {
        let client = ScriptedClient::replying("Hi there!");
        let mut out = Vec::new();

        let answered = say(&client, "Hello", "llama3.2", &mut out).await.unwrap();

        assert!(answered);
        assert_eq!(String::from_utf8(out).unwrap(), "Hi there!\n");
        assert_eq!(
            client.prompts(),
            vec![("Hello".to_string(), "llama3.2".to_string())]
        );
    }

    #[tokio::test]
    async fn prints_error_text_and_reports_failure() {
        let client = ScriptedClient::failing(InferenceError::ServerError {
            status: 404,
            body: "model not found".to_string(),
        });
        let mut out = Vec::new();

        let answered = say(&client, "Hello", "nope", &mut out).await.unwrap();

        assert!(!answered);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: 404 - model not found\n"
        );
    }
}
