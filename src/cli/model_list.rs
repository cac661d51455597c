//! Model listing functionality

use std::io::{self, Write};

use crate::core::session::ModelSelection;

/// Print the selectable models, marking the one a session would start with.
pub fn list_models<W: Write>(default_model: &str, out: &mut W) -> io::Result<()> {
    let selection = ModelSelection::with_default(default_model);

    writeln!(out, "🤖 Available Models")?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    for (index, model) in selection.models().iter().enumerate() {
        if index == selection.selected_index() {
            writeln!(out, "* {model} (default)")?;
        } else {
            writeln!(out, "  {model}")?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Models must already be installed on the server (ollama pull <model>)."
    )?;
    Ok(())
}
