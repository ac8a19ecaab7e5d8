use anyhow::Result;
use console::{style, Term};

/// Wait for the user to hit Enter.
///
/// Skipped when `skip` is set or when stdout isn't an interactive terminal.
pub fn pause(skip: bool) -> Result<()> {
    let term = Term::stdout();
    if skip || !term.is_term() {
        return Ok(());
    }

    let prefix = super::gen_prefix("");
    term.write_str(&format!(
        "{prefix}{}",
        style("Press Enter to continue...").bold()
    ))?;
    term.read_line()?;
    Ok(())
}
