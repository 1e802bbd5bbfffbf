//! System clipboard access.

use anyhow::Result;

/// Places `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}
