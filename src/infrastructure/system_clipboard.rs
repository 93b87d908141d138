use crate::domain::ports::SecureClipboard;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;

/// The operating system clipboard, through `arboard`.
///
/// Clipboard initialization may fail on headless hosts; that surfaces as a
/// `ClipboardFailure` so the copier falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl SecureClipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut ctx = arboard::Clipboard::new()
                .map_err(|e| CheckoutError::ClipboardFailure(format!("clipboard init: {e}")))?;
            ctx.set_text(text)
                .map_err(|e| CheckoutError::ClipboardFailure(format!("clipboard set: {e}")))
        })
        .await
        .map_err(|e| CheckoutError::ClipboardFailure(format!("clipboard task: {e}")))?
    }
}
