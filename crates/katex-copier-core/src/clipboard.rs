//! Clipboard write orchestration.
//!
//! Platforms provide two mechanisms: an asynchronous primary (the async
//! Clipboard API in browsers) and a synchronous legacy fallback. `write_text`
//! tries them in that order and reduces the outcome to a boolean.

use crate::error::ClipboardError;

/// Platform-specific plain-text clipboard writes.
#[allow(async_fn_in_trait)]
pub trait ClipboardBackend {
    /// Preferred mechanism.
    async fn write_async(&self, text: &str) -> Result<(), ClipboardError>;

    /// Fallback used when the preferred mechanism fails. Must leave no
    /// temporary state behind whatever the outcome.
    fn write_legacy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Write `text` to the clipboard, falling back to the legacy mechanism.
///
/// Never fails past this point: every error is logged and reported as
/// `false`.
pub async fn write_text<B: ClipboardBackend>(backend: &B, text: &str) -> bool {
    match backend.write_async(text).await {
        Ok(()) => {
            tracing::debug!(len = text.len(), "clipboard write succeeded");
            return true;
        }
        Err(e) => {
            tracing::debug!(error = %e, "async clipboard write failed, trying legacy copy");
        }
    }

    match backend.write_legacy(text) {
        Ok(()) => {
            tracing::debug!(len = text.len(), "legacy clipboard write succeeded");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to copy to clipboard");
            false
        }
    }
}
