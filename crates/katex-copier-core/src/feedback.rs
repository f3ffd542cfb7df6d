//! User-facing feedback derived from copy and scan outcomes.

use crate::config::Messages;
use crate::error::CopyError;

/// A transient notification shown after a click-to-copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub success: bool,
}

impl Notice {
    pub fn for_copy(result: &Result<(), CopyError>, messages: &Messages) -> Self {
        match result {
            Ok(()) => Self {
                text: messages.copied.clone(),
                success: true,
            },
            Err(CopyError::NoSource) => Self {
                text: messages.no_source.clone(),
                success: false,
            },
            Err(CopyError::Clipboard) => Self {
                text: messages.copy_failed.clone(),
                success: false,
            },
        }
    }

    /// State class applied next to the notification's base class.
    pub fn css_state(&self) -> &'static str {
        if self.success { "success" } else { "error" }
    }
}

/// Panel status indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Scanning,
    Found(usize),
    /// The page answered with an empty list.
    NoneFound,
    /// The page did not answer at all.
    NoResult,
    /// Scanning failed; the cause is logged, never shown.
    Failed,
}

impl ScanStatus {
    pub fn text(&self, messages: &Messages) -> String {
        match self {
            ScanStatus::Scanning => messages.scanning.clone(),
            ScanStatus::Found(n) => {
                let template = if *n == 1 {
                    &messages.found_one
                } else {
                    &messages.found_many
                };
                template.replace("{count}", &n.to_string())
            }
            ScanStatus::NoneFound => messages.none_found.clone(),
            ScanStatus::NoResult => messages.no_result.clone(),
            ScanStatus::Failed => messages.scan_failed.clone(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ScanStatus::Scanning => "🔍",
            ScanStatus::Found(_) => "✅",
            ScanStatus::NoneFound | ScanStatus::NoResult | ScanStatus::Failed => "❌",
        }
    }

    /// State class for the status container; empty while scanning.
    pub fn css_state(&self) -> &'static str {
        match self {
            ScanStatus::Scanning => "",
            ScanStatus::Found(_) => "success",
            ScanStatus::NoneFound | ScanStatus::NoResult | ScanStatus::Failed => "error",
        }
    }
}
