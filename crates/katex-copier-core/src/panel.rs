//! Popup panel state, independent of how it is rendered.

use crate::error::ScanError;
use crate::feedback::ScanStatus;
use crate::scan::FormulaList;

/// The formula list currently shown in the panel and the status above it.
///
/// The list is rebuilt from scratch by every scan, whatever its outcome.
#[derive(Debug, Clone)]
pub struct PanelState {
    formulas: FormulaList,
    status: ScanStatus,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            formulas: FormulaList::new(),
            status: ScanStatus::Scanning,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_scan(&mut self) -> ScanStatus {
        self.status = ScanStatus::Scanning;
        self.status
    }

    /// Apply the page's answer to a scan request.
    ///
    /// `Ok(None)` means the page produced no answer at all, which is shown
    /// differently from an answer with zero formulas.
    pub fn apply_scan(&mut self, result: Result<Option<Vec<String>>, ScanError>) -> ScanStatus {
        self.status = match result {
            Ok(Some(strings)) => {
                self.formulas = FormulaList::from_strings(strings);
                if self.formulas.is_empty() {
                    ScanStatus::NoneFound
                } else {
                    ScanStatus::Found(self.formulas.len())
                }
            }
            Ok(None) => {
                self.formulas.clear();
                ScanStatus::NoResult
            }
            Err(e) => {
                tracing::error!(error = %e, "error scanning page");
                self.formulas.clear();
                ScanStatus::Failed
            }
        };
        self.status
    }

    pub fn formulas(&self) -> &FormulaList {
        &self.formulas
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn copy_all_enabled(&self) -> bool {
        !self.formulas.is_empty()
    }

    /// Text for a single copy-all clipboard write; `None` when there is
    /// nothing to copy.
    pub fn copy_all_payload(&self) -> Option<String> {
        if self.formulas.is_empty() {
            return None;
        }
        Some(self.formulas.joined())
    }
}
