//! Popup panel: status line, formula list with per-row copy, and copy-all.
//!
//! The panel never touches the inspected page directly. It asks a
//! `PageScanner` for the page's formula list and renders whatever comes
//! back; `PanelState` in the core crate decides what that answer means.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use katex_copier_core::{
    ClipboardBackend, CopierConfig, FormulaSource, MarkerConfig, PanelIds, PanelState, ScanError,
    ScanStatus, scan_document, write_text,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement};

use crate::clipboard::BrowserClipboard;
use crate::dom::PageDocument;
use crate::error::MountError;

/// Source of a page's formula list.
///
/// `Ok(None)` means the page gave no answer, as opposed to an empty list.
#[allow(async_fn_in_trait)]
pub trait PageScanner {
    async fn scan(&self) -> Result<Option<Vec<String>>, ScanError>;
}

/// Scans a document in the same context, for panels embedded in the page
/// they inspect.
pub struct LocalScanner {
    document: PageDocument,
    markers: MarkerConfig,
}

impl LocalScanner {
    pub fn new(document: web_sys::Document, markers: MarkerConfig) -> Self {
        Self {
            document: PageDocument::new(document),
            markers,
        }
    }
}

impl PageScanner for LocalScanner {
    async fn scan(&self) -> Result<Option<Vec<String>>, ScanError> {
        Ok(Some(
            scan_document(&self.document, &self.markers).into_strings(),
        ))
    }
}

/// The panel's fixed elements, looked up by id.
pub struct PanelElements {
    pub status: Element,
    pub status_text: Element,
    pub status_icon: Option<Element>,
    pub formula_count: Element,
    pub formulas_list: Element,
    pub scan_button: HtmlButtonElement,
    pub copy_all_button: HtmlButtonElement,
}

impl PanelElements {
    pub fn find(document: &web_sys::Document, ids: &PanelIds) -> Result<Self, MountError> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| MountError::MissingElement(id.to_string()))
        };
        let button = |id: &str| {
            by_id(id)?
                .dyn_into::<HtmlButtonElement>()
                .map_err(|_| MountError::Dom(format!("`{id}` is not a button")))
        };

        let status = by_id(&ids.status)?;
        let status_icon = status.query_selector(".status-icon")?;
        Ok(Self {
            status_text: by_id(&ids.status_text)?,
            formula_count: by_id(&ids.formula_count)?,
            formulas_list: by_id(&ids.formulas_list)?,
            scan_button: button(&ids.scan_button)?,
            copy_all_button: button(&ids.copy_all_button)?,
            status,
            status_icon,
        })
    }
}

/// The popup panel, generic over where formulas come from and where copies
/// go.
pub struct Panel<S, C = BrowserClipboard> {
    document: web_sys::Document,
    elements: PanelElements,
    state: RefCell<PanelState>,
    scanner: S,
    clipboard: Rc<C>,
    config: CopierConfig,
}

impl<S: PageScanner + 'static> Panel<S> {
    pub fn new(
        window: &web_sys::Window,
        config: CopierConfig,
        scanner: S,
    ) -> Result<Rc<Self>, MountError> {
        let clipboard = BrowserClipboard::new(window.clone()).ok_or(MountError::NoWindow)?;
        Self::with_clipboard(window, config, scanner, clipboard)
    }
}

impl<S: PageScanner + 'static, C: ClipboardBackend + 'static> Panel<S, C> {
    pub fn with_clipboard(
        window: &web_sys::Window,
        config: CopierConfig,
        scanner: S,
        clipboard: C,
    ) -> Result<Rc<Self>, MountError> {
        let document = window
            .document()
            .ok_or_else(|| MountError::MissingElement("document".to_string()))?;
        let elements = PanelElements::find(&document, &config.panel)?;
        Ok(Rc::new(Self {
            document,
            elements,
            state: RefCell::new(PanelState::new()),
            scanner,
            clipboard: Rc::new(clipboard),
            config,
        }))
    }

    pub fn elements(&self) -> &PanelElements {
        &self.elements
    }

    pub fn state(&self) -> Ref<'_, PanelState> {
        self.state.borrow()
    }

    /// Wire the re-scan and copy-all buttons.
    pub fn mount(self: &Rc<Self>) {
        let this = Rc::clone(self);
        EventListener::new(&self.elements.scan_button, "click", move |_| {
            let this = Rc::clone(&this);
            wasm_bindgen_futures::spawn_local(async move {
                this.scan().await;
            });
        })
        .forget();

        let this = Rc::clone(self);
        EventListener::new(&self.elements.copy_all_button, "click", move |_| {
            let this = Rc::clone(&this);
            wasm_bindgen_futures::spawn_local(async move {
                this.copy_all().await;
            });
        })
        .forget();
    }

    /// Rebuild the list from a fresh page scan.
    pub async fn scan(&self) -> ScanStatus {
        let status = self.state.borrow_mut().begin_scan();
        self.render_status(status);

        let result = self.scanner.scan().await;

        let status = self.state.borrow_mut().apply_scan(result);
        self.render_list();
        self.render_status(status);
        tracing::debug!(?status, "panel scan finished");
        status
    }

    fn render_status(&self, status: ScanStatus) {
        self.elements
            .status_text
            .set_text_content(Some(&status.text(&self.config.messages)));
        if let Some(icon) = &self.elements.status_icon {
            icon.set_text_content(Some(status.icon()));
        }
        let class = match status.css_state() {
            "" => "status".to_string(),
            state => format!("status {state}"),
        };
        self.elements.status.set_class_name(&class);
    }

    fn render_list(&self) {
        let state = self.state.borrow();
        let formulas = state.formulas();

        self.elements
            .formula_count
            .set_text_content(Some(&formulas.len().to_string()));
        self.elements.formulas_list.set_inner_html("");
        self.elements
            .copy_all_button
            .set_disabled(!state.copy_all_enabled());

        for formula in formulas {
            match self.create_row(formula) {
                Ok(row) => {
                    if let Err(e) = self.elements.formulas_list.append_child(&row) {
                        tracing::warn!("Failed to append formula row: {:?}", e);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to build formula row"),
            }
        }
    }

    fn create_row(&self, formula: &FormulaSource) -> Result<Element, MountError> {
        let row = self.document.create_element("div")?;
        row.set_class_name("formula-item");

        // Text content, never markup: sources come from arbitrary pages.
        let preview = self.document.create_element("span")?;
        preview.set_class_name("formula-preview");
        preview.set_text_content(Some(formula.as_str()));

        let indicator = self.document.create_element("span")?;
        indicator.set_class_name("copy-indicator");
        indicator.set_text_content(Some(&self.config.messages.row_idle));

        row.append_child(&preview)?;
        row.append_child(&indicator)?;

        let clipboard = Rc::clone(&self.clipboard);
        let source = formula.as_str().to_string();
        let messages = self.config.messages.clone();
        let feedback_ms = self.config.feedback.row_feedback_ms;
        let row_for_click = row.clone();
        EventListener::new(&row, "click", move |_| {
            let clipboard = Rc::clone(&clipboard);
            let source = source.clone();
            let messages = messages.clone();
            let row = row_for_click.clone();
            let indicator = indicator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if !write_text(clipboard.as_ref(), &source).await {
                    tracing::warn!("Failed to copy formula row");
                    return;
                }
                let _ = row.class_list().add_1("copied");
                indicator.set_text_content(Some(&messages.row_copied));
                Timeout::new(feedback_ms, move || {
                    let _ = row.class_list().remove_1("copied");
                    indicator.set_text_content(Some(&messages.row_idle));
                })
                .forget();
            });
        })
        .forget();

        Ok(row)
    }

    /// Copy every listed formula as one blank-line-separated clipboard
    /// write. A no-op returning `false` when the list is empty.
    pub async fn copy_all(&self) -> bool {
        let Some(payload) = self.state.borrow().copy_all_payload() else {
            return false;
        };

        let copied = write_text(self.clipboard.as_ref(), &payload).await;
        let messages = &self.config.messages;
        let label = if copied {
            &messages.copy_all_done
        } else {
            &messages.copy_all_failed
        };

        let button = self.elements.copy_all_button.clone();
        set_button_label(&self.document, &button, label);
        let document = self.document.clone();
        let idle = messages.copy_all_idle.clone();
        Timeout::new(self.config.feedback.copy_all_feedback_ms, move || {
            set_button_label(&document, &button, &idle);
        })
        .forget();

        copied
    }
}

/// Replace a button's label, keeping a `.btn-icon` span if the markup has
/// one. The label's first word goes into the icon span, the rest follows
/// as text.
fn set_button_label(document: &web_sys::Document, button: &HtmlButtonElement, label: &str) {
    let icon = match button.query_selector(".btn-icon") {
        Ok(Some(icon)) => icon,
        _ => {
            button.set_text_content(Some(label));
            return;
        }
    };
    let (glyph, text) = match label.split_once(' ') {
        Some((glyph, text)) => (glyph, text),
        None => ("", label),
    };
    icon.set_text_content(Some(glyph));
    button.set_text_content(None);
    let rest = document.create_text_node(&format!(" {text}"));
    if button.append_child(&icon).and_then(|_| button.append_child(&rest)).is_err() {
        tracing::warn!("Failed to rebuild button label");
        button.set_text_content(Some(label));
    }
}
