//! Click-to-copy behavior attached directly to formulas on the live page.
//!
//! `attach` is idempotent: each formula element gets the init marker
//! attribute the first time it is seen and is skipped afterwards. It runs
//! once at startup and again from the mutation observer whenever added nodes
//! bring new formulas with them.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use katex_copier_core::{
    ClipboardBackend, CopierConfig, CopyError, FormulaDocument, MarkerConfig, Notice,
    contains_formula, resolve_source, write_text,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, MutationObserver, MutationObserverInit, MutationRecord};

use crate::clipboard::BrowserClipboard;
use crate::dom::{PageDocument, PageElement, node_list_elements};
use crate::error::MountError;
use crate::overlay::{Notification, Tooltip};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Page-resident interactor: one per document.
///
/// Element listeners hold weak references, so behavior stops when the last
/// `Rc` is dropped.
pub struct Interactor<C = BrowserClipboard> {
    document: PageDocument,
    config: CopierConfig,
    tooltip: Tooltip,
    notification: Notification,
    clipboard: C,
    observer: RefCell<Option<(MutationObserver, ObserverCallback)>>,
}

impl Interactor {
    /// Create the shared overlay nodes for `window`'s document, copying
    /// through the browser clipboard.
    pub fn new(window: &web_sys::Window, config: CopierConfig) -> Result<Rc<Self>, MountError> {
        let clipboard = BrowserClipboard::new(window.clone()).ok_or(MountError::NoWindow)?;
        Self::with_clipboard(window, config, clipboard)
    }
}

impl<C: ClipboardBackend + 'static> Interactor<C> {
    pub fn with_clipboard(
        window: &web_sys::Window,
        config: CopierConfig,
        clipboard: C,
    ) -> Result<Rc<Self>, MountError> {
        let document = window
            .document()
            .ok_or_else(|| MountError::MissingElement("document".to_string()))?;
        Ok(Rc::new(Self {
            tooltip: Tooltip::create(window, &config)?,
            notification: Notification::create(window, &config)?,
            document: PageDocument::new(document),
            config,
            clipboard,
            observer: RefCell::new(None),
        }))
    }

    pub fn config(&self) -> &CopierConfig {
        &self.config
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Attach behavior to every formula element not yet initialized.
    ///
    /// Returns how many elements were newly attached.
    pub fn attach(self: &Rc<Self>) -> usize {
        let markers = &self.config.markers;
        let mut attached = 0;

        for element in self.document.select_all(&markers.formula()) {
            let raw = element.as_element();
            if raw.has_attribute(&markers.init_attribute) {
                continue;
            }
            if let Err(e) = raw.set_attribute(&markers.init_attribute, "true") {
                tracing::warn!("Failed to mark formula element: {:?}", e);
                continue;
            }
            let _ = raw.class_list().add_1(&markers.enabled_class);
            self.register_listeners(&element);
            attached += 1;
        }

        if attached > 0 {
            tracing::debug!(attached, "attached click-to-copy to formula elements");
        }
        attached
    }

    fn register_listeners(self: &Rc<Self>, element: &PageElement) {
        let target = element.as_element();

        let weak = Rc::downgrade(self);
        let el = element.clone();
        EventListener::new(target, "mouseenter", move |event| {
            let (Some(this), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            if resolve_source(&el, &this.config.markers).is_some() {
                this.tooltip.show_at(mouse);
            }
        })
        .forget();

        let weak = Rc::downgrade(self);
        EventListener::new(target, "mousemove", move |event| {
            if let (Some(this), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) {
                this.tooltip.move_to(mouse);
            }
        })
        .forget();

        let weak = Rc::downgrade(self);
        EventListener::new(target, "mouseleave", move |_| {
            if let Some(this) = weak.upgrade() {
                this.tooltip.hide();
            }
        })
        .forget();

        let weak = Rc::downgrade(self);
        let el = element.clone();
        EventListener::new_with_options(
            target,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(this) = weak.upgrade() else {
                    return;
                };
                event.prevent_default();
                event.stop_propagation();
                let el = el.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let _ = this.copy_element(&el).await;
                });
            },
        )
        .forget();
    }

    /// Resolve and copy one formula's source, with notification and
    /// element feedback. This is what a click does.
    pub async fn copy_element(&self, element: &PageElement) -> Result<(), CopyError> {
        let result = match resolve_source(element, &self.config.markers) {
            None => Err(CopyError::NoSource),
            Some(source) => {
                if write_text(&self.clipboard, source.as_str()).await {
                    Ok(())
                } else {
                    Err(CopyError::Clipboard)
                }
            }
        };

        if let Err(e) = &result {
            tracing::info!(error = %e, "click-to-copy did not complete");
        }
        self.notification
            .show(&Notice::for_copy(&result, &self.config.messages));
        if result.is_ok() {
            self.flash_copied(element);
        }
        self.tooltip.hide();
        result
    }

    fn flash_copied(&self, element: &PageElement) {
        let raw = element.as_element().clone();
        let class = self.config.markers.copied_class.clone();
        let _ = raw.class_list().add_1(&class);
        Timeout::new(self.config.feedback.element_flash_ms, move || {
            let _ = raw.class_list().remove_1(&class);
        })
        .forget();
    }

    /// Watch the body for added subtrees and attach to any new formulas.
    ///
    /// Calling this again replaces the previous observer.
    pub fn observe(self: &Rc<Self>) -> Result<(), MountError> {
        let body = self
            .document
            .as_document()
            .body()
            .ok_or_else(|| MountError::MissingElement("body".to_string()))?;

        let weak = Rc::downgrade(self);
        let callback: ObserverCallback =
            Closure::new(move |records: js_sys::Array, _observer: MutationObserver| {
                let Some(this) = weak.upgrade() else {
                    return;
                };
                if records_add_formula(&records, &this.config.markers) {
                    this.attach();
                }
            });

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&body, &options)?;

        if let Some((previous, _)) = self.observer.replace(Some((observer, callback))) {
            previous.disconnect();
        }
        Ok(())
    }
}

impl<C> Drop for Interactor<C> {
    fn drop(&mut self) {
        // The callback closure is freed with us; the observer must not
        // outlive it.
        if let Some((observer, _)) = self.observer.get_mut().take() {
            observer.disconnect();
        }
    }
}

/// Whether any added element node is, or contains, a formula element.
fn records_add_formula(records: &js_sys::Array, markers: &MarkerConfig) -> bool {
    records.iter().any(|record| {
        let record: MutationRecord = record.unchecked_into();
        node_list_elements(&record.added_nodes())
            .into_iter()
            .any(|element| contains_formula(&PageElement::new(element), markers))
    })
}
