//! The tooltip and notification nodes shared by every formula on the page.
//!
//! Both are created once at startup and appended to `<body>`; handlers get
//! them by reference and only toggle classes, text and position.

use gloo_timers::callback::Timeout;
use katex_copier_core::{CopierConfig, Notice, Point, Size, tooltip_position};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::error::MountError;

const TOOLTIP_CLASS: &str = "katex-copier-tooltip";
const NOTIFICATION_CLASS: &str = "katex-copier-notification";
const SHOW_CLASS: &str = "show";

fn create_overlay(document: &web_sys::Document, class: &str) -> Result<HtmlElement, MountError> {
    let body = document
        .body()
        .ok_or_else(|| MountError::MissingElement("body".to_string()))?;
    let element: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| MountError::Dom("div is not an HtmlElement".to_string()))?;
    element.set_class_name(class);
    body.append_child(&element)?;
    Ok(element)
}

/// Cursor-following hint shown while hovering a copyable formula.
pub struct Tooltip {
    window: web_sys::Window,
    element: HtmlElement,
    offset: f64,
    margin: f64,
}

impl Tooltip {
    pub fn create(window: &web_sys::Window, config: &CopierConfig) -> Result<Self, MountError> {
        let document = window
            .document()
            .ok_or_else(|| MountError::MissingElement("document".to_string()))?;
        let element = create_overlay(&document, TOOLTIP_CLASS)?;
        element.set_text_content(Some(&config.messages.tooltip));
        Ok(Self {
            window: window.clone(),
            element,
            offset: config.feedback.tooltip_offset,
            margin: config.feedback.viewport_margin,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn is_shown(&self) -> bool {
        self.element.class_list().contains(SHOW_CLASS)
    }

    pub fn show_at(&self, event: &MouseEvent) {
        let _ = self.element.class_list().add_1(SHOW_CLASS);
        self.move_to(event);
    }

    pub fn move_to(&self, event: &MouseEvent) {
        let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
        self.place(pointer);
    }

    /// Position relative to a pointer location in viewport coordinates.
    pub fn place(&self, pointer: Point) -> Point {
        let rect = self.element.get_bounding_client_rect();
        let viewport = Size::new(
            viewport_dimension(self.window.inner_width()),
            viewport_dimension(self.window.inner_height()),
        );
        let pos = tooltip_position(
            pointer,
            Size::new(rect.width(), rect.height()),
            viewport,
            self.offset,
            self.margin,
        );
        let style = self.element.style();
        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));
        pos
    }

    pub fn hide(&self) {
        let _ = self.element.class_list().remove_1(SHOW_CLASS);
    }
}

// An unreadable viewport size disables clamping rather than pinning the
// tooltip to the top-left corner.
fn viewport_dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(f64::INFINITY)
}

/// Success/failure banner shown after a click-to-copy.
pub struct Notification {
    element: HtmlElement,
    duration_ms: u32,
}

impl Notification {
    pub fn create(window: &web_sys::Window, config: &CopierConfig) -> Result<Self, MountError> {
        let document = window
            .document()
            .ok_or_else(|| MountError::MissingElement("document".to_string()))?;
        Ok(Self {
            element: create_overlay(&document, NOTIFICATION_CLASS)?,
            duration_ms: config.feedback.notification_ms,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Show `notice`, hiding it again after the configured duration.
    ///
    /// Overlapping calls are not cancelled; an earlier timer may hide a
    /// later notice early.
    pub fn show(&self, notice: &Notice) {
        self.element.set_text_content(Some(&notice.text));
        self.element
            .set_class_name(&format!("{NOTIFICATION_CLASS} {}", notice.css_state()));
        let _ = self.element.class_list().add_1(SHOW_CLASS);

        let element = self.element.clone();
        Timeout::new(self.duration_ms, move || {
            let _ = element.class_list().remove_1(SHOW_CLASS);
        })
        .forget();
    }
}
