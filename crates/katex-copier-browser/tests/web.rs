//! WASM browser tests for katex-copier-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use gloo_timers::future::TimeoutFuture;
use katex_copier_browser::{
    BrowserClipboard, ClipboardBackend, ClipboardError, CopierConfig, CopyError, FormulaDocument,
    Interactor, LocalScanner, MarkerConfig, PageDocument, PageElement, PageResponse, Panel,
    PanelIds, PanelRequest, ScanStatus, SourceOrigin, resolve_source, resolve_source_with_origin,
    scan_document,
};

const ANNOTATED: &str = r#"<span class="katex"><span class="katex-mathml"><math><semantics><mrow><mi>x</mi></mrow><annotation encoding="application/x-tex">{tex}</annotation></semantics></math></span><span class="katex-html" aria-hidden="true">x</span></span>"#;

fn katex(tex: &str) -> String {
    ANNOTATED.replace("{tex}", tex)
}

fn window() -> web_sys::Window {
    web_sys::window().expect("window")
}

fn document() -> web_sys::Document {
    window().document().expect("document")
}

/// A container appended to `<body>` and removed again on drop.
struct Fixture {
    root: web_sys::Element,
}

impl Fixture {
    fn new(html: &str) -> Self {
        let root = document().create_element("div").unwrap();
        root.set_inner_html(html);
        document().body().unwrap().append_child(&root).unwrap();
        Self { root }
    }

    fn get(&self, selector: &str) -> PageElement {
        PageElement::new(self.root.query_selector(selector).unwrap().expect(selector))
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

/// Clipboard that records every write instead of touching the system one.
#[derive(Clone, Default)]
struct RecordingClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl RecordingClipboard {
    fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl ClipboardBackend for RecordingClipboard {
    async fn write_async(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn write_legacy(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Legacy("not reached".to_string()))
    }
}

// === Source resolution on the live DOM ===

#[wasm_bindgen_test]
fn test_resolve_ancestor_precedence() {
    let fx = Fixture::new(&format!(
        r#"<div class="math-block" data-math="\frac{{a}}{{b}}"><span id="t" data-math="a/b">{}</span></div>"#,
        katex("\\frac a b")
    ));
    let el = fx.get("#t .katex");
    // The katex node's parent carries data-math too; nearest wrapper wins.
    assert_eq!(
        resolve_source(&el, &MarkerConfig::default()).unwrap().as_str(),
        "a/b"
    );

    let outer = fx.get("#t");
    let (source, origin) = resolve_source_with_origin(&outer, &MarkerConfig::default()).unwrap();
    assert_eq!(source.as_str(), "\\frac{a}{b}");
    assert_eq!(origin, SourceOrigin::Wrapper);
}

#[wasm_bindgen_test]
fn test_resolve_annotation_trimmed() {
    let fx = Fixture::new(&katex("\n   a +  b  \n"));
    let el = fx.get(".katex");
    let (source, origin) = resolve_source_with_origin(&el, &MarkerConfig::default()).unwrap();
    assert_eq!(source.as_str(), "a +  b");
    assert_eq!(origin, SourceOrigin::Annotation);
}

#[wasm_bindgen_test]
fn test_resolve_nothing() {
    let fx = Fixture::new(r#"<span class="katex"><span>x</span></span>"#);
    assert!(resolve_source(&fx.get(".katex"), &MarkerConfig::default()).is_none());
}

// === Page scan ===

#[wasm_bindgen_test]
fn test_scan_dedups_in_document_order() {
    let fx = Fixture::new(&format!(
        "<p>{}</p><p>{}</p><p>{}</p>",
        katex("F1"),
        katex("F2"),
        katex("F1")
    ));
    let doc = PageDocument::new(document());
    let found = scan_document(&doc, &MarkerConfig::default()).into_strings();
    assert_eq!(found, vec!["F1", "F2"]);
    drop(fx);
}

#[wasm_bindgen_test]
fn test_scan_legacy_script_convention() {
    let fx = Fixture::new(
        r#"<script type="math/tex">  \beta </script><span class="MathJax">b</span>"#,
    );
    let doc = PageDocument::new(document());
    let found = scan_document(&doc, &MarkerConfig::default()).into_strings();
    assert_eq!(found, vec!["\\beta"]);
    drop(fx);
}

#[wasm_bindgen_test]
fn test_select_all_uses_native_selectors() {
    let fx = Fixture::new(&format!("{}{}", katex("a"), katex("b")));
    let doc = PageDocument::new(document());
    assert_eq!(doc.select_all(&MarkerConfig::default().formula()).len(), 2);
    drop(fx);
}

// === Clipboard ===

#[wasm_bindgen_test]
fn test_legacy_copy_leaves_no_textarea() {
    let clipboard = BrowserClipboard::current().unwrap();
    // Headless browsers may refuse execCommand; either way the temporary
    // element must be gone afterwards.
    let _ = clipboard.write_legacy("x^2");
    assert_eq!(document().query_selector_all("textarea").unwrap().length(), 0);
}

// === Interactor ===

#[wasm_bindgen_test]
fn test_attach_is_idempotent() {
    let fx = Fixture::new(&format!("{}{}", katex("a"), katex("b")));
    let interactor = Interactor::new(&window(), CopierConfig::default()).unwrap();

    assert_eq!(interactor.attach(), 2);
    assert_eq!(interactor.attach(), 0);

    let el = fx.get(".katex");
    let raw = el.as_element();
    assert_eq!(
        raw.get_attribute("data-katex-copier-init").as_deref(),
        Some("true")
    );
    assert!(raw.class_list().contains("katex-copier-enabled"));
}

#[wasm_bindgen_test]
async fn test_observer_attaches_added_formulas() {
    let fx = Fixture::new("<div id=\"host\"></div>");
    let interactor = Interactor::new(&window(), CopierConfig::default()).unwrap();
    interactor.attach();
    interactor.observe().unwrap();

    let host = fx.get("#host");
    host.as_element().set_inner_html(&format!("<p>{}</p>", katex("late")));

    TimeoutFuture::new(0).await;

    let el = fx.get("#host .katex");
    assert!(el.as_element().has_attribute("data-katex-copier-init"));
    assert_eq!(interactor.attach(), 0);
}

#[wasm_bindgen_test]
async fn test_dropped_interactor_stops_observing() {
    let fx = Fixture::new(&format!("{}<div id=\"host\"></div>", katex("a")));
    let interactor = Interactor::new(&window(), CopierConfig::default()).unwrap();
    assert_eq!(interactor.attach(), 1);
    interactor.observe().unwrap();

    let weak = Rc::downgrade(&interactor);
    drop(interactor);
    assert!(weak.upgrade().is_none());

    fx.get("#host").as_element().set_inner_html(&katex("late"));
    TimeoutFuture::new(0).await;

    let late = fx.get("#host .katex");
    assert!(!late.as_element().has_attribute("data-katex-copier-init"));
}

#[wasm_bindgen_test]
async fn test_click_without_source_reports_no_source() {
    let fx = Fixture::new(r#"<span class="katex"><span>x</span></span>"#);
    let interactor = Interactor::new(&window(), CopierConfig::default()).unwrap();

    let result = interactor.copy_element(&fx.get(".katex")).await;
    assert_eq!(result, Err(CopyError::NoSource));

    let notification = interactor.notification().element();
    assert_eq!(
        notification.text_content().as_deref(),
        Some("✗ No LaTeX source found")
    );
    assert!(notification.class_list().contains("error"));
    assert!(notification.class_list().contains("show"));
    assert!(!interactor.tooltip().is_shown());
}

#[wasm_bindgen_test]
async fn test_click_copies_once_with_success_feedback() {
    let fx = Fixture::new(&katex("e^{i\\pi}"));
    let clipboard = RecordingClipboard::default();
    let interactor =
        Interactor::with_clipboard(&window(), CopierConfig::default(), clipboard.clone()).unwrap();

    assert_eq!(interactor.attach(), 1);
    assert_eq!(interactor.attach(), 0);

    let el = fx.get(".katex");
    let click = web_sys::MouseEvent::new("click").unwrap();
    el.as_element().dispatch_event(&click).unwrap();
    TimeoutFuture::new(0).await;

    assert_eq!(clipboard.writes(), vec!["e^{i\\pi}"]);
    let notification = interactor.notification().element();
    assert_eq!(
        notification.text_content().as_deref(),
        Some("✓ LaTeX copied!")
    );
    assert!(notification.class_list().contains("success"));
    assert!(el.as_element().class_list().contains("katex-copier-copied"));
}

// === Panel ===

fn panel_fixture(prefix: &str) -> (Fixture, PanelIds) {
    let ids = PanelIds {
        status: format!("{prefix}-status"),
        status_text: format!("{prefix}-status-text"),
        formula_count: format!("{prefix}-count"),
        formulas_list: format!("{prefix}-list"),
        scan_button: format!("{prefix}-scan"),
        copy_all_button: format!("{prefix}-copy-all"),
    };
    let html = format!(
        r#"<div id="{}" class="status"><span class="status-icon"></span><span id="{}"></span></div>
<span id="{}"></span><div id="{}"></div>
<button id="{}">Scan</button><button id="{}"><span class="btn-icon">📋</span> Copy All</button>"#,
        ids.status,
        ids.status_text,
        ids.formula_count,
        ids.formulas_list,
        ids.scan_button,
        ids.copy_all_button
    );
    (Fixture::new(&html), ids)
}

#[wasm_bindgen_test]
async fn test_panel_scan_lists_distinct_formulas() {
    let formulas = Fixture::new(&format!("{}{}{}", katex("F1"), katex("F2"), katex("F1")));
    let (_panel_fx, ids) = panel_fixture("found");
    let mut config = CopierConfig::default();
    config.panel = ids;

    let scanner = LocalScanner::new(document(), config.markers.clone());
    let panel = Panel::new(&window(), config, scanner).unwrap();

    assert_eq!(panel.scan().await, ScanStatus::Found(2));

    let elements = panel.elements();
    assert_eq!(elements.formula_count.text_content().as_deref(), Some("2"));
    assert_eq!(elements.formulas_list.children().length(), 2);
    assert_eq!(
        elements.status_text.text_content().as_deref(),
        Some("Found 2 formulas!")
    );
    assert!(elements.status.class_list().contains("success"));
    assert!(!elements.copy_all_button.disabled());

    let previews: Vec<_> = (0..2)
        .filter_map(|i| elements.formulas_list.children().item(i))
        .filter_map(|row| row.query_selector(".formula-preview").ok().flatten())
        .filter_map(|p| p.text_content())
        .collect();
    assert_eq!(previews, vec!["F1", "F2"]);
    assert_eq!(panel.state().copy_all_payload().as_deref(), Some("F1\n\nF2"));
    drop(formulas);
}

#[wasm_bindgen_test]
async fn test_panel_copy_all_disabled_when_empty() {
    let (_panel_fx, ids) = panel_fixture("empty");
    let mut config = CopierConfig::default();
    config.panel = ids;

    let scanner = LocalScanner::new(document(), config.markers.clone());
    let panel = Panel::new(&window(), config, scanner).unwrap();

    assert_eq!(panel.scan().await, ScanStatus::NoneFound);
    let elements = panel.elements();
    assert!(elements.copy_all_button.disabled());
    assert_eq!(elements.formula_count.text_content().as_deref(), Some("0"));
    assert!(elements.status.class_list().contains("error"));

    // No clipboard write happens, so the button label never changes.
    let label_before = elements.copy_all_button.text_content();
    assert!(!panel.copy_all().await);
    assert_eq!(elements.copy_all_button.text_content(), label_before);
}

#[wasm_bindgen_test]
fn test_panel_missing_element_is_an_error() {
    let mut config = CopierConfig::default();
    config.panel.status = "does-not-exist".to_string();
    let scanner = LocalScanner::new(document(), config.markers.clone());
    assert!(Panel::new(&window(), config, scanner).is_err());
}

#[wasm_bindgen_test]
async fn test_panel_row_click_copies_that_formula() {
    let formulas = Fixture::new(&format!("{}{}", katex("F1"), katex("F2")));
    let (_panel_fx, ids) = panel_fixture("rows");
    let mut config = CopierConfig::default();
    config.panel = ids;
    config.feedback.row_feedback_ms = 30;

    let clipboard = RecordingClipboard::default();
    let scanner = LocalScanner::new(document(), config.markers.clone());
    let panel = Panel::with_clipboard(&window(), config, scanner, clipboard.clone()).unwrap();
    assert_eq!(panel.scan().await, ScanStatus::Found(2));

    let row = panel.elements().formulas_list.children().item(1).unwrap();
    let indicator = row.query_selector(".copy-indicator").unwrap().unwrap();
    row.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
    TimeoutFuture::new(0).await;

    assert_eq!(clipboard.writes(), vec!["F2"]);
    assert!(row.class_list().contains("copied"));
    assert_eq!(indicator.text_content().as_deref(), Some("Copied!"));

    TimeoutFuture::new(60).await;
    assert!(!row.class_list().contains("copied"));
    assert_eq!(indicator.text_content().as_deref(), Some("Click to copy"));
    drop(formulas);
}

#[wasm_bindgen_test]
async fn test_panel_copy_all_writes_once() {
    let formulas = Fixture::new(&format!("{}{}{}", katex("F1"), katex("F2"), katex("F1")));
    let (_panel_fx, ids) = panel_fixture("all");
    let mut config = CopierConfig::default();
    config.panel = ids;
    config.feedback.copy_all_feedback_ms = 30;

    let clipboard = RecordingClipboard::default();
    let scanner = LocalScanner::new(document(), config.markers.clone());
    let panel = Panel::with_clipboard(&window(), config, scanner, clipboard.clone()).unwrap();
    panel.scan().await;

    assert!(panel.copy_all().await);
    assert_eq!(clipboard.writes(), vec!["F1\n\nF2"]);

    let button = &panel.elements().copy_all_button;
    assert_eq!(button.text_content().as_deref(), Some("✓ Copied!"));
    let icon = button.query_selector(".btn-icon").unwrap().unwrap();
    assert_eq!(icon.text_content().as_deref(), Some("✓"));

    TimeoutFuture::new(60).await;
    assert_eq!(button.text_content().as_deref(), Some("📋 Copy All"));
    assert!(button.query_selector(".btn-icon").unwrap().is_some());
    drop(formulas);
}

// === Messaging payloads ===

#[wasm_bindgen_test]
fn test_message_shapes() {
    let request = serde_wasm_bindgen::to_value(&PanelRequest::ScanFormulas).unwrap();
    let kind = js_sys::Reflect::get(&request, &"type".into()).unwrap();
    assert_eq!(kind.as_string().as_deref(), Some("scanFormulas"));

    let response = js_sys::JSON::parse(r#"{"type":"formulas","formulas":["a","b"]}"#).unwrap();
    let parsed: PageResponse = serde_wasm_bindgen::from_value(response).unwrap();
    assert_eq!(
        parsed,
        PageResponse::Formulas {
            formulas: vec!["a".to_string(), "b".to_string()]
        }
    );

    let not_ours = js_sys::JSON::parse(r#"{"type":"somethingElse"}"#).unwrap();
    assert!(serde_wasm_bindgen::from_value::<PanelRequest>(not_ours).is_err());
}
