//! Minimal in-memory element tree for exercising the extractor natively.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::node::{FormulaDocument, FormulaElement};

#[derive(Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<Rc<Node>>>,
}

#[derive(Debug, Clone)]
pub struct TestElement(Rc<Node>);

impl FormulaElement for TestElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.iter().any(|c| c == class)
    }

    fn tag_name(&self) -> String {
        self.0.tag.clone()
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(TestElement)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.0.children.borrow().iter().cloned().map(TestElement).collect()
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        let parent = self.0.parent.borrow().upgrade()?;
        let siblings = parent.children.borrow();
        let idx = siblings.iter().position(|s| Rc::ptr_eq(s, &self.0))?;
        idx.checked_sub(1)
            .map(|prev| TestElement(siblings[prev].clone()))
    }

    fn text_content(&self) -> String {
        let mut out = self.0.text.clone();
        for child in self.child_elements() {
            out.push_str(&child.text_content());
        }
        out
    }
}

pub struct ElementBuilder {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<ElementBuilder>,
}

pub fn el(tag: &str) -> ElementBuilder {
    ElementBuilder {
        tag: tag.to_string(),
        classes: Vec::new(),
        attrs: Vec::new(),
        text: String::new(),
        children: Vec::new(),
    }
}

impl ElementBuilder {
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> TestElement {
        TestElement(self.into_node(Weak::new()))
    }

    fn into_node(self, parent: Weak<Node>) -> Rc<Node> {
        let node = Rc::new(Node {
            tag: self.tag,
            classes: self.classes,
            attrs: self.attrs,
            text: self.text,
            parent: RefCell::new(parent),
            children: RefCell::new(Vec::new()),
        });
        let children: Vec<_> = self
            .children
            .into_iter()
            .map(|c| c.into_node(Rc::downgrade(&node)))
            .collect();
        *node.children.borrow_mut() = children;
        node
    }
}

pub struct TestDocument {
    root: TestElement,
}

impl TestDocument {
    pub fn new(root: ElementBuilder) -> Self {
        Self { root: root.build() }
    }

    /// First element (root included) whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> TestElement {
        let mut stack = vec![self.root.clone()];
        while let Some(element) = stack.pop() {
            if element.attribute("id").as_deref() == Some(id) {
                return element;
            }
            stack.extend(element.child_elements());
        }
        panic!("no element with id {id}");
    }
}

impl FormulaDocument for TestDocument {
    type Element = TestElement;

    fn root(&self) -> Option<TestElement> {
        Some(self.root.clone())
    }
}
