use crate::dom::{ClickEvent, ClickListener, Dom, DomError, ReloadTarget};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Computed `background-color` of an element with no background set
pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Handle to a node in a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    listeners: Vec<Rc<dyn Fn(&dyn ClickEvent)>>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }
}

/// Class-selector style rule: `.class { property: value }`
struct Rule {
    class: String,
    property: String,
    value: String,
}

#[derive(Default)]
struct MemoryClickEvent {
    default_prevented: Cell<bool>,
}

impl ClickEvent for MemoryClickEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}

/// Minimal document for exercising the controller without a browser.
///
/// Models an `<html><body>` tree, class lists, attributes, inline styles, class-based
/// style rules for computed style, bubbling click listeners and page reloads. Every
/// mutating operation bumps [`MemoryDom::mutation_count`].
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    body: NodeId,
    rules: RefCell<Vec<Rule>>,
    reloads: RefCell<Vec<ReloadTarget>>,
    mutations: Cell<usize>,
    fail_create: Cell<bool>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut html = NodeData::new("html");
        let mut body = NodeData::new("body");
        body.parent = Some(NodeId(0));
        html.children.push(NodeId(1));
        Self {
            nodes: RefCell::new(vec![html, body]),
            root: NodeId(0),
            body: NodeId(1),
            rules: RefCell::new(Vec::new()),
            reloads: RefCell::new(Vec::new()),
            mutations: Cell::new(0),
            fail_create: Cell::new(false),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn element(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(tag));
        NodeId(nodes.len() - 1)
    }

    /// Create an element as the last child of `parent`
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.element(tag);
        self.link(parent, id, None);
        id
    }

    /// Create an element with classes as the last child of `parent`
    pub fn append_with_classes(&self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.append(parent, tag);
        let mut nodes = self.nodes.borrow_mut();
        for class in classes {
            nodes[id.0].classes.push(class.to_string());
        }
        id
    }

    /// Register `.class { property: value }`. Later rules win.
    pub fn add_rule(&self, class: &str, property: &str, value: &str) {
        self.rules.borrow_mut().push(Rule {
            class: class.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.nodes.borrow()[node.0].classes.clone()
    }

    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    /// Whether the node is reachable from the document root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.nodes.borrow()[node.0].listeners.len()
    }

    /// Dispatch a bubbling click. Returns whether the default action was prevented.
    pub fn click(&self, node: NodeId) -> bool {
        let listeners: Vec<Rc<dyn Fn(&dyn ClickEvent)>> = {
            let nodes = self.nodes.borrow();
            let mut path = Vec::new();
            let mut current = Some(node);
            while let Some(id) = current {
                path.extend(nodes[id.0].listeners.iter().cloned());
                current = nodes[id.0].parent;
            }
            path
        };
        let event = MemoryClickEvent::default();
        for listener in listeners {
            listener(&event);
        }
        event.default_prevented.get()
    }

    pub fn reloads(&self) -> Vec<ReloadTarget> {
        self.reloads.borrow().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    /// Make every following `create_element` fail
    pub fn fail_element_creation(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    fn touch(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }

    fn unlink(nodes: &mut [NodeData], child: NodeId) {
        if let Some(parent) = nodes[child.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    fn link(&self, parent: NodeId, child: NodeId, before: Option<NodeId>) {
        let mut nodes = self.nodes.borrow_mut();
        Self::unlink(&mut nodes, child);
        let siblings = &mut nodes[parent.0].children;
        let index = before
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        nodes[child.0].parent = Some(parent);
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    fn collect_with_class(&self, node: NodeId, class: &str, out: &mut Vec<NodeId>) {
        let children = {
            let nodes = self.nodes.borrow();
            if nodes[node.0].classes.iter().any(|c| c == class) {
                out.push(node);
            }
            nodes[node.0].children.clone()
        };
        for child in children {
            self.collect_with_class(child, class, out);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if self.fail_create.get() {
            return Err(DomError::CreateElement {
                tag: tag.to_string(),
                reason: "creation disabled".to_string(),
            });
        }
        Ok(self.element(tag))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.touch();
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.touch();
        self.nodes.borrow_mut()[node.0].classes.retain(|c| c != class);
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.touch();
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.touch();
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> String {
        if let Some(inline) = self.inline_style(*node, property) {
            return inline;
        }
        let classes = self.classes(*node);
        let from_rule = self
            .rules
            .borrow()
            .iter()
            .rev()
            .find(|r| r.property == property && classes.contains(&r.class))
            .map(|r| r.value.clone());
        if let Some(value) = from_rule {
            return value;
        }
        match property {
            "background-color" => TRANSPARENT.to_string(),
            "animation-duration" => "0s".to_string(),
            _ => String::new(),
        }
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        if self.is_ancestor_or_self(*child, *parent) {
            return Err(DomError::Operation(
                "cannot append a node inside itself".to_string(),
            ));
        }
        self.touch();
        self.link(*parent, *child, None);
        Ok(())
    }

    fn insert_before(
        &self,
        parent: &NodeId,
        child: &NodeId,
        reference: &NodeId,
    ) -> Result<(), DomError> {
        if self.parent(reference) != Some(*parent) {
            return Err(DomError::Operation(
                "reference node is not a child of parent".to_string(),
            ));
        }
        if self.is_ancestor_or_self(*child, *parent) {
            return Err(DomError::Operation(
                "cannot insert a node inside itself".to_string(),
            ));
        }
        self.touch();
        self.link(*parent, *child, Some(*reference));
        Ok(())
    }

    fn detach(&self, node: &NodeId) -> Result<(), DomError> {
        self.touch();
        Self::unlink(&mut self.nodes.borrow_mut(), *node);
        Ok(())
    }

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_with_class(self.root, class, &mut out);
        out
    }

    fn on_click(&self, node: &NodeId, listener: ClickListener) -> Result<(), DomError> {
        self.nodes.borrow_mut()[node.0]
            .listeners
            .push(Rc::from(listener));
        Ok(())
    }

    fn reload(&self, target: ReloadTarget) {
        self.reloads.borrow_mut().push(target);
    }
}
