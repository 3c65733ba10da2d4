//! Arena-backed visual tree
//!
//! Nodes are never freed: detaching a node only unlinks it from its parent, so
//! every [`NodeId`] handed out stays valid for the lifetime of the document.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// An element with its attributes and live form state.
///
/// `checked` and `value` are properties, not attributes: they start from the
/// markup and then change independently, as they do in a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    checked: bool,
    value: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            checked: false,
            value: String::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Set an attribute, keeping its original position when it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(n, _)| n == name)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list: Vec<&str> = self.classes().collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = remaining.join(" ");
            self.set_attr("class", &joined);
        }
    }

    /// Force a class on or off.
    pub fn toggle_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
    }

    /// True for `<input type="{kind}">`.
    pub fn is_input(&self, kind: &str) -> bool {
        self.is("input")
            && self
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Root,
            }],
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Create an element with a class list in one step.
    pub fn create_element_with_class(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        id
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.node_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    // === Traversal ===

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    fn sibling_elements(&self, id: NodeId) -> Option<(Vec<NodeId>, usize)> {
        let parent = self.parent(id)?;
        let siblings = self.element_children(parent);
        let index = siblings.iter().position(|s| *s == id)?;
        Some((siblings, index))
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_elements(id)?;
        siblings.get(index + 1).copied()
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.sibling_elements(id)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    /// Ancestors from the parent upwards, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// Inclusive: a node contains itself.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Descendants in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn query_all<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(&predicate))
            .collect()
    }

    pub fn query_first<F>(&self, scope: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.element(*id).is_some_and(&predicate))
    }

    pub fn by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(scope, |el| el.has_class(class))
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.query_first(scope, |el| el.has_class(class))
    }

    /// Document-wide lookup; detached nodes are never found.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.query_first(self.root(), |el| el.id() == Some(id))
    }

    /// Nearest inclusive ancestor matching the predicate.
    pub fn closest<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| self.element(*n).is_some_and(&predicate))
    }

    /// The `<form>` an input belongs to, if any.
    pub fn form_owner(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|n| self.element(*n).is_some_and(|el| el.is("form")))
    }

    // === Structure mutation ===

    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    /// Insert `child` under `parent` before `reference`, or last when `reference`
    /// is `None` or not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        // Refuse to create a cycle.
        if self.contains(child, parent) {
            tracing::debug!(%parent, %child, "Refusing to insert a node into its own subtree");
            return;
        }
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            let index = reference
                .and_then(|r| p.children.iter().position(|c| *c == r))
                .unwrap_or(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Place `new` directly after `node` in its parent.
    pub fn insert_after(&mut self, node: NodeId, new: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let next = {
            let siblings = self.children(parent);
            siblings
                .iter()
                .position(|c| *c == node)
                .and_then(|i| siblings.get(i + 1).copied())
        };
        // `new` may currently be that next sibling.
        if next == Some(new) {
            return;
        }
        self.insert_before(parent, new, next);
    }

    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        self.insert_before(parent, new, Some(old));
        self.detach(old);
    }

    /// Move every child of `from` to the end of `to`.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.children(from).to_vec();
        for child in children {
            self.append_child(to, child);
        }
    }

    // === Attributes and classes ===

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_attr(name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_class(class);
        }
    }

    pub fn toggle_class(&mut self, id: NodeId, class: &str, present: bool) {
        if let Some(el) = self.element_mut(id) {
            el.toggle_class(class, present);
        }
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::checked)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(el) = self.element_mut(id) {
            el.set_checked(checked);
        }
    }

    pub fn value(&self, id: NodeId) -> &str {
        self.element(id).map(Element::value).unwrap_or_default()
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_value(value);
        }
    }

    // === Text ===

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(text)) = self.data(id) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(NodeData::Text(text)) = self.data(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        let node = self.create_text(text);
        self.append_child(id, node);
    }

    // === Focus ===

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, id: Option<NodeId>) {
        self.focused = id;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_round_trip() {
        let mut el = Element::new("DIV");
        assert_eq!(el.tag(), "div");

        el.add_class("a");
        el.add_class("b");
        el.add_class("a");
        assert_eq!(el.attr("class"), Some("a b"));

        el.remove_class("a");
        assert_eq!(el.attr("class"), Some("b"));

        el.toggle_class("b", false);
        assert!(!el.has_attr("class"));
    }

    #[test]
    fn test_set_attr_keeps_position() {
        let mut el = Element::new("a");
        el.set_attr("href", "#one");
        el.set_attr("id", "link");
        el.set_attr("href", "#two");

        let names: Vec<&str> = el.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["href", "id"]);
        assert_eq!(el.attr("href"), Some("#two"));
    }

    #[test]
    fn test_insert_and_siblings() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.create_element("ul");
        doc.append_child(root, list);

        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(list, a);
        doc.append_child(list, c);
        doc.insert_after(a, b);

        assert_eq!(doc.children(list), &[a, b, c]);
        assert_eq!(doc.next_element_sibling(a), Some(b));
        assert_eq!(doc.previous_element_sibling(a), None);
        assert_eq!(doc.next_element_sibling(c), None);
        assert!(doc.contains(root, c));

        doc.detach(b);
        assert_eq!(doc.children(list), &[a, c]);
        assert!(!doc.is_connected(b));
    }

    #[test]
    fn test_refuses_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(doc.root(), outer);
        doc.append_child(outer, inner);

        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(doc.root()));
    }

    #[test]
    fn test_text_content_and_set_text() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_child(doc.root(), p);
        let hello = doc.create_text("Hello ");
        let em = doc.create_element("em");
        let world = doc.create_text("world");
        doc.append_child(p, hello);
        doc.append_child(p, em);
        doc.append_child(em, world);

        assert_eq!(doc.text_content(p), "Hello world");

        doc.set_text(p, "Bye");
        assert_eq!(doc.text_content(p), "Bye");
        assert_eq!(doc.children(p).len(), 1);
    }
}
