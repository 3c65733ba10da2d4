//! Markup ingestion and serialisation
//!
//! Parsing goes through html5ever (via `scraper`) so that server-rendered
//! fragments are tokenised exactly as a browser would before any widget runs.

use scraper::{Html, Node};

use crate::document::{Document, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Build a document from an HTML fragment.
    pub fn parse(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let mut doc = Document::new();
        let root = doc.root();

        // parse_fragment wraps content in a synthetic <html> element.
        let mut stack: Vec<_> = fragment
            .root_element()
            .children()
            .map(|child| (root, child))
            .collect();
        stack.reverse();

        while let Some((parent, node)) = stack.pop() {
            let id = match node.value() {
                Node::Element(el) => {
                    let id = doc.create_element(el.name());
                    for (name, value) in el.attrs() {
                        doc.set_attribute(id, name, value);
                    }
                    id
                }
                Node::Text(text) => doc.create_text(&text.text),
                _ => continue,
            };
            doc.append_child(parent, id);

            let mut children: Vec<_> = node.children().map(|child| (id, child)).collect();
            children.reverse();
            stack.extend(children);
        }

        doc.seed_form_state();
        doc
    }

    fn seed_form_state(&mut self) {
        for id in self.descendants(self.root()) {
            let Some(el) = self.element(id) else {
                continue;
            };
            let checked = el.has_attr("checked");
            let value = if el.is("textarea") {
                Some(self.text_content(id))
            } else {
                el.attr("value").map(str::to_string)
            };

            if let Some(el) = self.element_mut(id) {
                el.set_checked(checked);
                if let Some(value) = value {
                    el.set_value(&value);
                }
            }
        }
    }

    /// Serialise the whole document.
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Root) => {
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
            }
            Some(NodeData::Text(text)) => out.push_str(&escape_text(text)),
            Some(NodeData::Element(el)) => {
                out.push('<');
                out.push_str(el.tag());
                for (name, value) in el.attributes() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag()) {
                    return;
                }

                for child in self.children(id) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(el.tag());
                out.push('>');
            }
            None => {}
        }
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        let doc = Document::parse(
            r#"<div id="wrap" class="a b"><p>Hi <b>there</b></p><input type="checkbox" checked></div>"#,
        );

        let wrap = doc.element_by_id("wrap").unwrap();
        assert_eq!(doc.tag(wrap), Some("div"));
        assert_eq!(doc.parent(wrap), Some(doc.root()));
        assert!(doc.has_class(wrap, "b"));
        assert_eq!(doc.text_content(wrap), "Hi there");

        let input = doc.query_first(wrap, |el| el.is_input("checkbox")).unwrap();
        assert!(doc.checked(input));
    }

    #[test]
    fn test_textarea_value_seeded_from_text() {
        let doc = Document::parse(r#"<textarea id="t">hello</textarea><input id="i" value="v">"#);
        let textarea = doc.element_by_id("t").unwrap();
        let input = doc.element_by_id("i").unwrap();

        assert_eq!(doc.value(textarea), "hello");
        assert_eq!(doc.value(input), "v");
    }

    #[test]
    fn test_serialise() {
        let doc = Document::parse(r#"<p title="a&quot;b">x &amp; y<br></p>"#);
        assert_eq!(doc.to_html(), r#"<p title="a&quot;b">x &amp; y<br></p>"#);
    }
}
