//! A link and the panel it selects

use unfurl_dom::{fragment_of, AttributeSync, Document, NodeId};

pub(crate) const ITEM_SELECTED: &str = "tabs__list-item--selected";
pub(crate) const PANEL_HIDDEN: &str = "tabs__panel--hidden";

#[derive(Debug, Clone)]
pub struct Tab {
    link: NodeId,
    item: Option<NodeId>,
    panel: NodeId,
    fragment: String,
    /// Link `id` before setup, put back on teardown.
    original_id: Option<String>,
    sync: AttributeSync,
}

impl Tab {
    /// Pair a link with the panel inside `scope` whose id is the link's
    /// fragment. `None` when either side is missing.
    pub(crate) fn matched(doc: &Document, scope: NodeId, link: NodeId) -> Option<Self> {
        let fragment = fragment_of(doc.attribute(link, "href")?)?.into_owned();
        let panel = doc.query_first(scope, |el| el.id() == Some(fragment.as_str()))?;
        let item = doc.parent(link).filter(|p| doc.is_element(*p));

        let mut sync = AttributeSync::new()
            .attribute(link, "aria-selected")
            .values(link, "tabindex", "0", "-1")
            .class_when_false(panel, PANEL_HIDDEN);
        if let Some(item) = item {
            sync = sync.class_when_true(item, ITEM_SELECTED);
        }

        Some(Self {
            link,
            item,
            panel,
            original_id: doc.attribute(link, "id").map(str::to_string),
            fragment,
            sync,
        })
    }

    pub fn link(&self) -> NodeId {
        self.link
    }

    pub fn panel(&self) -> NodeId {
        self.panel
    }

    /// Key of the tab: the panel id and the URL fragment that selects it.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn link_id(&self) -> String {
        format!("tab_{}", self.fragment)
    }

    pub(crate) fn enhance(&self, doc: &mut Document) {
        let link_id = self.link_id();
        doc.set_attribute(self.link, "id", &link_id);
        doc.set_attribute(self.link, "role", "tab");
        doc.set_attribute(self.link, "aria-controls", &self.fragment);
        doc.set_attribute(self.panel, "role", "tabpanel");
        doc.set_attribute(self.panel, "aria-labelledby", &link_id);
        self.set_selected(doc, false);
    }

    pub(crate) fn set_selected(&self, doc: &mut Document, selected: bool) {
        self.sync.apply(doc, selected);
    }

    /// Undo everything `enhance` and `set_selected` wrote.
    pub(crate) fn restore(&self, doc: &mut Document) {
        match &self.original_id {
            Some(id) => doc.set_attribute(self.link, "id", id),
            None => doc.remove_attribute(self.link, "id"),
        }
        for name in ["role", "aria-controls", "aria-selected", "tabindex"] {
            doc.remove_attribute(self.link, name);
        }
        doc.remove_attribute(self.panel, "role");
        doc.remove_attribute(self.panel, "aria-labelledby");
        doc.remove_class(self.panel, PANEL_HIDDEN);
        if let Some(item) = self.item {
            doc.remove_class(item, ITEM_SELECTED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_and_restore() {
        let html = r##"<div id="root"><ul><li class="tabs__list-item"><a id="orig" class="tabs__tab" href="/results#week">Week</a></li></ul>
            <div class="tabs__panel" id="week">Panel</div></div>"##;
        let mut doc = Document::parse(html);
        let before = doc.to_html();
        let root = doc.element_by_id("root").unwrap();
        let link = doc.element_by_id("orig").unwrap();

        let tab = Tab::matched(&doc, root, link).unwrap();
        assert_eq!(tab.fragment(), "week");

        tab.enhance(&mut doc);
        assert_eq!(doc.attribute(link, "id"), Some("tab_week"));
        assert_eq!(doc.attribute(link, "aria-selected"), Some("false"));
        assert_eq!(doc.attribute(link, "tabindex"), Some("-1"));
        assert_eq!(doc.attribute(tab.panel(), "aria-labelledby"), Some("tab_week"));
        assert!(doc.has_class(tab.panel(), PANEL_HIDDEN));

        tab.set_selected(&mut doc, true);
        assert_eq!(doc.attribute(link, "tabindex"), Some("0"));
        assert!(!doc.has_class(tab.panel(), PANEL_HIDDEN));

        tab.restore(&mut doc);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_unmatched_link() {
        let doc = Document::parse(r##"<div id="root"><a id="a" href="#missing">x</a><a id="b">y</a></div>"##);
        let root = doc.element_by_id("root").unwrap();
        let a = doc.element_by_id("a").unwrap();
        let b = doc.element_by_id("b").unwrap();

        assert!(Tab::matched(&doc, root, a).is_none());
        assert!(Tab::matched(&doc, root, b).is_none());
    }
}
