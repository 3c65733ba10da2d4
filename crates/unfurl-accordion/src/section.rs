//! Accordion sections

use unfurl_dom::{AttributeSync, Document, NodeId};

use crate::error::AccordionError;
use crate::Result;

pub(crate) const SECTION: &str = "accordion__section";
pub(crate) const SECTION_EXPANDED: &str = "accordion__section--expanded";
const SECTION_HEADER: &str = "accordion__section-header";
const SECTION_HEADING: &str = "accordion__section-heading";
const SECTION_BUTTON: &str = "accordion__section-button";
const SECTION_SUMMARY: &str = "accordion__section-summary";
const SECTION_CONTENT: &str = "accordion__section-content";
pub(crate) const SECTION_CONTENT_HIDDEN: &str = "accordion__section-content--hidden";

const HEADING_TEXT: &str = "accordion__section-heading-text";
const HEADING_TEXT_FOCUS: &str = "accordion__section-heading-text-focus";
const HEADING_DIVIDER: &str = "accordion__section-heading-divider";
const SUMMARY_FOCUS: &str = "accordion__section-summary-focus";
const TOGGLE: &str = "accordion__section-toggle";
const TOGGLE_FOCUS: &str = "accordion__section-toggle-focus";
const TOGGLE_TEXT: &str = "accordion__section-toggle-text";

pub(crate) const CHEVRON: &str = "accordion-nav__chevron";
pub(crate) const CHEVRON_DOWN: &str = "accordion-nav__chevron--down";
pub(crate) const VISUALLY_HIDDEN: &str = "visually-hidden";

/// Server-rendered nodes of one section, located before anything is touched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SectionMarkup {
    node: NodeId,
    header: NodeId,
    heading: NodeId,
    placeholder: NodeId,
    summary: Option<NodeId>,
    content: NodeId,
}

impl SectionMarkup {
    pub(crate) fn locate(doc: &Document, node: NodeId, index: usize) -> Result<Self> {
        let missing = |part| AccordionError::MissingPart {
            section: index,
            part,
        };

        let header = doc
            .first_by_class(node, SECTION_HEADER)
            .ok_or_else(|| missing("header"))?;
        let heading = doc
            .first_by_class(header, SECTION_HEADING)
            .ok_or_else(|| missing("heading"))?;
        let placeholder = doc
            .first_by_class(header, SECTION_BUTTON)
            .filter(|p| doc.contains(heading, *p))
            .ok_or_else(|| missing("button"))?;
        let content = doc
            .first_by_class(node, SECTION_CONTENT)
            .ok_or_else(|| missing("content"))?;

        Ok(Self {
            node,
            header,
            heading,
            placeholder,
            summary: doc.first_by_class(header, SECTION_SUMMARY),
            content,
        })
    }

    pub(crate) fn content(&self) -> NodeId {
        self.content
    }

    /// Rewrite the header into its accessible button structure.
    pub(crate) fn build(self, doc: &mut Document, key: String) -> Section {
        let button = doc.create_element("button");
        doc.set_attribute(button, "type", "button");
        doc.set_attribute(button, "aria-controls", &key);
        let copied: Vec<(String, String)> = doc
            .element(self.placeholder)
            .map(|el| {
                el.attributes()
                    .filter(|(name, _)| *name != "id")
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        for (name, value) in &copied {
            doc.set_attribute(button, name, value);
        }

        let heading_text = doc.create_element_with_class("span", &[HEADING_TEXT]);
        if let Some(id) = doc.attribute(self.placeholder, "id").map(str::to_string) {
            doc.set_attribute(heading_text, "id", &id);
        }
        let heading_focus = doc.create_element_with_class("span", &[HEADING_TEXT_FOCUS]);
        doc.move_children(self.placeholder, heading_focus);
        doc.append_child(heading_text, heading_focus);
        doc.append_child(button, heading_text);
        append_divider(doc, button);

        if let Some(summary) = self.summary {
            let wrapper = doc.create_element("span");
            let attributes: Vec<(String, String)> = doc
                .element(summary)
                .map(|el| {
                    el.attributes()
                        .map(|(n, v)| (n.to_string(), v.to_string()))
                        .collect()
                })
                .unwrap_or_default();
            for (name, value) in &attributes {
                doc.set_attribute(wrapper, name, value);
            }
            let focus = doc.create_element_with_class("span", &[SUMMARY_FOCUS]);
            doc.move_children(summary, focus);
            doc.append_child(wrapper, focus);
            doc.detach(summary);
            doc.append_child(button, wrapper);
            append_divider(doc, button);
        }

        let toggle = doc.create_element_with_class("span", &[TOGGLE]);
        doc.set_attribute(toggle, "data-nosnippet", "");
        let toggle_focus = doc.create_element_with_class("span", &[TOGGLE_FOCUS]);
        let chevron = doc.create_element_with_class("span", &[CHEVRON]);
        let label = doc.create_element_with_class("span", &[TOGGLE_TEXT]);
        doc.append_child(toggle_focus, chevron);
        doc.append_child(toggle_focus, label);
        doc.append_child(toggle, toggle_focus);
        doc.append_child(button, toggle);

        doc.detach(self.placeholder);
        doc.append_child(self.heading, button);

        let sync = AttributeSync::new()
            .attribute(button, "aria-expanded")
            .class_when_true(self.node, SECTION_EXPANDED)
            .class_when_false(self.content, SECTION_CONTENT_HIDDEN)
            .class_when_false(chevron, CHEVRON_DOWN);

        Section {
            node: self.node,
            header: self.header,
            button,
            content: self.content,
            label,
            key,
            expanded: doc.has_class(self.node, SECTION_EXPANDED),
            has_summary: self.summary.is_some(),
            sync,
        }
    }
}

fn append_divider(doc: &mut Document, button: NodeId) {
    let divider = doc.create_element_with_class("span", &[VISUALLY_HIDDEN, HEADING_DIVIDER]);
    doc.set_text(divider, ", ");
    doc.append_child(button, divider);
}

/// One expandable region and its header control.
#[derive(Debug, Clone)]
pub struct Section {
    node: NodeId,
    header: NodeId,
    button: NodeId,
    content: NodeId,
    label: NodeId,
    key: String,
    expanded: bool,
    has_summary: bool,
    sync: AttributeSync,
}

impl Section {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn header(&self) -> NodeId {
        self.header
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Persistence key, also the button's `aria-controls` target.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn has_summary(&self) -> bool {
        self.has_summary
    }

    /// Set the state and rewrite every mirror of it.
    pub(crate) fn set_expanded(&mut self, doc: &mut Document, expanded: bool) {
        self.expanded = expanded;
        self.sync.apply(doc, expanded);

        doc.set_text(self.label, if expanded { "Hide" } else { "Show" });
        let suffix = doc.create_element_with_class("span", &[VISUALLY_HIDDEN]);
        doc.set_text(suffix, " this section");
        doc.append_child(self.label, suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"
        <div id="acc">
          <div class="accordion__section accordion__section--expanded">
            <div class="accordion__section-header">
              <h2 class="accordion__section-heading">
                <span class="accordion__section-button" id="acc-heading-1" data-track="x">Writing <b>well</b></span>
              </h2>
              <div class="accordion__section-summary body" id="acc-summary-1">Tips</div>
            </div>
            <div id="acc-content-1" class="accordion__section-content">Body</div>
          </div>
        </div>"#;

    #[test]
    fn test_header_rewrite() {
        let mut doc = Document::parse(MARKUP);
        let node = doc.first_by_class(doc.root(), SECTION).unwrap();
        let markup = SectionMarkup::locate(&doc, node, 0).unwrap();
        let mut section = markup.build(&mut doc, "acc-content-1".to_string());
        section.set_expanded(&mut doc, section.is_expanded());

        let button = section.button();
        assert_eq!(doc.tag(button), Some("button"));
        assert_eq!(doc.attribute(button, "type"), Some("button"));
        assert_eq!(doc.attribute(button, "aria-controls"), Some("acc-content-1"));
        assert_eq!(doc.attribute(button, "data-track"), Some("x"));
        assert_eq!(doc.attribute(button, "id"), None);
        assert!(doc.has_class(button, SECTION_BUTTON));

        let heading_text = doc.first_by_class(button, HEADING_TEXT).unwrap();
        assert_eq!(doc.attribute(heading_text, "id"), Some("acc-heading-1"));
        assert_eq!(doc.text_content(heading_text), "Writing well");

        let summary = doc.element_by_id("acc-summary-1").unwrap();
        assert!(doc.contains(button, summary));
        assert!(doc.has_class(summary, "body"));
        assert!(section.has_summary());

        assert_eq!(doc.by_class(button, HEADING_DIVIDER).len(), 2);
        assert_eq!(
            doc.text_content(button),
            "Writing well, Tips, Hide this section"
        );
    }

    #[test]
    fn test_sync_invariant() {
        let mut doc = Document::parse(MARKUP);
        let node = doc.first_by_class(doc.root(), SECTION).unwrap();
        let mut section = SectionMarkup::locate(&doc, node, 0)
            .unwrap()
            .build(&mut doc, "acc-content-1".to_string());

        for expanded in [false, true, false] {
            section.set_expanded(&mut doc, expanded);
            let content = section.content();
            assert_eq!(
                doc.attribute(section.button(), "aria-expanded"),
                Some(if expanded { "true" } else { "false" })
            );
            assert_eq!(doc.has_class(content, SECTION_CONTENT_HIDDEN), !expanded);
            assert_eq!(doc.has_class(section.node(), SECTION_EXPANDED), expanded);
        }
    }

    #[test]
    fn test_locate_reports_missing_parts() {
        let doc = Document::parse(
            r#"<div class="accordion__section"><div class="accordion__section-header">
                 <h2 class="accordion__section-heading"><span class="accordion__section-button">A</span></h2>
               </div></div>"#,
        );
        let node = doc.first_by_class(doc.root(), SECTION).unwrap();
        let err = SectionMarkup::locate(&doc, node, 3).unwrap_err();
        assert!(matches!(
            err,
            AccordionError::MissingPart {
                section: 3,
                part: "content"
            }
        ));
    }
}
