//! Accordion widget

use unfurl_dom::{AttributeSync, Context, Document, Event, NodeId, Outcome, Widget, WidgetError};
use unfurl_storage::PersistenceChannel;

use crate::error::AccordionError;
use crate::section::{Section, SectionMarkup, CHEVRON, CHEVRON_DOWN, SECTION};
use crate::{Result, MODULE};

const CONTROLS: &str = "accordion__controls";
const SHOW_ALL: &str = "accordion__show-all";
const SHOW_ALL_TEXT: &str = "accordion__show-all-text";

/// The single "show/hide all sections" control.
#[derive(Debug, Clone)]
struct ShowAll {
    button: NodeId,
    text: NodeId,
    sync: AttributeSync,
}

impl ShowAll {
    fn build(doc: &mut Document) -> (NodeId, Self) {
        let controls = doc.create_element_with_class("div", &[CONTROLS]);
        let button = doc.create_element_with_class("button", &[SHOW_ALL]);
        doc.set_attribute(button, "type", "button");
        doc.set_attribute(button, "aria-expanded", "false");
        let chevron = doc.create_element_with_class("span", &[CHEVRON]);
        let text = doc.create_element_with_class("span", &[SHOW_ALL_TEXT]);
        doc.append_child(button, chevron);
        doc.append_child(button, text);
        doc.append_child(controls, button);

        let sync = AttributeSync::new()
            .attribute(button, "aria-expanded")
            .class_when_false(chevron, CHEVRON_DOWN);

        (controls, Self { button, text, sync })
    }

    fn apply(&self, doc: &mut Document, all_expanded: bool) {
        self.sync.apply(doc, all_expanded);
        doc.set_text(
            self.text,
            if all_expanded {
                "Hide all sections"
            } else {
                "Show all sections"
            },
        );
    }
}

pub struct Accordion {
    root: NodeId,
    channel: PersistenceChannel,
    sections: Vec<Section>,
    show_all: Option<ShowAll>,
}

impl Accordion {
    pub fn new(root: NodeId, channel: PersistenceChannel) -> Self {
        Self {
            root,
            channel,
            sections: Vec::new(),
            show_all: None,
        }
    }

    /// Rewrite the markup and restore persisted state. Fails without touching
    /// the document when any section is malformed.
    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        if !doc.is_element(self.root) {
            return Err(AccordionError::MissingRoot);
        }

        let nodes = doc.by_class(self.root, SECTION);
        let Some(first) = nodes.first().copied() else {
            return Err(AccordionError::NoSections);
        };
        let markups = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| SectionMarkup::locate(doc, *node, index))
            .collect::<Result<Vec<_>>>()?;

        let (controls, show_all) = ShowAll::build(doc);
        if let Some(parent) = doc.parent(first) {
            doc.insert_before(parent, controls, Some(first));
        }

        let prefix = doc
            .element(self.root)
            .and_then(|el| el.id())
            .unwrap_or(MODULE)
            .to_string();

        self.sections = markups
            .into_iter()
            .enumerate()
            .map(|(index, markup)| {
                let existing = doc
                    .element(markup.content())
                    .and_then(|el| el.id())
                    .map(str::to_string);
                let key = match existing {
                    Some(id) => id,
                    None => {
                        let id = unused_id(doc, format!("{prefix}-content-{}", index + 1));
                        doc.set_attribute(markup.content(), "id", &id);
                        id
                    }
                };

                let mut section = markup.build(doc, key);
                let expanded = self
                    .channel
                    .restore(section.key())
                    .unwrap_or(section.is_expanded());
                section.set_expanded(doc, expanded);
                section
            })
            .collect();
        self.show_all = Some(show_all);
        self.sync_aggregate(doc);

        tracing::debug!(
            root = %self.root,
            sections = self.sections.len(),
            all_expanded = self.all_expanded(),
            "Accordion enhanced"
        );
        Ok(())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_expanded(&self, index: usize) -> Option<bool> {
        self.sections.get(index).map(Section::is_expanded)
    }

    /// Derived, never stored.
    pub fn all_expanded(&self) -> bool {
        self.sections.iter().all(Section::is_expanded)
    }

    pub fn toggle_section(&mut self, doc: &mut Document, index: usize) -> Result<()> {
        let expanded = self
            .is_expanded(index)
            .ok_or(AccordionError::NotFound(index))?;
        self.set_expanded(doc, index, !expanded)
    }

    pub fn set_expanded(&mut self, doc: &mut Document, index: usize, expanded: bool) -> Result<()> {
        let section = self
            .sections
            .get_mut(index)
            .ok_or(AccordionError::NotFound(index))?;
        section.set_expanded(doc, expanded);
        self.channel.persist(section.key(), expanded);

        tracing::debug!(root = %self.root, index, expanded, "Accordion section toggled");
        self.sync_aggregate(doc);
        Ok(())
    }

    /// Open everything unless everything is already open, then close everything.
    pub fn toggle_all(&mut self, doc: &mut Document) {
        let expanded = !self.all_expanded();
        for section in &mut self.sections {
            section.set_expanded(doc, expanded);
            self.channel.persist(section.key(), expanded);
        }

        tracing::debug!(root = %self.root, expanded, "Accordion toggled all sections");
        self.sync_aggregate(doc);
    }

    fn sync_aggregate(&self, doc: &mut Document) {
        if let Some(show_all) = &self.show_all {
            show_all.apply(doc, self.all_expanded());
        }
    }

    fn section_for(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| doc.contains(s.header(), target))
    }
}

impl Widget for Accordion {
    fn module(&self) -> &'static str {
        MODULE
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn init(&mut self, cx: &mut Context<'_>) -> std::result::Result<(), WidgetError> {
        self.enhance(cx.doc)?;
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome {
        let Event::Click { target } = *event else {
            return Outcome::Continue;
        };

        let on_show_all = self
            .show_all
            .as_ref()
            .is_some_and(|s| cx.doc.contains(s.button, target));
        if on_show_all {
            self.toggle_all(cx.doc);
        } else if let Some(index) = self.section_for(cx.doc, target) {
            if let Err(e) = self.toggle_section(cx.doc, index) {
                tracing::debug!(error = %e, "Accordion toggle ignored");
            }
        }
        Outcome::Continue
    }
}

/// `base`, or `base-2`, `base-3`... when another element already owns it.
/// Roots without an id all share the same prefix, so the suffix keeps storage
/// keys apart while staying stable across reloads of the same markup.
fn unused_id(doc: &Document, base: String) -> String {
    if doc.element_by_id(&base).is_none() {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if doc.element_by_id(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
