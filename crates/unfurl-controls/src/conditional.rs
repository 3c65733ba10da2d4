//! Conditional reveal shared by checkbox and radio groups

use unfurl_dom::{AttributeSync, Document, NodeId};

/// Class names of one family of conditional regions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reveal {
    pub conditional: &'static str,
    pub hidden: &'static str,
}

/// Promote `data-aria-controls` to `aria-controls` when the target exists.
pub(crate) fn link_controls(doc: &mut Document, inputs: &[NodeId]) {
    for input in inputs {
        let Some(target) = doc.attribute(*input, "data-aria-controls").map(str::to_string) else {
            continue;
        };
        if doc.element_by_id(&target).is_some() {
            doc.set_attribute(*input, "aria-controls", &target);
            doc.remove_attribute(*input, "data-aria-controls");
        }
    }
}

/// Mirror an input's checked state onto itself and the region it controls.
/// Inputs without a conditional region are left alone.
pub(crate) fn sync(doc: &mut Document, input: NodeId, reveal: Reveal) {
    let Some(region) = doc
        .attribute(input, "aria-controls")
        .and_then(|id| doc.element_by_id(id))
    else {
        return;
    };
    if !doc.has_class(region, reveal.conditional) {
        return;
    }

    let checked = doc.checked(input);
    AttributeSync::new()
        .attribute(input, "aria-expanded")
        .class_when_false(region, reveal.hidden)
        .apply(doc, checked);
}

/// Inputs of `kind` sharing `input`'s name and form, anywhere in the document.
pub(crate) fn same_group(doc: &Document, input: NodeId, kind: &str) -> Vec<NodeId> {
    let Some(name) = doc.attribute(input, "name") else {
        return Vec::new();
    };
    let form = doc.form_owner(input);
    doc.query_all(doc.root(), |el| el.is_input(kind) && el.attr("name") == Some(name))
        .into_iter()
        .filter(|other| doc.form_owner(*other) == form)
        .collect()
}
