//! End-to-end page scenarios through the bootstrap

use std::sync::Arc;

use unfurl_dom::{Document, Key, NodeId, Page, Viewport};
use unfurl_storage::{MemoryStore, SessionStore, StorageError};

use crate::bootstrap::{init_all, init_within, load_page, Modules};

const URL: &str = "https://example.com/apply";

const ACCORDION: &str = r#"
    <div id="faq" class="accordion" data-module="accordion">
      <div class="accordion__section">
        <div class="accordion__section-header">
          <h2 class="accordion__section-heading"><span class="accordion__section-button" id="faq-heading-1">Eligibility</span></h2>
        </div>
        <div id="faq-content-1" class="accordion__section-content">Who can apply</div>
      </div>
      <div class="accordion__section">
        <div class="accordion__section-header">
          <h2 class="accordion__section-heading"><span class="accordion__section-button" id="faq-heading-2">Documents</span></h2>
          <div class="accordion__section-summary">What to bring</div>
        </div>
        <div id="faq-content-2" class="accordion__section-content">Passport</div>
      </div>
    </div>"#;

const TABS: &str = r##"
    <div id="tabs" class="tabs" data-module="tabs">
      <ul class="tabs__list">
        <li class="tabs__list-item"><a class="tabs__tab" href="#a">T1</a></li>
        <li class="tabs__list-item"><a class="tabs__tab" href="#b">T2</a></li>
        <li class="tabs__list-item"><a class="tabs__tab" href="#c">T3</a></li>
      </ul>
      <div class="tabs__panel" id="a">Panel A</div>
      <div class="tabs__panel" id="b">Panel B</div>
      <div class="tabs__panel" id="c">Panel C</div>
    </div>"##;

struct FailingStore;

impl SessionStore for FailingStore {
    fn get(&self, _key: &str) -> unfurl_storage::Result<Option<String>> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> unfurl_storage::Result<()> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> unfurl_storage::Result<()> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

fn page_with(html: &str, url: &str, width: f64, modules: &Modules) -> Page {
    let mut page = load_page(html, url).unwrap().with_viewport(Viewport::new(width));
    init_all(&mut page, modules);
    page
}

// === Accordion ===

struct SectionNodes {
    button: NodeId,
    content: NodeId,
}

fn sections(doc: &Document) -> Vec<SectionNodes> {
    let root = doc.element_by_id("faq").unwrap();
    doc.by_class(root, "accordion__section")
        .into_iter()
        .map(|section| {
            let header = doc.first_by_class(section, "accordion__section-header").unwrap();
            SectionNodes {
                button: doc.query_first(header, |el| el.is("button")).unwrap(),
                content: doc.first_by_class(section, "accordion__section-content").unwrap(),
            }
        })
        .collect()
}

fn show_all(doc: &Document) -> NodeId {
    doc.first_by_class(doc.root(), "accordion__show-all").unwrap()
}

/// Expanded state of every section, asserting the sync invariant on the way.
fn expanded_states(page: &Page) -> Vec<bool> {
    let doc = page.document();
    sections(doc)
        .iter()
        .map(|s| {
            let expanded = doc.attribute(s.button, "aria-expanded") == Some("true");
            let visible = !doc.has_class(s.content, "accordion__section-content--hidden");
            assert_eq!(expanded, visible, "button and content disagree");
            expanded
        })
        .collect()
}

#[test]
fn test_accordion_sections_open_one_by_one() {
    let mut page = page_with(ACCORDION, URL, 1024.0, &Modules::default());
    assert_eq!(expanded_states(&page), vec![false, false]);

    let s = sections(page.document());
    page.click(s[0].button);
    assert_eq!(expanded_states(&page), vec![true, false]);
    let control = show_all(page.document());
    assert_eq!(page.document().attribute(control, "aria-expanded"), Some("false"));

    page.click(s[1].button);
    assert_eq!(expanded_states(&page), vec![true, true]);
    let doc = page.document();
    assert_eq!(doc.attribute(control, "aria-expanded"), Some("true"));
    assert_eq!(
        doc.text_content(control).trim(),
        "Hide all sections"
    );
}

#[test]
fn test_accordion_show_all_twice_restores_uniform_state() {
    let mut page = page_with(ACCORDION, URL, 1024.0, &Modules::default());
    let control = show_all(page.document());

    page.click(control);
    assert_eq!(expanded_states(&page), vec![true, true]);
    page.click(control);
    assert_eq!(expanded_states(&page), vec![false, false]);
}

#[test]
fn test_accordion_state_survives_reload() {
    let store = Arc::new(MemoryStore::new());
    let modules = Modules::default().with_store(store.clone());

    let mut first = page_with(ACCORDION, URL, 1024.0, &modules);
    let s = sections(first.document());
    first.click(s[1].button);
    assert_eq!(store.len(), 1);

    let reloaded = page_with(ACCORDION, URL, 1024.0, &modules);
    assert_eq!(expanded_states(&reloaded), vec![false, true]);
}

#[test]
fn test_accordion_falls_back_when_storage_fails() {
    let modules = Modules::default().with_store(Arc::new(FailingStore));
    assert!(!modules.channel.is_available());

    let mut page = page_with(ACCORDION, URL, 1024.0, &modules);
    let s = sections(page.document());
    page.click(s[0].button);
    assert_eq!(expanded_states(&page), vec![true, false]);

    let reloaded = page_with(ACCORDION, URL, 1024.0, &modules);
    assert_eq!(expanded_states(&reloaded), vec![false, false]);
}

// === Tabs ===

fn tab_link(page: &Page, fragment: &str) -> NodeId {
    page.document().element_by_id(&format!("tab_{fragment}")).unwrap()
}

fn panel(page: &Page, fragment: &str) -> NodeId {
    page.document().element_by_id(fragment).unwrap()
}

/// Fragment of the single selected tab, asserting only its panel is visible.
fn selected_tab(page: &Page) -> String {
    let doc = page.document();
    let selected: Vec<&str> = ["a", "b", "c"]
        .into_iter()
        .filter(|f| doc.attribute(tab_link(page, f), "aria-selected") == Some("true"))
        .collect();
    assert_eq!(selected.len(), 1, "exactly one tab selected");

    for f in ["a", "b", "c"] {
        let hidden = doc.has_class(panel(page, f), "tabs__panel--hidden");
        assert_eq!(hidden, f != selected[0], "panel {f}");
    }
    selected[0].to_string()
}

fn assert_inactive(page: &Page) {
    let doc = page.document();
    let root = doc.element_by_id("tabs").unwrap();
    for link in doc.by_class(root, "tabs__tab") {
        assert!(!doc.has_attribute(link, "role"));
        assert!(!doc.has_attribute(link, "aria-selected"));
    }
    for panel in doc.by_class(root, "tabs__panel") {
        assert!(!doc.has_attribute(panel, "role"));
        assert!(!doc.has_class(panel, "tabs__panel--hidden"));
    }
}

#[test]
fn test_tabs_follow_initial_fragment_and_arrow_keys() {
    let mut page = page_with(TABS, "https://example.com/apply#b", 1024.0, &Modules::default());
    assert_eq!(selected_tab(&page), "b");

    page.key_down(tab_link(&page, "b"), Key::ArrowRight);
    assert_eq!(selected_tab(&page), "c");
    assert_eq!(page.location().fragment(), Some("c"));
    assert_eq!(page.document().focused(), Some(tab_link(&page, "c")));
}

#[test]
fn test_tabs_keyboard_stops_at_the_ends() {
    let mut page = page_with(TABS, URL, 1024.0, &Modules::default());
    assert_eq!(selected_tab(&page), "a");

    page.key_down(tab_link(&page, "a"), Key::ArrowLeft);
    assert_eq!(selected_tab(&page), "a");
    assert_eq!(page.location().fragment(), None);

    page.navigate("c");
    page.key_down(tab_link(&page, "c"), Key::ArrowDown);
    assert_eq!(selected_tab(&page), "c");
    assert_eq!(page.location().fragment(), Some("c"));
}

#[test]
fn test_tabs_external_fragment_selects_and_focuses() {
    let mut page = page_with(TABS, URL, 1024.0, &Modules::default());

    page.navigate("b");
    assert_eq!(selected_tab(&page), "b");
    assert_eq!(page.document().focused(), Some(tab_link(&page, "b")));

    // A click that changes the fragment is echoed back once and ignored.
    page.click(tab_link(&page, "c"));
    assert_eq!(selected_tab(&page), "c");
    assert_eq!(page.location().fragment(), Some("c"));
    assert_eq!(page.document().focused(), Some(tab_link(&page, "b")));

    page.navigate("a");
    assert_eq!(selected_tab(&page), "a");
}

#[test]
fn test_tabs_switch_modes_with_viewport() {
    let mut page = page_with(TABS, "https://example.com/apply#c", 400.0, &Modules::default());
    assert_inactive(&page);

    page.resize(Viewport::new(1024.0));
    assert_eq!(selected_tab(&page), "c");

    page.resize(Viewport::new(640.0));
    assert_inactive(&page);

    page.resize(Viewport::new(641.0));
    assert_eq!(selected_tab(&page), "c");
}

// === Whole page ===

#[test]
fn test_every_marker_mounts_in_order() {
    let html = format!(
        r##"<a id="skip" href="#main" class="skip-link" data-module="skip-link">Skip to main content</a>
            <header id="header" data-module="header">
              <button class="js-header-toggle" aria-controls="nav">Menu</button>
              <ul id="nav" class="header__navigation-list"></ul>
            </header>
            <main id="main">
              <div id="banner" role="alert" data-module="notification-banner">Saved</div>
              <div id="summary" data-module="error-summary"><a href="#name">Enter your name</a></div>
              {ACCORDION}
              {TABS}
              <details id="help" data-module="details"><summary>Help</summary><div>Call us</div></details>
              <form>
                <div id="contact" data-module="checkboxes">
                  <input type="checkbox" name="contact" data-aria-controls="email">
                  <div id="email" class="checkboxes__conditional">Email</div>
                </div>
                <div id="answer" data-module="radios"><input type="radio" name="answer"></div>
                <div id="cc" data-module="character-count" data-maxlength="200">
                  <textarea id="more" class="js-character-count"></textarea>
                  <div id="more-info" class="hint">Up to 200 characters</div>
                </div>
                <label for="name">Name</label><input id="name" type="text">
                <button id="save" data-module="button" data-prevent-double-click="true">Save</button>
              </form>
            </main>"##
    );
    let mut page = load_page(&html, URL).unwrap();
    let mounted = init_all(&mut page, &Modules::default());
    let modules: Vec<&str> = mounted.iter().map(|(m, _)| *m).collect();
    assert_eq!(
        modules,
        vec![
            "button",
            "accordion",
            "details",
            "character-count",
            "checkboxes",
            "error-summary",
            "header",
            "notification-banner",
            "radios",
            "skip-link",
            "tabs",
        ]
    );

    // The banner mounts after the summary, so it ends up with focus.
    let banner = page.document().element_by_id("banner").unwrap();
    assert_eq!(page.document().focused(), Some(banner));

    // Running again is a no-op.
    assert!(init_all(&mut page, &Modules::default()).is_empty());
}

#[test]
fn test_broken_markup_is_skipped_without_side_effects() {
    let html = r#"<div id="broken" data-module="accordion"><p>No sections</p></div>
                  <details data-module="details"><summary>Only a summary</summary></details>"#;
    let mut page = load_page(html, URL).unwrap();
    let before = page.document().to_html();

    assert!(init_all(&mut page, &Modules::default()).is_empty());
    assert_eq!(page.document().to_html(), before);
}

#[test]
fn test_inserted_content_is_enhanced_in_place() {
    let mut page = load_page(r#"<div id="slot"></div>"#, URL).unwrap();
    assert!(init_all(&mut page, &Modules::default()).is_empty());

    let slot = page.document().element_by_id("slot").unwrap();
    let doc = page.document_mut();
    let details = doc.create_element("details");
    doc.set_attribute(details, "data-module", "details");
    let summary = doc.create_element("summary");
    let body = doc.create_element("div");
    doc.append_child(details, summary);
    doc.append_child(details, body);
    doc.append_child(slot, details);

    let mounted = init_within(&mut page, slot, &Modules::default());
    assert_eq!(mounted, vec![("details", details)]);
    assert_eq!(page.document().attribute(summary, "role"), Some("button"));

    page.click(summary);
    assert!(page.document().has_attribute(details, "open"));
}
