//! Tabs widget

use std::sync::Arc;

use unfurl_dom::{Context, Document, Event, Key, Location, NodeId, Outcome, Widget, WidgetError};

use crate::breakpoint::Breakpoint;
use crate::error::TabsError;
use crate::state::TabsMode;
use crate::tab::Tab;
use crate::{Result, MODULE};

const LIST: &str = "tabs__list";
const LIST_ITEM: &str = "tabs__list-item";
const TAB: &str = "tabs__tab";

pub struct Tabs {
    root: NodeId,
    breakpoint: Arc<dyn Breakpoint>,
    mode: TabsMode,
    list: Option<NodeId>,
    items: Vec<NodeId>,
    tabs: Vec<Tab>,
    selected: Option<usize>,
    /// Set when this widget changed the fragment; the echoed `HashChange`
    /// clears it instead of re-selecting.
    changing_fragment: bool,
}

impl Tabs {
    pub fn new(root: NodeId, breakpoint: Arc<dyn Breakpoint>) -> Self {
        Self {
            root,
            breakpoint,
            mode: TabsMode::Inactive,
            list: None,
            items: Vec::new(),
            tabs: Vec::new(),
            selected: None,
            changing_fragment: false,
        }
    }

    /// Pair links with panels. Links without a panel stay unenhanced.
    fn discover(&mut self, doc: &Document) -> Result<()> {
        if !doc.is_element(self.root) {
            return Err(TabsError::MissingRoot);
        }
        let list = doc
            .first_by_class(self.root, LIST)
            .ok_or(TabsError::NoList)?;

        let tabs: Vec<Tab> = doc
            .by_class(self.root, TAB)
            .into_iter()
            .filter_map(|link| {
                let tab = Tab::matched(doc, self.root, link);
                if tab.is_none() {
                    tracing::debug!(link = %link, "Tab link has no matching panel");
                }
                tab
            })
            .collect();
        if tabs.is_empty() {
            return Err(TabsError::NoTabs);
        }

        self.list = Some(list);
        self.items = doc.by_class(self.root, LIST_ITEM);
        self.tabs = tabs;
        Ok(())
    }

    pub fn mode(&self) -> TabsMode {
        self.mode
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Tab> {
        self.selected.and_then(|i| self.tabs.get(i))
    }

    fn index_of_fragment(&self, fragment: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.fragment() == fragment)
    }

    fn index_of_link(&self, doc: &Document, target: NodeId) -> Option<usize> {
        self.tabs
            .iter()
            .position(|t| doc.contains(t.link(), target))
    }

    /// Enter `Active`: roles, ids, and the initial selection from the URL.
    pub fn setup(&mut self, doc: &mut Document, location: &Location) {
        if self.mode.is_active() {
            return;
        }
        if let Some(list) = self.list {
            doc.set_attribute(list, "role", "tablist");
        }
        for item in &self.items {
            doc.set_attribute(*item, "role", "presentation");
        }
        for tab in &self.tabs {
            tab.enhance(doc);
        }

        let initial = location
            .fragment()
            .and_then(|f| self.index_of_fragment(f))
            .unwrap_or(0);
        self.show(doc, initial);
        self.mode = TabsMode::Active;
        self.changing_fragment = false;

        tracing::debug!(
            root = %self.root,
            tabs = self.tabs.len(),
            selected = ?self.selected().map(Tab::fragment),
            "Tabs set up"
        );
    }

    /// Enter `Inactive`: strip everything setup added.
    pub fn teardown(&mut self, doc: &mut Document) {
        if !self.mode.is_active() {
            return;
        }
        if let Some(list) = self.list {
            doc.remove_attribute(list, "role");
        }
        for item in &self.items {
            doc.remove_attribute(*item, "role");
        }
        for tab in &self.tabs {
            tab.restore(doc);
        }
        self.selected = None;
        self.mode = TabsMode::Inactive;
        self.changing_fragment = false;

        tracing::debug!(root = %self.root, "Tabs torn down");
    }

    /// Re-evaluate the breakpoint and switch mode if needed.
    pub fn check_mode(&mut self, cx: &mut Context<'_>) {
        let wanted = TabsMode::for_breakpoint(self.breakpoint.matches(&cx.viewport()));
        if wanted == self.mode {
            return;
        }
        match wanted {
            TabsMode::Active => {
                let location = cx.location().clone();
                self.setup(cx.doc, &location);
            }
            TabsMode::Inactive => self.teardown(cx.doc),
        }
    }

    fn show(&mut self, doc: &mut Document, index: usize) {
        if let Some(current) = self.selected.and_then(|i| self.tabs.get(i)) {
            current.set_selected(doc, false);
        }
        if let Some(tab) = self.tabs.get(index) {
            tab.set_selected(doc, true);
            self.selected = Some(index);
        }
    }

    /// Select a tab and record it in the URL.
    pub fn select(&mut self, cx: &mut Context<'_>, index: usize) -> Result<()> {
        if !self.mode.is_active() {
            return Err(TabsError::NotActive);
        }
        let fragment = self
            .tabs
            .get(index)
            .ok_or(TabsError::NotFound(index))?
            .fragment()
            .to_string();

        self.show(cx.doc, index);
        if cx.set_fragment(&fragment) {
            self.changing_fragment = true;
        }
        tracing::debug!(root = %self.root, fragment = %fragment, "Tab selected");
        Ok(())
    }

    /// Returns whether the selection moved.
    pub fn select_next(&mut self, cx: &mut Context<'_>) -> Result<bool> {
        self.select_adjacent(cx, true)
    }

    pub fn select_previous(&mut self, cx: &mut Context<'_>) -> Result<bool> {
        self.select_adjacent(cx, false)
    }

    fn select_adjacent(&mut self, cx: &mut Context<'_>, forward: bool) -> Result<bool> {
        let current = self.selected.ok_or(TabsError::NotActive)?;
        let target = if forward {
            Some(current + 1).filter(|i| *i < self.tabs.len())
        } else {
            current.checked_sub(1)
        };
        let Some(target) = target else {
            return Ok(false);
        };

        self.select(cx, target)?;
        cx.focus(self.tabs[target].link());
        Ok(true)
    }

    fn on_hash_change(&mut self, cx: &mut Context<'_>) {
        // The echo of our own change, whatever fragment the URL now holds.
        if std::mem::take(&mut self.changing_fragment) {
            return;
        }

        let Some(index) = cx
            .location()
            .fragment()
            .and_then(|f| self.index_of_fragment(f))
        else {
            return;
        };

        self.show(cx.doc, index);
        cx.focus(self.tabs[index].link());
        tracing::debug!(root = %self.root, fragment = self.tabs[index].fragment(), "Tab selected from URL");
    }

    fn on_key_down(&mut self, cx: &mut Context<'_>, key: Key) -> Outcome {
        let moved = if key.is_previous() {
            self.select_previous(cx)
        } else if key.is_next() {
            self.select_next(cx)
        } else {
            return Outcome::Continue;
        };

        if let Err(e) = moved {
            tracing::debug!(error = %e, "Tab keyboard navigation ignored");
        }
        Outcome::PreventDefault
    }
}

impl Widget for Tabs {
    fn module(&self) -> &'static str {
        MODULE
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn init(&mut self, cx: &mut Context<'_>) -> std::result::Result<(), WidgetError> {
        self.discover(cx.doc)?;
        self.check_mode(cx);
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome {
        if let Event::ViewportChanged = event {
            self.check_mode(cx);
            return Outcome::Continue;
        }
        if !self.mode.is_active() {
            return Outcome::Continue;
        }

        match *event {
            Event::Click { target } => {
                let Some(index) = self.index_of_link(cx.doc, target) else {
                    return Outcome::Continue;
                };
                if let Err(e) = self.select(cx, index) {
                    tracing::debug!(error = %e, "Tab click ignored");
                }
                Outcome::PreventDefault
            }
            Event::KeyDown { target, key } if self.index_of_link(cx.doc, target).is_some() => {
                self.on_key_down(cx, key)
            }
            Event::HashChange => {
                self.on_hash_change(cx);
                Outcome::Continue
            }
            _ => Outcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::MinWidth;
    use crate::tab::{ITEM_SELECTED, PANEL_HIDDEN};
    use unfurl_dom::{Page, Viewport};

    const MARKUP: &str = r##"
        <div id="tabs" data-module="tabs">
          <h2 class="tabs__title">Contents</h2>
          <ul class="tabs__list">
            <li class="tabs__list-item"><a class="tabs__tab" href="#a">T1</a></li>
            <li class="tabs__list-item"><a class="tabs__tab" href="#b">T2</a></li>
            <li class="tabs__list-item"><a class="tabs__tab" href="#c">T3</a></li>
          </ul>
          <div class="tabs__panel" id="a"><p id="in-a">A</p></div>
          <div class="tabs__panel" id="b">B</div>
          <div class="tabs__panel" id="c">C</div>
        </div>
        <a id="outside" href="#c">Jump to C</a>"##;

    fn page(url: &str, width: f64) -> Page {
        let doc = Document::parse(MARKUP);
        let root = doc.element_by_id("tabs").unwrap();
        let mut page = Page::new(doc, Location::parse(url).unwrap()).with_viewport(Viewport::new(width));
        page.mount(Box::new(Tabs::new(root, Arc::new(MinWidth::default()))))
            .unwrap();
        page
    }

    fn link(page: &Page, fragment: &str) -> NodeId {
        let doc = page.document();
        doc.query_first(doc.root(), |el| {
            el.has_class(TAB) && el.attr("href") == Some(format!("#{fragment}").as_str())
        })
        .unwrap()
    }

    fn panel(page: &Page, fragment: &str) -> NodeId {
        page.document().element_by_id(fragment).unwrap()
    }

    /// Fragments of every tab with `aria-selected="true"`.
    fn selected(page: &Page) -> Vec<String> {
        let doc = page.document();
        doc.by_class(doc.root(), TAB)
            .into_iter()
            .filter(|l| doc.attribute(*l, "aria-selected") == Some("true"))
            .filter_map(|l| doc.attribute(l, "aria-controls").map(str::to_string))
            .collect()
    }

    fn visible_panels(page: &Page) -> Vec<String> {
        let doc = page.document();
        doc.by_class(doc.root(), "tabs__panel")
            .into_iter()
            .filter(|p| !doc.has_class(*p, PANEL_HIDDEN))
            .filter_map(|p| doc.attribute(p, "id").map(str::to_string))
            .collect()
    }

    fn assert_active_invariant(page: &Page, fragment: &str) {
        assert_eq!(selected(page), vec![fragment.to_string()]);
        assert_eq!(visible_panels(page), vec![fragment.to_string()]);
    }

    #[test]
    fn test_initial_selection_from_fragment() {
        let page = page("https://example.com/results#b", 1024.0);
        assert_active_invariant(&page, "b");

        let doc = page.document();
        let t2 = link(&page, "b");
        assert_eq!(doc.attribute(t2, "id"), Some("tab_b"));
        assert_eq!(doc.attribute(t2, "tabindex"), Some("0"));
        assert_eq!(doc.attribute(link(&page, "a"), "tabindex"), Some("-1"));
        assert!(doc.parent(t2).is_some_and(|li| doc.has_class(li, ITEM_SELECTED)));
        assert_eq!(doc.attribute(panel(&page, "c"), "aria-labelledby"), Some("tab_c"));

        let list = doc.first_by_class(doc.root(), LIST).unwrap();
        assert_eq!(doc.attribute(list, "role"), Some("tablist"));
    }

    #[test]
    fn test_initial_selection_defaults_to_first() {
        let page = page("https://example.com/results#unknown", 1024.0);
        assert_active_invariant(&page, "a");
        assert_eq!(page.location().fragment(), Some("unknown"));
    }

    #[test]
    fn test_right_arrow_selects_next_and_updates_url() {
        let mut page = page("https://example.com/results#b", 1024.0);
        let t2 = link(&page, "b");
        let t3 = link(&page, "c");

        assert_eq!(page.key_down(t2, Key::ArrowRight), Outcome::PreventDefault);
        assert_active_invariant(&page, "c");
        assert_eq!(page.location().fragment(), Some("c"));
        assert_eq!(page.document().focused(), Some(t3));

        // The echo was swallowed: a later external change still works.
        page.navigate("a");
        assert_active_invariant(&page, "a");
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut page = page("https://example.com/results#c", 1024.0);
        let t3 = link(&page, "c");
        assert_eq!(page.key_down(t3, Key::ArrowDown), Outcome::PreventDefault);
        assert_active_invariant(&page, "c");
        assert_eq!(page.location().fragment(), Some("c"));

        let mut page = self::page("https://example.com/results", 1024.0);
        let t1 = link(&page, "a");
        page.key_down(t1, Key::ArrowLeft);
        page.key_down(t1, Key::ArrowUp);
        assert_active_invariant(&page, "a");
        assert_eq!(page.location().fragment(), None);
    }

    #[test]
    fn test_click_selects_and_prevents_navigation() {
        let mut page = page("https://example.com/results", 1024.0);
        let t3 = link(&page, "c");

        assert_eq!(page.click(t3), Outcome::PreventDefault);
        assert_active_invariant(&page, "c");
        assert_eq!(page.location().fragment(), Some("c"));
        // Clicking the selected tab again leaves the URL alone.
        page.click(t3);
        assert_active_invariant(&page, "c");

        page.key_down(t3, Key::ArrowLeft);
        assert_active_invariant(&page, "b");
    }

    #[test]
    fn test_external_navigation_selects_and_focuses() {
        let mut page = page("https://example.com/results", 1024.0);
        page.navigate("#c");
        assert_active_invariant(&page, "c");
        assert_eq!(page.document().focused(), Some(link(&page, "c")));
        assert_eq!(page.location().fragment(), Some("c"));

        // An in-page link outside the widget goes through the same path.
        page.navigate("#a");
        let outside = page.document().element_by_id("outside").unwrap();
        assert_eq!(page.click(outside), Outcome::Continue);
        assert_active_invariant(&page, "c");
    }

    #[test]
    fn test_unknown_fragment_keeps_selection() {
        let mut page = page("https://example.com/results#b", 1024.0);
        page.navigate("elsewhere");
        assert_active_invariant(&page, "b");
    }

    #[test]
    fn test_non_tab_click_is_ignored() {
        let mut page = page("https://example.com/results", 1024.0);
        let inner = page.document().element_by_id("in-a").unwrap();
        let title = page
            .document()
            .first_by_class(page.document().root(), "tabs__title")
            .unwrap();

        assert_eq!(page.click(inner), Outcome::Continue);
        assert_eq!(page.click(title), Outcome::Continue);
        assert_active_invariant(&page, "a");
        assert_eq!(page.key_down(inner, Key::ArrowRight), Outcome::Continue);
        assert_active_invariant(&page, "a");
    }

    #[test]
    fn test_inactive_below_breakpoint() {
        let before = Document::parse(MARKUP).to_html();
        let mut page = page("https://example.com/results#b", 320.0);
        assert_eq!(page.document().to_html(), before);

        let t2 = link(&page, "b");
        assert_eq!(page.click(t2), Outcome::Continue);
        assert_eq!(page.location().fragment(), Some("b"));
        assert!(selected(&page).is_empty());
    }

    #[test]
    fn test_resize_switches_mode() {
        let before = Document::parse(MARKUP).to_html();
        let mut page = page("https://example.com/results#b", 1024.0);
        assert_active_invariant(&page, "b");

        page.resize(Viewport::new(600.0));
        assert_eq!(page.document().to_html(), before);
        assert_eq!(visible_panels(&page).len(), 3);
        let doc = page.document();
        assert!(doc
            .query_all(doc.root(), |el| el.has_attr("role"))
            .is_empty());

        // Idempotent in both directions.
        page.resize(Viewport::new(500.0));
        assert_eq!(page.document().to_html(), before);

        page.navigate("c");
        page.resize(Viewport::new(1024.0));
        assert_active_invariant(&page, "c");
        page.resize(Viewport::new(1200.0));
        assert_active_invariant(&page, "c");
    }

    #[test]
    fn test_non_ascii_tab_ids() {
        let doc = Document::parse(
            r##"<div id="tabs" data-module="tabs"><ul class="tabs__list">
                 <li class="tabs__list-item"><a class="tabs__tab" href="#a">A</a></li>
                 <li class="tabs__list-item"><a class="tabs__tab" href="#résumé">CV</a></li>
               </ul>
               <div class="tabs__panel" id="a">A</div>
               <div class="tabs__panel" id="résumé">CV</div></div>"##,
        );
        let root = doc.element_by_id("tabs").unwrap();
        let mut page = Page::new(doc, Location::parse("https://example.com/#résumé").unwrap())
            .with_viewport(Viewport::new(1024.0));
        page.mount(Box::new(Tabs::new(root, Arc::new(MinWidth::default()))))
            .unwrap();
        assert_active_invariant(&page, "résumé");

        let a = link(&page, "a");
        let cv = link(&page, "résumé");
        page.click(a);
        assert_active_invariant(&page, "a");
        page.click(cv);
        assert_active_invariant(&page, "résumé");
        assert_eq!(page.location().fragment(), Some("résumé"));

        // Our own change was echoed once; the next external change is honoured.
        page.navigate("a");
        assert_active_invariant(&page, "a");
        assert_eq!(page.document().focused(), Some(a));

        page.navigate("r%C3%A9sum%C3%A9");
        assert_active_invariant(&page, "résumé");
    }

    #[test]
    fn test_init_fails_without_matches() {
        let doc = Document::parse(
            r##"<div id="tabs"><ul class="tabs__list"><li class="tabs__list-item"><a class="tabs__tab" href="#x">X</a></li></ul></div>"##,
        );
        let root = doc.element_by_id("tabs").unwrap();
        let before = doc.to_html();
        let mut page = Page::new(doc, Location::parse("https://example.com/").unwrap());

        let result = page.mount(Box::new(Tabs::new(root, Arc::new(MinWidth::default()))));
        assert!(result.is_err());
        assert!(!page.is_mounted(MODULE, root));
        assert_eq!(page.document().to_html(), before);
    }
}
