//! Autocomplete widget state machine
//!
//! The widget never performs I/O. Front-ends translate raw input into
//! [`WidgetEvent`]s, feed them to [`Autocomplete::update`] together with the
//! current option list, and act on the returned [`WidgetEffect`]s.

use crate::model::SearchResultItem;
use crate::suggest::filter_suggestions;

/// One user action against the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    FocusGained,
    TextChanged(String),
    ArrowDown,
    ArrowUp,
    EnterPressed,
    EscapePressed,
    /// Index into the currently visible (filtered) rows
    RowClicked(usize),
    ToggleClicked,
    ClearClicked,
}

/// Work the owner of the widget has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEffect {
    /// Run a catalog search for the raw input text
    Search(String),
    /// The user picked the volume with this identifier
    Select(String),
}

/// Dropdown phase, derived from the open flag and the filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    OpenEmpty,
    OpenWithMatches,
}

/// Scroll window over the dropdown rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            visible_rows: 8,
        }
    }
}

impl Viewport {
    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

/// Autocomplete input state
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    query: String,
    open: bool,
    highlighted: Option<usize>,
    viewport: Viewport,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `None` means no row is highlighted
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tell the widget how many rows the front-end can show at once.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.viewport.visible_rows = rows;
        if let Some(index) = self.highlighted {
            self.viewport.ensure_visible(index);
        }
    }

    /// Rows that currently pass the filter, in option order
    pub fn filtered<'a>(&self, options: &'a [SearchResultItem]) -> Vec<&'a SearchResultItem> {
        filter_suggestions(&self.query, options)
    }

    pub fn phase(&self, options: &[SearchResultItem]) -> Phase {
        if !self.open {
            Phase::Closed
        } else if self.filtered(options).is_empty() {
            Phase::OpenEmpty
        } else {
            Phase::OpenWithMatches
        }
    }

    /// The dropdown is drawn only while open with at least one match.
    pub fn is_dropdown_visible(&self, options: &[SearchResultItem]) -> bool {
        self.phase(options) == Phase::OpenWithMatches
    }

    /// The owner replaced the option list wholesale; old indices mean nothing now.
    pub fn on_options_replaced(&mut self) {
        self.highlighted = None;
        self.viewport.scroll_offset = 0;
    }

    /// Apply one event and report what the owner has to do about it.
    pub fn update(&mut self, event: WidgetEvent, options: &[SearchResultItem]) -> Vec<WidgetEffect> {
        match event {
            WidgetEvent::FocusGained => {
                self.open = true;
                Vec::new()
            }
            WidgetEvent::TextChanged(text) => {
                self.set_query(text.clone());
                self.open = true;
                vec![WidgetEffect::Search(text)]
            }
            WidgetEvent::ArrowDown => {
                let count = self.filtered(options).len();
                if count > 0 {
                    let next = match self.highlighted {
                        Some(i) => (i + 1).min(count - 1),
                        None => 0,
                    };
                    self.highlight(next);
                }
                Vec::new()
            }
            WidgetEvent::ArrowUp => {
                if let Some(i) = self.highlighted {
                    self.highlight(i.saturating_sub(1));
                }
                Vec::new()
            }
            WidgetEvent::EnterPressed => match self.highlighted {
                Some(i) => self.commit(i, options),
                None => Vec::new(),
            },
            WidgetEvent::EscapePressed => {
                self.open = false;
                Vec::new()
            }
            WidgetEvent::RowClicked(i) => {
                if self.is_dropdown_visible(options) {
                    self.commit(i, options)
                } else {
                    Vec::new()
                }
            }
            WidgetEvent::ToggleClicked => {
                self.open = !self.open;
                Vec::new()
            }
            WidgetEvent::ClearClicked => {
                self.set_query(String::new());
                Vec::new()
            }
        }
    }

    fn set_query(&mut self, text: String) {
        self.query = text;
        self.highlighted = None;
        self.viewport.scroll_offset = 0;
    }

    fn highlight(&mut self, index: usize) {
        self.highlighted = Some(index);
        if self.open {
            self.viewport.ensure_visible(index);
        }
    }

    fn commit(&mut self, index: usize, options: &[SearchResultItem]) -> Vec<WidgetEffect> {
        let chosen = match self.filtered(options).get(index) {
            Some(item) => (*item).clone(),
            None => return Vec::new(),
        };

        self.set_query(chosen.title);
        self.open = false;
        vec![WidgetEffect::Select(chosen.id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SearchResultItem> {
        vec![
            SearchResultItem::new("Dune", "A"),
            SearchResultItem::new("Duna", "B"),
            SearchResultItem::new("Mars", "C"),
        ]
    }

    fn typed(text: &str, options: &[SearchResultItem]) -> Autocomplete {
        let mut widget = Autocomplete::new();
        widget.update(WidgetEvent::TextChanged(text.to_string()), options);
        widget
    }

    #[test]
    fn starts_closed() {
        let widget = Autocomplete::new();
        assert_eq!(widget.phase(&options()), Phase::Closed);
        assert_eq!(widget.highlighted(), None);
    }

    #[test]
    fn focus_opens() {
        let opts = options();
        let mut widget = Autocomplete::new();
        widget.update(WidgetEvent::FocusGained, &opts);
        assert_eq!(widget.phase(&opts), Phase::OpenWithMatches);
        assert_eq!(widget.phase(&[]), Phase::OpenEmpty);
    }

    #[test]
    fn text_change_opens_and_requests_search() {
        let opts = options();
        let mut widget = Autocomplete::new();
        let effects = widget.update(WidgetEvent::TextChanged("du".into()), &opts);
        assert_eq!(effects, vec![WidgetEffect::Search("du".into())]);
        assert!(widget.is_open());

        let ids: Vec<&str> = widget.filtered(&opts).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn search_is_requested_even_without_local_matches() {
        let opts = options();
        let mut widget = Autocomplete::new();
        let effects = widget.update(WidgetEvent::TextChanged("zzz".into()), &opts);
        assert_eq!(effects, vec![WidgetEffect::Search("zzz".into())]);
        assert_eq!(widget.phase(&opts), Phase::OpenEmpty);
        assert!(!widget.is_dropdown_visible(&opts));
    }

    #[test]
    fn text_change_resets_highlight() {
        let opts = options();
        let mut widget = typed("du", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);
        assert_eq!(widget.highlighted(), Some(0));

        widget.update(WidgetEvent::TextChanged("dun".into()), &opts);
        assert_eq!(widget.highlighted(), None);
    }

    #[test]
    fn arrows_clamp_without_wrapping() {
        let opts = options();
        let mut widget = typed("du", &opts);

        widget.update(WidgetEvent::ArrowUp, &opts);
        assert_eq!(widget.highlighted(), None);

        for _ in 0..5 {
            widget.update(WidgetEvent::ArrowDown, &opts);
        }
        assert_eq!(widget.highlighted(), Some(1));

        for _ in 0..5 {
            widget.update(WidgetEvent::ArrowUp, &opts);
        }
        assert_eq!(widget.highlighted(), Some(0));
    }

    #[test]
    fn arrows_keep_highlight_in_range_for_any_sequence() {
        let opts = options();
        let moves = [
            WidgetEvent::ArrowDown,
            WidgetEvent::ArrowDown,
            WidgetEvent::ArrowUp,
            WidgetEvent::ArrowDown,
            WidgetEvent::ArrowDown,
            WidgetEvent::ArrowDown,
            WidgetEvent::ArrowUp,
            WidgetEvent::ArrowUp,
            WidgetEvent::ArrowUp,
            WidgetEvent::ArrowUp,
        ];
        for query in ["", "du", "mars", "nothing"] {
            let mut widget = typed(query, &opts);
            let count = widget.filtered(&opts).len();
            for event in moves.iter().cloned() {
                widget.update(event, &opts);
                match widget.highlighted() {
                    None => {}
                    Some(i) => assert!(i < count, "index {i} out of range for {count} rows"),
                }
            }
        }
    }

    #[test]
    fn arrows_do_nothing_without_matches() {
        let opts = options();
        let mut widget = typed("nothing", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);
        assert_eq!(widget.highlighted(), None);
    }

    #[test]
    fn enter_commits_highlighted_row() {
        let opts = options();
        let mut widget = typed("du", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);

        let effects = widget.update(WidgetEvent::EnterPressed, &opts);
        assert_eq!(effects, vec![WidgetEffect::Select("B".into())]);
        assert_eq!(widget.query(), "Duna");
        assert_eq!(widget.phase(&opts), Phase::Closed);
    }

    #[test]
    fn enter_without_highlight_is_ignored() {
        let opts = options();
        let mut widget = typed("du", &opts);
        assert!(widget.update(WidgetEvent::EnterPressed, &opts).is_empty());
        assert!(widget.is_open());
        assert_eq!(widget.query(), "du");
    }

    #[test]
    fn click_commits_regardless_of_highlight() {
        let opts = options();
        let mut widget = typed("", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);

        let effects = widget.update(WidgetEvent::RowClicked(2), &opts);
        assert_eq!(effects, vec![WidgetEffect::Select("C".into())]);
        assert_eq!(widget.query(), "Mars");
        assert!(!widget.is_open());
    }

    #[test]
    fn click_ignored_when_dropdown_hidden_or_out_of_range() {
        let opts = options();
        let mut widget = typed("du", &opts);
        assert!(widget.update(WidgetEvent::RowClicked(7), &opts).is_empty());

        widget.update(WidgetEvent::EscapePressed, &opts);
        assert!(widget.update(WidgetEvent::RowClicked(0), &opts).is_empty());
        assert_eq!(widget.query(), "du");
    }

    #[test]
    fn escape_and_toggle_close() {
        let opts = options();
        let mut widget = typed("du", &opts);
        widget.update(WidgetEvent::EscapePressed, &opts);
        assert_eq!(widget.phase(&opts), Phase::Closed);

        widget.update(WidgetEvent::ToggleClicked, &opts);
        assert!(widget.is_open());
        widget.update(WidgetEvent::ToggleClicked, &opts);
        assert!(!widget.is_open());
    }

    #[test]
    fn clear_keeps_dropdown_open() {
        let opts = options();
        let mut widget = typed("du", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);

        let effects = widget.update(WidgetEvent::ClearClicked, &opts);
        assert!(effects.is_empty());
        assert_eq!(widget.query(), "");
        assert_eq!(widget.highlighted(), None);
        assert!(widget.is_open());
    }

    #[test]
    fn highlight_scrolls_into_view() {
        let opts: Vec<SearchResultItem> = (0..10)
            .map(|i| SearchResultItem::new(format!("Book {i}"), format!("id{i}")))
            .collect();
        let mut widget = typed("book", &opts);
        widget.set_visible_rows(3);

        for _ in 0..5 {
            widget.update(WidgetEvent::ArrowDown, &opts);
        }
        assert_eq!(widget.highlighted(), Some(4));
        assert_eq!(widget.viewport().scroll_offset, 2);

        for _ in 0..4 {
            widget.update(WidgetEvent::ArrowUp, &opts);
        }
        assert_eq!(widget.viewport().scroll_offset, 0);
    }

    #[test]
    fn replaced_options_drop_the_highlight() {
        let opts = options();
        let mut widget = typed("", &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);
        widget.update(WidgetEvent::ArrowDown, &opts);

        widget.on_options_replaced();
        assert_eq!(widget.highlighted(), None);
        assert_eq!(widget.viewport().scroll_offset, 0);
    }
}
