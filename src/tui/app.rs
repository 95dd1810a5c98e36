use crate::api::BooksApi;
use crate::autocomplete::{Autocomplete, WidgetEffect, WidgetEvent};
use crate::config::Config;
use crate::detail::{DetailController, DetailTicket};
use crate::model::{BookDetail, SearchResultItem};
use crate::route::Route;
use crate::search::{SearchController, SearchOutcome, SearchTicket};
use crate::tui::search::LineEditor;
use crate::tui::ui;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// Completions from request tasks
pub enum BgMessage {
    SearchDone(SearchTicket, crate::Result<Vec<SearchResultItem>>),
    DetailDone(DetailTicket, crate::Result<Option<BookDetail>>),
}

/// Screen regions recorded while drawing, used for mouse hit-testing
#[derive(Debug, Default, Clone, Copy)]
pub struct HitAreas {
    pub input: Rect,
    pub toggle: Rect,
    /// Inner area of the dropdown, one row per suggestion
    pub list: Option<Rect>,
}

pub struct App {
    pub config: Config,
    pub route: Route,

    // Search screen
    pub widget: Autocomplete,
    pub input: LineEditor,
    pub search: SearchController,
    pub focused: bool,

    // Detail screen
    pub detail: DetailController,
    pub detail_scroll: u16,

    pub status_message: String,
    pub hit_areas: HitAreas,

    runtime: Handle,
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn BooksApi>, runtime: Handle) -> Self {
        let (tx, rx) = unbounded();
        let max_results = config.api.max_results;

        let mut app = Self {
            config,
            route: Route::Search,
            widget: Autocomplete::new(),
            input: LineEditor::default(),
            search: SearchController::new(Arc::clone(&api), max_results),
            focused: true,
            detail: DetailController::new(api),
            detail_scroll: 0,
            status_message: "Ready".to_string(),
            hit_areas: HitAreas::default(),
            runtime,
            bg_receiver: rx,
            bg_sender: tx,
            should_quit: false,
        };

        app.dispatch(WidgetEvent::FocusGained);
        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| crate::BookFinderError::Terminal(e.to_string()))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Feed one event to the widget and carry out its effects.
    pub fn dispatch(&mut self, event: WidgetEvent) {
        let effects = self.widget.update(event, self.search.results());
        self.input.sync(self.widget.query());

        for effect in effects {
            match effect {
                WidgetEffect::Search(text) => self.start_search(&text),
                WidgetEffect::Select(id) => {
                    tracing::info!("Selected book ID: {}", id);
                    self.navigate(Route::book(id));
                }
            }
        }
    }

    fn start_search(&mut self, text: &str) {
        let Some(ticket) = self.search.begin(text) else {
            return;
        };

        let api = self.search.api();
        let tx = self.bg_sender.clone();
        self.runtime.spawn(async move {
            let result = api.search(&ticket.query, ticket.max_results).await;
            let _ = tx.send(BgMessage::SearchDone(ticket, result));
        });
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.route = route;

        match self.route.clone() {
            Route::Search => {
                self.detail.leave();
                self.focused = true;
                self.dispatch(WidgetEvent::FocusGained);
            }
            Route::Book { id } => {
                self.focused = false;
                self.detail_scroll = 0;
                let Some(ticket) = self.detail.enter(Some(id.as_str())) else {
                    return;
                };

                let api = self.search.api();
                let tx = self.bg_sender.clone();
                self.runtime.spawn(async move {
                    let result = api.volume(&ticket.id).await;
                    let _ = tx.send(BgMessage::DetailDone(ticket, result));
                });
            }
        }
    }

    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BgMessage::SearchDone(ticket, result) => {
                    match self.search.complete(&ticket, result) {
                        SearchOutcome::Applied => {
                            self.widget.on_options_replaced();
                            self.status_message =
                                format!("{} results for '{}'", self.search.results().len(), ticket.query.trim());
                        }
                        SearchOutcome::Stale => {}
                        SearchOutcome::Failed => {
                            self.status_message = "Search failed, showing previous results".to_string();
                        }
                    }
                }
                BgMessage::DetailDone(ticket, result) => {
                    self.detail.complete(&ticket, result);
                }
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.route == Route::Search {
            self.handle_search_key(key);
        } else {
            self.handle_detail_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if !self.focused {
            self.focused = true;
            self.dispatch(WidgetEvent::FocusGained);
        }

        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatch(WidgetEvent::ClearClicked);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c);
                self.dispatch(WidgetEvent::TextChanged(self.input.text.clone()));
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.dispatch(WidgetEvent::TextChanged(self.input.text.clone()));
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.dispatch(WidgetEvent::TextChanged(self.input.text.clone()));
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            KeyCode::Down => self.dispatch(WidgetEvent::ArrowDown),
            KeyCode::Up => self.dispatch(WidgetEvent::ArrowUp),
            KeyCode::Enter => self.dispatch(WidgetEvent::EnterPressed),
            KeyCode::Esc => self.dispatch(WidgetEvent::EscapePressed),
            KeyCode::F(4) => self.dispatch(WidgetEvent::ToggleClicked),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => self.navigate(Route::Search),
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(10),
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(10),
            KeyCode::Home => self.detail_scroll = 0,
            _ => {}
        }
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.route != Route::Search {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let pos = Position::new(mouse.column, mouse.row);
        let areas = self.hit_areas;

        if areas.toggle.contains(pos) {
            // The clear glyph sits on the toggle button, so a click does both.
            if !self.widget.query().is_empty() {
                self.dispatch(WidgetEvent::ClearClicked);
            }
            self.dispatch(WidgetEvent::ToggleClicked);
        } else if areas.input.contains(pos) {
            self.focused = true;
            self.dispatch(WidgetEvent::FocusGained);
        } else if let Some(list) = areas.list.filter(|list| list.contains(pos)) {
            let row = (pos.y - list.y) as usize + self.widget.viewport().scroll_offset;
            self.dispatch(WidgetEvent::RowClicked(row));
        } else {
            self.focused = false;
        }
    }
}
