//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{error, info};

use super::ui;
use crate::config::Config;
use crate::fetch::{self, Loader};
use crate::models::{PageState, Record};
use crate::table;

/// Which strip owns key input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Search,
    Pages,
}

/// Controls in the pagination bar, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageControl {
    Previous,
    Page(usize),
    Next,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    /// Current page, rows per page, and search text
    pub state: PageState,
    /// Loaded records; `None` until the first successful fetch
    pub dataset: Option<Vec<Record>>,
    /// True while the fetch is in flight
    pub loading: bool,
    pub focus: Focus,
    /// Highlighted control in the pagination bar
    pub selected_control: usize,
    pub should_quit: bool,
    loader: Option<Loader>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            state: PageState::new(config.rows_per_page),
            dataset: None,
            loading: false,
            focus: Focus::Search,
            selected_control: 0,
            should_quit: false,
            loader: None,
            config,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start_load()?;

        loop {
            self.poll_loader();

            terminal.draw(|f| ui::draw(f, self))?;

            // Poll with a timeout so the fetch channel is checked between
            // key presses.
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Spawn the one fetch of this app's lifetime.
    pub fn start_load(&mut self) -> Result<()> {
        let client = fetch::build_client(&self.config)?;
        self.loader = Some(Loader::spawn(client, self.config.endpoint.clone()));
        self.loading = true;
        Ok(())
    }

    /// Take the fetch result once it has arrived.
    fn poll_loader(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let Some(result) = loader.poll() else {
            return;
        };

        self.loading = false;
        self.loader = None;

        match result {
            Ok(records) => {
                info!("Loaded {} records", records.len());
                self.dataset = Some(records);
                self.state.reset_page();
            }
            Err(e) => {
                // Logged only; the table stays empty.
                error!("Failed to load user directory: {}", e);
            }
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Search => Focus::Pages,
                    Focus::Pages => Focus::Search,
                };
                self.selected_control = 0;
            }
            KeyCode::PageUp => self.activate(PageControl::Previous),
            KeyCode::PageDown => self.activate(PageControl::Next),
            code => match self.focus {
                Focus::Search => self.handle_search_key(code),
                Focus::Pages => self.handle_pages_key(code),
            },
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.state.push_search(c),
            KeyCode::Backspace => self.state.pop_search(),
            KeyCode::Left => self.activate(PageControl::Previous),
            KeyCode::Right => self.activate(PageControl::Next),
            _ => {}
        }
    }

    fn handle_pages_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_control > 0 {
                    self.selected_control -= 1;
                }
            }
            KeyCode::Right => {
                let last = self.page_controls().len().saturating_sub(1);
                if self.selected_control < last {
                    self.selected_control += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(control) = self.page_controls().get(self.selected_control).cloned() {
                    self.activate(control);
                }
            }
            _ => {}
        }
    }

    /// Pagination bar contents for the current state, visibility guards
    /// applied.
    pub fn page_controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::new();
        if table::show_previous(self.state.current_page) {
            controls.push(PageControl::Previous);
        }
        for page in table::pagination_group(self.state.current_page, self.state.rows_per_page) {
            controls.push(PageControl::Page(page));
        }
        if table::show_next(self.state.current_page, self.state.rows_per_page) {
            controls.push(PageControl::Next);
        }
        controls
    }

    fn activate(&mut self, control: PageControl) {
        match control {
            PageControl::Previous => {
                if table::show_previous(self.state.current_page) {
                    self.state.previous_page();
                }
            }
            PageControl::Next => {
                if table::show_next(self.state.current_page, self.state.rows_per_page) {
                    self.state.next_page();
                }
            }
            PageControl::Page(page) => self.state.go_to_page(page),
        }

        // The bar re-renders with a different control set; keep the
        // highlight in bounds.
        let last = self.page_controls().len().saturating_sub(1);
        if self.selected_control > last {
            self.selected_control = last;
        }
    }

    /// Rows surviving pagination and filtering for this render pass.
    pub fn visible_rows(&self) -> Vec<Record> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        let slice = table::page_slice(dataset, self.state.current_page, self.state.rows_per_page);
        table::filter_rows(slice, &self.state.search_text).unwrap_or_default()
    }
}
