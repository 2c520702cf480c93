//! Rendering for the roster TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::app::{App, Focus, PageControl};
use crate::models::COLUMNS;

/// Display width of each table column, in `COLUMNS` order.
const COLUMN_WIDTHS: [usize; 5] = [6, 20, 28, 22, 18];

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_page() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Length(1), // loading indicator
            Constraint::Min(0),    // table
            Constraint::Length(3), // pagination bar
            Constraint::Length(3), // status bar
        ])
        .split(size);

    draw_search_box(f, app, chunks[0]);
    draw_loading(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_pagination(f, app, chunks[3]);
    draw_status_bar(f, app, chunks[4]);
}

fn draw_search_box(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;

    let display_text = if app.state.search_text.is_empty() {
        "Search"
    } else {
        app.state.search_text.as_str()
    };

    let text_style = if app.state.search_text.is_empty() {
        Styles::inactive()
    } else {
        Styles::default()
    };

    let border_style = if focused {
        Styles::active_border()
    } else {
        Styles::inactive_border()
    };

    let search_box = Paragraph::new(display_text.to_string())
        .style(text_style)
        .block(
            Block::default()
                .title("Filter")
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    f.render_widget(search_box, area);

    if focused {
        let cursor_x = area.x + 1 + app.state.search_text.width() as u16;
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width - 1 {
            f.set_cursor(cursor_x, cursor_y);
        }
    }
}

fn draw_loading(f: &mut Frame, app: &App, area: Rect) {
    if app.loading {
        let loading = Paragraph::new("Loading...").style(Styles::title());
        f.render_widget(loading, area);
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(
        COLUMNS
            .iter()
            .zip(COLUMN_WIDTHS)
            .flat_map(|(column, width)| {
                [
                    Span::styled(pad_cell(column.label, width), Styles::title()),
                    Span::styled(" │ ", Styles::title()),
                ]
            })
            .collect::<Vec<_>>(),
    );

    let rows = app.visible_rows();
    let items: Vec<ListItem> = std::iter::once(ListItem::new(header))
        .chain(rows.iter().map(|row| {
            let cells = [
                row.id.to_string(),
                row.name.clone(),
                row.email.clone(),
                row.phone.clone(),
                row.address.city.clone(),
            ];
            let spans: Vec<Span> = cells
                .iter()
                .zip(COLUMN_WIDTHS)
                .flat_map(|(cell, width)| {
                    [Span::raw(pad_cell(cell, width)), Span::raw(" │ ")]
                })
                .collect();
            ListItem::new(Line::from(spans))
        }))
        .collect();

    let title = match &app.dataset {
        Some(records) => format!("Users ({} loaded)", records.len()),
        None => "Users".to_string(),
    };

    let table = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border()),
    );

    f.render_widget(table, area);
}

fn draw_pagination(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Pages;
    let controls = app.page_controls();

    let mut spans = Vec::new();
    for (i, control) in controls.iter().enumerate() {
        let label = match control {
            PageControl::Previous => "Previous".to_string(),
            PageControl::Page(page) => page.to_string(),
            PageControl::Next => "Next".to_string(),
        };

        let style = if focused && i == app.selected_control {
            Styles::selected()
        } else if *control == PageControl::Page(app.state.current_page) {
            Styles::active_page()
        } else {
            Styles::default()
        };

        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    let border_style = if focused {
        Styles::active_border()
    } else {
        Styles::inactive_border()
    };

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Pages")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(bar, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::Search => "Type to filter | ←/→: Page | Tab: Pages | Esc: Quit",
        Focus::Pages => "←/→: Select | Enter: Go | Tab: Filter | Q/Esc: Quit",
    };

    let status = Paragraph::new(hints)
        .style(Styles::info())
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

/// Pad or truncate a cell to an exact display width (unicode-aware).
fn pad_cell(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    format!("{}…{}", out, " ".repeat(width - used - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_cell_pads_to_exact_width() {
        assert_eq!(pad_cell("abc", 6), "abc   ");
        assert_eq!(pad_cell("abc", 3), "abc");
    }

    #[test]
    fn test_pad_cell_truncates_with_ellipsis() {
        let out = pad_cell("abcdefgh", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn test_pad_cell_handles_wide_chars() {
        // Each ideograph is two columns wide.
        let out = pad_cell("東京都渋谷区", 5);
        assert_eq!(out.width(), 5);
        assert!(out.ends_with('…') || out.ends_with(' '));
    }
}
