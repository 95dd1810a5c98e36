use crate::detail::DetailState;
use crate::model::BookDetail;
use crate::route::Route;
use crate::sanitize::description_to_text;
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Most suggestion rows shown before the dropdown scrolls
const MAX_DROPDOWN_ROWS: usize = 10;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    match app.route.clone() {
        Route::Search => draw_search_screen(frame, app, chunks[1]),
        Route::Book { .. } => draw_detail_screen(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(" Book Finder  {}", app.route);
    frame.render_widget(
        Paragraph::new(fit_width(&text, area.width as usize)).style(colors::header()),
        area,
    );
}

fn draw_search_screen(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Dropdown
        ])
        .split(area);

    draw_input(frame, app, chunks[0]);
    draw_dropdown(frame, app, chunks[1]);
}

fn draw_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors::input_border(app.focused))
        .title(" Search ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Toggle button in the last two inner columns
    let toggle_width = 2.min(inner.width);
    let toggle = Rect::new(inner.right().saturating_sub(toggle_width), inner.y, toggle_width, inner.height.min(1));
    let text_area = Rect::new(inner.x, inner.y, inner.width.saturating_sub(toggle_width), inner.height.min(1));

    let text_width = text_area.width.saturating_sub(1) as usize;
    let before = app.input.before_cursor();
    let (visible, cursor_col) = input_window(before, &app.input.text[before.len()..], text_width);
    let line = if app.input.text.is_empty() {
        Line::from(Span::styled(
            format!(" {}", fit_width(&app.config.ui.placeholder, text_width)),
            colors::placeholder(),
        ))
    } else {
        Line::from(format!(" {}", visible))
    };
    frame.render_widget(Paragraph::new(line), text_area);

    let glyph = if app.widget.query().is_empty() { "\u{25BE}" } else { "\u{2715}" };
    frame.render_widget(Paragraph::new(glyph).style(colors::muted()), toggle);

    app.hit_areas.input = area;
    app.hit_areas.toggle = toggle;

    if app.focused {
        let offset = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        let cursor_x = text_area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(text_area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(cursor_x, text_area.y));
    }
}

fn draw_dropdown(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hit_areas.list = None;

    let options = app.search.results();
    if !app.widget.is_dropdown_visible(options) || area.height < 3 {
        return;
    }

    let filtered = app.widget.filtered(options);
    let max_rows = (area.height as usize - 2).min(MAX_DROPDOWN_ROWS);
    let rows = filtered.len().min(max_rows);
    let popup = Rect::new(area.x, area.y, area.width, rows as u16 + 2);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let titles: Vec<String> = filtered.iter().map(|item| item.title.clone()).collect();
    app.widget.set_visible_rows(rows);
    let viewport = app.widget.viewport();
    let highlighted = app.widget.highlighted();

    for (visual_idx, logical_idx) in (viewport.scroll_offset..titles.len()).take(rows).enumerate() {
        let row_area = Rect::new(inner.x, inner.y + visual_idx as u16, inner.width, 1);
        let text = format!(" {}", fit_width(&titles[logical_idx], inner.width.saturating_sub(1) as usize));
        let style = colors::row(visual_idx, highlighted == Some(logical_idx));
        frame.render_widget(Paragraph::new(text).style(style), row_area);
    }

    app.hit_areas.list = Some(inner);
}

fn draw_detail_screen(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Book ");

    let lines = match app.detail.state() {
        DetailState::Loading => vec![Line::from("Loading...")],
        DetailState::Error(message) => vec![Line::styled(message.clone(), colors::error())],
        DetailState::NotFound => vec![Line::from("Book not found")],
        DetailState::Loaded(detail) => detail_lines(detail, app),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn detail_lines(detail: &BookDetail, app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(detail.title.clone(), colors::title())];

    if let Some(authors) = detail.authors_line() {
        lines.push(Line::styled(format!("by {}", authors), colors::muted()));
    }
    lines.push(Line::from(""));

    if detail.has_image() && app.config.images.is_allowed(&detail.image_url) {
        lines.push(Line::from(format!("Cover: {}", detail.image_url)));
    } else {
        lines.push(Line::styled("No image available", colors::muted()));
    }
    lines.push(Line::from(""));

    for text_line in description_to_text(&detail.description).lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    lines
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match &app.route {
        Route::Search if app.search.is_loading() => " \u{23F3} Loading...".to_string(),
        Route::Search => format!(" {}", app.status_message),
        Route::Book { id } => format!(" Volume {}", id),
    };

    let right_text = match app.route {
        Route::Search => " \u{2191}\u{2193}:Move  Enter:Open  Esc:Close  F4:Toggle  Ctrl+U:Clear  Ctrl+Q:Quit ",
        Route::Book { .. } => " \u{2191}\u{2193}/PgUp/PgDn:Scroll  Esc:Back  Ctrl+Q:Quit ",
    };

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        fit_width(&left_text, available_width)
    };

    frame.render_widget(Paragraph::new(status_str).style(colors::status_bar()), area);
}

/// Truncate to `width` display columns, marking the cut with an ellipsis
fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

/// Keep the last `width` display columns so the end of a long query stays visible
fn tail_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut kept: Vec<char> = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        kept.push(c);
        used += w;
    }
    kept.into_iter().rev().collect()
}

/// Visible slice of the input and the cursor column within it.
///
/// Long text shows its tail, leaving a column for a cursor at the end. When
/// the cursor is left of that tail the window starts at the cursor instead.
fn input_window(before: &str, after: &str, width: usize) -> (String, usize) {
    let before_cols = columns(before);
    let total = before_cols + columns(after);
    if total < width {
        return (format!("{before}{after}"), before_cols);
    }
    if width == 0 {
        return (String::new(), 0);
    }

    let tail = tail_width(&format!("{before}{after}"), width - 1);
    let tail_start = total.saturating_sub(columns(&tail));
    if before_cols >= tail_start {
        return (tail, before_cols - tail_start);
    }

    let mut shown = String::new();
    let mut used = 0;
    for c in after.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        shown.push(c);
        used += w;
    }
    (shown, 0)
}

fn columns(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("Dune", 10), "Dune");
        assert_eq!(fit_width("Children of Dune", 8), "Childre\u{2026}");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn fit_width_counts_wide_chars() {
        assert_eq!(fit_width("三体三体", 5), "三体\u{2026}");
    }

    #[test]
    fn tail_width_keeps_the_end() {
        assert_eq!(tail_width("the left hand of darkness", 8), "darkness");
        assert_eq!(tail_width("short", 8), "short");
    }

    #[test]
    fn input_window_follows_the_cursor() {
        assert_eq!(input_window("dune", "", 10), ("dune".to_string(), 4));

        let text = "the left hand of darkness";
        assert_eq!(input_window(text, "", 9), ("darkness".to_string(), 8));
        assert_eq!(input_window("the left hand of dark", "ness", 9), ("darkness".to_string(), 4));
        assert_eq!(input_window("", text, 9), ("the left ".to_string(), 0));
        assert_eq!(input_window("the ", "left hand of darkness", 9), ("left hand".to_string(), 0));
    }

    #[test]
    fn input_window_counts_wide_chars() {
        assert_eq!(input_window("三体三体", "", 5), ("三体".to_string(), 4));
        assert_eq!(input_window("ab", "", 0), (String::new(), 0));
    }
}
