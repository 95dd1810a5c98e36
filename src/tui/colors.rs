use ratatui::style::{Color, Modifier, Style};

pub const BAR_BG: Color = Color::Rgb(0, 95, 135);
pub const HEADER_BG: Color = Color::Rgb(40, 40, 50);
pub const HIGHLIGHT_BG: Color = Color::Rgb(60, 60, 80);
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);

pub fn header() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn status_bar() -> Style {
    Style::default().fg(Color::White).bg(BAR_BG)
}

pub fn input_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn placeholder() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Dropdown row: highlighted rows stand out, the rest alternate
pub fn row(visual_idx: usize, highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(Color::White)
            .bg(HIGHLIGHT_BG)
            .add_modifier(Modifier::BOLD)
    } else if visual_idx % 2 == 1 {
        Style::default().fg(Color::White).bg(STRIPE_BG)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn error() -> Style {
    Style::default().fg(Color::LightRed)
}

pub fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn title() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
