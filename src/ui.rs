use ratatui::{prelude::*, widgets::*};

use crate::messages::render::ButtonView;
use crate::shell::MessageTone;

/// Renders a text input field
pub fn render_input<'a>(content: String, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Renders the navigation buttons as `F1 ⏻ Quitter` chips
pub fn render_nav_bar(buttons: &[ButtonView]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, button) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("F{}", i + 1), Style::default().fg(Color::DarkGray)));
        let color = if button.is_quit { Color::Red } else { Color::Cyan };
        let text = if button.icon.is_empty() {
            format!(" {} ", button.label)
        } else {
            format!(" {} {} ", button.icon, button.label)
        };
        spans.push(Span::styled(text, Style::default().fg(color).bold()));
    }
    Line::from(spans)
}

/// Status message colour
pub fn tone_color(tone: MessageTone) -> Color {
    match tone {
        MessageTone::Normal => Color::Gray,
        MessageTone::Error => Color::Red,
    }
}

/// Rectangle of `percent_x` by `percent_y` centred in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
