//! Sidebar section buttons

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one boxed sidebar entry
pub const BUTTON_HEIGHT: u16 = 3;

/// Glyph for a section's icon identifier. The catalog stores the original
/// icon names; only a handful have a terminal equivalent.
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "Folder" => "▣",
        "Star" => "★",
        "Wrench" => "⚙",
        "Chart" => "▤",
        _ => "•",
    }
}

/// Render one boxed section entry in the sidebar
pub fn render_section_button(
    frame: &mut Frame,
    area: Rect,
    icon: &str,
    name: &str,
    is_selected: bool,
) {
    let (border, text) = if is_selected {
        (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(Color::DarkGray), Style::default())
    };

    let label = Line::from(vec![
        Span::raw(format!(" {} ", icon_glyph(icon))),
        Span::styled(name.to_string(), text),
    ]);

    let button = Paragraph::new(label)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(button, area);
}
