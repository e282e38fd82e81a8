//! Modal error box for queued failures

use super::base::render_overlay;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the oldest queued error over the current view
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    let body = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            key("Enter"),
            Span::raw(" or "),
            key("Esc"),
            Span::raw(" to dismiss"),
        ]),
    ];

    render_overlay(frame, "Error", Color::Red, body);
}
