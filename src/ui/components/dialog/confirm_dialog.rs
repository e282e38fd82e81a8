//! Delete confirmation dialog

use super::base::render_overlay;
use crate::state::{DeleteTarget, PendingDeleteAction};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the confirmation dialog for a pending delete
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let noun = match action.target {
        DeleteTarget::Link => "link",
        DeleteTarget::Section => "section",
    };

    let mut body = vec![
        Line::from(vec![
            Span::raw(format!("Delete the {noun} ")),
            Span::styled(
                format!("\"{}\"", action.display),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("?"),
        ]),
        Line::from(""),
    ];

    for (label, deletes) in [("Cancel", false), ("Delete", true)] {
        let highlighted = action.selected_option == deletes;
        let marker = if highlighted { "▸ " } else { "  " };
        let style = match (highlighted, deletes) {
            (true, true) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        body.push(Line::styled(format!("{marker}{label}"), style));
    }

    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Cyan);
    body.push(Line::from(""));
    body.push(Line::from(vec![
        Span::styled("↑↓", key),
        Span::styled(" select   ", dim),
        Span::styled("Enter", key),
        Span::styled(" confirm   ", dim),
        Span::styled("Esc", key),
        Span::styled(" cancel", dim),
    ]));

    render_overlay(frame, "Confirm Delete", Color::Red, body);
}
