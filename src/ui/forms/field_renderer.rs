//! Form field rendering

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw one bordered form field. The active field gets the accent border and
/// a cursor (text and order fields) or cycle arrows (choice fields).
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };

    let lines = match &field.value {
        FieldValue::Text(text) => value_lines(text, is_active),
        FieldValue::Order(n) => value_lines(&n.to_string(), is_active),
        FieldValue::Choice { options, selected } => {
            let option = options.get(*selected).copied().unwrap_or("");
            let mut spans = vec![Span::styled(
                format!("◂ {option} ▸"),
                Style::default().fg(accent),
            )];
            if is_active {
                spans.push(Span::styled(
                    "  Space cycles",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            vec![Line::from(spans)]
        }
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Lines for a typed value, with the cursor appended to the last one
fn value_lines(text: &str, is_active: bool) -> Vec<Line<'static>> {
    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));

    if text.is_empty() {
        return if is_active {
            vec![Line::from(cursor)]
        } else {
            vec![Line::styled(
                "(empty)".to_string(),
                Style::default().fg(Color::DarkGray),
            )]
        };
    }

    let mut lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    if text.ends_with('\n') {
        lines.push(Line::from(""));
    }
    if is_active {
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }
    lines
}
