//! Shared modal overlay rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Fixed dialog width; the paragraph wraps if the terminal is narrower
const DIALOG_WIDTH: u16 = 54;

/// Center a box of the given size on the screen
fn popup_area(screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered modal box: bold accent title, then the body lines.
///
/// The body wraps to the dialog width, so long single-line messages can be
/// passed as-is.
pub fn render_overlay(frame: &mut Frame, title: &str, accent: Color, body: Vec<Line>) {
    let screen = frame.area();

    // Estimate the wrapped body height
    let inner_width = DIALOG_WIDTH.saturating_sub(2) as usize;
    let body_rows: usize = body
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();
    // title + blank line + body + borders
    let height = body_rows as u16 + 4;

    let area = popup_area(screen, DIALOG_WIDTH, height);
    frame.render_widget(Clear, area);

    let mut content = Vec::with_capacity(body.len() + 2);
    content.push(Line::styled(
        title.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    content.push(Line::from(""));
    content.extend(body);

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, area);
}
