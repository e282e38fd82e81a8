//! Pane detail view: tab strip plus the focused pane host

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the detail view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab strip
            Constraint::Min(0),    // Pane host
        ])
        .split(area);

    draw_tab_strip(frame, chunks[0], app);
    draw_pane_host(frame, chunks[1], app);
}

/// Draw the open-pane tabs, numbered in open order
fn draw_tab_strip(frame: &mut Frame, area: Rect, app: &App) {
    let workspace = &app.state.workspace;
    let active_id = workspace.active_pane_id();

    let mut spans = vec![Span::styled("⬅ Esc ", Style::default().fg(Color::DarkGray))];

    for (idx, pane) in workspace.open_panes().iter().enumerate() {
        let is_active = Some(pane.id.as_str()) == active_id;
        let style = if is_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {}:{} ", idx + 1, pane.name),
            style,
        ));
        if is_active {
            spans.push(Span::styled("✕x", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the focused pane, or the empty state when nothing is focused
fn draw_pane_host(frame: &mut Frame, area: Rect, app: &App) {
    let workspace = &app.state.workspace;

    let Some(pane) = workspace.active_pane() else {
        // Dangling active id or no panes at all
        let message = Paragraph::new("Open a link to show it here.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(message, area);
        return;
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("URL: ", Style::default().fg(Color::DarkGray)),
            Span::styled(pane.url.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("Route: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                workspace.current_route(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from("This content is embedded in the session."),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("o", Style::default().fg(Color::Cyan)),
            Span::raw(" to open it in your browser, "),
            Span::styled("y", Style::default().fg(Color::Cyan)),
            Span::raw(" to copy the URL."),
        ]),
    ];

    let host = Paragraph::new(content).block(
        Block::default()
            .title(format!(" {} ", pane.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(host, area);
}
