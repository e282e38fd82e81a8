//! Catalog-wide search view

use super::grid::clip;
use super::render_selectable_list;
use crate::app::App;
use crate::state::{Link, LinkKind, SearchFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the search view: input line on top, results below
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_input(frame, chunks[0], app);
    draw_results(frame, chunks[1], app);
}

fn focus_color(focused: bool) -> Color {
    if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.search_focus == SearchFocus::Input;
    let typed = app.state.search_input.as_str();

    let content = if typed.is_empty() {
        Line::styled(
            "Type to search all links...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Line::styled(typed, Style::default().fg(Color::White))
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(focus_color(focused))),
    );
    frame.render_widget(input, area);

    if focused {
        let column = typed.chars().count() as u16;
        frame.set_cursor_position((area.x + 1 + column, area.y + 1));
    }
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.search_focus == SearchFocus::Results;
    let border = Style::default().fg(focus_color(focused));

    let query = app.state.effective_search_query();
    let results = app.state.search_results(query);

    if results.is_empty() {
        let message = if query.is_empty() {
            "Enter a search term to find links across all sections."
        } else {
            "No links found matching your search."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Results ")
                    .borders(Borders::ALL)
                    .border_style(border),
            );
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(idx, link)| result_row(link, idx == app.state.search_selected))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Results ({}) ", results.len()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    render_selectable_list(frame, area, list, app.state.search_selected);
}

fn result_row(link: &Link, is_selected: bool) -> ListItem<'static> {
    let kind_color = match link.kind {
        LinkKind::Embed => Color::Green,
        LinkKind::External => Color::Blue,
        LinkKind::Protocol => Color::Magenta,
    };
    let row_style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(if is_selected { "▸" } else { " " }, row_style),
        Span::styled(
            format!("[{}]", link.kind.label()),
            Style::default().fg(kind_color),
        ),
        Span::styled(format!(" {} ", clip(&link.name, 40)), row_style),
        Span::styled(
            format!("({})", link.section),
            Style::default().fg(Color::Blue),
        ),
    ];
    if let Some(description) = &link.description {
        spans.push(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}
