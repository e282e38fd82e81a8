//! Section management view (admin)

use super::render_selectable_list;
use crate::app::App;
use crate::state::Section;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the section list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Sections ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let sections = app.state.sorted_sections();
    if sections.is_empty() {
        let empty = Paragraph::new("No sections yet.\nPress 'n' to create one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = sections
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let link_count = app.state.section_links(&section.slug).len();
            section_row(section, link_count, idx == app.state.section_selected)
        })
        .collect();

    let list = List::new(items).block(block);
    render_selectable_list(frame, area, list, app.state.section_selected);
}

fn section_row(section: &Section, link_count: usize, is_selected: bool) -> ListItem<'static> {
    let row_style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let dim = Style::default().fg(Color::DarkGray);

    ListItem::new(Line::from(vec![
        Span::styled(if is_selected { "▸" } else { " " }, row_style),
        Span::styled(format!("{:>2} ", section.order), dim),
        Span::styled(section.name.clone(), row_style),
        Span::styled(format!("  ({})", section.slug), dim),
        Span::styled(
            format!("  {link_count} links"),
            Style::default().fg(Color::Blue),
        ),
    ]))
}
