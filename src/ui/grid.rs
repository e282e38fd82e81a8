//! Link-card grid view

use crate::app::App;
use crate::state::{Link, LinkKind, OpenTarget};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MIN_CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5; // borders + name + badge + description
const CARD_GAP: u16 = 1;

/// Number of card columns that fit in a content width.
///
/// Shared with the key handlers so grid navigation and rendering agree on
/// the column count.
pub fn columns_for(width: u16) -> usize {
    if width < MIN_CARD_WIDTH {
        return 1;
    }
    (((width + CARD_GAP) / (MIN_CARD_WIDTH + CARD_GAP)) as usize).max(1)
}

/// Card positions within the grid's inner area
struct CardGrid {
    columns: usize,
    card_width: u16,
}

impl CardGrid {
    fn new(inner_width: u16) -> Self {
        let columns = columns_for(inner_width);
        // Stretch cards to share the leftover width
        let gaps = (columns as u16 - 1) * CARD_GAP;
        let card_width = (inner_width.saturating_sub(gaps) / columns as u16).max(MIN_CARD_WIDTH);
        Self { columns, card_width }
    }

    fn slot(&self, inner: Rect, index: usize) -> Rect {
        let row = (index / self.columns) as u16;
        let col = (index % self.columns) as u16;
        Rect {
            x: inner.x + col * (self.card_width + CARD_GAP),
            y: inner.y + row * CARD_HEIGHT,
            width: self.card_width,
            height: CARD_HEIGHT,
        }
    }
}

/// Draw the link grid for the selected section
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .state
        .selected_section()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Links".to_string());

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let links = app.state.visible_links();
    if links.is_empty() {
        let message = if app.state.is_admin() {
            "No links in this section.\nPress 'n' to add a link."
        } else {
            "No links in this section."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let grid = CardGrid::new(inner.width);
    for (idx, link) in links.iter().enumerate() {
        let slot = grid.slot(inner, idx);
        // Rows below the visible area are clipped wholesale
        if slot.y + slot.height > inner.y + inner.height {
            break;
        }
        draw_card(frame, slot, link, idx == app.state.selected_index);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, link: &Link, is_selected: bool) {
    let block = if is_selected {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::DarkGray))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = inner.width as usize;

    let name_style = if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let name = Line::styled(clip(&link.name, width), name_style);

    let badge = badge_line(link);

    let description = Line::styled(
        clip(link.description.as_deref().unwrap_or(""), width),
        Style::default().fg(Color::DarkGray),
    );

    frame.render_widget(Paragraph::new(vec![name, badge, description]), inner);
}

/// Kind badge, with a marker when an embed insists on the browser
fn badge_line(link: &Link) -> Line<'static> {
    let color = match link.kind {
        LinkKind::Embed => Color::Green,
        LinkKind::External => Color::Blue,
        LinkKind::Protocol => Color::Magenta,
    };
    let mut spans = vec![Span::styled(
        format!("[{}]", link.kind.label()),
        Style::default().fg(color),
    )];
    if link.kind == LinkKind::Embed && link.open_in == OpenTarget::NewTab {
        spans.push(Span::styled(
            " ↗ new tab",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Clip to a display width, char-boundary safe
pub(super) fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut clipped: String = s.chars().take(max.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
