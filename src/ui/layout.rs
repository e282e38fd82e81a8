//! Layout components (sidebar, status bar)

use super::components::{render_section_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{SearchFocus, View, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the sections sidebar
pub const SIDEBAR_WIDTH: u16 = 22;

/// Split the screen into sidebar and main content.
///
/// The bottom row is left out of both; the status bar draws over it.
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let body = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Draw the sections sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = app.state.sorted_sections();

    // Header line
    let header_area = Rect {
        height: 1.min(area.height),
        ..area
    };
    let header = Paragraph::new(Line::from(Span::styled(
        " linkdeck",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, header_area);

    if sections.is_empty() {
        let message_area = Rect {
            x: area.x,
            y: area.y + 2.min(area.height),
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let message = Paragraph::new(" No sections")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(message, message_area);
        return;
    }

    // One button per section below the header
    for (idx, section) in sections.iter().enumerate() {
        let y = area.y + 1 + (idx as u16) * BUTTON_HEIGHT;
        if y + BUTTON_HEIGHT > area.y + area.height {
            break;
        }
        let button_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: BUTTON_HEIGHT,
        };

        let is_selected = idx == app.state.sidebar_index
            && matches!(app.state.current_view, View::Browse);
        render_section_button(frame, button_area, &section.icon, &section.name, is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Build status bar content
    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.catalog_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // History position indicators
    let workspace = &app.state.workspace;
    let arrow = |enabled: bool, glyph: &'static str| {
        if enabled {
            Span::styled(glyph, Style::default().fg(Color::Cyan))
        } else {
            Span::styled(glyph, Style::default().fg(Color::Black))
        }
    };
    spans.push(arrow(workspace.can_go_back(), "◂"));
    spans.push(arrow(workspace.can_go_forward(), "▸"));
    spans.push(Span::raw(" "));

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Transient message
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Signed-in profile on the right
    if let Some(profile) = &app.state.profile {
        let who = format!(" {} ({}) ", profile.email, profile.role.label());
        let who_area = Rect {
            x: area.width.saturating_sub(who.len() as u16),
            y: area.height.saturating_sub(1),
            width: (who.len() as u16).min(area.width),
            height: 1,
        };
        let who_widget =
            Paragraph::new(who).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(who_widget, who_area);
    }
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Browse => match app.state.workspace.mode() {
            ViewMode::Grid => {
                let mut hints =
                    "h/j/k/l:nav  Tab:section  Enter:open  o:browser  /:search".to_string();
                if app.state.is_admin() {
                    hints.push_str("  n:new  e:edit  d:del  g:sections");
                }
                hints
            }
            ViewMode::Detail => {
                "Tab:pane  1-9:jump  x:close  o:browser  y:copy  [/]:history  Esc:grid"
                    .to_string()
            }
            ViewMode::Search => match app.state.search_focus {
                SearchFocus::Input => "Type to search  Enter:run  Tab:results  Esc:grid".to_string(),
                SearchFocus::Results => "j/k:nav  Enter:open  Tab:input  Esc:grid".to_string(),
            },
        },
        View::Sections => "j/k:nav  n:new  d:delete  Esc:back".to_string(),
        View::LinkCreate | View::LinkEdit | View::SectionCreate => {
            format!("Tab:next  {}  Esc:cancel", crate::platform::SAVE_SHORTCUT)
        }
    }
}
