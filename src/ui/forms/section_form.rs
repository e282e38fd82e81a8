//! Section form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{Form, FormState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the section create form
pub fn draw_section_create(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::SectionCreate(form) = &app.state.form_state else {
        return;
    };

    let block = Block::default()
        .title(" New Section ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Slug
            Constraint::Length(3), // Icon
            Constraint::Length(3), // Order
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    for index in 0..form.field_count() {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index], field, form.active_field() == index);
        }
    }
}
