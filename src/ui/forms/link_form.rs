//! Link form rendering (create and edit)

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{Form, FormState, LinkForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the link create form
pub fn draw_link_create(frame: &mut Frame, area: Rect, app: &App) {
    if let FormState::LinkCreate(form) = &app.state.form_state {
        draw_form(frame, area, form, " New Link ");
    }
}

/// Draw the link edit form
pub fn draw_link_edit(frame: &mut Frame, area: Rect, app: &App) {
    if let FormState::LinkEdit(form) = &app.state.form_state {
        draw_form(frame, area, form, " Edit Link ");
    }
}

fn draw_form(frame: &mut Frame, area: Rect, form: &LinkForm, title: &str) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // URL
            Constraint::Length(3), // Section
            Constraint::Length(3), // Kind
            Constraint::Length(3), // Open in
            Constraint::Length(3), // Order
            Constraint::Min(5),    // Description
        ])
        .margin(1)
        .split(area);

    for index in 0..form.field_count() {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, chunks[index], field, form.active_field() == index);
        }
    }
}
