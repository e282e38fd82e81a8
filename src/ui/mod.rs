//! UI module for rendering the TUI

mod components;
mod detail;
mod forms;
mod grid;
mod layout;
mod search;
mod sections;
mod widgets;

pub use grid::columns_for;
pub use layout::SIDEBAR_WIDTH;
pub use widgets::render_selectable_list;

use crate::app::App;
use crate::state::{View, ViewMode};
use ratatui::Frame;

/// Top-level draw dispatch: sidebar, active view, status bar, modals
pub fn draw(frame: &mut Frame, app: &App) {
    let (sidebar_area, main_area) = layout::create_layout(frame.area());

    layout::draw_sidebar(frame, sidebar_area, app);

    match &app.state.current_view {
        View::Browse => match app.state.workspace.mode() {
            ViewMode::Grid => grid::draw(frame, main_area, app),
            ViewMode::Detail => detail::draw(frame, main_area, app),
            ViewMode::Search => search::draw(frame, main_area, app),
        },
        View::LinkCreate => forms::draw_link_create(frame, main_area, app),
        View::LinkEdit => forms::draw_link_edit(frame, main_area, app),
        View::Sections => sections::draw(frame, main_area, app),
        View::SectionCreate => forms::draw_section_create(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays win over everything behind them
    if let Some(pending) = &app.state.pending_delete {
        components::render_confirm_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
