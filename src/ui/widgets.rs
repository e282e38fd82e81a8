//! Small shared widgets

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a list with one highlighted row, scrolling it into view
pub fn render_selectable_list(frame: &mut Frame, area: Rect, list: List, selected: usize) {
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
