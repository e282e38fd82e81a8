//! Form rendering module

mod field_renderer;
mod link_form;
mod section_form;

pub use field_renderer::draw_field;
pub use link_form::{draw_link_create, draw_link_edit};
pub use section_form::draw_section_create;
