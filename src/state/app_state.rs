//! Application state definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::forms::FormState;
use super::workspace::Workspace;

/// Current view in the application.
///
/// `Browse` covers the whole dashboard flow; within it the workspace mode
/// decides between grid, detail and search rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Browse,
    LinkCreate,
    LinkEdit,
    Sections,
    SectionCreate,
}

/// Directory role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    Viewer,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }
}

/// What a link points at and how it can be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkKind {
    /// Embeddable content, can open in a dashboard pane
    #[default]
    Embed,
    /// Regular web page, always opens in the browser
    External,
    /// Non-http scheme handled by the OS (mailto:, slack:, ...)
    Protocol,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Embed => "embed",
            LinkKind::External => "external",
            LinkKind::Protocol => "protocol",
        }
    }
}

/// Where an embed link prefers to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenTarget {
    /// In a dashboard pane
    #[default]
    Pane,
    /// Directly in the system browser, bypassing the workspace
    NewTab,
}

impl OpenTarget {
    pub fn label(self) -> &'static str {
        match self {
            OpenTarget::Pane => "pane",
            OpenTarget::NewTab => "new-tab",
        }
    }
}

/// Sidebar category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub order: u32,
}

/// A catalog link record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub name: String,
    pub url: String,
    pub section: String,
    pub kind: LinkKind,
    pub order: u32,
    pub description: Option<String>,
    pub open_in: OpenTarget,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Case-insensitive substring match against name and description
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Profile of the signed-in user, as reported by the catalog daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

/// Focus state for the search view (input vs result list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Input,
    Results,
}

impl SearchFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Input => Self::Results,
            Self::Results => Self::Input,
        };
    }
}

/// Which kind of record a pending delete refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Link,
    Section,
}

/// A delete awaiting confirmation in the dialog
#[derive(Debug, Clone)]
pub struct PendingDeleteAction {
    pub target: DeleteTarget,
    pub id: String,
    pub display: String,
    /// false = Cancel highlighted, true = Delete highlighted
    pub selected_option: bool,
}

impl PendingDeleteAction {
    pub fn new(target: DeleteTarget, id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            target,
            id: id.into(),
            display: display.into(),
            selected_option: false,
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub workspace: Workspace,

    // Catalog data
    pub sections: Vec<Section>,
    pub links: Vec<Link>,
    pub profile: Option<Profile>,
    pub catalog_connected: bool,

    // Selection
    pub sidebar_index: usize,
    pub selected_index: usize,
    pub section_selected: usize,

    // Search view
    pub search_input: String,
    pub search_focus: SearchFocus,
    pub search_selected: usize,

    // Form state
    pub form_state: FormState,
    /// Id of the link being edited, if any
    pub editing_link_id: Option<String>,

    // Modals
    pub pending_delete: Option<PendingDeleteAction>,
    errors: Vec<String>,
}

impl AppState {
    /// Whether the signed-in user can curate the catalog
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.role.is_admin())
    }

    /// Sections in sidebar order
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// The section currently selected in the sidebar
    pub fn selected_section(&self) -> Option<&Section> {
        self.sorted_sections().get(self.sidebar_index).copied()
    }

    /// Links of one section, in catalog order
    pub fn section_links(&self, slug: &str) -> Vec<&Link> {
        let mut links: Vec<_> = self.links.iter().filter(|l| l.section == slug).collect();
        links.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        links
    }

    /// Links of the selected sidebar section
    pub fn visible_links(&self) -> Vec<&Link> {
        match self.selected_section() {
            Some(section) => {
                let slug = section.slug.clone();
                self.section_links(&slug)
            }
            None => Vec::new(),
        }
    }

    /// Catalog-wide search results for a query, sorted by name
    pub fn search_results(&self, query: &str) -> Vec<&Link> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut links: Vec<_> = self.links.iter().filter(|l| l.matches(query)).collect();
        links.sort_by(|a, b| a.name.cmp(&b.name));
        links
    }

    /// The query search results should reflect: the committed workspace query
    /// wins, a half-typed input counts before the first commit.
    pub fn effective_search_query(&self) -> &str {
        let committed = self.workspace.search_query();
        if committed.is_empty() {
            &self.search_input
        } else {
            committed
        }
    }

    /// Move selection down in a flat list
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up in a flat list
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection left in the grid
    pub fn move_selection_left(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        if self.selected_index % columns > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection right in the grid
    pub fn move_selection_right(&mut self, columns: usize, total: usize) {
        if columns == 0 || total == 0 {
            return;
        }
        let col = self.selected_index % columns;
        if col < columns - 1 && self.selected_index + 1 < total {
            self.selected_index += 1;
        }
    }

    /// Move selection up one grid row
    pub fn move_selection_up_grid(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        if self.selected_index >= columns {
            self.selected_index -= columns;
        }
    }

    /// Move selection down one grid row
    pub fn move_selection_down_grid(&mut self, columns: usize, total: usize) {
        if columns == 0 || total == 0 {
            return;
        }
        let new_index = self.selected_index + columns;
        if new_index < total {
            self.selected_index = new_index;
        } else {
            let current_row = self.selected_index / columns;
            let last_row = (total - 1) / columns;
            if current_row < last_row {
                self.selected_index = total - 1;
            }
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_section(slug: &str, order: u32) -> Section {
        Section {
            id: format!("sec-{slug}"),
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            icon: "Folder".to_string(),
            order,
        }
    }

    fn test_link(id: &str, section: &str, order: u32) -> Link {
        Link {
            id: id.to_string(),
            name: format!("Link {id}"),
            url: format!("https://example.com/{id}"),
            section: section.to_string(),
            kind: LinkKind::Embed,
            order,
            description: None,
            open_in: OpenTarget::Pane,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    mod catalog_queries {
        use super::*;

        #[test]
        fn test_sorted_sections_by_order() {
            let mut state = AppState::default();
            state.sections = vec![test_section("b", 2), test_section("a", 0)];

            let sorted = state.sorted_sections();
            assert_eq!(sorted[0].slug, "a");
            assert_eq!(sorted[1].slug, "b");
        }

        #[test]
        fn test_section_links_filters_and_orders() {
            let mut state = AppState::default();
            state.links = vec![
                test_link("x", "reports", 1),
                test_link("y", "billing", 0),
                test_link("z", "reports", 0),
            ];

            let links = state.section_links("reports");
            assert_eq!(links.len(), 2);
            assert_eq!(links[0].id, "z");
            assert_eq!(links[1].id, "x");
        }

        #[test]
        fn test_search_matches_name_and_description() {
            let mut state = AppState::default();
            let mut with_desc = test_link("a", "reports", 0);
            with_desc.description = Some("Quarterly invoice summary".to_string());
            state.links = vec![with_desc, test_link("b", "reports", 1)];

            let hits = state.search_results("invoice");
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].id, "a");

            let hits = state.search_results("link b");
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].id, "b");
        }

        #[test]
        fn test_search_is_case_insensitive() {
            let mut state = AppState::default();
            state.links = vec![test_link("a", "reports", 0)];

            assert_eq!(state.search_results("LINK A").len(), 1);
        }

        #[test]
        fn test_empty_query_yields_no_results() {
            let mut state = AppState::default();
            state.links = vec![test_link("a", "reports", 0)];

            assert!(state.search_results("").is_empty());
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_flat_navigation_clamps() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);

            state.move_selection_down(3);
            state.move_selection_down(3);
            state.move_selection_down(3);
            assert_eq!(state.selected_index, 2);
        }

        #[test]
        fn test_grid_navigation() {
            let mut state = AppState::default();
            // 2 columns, 5 items: rows [0 1] [2 3] [4]
            state.move_selection_right(2, 5);
            assert_eq!(state.selected_index, 1);
            state.move_selection_down_grid(2, 5);
            assert_eq!(state.selected_index, 3);
            state.move_selection_down_grid(2, 5);
            assert_eq!(state.selected_index, 4);
            state.move_selection_up_grid(2);
            assert_eq!(state.selected_index, 2);
            state.move_selection_left(2);
            assert_eq!(state.selected_index, 2);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue() {
            let mut state = AppState::default();
            assert!(!state.has_errors());

            state.push_error("first");
            state.push_error("second");
            assert_eq!(state.current_error(), Some("first"));

            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
            state.dismiss_error();
        }
    }

    mod roles {
        use super::*;

        #[test]
        fn test_no_profile_is_not_admin() {
            let state = AppState::default();
            assert!(!state.is_admin());
        }

        #[test]
        fn test_admin_profile() {
            let mut state = AppState::default();
            state.profile = Some(Profile {
                uid: "u1".to_string(),
                email: "ops@example.com".to_string(),
                display_name: "Ops".to_string(),
                role: Role::Admin,
            });
            assert!(state.is_admin());
        }
    }
}
