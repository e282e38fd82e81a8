//! Application state and core logic

use crate::catalog::CatalogClientTrait;
use crate::config::TuiConfig;
use crate::platform;
use crate::state::{
    AppState, DeleteTarget, FormState, Link, LinkForm, LinkKind, OpenTarget, Pane,
    PendingDeleteAction, SearchFocus, SectionForm, View, ViewMode, Workspace,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Window for the double Ctrl+C quit gesture
const QUIT_WINDOW: Duration = Duration::from_millis(1500);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Catalog client for daemon communication
    pub catalog: Box<dyn CatalogClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
    /// Terminal size for grid calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance connected to the catalog daemon
    pub async fn new(config: &TuiConfig, initial_route: Option<String>) -> Result<Self> {
        let catalog =
            crate::catalog::CatalogClient::new(config.catalog_address.clone()).await?;
        let route = initial_route
            .or_else(|| config.start_route.clone())
            .unwrap_or_default();

        let mut app = Self::with_catalog(Box::new(catalog), route);

        app.state.catalog_connected = app.catalog.check_connection().await;
        if app.state.catalog_connected {
            if let Ok(profile) = app.catalog.get_profile().await {
                app.state.profile = Some(profile);
            }
            app.refresh_catalog().await;
            tracing::info!(
                sections = app.state.sections.len(),
                links = app.state.links.len(),
                "catalog loaded"
            );
        } else {
            tracing::warn!("catalog daemon unreachable, starting offline");
        }

        // Jump to the configured section if it exists
        if let Some(slug) = &config.default_section {
            let index = app
                .state
                .sorted_sections()
                .iter()
                .position(|s| &s.slug == slug);
            if let Some(index) = index {
                app.state.sidebar_index = index;
            }
        }

        Ok(app)
    }

    /// Build an App around an existing catalog client (used by tests)
    #[allow(clippy::field_reassign_with_default)]
    pub fn with_catalog(catalog: Box<dyn CatalogClientTrait>, initial_route: String) -> Self {
        let mut state = AppState::default();
        state.workspace = Workspace::from_route(initial_route);
        state.search_input = state.workspace.search_query().to_string();

        Self {
            state,
            catalog,
            quit: false,
            status_message: None,
            terminal_size: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Number of columns the link grid currently renders with
    pub fn calculate_grid_columns(&self) -> usize {
        // terminal_size is (height, width)
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        // Inside the sidebar and the grid's outer borders
        let usable = width.saturating_sub(crate::ui::SIDEBAR_WIDTH + 2);
        crate::ui::columns_for(usable)
    }

    /// Reload sections and links from the catalog, clamping selections
    pub async fn refresh_catalog(&mut self) {
        match self.catalog.list_sections().await {
            Ok(sections) => self.state.sections = sections,
            Err(err) => self.push_error(format!("{err:#}")),
        }
        match self.catalog.list_links("").await {
            Ok(links) => self.state.links = links,
            Err(err) => self.push_error(format!("{err:#}")),
        }

        let section_count = self.state.sections.len();
        if self.state.sidebar_index >= section_count {
            self.state.sidebar_index = section_count.saturating_sub(1);
        }
        let link_count = self.state.visible_links().len();
        if self.state.selected_index >= link_count {
            self.state.selected_index = link_count.saturating_sub(1);
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.pending_delete.is_some() {
            self.handle_delete_dialog_key(key).await?;
            return Ok(());
        }

        // Global quit: double Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self
                .last_ctrl_c
                .is_some_and(|last| last.elapsed() < QUIT_WINDOW)
            {
                self.quit = true;
            } else {
                self.last_ctrl_c = Some(Instant::now());
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Browse => match self.state.workspace.mode() {
                ViewMode::Grid => self.handle_grid_key(key).await?,
                ViewMode::Detail => self.handle_detail_key(key).await?,
                ViewMode::Search => self.handle_search_key(key).await?,
            },
            View::LinkCreate => self.handle_link_form_key(key, false).await?,
            View::LinkEdit => self.handle_link_form_key(key, true).await?,
            View::Sections => self.handle_sections_key(key).await?,
            View::SectionCreate => self.handle_section_form_key(key).await?,
        }

        Ok(())
    }

    /// Handle keys in the link grid
    async fn handle_grid_key(&mut self, key: KeyEvent) -> Result<()> {
        let columns = self.calculate_grid_columns();
        let total = self.state.visible_links().len();

        match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
            }
            // Grid navigation
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down_grid(columns, total);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.move_selection_up_grid(columns);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.state.move_selection_left(columns);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.state.move_selection_right(columns, total);
            }
            // Section switching
            KeyCode::Tab => {
                let count = self.state.sections.len();
                if count > 0 {
                    self.state.sidebar_index = (self.state.sidebar_index + 1) % count;
                    self.state.reset_selection();
                }
            }
            KeyCode::BackTab => {
                let count = self.state.sections.len();
                if count > 0 {
                    self.state.sidebar_index =
                        (self.state.sidebar_index + count - 1) % count;
                    self.state.reset_selection();
                }
            }
            KeyCode::Enter => {
                if let Some(link) = self.selected_grid_link() {
                    self.open_link(&link)?;
                }
            }
            KeyCode::Char('o') => {
                if let Some(link) = self.selected_grid_link() {
                    self.open_in_browser(&link.url)?;
                }
            }
            KeyCode::Char('y') => {
                if let Some(link) = self.selected_grid_link() {
                    self.copy_url(&link.url);
                }
            }
            KeyCode::Char('r') => {
                self.refresh_catalog().await;
                self.status_message = Some("Catalog refreshed".to_string());
            }
            KeyCode::Char('/') => {
                self.enter_search();
            }
            KeyCode::Char('[') => {
                self.history_back();
            }
            KeyCode::Char(']') => {
                self.history_forward();
            }
            // Admin curation
            KeyCode::Char('n') => {
                if self.require_admin() {
                    let slug = self
                        .state
                        .selected_section()
                        .map(|s| s.slug.clone())
                        .unwrap_or_default();
                    self.state.form_state = FormState::LinkCreate(LinkForm::new(&slug));
                    self.state.current_view = View::LinkCreate;
                }
            }
            KeyCode::Char('e') => {
                if self.require_admin() {
                    if let Some(link) = self.selected_grid_link() {
                        self.state.editing_link_id = Some(link.id.clone());
                        self.state.form_state = FormState::LinkEdit(LinkForm::from_link(&link));
                        self.state.current_view = View::LinkEdit;
                    }
                }
            }
            KeyCode::Char('d') => {
                if self.require_admin() {
                    if let Some(link) = self.selected_grid_link() {
                        self.state.pending_delete = Some(PendingDeleteAction::new(
                            DeleteTarget::Link,
                            link.id.clone(),
                            link.name.clone(),
                        ));
                    }
                }
            }
            KeyCode::Char('g') => {
                if self.require_admin() {
                    self.state.section_selected = 0;
                    self.state.current_view = View::Sections;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the pane detail view
    async fn handle_detail_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.workspace.show_grid();
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus_pane_offset(1);
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus_pane_offset(-1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let id = self
                    .state
                    .workspace
                    .open_panes()
                    .get(index)
                    .map(|p| p.id.clone());
                if let Some(id) = id {
                    self.state.workspace.set_active_pane(&id);
                }
            }
            KeyCode::Char('x') => {
                let active = self.state.workspace.active_pane_id().map(str::to_string);
                if let Some(id) = active {
                    self.state.workspace.close_pane(&id);
                }
            }
            KeyCode::Char('o') => {
                if let Some(pane) = self.state.workspace.active_pane() {
                    let url = pane.url.clone();
                    self.open_in_browser(&url)?;
                }
            }
            KeyCode::Char('y') => {
                if let Some(pane) = self.state.workspace.active_pane() {
                    let url = pane.url.clone();
                    self.copy_url(&url);
                }
            }
            KeyCode::Char('/') => {
                self.enter_search();
            }
            KeyCode::Char('[') => {
                self.history_back();
            }
            KeyCode::Char(']') => {
                self.history_forward();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the search view
    async fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Escape: back to the grid
            KeyCode::Esc => {
                self.state.search_input.clear();
                self.state.search_focus = SearchFocus::Input;
                self.state.search_selected = 0;
                self.state.workspace.show_grid();
            }
            // Tab: toggle focus between input and results
            KeyCode::Tab => {
                self.state.search_focus.toggle();
            }
            // Navigation in results
            KeyCode::Down | KeyCode::Char('j')
                if matches!(self.state.search_focus, SearchFocus::Results) =>
            {
                let max = self
                    .state
                    .search_results(self.state.effective_search_query())
                    .len();
                if max > 0 && self.state.search_selected < max - 1 {
                    self.state.search_selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k')
                if matches!(self.state.search_focus, SearchFocus::Results) =>
            {
                if self.state.search_selected > 0 {
                    self.state.search_selected -= 1;
                }
            }
            // Enter: commit the query or open the selected result
            KeyCode::Enter => {
                if matches!(self.state.search_focus, SearchFocus::Input) {
                    let query = self.state.search_input.clone();
                    self.state.workspace.set_search_query(&query);
                    self.state.search_selected = 0;
                    if !self.state.search_results(&query).is_empty() {
                        self.state.search_focus = SearchFocus::Results;
                    }
                } else {
                    self.open_search_result()?;
                }
            }
            KeyCode::Char('[') if matches!(self.state.search_focus, SearchFocus::Results) => {
                self.history_back();
            }
            KeyCode::Char(']') if matches!(self.state.search_focus, SearchFocus::Results) => {
                self.history_forward();
            }
            // Character input in the search box
            KeyCode::Char(c) if matches!(self.state.search_focus, SearchFocus::Input) => {
                self.state.search_input.push(c);
            }
            KeyCode::Backspace if matches!(self.state.search_focus, SearchFocus::Input) => {
                self.state.search_input.pop();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the section management view
    async fn handle_sections_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.state.sections.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state.current_view = View::Browse;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 && self.state.section_selected < count - 1 {
                    self.state.section_selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.state.section_selected > 0 {
                    self.state.section_selected -= 1;
                }
            }
            KeyCode::Char('n') => {
                let next_order = self
                    .state
                    .sections
                    .iter()
                    .map(|s| s.order + 1)
                    .max()
                    .unwrap_or(0);
                self.state.form_state = FormState::SectionCreate(SectionForm::new(next_order));
                self.state.current_view = View::SectionCreate;
            }
            KeyCode::Char('d') => {
                let section = self
                    .state
                    .sorted_sections()
                    .get(self.state.section_selected)
                    .map(|s| (s.id.clone(), s.name.clone()));
                if let Some((id, name)) = section {
                    self.state.pending_delete =
                        Some(PendingDeleteAction::new(DeleteTarget::Section, id, name));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the link create/edit form
    async fn handle_link_form_key(&mut self, key: KeyEvent, editing: bool) -> Result<()> {
        // Save shortcut
        if key.code == KeyCode::Char('s') && key.modifiers.contains(platform::COPY_MODIFIER) {
            self.submit_link_form(editing).await?;
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                self.cancel_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.form_state.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form_state.prev_field();
            }
            KeyCode::Enter => {
                if self.state.form_state.is_active_field_multiline() {
                    if let Some(field) = self.state.form_state.get_active_field_mut() {
                        field.push_char('\n');
                    }
                } else {
                    self.state.form_state.next_field();
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                // Space and arrows cycle choice fields; space is also a
                // regular character in text fields
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    if matches!(field.value, crate::state::FieldValue::Choice { .. }) {
                        field.cycle_choice();
                    } else if key.code == KeyCode::Char(' ') {
                        field.push_char(' ');
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the section create form
    async fn handle_section_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(platform::COPY_MODIFIER) {
            self.submit_section_form().await?;
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                self.state.form_state = FormState::None;
                self.state.current_view = View::Sections;
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.state.form_state.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form_state.prev_field();
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the delete confirmation dialog
    async fn handle_delete_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                if let Some(pending) = self.state.pending_delete.as_mut() {
                    pending.selected_option = !pending.selected_option;
                }
            }
            KeyCode::Esc => {
                self.state.pending_delete = None;
            }
            KeyCode::Enter => {
                if let Some(pending) = self.state.pending_delete.take() {
                    if pending.selected_option {
                        self.perform_delete(&pending).await;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Execute a confirmed delete and refresh the catalog
    async fn perform_delete(&mut self, pending: &PendingDeleteAction) {
        let result = match pending.target {
            DeleteTarget::Link => self.catalog.delete_link(&pending.id).await,
            DeleteTarget::Section => self.catalog.delete_section(&pending.id).await,
        };

        match result {
            Ok(()) => {
                self.status_message = Some(format!("\"{}\" deleted", pending.display));
                self.refresh_catalog().await;
            }
            Err(err) => self.push_error(format!("{err:#}")),
        }
    }

    /// Submit the link form, creating or updating the record
    async fn submit_link_form(&mut self, editing: bool) -> Result<()> {
        let form = match &self.state.form_state {
            FormState::LinkCreate(f) | FormState::LinkEdit(f) => f.clone(),
            _ => return Ok(()),
        };

        if !form.is_valid() {
            self.status_message = Some("Name and URL are required".to_string());
            return Ok(());
        }

        let now = Utc::now();
        let link = Link {
            id: self
                .state
                .editing_link_id
                .clone()
                .filter(|_| editing)
                .unwrap_or_default(),
            name: form.name.as_text().to_string(),
            url: form.url.as_text().to_string(),
            section: form.section.as_text().to_string(),
            kind: form.kind_value(),
            order: form.order.as_order(),
            description: form.description_value(),
            open_in: form.open_in_value(),
            created_at: now,
            updated_at: now,
        };

        let result = if editing {
            self.catalog.update_link(&link).await.map(|_| link.id.clone())
        } else {
            self.catalog.create_link(&link).await
        };

        match result {
            Ok(_) => {
                self.status_message = Some(format!("\"{}\" saved", link.name));
                self.cancel_form();
                self.refresh_catalog().await;
            }
            Err(err) => self.push_error(format!("{err:#}")),
        }
        Ok(())
    }

    /// Submit the section form
    async fn submit_section_form(&mut self) -> Result<()> {
        let form = match &self.state.form_state {
            FormState::SectionCreate(f) => f.clone(),
            _ => return Ok(()),
        };

        if !form.is_valid() {
            self.status_message = Some("Name is required".to_string());
            return Ok(());
        }

        let result = self
            .catalog
            .create_section(
                form.name.as_text(),
                &form.slug_value(),
                form.icon.as_text(),
                form.order.as_order(),
            )
            .await;

        match result {
            Ok(_) => {
                self.status_message = Some(format!("\"{}\" created", form.name.as_text()));
                self.state.form_state = FormState::None;
                self.state.current_view = View::Sections;
                self.refresh_catalog().await;
            }
            Err(err) => self.push_error(format!("{err:#}")),
        }
        Ok(())
    }

    /// Abandon the active form and return to browsing
    fn cancel_form(&mut self) {
        self.state.form_state = FormState::None;
        self.state.editing_link_id = None;
        self.state.current_view = View::Browse;
    }

    /// The grid link under the cursor, cloned out of the state
    fn selected_grid_link(&self) -> Option<Link> {
        self.state
            .visible_links()
            .get(self.state.selected_index)
            .map(|l| (*l).clone())
    }

    /// Open a link the way its record asks for.
    ///
    /// Embeds go to a workspace pane unless they insist on a browser tab;
    /// external pages and protocol URLs always leave the app.
    pub fn open_link(&mut self, link: &Link) -> Result<()> {
        match link.kind {
            LinkKind::Embed if link.open_in != OpenTarget::NewTab => {
                self.state.workspace.open_pane(Pane {
                    id: link.id.clone(),
                    name: link.name.clone(),
                    url: link.url.clone(),
                });
            }
            _ => self.open_in_browser(&link.url)?,
        }
        Ok(())
    }

    /// Open the selected search result. Embeds deep-link into the dashboard
    /// through a pushed route so back returns to the results.
    fn open_search_result(&mut self) -> Result<()> {
        let query = self.state.effective_search_query().to_string();
        let link = self
            .state
            .search_results(&query)
            .get(self.state.search_selected)
            .map(|l| (*l).clone());

        let Some(link) = link else {
            return Ok(());
        };

        match link.kind {
            LinkKind::Embed if link.open_in != OpenTarget::NewTab => {
                self.state.workspace.deep_link(Pane {
                    id: link.id.clone(),
                    name: link.name.clone(),
                    url: link.url.clone(),
                });
                self.state.search_input.clear();
                self.state.search_focus = SearchFocus::Input;
            }
            _ => self.open_in_browser(&link.url)?,
        }
        Ok(())
    }

    /// Switch the workspace into search mode and reset the input
    fn enter_search(&mut self) {
        self.state.search_input.clear();
        self.state.search_focus = SearchFocus::Input;
        self.state.search_selected = 0;
        self.state.workspace.enter_search();
    }

    /// Move pane focus by a signed offset, wrapping around the tab strip
    fn focus_pane_offset(&mut self, offset: isize) {
        let panes = self.state.workspace.open_panes();
        if panes.is_empty() {
            return;
        }
        let count = panes.len() as isize;
        let current = self
            .state
            .workspace
            .active_pane_id()
            .and_then(|id| panes.iter().position(|p| p.id == id))
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(count) as usize;
        let id = panes[next].id.clone();
        self.state.workspace.set_active_pane(&id);
    }

    /// Walk back in the session history, resyncing derived view state
    fn history_back(&mut self) {
        if self.state.workspace.go_back() {
            self.sync_after_navigation();
        } else {
            self.status_message = Some("No earlier state".to_string());
        }
    }

    /// Walk forward in the session history, resyncing derived view state
    fn history_forward(&mut self) {
        if self.state.workspace.go_forward() {
            self.sync_after_navigation();
        } else {
            self.status_message = Some("No later state".to_string());
        }
    }

    /// After a rehydration the search box mirrors the restored query
    fn sync_after_navigation(&mut self) {
        self.state.search_input = self.state.workspace.search_query().to_string();
        self.state.search_selected = 0;
    }

    /// Hand a URL to the system browser
    fn open_in_browser(&mut self, url: &str) -> Result<()> {
        platform::open_url(url)?;
        self.status_message = Some("Opened in browser".to_string());
        Ok(())
    }

    /// Copy a URL to the clipboard
    fn copy_url(&mut self, url: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.to_string())) {
            Ok(()) => self.status_message = Some("URL copied".to_string()),
            Err(err) => self.status_message = Some(format!("Clipboard unavailable: {err}")),
        }
    }

    /// Gate an action on the admin role, explaining refusals in the status bar
    fn require_admin(&mut self) -> bool {
        if self.state.is_admin() {
            true
        } else {
            self.status_message = Some("Requires the admin role".to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalogClientTrait;
    use crate::state::{Profile, Role, Section};
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn test_app() -> App {
        App::with_catalog(Box::new(MockCatalogClientTrait::new()), String::new())
    }

    fn test_link(id: &str, section: &str) -> Link {
        Link {
            id: id.to_string(),
            name: format!("Link {id}"),
            url: format!("https://example.com/{id}"),
            section: section.to_string(),
            kind: LinkKind::Embed,
            order: 0,
            description: None,
            open_in: OpenTarget::Pane,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn admin_profile() -> Profile {
        Profile {
            uid: "u1".to_string(),
            email: "ops@example.com".to_string(),
            display_name: "Ops".to_string(),
            role: Role::Admin,
        }
    }

    fn seed_section(app: &mut App, slug: &str) {
        app.state.sections.push(Section {
            id: format!("sec-{slug}"),
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            icon: String::new(),
            order: app.state.sections.len() as u32,
        });
    }

    mod opening_links {
        use super::*;

        #[test]
        fn test_embed_opens_pane() {
            let mut app = test_app();
            let link = test_link("crm", "utilities");

            app.open_link(&link).unwrap();

            assert_eq!(app.state.workspace.mode(), ViewMode::Detail);
            assert_eq!(app.state.workspace.active_pane_id(), Some("crm"));
            assert_eq!(app.state.workspace.open_panes().len(), 1);
        }

        #[test]
        fn test_reopening_focuses_existing_pane() {
            let mut app = test_app();
            app.open_link(&test_link("a", "s")).unwrap();
            app.open_link(&test_link("b", "s")).unwrap();
            app.open_link(&test_link("a", "s")).unwrap();

            assert_eq!(app.state.workspace.open_panes().len(), 2);
            assert_eq!(app.state.workspace.active_pane_id(), Some("a"));
        }
    }

    mod detail_navigation {
        use super::*;

        #[tokio::test]
        async fn test_tab_cycles_active_pane() {
            let mut app = test_app();
            app.open_link(&test_link("a", "s")).unwrap();
            app.open_link(&test_link("b", "s")).unwrap();
            app.open_link(&test_link("c", "s")).unwrap();

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.workspace.active_pane_id(), Some("a"));

            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert_eq!(app.state.workspace.active_pane_id(), Some("c"));
        }

        #[tokio::test]
        async fn test_digit_jumps_to_pane() {
            let mut app = test_app();
            app.open_link(&test_link("a", "s")).unwrap();
            app.open_link(&test_link("b", "s")).unwrap();

            app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
            assert_eq!(app.state.workspace.active_pane_id(), Some("a"));
        }

        #[tokio::test]
        async fn test_close_last_pane_returns_to_grid() {
            let mut app = test_app();
            app.open_link(&test_link("a", "s")).unwrap();

            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();

            assert_eq!(app.state.workspace.mode(), ViewMode::Grid);
            assert!(app.state.workspace.open_panes().is_empty());
        }

        #[tokio::test]
        async fn test_esc_keeps_panes_open() {
            let mut app = test_app();
            app.open_link(&test_link("a", "s")).unwrap();

            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert_eq!(app.state.workspace.mode(), ViewMode::Grid);
            assert_eq!(app.state.workspace.open_panes().len(), 1);
        }
    }

    mod search_flow {
        use super::*;

        #[tokio::test]
        async fn test_slash_enters_search_and_enter_commits() {
            let mut app = test_app();
            app.state.links.push(test_link("a", "s"));
            seed_section(&mut app, "s");

            app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
            assert_eq!(app.state.workspace.mode(), ViewMode::Search);

            for c in "link".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.workspace.search_query(), "link");
            assert_eq!(app.state.search_focus, SearchFocus::Results);
        }

        #[tokio::test]
        async fn test_esc_returns_to_grid() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert_eq!(app.state.workspace.mode(), ViewMode::Grid);
            assert_eq!(app.state.workspace.search_query(), "");
        }

        #[tokio::test]
        async fn test_result_deep_links_and_back_restores() {
            let mut app = test_app();
            app.state.links.push(test_link("alpha", "s"));
            seed_section(&mut app, "s");

            app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
            for c in "alpha".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.workspace.mode(), ViewMode::Detail);
            assert_eq!(app.state.workspace.active_pane_id(), Some("alpha"));

            // Back returns to the committed search
            app.handle_key(key(KeyCode::Char('['))).await.unwrap();
            assert_eq!(app.state.workspace.mode(), ViewMode::Search);
            assert_eq!(app.state.workspace.search_query(), "alpha");
            assert_eq!(app.state.search_input, "alpha");
        }
    }

    mod admin_gating {
        use super::*;

        #[tokio::test]
        async fn test_viewer_cannot_open_create_form() {
            let mut app = test_app();
            seed_section(&mut app, "s");

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();

            assert_eq!(app.state.current_view, View::Browse);
            assert!(app.status_message.is_some());
        }

        #[tokio::test]
        async fn test_admin_opens_create_form_with_section() {
            let mut app = test_app();
            app.state.profile = Some(admin_profile());
            seed_section(&mut app, "reports");

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();

            assert_eq!(app.state.current_view, View::LinkCreate);
            match &app.state.form_state {
                FormState::LinkCreate(form) => assert_eq!(form.section.as_text(), "reports"),
                other => panic!("unexpected form state: {other:?}"),
            }
        }
    }

    mod form_submission {
        use super::*;

        #[tokio::test]
        async fn test_create_link_calls_catalog_and_refreshes() {
            let mut mock = MockCatalogClientTrait::new();
            mock.expect_create_link()
                .withf(|link: &Link| link.name == "CRM" && link.url == "https://crm")
                .times(1)
                .returning(|_| Ok("new-id".to_string()));
            mock.expect_list_sections().returning(|| Ok(Vec::new()));
            mock.expect_list_links().returning(|_| Ok(Vec::new()));

            let mut app = App::with_catalog(Box::new(mock), String::new());
            app.state.profile = Some(admin_profile());
            seed_section(&mut app, "s");

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
            for c in "CRM".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            for c in "https://crm".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), platform::COPY_MODIFIER))
                .await
                .unwrap();

            assert_eq!(app.state.current_view, View::Browse);
            assert!(matches!(app.state.form_state, FormState::None));
        }

        #[tokio::test]
        async fn test_invalid_form_is_not_submitted() {
            let mut app = test_app();
            app.state.profile = Some(admin_profile());
            seed_section(&mut app, "s");

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
            // Name and URL still empty; the mock has no expectations, so any
            // catalog call would panic the test
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), platform::COPY_MODIFIER))
                .await
                .unwrap();

            assert_eq!(app.state.current_view, View::LinkCreate);
            assert!(app.status_message.is_some());
        }
    }

    mod delete_flow {
        use super::*;

        #[tokio::test]
        async fn test_confirmed_delete_calls_catalog() {
            let mut mock = MockCatalogClientTrait::new();
            mock.expect_delete_link()
                .withf(|id: &str| id == "a")
                .times(1)
                .returning(|_| Ok(()));
            mock.expect_list_sections().returning(|| Ok(Vec::new()));
            mock.expect_list_links().returning(|_| Ok(Vec::new()));

            let mut app = App::with_catalog(Box::new(mock), String::new());
            app.state.profile = Some(admin_profile());
            seed_section(&mut app, "s");
            app.state.links.push(test_link("a", "s"));

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            assert!(app.state.pending_delete.is_some());

            // Move highlight to Delete and confirm
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert!(app.state.pending_delete.is_none());
        }

        #[tokio::test]
        async fn test_cancelled_delete_touches_nothing() {
            let mut app = test_app();
            app.state.profile = Some(admin_profile());
            seed_section(&mut app, "s");
            app.state.links.push(test_link("a", "s"));

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert!(app.state.pending_delete.is_none());
            assert_eq!(app.state.links.len(), 1);
        }
    }

    mod error_dialog {
        use super::*;

        #[tokio::test]
        async fn test_errors_block_input_until_dismissed() {
            let mut app = test_app();
            app.push_error("boom");

            // Keys other than Enter/Esc are swallowed
            app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
            assert_eq!(app.state.workspace.mode(), ViewMode::Grid);
            assert!(app.state.has_errors());

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }
}
