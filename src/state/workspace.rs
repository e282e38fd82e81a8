//! Workspace view-state controller
//!
//! Tracks which content panes are open, which one is focused, and the
//! top-level mode (grid listing, pane detail, or search results), and keeps
//! that state synchronized with the session route. Every operation rewrites
//! the current route in place (replace, not push) so reloading or walking
//! history reconstructs the exact same state; [`Workspace::rehydrate`] is the
//! reverse direction and never writes.

use serde::{Deserialize, Serialize};

use super::route::{
    decode_panes, encode_panes, History, RouteQuery, PARAM_ACTIVE, PARAM_PANES, PARAM_QUERY,
    PARAM_VIEW, VIEW_DETAIL, VIEW_SEARCH,
};

/// An open content view, keyed by the id of the link it shows.
///
/// Re-opening a link focuses its existing pane instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Top-level mode of the dashboard. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Link-card grid, the default when the route carries no view parameter
    #[default]
    Grid,
    /// Open panes with a tab strip
    Detail,
    /// Catalog-wide search results
    Search,
}

/// View state plus its session history.
///
/// Constructed per session from an initial route and injected into whatever
/// consumes it; there is no global instance.
#[derive(Debug, Clone)]
pub struct Workspace {
    mode: ViewMode,
    open_panes: Vec<Pane>,
    active_pane_id: Option<String>,
    search_query: String,
    history: History,
}

impl Workspace {
    /// Build a workspace from an initial route query string
    pub fn from_route(initial: impl Into<String>) -> Self {
        let mut workspace = Self {
            mode: ViewMode::default(),
            open_panes: Vec::new(),
            active_pane_id: None,
            search_query: String::new(),
            history: History::new(initial),
        };
        let route = workspace.history.current().to_string();
        workspace.apply_route(&route);
        workspace
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Open panes in tab order (insertion order)
    pub fn open_panes(&self) -> &[Pane] {
        &self.open_panes
    }

    pub fn active_pane_id(&self) -> Option<&str> {
        self.active_pane_id.as_deref()
    }

    /// The focused pane, if the active id still references an open pane
    pub fn active_pane(&self) -> Option<&Pane> {
        let id = self.active_pane_id.as_deref()?;
        self.open_panes.iter().find(|p| p.id == id)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The route encoding the current state
    pub fn current_route(&self) -> &str {
        self.history.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_forward()
    }

    /// Open a pane and focus it.
    ///
    /// Idempotent on the pane id: an already-open pane is focused without
    /// being duplicated or reordered.
    pub fn open_pane(&mut self, pane: Pane) {
        if !self.open_panes.iter().any(|p| p.id == pane.id) {
            self.open_panes.push(pane.clone());
        }
        self.active_pane_id = Some(pane.id.clone());
        self.mode = ViewMode::Detail;
        self.update_route(&[
            (PARAM_VIEW, Some(VIEW_DETAIL.to_string())),
            (PARAM_PANES, Some(encode_panes(&self.open_panes))),
            (PARAM_ACTIVE, Some(pane.id)),
            (PARAM_QUERY, None),
        ]);
    }

    /// Close a pane by id.
    ///
    /// Closing the last pane falls back to the grid. Closing the active pane
    /// focuses the last remaining pane (not the nearest neighbor).
    pub fn close_pane(&mut self, id: &str) {
        self.open_panes.retain(|p| p.id != id);

        if self.open_panes.is_empty() {
            self.show_grid();
        } else if self.active_pane_id.as_deref() == Some(id) {
            let new_active = self.open_panes.last().map(|p| p.id.clone());
            self.active_pane_id = new_active.clone();
            self.update_route(&[
                (PARAM_VIEW, Some(VIEW_DETAIL.to_string())),
                (PARAM_PANES, Some(encode_panes(&self.open_panes))),
                (PARAM_ACTIVE, new_active),
            ]);
        } else {
            self.update_route(&[
                (PARAM_VIEW, Some(VIEW_DETAIL.to_string())),
                (PARAM_PANES, Some(encode_panes(&self.open_panes))),
                (PARAM_ACTIVE, self.active_pane_id.clone()),
            ]);
        }
    }

    /// Focus a pane. Membership is the caller's responsibility; a dangling id
    /// is written to the route as given and rendering falls back to the
    /// empty state.
    pub fn set_active_pane(&mut self, id: &str) {
        self.active_pane_id = Some(id.to_string());
        self.update_route(&[(PARAM_ACTIVE, Some(id.to_string()))]);
    }

    /// Return to the grid. Open panes are kept so detail mode can restore
    /// them later.
    pub fn show_grid(&mut self) {
        self.mode = ViewMode::Grid;
        self.search_query.clear();
        self.update_route(&[
            (PARAM_VIEW, None),
            (PARAM_PANES, None),
            (PARAM_ACTIVE, None),
            (PARAM_QUERY, None),
        ]);
    }

    /// Commit a search query. An empty query is equivalent to the grid.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
        if query.is_empty() {
            self.mode = ViewMode::Grid;
            self.update_route(&[(PARAM_VIEW, None), (PARAM_QUERY, None)]);
        } else {
            self.mode = ViewMode::Search;
            self.update_route(&[
                (PARAM_VIEW, Some(VIEW_SEARCH.to_string())),
                (PARAM_QUERY, Some(query.to_string())),
            ]);
        }
    }

    /// Switch to search mode before any query has been committed
    pub fn enter_search(&mut self) {
        self.mode = ViewMode::Search;
        self.update_route(&[(PARAM_VIEW, Some(VIEW_SEARCH.to_string()))]);
    }

    /// Jump straight to a single pane via a fresh pushed route.
    ///
    /// Used when a search result opens in the dashboard: the pane list is
    /// replaced with just that pane, and the previous route stays reachable
    /// through back navigation.
    pub fn deep_link(&mut self, pane: Pane) {
        let mut query = RouteQuery::default();
        query.set(PARAM_VIEW, VIEW_DETAIL);
        query.set(PARAM_PANES, encode_panes(std::slice::from_ref(&pane)));
        query.set(PARAM_ACTIVE, pane.id.as_str());
        self.history.push(query.encode());
        self.rehydrate();
    }

    /// Step back in the session history, rehydrating on success
    pub fn go_back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.rehydrate();
        true
    }

    /// Step forward in the session history, rehydrating on success
    pub fn go_forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.rehydrate();
        true
    }

    /// Re-derive the full state from the current route, replacing memory
    /// wholesale. Never writes the route back.
    pub fn rehydrate(&mut self) {
        let route = self.history.current().to_string();
        self.apply_route(&route);
    }

    fn apply_route(&mut self, route: &str) {
        let query = RouteQuery::parse(route);

        let open_panes = match query.get(PARAM_PANES) {
            Some(raw) => match decode_panes(raw) {
                Ok(panes) => panes,
                Err(err) => {
                    tracing::warn!("failed to parse panes from route: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let search_query = query.get(PARAM_QUERY).unwrap_or_default().to_string();

        let mode = if !search_query.is_empty() {
            ViewMode::Search
        } else if query.get(PARAM_VIEW) == Some(VIEW_DETAIL) {
            ViewMode::Detail
        } else {
            ViewMode::Grid
        };

        let active_pane_id = query
            .get(PARAM_ACTIVE)
            .map(str::to_string)
            .or_else(|| open_panes.first().map(|p| p.id.clone()));

        self.mode = mode;
        self.open_panes = open_panes;
        self.active_pane_id = active_pane_id;
        self.search_query = search_query;
    }

    /// Merge parameter updates into the current route and replace it.
    /// `None` removes the key.
    fn update_route(&mut self, updates: &[(&str, Option<String>)]) {
        let mut query = RouteQuery::parse(self.history.current());
        for (key, value) in updates {
            match value {
                Some(value) => query.set(key, value.clone()),
                None => query.remove(key),
            }
        }
        self.history.replace(query.encode());
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::from_route(String::new())
    }
}
