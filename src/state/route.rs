//! Route query-string codec and session history
//!
//! A workspace session is addressed by a query string (the "route"), e.g.
//! `view=dashboard&panes=%5B...%5D&active=crm`. The route survives restarts
//! (pass it as the first CLI argument) and drives back/forward navigation.
//! Keeping the codec here, away from any terminal concerns, lets the
//! workspace state machine be tested without a running UI.

use serde::Serialize;
use thiserror::Error;
use url::form_urlencoded;

use super::workspace::Pane;

/// Top-level mode parameter: absent means grid
pub const PARAM_VIEW: &str = "view";
/// Encoded open-pane list, present in detail mode
pub const PARAM_PANES: &str = "panes";
/// Id of the focused pane
pub const PARAM_ACTIVE: &str = "active";
/// Raw search string
pub const PARAM_QUERY: &str = "q";

/// `view` value for detail mode
pub const VIEW_DETAIL: &str = "dashboard";
/// `view` value for search mode
pub const VIEW_SEARCH: &str = "search";

/// Error decoding the pane list embedded in a route
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid pane encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("invalid pane list: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered set of query parameters.
///
/// Updates merge into the existing parameters, so keys this module does not
/// know about pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    params: Vec<(String, String)>,
}

impl RouteQuery {
    /// Parse a query string (without a leading `?`)
    pub fn parse(query: &str) -> Self {
        let params = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { params }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a parameter, replacing an existing value in place
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Serialize back to a query string
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.params {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}

/// Encode a pane list for the `panes` parameter.
///
/// The JSON is percent-encoded before it lands in the parameter value, and
/// the query serializer encodes it a second time. Both layers are reversed by
/// [`decode_panes`].
pub fn encode_panes<P: Serialize>(panes: &[P]) -> String {
    let json = serde_json::to_string(panes).unwrap_or_else(|_| "[]".to_string());
    urlencoding::encode(&json).into_owned()
}

/// Decode a `panes` parameter value back into a pane list
pub fn decode_panes(raw: &str) -> Result<Vec<Pane>, RouteError> {
    let json = urlencoding::decode(raw)?;
    Ok(serde_json::from_str(&json)?)
}

/// Linear session history of routes, modelled on a browser session.
///
/// Workspace operations `replace` the current entry so intermediate states do
/// not pollute the back stack; deep links `push`. Pushing discards any
/// forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// The route the session is currently on
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Overwrite the current entry without creating a new one
    pub fn replace(&mut self, query: String) {
        self.entries[self.index] = query;
    }

    /// Append a new entry, dropping anything ahead of the current position
    pub fn push(&mut self, query: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query);
        self.index += 1;
    }

    /// Step back, returning the new current route
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward, returning the new current route
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries in the session
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(id: &str) -> Pane {
        Pane {
            id: id.to_string(),
            name: format!("Pane {id}"),
            url: format!("https://example.com/{id}"),
        }
    }

    mod route_query {
        use super::*;

        #[test]
        fn test_parse_empty() {
            let query = RouteQuery::parse("");
            assert_eq!(query.get(PARAM_VIEW), None);
            assert_eq!(query.encode(), "");
        }

        #[test]
        fn test_parse_and_get() {
            let query = RouteQuery::parse("view=dashboard&active=crm");
            assert_eq!(query.get(PARAM_VIEW), Some("dashboard"));
            assert_eq!(query.get(PARAM_ACTIVE), Some("crm"));
            assert_eq!(query.get(PARAM_QUERY), None);
        }

        #[test]
        fn test_set_replaces_in_place() {
            let mut query = RouteQuery::parse("view=dashboard&active=a");
            query.set(PARAM_ACTIVE, "b");
            assert_eq!(query.encode(), "view=dashboard&active=b");
        }

        #[test]
        fn test_remove() {
            let mut query = RouteQuery::parse("view=search&q=invoice");
            query.remove(PARAM_QUERY);
            assert_eq!(query.get(PARAM_QUERY), None);
            assert_eq!(query.encode(), "view=search");
        }

        #[test]
        fn test_unknown_params_pass_through() {
            let mut query = RouteQuery::parse("section=reports&view=dashboard");
            query.set(PARAM_ACTIVE, "crm");
            query.remove(PARAM_VIEW);
            assert_eq!(query.get("section"), Some("reports"));
            assert_eq!(query.encode(), "section=reports&active=crm");
        }

        #[test]
        fn test_values_are_percent_decoded() {
            let query = RouteQuery::parse("q=quarterly%20report");
            assert_eq!(query.get(PARAM_QUERY), Some("quarterly report"));
        }

        #[test]
        fn test_encode_escapes_values() {
            let mut query = RouteQuery::default();
            query.set(PARAM_QUERY, "a&b=c");
            let encoded = query.encode();
            let parsed = RouteQuery::parse(&encoded);
            assert_eq!(parsed.get(PARAM_QUERY), Some("a&b=c"));
        }
    }

    mod panes_codec {
        use super::*;

        #[test]
        fn test_round_trip() {
            let panes = vec![pane("a"), pane("b")];
            let encoded = encode_panes(&panes);
            let decoded = decode_panes(&encoded).unwrap();
            assert_eq!(decoded, panes);
        }

        #[test]
        fn test_encoded_value_is_percent_encoded_json() {
            let encoded = encode_panes(&[pane("a")]);
            // Raw JSON delimiters never appear in the parameter value
            assert!(!encoded.contains('{'));
            assert!(!encoded.contains('"'));
            assert!(encoded.contains("%7B"));
        }

        #[test]
        fn test_decode_empty_list() {
            let decoded = decode_panes("%5B%5D").unwrap();
            assert!(decoded.is_empty());
        }

        #[test]
        fn test_decode_garbage_is_err() {
            assert!(decode_panes("not-json").is_err());
        }

        #[test]
        fn test_decode_truncated_json_is_err() {
            let encoded = urlencoding::encode("[{\"id\":\"a\"").into_owned();
            assert!(decode_panes(&encoded).is_err());
        }

        #[test]
        fn test_survives_outer_query_layer() {
            // Full trip through the query serializer and parser
            let panes = vec![pane("a"), pane("b")];
            let mut query = RouteQuery::default();
            query.set(PARAM_PANES, encode_panes(&panes));
            let reparsed = RouteQuery::parse(&query.encode());
            let decoded = decode_panes(reparsed.get(PARAM_PANES).unwrap()).unwrap();
            assert_eq!(decoded, panes);
        }
    }

    mod history {
        use super::*;

        #[test]
        fn test_new_starts_at_initial() {
            let history = History::new("view=search&q=x");
            assert_eq!(history.current(), "view=search&q=x");
            assert!(!history.can_back());
            assert!(!history.can_forward());
        }

        #[test]
        fn test_replace_keeps_length() {
            let mut history = History::new("");
            history.replace("view=dashboard".to_string());
            assert_eq!(history.len(), 1);
            assert_eq!(history.current(), "view=dashboard");
        }

        #[test]
        fn test_push_and_back() {
            let mut history = History::new("");
            history.push("view=dashboard".to_string());
            assert_eq!(history.len(), 2);
            assert_eq!(history.back(), Some(""));
            assert_eq!(history.forward(), Some("view=dashboard"));
        }

        #[test]
        fn test_back_at_start_is_none() {
            let mut history = History::new("");
            assert_eq!(history.back(), None);
        }

        #[test]
        fn test_push_discards_forward_entries() {
            let mut history = History::new("a=1");
            history.push("a=2".to_string());
            history.back();
            history.push("a=3".to_string());
            assert_eq!(history.len(), 2);
            assert!(!history.can_forward());
            assert_eq!(history.current(), "a=3");
        }
    }
}
