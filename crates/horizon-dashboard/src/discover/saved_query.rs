//! Discover queries and their saved form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use horizon_dashboard_core::Property;

use crate::error::{Error, Result};

/// A Discover query as the query builder holds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Query {
    pub projects: Vec<u64>,
    pub fields: Vec<String>,
    /// `[column, operator, value]` triples.
    pub conditions: Vec<Vec<Value>>,
    /// `[function, column, alias]` triples.
    pub aggregations: Vec<Vec<Value>>,
    pub orderby: Option<String>,
    pub limit: Option<u32>,
    /// Relative time range such as `"14d"`; ignored when `start`/`end` are set.
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A query saved under a name, as returned by the saved-query API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: String,
    pub name: String,
    pub date_created: String,
    pub date_updated: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub query: Query,
}

impl SavedQuery {
    /// Parse an API payload.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::decode)
    }
}

/// The query part of a saved query, without id, name and timestamps.
pub fn parse_saved_query(saved: &SavedQuery) -> Query {
    saved.query.clone()
}

/// Source of the query currently being edited.
pub trait QueryBuilder: Send + Sync {
    /// Snapshot of the query in its internal form.
    fn internal(&self) -> Query;
}

impl QueryBuilder for Property<Query> {
    fn internal(&self) -> Query {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAYLOAD: &str = r#"{
        "id": "7",
        "name": "Errors by browser",
        "dateCreated": "2018-09-24T00:00:00Z",
        "dateUpdated": "2018-09-25T00:00:00Z",
        "createdBy": "1",
        "projects": [2],
        "fields": ["browser.name"],
        "conditions": [["message", "LIKE", "%timeout%"]],
        "aggregations": [["count()", null, "count"]],
        "range": "14d",
        "orderby": "-count",
        "limit": 1000
    }"#;

    #[test]
    fn test_parse_strips_metadata() {
        let saved = SavedQuery::from_json(PAYLOAD).unwrap();
        assert_eq!(saved.name, "Errors by browser");
        assert_eq!(saved.created_by.as_deref(), Some("1"));

        let query = parse_saved_query(&saved);
        assert_eq!(query.projects, vec![2]);
        assert_eq!(query.aggregations, vec![vec![json!("count()"), Value::Null, json!("count")]]);
        assert_eq!(query.limit, Some(1000));

        let as_json = serde_json::to_value(&query).unwrap();
        assert!(as_json.get("name").is_none());
        assert!(as_json.get("dateCreated").is_none());
    }

    #[test]
    fn test_missing_query_keys_default() {
        let saved = SavedQuery::from_json(
            r#"{"id": "1", "name": "q", "dateCreated": "", "dateUpdated": ""}"#,
        )
        .unwrap();
        assert_eq!(saved.query, Query::default());
        assert!(saved.created_by.is_none());
    }

    #[test]
    fn test_missing_id_is_error() {
        assert!(matches!(
            SavedQuery::from_json(r#"{"name": "q"}"#),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_property_is_query_builder() {
        let builder = Property::new(Query::default());
        builder.set(Query {
            fields: vec!["id".into()],
            ..Query::default()
        });
        assert_eq!(builder.internal().fields, vec!["id"]);
    }
}
