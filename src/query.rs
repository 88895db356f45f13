//! OpenSearch request construction.
//!
//! Every request is a `size: 0` search (no hits, aggregations only) whose
//! `bool.filter` scopes documents to the configured agency and state, and
//! optionally to a client, a provider, and a free-text `query_string`.
//!
//! Aggregation names carry the kind as a prefix (`present_<field>`,
//! `distribution_<field>`) so that the response can be classified without
//! any extra bookkeeping.

use fieldstats_core::{DISTRIBUTION_PREFIX, PRESENT_PREFIX};
use serde_json::{json, Map, Value};

use crate::config::QueryConfig;

/// A single named aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub name: String,
    pub body: Value,
}

/// Present/absent split for `field`.
///
/// A `filters` aggregation with a `present` bucket (`exists`) and an
/// `absent` bucket (`must_not exists`).
pub fn presence_aggregation(field: &str) -> Aggregation {
    Aggregation {
        name: format!("{}{}", PRESENT_PREFIX, field),
        body: json!({
            "filters": {
                "filters": {
                    "present": { "exists": { "field": field } },
                    "absent": {
                        "bool": { "must_not": { "exists": { "field": field } } }
                    }
                }
            }
        }),
    }
}

/// Top `size` values of `field`.
pub fn distribution_aggregation(field: &str, size: u64) -> Aggregation {
    Aggregation {
        name: format!("{}{}", DISTRIBUTION_PREFIX, field),
        body: json!({ "terms": { "field": field, "size": size } }),
    }
}

/// Document scope shared by every aggregation in one request.
#[derive(Debug, Clone, Default)]
pub struct Scope<'a> {
    pub query: &'a str,
    pub client_id: &'a str,
    pub provider_id: &'a str,
}

/// A search body under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    filters: Vec<Value>,
    aggregations: Vec<Aggregation>,
}

impl SearchRequest {
    /// Attach aggregations, keeping any already present.
    pub fn aggs(mut self, aggs: impl IntoIterator<Item = Aggregation>) -> Self {
        self.aggregations.extend(aggs);
        self
    }

    pub fn aggregations(&self) -> &[Aggregation] {
        &self.aggregations
    }

    /// Render the JSON body sent to `_search`.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "size": 0,
            "query": { "bool": { "filter": self.filters } },
        });

        if !self.aggregations.is_empty() {
            let aggs: Map<String, Value> = self
                .aggregations
                .iter()
                .map(|a| (a.name.clone(), a.body.clone()))
                .collect();
            body["aggs"] = Value::Object(aggs);
        }

        body
    }
}

/// Build the filtered, aggregation-free base request.
///
/// Empty `client_id`, `provider_id`, or `query` add no clause.
pub fn base_query(config: &QueryConfig, scope: &Scope<'_>) -> SearchRequest {
    let mut filters = vec![
        json!({ "term": { "agency": config.agency } }),
        json!({ "term": { "aasm_state": config.state } }),
    ];

    if !scope.client_id.is_empty() {
        filters.push(json!({ "term": { "client.id": scope.client_id } }));
    }

    if !scope.provider_id.is_empty() {
        filters.push(json!({ "term": { "provider.id": scope.provider_id } }));
    }

    if !scope.query.is_empty() {
        filters.push(json!({ "query_string": { "query": scope.query } }));
    }

    SearchRequest {
        filters,
        aggregations: Vec::new(),
    }
}

/// Base request with a single presence aggregation on `field`.
pub fn presence_query(config: &QueryConfig, scope: &Scope<'_>, field: &str) -> SearchRequest {
    base_query(config, scope).aggs([presence_aggregation(field)])
}

/// Base request with a single distribution aggregation on `field`.
pub fn distribution_query(
    config: &QueryConfig,
    scope: &Scope<'_>,
    field: &str,
    size: u64,
) -> SearchRequest {
    base_query(config, scope).aggs([distribution_aggregation(field, size)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_query_fixed_filters_only() {
        let body = base_query(&QueryConfig::default(), &Scope::default()).to_body();
        assert_eq!(body["size"], 0);
        let filters = body["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0]["term"]["agency"], "datacite");
        assert_eq!(filters[1]["term"]["aasm_state"], "findable");
        assert!(body.get("aggs").is_none());
    }

    #[test]
    fn test_base_query_conditional_filters() {
        let scope = Scope {
            query: "climate AND ocean",
            client_id: "cern.zenodo",
            provider_id: "cern",
        };
        let body = base_query(&QueryConfig::default(), &scope).to_body();
        let filters = body["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 5);
        assert_eq!(filters[2]["term"]["client.id"], "cern.zenodo");
        assert_eq!(filters[3]["term"]["provider.id"], "cern");
        assert_eq!(filters[4]["query_string"]["query"], "climate AND ocean");
    }

    #[test]
    fn test_presence_aggregation_shape() {
        let agg = presence_aggregation("creators.name");
        assert_eq!(agg.name, "present_creators.name");
        let filters = &agg.body["filters"]["filters"];
        assert_eq!(filters["present"]["exists"]["field"], "creators.name");
        assert_eq!(
            filters["absent"]["bool"]["must_not"]["exists"]["field"],
            "creators.name"
        );
    }

    #[test]
    fn test_distribution_aggregation_shape() {
        let agg = distribution_aggregation("types.resourceTypeGeneral", 25);
        assert_eq!(agg.name, "distribution_types.resourceTypeGeneral");
        assert_eq!(agg.body["terms"]["field"], "types.resourceTypeGeneral");
        assert_eq!(agg.body["terms"]["size"], 25);
    }

    #[test]
    fn test_aggs_are_named_in_body() {
        let request = base_query(&QueryConfig::default(), &Scope::default())
            .aggs([presence_aggregation("titles")])
            .aggs([distribution_aggregation("language", 10)]);
        let body = request.to_body();
        assert!(body["aggs"]["present_titles"]["filters"].is_object());
        assert!(body["aggs"]["distribution_language"]["terms"].is_object());
        assert_eq!(request.aggregations().len(), 2);
    }

    #[test]
    fn test_single_field_helpers() {
        let config = QueryConfig::default();
        let scope = Scope::default();
        let p = presence_query(&config, &scope, "titles");
        assert_eq!(p.aggregations()[0].name, "present_titles");
        let d = distribution_query(&config, &scope, "language", 3);
        assert_eq!(d.to_body()["aggs"]["distribution_language"]["terms"]["size"], 3);
    }

    #[test]
    fn test_custom_scope_config() {
        let config = QueryConfig {
            agency: "crossref".to_string(),
            state: "registered".to_string(),
            default_distribution_size: 5,
        };
        let body = base_query(&config, &Scope::default()).to_body();
        assert_eq!(body["query"]["bool"]["filter"][0]["term"]["agency"], "crossref");
        assert_eq!(body["query"]["bool"]["filter"][1]["term"]["aasm_state"], "registered");
    }
}
