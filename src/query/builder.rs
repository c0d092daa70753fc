//! Query construction
//!
//! Turns a logical [`SearchRequest`] into a protocol-ready [`BuiltQuery`].
//! Pure data transformation: no I/O and no error conditions; malformed
//! facet configuration is passed through uninterpreted.

use crate::config::{BooleanOperator, FacetConfiguration};
use crate::query::request::{SearchRequest, SortOrder};
use serde::{Deserialize, Serialize};

/// Default sort applied when the request names no sort field
const DEFAULT_SORT_FIELD: &str = "post_date";

/// Primary content field, highlighted on every query
const HIGHLIGHT_FIELD: &str = "post_content";

/// Sort specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Highlighting specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightSpec {
    pub field: String,
    pub prefix: String,
    pub postfix: String,
    pub multi_term: bool,
}

/// The structured, protocol-ready query. Constructed fresh per request and
/// owned by the executor for the duration of one call; never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltQuery {
    /// Stored fields to return
    pub fields: String,

    /// Pagination start
    pub start: usize,

    /// Pagination size
    pub rows: usize,

    /// Sort specification
    pub sort: SortSpec,

    /// Facet fields in fixed order, no duplicates
    pub facet_fields: Vec<String>,

    /// Minimum count for a facet value to be returned
    pub facet_min_count: u32,

    /// Facet result-size limit, set only when tag faceting is enabled
    pub facet_limit: Option<i32>,

    /// Filter queries, blank entries already dropped
    pub filter_queries: Vec<String>,

    /// Highlighting specification
    pub highlight: HighlightSpec,

    /// Default boolean operator, if configured
    pub default_operator: Option<BooleanOperator>,

    /// The raw query text
    pub query_text: String,
}

impl BuiltQuery {
    /// Render the query as `select` handler parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("q".into(), self.query_text.clone()),
            ("fl".into(), self.fields.clone()),
            ("start".into(), self.start.to_string()),
            ("rows".into(), self.rows.to_string()),
            (
                "sort".into(),
                format!("{} {}", self.sort.field, self.sort.order.as_str()),
            ),
            ("omitHeader".into(), "false".into()),
            ("wt".into(), "json".into()),
        ];

        if !self.facet_fields.is_empty() {
            params.push(("facet".into(), "true".into()));
            for field in &self.facet_fields {
                params.push(("facet.field".into(), field.clone()));
            }
            params.push(("facet.mincount".into(), self.facet_min_count.to_string()));
            if let Some(limit) = self.facet_limit {
                params.push(("facet.limit".into(), limit.to_string()));
            }
        }

        for filter in &self.filter_queries {
            params.push(("fq".into(), filter.clone()));
        }

        params.push(("hl".into(), "true".into()));
        params.push(("hl.fl".into(), self.highlight.field.clone()));
        params.push(("hl.simple.pre".into(), self.highlight.prefix.clone()));
        params.push(("hl.simple.post".into(), self.highlight.postfix.clone()));
        params.push((
            "hl.highlightMultiTerm".into(),
            self.highlight.multi_term.to_string(),
        ));

        if let Some(op) = self.default_operator {
            params.push(("q.op".into(), op.as_str().into()));
        }

        params
    }
}

/// Builds protocol-ready queries from logical requests. The facet
/// configuration is injected at construction and read-only per query.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    facets: FacetConfiguration,
}

impl QueryBuilder {
    pub fn new(facets: FacetConfiguration) -> Self {
        Self { facets }
    }

    /// Build a protocol-ready query from a logical request.
    pub fn build(&self, request: &SearchRequest) -> BuiltQuery {
        let sort = match request.sort_field.as_deref() {
            Some(field) if !field.is_empty() => SortSpec {
                field: field.to_string(),
                order: request.sort_order,
            },
            _ => SortSpec {
                field: DEFAULT_SORT_FIELD.to_string(),
                order: SortOrder::Descending,
            },
        };

        let facet_fields = self.facet_fields();
        let facet_limit = if self.facets.enable_tags {
            Some(self.facets.max_tag_facets)
        } else {
            None
        };

        let filter_queries = request
            .filter_queries
            .iter()
            .filter(|f| !f.trim().is_empty())
            .cloned()
            .collect();

        BuiltQuery {
            fields: "*,score".to_string(),
            start: request.offset,
            rows: request.count,
            sort,
            facet_fields,
            facet_min_count: 1,
            facet_limit,
            filter_queries,
            highlight: HighlightSpec {
                field: HIGHLIGHT_FIELD.to_string(),
                prefix: "<b>".to_string(),
                postfix: "</b>".to_string(),
                multi_term: true,
            },
            default_operator: self.facets.default_operator,
            query_text: request.query_text.clone(),
        }
    }

    /// Assemble the facet field list in fixed order: categories, tags,
    /// author, post type, custom taxonomies, custom fields. Duplicates are
    /// dropped, first occurrence wins.
    fn facet_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();

        if self.facets.enable_categories {
            fields.push("categories".to_string());
        }
        if self.facets.enable_tags {
            fields.push("tags".to_string());
        }
        if self.facets.enable_author {
            fields.push("post_author".to_string());
        }
        if self.facets.enable_post_type {
            fields.push("post_type".to_string());
        }
        for taxonomy in &self.facets.custom_taxonomies {
            fields.push(format!("{}_taxonomy", taxonomy));
        }
        for field_name in &self.facets.custom_fields {
            fields.push(format!("{}_str", field_name));
        }

        let mut seen = std::collections::HashSet::new();
        fields.retain(|f| seen.insert(f.clone()));
        fields
    }
}
