//! Declarative filters for list/data-source reads
//!
//! A filter set is built once from user-supplied clause definitions and
//! then evaluated against every candidate record:
//!
//! - clauses are ANDed: a record must satisfy every clause
//! - values inside a clause are ORed: any one value matching is enough
//! - a dotted name such as `owner_users.id` walks into one-to-many
//!   relations and matches if any element matches

use crate::error::{Error, Result};
use crate::record::RecordView;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A clause definition as supplied by the declarative engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilter {
    /// Dotted field name, e.g. `owner_users.id`
    pub name: String,
    /// Values to compare against
    #[serde(default)]
    pub values: Vec<String>,
    /// Treat each value as a regular expression
    #[serde(default)]
    pub regex: bool,
}

impl RawFilter {
    /// Exact-match clause.
    pub fn exact<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            regex: false,
        }
    }

    /// Regex clause.
    pub fn pattern<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regex: true,
            ..Self::exact(name, values)
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Pattern {
        source: String,
        compiled: std::result::Result<Regex, regex::Error>,
    },
}

impl Matcher {
    fn matches(&self, key: &str, candidate: &str) -> Result<bool> {
        match self {
            Self::Exact(expected) => Ok(candidate == expected),
            Self::Pattern { source, compiled } => match compiled {
                Ok(re) => Ok(re.is_match(candidate)),
                Err(err) => Err(Error::InvalidRegex {
                    key: key.to_string(),
                    pattern: source.clone(),
                    message: err.to_string(),
                }),
            },
        }
    }
}

/// One parsed, immutable filter clause.
#[derive(Debug, Clone)]
pub struct FilterClause {
    key: String,
    path: Vec<String>,
    matchers: Vec<Matcher>,
    regex: bool,
}

impl FilterClause {
    /// Parse a raw clause definition.
    ///
    /// Only the definition is validated here. Whether the path exists in
    /// the data is checked when matching.
    pub fn parse(raw: &RawFilter) -> Result<Self> {
        if raw.name.is_empty() {
            return Err(Error::definition(&raw.name, "field name is empty"));
        }

        let path: Vec<String> = raw.name.split('.').map(str::to_string).collect();
        if path.iter().any(String::is_empty) {
            return Err(Error::definition(&raw.name, "field path has an empty segment"));
        }

        let matchers = raw
            .values
            .iter()
            .map(|value| {
                if raw.regex {
                    Matcher::Pattern {
                        source: value.clone(),
                        compiled: Regex::new(value),
                    }
                } else {
                    Matcher::Exact(value.clone())
                }
            })
            .collect();

        Ok(Self {
            key: raw.name.clone(),
            path,
            matchers,
            regex: raw.regex,
        })
    }

    /// The dotted field name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Path segments derived from the dotted name.
    pub fn field_path(&self) -> &[String] {
        &self.path
    }

    /// Whether values are regular expressions.
    pub fn is_regex(&self) -> bool {
        self.regex
    }

    /// Evaluate this clause against a record.
    pub fn matches(&self, record: &RecordView) -> Result<bool> {
        self.deep_match(&self.path, record)
    }

    fn deep_match(&self, path: &[String], record: &RecordView) -> Result<bool> {
        let (head, rest) = path
            .split_first()
            .ok_or_else(|| Error::path(&self.key, "resolves to an empty path"))?;

        let value = match record {
            RecordView::Object(fields) => fields
                .get(head)
                .ok_or_else(|| Error::not_found(&self.key, head))?,
            RecordView::List(_) => {
                return Err(Error::path(
                    &self.key,
                    format!("walks into a list at '{head}' without selecting a field"),
                ));
            }
            RecordView::Scalar(_) => {
                return Err(Error::path(
                    &self.key,
                    format!("walks past a value at '{head}'"),
                ));
            }
        };

        if rest.is_empty() {
            return self.leaf_match(head, value);
        }

        match value {
            RecordView::List(items) => {
                for item in items {
                    if self.deep_match(rest, item)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            RecordView::Object(_) | RecordView::Scalar(_) => Err(Error::path(
                &self.key,
                format!("references a field of '{head}', which is not a list"),
            )),
        }
    }

    fn leaf_match(&self, field: &str, value: &RecordView) -> Result<bool> {
        let scalar = match value {
            RecordView::Scalar(s) => s,
            RecordView::List(_) => {
                return Err(Error::path(
                    &self.key,
                    format!("references an array instead of a field: {field}"),
                ));
            }
            RecordView::Object(_) => {
                return Err(Error::path(
                    &self.key,
                    format!("references an object instead of a field: {field}"),
                ));
            }
        };

        let candidate = scalar.canonical();
        for matcher in &self.matchers {
            if matcher.matches(&self.key, &candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// An ordered collection of clauses, all of which must match.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    /// A filter set that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter set from raw clause definitions.
    pub fn build(raw: &[RawFilter]) -> Result<Self> {
        let clauses = raw
            .iter()
            .map(FilterClause::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// Parsed clauses in definition order.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// True when no clause is configured.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the record satisfies every clause.
    pub fn matches(&self, record: &RecordView) -> Result<bool> {
        for clause in &self.clauses {
            if !clause.matches(record)? {
                log::debug!("record rejected by filter '{}'", clause.key());
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Build a [`FilterSet`] from raw clause definitions.
pub fn build_filter_set(raw: &[RawFilter]) -> Result<FilterSet> {
    FilterSet::build(raw)
}

/// Evaluate a record against a filter set.
pub fn matches(record: &RecordView, filters: &FilterSet) -> Result<bool> {
    filters.matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::flatten;
    use serde_json::json;

    fn policy() -> RecordView {
        flatten(&json!({
            "id": 200,
            "name": "SystemReadOnlyAccess",
            "description": "The description.",
            "aws_iam_path": "",
            "policy": "{}",
            "aws_managed_policy": false,
            "owner_users": [{"id": 300}, {"id": 100}],
            "owner_user_groups": [{"id": 0}],
            "regions": ["us-east-1"]
        }))
    }

    fn single(raw: RawFilter) -> Result<bool> {
        FilterSet::build(&[raw])?.matches(&policy())
    }

    #[test]
    fn test_nested_id_match() {
        assert!(single(RawFilter::exact("owner_users.id", ["100"])).unwrap());
        assert!(single(RawFilter::exact("owner_users.id", ["300"])).unwrap());
        assert!(!single(RawFilter::exact("owner_users.id", ["200"])).unwrap());
    }

    #[test]
    fn test_scalar_canonical_match() {
        assert!(single(RawFilter::exact("id", ["200"])).unwrap());
        assert!(single(RawFilter::exact("aws_managed_policy", ["false"])).unwrap());
        assert!(single(RawFilter::exact("aws_iam_path", [""])).unwrap());
        assert!(!single(RawFilter::exact("id", ["20"])).unwrap());
    }

    #[test]
    fn test_or_within_clause() {
        assert!(single(RawFilter::exact("owner_users.id", ["100", "300"])).unwrap());
        assert!(single(RawFilter::exact("name", ["Other", "SystemReadOnlyAccess"])).unwrap());

        let lonely = flatten(&json!({"owner_users": [{"id": 1}]}));
        let set = FilterSet::build(&[RawFilter::exact("owner_users.id", ["100", "300"])]).unwrap();
        assert!(!set.matches(&lonely).unwrap());
    }

    #[test]
    fn test_and_across_clauses() {
        let record = flatten(&json!({"id": 200, "name": "Bar"}));
        let set = FilterSet::build(&[
            RawFilter::exact("id", ["200"]),
            RawFilter::exact("name", ["Foo"]),
        ])
        .unwrap();
        assert!(!set.matches(&record).unwrap());

        let set = FilterSet::build(&[
            RawFilter::exact("id", ["200"]),
            RawFilter::exact("name", ["Bar"]),
        ])
        .unwrap();
        assert!(set.matches(&record).unwrap());
    }

    #[test]
    fn test_regex_anchoring() {
        assert!(single(RawFilter::pattern("name", ["Access$"])).unwrap());
        assert!(!single(RawFilter::pattern("name", ["Acces$"])).unwrap());
        assert!(single(RawFilter::pattern("name", ["^System"])).unwrap());
        assert!(!single(RawFilter::pattern("name", ["^ystem"])).unwrap());
        assert!(single(RawFilter::pattern("name", ["Read"])).unwrap());
    }

    #[test]
    fn test_regex_is_case_sensitive() {
        assert!(!single(RawFilter::pattern("name", ["read"])).unwrap());
        assert!(single(RawFilter::pattern("name", ["(?i)read"])).unwrap());
    }

    #[test]
    fn test_regex_on_nested_ids() {
        assert!(single(RawFilter::pattern("owner_users.id", ["^3"])).unwrap());
        assert!(!single(RawFilter::pattern("owner_users.id", ["^2"])).unwrap());
    }

    #[test]
    fn test_invalid_regex() {
        let err = single(RawFilter::pattern("name", ["("])).unwrap_err();
        assert!(matches!(err, Error::InvalidRegex { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn test_invalid_regex_surfaces_after_earlier_miss() {
        let err = single(RawFilter::pattern("name", ["^Nope", "["])).unwrap_err();
        assert!(matches!(err, Error::InvalidRegex { .. }));
    }

    #[test]
    fn test_collection_leaf_rejected() {
        let err = single(RawFilter::exact("owner_users", ["100"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterPath { ref key, .. } if key == "owner_users"));

        let err = single(RawFilter::exact("regions", ["us-east-1"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterPath { .. }));
    }

    #[test]
    fn test_path_through_scalar_rejected() {
        let err = single(RawFilter::exact("name.first", ["x"])).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterPath { .. }));
    }

    #[test]
    fn test_unknown_field() {
        let err = single(RawFilter::exact("id2", ["200"])).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { ref field, .. } if field == "id2"));

        let err = single(RawFilter::exact("owner_users.email", ["x"])).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { ref field, .. } if field == "email"));
    }

    #[test]
    fn test_unknown_field_inside_empty_collection_is_not_checked() {
        let record = flatten(&json!({"owner_users": []}));
        let set = FilterSet::build(&[RawFilter::exact("owner_users.email", ["x"])]).unwrap();
        assert!(!set.matches(&record).unwrap());
    }

    #[test]
    fn test_empty_filter_set_matches_everything() {
        assert!(FilterSet::all().matches(&policy()).unwrap());
        assert!(FilterSet::build(&[]).unwrap().matches(&RecordView::object()).unwrap());
    }

    #[test]
    fn test_clause_without_values_never_matches() {
        assert!(!single(RawFilter::exact("id", Vec::<String>::new())).unwrap());
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let err = FilterSet::build(&[RawFilter::exact("", ["x"])]).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterDefinition { .. }));

        let err = FilterSet::build(&[RawFilter::exact("owner_users..id", ["x"])]).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterDefinition { .. }));
    }

    #[test]
    fn test_build_splits_path() {
        let set = build_filter_set(&[RawFilter::pattern("owner_users.id", ["1"])]).unwrap();
        let clause = &set.clauses()[0];
        assert_eq!(clause.field_path(), ["owner_users", "id"]);
        assert_eq!(clause.key(), "owner_users.id");
        assert!(clause.is_regex());
    }

    #[test]
    fn test_nested_object_path_is_rejected() {
        let record = flatten(&json!({"cft": {"name": "base"}}));
        let set = FilterSet::build(&[RawFilter::exact("cft.name", ["base"])]).unwrap();
        let err = matches(&record, &set).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterPath { .. }));
    }

    #[test]
    fn test_raw_filter_deserialize_defaults() {
        let raw: RawFilter = serde_json::from_value(json!({"name": "id"})).unwrap();
        assert!(raw.values.is_empty());
        assert!(!raw.regex);
    }
}
