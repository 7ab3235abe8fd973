//! Translation of v3 URL filter expressions into v4 filter clauses.
//!
//! The v3 syntax is a list of terms `<field><operator><value>` joined by `,`
//! (OR) and `;` (AND), e.g. `ga:source==google;ga:sessions>10`.
//! Each term is classified through the [`vocabulary`](crate::vocabulary)
//! and turned into a metric or dimension filter.
//!
//! ## Operators
//!
//! | token | operator       | not   |
//! |-------|----------------|-------|
//! | `==`  | `EXACT`        | false |
//! | `!=`  | `EXACT`        | true  |
//! | `>=`  | `LESS_THAN`    | true  |
//! | `<=`  | `GREATER_THAN` | true  |
//! | `>`   | `GREATER_THAN` | false |
//! | `<`   | `LESS_THAN`    | false |
//! | `=@`  | `PARTIAL`      | false |
//! | `!@`  | `PARTIAL`      | true  |
//! | `=~`  | `REGEXP`       | false |
//! | `!~`  | `REGEXP`       | true  |
//!
//! Tokens are tried in table order and the first token found anywhere in the
//! term wins. `>=` and `<=` are tried before `>` and `<`.

use tracing::debug;

use crate::error::FilterError;
use crate::models::{
    ClauseOperator, DimensionFilter, DimensionFilterClause, FilterClauses, MatchOperator,
    MetricFilter, MetricFilterClause, ReportRequest,
};
use crate::vocabulary::{self, FieldKind};

/// Operator tokens in scan order.
const OPERATORS: [(&str, MatchOperator, bool); 10] = [
    ("==", MatchOperator::Exact, false),
    ("!=", MatchOperator::Exact, true),
    (">=", MatchOperator::LessThan, true),
    ("<=", MatchOperator::GreaterThan, true),
    (">", MatchOperator::GreaterThan, false),
    ("<", MatchOperator::LessThan, false),
    ("=@", MatchOperator::Partial, false),
    ("!@", MatchOperator::Partial, true),
    ("=~", MatchOperator::Regexp, false),
    ("!~", MatchOperator::Regexp, true),
];

/// How `,` and `;` groups map onto clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterGrouping {
    /// Every term becomes its own clause; OR/AND structure is discarded and
    /// all clauses end up AND-combined.
    #[default]
    Flatten,
    /// `;`-separated groups are AND-combined clauses; the `,`-separated terms
    /// inside a group become one OR clause. A group may not mix metrics and
    /// dimensions.
    Strict,
}

/// A single parsed term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm<'a> {
    /// Left-hand identifier.
    pub field: &'a str,
    /// Mapped operator.
    pub operator: MatchOperator,
    /// Negation flag.
    pub not: bool,
    /// Right-hand literal.
    pub value: &'a str,
}

/// A term classified as metric or dimension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassifiedTerm {
    Metric(MetricFilter),
    Dimension(DimensionFilter),
}

/// Parses one `<field><operator><value>` term.
pub fn parse_term(term: &str) -> Result<FilterTerm<'_>, FilterError> {
    OPERATORS
        .iter()
        .find_map(|&(token, operator, not)| {
            term.find(token).map(|pos| FilterTerm {
                field: term[..pos].trim(),
                operator,
                not,
                value: &term[pos + token.len()..],
            })
        })
        .ok_or_else(|| FilterError::UnknownOperator(term.to_string()))
}

fn classify_term(term: &str) -> Result<ClassifiedTerm, FilterError> {
    let parsed = parse_term(term)?;

    match vocabulary::classify(parsed.field) {
        Some(FieldKind::Metric) => Ok(ClassifiedTerm::Metric(MetricFilter {
            metric_name: parsed.field.to_string(),
            not: parsed.not,
            operator: parsed.operator,
            comparison_value: parsed.value.to_string(),
        })),
        Some(FieldKind::Dimension) => Ok(ClassifiedTerm::Dimension(DimensionFilter {
            dimension_name: parsed.field.to_string(),
            not: parsed.not,
            operator: parsed.operator,
            expressions: vec![parsed.value.to_string()],
        })),
        None => Err(FilterError::UnknownField(parsed.field.to_string())),
    }
}

/// Parses a filter string into metric and dimension clauses.
pub fn parse_filter(filters: &str, grouping: FilterGrouping) -> Result<FilterClauses, FilterError> {
    if filters.contains(['(', ')']) {
        return Err(FilterError::Grouping(filters.to_string()));
    }

    let clauses = match grouping {
        FilterGrouping::Flatten => parse_flattened(filters)?,
        FilterGrouping::Strict => parse_strict(filters)?,
    };

    debug!(
        metric_clauses = clauses.metric.len(),
        dimension_clauses = clauses.dimension.len(),
        ?grouping,
        "Translated filter expression"
    );
    Ok(clauses)
}

fn parse_flattened(filters: &str) -> Result<FilterClauses, FilterError> {
    let mut clauses = FilterClauses::default();

    for or_group in filters.split(',') {
        for term in or_group.split(';') {
            match classify_term(term)? {
                ClassifiedTerm::Metric(f) => clauses.metric.push(MetricFilterClause::single(f)),
                ClassifiedTerm::Dimension(f) => {
                    clauses.dimension.push(DimensionFilterClause::single(f));
                }
            }
        }
    }

    Ok(clauses)
}

fn parse_strict(filters: &str) -> Result<FilterClauses, FilterError> {
    let mut clauses = FilterClauses::default();

    for and_group in filters.split(';') {
        let mut metric = Vec::new();
        let mut dimension = Vec::new();
        for term in and_group.split(',') {
            match classify_term(term)? {
                ClassifiedTerm::Metric(f) => metric.push(f),
                ClassifiedTerm::Dimension(f) => dimension.push(f),
            }
        }

        match (metric.is_empty(), dimension.is_empty()) {
            (false, true) => clauses.metric.push(MetricFilterClause {
                operator: (metric.len() > 1).then_some(ClauseOperator::Or),
                filters: metric,
            }),
            (true, false) => clauses.dimension.push(DimensionFilterClause {
                operator: (dimension.len() > 1).then_some(ClauseOperator::Or),
                filters: dimension,
            }),
            _ => return Err(FilterError::MixedGroup(and_group.to_string())),
        }
    }

    Ok(clauses)
}

/// Translates `filters` and attaches the resulting clauses to `request`.
///
/// The request is left untouched when translation fails.
pub fn apply_filter(
    request: &mut ReportRequest,
    filters: &str,
    grouping: FilterGrouping,
) -> Result<(), FilterError> {
    let clauses = parse_filter(filters, grouping)?;
    request.metric_filter_clauses.extend(clauses.metric);
    request.dimension_filter_clauses.extend(clauses.dimension);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, not: bool, operator: MatchOperator, value: &str) -> MetricFilterClause {
        MetricFilterClause::single(MetricFilter {
            metric_name: name.into(),
            not,
            operator,
            comparison_value: value.into(),
        })
    }

    fn dimension(
        name: &str,
        not: bool,
        operator: MatchOperator,
        value: &str,
    ) -> DimensionFilterClause {
        DimensionFilterClause::single(DimensionFilter {
            dimension_name: name.into(),
            not,
            operator,
            expressions: vec![value.into()],
        })
    }

    #[test]
    fn test_sessions_greater_than() {
        let clauses = parse_filter("ga:sessions>100", FilterGrouping::Flatten).unwrap();
        assert_eq!(
            clauses.metric,
            vec![metric("ga:sessions", false, MatchOperator::GreaterThan, "100")]
        );
        assert!(clauses.dimension.is_empty());
    }

    #[test]
    fn test_every_operator_on_metric_and_dimension() {
        let cases = [
            ("==", MatchOperator::Exact, false),
            ("!=", MatchOperator::Exact, true),
            (">", MatchOperator::GreaterThan, false),
            ("<", MatchOperator::LessThan, false),
            (">=", MatchOperator::LessThan, true),
            ("<=", MatchOperator::GreaterThan, true),
            ("=@", MatchOperator::Partial, false),
            ("!@", MatchOperator::Partial, true),
            ("=~", MatchOperator::Regexp, false),
            ("!~", MatchOperator::Regexp, true),
        ];

        for (token, operator, not) in cases {
            let clauses =
                parse_filter(&format!("ga:users{token}5"), FilterGrouping::Flatten).unwrap();
            assert_eq!(clauses.metric, vec![metric("ga:users", not, operator, "5")], "{token}");
            assert!(clauses.dimension.is_empty());

            let clauses =
                parse_filter(&format!("ga:medium{token}cpc"), FilterGrouping::Flatten).unwrap();
            assert_eq!(
                clauses.dimension,
                vec![dimension("ga:medium", not, operator, "cpc")],
                "{token}"
            );
            assert!(clauses.metric.is_empty());
        }
    }

    #[test]
    fn test_greater_or_equal_is_not_less_than() {
        // `>=` used to be shadowed by `>`, leaving `=100` as the value.
        let term = parse_term("ga:sessions>=100").unwrap();
        assert_eq!(term.operator, MatchOperator::LessThan);
        assert!(term.not);
        assert_eq!(term.value, "100");

        let term = parse_term("ga:sessions<=100").unwrap();
        assert_eq!(term.operator, MatchOperator::GreaterThan);
        assert!(term.not);
        assert_eq!(term.value, "100");
    }

    #[test]
    fn test_first_token_in_scan_order_wins() {
        // `==` beats the `=~` that appears earlier in the string.
        let term = parse_term("ga:source=~a==b").unwrap();
        assert_eq!(term.operator, MatchOperator::Exact);
        assert_eq!(term.field, "ga:source=~a");
        assert_eq!(term.value, "b");

        // A `>` inside a regex value is found before `=~`.
        let term = parse_term("ga:pagePath=~^/a>b").unwrap();
        assert_eq!(term.operator, MatchOperator::GreaterThan);
        assert_eq!(term.field, "ga:pagePath=~^/a");
    }

    #[test]
    fn test_value_keeps_whitespace() {
        let term = parse_term(" ga:pageTitle=@ Home ").unwrap();
        assert_eq!(term.field, "ga:pageTitle");
        assert_eq!(term.value, " Home ");
    }

    #[test]
    fn test_flatten_collapses_groups() {
        let clauses = parse_filter(
            "ga:source==google,ga:medium==cpc;ga:sessions>10",
            FilterGrouping::Flatten,
        )
        .unwrap();

        assert_eq!(
            clauses.dimension,
            vec![
                dimension("ga:source", false, MatchOperator::Exact, "google"),
                dimension("ga:medium", false, MatchOperator::Exact, "cpc"),
            ]
        );
        assert_eq!(
            clauses.metric,
            vec![metric("ga:sessions", false, MatchOperator::GreaterThan, "10")]
        );
    }

    #[test]
    fn test_strict_keeps_or_groups() {
        let clauses = parse_filter(
            "ga:source==google,ga:medium==cpc;ga:sessions>10",
            FilterGrouping::Strict,
        )
        .unwrap();

        assert_eq!(clauses.dimension.len(), 1);
        assert_eq!(clauses.dimension[0].operator, Some(ClauseOperator::Or));
        assert_eq!(clauses.dimension[0].filters.len(), 2);
        assert_eq!(
            clauses.metric,
            vec![metric("ga:sessions", false, MatchOperator::GreaterThan, "10")]
        );
    }

    #[test]
    fn test_strict_rejects_mixed_or_group() {
        let err = parse_filter("ga:source==google,ga:sessions>10", FilterGrouping::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::MixedGroup("ga:source==google,ga:sessions>10".to_string())
        );
    }

    #[test]
    fn test_brackets_rejected_before_request_is_touched() {
        let query = crate::ReportQuery::new("1", "today", "today", "ga:sessions", None, None)
            .unwrap();
        let mut request = ReportRequest::from_query(&query);
        let before = request.clone();

        for filters in ["(ga:sessions>1)", "ga:source==a)", "ga:source==(a"] {
            let err = apply_filter(&mut request, filters, FilterGrouping::Flatten).unwrap_err();
            assert!(matches!(err, FilterError::Grouping(_)));
            assert_eq!(request, before);
        }
    }

    #[test]
    fn test_unknown_operator() {
        let err = parse_filter("ga:sessions", FilterGrouping::Flatten).unwrap_err();
        assert_eq!(err, FilterError::UnknownOperator("ga:sessions".to_string()));

        let err = parse_filter("ga:source==a,", FilterGrouping::Flatten).unwrap_err();
        assert_eq!(err, FilterError::UnknownOperator(String::new()));
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_filter("ga:unknownThing==1", FilterGrouping::Flatten).unwrap_err();
        assert_eq!(err, FilterError::UnknownField("ga:unknownThing".to_string()));
    }

    #[test]
    fn test_failed_term_leaves_request_untouched() {
        let query = crate::ReportQuery::new("1", "today", "today", "ga:sessions", None, None)
            .unwrap();
        let mut request = ReportRequest::from_query(&query);

        let err = apply_filter(
            &mut request,
            "ga:sessions>1;ga:bogus==2",
            FilterGrouping::Flatten,
        );
        assert!(err.is_err());
        assert!(request.metric_filter_clauses.is_empty());
    }

    #[test]
    fn test_apply_attaches_only_non_empty_lists() {
        let query = crate::ReportQuery::new("1", "today", "today", "ga:sessions", None, None)
            .unwrap();
        let mut request = ReportRequest::from_query(&query);

        apply_filter(&mut request, "ga:country==Germany", FilterGrouping::Flatten).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("metricFilterClauses").is_none());
        assert_eq!(value["dimensionFilterClauses"][0]["filters"][0]["expressions"][0], "Germany");
    }
}
