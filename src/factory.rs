//! Shorthands that return a pre-populated [`QueryComposer`].

use crate::composer::{Predicates, QueryComposer};
use crate::query::ToConditionValue;

pub const DEFAULT_SEARCH_FIELDS: [&str; 1] = ["name"];

pub fn create_query() -> QueryComposer {
    QueryComposer::new()
}

/// One `contains` condition per field, in field order. Whether they are AND'd
/// or OR'd is up to the endpoint; call `match_any` to ask for OR.
pub fn quick_search<S: AsRef<str>>(term: &str, fields: &[S]) -> QueryComposer {
    let mut composer = QueryComposer::new();
    for field in fields {
        composer.contains(field.as_ref(), term);
    }
    composer
}

/// [`quick_search`] over [`DEFAULT_SEARCH_FIELDS`].
pub fn quick_search_default(term: &str) -> QueryComposer {
    quick_search(term, &DEFAULT_SEARCH_FIELDS)
}

/// Inclusive range: `field gte start` followed by `field lte end`.
pub fn date_range(
    field: &str,
    start: impl ToConditionValue,
    end: impl ToConditionValue,
) -> QueryComposer {
    let mut composer = QueryComposer::new();
    composer
        .greater_or_equal(field, start)
        .less_or_equal(field, end);
    composer
}

pub fn status_filter(status: impl ToConditionValue) -> QueryComposer {
    let mut composer = QueryComposer::new();
    composer.equals("status", status);
    composer
}
