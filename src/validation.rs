//! Structural checks over a built [`QueryDescriptor`].
//!
//! Validation never fails and never mutates its input: each function returns
//! one human-readable message per offending entry, in descriptor order. An
//! empty list means the descriptor is structurally valid, nothing more;
//! attribute names and `order_by` are never checked.

use crate::query::{Clause, QueryDescriptor};
use crate::relation::RelationSpec;

pub const MIN_STRICT_LIMIT: i64 = 1;
pub const MAX_STRICT_LIMIT: i64 = 1000;

/// Checks condition operators and the load strategy of top-level relations.
///
/// Nested relation trees are not inspected; use [`validate_deep`] for that.
/// Condition groups are entries of the top-level list, so their members are
/// reported as `condition <i>.<j>`.
pub fn validate(descriptor: &QueryDescriptor) -> Vec<String> {
    let mut errors = Vec::new();
    check_clauses(&descriptor.conditions, "", &mut errors);
    for (i, relation) in descriptor.relations.iter().enumerate() {
        check_strategy(relation, &i.to_string(), &mut errors);
    }
    errors
}

/// Like [`validate`], but also walks every `nested_relations` subtree.
/// Nested positions are reported as dotted paths (`relation 0.2.1`).
pub fn validate_deep(descriptor: &QueryDescriptor) -> Vec<String> {
    let mut errors = Vec::new();
    check_clauses(&descriptor.conditions, "", &mut errors);
    for (i, relation) in descriptor.relations.iter().enumerate() {
        check_relation_tree(relation, i.to_string(), &mut errors);
    }
    errors
}

/// [`validate_deep`] plus pagination bounds: `limit` in `1..=1000` and a
/// non-negative `offset`.
pub fn validate_strict(descriptor: &QueryDescriptor) -> Vec<String> {
    let mut errors = validate_deep(descriptor);
    if !(MIN_STRICT_LIMIT..=MAX_STRICT_LIMIT).contains(&descriptor.limit) {
        errors.push(format!(
            "Invalid limit '{}': must be between {} and {}",
            descriptor.limit, MIN_STRICT_LIMIT, MAX_STRICT_LIMIT
        ));
    }
    if descriptor.offset < 0 {
        errors.push(format!(
            "Invalid offset '{}': must not be negative",
            descriptor.offset
        ));
    }
    errors
}

fn check_clauses(clauses: &[Clause], prefix: &str, errors: &mut Vec<String>) {
    for (i, clause) in clauses.iter().enumerate() {
        let path = if prefix.is_empty() {
            i.to_string()
        } else {
            format!("{}.{}", prefix, i)
        };
        match clause {
            Clause::Condition(condition) => {
                if !condition.operator.is_known() {
                    errors.push(format!(
                        "Invalid operator '{}' at condition {}",
                        condition.operator, path
                    ));
                }
            }
            Clause::Group(group) => check_clauses(&group.conditions, &path, errors),
        }
    }
}

fn check_strategy(relation: &RelationSpec, path: &str, errors: &mut Vec<String>) {
    if !relation.load_strategy.is_known() {
        errors.push(format!(
            "Invalid load strategy '{}' at relation {}",
            relation.load_strategy, path
        ));
    }
}

fn check_relation_tree(relation: &RelationSpec, path: String, errors: &mut Vec<String>) {
    check_strategy(relation, &path, errors);
    for (i, nested) in relation.nested_relations.iter().enumerate() {
        check_relation_tree(nested, format!("{}.{}", path, i), errors);
    }
}
