use pretty_assertions::assert_eq;
use serde_json::json;
use taxis::prelude::*;
use taxis::{Clause, Condition};

#[test]
fn test_quick_search_with_profile() {
    let descriptor = quick_search("john", &["name", "email"])
        .include("profile")
        .build();

    assert_eq!(
        descriptor.conditions,
        vec![
            Clause::from(Condition::new("name", "contains", "john")),
            Clause::from(Condition::new("email", "contains", "john")),
        ]
    );
    assert_eq!(
        descriptor.relations,
        vec![RelationSpec::new("profile", LoadStrategy::Select)]
    );
    assert!(validate(&descriptor).is_empty());
}

#[test]
fn test_descriptor_round_trips_through_json() {
    let descriptor = create_query()
        .equals("status", "active")
        .any_of(|g| {
            g.equals("city", "Rosario").equals("city", "Córdoba");
        })
        .include_nested("posts", LoadStrategy::Subquery, |posts| {
            posts.include_with("author", LoadStrategy::Joined);
        })
        .include("profile")
        .match_any()
        .page(3, 20)
        .order_by_desc("created_at")
        .build();

    let value = descriptor.to_json().unwrap();
    assert_eq!(value["logical_operator"], json!("or"));
    assert_eq!(value["relations"][1], json!({"relation_name": "profile", "load_strategy": "select"}));
    assert_eq!(QueryDescriptor::from_json(value).unwrap(), descriptor);
}

#[test]
fn test_descriptor_from_endpoint_payload() {
    let payload = json!({
        "conditions": [
            {"attribute": "username", "operator": "eq", "value": "PRUEBA"},
            {"attribute": "status", "operator": "eq", "value": "active"},
            {"attribute": "is_verified", "operator": "eq", "value": true}
        ],
        "logical_operator": "and",
        "relations": [
            {"relation_name": "profile", "load_strategy": "select", "nested_relations": []}
        ]
    });

    let descriptor = QueryDescriptor::from_json(payload).unwrap();
    let expected = create_query()
        .equals("username", "PRUEBA")
        .equals("status", "active")
        .equals("is_verified", true)
        .include("profile")
        .build();

    assert_eq!(descriptor, expected);
}

#[test]
fn test_variant_from_reset() {
    let mut composer = date_range("created_at", "2024-01-01", "2024-06-30");
    let first_half = composer.build();

    let everything = composer.reset().order_by("created_at").build();

    assert_eq!(first_half.conditions.len(), 2);
    assert!(everything.conditions.is_empty());
    assert_eq!(everything.order_by.as_deref(), Some("created_at"));
}
