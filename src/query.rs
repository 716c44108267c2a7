use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::Error;
use crate::relation::RelationSpec;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// Comparison applied by a [`Condition`].
///
/// Unknown names are kept verbatim in [`ConditionOperator::Other`] so a
/// descriptor can carry them until [`crate::validation::validate`] flags them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    IContains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Other(String),
}

impl ConditionOperator {
    pub const KNOWN: [ConditionOperator; 14] = [
        ConditionOperator::Eq,
        ConditionOperator::Ne,
        ConditionOperator::Gt,
        ConditionOperator::Gte,
        ConditionOperator::Lt,
        ConditionOperator::Lte,
        ConditionOperator::Contains,
        ConditionOperator::IContains,
        ConditionOperator::StartsWith,
        ConditionOperator::EndsWith,
        ConditionOperator::In,
        ConditionOperator::NotIn,
        ConditionOperator::IsNull,
        ConditionOperator::IsNotNull,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Eq => "eq",
            ConditionOperator::Ne => "ne",
            ConditionOperator::Gt => "gt",
            ConditionOperator::Gte => "gte",
            ConditionOperator::Lt => "lt",
            ConditionOperator::Lte => "lte",
            ConditionOperator::Contains => "contains",
            ConditionOperator::IContains => "icontains",
            ConditionOperator::StartsWith => "startswith",
            ConditionOperator::EndsWith => "endswith",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "not_in",
            ConditionOperator::IsNull => "is_null",
            ConditionOperator::IsNotNull => "is_not_null",
            ConditionOperator::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ConditionOperator::Other(_))
    }
}

impl From<&str> for ConditionOperator {
    fn from(name: &str) -> Self {
        match name {
            "eq" => ConditionOperator::Eq,
            "ne" => ConditionOperator::Ne,
            "gt" => ConditionOperator::Gt,
            "gte" => ConditionOperator::Gte,
            "lt" => ConditionOperator::Lt,
            "lte" => ConditionOperator::Lte,
            "contains" => ConditionOperator::Contains,
            "icontains" => ConditionOperator::IContains,
            "startswith" => ConditionOperator::StartsWith,
            "endswith" => ConditionOperator::EndsWith,
            "in" => ConditionOperator::In,
            "not_in" => ConditionOperator::NotIn,
            "is_null" => ConditionOperator::IsNull,
            "is_not_null" => ConditionOperator::IsNotNull,
            other => ConditionOperator::Other(other.to_string()),
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(name: String) -> Self {
        ConditionOperator::from(name.as_str())
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        match op {
            ConditionOperator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sibling clauses combine. The search endpoint owns the semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn is_and(&self) -> bool {
        matches!(self, LogicalOperator::And)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One filter predicate. The attribute may be a dot path (`profile.city`)
/// and is never checked against a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(
        attribute: impl Into<String>,
        operator: impl Into<ConditionOperator>,
        value: impl ToConditionValue,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator: operator.into(),
            value: value.to_condition_value(),
        }
    }
}

/// A parenthesised set of clauses joined by one logical operator.
///
/// `conditions` is required on the wire; an object that is neither a
/// condition nor carries that key fails to decode instead of becoming an
/// empty group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<Clause>,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

/// An entry of a condition list: a single predicate or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Clause {
    Condition(Condition),
    Group(ConditionGroup),
}

impl Clause {
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Clause::Condition(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&ConditionGroup> {
        match self {
            Clause::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Condition> for Clause {
    fn from(condition: Condition) -> Self {
        Clause::Condition(condition)
    }
}

impl From<ConditionGroup> for Clause {
    fn from(group: ConditionGroup) -> Self {
        Clause::Group(group)
    }
}

/// The complete, serialisable search request.
///
/// Only produced by [`crate::QueryComposer::build`]; it owns every nested
/// relation and clause, so later composer mutations never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescriptor {
    pub conditions: Vec<Clause>,
    pub relations: Vec<RelationSpec>,
    pub limit: i64,
    pub offset: i64,
    pub order_by: Option<String>,
    pub order_direction: SortDirection,
    #[serde(skip_serializing_if = "LogicalOperator::is_and")]
    pub logical_operator: LogicalOperator,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            relations: Vec::new(),
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            order_by: None,
            order_direction: SortDirection::Asc,
            logical_operator: LogicalOperator::And,
        }
    }
}

impl QueryDescriptor {
    pub fn to_json(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    pub fn from_json(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::Deserialize(e.to_string()))
    }

    /// Top-level plain conditions, skipping groups.
    pub fn plain_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter_map(Clause::as_condition)
    }
}

// Helper trait to convert types to condition values
pub trait ToConditionValue {
    fn to_condition_value(&self) -> Value;
}

impl ToConditionValue for Value {
    fn to_condition_value(&self) -> Value {
        self.clone()
    }
}

impl ToConditionValue for str {
    fn to_condition_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToConditionValue for String {
    fn to_condition_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToConditionValue for i64 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToConditionValue for i32 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self as i64)
    }
}

impl ToConditionValue for u32 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self as u64)
    }
}

impl ToConditionValue for u64 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToConditionValue for f64 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToConditionValue for f32 {
    fn to_condition_value(&self) -> Value {
        Value::from(*self as f64)
    }
}

impl ToConditionValue for bool {
    fn to_condition_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToConditionValue for chrono::DateTime<chrono::Utc> {
    fn to_condition_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

impl ToConditionValue for chrono::NaiveDate {
    fn to_condition_value(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl ToConditionValue for Uuid {
    fn to_condition_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: ToConditionValue> ToConditionValue for Option<T> {
    fn to_condition_value(&self) -> Value {
        match self {
            Some(v) => v.to_condition_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToConditionValue> ToConditionValue for [T] {
    fn to_condition_value(&self) -> Value {
        Value::Array(self.iter().map(|v| v.to_condition_value()).collect())
    }
}

impl<T: ToConditionValue, const N: usize> ToConditionValue for [T; N] {
    fn to_condition_value(&self) -> Value {
        self.as_slice().to_condition_value()
    }
}

impl<T: ToConditionValue> ToConditionValue for Vec<T> {
    fn to_condition_value(&self) -> Value {
        self.as_slice().to_condition_value()
    }
}

impl<T: ToConditionValue + ?Sized> ToConditionValue for &T {
    fn to_condition_value(&self) -> Value {
        (**self).to_condition_value()
    }
}
