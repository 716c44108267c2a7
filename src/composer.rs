use crate::query::{
    Clause, Condition, ConditionGroup, ConditionOperator, LogicalOperator, QueryDescriptor,
    SortDirection, ToConditionValue,
};
use crate::relation::{LoadStrategy, RelationComposer, RelationSpec};

/// Predicate helpers shared by every composer that owns a clause list.
///
/// Nothing here validates: operators outside the vocabulary are appended as
/// given and left for [`crate::validation::validate`].
pub trait Predicates {
    fn push_clause(&mut self, clause: Clause);

    fn where_(
        &mut self,
        attribute: impl Into<String>,
        operator: impl Into<ConditionOperator>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.push_clause(Condition::new(attribute, operator, value).into());
        self
    }

    // Equality
    fn equals(&mut self, attribute: impl Into<String>, value: impl ToConditionValue) -> &mut Self {
        self.where_(attribute, ConditionOperator::Eq, value)
    }

    fn not_equals(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::Ne, value)
    }

    // Text matching
    fn contains(&mut self, attribute: impl Into<String>, value: impl ToConditionValue) -> &mut Self {
        self.where_(attribute, ConditionOperator::Contains, value)
    }

    fn icontains(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::IContains, value)
    }

    fn starts_with(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::StartsWith, value)
    }

    fn ends_with(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::EndsWith, value)
    }

    // Ordering comparisons
    fn greater_than(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::Gt, value)
    }

    fn greater_or_equal(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::Gte, value)
    }

    fn less_than(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::Lt, value)
    }

    fn less_or_equal(
        &mut self,
        attribute: impl Into<String>,
        value: impl ToConditionValue,
    ) -> &mut Self {
        self.where_(attribute, ConditionOperator::Lte, value)
    }

    // Membership
    fn in_(&mut self, attribute: impl Into<String>, values: impl ToConditionValue) -> &mut Self {
        self.where_(attribute, ConditionOperator::In, values)
    }

    fn not_in(&mut self, attribute: impl Into<String>, values: impl ToConditionValue) -> &mut Self {
        self.where_(attribute, ConditionOperator::NotIn, values)
    }

    // Null checks always carry a null value
    fn is_null(&mut self, attribute: impl Into<String>) -> &mut Self {
        self.where_(attribute, ConditionOperator::IsNull, serde_json::Value::Null)
    }

    fn is_not_null(&mut self, attribute: impl Into<String>) -> &mut Self {
        self.where_(attribute, ConditionOperator::IsNotNull, serde_json::Value::Null)
    }

    /// Appends a group whose clauses are OR'd together.
    fn any_of<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut GroupComposer),
    {
        let mut group = GroupComposer::new(LogicalOperator::Or);
        configure(&mut group);
        self.push_clause(Clause::Group(group.into_group()));
        self
    }

    /// Appends a group whose clauses are AND'd together.
    fn all_of<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut GroupComposer),
    {
        let mut group = GroupComposer::new(LogicalOperator::And);
        configure(&mut group);
        self.push_clause(Clause::Group(group.into_group()));
        self
    }
}

/// Builds one [`ConditionGroup`] inside an `any_of`/`all_of` callback.
#[derive(Debug, Clone)]
pub struct GroupComposer {
    group: ConditionGroup,
}

impl GroupComposer {
    pub fn new(logical_operator: LogicalOperator) -> Self {
        Self {
            group: ConditionGroup {
                conditions: Vec::new(),
                logical_operator,
            },
        }
    }

    pub fn build(&self) -> ConditionGroup {
        self.group.clone()
    }

    fn into_group(self) -> ConditionGroup {
        self.group
    }
}

impl Predicates for GroupComposer {
    fn push_clause(&mut self, clause: Clause) {
        self.group.conditions.push(clause);
    }
}

/// Fluent builder for a [`QueryDescriptor`].
///
/// Every mutating call returns the same composer, so calls chain:
///
/// ```rust
/// use taxis::prelude::*;
///
/// let descriptor = create_query()
///     .equals("status", "active")
///     .include_nested("posts", LoadStrategy::Select, |posts| {
///         posts.include_with("author", LoadStrategy::Joined);
///     })
///     .order_by_desc("created_at")
///     .page(2, 25)
///     .build();
///
/// assert_eq!(descriptor.offset, 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryComposer {
    descriptor: QueryDescriptor,
}

impl QueryComposer {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Relations ====================

    /// Loads a relation with the default `select` strategy.
    pub fn include(&mut self, relation_name: impl Into<String>) -> &mut Self {
        self.include_with(relation_name, LoadStrategy::Select)
    }

    pub fn include_with(
        &mut self,
        relation_name: impl Into<String>,
        load_strategy: impl Into<LoadStrategy>,
    ) -> &mut Self {
        self.include_with_nested(relation_name, load_strategy, Vec::new())
    }

    /// Loads a relation whose nested tree is already built.
    pub fn include_with_nested(
        &mut self,
        relation_name: impl Into<String>,
        load_strategy: impl Into<LoadStrategy>,
        nested_relations: Vec<RelationSpec>,
    ) -> &mut Self {
        self.descriptor
            .relations
            .push(RelationSpec::new(relation_name, load_strategy).with_nested(nested_relations));
        self
    }

    /// Hands a fresh [`RelationComposer`] to `configure` and appends the
    /// finished relation tree when the callback returns.
    pub fn include_nested<F>(
        &mut self,
        relation_name: impl Into<String>,
        load_strategy: impl Into<LoadStrategy>,
        configure: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut RelationComposer),
    {
        let mut sub = RelationComposer::new(relation_name, load_strategy);
        configure(&mut sub);
        self.descriptor.relations.push(sub.into_spec());
        self
    }

    // ==================== Pagination ====================

    /// Sets the page size as given; negative values are left to validation.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.descriptor.limit = limit;
        self
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.descriptor.offset = offset;
        self
    }

    /// 1-indexed page. A page number of zero or below yields a zero or
    /// negative offset.
    pub fn page(&mut self, page_number: i64, page_size: i64) -> &mut Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        self.limit(page_size).offset(offset)
    }

    // ==================== Ordering ====================

    pub fn order_by(&mut self, attribute: impl Into<String>) -> &mut Self {
        self.order_by_with(attribute, SortDirection::Asc)
    }

    pub fn order_by_desc(&mut self, attribute: impl Into<String>) -> &mut Self {
        self.order_by_with(attribute, SortDirection::Desc)
    }

    /// Single-column ordering; the last call wins.
    pub fn order_by_with(
        &mut self,
        attribute: impl Into<String>,
        direction: SortDirection,
    ) -> &mut Self {
        self.descriptor.order_by = Some(attribute.into());
        self.descriptor.order_direction = direction;
        self
    }

    // ==================== Combination ====================

    /// Top-level clauses must all hold (the default).
    pub fn match_all(&mut self) -> &mut Self {
        self.descriptor.logical_operator = LogicalOperator::And;
        self
    }

    /// Any top-level clause may hold.
    pub fn match_any(&mut self) -> &mut Self {
        self.descriptor.logical_operator = LogicalOperator::Or;
        self
    }

    // ==================== Snapshot ====================

    /// Returns an owned copy; later calls on this composer never affect it.
    pub fn build(&self) -> QueryDescriptor {
        self.descriptor.clone()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.descriptor = QueryDescriptor::default();
        self
    }
}

impl Predicates for QueryComposer {
    fn push_clause(&mut self, clause: Clause) {
        self.descriptor.conditions.push(clause);
    }
}

impl From<QueryDescriptor> for QueryComposer {
    /// Re-enters a built descriptor to derive a variant from it.
    fn from(descriptor: QueryDescriptor) -> Self {
        Self { descriptor }
    }
}
