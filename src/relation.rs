use serde::{Deserialize, Serialize};

/// Loading technique requested for a relation; interpreted by the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoadStrategy {
    /// One extra query per relation.
    #[default]
    Select,
    /// A single join.
    Joined,
    /// A correlated subquery.
    Subquery,
    Other(String),
}

impl LoadStrategy {
    pub const KNOWN: [LoadStrategy; 3] = [
        LoadStrategy::Select,
        LoadStrategy::Joined,
        LoadStrategy::Subquery,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LoadStrategy::Select => "select",
            LoadStrategy::Joined => "joined",
            LoadStrategy::Subquery => "subquery",
            LoadStrategy::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LoadStrategy::Other(_))
    }
}

impl From<&str> for LoadStrategy {
    fn from(name: &str) -> Self {
        match name {
            "select" => LoadStrategy::Select,
            "joined" => LoadStrategy::Joined,
            "subquery" => LoadStrategy::Subquery,
            other => LoadStrategy::Other(other.to_string()),
        }
    }
}

impl From<String> for LoadStrategy {
    fn from(name: String) -> Self {
        LoadStrategy::from(name.as_str())
    }
}

impl From<LoadStrategy> for String {
    fn from(strategy: LoadStrategy) -> Self {
        match strategy {
            LoadStrategy::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a relation-loading tree.
///
/// `nested_relations` is left off the wire while empty, and decodes back to
/// an empty list when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSpec {
    pub relation_name: String,
    #[serde(default)]
    pub load_strategy: LoadStrategy,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_relations: Vec<RelationSpec>,
}

impl RelationSpec {
    pub fn new(relation_name: impl Into<String>, load_strategy: impl Into<LoadStrategy>) -> Self {
        Self {
            relation_name: relation_name.into(),
            load_strategy: load_strategy.into(),
            nested_relations: Vec::new(),
        }
    }

    pub fn with_nested(mut self, nested: Vec<RelationSpec>) -> Self {
        self.nested_relations = nested;
        self
    }

    /// Depth of the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .nested_relations
            .iter()
            .map(RelationSpec::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Builds one [`RelationSpec`], recursing for nested relations.
///
/// Callers only ever see one by reference inside an `include_nested`
/// callback; construction stays inside the crate.
#[derive(Debug, Clone)]
pub struct RelationComposer {
    spec: RelationSpec,
}

impl RelationComposer {
    pub(crate) fn new(relation_name: impl Into<String>, load_strategy: impl Into<LoadStrategy>) -> Self {
        Self {
            spec: RelationSpec::new(relation_name, load_strategy),
        }
    }

    /// Nested relation loaded with the default `select` strategy.
    pub fn include(&mut self, relation_name: impl Into<String>) -> &mut Self {
        self.include_with(relation_name, LoadStrategy::Select)
    }

    pub fn include_with(
        &mut self,
        relation_name: impl Into<String>,
        load_strategy: impl Into<LoadStrategy>,
    ) -> &mut Self {
        self.spec
            .nested_relations
            .push(RelationSpec::new(relation_name, load_strategy));
        self
    }

    /// Runs `configure` against a fresh composer one level down and appends
    /// its result once the callback returns.
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
        self.spec.nested_relations.push(sub.into_spec());
        self
    }

    pub fn build(&self) -> RelationSpec {
        self.spec.clone()
    }

    pub(crate) fn into_spec(self) -> RelationSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in LoadStrategy::KNOWN {
            assert!(strategy.is_known());
            assert_eq!(LoadStrategy::from(strategy.as_str()), strategy);
            assert_eq!(String::from(strategy.clone()), strategy.to_string());
        }

        let decoded: LoadStrategy = serde_json::from_value(json!("subquery")).unwrap();
        assert_eq!(decoded, LoadStrategy::Subquery);
        assert!(!LoadStrategy::KNOWN.contains(&LoadStrategy::from("eager")));
    }

    #[test]
    fn test_nested_relations_omitted_when_empty() {
        let spec = RelationSpec::new("profile", LoadStrategy::Joined);
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"relation_name": "profile", "load_strategy": "joined"})
        );

        let decoded: RelationSpec =
            serde_json::from_value(json!({"relation_name": "profile"})).unwrap();
        assert_eq!(decoded, RelationSpec::new("profile", "select"));
    }

    #[test]
    fn test_deep_composition() {
        let mut composer = RelationComposer::new("posts", LoadStrategy::Select);
        composer
            .include_with("tags", LoadStrategy::Joined)
            .include_nested("author", LoadStrategy::Subquery, |author| {
                author.include_nested("profile", "joined", |profile| {
                    profile.include("avatar");
                });
            });
        let spec = composer.build();

        assert_eq!(spec.depth(), 4);
        assert_eq!(spec.nested_relations[0], RelationSpec::new("tags", "joined"));
        let author = &spec.nested_relations[1];
        assert_eq!(author.load_strategy, LoadStrategy::Subquery);
        assert_eq!(
            author.nested_relations[0].nested_relations[0],
            RelationSpec::new("avatar", "select")
        );
    }

    #[test]
    fn test_build_is_detached() {
        let mut composer = RelationComposer::new("posts", "select");
        composer.include("author");
        let first = composer.build();
        composer.include("comments");

        assert_eq!(first.nested_relations.len(), 1);
        assert_eq!(composer.build().nested_relations.len(), 2);
    }

    #[test]
    fn test_unknown_strategy_is_kept() {
        let spec = RelationSpec::new("r", "eager");
        assert_eq!(spec.load_strategy, LoadStrategy::Other("eager".to_string()));
        assert!(!spec.load_strategy.is_known());
        assert_eq!(serde_json::to_value(&spec).unwrap()["load_strategy"], json!("eager"));
    }
}
