//! # Taxis
//!
//! *τάξις, Ancient Greek for "arrangement" or "order".*
//!
//! Taxis builds structured search descriptors: which records to match, which
//! relations to load along with them, how many to return and in what order.
//! A descriptor is plain serialisable data. Taxis never runs a query itself;
//! it hands the descriptor to a search endpoint and returns what comes back.
//!
//! ## What's inside
//!
//! ### Fluent composition
//! [`QueryComposer`] accumulates conditions, relation trees, pagination and
//! ordering through chained calls. Relation trees of any depth are composed
//! with scoped callbacks, so no half-built subtree escapes its scope:
//!
//! ```rust
//! use taxis::prelude::*;
//!
//! let descriptor = quick_search("john", &["name", "email"])
//!     .include_nested("posts", LoadStrategy::Select, |posts| {
//!         posts.include_nested("comments", LoadStrategy::Joined, |comments| {
//!             comments.include("author");
//!         });
//!     })
//!     .order_by_desc("created_at")
//!     .build();
//!
//! assert_eq!(descriptor.conditions.len(), 2);
//! assert_eq!(descriptor.relations[0].depth(), 3);
//! ```
//!
//! ### Permissive construction, explicit validation
//! Composers accept anything, including operators and load strategies
//! outside the vocabulary. [`validate`] is a separate, opt-in pass that
//! lists every structural problem instead of failing on the first:
//!
//! ```rust
//! use taxis::prelude::*;
//!
//! let descriptor = create_query().where_("x", "bogus", 1).build();
//! assert_eq!(validate(&descriptor), vec!["Invalid operator 'bogus' at condition 0"]);
//! ```
//!
//! ### Transport
//! [`SearchClient`] posts a built descriptor as JSON and parses the reply.
//! Non-2xx statuses surface as [`Error::Transport`] carrying the code.
//!
//! ```rust,ignore
//! use taxis::{ClientConfig, SearchClient, prelude::*};
//!
//! let client = SearchClient::http(ClientConfig::from_env()?)?;
//! let authors = client
//!     .search_with_query("/test/users", status_filter("active").include("profile"))
//!     .await?;
//! ```
//!
//! ## Feature flags
//!
//! | Flag   | Default | Description                          |
//! |--------|---------|--------------------------------------|
//! | `http` | ✓       | `HttpTransport` via reqwest          |

pub mod attributes;
pub mod composer;
pub mod config;
pub mod error;
pub mod factory;
pub mod query;
pub mod relation;
pub mod transport;
pub mod validation;

pub use crate::attributes::available_attributes;
pub use crate::composer::{GroupComposer, Predicates, QueryComposer};
pub use crate::config::ClientConfig;
pub use crate::error::Error;
pub use crate::factory::{create_query, date_range, quick_search, quick_search_default, status_filter};
pub use crate::query::{
    Clause, Condition, ConditionGroup, ConditionOperator, LogicalOperator, QueryDescriptor,
    SortDirection, ToConditionValue,
};
pub use crate::relation::{LoadStrategy, RelationComposer, RelationSpec};
#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;
pub use crate::transport::{
    MemoryTransport, RecordedRequest, SearchClient, SearchTransport, TransportResponse,
};
pub use crate::validation::{validate, validate_deep, validate_strict};

/// Everything needed to compose and validate descriptors.
pub mod prelude {
    pub use crate::composer::{Predicates, QueryComposer};
    pub use crate::factory::{
        create_query, date_range, quick_search, quick_search_default, status_filter,
    };
    pub use crate::query::{ConditionOperator, LogicalOperator, QueryDescriptor, SortDirection};
    pub use crate::relation::{LoadStrategy, RelationSpec};
    pub use crate::validation::{validate, validate_deep, validate_strict};
}
