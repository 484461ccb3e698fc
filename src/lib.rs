//! query-transform - rule-driven query rewriting for search front-ends
//!
//! Turns a free-text query into a rewritten query string or an OR-expanded
//! boolean query, using substitution rules loaded from CSV tables.

pub mod config;
pub mod core;

pub use crate::core::transform::{
    alloc_query_transform, QueryTransform, QueryTransformer, TransformError, TransformKind,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
