//! Query Transform Module
//!
//! Rewrites search queries before they reach the search backend, driven by
//! rule tables written as simple CSV.
//!
//! ## Transforms
//!
//! ```text
//! raw query ──► clean ──┬──► rewrite  ordered regex substitutions
//!                       │             "the cat sat" ─(the)─► "cat sat"
//!                       │
//!                       ├──► synonym  greedy longest-phrase OR-groups
//!                       │             "new york city" ─► "( new york OR ny ) city"
//!                       │
//!                       └──► bag      cleaned query unchanged;
//!                                     word → bag lookup via synonyms()
//! ```
//!
//! Each transform owns its rule table and parses it once, on first use.
//! Bad rows are reported through a [`DiagnosticsSink`] and skipped; only an
//! unknown type tag is an error.

pub mod bag;
pub mod base;
pub mod clean;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod pipeline;
pub mod reader;
pub mod rewrite;
pub mod rules;
pub mod synonym;

// Re-export primary types
pub use bag::BagTransform;
pub use base::TransformBase;
pub use clean::{tokenize, CleanerConfig, DefaultCleaner, TextCleaner};
pub use config::TransformSpec;
pub use diagnostics::{Diagnostic, DiagnosticsSink, LogSink, MemorySink};
pub use error::{TransformError, TransformResult};
pub use factory::{
    alloc_query_transform, QueryTransform, QueryTransformer, TransformFactory, TransformKind,
};
pub use pipeline::TransformPipeline;
pub use rewrite::{RewriteRule, RewriteTransform};
pub use rules::{RuleEntry, RuleIndex};
pub use synonym::{expand_tokens, SynonymTransform};
