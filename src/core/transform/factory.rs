//! Transform Selection
//!
//! Maps a type tag (`rewrite`, `synonym`, `bag`) to one of the three
//! transforms. Unknown tags are a wiring mistake and fail immediately.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bag::BagTransform;
use super::base::TransformBase;
use super::clean::{DefaultCleaner, TextCleaner};
use super::diagnostics::{default_sink, DiagnosticsSink};
use super::error::{TransformError, TransformResult};
use super::rewrite::RewriteTransform;
use super::rules::RuleEntry;
use super::synonym::SynonymTransform;

/// The closed set of transform variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Rewrite,
    Synonym,
    Bag,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [TransformKind::Rewrite, TransformKind::Synonym, TransformKind::Bag];

    /// The type tag used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Rewrite => "rewrite",
            TransformKind::Synonym => "synonym",
            TransformKind::Bag => "bag",
        }
    }

    /// Processor name used in log messages.
    pub fn processor_name(&self) -> &'static str {
        match self {
            TransformKind::Rewrite => "RewriteQueryProcessor",
            TransformKind::Synonym => "SynonymQueryProcessor",
            TransformKind::Bag => "SynonymBagQueryProcessor",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rewrite" => Ok(TransformKind::Rewrite),
            "synonym" => Ok(TransformKind::Synonym),
            "bag" => Ok(TransformKind::Bag),
            other => Err(TransformError::InvalidTransformType(other.to_string())),
        }
    }
}

/// Common interface of the query transforms.
///
/// Rule text is parsed at most once per instance, on the first call that
/// needs it. Instances are `Send` but not `Sync`: share one across threads
/// only behind a lock.
pub trait QueryTransformer {
    fn kind(&self) -> TransformKind;

    fn base(&self) -> &TransformBase;

    /// Parse the rule text if that has not happened yet.
    fn parse_config(&self);

    fn is_parsed(&self) -> bool;

    /// Clean the query and apply the transform.
    fn process(&self) -> String;

    /// Parsed rules: in application order for rewrite, in key order otherwise.
    fn replace_patterns(&self) -> Vec<&RuleEntry>;

    /// Alternatives stored for a word or phrase; empty when there are none.
    fn synonyms(&self, word: &str) -> &[String];

    fn name(&self) -> &str {
        self.base().name()
    }

    fn query(&self) -> &str {
        self.base().query()
    }
}

/// A transform of any kind.
#[derive(Debug)]
pub enum QueryTransform {
    Rewrite(RewriteTransform),
    Synonym(SynonymTransform),
    Bag(BagTransform),
}

impl QueryTransform {
    fn inner(&self) -> &dyn QueryTransformer {
        match self {
            QueryTransform::Rewrite(t) => t,
            QueryTransform::Synonym(t) => t,
            QueryTransform::Bag(t) => t,
        }
    }
}

impl QueryTransformer for QueryTransform {
    fn kind(&self) -> TransformKind {
        self.inner().kind()
    }

    fn base(&self) -> &TransformBase {
        self.inner().base()
    }

    fn parse_config(&self) {
        self.inner().parse_config()
    }

    fn is_parsed(&self) -> bool {
        self.inner().is_parsed()
    }

    fn process(&self) -> String {
        self.inner().process()
    }

    fn replace_patterns(&self) -> Vec<&RuleEntry> {
        self.inner().replace_patterns()
    }

    fn synonyms(&self, word: &str) -> &[String] {
        self.inner().synonyms(word)
    }
}

/// Builds transforms that share a cleaner and a diagnostics sink.
#[derive(Clone)]
pub struct TransformFactory {
    cleaner: Arc<dyn TextCleaner>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for TransformFactory {
    fn default() -> Self {
        Self {
            cleaner: Arc::new(DefaultCleaner::default()),
            sink: default_sink(),
        }
    }
}

impl fmt::Debug for TransformFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformFactory").finish_non_exhaustive()
    }
}

impl TransformFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cleaner(mut self, cleaner: Arc<dyn TextCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build a transform of a known kind.
    pub fn build(
        &self,
        kind: TransformKind,
        query: impl Into<String>,
        name: impl Into<String>,
        config: impl Into<String>,
    ) -> QueryTransform {
        let base = TransformBase::new(query, name, config)
            .with_cleaner(Arc::clone(&self.cleaner))
            .with_sink(Arc::clone(&self.sink));

        match kind {
            TransformKind::Rewrite => QueryTransform::Rewrite(RewriteTransform::from_base(base)),
            TransformKind::Synonym => QueryTransform::Synonym(SynonymTransform::from_base(base)),
            TransformKind::Bag => QueryTransform::Bag(BagTransform::from_base(base)),
        }
    }

    /// Build a transform from its type tag.
    pub fn alloc(
        &self,
        type_tag: &str,
        query: impl Into<String>,
        name: impl Into<String>,
        config: impl Into<String>,
    ) -> TransformResult<QueryTransform> {
        let kind: TransformKind = type_tag.parse()?;
        Ok(self.build(kind, query, name, config))
    }
}

/// Build a transform from its type tag with the default cleaner and sink.
pub fn alloc_query_transform(
    type_tag: &str,
    query: impl Into<String>,
    name: impl Into<String>,
    config: impl Into<String>,
) -> TransformResult<QueryTransform> {
    TransformFactory::default().alloc(type_tag, query, name, config)
}
