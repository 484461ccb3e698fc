//! Transform Pipeline
//!
//! Runs a fixed list of transforms in order, feeding each one's output to the
//! next as its raw query. Type tags and rule files are checked up front so a
//! misconfigured pipeline fails when it is built, not when a query arrives.

use std::path::Path;

use super::config::TransformSpec;
use super::error::TransformResult;
use super::factory::{QueryTransformer, TransformFactory, TransformKind};

#[derive(Clone, Debug)]
struct Stage {
    kind: TransformKind,
    name: String,
    rules: String,
}

#[derive(Clone, Debug, Default)]
pub struct TransformPipeline {
    factory: TransformFactory,
    stages: Vec<Stage>,
}

impl TransformPipeline {
    pub fn new(factory: TransformFactory) -> Self {
        Self {
            factory,
            stages: Vec::new(),
        }
    }

    /// Build from declarations; `base_dir` anchors relative rule paths.
    pub fn from_specs(
        specs: &[TransformSpec],
        base_dir: Option<&Path>,
        factory: TransformFactory,
    ) -> TransformResult<Self> {
        let mut pipeline = Self::new(factory);
        for spec in specs {
            let kind: TransformKind = spec.kind.parse()?;
            let rules = spec.load_rules(base_dir)?;
            pipeline.push(kind, spec.name.clone(), rules);
        }
        Ok(pipeline)
    }

    pub fn push(&mut self, kind: TransformKind, name: impl Into<String>, rules: impl Into<String>) {
        self.stages.push(Stage {
            kind,
            name: name.into(),
            rules: rules.into(),
        });
    }

    /// Run every stage over `query`.
    pub fn run(&self, query: &str) -> String {
        let mut current = query.to_string();
        for stage in &self.stages {
            let transform = self
                .factory
                .build(stage.kind, current, stage.name.as_str(), stage.rules.as_str());
            current = transform.process();
            log::debug!("after {} ({}): {}", stage.name, stage.kind, current);
        }
        current
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
