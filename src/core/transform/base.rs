//! Shared Transform State
//!
//! Everything the three transforms have in common: the raw query, the
//! transform's name, the unparsed rule text and the injected collaborators.

use std::fmt;
use std::sync::Arc;

use super::clean::{DefaultCleaner, TextCleaner};
use super::diagnostics::{default_sink, Diagnostic, DiagnosticsSink};
use super::factory::TransformKind;
use super::reader::{read_rows, ConfigRow};

#[derive(Clone)]
pub struct TransformBase {
    query: String,
    name: String,
    config: String,
    cleaner: Arc<dyn TextCleaner>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl TransformBase {
    /// Create with the default cleaner and a log-backed diagnostics sink.
    pub fn new(query: impl Into<String>, name: impl Into<String>, config: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            name: name.into(),
            config: config.into(),
            cleaner: Arc::new(DefaultCleaner::default()),
            sink: default_sink(),
        }
    }

    pub fn with_cleaner(mut self, cleaner: Arc<dyn TextCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_text(&self) -> &str {
        &self.config
    }

    /// Run the cleaner over the raw query.
    pub fn clean_query(&self) -> String {
        self.cleaner.clean(&self.query).trim().to_string()
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        self.sink.report(diagnostic);
    }

    /// Read the rule rows. Unreadable CSV is reported and yields no rows.
    pub fn rule_rows(&self, kind: TransformKind) -> Vec<ConfigRow> {
        log::info!("parse config {}", kind.processor_name());
        self.rows_or_empty(read_rows(&self.config))
    }

    /// A failed read discards every row.
    ///
    /// Flexible rows over `&str` input do not fail in practice; the error
    /// path covers `csv` error kinds such as I/O.
    fn rows_or_empty(&self, result: Result<Vec<ConfigRow>, csv::Error>) -> Vec<ConfigRow> {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                self.report(Diagnostic::ConfigUnreadable {
                    name: self.name.clone(),
                    message: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Check a row against the transform's minimum field count.
    ///
    /// Short rows are reported; empty rows are silently invalid.
    pub fn row_is_valid(&self, row: &ConfigRow, min_fields: Option<usize>) -> bool {
        if row.is_empty() {
            return false;
        }
        if let Some(min) = min_fields {
            if row.len() < min {
                self.report_malformed(row);
                return false;
            }
        }
        true
    }

    pub fn report_malformed(&self, row: &ConfigRow) {
        self.report(Diagnostic::MalformedRow {
            name: self.name.clone(),
            row: row.ordinal,
            line: row.line,
        });
    }
}

impl fmt::Debug for TransformBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformBase")
            .field("query", &self.query)
            .field("name", &self.name)
            .field("config_len", &self.config.len())
            .finish_non_exhaustive()
    }
}
