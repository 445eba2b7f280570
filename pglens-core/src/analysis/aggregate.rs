use crate::analysis::report::{AnalysisReport, ReportMeta};
use crate::analysis::types::{ClassificationResult, SlowOperation};
use crate::conf::AnalysisConfig;
use crate::error::AnalyzeError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Accumulating,
    Reported,
}

/// Accumulates classified lines for one run.
///
/// Valid transitions: `Accumulating -> Reported`, via `report`. Once
/// reported, both `observe` and `report` fail with `InvalidState`.
pub struct Aggregator {
    pub(crate) config: AnalysisConfig,
    state: AnalysisState,

    pub(crate) errors: Vec<String>,
    pub(crate) slow_operations: Vec<SlowOperation>,

    // Insertion-ordered counters: `users[index[user]]`.
    pub(crate) users: Vec<(String, u64)>,
    index: HashMap<String, usize>,

    pub(crate) lines_observed: u64,
    pub(crate) malformed_lines: u64,
}

impl Aggregator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
            state: AnalysisState::Accumulating,
            errors: Vec::new(),
            slow_operations: Vec::new(),
            users: Vec::new(),
            index: HashMap::new(),
            lines_observed: 0,
            malformed_lines: 0,
        }
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn observe(
        &mut self,
        result: &ClassificationResult,
        raw_line: &str,
    ) -> Result<(), AnalyzeError> {
        self.ensure_accumulating("observe")?;
        self.lines_observed += 1;

        if result.is_error {
            self.errors.push(raw_line.to_string());
        }

        // The threshold is re-checked so that no record can ever sit at or
        // below it, whoever built the result.
        if let Some(ms) = result
            .slow_operation_ms
            .filter(|ms| *ms > self.config.detection.slow_threshold_ms)
        {
            self.slow_operations.push(SlowOperation {
                duration_ms: ms,
                line: raw_line.to_string(),
            });
        }

        if let Some(user) = &result.connection_identifier {
            self.count_connection(user);
        }

        if result.malformed.is_some() {
            self.malformed_lines += 1;
        }

        Ok(())
    }

    fn count_connection(&mut self, user: &str) {
        match self.index.get(user) {
            Some(&i) => self.users[i].1 += 1,
            None => {
                self.index.insert(user.to_string(), self.users.len());
                self.users.push((user.to_string(), 1));
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn slow_operation_count(&self) -> usize {
        self.slow_operations.len()
    }

    pub fn connection_count(&self, user: &str) -> u64 {
        self.index.get(user).map(|&i| self.users[i].1).unwrap_or(0)
    }

    pub fn lines_observed(&self) -> u64 {
        self.lines_observed
    }

    pub fn malformed_lines(&self) -> u64 {
        self.malformed_lines
    }

    /// Rank everything accumulated so far and close the run.
    pub fn report(&mut self, meta: ReportMeta) -> Result<AnalysisReport, AnalyzeError> {
        self.ensure_accumulating("report")?;
        self.state = AnalysisState::Reported;

        Ok(AnalysisReport::build(self, meta))
    }

    fn ensure_accumulating(&self, operation: &'static str) -> Result<(), AnalyzeError> {
        match self.state {
            AnalysisState::Accumulating => Ok(()),
            AnalysisState::Reported => {
                tracing::debug!(operation, "rejected call on reported analysis");
                Err(AnalyzeError::InvalidState { operation })
            }
        }
    }
}
