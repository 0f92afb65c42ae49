use crate::sample::Sample;

/// What an evaluation's history keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryStrategy {
    /// Record nothing.
    #[default]
    Null,
    /// Keep every evaluated row.
    Full,
    /// Keep the most recent `n` rows.
    Last(usize),
}

/// Recorded inputs and outputs of an evaluation, row-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    strategy: HistoryStrategy,
    input: Sample,
    output: Sample,
}

impl History {
    /// Empty history for the given dimensions.
    pub fn new(strategy: HistoryStrategy, input_dimension: usize, output_dimension: usize) -> Self {
        Self {
            strategy,
            input: Sample::with_dimension(input_dimension),
            output: Sample::with_dimension(output_dimension),
        }
    }

    /// Current strategy.
    pub fn strategy(&self) -> HistoryStrategy {
        self.strategy
    }

    /// Change strategy and drop recorded rows.
    pub fn set_strategy(&mut self, strategy: HistoryStrategy) {
        self.strategy = strategy;
        self.clear();
    }

    /// Recorded inputs.
    pub fn input(&self) -> &Sample {
        &self.input
    }

    /// Recorded outputs.
    pub fn output(&self) -> &Sample {
        &self.output
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.input.size()
    }

    /// True if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Drop recorded rows.
    pub fn clear(&mut self) {
        self.input = Sample::with_dimension(self.input.dimension());
        self.output = Sample::with_dimension(self.output.dimension());
    }

    pub(crate) fn record_point(&mut self, x: &[f64], y: &[f64]) {
        if self.strategy == HistoryStrategy::Null {
            return;
        }
        // dimensions were checked by the evaluation
        if self.input.push(x).is_ok() && self.output.push(y).is_ok() {
            self.trim();
        }
    }

    pub(crate) fn record_sample(&mut self, x: &Sample, y: &Sample) {
        if self.strategy == HistoryStrategy::Null {
            return;
        }
        if self.input.extend(x).is_ok() && self.output.extend(y).is_ok() {
            self.trim();
        }
    }

    fn trim(&mut self) {
        if let HistoryStrategy::Last(n) = self.strategy {
            self.input.truncate_front(n);
            self.output.truncate_front(n);
        }
    }
}
