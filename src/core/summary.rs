use crate::core::{BatchResult, ValidationOutcome};

pub const NOT_AVAILABLE: &str = "N/A";

/// One display row of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub number: String,
    pub country_code: String,
    pub number_type: String,
    pub is_possible: String,
    pub is_valid: String,
    pub highlighted: bool,
    pub error: Option<String>,
}

impl ResultRow {
    fn from_outcome(outcome: &ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Checked(checked) => Self {
                number: checked.number.clone(),
                country_code: checked.country_code.clone(),
                number_type: checked.number_type.label().to_string(),
                is_possible: yes_no(checked.is_possible),
                is_valid: yes_no(checked.is_valid),
                highlighted: checked.is_valid,
                error: None,
            },
            ValidationOutcome::Failed(failed) => Self {
                number: failed.number.clone(),
                country_code: NOT_AVAILABLE.to_string(),
                number_type: NOT_AVAILABLE.to_string(),
                is_possible: NOT_AVAILABLE.to_string(),
                is_valid: NOT_AVAILABLE.to_string(),
                highlighted: false,
                error: Some(failed.error.clone()),
            },
        }
    }
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: Vec<ResultRow>,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub error_count: usize,
}

impl Summary {
    pub fn from_batch(batch: &BatchResult) -> Self {
        let rows: Vec<ResultRow> = batch.numbers().iter().map(ResultRow::from_outcome).collect();
        let classified = batch.classified_count();

        Self {
            rows,
            valid_count: batch.valid_count(),
            invalid_count: classified.saturating_sub(batch.valid_count()),
            error_count: batch.error_count(),
        }
    }

    /// Valid rows over classified rows; errored rows are left out of both.
    pub fn valid_percentage(&self) -> f64 {
        let total = self.valid_count + self.invalid_count;
        if total == 0 {
            return 0.0;
        }
        self.valid_count as f64 / total as f64 * 100.0
    }

    pub fn formatted_percentage(&self) -> String {
        format!("{:.2}", self.valid_percentage())
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }
}
