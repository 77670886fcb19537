use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A synthesized candidate as written to the generated-numbers collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNumber {
    pub number: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedNumber {
    pub fn new(number: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            country_code: country_code.into(),
            created_at: Utc::now(),
        }
    }
}

/// Structural classification of a parsed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberType {
    FixedLine,
    Mobile,
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    SharedCost,
    PersonalNumber,
    Voip,
    Pager,
    Uan,
    Voicemail,
    Unknown,
}

impl NumberType {
    pub fn label(&self) -> &'static str {
        match self {
            NumberType::FixedLine => "Fixed line",
            NumberType::Mobile => "Mobile",
            NumberType::FixedLineOrMobile => "Fixed line or mobile",
            NumberType::TollFree => "Toll free",
            NumberType::PremiumRate => "Premium rate",
            NumberType::SharedCost => "Shared cost",
            NumberType::PersonalNumber => "Personal number",
            NumberType::Voip => "VoIP",
            NumberType::Pager => "Pager",
            NumberType::Uan => "UAN",
            NumberType::Voicemail => "Voicemail",
            NumberType::Unknown => "Unknown",
        }
    }
}

/// The fields derived from a successfully parsed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub country_code: String,
    pub number_type: NumberType,
    pub is_possible: bool,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedNumber {
    pub number: String,
    pub country_code: String,
    #[serde(rename = "type")]
    pub number_type: NumberType,
    pub is_possible: bool,
    pub is_valid: bool,
    pub validated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedNumber {
    pub number: String,
    pub error: String,
}

/// One entry per submitted number. Serialized untagged so a record is either the
/// full classification object or `{ number, error }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationOutcome {
    Checked(CheckedNumber),
    Failed(FailedNumber),
}

impl ValidationOutcome {
    pub fn checked(number: impl Into<String>, classification: Classification) -> Self {
        ValidationOutcome::Checked(CheckedNumber {
            number: number.into(),
            country_code: classification.country_code,
            number_type: classification.number_type,
            is_possible: classification.is_possible,
            is_valid: classification.is_valid,
            validated_at: Utc::now(),
        })
    }

    pub fn failed(number: impl Into<String>, error: impl Into<String>) -> Self {
        ValidationOutcome::Failed(FailedNumber {
            number: number.into(),
            error: error.into(),
        })
    }

    pub fn number(&self) -> &str {
        match self {
            ValidationOutcome::Checked(checked) => &checked.number,
            ValidationOutcome::Failed(failed) => &failed.number,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Checked(checked) if checked.is_valid)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationOutcome::Failed(_))
    }
}

/// Response body of a validation request.
///
/// Only built from a complete outcome list, so `valid_count` always matches
/// the outcomes it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    numbers: Vec<ValidationOutcome>,
    valid_count: usize,
}

impl BatchResult {
    pub fn from_outcomes(numbers: Vec<ValidationOutcome>) -> Self {
        let valid_count = numbers.iter().filter(|o| o.is_valid()).count();
        Self {
            numbers,
            valid_count,
        }
    }

    pub fn empty() -> Self {
        Self::from_outcomes(Vec::new())
    }

    pub fn numbers(&self) -> &[ValidationOutcome] {
        &self.numbers
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Outcomes that were parsed and classified, i.e. everything but errors.
    pub fn classified_count(&self) -> usize {
        self.numbers.iter().filter(|o| !o.is_error()).count()
    }

    pub fn error_count(&self) -> usize {
        self.numbers.len() - self.classified_count()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(is_valid: bool) -> Classification {
        Classification {
            country_code: "+254".to_string(),
            number_type: NumberType::Mobile,
            is_possible: true,
            is_valid,
        }
    }

    #[test]
    fn test_valid_count_ignores_invalid_and_errors() {
        let batch = BatchResult::from_outcomes(vec![
            ValidationOutcome::checked("+254712345678", classification(true)),
            ValidationOutcome::checked("+254000000000", classification(false)),
            ValidationOutcome::failed("garbage", "not a number"),
            ValidationOutcome::checked("+254712345679", classification(true)),
        ]);

        assert_eq!(batch.len(), 4);
        assert_eq!(batch.valid_count(), 2);
        assert_eq!(batch.classified_count(), 3);
        assert_eq!(batch.error_count(), 1);
    }

    #[test]
    fn test_failed_outcome_serializes_number_and_error_only() {
        let outcome = ValidationOutcome::failed("invalid123", "The string supplied did not seem to be a phone number");
        let value = serde_json::to_value(&outcome).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["number"], "invalid123");
        assert!(object.contains_key("error"));
    }

    #[test]
    fn test_checked_outcome_wire_shape() {
        let outcome = ValidationOutcome::checked("+254712345678", classification(true));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["country_code"], "+254");
        assert_eq!(value["type"], "mobile");
        assert_eq!(value["is_possible"], true);
        assert_eq!(value["is_valid"], true);
        assert!(value["validated_at"].is_string());
    }

    #[test]
    fn test_batch_result_deserializes_mixed_outcomes() {
        let body = serde_json::json!({
            "numbers": [
                {
                    "number": "+14155552671",
                    "country_code": "+1",
                    "type": "fixed_line_or_mobile",
                    "is_possible": true,
                    "is_valid": true,
                    "validated_at": "2024-01-01T00:00:00Z"
                },
                {"number": "invalid123", "error": "parse failure"}
            ],
            "valid_count": 1
        });

        let batch: BatchResult = serde_json::from_value(body).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.numbers()[0].is_valid());
        assert!(batch.numbers()[1].is_error());
        assert_eq!(batch.valid_count(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let batch = BatchResult::empty();
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value, serde_json::json!({"numbers": [], "valid_count": 0}));
    }
}
