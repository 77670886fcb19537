use crate::core::{Classification, NumberType, PhoneClassifier};
use phonenumber::metadata::DATABASE;
use phonenumber::{Mode, PhoneNumber};

/// Classifier backed by the `phonenumber` crate (libphonenumber metadata).
///
/// No default region is supplied, so only numbers carrying a `+` international
/// prefix can be parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibPhoneNumberClassifier;

impl LibPhoneNumberClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl PhoneClassifier for LibPhoneNumberClassifier {
    fn classify(&self, raw: &str) -> Result<Classification, String> {
        let number = phonenumber::parse(None, raw).map_err(|e| e.to_string())?;

        Ok(Classification {
            country_code: format!("+{}", number.code().value()),
            number_type: map_type(number.number_type(&DATABASE)),
            is_possible: is_possible(&number),
            is_valid: number.is_valid(),
        })
    }
}

fn map_type(kind: phonenumber::Type) -> NumberType {
    use phonenumber::Type;

    match kind {
        Type::FixedLine => NumberType::FixedLine,
        Type::Mobile => NumberType::Mobile,
        Type::FixedLineOrMobile => NumberType::FixedLineOrMobile,
        Type::TollFree => NumberType::TollFree,
        Type::PremiumRate => NumberType::PremiumRate,
        Type::SharedCost => NumberType::SharedCost,
        Type::PersonalNumber => NumberType::PersonalNumber,
        Type::Voip => NumberType::Voip,
        Type::Pager => NumberType::Pager,
        Type::Uan => NumberType::Uan,
        Type::Voicemail => NumberType::Voicemail,
        _ => NumberType::Unknown,
    }
}

/// Length-only check against the region's general possible lengths.
fn is_possible(number: &PhoneNumber) -> bool {
    let e164 = number.format().mode(Mode::E164).to_string();
    let code_len = number.code().value().to_string().len();
    let national_len = e164.trim_start_matches('+').len().saturating_sub(code_len);

    match number.metadata(&DATABASE) {
        Some(metadata) => {
            let lengths = metadata.descriptors().general().possible_length();
            lengths.is_empty() || lengths.iter().any(|&len| len as usize == national_len)
        }
        None => false,
    }
}
