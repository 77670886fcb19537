use crate::utils::error::{NumcheckError, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;

/// Dialing prefixes the generator knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCode {
    Kenya,
    Uganda,
    Tanzania,
    Nigeria,
    SouthAfrica,
    Ghana,
    Egypt,
}

impl CountryCode {
    pub const ALL: [CountryCode; 7] = [
        CountryCode::Kenya,
        CountryCode::Uganda,
        CountryCode::Tanzania,
        CountryCode::Nigeria,
        CountryCode::SouthAfrica,
        CountryCode::Ghana,
        CountryCode::Egypt,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            CountryCode::Kenya => "+254",
            CountryCode::Uganda => "+256",
            CountryCode::Tanzania => "+255",
            CountryCode::Nigeria => "+234",
            CountryCode::SouthAfrica => "+27",
            CountryCode::Ghana => "+233",
            CountryCode::Egypt => "+20",
        }
    }

    /// Digits following the prefix.
    pub fn local_length(&self) -> usize {
        match self {
            CountryCode::Nigeria | CountryCode::Egypt => 10,
            _ => 9,
        }
    }

    pub fn country_name(&self) -> &'static str {
        match self {
            CountryCode::Kenya => "Kenya",
            CountryCode::Uganda => "Uganda",
            CountryCode::Tanzania => "Tanzania",
            CountryCode::Nigeria => "Nigeria",
            CountryCode::SouthAfrica => "South Africa",
            CountryCode::Ghana => "Ghana",
            CountryCode::Egypt => "Egypt",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for CountryCode {
    type Err = NumcheckError;

    fn from_str(s: &str) -> Result<Self> {
        // 表單中的 "+" 可能被解碼成空白
        let digits = s.trim().trim_start_matches('+');
        CountryCode::ALL
            .iter()
            .copied()
            .find(|code| &code.prefix()[1..] == digits)
            .ok_or_else(|| NumcheckError::UnsupportedCountryCode {
                code: s.trim().to_string(),
            })
    }
}

pub fn check_quantity(quantity: u32) -> Result<()> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(NumcheckError::QuantityOutOfRange {
            value: quantity,
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Produces `quantity` candidates in generation order. Duplicates are allowed.
pub fn synthesize<R: Rng + ?Sized>(quantity: u32, country: CountryCode, rng: &mut R) -> Vec<String> {
    let width = country.local_length();
    let upper = 10u64.pow(width as u32);

    (0..quantity)
        .map(|_| {
            let local = rng.random_range(0..upper);
            format!("{}{:0width$}", country.prefix(), local, width = width)
        })
        .collect()
}
