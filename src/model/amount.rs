use std::fmt::{Debug, Display};

use crate::model::chain::Chain;

/// Integer amount in the smallest unit of an asset (wei for ETH).
pub type TokenAmount = u128;

/// How many decimal places are used for the native asset of every supported chain.
///
/// 1 ETH = 10.pow(ETH_DECIMAL_PLACES) wei
pub const ETH_DECIMAL_PLACES: u8 = 18;

/// Unit name shown next to native asset amounts.
pub const ETH_UNIT_NAME: &str = "ETH";

/// Reasons a user-entered amount cannot be turned into an [Amount].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount: cannot be empty")]
    Empty,
    #[error("Invalid amount: must not be negative")]
    Negative,
    #[error("Invalid amount: {0}")]
    NotANumber(String),
    #[error("Amount too large")]
    Overflow,
}

/// Represents an amount of some asset, with optional unit name and decimal places.
///
/// The value is always stored as an integer in the smallest unit of the asset
/// (e.g. wei for ETH). Parsing and formatting never go through floating point,
/// so what the user typed is exactly what ends up in a transaction.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Amount {
    value: TokenAmount,
    decimal_places: u8,
    unit_name: Option<String>,
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.value.cmp(&other.value))
    }
}

impl PartialEq<TokenAmount> for Amount {
    fn eq(&self, other: &TokenAmount) -> bool {
        self.value == *other
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount_str = self.to_string_without_unit();

        match &self.unit_name {
            Some(unit) => write!(f, "{} {}", amount_str, unit),
            None => write!(f, "{}", amount_str),
        }
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Amount")
            .field("value", &self.value)
            .field("decimal_places", &self.decimal_places)
            .field("unit_name", &self.unit_name)
            .field("formatted", &self.to_string_without_unit())
            .finish()
    }
}

impl Amount {
    pub const fn new(value: TokenAmount, decimal_places: u8) -> Self {
        Self {
            value,
            decimal_places,
            unit_name: None,
        }
    }

    pub fn new_with_unit(value: TokenAmount, decimal_places: u8, unit_name: &str) -> Self {
        Self {
            value,
            decimal_places,
            unit_name: Some(unit_name.to_string()),
        }
    }

    /// Creates an ETH amount from a value in wei.
    pub fn eth(wei: TokenAmount) -> Self {
        Self::new_with_unit(wei, ETH_DECIMAL_PLACES, ETH_UNIT_NAME)
    }

    /// Creates an amount of `chain`'s native asset from its smallest unit.
    pub fn native(value: TokenAmount, chain: Chain) -> Self {
        Self::new_with_unit(value, ETH_DECIMAL_PLACES, chain.native_symbol())
    }

    /// Parses a plain decimal string such as `"0.5"` into an amount with the given
    /// precision.
    ///
    /// The result is `round(input * 10^decimal_places)`: fractional digits beyond the
    /// precision are rounded half-up. Anything besides the number is rejected.
    pub fn parse_with_decimals(input: &str, decimal_places: u8) -> Result<Self, AmountError> {
        let numeric_part = split_unit(input, None)?;
        let value = parse_numeric_part(numeric_part, decimal_places)?;
        Ok(Self::new(value, decimal_places))
    }

    /// Like [Amount::parse_with_decimals], but also accepts `unit_name` (in any case)
    /// after the number, as in `"1.25 ETH"`. The result always carries `unit_name`.
    pub fn parse_with_unit(
        input: &str,
        decimal_places: u8,
        unit_name: &str,
    ) -> Result<Self, AmountError> {
        let numeric_part = split_unit(input, Some(unit_name))?;
        let value = parse_numeric_part(numeric_part, decimal_places)?;
        Ok(Self::new_with_unit(value, decimal_places, unit_name))
    }

    /// Formats a smallest-unit integer as a decimal string, trimming trailing zeros.
    pub fn format_amount(amount: TokenAmount, decimal_places: u8) -> String {
        let Some(divisor) = pow10(decimal_places) else {
            return amount.to_string();
        };
        if divisor == 1 {
            return amount.to_string();
        }

        let whole = amount / divisor;
        let fraction = amount % divisor;

        if fraction == 0 {
            whole.to_string()
        } else {
            let fraction_str = format!("{:0width$}", fraction, width = decimal_places as usize);
            let trimmed = fraction_str.trim_end_matches('0');
            format!("{}.{}", whole, trimmed)
        }
    }

    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    /// Returns the value in the smallest unit.
    pub fn value(&self) -> TokenAmount {
        self.value
    }

    pub fn unit_name(&self) -> Option<&str> {
        self.unit_name.as_deref()
    }

    pub fn with_unit_name(mut self, unit_name: &str) -> Self {
        self.unit_name = Some(unit_name.to_string());
        self
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Numeric string without the unit name, for text inputs.
    pub fn to_string_without_unit(&self) -> String {
        Self::format_amount(self.value, self.decimal_places)
    }
}

fn pow10(decimal_places: u8) -> Option<TokenAmount> {
    (10 as TokenAmount).checked_pow(decimal_places as u32)
}

/// Returns the numeric part of `input`. The only other token allowed is
/// `expected_unit`, after whitespace.
fn split_unit<'a>(input: &'a str, expected_unit: Option<&str>) -> Result<&'a str, AmountError> {
    let mut parts = input.split_whitespace();
    let Some(numeric_part) = parts.next() else {
        return Err(AmountError::Empty);
    };
    match (parts.next(), parts.next()) {
        (None, _) => Ok(numeric_part),
        (Some(unit), None)
            if expected_unit.is_some_and(|expected| unit.eq_ignore_ascii_case(expected)) =>
        {
            Ok(numeric_part)
        }
        _ => Err(AmountError::NotANumber(
            "must be a single decimal number".to_string(),
        )),
    }
}

fn not_a_number() -> AmountError {
    AmountError::NotANumber("must be a decimal number".to_string())
}

fn parse_digits(digits: &str) -> Result<TokenAmount, AmountError> {
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_a_number());
    }
    digits.bytes().try_fold(0 as TokenAmount, |acc, byte| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add((byte - b'0') as TokenAmount))
            .ok_or(AmountError::Overflow)
    })
}

fn parse_numeric_part(numeric_part: &str, decimal_places: u8) -> Result<TokenAmount, AmountError> {
    if numeric_part.starts_with('-') {
        return Err(AmountError::Negative);
    }
    let unsigned = numeric_part.strip_prefix('+').unwrap_or(numeric_part);
    let multiplier = pow10(decimal_places).ok_or(AmountError::Overflow)?;

    let (whole_str, fraction_str) = match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.contains('.') {
                return Err(AmountError::NotANumber(
                    "too many decimal points".to_string(),
                ));
            }
            (whole, fraction)
        }
        None => (unsigned, ""),
    };
    if whole_str.is_empty() && fraction_str.is_empty() {
        return Err(not_a_number());
    }

    let whole = if whole_str.is_empty() {
        0
    } else {
        parse_digits(whole_str)?
    };

    let precision = decimal_places as usize;
    let (kept, dropped) = if fraction_str.len() > precision {
        fraction_str.split_at(precision)
    } else {
        (fraction_str, "")
    };
    // every dropped digit must be valid, not only the one deciding the rounding
    if !dropped.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_a_number());
    }
    let round_up = dropped.bytes().next().is_some_and(|digit| digit >= b'5');

    let padded_fraction = format!("{:0<width$}", kept, width = precision);
    let fraction = if padded_fraction.is_empty() {
        0
    } else {
        parse_digits(&padded_fraction)?
    };

    whole
        .checked_mul(multiplier)
        .and_then(|value| value.checked_add(fraction))
        .and_then(|value| value.checked_add(round_up as TokenAmount))
        .ok_or(AmountError::Overflow)
}
