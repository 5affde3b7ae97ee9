//! Phone number normalization and locale-scoped mobile validation.
//!
//! Normalization never fails: any input is reduced to `+<digits>` with the
//! default country digits forced in front. Whether the result is a usable
//! mobile number is a separate, locale-specific question answered by
//! [`is_valid`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

static GERMAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+491[5-7]\d{8,9}$").expect("valid DE mobile pattern"));

static AUSTRIAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+436[5-9]\d{4,10}$").expect("valid AT mobile pattern"));

static SWISS_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+417[5-9]\d{7}$").expect("valid CH mobile pattern"));

/// Locale that scopes mobile number validation and supplies the default country code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneLocale {
    #[default]
    De,
    At,
    Ch,
}

impl PhoneLocale {
    /// Country calling code digits, without the leading `+`
    pub fn country_digits(&self) -> &'static str {
        match self {
            PhoneLocale::De => "49",
            PhoneLocale::At => "43",
            PhoneLocale::Ch => "41",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneLocale::De => "de",
            PhoneLocale::At => "at",
            PhoneLocale::Ch => "ch",
        }
    }

    fn mobile_pattern(&self) -> &'static Regex {
        match self {
            PhoneLocale::De => &GERMAN_MOBILE,
            PhoneLocale::At => &AUSTRIAN_MOBILE,
            PhoneLocale::Ch => &SWISS_MOBILE,
        }
    }
}

impl FromStr for PhoneLocale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "de" => Ok(PhoneLocale::De),
            "at" => Ok(PhoneLocale::At),
            "ch" => Ok(PhoneLocale::Ch),
            _ => Err(AppError::validation(
                "locale",
                format!("Unsupported phone locale '{}'. Valid values are: de, at, ch", s),
            )),
        }
    }
}

impl fmt::Display for PhoneLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce raw input to the canonical `+<countrycode><digits>` form.
///
/// Every non-digit is dropped (including `+`), one leading zero is removed and
/// `default_country_digits` is prepended unless the digits already start with it.
/// A number carrying a different country code is re-prefixed as well, so
/// `+551771912228` becomes `+49551771912228` and later fails validation.
pub fn normalize(raw: &str, default_country_digits: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix('0').unwrap_or(&digits);

    if digits.starts_with(default_country_digits) {
        format!("+{}", digits)
    } else {
        format!("+{}{}", default_country_digits, digits)
    }
}

/// Whether an already normalized number is a valid mobile number for `locale`
pub fn is_valid(normalized: &str, locale: PhoneLocale) -> bool {
    locale.mobile_pattern().is_match(normalized)
}

/// Normalized phone number together with the locale it was normalized for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    normalized: String,
    locale: PhoneLocale,
}

impl PhoneNumber {
    /// Normalize `raw` using the locale's country digits
    pub fn parse(raw: &str, locale: PhoneLocale) -> Self {
        Self {
            normalized: normalize(raw, locale.country_digits()),
            locale,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn locale(&self) -> PhoneLocale {
        self.locale
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.normalized, self.locale)
    }

    /// Check validity against another locale than the one used for normalization
    pub fn is_valid_for(&self, locale: PhoneLocale) -> bool {
        is_valid(&self.normalized, locale)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Normalizes and, unless switched off, validates numbers for one locale.
///
/// Shared by every channel that needs a mobile number (SMS sender, call service).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneValidator {
    locale: PhoneLocale,
    validate: bool,
}

impl PhoneValidator {
    pub fn new(locale: PhoneLocale, validate: bool) -> Self {
        Self { locale, validate }
    }

    pub fn locale(&self) -> PhoneLocale {
        self.locale
    }

    pub fn normalize(&self, raw: &str) -> PhoneNumber {
        PhoneNumber::parse(raw, self.locale)
    }

    /// Normalize `raw` and reject it when it is not a valid mobile number.
    ///
    /// `validate` overrides the validator default for this call only; when
    /// validation is off any normalized string is accepted.
    pub fn mobile(&self, raw: &str, validate: Option<bool>) -> AppResult<PhoneNumber> {
        let number = self.normalize(raw);
        if validate.unwrap_or(self.validate) && !number.is_valid() {
            return Err(AppError::validation(
                "phone_number",
                format!(
                    "'{}' is not a valid {} mobile number",
                    number,
                    self.locale.as_str().to_uppercase()
                ),
            ));
        }
        Ok(number)
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::new(PhoneLocale::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalization_table() {
        let cases = [
            ("+491771912227", "+491771912227"),
            ("491771912227", "+491771912227"),
            ("1771912227", "+491771912227"),
            ("+0491771912227", "+491771912227"),
            ("0491771912227", "+491771912227"),
            ("+(49) 177.1^9-122?27", "+491771912227"),
            ("+551771912228", "+49551771912228"),
        ];

        for (raw, expected) in cases {
            assert_eq!(normalize(raw, "49"), expected, "input {}", raw);
        }
    }

    #[test]
    fn test_national_format_with_trunk_zero() {
        assert_eq!(normalize("0177 1912227", "49"), "+491771912227");
    }

    #[test]
    fn test_foreign_number_is_reprefixed_and_invalid() {
        let number = PhoneNumber::parse("+551771912228", PhoneLocale::De);
        assert_eq!(number.as_str(), "+49551771912228");
        assert!(!number.is_valid());
    }

    #[test]
    fn test_validation_is_locale_scoped() {
        let austrian = PhoneNumber::parse("0664 1234567", PhoneLocale::At);
        assert_eq!(austrian.as_str(), "+436641234567");
        assert!(austrian.is_valid());
        assert!(!austrian.is_valid_for(PhoneLocale::De));

        let german = PhoneNumber::parse("01771912227", PhoneLocale::De);
        assert!(german.is_valid());
        assert!(!german.is_valid_for(PhoneLocale::At));
        assert!(!german.is_valid_for(PhoneLocale::Ch));
    }

    #[test]
    fn test_swiss_mobile() {
        let swiss = PhoneNumber::parse("079 123 45 67", PhoneLocale::Ch);
        assert_eq!(swiss.as_str(), "+41791234567");
        assert!(swiss.is_valid());
    }

    #[test]
    fn test_landline_is_not_a_mobile() {
        assert!(!is_valid(&normalize("030 1234567", "49"), PhoneLocale::De));
    }

    #[test]
    fn test_validator_rejects_invalid_number() {
        let validator = PhoneValidator::new(PhoneLocale::De, true);
        let error = validator.mobile("+551771912228", None).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_validator_toggle_per_call() {
        let validator = PhoneValidator::new(PhoneLocale::De, true);
        let number = validator
            .mobile("+551771912228", Some(false))
            .expect("validation disabled for this call");
        assert_eq!(number.as_str(), "+49551771912228");

        let lenient = PhoneValidator::new(PhoneLocale::De, false);
        assert!(lenient.mobile("12", None).is_ok());
        assert!(lenient.mobile("12", Some(true)).is_err());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("DE".parse::<PhoneLocale>().unwrap(), PhoneLocale::De);
        assert_eq!("at".parse::<PhoneLocale>().unwrap(), PhoneLocale::At);
        assert!("fr".parse::<PhoneLocale>().is_err());
    }

    proptest! {
        #[test]
        fn property_normalize_is_idempotent(raw in "[+0-9 ()./-]{0,20}") {
            let once = normalize(&raw, "49");
            prop_assert_eq!(normalize(&once, "49"), once);
        }

        #[test]
        fn property_output_is_plus_and_digits(raw in ".{0,30}") {
            let normalized = normalize(&raw, "43");
            prop_assert!(normalized.starts_with("+43"));
            prop_assert!(normalized[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
