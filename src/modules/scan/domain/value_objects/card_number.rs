use serde::{Deserialize, Serialize};

/// A card number in canonical, comparable form.
///
/// Printed card numbers come in many shapes ("025/165", "25", "TG05/TG30",
/// "SV001") and the vision model reproduces whichever one it saw. Comparing
/// them raw makes "025/165" and "25/165" different cards, so every number is
/// parsed into this value object once and compared through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCardNumber {
    /// Collector number with leading zeros stripped when purely numeric;
    /// alphanumeric tokens ("TG05") are preserved verbatim.
    pub number: String,
    /// Set total from a "number/total" print, kept verbatim.
    pub total: Option<String>,
    /// Canonical rendering: `number` or `number/total`.
    pub full: String,
    /// The trimmed raw input, kept for traceability.
    pub original: String,
    pub has_total: bool,
}

impl NormalizedCardNumber {
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }
}

pub struct CardNumber;

impl CardNumber {
    /// Parse an arbitrary card-number string into comparable form.
    ///
    /// Never fails: any input produces a result, the empty string included.
    /// Strings with more than one `/` fall through to the no-total branch
    /// and are kept verbatim.
    pub fn normalize(raw: &str) -> NormalizedCardNumber {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return NormalizedCardNumber {
                number: String::new(),
                total: None,
                full: String::new(),
                original: String::new(),
                has_total: false,
            };
        }

        let slash_count = trimmed.matches('/').count();

        if slash_count == 1 {
            let (number_part, total_part) = trimmed.split_once('/').unwrap_or((trimmed, ""));
            let number = Self::normalize_token(number_part);
            return NormalizedCardNumber {
                full: format!("{}/{}", number, total_part),
                number,
                total: Some(total_part.to_string()),
                original: trimmed.to_string(),
                has_total: true,
            };
        }

        let number = Self::normalize_token(trimmed);
        NormalizedCardNumber {
            full: number.clone(),
            number,
            total: None,
            original: trimmed.to_string(),
            has_total: false,
        }
    }

    /// Strip leading zeros from purely numeric tokens, keeping at least one
    /// digit ("000" -> "0"). Tokens containing anything but ASCII digits are
    /// returned unchanged.
    fn normalize_token(token: &str) -> String {
        let is_pure_numeric =
            !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());

        if !is_pure_numeric {
            return token.to_string();
        }

        let stripped = token.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    }
}
