use crate::error::ExtractError;

const CURRENCY_SUFFIX: &str = "грн";

/// Parses a work.ua salary label such as `50 000 грн*` (with non-breaking spaces) into
/// whole hryvnias.
pub fn parse_salary(field: &'static str, raw: &str) -> Result<i64, ExtractError> {
    let cleaned: String = raw
        .replace(CURRENCY_SUFFIX, "")
        .chars()
        .filter(|c| !matches!(c, '\u{a0}' | '\u{202f}' | '*'))
        .collect();
    let cleaned = cleaned.trim();

    cleaned
        .parse::<i64>()
        .map_err(|e| ExtractError::malformed(field, format!("`{}`: {}", raw, e)))
}
