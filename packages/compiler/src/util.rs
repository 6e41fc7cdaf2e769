//! Utility Functions
//!
//! Name-case conversions and small string helpers shared by the compiler.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for dash-case to camelCase conversion
static DASH_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+([a-z0-9])").unwrap());

/// Regex for camelCase to kebab-case conversion
static CAMEL_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Convert dash-case to camelCase
pub fn dash_case_to_camel_case(input: &str) -> String {
    DASH_CASE_REGEXP
        .replace_all(input, |caps: &regex::Captures| caps[1].to_uppercase())
        .to_string()
}

/// Convert camelCase to kebab-case
pub fn camel_case_to_kebab_case(input: &str) -> String {
    CAMEL_CASE_REGEXP
        .replace_all(input, "$1-$2")
        .to_lowercase()
}

/// Split an attribute name on its last period into `(target, command)`.
///
/// `value.bind` gives `("value", Some("bind"))`, `foo.bar.bind` gives
/// `("foo.bar", Some("bind"))` and `class` gives `("class", None)`.
pub fn split_at_last_period(input: &str) -> (&str, Option<&str>) {
    match input.rfind('.') {
        Some(index) => (&input[..index], Some(&input[index + 1..])),
        None => (input, None),
    }
}

/// Whether a `${` interpolation start occurs anywhere in `input`
pub fn has_interpolation(input: &str) -> bool {
    input.contains("${")
}
