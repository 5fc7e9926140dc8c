//! Canonicalization of literal values.
//!
//! Distinct lexical representations of the same value converge on one
//! canonical form per datatype, which makes literal deduplication by
//! content hash deterministic. Canonicalization is pure: the result depends
//! only on the arguments, and canonical forms are fixed points.

use url::Url;

use crate::error::{WeftError, WeftResult};
use crate::xsd;

/// Canonicalize `value` according to `datatype`.
///
/// Unrecognized datatypes pass through unchanged, preserving arbitrary
/// extension datatypes. Recognized datatypes with values outside their
/// lexical space fail with [`WeftError::MalformedValue`].
pub fn canonicalize(value: &str, datatype: &str) -> WeftResult<String> {
    match datatype {
        xsd::DECIMAL => normalize_decimal(value),
        xsd::INTEGER => normalize_integer(value),
        xsd::BOOLEAN => normalize_boolean(value),
        xsd::ANY_URI => Ok(normalize_iri(value)),
        _ => Ok(value.to_owned()),
    }
}

/// Split an optional leading sign off a trimmed numeric lexical form.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Canonical form of an xsd:decimal value.
///
/// Leading zeros and a redundant plus sign are stripped, the fraction keeps
/// at least one digit (`"1"` becomes `"1.0"`) but loses trailing zeros, and
/// negative zero collapses to `"0.0"`. Arbitrary precision; exponent
/// notation is outside the xsd:decimal lexical space.
fn normalize_decimal(val: &str) -> WeftResult<String> {
    let (negative, digits) = split_sign(val.trim());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    let well_formed = (!int_part.is_empty() || !frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(WeftError::malformed_value(xsd::DECIMAL, val));
    }
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        stripped => stripped,
    };
    let frac_part = match frac_part.trim_end_matches('0') {
        "" => "0",
        stripped => stripped,
    };
    if int_part == "0" && frac_part == "0" {
        return Ok("0.0".to_owned());
    }
    let sign = if negative { "-" } else { "" };
    Ok(format!("{sign}{int_part}.{frac_part}"))
}

/// Canonical form of an xsd:integer value.
///
/// Arbitrary precision: the digit string is normalized without ever being
/// parsed into a machine word.
fn normalize_integer(val: &str) -> WeftResult<String> {
    let (negative, digits) = split_sign(val.trim());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WeftError::malformed_value(xsd::INTEGER, val));
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok("0".to_owned());
    }
    let sign = if negative { "-" } else { "" };
    Ok(format!("{sign}{digits}"))
}

/// Canonical form of an xsd:boolean value.
fn normalize_boolean(val: &str) -> WeftResult<String> {
    match val.trim() {
        "0" | "false" => Ok("false".to_owned()),
        "1" | "true" => Ok("true".to_owned()),
        _ => Err(WeftError::malformed_value(xsd::BOOLEAN, val)),
    }
}

/// Canonical form of an xsd:anyURI value.
///
/// Absolute URLs are normalized (lowercased scheme and host, default port
/// dropped, path segments resolved). Values that do not parse as absolute
/// URLs — relative IRIs are legal anyURI lexical forms — pass through
/// unchanged.
fn normalize_iri(val: &str) -> String {
    match Url::parse(val) {
        Ok(url) => url.to_string(),
        Err(_) => val.to_owned(),
    }
}
