//! Shared value formatting helpers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serializer;

/// Serialize a decimal as a JSON integer when it has no fractional part,
/// and as a float otherwise. Prices and ratings render as `100` rather
/// than `"100.00"` and as `4.5` rather than `"4.50"`.
pub fn serialize_decimal_trimmed<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        serializer.serialize_i64(normalized.to_i64().unwrap_or(0))
    } else {
        serializer.serialize_f64(normalized.to_f64().unwrap_or(0.0))
    }
}

/// Round a float to one decimal place (dashboard average rating).
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
