//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Lenient field deserializers for duck-typed payloads."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Deserializers that accept whatever the backend happens to emit for a
//! numeric or boolean field: a JSON number, a numeric string, null, or a
//! missing key all land on the zero value. Non-finite numbers are treated
//! the same way.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value into an `f64`, defaulting to `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Coerce a JSON value into a `u32`, defaulting to `0`.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = coerce_f64(&value);
    if number <= 0.0 {
        return Ok(0);
    }
    Ok(number.min(u32::MAX as f64) as u32)
}

/// Coerce a JSON value into a `bool`, defaulting to `false`.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool(&value))
}

fn coerce_f64(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::f64_or_zero")]
        power: f64,
        #[serde(default, deserialize_with = "super::u32_or_zero")]
        units: u32,
        #[serde(default, deserialize_with = "super::bool_or_false")]
        online: bool,
    }

    #[test]
    fn numeric_strings_parse() {
        let probe: Probe =
            serde_json::from_str(r#"{"power": "123.5", "units": "7", "online": "true"}"#).unwrap();
        assert_eq!(probe.power, 123.5);
        assert_eq!(probe.units, 7);
        assert!(probe.online);
    }

    #[test]
    fn garbage_coerces_to_zero() {
        let probe: Probe =
            serde_json::from_str(r#"{"power": "n/a", "units": null, "online": []}"#).unwrap();
        assert_eq!(probe.power, 0.0);
        assert_eq!(probe.units, 0);
        assert!(!probe.online);
    }

    #[test]
    fn missing_fields_default() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.power, 0.0);
        assert_eq!(probe.units, 0);
        assert!(!probe.online);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let probe: Probe = serde_json::from_str(r#"{"units": -4}"#).unwrap();
        assert_eq!(probe.units, 0);
    }
}
