//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Power history series consumed by the chart mapper."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::issue::FieldIssue;
use crate::lenient;

/// One poll of `GET /api/plant/{id}/history`: parallel arrays of timestamp
/// labels and power samples (kW). A zero sample means "no telemetry for that
/// interval", not legitimate zero output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerHistory {
    #[serde(default)]
    pub labels: Vec<String>,
    /// Power samples in kilowatts, same length as `labels`.
    #[serde(rename = "power", default, deserialize_with = "lenient_samples")]
    pub power_kw: Vec<f64>,
}

fn lenient_samples<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| {
            serde_json::from_value::<LenientSample>(value)
                .map(|sample| sample.0)
                .unwrap_or(0.0)
        })
        .collect())
}

struct LenientSample(f64);

impl<'de> Deserialize<'de> for LenientSample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        lenient::f64_or_zero(deserializer).map(LenientSample)
    }
}

impl PowerHistory {
    /// Decode a history payload; mismatched array lengths are truncated to
    /// the shorter side and reported as a soft issue.
    pub fn from_value(value: Value) -> Result<(Self, Vec<FieldIssue>), serde_json::Error> {
        let mut history: PowerHistory = serde_json::from_value(value)?;
        let mut issues = Vec::new();
        if history.labels.len() != history.power_kw.len() {
            issues.push(FieldIssue::LengthMismatch {
                labels: history.labels.len(),
                power: history.power_kw.len(),
            });
            let len = history.labels.len().min(history.power_kw.len());
            history.labels.truncate(len);
            history.power_kw.truncate(len);
        }
        Ok((history, issues))
    }

    /// Number of samples after normalization.
    pub fn len(&self) -> usize {
        self.power_kw.len()
    }

    /// True when the series carries no samples.
    pub fn is_empty(&self) -> bool {
        self.power_kw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parallel_arrays_decode() {
        let payload = json!({"labels": ["10:00", "10:15"], "power": [100.0, 0]});
        let (history, issues) = PowerHistory::from_value(payload).unwrap();
        assert!(issues.is_empty());
        assert_eq!(history.len(), 2);
        assert_eq!(history.power_kw, vec![100.0, 0.0]);
    }

    #[test]
    fn length_mismatch_truncates() {
        let payload = json!({"labels": ["10:00", "10:15", "10:30"], "power": [5.0]});
        let (history, issues) = PowerHistory::from_value(payload).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.labels, vec!["10:00"]);
        assert_eq!(
            issues,
            vec![FieldIssue::LengthMismatch {
                labels: 3,
                power: 1
            }]
        );
    }

    #[test]
    fn junk_samples_coerce_to_zero() {
        let payload = json!({"labels": ["a", "b"], "power": ["12.5", null]});
        let (history, _) = PowerHistory::from_value(payload).unwrap();
        assert_eq!(history.power_kw, vec![12.5, 0.0]);
    }
}
