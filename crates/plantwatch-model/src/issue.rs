//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Soft shape problems reported at the payload boundary."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use thiserror::Error;

/// A payload shape problem that does not abort decoding.
///
/// Issues are collected while a snapshot is built and logged by the caller;
/// the snapshot itself always comes back fully defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    /// An expected field was absent from the payload.
    #[error("field '{0}' missing from payload, defaulted")]
    MissingField(&'static str),
    /// The history label and power arrays disagree in length.
    #[error("history arrays disagree in length ({labels} labels, {power} samples), truncated")]
    LengthMismatch {
        /// Number of timestamp labels received.
        labels: usize,
        /// Number of power samples received.
        power: usize,
    },
}
