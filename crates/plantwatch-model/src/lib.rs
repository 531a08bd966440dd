//! ---
//! pw_section: "02-data-model"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Typed snapshots of the backend payloads."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Wire schema for the three read-only PlantWatch endpoints.
//!
//! Everything the backend sends is decoded into a fully-defaulted snapshot:
//! absent, null, or malformed fields coerce to zero/false/empty instead of
//! failing the poll, and the shape problems worth surfacing come back as
//! [`FieldIssue`]s so the caller can log them in one place.

pub mod fleet;
pub mod history;
pub mod issue;
pub mod lenient;
pub mod plant;

pub use fleet::{FleetSnapshot, PlantSummary};
pub use history::PowerHistory;
pub use issue::FieldIssue;
pub use plant::{PlantSnapshot, UnitReading};
