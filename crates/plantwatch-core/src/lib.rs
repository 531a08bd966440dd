//! ---
//! pw_section: "01-core-functionality"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Client-side reconciliation and render-model engine."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! The PlantWatch core: everything between a decoded backend snapshot and a
//! rendering surface. Classification, gauge scaling, stat formatting, the
//! reload-vs-patch reconciler, and the chart mapper are pure and testable
//! without any terminal or network in sight; rendering happens through the
//! sink traits in [`view`].

pub mod anim;
pub mod chart;
pub mod gauge;
pub mod reconcile;
pub mod stats;
pub mod status;
pub mod view;

pub use anim::CountUp;
pub use chart::{ChartConfig, ChartPoint, PointStyle, SegmentStyle};
pub use gauge::{GaugeInstrument, GaugeKind};
pub use reconcile::{Action, Reconciler, RELOAD_DELAY};
pub use status::UnitStatus;
pub use view::{FleetSink, FleetViewState, LiveIndicator, PlantSink, PlantViewState};
