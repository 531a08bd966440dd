//! ---
//! pw_section: "08-instrument-rendering"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Pixel surfaces and the semicircular gauge renderer."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Drawing layer for the unit gauges. The renderer is a pure function of
//! (value, scale, color, size) onto an abstract [`Surface`]; the shipped
//! implementation is an RGBA [`PixelBuffer`] the terminal UI samples into
//! cells, but tests read it back pixel by pixel.

pub mod gauge;
pub mod surface;

pub use gauge::draw_gauge;
pub use surface::{PixelBuffer, Rgba, Surface};
