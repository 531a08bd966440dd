//! ---
//! pw_section: "08-instrument-rendering"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Scanning-arc semicircular gauge drawing."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Draws one semicircular gauge. The arc occupies the bottom half of the
//! square: it starts at angle π (pointing left), sweeps through the bottom,
//! and ends at angle 0 (pointing right). Rasterization is a per-pixel scan
//! over the arc's bounding box testing ring distance and sweep angle, with
//! filled discs for the rounded caps.

use std::f64::consts::PI;

use crate::surface::{Rgba, Surface};

/// Arc stroke width in pixels.
pub const STROKE_WIDTH: f64 = 20.0;
/// Radius of the filled center dot.
const CENTER_DOT_RADIUS: f64 = 3.0;
/// Low-opacity neutral used for the full-range background arc.
const BACKGROUND: Rgba = Rgba::new(255, 255, 255, 26);

/// Render a gauge for `value` against `scale_max` onto `surface`.
///
/// The surface is cleared first, so identical inputs always produce
/// identical pixels. A value above `scale_max` saturates the sweep; the
/// scanning pass cannot paint outside the bottom semicircle, so no explicit
/// clamp is needed.
pub fn draw_gauge<S: Surface>(
    surface: &mut S,
    value: f64,
    scale_max: f64,
    color: Rgba,
    diameter: u32,
) {
    surface.clear();
    let size = diameter as f64;
    let center_x = size / 2.0;
    let center_y = size / 2.0;
    let radius = size * 0.38;

    stroke_bottom_arc(surface, center_x, center_y, radius, 1.0, BACKGROUND);

    let fraction = if scale_max > 0.0 {
        value / scale_max
    } else {
        0.0
    };
    if fraction > 0.0 {
        stroke_bottom_arc(surface, center_x, center_y, radius, fraction, color);
    }

    fill_disc(surface, center_x, center_y, CENTER_DOT_RADIUS, color);
}

/// Stroke the bottom semicircle from its left end through the bottom,
/// covering `coverage` of the sweep, with rounded caps at both ends.
fn stroke_bottom_arc<S: Surface>(
    surface: &mut S,
    center_x: f64,
    center_y: f64,
    radius: f64,
    coverage: f64,
    color: Rgba,
) {
    let coverage = coverage.clamp(0.0, 1.0);
    let half_stroke = STROKE_WIDTH / 2.0;
    let end_angle = PI * (1.0 - coverage);
    let start_cap = (center_x - radius, center_y);
    let end_cap = (
        center_x + radius * end_angle.cos(),
        center_y + radius * end_angle.sin(),
    );

    let min_x = (center_x - radius - half_stroke - 1.0).floor().max(0.0) as u32;
    let max_x = (center_x + radius + half_stroke + 1.0).ceil() as u32;
    let min_y = (center_y - half_stroke - 1.0).floor().max(0.0) as u32;
    let max_y = (center_y + radius + half_stroke + 1.0).ceil() as u32;

    for y in min_y..=max_y.min(surface.height().saturating_sub(1)) {
        for x in min_x..=max_x.min(surface.width().saturating_sub(1)) {
            let dx = x as f64 + 0.5 - center_x;
            let dy = y as f64 + 0.5 - center_y;
            let painted = on_arc_body(dx, dy, radius, half_stroke, coverage)
                || within_cap(x, y, start_cap, half_stroke)
                || within_cap(x, y, end_cap, half_stroke);
            if painted {
                surface.put(x, y, color);
            }
        }
    }
}

/// Ring-and-sweep membership test for the arc body. The sweep parameter
/// runs 0 at the left end, 1 at the right end, through the bottom.
fn on_arc_body(dx: f64, dy: f64, radius: f64, half_stroke: f64, coverage: f64) -> bool {
    if dy < 0.0 {
        return false;
    }
    let distance = (dx * dx + dy * dy).sqrt();
    if (distance - radius).abs() > half_stroke {
        return false;
    }
    let angle = dy.atan2(dx); // in [0, π] for the bottom half
    let sweep = (PI - angle) / PI;
    sweep <= coverage
}

fn within_cap(x: u32, y: u32, cap: (f64, f64), cap_radius: f64) -> bool {
    let dx = x as f64 + 0.5 - cap.0;
    let dy = y as f64 + 0.5 - cap.1;
    dx * dx + dy * dy <= cap_radius * cap_radius
}

fn fill_disc<S: Surface>(surface: &mut S, center_x: f64, center_y: f64, radius: f64, color: Rgba) {
    let min_x = (center_x - radius - 1.0).floor().max(0.0) as u32;
    let max_x = (center_x + radius + 1.0).ceil() as u32;
    let min_y = (center_y - radius - 1.0).floor().max(0.0) as u32;
    let max_y = (center_y + radius + 1.0).ceil() as u32;
    for y in min_y..=max_y.min(surface.height().saturating_sub(1)) {
        for x in min_x..=max_x.min(surface.width().saturating_sub(1)) {
            let dx = x as f64 + 0.5 - center_x;
            let dy = y as f64 + 0.5 - center_y;
            if dx * dx + dy * dy <= radius * radius {
                surface.put(x, y, color);
            }
        }
    }
}
