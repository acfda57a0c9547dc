use serde::Serialize;

use crate::timer::TimerEngine;

/// Progress circle radius used by the stock render layer.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 45.0;

/// SVG stroke geometry for the progress ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressGeometry {
    /// 0.0 at start, approaches 1.0 near completion.
    pub fraction_complete: f64,
    pub circumference: f64,
    pub stroke_dash_offset: f64,
}

impl ProgressGeometry {
    pub fn compute(engine: &TimerEngine, circle_radius: f64) -> Self {
        // Engine invariants keep precise within [0, initial]; the clamp only
        // shields against float noise at the edges.
        let fraction_complete =
            (1.0 - engine.precise_remaining_secs() / engine.initial_secs()).clamp(0.0, 1.0);
        let circumference = 2.0 * std::f64::consts::PI * circle_radius;
        Self {
            fraction_complete,
            circumference,
            stroke_dash_offset: -circumference * fraction_complete,
        }
    }
}
