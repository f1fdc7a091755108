//! Directional bias between matched actual and predicted crowns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Strict-sign quadrant of an offset; offsets on either axis have none.
    pub fn of(dx: f64, dy: f64) -> Option<Self> {
        match (dx, dy) {
            (x, y) if x > 0.0 && y > 0.0 => Some(Quadrant::First),
            (x, y) if x < 0.0 && y > 0.0 => Some(Quadrant::Second),
            (x, y) if x < 0.0 && y < 0.0 => Some(Quadrant::Third),
            (x, y) if x > 0.0 && y < 0.0 => Some(Quadrant::Fourth),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Quadrant::First => 0,
            Quadrant::Second => 1,
            Quadrant::Third => 2,
            Quadrant::Fourth => 3,
        }
    }
}

/// Summary of the `predicted - actual` offsets over all matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasSummary {
    /// Counts for quadrants 1 to 4.
    pub quadrants: [usize; 4],
    /// Offsets with a zero x or y component.
    pub on_axis: usize,
    pub sum_dx: f64,
    pub sum_dy: f64,
    /// Bearing of the summed offset in degrees, clockwise from +y towards +x.
    /// `None` when the summed offset is zero.
    pub resultant_angle: Option<f64>,
    pub resultant_magnitude: f64,
}

/// Builds the bias summary, `None` when there are no offsets.
pub fn summarize(offsets: impl IntoIterator<Item = (f64, f64)>) -> Option<BiasSummary> {
    let mut quadrants = [0usize; 4];
    let mut on_axis = 0;
    let (mut sum_dx, mut sum_dy) = (0.0f64, 0.0f64);
    let mut count = 0usize;

    for (dx, dy) in offsets {
        match Quadrant::of(dx, dy) {
            Some(q) => quadrants[q.index()] += 1,
            None => on_axis += 1,
        }
        sum_dx += dx;
        sum_dy += dy;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let resultant_angle = if sum_dx == 0.0 && sum_dy == 0.0 {
        None
    } else {
        Some(sum_dx.atan2(sum_dy).to_degrees())
    };

    Some(BiasSummary {
        quadrants,
        on_axis,
        sum_dx,
        sum_dy,
        resultant_angle,
        resultant_magnitude: sum_dx.hypot(sum_dy),
    })
}
