//! # chartkit
//!
//! Core chart primitives: scales and SVG path builders.
//! Implements Strategy pattern for flexible scale behaviors.

use std::fmt::Write;

use spark_state::TimeAxis;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for continuous scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale for sparkline values
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Domain widened by `ratio` of its extent on both sides (1.0 when flat)
    pub fn padded_domain(self, min: f64, max: f64, ratio: f64) -> Self {
        let extent = max - min;
        let padding = if extent > 0.0 { extent * ratio } else { 1.0 };
        self.domain(min - padding, max + padding)
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Round-number ticks inside the domain
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let extent = max - min;

        if extent <= 0.0 || count == 0 {
            return vec![min];
        }

        let rough_step = extent / count as f64;
        let magnitude = 10.0_f64.powf(rough_step.log10().floor());
        let residual = rough_step / magnitude;

        let step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        r_min + (value - d_min) / (d_max - d_min) * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        d_min + (value - r_min) / (r_max - r_min) * (d_max - d_min)
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

/// Time scale (unix millis to pixel positions)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (i64, i64) {
        self.domain
    }

    /// Timestamp to pixel position
    pub fn scale(&self, timestamp: i64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (timestamp as f64 - d_min as f64) / (d_max as f64 - d_min as f64);
        r_min + normalized * (r_max - r_min)
    }

    /// Pixel position to timestamp (unclamped)
    pub fn invert(&self, value: f64) -> i64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return ((i128::from(d_min) + i128::from(d_max)) / 2) as i64;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max as f64 - d_min as f64)).round() as i64
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeAxis for TimeScale {
    fn invert(&self, px: f64) -> i64 {
        TimeScale::invert(self, px)
    }

    fn position(&self, timestamp_ms: i64) -> f64 {
        self.scale(timestamp_ms)
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Open polyline through `points`
pub fn line_path(points: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |b, &(x, y)| b.line_to(x, y))
        .build()
}

/// Closed area under `points` down to `baseline_y`
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return String::new();
    };

    points
        .iter()
        .fold(PathBuilder::new().move_to(first_x, baseline_y), |b, &(x, y)| b.line_to(x, y))
        .line_to(last_x, baseline_y)
        .close()
        .build()
}
