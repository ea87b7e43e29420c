//! # spark-charts
//!
//! Interactive SVG sparkline and tooltip built with Leptos.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, time)
//! - Tick and value formatting (from `spark-core`)
//! - Pixel/time mapping for hover tracking (`TimeAxis`)
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths
//! - `axis` - Time axis ticks and gridlines
//! - `sparkline` - The sparkline component and its geometry
//! - `tooltip` - Tooltip content, placement and component

pub mod axis;
pub mod chartkit;
pub mod sparkline;
pub mod tooltip;

pub use axis::*;
pub use chartkit::*;
pub use sparkline::*;
pub use tooltip::*;

pub use spark_core::colors;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Room for the end marker and stroke on plain sparklines
    pub const fn compact() -> Self {
        Self::uniform(2.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::compact()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(100.0, 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_area() {
        let dims = ChartDimensions::new(100.0, 30.0).with_margin(ChartMargin::new(1.0, 2.0, 3.0, 4.0));

        assert_eq!(dims.inner_width(), 94.0);
        assert_eq!(dims.inner_height(), 26.0);
        assert_eq!(dims.inner_transform(), "translate(4, 1)");
        assert_eq!(dims.viewbox(), "0 0 100 30");
    }

    #[test]
    fn test_inner_area_never_negative() {
        let dims = ChartDimensions::new(3.0, 3.0).with_margin(ChartMargin::uniform(5.0));
        assert_eq!(dims.inner_width(), 0.0);
    }
}
