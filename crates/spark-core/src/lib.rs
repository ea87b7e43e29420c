//! # spark-core
//!
//! Core types for spark-dash sparklines: samples, nearest-point resolution
//! and time-axis granularity selection.
//! Implements Strategy pattern for value and tick formatting.

pub mod granularity;
pub mod resolver;
pub mod sample;

pub use granularity::*;
pub use resolver::*;
pub use sample::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Value Formatters
// ============================================================================

/// Strategy trait for formatting sample values in tooltips and labels
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed-decimals formatter
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    pub decimals: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

/// Thousands, millions and billions shortened to K/M/B
#[derive(Debug, Clone)]
pub struct CompactFormatter {
    pub decimals: usize,
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

impl ValueFormatter for CompactFormatter {
    fn format(&self, value: f64) -> String {
        const SUFFIXES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

        SUFFIXES
            .iter()
            .find(|(scale, _)| value.abs() >= *scale)
            .map_or_else(
                || AdaptiveFormatter { decimals: self.decimals }.format(value),
                |(scale, suffix)| format!("{:.prec$}{}", value / scale, suffix, prec = self.decimals),
            )
    }
}

/// Integers print without decimals, everything else with `decimals`
#[derive(Debug, Clone)]
pub struct AdaptiveFormatter {
    pub decimals: usize,
}

impl Default for AdaptiveFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for AdaptiveFormatter {
    fn format(&self, value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{:.0}", value)
        } else {
            format!("{:.prec$}", value, prec = self.decimals)
        }
    }
}

/// Serializable choice of [`ValueFormatter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    #[default]
    Adaptive,
    Decimal,
    Compact,
}

impl ValueFormat {
    pub fn formatter(self, decimals: usize) -> Box<dyn ValueFormatter> {
        match self {
            Self::Adaptive => Box::new(AdaptiveFormatter { decimals }),
            Self::Decimal => Box::new(DecimalFormatter { decimals }),
            Self::Compact => Box::new(CompactFormatter { decimals }),
        }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const LINE: &str = "#39c2c9";
    pub const LINE_END: &str = "#3e9cd2";
    pub const MARKER: &str = "#ffffff";
    pub const BG_TOOLTIP: &str = "#ffffff";
    pub const BORDER: &str = "#d2d6df";
    pub const TEXT_PRIMARY: &str = "#363a43";
    pub const TEXT_MUTED: &str = "#adb0b6";
    pub const GRID: &str = "#efefef";

    pub fn area_alpha(alpha: f64) -> String {
        format!("rgba(57, 194, 201, {:.2})", alpha)
    }
}
