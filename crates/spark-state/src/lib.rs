//! # spark-state
//!
//! Reactive state for spark-dash sparklines.
//! Hover tracking is plain Rust in [`hover`]; this module wraps its output in
//! Leptos signals so the chart and tooltip re-render surgically.

pub mod hover;

pub use hover::*;

use leptos::prelude::*;
use spark_core::{Sample, SampleLabels, parse_rows};

// ============================================================================
// TOOLTIP STATE
// ============================================================================

/// What the tooltip view currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub sample: Option<Sample>,
    pub colors: ColorMap,
    pub position: (f64, f64),
}

impl TooltipState {
    /// Fold a chart event into the tooltip state
    pub fn apply(&mut self, event: &ChartEvent) {
        match event {
            ChartEvent::Show => self.visible = true,
            ChartEvent::Move {
                sample,
                colors,
                position,
            } => {
                self.sample = Some(sample.clone());
                self.colors = colors.clone();
                self.position = *position;
            }
            ChartEvent::Hide => {
                self.visible = false;
                self.sample = None;
            }
        }
    }
}

// ============================================================================
// CHART STATE
// ============================================================================

/// Reactive state shared by one sparkline and its tooltip
#[derive(Clone, Copy)]
pub struct ChartState {
    /// Bound dataset (ascending by timestamp)
    pub samples: RwSignal<Vec<Sample>>,
    /// Pointer tracking state
    pub hover: RwSignal<HoverState>,
    /// Tooltip view model
    pub tooltip: RwSignal<TooltipState>,
    /// Last dataset error
    pub error: RwSignal<Option<String>>,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            samples: RwSignal::new(Vec::new()),
            hover: RwSignal::new(HoverState::default()),
            tooltip: RwSignal::new(TooltipState::default()),
            error: RwSignal::new(None),
        }
    }

    // ========================================================================
    // Dataset
    // ========================================================================

    /// Replace the bound dataset; any hover from the old data is dropped
    pub fn set_samples(&self, samples: Vec<Sample>) {
        self.hover.update(HoverState::reset);
        self.tooltip.set(TooltipState::default());
        self.error.set(None);
        self.samples.set(samples);
    }

    /// Parse a JSON array of rows and bind it; keeps the old data on error
    pub fn load_json(&self, json: &str, labels: &SampleLabels) -> bool {
        match parse_rows(json, labels) {
            Ok(samples) => {
                self.set_samples(samples);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected sparkline dataset");
                self.error.set(Some(e.to_string()));
                false
            }
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Route a tracker event into the tooltip signal
    pub fn apply_event(&self, event: &ChartEvent) {
        self.tooltip.update(|t| t.apply(event));
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide chart state context to component tree
pub fn provide_chart_state() -> ChartState {
    let state = ChartState::new();
    provide_context(state);
    state
}

/// Use chart state from context, creating a detached one if none was provided
pub fn use_chart_state() -> ChartState {
    use_context::<ChartState>().unwrap_or_default()
}
