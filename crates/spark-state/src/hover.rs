//! Hover tracking: pointer events in, resolved samples and tooltip events out

use std::collections::BTreeMap;

use spark_core::{Sample, resolve};

/// Name → colour assignment forwarded to the tooltip
pub type ColorMap = BTreeMap<String, String>;

// ============================================================================
// STRATEGY PATTERN: Time Axis
// ============================================================================

/// Mapping between chart-local pixels and time, supplied by the renderer
pub trait TimeAxis {
    /// Pixel to unix millis
    fn invert(&self, px: f64) -> i64;

    /// Unix millis to pixel
    fn position(&self, timestamp_ms: i64) -> f64;
}

// ============================================================================
// HOVER STATE
// ============================================================================

/// Transient pointer state owned by the chart surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub active_sample: Option<Sample>,
    pub pointer_x: f64,
}

impl HoverState {
    pub fn is_active(&self) -> bool {
        self.active_sample.is_some()
    }

    pub fn reset(&mut self) {
        self.active_sample = None;
        self.pointer_x = 0.0;
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Messages for the tooltip collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Show,
    Move {
        sample: Sample,
        colors: ColorMap,
        /// [x, y] in chart-local pixels, x snapped to the sample
        position: (f64, f64),
    },
    Hide,
}

type Handler = Box<dyn Fn(&ChartEvent) + Send + Sync>;

/// Typed observer list; handlers run synchronously in registration order
#[derive(Default)]
pub struct ChartEvents {
    handlers: Vec<Handler>,
}

impl ChartEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&ChartEvent) + Send + Sync + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn emit(&self, event: &ChartEvent) {
        for handler in &self.handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ChartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEvents")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// ============================================================================
// HOVER TRACKER
// ============================================================================

/// Drives [`HoverState`] from pointer events and notifies the tooltip
#[derive(Debug)]
pub struct HoverTracker {
    chart_width: f64,
    tooltip_threshold: f64,
    colors: ColorMap,
    events: ChartEvents,
}

impl HoverTracker {
    pub fn new(chart_width: f64, tooltip_threshold: f64) -> Self {
        Self {
            chart_width,
            tooltip_threshold,
            colors: ColorMap::new(),
            events: ChartEvents::new(),
        }
    }

    pub fn with_color(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(name.into(), color.into());
        self
    }

    pub fn on_event(&mut self, handler: impl Fn(&ChartEvent) + Send + Sync + 'static) {
        self.events.subscribe(handler);
    }

    pub fn set_chart_width(&mut self, width: f64) {
        self.chart_width = width;
    }

    /// Tracking is off entirely when the chart is narrower than the threshold
    pub fn is_enabled(&self) -> bool {
        self.chart_width >= self.tooltip_threshold
    }

    pub fn pointer_over(&self) {
        if self.is_enabled() {
            self.events.emit(&ChartEvent::Show);
        }
    }

    /// Resolve the sample under the pointer and publish it
    ///
    /// Returns `None` without touching the axis when tracking is disabled or
    /// the series is empty.
    pub fn pointer_move<'a, A: TimeAxis + ?Sized>(
        &self,
        state: &mut HoverState,
        samples: &'a [Sample],
        axis: &A,
        pointer: (f64, f64),
    ) -> Option<&'a Sample> {
        if !self.is_enabled() {
            return None;
        }

        let (x, y) = pointer;
        let sample = resolve(samples, axis.invert(x))?;

        state.pointer_x = x;
        if state.active_sample.as_ref() != Some(sample) {
            tracing::trace!(timestamp = sample.timestamp, "hover sample changed");
            state.active_sample = Some(sample.clone());
        }

        self.events.emit(&ChartEvent::Move {
            sample: sample.clone(),
            colors: self.colors.clone(),
            position: (axis.position(sample.timestamp), y),
        });

        Some(sample)
    }

    /// Pointer left the chart: clear state and hide the tooltip
    pub fn pointer_out(&self, state: &mut HoverState) {
        state.reset();
        self.events.emit(&ChartEvent::Hide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// 1 px per 10 ms starting at t=0, counting inversions
    #[derive(Default)]
    struct LinearAxis {
        inverted: AtomicUsize,
    }

    impl TimeAxis for LinearAxis {
        fn invert(&self, px: f64) -> i64 {
            self.inverted.fetch_add(1, Ordering::SeqCst);
            (px * 10.0) as i64
        }

        fn position(&self, timestamp_ms: i64) -> f64 {
            timestamp_ms as f64 / 10.0
        }
    }

    fn samples() -> Vec<Sample> {
        vec![Sample::new(0, 1.0), Sample::new(100, 2.0), Sample::new(300, 3.0)]
    }

    fn recording(tracker: &mut HoverTracker) -> Arc<Mutex<Vec<ChartEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        tracker.on_event(move |e| sink.lock().unwrap().push(e.clone()));
        log
    }

    #[test]
    fn test_move_resolves_and_emits() {
        let mut tracker = HoverTracker::new(600.0, 480.0).with_color("value", "#39c2c9");
        let log = recording(&mut tracker);
        let data = samples();
        let axis = LinearAxis::default();
        let mut state = HoverState::default();

        tracker.pointer_over();
        let hit = tracker.pointer_move(&mut state, &data, &axis, (16.0, 5.0));

        assert_eq!(hit, Some(&data[1]));
        assert_eq!(state.active_sample.as_ref(), Some(&data[1]));
        assert_eq!(state.pointer_x, 16.0);

        let events = log.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ChartEvent::Show);
        match &events[1] {
            ChartEvent::Move { sample, colors, position } => {
                assert_eq!(sample, &data[1]);
                assert_eq!(colors.get("value").map(String::as_str), Some("#39c2c9"));
                assert_eq!(*position, (10.0, 5.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_below_threshold_never_resolves() {
        let mut tracker = HoverTracker::new(100.0, 480.0);
        let log = recording(&mut tracker);
        let data = samples();
        let axis = LinearAxis::default();
        let mut state = HoverState::default();

        assert!(!tracker.is_enabled());
        tracker.pointer_over();
        assert_eq!(tracker.pointer_move(&mut state, &data, &axis, (16.0, 5.0)), None);

        assert_eq!(axis.inverted.load(Ordering::SeqCst), 0);
        assert!(!state.is_active());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_pointer_out_resets() {
        let mut tracker = HoverTracker::new(600.0, 0.0);
        let log = recording(&mut tracker);
        let data = samples();
        let axis = LinearAxis::default();
        let mut state = HoverState::default();

        tracker.pointer_move(&mut state, &data, &axis, (29.0, 0.0));
        assert!(state.is_active());

        tracker.pointer_out(&mut state);
        assert_eq!(state, HoverState::default());
        assert_eq!(log.lock().unwrap().last(), Some(&ChartEvent::Hide));
    }

    #[test]
    fn test_empty_series_leaves_state_alone() {
        let tracker = HoverTracker::new(600.0, 0.0);
        let axis = LinearAxis::default();
        let mut state = HoverState::default();

        assert_eq!(tracker.pointer_move(&mut state, &[], &axis, (10.0, 0.0)), None);
        assert!(!state.is_active());
    }

    #[test]
    fn test_out_of_range_pointer_clamps() {
        let tracker = HoverTracker::new(600.0, 0.0);
        let data = samples();
        let axis = LinearAxis::default();
        let mut state = HoverState::default();

        assert_eq!(tracker.pointer_move(&mut state, &data, &axis, (-50.0, 0.0)), data.first());
        assert_eq!(tracker.pointer_move(&mut state, &data, &axis, (9_999.0, 0.0)), data.last());
    }
}
