//! Interactive sparkline
//!
//! Compact time-series line with optional area fill, axes and gridlines.
//! Pointer movement snaps a marker to the nearest sample and drives the
//! coordinated tooltip.

use crate::{
    ChartDimensions, ChartMargin,
    axis::{AxisTick, GridLines, GridView, TICK_ROW_HEIGHT, TimeAxisView, TickBand, axis_ticks},
    chartkit::{LinearScale, Scale, TimeScale, area_path, line_path},
    tooltip::{SparklineTooltip, TooltipConfig},
};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use spark_core::{
    AxisConfig, AxisSettings, Sample, SampleLabels, TickFormat, colors, select_granularity,
    time_extent, value_extent,
};
use spark_state::{ChartState, HoverTracker};
use wasm_bindgen::JsCast;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Sparkline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    pub stroke_width: f64,
    pub line_color: String,
    /// Second gradient stop; same as `line_color` for a flat stroke
    pub line_end_color: String,
    pub area_fill: bool,
    pub show_axes: bool,
    pub show_grid: bool,
    pub show_end_marker: bool,
    pub end_marker_radius: f64,
    /// Hover tracking is disabled on charts narrower than this
    pub tooltip_threshold: f64,
    pub title: Option<String>,
    pub axis: AxisConfig,
    pub labels: SampleLabels,
    pub tooltip: TooltipConfig,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 30.0,
            margin: ChartMargin::compact(),
            stroke_width: 1.5,
            line_color: colors::LINE.to_string(),
            line_end_color: colors::LINE_END.to_string(),
            area_fill: true,
            show_axes: false,
            show_grid: false,
            show_end_marker: true,
            end_marker_radius: 2.0,
            tooltip_threshold: 480.0,
            title: None,
            axis: AxisConfig::default(),
            labels: SampleLabels::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl SparklineConfig {
    /// Full-width variant with axes and gridlines
    pub fn detailed(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::symmetric(10.0, 12.0),
            show_axes: true,
            show_grid: true,
            end_marker_radius: 3.0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn tooltip_threshold(mut self, px: f64) -> Self {
        self.tooltip_threshold = px;
        self
    }

    /// Outer dimensions, with room for tick rows when axes are shown
    pub fn dimensions(&self) -> ChartDimensions {
        let mut margin = self.margin;
        if self.show_axes {
            margin.bottom += 2.0 * TICK_ROW_HEIGHT;
        }
        ChartDimensions::new(self.width, self.height).with_margin(margin)
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Everything the sparkline draws, derived from one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineGeometry {
    pub dims: ChartDimensions,
    pub x_scale: TimeScale,
    pub y_scale: LinearScale,
    pub points: Vec<(f64, f64)>,
    pub line: String,
    pub area: String,
    pub axis: AxisSettings,
    pub ticks: Vec<AxisTick>,
    pub grid: GridLines,
}

impl SparklineGeometry {
    /// `None` for an empty dataset
    pub fn compute(samples: &[Sample], config: &SparklineConfig) -> Option<Self> {
        let (t_min, t_max) = time_extent(samples)?;
        let (v_min, v_max) = value_extent(samples)?;

        let dims = config.dimensions();
        let inner_w = dims.inner_width();
        let inner_h = dims.inner_height();

        let x_scale = TimeScale::new().domain(t_min, t_max).range(0.0, inner_w);
        let y_scale = LinearScale::new()
            .padded_domain(v_min, v_max, 0.1)
            .range(inner_h, 0.0);

        let points: Vec<(f64, f64)> = samples
            .iter()
            .map(|s| (x_scale.scale(s.timestamp), y_scale.scale(s.value)))
            .collect();

        let axis_override = config.axis.axis_override();
        let axis = select_granularity(samples, inner_w, axis_override.as_ref());
        let ticks = axis_ticks(&axis, &x_scale);
        let grid = GridLines::new(&ticks, &y_scale, 3);

        Some(Self {
            dims,
            line: line_path(&points),
            area: area_path(&points, inner_h),
            points,
            x_scale,
            y_scale,
            axis,
            ticks,
            grid,
        })
    }

    pub fn end_point(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Chart-local position of a sample
    pub fn locate(&self, sample: &Sample) -> (f64, f64) {
        (self.x_scale.scale(sample.timestamp), self.y_scale.scale(sample.value))
    }

    pub fn minor_ticks(&self) -> impl Iterator<Item = &AxisTick> {
        self.ticks.iter().filter(|t| t.band == TickBand::Minor)
    }
}

/// Map a client-space pointer onto a rendered box of `inner` size
///
/// `rect` is the box's client rectangle `(left, top, width, height)`; the SVG
/// may be scaled by its viewBox so the ratio is applied on both axes.
pub fn to_chart_local(client: (f64, f64), rect: (f64, f64, f64, f64), inner: (f64, f64)) -> Option<(f64, f64)> {
    let (left, top, width, height) = rect;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((
        (client.0 - left) * inner.0 / width,
        (client.1 - top) * inner.1 / height,
    ))
}

fn pointer_in(ev: &web_sys::MouseEvent, inner: (f64, f64)) -> (f64, f64) {
    let rect = ev
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.get_bounding_client_rect());

    rect.and_then(|r| {
        to_chart_local(
            (ev.client_x() as f64, ev.client_y() as f64),
            (r.left(), r.top(), r.width(), r.height()),
            inner,
        )
    })
    .unwrap_or((ev.offset_x() as f64, ev.offset_y() as f64))
}

// ============================================================================
// COMPONENT
// ============================================================================

static GRADIENT_IDS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// Interactive sparkline component
#[component]
pub fn Sparkline(
    #[prop(into)] samples: Signal<Vec<Sample>>,
    #[prop(optional)] config: Option<SparklineConfig>,
    #[prop(optional)] state: Option<ChartState>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let state = state.unwrap_or_default();
    let dims = config.dimensions();
    let (inner_w, inner_h) = (dims.inner_width(), dims.inner_height());
    let inner = (inner_w, inner_h);

    let gradient_id = format!(
        "sparkline-gradient-{}",
        GRADIENT_IDS.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    );
    let line_stroke = format!("url(#{})", gradient_id);

    let geometry = {
        let config = config.clone();
        Memo::new(move |_| SparklineGeometry::compute(&samples.get(), &config))
    };

    let tracker = {
        let mut tracker = HoverTracker::new(config.width, config.tooltip_threshold)
            .with_color(config.tooltip.value_label.clone(), config.line_color.clone());
        tracker.on_event(move |event| state.apply_event(event));
        StoredValue::new(tracker)
    };

    let on_move = move |ev: web_sys::MouseEvent| {
        let pointer = pointer_in(&ev, inner);
        geometry.with_untracked(|g| {
            let Some(g) = g else { return };
            samples.with_untracked(|data| {
                tracker.with_value(|t| {
                    state.hover.update(|h| {
                        t.pointer_move(h, data, &g.x_scale, pointer);
                    })
                })
            })
        });
    };
    let on_over = move |_: web_sys::MouseEvent| tracker.with_value(|t| t.pointer_over());
    let on_out = move |_: web_sys::MouseEvent| {
        tracker.with_value(|t| state.hover.update(|h| t.pointer_out(h)));
    };

    let tick_format = Signal::derive(move || {
        geometry.with(|g| match g {
            Some(g) => g.axis.minor.format.clone(),
            None => TickFormat::default(),
        })
    });

    let hover_marker = move || {
        let sample = state.hover.with(|h| h.active_sample.clone())?;
        geometry.with(|g| g.as_ref().map(|g| g.locate(&sample)))
    };

    let SparklineConfig {
        stroke_width,
        line_color,
        line_end_color,
        area_fill,
        show_axes,
        show_grid,
        show_end_marker,
        end_marker_radius,
        title,
        tooltip,
        ..
    } = config;

    view! {
        <svg
            class="sparkline"
            viewBox=dims.viewbox()
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
        >
            <defs>
                <linearGradient id=gradient_id x1="0%" y1="0%" x2="100%" y2="0%">
                    <stop offset="0%" stop-color=line_color />
                    <stop offset="100%" stop-color=line_end_color />
                </linearGradient>
            </defs>

            {title.map(|t| view! {
                <text class="sparkline-title" x=dims.margin.left y="10" fill=colors::TEXT_MUTED font-size="10">
                    {t}
                </text>
            })}

            <g transform=dims.inner_transform()>
                {move || {
                    geometry.get().map(|g| {
                        let end_point = g.end_point();
                        let SparklineGeometry { area, line, ticks, grid, .. } = g;
                        view! {
                            <>
                                {show_grid.then(|| view! {
                                    <GridView grid=grid width=inner_w height=inner_h />
                                })}

                                {area_fill.then(|| view! {
                                    <path class="sparkline-area" d=area fill=colors::area_alpha(0.15) />
                                })}

                                <path
                                    class="sparkline-line"
                                    d=line
                                    fill="none"
                                    stroke=line_stroke.clone()
                                    stroke-width=stroke_width
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                />

                                {show_end_marker.then(|| end_point.map(|(x, y)| view! {
                                    <circle class="sparkline-end" cx=x cy=y r=end_marker_radius fill=colors::LINE_END />
                                })).flatten()}

                                {show_axes.then(|| view! {
                                    <TimeAxisView ticks=ticks width=inner_w y=inner_h />
                                })}
                            </>
                        }
                    })
                }}

                {move || hover_marker().map(|(x, y)| view! {
                    <g class="hover-marker" pointer-events="none">
                        <line x1=x y1="0" x2=x y2=inner_h stroke=colors::BORDER stroke-width="1" />
                        <circle cx=x cy=y r="3" fill=colors::MARKER stroke=colors::LINE_END stroke-width="2" />
                    </g>
                })}

                <rect
                    class="sparkline-overlay"
                    width=inner_w
                    height=inner_h
                    fill="transparent"
                    on:mouseover=on_over
                    on:mousemove=on_move
                    on:mouseout=on_out
                />

                <SparklineTooltip
                    state=state
                    date_format=tick_format
                    config=tooltip
                    width=inner_w
                    height=inner_h
                />
            </g>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::GranularityCombination;

    const MINUTE: i64 = 60_000;

    fn series() -> Vec<Sample> {
        (0..=6)
            .map(|i| Sample::new(i * 10 * MINUTE, (i % 3) as f64))
            .collect()
    }

    #[test]
    fn test_empty_geometry() {
        assert!(SparklineGeometry::compute(&[], &SparklineConfig::default()).is_none());
    }

    #[test]
    fn test_geometry_fits_inner_area() {
        let config = SparklineConfig::default();
        let g = SparklineGeometry::compute(&series(), &config).unwrap();
        let (w, h) = (g.dims.inner_width(), g.dims.inner_height());

        assert_eq!(g.points.len(), 7);
        assert_eq!(g.points[0].0, 0.0);
        assert_eq!(g.end_point().map(|p| p.0), Some(w));
        assert!(g.points.iter().all(|&(_, y)| y >= 0.0 && y <= h));
        assert!(g.line.starts_with("M0.00,"));
        assert!(g.area.ends_with('Z'));
    }

    #[test]
    fn test_geometry_selects_axis() {
        let config = SparklineConfig::detailed(800.0, 200.0);
        let g = SparklineGeometry::compute(&series(), &config).unwrap();

        assert_eq!(g.axis.combination, Some(GranularityCombination::HourDay));
        assert!(g.minor_ticks().count() >= 1);
    }

    #[test]
    fn test_forced_axis_from_config() {
        let config = SparklineConfig::detailed(800.0, 200.0)
            .with_axis(AxisConfig::new().force(GranularityCombination::MinuteHour));
        let g = SparklineGeometry::compute(&series(), &config).unwrap();

        assert_eq!(g.axis.combination, Some(GranularityCombination::MinuteHour));
        assert!(g.axis.major.is_some());
    }

    #[test]
    fn test_axes_reserve_bottom_margin() {
        let plain = SparklineConfig::default().with_size(600.0, 120.0);
        let axes = SparklineConfig {
            show_axes: true,
            ..plain.clone()
        };
        assert_eq!(
            plain.dimensions().inner_height() - axes.dimensions().inner_height(),
            2.0 * TICK_ROW_HEIGHT
        );
    }

    #[test]
    fn test_config_from_json() {
        let config = SparklineConfig::from_json(
            r#"{
                "width": 640,
                "height": 80,
                "tooltipThreshold": 300,
                "showAxes": true,
                "axis": { "forceAxisFormat": "day-month" },
                "labels": { "dateLabel": "ts", "valueLabel": "v" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.width, 640.0);
        assert_eq!(config.tooltip_threshold, 300.0);
        assert!(config.show_axes);
        assert!(config.area_fill);
        assert_eq!(config.labels.date_label, "ts");
        assert_eq!(config.axis.force_axis_format.as_deref(), Some("day-month"));
    }

    #[test]
    fn test_to_chart_local_scales() {
        assert_eq!(
            to_chart_local((150.0, 70.0), (100.0, 50.0, 200.0, 40.0), (400.0, 80.0)),
            Some((100.0, 40.0))
        );
        assert_eq!(to_chart_local((0.0, 0.0), (0.0, 0.0, 0.0, 10.0), (1.0, 1.0)), None);
    }
}
