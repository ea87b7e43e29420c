//! Time axis ticks and gridlines for the sparkline
//!
//! Turns the selected [`AxisSettings`] into positioned, labelled ticks.

use crate::chartkit::{LinearScale, Scale, TimeScale};
use leptos::prelude::*;
use spark_core::{AxisSettings, colors};

/// Vertical room taken by one row of tick labels
pub const TICK_ROW_HEIGHT: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickBand {
    Minor,
    Major,
}

/// One labelled tick on the time axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub timestamp: i64,
    pub x: f64,
    pub label: String,
    pub band: TickBand,
}

/// Minor ticks followed by major ticks, positioned on `scale`
pub fn axis_ticks(settings: &AxisSettings, scale: &TimeScale) -> Vec<AxisTick> {
    let (start, end) = scale.domain_bounds();

    let band_ticks = |setting: &spark_core::TickSetting, band: TickBand| {
        setting
            .tick_values(start, end)
            .into_iter()
            .map(move |timestamp| AxisTick {
                timestamp,
                x: scale.scale(timestamp),
                label: setting.format(timestamp),
                band,
            })
            .collect::<Vec<_>>()
    };

    let mut ticks = band_ticks(&settings.minor, TickBand::Minor);
    if let Some(major) = &settings.major {
        ticks.extend(band_ticks(major, TickBand::Major));
    }
    ticks
}

/// Gridline positions in chart-local pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

impl GridLines {
    /// Verticals at minor ticks, horizontals at round values
    pub fn new(ticks: &[AxisTick], y_scale: &LinearScale, rows: usize) -> Self {
        Self {
            vertical: ticks
                .iter()
                .filter(|t| t.band == TickBand::Minor)
                .map(|t| t.x)
                .collect(),
            horizontal: y_scale
                .nice_ticks(rows)
                .into_iter()
                .map(|v| y_scale.scale(v))
                .collect(),
        }
    }
}

/// Bottom axis: minor labels on the first row, major labels below
#[component]
pub fn TimeAxisView(ticks: Vec<AxisTick>, width: f64, y: f64) -> impl IntoView {
    view! {
        <g class="x-axis" transform=format!("translate(0, {})", y)>
            <line x1="0" y1="0" x2=width y2="0" stroke=colors::BORDER stroke-width="1" />
            {ticks.into_iter().map(|tick| {
                let row = match tick.band {
                    TickBand::Minor => 1.0,
                    TickBand::Major => 2.0,
                };
                let class = match tick.band {
                    TickBand::Minor => "tick minor",
                    TickBand::Major => "tick major",
                };
                view! {
                    <text
                        class=class
                        x=tick.x
                        y={row * TICK_ROW_HEIGHT - 3.0}
                        text-anchor="middle"
                        fill=colors::TEXT_MUTED
                        font-size="10"
                    >
                        {tick.label}
                    </text>
                }
            }).collect_view()}
        </g>
    }
}

/// Dashed background grid
#[component]
pub fn GridView(grid: GridLines, width: f64, height: f64) -> impl IntoView {
    view! {
        <g class="grid">
            {grid.horizontal.into_iter().map(|y| view! {
                <line x1="0" y1=y x2=width y2=y stroke=colors::GRID stroke-width="1" stroke-dasharray="2,2" />
            }).collect_view()}
            {grid.vertical.into_iter().map(|x| view! {
                <line x1=x y1="0" x2=x y2=height stroke=colors::GRID stroke-width="1" stroke-dasharray="2,2" />
            }).collect_view()}
        </g>
    }
}
