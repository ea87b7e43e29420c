//! Demo page layout

use leptos::prelude::*;
use spark_charts::{Sparkline, SparklineConfig, TooltipConfig};
use spark_core::{AxisConfig, SampleLabels};
use spark_state::{ChartState, provide_chart_state, use_chart_state};

use crate::data::{BROKEN_ROWS, LATENCY_ROWS, SIGNUP_ROWS};

#[component]
pub fn Dashboard() -> impl IntoView {
    let latency = provide_chart_state();
    latency.load_json(LATENCY_ROWS, &SampleLabels::default());

    let latency_config = SparklineConfig::detailed(720.0, 180.0).with_tooltip(
        TooltipConfig::default()
            .with_title("Latency (ms)")
            .with_value_label("p95")
            .with_extra_field("host"),
    );

    let signups_config = {
        let mut config = SparklineConfig::detailed(720.0, 160.0)
            .with_axis(AxisConfig::new().custom(4, "%d %b"));
        config.labels = SampleLabels::new("day", "signups");
        config
    };
    let signups = ChartState::new();
    signups.load_json(SIGNUP_ROWS, &signups_config.labels);

    let compact = ChartState::new();
    compact.load_json(LATENCY_ROWS, &SampleLabels::default());

    let broken = ChartState::new();
    broken.load_json(BROKEN_ROWS, &SampleLabels::default());

    view! {
        <div class="dashboard">
            <header class="dash-header">
                <span class="dash-title">"Spark Dash"</span>
            </header>

            <main class="dash-main">
                <ChartPanel title="Latency" state=latency config=latency_config />
                <ChartPanel title="Signups" state=signups config=signups_config />
                <ChartPanel
                    title="Latency (inline, no tooltip)"
                    state=compact
                    config=SparklineConfig::default()
                />
                <ChartPanel title="Broken feed" state=broken config=SparklineConfig::default() />
            </main>

            <footer class="dash-footer">
                <StatusBar />
            </footer>
        </div>
    }
}

#[component]
fn ChartPanel(title: &'static str, state: ChartState, config: SparklineConfig) -> impl IntoView {
    let error = state.error;

    view! {
        <div class="panel">
            <div class="panel-header">
                <span class="panel-title">{title}</span>
            </div>
            <div class="panel-content">
                {move || error.get().map(|e| view! { <div class="panel-error">{e}</div> })}
                <Sparkline samples=state.samples config=config state=state />
            </div>
        </div>
    }
}

/// Hover readout for the chart in context
#[component]
fn StatusBar() -> impl IntoView {
    let state = use_chart_state();

    let readout = move || {
        state.hover.with(|h| match &h.active_sample {
            Some(sample) => match sample.datetime() {
                Some(at) => format!("{} → {}", at.format("%Y-%m-%d %H:%M"), sample.value),
                None => sample.value.to_string(),
            },
            None => "hover the latency chart".to_string(),
        })
    };

    view! {
        <div class="status-bar">
            <span class="status-item">
                <span class="status-label">"Points:"</span>
                <span class="status-value">{move || state.samples.with(Vec::len)}</span>
            </span>
            <span class="status-item">{readout}</span>
        </div>
    }
}
