//! Tooltip overlay coordinated with sparkline hover tracking
//!
//! Content and placement are computed in plain Rust; the component only draws
//! them inside the chart's SVG.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spark_core::{Sample, TimeFormatter, TickFormat, ValueFormat, ValueFormatter, colors};
use spark_state::{ChartState, ColorMap};

/// Tooltip configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    pub title: Option<String>,
    /// Label shown next to the sample value
    pub value_label: String,
    /// Overrides the axis formatter for the date line
    pub date_format: Option<String>,
    /// Raw row fields to list under the value
    pub extra_fields: Vec<String>,
    pub value_format: ValueFormat,
    pub number_decimals: usize,
    /// Gap between the anchor point and the tooltip box
    pub offset: f64,
    pub width: f64,
    pub line_height: f64,
    pub padding: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            title: None,
            value_label: "value".to_string(),
            date_format: None,
            extra_fields: Vec::new(),
            value_format: ValueFormat::default(),
            number_decimals: 2,
            offset: 12.0,
            width: 150.0,
            line_height: 18.0,
            padding: 8.0,
        }
    }
}

impl TooltipConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_value_label(mut self, label: impl Into<String>) -> Self {
        self.value_label = label.into();
        self
    }

    pub fn with_extra_field(mut self, field: impl Into<String>) -> Self {
        self.extra_fields.push(field.into());
        self
    }

    pub fn with_value_format(mut self, format: ValueFormat, decimals: usize) -> Self {
        self.value_format = format;
        self.number_decimals = decimals;
        self
    }
}

// ============================================================================
// CONTENT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub name: String,
    pub value: String,
    pub color: Option<String>,
}

/// Text rows of one tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: Option<String>,
    pub date: String,
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    pub fn build(
        sample: &Sample,
        colors_by_name: &ColorMap,
        date_formatter: &dyn TimeFormatter,
        config: &TooltipConfig,
    ) -> Self {
        let values = config.value_format.formatter(config.number_decimals);
        let swatch = colors_by_name
            .get(&config.value_label)
            .or_else(|| colors_by_name.values().next())
            .cloned();

        let mut lines = vec![TooltipLine {
            name: config.value_label.clone(),
            value: values.format(sample.value),
            color: swatch,
        }];

        lines.extend(config.extra_fields.iter().filter_map(|field| {
            let raw = sample.raw_fields.get(field)?;
            let value = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |v| values.format(v)),
                other => other.to_string(),
            };
            Some(TooltipLine {
                name: field.clone(),
                value,
                color: colors_by_name.get(field).cloned(),
            })
        }));

        Self {
            title: config.title.clone(),
            date: date_formatter.format(sample.timestamp),
            lines,
        }
    }

    pub fn row_count(&self) -> usize {
        usize::from(self.title.is_some()) + 1 + self.lines.len()
    }

    /// Box size for `config`
    pub fn size(&self, config: &TooltipConfig) -> (f64, f64) {
        (
            config.width,
            2.0 * config.padding + self.row_count() as f64 * config.line_height,
        )
    }
}

/// Top-left corner for a tooltip of `size` anchored at `anchor`
///
/// Sits right of the anchor and flips to the left when it would overflow
/// `bounds`; vertically centred on the anchor and kept inside the chart.
pub fn tooltip_origin(anchor: (f64, f64), size: (f64, f64), bounds: (f64, f64), offset: f64) -> (f64, f64) {
    let (ax, ay) = anchor;
    let (w, h) = size;
    let (bw, bh) = bounds;

    let mut x = ax + offset;
    if x + w > bw {
        x = ax - offset - w;
    }

    let y = (ay - h / 2.0).clamp(0.0, (bh - h).max(0.0));
    (x.max(0.0), y)
}

// ============================================================================
// COMPONENT
// ============================================================================

/// SVG tooltip group driven by [`ChartState::tooltip`]
#[component]
pub fn SparklineTooltip(
    state: ChartState,
    #[prop(into)] date_format: Signal<TickFormat>,
    #[prop(optional)] config: Option<TooltipConfig>,
    width: f64,
    height: f64,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let fixed_format = config.date_format.as_deref().and_then(|p| match TickFormat::parse(p) {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring tooltip date format");
            None
        }
    });

    let layout = move || {
        let tooltip = state.tooltip.get();
        if !tooltip.visible {
            return None;
        }
        let sample = tooltip.sample?;

        let formatter = fixed_format.clone().unwrap_or_else(|| date_format.get());
        let content = TooltipContent::build(&sample, &tooltip.colors, &formatter, &config);
        let size = content.size(&config);
        let origin = tooltip_origin(tooltip.position, size, (width, height), config.offset);
        Some((content, size, origin, config.padding, config.line_height))
    };

    view! {
        {move || {
            layout().map(|(content, (w, h), (x, y), padding, line_height)| {
                let mut rows: Vec<(String, Option<String>, &'static str)> = Vec::new();
                if let Some(title) = content.title {
                    rows.push((title, None, "tooltip-title"));
                }
                rows.push((content.date, None, "tooltip-date"));
                for line in content.lines {
                    rows.push((format!("{}: {}", line.name, line.value), line.color, "tooltip-value"));
                }

                view! {
                    <g class="sparkline-tooltip" pointer-events="none" transform=format!("translate({:.2}, {:.2})", x, y)>
                        <rect
                            width=w
                            height=h
                            rx="3"
                            fill=colors::BG_TOOLTIP
                            stroke=colors::BORDER
                            stroke-width="1"
                        />
                        {rows.into_iter().enumerate().map(|(i, (text, swatch, class))| {
                            let baseline = padding + (i as f64 + 0.75) * line_height;
                            let text_x = if swatch.is_some() { padding + 12.0 } else { padding };
                            view! {
                                <g class=class>
                                    {swatch.map(|color| view! {
                                        <circle
                                            cx={padding + 4.0}
                                            cy={baseline - 4.0}
                                            r="4"
                                            fill=color
                                        />
                                    })}
                                    <text
                                        x=text_x
                                        y=baseline
                                        fill=colors::TEXT_PRIMARY
                                        font-size="11"
                                    >
                                        {text}
                                    </text>
                                </g>
                            }
                        }).collect_view()}
                    </g>
                }
            })
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn hour_format() -> TickFormat {
        TickFormat::parse("%H:%M").unwrap()
    }

    #[test]
    fn test_content_uses_value_color() {
        let sample = Sample::new(6_000_000, 12.5).with_field("host", json!("db-1"));
        let mut colors_by_name = ColorMap::new();
        colors_by_name.insert("value".into(), "#39c2c9".into());
        let config = TooltipConfig::default()
            .with_title("Latency")
            .with_extra_field("host")
            .with_extra_field("missing");

        let content = TooltipContent::build(&sample, &colors_by_name, &hour_format(), &config);

        assert_eq!(content.title.as_deref(), Some("Latency"));
        assert_eq!(content.date, "01:40");
        assert_eq!(
            content.lines,
            vec![
                TooltipLine { name: "value".into(), value: "12.50".into(), color: Some("#39c2c9".into()) },
                TooltipLine { name: "host".into(), value: "db-1".into(), color: None },
            ]
        );
        assert_eq!(content.row_count(), 4);
        assert_eq!(content.size(&config), (150.0, 2.0 * 8.0 + 4.0 * 18.0));
    }

    #[test]
    fn test_content_falls_back_to_any_color() {
        let mut colors_by_name = ColorMap::new();
        colors_by_name.insert("cpu".into(), "#ff0000".into());

        let content = TooltipContent::build(
            &Sample::new(0, 3.0),
            &colors_by_name,
            &hour_format(),
            &TooltipConfig::default(),
        );
        assert_eq!(content.lines[0].value, "3");
        assert_eq!(content.lines[0].color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_content_uses_configured_value_format() {
        let sample = Sample::new(0, 48_200.0).with_field("requests", json!(1_340_000));
        let config = TooltipConfig::default()
            .with_value_format(ValueFormat::Compact, 1)
            .with_extra_field("requests");

        let content = TooltipContent::build(&sample, &ColorMap::new(), &hour_format(), &config);

        assert_eq!(content.lines[0].value, "48.2K");
        assert_eq!(content.lines[1].value, "1.3M");
    }

    #[test]
    fn test_config_value_format_from_json() {
        let config: TooltipConfig =
            serde_json::from_str(r#"{ "valueFormat": "decimal", "numberDecimals": 1 }"#).unwrap();
        assert_eq!(config.value_format, ValueFormat::Decimal);
        assert_eq!(config.number_decimals, 1);
    }

    #[test]
    fn test_origin_right_of_anchor() {
        assert_eq!(tooltip_origin((100.0, 50.0), (80.0, 40.0), (600.0, 200.0), 10.0), (110.0, 30.0));
    }

    #[test]
    fn test_origin_flips_left_near_edge() {
        assert_eq!(tooltip_origin((550.0, 50.0), (80.0, 40.0), (600.0, 200.0), 10.0), (460.0, 30.0));
    }

    #[test]
    fn test_origin_stays_inside_vertically() {
        assert_eq!(tooltip_origin((100.0, 2.0), (80.0, 40.0), (600.0, 200.0), 10.0).1, 0.0);
        assert_eq!(tooltip_origin((100.0, 199.0), (80.0, 40.0), (600.0, 200.0), 10.0).1, 160.0);
        assert_eq!(tooltip_origin((5.0, 10.0), (80.0, 40.0), (60.0, 20.0), 10.0), (0.0, 0.0));
    }
}
