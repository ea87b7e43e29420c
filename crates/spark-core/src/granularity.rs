//! Time-axis granularity selection
//!
//! Picks a (minor, major) pair of calendar units for the sparkline x axis from
//! a fixed table of combinations, based on the dataset span and the pixels
//! available, unless the caller forces one.

use std::fmt::Write;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Sample, time_extent};

/// Horizontal room a single minor tick label needs (label width + spacing)
pub const MIN_PIXELS_PER_TICK: f64 = 70.0;

/// Pattern used when a custom axis is requested without a usable format
pub const DEFAULT_CUSTOM_FORMAT: &str = "%Y-%m-%d";

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AxisFormatError {
    #[error("unknown axis format `{0}`")]
    Unknown(String),
    #[error("invalid date format pattern `{0}`")]
    InvalidPattern(String),
}

// ============================================================================
// TIME UNITS
// ============================================================================

/// Calendar unit a tick series is aligned to (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Nominal length in milliseconds (months are 30 days, years 365)
    pub fn approx_millis(&self) -> i64 {
        match self {
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Month => 30 * DAY_MS,
            Self::Year => 365 * DAY_MS,
        }
    }

    /// Whole units contained in a span
    pub fn units_in(&self, span_ms: i64) -> i64 {
        span_ms.max(0) / self.approx_millis()
    }

    /// Start of the unit containing `timestamp_ms`
    pub fn floor(&self, timestamp_ms: i64) -> Option<i64> {
        let dt = Utc.timestamp_millis_opt(timestamp_ms).single()?;
        let floored = match self {
            Self::Minute => dt.with_second(0)?.with_nanosecond(0)?,
            Self::Hour => dt.with_minute(0)?.with_second(0)?.with_nanosecond(0)?,
            Self::Day => start_of(dt.date_naive())?,
            Self::Month => start_of(NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1)?)?,
            Self::Year => start_of(NaiveDate::from_ymd_opt(dt.year(), 1, 1)?)?,
        };
        Some(floored.timestamp_millis())
    }

    /// Move `timestamp_ms` forward by `n` units
    pub fn offset(&self, timestamp_ms: i64, n: u32) -> Option<i64> {
        match self {
            Self::Minute | Self::Hour | Self::Day => {
                timestamp_ms.checked_add(self.approx_millis().checked_mul(n as i64)?)
            }
            Self::Month | Self::Year => {
                let months = if *self == Self::Year { n.checked_mul(12)? } else { n };
                let dt = Utc.timestamp_millis_opt(timestamp_ms).single()?;
                dt.checked_add_months(Months::new(months))
                    .map(|d| d.timestamp_millis())
            }
        }
    }
}

fn start_of(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

// ============================================================================
// STRATEGY PATTERN: Tick Formatting
// ============================================================================

/// Strategy trait for turning a tick instant into a label
pub trait TimeFormatter: Send + Sync {
    fn format(&self, timestamp_ms: i64) -> String;
}

/// strftime-style tick formatter, validated on construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickFormat {
    pattern: String,
}

impl TickFormat {
    /// Parse and validate a strftime pattern
    pub fn parse(pattern: &str) -> Result<Self, AxisFormatError> {
        if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(AxisFormatError::InvalidPattern(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// Trusted patterns from the combination table
    fn fixed(pattern: &'static str) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for TickFormat {
    fn default() -> Self {
        Self::fixed(DEFAULT_CUSTOM_FORMAT)
    }
}

impl TimeFormatter for TickFormat {
    fn format(&self, timestamp_ms: i64) -> String {
        let Some(dt) = Utc.timestamp_millis_opt(timestamp_ms).single() else {
            return String::new();
        };
        let mut out = String::with_capacity(self.pattern.len() + 8);
        if write!(out, "{}", dt.format(&self.pattern)).is_err() {
            tracing::warn!(pattern = %self.pattern, "tick format failed");
            out.clear();
        }
        out
    }
}

// ============================================================================
// GRANULARITY COMBINATIONS
// ============================================================================

/// Fixed (minor, major) tick unit pairings, finest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GranularityCombination {
    #[serde(rename = "minute-hour")]
    MinuteHour,
    #[serde(rename = "hour-daymonth")]
    HourDay,
    #[serde(rename = "day-month")]
    DayMonth,
    #[serde(rename = "month-year")]
    MonthYear,
}

impl GranularityCombination {
    /// Table order, finest to coarsest
    pub fn all() -> &'static [Self] {
        &[Self::MinuteHour, Self::HourDay, Self::DayMonth, Self::MonthYear]
    }

    pub fn minor_unit(&self) -> TimeUnit {
        match self {
            Self::MinuteHour => TimeUnit::Minute,
            Self::HourDay => TimeUnit::Hour,
            Self::DayMonth => TimeUnit::Day,
            Self::MonthYear => TimeUnit::Month,
        }
    }

    pub fn minor_format(&self) -> &'static str {
        match self {
            Self::MinuteHour => "%M m",
            Self::HourDay => "%I %p",
            Self::DayMonth => "%e",
            Self::MonthYear => "%b",
        }
    }

    /// Coarser banding unit; the two coarsest combinations have none
    pub fn major_unit(&self) -> Option<TimeUnit> {
        match self {
            Self::MinuteHour => Some(TimeUnit::Hour),
            Self::HourDay => Some(TimeUnit::Day),
            Self::DayMonth | Self::MonthYear => None,
        }
    }

    pub fn major_format(&self) -> Option<&'static str> {
        match self {
            Self::MinuteHour => Some("%I %p"),
            Self::HourDay => Some("%d %b"),
            Self::DayMonth | Self::MonthYear => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinuteHour => "minute-hour",
            Self::HourDay => "hour-daymonth",
            Self::DayMonth => "day-month",
            Self::MonthYear => "month-year",
        }
    }
}

impl std::fmt::Display for GranularityCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GranularityCombination {
    type Err = AxisFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "minute-hour" => Ok(Self::MinuteHour),
            "hour-daymonth" | "hour-day" => Ok(Self::HourDay),
            "day-month" => Ok(Self::DayMonth),
            "month-year" => Ok(Self::MonthYear),
            _ => Err(AxisFormatError::Unknown(s.to_string())),
        }
    }
}

// ============================================================================
// TICK SETTINGS
// ============================================================================

/// Tick count and label formatter for one axis band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSetting {
    pub tick_count: usize,
    pub format: TickFormat,
    /// Calendar alignment; `None` for custom axes (evenly spaced ticks)
    pub unit: Option<TimeUnit>,
}

impl TickSetting {
    pub fn format(&self, timestamp_ms: i64) -> String {
        self.format.format(timestamp_ms)
    }

    /// Tick instants inside `[start, end]`, at most `tick_count` of them
    pub fn tick_values(&self, start: i64, end: i64) -> Vec<i64> {
        if self.tick_count == 0 || start > end {
            return Vec::new();
        }

        let Some(unit) = self.unit else {
            return even_ticks(start, end, self.tick_count);
        };

        let unit_ms = unit.approx_millis();
        let span = end.saturating_sub(start);
        let units_span = span / unit_ms + i64::from(span % unit_ms != 0);
        let step = usize::try_from(units_span.max(1))
            .unwrap_or(usize::MAX)
            .div_ceil(self.tick_count)
            .max(1);
        let step = u32::try_from(step).unwrap_or(u32::MAX);

        let Some(mut first) = unit.floor(start) else {
            return Vec::new();
        };
        if first < start {
            match unit.offset(first, 1) {
                Some(next) => first = next,
                None => return Vec::new(),
            }
        }

        let mut ticks = Vec::with_capacity(self.tick_count);
        let mut k = 0u32;
        while ticks.len() < self.tick_count {
            let Some(t) = k.checked_mul(step).and_then(|n| unit.offset(first, n)) else {
                break;
            };
            if t > end {
                break;
            }
            ticks.push(t);
            k += 1;
        }
        ticks
    }
}

fn even_ticks(start: i64, end: i64, count: usize) -> Vec<i64> {
    if count == 1 {
        return vec![start];
    }
    let span = end as f64 - start as f64;
    (0..count)
        .map(|i| (start as f64 + span * i as f64 / (count - 1) as f64).round() as i64)
        .collect()
}

/// Result of a granularity decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    /// `None` in custom mode
    pub combination: Option<GranularityCombination>,
    pub minor: TickSetting,
    pub major: Option<TickSetting>,
}

// ============================================================================
// OVERRIDES & CONFIGURATION
// ============================================================================

/// Manual replacement for span-based selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisOverride {
    Combination(GranularityCombination),
    Custom {
        ticks: Option<usize>,
        format: Option<String>,
    },
}

/// Axis options as supplied by the embedding page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    /// A combination name, `"custom"`, or unset for automatic selection
    pub force_axis_format: Option<String>,
    /// Minor tick count, custom mode only
    pub forced_x_ticks: Option<usize>,
    /// strftime pattern, custom mode only
    pub forced_x_format: Option<String>,
}

impl AxisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(mut self, combination: GranularityCombination) -> Self {
        self.force_axis_format = Some(combination.as_str().to_string());
        self
    }

    pub fn custom(mut self, ticks: usize, format: impl Into<String>) -> Self {
        self.force_axis_format = Some("custom".to_string());
        self.forced_x_ticks = Some(ticks);
        self.forced_x_format = Some(format.into());
        self
    }

    /// Resolve the configured override; unknown names mean automatic selection
    pub fn axis_override(&self) -> Option<AxisOverride> {
        let raw = self.force_axis_format.as_deref()?;
        if raw.trim().eq_ignore_ascii_case("custom") {
            return Some(AxisOverride::Custom {
                ticks: self.forced_x_ticks,
                format: self.forced_x_format.clone(),
            });
        }
        match raw.parse::<GranularityCombination>() {
            Ok(combination) => Some(AxisOverride::Combination(combination)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring axis override, using automatic selection");
                None
            }
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Upper bound on minor ticks that fit in `pixel_width`
pub fn max_ticks_for_width(pixel_width: f64) -> usize {
    if pixel_width.is_finite() && pixel_width > 0.0 {
        (pixel_width / MIN_PIXELS_PER_TICK).floor() as usize
    } else {
        0
    }
}

/// Coarsest combination whose minor unit fits at least once in `span_ms`
pub fn combination_for_span(span_ms: i64) -> GranularityCombination {
    GranularityCombination::all()
        .iter()
        .rev()
        .copied()
        .find(|c| c.minor_unit().units_in(span_ms) >= 1)
        .unwrap_or(GranularityCombination::MinuteHour)
}

/// Pick minor/major tick settings for a series drawn `pixel_width` wide
pub fn select_granularity(
    samples: &[Sample],
    pixel_width: f64,
    axis_override: Option<&AxisOverride>,
) -> AxisSettings {
    let max_ticks = max_ticks_for_width(pixel_width);
    let span = time_extent(samples).map(|(lo, hi)| hi.saturating_sub(lo));

    let combination = match axis_override {
        Some(AxisOverride::Custom { ticks, format }) => {
            return custom_settings(*ticks, format.as_deref());
        }
        Some(AxisOverride::Combination(c)) => *c,
        None => span.map_or(GranularityCombination::MonthYear, combination_for_span),
    };

    tracing::debug!(%combination, ?span, max_ticks, "selected axis granularity");
    settings_for(combination, span, max_ticks)
}

fn settings_for(combination: GranularityCombination, span: Option<i64>, max_ticks: usize) -> AxisSettings {
    let minor_unit = combination.minor_unit();
    let minor = TickSetting {
        tick_count: span.map_or(0, |s| capped(minor_unit.units_in(s).max(1), max_ticks)),
        format: TickFormat::fixed(combination.minor_format()),
        unit: Some(minor_unit),
    };

    let major = combination
        .major_unit()
        .zip(combination.major_format())
        .map(|(unit, pattern)| TickSetting {
            tick_count: span.map_or(0, |s| capped(unit.units_in(s).saturating_add(1), max_ticks)),
            format: TickFormat::fixed(pattern),
            unit: Some(unit),
        });

    AxisSettings {
        combination: Some(combination),
        minor,
        major,
    }
}

fn capped(units: i64, max_ticks: usize) -> usize {
    usize::try_from(units).map_or(max_ticks, |n| n.min(max_ticks))
}

fn custom_settings(ticks: Option<usize>, format: Option<&str>) -> AxisSettings {
    if ticks.is_none() || format.is_none() {
        tracing::warn!(?ticks, ?format, "custom axis needs both forced ticks and format");
    }

    let format = match format.map(TickFormat::parse) {
        Some(Ok(f)) => f,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "falling back to default custom format");
            TickFormat::fixed(DEFAULT_CUSTOM_FORMAT)
        }
        None => TickFormat::fixed(DEFAULT_CUSTOM_FORMAT),
    };

    AxisSettings {
        combination: None,
        minor: TickSetting {
            tick_count: ticks.unwrap_or(0),
            format,
            unit: None,
        },
        major: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn millis(rfc3339: &str) -> i64 {
        rfc3339.parse::<DateTime<Utc>>().unwrap().timestamp_millis()
    }

    fn spanning(span_ms: i64) -> Vec<Sample> {
        let start = millis("2020-01-01T00:00:00Z");
        vec![Sample::new(start, 1.0), Sample::new(start + span_ms, 2.0)]
    }

    #[rstest]
    #[case(0, GranularityCombination::MinuteHour)]
    #[case(30 * MINUTE_MS, GranularityCombination::MinuteHour)]
    #[case(HOUR_MS - 1, GranularityCombination::MinuteHour)]
    #[case(HOUR_MS, GranularityCombination::HourDay)]
    #[case(5 * HOUR_MS, GranularityCombination::HourDay)]
    #[case(3 * DAY_MS, GranularityCombination::DayMonth)]
    #[case(29 * DAY_MS, GranularityCombination::DayMonth)]
    #[case(90 * DAY_MS, GranularityCombination::MonthYear)]
    #[case(3 * 365 * DAY_MS, GranularityCombination::MonthYear)]
    fn test_automatic_selection(#[case] span: i64, #[case] expected: GranularityCombination) {
        let settings = select_granularity(&spanning(span), 800.0, None);
        assert_eq!(settings.combination, Some(expected));
    }

    #[test]
    fn test_override_wins() {
        let samples = spanning(3 * 365 * DAY_MS);
        let forced = AxisOverride::Combination(GranularityCombination::HourDay);
        let settings = select_granularity(&samples, 800.0, Some(&forced));

        assert_eq!(settings.combination, Some(GranularityCombination::HourDay));
        assert_eq!(settings.minor.unit, Some(TimeUnit::Hour));
        assert_eq!(settings.major.as_ref().map(|m| m.unit), Some(Some(TimeUnit::Day)));
    }

    #[test]
    fn test_empty_falls_back_to_month_year() {
        let settings = select_granularity(&[], 800.0, None);

        assert_eq!(settings.combination, Some(GranularityCombination::MonthYear));
        assert_eq!(settings.minor.tick_count, 0);
        assert!(settings.major.is_none());
    }

    #[test]
    fn test_major_band_only_for_fine_combinations() {
        for c in GranularityCombination::all() {
            let settings = select_granularity(&spanning(DAY_MS), 800.0, Some(&AxisOverride::Combination(*c)));
            assert_eq!(settings.major.is_some(), c.major_unit().is_some(), "{c}");
        }
    }

    #[test]
    fn test_tick_count_bounded_by_width() {
        let samples = spanning(5 * HOUR_MS);

        let wide = select_granularity(&samples, 800.0, None);
        assert_eq!(wide.minor.tick_count, 5);

        let narrow = select_granularity(&samples, 150.0, None);
        assert_eq!(narrow.minor.tick_count, 2);

        let tiny = select_granularity(&samples, 10.0, None);
        assert_eq!(tiny.minor.tick_count, 0);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let samples = spanning(7 * DAY_MS);
        let a = select_granularity(&samples, 640.0, None);
        let b = select_granularity(&samples, 640.0, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_mode() {
        let custom = AxisOverride::Custom {
            ticks: Some(4),
            format: Some("%H:%M".to_string()),
        };
        let settings = select_granularity(&spanning(DAY_MS), 800.0, Some(&custom));

        assert_eq!(settings.combination, None);
        assert_eq!(settings.minor.tick_count, 4);
        assert_eq!(settings.minor.format.pattern(), "%H:%M");
        assert_eq!(settings.minor.unit, None);
        assert!(settings.major.is_none());
    }

    #[test]
    fn test_custom_mode_incomplete_is_degenerate() {
        let missing_format = AxisOverride::Custom { ticks: Some(3), format: None };
        let settings = select_granularity(&spanning(DAY_MS), 800.0, Some(&missing_format));
        assert_eq!(settings.minor.tick_count, 3);
        assert_eq!(settings.minor.format.pattern(), DEFAULT_CUSTOM_FORMAT);

        let missing_ticks = AxisOverride::Custom { ticks: None, format: Some("%H".into()) };
        let settings = select_granularity(&spanning(DAY_MS), 800.0, Some(&missing_ticks));
        assert_eq!(settings.minor.tick_count, 0);
        assert!(settings.major.is_none());

        let bad_pattern = AxisOverride::Custom { ticks: Some(2), format: Some("%Q".into()) };
        let settings = select_granularity(&spanning(DAY_MS), 800.0, Some(&bad_pattern));
        assert_eq!(settings.minor.format.pattern(), DEFAULT_CUSTOM_FORMAT);
    }

    #[test]
    fn test_axis_config_override() {
        assert_eq!(AxisConfig::new().axis_override(), None);
        assert_eq!(
            AxisConfig::new().force(GranularityCombination::DayMonth).axis_override(),
            Some(AxisOverride::Combination(GranularityCombination::DayMonth))
        );
        assert_eq!(
            AxisConfig::new().custom(5, "%d").axis_override(),
            Some(AxisOverride::Custom { ticks: Some(5), format: Some("%d".into()) })
        );

        let invalid = AxisConfig {
            force_axis_format: Some("fortnight".into()),
            ..Default::default()
        };
        assert_eq!(invalid.axis_override(), None);
    }

    #[test]
    fn test_axis_config_from_json() {
        let config: AxisConfig = serde_json::from_str(
            r#"{ "forceAxisFormat": "custom", "forcedXTicks": 6, "forcedXFormat": "%b %d" }"#,
        )
        .unwrap();

        assert_eq!(config.forced_x_ticks, Some(6));
        assert!(matches!(config.axis_override(), Some(AxisOverride::Custom { .. })));
    }

    #[test]
    fn test_combination_from_str() {
        assert_eq!("MINUTE_HOUR".parse::<GranularityCombination>(), Ok(GranularityCombination::MinuteHour));
        assert_eq!("hour-daymonth".parse::<GranularityCombination>(), Ok(GranularityCombination::HourDay));
        assert_eq!("HOUR_DAY".parse::<GranularityCombination>(), Ok(GranularityCombination::HourDay));
        assert_eq!("Month-Year".parse::<GranularityCombination>(), Ok(GranularityCombination::MonthYear));
        assert!("weekly".parse::<GranularityCombination>().is_err());
    }

    #[test]
    fn test_tick_format() {
        let t = millis("2020-01-05T13:40:00Z");

        assert_eq!(TickFormat::fixed("%M m").format(t), "40 m");
        assert_eq!(TickFormat::fixed("%I %p").format(t), "01 PM");
        assert_eq!(TickFormat::fixed("%d %b").format(t), "05 Jan");
        assert_eq!(TickFormat::fixed("%e").format(t), " 5");
        assert!(TickFormat::parse("%Q").is_err());
        assert!(TickFormat::parse("").is_err());
    }

    #[test]
    fn test_floor_and_offset() {
        let t = millis("2020-03-15T13:40:12Z");

        assert_eq!(TimeUnit::Minute.floor(t), Some(millis("2020-03-15T13:40:00Z")));
        assert_eq!(TimeUnit::Hour.floor(t), Some(millis("2020-03-15T13:00:00Z")));
        assert_eq!(TimeUnit::Day.floor(t), Some(millis("2020-03-15T00:00:00Z")));
        assert_eq!(TimeUnit::Month.floor(t), Some(millis("2020-03-01T00:00:00Z")));
        assert_eq!(TimeUnit::Year.floor(t), Some(millis("2020-01-01T00:00:00Z")));

        let jan31 = millis("2020-01-31T00:00:00Z");
        assert_eq!(TimeUnit::Month.offset(jan31, 1), Some(millis("2020-02-29T00:00:00Z")));
        assert_eq!(TimeUnit::Year.offset(t, 1), Some(millis("2021-03-15T13:40:12Z")));
    }

    #[test]
    fn test_hourly_tick_values() {
        let setting = TickSetting {
            tick_count: 10,
            format: TickFormat::fixed("%I %p"),
            unit: Some(TimeUnit::Hour),
        };
        let start = millis("2020-01-01T00:30:00Z");
        let end = millis("2020-01-01T05:10:00Z");

        let hours: Vec<String> = setting
            .tick_values(start, end)
            .into_iter()
            .map(|t| TickFormat::fixed("%H").format(t))
            .collect();
        assert_eq!(hours, vec!["01", "02", "03", "04", "05"]);

        let sparse = TickSetting { tick_count: 2, ..setting };
        assert_eq!(
            sparse.tick_values(start, end),
            vec![millis("2020-01-01T01:00:00Z"), millis("2020-01-01T04:00:00Z")]
        );
    }

    #[test]
    fn test_monthly_tick_values() {
        let setting = TickSetting {
            tick_count: 12,
            format: TickFormat::fixed("%b"),
            unit: Some(TimeUnit::Month),
        };
        let labels: Vec<String> = setting
            .tick_values(millis("2020-01-15T00:00:00Z"), millis("2020-06-01T00:00:00Z"))
            .into_iter()
            .map(|t| setting.format(t))
            .collect();

        assert_eq!(labels, vec!["Feb", "Mar", "Apr", "May", "Jun"]);
    }

    #[test]
    fn test_custom_tick_values_are_even() {
        let setting = TickSetting {
            tick_count: 3,
            format: TickFormat::fixed("%H"),
            unit: None,
        };
        assert_eq!(setting.tick_values(0, 100), vec![0, 50, 100]);
        assert_eq!(setting.tick_values(100, 0), Vec::<i64>::new());
    }

    #[test]
    fn test_extreme_span_does_not_overflow() {
        let samples = vec![Sample::new(i64::MIN, 1.0), Sample::new(i64::MAX, 2.0)];
        let settings = select_granularity(&samples, 800.0, None);

        assert_eq!(settings.combination, Some(GranularityCombination::MonthYear));
        assert_eq!(settings.minor.tick_count, max_ticks_for_width(800.0));
        assert!(settings.minor.tick_values(i64::MIN, i64::MAX).is_empty());

        let hourly = TickSetting {
            tick_count: 4,
            format: TickFormat::fixed("%H"),
            unit: Some(TimeUnit::Hour),
        };
        assert!(hourly.tick_values(-HOUR_MS, i64::MAX).len() <= 4);

        let custom = TickSetting { unit: None, ..hourly };
        assert_eq!(custom.tick_values(i64::MIN, i64::MAX).len(), 4);
    }
}
