//! Chart projection and rendering.
//!
//! Readings are projected into two named series sharing a time-of-day label
//! axis: `Temperatura` on a left axis and `Umidade` on an independent right
//! axis. `render` wraps the projected data into the configuration document a
//! Chart.js-style renderer draws; the variant only picks `line` or `bar`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::error::ParseChartVariantError;
use crate::models::SensorReading;

pub const CHART_TITLE: &str = "Gráfico de Dados dos Sensores";

const TEMPERATURE_AXIS: &str = "y";
const HUMIDITY_AXIS: &str = "y1";

// ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Line,
    Bar,
}

impl ChartVariant {
    pub const ALL: [ChartVariant; 2] = [ChartVariant::Line, ChartVariant::Bar];

    pub fn key(self) -> &'static str {
        // ---
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }

    pub fn label(self) -> &'static str {
        // ---
        match self {
            Self::Line => "Linha",
            Self::Bar => "Barra",
        }
    }
}

impl FromStr for ChartVariant {
    type Err = ParseChartVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(ParseChartVariantError(other.to_string())),
        }
    }
}

impl fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One named series plotted against the shared labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    // ---
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub tension: f64,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    // ---
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    // ---
    pub display: bool,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    // ---
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    // ---
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AxisPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    // ---
    pub x: Axis,
    pub y: Axis,
    pub y1: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    // ---
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
}

impl Default for ChartOptions {
    /// Time on x, temperature on the left from zero, humidity on the right
    /// from zero without gridlines over the plot area.
    fn default() -> Self {
        // ---
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: Scales {
                x: Axis {
                    title: AxisTitle {
                        display: true,
                        text: "Tempo",
                    },
                    begin_at_zero: None,
                    position: None,
                    grid: None,
                },
                y: Axis {
                    title: AxisTitle {
                        display: true,
                        text: "Temperatura (°C)",
                    },
                    begin_at_zero: Some(true),
                    position: Some(AxisPosition::Left),
                    grid: None,
                },
                y1: Axis {
                    title: AxisTitle {
                        display: true,
                        text: "Umidade (%)",
                    },
                    begin_at_zero: Some(true),
                    position: Some(AxisPosition::Right),
                    grid: Some(GridOptions {
                        draw_on_chart_area: false,
                    }),
                },
            },
        }
    }
}

/// The document handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    // ---
    #[serde(rename = "type")]
    pub variant: ChartVariant,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Time-of-day label for a reading, in the display time zone.
pub fn time_label<Tz>(timestamp: &DateTime<chrono::Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M:%S").to_string()
}

/// Project already-filtered readings into the two dual-axis series.
pub fn project<Tz>(readings: &[SensorReading], tz: &Tz) -> ChartData
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    // ---
    let labels = readings.iter().map(|r| time_label(&r.timestamp, tz)).collect();

    let temperature = ChartSeries {
        label: "Temperatura",
        data: readings.iter().map(|r| r.temperatura).collect(),
        border_color: "rgba(75, 192, 192, 1)",
        background_color: "rgba(75, 192, 192, 0.2)",
        fill: false,
        tension: 0.1,
        y_axis_id: TEMPERATURE_AXIS,
    };

    let humidity = ChartSeries {
        label: "Umidade",
        data: readings.iter().map(|r| r.umidade).collect(),
        border_color: "rgba(255, 99, 132, 1)",
        background_color: "rgba(255, 99, 132, 0.2)",
        fill: false,
        tension: 0.1,
        y_axis_id: HUMIDITY_AXIS,
    };

    ChartData {
        labels,
        datasets: vec![temperature, humidity],
    }
}

pub fn render(variant: ChartVariant, data: ChartData) -> ChartConfig {
    ChartConfig {
        variant,
        data,
        options: ChartOptions::default(),
    }
}
