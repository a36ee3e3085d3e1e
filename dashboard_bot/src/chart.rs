use serde::Serialize;

use dashboard_metrics::metric::Metric;
use dashboard_metrics::series::Series;
use dashboard_metrics::ChartKind;

/// A chart configuration in the exact shape the charting component
/// consumes: `{"type", "data": {"labels", "datasets"}, "options"}`.
#[derive(Clone, Debug, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,

    /// Missing values serialize as `null` so the chart shows a gap
    /// instead of a fabricated zero.
    pub data: Vec<Option<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub background_color: BackgroundColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// Bars and lines take one color; pie and doughnut slices cycle the
/// whole palette.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum BackgroundColor {
    One(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Clone, Debug, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub box_width: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: Ticks,
}

#[derive(Clone, Debug, Serialize)]
pub struct Ticks {
    pub precision: u8,
}

/// Builds one panel's chart configuration with the styling the dashboard
/// has always used: filled line charts with a top legend, single-color
/// bars without a legend, and palette-cycled pie/doughnut slices with a
/// right-hand legend.
pub fn assemble(metric: Metric, kind: ChartKind, series: &Series, palette: &[String]) -> ChartConfig {
    let labels = series.iter().map(|point| point.label.clone()).collect();
    let values: Vec<Option<f64>> = series.iter().map(|point| point.value).collect();
    let accent = accent_color(metric, palette).to_string();

    let (dataset, legend, scales) = match kind {
        ChartKind::Line => (
            Dataset {
                label: Some("Visits"),
                data: values,
                border_color: Some(accent.clone()),
                // "20" is the hex alpha suffix for the translucent fill
                background_color: BackgroundColor::One(format!("{}20", accent)),
                fill: Some(true),
                tension: Some(0.4),
            },
            Legend {
                display: true,
                position: Some("top"),
                labels: None,
            },
            Some(count_scales()),
        ),
        ChartKind::Bar => (
            Dataset {
                label: Some("Visits"),
                data: values,
                border_color: None,
                background_color: BackgroundColor::One(accent),
                fill: None,
                tension: None,
            },
            Legend {
                display: false,
                position: None,
                labels: None,
            },
            Some(count_scales()),
        ),
        ChartKind::Pie | ChartKind::Doughnut => (
            Dataset {
                label: None,
                data: values,
                border_color: None,
                background_color: BackgroundColor::Many(palette.to_vec()),
                fill: None,
                tension: None,
            },
            Legend {
                display: true,
                position: Some("right"),
                labels: Some(LegendLabels { box_width: 15 }),
            },
            None,
        ),
    };

    ChartConfig {
        kind: kind.as_str(),
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins { legend },
            scales,
        },
    }
}

/// Counts are whole numbers, so the value axis starts at zero and never
/// shows fractional ticks.
fn count_scales() -> Scales {
    Scales {
        y: Axis {
            begin_at_zero: true,
            ticks: Ticks { precision: 0 },
        },
    }
}

/// Each single-color panel keeps its long-standing slot in the palette.
fn accent_color<'a>(metric: Metric, palette: &'a [String]) -> &'a str {
    let slot = match metric {
        Metric::VisitsByDay => 0,
        Metric::VisitsByCountry => 1,
        Metric::VisitsByHour => 3,
        Metric::VisitsByStatus => 5,
        _ => 0,
    };
    &palette[slot % palette.len()]
}

#[cfg(test)]
mod test {
    use super::*;
    use dashboard_metrics::series::SeriesPoint;
    use serde_json::json;

    fn palette() -> Vec<String> {
        vec![
            "#3B82F6".to_string(),
            "#10B981".to_string(),
            "#F59E0B".to_string(),
            "#EF4444".to_string(),
            "#8B5CF6".to_string(),
            "#EC4899".to_string(),
        ]
    }

    fn series() -> Series {
        vec![
            SeriesPoint {
                label: "1 ene 2024".to_string(),
                value: Some(5.0),
            },
            SeriesPoint {
                label: "2 ene 2024".to_string(),
                value: None,
            },
        ]
    }

    #[test]
    fn line_charts_fill_with_a_translucent_accent() {
        let config = assemble(Metric::VisitsByDay, ChartKind::Line, &series(), &palette());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], json!("line"));
        assert_eq!(value["data"]["labels"], json!(["1 ene 2024", "2 ene 2024"]));
        // The missing value comes through as a null gap, not a zero
        assert_eq!(value["data"]["datasets"][0]["data"], json!([5.0, null]));
        assert_eq!(value["data"]["datasets"][0]["borderColor"], json!("#3B82F6"));
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            json!("#3B82F620")
        );
        assert_eq!(value["data"]["datasets"][0]["tension"], json!(0.4));
        assert_eq!(value["options"]["plugins"]["legend"]["position"], json!("top"));
        assert_eq!(
            value["options"]["scales"]["y"]["beginAtZero"],
            json!(true)
        );
    }

    #[test]
    fn bar_charts_hide_the_legend() {
        let config = assemble(Metric::VisitsByStatus, ChartKind::Bar, &series(), &palette());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], json!("bar"));
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            json!("#EC4899")
        );
        assert_eq!(value["options"]["plugins"]["legend"]["display"], json!(false));
    }

    #[test]
    fn doughnut_charts_cycle_the_whole_palette() {
        let config = assemble(
            Metric::VisitsByDevice,
            ChartKind::Doughnut,
            &series(),
            &palette(),
        );
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            serde_json::to_value(palette()).unwrap()
        );
        assert_eq!(
            value["options"]["plugins"]["legend"]["labels"]["boxWidth"],
            json!(15)
        );
        assert!(value["options"].get("scales").is_none());
    }
}
