use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;

use crate::chart::ChartConfig;
use crate::config::Config;

/// Configures the render backend from the loaded configuration.
pub fn from_config(config: &Config) -> Result<Box<dyn Render>> {
    match config.render_type.as_str() {
        "terminal" => Ok(Box::new(TerminalRender)),
        "chartjs" => Ok(Box::new(ChartJsRender {
            output_dir: config.output_dir.clone(),
        })),
        type_ => Err(anyhow::format_err!("unsupported RENDER_TYPE: {}", type_)),
    }
}

/// The Render trait must be implemented by each backend that is intended
/// to receive panel output.
///
/// A backend owns the actual drawing; this layer only hands over labels,
/// values, and styling. Each panel id is written by exactly one task, so
/// backends never see concurrent writes to the same panel.
#[async_trait]
pub trait Render: Send + Sync {
    /// Set the text of a scalar panel.
    async fn render_value(&self, panel_id: &str, text: &str) -> Result<()>;

    /// Draw a chart panel.
    async fn render_chart(&self, panel_id: &str, chart: &ChartConfig) -> Result<()>;

    /// Replace a panel's contents with a fixed fallback message.
    async fn show_message(&self, panel_id: &str, message: &str) -> Result<()>;
}

/// Prints each panel to stdout: scalar panels as one line, chart panels
/// as an aligned listing with a proportional bar per point.
pub struct TerminalRender;

#[async_trait]
impl Render for TerminalRender {
    async fn render_value(&self, panel_id: &str, text: &str) -> Result<()> {
        println!("{}: {}", panel_id, text);
        Ok(())
    }

    async fn render_chart(&self, panel_id: &str, chart: &ChartConfig) -> Result<()> {
        println!("{} ({})", panel_id, chart.kind);
        let dataset = match chart.data.datasets.first() {
            Some(dataset) => dataset,
            None => return Ok(()),
        };
        let max = dataset
            .data
            .iter()
            .filter_map(|value| *value)
            .fold(0.0_f64, f64::max);
        for (label, value) in chart.data.labels.iter().zip(&dataset.data) {
            match value {
                Some(value) => {
                    let width = if max > 0.0 {
                        ((value / max) * 30.0).round() as usize
                    } else {
                        0
                    };
                    println!(
                        "  {:<24} {:>10} {}",
                        label,
                        format_value(*value),
                        "#".repeat(width)
                    );
                }
                None => println!("  {:<24} {:>10}", label, "-"),
            }
        }
        Ok(())
    }

    async fn show_message(&self, panel_id: &str, message: &str) -> Result<()> {
        println!("{}: {}", panel_id, message);
        Ok(())
    }
}

/// Writes one `<panel-id>.json` per panel into the output directory, in
/// the configuration shape the page's charting component consumes.
/// Fallbacks are written as `{"message": ...}` so the page swaps the
/// panel's contents instead of drawing a chart.
pub struct ChartJsRender {
    pub output_dir: PathBuf,
}

impl ChartJsRender {
    async fn write_panel(&self, panel_id: &str, body: String) -> Result<()> {
        async_std::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("creating {}", self.output_dir.display()))?;
        let path = self.output_dir.join(format!("{}.json", panel_id));
        async_std::fs::write(&path, body)
            .await
            .with_context(|| format!("writing {}", path.display()))
    }
}

#[async_trait]
impl Render for ChartJsRender {
    async fn render_value(&self, panel_id: &str, text: &str) -> Result<()> {
        let body = serde_json::to_string_pretty(&json!({ "text": text }))?;
        self.write_panel(panel_id, body).await
    }

    async fn render_chart(&self, panel_id: &str, chart: &ChartConfig) -> Result<()> {
        let body = serde_json::to_string_pretty(chart)?;
        self.write_panel(panel_id, body).await
    }

    async fn show_message(&self, panel_id: &str, message: &str) -> Result<()> {
        let body = serde_json::to_string_pretty(&json!({ "message": message }))?;
        self.write_panel(panel_id, body).await
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whole_counts_print_without_a_fraction() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.50");
    }
}
