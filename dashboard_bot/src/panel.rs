use std::time::Duration;

use dashboard_metrics::debug::{debug_error, DEBUG};
use dashboard_metrics::decode::{self, DecodeError};
use dashboard_metrics::fetch::{self, FetchResult};
use dashboard_metrics::metric::Metric;
use dashboard_metrics::series;

use crate::chart;
use crate::render::Render;

/// What an empty panel shows in place of its chart.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// A panel's terminal state. The transition out of loading is final for
/// the run: no retry, no refresh.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PanelOutcome {
    Rendered,
    Empty,
    Failed,
}

/// Loads one panel end to end: fetch, decode, derive, render.
///
/// Every failure is absorbed here and becomes the panel's own fallback;
/// sibling panels are never affected.
pub async fn load_panel(
    render: &dyn Render,
    palette: &[String],
    base_url: &str,
    timeout: Duration,
    metric: Metric,
) -> PanelOutcome {
    let url = format!("{}/{}", base_url, metric.path());
    let result = fetch::fetch_text(&url, timeout).await;
    handle_result(render, palette, metric, result).await
}

/// The fetch-result half of a panel load, split from the request itself
/// so panel behavior can be exercised against canned responses.
async fn handle_result(
    render: &dyn Render,
    palette: &[String],
    metric: Metric,
    result: FetchResult,
) -> PanelOutcome {
    let body = match result {
        Ok(body) => body,
        Err(err) => {
            DEBUG.fetch_failed();
            debug_error(anyhow::Error::new(err).context(format!("fetching {}", metric.path())));
            return fail(render, metric).await;
        }
    };

    let value = match decode::decode(&body) {
        Ok(value) => value,
        Err(DecodeError::MalformedResponse { body }) => {
            DEBUG.decode_failed();
            debug_error(anyhow::format_err!(
                "malformed response from {}: {}",
                metric.path(),
                body
            ));
            return fail(render, metric).await;
        }
    };

    let shape = match metric.series_shape() {
        Some(shape) => shape,
        // The total panel is a bare number, not a record array
        None => match value.as_f64() {
            Some(total) => {
                let text = format_count(total);
                return match render.render_value(metric.panel_id(), &text).await {
                    Ok(()) => {
                        DEBUG.panel_rendered();
                        PanelOutcome::Rendered
                    }
                    Err(err) => {
                        debug_error(err.context(format!("rendering {}", metric.panel_id())));
                        fail(render, metric).await
                    }
                };
            }
            None => {
                DEBUG.decode_failed();
                debug_error(anyhow::format_err!(
                    "expected a number from {}, got: {}",
                    metric.path(),
                    value
                ));
                return fail(render, metric).await;
            }
        },
    };

    let records = match decode::records(value) {
        Ok(records) => records,
        Err(DecodeError::MalformedResponse { body }) => {
            DEBUG.decode_failed();
            debug_error(anyhow::format_err!(
                "expected an array from {}, got: {}",
                metric.path(),
                body
            ));
            return fail(render, metric).await;
        }
    };
    if records.is_empty() {
        DEBUG.panel_empty();
        if let Err(err) = render.show_message(metric.panel_id(), NO_DATA_MESSAGE).await {
            debug_error(err.context(format!("emptying {}", metric.panel_id())));
        }
        return PanelOutcome::Empty;
    }

    let series = series::derive(&shape, &records);
    let config = chart::assemble(metric, shape.kind, &series, palette);
    match render.render_chart(metric.panel_id(), &config).await {
        Ok(()) => {
            DEBUG.panel_rendered();
            PanelOutcome::Rendered
        }
        Err(err) => {
            debug_error(err.context(format!("rendering {}", metric.panel_id())));
            fail(render, metric).await
        }
    }
}

async fn fail(render: &dyn Render, metric: Metric) -> PanelOutcome {
    DEBUG.panel_failed();
    if let Err(err) = render
        .show_message(metric.panel_id(), metric.failure_message())
        .await
    {
        debug_error(err.context(format!("showing fallback for {}", metric.panel_id())));
    }
    PanelOutcome::Failed
}

/// Formats the visit total with Spanish thousands grouping (`1.234.567`).
fn format_count(total: f64) -> String {
    let whole = total.trunc() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
