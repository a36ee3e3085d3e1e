use chrono::prelude::*;
use chrono::Locale;
use serde_json::{Map, Value};

use crate::metric::SeriesShape;
use crate::LabelStyle;

/// One chart point: a display label plus an optional numeric value.
///
/// A record with no numeric value keeps its position with `None`; filling
/// or skipping the gap is the chart component's concern, not ours.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Option<f64>,
}

pub type Series = Vec<SeriesPoint>;

/// Shapes decoded records into chart-ready points.
///
/// Record order is preserved as-is; the backend already aggregated and
/// ordered the data, so no sorting or grouping happens here.
pub fn derive(shape: &SeriesShape, records: &[Map<String, Value>]) -> Series {
    records
        .iter()
        .map(|record| SeriesPoint {
            label: label_of(shape, record),
            value: record.get(shape.value_field).and_then(Value::as_f64),
        })
        .collect()
}

fn label_of(shape: &SeriesShape, record: &Map<String, Value>) -> String {
    let raw = field_text(record, shape.label_field);
    match shape.label_style {
        LabelStyle::Plain => raw.unwrap_or_else(|| "Unknown".to_owned()),
        LabelStyle::Date => match raw {
            Some(date) => format_date(&date),
            None => "Invalid Date".to_owned(),
        },
        LabelStyle::Hour => match raw {
            Some(hour) => format_hour(&hour),
            None => "Unknown".to_owned(),
        },
        LabelStyle::Status => match raw {
            Some(status) => format!("Status {}", status),
            None => "Status Unknown".to_owned(),
        },
    }
}

/// A label field the backend sent as `""` or `null` counts as missing,
/// same as an absent key. Numeric values (e.g. an HTTP status code) are
/// printed as sent.
fn field_text(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Formats an ISO date as the Spanish short form the dashboard has always
/// shown: day, abbreviated month, numeric year (`1 ene 2024`).
fn format_date(raw: &str) -> String {
    let date = raw
        .parse::<NaiveDate>()
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()));
    match date {
        Ok(date) => date
            .format_localized("%-d %b %Y", Locale::es_ES)
            .to_string(),
        Err(_) => "Invalid Date".to_owned(),
    }
}

/// `"14:30"` (or `"14:30:00"`) becomes `"14:00"`; the hour portion is kept
/// verbatim, without zero padding.
fn format_hour(raw: &str) -> String {
    let hour = raw.split(':').next().unwrap_or(raw);
    format!("{}:00", hour)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metric::Metric;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        crate::decode::records(value).unwrap()
    }

    #[test]
    fn derives_date_labels_and_values_in_order() {
        let shape = Metric::VisitsByDay.series_shape().unwrap();
        let records = rows(json!([
            {"dia": "2024-01-01", "visitas": 5},
            {"dia": "2024-01-02", "visitas": 7},
        ]));
        let series = derive(&shape, &records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "1 ene 2024");
        assert_eq!(series[0].value, Some(5.0));
        assert_eq!(series[1].label, "2 ene 2024");
        assert_eq!(series[1].value, Some(7.0));
    }

    #[test]
    fn unparsable_dates_become_invalid_date() {
        let shape = Metric::VisitsByDay.series_shape().unwrap();
        let records = rows(json!([{"dia": "ayer", "visitas": 1}, {"visitas": 2}]));
        let series = derive(&shape, &records);
        assert_eq!(series[0].label, "Invalid Date");
        assert_eq!(series[1].label, "Invalid Date");
    }

    #[test]
    fn missing_labels_become_unknown_and_keep_their_position() {
        let shape = Metric::VisitsByCountry.series_shape().unwrap();
        let records = rows(json!([
            {"pais": "ES", "visitas": 9},
            {"visitas": 4},
            {"pais": "", "visitas": 2},
            {"pais": "FR", "visitas": 1},
        ]));
        let labels: Vec<_> = derive(&shape, &records)
            .into_iter()
            .map(|point| point.label)
            .collect();
        assert_eq!(labels, ["ES", "Unknown", "Unknown", "FR"]);
    }

    #[test]
    fn hour_labels_truncate_to_the_hour() {
        let shape = Metric::VisitsByHour.series_shape().unwrap();
        let records = rows(json!([
            {"hora": "14:30", "visitas": 3},
            {"hora": "9:05:59", "visitas": 1},
            {"visitas": 2},
        ]));
        let series = derive(&shape, &records);
        assert_eq!(series[0].label, "14:00");
        assert_eq!(series[1].label, "9:00");
        assert_eq!(series[2].label, "Unknown");
    }

    #[test]
    fn status_labels_get_the_status_prefix() {
        let shape = Metric::VisitsByStatus.series_shape().unwrap();
        let records = rows(json!([
            {"estado": "500", "cantidad": 2},
            {"estado": 404, "cantidad": 1},
            {"cantidad": 3},
        ]));
        let series = derive(&shape, &records);
        assert_eq!(series[0].label, "Status 500");
        assert_eq!(series[1].label, "Status 404");
        assert_eq!(series[2].label, "Status Unknown");
    }

    #[test]
    fn missing_values_stay_missing() {
        let shape = Metric::VisitsByCountry.series_shape().unwrap();
        let records = rows(json!([{"pais": "ES"}, {"pais": "FR", "visitas": "many"}]));
        let series = derive(&shape, &records);
        assert_eq!(series[0].value, None);
        assert_eq!(series[1].value, None);
    }
}
