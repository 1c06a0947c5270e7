//! Payload-backed extractors
//!
//! The payload stores each chart as parallel arrays keyed by date. Arrays are
//! zipped element-wise and the result truncated to the shortest input, so a
//! length mismatch drops the unmatched tail instead of failing the facet.

use serde_json::Value;

use crate::models::{BoxOfficePoint, SchedulePoint, WishPoint};
use crate::parser::payload::{lookup, Payload};

/// Payload key holding the canonical movie name
pub const MOVIE_NAME_KEY: &str = "movieName";

/// Daily box office, `boxshowChartData.chartData.box.{date,real,forecast}`
pub fn extract_box_office(payload: &Payload) -> Vec<BoxOfficePoint> {
    let chart = ["boxshowChartData", "chartData", "box"];
    let (Some(dates), Some(real), Some(forecast)) = (
        chart_array(payload, &chart, "date"),
        chart_array(payload, &chart, "real"),
        chart_array(payload, &chart, "forecast"),
    ) else {
        return Vec::new();
    };

    dates
        .iter()
        .zip(real)
        .zip(forecast)
        .map(|((date, actual), forecast)| BoxOfficePoint {
            date: value_text(date),
            actual: actual.clone(),
            forecast: forecast.clone(),
        })
        .collect()
}

/// Daily screenings, `boxshowChartData.chartData.show.{date,real}`
pub fn extract_schedule(payload: &Payload) -> Vec<SchedulePoint> {
    let chart = ["boxshowChartData", "chartData", "show"];
    let (Some(dates), Some(counts)) = (
        chart_array(payload, &chart, "date"),
        chart_array(payload, &chart, "real"),
    ) else {
        return Vec::new();
    };

    dates
        .iter()
        .zip(counts)
        .map(|(date, count)| SchedulePoint {
            date: value_text(date),
            count: count.clone(),
        })
        .collect()
}

/// Pre-release wish counts from the first entry of `wishData.series`
///
/// Later series entries are ignored. Points lacking `xValue` or `yValue`
/// keep their slot with a null date or a null count.
pub fn extract_wish_series(payload: &Payload) -> Vec<WishPoint> {
    let points = lookup(payload, &["wishData", "series"])
        .and_then(Value::as_array)
        .and_then(|series| series.first())
        .and_then(|first| first.get("points"))
        .and_then(Value::as_array);

    let Some(points) = points else {
        return Vec::new();
    };

    points
        .iter()
        .map(|point| WishPoint {
            date: point.get("xValue").filter(|v| !v.is_null()).map(value_text),
            wish_count: point.get("yValue").cloned().unwrap_or(Value::Null),
        })
        .collect()
}

/// Canonical movie name carried by the payload, if any
pub fn extract_movie_name(payload: &Payload) -> Option<String> {
    payload.get(MOVIE_NAME_KEY).map(value_text)
}

fn chart_array<'a>(payload: &'a Payload, chart: &[&str], key: &str) -> Option<&'a Vec<Value>> {
    lookup(payload, chart)?.get(key)?.as_array()
}

/// Render a scalar as text; strings are taken without quotes
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_box_office_truncates_to_shortest() {
        let p = payload(json!({
            "boxshowChartData": {"chartData": {"box": {
                "date": ["d1", "d2", "d3", "d4", "d5"],
                "real": [1, 2, 3],
                "forecast": [10, 20, 30, 40]
            }}}
        }));

        let series = extract_box_office(&p);
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].date, "d3");
        assert_eq!(series[2].actual, json!(3));
        assert_eq!(series[2].forecast, json!(30));
    }

    #[test]
    fn test_box_office_missing_array_is_empty() {
        let p = payload(json!({
            "boxshowChartData": {"chartData": {"box": {
                "date": ["d1"],
                "real": [1]
            }}}
        }));
        assert!(extract_box_office(&p).is_empty());
    }

    #[test]
    fn test_schedule_series() {
        let p = payload(json!({
            "boxshowChartData": {"chartData": {"show": {
                "date": ["2024-02-10", "2024-02-11"],
                "real": [145000.0, 150321.0, 9.0]
            }}}
        }));

        let series = extract_schedule(&p);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-02-10");
        assert_eq!(series[1].count, json!(150321.0));
    }

    #[test]
    fn test_wish_series_first_entry_only() {
        let p = payload(json!({
            "wishData": {"series": [
                {"points": [{"xValue": "2024-01-01", "yValue": 100}]},
                {"points": [{"xValue": "2024-01-01", "yValue": 999}]}
            ]}
        }));

        let series = extract_wish_series(&p);
        assert_eq!(
            series,
            vec![WishPoint {
                date: Some("2024-01-01".into()),
                wish_count: json!(100)
            }]
        );
    }

    #[test]
    fn test_wish_series_empty_list() {
        let p = payload(json!({"wishData": {"series": []}}));
        assert!(extract_wish_series(&p).is_empty());
        assert!(extract_wish_series(&Payload::new()).is_empty());
    }

    #[test]
    fn test_wish_point_missing_fields() {
        let p = payload(json!({"wishData": {"series": [{"points": [
            {"xValue": 20240101},
            {"yValue": 42},
            {"xValue": null, "yValue": 7}
        ]}]}}));
        let series = extract_wish_series(&p);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date.as_deref(), Some("20240101"));
        assert_eq!(series[0].wish_count, Value::Null);
        assert_eq!(series[1].date, None);
        assert_eq!(series[1].wish_count, json!(42));
        assert_eq!(series[2].date, None);

        let json = serde_json::to_value(&series[1]).unwrap();
        assert_eq!(json, json!({"date": null, "wish_count": 42}));
    }

    #[test]
    fn test_movie_name() {
        let p = payload(json!({"movieName": "热辣滚烫"}));
        assert_eq!(extract_movie_name(&p).as_deref(), Some("热辣滚烫"));
        assert_eq!(extract_movie_name(&Payload::new()), None);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("x")), "x");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&Value::Null), "");
    }
}
