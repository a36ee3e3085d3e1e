use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    /// Neither parse strategy succeeded. The body is carried for the
    /// operator log only and is never shown to the end user.
    #[error("malformed response body")]
    MalformedResponse { body: String },
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Parses a metric endpoint's response body.
///
/// The backend sometimes emits adjacent JSON objects with no separator
/// (`{..}{..}`) where an array is expected. When the straight parse fails,
/// every `}{` boundary gets a comma and the whole body is wrapped in an
/// array before a second attempt. The substitution is applied blindly, so
/// a body that is already invalid for another reason and happens to
/// contain `}{` inside a string would be mis-split; the straight parse
/// shields all valid JSON from that. Remove this once the backend emits
/// proper arrays.
pub fn decode(raw: &str) -> DecodeResult<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }
    let repaired = format!("[{}]", raw.replace("}{", "},{"));
    match serde_json::from_str(&repaired) {
        Ok(value) => Ok(value),
        Err(_) => Err(DecodeError::MalformedResponse {
            body: raw.to_owned(),
        }),
    }
}

/// Extracts the record objects from a decoded array body.
///
/// A `null` body means the query matched no rows and yields an empty
/// vector; non-object array elements are skipped. Any other shape is
/// malformed for a record endpoint.
pub fn records(value: Value) -> DecodeResult<Vec<Map<String, Value>>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect()),
        other => Err(DecodeError::MalformedResponse {
            body: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_valid_json_unchanged() {
        let value = decode(r#"[{"dia":"2024-01-01","visitas":5}]"#).unwrap();
        assert_eq!(value, json!([{"dia": "2024-01-01", "visitas": 5}]));

        // Scalars and objects pass through too
        assert_eq!(decode("1234").unwrap(), json!(1234));
        assert_eq!(decode(r#"{"visitas":5}"#).unwrap(), json!({"visitas": 5}));
    }

    #[test]
    fn repairs_concatenated_objects() {
        let value = decode(r#"{"dia":"2024-01-01","visitas":5}{"dia":"2024-01-02","visitas":7}"#)
            .unwrap();
        assert_eq!(
            value,
            json!([
                {"dia": "2024-01-01", "visitas": 5},
                {"dia": "2024-01-02", "visitas": 7},
            ])
        );

        // Each object parses as if it had been sent individually, in order
        let value = decode(r#"{"a":1}{"b":2}{"c":3}"#).unwrap();
        assert_eq!(value, json!([{"a": 1}, {"b": 2}, {"c": 3}]));
    }

    #[test]
    fn rejects_garbage_without_partial_results() {
        match decode("<html>502 Bad Gateway</html>") {
            Err(DecodeError::MalformedResponse { body }) => {
                assert_eq!(body, "<html>502 Bad Gateway</html>");
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }

        // A truncated body is not repairable either
        assert!(decode(r#"{"dia":"2024-01-01","vis"#).is_err());
    }

    #[test]
    fn extracts_records_from_arrays() {
        let records = records(json!([{"pais": "ES", "visitas": 3}, 42, null])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("pais"), Some(&json!("ES")));
    }

    #[test]
    fn null_body_is_an_empty_record_set() {
        assert!(records(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn non_array_body_is_malformed_for_record_endpoints() {
        assert!(records(json!({"visitas": 5})).is_err());
        assert!(records(json!(17)).is_err());
    }
}
