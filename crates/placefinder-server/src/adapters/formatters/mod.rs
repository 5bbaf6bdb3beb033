//! Response Formatters
//!
//! Map upstream JSON payloads onto the fixed tool output schemas. Missing
//! upstream fields become `None` rather than errors.

pub mod places;
pub mod routing;
pub mod weather;

use serde_json::Value;

/// Walk nested object keys
fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    at(value, path)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn f64_at(value: &Value, path: &[&str]) -> Option<f64> {
    at(value, path).and_then(Value::as_f64)
}

fn u64_at(value: &Value, path: &[&str]) -> Option<u64> {
    at(value, path).and_then(Value::as_u64)
}

fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First of several alternative paths that yields a value
fn first_f64(value: &Value, paths: &[&[&str]]) -> Option<f64> {
    paths.iter().find_map(|path| f64_at(value, path))
}

fn first_str(value: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| str_at(value, path))
}

/// `[longitude, latitude]` pair from a GeoJSON style array
fn lon_lat(value: Option<&Value>) -> (Option<f64>, Option<f64>) {
    let coords = value.and_then(Value::as_array);
    let get = |i: usize| coords.and_then(|c| c.get(i)).and_then(Value::as_f64);
    (get(0), get(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_helpers() {
        let value = json!({"a": {"b": {"c": 1.5, "s": "x"}}, "list": [1, 2]});
        assert_eq!(f64_at(&value, &["a", "b", "c"]), Some(1.5));
        assert_eq!(str_at(&value, &["a", "b", "s"]).as_deref(), Some("x"));
        assert_eq!(f64_at(&value, &["a", "missing"]), None);
        assert_eq!(array_at(&value, &["list"]).len(), 2);
        assert!(array_at(&value, &["a"]).is_empty());
        assert_eq!(first_f64(&value, &[&["nope"], &["a", "b", "c"]]), Some(1.5));
    }

    #[test]
    fn test_lon_lat_order() {
        let coords = json!([2.35, 48.85]);
        assert_eq!(lon_lat(Some(&coords)), (Some(2.35), Some(48.85)));
        assert_eq!(lon_lat(None), (None, None));
    }
}
