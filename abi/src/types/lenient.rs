//! Field extraction that tolerates loosely typed backend payloads.
//!
//! Each `take_*` removes `key` from the map and converts it. A value that
//! cannot be converted is put back so it stays visible in the record's
//! `extra` fields; the typed field is left empty.

use chrono::NaiveDate;
use serde_json::{Map, Value};

type Fields = Map<String, Value>;

fn take<T>(map: &mut Fields, key: &str, convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = map.remove(key)?;
    match convert(&value) {
        Some(v) => Some(v),
        None => {
            if !value.is_null() {
                map.insert(key.to_string(), value);
            }
            None
        }
    }
}

pub(crate) fn take_i64(map: &mut Fields, key: &str) -> Option<i64> {
    take(map, key, |v| match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn take_f64(map: &mut Fields, key: &str) -> Option<f64> {
    take(map, key, |v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn take_string(map: &mut Fields, key: &str) -> Option<String> {
    take(map, key, |v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn take_bool(map: &mut Fields, key: &str) -> Option<bool> {
    take(map, key, |v| match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `YYYY-MM-DD`, also accepting a datetime that starts with one.
pub(crate) fn take_date(map: &mut Fields, key: &str) -> Option<NaiveDate> {
    take(map, key, |v| {
        let s = v.as_str()?.trim();
        s.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}

pub(crate) fn take_object(map: &mut Fields, key: &str) -> Option<Fields> {
    take(map, key, |v| v.as_object().cloned())
}
