use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Page size requested on every call.
pub const LIMIT: i64 = 100;

pub(crate) const API_KEY_PARAM: &str = "api_key";
pub(crate) const LIMIT_PARAM: &str = "limit";
pub(crate) const START_PARAM: &str = "start";

/// A single query-string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

/// Query parameters, keyed by their wire name.
pub type Params = BTreeMap<String, ParamValue>;

/// Builds a [`Params`] map from `(name, value)` pairs.
///
/// ```
/// let params = nps_client::params([("parkCode", "acad")]);
/// assert_eq!(params["parkCode"].to_string(), "acad");
/// ```
pub fn params<K, V, I>(pairs: I) -> Params
where
    K: Into<String>,
    V: Into<ParamValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

pub(crate) fn with_credentials(payload: &Params, key: &str) -> Params {
    let mut query = payload.clone();
    query.insert(API_KEY_PARAM.to_string(), ParamValue::Str(key.to_string()));
    query.insert(LIMIT_PARAM.to_string(), ParamValue::Int(LIMIT));
    query
}

pub(crate) fn check_start(start: i64) -> Result<i64> {
    if start < 0 {
        return Err(Error::invalid_argument(
            START_PARAM,
            format!("must not be negative (got {start})"),
        ));
    }
    Ok(start)
}

/// Validates a `start` entry of a raw payload, if there is one.
pub(crate) fn check_payload_start(payload: &Params) -> Result<()> {
    match payload.get(START_PARAM) {
        None => Ok(()),
        Some(ParamValue::Int(n)) => check_start(*n).map(|_| ()),
        Some(ParamValue::Str(s)) => Err(Error::invalid_argument(
            START_PARAM,
            format!("must be an integer (got {s:?})"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_override_caller_values() {
        let payload = params([("api_key", ParamValue::from("spoofed")), ("limit", 5i64.into())]);
        let query = with_credentials(&payload, "real-key");

        assert_eq!(query["api_key"], ParamValue::Str("real-key".into()));
        assert_eq!(query["limit"], ParamValue::Int(100));
        assert_eq!(query.len(), 2);
        // the caller's map is untouched
        assert_eq!(payload["api_key"], ParamValue::Str("spoofed".into()));
    }

    #[test]
    fn credentials_on_empty_payload() {
        let query = with_credentials(&Params::new(), "k");
        assert_eq!(query.len(), 2);
        assert_eq!(query["api_key"].to_string(), "k");
        assert_eq!(query["limit"].to_string(), "100");
    }

    #[test]
    fn negative_start_is_rejected() {
        assert_eq!(check_start(0).unwrap(), 0);
        assert_eq!(check_start(200).unwrap(), 200);
        assert!(matches!(
            check_start(-1),
            Err(Error::InvalidArgument { ref name, .. }) if name == "start"
        ));
    }

    #[test]
    fn payload_start_must_be_numeric() {
        assert!(check_payload_start(&Params::new()).is_ok());
        assert!(check_payload_start(&params([("start", 10i64)])).is_ok());
        assert!(check_payload_start(&params([("start", -3i64)])).is_err());
        assert!(matches!(
            check_payload_start(&params([("start", "ten")])),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn values_serialize_bare() {
        let json = serde_json::to_string(&params([("q", ParamValue::from("bear")), ("start", 3i64.into())]))
            .unwrap();
        assert_eq!(json, r#"{"q":"bear","start":3}"#);
    }
}
