use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error_codes::ErrorCode;
use crate::result::RpcResult;

/// A single flat parameter value. Nested objects are not representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

/// Named request parameters, kept sorted by key. Explicit `null` values are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParamBag(BTreeMap<String, ParamValue>);

impl<'de> Deserialize<'de> for ParamBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<ParamValue>>::deserialize(deserializer)?;
        Ok(ParamBag(
            raw.into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect(),
        ))
    }
}

static EMPTY_PARAMS: ParamBag = ParamBag(BTreeMap::new());

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and recipe steps.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key)? {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut ParamValue)> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub params: Option<ParamBag>,
    pub id: i64,
}

impl Request {
    pub fn new(id: i64, method: impl Into<String>, params: Option<ParamBag>) -> Self {
        Self {
            method: method.into(),
            params,
            id,
        }
    }

    /// Parameters, or an empty bag when the caller sent none.
    pub fn params(&self) -> &ParamBag {
        self.params.as_ref().unwrap_or(&EMPTY_PARAMS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: ErrorCode,
    pub message: String,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Response envelope. Exactly one of `result` and `error` is populated; the
/// constructors are the only way to build one and decoding enforces the same
/// rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResponseEnvelope")]
pub struct Response {
    result: Option<RpcResult>,
    error: Option<RpcError>,
    id: i64,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    result: Option<RpcResult>,
    #[serde(default)]
    error: Option<RpcError>,
    id: i64,
}

impl TryFrom<ResponseEnvelope> for Response {
    type Error = String;

    fn try_from(raw: ResponseEnvelope) -> Result<Self, Self::Error> {
        match (raw.result, raw.error) {
            (Some(result), None) => Ok(Response::success(raw.id, result)),
            (None, Some(error)) => Ok(Response::failure(raw.id, error)),
            (Some(_), Some(_)) => Err("response carries both result and error".to_string()),
            (None, None) => Err("response carries neither result nor error".to_string()),
        }
    }
}

impl Response {
    pub fn success(id: i64, result: RpcResult) -> Self {
        Self {
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: i64, error: RpcError) -> Self {
        Self {
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn error(id: i64, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::failure(id, RpcError::new(code, message))
    }

    pub fn message(id: i64, message: impl Into<String>) -> Self {
        Self::success(id, RpcResult::Message(message.into()))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn result(&self) -> Option<&RpcResult> {
        self.result.as_ref()
    }

    pub fn error_info(&self) -> Option<&RpcError> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Re-addresses the response to another request id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}
