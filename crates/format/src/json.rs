use crate::errors::{Error, Result};
use crate::path::Breadcrumb;
use crate::Format;
use prefkit_core::{Number, NumberBox, RawDict, RawValue};
use serde_json::{Map, Value};

const NAME: &str = "JSON";

/// JSON adapter backed by `serde_json`
///
/// Integers parse into 64-bit integer boxes, fractional numbers into double
/// boxes and booleans into boolean boxes. `null` has no storage counterpart
/// and is rejected. Blobs and timestamps cannot be written; an export
/// strategy has to turn them into strings first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        NAME
    }

    fn parse(&self, bytes: &[u8]) -> Result<RawDict> {
        let root: Value = serde_json::from_slice(bytes).map_err(|e| Error::parse(NAME, e.to_string()))?;
        match root {
            Value::Object(entries) => object_to_dict(entries, &Breadcrumb::default()),
            other => Err(Error::invalid_root(NAME, json_kind(&other))),
        }
    }

    fn serialize(&self, dict: &RawDict) -> Result<Vec<u8>> {
        let root = dict_to_object(dict, &Breadcrumb::default())?;
        let result = if self.pretty {
            serde_json::to_vec_pretty(&root)
        } else {
            serde_json::to_vec(&root)
        };
        result.map_err(|e| Error::parse(NAME, e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn object_to_dict(entries: Map<String, Value>, path: &Breadcrumb) -> Result<RawDict> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let value = json_to_raw(value, &path.key(&key))?;
            Ok((key, value))
        })
        .collect()
}

fn json_to_raw(value: Value, path: &Breadcrumb) -> Result<RawValue> {
    match value {
        Value::Null => Err(Error::parse(
            NAME,
            format!("null at '{}' has no storage representation", path.as_str()),
        )),
        Value::Bool(flag) => Ok(RawValue::Number(NumberBox::boolean(flag))),
        Value::Number(number) => {
            let boxed = if let Some(signed) = number.as_i64() {
                NumberBox::from_i64(signed)
            } else if let Some(unsigned) = number.as_u64() {
                NumberBox::from_u64(unsigned)
            } else if let Some(float) = number.as_f64() {
                NumberBox::from_f64(float)
            } else {
                return Err(Error::parse(NAME, format!("unsupported number at '{}'", path.as_str())));
            };
            Ok(RawValue::Number(boxed))
        }
        Value::String(text) => Ok(RawValue::Str(text)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| json_to_raw(item, &path.index(index)))
            .collect::<Result<Vec<_>>>()
            .map(RawValue::Array),
        Value::Object(entries) => object_to_dict(entries, path).map(RawValue::Dict),
    }
}

fn dict_to_object(dict: &RawDict, path: &Breadcrumb) -> Result<Map<String, Value>> {
    dict.iter()
        .map(|(key, value)| Ok((key.clone(), raw_to_json(value, &path.key(key))?)))
        .collect()
}

fn float_value(value: f64, kind: &'static str, path: &Breadcrumb) -> Result<Value> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| Error::unrepresentable(NAME, path.as_str(), kind))
}

fn raw_to_json(value: &RawValue, path: &Breadcrumb) -> Result<Value> {
    match value {
        RawValue::Int(v) => Ok(Value::from(*v)),
        RawValue::Str(v) => Ok(Value::String(v.clone())),
        RawValue::Bool(v) => Ok(Value::Bool(*v)),
        RawValue::F64(v) => float_value(*v, "non-finite double", path),
        // Go through the shortest decimal form so 0.1f32 stays 0.1.
        RawValue::F32(v) => {
            let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(*v));
            float_value(widened, "non-finite float", path)
        }
        RawValue::Number(number) if number.is_boolean() => Ok(Value::Bool(number.as_bool_lossy())),
        RawValue::Number(number) => match number.number() {
            Number::Signed(v) => Ok(Value::from(v)),
            Number::Unsigned(v) => Ok(Value::from(v)),
            Number::Float(v) => float_value(v, "non-finite number", path),
        },
        RawValue::Bytes(_) | RawValue::Time(_) => {
            Err(Error::unrepresentable(NAME, path.as_str(), value.kind_name()))
        }
        RawValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| raw_to_json(item, &path.index(index)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        RawValue::Dict(entries) => dict_to_object(entries, path).map(Value::Object),
    }
}
