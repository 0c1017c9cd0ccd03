//! Conversions between [`Value`] and Rust/JSON types.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Object, Record, Value, ValueType, ValueTypeError};

macro_rules! from_int {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(val: $ty) -> Self {
				Self::Int(i64::from(val))
			}
		})*
	};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
	fn from(val: bool) -> Self {
		Self::Bool(val)
	}
}

impl From<f32> for Value {
	fn from(val: f32) -> Self {
		Self::Float(f64::from(val))
	}
}

impl From<f64> for Value {
	fn from(val: f64) -> Self {
		Self::Float(val)
	}
}

impl From<String> for Value {
	fn from(val: String) -> Self {
		Self::String(val)
	}
}

impl From<&str> for Value {
	fn from(val: &str) -> Self {
		Self::String(val.to_owned())
	}
}

impl From<Record> for Value {
	fn from(val: Record) -> Self {
		Self::Record(val)
	}
}

impl From<Object> for Value {
	fn from(val: Object) -> Self {
		Self::Object(val)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(vals: Vec<T>) -> Self {
		Self::List(vals.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(val: Option<T>) -> Self {
		val.map_or(Self::Nothing, Into::into)
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::Nothing,
			serde_json::Value::Bool(val) => Self::Bool(val),
			serde_json::Value::Number(num) => match num.as_i64() {
				Some(val) => Self::Int(val),
				None => Self::Float(num.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(val) => Self::String(val),
			serde_json::Value::Array(vals) => Self::List(vals.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(map) => Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
		}
	}
}

impl From<Value> for serde_json::Value {
	fn from(value: Value) -> Self {
		match value {
			Value::Nothing => Self::Null,
			Value::Bool(val) => Self::Bool(val),
			Value::Int(val) => Self::from(val),
			Value::Float(val) => serde_json::Number::from_f64(val).map_or(Self::Null, Self::Number),
			Value::String(val) => Self::String(val),
			Value::List(vals) => Self::Array(vals.into_iter().map(Self::from).collect()),
			Value::Record(record) => Self::Object(record.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
			Value::Object(object) => Self::from(object.snapshot()),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Nothing => serializer.serialize_unit(),
			Self::Bool(val) => serializer.serialize_bool(*val),
			Self::Int(val) => serializer.serialize_i64(*val),
			Self::Float(val) => serializer.serialize_f64(*val),
			Self::String(val) => serializer.serialize_str(val),
			Self::List(vals) => {
				let mut seq = serializer.serialize_seq(Some(vals.len()))?;
				for val in vals {
					seq.serialize_element(val)?;
				}
				seq.end()
			}
			Self::Record(record) => {
				let mut map = serializer.serialize_map(Some(record.len()))?;
				for (key, val) in record {
					map.serialize_entry(key, val)?;
				}
				map.end()
			}
			Self::Object(object) => object.snapshot().serialize(serializer),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		serde_json::Value::deserialize(deserializer).map(Self::from)
	}
}

/// Fallible conversion out of a [`Value`], used by typed attribute setters.
pub trait FromValue: Sized {
	fn from_value(value: Value) -> Result<Self, ValueTypeError>;
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		Ok(value)
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		value.as_bool()
	}
}

impl FromValue for i64 {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		value.as_int()
	}
}

impl FromValue for i32 {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		let val = value.as_int()?;
		i32::try_from(val).map_err(|_| ValueTypeError::new("i32", ValueType::Int))
	}
}

impl FromValue for u32 {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		let val = value.as_int()?;
		u32::try_from(val).map_err(|_| ValueTypeError::new("u32", ValueType::Int))
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		value.as_float()
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		match value {
			Value::String(val) => Ok(val),
			other => Err(ValueTypeError::new("string", other.get_type())),
		}
	}
}

impl FromValue for Record {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		match value {
			Value::Record(val) => Ok(val),
			other => Err(ValueTypeError::new("record", other.get_type())),
		}
	}
}

impl FromValue for Object {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		let ty = value.get_type();
		Object::wrap(value).ok_or(ValueTypeError::new("object", ty))
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		match value {
			Value::Nothing => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self, ValueTypeError> {
		match value {
			Value::List(vals) => vals.into_iter().map(T::from_value).collect(),
			other => Err(ValueTypeError::new("list", other.get_type())),
		}
	}
}
