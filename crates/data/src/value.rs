use std::fmt;

use indexmap::IndexMap;

use crate::Object;

/// Insertion-ordered record used by [`Value::Record`].
pub type Record = IndexMap<String, Value>;

/// A value read from, or written into, a backing object graph.
///
/// Scalars, lists and records are plain data. [`Value::Object`] is a shared
/// handle into the caller's graph, so cloning it never copies the object.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	#[default]
	Nothing,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<Value>),
	Record(Record),
	Object(Object),
}

impl Value {
	pub fn string(val: impl Into<String>) -> Self {
		Self::String(val.into())
	}

	pub fn list(vals: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Self::List(vals.into_iter().map(Into::into).collect())
	}

	pub fn record<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		Self::Record(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	pub fn get_type(&self) -> ValueType {
		match self {
			Self::Nothing => ValueType::Nothing,
			Self::Bool(_) => ValueType::Bool,
			Self::Int(_) => ValueType::Int,
			Self::Float(_) => ValueType::Float,
			Self::String(_) => ValueType::String,
			Self::List(_) => ValueType::List,
			Self::Record(_) => ValueType::Record,
			Self::Object(_) => ValueType::Object,
		}
	}

	pub fn is_nothing(&self) -> bool {
		matches!(self, Self::Nothing)
	}

	/// Scalars are everything that is neither a container nor an object handle.
	pub fn is_scalar(&self) -> bool {
		matches!(
			self,
			Self::Nothing | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
		)
	}

	pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
		match self {
			Self::Bool(val) => Ok(*val),
			other => Err(ValueTypeError::new("bool", other.get_type())),
		}
	}

	pub fn as_int(&self) -> Result<i64, ValueTypeError> {
		match self {
			Self::Int(val) => Ok(*val),
			other => Err(ValueTypeError::new("int", other.get_type())),
		}
	}

	pub fn as_float(&self) -> Result<f64, ValueTypeError> {
		match self {
			Self::Float(val) => Ok(*val),
			Self::Int(val) => Ok(*val as f64),
			other => Err(ValueTypeError::new("float", other.get_type())),
		}
	}

	pub fn as_str(&self) -> Result<&str, ValueTypeError> {
		match self {
			Self::String(val) => Ok(val),
			other => Err(ValueTypeError::new("string", other.get_type())),
		}
	}

	pub fn as_list(&self) -> Result<&[Value], ValueTypeError> {
		match self {
			Self::List(vals) => Ok(vals),
			other => Err(ValueTypeError::new("list", other.get_type())),
		}
	}

	pub fn as_record(&self) -> Result<&Record, ValueTypeError> {
		match self {
			Self::Record(val) => Ok(val),
			other => Err(ValueTypeError::new("record", other.get_type())),
		}
	}

	pub fn as_object(&self) -> Result<&Object, ValueTypeError> {
		match self {
			Self::Object(val) => Ok(val),
			other => Err(ValueTypeError::new("object", other.get_type())),
		}
	}

	/// Looks up `key` in a record, or in an object through its accessor.
	pub fn get(&self, key: &str) -> Option<Value> {
		match self {
			Self::Record(record) => record.get(key).cloned(),
			Self::Object(object) => object.get(key),
			_ => None,
		}
	}

	/// Array coercion: `Nothing` is empty, a list is its elements, anything
	/// else is a single element.
	pub fn into_vec(self) -> Vec<Value> {
		match self {
			Self::Nothing => Vec::new(),
			Self::List(vals) => vals,
			other => vec![other],
		}
	}

	/// Deep copy with every [`Object`] handle replaced by a record of its
	/// current attributes.
	pub fn snapshot(&self) -> Value {
		match self {
			Self::List(vals) => Self::List(vals.iter().map(Self::snapshot).collect()),
			Self::Record(record) => Self::Record(
				record
					.iter()
					.map(|(k, v)| (k.clone(), v.snapshot()))
					.collect(),
			),
			Self::Object(object) => object.snapshot(),
			other => other.clone(),
		}
	}
}

/// Renders the value the way a web form carries it: `Nothing` is empty,
/// scalars are their literal text, containers are JSON.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nothing => Ok(()),
			Self::Bool(val) => write!(f, "{val}"),
			Self::Int(val) => write!(f, "{val}"),
			Self::Float(val) => write!(f, "{val}"),
			Self::String(val) => f.write_str(val),
			other => {
				let json = serde_json::Value::from(other.snapshot());
				write!(f, "{json}")
			}
		}
	}
}

/// Coarse value type used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Nothing,
	Bool,
	Int,
	Float,
	String,
	List,
	Record,
	Object,
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Nothing => "nothing",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::List => "list",
			Self::Record => "record",
			Self::Object => "object",
		};
		f.write_str(name)
	}
}

/// Error returned by typed accessors like [`Value::as_record`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {got}")]
pub struct ValueTypeError {
	expected: &'static str,
	got: ValueType,
}

impl ValueTypeError {
	pub fn new(expected: &'static str, got: ValueType) -> Self {
		Self { expected, got }
	}

	pub fn got(&self) -> ValueType {
		self.got
	}
}
