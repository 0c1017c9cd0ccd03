//! Shared handles into the caller's backing object graph.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{Accessor, Record, Value};

/// Shared, interior-mutable handle to a backing value.
///
/// The strategy used to read and write attributes is fixed when the handle is
/// created: [`Object::new`] wraps a type implementing [`Accessor`] directly,
/// [`Object::wrap`] turns a plain record into a [`Dict`]. Clones share the
/// same underlying value and compare equal only to each other.
#[derive(Clone)]
pub struct Object(Rc<RefCell<dyn Accessor>>);

impl Object {
	/// Wraps a model exposing its attributes through [`Accessor`].
	pub fn new<T: Accessor>(model: T) -> Self {
		Self(Rc::new(RefCell::new(model)))
	}

	/// Wraps a record as a dictionary-backed object.
	///
	/// Nested records, and records inside lists, become shared objects too, so
	/// writes made through a nested namespace land in this graph.
	pub fn dict(record: Record) -> Self {
		let record = record
			.into_iter()
			.map(|(key, value)| (key, share(value)))
			.collect();
		Self::new(Dict::new(record))
	}

	/// Selects a strategy for `value` by its shape.
	///
	/// Objects are returned as-is, records become a [`Dict`], anything else has
	/// no attributes to bind to.
	pub fn wrap(value: Value) -> Option<Self> {
		match value {
			Value::Object(object) => Some(object),
			Value::Record(record) => Some(Self::dict(record)),
			_ => None,
		}
	}

	/// Builds a dictionary-backed graph from JSON. Non-object JSON yields `None`.
	pub fn from_json(json: serde_json::Value) -> Option<Self> {
		Self::wrap(json.into())
	}

	pub fn has(&self, key: &str) -> bool {
		self.0.borrow().has(key)
	}

	pub fn has_writer(&self, key: &str) -> bool {
		self.0.borrow().has_writer(key)
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.0.borrow().get(key)
	}

	pub fn set(&self, key: &str, value: Value) {
		self.0.borrow_mut().set(key, value);
	}

	pub fn is_readonly(&self, key: &str) -> bool {
		self.0.borrow().is_readonly(key)
	}

	pub fn attribute_names(&self) -> Vec<String> {
		self.0.borrow().attribute_names()
	}

	/// Current attributes as a plain record, recursing into nested objects.
	pub fn snapshot(&self) -> Value {
		let names = self.attribute_names();
		let mut record = Record::with_capacity(names.len());
		for name in names {
			let value = self.get(&name).unwrap_or_default();
			record.insert(name, value.snapshot());
		}
		Value::Record(record)
	}

	/// Runs `f` against the concrete model, if it is a `T`.
	pub fn with<T: Accessor, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
		let inner = self.0.borrow();
		let any: &dyn Any = &*inner;
		any.downcast_ref::<T>().map(f)
	}

	/// Runs `f` against the concrete model mutably, if it is a `T`.
	pub fn with_mut<T: Accessor, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
		let mut inner = self.0.borrow_mut();
		let any: &mut dyn Any = &mut *inner;
		any.downcast_mut::<T>().map(f)
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0.try_borrow() {
			Ok(inner) => fmt::Debug::fmt(&*inner, f),
			Err(_) => f.write_str("Object(<borrowed>)"),
		}
	}
}

impl From<Record> for Object {
	fn from(record: Record) -> Self {
		Self::dict(record)
	}
}

fn share(value: Value) -> Value {
	match value {
		Value::Record(record) => Value::Object(Object::dict(record)),
		Value::List(vals) => Value::List(vals.into_iter().map(share).collect()),
		other => other,
	}
}

/// Dictionary strategy: attributes are the record's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
	entries: Record,
}

impl Dict {
	pub fn new(entries: Record) -> Self {
		Self { entries }
	}

	pub fn entries(&self) -> &Record {
		&self.entries
	}

	pub fn into_entries(self) -> Record {
		self.entries
	}
}

impl Accessor for Dict {
	fn has(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	fn get(&self, key: &str) -> Option<Value> {
		self.entries.get(key).cloned()
	}

	/// Stores `value`, turning nested records into shared objects the same way
	/// [`Object::dict`] does.
	fn set(&mut self, key: &str, value: Value) {
		self.entries.insert(key.to_owned(), share(value));
	}

	fn attribute_names(&self) -> Vec<String> {
		self.entries.keys().cloned().collect()
	}
}
