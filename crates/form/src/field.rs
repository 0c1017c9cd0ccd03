//! Leaf nodes bound to a single attribute.

mod collection;

use std::any::Any;
use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use arbor_data::{Object, Value};
use heck::ToTitleCase;

pub use self::collection::FieldCollection;
use crate::factory::{DefaultField, FieldClass};
use crate::naming::{self, Dom};
use crate::node::Parent;
use crate::{Key, Node};

/// A leaf bound to one attribute of its backing object.
///
/// Reads and writes go to the backing object when it exposes the attribute
/// and to the field's own literal otherwise. The two never mix: a field whose
/// object has the attribute ignores its literal entirely.
pub struct Field {
	key: Key,
	parent: Option<Parent>,
	object: Option<Object>,
	value: RefCell<Value>,
	read_only: Cell<bool>,
	class: Rc<dyn FieldClass>,
	collection: OnceCell<FieldCollection>,
	this: Weak<Field>,
}

impl Field {
	/// A parentless field with the default class.
	pub fn new(key: impl Into<Key>, object: Option<Object>, value: impl Into<Value>) -> Rc<Self> {
		Self::build(key.into(), None, object, value.into(), Rc::new(DefaultField))
	}

	pub(crate) fn build(
		key: Key,
		parent: Option<Parent>,
		object: Option<Object>,
		value: Value,
		class: Rc<dyn FieldClass>,
	) -> Rc<Self> {
		Rc::new_cyclic(|this| Self {
			key,
			parent,
			object,
			value: RefCell::new(value),
			read_only: Cell::new(false),
			class,
			collection: OnceCell::new(),
			this: this.clone(),
		})
	}

	pub fn key(&self) -> &Key {
		&self.key
	}

	pub fn parent(&self) -> Option<Node> {
		self.parent.as_ref().and_then(Parent::upgrade)
	}

	pub fn object(&self) -> Option<&Object> {
		self.object.as_ref()
	}

	/// The backing object, paired with the attribute this field names, when
	/// both exist.
	fn binding(&self) -> Option<(&Object, &str)> {
		Some((self.object.as_ref()?, self.key.as_name()?))
	}

	/// The backing attribute when the object has it, else the literal.
	pub fn value(&self) -> Value {
		if let Some((object, name)) = self.binding()
			&& object.has(name)
			&& let Some(value) = object.get(name)
		{
			return value;
		}
		self.value.borrow().clone()
	}

	/// The current value, with object handles copied out as records.
	pub fn serialize(&self) -> Value {
		self.value().snapshot()
	}

	/// Writes `value` with the same precedence [`Field::value`] reads with.
	/// Read-only fields ignore the write.
	pub fn assign(&self, value: Value) {
		if self.is_read_only() {
			tracing::debug!(field = %self.identifier(), "skipped write to read-only field");
			return;
		}
		if let Some((object, name)) = self.binding()
			&& object.has_writer(name)
		{
			object.set(name, value);
			return;
		}
		*self.value.borrow_mut() = value;
	}

	/// Marks the field read-only (or writable again).
	pub fn readonly(&self, read_only: bool) -> &Self {
		self.read_only.set(read_only);
		self
	}

	/// Read-only when flagged explicitly or when the backing object refuses
	/// form input for this attribute.
	pub fn is_read_only(&self) -> bool {
		self.read_only.get() || self.binding().is_some_and(|(object, name)| object.is_readonly(name))
	}

	/// Indexed child fields over this field's value, built on first use.
	pub fn collection(&self) -> &FieldCollection {
		self.collection
			.get_or_init(|| FieldCollection::new(self.this.clone(), Rc::clone(&self.class)))
	}

	/// The key in title case, for labels.
	pub fn title(&self) -> String {
		self.key.to_string().to_title_case()
	}

	pub fn dom(&self) -> Dom<'_> {
		Dom::new(self)
	}

	pub fn class(&self) -> &Rc<dyn FieldClass> {
		&self.class
	}

	/// The field class as its concrete type, if it is a `T`.
	pub fn class_as<T: FieldClass>(&self) -> Option<&T> {
		let class: &dyn Any = self.class.as_ref();
		class.downcast_ref::<T>()
	}

	pub fn identifier(&self) -> String {
		naming::identifier_of(&self.key, self.parent())
	}

	pub fn parameter_name(&self) -> String {
		naming::parameter_name_of(&self.key, self.parent())
	}

	/// Accepts scalars and lists of scalars. Read-only fields accept nothing.
	pub fn permit(&self, input: &Value) -> Option<Value> {
		if self.is_read_only() {
			return None;
		}
		match input {
			Value::List(vals) if vals.iter().all(Value::is_scalar) => Some(input.clone()),
			scalar if scalar.is_scalar() => Some(scalar.clone()),
			_ => None,
		}
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("id", &self.identifier())
			.field("value", &self.value())
			.field("read_only", &self.is_read_only())
			.field("class", &self.class.name())
			.finish()
	}
}
