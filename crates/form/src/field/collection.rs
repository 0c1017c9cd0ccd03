use std::fmt;
use std::rc::{Rc, Weak};

use arbor_data::Value;

use crate::factory::{Factory, FieldClass};
use crate::node::Parent;
use crate::{Field, Key};

/// Indexed child fields over an array-valued field.
///
/// Children are rebuilt from the owner's current value on every call, keyed
/// by position from 0, and share the owner's field class. Their parameter
/// names end in `[]`.
pub struct FieldCollection {
	owner: Weak<Field>,
	factory: Factory,
}

impl FieldCollection {
	pub(crate) fn new(owner: Weak<Field>, class: Rc<dyn FieldClass>) -> Self {
		Self {
			owner,
			factory: Factory::from_class(class),
		}
	}

	pub fn owner(&self) -> Option<Rc<Field>> {
		self.owner.upgrade()
	}

	/// The owner's value coerced to a list.
	pub fn values(&self) -> Vec<Value> {
		self.owner
			.upgrade()
			.map(|owner| owner.value().into_vec())
			.unwrap_or_default()
	}

	/// One transient child per element of [`FieldCollection::values`].
	pub fn fields(&self) -> Vec<Rc<Field>> {
		self.values()
			.into_iter()
			.enumerate()
			.map(|(index, value)| {
				tracing::trace!(index, "materialized field collection member");
				self.child(index, value)
			})
			.collect()
	}

	/// A blank child keyed one past the last element, for rendering an empty
	/// input that appends to the list.
	pub fn field(&self) -> Rc<Field> {
		self.child(self.len(), Value::Nothing)
	}

	pub fn len(&self) -> usize {
		self.values().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn serialize(&self) -> Value {
		Value::List(self.fields().iter().map(|field| field.serialize()).collect())
	}

	/// Overwrites the owner's elements positionally with `input`, stopping at
	/// the shorter of the two lists, then writes the list back through the
	/// owner. An owner whose value is not a list is left alone.
	pub fn assign(&self, input: &Value) {
		let Some(owner) = self.owner.upgrade() else {
			return;
		};
		let Value::List(mut current) = owner.value() else {
			tracing::debug!(field = %owner.identifier(), "skipped element write to non-list field");
			return;
		};
		let incoming = input.clone().into_vec();
		for (slot, value) in current.iter_mut().zip(incoming) {
			*slot = value;
		}
		owner.assign(Value::List(current));
	}

	fn child(&self, index: usize, value: Value) -> Rc<Field> {
		let parent = Parent::Field(self.owner.clone());
		self.factory.field(Key::Index(index), Some(parent), None, value)
	}
}

impl fmt::Debug for FieldCollection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.values()).finish()
	}
}
