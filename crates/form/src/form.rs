//! Root entry point for declaring a form over a backing model.

use std::fmt;
use std::rc::Rc;

use arbor_data::{Object, Value};

use crate::factory::{Factory, FieldClass};
use crate::{Key, Namespace, Result};

/// A parentless namespace bound to the model a form edits.
///
/// Dereferences to the root [`Namespace`], so children are declared on the
/// form directly:
///
/// ```
/// use arbor_data::Object;
/// use arbor_form::Form;
/// use serde_json::json;
///
/// let model = Object::from_json(json!({ "name": "William" })).unwrap();
/// let form = Form::new("user", model);
/// let name = form.field("name").unwrap();
/// assert_eq!(name.parameter_name(), "user[name]");
/// ```
pub struct Form {
	root: Rc<Namespace>,
}

impl Form {
	pub fn new(key: impl Into<Key>, object: Object) -> Self {
		Self::builder(key).object(object).build()
	}

	pub fn builder(key: impl Into<Key>) -> FormBuilder {
		FormBuilder::new(key)
	}

	/// Builds a form and runs `declare` against it.
	pub fn build(key: impl Into<Key>, object: Object, declare: impl FnOnce(&Form) -> Result<()>) -> Result<Self> {
		Self::builder(key).object(object).declare(declare)
	}

	pub fn root(&self) -> &Rc<Namespace> {
		&self.root
	}

	/// Handle to the backing model.
	pub fn model(&self) -> Option<Object> {
		self.root.object().cloned()
	}

	/// Assigns submitted parameters and returns the model they were written to.
	pub fn assign_params(&self, params: &Value) -> Result<Option<Object>> {
		self.root.assign(params)?;
		Ok(self.model())
	}
}

impl std::ops::Deref for Form {
	type Target = Namespace;

	fn deref(&self) -> &Namespace {
		&self.root
	}
}

impl fmt::Debug for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Form").field(&self.root).finish()
	}
}

/// Construction options for a [`Form`].
#[derive(Debug, Clone)]
pub struct FormBuilder {
	key: Key,
	object: Option<Object>,
	factory: Factory,
}

impl FormBuilder {
	pub fn new(key: impl Into<Key>) -> Self {
		Self {
			key: key.into(),
			object: None,
			factory: Factory::new(),
		}
	}

	/// Sets the backing model.
	pub fn object(mut self, object: Object) -> Self {
		self.object = Some(object);
		self
	}

	/// Builds every field in the form with `class`.
	pub fn field_class(mut self, class: impl FieldClass) -> Self {
		self.factory = Factory::with_field_class(class);
		self
	}

	pub fn factory(mut self, factory: Factory) -> Self {
		self.factory = factory;
		self
	}

	pub fn build(self) -> Form {
		Form {
			root: self.factory.namespace(self.key, None, self.object),
		}
	}

	/// Builds the form and runs `declare` against it.
	pub fn declare(self, declare: impl FnOnce(&Form) -> Result<()>) -> Result<Form> {
		let form = self.build();
		declare(&form)?;
		Ok(form)
	}
}
