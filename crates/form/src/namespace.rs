//! Structural nodes: a backing object and a registry of named children.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use arbor_data::{Object, Record, Value};
use indexmap::IndexMap;

use crate::factory::{Factory, FieldClass};
use crate::node::Parent;
use crate::{Error, Field, Key, NamespaceCollection, Node, Result, naming};

/// A node owning a backing object and the children declared over it.
///
/// Children are kept in registration order, which is also the order of
/// [`Namespace::serialize`] output. Only registered children are reachable
/// from [`Namespace::assign`]; input keys the tree does not declare are never
/// written anywhere.
pub struct Namespace {
	key: Key,
	parent: Option<Parent>,
	object: Option<Object>,
	children: RefCell<IndexMap<Key, Node>>,
	factory: RefCell<Factory>,
	writeback: OnceCell<Writeback>,
	prototype: Cell<bool>,
	this: Weak<Namespace>,
}

impl Namespace {
	/// A parentless namespace using the default field class.
	pub fn root(key: impl Into<Key>, object: Option<Object>) -> Rc<Self> {
		Factory::new().namespace(key.into(), None, object)
	}

	pub(crate) fn build(key: Key, parent: Option<Parent>, object: Option<Object>, factory: Factory) -> Rc<Self> {
		Rc::new_cyclic(|this| Self {
			key,
			parent,
			object,
			children: RefCell::new(IndexMap::new()),
			factory: RefCell::new(factory),
			writeback: OnceCell::new(),
			prototype: Cell::new(false),
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

	/// The factory children declared from now on are built with.
	pub fn factory(&self) -> Factory {
		self.factory.borrow().clone()
	}

	/// Builds later fields in this namespace, and in namespaces declared
	/// under it afterwards, with `class`.
	pub fn use_field_class(&self, class: impl FieldClass) -> &Self {
		tracing::debug!(namespace = %self.identifier(), class = class.name(), "overrode field class");
		*self.factory.borrow_mut() = Factory::with_field_class(class);
		self
	}

	/// Declares a field bound to `key` on this namespace's object.
	pub fn field(&self, key: impl Into<Key>) -> Result<Rc<Field>> {
		let key = key.into();
		self.ensure_vacant(&key)?;
		let field = self
			.factory()
			.field(key, Some(self.link()), self.object.clone(), Value::Nothing);
		self.register(Node::Field(Rc::clone(&field)));
		Ok(field)
	}

	/// Declares a nested namespace over `object.key`, then runs `build` on it.
	///
	/// The child is registered before `build` runs, so a failing builder
	/// leaves a partially declared child behind.
	pub fn namespace(&self, key: impl Into<Key>, build: impl FnOnce(&Namespace) -> Result<()>) -> Result<Rc<Namespace>> {
		let key = key.into();
		self.ensure_vacant(&key)?;
		let (object, writeback) = match (&self.object, key.as_name(), self.attribute(&key)) {
			(Some(source), Some(name), Some(value)) => bind(value, Writeback::attribute(source, name)),
			_ => (None, None),
		};
		let child = self.factory().namespace(key, Some(self.link()), object);
		child.adopt(writeback, self.is_prototype());
		self.register(Node::Namespace(Rc::clone(&child)));
		build(&child)?;
		Ok(child)
	}

	/// Declares a collection over the list at `object.key`.
	///
	/// `template` runs against every member each time the collection is
	/// enumerated. Fails with [`Error::MissingCollection`] when there is no
	/// list to enumerate, unless this namespace only describes a collection
	/// member's shape.
	pub fn collection(
		&self,
		key: impl Into<Key>,
		template: impl Fn(&Namespace) -> Result<()> + 'static,
	) -> Result<Rc<NamespaceCollection>> {
		let key = key.into();
		self.ensure_vacant(&key)?;
		if !self.is_prototype() {
			self.backing_list(&key)?;
		}
		let collection = self.factory().collection(key, self.this.clone(), Rc::new(template));
		self.register(Node::Collection(Rc::clone(&collection)));
		Ok(collection)
	}

	pub fn get(&self, key: impl Into<Key>) -> Option<Node> {
		self.children.borrow().get(&key.into()).cloned()
	}

	pub fn children(&self) -> Vec<Node> {
		self.children.borrow().values().cloned().collect()
	}

	pub fn keys(&self) -> Vec<Key> {
		self.children.borrow().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.children.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.borrow().is_empty()
	}

	pub fn identifier(&self) -> String {
		naming::identifier_of(&self.key, self.parent())
	}

	pub fn parameter_name(&self) -> String {
		naming::parameter_name_of(&self.key, self.parent())
	}

	/// Each child's key mapped to its serialized value.
	pub fn serialize(&self) -> Result<Value> {
		let mut record = Record::new();
		for child in self.children() {
			record.insert(child.key().to_string(), child.serialize()?);
		}
		Ok(Value::Record(record))
	}

	/// Assigns `input[key]` into every registered child whose key is present.
	///
	/// Anything other than a record or object is ignored.
	pub fn assign(&self, input: &Value) -> Result<()> {
		match input {
			Value::Record(record) => {
				for key in record.keys() {
					if self.get(key.as_str()).is_none() {
						tracing::debug!(namespace = %self.identifier(), key = %key, "ignored undeclared input key");
					}
				}
			}
			Value::Object(_) => {}
			other => {
				tracing::debug!(namespace = %self.identifier(), got = %other.get_type(), "ignored non-record input");
				return Ok(());
			}
		}
		for child in self.children() {
			if let Some(value) = input.get(&child.key().to_string()) {
				child.assign(&value)?;
			}
		}
		if let (Some(writeback), Some(object)) = (self.writeback.get(), &self.object) {
			writeback.apply(object.snapshot());
		}
		Ok(())
	}

	/// `input` reduced to the keys this namespace declares, each filtered by
	/// its child. Nothing is written.
	pub fn permit(&self, input: &Value) -> Result<Value> {
		let mut permitted = Record::new();
		for child in self.children() {
			let key = child.key().to_string();
			if let Some(value) = input.get(&key)
				&& let Some(value) = child.permit(&value)?
			{
				permitted.insert(key, value);
			}
		}
		Ok(Value::Record(permitted))
	}

	/// The list a collection keyed `key` enumerates, read now.
	pub(crate) fn backing_list(&self, key: &Key) -> Result<Vec<Value>> {
		match self.attribute(key) {
			Some(Value::List(vals)) => Ok(vals),
			_ => Err(Error::MissingCollection {
				key: key.clone(),
				namespace: self.identifier(),
			}),
		}
	}

	/// Whether this namespace is a collection prototype, or nested in one.
	pub fn is_prototype(&self) -> bool {
		self.prototype.get()
	}

	pub(crate) fn adopt(&self, writeback: Option<Writeback>, prototype: bool) {
		if let Some(writeback) = writeback {
			let _ = self.writeback.set(writeback);
		}
		self.prototype.set(prototype);
	}

	fn attribute(&self, key: &Key) -> Option<Value> {
		let object = self.object.as_ref()?;
		let name = key.as_name()?;
		if object.has(name) { object.get(name) } else { None }
	}

	fn ensure_vacant(&self, key: &Key) -> Result<()> {
		if self.children.borrow().contains_key(key) {
			return Err(Error::DuplicateName {
				key: key.clone(),
				parent: self.identifier(),
			});
		}
		Ok(())
	}

	fn register(&self, node: Node) {
		tracing::debug!(
			namespace = %self.identifier(),
			key = %node.key(),
			kind = %node.kind(),
			"registered node"
		);
		self.children.borrow_mut().insert(node.key().clone(), node);
	}

	fn link(&self) -> Parent {
		Parent::Namespace(self.this.clone())
	}
}

/// Binds a namespace to an attribute value.
///
/// Objects are shared as they are. A plain record is wrapped in a fresh
/// dictionary, which is a copy, so the namespace also gets the place its
/// attributes are written back to after each assign.
pub(crate) fn bind(value: Value, writeback: Writeback) -> (Option<Object>, Option<Writeback>) {
	match value {
		Value::Object(object) => (Some(object), None),
		Value::Record(record) => (Some(Object::dict(record)), Some(writeback)),
		_ => (None, None),
	}
}

/// Where a namespace over a copied record stores its attributes.
#[derive(Debug, Clone)]
pub(crate) struct Writeback {
	object: Object,
	name: String,
	index: Option<usize>,
}

impl Writeback {
	pub(crate) fn attribute(object: &Object, name: &str) -> Self {
		Self {
			object: object.clone(),
			name: name.to_owned(),
			index: None,
		}
	}

	pub(crate) fn element(object: &Object, name: &str, index: usize) -> Self {
		Self {
			index: Some(index),
			..Self::attribute(object, name)
		}
	}

	fn apply(&self, value: Value) {
		let Some(index) = self.index else {
			self.object.set(&self.name, value);
			return;
		};
		let Some(Value::List(mut vals)) = self.object.get(&self.name) else {
			return;
		};
		if let Some(slot) = vals.get_mut(index) {
			*slot = value;
			self.object.set(&self.name, Value::List(vals));
		}
	}
}

impl fmt::Debug for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Namespace")
			.field("id", &self.identifier())
			.field("children", &self.keys())
			.finish()
	}
}
