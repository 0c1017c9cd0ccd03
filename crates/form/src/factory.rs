//! Node construction and pluggable field classes.
//!
//! Every node in a tree is built by a [`Factory`]. The factory carries the
//! [`FieldClass`] used for leaf fields, and namespaces hand their factory down
//! to the children they declare, so swapping the class at one namespace swaps
//! it for the whole subtree beneath.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use arbor_data::{Object, Value};

use crate::collection::Template;
use crate::node::Parent;
use crate::{Error, Field, Key, Namespace, NamespaceCollection, Node, Result};

/// Behavior shared by every field built under one subtree.
///
/// Implementations attach their own methods and state; callers reach them
/// again through [`Field::class_as`].
pub trait FieldClass: Any {
	/// Short name used in logs.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Runs once for every field built with this class, after the field has
	/// its parent and backing object.
	fn init(&self, _field: &Field) {}
}

/// The field class used when nothing else is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultField;

impl FieldClass for DefaultField {
	fn name(&self) -> &str {
		"field"
	}
}

/// The kinds of node a [`Factory`] can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Field,
	Namespace,
	Collection,
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Field => "field",
			Self::Namespace => "namespace",
			Self::Collection => "collection",
		};
		f.write_str(name)
	}
}

impl FromStr for NodeKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"field" => Ok(Self::Field),
			"namespace" => Ok(Self::Namespace),
			"collection" => Ok(Self::Collection),
			other => Err(Error::InvalidNode(other.to_owned())),
		}
	}
}

/// Inputs for [`Factory::build`] beyond key, kind and parent.
#[derive(Default)]
pub struct BuildOptions {
	pub object: Option<Object>,
	pub value: Value,
	pub template: Option<Template>,
}

impl BuildOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn object(mut self, object: Object) -> Self {
		self.object = Some(object);
		self
	}

	pub fn value(mut self, value: impl Into<Value>) -> Self {
		self.value = value.into();
		self
	}

	pub fn template(mut self, template: impl Fn(&Namespace) -> Result<()> + 'static) -> Self {
		let template: Template = Rc::new(template);
		self.template = Some(template);
		self
	}
}

/// Builds fields, namespaces and collections with a fixed field class.
#[derive(Clone)]
pub struct Factory {
	field_class: Rc<dyn FieldClass>,
}

impl Default for Factory {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Factory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Factory")
			.field("field_class", &self.field_class.name())
			.finish()
	}
}

impl Factory {
	pub fn new() -> Self {
		Self::with_field_class(DefaultField)
	}

	pub fn with_field_class(class: impl FieldClass) -> Self {
		Self::from_class(Rc::new(class))
	}

	pub fn from_class(field_class: Rc<dyn FieldClass>) -> Self {
		Self { field_class }
	}

	pub fn field_class(&self) -> &Rc<dyn FieldClass> {
		&self.field_class
	}

	/// Builds a detached node of `kind`.
	///
	/// The node points at `parent` but is not registered with it; declaring
	/// children through [`Namespace`] methods is what registers them. A
	/// collection needs a namespace parent to enumerate and a template for its
	/// members.
	pub fn build(&self, key: impl Into<Key>, kind: NodeKind, parent: Option<&Node>, options: BuildOptions) -> Result<Node> {
		let key = key.into();
		let link = parent.map(Node::downgrade);
		match kind {
			NodeKind::Field => Ok(Node::Field(self.field(key, link, options.object, options.value))),
			NodeKind::Namespace => Ok(Node::Namespace(self.namespace(key, link, options.object))),
			NodeKind::Collection => {
				let Some(Node::Namespace(parent)) = parent else {
					return Err(Error::InvalidNode(format!("collection `{key}` needs a namespace parent")));
				};
				let Some(template) = options.template else {
					return Err(Error::InvalidNode(format!("collection `{key}` needs a template")));
				};
				Ok(Node::Collection(self.collection(key, Rc::downgrade(parent), template)))
			}
		}
	}

	pub(crate) fn field(&self, key: Key, parent: Option<Parent>, object: Option<Object>, value: Value) -> Rc<Field> {
		let field = Field::build(key, parent, object, value, Rc::clone(&self.field_class));
		self.field_class.init(&field);
		field
	}

	pub(crate) fn namespace(&self, key: Key, parent: Option<Parent>, object: Option<Object>) -> Rc<Namespace> {
		Namespace::build(key, parent, object, self.clone())
	}

	pub(crate) fn collection(&self, key: Key, parent: Weak<Namespace>, template: Template) -> Rc<NamespaceCollection> {
		NamespaceCollection::build(key, parent, template, self.clone())
	}
}
