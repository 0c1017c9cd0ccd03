//! Tree membership: keys, the closed node sum, and weak parent links.

use std::fmt;
use std::rc::{Rc, Weak};

use arbor_data::Value;

use crate::factory::NodeKind;
use crate::{Field, Namespace, NamespaceCollection, Result, naming};

/// Name of a node within its parent.
///
/// Declared children are keyed by name; collection members are keyed by their
/// position in the backing list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Name(String),
	Index(usize),
}

impl Key {
	/// The attribute name this key reads on a backing object. Positions never
	/// name attributes.
	pub fn as_name(&self) -> Option<&str> {
		match self {
			Self::Name(name) => Some(name),
			Self::Index(_) => None,
		}
	}

	pub fn as_index(&self) -> Option<usize> {
		match self {
			Self::Name(_) => None,
			Self::Index(index) => Some(*index),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Index(index) => write!(f, "{index}"),
		}
	}
}

impl From<&str> for Key {
	fn from(name: &str) -> Self {
		Self::Name(name.to_owned())
	}
}

impl From<String> for Key {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}

impl From<usize> for Key {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

/// Any member of a form tree.
#[derive(Clone)]
pub enum Node {
	Field(Rc<Field>),
	Namespace(Rc<Namespace>),
	Collection(Rc<NamespaceCollection>),
}

impl Node {
	pub fn key(&self) -> &Key {
		match self {
			Self::Field(field) => field.key(),
			Self::Namespace(namespace) => namespace.key(),
			Self::Collection(collection) => collection.key(),
		}
	}

	/// The owning node, or `None` for a root.
	pub fn parent(&self) -> Option<Node> {
		match self {
			Self::Field(field) => field.parent(),
			Self::Namespace(namespace) => namespace.parent(),
			Self::Collection(collection) => collection.parent(),
		}
	}

	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Field(_) => NodeKind::Field,
			Self::Namespace(_) => NodeKind::Namespace,
			Self::Collection(_) => NodeKind::Collection,
		}
	}

	pub fn as_field(&self) -> Option<&Rc<Field>> {
		match self {
			Self::Field(field) => Some(field),
			_ => None,
		}
	}

	pub fn as_namespace(&self) -> Option<&Rc<Namespace>> {
		match self {
			Self::Namespace(namespace) => Some(namespace),
			_ => None,
		}
	}

	pub fn as_collection(&self) -> Option<&Rc<NamespaceCollection>> {
		match self {
			Self::Collection(collection) => Some(collection),
			_ => None,
		}
	}

	pub fn identifier(&self) -> String {
		naming::identifier(self)
	}

	pub fn parameter_name(&self) -> String {
		naming::parameter_name(self)
	}

	pub fn serialize(&self) -> Result<Value> {
		match self {
			Self::Field(field) => Ok(field.serialize()),
			Self::Namespace(namespace) => namespace.serialize(),
			Self::Collection(collection) => collection.serialize(),
		}
	}

	pub fn assign(&self, input: &Value) -> Result<()> {
		match self {
			Self::Field(field) => {
				field.assign(input.clone());
				Ok(())
			}
			Self::Namespace(namespace) => namespace.assign(input),
			Self::Collection(collection) => collection.assign(input),
		}
	}

	/// `input` reduced to what this node declares, or `None` when nothing of
	/// it is accepted.
	pub fn permit(&self, input: &Value) -> Result<Option<Value>> {
		match self {
			Self::Field(field) => Ok(field.permit(input)),
			Self::Namespace(namespace) => namespace.permit(input).map(Some),
			Self::Collection(collection) => collection.permit(input).map(Some),
		}
	}

	pub(crate) fn downgrade(&self) -> Parent {
		match self {
			Self::Field(field) => Parent::Field(Rc::downgrade(field)),
			Self::Namespace(namespace) => Parent::Namespace(Rc::downgrade(namespace)),
			Self::Collection(collection) => Parent::Collection(Rc::downgrade(collection)),
		}
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Field(field) => fmt::Debug::fmt(field, f),
			Self::Namespace(namespace) => fmt::Debug::fmt(namespace, f),
			Self::Collection(collection) => fmt::Debug::fmt(collection, f),
		}
	}
}

/// Non-owning link from a child to the node that created it.
#[derive(Clone)]
pub(crate) enum Parent {
	Field(Weak<Field>),
	Namespace(Weak<Namespace>),
	Collection(Weak<NamespaceCollection>),
}

impl Parent {
	pub(crate) fn upgrade(&self) -> Option<Node> {
		match self {
			Self::Field(field) => field.upgrade().map(Node::Field),
			Self::Namespace(namespace) => namespace.upgrade().map(Node::Namespace),
			Self::Collection(collection) => collection.upgrade().map(Node::Collection),
		}
	}
}
