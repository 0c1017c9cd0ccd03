//! Namespaces materialized per element of a backing list.

use std::fmt;
use std::rc::{Rc, Weak};

use arbor_data::{Object, Record, Value};

use crate::factory::Factory;
use crate::namespace::{Writeback, bind};
use crate::node::Parent;
use crate::{Error, Key, Namespace, Node, Result, naming};

/// Declares the children of one collection member.
pub type Template = Rc<dyn Fn(&Namespace) -> Result<()>>;

/// A node that builds one namespace per element of its parent's list.
///
/// Nothing is cached: every call to [`NamespaceCollection::members`] reads the
/// list again and runs the template on fresh namespaces keyed by position.
/// Members hold only a weak link back to the collection, so keep the
/// collection alive while using them.
pub struct NamespaceCollection {
	key: Key,
	parent: Weak<Namespace>,
	template: Template,
	factory: Factory,
	this: Weak<NamespaceCollection>,
}

impl NamespaceCollection {
	pub(crate) fn build(key: Key, parent: Weak<Namespace>, template: Template, factory: Factory) -> Rc<Self> {
		Rc::new_cyclic(|this| Self {
			key,
			parent,
			template,
			factory,
			this: this.clone(),
		})
	}

	pub fn key(&self) -> &Key {
		&self.key
	}

	pub fn parent(&self) -> Option<Node> {
		self.parent.upgrade().map(Node::Namespace)
	}

	/// One namespace per element of the backing list as it is right now.
	///
	/// Elements that are plain records are bound to copies, which every
	/// member assign writes back into the list.
	pub fn members(&self) -> Result<Vec<Rc<Namespace>>> {
		let parent = self.source()?;
		let elements = parent.backing_list(&self.key)?;
		let mut members = Vec::with_capacity(elements.len());
		for (index, element) in elements.into_iter().enumerate() {
			tracing::trace!(collection = %self.identifier(), index, "materialized collection member");
			let (object, writeback) = match (parent.object(), self.key.as_name()) {
				(Some(source), Some(name)) => bind(element, Writeback::element(source, name, index)),
				_ => (None, None),
			};
			members.push(self.member(Key::Index(index), object, writeback, false)?);
		}
		Ok(members)
	}

	pub fn len(&self) -> Result<usize> {
		Ok(self.source()?.backing_list(&self.key)?.len())
	}

	pub fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}

	/// A member with no backing object, describing the shape every member
	/// shares. Collections nested in it need no backing list.
	pub fn prototype(&self) -> Result<Rc<Namespace>> {
		self.member(Key::Index(0), None, None, true)
	}

	pub fn identifier(&self) -> String {
		naming::identifier_of(&self.key, self.parent())
	}

	pub fn parameter_name(&self) -> String {
		naming::parameter_name_of(&self.key, self.parent())
	}

	pub fn serialize(&self) -> Result<Value> {
		let members = self.members()?;
		let vals = members
			.iter()
			.map(|member| member.serialize())
			.collect::<Result<Vec<_>>>()?;
		Ok(Value::List(vals))
	}

	/// Pairs members with `input` by position and assigns each pair.
	///
	/// Pairing stops at the shorter side; no member is created or removed.
	pub fn assign(&self, input: &Value) -> Result<()> {
		let Value::List(vals) = input else {
			tracing::debug!(collection = %self.identifier(), got = %input.get_type(), "ignored non-list input");
			return Ok(());
		};
		for (member, value) in self.members()?.iter().zip(vals) {
			member.assign(value)?;
		}
		Ok(())
	}

	/// Filters every element of `input` through [`NamespaceCollection::prototype`].
	///
	/// Lists stay lists. Records keyed by position, as nested form parameters
	/// decode, keep their keys.
	pub fn permit(&self, input: &Value) -> Result<Value> {
		let prototype = self.prototype()?;
		match input {
			Value::List(vals) => {
				let vals = vals
					.iter()
					.map(|val| prototype.permit(val))
					.collect::<Result<Vec<_>>>()?;
				Ok(Value::List(vals))
			}
			Value::Record(record) => {
				let mut permitted = Record::with_capacity(record.len());
				for (key, val) in record {
					permitted.insert(key.clone(), prototype.permit(val)?);
				}
				Ok(Value::Record(permitted))
			}
			_ => Ok(Value::List(Vec::new())),
		}
	}

	/// The parent namespace. A collection outliving it has nothing left to
	/// enumerate.
	fn source(&self) -> Result<Rc<Namespace>> {
		self.parent.upgrade().ok_or_else(|| Error::MissingCollection {
			key: self.key.clone(),
			namespace: "(dropped)".to_owned(),
		})
	}

	fn member(
		&self,
		key: Key,
		object: Option<Object>,
		writeback: Option<Writeback>,
		prototype: bool,
	) -> Result<Rc<Namespace>> {
		let parent = Parent::Collection(self.this.clone());
		let member = self.factory.namespace(key, Some(parent), object);
		member.adopt(writeback, prototype);
		(self.template)(&member)?;
		Ok(member)
	}
}

impl fmt::Debug for NamespaceCollection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NamespaceCollection")
			.field("id", &self.identifier())
			.finish_non_exhaustive()
	}
}
