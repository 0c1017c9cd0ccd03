//! DOM identifiers and form parameter names derived from a node's lineage.
//!
//! Both names come from the keys on the path from the root to the node:
//!
//! - The identifier joins every key with `_`: `user_addresses_0_street`.
//! - The parameter name starts with the root key and wraps each later key in
//!   brackets: `user[addresses][0][street]`. A key whose parent is a
//!   [`Field`](crate::Field) is left out and only its brackets remain, so the
//!   members of an array-valued field all submit as `user[nicknames][]`.

use std::fmt;
use std::fmt::Write as _;

use crate::{Field, Key, Node};

/// Nodes from the root down to `node`, inclusive.
pub fn lineage(node: &Node) -> Vec<Node> {
	let mut nodes = vec![node.clone()];
	let mut current = node.parent();
	while let Some(parent) = current {
		current = parent.parent();
		nodes.push(parent);
	}
	nodes.reverse();
	nodes
}

/// Lineage keys joined with `_`.
pub fn identifier(node: &Node) -> String {
	identifier_of(node.key(), node.parent())
}

/// Bracket-nested parameter name.
pub fn parameter_name(node: &Node) -> String {
	parameter_name_of(node.key(), node.parent())
}

struct Segment {
	key: Key,
	under_field: bool,
}

fn segments(key: &Key, parent: Option<Node>) -> Vec<Segment> {
	let mut out = vec![Segment {
		key: key.clone(),
		under_field: matches!(parent, Some(Node::Field(_))),
	}];
	let mut current = parent;
	while let Some(node) = current {
		let parent = node.parent();
		out.push(Segment {
			key: node.key().clone(),
			under_field: matches!(parent, Some(Node::Field(_))),
		});
		current = parent;
	}
	out.reverse();
	out
}

pub(crate) fn identifier_of(key: &Key, parent: Option<Node>) -> String {
	segments(key, parent)
		.iter()
		.map(|segment| segment.key.to_string())
		.collect::<Vec<_>>()
		.join("_")
}

pub(crate) fn parameter_name_of(key: &Key, parent: Option<Node>) -> String {
	let mut segments = segments(key, parent).into_iter();
	let mut name = segments
		.next()
		.map(|root| root.key.to_string())
		.unwrap_or_default();
	for segment in segments {
		if segment.under_field {
			name.push_str("[]");
		} else {
			let _ = write!(name, "[{}]", segment.key);
		}
	}
	name
}

/// The `id`, `name` and `value` a presentation layer puts on a field's markup.
#[derive(Clone, Copy)]
pub struct Dom<'a> {
	field: &'a Field,
}

impl<'a> Dom<'a> {
	pub(crate) fn new(field: &'a Field) -> Self {
		Self { field }
	}

	pub fn id(&self) -> String {
		self.field.identifier()
	}

	pub fn name(&self) -> String {
		self.field.parameter_name()
	}

	/// The field's current value as form text.
	pub fn value(&self) -> String {
		self.field.value().to_string()
	}
}

impl fmt::Display for Dom<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"<id={:?} name={:?} value={:?}/>",
			self.id(),
			self.name(),
			self.value()
		)
	}
}

impl fmt::Debug for Dom<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}
