//! Form trees bound to a backing object graph.
//!
//! A [`Form`] is the root [`Namespace`] of a tree whose leaves are [`Field`]s
//! and whose repeated sections are [`NamespaceCollection`]s. The tree names
//! every node for markup (`user_addresses_0_street`,
//! `user[addresses][0][street]`), reads the current values out of the backing
//! graph with `serialize`, and writes submitted parameters back with `assign`.
//! Only declared nodes are ever written: keys in the input that the tree does
//! not declare are ignored.
//!
//! Backing values are [`arbor_data::Object`] handles, either plain
//! dictionaries or user types exposing attributes through
//! [`arbor_data::Accessor`].

mod collection;
mod error;
mod factory;
mod field;
mod form;
pub mod naming;
mod namespace;
mod node;

pub use arbor_data;

pub use self::collection::{NamespaceCollection, Template};
pub use self::error::{Error, Result};
pub use self::factory::{BuildOptions, DefaultField, Factory, FieldClass, NodeKind};
pub use self::field::{Field, FieldCollection};
pub use self::form::{Form, FormBuilder};
pub use self::naming::Dom;
pub use self::namespace::Namespace;
pub use self::node::{Key, Node};
