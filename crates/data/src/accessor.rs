//! Attribute access over backing values.
//!
//! [`Accessor`] is the contract every backing value satisfies: read, write and
//! look up a named attribute. Two strategies ship with the crate:
//!
//! - [`Dict`](crate::Dict): a string-keyed record, where `has` is membership.
//! - Plain structs exposing named properties, implemented with [`accessors!`].
//!
//! Missing attributes are never errors. `get` yields `None` and `set` does
//! nothing, so partially shaped objects still bind.

use std::any::Any;
use std::fmt;

use crate::Value;

/// Named attribute access on a backing value.
pub trait Accessor: Any + fmt::Debug {
	/// Whether `key` is a readable attribute.
	fn has(&self, key: &str) -> bool;

	/// Reads `key`, or `None` when the value does not expose it.
	fn get(&self, key: &str) -> Option<Value>;

	/// Whether `key` is a writable attribute.
	fn has_writer(&self, key: &str) -> bool {
		self.has(key)
	}

	/// Writes `key`. Unknown keys and values the attribute cannot hold are
	/// ignored.
	fn set(&mut self, key: &str, value: Value);

	/// Attribute names in a stable order, used for snapshots.
	fn attribute_names(&self) -> Vec<String>;

	/// Attributes the model refuses to take from form input.
	fn is_readonly(&self, _key: &str) -> bool {
		false
	}
}

/// Implements [`Accessor`] for a struct by listing the fields it exposes.
///
/// Each listed field is readable through `From<T> for Value` and writable
/// through [`FromValue`](crate::FromValue). Writes whose value does not convert
/// are dropped. An optional `readonly [..]` list marks attributes that form
/// input must not overwrite.
///
/// ```
/// use arbor_data::{Accessor, Value, accessors};
///
/// #[derive(Debug)]
/// struct User {
/// 	name: String,
/// 	email: String,
/// }
///
/// accessors!(User { name, email } readonly [email]);
///
/// let mut user = User { name: "William".into(), email: "w@example.com".into() };
/// user.set("name", Value::string("Brad"));
/// assert_eq!(user.get("name"), Some(Value::string("Brad")));
/// assert!(user.is_readonly("email"));
/// assert!(!user.has("admin"));
/// ```
#[macro_export]
macro_rules! accessors {
	($ty:ty { $($field:ident),* $(,)? } $(readonly [$($ro:ident),* $(,)?])?) => {
		impl $crate::Accessor for $ty {
			fn has(&self, key: &str) -> bool {
				[$(stringify!($field)),*].contains(&key)
			}

			fn get(&self, key: &str) -> Option<$crate::Value> {
				match key {
					$(stringify!($field) => Some($crate::Value::from(self.$field.clone())),)*
					_ => None,
				}
			}

			fn set(&mut self, key: &str, value: $crate::Value) {
				match key {
					$(stringify!($field) => match $crate::FromValue::from_value(value) {
						Ok(val) => self.$field = val,
						Err(err) => $crate::__tracing::debug!(
							attribute = key,
							error = %err,
							"dropped write with mismatched type"
						),
					},)*
					_ => {}
				}
			}

			fn attribute_names(&self) -> Vec<String> {
				vec![$(stringify!($field).to_owned()),*]
			}

			$(
				fn is_readonly(&self, key: &str) -> bool {
					[$(stringify!($ro)),*].contains(&key)
				}
			)?
		}
	};
}
