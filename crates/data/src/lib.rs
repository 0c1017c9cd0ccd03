//! Backing value model for arbor form trees.
//!
//! A form tree never owns the data it binds to. It reads and writes through
//! [`Object`] handles into a caller-supplied graph, using the [`Accessor`]
//! contract to reach named attributes. Values crossing the tree boundary
//! (serialized output, assigned input) are plain [`Value`]s and convert to and
//! from `serde_json`.

pub mod accessor;
pub mod convert;
pub mod object;
pub mod value;

pub use accessor::Accessor;
pub use convert::FromValue;
pub use object::{Dict, Object};
pub use value::{Record, Value, ValueType, ValueTypeError};

#[doc(hidden)]
pub use tracing as __tracing;
