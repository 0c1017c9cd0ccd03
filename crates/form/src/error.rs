use crate::Key;

/// Structural errors raised while declaring or enumerating a tree.
///
/// Untrusted input never produces one of these: unknown keys and shape
/// mismatches during assign are ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("`{key}` is already declared in `{parent}`")]
	DuplicateName { key: Key, parent: String },
	#[error("unsupported node: {0}")]
	InvalidNode(String),
	#[error("`{namespace}` has no list under `{key}` to enumerate")]
	MissingCollection { key: Key, namespace: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
