use crate::node::NodeKind;
use core::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MorphError<E: Debug> {
	/// Only element and text roots can be morphed.
	#[error("can't morph a root node of kind {0:?}")]
	UnsupportedRoot(NodeKind),

	/// A tree mutation failed. The tree may be partially morphed.
	#[error("tree mutation failed: {0:?}")]
	Dom(E),
}
