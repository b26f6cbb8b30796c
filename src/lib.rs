#![doc(html_root_url = "https://docs.rs/dom-morph/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Morphs a live DOM tree in place until it matches another one.
//!
//! Existing nodes are reused wherever possible, so that state attached to them (focus, selection, event listeners…) survives:
//!
//! - Children are matched greedily in a single pass: A source child is kept if it's compatible with the current target child,
//!   meaning it's text where the target is text, or an element with the same tag name *and* id (or lack thereof) where the target is an element.
//! - Source children that are skipped over are removed, but those with an id are kept aside and reinserted if a target element with that id shows up later on.
//! - Target nodes without any counterpart are moved into the source tree as-is.
//!
//! Descendants are processed through a queue rather than recursively, so arbitrarily deep trees don't grow the call stack.
//!
//! The tree itself is accessed through the [`DomNode`] trait, which is implemented for [`web_sys::Node`].

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod attributes;
mod diff;
mod error;
mod hooks;
mod id_cache;
mod node;
mod queue;
mod web;

pub use diff::{MorphStats, Morpher};
pub use error::MorphError;
pub use hooks::{AttributeHook, AttributeHooks};
pub use node::{DomNode, NodeKind};

/// Morphs `from` until it matches `to`, using the [default](`AttributeHooks::default`) attribute hooks.
///
/// See [`Morpher::morph`] for details.
///
/// # Errors
///
/// See [`Morpher::morph`].
pub fn morph<N: DomNode>(from: &N, to: &N) -> Result<N, MorphError<N::Error>> {
	Morpher::new().morph(from, to)
}

/// Page content as it may appear in log records.
#[cfg(feature = "dangerous-logging")]
pub(crate) fn loggable(content: &str) -> &str {
	content
}

/// Page content as it may appear in log records.
#[cfg(not(feature = "dangerous-logging"))]
pub(crate) fn loggable(_content: &str) -> &str {
	"<redacted>"
}
