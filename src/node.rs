//! The tree node capability [`morph`](`crate::morph`) operates on.

use core::fmt::Debug;

/// The closed set of node kinds the morpher distinguishes.
///
/// Anything that is neither an element nor text (comments, processing instructions, doctypes…) is [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Element,
	Text,
	Other,
}

/// A handle to a node in a mutable tree.
///
/// Handles are cheap to clone and compare by **identity**: Two handles are equal exactly if they refer to the same node.
///
/// Mutations go through `&self`, like they do on [`web_sys::Node`].
/// Any error a mutation returns is passed through to the caller of [`morph`](`crate::morph`) without local recovery.
///
/// Element-only accessors ([`tag_name`](`DomNode::tag_name`), [`id`](`DomNode::id`), [`attributes`](`DomNode::attributes`))
/// are only called on nodes whose [`kind`](`DomNode::kind`) is [`NodeKind::Element`],
/// and [`text`](`DomNode::text`) only on [`NodeKind::Text`].
pub trait DomNode: Clone + PartialEq + Debug {
	type Error: Debug;

	fn kind(&self) -> NodeKind;

	fn tag_name(&self) -> String;

	/// The element's id, or an empty [`String`] if it has none.
	fn id(&self) -> String;

	/// A snapshot of the element's attributes as (name, value) pairs, in tree order.
	fn attributes(&self) -> Vec<(String, String)>;
	fn set_attribute(&self, name: &str, value: &str) -> Result<(), Self::Error>;
	fn remove_attribute(&self, name: &str) -> Result<(), Self::Error>;

	fn text(&self) -> String;
	fn set_text(&self, value: &str) -> Result<(), Self::Error>;

	fn parent_node(&self) -> Option<Self>;
	fn first_child(&self) -> Option<Self>;
	fn next_sibling(&self) -> Option<Self>;

	/// Inserts `new_child` before `reference`, or at the end if `reference` is [`None`].
	///
	/// `new_child` is detached from its current parent first, if any.
	fn insert_before(&self, new_child: &Self, reference: Option<&Self>) -> Result<(), Self::Error>;

	/// Appends `child` as last child, detaching it from its current parent first.
	fn append_child(&self, child: &Self) -> Result<(), Self::Error>;
	fn remove_child(&self, child: &Self) -> Result<(), Self::Error>;
	fn replace_child(&self, new_child: &Self, old_child: &Self) -> Result<(), Self::Error>;

	/// Creates a new, detached element with the given tag name that can be inserted alongside `self`.
	fn create_element(&self, tag_name: &str) -> Result<Self, Self::Error>;

	/// Assigns the live value of a form control, as opposed to its `value` attribute which only sets the initial value.
	///
	/// The default implementation does nothing.
	fn set_live_value(&self, value: &str) -> Result<(), Self::Error> {
		let _ = value;
		Ok(())
	}
}
