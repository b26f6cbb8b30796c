use crate::node::DomNode;
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;

/// Called with the element and the new value right after an attribute was set.
pub type AttributeHook<N> = Box<dyn Fn(&N, &str) -> Result<(), <N as DomNode>::Error>>;

/// Side effects of setting specific attributes on specific elements.
///
/// Some attributes only affect the *initial* state of an element, for example `<input value="…">`.
/// Hooks registered here propagate such attributes to the live state as well.
///
/// Tag names are matched ASCII-case-insensitively, as are attribute names.
///
/// [`AttributeHooks::default()`] propagates `<input value>` via [`DomNode::set_live_value`].
/// [`AttributeHooks::new()`] is empty.
pub struct AttributeHooks<N: DomNode> {
	hooks: HashMap<(String, String), AttributeHook<N>>,
}

impl<N: DomNode> AttributeHooks<N> {
	#[must_use]
	pub fn new() -> Self {
		Self { hooks: HashMap::new() }
	}

	/// Registers `hook` for `attribute_name` on `tag_name` elements, returning the one it replaces.
	pub fn insert(&mut self, tag_name: &str, attribute_name: &str, hook: impl 'static + Fn(&N, &str) -> Result<(), N::Error>) -> Option<AttributeHook<N>> {
		self.hooks.insert(key(tag_name, attribute_name), Box::new(hook))
	}

	pub fn remove(&mut self, tag_name: &str, attribute_name: &str) -> Option<AttributeHook<N>> {
		self.hooks.remove(&key(tag_name, attribute_name))
	}

	#[must_use]
	pub fn get(&self, tag_name: &str, attribute_name: &str) -> Option<&AttributeHook<N>> {
		if self.hooks.is_empty() {
			return None;
		}
		self.hooks.get(&key(tag_name, attribute_name))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.hooks.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.hooks.is_empty()
	}
}

impl<N: DomNode> Default for AttributeHooks<N> {
	fn default() -> Self {
		let mut hooks = Self::new();
		hooks.insert("INPUT", "value", |input: &N, value: &str| input.set_live_value(value));
		hooks
	}
}

impl<N: DomNode> Debug for AttributeHooks<N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.hooks.keys().map(|(tag_name, attribute_name)| format!("{}${}", tag_name, attribute_name))).finish()
	}
}

fn key(tag_name: &str, attribute_name: &str) -> (String, String) {
	(tag_name.to_ascii_uppercase(), attribute_name.to_ascii_lowercase())
}
