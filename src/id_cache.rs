use crate::node::DomNode;
use hashbrown::HashMap;

/// Detached nodes that were skipped during child matching, keyed by their id.
///
/// Lives for exactly one [`Morpher::morph`](`crate::Morpher::morph`) call.
/// Whatever wasn't claimed by the end of that call is dropped along with it.
pub(crate) struct IdCache<N: DomNode>(HashMap<String, N>);

impl<N: DomNode> IdCache<N> {
	#[must_use]
	pub fn new() -> Self {
		Self(HashMap::new())
	}

	/// Stores `node` under `id`, returning the node it displaced, if any.
	///
	/// At most one node is kept per id.
	pub fn save(&mut self, id: String, node: N) -> Option<N> {
		self.0.insert(id, node)
	}

	/// Removes and returns the node saved under `id`.
	pub fn take(&mut self, id: &str) -> Option<N> {
		self.0.remove(id)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}
