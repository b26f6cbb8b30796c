use crate::{
	attributes::morph_attributes,
	error::MorphError,
	hooks::AttributeHooks,
	id_cache::IdCache,
	loggable,
	node::{DomNode, NodeKind},
	queue::{Task, WorkQueue},
};
use tracing::{info, instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};

/// Counters for a single [`Morpher::morph_with_stats`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MorphStats {
	/// Element pairs whose attributes and children were reconciled, including the root.
	pub tasks: usize,
	/// Removed nodes that were reinserted elsewhere because their id reappeared.
	pub reused_by_id: usize,
	/// Child nodes kept in place because they were compatible with the target child at their position.
	pub matched: usize,
	/// Target nodes adopted into the source tree as-is.
	pub appended: usize,
	/// Child nodes removed from the source tree, whether or not they were reused later.
	pub removed: usize,
	/// Removed nodes with an id that was never claimed again.
	pub unclaimed: usize,
}

/// Morphs a source tree into a target tree, in place.
///
/// The only state kept across calls is the configuration (currently the [`AttributeHooks`]).
/// The id cache and work queue are created anew for each [`Morpher::morph`] call.
///
/// # Correct Use
///
/// The morpher needs exclusive access to both trees for the duration of a call.
/// The target tree is consumed: Nodes that have no counterpart in the source tree are moved over rather than cloned.
#[derive(Debug)]
pub struct Morpher<N: DomNode> {
	hooks: AttributeHooks<N>,
}

impl<N: DomNode> Default for Morpher<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N: DomNode> Morpher<N> {
	/// Creates a [`Morpher`] with the [default](`AttributeHooks::default`) attribute hooks.
	#[must_use]
	pub fn new() -> Self {
		Self::with_hooks(AttributeHooks::default())
	}

	#[must_use]
	pub fn with_hooks(hooks: AttributeHooks<N>) -> Self {
		Self { hooks }
	}

	#[must_use]
	pub fn hooks(&self) -> &AttributeHooks<N> {
		&self.hooks
	}

	pub fn hooks_mut(&mut self) -> &mut AttributeHooks<N> {
		&mut self.hooks
	}

	/// Morphs `from` until it matches `to`, returning the resulting node.
	///
	/// This is `from` itself unless the roots are incompatible:
	///
	/// - For elements with different tag names, a new element is created and `from`'s children are moved onto it.
	///   It replaces `from` in `from`'s parent, if there is one.
	/// - If `from` is an element or text and `to` is of another kind, `to` is returned as-is.
	///   Replacing `from` is then up to the caller.
	///
	/// # Errors
	///
	/// Iff `from` is neither an element nor text, [`MorphError::UnsupportedRoot`] is returned before anything is changed.
	///
	/// Errors returned by the tree are passed through as [`MorphError::Dom`], in which case the tree may be left partially morphed.
	pub fn morph(&self, from: &N, to: &N) -> Result<N, MorphError<N::Error>> {
		self.morph_with_stats(from, to).map(|(morphed, _)| morphed)
	}

	/// Like [`Morpher::morph`], but also returns what was done.
	///
	/// # Errors
	///
	/// See [`Morpher::morph`].
	#[instrument(skip(self, from, to), fields(from = ?from.kind(), to = ?to.kind()))]
	pub fn morph_with_stats(&self, from: &N, to: &N) -> Result<(N, MorphStats), MorphError<N::Error>> {
		let mut stats = MorphStats::default();

		let morphed = match (from.kind(), to.kind()) {
			(NodeKind::Element, NodeKind::Element) => {
				let tag_name = to.tag_name();
				if from.tag_name() == tag_name {
					from.clone()
				} else {
					trace!("Root tag mismatch: <{}> -> <{}>. Recreating the root element.", from.tag_name(), tag_name);
					let created = from.create_element(&tag_name).map_err(MorphError::Dom)?;
					move_children(from, &created).map_err(MorphError::Dom)?;
					created
				}
			}
			(NodeKind::Element, NodeKind::Text) | (NodeKind::Element, NodeKind::Other) => {
				trace!("Root element replaced by non-element.");
				return Ok((to.clone(), stats));
			}
			(NodeKind::Text, NodeKind::Text) => {
				let text = to.text();
				trace!("Updating root text to {:?}.", loggable(&text));
				from.set_text(&text).map_err(MorphError::Dom)?;
				return Ok((from.clone(), stats));
			}
			(NodeKind::Text, NodeKind::Element) | (NodeKind::Text, NodeKind::Other) => {
				trace!("Root text replaced by non-text.");
				return Ok((to.clone(), stats));
			}
			(NodeKind::Other, _) => return Err(MorphError::UnsupportedRoot(NodeKind::Other)),
		};

		let mut context = MorphContext {
			hooks: &self.hooks,
			queue: WorkQueue::new(),
			saved: IdCache::new(),
			stats: &mut stats,
		};
		context.queue.push(morphed.clone(), to.clone());
		context.drain().map_err(MorphError::Dom)?;

		if morphed != *from {
			if let Some(parent) = from.parent_node() {
				trace!("Replacing the old root in its parent.");
				parent.replace_child(&morphed, from).map_err(MorphError::Dom)?;
			}
		}

		info!(
			"Morphed with {} task(s): {} matched, {} reused by id, {} appended, {} removed ({} unclaimed).",
			stats.tasks, stats.matched, stats.reused_by_id, stats.appended, stats.removed, stats.unclaimed
		);
		Ok((morphed, stats))
	}
}

/// Per-call state.
struct MorphContext<'a, N: DomNode> {
	hooks: &'a AttributeHooks<N>,
	queue: WorkQueue<N>,
	saved: IdCache<N>,
	stats: &'a mut MorphStats,
}

impl<'a, N: DomNode> MorphContext<'a, N> {
	fn drain(&mut self) -> Result<(), N::Error> {
		while let Some(task) = self.queue.pop() {
			self.run(task)?;
		}
		self.stats.tasks = self.queue.pushed();

		self.stats.unclaimed = self.saved.len();
		if STATIC_MAX_LEVEL >= Level::TRACE && !self.saved.is_empty() {
			trace!("Discarding unclaimed nodes with ids {:?}.", self.saved.ids().map(loggable).collect::<Vec<_>>());
		}
		Ok(())
	}

	/// Reconciles one element pair. Element children are queued rather than descended into.
	#[instrument(skip(self, task), fields(tag = %task.source.tag_name()))]
	fn run(&mut self, task: Task<N>) -> Result<(), N::Error> {
		let Task { source, target } = task;

		// Scanning a child list against itself would detach the target's own children.
		if source == target {
			trace!("Source and target are the same node. Nothing to do.");
			return Ok(());
		}

		morph_attributes(&source, &target, self.hooks)?;

		let mut current_target = target.first_child();
		let mut current_source = source.first_child();

		'target: while let Some(target_child) = current_target.take() {
			let target_next = target_child.next_sibling();
			let target_kind = target_child.kind();
			let target_id = match target_kind {
				NodeKind::Element => target_child.id(),
				NodeKind::Text | NodeKind::Other => String::new(),
			};

			if !target_id.is_empty() {
				if let Some(saved) = self.saved.take(&target_id) {
					let span = trace_span!("Reusing saved element", id = loggable(&target_id));
					let _enter = span.enter();
					source.insert_before(&saved, current_source.as_ref())?;
					self.queue.push(saved, target_child);
					self.stats.reused_by_id += 1;
					current_target = target_next;
					continue;
				}
			}

			let target_tag_name = match target_kind {
				NodeKind::Element => target_child.tag_name(),
				NodeKind::Text | NodeKind::Other => String::new(),
			};

			while let Some(source_child) = current_source.take() {
				let source_next = source_child.next_sibling();

				match (source_child.kind(), target_kind) {
					(NodeKind::Element, NodeKind::Element) => {
						if source_child.tag_name() == target_tag_name && source_child.id() == target_id {
							trace!("Matched <{}> (id {:?}).", target_tag_name, loggable(&target_id));
							self.queue.push(source_child, target_child);
							self.stats.matched += 1;
							current_source = source_next;
							current_target = target_next;
							continue 'target;
						}
					}
					(NodeKind::Text, NodeKind::Text) => {
						let text = target_child.text();
						trace!("Matched text, updating it to {:?}.", loggable(&text));
						source_child.set_text(&text)?;
						self.stats.matched += 1;
						current_source = source_next;
						current_target = target_next;
						continue 'target;
					}
					(NodeKind::Element, _) | (NodeKind::Text, _) | (NodeKind::Other, _) => (),
				}

				self.skip(&source, source_child)?;
				current_source = source_next;
			}

			trace!("No match found. Appending the target node.");
			source.append_child(&target_child)?;
			self.stats.appended += 1;
			current_target = target_next;
		}

		while let Some(source_child) = current_source.take() {
			current_source = source_child.next_sibling();
			trace!("Removing leftover {:?}.", source_child.kind());
			source.remove_child(&source_child)?;
			self.stats.removed += 1;
		}

		Ok(())
	}

	/// Removes a source child that didn't match, keeping it around for later if it has an id.
	fn skip(&mut self, parent: &N, skipped: N) -> Result<(), N::Error> {
		parent.remove_child(&skipped)?;
		self.stats.removed += 1;

		let id = match skipped.kind() {
			NodeKind::Element => skipped.id(),
			NodeKind::Text | NodeKind::Other => return Ok(()),
		};
		if id.is_empty() {
			trace!("Removed unmatched {:?}.", skipped.kind());
			return Ok(());
		}

		trace!("Saving removed element with id {:?}.", loggable(&id));
		if let Some(displaced) = self.saved.save(id, skipped) {
			let id = displaced.id();
			warn!("Duplicate id {:?} among removed elements. The earlier one can't be reused anymore.", loggable(&id));
		}
		Ok(())
	}
}

/// Moves all children of `from` to the end of `to`, in order.
fn move_children<N: DomNode>(from: &N, to: &N) -> Result<(), N::Error> {
	let mut current = from.first_child();
	while let Some(child) = current.take() {
		current = child.next_sibling();
		to.append_child(&child)?;
	}
	Ok(())
}
