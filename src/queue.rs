use crate::node::DomNode;
use std::collections::VecDeque;

/// Reconcile `source`'s attributes and children with `target`'s.
///
/// Both are elements.
#[derive(Debug)]
pub(crate) struct Task<N> {
	pub source: N,
	pub target: N,
}

/// Pending element pairs, processed first in, first out.
///
/// Descending through this queue instead of recursing keeps stack usage flat regardless of tree depth.
/// Each task only touches its own pair and their descendants, so the processing order doesn't affect the result.
pub(crate) struct WorkQueue<N: DomNode> {
	tasks: VecDeque<Task<N>>,
	pushed: usize,
}

impl<N: DomNode> WorkQueue<N> {
	#[must_use]
	pub fn new() -> Self {
		Self { tasks: VecDeque::new(), pushed: 0 }
	}

	pub fn push(&mut self, source: N, target: N) {
		self.pushed += 1;
		self.tasks.push_back(Task { source, target });
	}

	pub fn pop(&mut self) -> Option<Task<N>> {
		self.tasks.pop_front()
	}

	/// How many tasks were ever pushed.
	pub fn pushed(&self) -> usize {
		self.pushed
	}
}
