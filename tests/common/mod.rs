//! An in-memory [`DomNode`] implementation to morph against outside of a browser.

#![allow(dead_code)]

use dom_morph::{DomNode, NodeKind};
use std::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
	mem,
	rc::{Rc, Weak},
};

pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

#[derive(Clone)]
pub struct MemNode(Rc<RefCell<NodeData>>);

struct NodeData {
	content: Content,
	parent: Weak<RefCell<NodeData>>,
	children: Vec<MemNode>,
}

enum Content {
	Element {
		tag_name: String,
		attributes: Vec<(String, String)>,
		live_value: Option<String>,
	},
	Text(String),
	Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemError {
	NotAChild,
	NotAnElement,
	WouldCycle,
}

impl Drop for NodeData {
	// Flattened so that dropping very deep trees doesn't overflow the stack.
	fn drop(&mut self) {
		let mut stack = mem::take(&mut self.children);
		while let Some(MemNode(child)) = stack.pop() {
			if let Ok(cell) = Rc::try_unwrap(child) {
				let mut data = cell.into_inner();
				stack.append(&mut data.children);
			}
		}
	}
}

impl PartialEq for MemNode {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Debug for MemNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.0.borrow().content {
			Content::Element { tag_name, attributes, .. } => {
				write!(f, "<{}", tag_name)?;
				for (name, value) in attributes {
					write!(f, " {}={:?}", name, value)?;
				}
				write!(f, ">")
			}
			Content::Text(text) => write!(f, "{:?}", text),
			Content::Comment(comment) => write!(f, "<!--{}-->", comment),
		}
	}
}

fn new_node(content: Content) -> MemNode {
	MemNode(Rc::new(RefCell::new(NodeData {
		content,
		parent: Weak::new(),
		children: Vec::new(),
	})))
}

pub fn element(tag_name: &str, attributes: &[(&str, &str)], children: Vec<MemNode>) -> MemNode {
	let node = new_node(Content::Element {
		tag_name: tag_name.to_ascii_uppercase(),
		attributes: attributes.iter().map(|&(name, value)| (name.to_owned(), value.to_owned())).collect(),
		live_value: None,
	});
	for child in children {
		node.append_child(&child).unwrap();
	}
	node
}

pub fn text(text: &str) -> MemNode {
	new_node(Content::Text(text.to_owned()))
}

pub fn comment(comment: &str) -> MemNode {
	new_node(Content::Comment(comment.to_owned()))
}

impl MemNode {
	pub fn children(&self) -> Vec<MemNode> {
		self.0.borrow().children.clone()
	}

	pub fn child(&self, index: usize) -> MemNode {
		self.0.borrow().children[index].clone()
	}

	pub fn live_value(&self) -> Option<String> {
		match &self.0.borrow().content {
			Content::Element { live_value, .. } => live_value.clone(),
			Content::Text(_) | Content::Comment(_) => None,
		}
	}

	pub fn attribute(&self, name: &str) -> Option<String> {
		self.attributes().into_iter().find(|(n, _)| n == name).map(|(_, value)| value)
	}

	/// Serializes the subtree without recursing, with attributes in their stored order.
	pub fn render(&self) -> String {
		enum Step {
			Open(MemNode),
			Close(String),
		}

		let mut html = String::new();
		let mut stack = vec![Step::Open(self.clone())];
		while let Some(step) = stack.pop() {
			match step {
				Step::Close(tag_name) => {
					html.push_str("</");
					html.push_str(&tag_name.to_ascii_lowercase());
					html.push('>');
				}
				Step::Open(node) => {
					let data = node.0.borrow();
					match &data.content {
						Content::Element { tag_name, attributes, .. } => {
							html.push('<');
							html.push_str(&tag_name.to_ascii_lowercase());
							for (name, value) in attributes {
								html.push_str(&format!(" {}=\"{}\"", name, value));
							}
							html.push('>');
							stack.push(Step::Close(tag_name.clone()));
							stack.extend(data.children.iter().rev().cloned().map(Step::Open));
						}
						Content::Text(text) => html.push_str(text),
						Content::Comment(comment) => {
							html.push_str("<!--");
							html.push_str(comment);
							html.push_str("-->");
						}
					}
				}
			}
		}
		html
	}

	fn index_in(&self, parent: &MemNode) -> Option<usize> {
		parent.0.borrow().children.iter().position(|child| child == self)
	}

	fn detach(&self) {
		let parent = self.0.borrow().parent.upgrade().map(MemNode);
		if let Some(parent) = parent {
			if let Some(index) = self.index_in(&parent) {
				parent.0.borrow_mut().children.remove(index);
			}
			self.0.borrow_mut().parent = Weak::new();
		}
	}

	fn is_inclusive_ancestor_of(&self, node: &MemNode) -> bool {
		let mut current = Some(node.clone());
		while let Some(candidate) = current {
			if candidate == *self {
				return true;
			}
			current = candidate.parent_node();
		}
		false
	}

	fn adopt(&self, child: &MemNode, index: Option<usize>) -> Result<(), MemError> {
		if child.is_inclusive_ancestor_of(self) {
			return Err(MemError::WouldCycle);
		}
		child.detach();
		child.0.borrow_mut().parent = Rc::downgrade(&self.0);
		let mut data = self.0.borrow_mut();
		match index {
			Some(index) => data.children.insert(index, child.clone()),
			None => data.children.push(child.clone()),
		}
		Ok(())
	}

	fn with_attributes<T>(&self, f: impl FnOnce(&mut Vec<(String, String)>) -> T) -> Result<T, MemError> {
		match &mut self.0.borrow_mut().content {
			Content::Element { attributes, .. } => Ok(f(attributes)),
			Content::Text(_) | Content::Comment(_) => Err(MemError::NotAnElement),
		}
	}
}

impl DomNode for MemNode {
	type Error = MemError;

	fn kind(&self) -> NodeKind {
		match self.0.borrow().content {
			Content::Element { .. } => NodeKind::Element,
			Content::Text(_) => NodeKind::Text,
			Content::Comment(_) => NodeKind::Other,
		}
	}

	fn tag_name(&self) -> String {
		match &self.0.borrow().content {
			Content::Element { tag_name, .. } => tag_name.clone(),
			Content::Text(_) | Content::Comment(_) => String::new(),
		}
	}

	fn id(&self) -> String {
		self.attribute("id").unwrap_or_default()
	}

	fn attributes(&self) -> Vec<(String, String)> {
		self.with_attributes(|attributes| attributes.clone()).unwrap_or_default()
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), MemError> {
		self.with_attributes(|attributes| match attributes.iter().position(|(n, _)| n == name) {
			Some(i) => attributes[i].1 = value.to_owned(),
			None => attributes.push((name.to_owned(), value.to_owned())),
		})
	}

	fn remove_attribute(&self, name: &str) -> Result<(), MemError> {
		self.with_attributes(|attributes| attributes.retain(|(n, _)| n != name))
	}

	fn text(&self) -> String {
		match &self.0.borrow().content {
			Content::Text(text) | Content::Comment(text) => text.clone(),
			Content::Element { .. } => String::new(),
		}
	}

	fn set_text(&self, value: &str) -> Result<(), MemError> {
		match &mut self.0.borrow_mut().content {
			Content::Text(text) | Content::Comment(text) => {
				*text = value.to_owned();
				Ok(())
			}
			Content::Element { .. } => Err(MemError::NotAnElement),
		}
	}

	fn parent_node(&self) -> Option<Self> {
		self.0.borrow().parent.upgrade().map(MemNode)
	}

	fn first_child(&self) -> Option<Self> {
		self.0.borrow().children.first().cloned()
	}

	fn next_sibling(&self) -> Option<Self> {
		let parent = self.parent_node()?;
		let index = self.index_in(&parent)?;
		let sibling = parent.0.borrow().children.get(index + 1).cloned();
		sibling
	}

	fn insert_before(&self, new_child: &Self, reference: Option<&Self>) -> Result<(), MemError> {
		match reference {
			None => self.adopt(new_child, None),
			Some(reference) => {
				reference.index_in(self).ok_or(MemError::NotAChild)?;
				if reference == new_child {
					return Ok(());
				}
				new_child.detach();
				let index = reference.index_in(self).ok_or(MemError::NotAChild)?;
				self.adopt(new_child, Some(index))
			}
		}
	}

	fn append_child(&self, child: &Self) -> Result<(), MemError> {
		self.adopt(child, None)
	}

	fn remove_child(&self, child: &Self) -> Result<(), MemError> {
		child.index_in(self).ok_or(MemError::NotAChild)?;
		child.detach();
		Ok(())
	}

	fn replace_child(&self, new_child: &Self, old_child: &Self) -> Result<(), MemError> {
		old_child.index_in(self).ok_or(MemError::NotAChild)?;
		if new_child == old_child {
			return Ok(());
		}
		self.insert_before(new_child, Some(old_child))?;
		self.remove_child(old_child)
	}

	fn create_element(&self, tag_name: &str) -> Result<Self, MemError> {
		Ok(element(tag_name, &[], Vec::new()))
	}

	fn set_live_value(&self, value: &str) -> Result<(), MemError> {
		match &mut self.0.borrow_mut().content {
			Content::Element { live_value, .. } => {
				*live_value = Some(value.to_owned());
				Ok(())
			}
			Content::Text(_) | Content::Comment(_) => Err(MemError::NotAnElement),
		}
	}
}

/// Builds `depth` nested `<div>`s with a single text leaf at the bottom, without recursing.
///
/// Built bottom-up, so that each append only has to check a parentless node for cycles.
pub fn nested(depth: usize, leaf: &str) -> MemNode {
	let mut current = element("div", &[], vec![text(leaf)]);
	for _ in 1..depth {
		current = element("div", &[], vec![current]);
	}
	current
}

/// Counts the `<div>`s on the first-child chain below and including `node`, without recursing.
pub fn depth(node: &MemNode) -> usize {
	let mut depth = 0;
	let mut current = Some(node.clone());
	while let Some(node) = current {
		if node.kind() != NodeKind::Element {
			break;
		}
		depth += 1;
		current = node.first_child();
	}
	depth
}
