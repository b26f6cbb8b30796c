//! [`DomNode`] for the browser DOM.

use crate::node::{DomNode, NodeKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Attr, Element, HtmlInputElement, NamedNodeMap, Node};

impl DomNode for Node {
	type Error = JsValue;

	fn kind(&self) -> NodeKind {
		match self.node_type() {
			Node::ELEMENT_NODE => NodeKind::Element,
			Node::TEXT_NODE => NodeKind::Text,
			_ => NodeKind::Other,
		}
	}

	fn tag_name(&self) -> String {
		self.dyn_ref::<Element>().map(Element::tag_name).unwrap_or_default()
	}

	fn id(&self) -> String {
		self.dyn_ref::<Element>().map(Element::id).unwrap_or_default()
	}

	fn attributes(&self) -> Vec<(String, String)> {
		match self.dyn_ref::<Element>() {
			Some(element) => load_attributes(&element.attributes()),
			None => Vec::new(),
		}
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), JsValue> {
		as_element(self)?.set_attribute(name, value)
	}

	fn remove_attribute(&self, name: &str) -> Result<(), JsValue> {
		as_element(self)?.remove_attribute(name)
	}

	fn text(&self) -> String {
		self.node_value().unwrap_or_default()
	}

	fn set_text(&self, value: &str) -> Result<(), JsValue> {
		self.set_node_value(Some(value));
		Ok(())
	}

	fn parent_node(&self) -> Option<Self> {
		Node::parent_node(self)
	}

	fn first_child(&self) -> Option<Self> {
		Node::first_child(self)
	}

	fn next_sibling(&self) -> Option<Self> {
		Node::next_sibling(self)
	}

	fn insert_before(&self, new_child: &Self, reference: Option<&Self>) -> Result<(), JsValue> {
		Node::insert_before(self, new_child, reference).map(drop)
	}

	fn append_child(&self, child: &Self) -> Result<(), JsValue> {
		Node::append_child(self, child).map(drop)
	}

	fn remove_child(&self, child: &Self) -> Result<(), JsValue> {
		Node::remove_child(self, child).map(drop)
	}

	fn replace_child(&self, new_child: &Self, old_child: &Self) -> Result<(), JsValue> {
		Node::replace_child(self, new_child, old_child).map(drop)
	}

	fn create_element(&self, tag_name: &str) -> Result<Self, JsValue> {
		let document = self.owner_document().ok_or_else(|| JsValue::from(js_sys::Error::new("dom-morph: No owner document found for node.")))?;
		document.create_element(tag_name).map(Node::from)
	}

	fn set_live_value(&self, value: &str) -> Result<(), JsValue> {
		if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
			input.set_value(value)
		}
		Ok(())
	}
}

fn as_element(node: &Node) -> Result<&Element, JsValue> {
	node.dyn_ref::<Element>().ok_or_else(|| js_sys::Error::new("dom-morph: Expected an element.").into())
}

fn load_attributes(attributes: &NamedNodeMap) -> Vec<(String, String)> {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).filter(Attr::specified).map(|attribute| load_attribute(&attribute)).collect()
}

fn load_attribute(attribute: &Attr) -> (String, String) {
	(attribute.name(), attribute.value())
}
