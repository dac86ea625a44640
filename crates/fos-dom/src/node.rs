//! DOM Node

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Children in tree order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(local_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(local_name)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased local name
    pub local_name: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// `id` attribute value
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_is_lowercased() {
        let node = Node::element("CANVAS");
        assert_eq!(node.as_element().unwrap().local_name, "canvas");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut elem = ElementData::new("div");
        elem.set_attr("id", "a");
        elem.set_attr("id", "b");
        assert_eq!(elem.id(), Some("b"));
        assert_eq!(elem.attrs.len(), 1);
    }
}
