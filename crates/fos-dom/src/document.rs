//! Document - High-level document API

use crate::{DomError, Node, NodeData, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// Node arena; index 0 is the document node
    nodes: Vec<Node>,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);

        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");

        doc.link(NodeId::ROOT, html);
        doc.link(html, head);
        doc.link(html, body);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (document node only)
    pub fn empty(url: &str) -> Self {
        Self {
            nodes: vec![Node::document()],
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.index()).ok_or(DomError::UnknownNode(id))
    }

    /// Number of nodes ever created
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if only the document node exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.push(Node::element(local_name))
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get(parent).ok_or(DomError::UnknownNode(parent))?;
        self.get(child).ok_or(DomError::UnknownNode(child))?;

        if child == NodeId::ROOT {
            return Err(DomError::HierarchyRequest("document node cannot be a child".into()));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child:?} is an ancestor of {parent:?}"
            )));
        }

        self.remove(child)?;
        self.link(parent, child);
        tracing::trace!(?parent, ?child, "append_child");
        Ok(())
    }

    /// Append to <body> (or the document node for empty documents)
    pub fn append(&mut self, child: NodeId) -> Result<(), DomError> {
        let parent = if self.body_element.is_valid() {
            self.body_element
        } else {
            NodeId::ROOT
        };
        self.append_child(parent, child)
    }

    /// Detach a node from its parent. Detached nodes stay valid.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        let parent = self.get_mut(node)?.parent;
        if !parent.is_valid() {
            return Ok(());
        }
        self.get_mut(parent)?.children.retain(|&c| c != node);
        self.get_mut(node)?.parent = NodeId::NONE;
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = parent;
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == ancestor {
                return true;
            }
            node = match self.get(node) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, node)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match self.get_mut(node)?.as_element_mut() {
            Some(elem) => {
                elem.set_attr(name, value);
                Ok(())
            }
            None => Err(DomError::HierarchyRequest(format!("{node:?} is not an element"))),
        }
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?.as_element()?.get_attr(name)
    }

    /// Local name of an element
    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.as_element().map(|e| e.local_name.as_str())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.walk(node, &mut |_, n| {
            if let Some(text) = n.as_text() {
                out.push_str(text);
            }
        });
        out
    }

    /// Get connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(NodeId::ROOT, &mut |node_id, node| {
            if found.is_none() && node.as_element().and_then(|e| e.id()) == Some(id) {
                found = Some(node_id);
            }
        });
        found
    }

    /// Connected elements with the given tag name, in tree order
    pub fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<NodeId> {
        let tag = tag_name.to_ascii_lowercase();
        let mut matching = Vec::new();
        self.walk(NodeId::ROOT, &mut |node_id, node| {
            if let Some(elem) = node.as_element() {
                if tag == "*" || elem.local_name == tag {
                    matching.push(node_id);
                }
            }
        });
        matching
    }

    /// Pre-order traversal starting at (and including) `start`
    fn walk(&self, start: NodeId, visit: &mut dyn FnMut(NodeId, &Node)) {
        let Some(node) = self.get(start) else {
            return;
        };
        visit(start, node);
        for &child in &node.children {
            self.walk(child, visit);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
