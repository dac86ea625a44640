//! Recording Document
//!
//! Wraps a host document's element factory. `canvas` and `img` elements
//! get synthetic ids and recorders; everything else passes straight through.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{Document, NodeId};

use crate::config::RecorderConfig;
use crate::element::{Canvas, Element, ElementKind, Image};
use crate::text::TextMeasurer;

/// Document operations the recorder relies on
pub trait HostDocument {
    type Node: Clone;

    /// Create a detached element
    fn create_element(&mut self, local_name: &str) -> Self::Node;

    /// Assign the `id` attribute
    fn set_element_id(&mut self, node: &Self::Node, id: &str);

    /// Ids of connected elements with the given tag, in tree order
    fn element_ids_by_tag_name(&self, tag_name: &str) -> Vec<String>;
}

impl HostDocument for Document {
    type Node = NodeId;

    fn create_element(&mut self, local_name: &str) -> NodeId {
        Document::create_element(self, local_name)
    }

    fn set_element_id(&mut self, node: &NodeId, id: &str) {
        if let Err(err) = self.set_attribute(*node, "id", id) {
            tracing::warn!(?node, %id, %err, "failed to assign element id");
        }
    }

    fn element_ids_by_tag_name(&self, tag_name: &str) -> Vec<String> {
        self.get_elements_by_tag_name(tag_name)
            .into_iter()
            .filter_map(|node| self.get_attribute(node, "id").map(str::to_string))
            .collect()
    }
}

/// Host document with recording element creation
pub struct RecordingDocument<H> {
    host: H,
    config: Rc<RecorderConfig>,
    measurer: Rc<dyn TextMeasurer>,
    canvases: Rc<RefCell<Vec<Canvas>>>,
    images: Vec<Image>,
}

/// Install the recorder with the default configuration
pub fn install_recorder<H, M>(host: H, measurer: M) -> RecordingDocument<H>
where
    H: HostDocument,
    M: TextMeasurer + 'static,
{
    install_recorder_with_config(host, measurer, RecorderConfig::default())
}

/// Install the recorder
pub fn install_recorder_with_config<H, M>(
    host: H,
    measurer: M,
    config: RecorderConfig,
) -> RecordingDocument<H>
where
    H: HostDocument,
    M: TextMeasurer + 'static,
{
    tracing::debug!(?config, "canvas recorder installed");
    RecordingDocument {
        host,
        config: Rc::new(config),
        measurer: Rc::new(measurer),
        canvases: Rc::new(RefCell::new(Vec::new())),
        images: Vec::new(),
    }
}

impl<H: HostDocument> RecordingDocument<H> {
    /// Create an element through the host, attaching a recorder to
    /// `canvas` and `img` (case-insensitive)
    pub fn create_element(&mut self, local_name: &str) -> Element<H::Node> {
        let node = self.host.create_element(local_name);

        let kind = if local_name.eq_ignore_ascii_case("canvas") {
            let index = self.canvases.borrow().len();
            let canvas = Canvas::new(index, self.measurer.clone(), self.config.clone());
            self.host.set_element_id(&node, canvas.id());
            tracing::debug!(id = canvas.id(), "canvas created");
            self.canvases.borrow_mut().push(canvas.clone());
            ElementKind::Canvas(canvas)
        } else if self.config.record_images && local_name.eq_ignore_ascii_case("img") {
            let image = Image::new(self.images.len(), Rc::downgrade(&self.canvases));
            self.host.set_element_id(&node, image.id());
            tracing::debug!(id = image.id(), "image created");
            self.images.push(image.clone());
            ElementKind::Image(image)
        } else {
            ElementKind::Other
        };

        Element::new(node, kind)
    }

    /// Concatenate all recorded statements in dependency order
    pub fn assemble_script(&self) -> String {
        crate::assembler::assemble_script(self)
    }
}

impl<H> RecordingDocument<H> {
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Every canvas created so far, in creation order
    pub fn canvases(&self) -> Vec<Canvas> {
        self.canvases.borrow().clone()
    }

    /// Every image created so far, in creation order
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn canvas_by_id(&self, id: &str) -> Option<Canvas> {
        self.canvases.borrow().iter().find(|c| c.id() == id).cloned()
    }

    pub fn image_by_id(&self, id: &str) -> Option<Image> {
        self.images.iter().find(|i| i.id() == id).cloned()
    }

    /// Remove the recorder, returning the host document
    pub fn into_host(self) -> H {
        self.host
    }
}
