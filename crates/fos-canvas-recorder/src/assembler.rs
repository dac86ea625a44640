//! Script Assembler
//!
//! Walks the document's canvases, then its images, emitting each element's
//! recorded statements after those of every element it draws from.

use std::collections::HashSet;

use crate::context::RecordedContext;
use crate::document::{HostDocument, RecordingDocument};
use crate::element::{Canvas, Image, RecordedElement};
use crate::literal::string_arg;

/// Build one replay script for everything recorded in `document`.
///
/// Returns `""` when nothing was recorded.
pub fn assemble_script<H: HostDocument>(document: &RecordingDocument<H>) -> String {
    let canvas_ids = document.host().element_ids_by_tag_name("canvas");
    let image_ids = document.host().element_ids_by_tag_name("img");

    let mut assembler = Assembler {
        in_dom: canvas_ids.iter().chain(&image_ids).cloned().collect(),
        rendered: HashSet::new(),
        in_progress: HashSet::new(),
        terminator: &document.config().line_terminator,
        script: String::new(),
    };

    for id in &canvas_ids {
        if let Some(canvas) = document.canvas_by_id(id) {
            assembler.render(&RecordedElement::Canvas(canvas), false);
        }
    }
    for id in &image_ids {
        if let Some(image) = document.image_by_id(id) {
            assembler.render(&RecordedElement::Image(image), false);
        }
    }

    tracing::debug!(
        elements = assembler.rendered.len(),
        bytes = assembler.script.len(),
        "script assembled"
    );
    assembler.script
}

struct Assembler<'a> {
    /// Ids connected to the document at assembly time
    in_dom: HashSet<String>,
    /// Ids already declared in `script`
    rendered: HashSet<String>,
    /// Ids on the current dependency path
    in_progress: HashSet<String>,
    terminator: &'a str,
    script: String,
}

impl Assembler<'_> {
    /// Render an element after its sources.
    ///
    /// Idle elements are skipped. An idle element used as a source is
    /// still declared, since the dependent's statements name its variable.
    fn render(&mut self, element: &RecordedElement, as_dependency: bool) {
        let id = element.id();
        if self.rendered.contains(id) {
            return;
        }
        if !self.in_progress.insert(id.to_string()) {
            tracing::warn!(element = id, "dependency cycle, element skipped");
            return;
        }

        let emitted = match element {
            RecordedElement::Canvas(canvas) => self.render_canvas(canvas, as_dependency),
            RecordedElement::Image(image) => self.render_image(image, as_dependency),
        };

        self.in_progress.remove(id);
        if emitted {
            self.rendered.insert(id.to_string());
        }
    }

    fn render_canvas(&mut self, canvas: &Canvas, as_dependency: bool) -> bool {
        let Some(context) = canvas.context() else {
            return as_dependency && self.declare(canvas.id(), "canvas");
        };

        for source in context.sources() {
            self.render(&source, true);
        }

        let statements = context.statements();
        if statements.is_empty() {
            return as_dependency && self.declare(canvas.id(), "canvas");
        }

        self.declare(canvas.id(), "canvas");
        self.line(&format!(
            "const {}={}.getContext('{}');",
            context.var_name(),
            canvas.id(),
            context.kind().as_str()
        ));
        for statement in &statements {
            self.line(statement);
        }
        true
    }

    fn render_image(&mut self, image: &Image, as_dependency: bool) -> bool {
        for source in image.sources() {
            self.render(&RecordedElement::Canvas(source), true);
        }

        let statements = image.statements();
        if statements.is_empty() {
            return as_dependency && self.declare(image.id(), "img");
        }

        self.declare(image.id(), "img");
        for statement in &statements {
            self.line(statement);
        }
        true
    }

    /// Look the element up when connected, create it otherwise
    fn declare(&mut self, id: &str, local_name: &str) -> bool {
        let line = if self.in_dom.contains(id) {
            format!("const {id}=document.getElementById({});", string_arg(id))
        } else {
            format!("const {id}=document.createElement('{local_name}');")
        };
        self.line(&line);
        true
    }

    fn line(&mut self, line: &str) {
        self.script.push_str(line);
        self.script.push_str(self.terminator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context2d::CanvasRenderingContext2d;
    use crate::document::install_recorder;
    use crate::text::FixedPitchMeasurer;
    use fos_dom::Document;

    #[test]
    fn test_empty_document_assembles_to_empty_string() {
        let mut doc = install_recorder(Document::default(), FixedPitchMeasurer::default());
        let canvas = doc.create_element("canvas");
        doc.host_mut().append(*canvas.node()).unwrap();
        canvas.as_canvas().unwrap().get_context_2d().unwrap();

        assert_eq!(doc.assemble_script(), "");
    }

    #[test]
    fn test_detached_canvas_is_not_rendered_on_its_own() {
        let mut doc = install_recorder(Document::default(), FixedPitchMeasurer::default());
        let canvas = doc.create_element("canvas");
        let ctx = canvas.as_canvas().unwrap().get_context_2d().unwrap();
        ctx.fill_rect(0.0, 0.0, 1.0, 1.0);

        assert_eq!(doc.assemble_script(), "");
    }

    #[test]
    fn test_cycle_is_skipped() {
        let mut doc = install_recorder(Document::default(), FixedPitchMeasurer::default());
        let a = doc.create_element("canvas");
        let b = doc.create_element("canvas");
        doc.host_mut().append(*a.node()).unwrap();
        doc.host_mut().append(*b.node()).unwrap();

        let a = a.as_canvas().unwrap().clone();
        let b = b.as_canvas().unwrap().clone();
        let ctx_a = a.get_context_2d().unwrap();
        let ctx_b = b.get_context_2d().unwrap();
        ctx_a.draw_image(&b, 0.0, 0.0).unwrap();
        ctx_b.draw_image(&a, 0.0, 0.0).unwrap();

        let script = doc.assemble_script();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "const _cnvs1=document.getElementById('_cnvs1');",
                "const _c1=_cnvs1.getContext('2d');",
                "_c1.drawImage(_cnvs0,0,0);",
                "const _cnvs0=document.getElementById('_cnvs0');",
                "const _c0=_cnvs0.getContext('2d');",
                "_c0.drawImage(_cnvs1,0,0);",
            ]
        );
    }
}
