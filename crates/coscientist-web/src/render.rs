//! Generic list renderer. Every call fully replaces the container's children.

use thiserror::Error;

use crate::dom::{Document, DomError, Node};

pub const EMPTY_PLACEHOLDER: &str = "No items yet.";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("could not render item {index} in #{container}: {reason}")]
    Item {
        container: String,
        index: usize,
        reason: String,
    },
}

pub fn empty_placeholder() -> Node {
    Node::element("p").with_class("empty").with_text(EMPTY_PLACEHOLDER)
}

/// Replace `container`'s children with one node per item, in input order,
/// or with the "No items yet." placeholder when `items` is empty.
pub fn render_list<D, T, F>(
    doc: &mut D,
    container: &str,
    items: &[T],
    renderer: F,
) -> Result<(), RenderError>
where
    D: Document + ?Sized,
    F: FnMut(&T) -> Result<Node, RenderError>,
{
    render_list_with(doc, container, items, empty_placeholder(), renderer)
}

/// `render_list` with a caller-supplied empty-state node.
/// Renderer errors are not caught; nodes appended before the failure stay.
pub fn render_list_with<D, T, F>(
    doc: &mut D,
    container: &str,
    items: &[T],
    placeholder: Node,
    mut renderer: F,
) -> Result<(), RenderError>
where
    D: Document + ?Sized,
    F: FnMut(&T) -> Result<Node, RenderError>,
{
    doc.clear_children(container)?;
    if items.is_empty() {
        doc.append_child(container, placeholder)?;
        return Ok(());
    }
    for item in items {
        let node = renderer(item)?;
        doc.append_child(container, node)?;
    }
    Ok(())
}
