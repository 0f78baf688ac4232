//! Nearest-container resolution

use crate::dom::Dom;

/// Resolve `node` to the overlay container it belongs to.
///
/// Returns the node itself when it carries `container_class`, otherwise the nearest
/// ancestor that does. The walk ends once the body has been checked, or at the root of a
/// detached subtree. `None` is an expected outcome, not an error.
pub fn find_nearest_container<D: Dom>(
    dom: &D,
    node: &D::Node,
    container_class: &str,
) -> Option<D::Node> {
    if dom.has_class(node, container_class) {
        return Some(node.clone());
    }

    let body = dom.body();
    let mut current = node.clone();
    while Some(&current) != body.as_ref() {
        current = dom.parent(&current)?;
        if dom.has_class(&current, container_class) {
            return Some(current);
        }
    }
    None
}
