//! Geometry of the primary node

use super::NodeCollection;
use crate::{QueryError, QueryResult};

/// Viewport-relative edges
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Viewport-relative position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl NodeCollection {
    /// Bounding rect of the primary node, shifted by the document element's
    /// client offsets. `default` when there is no node or it has no box.
    pub fn get_bounding_client_rect(&self, default: Option<ClientRect>) -> Option<ClientRect> {
        let doc = self.doc.borrow();
        let Some(rect) = self.first_node().and_then(|node| doc.bounding_client_rect(node)) else {
            return default;
        };

        let (top, left) = doc
            .document_element()
            .map_or((0.0, 0.0), |html| (doc.client_top(html), doc.client_left(html)));
        Some(ClientRect {
            top: rect.top() - top,
            bottom: rect.bottom() - top,
            left: rect.left() - left,
            right: rect.right() - left,
        })
    }

    /// Raw top/left of the primary node's bounding rect
    pub fn offset(&self) -> QueryResult<Offset> {
        let node = self
            .first_node()
            .ok_or(QueryError::InvalidState("offset() on an empty collection"))?;
        let rect = self
            .doc
            .borrow()
            .bounding_client_rect(node)
            .ok_or(QueryError::InvalidState("offset() on a node without a box"))?;
        Ok(Offset {
            top: rect.top(),
            left: rect.left(),
        })
    }
}
