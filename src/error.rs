//! Error types for femsurf.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`SurfaceError`].
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Errors that can occur while building meshes or extracting surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// A volume or face element has a node count with no known decomposition.
    #[error("element {element} has unsupported node count {node_count}")]
    UnsupportedElement {
        /// The element id.
        element: usize,
        /// The number of nodes on the element.
        node_count: usize,
    },

    /// A face record has a size that cannot be triangulated.
    #[error("face of element {element} has unsupported size {size}")]
    UnsupportedFaceSize {
        /// The owning element id.
        element: usize,
        /// The declared face size.
        size: usize,
    },

    /// A face number outside the range of the element's face table.
    #[error("element with {node_count} nodes has no face {face_no}")]
    InvalidFaceNumber {
        /// The node count of the owning element.
        node_count: usize,
        /// The 1-based face number.
        face_no: usize,
    },

    /// An element references a node the mesh cannot resolve.
    #[error("element {element} references unknown node {node}")]
    MissingNode {
        /// The element id.
        element: usize,
        /// The node id.
        node: usize,
    },

    /// More than two elements share one face.
    #[error("face shared by {} elements: {elements:?}", elements.len())]
    NonManifoldFace {
        /// Ids of every element carrying the face.
        elements: Vec<usize>,
    },

    /// The surface has more vertices than the index buffer can address.
    #[error("{count} surface vertices exceed the index range")]
    IndexOverflow {
        /// Number of distinct vertices.
        count: usize,
    },

    /// An element references a node index that does not exist.
    #[error("element {element} references invalid node index {node}")]
    InvalidNodeIndex {
        /// The element id.
        element: usize,
        /// The invalid node index.
        node: usize,
    },

    /// An element lists the same node more than once.
    #[error("element {element} is degenerate (has duplicate nodes)")]
    DegenerateElement {
        /// The element id.
        element: usize,
    },

    /// Two elements were registered with the same id.
    #[error("element id {id} is already in use")]
    DuplicateElementId {
        /// The repeated id.
        id: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl SurfaceError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        SurfaceError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SurfaceError::UnsupportedElement {
            element: 7,
            node_count: 5,
        };
        assert_eq!(err.to_string(), "element 7 has unsupported node count 5");

        let err = SurfaceError::NonManifoldFace {
            elements: vec![1, 2, 3],
        };
        assert_eq!(err.to_string(), "face shared by 3 elements: [1, 2, 3]");
    }

    #[test]
    fn test_invalid_param() {
        let err = SurfaceError::invalid_param("cells", 0, "must be positive");
        assert_eq!(err.to_string(), "invalid parameter: cells = 0 (must be positive)");
    }
}
