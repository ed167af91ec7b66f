//! Face records and face synthesis.

use super::element::{ElementKind, MAX_FACE_NODES};
use crate::error::{Result, SurfaceError};
use crate::mesh::{ElementId, ElementView, MeshIndex, NodeId};

/// One geometric face of an element, derived during a rebuild.
///
/// The populated node slots are kept sorted in descending order so that two
/// records over the same node set compare equal regardless of winding. Unused
/// slots hold [`NodeId::invalid`].
#[derive(Debug, Clone)]
pub struct FaceRecord<'a, I: MeshIndex = u32> {
    nodes: [NodeId<I>; MAX_FACE_NODES],
    size: usize,
    element: ElementView<'a, I>,
    kind: ElementKind,
    face_no: usize,
    /// Whether this face is suppressed as an internal face.
    pub hidden: bool,
}

impl<'a, I: MeshIndex> FaceRecord<'a, I> {
    /// Build face `face_no` (1-based) of an element of the given kind.
    pub fn new(kind: ElementKind, element: ElementView<'a, I>, face_no: usize) -> Result<Self> {
        let local = kind.face_nodes(face_no)?;
        let mut nodes = [NodeId::invalid(); MAX_FACE_NODES];
        for (slot, &l) in nodes.iter_mut().zip(local) {
            *slot = element.node(l);
        }
        nodes[..local.len()].sort_unstable_by(|a, b| b.cmp(a));

        Ok(Self {
            nodes,
            size: local.len(),
            element,
            kind,
            face_no,
            hidden: false,
        })
    }

    /// Sorted node slots, including the invalid padding.
    #[inline]
    pub fn slots(&self) -> &[NodeId<I>; MAX_FACE_NODES] {
        &self.nodes
    }

    /// The populated node slots, sorted descending.
    #[inline]
    pub fn nodes(&self) -> &[NodeId<I>] {
        &self.nodes[..self.size]
    }

    /// Declared face size: 3, 4 or 6.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// 1-based local face number on the owning element.
    #[inline]
    pub fn face_no(&self) -> usize {
        self.face_no
    }

    /// Kind of the owning element.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The owning element.
    #[inline]
    pub fn element(&self) -> ElementView<'a, I> {
        self.element
    }

    /// Id of the owning element.
    #[inline]
    pub fn element_id(&self) -> ElementId<I> {
        self.element.id
    }

    /// Whether `other` is the same face seen from a different element.
    ///
    /// Faces of one element never match each other.
    pub fn is_same_face(&self, other: &Self) -> bool {
        if self.element.id == other.element.id {
            return false;
        }
        self.size == other.size && self.nodes == other.nodes
    }

    /// The wound sub-triangles of this face, as element-local node indices.
    pub fn triangles(&self) -> Result<&'static [[usize; 3]]> {
        self.kind.face_triangles(self.face_no)
    }
}

/// Decompose a volume element into its faces.
///
/// Fails with [`SurfaceError::UnsupportedElement`] unless the element has 4, 8
/// or 10 nodes.
pub fn volume_faces<I: MeshIndex>(element: ElementView<'_, I>) -> Result<Vec<FaceRecord<'_, I>>> {
    let kind = ElementKind::volume(element.node_count()).ok_or(SurfaceError::UnsupportedElement {
        element: element.id.index(),
        node_count: element.node_count(),
    })?;
    (1..=kind.num_faces())
        .map(|face_no| FaceRecord::new(kind, element, face_no))
        .collect()
}

/// Wrap a native 2-D face element as a single face record.
///
/// Fails with [`SurfaceError::UnsupportedElement`] unless the element has 3, 4
/// or 6 nodes.
pub fn surface_face<I: MeshIndex>(element: ElementView<'_, I>) -> Result<FaceRecord<'_, I>> {
    let kind = ElementKind::surface(element.node_count()).ok_or(SurfaceError::UnsupportedElement {
        element: element.id.index(),
        node_count: element.node_count(),
    })?;
    FaceRecord::new(kind, element, 1)
}
