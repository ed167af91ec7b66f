//! Finite-element mesh storage and the mesh source boundary.
//!
//! Surface extraction reads its input through the [`MeshSource`] trait so that
//! any externally maintained mesh can be rendered without copying. [`FemMesh`]
//! is the in-memory implementation used by the builders, the CLI and the tests.

use nalgebra::Point3;

use super::index::{ElementId, MeshIndex, NodeId};

/// A borrowed view of one element: its id and its ordered local nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementView<'a, I: MeshIndex = u32> {
    /// Stable element id.
    pub id: ElementId<I>,
    /// Element nodes in local order.
    pub nodes: &'a [NodeId<I>],
}

impl<'a, I: MeshIndex> ElementView<'a, I> {
    /// Number of nodes on the element.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node at local index `i`.
    #[inline]
    pub fn node(&self, i: usize) -> NodeId<I> {
        self.nodes[i]
    }
}

/// Read access to a finite-element mesh.
///
/// Implementations must hand out node handles that stay stable for the
/// lifetime of the borrow; the surface extractor keys its node map on them.
pub trait MeshSource<I: MeshIndex = u32> {
    /// Total number of nodes.
    fn num_nodes(&self) -> usize;

    /// Total number of 1-D edge elements.
    fn num_edges(&self) -> usize;

    /// Total number of 2-D face elements.
    fn num_faces(&self) -> usize;

    /// Position of a node, or `None` if the handle is unknown.
    fn node_position(&self, node: NodeId<I>) -> Option<Point3<f64>>;

    /// Iterate over the volume elements.
    fn volumes(&self) -> Box<dyn Iterator<Item = ElementView<'_, I>> + '_>;

    /// Iterate over the native 2-D face elements.
    fn surface_elements(&self) -> Box<dyn Iterator<Item = ElementView<'_, I>> + '_>;

    /// Whether the mesh has no nodes, edges or faces at all.
    fn is_empty(&self) -> bool {
        self.num_nodes() + self.num_edges() + self.num_faces() == 0
    }
}

/// An owned element: id plus ordered nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<I: MeshIndex = u32> {
    /// Stable element id.
    pub id: ElementId<I>,
    /// Element nodes in local order.
    pub nodes: Vec<NodeId<I>>,
}

impl<I: MeshIndex> Element<I> {
    /// Borrow this element as a view.
    #[inline]
    pub fn view(&self) -> ElementView<'_, I> {
        ElementView {
            id: self.id,
            nodes: &self.nodes,
        }
    }
}

/// An in-memory finite-element mesh.
///
/// Node handles are dense indices into the position array. Element ids share
/// one id space across volumes, faces and edges.
#[derive(Debug, Clone)]
pub struct FemMesh<I: MeshIndex = u32> {
    pub(crate) positions: Vec<Point3<f64>>,
    pub(crate) volumes: Vec<Element<I>>,
    pub(crate) faces: Vec<Element<I>>,
    pub(crate) edges: Vec<Element<I>>,
}

impl<I: MeshIndex> Default for FemMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> FemMesh<I> {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            volumes: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    /// Number of volume elements.
    #[inline]
    pub fn num_volumes(&self) -> usize {
        self.volumes.len()
    }

    /// Position of a node.
    ///
    /// # Panics
    /// Panics if the handle is out of range.
    #[inline]
    pub fn position(&self, node: NodeId<I>) -> &Point3<f64> {
        &self.positions[node.index()]
    }

    /// Iterate over all node handles.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId<I>> + '_ {
        (0..self.positions.len()).map(NodeId::new)
    }

    /// All volume elements.
    pub fn volume_elements(&self) -> &[Element<I>] {
        &self.volumes
    }

    /// All 2-D face elements.
    pub fn face_elements(&self) -> &[Element<I>] {
        &self.faces
    }

    /// All 1-D edge elements.
    pub fn edge_elements(&self) -> &[Element<I>] {
        &self.edges
    }

    /// Axis-aligned bounding box of all nodes.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.positions.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.positions[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some((min, max))
    }
}

impl<I: MeshIndex> MeshSource<I> for FemMesh<I> {
    fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    fn num_edges(&self) -> usize {
        self.edges.len()
    }

    fn num_faces(&self) -> usize {
        self.faces.len()
    }

    fn node_position(&self, node: NodeId<I>) -> Option<Point3<f64>> {
        if !node.is_valid() {
            return None;
        }
        self.positions.get(node.index()).copied()
    }

    fn volumes(&self) -> Box<dyn Iterator<Item = ElementView<'_, I>> + '_> {
        Box::new(self.volumes.iter().map(Element::view))
    }

    fn surface_elements(&self) -> Box<dyn Iterator<Item = ElementView<'_, I>> + '_> {
        Box::new(self.faces.iter().map(Element::view))
    }
}
