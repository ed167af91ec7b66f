//! Mesh construction utilities.
//!
//! This module provides an incremental [`FemMeshBuilder`], functions for
//! building meshes from position and connectivity arrays, and a generator for
//! structured blocks of hexahedra or tetrahedra.

use std::collections::{HashMap, HashSet};

use nalgebra::Point3;

use super::fem::{Element, FemMesh};
use super::index::{ElementId, MeshIndex, NodeId};
use crate::error::{Result, SurfaceError};

/// Incremental builder for [`FemMesh`].
///
/// Element ids share a single id space across volumes, faces and edges and are
/// assigned from 1 upwards unless given explicitly.
///
/// # Example
/// ```
/// use femsurf::mesh::{FemMesh, FemMeshBuilder};
/// use nalgebra::Point3;
///
/// let mut builder: FemMeshBuilder = FemMeshBuilder::new();
/// let n0 = builder.add_node(Point3::new(0.0, 0.0, 0.0)).unwrap();
/// let n1 = builder.add_node(Point3::new(0.0, 1.0, 0.0)).unwrap();
/// let n2 = builder.add_node(Point3::new(1.0, 0.0, 0.0)).unwrap();
/// let n3 = builder.add_node(Point3::new(0.0, 0.0, 1.0)).unwrap();
/// builder.add_volume(&[n0, n1, n2, n3]).unwrap();
///
/// let mesh: FemMesh = builder.build();
/// assert_eq!(mesh.num_volumes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FemMeshBuilder<I: MeshIndex = u32> {
    mesh: FemMesh<I>,
    used_ids: HashSet<usize>,
    next_id: usize,
}

impl<I: MeshIndex> Default for FemMeshBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> FemMeshBuilder<I> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            mesh: FemMesh::new(),
            used_ids: HashSet::new(),
            next_id: 1,
        }
    }

    /// Create a builder with preallocated storage.
    pub fn with_capacity(nodes: usize, volumes: usize) -> Self {
        let mut builder = Self::new();
        builder.mesh.positions.reserve(nodes);
        builder.mesh.volumes.reserve(volumes);
        builder.used_ids.reserve(volumes);
        builder
    }

    /// Number of nodes added so far.
    pub fn num_nodes(&self) -> usize {
        self.mesh.positions.len()
    }

    /// Add a node and return its handle.
    ///
    /// Fails once the index type has no handle left for the new node.
    pub fn add_node(&mut self, position: Point3<f64>) -> Result<NodeId<I>> {
        let index = self.mesh.positions.len();
        if index > I::MAX.to_usize() {
            return Err(SurfaceError::invalid_param(
                "nodes",
                index + 1,
                "exceeds the node index range",
            ));
        }
        self.mesh.positions.push(position);
        Ok(NodeId::new(index))
    }

    /// Add a volume element with the next free id.
    pub fn add_volume(&mut self, nodes: &[NodeId<I>]) -> Result<ElementId<I>> {
        let element = self.make_element(None, nodes)?;
        let id = element.id;
        self.mesh.volumes.push(element);
        Ok(id)
    }

    /// Add a volume element with an explicit id.
    pub fn add_volume_with_id(&mut self, id: usize, nodes: &[NodeId<I>]) -> Result<ElementId<I>> {
        let element = self.make_element(Some(id), nodes)?;
        self.mesh.volumes.push(element);
        Ok(ElementId::new(id))
    }

    /// Add a native 2-D face element with the next free id.
    pub fn add_face(&mut self, nodes: &[NodeId<I>]) -> Result<ElementId<I>> {
        let element = self.make_element(None, nodes)?;
        let id = element.id;
        self.mesh.faces.push(element);
        Ok(id)
    }

    /// Add a 1-D edge element with the next free id.
    pub fn add_edge(&mut self, nodes: &[NodeId<I>]) -> Result<ElementId<I>> {
        let element = self.make_element(None, nodes)?;
        let id = element.id;
        self.mesh.edges.push(element);
        Ok(id)
    }

    /// Finish building.
    pub fn build(self) -> FemMesh<I> {
        self.mesh
    }

    fn make_element(&mut self, id: Option<usize>, nodes: &[NodeId<I>]) -> Result<Element<I>> {
        let id = match id {
            Some(id) => {
                if self.used_ids.contains(&id) {
                    return Err(SurfaceError::DuplicateElementId { id });
                }
                id
            }
            None => {
                while self.used_ids.contains(&self.next_id) {
                    self.next_id += 1;
                }
                self.next_id
            }
        };
        if id > I::MAX.to_usize() {
            return Err(SurfaceError::invalid_param(
                "element id",
                id,
                "exceeds the element index range",
            ));
        }

        for &node in nodes {
            if !node.is_valid() || node.index() >= self.mesh.positions.len() {
                return Err(SurfaceError::InvalidNodeIndex {
                    element: id,
                    node: node.index(),
                });
            }
        }
        for (i, a) in nodes.iter().enumerate() {
            if nodes[i + 1..].contains(a) {
                return Err(SurfaceError::DegenerateElement { element: id });
            }
        }

        self.used_ids.insert(id);
        if id == self.next_id {
            self.next_id += 1;
        }
        Ok(Element {
            id: ElementId::new(id),
            nodes: nodes.to_vec(),
        })
    }
}

fn build_from_volumes<I: MeshIndex, const N: usize>(
    vertices: &[Point3<f64>],
    cells: &[[usize; N]],
) -> Result<FemMesh<I>> {
    let mut builder = FemMeshBuilder::with_capacity(vertices.len(), cells.len());
    let node_ids = vertices
        .iter()
        .map(|&p| builder.add_node(p))
        .collect::<Result<Vec<NodeId<I>>>>()?;

    let mut nodes = Vec::with_capacity(N);
    for (ci, cell) in cells.iter().enumerate() {
        nodes.clear();
        for &vi in cell {
            let node = node_ids
                .get(vi)
                .copied()
                .ok_or(SurfaceError::InvalidNodeIndex {
                    element: ci + 1,
                    node: vi,
                })?;
            nodes.push(node);
        }
        builder.add_volume(&nodes)?;
    }
    Ok(builder.build())
}

/// Build a mesh of linear tetrahedra.
///
/// Each cell lists four node indices; element ids are assigned from 1. The
/// right-hand normal of face 0-1-2 points away from node 3.
///
/// # Example
/// ```
/// use femsurf::mesh::{build_from_tetrahedra, FemMesh};
/// use nalgebra::Point3;
///
/// // Node 3 lies below the plane of 0-1-2 as seen from its right-hand normal.
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let mesh: FemMesh = build_from_tetrahedra(&vertices, &[[0, 1, 2, 3]]).unwrap();
/// assert_eq!(mesh.num_nodes(), 4);
/// ```
pub fn build_from_tetrahedra<I: MeshIndex>(
    vertices: &[Point3<f64>],
    cells: &[[usize; 4]],
) -> Result<FemMesh<I>> {
    build_from_volumes(vertices, cells)
}

/// Build a mesh of linear hexahedra.
///
/// Nodes 0..4 are the bottom quad and 4..8 the top quad above them. The
/// bottom quad's right-hand normal points away from the top quad.
pub fn build_from_hexahedra<I: MeshIndex>(
    vertices: &[Point3<f64>],
    cells: &[[usize; 8]],
) -> Result<FemMesh<I>> {
    build_from_volumes(vertices, cells)
}

/// Build a mesh of quadratic tetrahedra.
///
/// Nodes 0..4 are corners, oriented as for [`build_from_tetrahedra`],
/// followed by the mid-edge nodes of edges (0,1), (1,2), (2,0), (0,3), (1,3),
/// (2,3).
pub fn build_from_quadratic_tetrahedra<I: MeshIndex>(
    vertices: &[Point3<f64>],
    cells: &[[usize; 10]],
) -> Result<FemMesh<I>> {
    build_from_volumes(vertices, cells)
}

/// Element type generated by [`structured_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// One 8-node hexahedron per cell.
    Hexahedra,
    /// Six 4-node tetrahedra per cell.
    Tetrahedra,
    /// Six 10-node tetrahedra per cell, mid-edge nodes shared between cells.
    QuadraticTetrahedra,
}

/// Corner offsets of a unit cell in hexahedron node order.
///
/// The bottom quad runs clockwise seen from above.
const CELL_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [1, 0, 0],
    [0, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
    [1, 0, 1],
];

/// Axis orders for the Freudenthal split of a cell into six tetrahedra.
const AXIS_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Local corner pairs of the tetrahedron edges, in mid-edge node order.
const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

/// Generate a conforming block of `nx * ny * nz` unit cells.
///
/// Grid nodes sit at integer coordinates. Elements follow the node order of
/// [`build_from_hexahedra`] and [`build_from_tetrahedra`]: tetrahedra are
/// ordered so that the fourth node lies on the negative side of the first
/// three.
///
/// Fails with [`SurfaceError::InvalidParameter`] if the block needs more
/// node handles than `I` provides.
///
/// # Example
/// ```
/// use femsurf::mesh::{structured_block, BlockKind, FemMesh};
///
/// let mesh: FemMesh = structured_block(BlockKind::Hexahedra, 2, 2, 2).unwrap();
/// assert_eq!(mesh.num_nodes(), 27);
/// assert_eq!(mesh.num_volumes(), 8);
/// ```
pub fn structured_block<I: MeshIndex>(
    kind: BlockKind,
    nx: usize,
    ny: usize,
    nz: usize,
) -> Result<FemMesh<I>> {
    for (name, value) in [("nx", nx), ("ny", ny), ("nz", nz)] {
        if value == 0 {
            return Err(SurfaceError::invalid_param(name, value, "must be positive"));
        }
    }

    let grid_nodes = (nx + 1) * (ny + 1) * (nz + 1);
    let cells = nx * ny * nz;
    let volumes = match kind {
        BlockKind::Hexahedra => cells,
        BlockKind::Tetrahedra | BlockKind::QuadraticTetrahedra => cells * 6,
    };
    let mut builder = FemMeshBuilder::<I>::with_capacity(grid_nodes, volumes);

    let grid_index = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                builder.add_node(Point3::new(i as f64, j as f64, k as f64))?;
            }
        }
    }

    let mut midpoints: HashMap<(usize, usize), NodeId<I>> = HashMap::new();
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let corner = |c: [usize; 3]| grid_index(i + c[0], j + c[1], k + c[2]);

                if kind == BlockKind::Hexahedra {
                    let nodes: Vec<NodeId<I>> =
                        CELL_CORNERS.iter().map(|&c| NodeId::new(corner(c))).collect();
                    builder.add_volume(&nodes)?;
                    continue;
                }

                for axes in &AXIS_PERMUTATIONS {
                    let mut offset = [0usize; 3];
                    let mut tet = [0usize; 4];
                    tet[0] = corner(offset);
                    for (step, &axis) in axes.iter().enumerate() {
                        offset[axis] = 1;
                        tet[step + 1] = corner(offset);
                    }
                    orient_tetrahedron(&builder.mesh.positions, &mut tet);

                    let mut nodes: Vec<NodeId<I>> = tet.iter().map(|&n| NodeId::new(n)).collect();
                    if kind == BlockKind::QuadraticTetrahedra {
                        for [a, b] in TET_EDGES {
                            let key = (tet[a].min(tet[b]), tet[a].max(tet[b]));
                            let mid = match midpoints.get(&key) {
                                Some(&mid) => mid,
                                None => {
                                    let pa = builder.mesh.positions[key.0];
                                    let pb = builder.mesh.positions[key.1];
                                    let mid = builder.add_node(nalgebra::center(&pa, &pb))?;
                                    midpoints.insert(key, mid);
                                    mid
                                }
                            };
                            nodes.push(mid);
                        }
                    }
                    builder.add_volume(&nodes)?;
                }
            }
        }
    }

    Ok(builder.build())
}

/// Swap the second and third nodes if the fourth lies above the first three.
fn orient_tetrahedron(positions: &[Point3<f64>], tet: &mut [usize; 4]) {
    let [a, b, c, d] = tet.map(|n| positions[n]);
    let signed = (b - a).cross(&(c - a)).dot(&(d - a));
    if signed > 0.0 {
        tet.swap(1, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{ElementView, MeshSource};

    fn unit_tetrahedron() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    /// Six times the volume; positive when node 3 is behind face 0-1-2.
    fn oriented_volume(mesh: &FemMesh, element: ElementView<'_>) -> f64 {
        let p = |i: usize| *mesh.position(element.node(i));
        (p(1) - p(0)).cross(&(p(2) - p(0))).dot(&(p(0) - p(3)))
    }

    #[test]
    fn test_single_tetrahedron() {
        let mesh: FemMesh = build_from_tetrahedra(&unit_tetrahedron(), &[[0, 1, 2, 3]]).unwrap();

        assert_eq!(mesh.num_nodes(), 4);
        assert_eq!(mesh.num_volumes(), 1);
        let element = mesh.volumes().next().unwrap();
        assert_eq!(element.id, ElementId::new(1));
        assert_eq!(element.node_count(), 4);
    }

    #[test]
    fn test_invalid_node_index() {
        let result: Result<FemMesh> = build_from_tetrahedra(&unit_tetrahedron(), &[[0, 1, 2, 9]]);
        assert_eq!(
            result.unwrap_err(),
            SurfaceError::InvalidNodeIndex { element: 1, node: 9 }
        );
    }

    #[test]
    fn test_degenerate_element() {
        let result: Result<FemMesh> = build_from_tetrahedra(&unit_tetrahedron(), &[[0, 1, 1, 3]]);
        assert_eq!(result.unwrap_err(), SurfaceError::DegenerateElement { element: 1 });
    }

    #[test]
    fn test_explicit_ids() {
        let mut builder: FemMeshBuilder = FemMeshBuilder::new();
        let nodes: Vec<NodeId> = unit_tetrahedron()
            .into_iter()
            .map(|p| builder.add_node(p).unwrap())
            .collect();

        builder.add_volume_with_id(1, &nodes).unwrap();
        assert_eq!(
            builder.add_volume_with_id(1, &nodes),
            Err(SurfaceError::DuplicateElementId { id: 1 })
        );

        // Automatic ids skip the ones already taken.
        let id = builder.add_face(&nodes[..3]).unwrap();
        assert_eq!(id, ElementId::new(2));
        let id = builder.add_edge(&nodes[..2]).unwrap();
        assert_eq!(id, ElementId::new(3));

        let mesh = builder.build();
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 1);
    }

    #[test]
    fn test_hex_block() {
        let mesh: FemMesh = structured_block(BlockKind::Hexahedra, 3, 2, 1).unwrap();
        assert_eq!(mesh.num_nodes(), 4 * 3 * 2);
        assert_eq!(mesh.num_volumes(), 6);
        assert!(mesh.volumes().all(|v| v.node_count() == 8));

        // The bottom quad faces away from the top quad.
        for element in mesh.volumes() {
            let p = |i: usize| *mesh.position(element.node(i));
            let normal = (p(1) - p(0)).cross(&(p(3) - p(0)));
            assert!(normal.dot(&(p(4) - p(0))) < 0.0, "{:?} is inverted", element.id);
        }
    }

    #[test]
    fn test_tet_block_orientation() {
        let mesh: FemMesh = structured_block(BlockKind::Tetrahedra, 2, 2, 2).unwrap();
        assert_eq!(mesh.num_nodes(), 27);
        assert_eq!(mesh.num_volumes(), 48);

        let mut total = 0.0;
        for element in mesh.volumes() {
            let volume = oriented_volume(&mesh, element);
            assert!(volume > 0.0, "{:?} is inverted", element.id);
            total += volume / 6.0;
        }
        assert!((total - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_quadratic_block_shares_midpoints() {
        let mesh: FemMesh = structured_block(BlockKind::QuadraticTetrahedra, 1, 1, 1).unwrap();
        assert_eq!(mesh.num_volumes(), 6);
        // 12 cube edges, 6 face diagonals and 1 body diagonal
        assert_eq!(mesh.num_nodes(), 8 + 19);

        for element in mesh.volumes() {
            assert_eq!(element.node_count(), 10);
            assert!(oriented_volume(&mesh, element) > 0.0);
            for (m, [a, b]) in TET_EDGES.iter().enumerate() {
                let expected =
                    nalgebra::center(mesh.position(element.node(*a)), mesh.position(element.node(*b)));
                assert_eq!(*mesh.position(element.node(4 + m)), expected);
            }
        }
    }

    #[test]
    fn test_block_rejects_zero_cells() {
        let result: Result<FemMesh> = structured_block(BlockKind::Hexahedra, 2, 0, 2);
        assert!(matches!(
            result,
            Err(SurfaceError::InvalidParameter { name: "ny", .. })
        ));
    }

    #[test]
    fn test_node_range_of_narrow_index() {
        let mut builder: FemMeshBuilder<u16> = FemMeshBuilder::new();
        for _ in 0..=u16::MAX as usize - 1 {
            builder.add_node(Point3::origin()).unwrap();
        }
        // The last handle below the sentinel is still available.
        assert_eq!(builder.num_nodes(), u16::MAX as usize);
        assert!(matches!(
            builder.add_node(Point3::origin()),
            Err(SurfaceError::InvalidParameter { name: "nodes", .. })
        ));
        assert_eq!(builder.num_nodes(), u16::MAX as usize);
    }

    #[test]
    fn test_block_too_large_for_index() {
        // 41^3 grid nodes do not fit below the u16 sentinel.
        let result: Result<FemMesh<u16>> = structured_block(BlockKind::Hexahedra, 40, 40, 40);
        assert!(matches!(
            result,
            Err(SurfaceError::InvalidParameter { name: "nodes", .. })
        ));

        let fits: FemMesh<u16> = structured_block(BlockKind::Hexahedra, 39, 39, 39).unwrap();
        assert_eq!(fits.num_nodes(), 40 * 40 * 40);
    }

    #[test]
    fn test_element_id_range_of_narrow_index() {
        let mut builder: FemMeshBuilder<u16> = FemMeshBuilder::new();
        let nodes = unit_tetrahedron()
            .into_iter()
            .map(|p| builder.add_node(p))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert!(matches!(
            builder.add_volume_with_id(70_000, &nodes),
            Err(SurfaceError::InvalidParameter { name: "element id", .. })
        ));
        assert_eq!(builder.add_volume(&nodes).unwrap(), ElementId::new(1));
    }
}
