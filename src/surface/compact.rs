//! Node compaction.
//!
//! Collects the distinct nodes of all visible faces, assigns each a dense slot
//! in ascending node-id order and writes the single-precision vertex buffer.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use nalgebra::Point3;

use super::face::FaceRecord;
use crate::error::{Result, SurfaceError};
use crate::mesh::{MeshIndex, MeshSource, NodeId};

/// Mapping from node handle to its slot in the vertex buffer.
#[derive(Debug, Clone, Default)]
pub struct NodeIndexMap<I: MeshIndex = u32> {
    slots: BTreeMap<NodeId<I>, i32>,
}

impl<I: MeshIndex> NodeIndexMap<I> {
    /// Slot of `node`, if it is part of the surface.
    #[inline]
    pub fn get(&self, node: NodeId<I>) -> Option<i32> {
        self.slots.get(&node).copied()
    }

    /// Number of distinct nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no node is mapped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId<I>> + '_ {
        self.slots.keys().copied()
    }
}

/// Compacted vertex data for a set of faces.
#[derive(Debug, Clone)]
pub struct CompactedNodes<I: MeshIndex = u32> {
    /// Node handle to slot.
    pub map: NodeIndexMap<I>,
    /// Vertex positions by slot.
    pub vertices: Vec<Point3<f32>>,
    /// Node handle by slot.
    pub nodes: Vec<NodeId<I>>,
}

/// Build the node index map and vertex buffer from the visible faces.
pub fn compact_nodes<I, M>(mesh: &M, faces: &[FaceRecord<'_, I>]) -> Result<CompactedNodes<I>>
where
    I: MeshIndex,
    M: MeshSource<I> + ?Sized,
{
    let mut positions: BTreeMap<NodeId<I>, Point3<f64>> = BTreeMap::new();
    for face in faces.iter().filter(|f| !f.hidden) {
        for &node in face.slots().iter().take_while(|n| n.is_valid()) {
            if let Entry::Vacant(entry) = positions.entry(node) {
                let p = mesh.node_position(node).ok_or(SurfaceError::MissingNode {
                    element: face.element_id().index(),
                    node: node.index(),
                })?;
                entry.insert(p);
            }
        }
    }

    if positions.len() > i32::MAX as usize {
        return Err(SurfaceError::IndexOverflow {
            count: positions.len(),
        });
    }

    let mut slots = BTreeMap::new();
    let mut vertices = Vec::with_capacity(positions.len());
    let mut nodes = Vec::with_capacity(positions.len());
    for (slot, (node, p)) in positions.into_iter().enumerate() {
        slots.insert(node, slot as i32);
        vertices.push(Point3::new(p.x as f32, p.y as f32, p.z as f32));
        nodes.push(node);
    }

    Ok(CompactedNodes {
        map: NodeIndexMap { slots },
        vertices,
        nodes,
    })
}
