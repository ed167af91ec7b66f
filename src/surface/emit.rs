//! Triangle index emission.
//!
//! Every visible face is written as one or more triangles. Each triangle is
//! three vertex slots followed by [`END_FACE_INDEX`], the terminator an
//! indexed face set expects between polygons. Triangle corners come from the
//! element-local winding tables, not from the sorted face nodes.

use super::compact::NodeIndexMap;
use super::element::triangles_per_face;
use super::face::FaceRecord;
use crate::error::{Result, SurfaceError};
use crate::mesh::MeshIndex;

/// Index value terminating each emitted triangle.
pub const END_FACE_INDEX: i32 = -1;

/// Number of index-buffer entries the visible faces need.
///
/// Four per triangle: three slots and the terminator.
pub fn count_indices<I: MeshIndex>(faces: &[FaceRecord<'_, I>]) -> Result<usize> {
    let mut triangles = 0;
    for face in faces.iter().filter(|f| !f.hidden) {
        triangles += triangles_per_face(face.size()).ok_or(SurfaceError::UnsupportedFaceSize {
            element: face.element_id().index(),
            size: face.size(),
        })?;
    }
    Ok(4 * triangles)
}

/// Write the triangle index stream for the visible faces.
///
/// `len` is the size from [`count_indices`]; the stream is allocated once and
/// filled to exactly that length.
pub fn emit_triangles<I: MeshIndex>(
    faces: &[FaceRecord<'_, I>],
    map: &NodeIndexMap<I>,
    len: usize,
) -> Result<Vec<i32>> {
    let mut indices = Vec::with_capacity(len);
    for face in faces.iter().filter(|f| !f.hidden) {
        let element = face.element();
        for triangle in face.triangles()? {
            for &local in triangle {
                let node = element.node(local);
                let slot = map.get(node).ok_or(SurfaceError::MissingNode {
                    element: element.id.index(),
                    node: node.index(),
                })?;
                indices.push(slot);
            }
            indices.push(END_FACE_INDEX);
        }
    }
    debug_assert_eq!(indices.len(), len, "index count disagrees with the counting pass");
    Ok(indices)
}
