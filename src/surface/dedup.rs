//! Internal-face detection.
//!
//! A face shared by two volume elements lies inside the solid and is hidden on
//! both sides. For each visible face the later faces are scanned in order and
//! the first one with the same sorted node set on a different element is its
//! partner; both are hidden and the scan for that face stops. Later faces are
//! compared even when already hidden.
//!
//! Two strategies implement that scan with identical results:
//! [`DedupStrategy::Pairwise`] compares all pairs, [`DedupStrategy::Bucketed`]
//! first groups faces by signature and only scans within a group.
//!
//! Native 2-D faces never take part.
//!
//! # Non-manifold input
//!
//! With three or more elements on one face the scan pairs the first two and
//! leaves the rest visible. [`ManifoldPolicy::Reject`] turns that case into an
//! error instead.

use std::collections::HashMap;

use log::{trace, warn};

use super::element::MAX_FACE_NODES;
use super::face::FaceRecord;
use crate::error::{Result, SurfaceError};
use crate::mesh::{MeshIndex, NodeId};

/// How duplicate faces are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupStrategy {
    /// Compare every face against every later face: O(F²).
    Pairwise,
    /// Group faces by sorted node signature and compare within groups.
    #[default]
    Bucketed,
}

/// What to do when more than two elements share one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifoldPolicy {
    /// Pair the first two, leave the others visible, log a warning.
    #[default]
    Assume,
    /// Fail with [`SurfaceError::NonManifoldFace`].
    Reject,
}

type Signature<I> = (usize, [NodeId<I>; MAX_FACE_NODES]);

/// Group volume faces by signature, buckets in order of first appearance.
fn signature_buckets<I: MeshIndex>(faces: &[FaceRecord<'_, I>]) -> Vec<Vec<usize>> {
    let mut lookup: HashMap<Signature<I>, usize> = HashMap::with_capacity(faces.len());
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for (i, face) in faces.iter().enumerate() {
        if !face.kind().is_volume() {
            continue;
        }
        let key = (face.size(), *face.slots());
        let bucket = *lookup.entry(key).or_insert_with(|| {
            buckets.push(Vec::with_capacity(2));
            buckets.len() - 1
        });
        buckets[bucket].push(i);
    }
    buckets
}

fn check_manifold<I: MeshIndex>(
    faces: &[FaceRecord<'_, I>],
    buckets: &[Vec<usize>],
    policy: ManifoldPolicy,
) -> Result<()> {
    for bucket in buckets.iter().filter(|b| b.len() > 2) {
        let mut elements: Vec<usize> = bucket
            .iter()
            .map(|&i| faces[i].element_id().index())
            .collect();
        elements.sort_unstable();
        elements.dedup();
        if elements.len() <= 2 {
            continue;
        }
        match policy {
            ManifoldPolicy::Reject => return Err(SurfaceError::NonManifoldFace { elements }),
            ManifoldPolicy::Assume => {
                warn!("face {:?} is shared by elements {:?}", faces[bucket[0]].nodes(), elements)
            }
        }
    }
    Ok(())
}

/// Scan `order` forward, hiding each visible face together with its first match.
fn hide_in_order<I: MeshIndex>(faces: &mut [FaceRecord<'_, I>], order: &[usize]) {
    for (pos, &l) in order.iter().enumerate() {
        if faces[l].hidden {
            continue;
        }
        for &i in &order[pos + 1..] {
            if faces[l].is_same_face(&faces[i]) {
                faces[l].hidden = true;
                faces[i].hidden = true;
                break;
            }
        }
    }
}

/// Hide every face shared by two different volume elements.
///
/// Returns the number of hidden faces.
pub fn hide_internal_faces<I: MeshIndex>(
    faces: &mut [FaceRecord<'_, I>],
    strategy: DedupStrategy,
    policy: ManifoldPolicy,
) -> Result<usize> {
    let buckets = signature_buckets(faces);
    check_manifold(faces, &buckets, policy)?;

    match strategy {
        DedupStrategy::Pairwise => {
            let order: Vec<usize> = (0..faces.len())
                .filter(|&i| faces[i].kind().is_volume())
                .collect();
            hide_in_order(faces, &order);
        }
        DedupStrategy::Bucketed => {
            trace!("{} signature buckets for {} faces", buckets.len(), faces.len());
            for bucket in buckets.iter().filter(|b| b.len() > 1) {
                hide_in_order(faces, bucket);
            }
        }
    }

    Ok(faces.iter().filter(|f| f.hidden).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{structured_block, BlockKind, ElementId, ElementView, FemMesh, MeshSource};
    use crate::surface::face::{surface_face, volume_faces};

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().map(|&n| NodeId::new(n)).collect()
    }

    fn faces_of<'a>(elements: &'a [(usize, Vec<NodeId>)]) -> Vec<FaceRecord<'a>> {
        elements
            .iter()
            .flat_map(|(id, nodes)| {
                volume_faces(ElementView {
                    id: ElementId::new(*id),
                    nodes,
                })
                .unwrap()
            })
            .collect()
    }

    fn hidden_flags(faces: &[FaceRecord<'_>]) -> Vec<bool> {
        faces.iter().map(|f| f.hidden).collect()
    }

    #[test]
    fn test_two_tets_share_one_face() {
        let elements = vec![(1, ids(&[0, 1, 2, 3])), (2, ids(&[1, 0, 2, 4]))];
        let mut faces = faces_of(&elements);

        let hidden =
            hide_internal_faces(&mut faces, DedupStrategy::Pairwise, ManifoldPolicy::Assume)
                .unwrap();
        assert_eq!(hidden, 2);
        // Face 1 of each tet is the shared {0, 1, 2}.
        assert!(faces[0].hidden);
        assert!(faces[4].hidden);
        assert_eq!(faces.iter().filter(|f| !f.hidden).count(), 6);
    }

    #[test]
    fn test_single_element_hides_nothing() {
        let elements = vec![(1, ids(&[0, 1, 2, 3, 4, 5, 6, 7]))];
        let mut faces = faces_of(&elements);
        let hidden = hide_internal_faces(&mut faces, DedupStrategy::default(), ManifoldPolicy::Assume)
            .unwrap();
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_same_element_twice_is_not_folded() {
        // Two records of one element id never hide each other, even with equal nodes.
        let elements = vec![(1, ids(&[0, 1, 2, 3])), (1, ids(&[0, 1, 2, 3]))];
        let mut faces = faces_of(&elements);
        let hidden =
            hide_internal_faces(&mut faces, DedupStrategy::Bucketed, ManifoldPolicy::Reject)
                .unwrap();
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_non_manifold_assume_keeps_third() {
        // Three tets on the face {0, 1, 2}.
        let elements = vec![
            (1, ids(&[0, 1, 2, 3])),
            (2, ids(&[1, 0, 2, 4])),
            (3, ids(&[0, 1, 2, 5])),
        ];
        for strategy in [DedupStrategy::Pairwise, DedupStrategy::Bucketed] {
            let mut faces = faces_of(&elements);
            let hidden = hide_internal_faces(&mut faces, strategy, ManifoldPolicy::Assume).unwrap();
            assert_eq!(hidden, 2);
            assert!(faces[0].hidden && faces[4].hidden);
            assert!(!faces[8].hidden);
        }
    }

    #[test]
    fn test_non_manifold_reject() {
        let elements = vec![
            (1, ids(&[0, 1, 2, 3])),
            (2, ids(&[1, 0, 2, 4])),
            (3, ids(&[0, 1, 2, 5])),
        ];
        let mut faces = faces_of(&elements);
        let err = hide_internal_faces(&mut faces, DedupStrategy::Bucketed, ManifoldPolicy::Reject)
            .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::NonManifoldFace {
                elements: vec![1, 2, 3]
            }
        );
        // Nothing was touched.
        assert!(faces.iter().all(|f| !f.hidden));
    }

    #[test]
    fn test_hidden_face_can_still_be_matched() {
        // Element 1 is listed twice, so it carries the face {0, 1, 2} twice;
        // element 2 carries it once. The first copy pairs with element 2, then
        // the second copy pairs with the already hidden face of element 2.
        let elements = vec![
            (1, ids(&[0, 1, 2, 3])),
            (1, ids(&[0, 1, 2, 5])),
            (2, ids(&[1, 0, 2, 4])),
        ];
        for strategy in [DedupStrategy::Pairwise, DedupStrategy::Bucketed] {
            let mut faces = faces_of(&elements);
            hide_internal_faces(&mut faces, strategy, ManifoldPolicy::Reject).unwrap();
            assert!(faces[0].hidden && faces[4].hidden && faces[8].hidden);
        }
    }

    #[test]
    fn test_strategies_agree_on_blocks() {
        for kind in [
            BlockKind::Hexahedra,
            BlockKind::Tetrahedra,
            BlockKind::QuadraticTetrahedra,
        ] {
            let mesh: FemMesh = structured_block(kind, 3, 2, 2).unwrap();
            let build = || {
                mesh.volumes()
                    .flat_map(|v| volume_faces(v).unwrap())
                    .collect::<Vec<FaceRecord>>()
            };

            let mut pairwise = build();
            let mut bucketed = build();
            let a = hide_internal_faces(&mut pairwise, DedupStrategy::Pairwise, ManifoldPolicy::Reject)
                .unwrap();
            let b = hide_internal_faces(&mut bucketed, DedupStrategy::Bucketed, ManifoldPolicy::Reject)
                .unwrap();

            assert_eq!(a, b);
            assert_eq!(hidden_flags(&pairwise), hidden_flags(&bucketed));
        }
    }

    #[test]
    fn test_dedup_symmetry_on_block() {
        // Every hidden face has exactly one hidden partner from another element.
        let mesh: FemMesh = structured_block(BlockKind::Tetrahedra, 2, 2, 2).unwrap();
        let mut faces: Vec<FaceRecord<'_>> = mesh
            .volumes()
            .flat_map(|v| volume_faces(v).unwrap())
            .collect();
        hide_internal_faces(&mut faces, DedupStrategy::Bucketed, ManifoldPolicy::Reject).unwrap();

        for (i, face) in faces.iter().enumerate().filter(|(_, f)| f.hidden) {
            let partners = faces
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other.hidden && face.is_same_face(other))
                .count();
            assert_eq!(partners, 1);
        }
        // 2 * 2 * 2 cells, 6 tets each, 4 faces each; 48 boundary triangles remain.
        assert_eq!(faces.len(), 192);
        assert_eq!(faces.iter().filter(|f| !f.hidden).count(), 48);
    }

    #[test]
    fn test_surface_faces_are_ignored() {
        let tet = ids(&[0, 1, 2, 3]);
        let tri = ids(&[2, 1, 0]);
        let mut faces = volume_faces(ElementView {
            id: ElementId::new(1),
            nodes: &tet,
        })
        .unwrap();
        faces.push(
            surface_face(ElementView {
                id: ElementId::new(2),
                nodes: &tri,
            })
            .unwrap(),
        );

        let hidden =
            hide_internal_faces(&mut faces, DedupStrategy::Pairwise, ManifoldPolicy::Assume)
                .unwrap();
        assert_eq!(hidden, 0);
    }
}
