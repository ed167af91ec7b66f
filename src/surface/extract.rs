//! Surface rebuild orchestration.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use super::compact::compact_nodes;
use super::dedup::hide_internal_faces;
use super::emit::{count_indices, emit_triangles};
use super::face::{surface_face, volume_faces, FaceRecord};
use super::output::SurfaceMesh;
use super::SurfaceOptions;
use crate::error::Result;
use crate::mesh::{ElementView, MeshIndex, MeshSource};
use crate::progress::{Progress, Stage};

/// Counts from one completed rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    /// Face records synthesized.
    pub faces: usize,
    /// Faces hidden as internal.
    pub hidden_faces: usize,
    /// Vertices in the output.
    pub vertices: usize,
    /// Triangles in the output.
    pub triangles: usize,
}

/// Outcome of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebuild {
    /// Nothing was done; the buffers were left as they were.
    Skipped,
    /// The buffers were replaced.
    Rebuilt(SurfaceStats),
}

impl Rebuild {
    /// Statistics of the rebuild, if one happened.
    pub fn stats(&self) -> Option<&SurfaceStats> {
        match self {
            Rebuild::Skipped => None,
            Rebuild::Rebuilt(stats) => Some(stats),
        }
    }
}

/// Decompose every element into face records, in element order.
fn synthesize_faces<'m, I, M>(
    mesh: &'m M,
    options: &SurfaceOptions,
) -> Result<Vec<FaceRecord<'m, I>>>
where
    I: MeshIndex,
    M: MeshSource<I> + ?Sized,
{
    let volumes: Vec<ElementView<'m, I>> = mesh.volumes().collect();

    let per_element: Vec<Vec<FaceRecord<'m, I>>> = if options.parallel {
        volumes.par_iter().map(|&v| volume_faces(v)).collect::<Result<_>>()?
    } else {
        volumes.iter().map(|&v| volume_faces(v)).collect::<Result<_>>()?
    };

    let total = per_element.iter().map(Vec::len).sum();
    let mut faces = Vec::with_capacity(total);
    faces.extend(per_element.into_iter().flatten());

    if options.surface_elements {
        for element in mesh.surface_elements() {
            faces.push(surface_face(element)?);
        }
    }
    Ok(faces)
}

/// Rebuild `surface` from `mesh`.
///
/// A mesh without nodes, edges and faces leaves `surface` untouched and
/// returns [`Rebuild::Skipped`]. Otherwise the new buffers replace the old
/// ones only once every stage has succeeded; on error `surface` is unchanged.
pub fn rebuild<I, M>(
    mesh: &M,
    options: &SurfaceOptions,
    surface: &mut SurfaceMesh<I>,
) -> Result<Rebuild>
where
    I: MeshIndex,
    M: MeshSource<I> + ?Sized,
{
    rebuild_with_progress(mesh, options, surface, &Progress::none())
}

/// [`rebuild`] with progress reporting.
pub fn rebuild_with_progress<I, M>(
    mesh: &M,
    options: &SurfaceOptions,
    surface: &mut SurfaceMesh<I>,
    progress: &Progress,
) -> Result<Rebuild>
where
    I: MeshIndex,
    M: MeshSource<I> + ?Sized,
{
    if mesh.is_empty() {
        debug!("mesh is empty, keeping previous surface");
        return Ok(Rebuild::Skipped);
    }
    let start = Instant::now();

    progress.stage(Stage::SynthesizeFaces);
    let mut faces = synthesize_faces(mesh, options)?;
    debug!("synthesized {} faces: {:?}", faces.len(), start.elapsed());

    progress.stage(Stage::EliminateInternalFaces);
    let hidden_faces = if options.show_inner {
        0
    } else {
        hide_internal_faces(&mut faces, options.dedup, options.manifold)?
    };
    debug!("hid {} internal faces: {:?}", hidden_faces, start.elapsed());

    progress.stage(Stage::CompactNodes);
    let compacted = compact_nodes(mesh, &faces)?;
    debug!(
        "node map and point vector with {} vertices: {:?}",
        compacted.vertices.len(),
        start.elapsed()
    );

    progress.stage(Stage::CountTriangles);
    let len = count_indices(&faces)?;

    progress.stage(Stage::EmitTriangles);
    let indices = emit_triangles(&faces, &compacted.map, len)?;
    debug!("triangle vector with {} entries: {:?}", indices.len(), start.elapsed());

    let stats = SurfaceStats {
        faces: faces.len(),
        hidden_faces,
        vertices: compacted.vertices.len(),
        triangles: indices.len() / 4,
    };
    *surface = SurfaceMesh {
        vertices: compacted.vertices,
        indices,
        nodes: compacted.nodes,
    };

    progress.finish();
    debug!("surface rebuild finished: {:?}", start.elapsed());
    Ok(Rebuild::Rebuilt(stats))
}

/// Extract the surface of `mesh` into a new [`SurfaceMesh`].
///
/// # Example
/// ```
/// use femsurf::mesh::{structured_block, BlockKind, FemMesh};
/// use femsurf::surface::{extract_surface, SurfaceMesh, SurfaceOptions};
///
/// let mesh: FemMesh = structured_block(BlockKind::Hexahedra, 2, 2, 2).unwrap();
/// let surface: SurfaceMesh = extract_surface(&mesh, &SurfaceOptions::default()).unwrap();
/// assert_eq!(surface.num_vertices(), 26);
/// assert_eq!(surface.num_triangles(), 48);
/// ```
pub fn extract_surface<I, M>(mesh: &M, options: &SurfaceOptions) -> Result<SurfaceMesh<I>>
where
    I: MeshIndex,
    M: MeshSource<I> + ?Sized,
{
    let mut surface = SurfaceMesh::new();
    rebuild(mesh, options, &mut surface)?;
    Ok(surface)
}
