//! A surface bound to a host scene.
//!
//! [`SurfaceView`] keeps the extracted buffers and the display flags of one
//! mesh. The host calls [`SurfaceView::mesh_changed`] whenever the mesh is
//! edited and reads the buffers and [`ShapeHints`] back for rendering.

use log::debug;

use super::extract::{rebuild, Rebuild};
use super::output::SurfaceMesh;
use super::SurfaceOptions;
use crate::error::Result;
use crate::mesh::{MeshIndex, MeshSource};

/// Whether the renderer may treat the surface as a closed solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// Closed solid; back faces can be culled.
    Solid,
    /// Nothing is known; both sides are drawn.
    Unknown,
}

/// Winding of front faces as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexOrdering {
    /// Front faces are clockwise.
    Clockwise,
    /// Front faces are counter-clockwise.
    CounterClockwise,
}

/// Rendering hints for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeHints {
    /// Solid or unknown shape.
    pub shape_type: ShapeType,
    /// Front-face winding.
    pub vertex_ordering: VertexOrdering,
}

/// The rendered surface of one mesh.
#[derive(Debug, Clone)]
pub struct SurfaceView<I: MeshIndex = u32> {
    options: SurfaceOptions,
    backface_culling: bool,
    surface: SurfaceMesh<I>,
}

impl<I: MeshIndex> Default for SurfaceView<I> {
    fn default() -> Self {
        Self::new(SurfaceOptions::default())
    }
}

impl<I: MeshIndex> SurfaceView<I> {
    /// Create a view with empty buffers. Back-face culling starts enabled.
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            options,
            backface_culling: true,
            surface: SurfaceMesh::new(),
        }
    }

    /// Current buffers.
    #[inline]
    pub fn surface(&self) -> &SurfaceMesh<I> {
        &self.surface
    }

    /// Current options.
    #[inline]
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// Whether inner faces are shown.
    #[inline]
    pub fn show_inner(&self) -> bool {
        self.options.show_inner
    }

    /// Rebuild after the mesh changed.
    pub fn mesh_changed<M>(&mut self, mesh: &M) -> Result<Rebuild>
    where
        M: MeshSource<I> + ?Sized,
    {
        rebuild(mesh, &self.options, &mut self.surface)
    }

    /// Toggle inner faces, rebuilding only if the flag changes.
    ///
    /// The flag keeps its new value even if the rebuild fails.
    pub fn set_show_inner<M>(&mut self, mesh: &M, show_inner: bool) -> Result<Rebuild>
    where
        M: MeshSource<I> + ?Sized,
    {
        if self.options.show_inner == show_inner {
            return Ok(Rebuild::Skipped);
        }
        debug!("show inner faces: {}", show_inner);
        self.options.show_inner = show_inner;
        self.mesh_changed(mesh)
    }

    /// Toggle back-face culling. Does not touch the buffers.
    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    /// Rendering hints for the current culling mode.
    pub fn shape_hints(&self) -> ShapeHints {
        let shape_type = if self.backface_culling {
            ShapeType::Solid
        } else {
            ShapeType::Unknown
        };
        ShapeHints {
            shape_type,
            vertex_ordering: VertexOrdering::Clockwise,
        }
    }
}
