//! Index types for mesh entities.
//!
//! Nodes and elements are identified by explicit, type-safe handles assigned by
//! the mesh source. Node identity is the handle, never the coordinates: two
//! nodes at the same position are still distinct nodes. The handles are
//! generic over the underlying integer type so small meshes can use `u16` and
//! very large ones `u64`.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Unsigned integer usable as the storage of a node or element handle.
///
/// The all-ones value is reserved as the invalid sentinel, so it compares
/// above every real handle.
pub trait MeshIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Largest value a real handle may hold.
    const MAX: Self;

    /// Reserved sentinel for "no entity".
    const INVALID: Self;

    /// Narrow a `usize`. Overflow is a debug-build panic.
    fn from_usize(v: usize) -> Self;

    /// Widen to `usize`.
    fn to_usize(self) -> usize;

    /// Whether the value is a real handle.
    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {$(
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX - 1;
            const INVALID: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v <= <$ty as MeshIndex>::MAX as usize,
                    "handle {} does not fit in {}",
                    v,
                    stringify!($ty)
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_mesh_index!(u16, u32, u64);

/// Handle of a mesh node.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId<I: MeshIndex = u32>(I);

/// Handle of a volume, face or edge element.
///
/// Element ids are stable but not necessarily dense.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ElementId<I: MeshIndex = u32>(I);

macro_rules! impl_handle {
    ($name:ident, $tag:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Wrap a raw id.
            #[inline]
            pub fn new(id: usize) -> Self {
                Self(I::from_usize(id))
            }

            /// The sentinel handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// The id as `usize`.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// The id in its storage type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Whether this is not the sentinel.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.is_valid() {
                    true => write!(f, concat!($tag, "({})"), self.index()),
                    false => f.write_str(concat!($tag, "(-)")),
                }
            }
        }

        impl<I: MeshIndex> Display for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Debug::fmt(self, f)
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(id: usize) -> Self {
                Self::new(id)
            }
        }
    };
}

impl_handle!(NodeId, "N");
impl_handle!(ElementId, "E");
