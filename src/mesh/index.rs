//! Index types for mesh elements.
//!
//! Every element of the connectivity store is addressed by a typed handle
//! into a flat arena. Handles are generic over the storage integer so small
//! meshes can use `u16` and very large ones `u64`.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as handle storage.
pub trait MeshIndex:
    Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static
{
    /// Sentinel value for an absent reference.
    const INVALID: Self;

    /// Convert from `usize`.
    ///
    /// Values of `INVALID` or above do not fit; callers check capacity
    /// first (see [`crate::mesh::build_from_triangles`]).
    ///
    /// # Panics
    /// Debug builds panic if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to `usize`.
    fn to_usize(self) -> usize;

    /// Whether this is a real index rather than the sentinel.
    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {
        $(
            impl MeshIndex for $ty {
                const INVALID: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v < <$ty>::MAX as usize,
                        "index {} does not fit in {}",
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
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// Common interface of element handles, used to key per-element tables.
pub trait ElementId: Copy + Eq + Debug {
    /// Build a handle from an arena position.
    fn from_index(index: usize) -> Self;

    /// Arena position of this handle.
    fn to_index(self) -> usize;
}

/// Handle of a vertex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// Handle of a half-edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// Handle of a face.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_element_id {
    ($name:ident, $tag:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a handle from an arena position.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The absent handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Arena position.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Raw stored integer.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Whether the handle refers to an element.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> ElementId for $name<I> {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self::new(index)
            }

            #[inline]
            fn to_index(self) -> usize {
                self.index()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $tag, self.index())
                } else {
                    write!(f, "{}(-)", $tag)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_element_id!(VertexId, "V");
impl_element_id!(HalfEdgeId, "H");
impl_element_id!(FaceId, "F");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_roundtrip_index() {
        let v: VertexId = VertexId::new(7);
        assert_eq!(v.index(), 7);
        assert!(v.is_valid());
        assert_eq!(VertexId::<u32>::from_index(7), v);
        assert_eq!(v.to_index(), 7);
    }

    #[test]
    fn test_default_is_invalid() {
        let h: HalfEdgeId<u16> = HalfEdgeId::default();
        assert!(!h.is_valid());
        assert_eq!(h.raw(), u16::MAX);
    }

    #[test]
    fn test_debug_format() {
        let f: FaceId = FaceId::new(3);
        assert_eq!(format!("{:?}", f), "F(3)");
        assert_eq!(format!("{:?}", FaceId::<u64>::invalid()), "F(-)");
    }
}
