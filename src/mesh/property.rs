//! Typed per-element property tables.
//!
//! A [`Property`] stores one value per element of a single kind, indexed by
//! that kind's handle. Tables are sized to the element count when created
//! and never grow, matching the fixed topology of a loaded mesh.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use super::index::{ElementId, FaceId, HalfEdgeId, VertexId};

/// One value of type `T` per element addressed by handle type `K`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property<K, T> {
    values: Vec<T>,
    _key: PhantomData<fn(K)>,
}

/// Per-vertex table.
pub type VertexProperty<T, I = u32> = Property<VertexId<I>, T>;
/// Per-half-edge table.
pub type HalfEdgeProperty<T, I = u32> = Property<HalfEdgeId<I>, T>;
/// Per-face table.
pub type FaceProperty<T, I = u32> = Property<FaceId<I>, T>;

impl<K: ElementId, T: Clone> Property<K, T> {
    /// Create a table of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self {
            values: vec![value; len],
            _key: PhantomData,
        }
    }
}

impl<K: ElementId, T> Property<K, T> {
    /// Wrap values already ordered by element index.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            values,
            _key: PhantomData,
        }
    }

    /// Number of elements covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table covers no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for `key`, or `None` if out of range.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.values.get(key.to_index())
    }

    /// Iterate `(handle, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (K::from_index(i), v))
    }

    /// Raw values in index order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<K: ElementId, T> Index<K> for Property<K, T> {
    type Output = T;

    #[inline]
    fn index(&self, key: K) -> &T {
        &self.values[key.to_index()]
    }
}

impl<K: ElementId, T> IndexMut<K> for Property<K, T> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut T {
        &mut self.values[key.to_index()]
    }
}

impl<K: ElementId, T: Copy + std::iter::Sum<T>> Property<K, T> {
    /// Sum of all values, for additive quantities such as area.
    pub fn sum(&self) -> T {
        self.values.iter().copied().sum()
    }
}
