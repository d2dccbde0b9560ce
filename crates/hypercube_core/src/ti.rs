//! Typed indices and vectors indexed by them.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut, Range};

use itertools::Itertools;

/// Defines one or more structs that are simple wrappers around primitive
/// unsigned integer types and implements [`TypedIndex`] on them.
macro_rules! typed_index_struct {
    (
        $(
            $(#[$attr:meta])*
            $struct_vis:vis struct $struct_name:ident($inner_vis:vis $inner_type:ty);
        )+
    ) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[repr(transparent)]
            $struct_vis struct $struct_name($inner_vis $inner_type);

            impl ::tinyset::Fits64 for $struct_name {
                unsafe fn from_u64(x: u64) -> Self {
                    Self(x as _)
                }

                fn to_u64(self) -> u64 {
                    self.0 as u64
                }
            }

            impl $crate::ti::TypedIndex for $struct_name {
                const MAX_INDEX: usize = <$inner_type>::MAX as usize;

                fn to_index(self) -> usize {
                    self.0 as usize
                }

                fn try_from_index(index: usize) -> Option<Self> {
                    index.try_into().ok().map(Self)
                }
            }
        )+
    };
}

/// Typed index.
///
/// This is a wrapper around a primitive unsigned integer, defined using
/// `typed_index_struct!`.
pub trait TypedIndex:
    'static
    + fmt::Debug
    + Default
    + Copy
    + Eq
    + std::hash::Hash
    + Ord
    + tinyset::Fits64
    + Send
    + Sync
{
    /// Maximum index representable by the type.
    const MAX_INDEX: usize;

    /// Returns the index as a `usize`.
    fn to_index(self) -> usize;

    /// Returns an index from a `usize`, or `None` if it does not fit.
    fn try_from_index(index: usize) -> Option<Self>;

    /// Returns an iterator over all indices up to `count` (exclusive), clipped
    /// to the maximum value.
    fn iter(count: usize) -> TypedIndexIter<Self> {
        let count = std::cmp::min(count, Self::MAX_INDEX + 1);
        TypedIndexIter {
            range: 0..count,
            _phantom: PhantomData,
        }
    }
}

/// Iterator over all indices up to a certain value. See [`TypedIndex::iter()`].
#[derive(Debug, Clone)]
pub struct TypedIndexIter<I> {
    range: Range<usize>,
    _phantom: PhantomData<fn() -> I>,
}

impl<I: TypedIndex> Iterator for TypedIndexIter<I> {
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().and_then(I::try_from_index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

/// Wrapper around a `Vec<E>` that is indexed using a typed index.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TiVec<I, E> {
    values: Vec<E>,
    _phantom: PhantomData<I>,
}

impl<I, E: fmt::Debug> fmt::Debug for TiVec<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = self.values.iter().map(|v| format!("{v:?}")).join(", ");
        write!(f, "[{contents}]")
    }
}

impl<I: TypedIndex, E> Index<I> for TiVec<I, E> {
    type Output = E;

    fn index(&self, index: I) -> &Self::Output {
        &self.values[index.to_index()]
    }
}

impl<I: TypedIndex, E> IndexMut<I> for TiVec<I, E> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.values[index.to_index()]
    }
}

impl<I: TypedIndex, E> FromIterator<E> for TiVec<I, E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
            _phantom: PhantomData,
        }
    }
}

impl<I: TypedIndex, E> TiVec<I, E> {
    /// Returns a reference to the element at `index`, or `None` if the index
    /// is out of range.
    pub fn get(&self, index: I) -> Option<&E> {
        self.values.get(index.to_index())
    }

    /// Returns an iterator over the indices in the collection.
    pub fn iter_keys(&self) -> TypedIndexIter<I> {
        I::iter(self.values.len())
    }
    /// Returns an iterator over index-value pairs in the collection.
    pub fn iter(&self) -> impl Iterator<Item = (I, &E)> {
        self.iter_keys().zip(&self.values)
    }
    /// Returns an iterator over the values in the collection.
    pub fn iter_values(&self) -> std::slice::Iter<'_, E> {
        self.values.iter()
    }
}
