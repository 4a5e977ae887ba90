//! Typed handles into a layer of the [`AnnotationStore`](crate::AnnotationStore).

use crate::layer::Annotation;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A reference to one annotation of layer `T`.
///
/// The id is the insertion index of the annotation in its layer, so it stays
/// stable while the store sorts its layers into document order. Ids are only
/// handed out by [`AnnotationStoreBuilder`](crate::AnnotationStoreBuilder),
/// which also checks that every id stored inside another annotation resolves.
pub struct Id<T> {
    index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }

    /// Insertion index within the layer.
    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls: derives would put bounds on `T`.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Annotation> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", T::KIND, self.index)
    }
}
