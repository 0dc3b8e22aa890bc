use std::{iter::Enumerate, marker::PhantomData};

/// Iterator returned by [`EnumerateIdx::enumerate_idx`].
pub struct IndexedIter<I, Idx> {
    inner: Enumerate<I>,
    _marker: PhantomData<Idx>,
}

/// Like `Iterator::enumerate`, but yields a typed index instead of a `usize`.
pub trait EnumerateIdx<Idx>: Iterator + Sized {
    fn enumerate_idx(self) -> IndexedIter<Self, Idx> {
        IndexedIter {
            inner: self.enumerate(),
            _marker: PhantomData,
        }
    }
}

impl<I: Iterator, Idx> EnumerateIdx<Idx> for I {}

impl<I: Iterator, Idx: From<usize>> Iterator for IndexedIter<I, Idx> {
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, item)| (Idx::from(i), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator, Idx: From<usize>> ExactSizeIterator for IndexedIter<I, Idx> {}
