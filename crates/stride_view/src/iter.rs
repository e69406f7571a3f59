use core::fmt;
use core::iter::FusedIterator;

use stride_dim::{Dim, Dyn};
use stride_ptr::{StrideCursor, StrideCursorMut};

// -----------------------------------------------------------------------------
// Iter

/// Iterator over the elements of a [`View`](crate::View).
///
/// The iterator counts the remaining elements instead of comparing against an
/// end cursor, so it never forms a position past the storage.
pub struct Iter<'a, T, S: Dim = Dyn> {
    cursor: StrideCursor<'a, T, S>,
    len: usize,
}

impl<'a, T, S: Dim> Iter<'a, T, S> {
    #[inline(always)]
    pub(crate) fn new(cursor: StrideCursor<'a, T, S>, len: usize) -> Self {
        Self { cursor, len }
    }
}

impl<T, S: Dim> Clone for Iter<'_, T, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            len: self.len,
        }
    }
}

impl<'a, T, S: Dim> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len > 0`, so the cursor is at a position of the view.
        let item = unsafe { self.cursor.get() };
        self.cursor.inc();
        self.len -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len {
            self.cursor += self.len as isize;
            self.len = 0;
            return None;
        }
        self.cursor += n as isize;
        self.len -= n;
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len
    }

    #[inline]
    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T, S: Dim> DoubleEndedIterator for Iter<'a, T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: `len` is now the offset of the last remaining position.
        Some(unsafe { self.cursor.get_at(self.len as isize) })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len {
            self.len = 0;
            return None;
        }
        self.len -= n;
        self.next_back()
    }
}

impl<T, S: Dim> ExactSizeIterator for Iter<'_, T, S> {}

impl<T, S: Dim> FusedIterator for Iter<'_, T, S> {}

impl<T: fmt::Debug, S: Dim> fmt::Debug for Iter<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&DebugRemaining(self.clone()))
            .finish()
    }
}

struct DebugRemaining<'a, T, S: Dim>(Iter<'a, T, S>);

impl<T: fmt::Debug, S: Dim> fmt::Debug for DebugRemaining<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

// -----------------------------------------------------------------------------
// IterMut

/// Iterator over the elements of a [`ViewMut`](crate::ViewMut), yielding
/// mutable references.
pub struct IterMut<'a, T, S: Dim = Dyn> {
    cursor: StrideCursorMut<'a, T, S>,
    len: usize,
}

impl<'a, T, S: Dim> IterMut<'a, T, S> {
    #[inline(always)]
    pub(crate) fn new(cursor: StrideCursorMut<'a, T, S>, len: usize) -> Self {
        Self { cursor, len }
    }

    /// Returns a shared iterator over the remaining elements.
    #[inline]
    pub fn as_iter(&self) -> Iter<'_, T, S> {
        Iter::new(self.cursor.as_const(), self.len)
    }
}

impl<'a, T, S: Dim> Iterator for IterMut<'a, T, S> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len > 0`, and every position is handed out at most once.
        let item = unsafe { self.cursor.get() };
        self.cursor.inc();
        self.len -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.len {
            self.cursor += self.len as isize;
            self.len = 0;
            return None;
        }
        self.cursor += n as isize;
        self.len -= n;
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len
    }

    #[inline]
    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T, S: Dim> DoubleEndedIterator for IterMut<'a, T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the last remaining position, handed out once.
        Some(unsafe { self.cursor.get_at(self.len as isize) })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.len {
            self.len = 0;
            return None;
        }
        self.len -= n;
        self.next_back()
    }
}

impl<T, S: Dim> ExactSizeIterator for IterMut<'_, T, S> {}

impl<T, S: Dim> FusedIterator for IterMut<'_, T, S> {}

impl<T: fmt::Debug, S: Dim> fmt::Debug for IterMut<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&DebugRemaining(self.as_iter()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::format;
    use std::vec::Vec;

    use stride_dim::Dyn;

    use super::{Iter, IterMut};
    use crate::{View, ViewMut};

    #[test]
    fn forward_and_backward() {
        let data = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        let v = View::<'_, i32, Dyn, Dyn>::new(&data, 5, 2);

        let forward: Vec<i32> = v.iter().copied().collect();
        assert_eq!(forward, [0, 2, 4, 6, 8]);
        let backward: Vec<i32> = v.iter().rev().copied().collect();
        assert_eq!(backward, [8, 6, 4, 2, 0]);

        let mut it = v.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&8));
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&6));
        assert_eq!(it.next(), Some(&4));
        assert_eq!(it.next_back(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn nth_from_both_ends() {
        let data: Vec<i32> = (0..30).collect();
        let v = View::<i32>::from_slice(&data).skip(3);

        let mut it = v.iter();
        assert_eq!(it.nth(2), Some(&6));
        assert_eq!(it.nth_back(1), Some(&24));
        assert_eq!(it.len(), 5);
        assert_eq!(it.clone().last(), Some(&21));
        assert_eq!(it.clone().count(), 5);
        assert_eq!(it.nth(5), None);
        assert_eq!(it.len(), 0);

        let mut it = v.iter();
        assert_eq!(it.nth_back(10), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn iteration_matches_indexing() {
        let data: Vec<u16> = (0..50).collect();
        for stride in 1..8 {
            let v = View::<'_, u16, Dyn, Dyn>::new(&data, (data.len() - 1) / stride + 1, stride);
            assert_eq!(v.iter().len(), v.len());
            for (i, x) in v.iter().enumerate() {
                assert_eq!(x, &v[i]);
            }
        }
    }

    #[test]
    fn mutable_from_both_ends() {
        let mut data = [0; 6];
        let v = ViewMut::<i32>::from_slice(&mut data).skip(2);
        let mut it = v.into_iter();
        *it.next().unwrap() = 1;
        *it.next_back().unwrap() = 3;
        *it.nth(0).unwrap() = 2;
        assert!(it.next().is_none());
        assert_eq!(data, [1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn debug_shows_remaining() {
        let data = [1, 2, 3, 4];
        let mut it = View::<i32>::from_slice(&data).iter();
        it.next();
        assert_eq!(format!("{it:?}"), "Iter([2, 3, 4])");

        let mut data = [5, 6];
        let mut v = ViewMut::<i32>::from_slice(&mut data);
        assert_eq!(format!("{:?}", v.iter_mut()), "IterMut([5, 6])");
    }

    #[test]
    fn is_sync_send() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<Iter<'_, i32>>();
        is_sync::<Iter<'_, i32, Dyn>>();
        is_send::<IterMut<'_, i32>>();
        is_sync::<IterMut<'_, i32, Dyn>>();
    }
}
