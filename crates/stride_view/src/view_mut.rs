use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;

use stride_dim::{Const, Dim, Dyn, reinterpretable};
use stride_ptr::{StrideCursor, StrideCursorMut};

use crate::geometry::{
    check_bounds, check_index, check_sub_len, checked_geometry, fits, impl_view_geometry,
    resolve_extent, resolve_stride, skipped_geometry,
};
use crate::{GeometryError, Iter, IterMut, View};

// -----------------------------------------------------------------------------
// ViewMut

/// An exclusive strided view, similar to `&'a mut [T]` with a step between
/// elements.
///
/// It has the same geometry and sub-view operations as [`View`], except that
/// sub-views consume `self`. Use [`reborrow`](Self::reborrow) to keep the
/// original around:
///
/// ```
/// use stride_view::ViewMut;
///
/// let mut data = [1, 2, 3, 4, 5, 6];
/// let mut view = ViewMut::<i32>::from_slice(&mut data);
///
/// for x in view.reborrow().skip(2) {
///     *x *= 10;
/// }
/// view.reborrow().last(1)[0] = 0;
///
/// assert_eq!(view, [10, 2, 30, 4, 50, 0]);
/// ```
pub struct ViewMut<'a, T, E: Dim = Dyn, S: Dim = Const<1>> {
    ptr: NonNull<T>,
    extent: E,
    stride: S,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send, E: Dim, S: Dim> Send for ViewMut<'_, T, E, S> {}
unsafe impl<T: Sync, E: Dim, S: Dim> Sync for ViewMut<'_, T, E, S> {}

impl_view_geometry!(ViewMut);

impl<'a, T, E: Dim, S: Dim> ViewMut<'a, T, E, S> {
    /// Creates a view of `count` elements of `data`, `stride` apart, starting at
    /// `data[0]`.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero, if a fixed `E` or `S` disagrees with `count`
    /// or `stride`, or if the last element lies outside of `data`. The view,
    /// including one stride past its last element, must span at most
    /// `isize::MAX` bytes.
    #[track_caller]
    pub fn new(data: &'a mut [T], count: usize, stride: usize) -> Self {
        match Self::try_new(data, count, stride) {
            Ok(view) => view,
            Err(e) => e.handle_error(),
        }
    }

    /// Fallible version of [`new`](Self::new).
    pub fn try_new(data: &'a mut [T], count: usize, stride: usize) -> Result<Self, GeometryError> {
        let (extent, step) = checked_geometry::<T, E, S>(count, stride)?;
        check_bounds(count, stride, data.len())?;
        // SAFETY: bounds checked against `data`, which is borrowed for `'a`.
        Ok(unsafe {
            Self::from_parts(NonNull::from_mut(data).cast(), extent, step)
        })
    }

    /// Creates a view of every element of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `E` is fixed to a length other than `data.len()`, or `S` is
    /// fixed to a stride other than 1.
    #[track_caller]
    pub fn from_slice(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self::new(data, len, 1)
    }

    /// Fallible version of [`from_slice`](Self::from_slice).
    pub fn try_from_slice(data: &'a mut [T]) -> Result<Self, GeometryError> {
        let len = data.len();
        Self::try_new(data, len, 1)
    }

    /// Creates a view from a raw pointer.
    ///
    /// # Panics
    ///
    /// Panics on the same geometry mismatches as [`new`](Self::new).
    ///
    /// # Safety
    ///
    /// For every `i < count`, `ptr + i * stride` must be valid for reads and
    /// writes, and must not be accessed through any other path for the lifetime `'a`.
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, count: usize, stride: usize) -> Self {
        match checked_geometry::<T, E, S>(count, stride) {
            // SAFETY: upheld by the caller.
            Ok((extent, step)) => unsafe { Self::from_parts(ptr, extent, step) },
            Err(e) => e.handle_error(),
        }
    }

    /// Returns a shared view of the same elements.
    #[inline]
    pub fn as_view(&self) -> View<'_, T, E, S> {
        // SAFETY: same positions, shared for the duration of the borrow of `self`.
        unsafe { View::from_raw_parts(self.ptr, self.len(), self.stride()) }
    }

    /// Converts into a shared view for the rest of `'a`.
    #[inline]
    pub fn into_view(self) -> View<'a, T, E, S> {
        // SAFETY: `self` is consumed, so the storage is only shared from now on.
        unsafe { View::from_raw_parts(self.ptr, self.len(), self.stride()) }
    }

    /// Returns a shorter-lived `ViewMut` of the same elements.
    #[inline]
    pub fn reborrow(&mut self) -> ViewMut<'_, T, E, S> {
        // SAFETY: `self` is mutably borrowed for the lifetime of the result.
        unsafe { ViewMut::from_parts(self.ptr, self.extent, self.stride) }
    }

    /// Returns a reference to the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_view().get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out
    /// of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            // SAFETY: `index` is in range.
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Returns a reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: upheld by the caller.
        unsafe { self.ptr.add(index * self.stride()).as_ref() }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        check_index(index, self.len());
        // SAFETY: `index` is in range.
        unsafe { self.get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        check_index(index, self.len());
        // SAFETY: `index` is in range.
        unsafe { self.get_unchecked_mut(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: every position of the view is valid and exclusively borrowed.
        unsafe { self.ptr.add(index * self.stride()).as_mut() }
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &T {
        self.as_view().front()
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &T {
        self.as_view().back()
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        if self.is_empty() {
            GeometryError::Empty.handle_error();
        }
        // SAFETY: the view is not empty.
        unsafe { self.get_unchecked_mut(0) }
    }

    /// Returns the last element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        if self.is_empty() {
            GeometryError::Empty.handle_error();
        }
        let last = self.len() - 1;
        // SAFETY: the view is not empty.
        unsafe { self.get_unchecked_mut(last) }
    }

    /// Swaps the elements at `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        check_index(a, len);
        check_index(b, len);
        let stride = self.stride();
        // SAFETY: both positions are in range; `ptr::swap` allows `a == b`.
        unsafe {
            ptr::swap(
                self.ptr.add(a * stride).as_ptr(),
                self.ptr.add(b * stride).as_ptr(),
            );
        }
    }

    /// Assigns a clone of `value` to every element.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for x in self.iter_mut() {
            x.clone_from(&value);
        }
    }

    /// Returns the elements as a mutable slice if they are adjacent in memory.
    #[inline]
    pub fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        if self.stride() == 1 || self.len() <= 1 {
            // SAFETY: `len` adjacent elements, exclusively borrowed.
            Some(unsafe {
                slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len())
            })
        } else {
            None
        }
    }

    /// Returns a cursor at the first element.
    #[inline]
    pub fn begin(&self) -> StrideCursor<'_, T, S> {
        self.as_view().begin()
    }

    /// Returns a cursor one past the last element.
    #[inline]
    pub fn end(&self) -> StrideCursor<'_, T, S> {
        self.as_view().end()
    }

    /// Returns a mutable cursor at the first element.
    #[inline]
    pub fn begin_mut(&mut self) -> StrideCursorMut<'_, T, S> {
        // SAFETY: the cursor walks exactly the positions of the view, which is
        // mutably borrowed for the lifetime of the cursor.
        unsafe { StrideCursorMut::new(self.ptr, self.stride, self.len()) }
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S> {
        self.as_view().iter()
    }

    /// Returns an iterator that allows modifying each element.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S> {
        self.reborrow().into_iter()
    }
}

impl<'a, T, const N: usize> ViewMut<'a, T, Const<N>, Const<1>> {
    /// Creates a view of an array, with a fixed extent.
    #[inline]
    pub const fn from_array(data: &'a mut [T; N]) -> Self {
        // SAFETY: exactly the `N` elements of `data`.
        unsafe { Self::from_parts(NonNull::from_mut(data).cast(), Const, Const) }
    }
}

impl<'a, T> From<&'a mut [T]> for ViewMut<'a, T> {
    #[inline]
    fn from(data: &'a mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ViewMut<'a, T, Const<N>> {
    #[inline]
    fn from(data: &'a mut [T; N]) -> Self {
        Self::from_array(data)
    }
}

impl<T, E: Dim, S: Dim> Index<usize> for ViewMut<'_, T, E, S> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, E: Dim, S: Dim> IndexMut<usize> for ViewMut<'_, T, E, S> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<'a, T, E: Dim, S: Dim> IntoIterator for ViewMut<'a, T, E, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T, S> {
        let len = self.len();
        // SAFETY: the cursor walks exactly the positions of the consumed view.
        let cursor = unsafe { StrideCursorMut::new(self.ptr, self.stride, len) };
        IterMut::new(cursor, len)
    }
}

impl<'a, T, E: Dim, S: Dim> IntoIterator for &'a ViewMut<'_, T, E, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T, S> {
        self.iter()
    }
}

impl<'a, T, E: Dim, S: Dim> IntoIterator for &'a mut ViewMut<'_, T, E, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T, S> {
        self.iter_mut()
    }
}

impl<T: fmt::Debug, E: Dim, S: Dim> fmt::Debug for ViewMut<'_, T, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_view(), f)
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;
    use stride_dim::{Const, Dyn};

    use super::ViewMut;
    use crate::{GeometryError, View};

    #[test]
    fn writes_reach_storage() {
        let mut data = [0; 7];
        let mut v = ViewMut::<'_, i32, Dyn, Dyn>::new(&mut data, 4, 2);
        for (i, x) in v.iter_mut().enumerate() {
            *x = i as i32 + 1;
        }
        v[3] = 40;
        *v.front_mut() = 10;
        assert_eq!(*v.back(), 40);
        assert_eq!(data, [10, 0, 2, 0, 3, 0, 40]);
    }

    #[test]
    fn sub_views_write_through() {
        let mut data: Vec<i32> = (0..10).collect();
        let mut v = ViewMut::<i32>::from_slice(&mut data);

        v.reborrow().skip(3).fill(-1);
        *v.reborrow().drop_first(1).skip_const::<4>().back_mut() = 100;
        v.reborrow().last_const::<1>()[0] = 7;

        assert_eq!(v, [-1, 1, 2, -1, 4, 5, -1, 7, 8, 7]);
        assert_eq!(data, [-1, 1, 2, -1, 4, 5, -1, 7, 8, 7]);
    }

    #[test]
    fn split_at_gives_disjoint_halves() {
        let mut data = [1, 2, 3, 4, 5, 6];
        let v = ViewMut::<'_, i32, Dyn, Dyn>::new(&mut data, 3, 2);
        let (mut head, mut tail) = v.split_at(1);
        head[0] = 10;
        tail.fill(0);
        head.swap(0, 0);
        assert_eq!(data, [10, 2, 0, 4, 0, 6]);
    }

    #[test]
    fn swap_elements() {
        let mut data = [1, 2, 3, 4, 5];
        let mut v = ViewMut::<i32>::from_slice(&mut data).skip(2);
        v.swap(0, 2);
        assert_eq!(data, [5, 2, 3, 4, 1]);
    }

    #[test]
    #[should_panic(expected = "index out of range: the len is 3 but the index is 3")]
    fn index_mut_past_end_panics() {
        let mut data = [1, 2, 3];
        let mut v = ViewMut::from_array(&mut data);
        v[3] = 0;
    }

    #[test]
    #[should_panic(expected = "cannot access the front or back element of an empty view")]
    fn front_mut_of_empty_panics() {
        let mut data = [1, 2, 3];
        let mut v = ViewMut::<i32>::from_slice(&mut data).drop_first(3);
        *v.front_mut() = 0;
    }

    #[test]
    #[should_panic(expected = "cannot access the front or back element of an empty view")]
    fn back_mut_of_empty_panics() {
        let mut data: [i32; 0] = [];
        let mut v = ViewMut::<i32>::from_slice(&mut data);
        *v.back_mut() = 0;
    }

    #[test]
    #[should_panic(expected = "span more than isize::MAX bytes")]
    fn skip_past_isize_panics() {
        let mut data = [1, 2, 3];
        let _ = ViewMut::<i32>::from_slice(&mut data).skip(usize::MAX);
    }

    #[test]
    fn converts_to_shared() {
        let mut data = [1, 2, 3, 4];
        let mut v = ViewMut::from_array(&mut data);
        assert_eq!(v.as_view().skip(2), [1, 3]);
        if let Some(slice) = v.as_contiguous_mut() {
            slice.reverse();
        }
        let shared: View<'_, i32, Const<4>> = v.into();
        assert_eq!(shared, [4, 3, 2, 1]);
        assert_eq!(shared.len(), 4);
    }

    #[test]
    fn checked_construction() {
        let mut data = [0u8; 4];
        assert_eq!(
            ViewMut::<'_, u8, Const<3>>::try_from_slice(&mut data).unwrap_err(),
            GeometryError::ExtentMismatch {
                fixed: 3,
                actual: 4
            }
        );
        assert_eq!(
            ViewMut::<'_, u8, Dyn, Dyn>::try_new(&mut data, 3, 2).unwrap_err(),
            GeometryError::OutOfBounds {
                count: 3,
                stride: 2,
                len: 4
            }
        );
        assert_eq!(
            ViewMut::<'_, u8, Dyn, Dyn>::try_new(&mut data, 1, usize::MAX).unwrap_err(),
            GeometryError::SpanOverflow {
                count: 1,
                stride: usize::MAX
            }
        );
        let v = ViewMut::<'_, u8, Dyn, Dyn>::try_new(&mut data, 2, 3).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn iterators_by_reference() {
        let mut data = [1, 2, 3, 4];
        let mut v = ViewMut::<i32>::from_slice(&mut data);
        for x in &mut v {
            *x += 1;
        }
        let sum: i32 = (&v).into_iter().sum();
        assert_eq!(sum, 14);
        assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), [5, 4, 3, 2]);
    }

    #[test]
    fn cursors_walk_the_view() {
        let mut data = [1, 2, 3, 4, 5, 6];
        let mut v = ViewMut::<'_, i32, Dyn, Dyn>::new(&mut data, 3, 2);
        assert_eq!(v.end() - v.begin(), 3);

        let mut cursor = v.begin_mut();
        for _ in 0..3 {
            unsafe { *cursor.get() *= -1 };
            cursor.inc();
        }
        *v.at_mut(1) += 100;
        assert_eq!(*v.at(1), 97);
        assert_eq!(data, [-1, 2, 97, 4, -5, 6]);
    }

    #[test]
    fn is_sync_send() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<ViewMut<'_, i32>>();
        is_sync::<ViewMut<'_, i32, Const<3>, Dyn>>();
    }
}
