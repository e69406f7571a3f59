use core::fmt;
use core::marker::PhantomData;
use core::ops::Index;
use core::ptr::NonNull;
use core::slice;

use stride_dim::{Const, Dim, Dyn, reinterpretable};
use stride_ptr::StrideCursor;

use crate::geometry::{
    check_bounds, check_index, check_sub_len, checked_geometry, fits, impl_view_geometry,
    resolve_extent, resolve_stride, skipped_geometry,
};
use crate::{GeometryError, Iter, ViewMut};

// -----------------------------------------------------------------------------
// View

/// A shared strided view, similar to `&'a [T]` with a step between elements.
///
/// `E` is the extent (number of elements) and `S` the stride. Each is either
/// fixed at compile time ([`Const`]) and costs no storage, or dynamic ([`Dyn`])
/// and stored inline:
///
/// ```
/// use stride_dim::{Const, Dyn};
/// use stride_view::View;
///
/// assert_eq!(size_of::<View<'_, u8, Const<4>, Const<2>>>(), size_of::<*const u8>());
/// assert_eq!(size_of::<View<'_, u8, Dyn, Const<2>>>(), 2 * size_of::<usize>());
/// assert_eq!(size_of::<View<'_, u8, Dyn, Dyn>>(), 3 * size_of::<usize>());
/// ```
///
/// Views are `Copy`. Sub-view operations take `self` and return new views over the
/// same storage:
///
/// ```
/// use stride_view::View;
///
/// let data = [10, 20, 30, 40, 50];
/// let view = View::<i32>::from_slice(&data);
///
/// assert_eq!(view.len(), 5);
/// assert_eq!(view.first(2), [10, 20]);
/// assert_eq!(view.last(2), [40, 50]);
/// assert_eq!(view.skip(2), [10, 30, 50]);
/// assert_eq!(view.drop_first(1)[0], 20);
/// ```
pub struct View<'a, T, E: Dim = Dyn, S: Dim = Const<1>> {
    ptr: NonNull<T>,
    extent: E,
    stride: S,
    _marker: PhantomData<&'a [T]>,
}

/// A contiguous view, the stride-1 case of [`View`].
pub type Span<'a, T, E = Dyn> = View<'a, T, E, Const<1>>;

unsafe impl<T: Sync, E: Dim, S: Dim> Send for View<'_, T, E, S> {}
unsafe impl<T: Sync, E: Dim, S: Dim> Sync for View<'_, T, E, S> {}

impl<T, E: Dim, S: Dim> Clone for View<'_, T, E, S> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E: Dim, S: Dim> Copy for View<'_, T, E, S> {}

impl_view_geometry!(View);

impl<'a, T, E: Dim, S: Dim> View<'a, T, E, S> {
    /// Creates a view of `count` elements of `data`, `stride` apart, starting at
    /// `data[0]`.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero, if a fixed `E` or `S` disagrees with `count`
    /// or `stride`, or if the last element lies outside of `data`. The view,
    /// including one stride past its last element, must span at most
    /// `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use stride_dim::{Const, Dyn};
    /// use stride_view::View;
    ///
    /// let data = [0, 1, 2, 3, 4, 5, 6];
    ///
    /// let odd: View<'_, i32, Dyn, Dyn> = View::new(&data[1..], 3, 2);
    /// assert_eq!(odd, [1, 3, 5]);
    ///
    /// let fixed: View<'_, i32, Const<3>, Const<3>> = View::new(&data, 3, 3);
    /// assert_eq!(fixed, [0, 3, 6]);
    /// ```
    #[track_caller]
    pub fn new(data: &'a [T], count: usize, stride: usize) -> Self {
        match Self::try_new(data, count, stride) {
            Ok(view) => view,
            Err(e) => e.handle_error(),
        }
    }

    /// Fallible version of [`new`](Self::new).
    ///
    /// ```
    /// use stride_dim::Dyn;
    /// use stride_view::{GeometryError, View};
    ///
    /// let data = [0; 5];
    ///
    /// let res = View::<'_, i32, Dyn, Dyn>::try_new(&data, 3, 3);
    /// assert_eq!(res.unwrap_err(), GeometryError::OutOfBounds { count: 3, stride: 3, len: 5 });
    /// ```
    pub fn try_new(data: &'a [T], count: usize, stride: usize) -> Result<Self, GeometryError> {
        let (extent, step) = checked_geometry::<T, E, S>(count, stride)?;
        check_bounds(count, stride, data.len())?;
        // SAFETY: bounds checked against `data`, which is borrowed for `'a`.
        Ok(unsafe {
            Self::from_parts(NonNull::from_ref(data).cast(), extent, step)
        })
    }

    /// Creates a view of every element of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `E` is fixed to a length other than `data.len()`, or `S` is
    /// fixed to a stride other than 1.
    ///
    /// ```should_panic
    /// use stride_dim::Const;
    /// use stride_view::View;
    ///
    /// let data = [1, 2, 3, 4, 5];
    /// let _: View<'_, i32, Const<3>> = View::from_slice(&data);
    /// ```
    #[track_caller]
    pub fn from_slice(data: &'a [T]) -> Self {
        Self::new(data, data.len(), 1)
    }

    /// Fallible version of [`from_slice`](Self::from_slice).
    pub fn try_from_slice(data: &'a [T]) -> Result<Self, GeometryError> {
        Self::try_new(data, data.len(), 1)
    }

    /// Creates a view from a raw pointer.
    ///
    /// # Panics
    ///
    /// Panics on the same geometry mismatches as [`new`](Self::new). Storage
    /// bounds cannot be checked here.
    ///
    /// # Safety
    ///
    /// For every `i < count`, `ptr + i * stride` must be valid for reads and must
    /// not be mutated for the lifetime `'a`.
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, count: usize, stride: usize) -> Self {
        match checked_geometry::<T, E, S>(count, stride) {
            // SAFETY: upheld by the caller.
            Ok((extent, step)) => unsafe { Self::from_parts(ptr, extent, step) },
            Err(e) => e.handle_error(),
        }
    }

    /// Returns a reference to the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.len() {
            // SAFETY: `index` is in range.
            Some(unsafe { self.get_unchecked(index) })
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
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        // SAFETY: every position of the view is valid for `'a`.
        unsafe { self.ptr.add(index * self.stride()).as_ref() }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Unlike `view[index]` the reference lives as long as the storage.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &'a T {
        check_index(index, self.len());
        // SAFETY: `index` is in range.
        unsafe { self.get_unchecked(index) }
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &'a T {
        if self.is_empty() {
            GeometryError::Empty.handle_error();
        }
        // SAFETY: the view is not empty.
        unsafe { self.get_unchecked(0) }
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the view is empty.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &'a T {
        if self.is_empty() {
            GeometryError::Empty.handle_error();
        }
        // SAFETY: the view is not empty.
        unsafe { self.get_unchecked(self.len() - 1) }
    }

    /// Returns the elements as a slice if they are adjacent in memory.
    ///
    /// That is the case for a stride of 1 and for views of at most one element.
    #[inline]
    pub fn as_contiguous(&self) -> Option<&'a [T]> {
        if self.stride() == 1 || self.len() <= 1 {
            // SAFETY: `len` adjacent elements, valid for `'a`.
            Some(unsafe {
                slice::from_raw_parts(self.ptr.as_ptr(), self.len())
            })
        } else {
            None
        }
    }

    /// Returns a cursor at the first element.
    #[inline]
    pub fn begin(&self) -> StrideCursor<'a, T, S> {
        // SAFETY: the cursor walks exactly the positions of the view.
        unsafe { StrideCursor::new(self.ptr, self.stride, self.len()) }
    }

    /// Returns a cursor one past the last element.
    ///
    /// ```
    /// use stride_view::View;
    ///
    /// let data = [1, 2, 3, 4, 5, 6];
    /// let view = View::<i32>::from_slice(&data).skip(2);
    ///
    /// assert_eq!(view.end() - view.begin(), 3);
    /// assert_eq!(unsafe { *(view.end() - 1).get() }, 5);
    /// ```
    #[inline]
    pub fn end(&self) -> StrideCursor<'a, T, S> {
        self.begin().offset(self.len() as isize)
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T, S> {
        Iter::new(self.begin(), self.len())
    }
}

impl<'a, T, const N: usize> View<'a, T, Const<N>, Const<1>> {
    /// Creates a view of an array, with a fixed extent.
    #[inline]
    pub const fn from_array(data: &'a [T; N]) -> Self {
        // SAFETY: exactly the `N` elements of `data`.
        unsafe { Self::from_parts(NonNull::from_ref(data).cast(), Const, Const) }
    }
}

impl<'a, T> From<&'a [T]> for View<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for View<'a, T, Const<N>> {
    #[inline]
    fn from(data: &'a [T; N]) -> Self {
        Self::from_array(data)
    }
}

impl<'a, T, E: Dim, S: Dim> From<ViewMut<'a, T, E, S>> for View<'a, T, E, S> {
    #[inline]
    fn from(view: ViewMut<'a, T, E, S>) -> Self {
        view.into_view()
    }
}

impl<T, E: Dim, S: Dim> Index<usize> for View<'_, T, E, S> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<'a, T, E: Dim, S: Dim> IntoIterator for View<'a, T, E, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T, S> {
        self.iter()
    }
}

impl<'a, T, E: Dim, S: Dim> IntoIterator for &View<'a, T, E, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T, S> {
        self.iter()
    }
}

impl<T: fmt::Debug, E: Dim, S: Dim> fmt::Debug for View<'_, T, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
