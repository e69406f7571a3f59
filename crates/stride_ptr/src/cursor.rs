use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr::NonNull;

use stride_dim::{Dim, Dyn};

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_cursor {
    ($cursor:ident) => {
        unsafe impl<T: Sync, S: Dim> Sync for $cursor<'_, T, S> {}

        impl<'a, T, S: Dim> $cursor<'a, T, S> {
            /// Returns the number of elements one step moves over.
            #[inline(always)]
            pub fn stride(&self) -> usize {
                self.stride.get()
            }

            /// Returns the stride policy of this cursor.
            #[inline(always)]
            pub fn stride_dim(&self) -> S {
                self.stride
            }

            /// Acquires the underlying pointer.
            #[inline(always)]
            pub const fn as_ptr(&self) -> *const T {
                self.ptr as *const T
            }

            /// Moves the cursor by `count` logical positions.
            ///
            /// This uses wrapping arithmetic, so the cursor may be moved anywhere.
            /// Only dereferencing needs a valid position.
            #[inline]
            pub fn offset(mut self, count: isize) -> Self {
                self.step(count);
                self
            }

            /// Advances the cursor to the next logical position.
            #[inline]
            pub fn inc(&mut self) {
                self.step(1);
            }

            /// Moves the cursor to the previous logical position.
            #[inline]
            pub fn dec(&mut self) {
                self.step(-1);
            }

            /// Returns the number of logical positions from `origin` to `self`.
            ///
            /// Both cursors must come from the same view and share a stride,
            /// otherwise the result is meaningless. This is not checked.
            ///
            /// For zero-sized `T` every cursor has the same address and the
            /// result is always `0`.
            #[inline]
            pub fn distance(&self, origin: &Self) -> isize {
                let bytes = (self.ptr.addr() as isize).wrapping_sub(origin.ptr.addr() as isize);
                bytes / size_of::<T>().max(1) as isize / self.stride() as isize
            }

            #[inline(always)]
            fn step(&mut self, count: isize) {
                let elems = count.wrapping_mul(self.stride.get() as isize);
                self.ptr = self.ptr.wrapping_offset(elems);
                #[cfg(debug_assertions)]
                {
                    self.pos = self.pos.wrapping_add(count);
                }
            }

            #[cfg(debug_assertions)]
            #[track_caller]
            fn assert_in_view(&self, count: isize) {
                let pos = self.pos.wrapping_add(count);
                assert!(
                    pos >= 0 && (pos as usize) < self.len,
                    "tried to dereference a strided cursor at position {pos} of a view of length {}",
                    self.len,
                );
            }
        }

        impl<T, S: Dim> AddAssign<isize> for $cursor<'_, T, S> {
            #[inline]
            fn add_assign(&mut self, count: isize) {
                self.step(count);
            }
        }

        impl<T, S: Dim> SubAssign<isize> for $cursor<'_, T, S> {
            #[inline]
            fn sub_assign(&mut self, count: isize) {
                self.step(count.wrapping_neg());
            }
        }

        impl<T, S: Dim> Add<isize> for $cursor<'_, T, S> {
            type Output = Self;

            #[inline]
            fn add(self, count: isize) -> Self {
                self.offset(count)
            }
        }

        impl<'a, T, S: Dim> Add<$cursor<'a, T, S>> for isize {
            type Output = $cursor<'a, T, S>;

            #[inline]
            fn add(self, cursor: $cursor<'a, T, S>) -> $cursor<'a, T, S> {
                cursor.offset(self)
            }
        }

        impl<T, S: Dim> Sub<isize> for $cursor<'_, T, S> {
            type Output = Self;

            #[inline]
            fn sub(self, count: isize) -> Self {
                self.offset(count.wrapping_neg())
            }
        }

        impl<T, S: Dim> PartialEq for $cursor<'_, T, S> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.ptr == other.ptr
            }
        }

        impl<T, S: Dim> Eq for $cursor<'_, T, S> {}

        impl<T, S: Dim> PartialOrd for $cursor<'_, T, S> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T, S: Dim> Ord for $cursor<'_, T, S> {
            #[inline]
            fn cmp(&self, other: &Self) -> Ordering {
                self.ptr.cmp(&other.ptr)
            }
        }

        impl<T, S: Dim> fmt::Pointer for $cursor<'_, T, S> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.ptr, f)
            }
        }

        impl<T, S: Dim> fmt::Debug for $cursor<'_, T, S> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($cursor))
                    .field("ptr", &self.ptr)
                    .field("stride", &self.stride)
                    .finish()
            }
        }
    };
}

// -----------------------------------------------------------------------------
// StrideCursor

/// A read-only strided position, yielding `&'a T`.
///
/// # Examples
///
/// ```
/// use core::ptr::NonNull;
/// use stride_dim::Const;
/// use stride_ptr::StrideCursor;
///
/// let x = [0, 1, 2, 3, 4, 5];
///
/// // Every other element: 0, 2, 4.
/// let begin = unsafe { StrideCursor::new(NonNull::from_ref(&x).cast::<i32>(), Const::<2>, 3) };
/// let end = begin + 3;
///
/// assert_eq!(unsafe { *(begin + 1).get() }, 2);
/// assert_eq!(unsafe { *begin.get_at(2) }, 4);
/// assert_eq!(end - begin, 3);
/// assert!(begin < end);
/// ```
pub struct StrideCursor<'a, T, S: Dim = Dyn> {
    ptr: *const T,
    stride: S,
    #[cfg(debug_assertions)]
    pos: isize,
    #[cfg(debug_assertions)]
    len: usize,
    _marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync, S: Dim> Send for StrideCursor<'_, T, S> {}

impl_cursor!(StrideCursor);

impl<T, S: Dim> Clone for StrideCursor<'_, T, S> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Dim> Copy for StrideCursor<'_, T, S> {}

impl<'a, T, S: Dim> StrideCursor<'a, T, S> {
    /// Creates a cursor at `ptr` moving `stride` elements per step.
    ///
    /// `len` is the number of logical positions of the view the cursor walks.
    /// It is only kept in debug builds, to check dereferences.
    ///
    /// # Safety
    ///
    /// For every `i` in `0..len`, `ptr + i * stride` must be valid for reads
    /// and must not be mutated for the lifetime `'a`. Moves treat the stride as
    /// an `isize`, so orderings and distances are only meaningful while
    /// `len * stride` elements span at most `isize::MAX` bytes.
    #[inline(always)]
    pub const unsafe fn new(ptr: NonNull<T>, stride: S, len: usize) -> Self {
        #[cfg(not(debug_assertions))]
        let _ = len;
        Self {
            ptr: ptr.as_ptr(),
            stride,
            #[cfg(debug_assertions)]
            pos: 0,
            #[cfg(debug_assertions)]
            len,
            _marker: PhantomData,
        }
    }

    /// Dereferences the cursor without bounds checks.
    ///
    /// # Safety
    ///
    /// The cursor must be at one of the `len` positions it was created for.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get(self) -> &'a T {
        #[cfg(debug_assertions)]
        self.assert_in_view(0);

        // SAFETY: the position is one of the valid positions of the view.
        unsafe { &*self.ptr }
    }

    /// Dereferences the position `count` steps away without bounds checks.
    ///
    /// # Safety
    ///
    /// `self + count` must be at one of the `len` positions the cursor was
    /// created for.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_at(self, count: isize) -> &'a T {
        #[cfg(debug_assertions)]
        self.assert_in_view(count);

        // SAFETY: the caller guarantees the target position is valid.
        unsafe { &*self.offset(count).ptr }
    }
}

impl<T, S: Dim> Sub for StrideCursor<'_, T, S> {
    type Output = isize;

    /// See [`distance`](StrideCursor::distance).
    #[inline]
    fn sub(self, origin: Self) -> isize {
        self.distance(&origin)
    }
}

// -----------------------------------------------------------------------------
// StrideCursorMut

/// A mutable strided position, yielding `&'a mut T`.
///
/// Unlike [`StrideCursor`] it is not `Copy`: handing out two cursors to the
/// same element is how mutable aliasing would start.
///
/// # Examples
///
/// ```
/// use core::ptr::NonNull;
/// use stride_dim::Dyn;
/// use stride_ptr::StrideCursorMut;
///
/// let mut x = [0, 1, 2, 3, 4, 5];
///
/// let mut cursor = unsafe { StrideCursorMut::new(NonNull::from_mut(&mut x).cast::<i32>(), Dyn(3), 2) };
/// cursor.inc();
/// unsafe { *cursor.get() = 30 };
///
/// assert_eq!(x, [0, 1, 2, 30, 4, 5]);
/// ```
pub struct StrideCursorMut<'a, T, S: Dim = Dyn> {
    ptr: *mut T,
    stride: S,
    #[cfg(debug_assertions)]
    pos: isize,
    #[cfg(debug_assertions)]
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send, S: Dim> Send for StrideCursorMut<'_, T, S> {}

impl_cursor!(StrideCursorMut);

impl<'a, T, S: Dim> StrideCursorMut<'a, T, S> {
    /// Creates a cursor at `ptr` moving `stride` elements per step.
    ///
    /// `len` is only kept in debug builds, to check dereferences.
    ///
    /// # Safety
    ///
    /// For every `i` in `0..len`, `ptr + i * stride` must be valid for reads and
    /// writes, and must not be accessed through any other path for the lifetime `'a`.
    /// The stride limit of [`StrideCursor::new`] applies as well.
    #[inline(always)]
    pub const unsafe fn new(ptr: NonNull<T>, stride: S, len: usize) -> Self {
        #[cfg(not(debug_assertions))]
        let _ = len;
        Self {
            ptr: ptr.as_ptr(),
            stride,
            #[cfg(debug_assertions)]
            pos: 0,
            #[cfg(debug_assertions)]
            len,
            _marker: PhantomData,
        }
    }

    /// Dereferences the cursor without bounds checks.
    ///
    /// # Safety
    ///
    /// The cursor must be at one of the `len` positions it was created for, and
    /// no other reference to that element may be alive during `'a`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get(&mut self) -> &'a mut T {
        #[cfg(debug_assertions)]
        self.assert_in_view(0);

        // SAFETY: valid position, exclusivity upheld by the caller.
        unsafe { &mut *self.ptr }
    }

    /// Dereferences the position `count` steps away without bounds checks.
    ///
    /// # Safety
    ///
    /// Same as [`get`](Self::get), for the position `self + count`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_at(&mut self, count: isize) -> &'a mut T {
        #[cfg(debug_assertions)]
        self.assert_in_view(count);

        let elems = count.wrapping_mul(self.stride.get() as isize);
        // SAFETY: valid position, exclusivity upheld by the caller.
        unsafe { &mut *self.ptr.wrapping_offset(elems) }
    }

    /// Returns a read-only cursor at the same position.
    #[inline]
    pub fn as_const(&self) -> StrideCursor<'_, T, S> {
        StrideCursor {
            ptr: self.ptr,
            stride: self.stride,
            #[cfg(debug_assertions)]
            pos: self.pos,
            #[cfg(debug_assertions)]
            len: self.len,
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::ptr::NonNull;

    use stride_dim::{Const, Dyn};

    use super::{StrideCursor, StrideCursorMut};

    const DATA: [i32; 9] = [0, 10, 20, 30, 40, 50, 60, 70, 80];

    fn cursor(data: &[i32; 9]) -> StrideCursor<'_, i32, Const<2>> {
        unsafe { StrideCursor::new(NonNull::from_ref(data).cast(), Const::<2>, 5) }
    }

    #[test]
    fn moves_scale_by_stride() {
        let data = DATA;
        let mut c = cursor(&data);
        assert_eq!(unsafe { *c.get() }, 0);

        c.inc();
        assert_eq!(unsafe { *c.get() }, 20);
        c += 2;
        assert_eq!(unsafe { *c.get() }, 60);
        c -= 1;
        assert_eq!(unsafe { *c.get() }, 40);
        c.dec();
        assert_eq!(unsafe { *c.get() }, 20);

        assert_eq!(unsafe { *(c + 3).get() }, 80);
        assert_eq!(unsafe { *(3isize + c - 1).get() }, 60);
        assert_eq!(unsafe { *c.get_at(-1) }, 0);
    }

    #[test]
    fn difference_counts_logical_positions() {
        let data = DATA;
        let begin = cursor(&data);
        let end = begin + 5;
        assert_eq!(end - begin, 5);
        assert_eq!(begin - end, -5);
        assert_eq!((begin + 2).distance(&begin), 2);
    }

    #[test]
    fn ordering_follows_address() {
        let data = DATA;
        let begin = cursor(&data);
        let mid = begin + 2;
        assert!(begin < mid);
        assert!(mid >= begin);
        assert_eq!(mid, begin + 1 + 1);
        assert_ne!(mid, begin);
    }

    #[test]
    fn stride_independent_of_source() {
        let data = DATA;
        let c = unsafe { StrideCursor::new(NonNull::from_ref(&data).cast::<i32>(), Dyn(4), 3) };
        assert_eq!(c.stride(), 4);
        assert_eq!(unsafe { *c.get_at(2) }, 80);
    }

    #[test]
    fn mutable_cursor_writes() {
        let mut data = DATA;
        let mut c = unsafe {
            StrideCursorMut::new(NonNull::from_mut(&mut data).cast::<i32>(), Const::<3>, 3)
        };
        unsafe { *c.get_at(2) = -1 };
        c += 1;
        unsafe { *c.get() = -2 };
        assert_eq!(unsafe { *c.as_const().get() }, -2);
        assert_eq!(data, [0, 10, 20, -2, 40, 50, -1, 70, 80]);
    }

    #[test]
    fn zero_sized_distance_is_zero() {
        let data = [(); 4];
        let begin = unsafe { StrideCursor::new(NonNull::from_ref(&data).cast::<()>(), Dyn(1), 4) };
        assert_eq!((begin + 3) - begin, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "tried to dereference a strided cursor")]
    fn debug_dereference_out_of_view() {
        let data = DATA;
        let end = cursor(&data) + 5;
        let _ = unsafe { end.get() };
    }

    #[test]
    fn is_sync_send() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<StrideCursor<'_, i32>>();
        is_sync::<StrideCursor<'_, i32>>();
        is_send::<StrideCursorMut<'_, i32>>();
        is_sync::<StrideCursorMut<'_, i32>>();
    }
}
