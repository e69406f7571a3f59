//! Geometry checks and the methods shared by [`View`](crate::View) and
//! [`ViewMut`](crate::ViewMut).

use stride_dim::Dim;

use crate::GeometryError;

/// Resolves `count` and `stride` into the dimensions `E` and `S`.
///
/// Storage bounds are checked separately by [`check_bounds`].
pub(crate) fn checked_geometry<T, E: Dim, S: Dim>(
    count: usize,
    stride: usize,
) -> Result<(E, S), GeometryError> {
    const {
        assert!(
            !matches!(S::FIXED, Some(0)),
            "a fixed stride must be non-zero"
        );
    }

    if stride == 0 {
        return Err(GeometryError::ZeroStride);
    }
    let Some(extent) = E::new(count) else {
        return Err(GeometryError::ExtentMismatch {
            fixed: E::FIXED.unwrap_or(count),
            actual: count,
        });
    };
    let Some(step) = S::new(stride) else {
        return Err(GeometryError::StrideMismatch {
            fixed: S::FIXED.unwrap_or(stride),
            actual: stride,
        });
    };
    check_span::<T>(count, stride)?;
    Ok((extent, step))
}

/// Checks that `count` elements `stride` apart fit in `len` elements of storage.
pub(crate) fn check_bounds(count: usize, stride: usize, len: usize) -> Result<(), GeometryError> {
    if count == 0 {
        return Ok(());
    }
    match (count - 1).checked_mul(stride) {
        Some(last) if last < len => Ok(()),
        _ => Err(GeometryError::OutOfBounds { count, stride, len }),
    }
}

/// Checks that the position one past the last element, `count * stride`
/// elements away, is at most `isize::MAX` bytes from the first one.
///
/// Cursors move by signed offsets, so this keeps `begin() <= end()`. Zero-sized
/// elements count as one byte.
pub(crate) fn check_span<T>(count: usize, stride: usize) -> Result<(), GeometryError> {
    let bytes = count
        .checked_mul(stride)
        .and_then(|elems| elems.checked_mul(size_of::<T>().max(1)));
    match bytes {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
        _ => Err(GeometryError::SpanOverflow { count, stride }),
    }
}

#[inline]
#[track_caller]
pub(crate) fn check_sub_len(requested: usize, len: usize) {
    if requested > len {
        GeometryError::SubViewTooLong { requested, len }.handle_error();
    }
}

#[inline]
#[track_caller]
pub(crate) fn check_index(index: usize, len: usize) {
    if index >= len {
        GeometryError::IndexOutOfRange { index, len }.handle_error();
    }
}

/// Returns the length and stride of every `factor`-th element of a view of
/// `len` elements `stride` apart.
#[inline]
#[track_caller]
pub(crate) fn skipped_geometry<T>(len: usize, stride: usize, factor: usize) -> (usize, usize) {
    if factor == 0 {
        GeometryError::ZeroSkip.handle_error();
    }
    let Some(stride) = stride.checked_mul(factor) else {
        GeometryError::StrideOverflow { stride, factor }.handle_error();
    };
    let len = len.div_ceil(factor);
    if let Err(e) = check_span::<T>(len, stride) {
        e.handle_error();
    }
    (len, stride)
}

#[inline]
#[track_caller]
pub(crate) fn resolve_extent<E: Dim>(count: usize) -> E {
    match E::new(count) {
        Some(extent) => extent,
        None => GeometryError::ExtentMismatch {
            fixed: E::FIXED.unwrap_or(count),
            actual: count,
        }
        .handle_error(),
    }
}

#[inline]
#[track_caller]
pub(crate) fn resolve_stride<S: Dim>(stride: usize) -> S {
    match S::new(stride) {
        Some(step) => step,
        None => GeometryError::StrideMismatch {
            fixed: S::FIXED.unwrap_or(stride),
            actual: stride,
        }
        .handle_error(),
    }
}

/// Returns `true` if a sub-view of `count` elements may be taken from extent `E`.
pub(crate) const fn fits<E: Dim>(count: usize) -> bool {
    match E::FIXED {
        Some(extent) => count <= extent,
        None => true,
    }
}

// -----------------------------------------------------------------------------
// Shared methods

macro_rules! impl_view_geometry {
    ($view:ident) => {
        impl<'a, T, E: Dim, S: Dim> $view<'a, T, E, S> {
            /// # Safety
            ///
            /// Every position `i * stride.get()` for `i < extent.get()` must be in
            /// bounds of storage borrowed for `'a` the way this view type borrows.
            #[inline(always)]
            const unsafe fn from_parts(ptr: NonNull<T>, extent: E, stride: S) -> Self {
                Self {
                    ptr,
                    extent,
                    stride,
                    _marker: PhantomData,
                }
            }

            /// Builds the view of `extent` elements starting at logical index `start`.
            ///
            /// # Safety
            ///
            /// The derived positions must all be positions of `self`.
            #[inline]
            unsafe fn derive<E2: Dim, S2: Dim>(
                self,
                start: usize,
                extent: E2,
                stride: S2,
            ) -> $view<'a, T, E2, S2> {
                let ptr = if extent.get() == 0 {
                    self.ptr
                } else {
                    // SAFETY: `start` is a position of `self`.
                    unsafe { self.ptr.add(start * self.stride.get()) }
                };
                // SAFETY: upheld by the caller.
                unsafe { $view::from_parts(ptr, extent, stride) }
            }

            /// Returns the number of elements in the view.
            #[inline(always)]
            pub fn len(&self) -> usize {
                self.extent.get()
            }

            /// Returns `true` if the view has no elements.
            #[inline(always)]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Returns the step, in elements of the storage, between two
            /// adjacent elements of the view.
            #[inline(always)]
            pub fn stride(&self) -> usize {
                self.stride.get()
            }

            /// Returns the extent policy of the view.
            #[inline(always)]
            pub fn extent(&self) -> E {
                self.extent
            }

            /// Returns the stride policy of the view.
            #[inline(always)]
            pub fn stride_dim(&self) -> S {
                self.stride
            }

            /// Returns a pointer to the first element.
            ///
            /// The pointer is dangling if the view is empty.
            #[inline(always)]
            pub const fn as_ptr(&self) -> *const T {
                self.ptr.as_ptr()
            }

            /// Returns the view of the first `count` elements.
            ///
            /// # Panics
            ///
            /// Panics if `count > self.len()`.
            #[track_caller]
            pub fn first(self, count: usize) -> $view<'a, T, Dyn, S> {
                check_sub_len(count, self.len());
                let stride = self.stride;
                // SAFETY: the first `count` positions belong to `self`.
                unsafe { self.derive(0, Dyn(count), stride) }
            }

            /// Returns the view of the last `count` elements.
            ///
            /// # Panics
            ///
            /// Panics if `count > self.len()`.
            #[track_caller]
            pub fn last(self, count: usize) -> $view<'a, T, Dyn, S> {
                let len = self.len();
                check_sub_len(count, len);
                let stride = self.stride;
                // SAFETY: the last `count` positions belong to `self`.
                unsafe { self.derive(len - count, Dyn(count), stride) }
            }

            /// Returns the view without its first `count` elements.
            ///
            /// # Panics
            ///
            /// Panics if `count > self.len()`.
            #[track_caller]
            pub fn drop_first(self, count: usize) -> $view<'a, T, Dyn, S> {
                let len = self.len();
                check_sub_len(count, len);
                self.last(len - count)
            }

            /// Returns the view without its last `count` elements.
            ///
            /// # Panics
            ///
            /// Panics if `count > self.len()`.
            #[track_caller]
            pub fn drop_last(self, count: usize) -> $view<'a, T, Dyn, S> {
                let len = self.len();
                check_sub_len(count, len);
                self.first(len - count)
            }

            /// Returns the view of the first `N` elements, with a fixed extent.
            ///
            /// If the extent of `self` is fixed, `N` larger than it fails to
            /// compile.
            ///
            /// # Panics
            ///
            /// Panics if the extent is dynamic and `N > self.len()`.
            #[track_caller]
            pub fn first_const<const N: usize>(self) -> $view<'a, T, Const<N>, S> {
                const {
                    assert!(
                        fits::<E>(N),
                        "length of sub-view exceeds the fixed extent of the parent view"
                    );
                }
                check_sub_len(N, self.len());
                let stride = self.stride;
                // SAFETY: the first `N` positions belong to `self`.
                unsafe { self.derive(0, Const::<N>, stride) }
            }

            /// Returns the view of the last `N` elements, with a fixed extent.
            ///
            /// Checked like [`first_const`](Self::first_const).
            #[track_caller]
            pub fn last_const<const N: usize>(self) -> $view<'a, T, Const<N>, S> {
                const {
                    assert!(
                        fits::<E>(N),
                        "length of sub-view exceeds the fixed extent of the parent view"
                    );
                }
                let len = self.len();
                check_sub_len(N, len);
                let stride = self.stride;
                // SAFETY: the last `N` positions belong to `self`.
                unsafe { self.derive(len - N, Const::<N>, stride) }
            }

            /// Returns the view without its first `N` elements.
            ///
            /// The extent stays fixed if it was fixed, and dynamic otherwise.
            /// Checked like [`first_const`](Self::first_const).
            #[track_caller]
            pub fn drop_first_const<const N: usize>(self) -> $view<'a, T, E::Trimmed<N>, S> {
                const {
                    assert!(
                        fits::<E>(N),
                        "cannot drop more elements than the fixed extent of the parent view"
                    );
                }
                let len = self.len();
                check_sub_len(N, len);
                let extent = resolve_extent::<E::Trimmed<N>>(len - N);
                let stride = self.stride;
                // SAFETY: positions `N..len` belong to `self`.
                unsafe { self.derive(N, extent, stride) }
            }

            /// Returns the view without its last `N` elements.
            ///
            /// The extent stays fixed if it was fixed, and dynamic otherwise.
            /// Checked like [`first_const`](Self::first_const).
            #[track_caller]
            pub fn drop_last_const<const N: usize>(self) -> $view<'a, T, E::Trimmed<N>, S> {
                const {
                    assert!(
                        fits::<E>(N),
                        "cannot drop more elements than the fixed extent of the parent view"
                    );
                }
                let len = self.len();
                check_sub_len(N, len);
                let extent = resolve_extent::<E::Trimmed<N>>(len - N);
                let stride = self.stride;
                // SAFETY: positions `0..len - N` belong to `self`.
                unsafe { self.derive(0, extent, stride) }
            }

            /// Returns the view of every `factor`-th element, starting with the
            /// first one.
            ///
            /// The result has `ceil(len / factor)` elements and a dynamic stride
            /// of `factor * self.stride()`.
            ///
            /// # Panics
            ///
            /// Panics if `factor` is zero, or if the new stride overflows or
            /// spans more than `isize::MAX` bytes.
            #[track_caller]
            pub fn skip(self, factor: usize) -> $view<'a, T, Dyn, Dyn> {
                let (len, stride) = skipped_geometry::<T>(self.len(), self.stride(), factor);
                // SAFETY: position `i` of the result is position `i * factor` of `self`.
                unsafe { self.derive(0, Dyn(len), Dyn(stride)) }
            }

            /// Returns the view of every `K`-th element, starting with the first one.
            ///
            /// The stride stays fixed if it was fixed, and dynamic otherwise.
            /// `K == 0` fails to compile.
            #[track_caller]
            pub fn skip_const<const K: usize>(self) -> $view<'a, T, Dyn, S::Scaled<K>> {
                const {
                    assert!(K != 0, "skip factor must be non-zero");
                }
                let (len, stride) = skipped_geometry::<T>(self.len(), self.stride(), K);
                let stride = resolve_stride::<S::Scaled<K>>(stride);
                // SAFETY: position `i` of the result is position `i * K` of `self`.
                unsafe { self.derive(0, Dyn(len), stride) }
            }

            /// Splits the view into the first `mid` elements and the rest.
            ///
            /// # Panics
            ///
            /// Panics if `mid > self.len()`.
            #[track_caller]
            pub fn split_at(self, mid: usize) -> ($view<'a, T, Dyn, S>, $view<'a, T, Dyn, S>) {
                let len = self.len();
                check_sub_len(mid, len);
                let (ptr, stride) = (self.ptr, self.stride);
                let tail = if mid == len {
                    ptr
                } else {
                    // SAFETY: `mid < len` is a position of `self`.
                    unsafe { ptr.add(mid * stride.get()) }
                };
                // SAFETY: the two halves are disjoint ranges of positions of `self`.
                unsafe {
                    (
                        $view::from_parts(ptr, Dyn(mid), stride),
                        $view::from_parts(tail, Dyn(len - mid), stride),
                    )
                }
            }

            /// Reinterprets the geometry types of the view.
            ///
            /// Each target dimension must be dynamic, or fixed to the value the
            /// source dimension is fixed to. Anything else fails to compile.
            #[inline]
            pub fn cast<E2: Dim, S2: Dim>(self) -> $view<'a, T, E2, S2> {
                const {
                    assert!(
                        reinterpretable::<E, E2>() && reinterpretable::<S, S2>(),
                        "target geometry must be dynamic or match the fixed source geometry",
                    );
                }
                let extent = resolve_extent::<E2>(self.len());
                let stride = resolve_stride::<S2>(self.stride());
                // SAFETY: same positions, same storage.
                unsafe { $view::from_parts(self.ptr, extent, stride) }
            }

            /// Forgets all compile-time geometry.
            #[inline]
            pub fn into_dyn(self) -> $view<'a, T, Dyn, Dyn> {
                self.cast()
            }
        }
    };
}

pub(crate) use impl_view_geometry;
