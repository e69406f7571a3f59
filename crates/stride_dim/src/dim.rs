use core::fmt;
use core::hash::Hash;

use crate::{Scaled, Trimmed};

pub(crate) mod sealed {
    pub trait Sealed {}
}

// -----------------------------------------------------------------------------
// Dim

/// A geometry dimension, fixed at compile time or stored at runtime.
///
/// Fixed dimensions are zero-sized, so a view whose extent and stride are both
/// fixed is as large as a single pointer.
///
/// This trait is sealed. The implementors are [`Const`], [`Dyn`], [`Scaled`]
/// and [`Trimmed`].
///
/// # Examples
///
/// ```
/// use stride_dim::{Const, Dim, Dyn};
///
/// fn twice<D: Dim>(d: D) -> usize {
///     d.get() * 2
/// }
///
/// assert_eq!(twice(Const::<4>), 8);
/// assert_eq!(twice(Dyn(5)), 10);
/// ```
pub trait Dim:
    sealed::Sealed + Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// `Some(value)` if the dimension is fixed at compile time.
    const FIXED: Option<usize>;

    /// The dimension multiplied by `FACTOR`.
    ///
    /// Fixed for fixed dimensions, [`Dyn`] for `Dyn`.
    type Scaled<const FACTOR: usize>: Dim;

    /// The dimension reduced by `COUNT`.
    ///
    /// Fixed for fixed dimensions, where `COUNT` larger than the value is a
    /// compile error. [`Dyn`] for `Dyn`.
    type Trimmed<const COUNT: usize>: Dim;

    /// Returns the value of the dimension.
    fn get(self) -> usize;

    /// Creates the dimension holding `value`.
    ///
    /// Returns `None` if the dimension is fixed to a different value.
    fn new(value: usize) -> Option<Self>;
}

/// A dimension whose value is known at compile time.
pub trait Fixed: Dim + Default {
    const VALUE: usize;
}

/// Returns `true` if a geometry of dimension `A` may be viewed as dimension `B`.
///
/// That is the case when `B` is dynamic, or when both are fixed to the same value.
///
/// ```
/// use stride_dim::{Const, Dyn, Scaled, reinterpretable};
///
/// assert!(reinterpretable::<Const<6>, Dyn>());
/// assert!(reinterpretable::<Scaled<Const<2>, 3>, Const<6>>());
/// assert!(!reinterpretable::<Dyn, Const<6>>());
/// assert!(!reinterpretable::<Const<5>, Const<6>>());
/// ```
pub const fn reinterpretable<A: Dim, B: Dim>() -> bool {
    match (A::FIXED, B::FIXED) {
        (_, None) => true,
        (Some(a), Some(b)) => a == b,
        (None, Some(_)) => false,
    }
}

macro_rules! impl_fixed_dim {
    ($name:literal, [$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> crate::dim::sealed::Sealed for $ty {}

        impl<$($generics)*> Dim for $ty {
            const FIXED: Option<usize> = Some(<Self as Fixed>::VALUE);

            type Scaled<const FACTOR: usize> = Scaled<Self, FACTOR>;
            type Trimmed<const COUNT: usize> = Trimmed<Self, COUNT>;

            #[inline(always)]
            fn get(self) -> usize {
                <Self as Fixed>::VALUE
            }

            #[inline]
            fn new(value: usize) -> Option<Self> {
                if value == <Self as Fixed>::VALUE {
                    Some(Self::default())
                } else {
                    None
                }
            }
        }

        impl<$($generics)*> fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "_{}", <Self as Fixed>::VALUE)
            }
        }

        impl<$($generics)*> fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple($name).field(&<Self as Fixed>::VALUE).finish()
            }
        }
    };
}

pub(crate) use impl_fixed_dim;

// -----------------------------------------------------------------------------
// Const

/// Zero-sized dimension fixed to `N`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

impl<const N: usize> Fixed for Const<N> {
    const VALUE: usize = N;
}

impl_fixed_dim!("Const", [const N: usize] Const<N>);

// -----------------------------------------------------------------------------
// Dyn

/// Dimension known only at runtime.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct Dyn(pub usize);

impl sealed::Sealed for Dyn {}

impl Dim for Dyn {
    const FIXED: Option<usize> = None;

    type Scaled<const FACTOR: usize> = Dyn;
    type Trimmed<const COUNT: usize> = Dyn;

    #[inline(always)]
    fn get(self) -> usize {
        self.0
    }

    #[inline(always)]
    fn new(value: usize) -> Option<Self> {
        Some(Dyn(value))
    }
}

impl From<usize> for Dyn {
    #[inline]
    fn from(value: usize) -> Self {
        Dyn(value)
    }
}

impl fmt::Display for Dyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Const, Dim, Dyn, reinterpretable};
    use std::format;

    #[test]
    fn const_dimension_is_free() {
        let d = Const::<32>;
        assert_eq!(d.get(), 32);
        assert_eq!(<Const<32> as Dim>::FIXED, Some(32));
        assert_eq!(size_of::<Const<32>>(), 0);
        assert_eq!(format!("{d}"), "_32");
        assert_eq!(format!("{d:?}"), "Const(32)");
    }

    #[test]
    fn dynamic_dimension_stores_value() {
        let d: Dyn = 17usize.into();
        assert_eq!(d.get(), 17);
        assert_eq!(<Dyn as Dim>::FIXED, None);
        assert_eq!(size_of::<Dyn>(), size_of::<usize>());
        assert_eq!(format!("{d}"), "17");
    }

    #[test]
    fn new_checks_fixed_value() {
        assert_eq!(Const::<8>::new(8), Some(Const::<8>));
        assert_eq!(Const::<8>::new(7), None);
        assert_eq!(Dyn::new(7), Some(Dyn(7)));
    }

    #[test]
    fn reinterpret_rules() {
        assert!(reinterpretable::<Dyn, Dyn>());
        assert!(reinterpretable::<Const<3>, Dyn>());
        assert!(reinterpretable::<Const<3>, Const<3>>());
        assert!(!reinterpretable::<Const<3>, Const<4>>());
        assert!(!reinterpretable::<Dyn, Const<3>>());
    }
}
