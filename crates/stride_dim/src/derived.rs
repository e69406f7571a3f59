use core::fmt;
use core::marker::PhantomData;

use crate::dim::impl_fixed_dim;
use crate::{Dim, Fixed};

// -----------------------------------------------------------------------------
// Scaled

/// Zero-sized fixed dimension equal to `D * K`.
///
/// Produced by [`Dim::Scaled`] when a fixed stride is skipped by a fixed factor.
///
/// ```
/// use stride_dim::{Const, Dim, Fixed, Scaled};
///
/// assert_eq!(<Scaled<Const<2>, 3> as Fixed>::VALUE, 6);
/// assert_eq!(size_of::<Scaled<Const<2>, 3>>(), 0);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scaled<D, const K: usize>(PhantomData<D>);

impl<D: Fixed, const K: usize> Fixed for Scaled<D, K> {
    const VALUE: usize = match D::VALUE.checked_mul(K) {
        Some(value) => value,
        None => panic!("scaled dimension overflows usize"),
    };
}

impl_fixed_dim!("Scaled", [D: Fixed, const K: usize] Scaled<D, K>);

// -----------------------------------------------------------------------------
// Trimmed

/// Zero-sized fixed dimension equal to `D - N`.
///
/// Produced by [`Dim::Trimmed`] when elements are dropped from a fixed extent.
/// Naming a `Trimmed` whose `N` exceeds `D` fails to compile once its value is
/// used.
///
/// ```
/// use stride_dim::{Const, Fixed, Trimmed};
///
/// assert_eq!(<Trimmed<Const<5>, 2> as Fixed>::VALUE, 3);
/// ```
///
/// ```compile_fail
/// use stride_dim::{Const, Fixed, Trimmed};
///
/// let _ = <Trimmed<Const<2>, 5> as Fixed>::VALUE;
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Trimmed<D, const N: usize>(PhantomData<D>);

impl<D: Fixed, const N: usize> Fixed for Trimmed<D, N> {
    const VALUE: usize = {
        assert!(
            N <= D::VALUE,
            "cannot trim more elements than a fixed extent holds"
        );
        D::VALUE - N
    };
}

impl_fixed_dim!("Trimmed", [D: Fixed, const N: usize] Trimmed<D, N>);

#[cfg(test)]
mod tests {
    use super::{Scaled, Trimmed};
    use crate::{Const, Dim, Dyn, Fixed};
    use std::format;

    #[test]
    fn scaled_stays_fixed() {
        type S = <Const<3> as Dim>::Scaled<4>;
        assert_eq!(<S as Dim>::FIXED, Some(12));
        assert_eq!(S::default().get(), 12);
        assert_eq!(S::new(12), Some(S::default()));
        assert_eq!(S::new(3), None);
        assert_eq!(format!("{}", S::default()), "_12");
    }

    #[test]
    fn scaling_composes() {
        type S = <<Const<2> as Dim>::Scaled<3> as Dim>::Scaled<5>;
        assert_eq!(<S as Fixed>::VALUE, 30);
        assert_eq!(size_of::<S>(), 0);
    }

    #[test]
    fn trimmed_stays_fixed() {
        type E = <Const<5> as Dim>::Trimmed<2>;
        assert_eq!(<E as Dim>::FIXED, Some(3));
        assert_eq!(<Trimmed<Const<5>, 5> as Fixed>::VALUE, 0);
        assert_eq!(format!("{:?}", E::default()), "Trimmed(3)");
    }

    #[test]
    fn dynamic_degrades() {
        assert_eq!(<<Dyn as Dim>::Scaled<3> as Dim>::FIXED, None);
        assert_eq!(<<Dyn as Dim>::Trimmed<3> as Dim>::FIXED, None);
        assert_eq!(<Scaled<Const<1>, 1> as Dim>::FIXED, Some(1));
    }
}
