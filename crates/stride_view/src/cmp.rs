//! Element-wise equality.
//!
//! Two views are equal when they have the same length and equal elements. Their
//! geometry types and strides do not take part in the comparison.

use stride_dim::Dim;

use crate::{View, ViewMut};

#[inline]
fn elements_eq<'a, 'b, T, U>(
    lhs: impl ExactSizeIterator<Item = &'a T>,
    rhs: impl ExactSizeIterator<Item = &'b U>,
) -> bool
where
    T: PartialEq<U> + 'a,
    U: 'b,
{
    lhs.len() == rhs.len() && lhs.zip(rhs).all(|(a, b)| a == b)
}

macro_rules! impl_view_eq {
    ($view:ident) => {
        impl<T, U, E, S, E2, S2> PartialEq<View<'_, U, E2, S2>> for $view<'_, T, E, S>
        where
            T: PartialEq<U>,
            E: Dim,
            S: Dim,
            E2: Dim,
            S2: Dim,
        {
            #[inline]
            fn eq(&self, other: &View<'_, U, E2, S2>) -> bool {
                elements_eq(self.iter(), other.iter())
            }
        }

        impl<T, U, E, S, E2, S2> PartialEq<ViewMut<'_, U, E2, S2>> for $view<'_, T, E, S>
        where
            T: PartialEq<U>,
            E: Dim,
            S: Dim,
            E2: Dim,
            S2: Dim,
        {
            #[inline]
            fn eq(&self, other: &ViewMut<'_, U, E2, S2>) -> bool {
                elements_eq(self.iter(), other.iter())
            }
        }

        impl<T, U, E: Dim, S: Dim> PartialEq<[U]> for $view<'_, T, E, S>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &[U]) -> bool {
                elements_eq(self.iter(), other.iter())
            }
        }

        impl<T, U, E: Dim, S: Dim> PartialEq<&[U]> for $view<'_, T, E, S>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &&[U]) -> bool {
                elements_eq(self.iter(), other.iter())
            }
        }

        impl<T, U, E: Dim, S: Dim, const N: usize> PartialEq<[U; N]> for $view<'_, T, E, S>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &[U; N]) -> bool {
                elements_eq(self.iter(), other.iter())
            }
        }

        impl<T: Eq, E: Dim, S: Dim> Eq for $view<'_, T, E, S> {}
    };
}

impl_view_eq!(View);
impl_view_eq!(ViewMut);

#[cfg(test)]
mod tests {
    use stride_dim::{Const, Dyn};

    use crate::{View, ViewMut};

    #[test]
    fn equal_across_geometry() {
        let data = [1, 9, 2, 9, 3];
        let strided = View::<'_, i32, Dyn, Dyn>::new(&data, 3, 2);
        let fixed = View::<'_, i32, Const<3>, Const<2>>::new(&data, 3, 2);

        let mut packed = [1, 2, 3];
        let packed = ViewMut::from_array(&mut packed);

        assert_eq!(strided, fixed);
        assert_eq!(strided, packed);
        assert_eq!(packed, fixed);
        assert_eq!(packed, [1, 2, 3]);
        assert_eq!(packed, &[1, 2, 3][..]);
    }

    #[test]
    fn length_or_element_differences() {
        let data = [1, 2, 3, 4];
        let v = View::<i32>::from_slice(&data);

        assert_ne!(v, v.first(3));
        assert_ne!(v, [1, 2, 3, 5]);
        assert_ne!(v.skip(2), [1, 2]);
        assert_eq!(v.first(0), [0; 0]);
        assert_eq!(
            View::<'_, i32>::from_slice(&[]),
            View::<'_, i32, Dyn, Dyn>::new(&[], 0, 7)
        );
    }

    #[test]
    fn mixed_element_types() {
        struct Id(u32);

        impl PartialEq<u32> for Id {
            fn eq(&self, other: &u32) -> bool {
                self.0 == *other
            }
        }

        let ids = [Id(4), Id(8)];
        let raw = [4u32, 0, 8];
        let v = View::<Id>::from_slice(&ids);
        assert!(v == View::<'_, u32, Dyn, Dyn>::new(&raw, 2, 2));
        assert!(v == [4u32, 8]);
    }
}
