//! Strided views over borrowed storage.
//!
//! A view is a pointer, an extent and a stride: it addresses the elements at
//! `ptr + i * stride` for every `i < extent`. Extent and stride are each either
//! fixed at compile time or stored at runtime, see [`stride_dim`].
//!
//! **View** and **ViewMut**
//!
//! [`View<'a, T, E, S>`] behaves like `&'a [T]` and is `Copy`. [`ViewMut<'a, T, E, S>`]
//! behaves like `&'a mut [T]`; its sub-views consume it, and
//! [`reborrow`](ViewMut::reborrow) yields a shorter-lived copy. [`Span`] is the
//! contiguous case.
//!
//! **Sub-views**
//!
//! `first`, `last`, `drop_first`, `drop_last` and `skip` take runtime counts and
//! return views with a dynamic extent. Their `*_const` counterparts keep as much
//! geometry as possible fixed, and an out-of-range count against a fixed extent
//! is rejected at compile time:
//!
//! ```compile_fail
//! use stride_view::View;
//!
//! let data = [1, 2, 3];
//! let _ = View::from_array(&data).first_const::<4>();
//! ```
//!
//! **Errors**
//!
//! Construction is checked and can be made fallible with `try_new` and
//! `try_from_slice`, which return a [`GeometryError`]. Every other violated
//! precondition panics with the message of the matching error, after logging it
//! through [`log`].
//!
//! Geometry that is wrong in every execution does not build. A fixed zero stride:
//!
//! ```compile_fail
//! use stride_dim::{Const, Dyn};
//! use stride_view::View;
//!
//! let data = [1, 2, 3];
//! let _ = View::<'_, i32, Dyn, Const<0>>::try_new(&data, 3, 0);
//! ```
//!
//! A zero skip factor:
//!
//! ```compile_fail
//! use stride_view::View;
//!
//! let data = [1, 2, 3];
//! let _ = View::<i32>::from_slice(&data).skip_const::<0>();
//! ```
//!
//! A cast between two different fixed geometries:
//!
//! ```compile_fail
//! use stride_dim::Const;
//! use stride_view::View;
//!
//! let data = [1, 2, 3];
//! let _: View<'_, i32, Const<2>> = View::from_array(&data).cast();
//! ```
#![expect(unsafe_code, reason = "Views are built on raw strided pointers.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod cmp;
mod error;
mod geometry;
mod iter;
mod view;
mod view_mut;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::GeometryError;
pub use iter::{Iter, IterMut};
pub use view::{Span, View};
pub use view_mut::ViewMut;
