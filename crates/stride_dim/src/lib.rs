//! Geometry values that are either fixed at compile time or stored at runtime.
//!
//! A strided view has two geometry dimensions, its extent and its stride. Each one
//! is described by a type implementing [`Dim`]:
//!
//! **Const** and **Dyn**
//!
//! [`Const<N>`] is zero-sized and always yields `N`. [`Dyn`] stores one `usize`.
//! Both are read through [`Dim::get`], so code generic over `D: Dim` has the same
//! call syntax for either case.
//!
//! **Scaled** and **Trimmed**
//!
//! Stable Rust cannot name `Const<{N * K}>` for generic `N`, so derived fixed
//! dimensions are spelled as type constructors instead: [`Scaled<D, K>`] is
//! `D * K` and [`Trimmed<D, N>`] is `D - N`. Both are zero-sized and their
//! values are evaluated at compile time. `Dyn` maps to `Dyn` under both, which is
//! how geometry degrades to dynamic once a runtime value is involved.
//!
//! ```
//! use stride_dim::{Const, Dim, Dyn};
//!
//! type Stride = <Const<2> as Dim>::Scaled<3>;
//! assert_eq!(<Stride as Dim>::FIXED, Some(6));
//!
//! type Runtime = <Dyn as Dim>::Scaled<3>;
//! assert_eq!(<Runtime as Dim>::FIXED, None);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod derived;
mod dim;

// -----------------------------------------------------------------------------
// Top-level exports

pub use derived::{Scaled, Trimmed};
pub use dim::{Const, Dim, Dyn, Fixed, reinterpretable};
