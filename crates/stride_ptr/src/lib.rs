//! Raw strided cursors used by the view iterators.
//!
//! A cursor is a position in memory plus a step, similar to a C++ random access
//! iterator. Moving it never touches memory; dereferencing it does and is unsafe,
//! because release builds perform no bounds checks.
//!
//! **StrideCursor** and **StrideCursorMut**
//!
//! [`StrideCursor<'a, T, S>`] and [`StrideCursorMut<'a, T, S>`] yield `&'a T`
//! and `&'a mut T`. The stride policy `S` belongs to the cursor itself, so a cursor
//! may carry a compile-time stride even when it was created from runtime geometry.
//!
//! In debug builds each cursor also tracks its logical position within the view it
//! was created for, and dereferencing outside of it panics.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod cursor;

// -----------------------------------------------------------------------------
// Top-level exports

pub use cursor::{StrideCursor, StrideCursorMut};
