#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use stride_dim as dim;
pub use stride_ptr as ptr;
pub use stride_view as view;
