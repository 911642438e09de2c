//! Shared code between formats
//!
//! Both export targets build the same comrak tree; see [`tree`].

pub(crate) mod tree;
