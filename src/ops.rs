//! Operators. Each one is a plain struct wrapping its upstream, built by the
//! matching `Observable` method.

pub mod blocking;
pub mod concat;
pub mod subscribe_on;
pub mod zip;
