//! Client session persistence: saving and restoring in-progress work.

pub mod handlers;
pub mod store;
