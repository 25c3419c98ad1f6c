//! Batch scoring of many candidate documents against one job description.

pub mod dispatch;
pub mod document;
pub mod extract;
pub mod handlers;
