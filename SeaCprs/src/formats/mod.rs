//! Container formats

pub mod cprs;
