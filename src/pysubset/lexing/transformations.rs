//! Token stream transformations applied after scanning.

pub mod block_filter;
