//! Progress reporting for solve runs

pub mod reporter;
