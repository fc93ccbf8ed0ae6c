//! Counts the ways a die can be rolled to reach a target sum, with and without regard to order,
//! plus the small bisection, triplet search and KMP prefix table tools that ship with it.

pub mod error;
pub mod faces;
pub mod kmp;
pub mod ordered;
pub mod recursive;
pub mod report;
pub mod sqrt;
pub mod triplets;
pub mod unordered;

pub use error::{CountError, Result};
pub use faces::FaceValueSet;
