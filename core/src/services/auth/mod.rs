//! Authentication gate module
//!
//! Turns a raw bearer credential into a typed [`CallerContext`]. Knows
//! nothing about HTTP; the presentation layer extracts the credential and
//! maps failures to status codes.

mod gate;

#[cfg(test)]
mod tests;

pub use gate::{AuthGate, CallerContext, TokenValidator};
