//! gzworld - Gazebo world generator
//!
//! Library half of the `gzworld` binary: configuration loading and the
//! demonstration world it writes.

pub mod config;
pub mod demo;
