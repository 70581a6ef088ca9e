//! Utilities shared between the Hiroba binaries and their tests.

pub mod logger;
pub mod time;
