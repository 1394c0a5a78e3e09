//! Library components for the labrec CLI.

pub mod logging;
pub mod pipeline;
