//! Library side of the `amr` binary: logging setup and the end-to-end run.

pub mod logging;
pub mod pipeline;
pub mod types;
