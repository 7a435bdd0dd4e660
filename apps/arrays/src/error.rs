use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Fatal demo errors
#[derive(Debug, Error)]
pub enum DemoError {
    /// The allocator could not provide the requested buffer
    #[error("failed to allocate {requested} bytes")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    /// Writing demo output failed
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;
