//! History error types

use thiserror::Error;

use crate::mode::Mode;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Host error: {0}")]
    Host(String),

    #[error("Mode not supported by host: {0}")]
    Unsupported(Mode),

    #[error("Address error: {0}")]
    Address(#[from] waymark_address::AddressError),
}
