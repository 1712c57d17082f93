//! Address error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
