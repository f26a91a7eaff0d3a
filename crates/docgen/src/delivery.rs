//! Delivery contract
//!
//! How a generated document reaches the user (direct save, browser download,
//! upload) is the host's business, not the engine's. The engine hands the
//! host an immutable byte buffer and a suggested filename through this one
//! seam.

/// Host-provided delivery of a finished document.
///
/// Implementations receive the buffer by shared reference and must not
/// mutate or retain it beyond the call.
pub trait Deliver {
    type Error;

    /// Persist or offer `bytes` to the user under `filename`.
    fn deliver(&self, bytes: &[u8], filename: &str) -> std::result::Result<(), Self::Error>;
}
