//! Integration tests for the lutcam crates.
//!
//! End-to-end flows across crate boundaries: parse a LUT from disk,
//! register it, build a transform, run frames through the session,
//! capture and decode the result.
