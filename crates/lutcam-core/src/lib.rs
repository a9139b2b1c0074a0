//! # lutcam-core
//!
//! Core types for the lutcam color-grading pipeline.
//!
//! This crate provides the foundational types used throughout the lutcam
//! workspace:
//!
//! - [`Frame`] - Immutable RGBA frame buffer shared between pipeline stages
//! - [`Orientation`] - Rotation/mirror state attached to captured frames
//! - Rec.709 luminance helpers
//!
//! ## Design Philosophy
//!
//! A [`Frame`] is produced once by a capture source and never mutated in
//! place; every pipeline stage reads it and produces a new derived frame.
//! The pixel buffer lives behind an [`std::sync::Arc`], so handing a frame
//! to a display sink or a capture path is a pointer copy, not a pixel copy.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. All other lutcam crates depend on `lutcam-core`:
//!
//! ```text
//! lutcam-core (this crate)
//!    ^
//!    |
//!    +-- lutcam-lut (cube parsing, color cubes)
//!    +-- lutcam-ops (per-frame image operations)
//!    +-- lutcam-io (still image encode/decode)
//!    +-- lutcam-pipeline (frame session)
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod frame;
pub mod pixel;

pub use error::{CoreError, CoreResult};
pub use frame::{Frame, Orientation, CHANNELS};
pub use pixel::{luminance_rec709, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
