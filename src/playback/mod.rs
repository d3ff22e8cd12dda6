//! Playback surface state and command choreography
//!
//! The engine never touches real media elements; the frontend pushes
//! `MediaEvent`s in and drains `PlaybackCommand`s out. The controller keeps
//! the primary/support surface state consistent with the rules:
//! - Picture-in-Picture pauses the surface that entered it
//! - exiting fullscreen pauses everything and stops detection
//! - losing page visibility pauses the primary surface
//! - the break trigger swaps primary for support, fullscreen

mod controller;
mod surface;

pub use controller::{ControllerSignal, PlaybackController, RESUME_SETTLE_DELAY_MS};
pub use surface::{MediaEvent, PlaybackCommand, SurfaceId, SurfaceState};
