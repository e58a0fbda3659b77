//! Decoder for the transponder's short binary telemetry frame.
//!
//! Every notification from the transponder is a fixed 13-byte buffer:
//! - A 2-byte start marker ("#l") for frame recognition
//! - Five 16-bit fields at fixed offsets
//! - A 1-byte terminator (0xA5)
//!
//! Decoding never fails with an error: a buffer either is a frame or it
//! isn't. Anything else the transport delivers is reported upstream as a
//! raw diagnostic, not handled here.

pub mod codec;

pub use codec::{decode_frame, Frame, FRAME_LEN, START_MARKER, TERMINATOR};
