use tracing::trace;

/// Total frame length: marker (2) + five u16 fields (10) + terminator (1).
pub const FRAME_LEN: usize = 13;

/// Start marker bytes: "#l" (0x23 0x6C).
pub const START_MARKER: [u8; 2] = [0x23, 0x6C];

/// Terminator byte closing every frame.
pub const TERMINATOR: u8 = 0xA5;

/// A decoded telemetry frame from a lap-timing transponder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Message type discriminator (observed as 0x014C on lap frames).
    pub message_type: u16,
    /// Lap number as counted by the transponder itself.
    pub lap_number: u16,
    /// Numeric identifier distinguishing one transponder/rider from another.
    pub device_id: u16,
    /// Reserved field with unconfirmed semantics. Carried verbatim, never
    /// interpreted.
    pub aux: u16,
    /// Cumulative-seconds field as reported by the device. Untrusted; kept
    /// for diagnostic display only and never used in lap arithmetic.
    pub cumulative_seconds: u16,
}

/// Decode a raw notification buffer into a [`Frame`].
///
/// Wire format:
/// ```text
/// ┌────────────┬─────────┬─────────┬─────────┬─────────┬────────────┬────────────┐
/// │ Marker (2B)│ MsgType │ LapNum  │ DevId   │ Aux     │ CumSeconds │ Term (1B)  │
/// │ 0x23 0x6C  │ (2B BE) │ (2B BE) │ (2B BE) │ (2B BE) │ (2B LE)    │ 0xA5       │
/// │ "#l"       │         │         │         │         │            │            │
/// └────────────┴─────────┴─────────┴─────────┴─────────┴────────────┴────────────┘
/// ```
///
/// Returns `None` for any buffer that is not exactly 13 bytes carrying the
/// expected marker and terminator. `None` is an ordinary outcome, not an
/// error: the transport delivers plenty of non-telemetry notifications.
pub fn decode_frame(buf: &[u8]) -> Option<Frame> {
    if buf.len() != FRAME_LEN || buf[0..2] != START_MARKER || buf[FRAME_LEN - 1] != TERMINATOR {
        trace!(len = buf.len(), "buffer is not a telemetry frame");
        return None;
    }

    Some(Frame {
        message_type: u16_be(buf, 2),
        lap_number: u16_be(buf, 4),
        device_id: u16_be(buf, 6),
        aux: u16_be(buf, 8),
        // Little-endian, unlike every other field. Observed protocol quirk;
        // preserved exactly until the real semantics are confirmed.
        cumulative_seconds: u16_le(buf, 10),
    })
}

fn u16_be(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

fn u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}
