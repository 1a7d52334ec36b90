//! Base-36 item identifiers.
//!
//! Items are keyed by a plain `u64` internally. Users only ever see and type
//! the compact base-36 form (`0-9a-z`).

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode an id as lowercase base-36.
pub fn encode(mut id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while id > 0 {
        buf.push(DIGITS[(id % 36) as usize]);
        id /= 36;
    }
    buf.reverse();
    // Only ASCII digits were pushed.
    String::from_utf8(buf).unwrap_or_default()
}

/// Decode a user-supplied base-36 id.
///
/// Input is trimmed and case-insensitive. Returns `None` for empty input,
/// non base-36 characters, or values that overflow `u64`; callers treat that
/// as an id that matches nothing.
pub fn decode(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(raw, 36).ok()
}
