//! Fixed-width big-endian integer conversions.
//!
//! Callers guarantee the value fits the field; range checks (such as the
//! 65535-byte string limit) live with the encoders that pick the width.
//!
//! AMF0 itself only uses 16- and 32-bit fields. The 24-bit pair is public for
//! code framing AMF0 bodies in RTMP, whose message headers carry 24-bit
//! lengths and timestamps.

pub fn to_be16(n: u16) -> [u8; 2] {
    n.to_be_bytes()
}

/// Low 24 bits of `n`, most significant first, as in an RTMP message length.
pub fn to_be24(n: u32) -> [u8; 3] {
    let [_, a, b, c] = n.to_be_bytes();
    [a, b, c]
}

pub fn to_be32(n: u32) -> [u8; 4] {
    n.to_be_bytes()
}

pub fn from_be16(b: [u8; 2]) -> u16 {
    u16::from_be_bytes(b)
}

pub fn from_be24(b: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, b[0], b[1], b[2]])
}

pub fn from_be32(b: [u8; 4]) -> u32 {
    u32::from_be_bytes(b)
}
