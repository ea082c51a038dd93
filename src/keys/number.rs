use std::fmt::Write;

/// Order-preserving `f64` encoding.
///
/// IEEE-754 big-endian bits with the sign bit flipped for non-negative
/// values and every bit inverted for negatives, rendered as 16 lowercase hex
/// digits. Byte-lexicographic order of the encoding equals numeric order,
/// which is what lets range scans return postings pre-sorted by weight.
pub fn encode_f64(value: f64) -> String {
    let bits = value.to_bits();
    let ordered = if bits >> 63 == 1 { !bits } else { bits ^ (1 << 63) };
    format!("{:016x}", ordered)
}

/// Inverse of [`encode_f64`]. Panics on malformed input: encoded weights are
/// produced exclusively by this module, so a bad one is a programming error.
pub fn decode_f64(encoded: &str) -> f64 {
    let ordered = u64::from_str_radix(encoded, 16)
        .unwrap_or_else(|_| panic!("malformed weight encoding: {:?}", encoded));
    let bits = if ordered >> 63 == 1 {
        ordered ^ (1 << 63)
    } else {
        !ordered
    };
    f64::from_bits(bits)
}

/// Deterministic byte token for a non-string document value: lowercase hex
/// of its canonical JSON encoding. Such documents collapse to this single
/// synthetic token.
pub fn encode_value(value: &serde_json::Value) -> String {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
