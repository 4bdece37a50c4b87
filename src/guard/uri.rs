use xguard_types::Failure;

/// Characters `decode_uri` leaves percent-encoded.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode percent-escapes the way `decodeURI` does.
///
/// Escapes that decode to a reserved character stay encoded. A `%` without
/// two hex digits after it, or escapes that do not form valid UTF-8, fail
/// with a URI failure; no other kind is produced.
pub fn decode_uri(uri: &str) -> Result<String, Failure> {
    let bytes = uri.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let lead = escaped_byte(bytes, i).ok_or_else(|| malformed(uri))?;
        if lead < 0x80 {
            if RESERVED.contains(&lead) {
                out.extend_from_slice(&bytes[i..i + 3]);
            } else {
                out.push(lead);
            }
            i += 3;
            continue;
        }

        let width = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(malformed(uri)),
        };
        let mut sequence = [0u8; 4];
        sequence[0] = lead;
        i += 3;
        for slot in sequence.iter_mut().take(width).skip(1) {
            if bytes.get(i) != Some(&b'%') {
                return Err(malformed(uri));
            }
            let next = escaped_byte(bytes, i).ok_or_else(|| malformed(uri))?;
            if next & 0xC0 != 0x80 {
                return Err(malformed(uri));
            }
            *slot = next;
            i += 3;
        }
        // Rejects overlong forms, surrogates and code points past U+10FFFF
        let decoded = std::str::from_utf8(&sequence[..width]).map_err(|_| malformed(uri))?;
        out.extend_from_slice(decoded.as_bytes());
    }

    String::from_utf8(out).map_err(|_| malformed(uri))
}

/// Decode `uri`, returning it unchanged if it is malformed.
pub fn safe_decode_uri(uri: &str) -> String {
    match decode_uri(uri) {
        Ok(decoded) => decoded,
        Err(failure) => {
            tracing::error!(kind = %failure.kind, "URI Error: {}", failure.message);
            uri.to_string()
        }
    }
}

fn escaped_byte(bytes: &[u8], percent_at: usize) -> Option<u8> {
    let high = hex_value(*bytes.get(percent_at + 1)?)?;
    let low = hex_value(*bytes.get(percent_at + 2)?)?;
    Some(high << 4 | low)
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

fn malformed(uri: &str) -> Failure {
    Failure::uri("URI malformed").with_input(uri)
}
