// src/utils.rs
use std::fmt::Write;

use crate::error::TransportError;

const COLOR_ESCAPE: u8 = 0x1c;

// An escape is either `\x1c` plus one character code, or `\x1c[name]` with a
// non-empty named color. An escape followed by a newline or by nothing is
// kept as-is.
pub fn strip_color_codes(raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != COLOR_ESCAPE {
            out.push(raw[i]);
            i += 1;
            continue;
        }

        let named_end = match raw.get(i + 1) {
            Some(b'[') => raw[i + 2..]
                .iter()
                .position(|&b| b == b']')
                .filter(|&len| len > 0)
                .map(|len| i + 2 + len + 1),
            _ => None,
        };
        match (named_end, raw.get(i + 1)) {
            (Some(end), _) => i = end,
            (None, Some(&next)) if next != b'\n' => i += 2,
            _ => {
                out.push(raw[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Splits `host[:port]`, falling back to `default_port`.
pub fn split_host_port(address: &str, default_port: u16) -> Result<(String, u16), TransportError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(TransportError::InvalidAddress(address.to_string()));
    }
    match address.rsplit_once(':') {
        None => Ok((address.to_string(), default_port)),
        Some((host, _)) if host.is_empty() || host.contains(':') => {
            Err(TransportError::InvalidAddress(address.to_string()))
        }
        Some((host, port)) => port
            .parse::<u16>()
            .map(|port| (host.to_string(), port))
            .map_err(|_| TransportError::InvalidAddress(address.to_string())),
    }
}

pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "{:02X}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_character_codes() {
        assert_eq!(strip_color_codes(b"\x1cgGreen\x1c-Plain"), "GreenPlain");
    }

    #[test]
    fn strips_named_codes() {
        assert_eq!(strip_color_codes(b"\x1c[Gold]King\x1c[d5]Arthur"), "KingArthur");
    }

    #[test]
    fn empty_brackets_only_drop_the_bracket() {
        assert_eq!(strip_color_codes(b"\x1c[]x"), "]x");
    }

    #[test]
    fn unterminated_bracket_drops_one_character() {
        assert_eq!(strip_color_codes(b"\x1c[abc"), "abc");
    }

    #[test]
    fn dangling_escape_is_kept() {
        assert_eq!(strip_color_codes(b"name\x1c"), "name\x1c");
        assert_eq!(strip_color_codes(b"a\x1c\nb"), "a\x1c\nb");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(strip_color_codes(b"Player"), "Player");
        assert_eq!(strip_color_codes(b""), "");
    }

    #[test]
    fn host_port_split() {
        assert_eq!(split_host_port("example.org:10667", 10666).unwrap(), ("example.org".into(), 10667));
        assert_eq!(split_host_port("10.0.0.1", 10666).unwrap(), ("10.0.0.1".into(), 10666));
        assert!(split_host_port("host:port", 10666).is_err());
        assert!(split_host_port(":10666", 10666).is_err());
        assert!(split_host_port("::1", 10666).is_err());
        assert!(split_host_port("  ", 10666).is_err());
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(hex_bytes(&[0xC7, 0x00, 0x0a]), "C7 00 0A");
        assert_eq!(hex_bytes(&[]), "");
    }
}
