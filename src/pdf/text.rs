use lopdf::{Object, StringFormat};

/// Decode a PDF text string (outline title, destination name).
///
/// UTF-16BE with a byte-order mark per the PDF spec, otherwise UTF-8 if the
/// bytes happen to be valid, otherwise a latin-1 view (a superset of
/// PDFDocEncoding's printable range) so nothing is dropped.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a string as a PDF text string object.
///
/// ASCII titles stay literal; anything else becomes UTF-16BE with BOM,
/// which every conforming reader accepts.
pub fn encode_text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::string_literal(s);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf16be_with_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Einführung".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text_string(&bytes), "Einführung");
    }

    #[test]
    fn decodes_plain_utf8() {
        assert_eq!(decode_text_string("第1章".as_bytes()), "第1章");
        assert_eq!(decode_text_string(b"Chapter 1"), "Chapter 1");
    }

    #[test]
    fn falls_back_to_latin1() {
        // 0xE9 alone is invalid UTF-8 but is 'é' in latin-1.
        assert_eq!(decode_text_string(&[b'R', 0xE9, b's']), "Rés");
    }

    #[test]
    fn encode_decode_round_trip() {
        for title in ["Plain", "Einführung", "第1章 绪论", ""] {
            let obj = encode_text_string(title);
            if let Object::String(bytes, _) = obj {
                assert_eq!(decode_text_string(&bytes), title);
            } else {
                panic!("expected string object");
            }
        }
    }
}
