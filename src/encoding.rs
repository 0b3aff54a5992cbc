//! Text string decoding.
//!
//! PDF text strings are either UTF-16BE with a byte order mark, UTF-8 with a
//! byte order mark (PDF 2.0), or PDFDocEncoding.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.9.2.2 - Text String Type

/// Decode the bytes of a PDF text string.
///
/// Malformed UTF-16 or UTF-8 sequences are replaced with U+FFFD rather than
/// failing, so a caption can always be produced.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16_pairs: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16_pairs);
    }

    if bytes.len() >= 3 && bytes[..3] == [0xEF, 0xBB, 0xBF] {
        return String::from_utf8_lossy(&bytes[3..]).into_owned();
    }

    bytes
        .iter()
        .filter_map(|&b| pdfdoc_encoding_lookup(b))
        .collect()
}

/// Map a PDFDocEncoding byte to its Unicode character.
///
/// ISO 32000-1:2008, Appendix D.2, Table D.2
pub fn pdfdoc_encoding_lookup(code: u8) -> Option<char> {
    match code {
        0x00..=0x7F => Some(code as char),

        // 128-158 differ from Latin-1
        0x80 => Some('\u{2022}'), // bullet
        0x81 => Some('\u{2020}'), // dagger
        0x82 => Some('\u{2021}'), // daggerdbl
        0x83 => Some('\u{2026}'), // ellipsis
        0x84 => Some('\u{2014}'), // emdash
        0x85 => Some('\u{2013}'), // endash
        0x86 => Some('\u{0192}'), // florin
        0x87 => Some('\u{2044}'), // fraction
        0x88 => Some('\u{2039}'), // guilsinglleft
        0x89 => Some('\u{203A}'), // guilsinglright
        0x8A => Some('\u{2212}'), // minus
        0x8B => Some('\u{2030}'), // perthousand
        0x8C => Some('\u{201E}'), // quotedblbase
        0x8D => Some('\u{201C}'), // quotedblleft
        0x8E => Some('\u{201D}'), // quotedblright
        0x8F => Some('\u{2018}'), // quoteleft
        0x90 => Some('\u{2019}'), // quoteright
        0x91 => Some('\u{201A}'), // quotesinglbase
        0x92 => Some('\u{2122}'), // trademark
        0x93 => Some('\u{FB01}'), // fi
        0x94 => Some('\u{FB02}'), // fl
        0x95 => Some('\u{0141}'), // Lslash
        0x96 => Some('\u{0152}'), // OE
        0x97 => Some('\u{0160}'), // Scaron
        0x98 => Some('\u{0178}'), // Ydieresis
        0x99 => Some('\u{017D}'), // Zcaron
        0x9A => Some('\u{0131}'), // dotlessi
        0x9B => Some('\u{0142}'), // lslash
        0x9C => Some('\u{0153}'), // oe
        0x9D => Some('\u{0161}'), // scaron
        0x9E => Some('\u{017E}'), // zcaron
        0x9F => None,

        0xA0..=0xFF => Some(code as char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii() {
        assert_eq!(decode_text_string(b"Chapter 1"), "Chapter 1");
    }

    #[test]
    fn test_utf16be_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69, 0x04, 0x14];
        assert_eq!(decode_text_string(&bytes), "Hi\u{0414}");
    }

    #[test]
    fn test_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("caf\u{e9}".as_bytes());
        assert_eq!(decode_text_string(&bytes), "caf\u{e9}");
    }

    #[test]
    fn test_pdfdoc_specials() {
        assert_eq!(decode_text_string(&[0x80, 0x20, 0x92]), "\u{2022} \u{2122}");
        assert_eq!(decode_text_string(&[0x41, 0x9F, 0x42]), "AB");
        assert_eq!(decode_text_string(&[0xE9]), "\u{e9}");
    }
}
