//! Output character encodings
//!
//! Markup is pure ASCII, so only text content can fall outside an
//! encoding's repertoire. Such characters are written as decimal numeric
//! character references, which every HTML reader understands.

use std::io::{self, Write};

/// Character encoding of the written document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl OutputEncoding {
    /// Encoding for a name such as "UTF-8", "us-ascii" or "ISO-8859-1"
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "utf8" => Some(Self::Utf8),
            "ascii" | "usascii" => Some(Self::Ascii),
            "latin1" | "iso88591" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Like [`lookup`](Self::lookup), falling back to UTF-8 for unknown names
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(encoding = name, "unknown output encoding, using utf-8");
            Self::Utf8
        })
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "us-ascii",
            Self::Latin1 => "iso-8859-1",
        }
    }

    pub fn can_encode(&self, c: char) -> bool {
        match self {
            Self::Utf8 => true,
            Self::Ascii => c.is_ascii(),
            Self::Latin1 => (c as u32) < 0x100,
        }
    }

    /// Append the encoded form of `text` to `out`
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        if let Self::Utf8 = self {
            out.extend_from_slice(text.as_bytes());
            return;
        }

        for c in text.chars() {
            if self.can_encode(c) {
                out.push(c as u32 as u8);
            } else {
                out.extend_from_slice(format!("&#{};", c as u32).as_bytes());
            }
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out);
        out
    }

    /// Encode `text` straight into a writer
    pub fn write<W: Write>(&self, writer: &mut W, text: &str) -> io::Result<()> {
        match self {
            Self::Utf8 => writer.write_all(text.as_bytes()),
            _ => writer.write_all(&self.encode(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_names() {
        assert_eq!(OutputEncoding::lookup("UTF-8"), Some(OutputEncoding::Utf8));
        assert_eq!(OutputEncoding::lookup("us-ascii"), Some(OutputEncoding::Ascii));
        assert_eq!(OutputEncoding::lookup("ISO-8859-1"), Some(OutputEncoding::Latin1));
        assert_eq!(OutputEncoding::lookup("latin_1"), Some(OutputEncoding::Latin1));
        assert_eq!(OutputEncoding::lookup("koi8-r"), None);
    }

    #[test]
    fn test_unknown_name_falls_back_to_utf8() {
        assert_eq!(OutputEncoding::from_name("klingon"), OutputEncoding::Utf8);
        assert_eq!(OutputEncoding::from_name("ascii").name(), "us-ascii");
    }

    #[test]
    fn test_ascii_uses_character_references() {
        assert_eq!(OutputEncoding::Ascii.encode("caf\u{e9}"), b"caf&#233;".to_vec());
        assert_eq!(OutputEncoding::Ascii.encode("plain"), b"plain".to_vec());
    }

    #[test]
    fn test_latin1_single_bytes() {
        assert_eq!(OutputEncoding::Latin1.encode("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(OutputEncoding::Latin1.encode("\u{20ac}"), b"&#8364;".to_vec());
    }

    #[test]
    fn test_utf8_passes_through() {
        let mut out = Vec::new();
        OutputEncoding::Utf8.write(&mut out, "\u{20ac}5").unwrap();
        assert_eq!(out, "\u{20ac}5".as_bytes());
    }
}
