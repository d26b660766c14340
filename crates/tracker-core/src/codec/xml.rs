//! Escaping for values written into XML exports.
//!
//! XML 1.0 cannot carry most control characters, lone surrogates, or the
//! non-characters `U+FFFE`/`U+FFFF`, even as character references. Values
//! that may contain them are encoded with `\uXXXX` sequences before being
//! written and decoded again on import. The backslash itself is encoded
//! so that decoding is unambiguous.

/// Whether `c` may appear in an XML 1.0 document.
///
/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Encode backslashes and XML-invalid characters as `\uXXXX`.
///
/// Characters outside the Basic Multilingual Plane are valid XML and are
/// passed through unchanged, so every encoded value fits in four hex digits.
pub fn unicode_encode(input: &str) -> String {
    if !input.chars().any(needs_encoding) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        if needs_encoding(c) {
            out.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverse [`unicode_encode`].
///
/// Any `\u` not followed by exactly four hex digits, or whose value is not
/// a scalar value, is left in the output as written.
pub fn unicode_decode(input: &str) -> String {
    if !input.contains("\\u") {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos + 2..];
        match decode_hex4(candidate) {
            Some(c) => {
                out.push(c);
                rest = &candidate[4..];
            }
            None => {
                out.push_str("\\u");
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Encode a value for XML element or attribute content: unicode-encode
/// first, then replace the five predefined entities.
pub fn escape_xml_text(input: &str) -> String {
    let encoded = unicode_encode(input);
    let mut out = String::with_capacity(encoded.len());
    for c in encoded.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn needs_encoding(c: char) -> bool {
    c == '\\' || !is_valid_xml_char(c)
}

fn decode_hex4(s: &str) -> Option<char> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    char::from_u32(value)
}
