use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{error::Result, types::Charset};

/// RFC 2047 limit for a single encoded word.
const MAX_WORD_LEN: usize = 75;

/// Encode `text` as one or more `B` encoded words.
///
/// Pure ASCII text is returned unchanged. Longer text is split on character
/// boundaries into several words, separated by a space.
pub fn encode_word(text: &str, charset: Charset) -> Result<String> {
    if text.is_ascii() {
        return Ok(text.to_string());
    }

    let prefix = format!("=?{}?B?", charset.name());
    let payload = MAX_WORD_LEN - prefix.len() - 2;
    let budget = payload / 4 * 3;

    let mut words: Vec<String> = Vec::new();
    let mut chunk: Vec<u8> = Vec::with_capacity(budget);
    let mut encoded_char: Vec<u8> = Vec::with_capacity(4);

    for ch in text.chars() {
        encoded_char.clear();
        charset.encode_char(ch, &mut encoded_char)?;

        if !chunk.is_empty() && chunk.len() + encoded_char.len() > budget {
            words.push(format!("{}{}?=", prefix, STANDARD.encode(&chunk)));
            chunk.clear();
        }

        chunk.extend_from_slice(&encoded_char);
    }

    if !chunk.is_empty() {
        words.push(format!("{}{}?=", prefix, STANDARD.encode(&chunk)));
    }

    Ok(words.join(" "))
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::error::ErrorKind;

    fn decode(encoded: &str) -> String {
        let raw = format!("To: {}", encoded);
        let (header, _) = mailparse::parse_header(raw.as_bytes()).unwrap();

        header.get_value()
    }

    #[test]
    fn ascii_is_untouched() {
        assert_eq!(encode_word("Jane Doe", Charset::Utf8).unwrap(), "Jane Doe");
    }

    #[test]
    fn utf8_word() {
        let encoded = encode_word("Jürgen", Charset::Utf8).unwrap();

        assert_eq!(encoded, "=?UTF-8?B?SsO8cmdlbg==?=");
        assert_eq!(decode(&encoded), "Jürgen");
    }

    #[test]
    fn latin1_word() {
        let encoded = encode_word("José", Charset::Latin1).unwrap();

        assert_eq!(encoded, "=?ISO-8859-1?B?Sm9z6Q==?=");
        assert_eq!(decode(&encoded), "José");
    }

    #[test]
    fn long_names_are_split() {
        let name = "Ünïcödé ".repeat(12).trim_end().to_string();
        let encoded = encode_word(&name, Charset::Utf8).unwrap();

        let words: Vec<&str> = encoded.split(' ').collect();
        assert!(words.len() > 1);
        assert!(words.iter().all(|word| word.len() <= MAX_WORD_LEN));
        assert_eq!(decode(&encoded), name);
    }

    #[test]
    fn unrepresentable_character() {
        let error = encode_word("Jürgen", Charset::Ascii).unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::Encoding));
    }
}
