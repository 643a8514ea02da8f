use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Pads a Base64 string with `=` up to the next multiple of 4.
pub fn pad_base64(input: &str) -> String {
    let mut padded = input.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        padded.push_str(&"=".repeat(4 - rem));
    }
    padded
}

/// Decodes a standard Base64 string into raw bytes.
///
/// Line breaks and surrounding whitespace are ignored, which lets a
/// subscription body wrapped at 76 columns decode in one piece.
pub fn base64_decode_bytes(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();
    general_purpose::STANDARD.decode(cleaned)
}
