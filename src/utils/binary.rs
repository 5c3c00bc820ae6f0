/// Number of leading bytes inspected for NUL bytes.
pub const SNIFF_LEN: usize = 8192;

/// Checks if the buffer looks like binary data.
/// Uses a simple heuristic: looks for null bytes in the first 8KB.
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(SNIFF_LEN);
    content[..check_len].contains(&0)
}

/// Decodes file bytes as UTF-8 text, rejecting binary content.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, String> {
    if is_binary(&bytes) {
        return Err("file looks binary (contains NUL bytes)".to_string());
    }
    String::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {}", e.utf8_error()))
}
