/// Copies `payload` into `buffer` as a zero-terminated byte string.
///
/// At most `buffer.len() - 1` payload bytes are written, followed by a single
/// `0`. A zero-length buffer is left untouched. Returns the number of payload
/// bytes copied (the terminator is not counted).
///
/// Truncation is byte-exact and does not respect UTF-8 boundaries; the buffer
/// is a raw byte sink, not a `str`.
///
pub fn copy_terminated(payload: &str, buffer: &mut [u8]) -> usize {
    let Some(room) = buffer.len().checked_sub(1) else {
        return 0;
    };

    let copied = payload.len().min(room);
    buffer[..copied].copy_from_slice(&payload.as_bytes()[..copied]);
    buffer[copied] = 0;
    copied
}
