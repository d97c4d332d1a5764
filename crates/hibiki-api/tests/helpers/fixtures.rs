//! Test fixtures: small audio-like blobs.

/// An ID3v2 header followed by one silent MPEG-1 Layer III frame header and padding.
pub fn create_minimal_mp3() -> Vec<u8> {
    let mut mp3 = Vec::new();
    mp3.extend_from_slice(b"ID3");
    mp3.extend_from_slice(&[0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    mp3.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
    mp3.extend(std::iter::repeat(0u8).take(413));
    mp3
}

/// Deterministic pseudo-random bytes, large enough to span several stream chunks.
pub fn create_large_payload(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        })
        .collect()
}
