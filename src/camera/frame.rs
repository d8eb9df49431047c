//! Frame-buffer fill and byte-order helpers.

/// A frame that cannot be copied into the preview buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Source length does not match the destination buffer.
    SizeMismatch { expected: usize, got: usize },
}

/// Copy a captured frame into the preview buffer.
///
/// The length is checked before anything is written: on mismatch the
/// destination is left byte-for-byte untouched and the caller treats
/// the frame as a transient miss.
pub fn copy_into(dst: &mut [u8], src: &[u8]) -> Result<(), FrameError> {
    if src.len() != dst.len() {
        return Err(FrameError::SizeMismatch {
            expected: dst.len(),
            got: src.len(),
        });
    }
    dst.copy_from_slice(src);
    Ok(())
}

/// Swap the two bytes of every 16-bit pixel in place.
///
/// Used when the capture engine's byte order differs from what the
/// panel expects. The buffer length is always even (width × height ×
/// 2 bytes).
pub fn swap_pixel_bytes(buf: &mut [u8]) {
    debug_assert!(buf.len() % 2 == 0);
    for pair in buf.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}
