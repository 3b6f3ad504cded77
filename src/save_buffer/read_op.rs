use crate::error::SaveError;
use crate::types::*;
use std::ops::Range;

// ─── Helpers ────────────────────────────────────────────────────────────────

#[inline]
pub(crate) fn check_width(width: usize) -> Result<(), SaveError> {
    if width > MAX_VALUE_WIDTH {
        return Err(SaveError::UnsupportedWidth { width });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_range(buf_len: usize, offset: usize, len: usize) -> Result<Range<usize>, SaveError> {
    match offset.checked_add(len) {
        Some(end) if end <= buf_len => Ok(offset..end),
        _ => Err(SaveError::OutOfBounds {
            offset,
            len,
            buf_len,
        }),
    }
}

/// Range of the single byte holding `bit`.
#[inline]
pub(crate) fn flag_range(buf_len: usize, bit: &BitRef) -> Result<Range<usize>, SaveError> {
    match bit.byte_offset() {
        Some(byte) => check_range(buf_len, byte, 1),
        None => Err(SaveError::OutOfBounds {
            offset: bit.offset,
            len: 1,
            buf_len,
        }),
    }
}

/// Little-endian unsigned integer from up to 8 bytes.
#[inline]
pub(crate) fn le_to_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; MAX_VALUE_WIDTH];
    raw[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(raw)
}

pub trait SaveReadable {
    fn data_buf(&self) -> &[u8];

    /// Total byte size of the buffer.
    #[inline]
    fn byte_len(&self) -> usize {
        self.data_buf().len()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Raw bytes
    // ════════════════════════════════════════════════════════════════════════

    /// Borrow `length` bytes at `offset` (zero-copy).
    #[inline]
    fn get_bytes(&self, offset: usize, length: usize) -> Result<&[u8], SaveError> {
        let range = check_range(self.byte_len(), offset, length)?;
        Ok(&self.data_buf()[range])
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scalars
    // ════════════════════════════════════════════════════════════════════════

    /// Unsigned little-endian integer of `length` bytes. A zero length reads as 0.
    #[inline]
    fn get_value(&self, offset: usize, length: usize) -> Result<u64, SaveError> {
        check_width(length)?;
        Ok(le_to_u64(self.get_bytes(offset, length)?))
    }

    /// Bit `bit_index` counted from the low bit of `offset`.
    #[inline]
    fn get_bit(&self, offset: usize, bit_index: usize) -> Result<bool, SaveError> {
        self.get_flag(&BitRef::new(offset, bit_index))
    }

    #[inline]
    fn get_flag(&self, bit: &BitRef) -> Result<bool, SaveError> {
        let range = flag_range(self.byte_len(), bit)?;
        Ok(self.data_buf()[range.start] & bit.mask() != 0)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Composite
    // ════════════════════════════════════════════════════════════════════════

    /// Concatenate the `width`-byte window at each offset, in order, and read
    /// the result as one little-endian integer.
    fn get_composite(&self, offsets: &[usize], width: usize) -> Result<u64, SaveError> {
        let total = offsets.len().saturating_mul(width);
        check_width(total)?;
        let mut raw = [0u8; MAX_VALUE_WIDTH];
        for (i, &offset) in offsets.iter().enumerate() {
            let window = self.get_bytes(offset, width)?;
            raw[i * width..(i + 1) * width].copy_from_slice(window);
        }
        Ok(u64::from_le_bytes(raw))
    }

    /// Read a field the way the form layer describes it.
    #[inline]
    fn get_field(&self, spec: &FieldSpec) -> Result<u64, SaveError> {
        match &spec.field {
            FieldRef::Single(offset) => self.get_value(*offset, spec.width),
            FieldRef::Composite(offsets) => self.get_composite(offsets, spec.width),
        }
    }
}
