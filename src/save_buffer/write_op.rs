use super::buffer_mut::SaveBufferMut;
use super::read_op::{SaveReadable, check_range, check_width, flag_range};
use crate::error::SaveError;
use crate::types::*;

#[inline]
fn fits(value: u64, width: usize) -> bool {
    width >= MAX_VALUE_WIDTH || value >> (8 * width) == 0
}

#[inline]
fn check_value(value: u64, width: usize) -> Result<(), SaveError> {
    if !fits(value, width) {
        return Err(SaveError::ValueOutOfRange { value, width });
    }
    Ok(())
}

impl SaveBufferMut {
    // ════════════════════════════════════════════════════════════════════════
    // Raw bytes
    // ════════════════════════════════════════════════════════════════════════

    /// Replace exactly `length` bytes at `offset`. The replacement must be
    /// exactly `length` bytes long.
    #[inline]
    pub fn set_bytes(&mut self, offset: usize, length: usize, bytes: &[u8]) -> Result<(), SaveError> {
        if bytes.len() != length {
            return Err(SaveError::LengthMismatch {
                expected: length,
                actual: bytes.len(),
            });
        }
        let range = check_range(self.data_buf.len(), offset, length)?;
        self.data_buf[range].copy_from_slice(bytes);
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scalars
    // ════════════════════════════════════════════════════════════════════════

    /// Write `value` as a `length`-byte little-endian integer.
    #[inline]
    pub fn set_value(&mut self, offset: usize, length: usize, value: u64) -> Result<(), SaveError> {
        check_width(length)?;
        check_value(value, length)?;
        self.set_bytes(offset, length, &value.to_le_bytes()[..length])
    }

    /// Set or clear one bit, leaving the rest of its byte untouched.
    #[inline]
    pub fn set_bit(&mut self, offset: usize, bit_index: usize, bit: bool) -> Result<(), SaveError> {
        self.set_flag(&BitRef::new(offset, bit_index), bit)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: &BitRef, bit: bool) -> Result<(), SaveError> {
        let range = flag_range(self.data_buf.len(), flag)?;
        let byte = &mut self.data_buf[range.start];
        if bit {
            *byte |= flag.mask();
        } else {
            *byte &= !flag.mask();
        }
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Composite
    // ════════════════════════════════════════════════════════════════════════

    /// Split `value` into `width`-byte little-endian chunks and write chunk
    /// `i` to `offsets[i]`. Every window is bounds-checked before any byte
    /// is written.
    pub fn set_composite(&mut self, offsets: &[usize], width: usize, value: u64) -> Result<(), SaveError> {
        let total = offsets.len().saturating_mul(width);
        check_width(total)?;
        check_value(value, total)?;
        for &offset in offsets {
            check_range(self.data_buf.len(), offset, width)?;
        }
        let raw = value.to_le_bytes();
        for (i, &offset) in offsets.iter().enumerate() {
            self.data_buf[offset..offset + width].copy_from_slice(&raw[i * width..(i + 1) * width]);
        }
        Ok(())
    }

    /// Write a field the way the form layer describes it.
    #[inline]
    pub fn set_field(&mut self, spec: &FieldSpec, value: u64) -> Result<(), SaveError> {
        match &spec.field {
            FieldRef::Single(offset) => self.set_value(*offset, spec.width, value),
            FieldRef::Composite(offsets) => self.set_composite(offsets, spec.width, value),
        }
    }

    /// Write `value` and return what was there before.
    pub fn replace_field(&mut self, spec: &FieldSpec, value: u64) -> Result<u64, SaveError> {
        let previous = self.get_field(spec)?;
        self.set_field(spec, value)?;
        Ok(previous)
    }
}
