use crate::error::SaveError;
use crate::types::{ChecksumRegion, WORD_SIZE};
use std::ops::Range;

// ─── Checksum ───────────────────────────────────────────────────────────────

#[inline]
fn region_bytes<'a>(buf: &'a [u8], region: &ChecksumRegion) -> Result<&'a [u8], SaveError> {
    region
        .end()
        .and_then(|end| buf.get(region.start..end))
        .ok_or(SaveError::OutOfBounds {
            offset: region.start,
            len: region.word_count.saturating_mul(WORD_SIZE),
            buf_len: buf.len(),
        })
}

#[inline]
fn word_range(buf_len: usize, offset: usize) -> Result<Range<usize>, SaveError> {
    match offset.checked_add(WORD_SIZE) {
        Some(end) if end <= buf_len => Ok(offset..end),
        _ => Err(SaveError::OutOfBounds {
            offset,
            len: WORD_SIZE,
            buf_len,
        }),
    }
}

/// Sum the LE u32 words of every region, in order, into one wrapping
/// accumulator.
pub fn compute(buf: &[u8], regions: &[ChecksumRegion]) -> Result<u32, SaveError> {
    let mut sum = 0u32;
    for region in regions {
        sum = region_bytes(buf, region)?
            .chunks_exact(WORD_SIZE)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .fold(sum, u32::wrapping_add);
    }
    Ok(sum)
}

/// Compute the checksum and store it LE at `offset`. Returns the stored value.
pub fn apply(buf: &mut [u8], offset: usize, regions: &[ChecksumRegion]) -> Result<u32, SaveError> {
    let range = word_range(buf.len(), offset)?;
    let sum = compute(buf, regions)?;
    buf[range].copy_from_slice(&sum.to_le_bytes());
    Ok(sum)
}

/// Stored checksum at `offset`.
pub fn stored(buf: &[u8], offset: usize) -> Result<u32, SaveError> {
    let w = &buf[word_range(buf.len(), offset)?];
    Ok(u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
}

/// Whether the stored checksum matches a fresh computation.
pub fn verify(buf: &[u8], offset: usize, regions: &[ChecksumRegion]) -> Result<bool, SaveError> {
    Ok(stored(buf, offset)? == compute(buf, regions)?)
}
