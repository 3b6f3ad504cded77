use serde::{Deserialize, Serialize};

// ─── Chain Transcoding ──────────────────────────────────────────────────────
pub const BLOCK_SIZE: usize = 8;

/// Seed key XORed into the first block of every save file.
pub const MAGIC_KEY: [u8; BLOCK_SIZE] = [0x00, 0x21, 0x11, 0x08, 0xC0, 0x4B, 0x00, 0x00];

// ─── Checksum Layout ────────────────────────────────────────────────────────
//
//  ┌──────────────────────────────────────────────┐
//  │ 0x0000  header (8 bytes)                     │
//  │ 0x0008  checksum: u32 (LE)                   │
//  │ 0x000C  (not summed)                         │
//  ├──────────────────────────────────────────────┤
//  │ 0x0010  region 1: 0xEE7 words (u32 LE)       │
//  ├──────────────────────────────────────────────┤
//  │ 0x3BAC  (not summed)                         │
//  ├──────────────────────────────────────────────┤
//  │ 0x3BB0  region 2: 0x5C0 words (u32 LE)       │
//  ├──────────────────────────────────────────────┤
//  │ 0x52B0  tail (not summed)                    │
//  └──────────────────────────────────────────────┘

pub const WORD_SIZE: usize = 4;
pub const CHECKSUM_OFFSET: usize = 0x08;
pub const CHECKSUM_REGIONS: [ChecksumRegion; 2] = [
    ChecksumRegion::new(0x10, 0xEE7),
    ChecksumRegion::new(0x3BB0, 0x5C0),
];

/// Scalars are carried as u64, so no field may span more than 8 bytes.
pub const MAX_VALUE_WIDTH: usize = 8;

// ─── File Profile ───────────────────────────────────────────────────────────
pub const EXPECTED_SIZE_MIN: usize = 23_800;
pub const EXPECTED_SIZE_MAX: usize = 24_000;
pub const MARKER_OFFSET: usize = 0x3BE8;
pub const MARKER_MIRRORS: [usize; 3] = [0x3C00, 0x3C18, 0x3C30];
pub const MARKER_WIDTH: usize = 8;

/// A run of `word_count` little-endian u32 words starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumRegion {
    pub start: usize,
    pub word_count: usize,
}

impl ChecksumRegion {
    pub const fn new(start: usize, word_count: usize) -> Self {
        Self { start, word_count }
    }

    /// One past the last byte covered by this region, or `None` if that
    /// does not fit in `usize`.
    #[inline]
    pub const fn end(&self) -> Option<usize> {
        match self.word_count.checked_mul(WORD_SIZE) {
            Some(len) => self.start.checked_add(len),
            None => None,
        }
    }

    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        match self.end() {
            Some(end) => offset >= self.start && offset < end,
            None => offset >= self.start,
        }
    }
}

// ─── Field References ───────────────────────────────────────────────────────

/// Where a logical field lives in the buffer.
///
/// A `Composite` field concatenates the windows at each offset, in list
/// order, into one little-endian integer; the last offset holds the most
/// significant window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Single(usize),
    Composite(Vec<usize>),
}

impl FieldRef {
    /// Total encoded byte count for a per-offset `width`.
    #[inline]
    pub fn encoded_len(&self, width: usize) -> usize {
        match self {
            FieldRef::Single(_) => width,
            FieldRef::Composite(offsets) => offsets.len() * width,
        }
    }
}

impl From<usize> for FieldRef {
    fn from(offset: usize) -> Self {
        FieldRef::Single(offset)
    }
}

impl From<Vec<usize>> for FieldRef {
    fn from(offsets: Vec<usize>) -> Self {
        FieldRef::Composite(offsets)
    }
}

/// A field as the form layer describes it: location plus per-offset width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: FieldRef,
    pub width: usize,
}

impl FieldSpec {
    pub fn single(offset: usize, width: usize) -> Self {
        Self {
            field: FieldRef::Single(offset),
            width,
        }
    }

    pub fn composite(offsets: impl Into<Vec<usize>>, width: usize) -> Self {
        Self {
            field: FieldRef::Composite(offsets.into()),
            width,
        }
    }
}

/// One flag bit. `bit_index` may exceed 7 and then walks into later bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitRef {
    pub offset: usize,
    pub bit_index: usize,
}

impl BitRef {
    pub const fn new(offset: usize, bit_index: usize) -> Self {
        Self { offset, bit_index }
    }

    /// Byte holding the bit, or `None` past `usize::MAX`.
    #[inline]
    pub const fn byte_offset(&self) -> Option<usize> {
        self.offset.checked_add(self.bit_index / 8)
    }

    #[inline]
    pub const fn mask(&self) -> u8 {
        1 << (self.bit_index % 8)
    }
}
