use super::SaveBuffer;
use super::read_op::SaveReadable;

/// Owned, decoded save image. Field setters live in `write_op`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveBufferMut {
    pub data_buf: Vec<u8>,
}

impl SaveBufferMut {
    pub fn new(data_buf: Vec<u8>) -> Self {
        Self { data_buf }
    }

    /// A zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            data_buf: vec![0u8; len],
        }
    }

    #[inline]
    pub fn as_buffer(&self) -> SaveBuffer<'_> {
        SaveBuffer::new(&self.data_buf)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Finalize
    // ════════════════════════════════════════════════════════════════════════

    /// Consume and return the underlying buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data_buf
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data_buf
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data_buf
    }
}

impl From<Vec<u8>> for SaveBufferMut {
    fn from(data_buf: Vec<u8>) -> Self {
        Self::new(data_buf)
    }
}

impl SaveReadable for SaveBufferMut {
    #[inline]
    fn data_buf(&self) -> &[u8] {
        &self.data_buf
    }
}
