use super::read_op::SaveReadable;

// ─── Reader (zero-copy) ────────────────────────────────────────────────────
/// Zero-copy read-only view over a decoded save image.
#[derive(Debug, Clone, Copy)]
pub struct SaveBuffer<'a> {
    pub data_buf: &'a [u8],
}

impl<'a> SaveBuffer<'a> {
    #[inline]
    pub fn new(data_buf: &'a [u8]) -> Self {
        Self { data_buf }
    }
}

impl<'a> SaveReadable for SaveBuffer<'a> {
    #[inline]
    fn data_buf(&self) -> &[u8] {
        self.data_buf
    }
}
