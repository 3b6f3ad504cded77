use crate::checksum;
use crate::codec;
use crate::config::FormatConfig;
use crate::error::SaveError;
use crate::save_buffer::{SaveBufferMut, SaveReadable};
use std::ops::{Deref, DerefMut};
use std::path::Path;
use xxhash_rust::xxh64::xxh64;

// ─── SaveSession ────────────────────────────────────────────────────────────

/// One open save file: the decoded buffer plus the format it was read with.
///
/// Field access goes through `Deref` to [`SaveBufferMut`]. The session owns
/// its buffer outright; run one session per file.
#[derive(Debug, Clone)]
pub struct SaveSession {
    buffer: SaveBufferMut,
    config: FormatConfig,
    /// xxh64 of the buffer as last loaded or saved.
    fingerprint: u64,
}

impl SaveSession {
    /// Wrap an already decoded buffer.
    pub fn from_decoded(data: Vec<u8>, config: FormatConfig) -> Self {
        let fingerprint = xxh64(&data, 0);
        Self {
            buffer: SaveBufferMut::new(data),
            config,
            fingerprint,
        }
    }

    /// Decode an on-disk image without running the file profile.
    pub fn from_encoded(raw: &[u8], config: FormatConfig) -> Self {
        let plain = codec::decode_with_key(raw, &config.magic_key);
        Self::from_decoded(plain, config)
    }

    /// Read, profile-check and decode a save file.
    pub fn open(path: impl AsRef<Path>, config: FormatConfig) -> Result<Self, SaveError> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        config.profile.check_size(raw.len())?;
        let session = Self::from_encoded(&raw, config);
        session.config.profile.check_decoded(&session.buffer)?;
        tracing::debug!(path = %path.display(), "save file passed profile checks");
        session.log_opened(path);
        Ok(session)
    }

    /// Read and decode a save file, skipping the file profile.
    pub fn open_unchecked(path: impl AsRef<Path>, config: FormatConfig) -> Result<Self, SaveError> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        let session = Self::from_encoded(&raw, config);
        session.log_opened(path);
        Ok(session)
    }

    fn log_opened(&self, path: &Path) {
        tracing::info!(path = %path.display(), bytes = self.buffer.byte_len(), "opened save file");
        match self.checksum_matches() {
            Ok(true) => {}
            Ok(false) => tracing::warn!(
                path = %path.display(),
                "stored checksum does not match contents; it will be rewritten on save"
            ),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "checksum regions not readable"),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Save
    // ════════════════════════════════════════════════════════════════════════

    /// Refresh the checksum and return the on-disk image.
    ///
    /// Rewriting the checksum of an unedited buffer does not make it dirty.
    pub fn to_encoded(&mut self) -> Result<Vec<u8>, SaveError> {
        let was_clean = !self.is_dirty();
        let sum = checksum::apply(
            self.buffer.as_bytes_mut(),
            self.config.checksum_offset,
            &self.config.checksum_regions,
        )?;
        tracing::debug!(checksum = sum, "checksum applied");
        if was_clean {
            self.fingerprint = xxh64(self.buffer.as_bytes(), 0);
        }
        Ok(codec::encode_with_key(self.buffer.as_bytes(), &self.config.magic_key))
    }

    /// Refresh the checksum, encode and write the whole file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let raw = self.to_encoded()?;
        std::fs::write(path, &raw)?;
        self.fingerprint = xxh64(self.buffer.as_bytes(), 0);
        tracing::info!(path = %path.display(), bytes = raw.len(), "saved save file");
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // State
    // ════════════════════════════════════════════════════════════════════════

    /// Whether the buffer differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        xxh64(self.buffer.as_bytes(), 0) != self.fingerprint
    }

    pub fn stored_checksum(&self) -> Result<u32, SaveError> {
        checksum::stored(self.buffer.as_bytes(), self.config.checksum_offset)
    }

    pub fn computed_checksum(&self) -> Result<u32, SaveError> {
        checksum::compute(self.buffer.as_bytes(), &self.config.checksum_regions)
    }

    pub fn checksum_matches(&self) -> Result<bool, SaveError> {
        checksum::verify(
            self.buffer.as_bytes(),
            self.config.checksum_offset,
            &self.config.checksum_regions,
        )
    }

    #[inline]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    #[inline]
    pub fn buffer(&self) -> &SaveBufferMut {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut SaveBufferMut {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> SaveBufferMut {
        self.buffer
    }
}

impl Deref for SaveSession {
    type Target = SaveBufferMut;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for SaveSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}
