use crate::error::SaveError;
use crate::save_buffer::SaveReadable;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ─── FormatConfig ───────────────────────────────────────────────────────────

/// Everything that differs between versions of the save format.
///
/// `Default` is the Steam "Gold Edition" 1.2.0 layout. Other variants can be
/// supplied as JSON; omitted keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub magic_key: [u8; BLOCK_SIZE],
    pub checksum_offset: usize,
    pub checksum_regions: Vec<ChecksumRegion>,
    pub profile: FileProfile,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            magic_key: MAGIC_KEY,
            checksum_offset: CHECKSUM_OFFSET,
            checksum_regions: CHECKSUM_REGIONS.to_vec(),
            profile: FileProfile::default(),
        }
    }
}

impl FormatConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SaveError> {
        let config: FormatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every range must be addressable, and the stored checksum must not
    /// feed into its own sum.
    pub fn validate(&self) -> Result<(), SaveError> {
        let stored_end = self.checksum_offset.checked_add(WORD_SIZE).ok_or_else(|| {
            SaveError::Config(format!("checksum offset {:#x} is not addressable", self.checksum_offset))
        })?;
        for region in &self.checksum_regions {
            let end = region.end().ok_or_else(|| {
                SaveError::Config(format!(
                    "checksum region at {:#x} with {} words is not addressable",
                    region.start, region.word_count
                ))
            })?;
            if self.checksum_offset < end && region.start < stored_end {
                return Err(SaveError::Config(format!(
                    "checksum offset {:#x} overlaps region {:#x}..{end:#x}",
                    self.checksum_offset, region.start
                )));
            }
        }
        if let Some(markers) = &self.profile.markers {
            if markers.width > MAX_VALUE_WIDTH {
                return Err(SaveError::Config(format!(
                    "marker width {} exceeds {MAX_VALUE_WIDTH} bytes",
                    markers.width
                )));
            }
        }
        if let Some((min, max)) = self.profile.size_range {
            if min > max {
                return Err(SaveError::Config(format!("size range {min}..={max} is empty")));
            }
        }
        Ok(())
    }

    /// Smallest buffer every configured offset fits in. Saturates at
    /// `usize::MAX` for a configuration that [`validate`](Self::validate)
    /// would reject.
    pub fn min_len(&self) -> usize {
        self.checksum_regions
            .iter()
            .map(|region| region.end().unwrap_or(usize::MAX))
            .chain(std::iter::once(self.checksum_offset.saturating_add(WORD_SIZE)))
            .max()
            .unwrap_or(0)
    }
}

// ─── FileProfile ────────────────────────────────────────────────────────────

/// Sanity checks a loader runs before trusting a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProfile {
    /// Inclusive bounds on the on-disk size.
    pub size_range: Option<(usize, usize)>,
    pub markers: Option<MarkerCheck>,
}

impl Default for FileProfile {
    fn default() -> Self {
        Self {
            size_range: Some((EXPECTED_SIZE_MIN, EXPECTED_SIZE_MAX)),
            markers: Some(MarkerCheck::default()),
        }
    }
}

impl FileProfile {
    /// No checks at all.
    pub fn permissive() -> Self {
        Self {
            size_range: None,
            markers: None,
        }
    }

    pub fn check_size(&self, raw_len: usize) -> Result<(), SaveError> {
        match self.size_range {
            Some((min, max)) if raw_len < min || raw_len > max => Err(SaveError::InvalidFormat(
                format!("file is {raw_len} bytes, expected {min}..={max}"),
            )),
            _ => Ok(()),
        }
    }

    pub fn check_decoded(&self, buf: &impl SaveReadable) -> Result<(), SaveError> {
        match &self.markers {
            Some(markers) => markers.check(buf),
            None => Ok(()),
        }
    }
}

/// A value stored at `offset` and repeated verbatim at each mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCheck {
    pub offset: usize,
    pub width: usize,
    pub mirrors: Vec<usize>,
}

impl Default for MarkerCheck {
    fn default() -> Self {
        Self {
            offset: MARKER_OFFSET,
            width: MARKER_WIDTH,
            mirrors: MARKER_MIRRORS.to_vec(),
        }
    }
}

impl MarkerCheck {
    pub fn check(&self, buf: &impl SaveReadable) -> Result<(), SaveError> {
        let expected = buf
            .get_value(self.offset, self.width)
            .map_err(|e| SaveError::InvalidFormat(e.to_string()))?;
        for &mirror in &self.mirrors {
            let found = buf
                .get_value(mirror, self.width)
                .map_err(|e| SaveError::InvalidFormat(e.to_string()))?;
            if found != expected {
                return Err(SaveError::InvalidFormat(format!(
                    "marker at {mirror:#x} is {found:#x}, expected {expected:#x}"
                )));
            }
        }
        Ok(())
    }
}
