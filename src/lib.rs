//! Codec and field accessors for chained-XOR obfuscated game save files.
//!
//! ```text
//! open:  file bytes ─ codec::decode ─▶ SaveBufferMut ◀─ get/set fields
//! save:  SaveBufferMut ─ checksum::apply ─ codec::encode ─▶ file bytes
//! ```

pub mod checksum;
pub mod codec;
pub mod config;
pub mod error;
pub mod options;
pub mod save_buffer;
pub mod session;
pub mod types;

pub use config::{FileProfile, FormatConfig, MarkerCheck};
pub use error::SaveError;
pub use options::{OptionLookup, OptionTable};
pub use save_buffer::{SaveBuffer, SaveBufferMut, SaveReadable};
pub use session::SaveSession;
pub use types::{BitRef, ChecksumRegion, FieldRef, FieldSpec};
