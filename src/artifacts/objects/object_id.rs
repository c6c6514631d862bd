//! Content identifiers (SHA-1 object ids)
//!
//! Every commit, tree and blob is addressed by the SHA-1 digest of its serialized
//! form. Two objects are the same object exactly when their ids are equal, which is
//! what lets file history compare a path's content across commits without reading
//! the blobs themselves.
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 7 characters, used for display only
//! - On disk: `.git/objects/<first 2 chars>/<remaining 38 chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Length of the abbreviated form used in `--abbrev-commit` output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Hex-encoded SHA-1 object identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full 40-character hex id
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Write the id as 20 raw bytes, the encoding used inside tree objects
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read 20 raw bytes and hex-encode them
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect::<String>();
        Self::try_parse(hex40)
    }

    /// Relative path of the loose object file, `ab/cdef...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }

    /// Whether `s` could be a (possibly abbreviated) object id
    ///
    /// Git requires at least 4 characters before it treats a name as an id prefix.
    pub fn looks_like_prefix(s: &str) -> bool {
        (4..=OBJECT_ID_LENGTH).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl FromStr for ObjectId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::try_parse(s.to_string())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
