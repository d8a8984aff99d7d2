//! The typed work item.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsStr;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ParseOpcodeError;
use crate::os_bytes;

/// Size of a full chunk in bytes (1 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 1_048_576;

/// Which stage must process an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Classify a path and expand or chunk it.
    Treewalk,
    /// Copy one chunk of one file.
    Copy,
    /// Post-copy fix-up of a copied object.
    Cleanup,
}

impl Opcode {
    /// Wire and log form of the opcode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Treewalk => "TREEWALK",
            Self::Copy => "COPY",
            Self::Cleanup => "CLEANUP",
        }
    }
}

impl FromStr for Opcode {
    type Err = ParseOpcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TREEWALK" => Ok(Self::Treewalk),
            "COPY" => Ok(Self::Copy),
            "CLEANUP" => Ok(Self::Cleanup),
            _ => Err(ParseOpcodeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work passed between participants.
///
/// The operand is kept as raw OS bytes, so any name the filesystem hands out
/// can be carried. `source_base_offset` is a byte offset into those bytes;
/// everything from it on is mirrored under the destination root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Stage that must process this operation.
    pub opcode: Opcode,
    /// Chunk index for COPY, 0 otherwise.
    pub chunk: u32,
    /// Absolute source path.
    pub operand: PathBuf,
    /// Byte offset into `operand` where the mirrored relative path begins.
    pub source_base_offset: usize,
    /// Extra segment inserted under the destination root.
    pub dest_base_appendix: Option<String>,
    /// Total size of the file, for COPY.
    pub file_size: u64,
}

impl Operation {
    /// Create a TREEWALK operation for `operand`.
    #[must_use]
    pub fn treewalk(
        operand: impl Into<PathBuf>,
        source_base_offset: usize,
        dest_base_appendix: Option<String>,
    ) -> Self {
        Self {
            opcode: Opcode::Treewalk,
            chunk: 0,
            operand: operand.into(),
            source_base_offset,
            dest_base_appendix,
            file_size: 0,
        }
    }

    /// TREEWALK operation for the directory entry `name` below this operand.
    ///
    /// Offset, appendix and file size are carried over unchanged.
    #[must_use]
    pub fn child(&self, name: impl AsRef<OsStr>) -> Self {
        let mut operand = self.operand.clone().into_os_string();
        if self.operand_bytes().last() != Some(&b'/') {
            operand.push("/");
        }
        operand.push(name);

        Self {
            opcode: Opcode::Treewalk,
            chunk: 0,
            operand: PathBuf::from(operand),
            source_base_offset: self.source_base_offset,
            dest_base_appendix: self.dest_base_appendix.clone(),
            file_size: self.file_size,
        }
    }

    /// COPY operation for chunk `index` of this operand's file.
    #[must_use]
    pub fn copy_chunk(&self, index: u32, file_size: u64) -> Self {
        Self {
            opcode: Opcode::Copy,
            chunk: index,
            operand: self.operand.clone(),
            source_base_offset: self.source_base_offset,
            dest_base_appendix: self.dest_base_appendix.clone(),
            file_size,
        }
    }

    /// Raw bytes of the operand.
    #[must_use]
    pub fn operand_bytes(&self) -> &[u8] {
        os_bytes::as_bytes(self.operand.as_os_str())
    }

    /// Path fragment below the source root, as stored in the operand.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        self.operand_bytes()
            .get(self.source_base_offset..)
            .and_then(os_bytes::from_bytes)
            .map_or_else(|| Path::new(""), Path::new)
    }

    /// Mirrored destination path: `dest_root / [appendix /] relative_path`.
    #[must_use]
    pub fn destination_path(&self, dest_root: &Path) -> PathBuf {
        let mut path = dest_root.to_path_buf();

        if let Some(appendix) = &self.dest_base_appendix {
            path.push(appendix);
        }

        let relative = self.relative_path();
        let relative = relative.strip_prefix("/").unwrap_or(relative);
        if !relative.as_os_str().is_empty() {
            path.push(relative);
        }

        path
    }

    /// Byte range of the file covered by this chunk.
    ///
    /// Every chunk but the last covers exactly `chunk_size` bytes.
    #[must_use]
    pub fn chunk_range(&self, chunk_size: u64) -> Range<u64> {
        let start = u64::from(self.chunk)
            .saturating_mul(chunk_size)
            .min(self.file_size);
        let end = start.saturating_add(chunk_size).min(self.file_size);
        start..end
    }
}
