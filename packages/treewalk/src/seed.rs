//! Initial TREEWALK operations for source roots.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use pcopy_config::Options;
use pcopy_operation::Operation;

use crate::error::TreewalkError;

/// Build the TREEWALK operation for a source root.
///
/// If the destination root is an existing directory, the source keeps its
/// own name below it (`/src/a` -> `<dest>/a`). Otherwise the source is mapped
/// onto the destination root itself (`/src/a` -> `<dest>`).
///
/// # Errors
///
/// * If `source` is relative
pub fn seed_operation(source: &Path, options: &Options) -> Result<Operation, TreewalkError> {
    if !source.is_absolute() {
        return Err(TreewalkError::RelativeSource(source.to_path_buf()));
    }

    // Rebuilding from components drops trailing and doubled separators.
    let operand: PathBuf = source.components().collect();

    let source_base_offset = if options.dest_root().is_dir() {
        operand
            .parent()
            .map_or(0, |parent| parent.as_os_str().len())
    } else {
        operand.as_os_str().len()
    };

    let op = Operation::treewalk(
        operand,
        source_base_offset,
        options.dest_base_appendix().map(str::to_string),
    );

    log::debug!(
        "Seeding {} with relative path {:?}",
        op.operand.display(),
        op.relative_path()
    );

    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcopy_config::OptionsBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn options(dest: &Path) -> Options {
        OptionsBuilder::new().dest_root(dest).build().unwrap()
    }

    #[test]
    fn test_seed_into_existing_directory_keeps_name() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");
        fs::create_dir(&dest).unwrap();

        let op = seed_operation(Path::new("/src/a"), &options(&dest)).unwrap();

        assert_eq!(op.operand, PathBuf::from("/src/a"));
        assert_eq!(op.source_base_offset, 4);
        assert_eq!(op.destination_path(&dest), dest.join("a"));
    }

    #[test]
    fn test_seed_onto_new_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dest");

        let op = seed_operation(Path::new("/src/a"), &options(&dest)).unwrap();

        assert_eq!(op.source_base_offset, 6);
        assert_eq!(op.destination_path(&dest), dest);
        assert_eq!(op.child("x").destination_path(&dest), dest.join("x"));
    }

    #[test]
    fn test_seed_trims_trailing_separator() {
        let dir = TempDir::new().unwrap();

        let op = seed_operation(Path::new("/src/a/"), &options(dir.path())).unwrap();

        assert_eq!(op.operand, PathBuf::from("/src/a"));
        assert_eq!(op.child("x").operand, PathBuf::from("/src/a/x"));
    }

    #[test]
    fn test_seed_carries_appendix() {
        let dir = TempDir::new().unwrap();
        let options = OptionsBuilder::new()
            .dest_root(dir.path())
            .dest_base_appendix("nightly")
            .build()
            .unwrap();

        let op = seed_operation(Path::new("/src/a"), &options).unwrap();

        assert_eq!(op.dest_base_appendix.as_deref(), Some("nightly"));
        assert_eq!(op.destination_path(dir.path()), dir.path().join("nightly/a"));
    }

    #[test]
    fn test_seed_filesystem_root() {
        let dir = TempDir::new().unwrap();

        let op = seed_operation(Path::new("/"), &options(dir.path())).unwrap();

        assert_eq!(op.operand, PathBuf::from("/"));
        assert_eq!(op.source_base_offset, 0);
        assert_eq!(op.child("etc").destination_path(dir.path()), dir.path().join("etc"));
    }

    #[cfg(unix)]
    #[test]
    fn test_seed_non_utf8_source() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let source = Path::new(OsStr::from_bytes(b"/src/caf\xe9"));

        let op = seed_operation(source, &options(dir.path())).unwrap();

        assert_eq!(op.operand, source);
        assert_eq!(
            op.destination_path(dir.path()),
            dir.path().join(OsStr::from_bytes(b"caf\xe9"))
        );
    }

    #[test]
    fn test_seed_rejects_relative_source() {
        let dir = TempDir::new().unwrap();
        let err = seed_operation(Path::new("src/a"), &options(dir.path())).unwrap_err();
        assert!(matches!(err, TreewalkError::RelativeSource(_)));
    }
}
