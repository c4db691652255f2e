// sitedeploy: SFTP Deployment Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! One-level partitioning of a project root into transfer units.
//!
//! Hidden entries (`.env`, `.htaccess`) and git-ignored paths are included:
//! the remote has to receive exactly what is on disk.

use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{SyncUnit, remote_join};
use crate::error::FsError;

/// Unit name used for the loose files of the root.
pub const STANDALONE_UNIT: &str = "standalone_files";

/// File mask that keeps WinSCP out of every subdirectory.
pub const FILES_ONLY_MASK: &str = "|*/";

/// Result of [`partition`].
#[derive(Debug, Clone, Default)]
pub struct Partition {
    units: Vec<SyncUnit>,
    /// Every top-level entry with the index of the unit that carries it.
    assignments: Vec<(PathBuf, usize)>,
    standalone: bool,
}

impl Partition {
    #[must_use]
    pub fn units(&self) -> &[SyncUnit] {
        &self.units
    }

    #[must_use]
    pub fn into_units(self) -> Vec<SyncUnit> {
        self.units
    }

    /// Top-level entries found under the root, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &Path> {
        self.assignments.iter().map(|(path, _)| path.as_path())
    }

    /// Unit responsible for a top-level entry.
    #[must_use]
    pub fn unit_for(&self, entry: &Path) -> Option<&SyncUnit> {
        self.assignments
            .iter()
            .find(|(path, _)| path == entry)
            .and_then(|(_, index)| self.units.get(*index))
    }

    /// Whether the root had loose files.
    #[must_use]
    pub fn has_standalone(&self) -> bool {
        self.standalone
    }
}

/// Hands out script names that stay distinct even where sanitizing maps two
/// unit names to the same text, compared case-insensitively.
#[derive(Debug, Default)]
struct ScriptNames {
    taken: HashSet<String>,
}

impl ScriptNames {
    fn allocate(&mut self, prefix: &str, unit: &str) -> String {
        let base = script_name(prefix, unit);
        let stem = base.trim_end_matches(".txt");
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.taken.insert(candidate.to_lowercase()) {
            candidate = format!("{stem}_{n}.txt");
            n += 1;
        }
        candidate
    }
}

/// Script file name for a unit: `<prefix>_sync_<name>.txt`.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`, so different names can
/// map to the same script; [`partition`] adds a numeric suffix on clashes.
#[must_use]
pub fn script_name(prefix: &str, unit: &str) -> String {
    let safe: String = unit
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{prefix}_sync_{safe}.txt")
}

/// Splits `root` into one unit per top-level directory plus, if the root
/// holds any files, one files-only unit for the root itself.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `root` does not exist,
/// `FsError::NotADirectory` if it is not a directory, or `FsError::IoError`
/// if it cannot be listed.
pub fn partition(root: &Path, remote_root: &str, prefix: &str) -> Result<Partition, FsError> {
    let metadata = std::fs::metadata(root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FsError::NotFound(root.display().to_string())
        } else {
            FsError::IoError {
                path: root.display().to_string(),
                source,
            }
        }
    })?;
    if !metadata.is_dir() {
        return Err(FsError::NotADirectory(root.display().to_string()));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut partition = Partition::default();
    let mut names = ScriptNames::default();
    let mut loose_files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path().to_path_buf();
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            let name = entry.file_name().to_string_lossy().into_owned();
            let unit = SyncUnit::new(
                name.clone(),
                &path,
                remote_join(remote_root, &name),
                names.allocate(prefix, &name),
            );
            partition.assignments.push((path, partition.units.len()));
            partition.units.push(unit);
        } else {
            loose_files.push(path);
        }
    }

    if !loose_files.is_empty() {
        let index = partition.units.len();
        partition.units.push(
            SyncUnit::new(
                STANDALONE_UNIT,
                root,
                remote_root,
                names.allocate(prefix, STANDALONE_UNIT),
            )
            .with_file_mask(FILES_ONLY_MASK),
        );
        partition.standalone = true;
        partition
            .assignments
            .extend(loose_files.into_iter().map(|path| (path, index)));
        partition.assignments.sort_by(|a, b| a.0.cmp(&b.0));
    }

    debug!(
        root = %root.display(),
        units = partition.units.len(),
        entries = partition.assignments.len(),
        "partitioned project"
    );
    Ok(partition)
}
