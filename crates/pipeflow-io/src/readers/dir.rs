//! Path-tree producer: lists the regular files under a root directory.
//!
//! The root is checked when the producer is built, so a missing path fails
//! before any consumer runs. The walk itself is lazy: the cursor keeps a
//! stack of open directory handles (one per level when recursive) and pulls
//! one entry at a time, skipping directories and special files.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use pipeflow_core::prelude::*;

/// Regular files below `root`, flat or recursive.
#[derive(Debug, Clone)]
pub struct PathTreeSource {
    root: PathBuf,
    recursive: bool,
    follow_links: bool,
}

impl PathTreeSource {
    pub fn new(root: impl AsRef<Path>, recursive: bool) -> Result<Self> {
        Self::with_config(root, recursive, &FlowConfig::default())
    }

    pub fn with_config(root: impl AsRef<Path>, recursive: bool, cfg: &FlowConfig) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(root = %root.display(), recursive, "path tree source opened");

        Ok(Self {
            root: root.to_path_buf(),
            recursive,
            follow_links: cfg.follow_links,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }
}

/// Stream the regular files under `path`. Fails with
/// [`Error::PathNotFound`] right away if `path` does not exist.
pub fn dir<'a>(path: impl AsRef<Path>, recursive: bool) -> Result<Flow<'a, PathBuf>> {
    Ok(Flow::new(PathTreeSource::new(path, recursive)?))
}

pub fn dir_with_config<'a>(
    path: impl AsRef<Path>,
    recursive: bool,
    cfg: &FlowConfig,
) -> Result<Flow<'a, PathBuf>> {
    Ok(Flow::new(PathTreeSource::with_config(path, recursive, cfg)?))
}

impl DataStream<PathBuf> for PathTreeSource {
    fn begin(&mut self) -> BoxCursor<'_, PathBuf> {
        Box::new(PathTreeCursor::open(
            &self.root,
            self.recursive,
            self.follow_links,
        ))
    }
}

struct PathTreeCursor {
    /// Open directory handles, innermost last.
    pending: Vec<ReadDir>,
    current: Option<PathBuf>,
    recursive: bool,
    follow_links: bool,
}

impl PathTreeCursor {
    fn open(root: &Path, recursive: bool, follow_links: bool) -> Self {
        let mut cursor = Self {
            pending: Vec::new(),
            current: None,
            recursive,
            follow_links,
        };

        // A root that is itself a file yields just that file.
        if root.is_file() {
            cursor.current = Some(root.to_path_buf());
            return cursor;
        }

        match fs::read_dir(root) {
            Ok(entries) => cursor.pending.push(entries),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(root = %root.display(), error = %_e, "cannot list root");
            }
        }
        cursor.settle();
        cursor
    }

    /// Pull entries until one is a regular file or every handle is drained.
    fn settle(&mut self) {
        self.current = None;
        while let Some(entries) = self.pending.last_mut() {
            let entry = match entries.next() {
                None => {
                    self.pending.pop();
                    continue;
                }
                Some(Err(_e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(error = %_e, "skipping unreadable directory entry");
                    continue;
                }
                Some(Ok(entry)) => entry,
            };

            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            let is_dir = file_type.is_dir()
                || (self.follow_links && file_type.is_symlink() && path.is_dir());
            if is_dir {
                if self.recursive {
                    self.descend(&path);
                }
                continue;
            }

            // `is_file` follows symlinks, so a link to a regular file counts.
            if path.is_file() {
                self.current = Some(path);
                return;
            }
        }
    }

    fn descend(&mut self, path: &Path) {
        match fs::read_dir(path) {
            Ok(entries) => self.pending.push(entries),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(dir = %path.display(), error = %_e, "skipping unreadable directory");
            }
        }
    }
}

impl Cursor<PathBuf> for PathTreeCursor {
    fn current(&mut self) -> Result<PathBuf> {
        self.current
            .clone()
            .ok_or(Error::InvalidCursorState("path tree cursor is at end"))
    }

    fn advance(&mut self) {
        if self.current.is_some() {
            self.settle();
        }
    }

    fn is_end(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn names(flow: &mut Flow<'_, PathBuf>) -> Vec<String> {
        let mut names: Vec<String> = flow
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }

    fn tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sub/deeper")).unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();
        File::create(tmp.path().join("sub/b.txt")).unwrap();
        File::create(tmp.path().join("sub/deeper/c.txt")).unwrap();
        tmp
    }

    #[test]
    fn missing_root_fails_at_construction() {
        let err = PathTreeSource::new("/definitely/not/here/pipeflow", true).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn source_remembers_its_root() {
        let tmp = tree();
        let src = PathTreeSource::new(tmp.path(), false).unwrap();
        assert_eq!(src.root(), tmp.path());
        assert!(!src.is_recursive());
    }

    #[test]
    fn flat_walk_skips_subdirectories() {
        let tmp = tree();
        let mut flow = dir(tmp.path(), false).unwrap();
        assert_eq!(names(&mut flow), vec!["a.txt"]);
    }

    #[test]
    fn recursive_walk_finds_nested_files() {
        let tmp = tree();
        let mut flow = dir(tmp.path(), true).unwrap();
        assert_eq!(names(&mut flow), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn empty_directory_begins_at_end() {
        let tmp = tempfile::tempdir().unwrap();
        let mut flow = dir(tmp.path(), true).unwrap();
        assert!(flow.begin().is_end());
    }

    #[test]
    fn file_root_yields_itself() {
        let tmp = tree();
        let file = tmp.path().join("a.txt");
        let mut flow = dir(&file, true).unwrap();
        assert_eq!(flow.iter().collect::<Vec<_>>(), vec![file]);
    }
}
