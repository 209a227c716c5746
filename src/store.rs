//! In-memory maze store with backing-file bookkeeping.
//!
//! Submitting callers and completing workers hit the store concurrently
//! and in no particular order, so both maps live behind one mutex and every
//! replace happens under a single lock acquisition.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{DaedalusError, Result};
use crate::maze::Maze3d;

#[derive(Default)]
struct Inner {
    mazes: HashMap<String, Arc<Maze3d>>,
    files: HashMap<String, PathBuf>,
}

/// Name → maze and name → backing path, mutex-guarded.
#[derive(Default)]
pub struct MazeStore {
    inner: Mutex<Inner>,
}

impl MazeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or silently replace. Replacing also drops any recorded
    /// backing path, so a name never points at a file written for a
    /// previous maze.
    pub fn put(&self, name: &str, maze: Maze3d) {
        let mut inner = self.inner.lock().expect("store lock");
        inner.mazes.insert(name.to_string(), Arc::new(maze));
        inner.files.remove(name);
    }

    /// Insert a maze and its backing path in one step (load path).
    pub fn put_with_file(&self, name: &str, maze: Maze3d, path: &Path) {
        let mut inner = self.inner.lock().expect("store lock");
        inner.mazes.insert(name.to_string(), Arc::new(maze));
        inner.files.insert(name.to_string(), path.to_path_buf());
    }

    pub fn get(&self, name: &str) -> Result<Arc<Maze3d>> {
        let inner = self.inner.lock().expect("store lock");
        inner
            .mazes
            .get(name)
            .cloned()
            .ok_or_else(|| DaedalusError::NotFound(format!("maze '{name}'")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().expect("store lock").mazes.contains_key(name)
    }

    /// Record the backing file for an already-stored maze (save path).
    pub fn record_file(&self, name: &str, path: &Path) -> Result<()> {
        let mut inner = self.inner.lock().expect("store lock");
        if !inner.mazes.contains_key(name) {
            return Err(DaedalusError::NotFound(format!("maze '{name}'")));
        }
        inner.files.insert(name.to_string(), path.to_path_buf());
        Ok(())
    }

    pub fn file_for(&self, name: &str) -> Result<PathBuf> {
        let inner = self.inner.lock().expect("store lock");
        inner
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| DaedalusError::NotFound(format!("no file recorded for maze '{name}'")))
    }

    /// Byte length of the maze's canonical encoding.
    pub fn size_in_memory(&self, name: &str) -> Result<usize> {
        Ok(self.get(name)?.byte_len())
    }

    /// On-disk length of the recorded backing file.
    pub fn size_on_disk(&self, name: &str) -> Result<u64> {
        let path = self.file_for(name)?;
        let meta = fs::metadata(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DaedalusError::NotFound(format!("maze file {}", path.display()))
            } else {
                DaedalusError::Io(e)
            }
        })?;
        Ok(meta.len())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("store lock").mazes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all stored mazes, unordered.
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("store lock");
        inner.mazes.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Position;

    fn maze() -> Maze3d {
        Maze3d::new(
            1,
            1,
            2,
            Position::new(0, 0, 0),
            Position::new(0, 0, 1),
            vec![0, 0],
        )
        .unwrap()
    }

    #[test]
    fn put_get_roundtrip() {
        let store = MazeStore::new();
        store.put("m", maze());
        assert_eq!(*store.get("m").unwrap(), maze());
        assert!(matches!(
            store.get("missing"),
            Err(DaedalusError::NotFound(_))
        ));
    }

    #[test]
    fn overwrite_is_silent_and_drops_stale_path() {
        let store = MazeStore::new();
        store.put("m", maze());
        store.record_file("m", Path::new("/tmp/m.bin")).unwrap();
        store.put("m", maze());
        assert!(matches!(
            store.file_for("m"),
            Err(DaedalusError::NotFound(_))
        ));
    }

    #[test]
    fn size_in_memory_is_canonical_length() {
        let store = MazeStore::new();
        store.put("m", maze());
        assert_eq!(store.size_in_memory("m").unwrap(), 36 + 2);
    }

    #[test]
    fn size_on_disk_without_record_is_not_found() {
        let store = MazeStore::new();
        store.put("m", maze());
        assert!(matches!(
            store.size_on_disk("m"),
            Err(DaedalusError::NotFound(_))
        ));
    }
}
