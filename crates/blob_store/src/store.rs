use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::paths::{file_name, split_path};

/// Byte-blob storage sandboxed under a root directory.
///
/// All operations take paths relative to the root; validation in
/// [`split_path`] guarantees nothing outside the root is ever addressed.
/// Cloning a store is cheap and shares the same root.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| StoreError::io("creating root", &root, err))?;
        Ok(Self { root })
    }

    /// The absolute sandbox root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let mut resolved = self.root.clone();
        for segment in split_path(path)? {
            resolved.push(segment);
        }
        Ok(resolved)
    }

    /// A store scoped to a sub-folder, which is created if missing.
    pub fn subdir(&self, path: &str) -> Result<Store, StoreError> {
        let resolved = self.resolve(path)?;
        fs::create_dir_all(&resolved)
            .map_err(|err| StoreError::io("creating folder", &resolved, err))?;
        Ok(Store { root: resolved })
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn is_folder(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    /// Write `bytes` at `path`. The parent folder must already exist and the
    /// path must not name a folder; on failure nothing is written.
    pub fn save(&self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let resolved = self.resolve(path)?;
        let parent = resolved.parent().unwrap_or(&self.root);
        if !parent.is_dir() {
            return Err(StoreError::ParentNotFound {
                path: path.to_string(),
            });
        }
        if resolved.is_dir() {
            return Err(StoreError::Conflict {
                path: path.to_string(),
            });
        }
        fs::write(&resolved, bytes).map_err(|err| StoreError::io("saving", &resolved, err))
    }

    pub fn load(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let resolved = self.resolve(path)?;
        match fs::read(&resolved) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            Err(err) => Err(StoreError::io("loading", &resolved, err)),
        }
    }

    /// Convenience wrapper for text blobs (lossy on invalid UTF-8).
    pub fn load_text(&self, path: &str) -> Result<String, StoreError> {
        Ok(String::from_utf8_lossy(&self.load(path)?).into_owned())
    }

    /// Sorted entry names of a folder.
    pub fn list(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let resolved = self.resolve(path)?;
        let entries = match fs::read_dir(&resolved) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: path.to_string(),
                })
            }
            Err(err) => return Err(StoreError::io("listing", &resolved, err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io("listing", &resolved, err))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    pub fn make_folder(&self, path: &str) -> Result<(), StoreError> {
        let resolved = self.resolve(path)?;
        if resolved.exists() {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        let parent = resolved.parent().unwrap_or(&self.root);
        if !parent.is_dir() {
            return Err(StoreError::ParentNotFound {
                path: path.to_string(),
            });
        }
        fs::create_dir(&resolved).map_err(|err| StoreError::io("creating folder", &resolved, err))
    }

    /// Remove a file or folder (recursively). Returns whether anything was
    /// removed; an absent path is not an error.
    pub fn delete(&self, path: &str) -> Result<bool, StoreError> {
        let resolved = self.resolve(path)?;
        if !resolved.exists() {
            return Ok(false);
        }
        if resolved.is_dir() {
            fs::remove_dir_all(&resolved)
                .map_err(|err| StoreError::io("deleting folder", &resolved, err))?;
        } else {
            fs::remove_file(&resolved).map_err(|err| StoreError::io("deleting", &resolved, err))?;
        }
        Ok(true)
    }

    /// Copy the file at `from` into the folder `to_folder`, keeping its name.
    pub fn copy_file(&self, from: &str, to_folder: &str) -> Result<(), StoreError> {
        let name = file_name(from).ok_or_else(|| StoreError::InvalidPath {
            path: from.to_string(),
        })?;
        let bytes = self.load(from)?;
        let target = join(to_folder, name);
        self.save(&target, &bytes)
    }

    /// Recursively copy the folder at `from` into the folder `to_folder`.
    pub fn copy_folder(&self, from: &str, to_folder: &str) -> Result<(), StoreError> {
        if !self.is_folder(from) {
            return Err(StoreError::NotAFolder {
                path: from.to_string(),
            });
        }
        if !self.is_folder(to_folder) {
            return Err(StoreError::NotAFolder {
                path: to_folder.to_string(),
            });
        }
        let name = file_name(from).ok_or_else(|| StoreError::InvalidPath {
            path: from.to_string(),
        })?;
        let target = join(to_folder, name);
        match self.make_folder(&target) {
            Ok(()) | Err(StoreError::AlreadyExists { .. }) => {}
            Err(err) => return Err(err),
        }
        for entry in self.list(from)? {
            let child = join(from, &entry);
            if self.is_folder(&child) {
                self.copy_folder(&child, &target)?;
            } else {
                self.copy_file(&child, &target)?;
            }
        }
        Ok(())
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let resolved_from = self.resolve(from)?;
        let resolved_to = self.resolve(to)?;
        if !resolved_from.exists() {
            return Err(StoreError::NotFound {
                path: from.to_string(),
            });
        }
        fs::rename(&resolved_from, &resolved_to)
            .map_err(|err| StoreError::io("renaming", &resolved_from, err))
    }
}

fn join(folder: &str, name: &str) -> String {
    let trimmed = folder.trim_end_matches('/');
    if trimmed.is_empty() {
        name.to_string()
    } else {
        format!("{trimmed}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::join;

    #[test]
    fn join_handles_root_and_trailing_separators() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("x/", "a"), "x/a");
        assert_eq!(join("x/y", "a"), "x/y/a");
    }
}
