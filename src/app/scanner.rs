use crate::app::models::{DirectoryEntry, DirectoryListing, FilterConfig, ProjectStructure};
use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct Scanner {
    root: PathBuf,
    filter: FilterConfig,
}

impl Scanner {
    pub fn new(root: PathBuf, filter: FilterConfig) -> Self {
        Self { root, filter }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the root top-down and returns every visited directory in
    /// pre-order, with its filtered subdirectories and files.
    ///
    /// Inside a directory files come before subdirectories, each sorted by
    /// name, so two walks over an unchanged tree agree.
    pub fn walk(&self) -> Result<Vec<DirectoryEntry>> {
        let mut dirs: Vec<DirectoryEntry> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for result in self.walker() {
            let entry = result
                .with_context(|| format!("Failed to walk {}", self.root.display()))?;
            let path = entry.path();

            if entry.depth() == 0 {
                if !path.is_dir() {
                    bail!("{} is not a directory", path.display());
                }
                index.insert(path.to_path_buf(), dirs.len());
                dirs.push(self.new_entry(path));
                continue;
            }

            let Some(parent) = path.parent().and_then(|p| index.get(p).copied()) else {
                log::warn!("Skipping entry outside of the walk: {}", path.display());
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_real_dir = entry.file_type().is_some_and(|t| t.is_dir());

            if is_real_dir || path.is_dir() {
                dirs[parent].listing.directories.push(name);
                // Symlinked directories are listed but never descended into.
                if is_real_dir {
                    index.insert(path.to_path_buf(), dirs.len());
                    dirs.push(self.new_entry(path));
                }
            } else if self.filter.accepts_file(&name) {
                dirs[parent].listing.files.push(name);
                dirs[parent].file_paths.push(path.to_path_buf());
            }
        }

        Ok(dirs)
    }

    /// Builds the structure map: only directories with at least one accepted
    /// file get an entry.
    pub fn build_map(&self) -> Result<ProjectStructure> {
        let mut structure = ProjectStructure::default();
        for dir in self.walk()? {
            if !dir.listing.files.is_empty() {
                structure.insert(dir.path, dir.listing);
            }
        }
        log::debug!("Mapped {} directories", structure.len());
        Ok(structure)
    }

    fn new_entry(&self, path: &Path) -> DirectoryEntry {
        DirectoryEntry {
            path: relative_key(&self.root, path),
            listing: DirectoryListing::default(),
            file_paths: Vec::new(),
        }
    }

    fn walker(&self) -> ignore::Walk {
        let filter = self.filter.clone();
        WalkBuilder::new(&self.root)
            // Plain walk: no gitignore handling, hidden entries included.
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_path(|a, b| {
                a.is_dir()
                    .cmp(&b.is_dir())
                    .then_with(|| a.file_name().cmp(&b.file_name()))
            })
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.path().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if filter.ignores_dir(&name) {
                    log::debug!("Skipping ignored directory {}", entry.path().display());
                    return false;
                }
                true
            })
            .build()
    }
}

/// Path of `path` relative to `root` as `./a/b`, or `./` for the root itself.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        "./".to_string()
    } else {
        format!("./{}", parts.join("/"))
    }
}
