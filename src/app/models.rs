use std::path::PathBuf;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub filter: FilterConfig,
    pub print_map: bool,
}

/// Which files and directories take part in the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Accepted extensions, each with its leading dot (e.g. `.js`).
    pub extensions: Vec<String>,
    /// Exact filenames that are skipped even when their extension is accepted.
    pub ignored_files: Vec<String>,
    /// Directory names whose whole subtree is skipped, at any depth.
    pub ignored_dirs: Vec<String>,
}

impl FilterConfig {
    pub fn accepts_file(&self, name: &str) -> bool {
        let ext = extension_of(name);
        self.extensions.iter().any(|e| e == ext) && !self.ignored_files.iter().any(|f| f == name)
    }

    pub fn ignores_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }
}

/// Extension of a bare filename including its dot, or `""` when there is none.
///
/// Leading dots belong to the name, so `.json` has no extension while
/// `name.` has the extension `.`.
pub fn extension_of(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}

/// Filtered contents of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Subdirectory names left after removing ignored directories.
    pub directories: Vec<String>,
    /// Filenames that passed the filter.
    pub files: Vec<String>,
}

/// A directory visited by the walk, keyed by its `./`-prefixed relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: String,
    pub listing: DirectoryListing,
    /// On-disk paths of `listing.files`, in the same order. The names in the
    /// listing are lossy for display and can't always be joined back.
    pub file_paths: Vec<PathBuf>,
}

/// Directories holding at least one accepted file, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStructure {
    entries: Vec<(String, DirectoryListing)>,
}

impl ProjectStructure {
    pub fn insert(&mut self, path: String, listing: DirectoryListing) {
        self.entries.push((path, listing));
    }

    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&DirectoryListing> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, listing)| listing)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectoryListing)> {
        self.entries.iter().map(|(p, l)| (p.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
