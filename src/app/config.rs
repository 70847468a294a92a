use crate::app::cli::Cli;
use crate::app::models::{FilterConfig, RuntimeConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".json", ".lua", ".otui"];
pub const DEFAULT_IGNORED_FILES: &[&str] =
    &["allItems.json", "allItems.lua", "output.log", "package-lock.json"];
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "sessions",
    "node_modules",
    "painel",
    "login",
    "register",
    "__pycache__",
    ".git",
];

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PresetConfig {
    pub extensions: Option<Vec<String>>,
    pub ignored_files: Option<Vec<String>>,
    pub ignored_dirs: Option<Vec<String>>,
}

/// Location of presets.toml, or `None` when there is no home directory.
pub fn presets_path() -> Option<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        log::debug!("Could not determine home directory, skipping presets");
        return None;
    };
    Some(home.join(".config").join("project_mapper").join("presets.toml"))
}

/// Loads presets from `path` if there is one; presets are optional.
pub fn load_presets(path: Option<&Path>) -> Result<HashMap<String, PresetConfig>> {
    match path {
        Some(path) => load_presets_file(path),
        None => Ok(HashMap::new()),
    }
}

/// Absolute, normalized root: `root` resolved against `current_dir`.
pub fn resolve_root(current_dir: &Path, root: Option<&Path>) -> Result<PathBuf> {
    let joined = match root {
        Some(root) => current_dir.join(root),
        None => current_dir.to_path_buf(),
    };
    fs::canonicalize(&joined)
        .with_context(|| format!("Failed to resolve root directory {}", joined.display()))
}

/// Loads named presets; a missing file yields no presets.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    Ok(parsed.presets)
}

/// Preset list if given (else the built-in default), then CLI items,
/// deduplicated in order.
fn merge_vecs(
    default: &[&str],
    preset_vec: Option<Vec<String>>,
    cli_vec: Option<Vec<String>>,
) -> Vec<String> {
    let mut combined =
        preset_vec.unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect());
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn normalize_extension(ext: String) -> String {
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

pub fn resolve_config(
    cli: Cli,
    root: PathBuf,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    // CLI flag > root directory name > none
    let project_name = root.file_name().and_then(|n| n.to_str());
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = match preset_key.and_then(|k| presets.get(k)) {
        Some(p) => {
            log::debug!("Using preset {:?}", preset_key);
            p.clone()
        }
        None => {
            if let Some(name) = cli.preset.as_deref() {
                log::warn!("Preset '{}' not found, using defaults", name);
            }
            PresetConfig::default()
        }
    };

    let extensions = merge_vecs(
        DEFAULT_EXTENSIONS,
        preset.extensions.map(|v| v.into_iter().map(normalize_extension).collect()),
        cli.ext.map(|v| v.into_iter().map(normalize_extension).collect()),
    );

    // The log must never pick up a previous copy of itself.
    let own_name = cli
        .output
        .file_name()
        .map(|n| vec![n.to_string_lossy().into_owned()]);
    let cli_ignored_files = match (cli.ignore_file, own_name) {
        (Some(mut files), Some(own)) => {
            files.extend(own);
            Some(files)
        }
        (files, own) => files.or(own),
    };

    RuntimeConfig {
        filter: FilterConfig {
            extensions,
            ignored_files: merge_vecs(DEFAULT_IGNORED_FILES, preset.ignored_files, cli_ignored_files),
            ignored_dirs: merge_vecs(DEFAULT_IGNORED_DIRS, preset.ignored_dirs, cli.ignore_dir),
        },
        output: cli.output,
        root,
        print_map: !cli.no_print,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("project_mapper").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = resolve_config(cli(&[]), PathBuf::from("/work/bot"), &HashMap::new());

        assert_eq!(config.filter.extensions, DEFAULT_EXTENSIONS);
        assert_eq!(config.filter.ignored_files, DEFAULT_IGNORED_FILES);
        assert_eq!(config.filter.ignored_dirs, DEFAULT_IGNORED_DIRS);
        assert_eq!(config.output, PathBuf::from("output.log"));
        assert_eq!(config.root, PathBuf::from("/work/bot"));
        assert!(config.print_map);
    }

    #[test]
    fn test_cli_values_are_appended_and_normalized() {
        let config = resolve_config(
            cli(&["--ext", "ts", ".js", "--ignore-dir", "dist", "--no-print"]),
            PathBuf::from("/work/bot"),
            &HashMap::new(),
        );

        assert_eq!(
            config.filter.extensions,
            vec![".js", ".json", ".lua", ".otui", ".ts"]
        );
        assert_eq!(config.filter.ignored_dirs.last().map(String::as_str), Some("dist"));
        assert!(!config.print_map);
    }

    #[test]
    fn test_custom_output_name_is_ignored() {
        let config = resolve_config(
            cli(&["--output", "dump/context.txt", "--ignore-file", "secrets.json"]),
            PathBuf::from("/work/bot"),
            &HashMap::new(),
        );

        let ignored = &config.filter.ignored_files;
        assert!(ignored.contains(&"secrets.json".to_string()));
        assert!(ignored.contains(&"context.txt".to_string()));
        assert_eq!(ignored.iter().filter(|f| *f == "output.log").count(), 1);
    }

    #[test]
    fn test_preset_selected_by_directory_name() {
        let mut presets = HashMap::new();
        presets.insert(
            "bot".to_string(),
            PresetConfig {
                extensions: Some(vec!["rs".into()]),
                ignored_files: None,
                ignored_dirs: Some(vec!["target".into()]),
            },
        );

        let config = resolve_config(cli(&[]), PathBuf::from("/work/bot"), &presets);
        assert_eq!(config.filter.extensions, vec![".rs"]);
        assert_eq!(config.filter.ignored_dirs, vec!["target"]);
        assert_eq!(config.filter.ignored_files, DEFAULT_IGNORED_FILES);

        let other = resolve_config(cli(&[]), PathBuf::from("/work/site"), &presets);
        assert_eq!(other.filter.extensions, DEFAULT_EXTENSIONS);
    }

    #[test]
    fn test_explicit_preset_wins() {
        let mut presets = HashMap::new();
        presets.insert(
            "web".to_string(),
            PresetConfig {
                extensions: Some(vec![".html".into()]),
                ..Default::default()
            },
        );

        let config = resolve_config(
            cli(&["--preset", "web", "--ext", ".css"]),
            PathBuf::from("/work/bot"),
            &presets,
        );
        assert_eq!(config.filter.extensions, vec![".html", ".css"]);
    }

    #[test]
    fn test_no_presets_without_home() {
        assert!(load_presets(None).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_root_normalizes_parent() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("bot").join("src");
        fs::create_dir_all(&nested).unwrap();

        let root = resolve_root(&nested, Some(Path::new(".."))).unwrap();
        assert_eq!(root, fs::canonicalize(tmp.path().join("bot")).unwrap());
        assert_eq!(root.file_name().and_then(|n| n.to_str()), Some("bot"));

        let current = resolve_root(&nested, None).unwrap();
        assert_eq!(current, fs::canonicalize(&nested).unwrap());
    }

    #[test]
    fn test_resolve_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(resolve_root(tmp.path(), Some(Path::new("missing"))).is_err());
    }

    #[test]
    fn test_load_presets_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("presets.toml");

        assert!(load_presets_file(&path).unwrap().is_empty());

        fs::write(
            &path,
            "[bot]\nextensions = [\".lua\"]\nignored_dirs = [\"cache\"]\n\n[web]\nignored_files = [\"index.min.js\"]\n",
        )
        .unwrap();
        let presets = load_presets_file(&path).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets["bot"].extensions, Some(vec![".lua".to_string()]));
        assert_eq!(presets["web"].ignored_files, Some(vec!["index.min.js".to_string()]));

        fs::write(&path, "[bot\nextensions = 3").unwrap();
        assert!(load_presets_file(&path).is_err());
    }
}
