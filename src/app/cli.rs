use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the contents of a project's source files and map its structure"
)]
pub struct Cli {
    /// Directory to map (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Log file to write, relative to the root
    #[arg(long, default_value = "output.log")]
    pub output: PathBuf,

    /// Use a predefined set of filters from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Extra accepted file extensions (e.g., '.ts' or 'ts')
    #[arg(long, num_args = 1..)]
    pub ext: Option<Vec<String>>,

    /// Extra filenames to skip
    #[arg(long, num_args = 1..)]
    pub ignore_file: Option<Vec<String>>,

    /// Extra directory names to skip at any depth
    #[arg(long, num_args = 1..)]
    pub ignore_dir: Option<Vec<String>>,

    /// Don't print the structure map to the console
    #[arg(long)]
    pub no_print: bool,
}
