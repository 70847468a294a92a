use crate::app::models::ProjectStructure;
use crate::app::scanner::{relative_key, Scanner};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const MAP_TITLE: &str = "Project Structure Map:";
pub const MAP_RULE: &str = "----------------------";

/// Renders the structure map, one block per directory.
///
/// `indent` is the base indentation of directory lines; bullets sit two
/// spaces deeper.
pub fn render_map(structure: &ProjectStructure, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let bullet_pad = " ".repeat(indent + 2);
    let mut output = String::new();

    for (path, listing) in structure.iter() {
        output.push_str(&format!("{}{}\n", pad, path));
        for dir in &listing.directories {
            output.push_str(&format!("{}├── {}/\n", bullet_pad, dir));
        }
        for file in &listing.files {
            output.push_str(&format!("{}├── {}\n", bullet_pad, file));
        }
        output.push('\n');
    }

    output
}

pub fn print_map(structure: &ProjectStructure, indent: usize) {
    print!("{}", render_map(structure, indent));
}

/// Reads a file as UTF-8 text, substituting a placeholder line on failure.
pub fn read_content(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            format!("Error reading file: {}", e)
        }
    }
}

/// Writes every accepted file (path line, contents, blank line) followed by
/// the structure map to `output`.
///
/// The tree is walked again here rather than reusing `structure`.
pub fn write_log(scanner: &Scanner, structure: &ProjectStructure, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);

    write_contents(scanner, structure, &mut out)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let name = output.file_name().unwrap_or(output.as_os_str());
    println!("File '{}' has been successfully created.", name.to_string_lossy());
    Ok(())
}

fn write_contents(
    scanner: &Scanner,
    structure: &ProjectStructure,
    out: &mut impl Write,
) -> Result<()> {
    write_entries(scanner, out)?;
    write_map_section(structure, out)?;
    out.flush()?;
    Ok(())
}

fn write_entries(scanner: &Scanner, out: &mut impl Write) -> Result<()> {
    let mut count = 0usize;
    for dir in scanner.walk()? {
        for path in &dir.file_paths {
            writeln!(out, "{}", relative_key(scanner.root(), path))?;
            writeln!(out, "{}\n", read_content(path))?;
            count += 1;
        }
    }
    log::debug!("Wrote {} files", count);
    Ok(())
}

fn write_map_section(structure: &ProjectStructure, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", MAP_TITLE)?;
    writeln!(out, "{}", MAP_RULE)?;
    out.write_all(render_map(structure, 0).as_bytes())?;
    Ok(())
}
