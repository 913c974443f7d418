// Guess a project's language from the files in its root directory
use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Detect the language of the project rooted at `dir`.
///
/// Returns `None` when no known marker file is present or the directory
/// cannot be read.
pub fn detect_language(dir: &Path) -> Option<&'static str> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Could not read {}: {}", dir.display(), e);
            return None;
        }
    };

    let names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    let language = detect_from_names(names.iter().map(String::as_str));
    debug!("Detected language {:?} in {}", language, dir.display());
    language
}

/// First matching marker wins, so TypeScript beats plain JavaScript
pub fn detect_from_names<'a, I>(names: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let files: HashSet<&str> = names.into_iter().collect();
    let has = |name: &str| files.contains(name);

    if has("tsconfig.json") && has("package.json") {
        Some("typescript")
    } else if has("package.json") {
        Some("javascript")
    } else if has("Cargo.toml") {
        Some("rust")
    } else if has("go.mod") {
        Some("go")
    } else if files.iter().any(|f| f.ends_with(".csproj")) {
        Some("c#")
    } else if has("pyproject.toml") || has("requirements.txt") {
        Some("python")
    } else if has("Gemfile") {
        Some("ruby")
    } else if has("pom.xml") || has("build.gradle") {
        Some("java")
    } else if has("mix.exs") {
        Some("elixir")
    } else if has("Package.swift") {
        Some("swift")
    } else {
        None
    }
}
