//! Executable discovery on `PATH` and well-known locations.

use std::env;
use std::path::{Path, PathBuf};

/// Finds an executable by name.
///
/// Searches each `PATH` entry first, then the given fallback paths.
/// On Windows the extensions in `PATHEXT` are tried as well, the way
/// `where` resolves commands.
pub fn find_executable(name: &str, fallback_paths: &[&str]) -> Option<PathBuf> {
    if let Some(path_var) = env::var_os("PATH") {
        for dir in env::split_paths(&path_var) {
            if let Some(found) = find_in_dir(&dir, name) {
                return Some(found);
            }
        }
    }

    fallback_paths
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    candidate_names(name)
        .into_iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if Path::new(name).extension().is_some() {
        return names;
    }

    let pathext = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    names.extend(
        pathext
            .split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!("{}{}", name, ext.to_lowercase())),
    );
    names
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}
