// Cache path utilities.
// Locates the single activity cache file under the platform cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

const CACHE_FILE_NAME: &str = "activity_cache.json";

/// Get the base cache directory (~/.cache/octofeed on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "octofeed").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the activity cache file.
pub fn cache_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(CACHE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_under_cache_dir() {
        if let Some(path) = cache_file() {
            assert!(path.ends_with("activity_cache.json"));
            assert!(path.starts_with(cache_dir().unwrap()));
        }
    }
}
