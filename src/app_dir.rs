use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const QUALIFIER: &str = ""; // Typically empty on macOS and Linux
const ORGANIZATION: &str = "";
const APPLICATION: &str = "Collectooor-Fund";

pub fn app_user_data_dir_path() -> Result<PathBuf, std::io::Error> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine project directories",
        )
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

pub fn create_app_user_data_directory_if_not_exists() -> Result<PathBuf, std::io::Error> {
    let app_data_dir = app_user_data_dir_path()?;
    ensure_directory(&app_data_dir)?;
    Ok(app_data_dir)
}

pub fn app_user_data_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if filename.is_empty() || filename.contains(std::path::is_separator) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid filename",
        ));
    }
    let app_data_dir = app_user_data_dir_path()?;
    Ok(app_data_dir.join(filename))
}

/// Seeds `<app dir>/.env` from `.env.example` next to the executable on first start.
///
/// Returns whether a file was copied.
pub fn copy_env_file_if_not_exists(app_data_dir: &Path) -> Result<bool, std::io::Error> {
    let env_file_in_app_dir = app_data_dir.join(".env");
    if env_file_in_app_dir.is_file() {
        return Ok(false);
    }
    let env_example_file = PathBuf::from(".env.example");
    if !env_example_file.is_file() {
        return Ok(false);
    }
    fs::copy(&env_example_file, &env_file_in_app_dir)?;
    Ok(true)
}

fn ensure_directory(dir: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;

    let metadata = fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(std::io::Error::other("Created path is not a directory"));
    }
    Ok(())
}
