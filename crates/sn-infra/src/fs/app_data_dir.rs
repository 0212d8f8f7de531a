use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the Sahayog Nidhi application data root directory.
///
/// # Platform-specific paths
/// - macOS: ~/Library/Application Support/SahayogNidhi
/// - Windows: %APPDATA%\SahayogNidhi
/// - Linux: $XDG_DATA_HOME/SahayogNidhi or ~/.local/share/SahayogNidhi
///
/// The directory is not created here; the caller decides when to create
/// it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("SahayogNidhi"))
}

/// Resolve the data directory, honouring a configured override.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => app_data_dir(),
    }
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get macOS data directory"))
    }

    #[cfg(target_os = "windows")]
    {
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get Windows APPDATA directory"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME wins when set, ~/.local/share otherwise.
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            Ok(PathBuf::from(xdg_data_home))
        } else {
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get Linux data directory"))
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        compile_error!("Unsupported platform for app_data_dir")
    }
}
