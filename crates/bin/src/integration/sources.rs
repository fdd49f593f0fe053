//! Company universe resolution.
//!
//! Sources are tried in order:
//! 1. an explicit path (`--universe` or `COMPS_UNIVERSE`),
//! 2. `companies.csv` in the platform config directory,
//! 3. the sample universe compiled into the binary.

use comps::{CompanyUniverse, UniverseError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name looked up in the config directory.
pub(crate) const UNIVERSE_FILE: &str = "companies.csv";

/// Where a universe was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UniverseSource {
    /// Path given on the command line or in the environment.
    Explicit(PathBuf),
    /// File found in the config directory.
    ConfigDir(PathBuf),
    /// Compiled-in sample.
    Embedded,
}

impl fmt::Display for UniverseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::ConfigDir(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("embedded sample"),
        }
    }
}

/// Get the default config directory.
///
/// Uses platform-specific config directories:
/// - Linux: `~/.config/comps/`
/// - macOS: `~/Library/Application Support/comps/`
/// - Windows: `%APPDATA%\comps\`
pub(crate) fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("comps"))
}

/// Pick the universe source.
pub(crate) fn resolve_source(explicit: Option<&Path>, config_dir: Option<&Path>) -> UniverseSource {
    if let Some(path) = explicit {
        return UniverseSource::Explicit(path.to_path_buf());
    }
    config_dir
        .map(|dir| dir.join(UNIVERSE_FILE))
        .filter(|candidate| candidate.is_file())
        .map_or(UniverseSource::Embedded, UniverseSource::ConfigDir)
}

/// Load the universe from a source.
pub(crate) fn load_universe(source: &UniverseSource) -> Result<CompanyUniverse, UniverseError> {
    let universe = match source {
        UniverseSource::Explicit(path) | UniverseSource::ConfigDir(path) => {
            CompanyUniverse::from_path(path)?
        }
        UniverseSource::Embedded => CompanyUniverse::embedded()?,
    };
    info!(source = %source, companies = universe.len(), "company universe loaded");
    Ok(universe)
}
