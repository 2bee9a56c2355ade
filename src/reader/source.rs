//! Dataset source locations.

use std::fmt;
use std::path::{Path, PathBuf};

/// File format of a dataset source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

/// Where the patient records are read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Local file
    Path(PathBuf),
    /// HTTP(S) resource
    Url(String),
}

impl DataSource {
    /// Interpret a location string, treating `http://` and `https://` prefixes as URLs
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }

    /// Format inferred from the file extension (`.parquet`, otherwise CSV)
    #[must_use]
    pub fn format(&self) -> SourceFormat {
        let name = match self {
            Self::Path(path) => path.to_string_lossy().to_string(),
            // Ignore query strings and fragments
            Self::Url(url) => url
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let is_parquet = Path::new(&name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

        if is_parquet {
            SourceFormat::Parquet
        } else {
            SourceFormat::Csv
        }
    }

    /// Whether the source must be fetched over the network
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        Self::parse(location)
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
