//! Host facts supplied to the parameter resolver.
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::FactsError;

/// Location of the os-release file consulted on Linux.
const OS_RELEASE: &str = "/etc/os-release";

/// Operating system family of the managed host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    /// Debian, Ubuntu and derivatives.
    Debian,
    /// RHEL, Fedora, CentOS and derivatives.
    RedHat,
    /// SUSE and openSUSE.
    Suse,
    /// Arch Linux and derivatives.
    Archlinux,
    /// Gentoo.
    Gentoo,
    /// macOS.
    Darwin,
    /// Windows.
    Windows,
    /// Any family without a dedicated variant.
    Other(String),
}

impl OsFamily {
    /// Parse a family name, case-insensitively.
    ///
    /// Unknown names are kept verbatim in [`OsFamily::Other`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debian" => Self::Debian,
            "redhat" => Self::RedHat,
            "suse" => Self::Suse,
            "archlinux" => Self::Archlinux,
            "gentoo" => Self::Gentoo,
            "darwin" => Self::Darwin,
            "windows" => Self::Windows,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// Map an os-release `ID`/`ID_LIKE` token to a family.
    fn from_os_release_id(id: &str) -> Option<Self> {
        match id {
            "debian" | "ubuntu" => Some(Self::Debian),
            "rhel" | "fedora" | "centos" => Some(Self::RedHat),
            "suse" | "opensuse" | "sles" => Some(Self::Suse),
            "arch" => Some(Self::Archlinux),
            "gentoo" => Some(Self::Gentoo),
            _ => None,
        }
    }

    /// Determine the family from the contents of an os-release file.
    ///
    /// `ID` is consulted first, then each `ID_LIKE` token. A distribution
    /// matching none of them yields [`OsFamily::Other`] with its `ID`.
    #[must_use]
    pub fn from_os_release(content: &str) -> Self {
        let mut id = None;
        let mut id_like = Vec::new();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').trim_matches('\'');
            match key.trim() {
                "ID" => id = Some(value.to_ascii_lowercase()),
                "ID_LIKE" => {
                    id_like = value
                        .split_whitespace()
                        .map(str::to_ascii_lowercase)
                        .collect();
                }
                _ => {}
            }
        }

        id.iter()
            .chain(id_like.iter())
            .find_map(|token| Self::from_os_release_id(token))
            .unwrap_or_else(|| Self::Other(id.unwrap_or_else(|| "unknown".to_string())))
    }

    /// Whether this family has a dedicated variant.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debian => write!(f, "Debian"),
            Self::RedHat => write!(f, "RedHat"),
            Self::Suse => write!(f, "Suse"),
            Self::Archlinux => write!(f, "Archlinux"),
            Self::Gentoo => write!(f, "Gentoo"),
            Self::Darwin => write!(f, "Darwin"),
            Self::Windows => write!(f, "windows"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for OsFamily {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read-only host facts available to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facts {
    /// Operating system family.
    pub os_family: OsFamily,
}

impl Facts {
    /// Create facts with an explicit OS family.
    #[must_use]
    pub const fn new(os_family: OsFamily) -> Self {
        Self { os_family }
    }

    /// Detect facts for the current host.
    ///
    /// # Errors
    ///
    /// Returns [`FactsError::DetectionFailed`] if `/etc/os-release` cannot be
    /// read on Linux.
    pub fn detect() -> Result<Self, FactsError> {
        if cfg!(target_os = "linux") {
            Self::from_os_release_file(Path::new(OS_RELEASE))
        } else if cfg!(target_os = "macos") {
            Ok(Self::new(OsFamily::Darwin))
        } else if cfg!(target_os = "windows") {
            Ok(Self::new(OsFamily::Windows))
        } else {
            Ok(Self::new(OsFamily::Other(std::env::consts::OS.to_string())))
        }
    }

    /// Detect facts from an os-release style file.
    ///
    /// # Errors
    ///
    /// Returns [`FactsError::DetectionFailed`] if the file cannot be read.
    pub fn from_os_release_file(path: &Path) -> Result<Self, FactsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FactsError::DetectionFailed(format!("{}: {e}", path.display())))?;
        Ok(Self::new(OsFamily::from_os_release(&content)))
    }
}
