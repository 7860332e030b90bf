//! Validated display name for the produced executable.

use crate::bundler::error::{Error, Result};
use std::fmt;

/// Characters no mainstream filesystem accepts in a file name.
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Windows device names, reserved with or without an extension.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Name the bundler gives the executable.
///
/// The artifact is written as `<name><EXE_SUFFIX>`, so the name has to be a
/// valid single path component on every target filesystem. Construction via
/// [`DisplayName::new`] enforces that.
///
/// # Examples
///
/// ```
/// use app_packager::bundler::DisplayName;
///
/// assert!(DisplayName::new("출석관리시스템").is_ok());
/// assert!(DisplayName::new("bin/app").is_err());
/// assert!(DisplayName::new("nul").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validates `name` and wraps it.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reject = |reason: &str| {
            Err(Error::InvalidDisplayName {
                name: name.clone(),
                reason: reason.to_string(),
            })
        };

        if name.trim().is_empty() {
            return reject("name is empty");
        }
        if let Some(c) = name.chars().find(|c| RESERVED_CHARS.contains(c)) {
            return reject(&format!("contains reserved character '{c}'"));
        }
        if name.chars().any(char::is_control) {
            return reject("contains a control character");
        }
        if name.ends_with('.') || name.ends_with(' ') {
            return reject("ends with a dot or space");
        }
        if name == "." || name == ".." {
            return reject("is a relative path component");
        }

        let stem = name.split('.').next().unwrap_or_default().trim_end();
        if RESERVED_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(stem))
        {
            return reject("is a reserved device name");
        }

        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the executable on this platform.
    pub fn executable_file_name(&self) -> String {
        format!("{}{}", self.0, std::env::consts::EXE_SUFFIX)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_unicode_and_spaces_inside() {
        assert!(DisplayName::new("출석관리시스템").is_ok());
        assert!(DisplayName::new("Attendance Manager 2").is_ok());
        assert!(DisplayName::new("app.v2").is_ok());
    }

    #[test]
    fn rejects_separators_and_reserved_chars() {
        for bad in ["dir/app", "dir\\app", "a:b", "what?", "star*", "pipe|", "<x>", "q\"uote"] {
            assert!(DisplayName::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn rejects_empty_and_trailing_dot_or_space() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("app.").is_err());
        assert!(DisplayName::new("app ").is_err());
        assert!(DisplayName::new("..").is_err());
    }

    #[test]
    fn rejects_device_names_in_any_case() {
        assert!(DisplayName::new("CON").is_err());
        assert!(DisplayName::new("com1").is_err());
        assert!(DisplayName::new("Lpt9.txt").is_err());
        assert!(DisplayName::new("CONSOLE").is_ok());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(DisplayName::new("tab\there").is_err());
    }

    #[test]
    fn executable_file_name_uses_platform_suffix() {
        let name = DisplayName::new("DisplayName").unwrap();
        if cfg!(windows) {
            assert_eq!(name.executable_file_name(), "DisplayName.exe");
        } else {
            assert_eq!(name.executable_file_name(), "DisplayName");
        }
    }
}
