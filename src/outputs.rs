//! Named property values and plain-text files handed to downstream tooling.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Properties and files produced by a run.
///
/// Properties keep insertion order; a property set twice keeps its first
/// position and its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    properties: Vec<(String, String)>,
    files: Vec<(PathBuf, String)>,
}

impl Outputs {
    pub fn new() -> Self {
        Outputs::default()
    }

    /// Record a property; blank or missing names are ignored
    pub fn set_property(&mut self, name: Option<&str>, value: impl Into<String>) {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        let value = value.into();
        log::info!("Setting property '{}' to '{}'", name, value);

        match self.properties.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }

    /// Schedule a file write; missing paths are ignored
    pub fn set_file(&mut self, path: Option<&Path>, value: impl Into<String>) {
        if let Some(path) = path {
            self.files.push((path.to_path_buf(), value.into()));
        }
    }

    /// Value of a recorded property
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn files(&self) -> &[(PathBuf, String)] {
        &self.files
    }

    /// Properties as `name=value` lines
    pub fn render_properties(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{}={}\n", name, value))
            .collect()
    }

    /// Write every scheduled file as its value followed by a newline,
    /// creating parent directories as needed
    pub fn write_files(&self) -> Result<()> {
        for (path, value) in &self.files {
            write_value(path, value)?;
        }
        Ok(())
    }

    /// Write the rendered properties to `path`
    pub fn write_properties(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        log::info!("Writing {} properties to {}", self.properties.len(), path.display());
        fs::write(path, self.render_properties())?;
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `value` plus a trailing newline to `path`
pub fn write_value(path: &Path, value: &str) -> Result<()> {
    create_parent(path)?;
    log::info!("Writing '{}' to {}", value, path.display());
    fs::write(path, format!("{}\n", value))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_property_names_are_skipped() {
        let mut outputs = Outputs::new();
        outputs.set_property(None, "1.0");
        outputs.set_property(Some(""), "1.0");
        outputs.set_property(Some("   "), "1.0");
        assert!(outputs.properties().is_empty());
    }

    #[test]
    fn test_property_overwrite_keeps_position() {
        let mut outputs = Outputs::new();
        outputs.set_property(Some("releaseVersion"), "1.0");
        outputs.set_property(Some("tag"), "w-1.0");
        outputs.set_property(Some("releaseVersion"), "1.1");
        assert_eq!(outputs.render_properties(), "releaseVersion=1.1\ntag=w-1.0\n");
        assert_eq!(outputs.property("releaseVersion"), Some("1.1"));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("target").join("nested").join("version.txt");

        let mut outputs = Outputs::new();
        outputs.set_file(Some(&path), "1.0-20190322.100407-39");
        outputs.set_file(None, "ignored");
        outputs.write_files().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1.0-20190322.100407-39\n"
        );
        assert_eq!(outputs.files().len(), 1);
    }

    #[test]
    fn test_write_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release.properties");

        let mut outputs = Outputs::new();
        outputs.set_property(Some("tag"), "widget-1.57");
        outputs.write_properties(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "tag=widget-1.57\n");
    }
}
