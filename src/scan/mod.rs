//! Declaration scanning.
//!
//! Reads declaration files into structural descriptors before any resolution
//! happens. Each file holds at most one package clause, followed by
//! `component` and `class` blocks:
//!
//! ```text
//! package com.example;
//!
//! component AppComponent {
//!     entities Preference_UserProfile;
//!     inject MainActivity;
//! }
//!
//! class MainActivity {
//!     @InjectPreference Preference_UserProfile userProfile;
//!     String title;
//! }
//! ```

mod parser;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GenError;
use crate::model::{ComponentDeclaration, ConsumerClass};

pub use parser::parse_declarations;

/// Annotation marking a field for injection.
pub const INJECT_MARKER: &str = "InjectPreference";

/// A component declaration together with the classes it injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    pub component: ComponentDeclaration,
    /// Qualified names of the consumer classes, in declaration order.
    pub injects: Vec<String>,
}

/// Everything declared in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFile {
    pub path: PathBuf,
    pub package: String,
    pub components: Vec<ComponentEntry>,
    pub classes: Vec<ConsumerClass>,
}

/// Reads and parses a single declaration file.
pub fn scan_file(path: &Path) -> Result<DeclarationFile, GenError> {
    let source = fs::read_to_string(path)?;
    parse_declarations(path, &source)
}

/// Recursively scans `dir` for files with the given extension.
///
/// Files are visited in path order so that a pass is deterministic.
pub fn scan_dir(dir: &Path, extension: &str) -> Result<Vec<DeclarationFile>, GenError> {
    let mut paths = Vec::new();
    collect_paths(dir, extension, &mut paths)?;
    paths.sort();

    tracing::info!("Scanning {} declaration file(s) in {}", paths.len(), dir.display());

    paths.iter().map(|path| scan_file(path)).collect()
}

fn collect_paths(dir: &Path, extension: &str, paths: &mut Vec<PathBuf>) -> Result<(), GenError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_paths(&path, extension, paths)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    Ok(())
}
