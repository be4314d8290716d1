//! This module provides the `TableLoader` struct, responsible for loading transition tables
//! from various sources, including files, strings, and directories.

use crate::parser::parse;
use crate::types::{AutomatonError, TransitionTable, MAX_TABLE_SIZE, TABLE_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};

/// `TableLoader` is a utility struct for loading transition tables.
/// It provides methods to load tables from individual files, from string content,
/// and to discover and load all `.dfa` files within a specified directory.
pub struct TableLoader;

impl TableLoader {
    /// Loads a single transition table from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if the file is successfully read and parsed.
    /// * `Err(AutomatonError::FileError)` if the file cannot be read or is too large.
    /// * `Err(AutomatonError::ParseError)` or `Err(AutomatonError::ValidationError)` if the
    ///   file content is not a valid table.
    pub fn load_table(path: &Path) -> Result<TransitionTable, AutomatonError> {
        let metadata = fs::metadata(path).map_err(|e| {
            AutomatonError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if metadata.len() > MAX_TABLE_SIZE {
            return Err(AutomatonError::FileError(format!(
                "File {} is {} bytes, larger than the {} byte limit",
                path.display(),
                metadata.len(),
                MAX_TABLE_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single transition table from the provided string content.
    pub fn load_table_from_string(content: &str) -> Result<TransitionTable, AutomatonError> {
        parse(content)
    }

    /// Loads all table files (`.dfa` extension) from a given directory.
    ///
    /// Subdirectories and files with other extensions are skipped. Each loaded file is paired
    /// with its own result, so a malformed table keeps its `ParseError` or `ValidationError`.
    /// Entries are ordered by path.
    ///
    /// # Returns
    ///
    /// * `Ok(entries)` once the directory has been listed.
    /// * `Err(AutomatonError::FileError)` if the directory itself cannot be read.
    pub fn load_tables(directory: &Path) -> Result<Vec<TableEntry>, AutomatonError> {
        let listing_error = |e: std::io::Error| {
            AutomatonError::FileError(format!(
                "Failed to read directory {}: {}",
                directory.display(),
                e
            ))
        };

        let mut paths = fs::read_dir(directory)
            .map_err(listing_error)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(listing_error)?;

        paths.retain(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == TABLE_EXTENSION)
        });
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| {
                let table = Self::load_table(&path);
                if let Err(e) = &table {
                    log::debug!("Failed to load table {}: {}", path.display(), e);
                }
                (path, table)
            })
            .collect())
    }
}

/// A table file found by [`TableLoader::load_tables`] and the outcome of loading it.
pub type TableEntry = (PathBuf, Result<TransitionTable, AutomatonError>);
