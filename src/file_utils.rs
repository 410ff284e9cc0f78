use anyhow::{Result, Context};
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::app_config::OutputConfig;
use crate::errors::ConversionError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @generates: Output path next to the input, extension replaced
    pub fn default_output_path<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        input_file.as_ref().with_extension(extension)
    }

    /// Keep the output from overwriting the input.
    ///
    /// When both paths are equal, `suffix` is inserted between the file stem
    /// and the extension: `movie.srt` becomes `movie_out.srt`.
    pub fn avoid_collision<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_file: P2, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        if input_file != output_file {
            return output_file.to_path_buf();
        }

        let mut file_name = output_file.file_stem().unwrap_or_default().to_string_lossy().to_string();
        file_name.push_str(suffix);
        if let Some(ext) = output_file.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }

        output_file.with_file_name(file_name)
    }

    // @resolves: Final output path from the optional user choice
    pub fn resolve_output_path<P: AsRef<Path>>(input_file: P, output_file: Option<&Path>, config: &OutputConfig) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_file = match output_file {
            Some(path) => path.to_path_buf(),
            None => Self::default_output_path(input_file, &config.extension),
        };

        Self::avoid_collision(input_file, output_file, &config.collision_suffix)
    }

    /// Check that the input can be read and the output directory exists
    pub fn validate_paths<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_file: P2) -> Result<(), ConversionError> {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        if !input_file.exists() {
            return Err(ConversionError::InputNotFound(input_file.to_path_buf()));
        }

        let output_dir = match output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !Self::dir_exists(output_dir) {
            return Err(ConversionError::OutputDirNotFound(output_dir.to_path_buf()));
        }

        // Make sure the input is readable; the handle is dropped right away
        File::open(input_file)?;

        Ok(())
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }
}
