/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use vtt2srt::app_config::OutputConfig;
use vtt2srt::errors::ConversionError;
use vtt2srt::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that the default output path swaps the extension
#[test]
fn test_default_output_path_withVttInput_shouldUseSrtExtension() {
    let output = FileManager::default_output_path(Path::new("/tmp/subs/movie.en.vtt"), "srt");
    assert_eq!(output, Path::new("/tmp/subs/movie.en.srt"));

    let output = FileManager::default_output_path(Path::new("captions"), "srt");
    assert_eq!(output, Path::new("captions.srt"));
}

/// Test that an output equal to the input gets the collision suffix
#[test]
fn test_avoid_collision_withSamePaths_shouldInsertSuffix() {
    let output = FileManager::avoid_collision("/tmp/movie.srt", "/tmp/movie.srt", "_out");
    assert_eq!(output, Path::new("/tmp/movie_out.srt"));

    let output = FileManager::avoid_collision("/tmp/movie", "/tmp/movie", "_out");
    assert_eq!(output, Path::new("/tmp/movie_out"));
}

/// Test that distinct paths are left alone
#[test]
fn test_avoid_collision_withDistinctPaths_shouldKeepOutput() {
    let output = FileManager::avoid_collision("/tmp/movie.vtt", "/tmp/movie.srt", "_out");
    assert_eq!(output, Path::new("/tmp/movie.srt"));
}

/// Test output path resolution with and without an explicit output
#[test]
fn test_resolve_output_path_withOptionalOutput_shouldPickCorrectPath() {
    let config = OutputConfig::default();
    let input = Path::new("/tmp/movie.vtt");

    assert_eq!(
        FileManager::resolve_output_path(input, None, &config),
        Path::new("/tmp/movie.srt")
    );
    assert_eq!(
        FileManager::resolve_output_path(input, Some(Path::new("/out/film.srt")), &config),
        Path::new("/out/film.srt")
    );
    assert_eq!(
        FileManager::resolve_output_path(input, Some(input), &config),
        Path::new("/tmp/movie_out.vtt")
    );
}

/// Test that a missing input is reported as such
#[test]
fn test_validate_paths_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.vtt");

    let result = FileManager::validate_paths(&missing, temp_dir.path().join("out.srt"));
    assert!(matches!(result, Err(ConversionError::InputNotFound(path)) if path == missing));

    Ok(())
}

/// Test that a missing output directory is reported as such
#[test]
fn test_validate_paths_withMissingOutputDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "input.vtt")?;

    let result = FileManager::validate_paths(&input, temp_dir.path().join("nope").join("out.srt"));
    assert!(matches!(result, Err(ConversionError::OutputDirNotFound(_))));

    Ok(())
}

/// Test that valid paths pass, including a bare file name for the output
#[test]
fn test_validate_paths_withValidPaths_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "input.vtt")?;

    FileManager::validate_paths(&input, temp_dir.path().join("out.srt"))?;
    FileManager::validate_paths(&input, "out.srt")?;

    Ok(())
}

/// Test that find_files walks subdirectories and ignores extension case
#[test]
fn test_find_files_withNestedDirectories_shouldFindAllMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    std::fs::create_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "a.vtt", "WEBVTT\n")?;
    common::create_test_file(&nested, "b.VTT", "WEBVTT\n")?;
    common::create_test_file(&nested, "c.srt", "1\n")?;

    let found = FileManager::find_files(temp_dir.path(), "vtt")?;
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("vtt"))));

    let found_with_dot = FileManager::find_files(temp_dir.path(), ".vtt")?;
    assert_eq!(found, found_with_dot);

    Ok(())
}
