/*!
 * # vtt2srt - WebVTT to SubRip converter
 *
 * A Rust library for converting WebVTT subtitle files into SubRip Text (SRT).
 *
 * ## Features
 *
 * - Tolerant WebVTT parsing: CRLF/CR line endings, NUL bytes, blank-line runs
 * - Header and STYLE/REGION block removal
 * - Sequential cue renumbering starting at 1
 * - `[hh:]mm:ss.zzz` to `hh:mm:ss,zzz` timestamp rewriting
 * - Single file and recursive folder conversion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `vtt_parser`: Line normalization, header check and cue block segmentation
 * - `srt_formatter`: Timestamp conversion, cue renumbering and SRT line writing
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod srt_formatter;
pub mod vtt_parser;

// Re-export main types for easier usage
pub use app_config::{Config, LineEnding};
pub use app_controller::{Controller, FolderSummary};
pub use errors::ConversionError;
pub use srt_formatter::{convert_timestamp, reformat, SrtFormatter};
pub use vtt_parser::{validate_header, VttParser};
