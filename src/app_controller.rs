use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::file_utils::FileManager;
use crate::srt_formatter::{self, SrtFormatter};
use crate::vtt_parser::{self, VttParser};

// @module: Application controller for subtitle conversion

// @const: Extension of the files picked up in folder mode
const VTT_EXTENSION: &str = "vtt";

/// Outcome counts of a folder run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for WebVTT to SRT conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a WebVTT stream and reformat it as SRT lines.
    ///
    /// Returns the lines together with the number of cues they hold. The
    /// header is not checked here; see [`vtt_parser::validate_header`].
    pub fn convert_reader<R: BufRead>(input: R) -> io::Result<(Vec<String>, usize)> {
        let cue_lines = VttParser::new(input).parse_all_cues()?;
        let mut formatter = SrtFormatter::new();
        let srt_lines = formatter.reformat(cue_lines);
        Ok((srt_lines, formatter.cue_count()))
    }

    /// Convert one file, returning the number of cues written.
    ///
    /// The header check and the conversion each open their own handle on the
    /// input. Nothing is written when the header check fails.
    pub fn convert_file(&self, input_file: &Path, output_file: &Path) -> Result<usize, ConversionError> {
        FileManager::validate_paths(input_file, output_file)?;

        let valid = vtt_parser::validate_header(BufReader::new(File::open(input_file)?));
        if !valid {
            return Err(ConversionError::InvalidFormat(input_file.to_path_buf()));
        }

        let (srt_lines, cue_count) = Self::convert_reader(BufReader::new(File::open(input_file)?))?;

        let mut writer = BufWriter::new(File::create(output_file)?);
        srt_formatter::write_srt_lines(&mut writer, &srt_lines, self.config.output.line_ending)?;
        writer.flush()?;

        debug!("Wrote {} lines to {}", srt_lines.len(), output_file.display());
        Ok(cue_count)
    }

    /// Run the conversion of a single file.
    ///
    /// Returns the output path, or `None` when the output already exists and
    /// `force_overwrite` is off.
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(ConversionError::InputNotFound(input_file.to_path_buf()).into());
        }

        let output_path = FileManager::resolve_output_path(input_file, output_file, &self.config.output);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", output_path.display());
            return Ok(None);
        }

        let cue_count = self.convert_file(input_file, &output_path)?;

        info!(
            "Done: {} ({} cues in {})",
            output_path.display(),
            cue_count,
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Run the conversion on every WebVTT file below a directory.
    ///
    /// Each SRT file is written next to its source. A failing file is logged
    /// and counted, and the run moves on to the next one.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let vtt_files = FileManager::find_files(input_dir, VTT_EXTENSION)?;
        if vtt_files.is_empty() {
            warn!("No WebVTT files found in directory: {:?}", input_dir);
            return Ok(FolderSummary::default());
        }

        let folder_pb = ProgressBar::new(vtt_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for vtt_file in &vtt_files {
            let file_name = vtt_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Converting: {}", file_name));

            match folder_pb.suspend(|| self.run(vtt_file, None, force_overwrite)) {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    folder_pb.suspend(|| error!("Error converting file {}: {}", file_name, e));
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder conversion completed in {}: {} converted, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.converted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
