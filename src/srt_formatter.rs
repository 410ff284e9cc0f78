use std::io::{self, Write};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::app_config::LineEnding;

// @module: SRT cue renumbering and timestamp rewriting

// @const: WebVTT timestamp regex, hours optional
static VTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([0-9]{2}):)?([0-9]{2}):([0-9]{2})[^0-9]([0-9]{3})")
        .expect("WebVTT timestamp pattern must compile")
});

// @const: Timing separator as written between two timestamps
const SRT_TIMING_SEPARATOR: &str = " --> ";

// @const: Hour field used when the WebVTT timestamp has none
const DEFAULT_HOURS: &str = "00";

/// Convert a WebVTT `[hh:]mm:ss.zzz` timestamp to the SRT `hh:mm:ss,zzz` form.
///
/// Fields are copied as written; nothing is re-validated, so out-of-range
/// minutes or seconds pass through unchanged. Text after the timestamp (cue
/// settings such as `align:start`) is dropped. Input that contains no
/// timestamp is returned as is.
pub fn convert_timestamp(timestamp: &str) -> String {
    match VTT_TIMESTAMP_REGEX.captures(timestamp) {
        Some(caps) => format!(
            "{}:{}:{},{}",
            caps.get(1).map_or(DEFAULT_HOURS, |m| m.as_str()),
            &caps[2],
            &caps[3],
            &caps[4]
        ),
        None => timestamp.to_string(),
    }
}

/// Rewrites parsed WebVTT cue lines as SRT lines
///
/// The cue counter lives in the formatter, so one instance numbers one
/// conversion run starting at 1.
#[derive(Debug)]
pub struct SrtFormatter {
    // @field: Number given to the next cue
    next_cue: usize,
}

impl Default for SrtFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SrtFormatter {
    pub fn new() -> Self {
        SrtFormatter { next_cue: 1 }
    }

    /// Number of cues emitted so far
    pub fn cue_count(&self) -> usize {
        self.next_cue - 1
    }

    /// Reformat a cue line sequence.
    ///
    /// Lines are skipped until one contains ` --> `. That line becomes the cue
    /// number followed by the converted timing line, then every following
    /// line is copied verbatim up to and including the next empty line.
    /// Source cue identifiers are never reused.
    pub fn reformat<I>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut lines = lines.into_iter();
        let mut output = Vec::new();

        while let Some(line) = lines.next() {
            if !line.contains(SRT_TIMING_SEPARATOR) {
                continue;
            }

            output.push(self.next_cue.to_string());

            let mut timestamps = line.split(SRT_TIMING_SEPARATOR);
            let (Some(start), Some(end)) = (timestamps.next(), timestamps.next()) else {
                warn!("Timing line without two timestamps: {}", line);
                continue;
            };
            output.push(format!(
                "{}{}{}",
                convert_timestamp(start),
                SRT_TIMING_SEPARATOR,
                convert_timestamp(end)
            ));

            for body_line in lines.by_ref() {
                let ends_cue = body_line.is_empty();
                output.push(body_line);
                if ends_cue {
                    break;
                }
            }

            self.next_cue += 1;
        }

        debug!("Reformatted {} cues", self.cue_count());
        output
    }
}

/// Reformat a full cue line sequence with a fresh cue counter
pub fn reformat<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    SrtFormatter::new().reformat(lines)
}

/// Write SRT lines, each followed by `line_ending`.
///
/// A final blank line is added when the last line is not already blank, so
/// the last cue is terminated like every other one.
pub fn write_srt_lines<W: Write>(writer: &mut W, lines: &[String], line_ending: LineEnding) -> io::Result<()> {
    let terminator = line_ending.as_str();

    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(terminator.as_bytes())?;
    }

    if lines.last().is_some_and(|line| !line.is_empty()) {
        writer.write_all(terminator.as_bytes())?;
    }

    Ok(())
}
