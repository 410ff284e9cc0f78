/*!
 * WebVTT cue block parsing.
 *
 * The parser works line by line. Whether a line is a timing line, cue text or
 * the start of a metadata block depends on its position inside the current
 * block, so segmentation is driven by a small state machine instead of a
 * grammar. Its output is a flat list of normalized lines where each cue block
 * is separated from the next one by exactly one empty line. The header and
 * STYLE/REGION blocks are dropped.
 */

use std::io::{self, BufRead};
use log::{debug, trace};

// @const: Separator between the start and end timestamps of a cue
const TIMING_SEPARATOR: &str = "-->";

// @const: Signature every WebVTT file starts with
const FILE_SIGNATURE: &str = "WEBVTT";

// @const: Keywords opening metadata blocks that are skipped
const METADATA_KEYWORDS: [&str; 2] = ["STYLE", "REGION"];

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Replace characters that must never reach the block collector.
///
/// NUL becomes U+FFFD, then every CRLF pair and every remaining lone CR
/// becomes LF.
pub fn replace_invalid_characters(input: &str) -> String {
    input
        .replace('\u{0000}', "\u{FFFD}")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Line reader over a raw byte stream
///
/// LF, CRLF and a lone CR each end a line. Returned lines are normalized with
/// [`replace_invalid_characters`] and carry no terminator. One line can be
/// pushed back so the next read starts at it again.
pub struct LineReader<R> {
    input: R,
    pending: Option<String>,
    first_line: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader {
            input,
            pending: None,
            first_line: true,
        }
    }

    /// Read the next line, or `None` once the input is exhausted.
    ///
    /// A final line without terminator is still returned; only the call after
    /// it reports the end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        let mut raw = Vec::new();
        self.read_raw_line(&mut raw)?;
        if raw.is_empty() {
            return Ok(None);
        }

        let mut line = replace_invalid_characters(&String::from_utf8_lossy(&raw));
        if line.ends_with('\n') {
            line.pop();
        }

        if self.first_line {
            self.first_line = false;
            if let Some(stripped) = line.strip_prefix(BYTE_ORDER_MARK) {
                line = stripped.to_string();
            }
        }

        Ok(Some(line))
    }

    /// Push a line back; the next `read_line` returns it.
    pub fn unread_line(&mut self, line: String) {
        debug_assert!(self.pending.is_none(), "only one line can be pushed back");
        self.pending = Some(line);
    }

    /// Whether no line remains to be read
    pub fn at_end(&mut self) -> io::Result<bool> {
        if self.pending.is_some() {
            return Ok(false);
        }
        Ok(self.peek_byte()?.is_none())
    }

    /// Whether the next line is empty, judged from its first character only
    pub fn at_blank_line(&mut self) -> io::Result<bool> {
        if let Some(line) = &self.pending {
            return Ok(line.is_empty());
        }
        Ok(matches!(self.peek_byte()?, Some(b'\n' | b'\r')))
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    // Appends the bytes of one raw line, terminator included, to `buf`.
    fn read_raw_line(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        loop {
            let available = self.input.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(index) => {
                    let terminator = available[index];
                    buf.extend_from_slice(&available[..=index]);
                    self.input.consume(index + 1);

                    if terminator == b'\r' && self.peek_byte()? == Some(b'\n') {
                        buf.push(b'\n');
                        self.input.consume(1);
                    }
                    return Ok(());
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.input.consume(len);
                }
            }
        }
    }
}

/// Check that the first line of `input` is a WebVTT signature.
///
/// The line must start with `WEBVTT`, followed by nothing, a space or a tab.
/// A read error counts as an invalid file. Only the first line is consumed.
pub fn validate_header<R: BufRead>(input: R) -> bool {
    let mut reader = LineReader::new(input);
    match reader.read_line() {
        Ok(Some(line)) => is_signature_line(&line),
        Ok(None) => false,
        Err(e) => {
            debug!("Failed to read the first line: {}", e);
            false
        }
    }
}

fn is_signature_line(line: &str) -> bool {
    match line.strip_prefix(FILE_SIGNATURE) {
        Some(rest) => matches!(rest.chars().next(), None | Some(' ' | '\t' | '\n')),
        None => false,
    }
}

fn is_metadata_block_start(line: &str) -> bool {
    METADATA_KEYWORDS.iter().any(|keyword| line.starts_with(keyword))
}

/// WebVTT parser producing the normalized cue line sequence
pub struct VttParser<R> {
    reader: LineReader<R>,
}

impl<R: BufRead> VttParser<R> {
    /// Create a parser reading from the start of a WebVTT stream
    pub fn new(input: R) -> Self {
        VttParser {
            reader: LineReader::new(input),
        }
    }

    /// Parse the whole stream.
    ///
    /// The header is discarded. Cue blocks follow each other separated by one
    /// empty line, however many blank lines separated them in the input.
    pub fn parse_all_cues(&mut self) -> io::Result<Vec<String>> {
        self.parse_header()?;

        let mut output: Vec<String> = Vec::new();
        loop {
            self.skip_blank_lines()?;

            if let Some(cue) = self.parse_cue()? {
                output.extend(cue);
            }

            if self.reader.at_end()? {
                break;
            }

            if output.last().is_some_and(|line| !line.is_empty()) {
                output.push(String::new());
            }
        }

        debug!("Parsed {} cue lines", output.len());
        Ok(output)
    }

    /// Collect the header block. Returns `None` when the header is empty.
    pub fn parse_header(&mut self) -> io::Result<Option<Vec<String>>> {
        if self.reader.at_blank_line()? {
            return Ok(None);
        }
        self.collect_block(true)
    }

    /// Collect the next cue block
    pub fn parse_cue(&mut self) -> io::Result<Option<Vec<String>>> {
        self.collect_block(false)
    }

    // Block state machine. A timing line is only accepted as the first line of
    // a cue, or as its second line when the first was not a timing line. Any
    // other timing line is pushed back and ends the block.
    fn collect_block(&mut self, in_header: bool) -> io::Result<Option<Vec<String>>> {
        let mut block = Vec::new();
        let mut line_count = 0;
        let mut seen_arrow = false;

        while let Some(raw_line) = self.reader.read_line()? {
            let line = raw_line.trim();
            line_count += 1;

            if line.contains(TIMING_SEPARATOR) {
                if !in_header && (line_count == 1 || (line_count == 2 && !seen_arrow)) {
                    seen_arrow = true;
                    block.push(line.to_string());
                } else {
                    trace!("Timing line at block line {} starts a new block", line_count);
                    self.reader.unread_line(line.to_string());
                    break;
                }
            } else if line.is_empty() {
                break;
            } else if !in_header && line_count == 2 && is_metadata_block_start(line) {
                debug!("Skipping unsupported metadata block: {}", line);
                self.skip_to_blank_line()?;
                break;
            } else {
                block.push(line.to_string());
            }
        }

        if block.is_empty() {
            Ok(None)
        } else {
            Ok(Some(block))
        }
    }

    fn skip_blank_lines(&mut self) -> io::Result<()> {
        while self.reader.at_blank_line()? {
            self.reader.read_line()?;
        }
        Ok(())
    }

    fn skip_to_blank_line(&mut self) -> io::Result<()> {
        while let Some(line) = self.reader.read_line()? {
            if line.trim().is_empty() {
                break;
            }
        }
        Ok(())
    }
}
