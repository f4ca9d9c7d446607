/*!
 * SRT grammar parsing.
 *
 * The ingestion pipeline treats grammar parsing as an opaque capability:
 * text goes in, ordered `(index, start, end, content)` records come out, or a
 * grammar error is reported. `SubtitleGrammar` is that seam and `SrtGrammar`
 * is the strict implementation shipped with the crate.
 */

use std::fmt::Debug;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GrammarError;

// @const: SRT timing line, optional trailing display coordinates
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})\s*-->\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})(?:\s.*)?$",
    )
    .unwrap()
});

/// One record produced by a grammar parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtRecord {
    /// Index as written in the file
    pub index: u64,
    /// Start offset from the beginning of the file
    pub start: Duration,
    /// End offset from the beginning of the file
    pub end: Duration,
    /// Text lines joined with `\n`
    pub content: String,
}

/// Grammar parser seam consumed by the ingestion pipeline
pub trait SubtitleGrammar: Send + Sync + Debug {
    /// Parse decoded subtitle text into ordered records
    ///
    /// Structurally valid text without any block (e.g. only blank lines)
    /// yields an empty vector, not an error.
    fn parse(&self, text: &str) -> Result<Vec<SrtRecord>, GrammarError>;
}

/// Strict SRT grammar
///
/// Blocks are an index line, a timing line and zero or more text lines.
/// A block ends where the next index + timing pair begins, whether or not a
/// blank line separates them; blank lines inside text are kept. CRLF line
/// endings and a leading byte order mark are accepted. Anything that is not
/// a block where a block must start is a grammar error; nothing is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtGrammar;

impl SrtGrammar {
    pub fn new() -> Self {
        SrtGrammar
    }

    /// Parse a timing line into its start and end offsets
    fn parse_timing(line_no: usize, line: &str) -> Result<(Duration, Duration), GrammarError> {
        let caps = TIMING_REGEX
            .captures(line)
            .ok_or_else(|| GrammarError::ExpectedTiming {
                line: line_no,
                found: line.to_string(),
            })?;

        let invalid = || GrammarError::InvalidTimestamp {
            line: line_no,
            value: line.to_string(),
        };

        let start = Self::timestamp_from_captures(&caps, 1).ok_or_else(invalid)?;
        let end = Self::timestamp_from_captures(&caps, 5).ok_or_else(invalid)?;
        Ok((start, end))
    }

    /// Build a duration from four consecutive capture groups (h, m, s, ms)
    fn timestamp_from_captures(caps: &regex::Captures, start_idx: usize) -> Option<Duration> {
        let part = |offset: usize| -> Option<u64> {
            caps.get(start_idx + offset)?.as_str().parse().ok()
        };

        // Minute and second fields of 60 or more carry over, like a plain sum
        let (hours, minutes, seconds, millis) = (part(0)?, part(1)?, part(2)?, part(3)?);
        let total_ms = hours
            .checked_mul(3_600_000)?
            .checked_add(minutes * 60_000 + seconds * 1_000 + millis)?;
        Some(Duration::from_millis(total_ms))
    }

    /// True when `lines[at]` is an index line directly followed by a timing line
    fn starts_block(lines: &[&str], at: usize) -> bool {
        match (lines.get(at), lines.get(at + 1)) {
            (Some(index), Some(timing)) => {
                index.trim().parse::<u64>().is_ok() && TIMING_REGEX.is_match(timing.trim())
            }
            _ => false,
        }
    }

    /// Exclusive end of the text lines starting at `from`
    ///
    /// Text runs until the next block header or until blank lines followed by
    /// a block header or the end of input. Blank lines followed by anything
    /// else stay part of the text. Trailing blank lines are not included.
    fn content_end(lines: &[&str], from: usize) -> usize {
        let mut pos = from;
        while pos < lines.len() {
            if lines[pos].trim().is_empty() {
                let next = (pos..lines.len())
                    .find(|&i| !lines[i].trim().is_empty())
                    .unwrap_or(lines.len());
                if next == lines.len() || Self::starts_block(lines, next) {
                    return pos;
                }
                pos = next;
            } else if Self::starts_block(lines, pos) {
                return pos;
            } else {
                pos += 1;
            }
        }
        pos
    }
}

impl SubtitleGrammar for SrtGrammar {
    fn parse(&self, text: &str) -> Result<Vec<SrtRecord>, GrammarError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();
        let mut records = Vec::new();
        let mut pos = 0;

        while pos < lines.len() {
            if lines[pos].trim().is_empty() {
                pos += 1;
                continue;
            }

            let index_text = lines[pos].trim();
            let index: u64 = index_text.parse().map_err(|_| GrammarError::ExpectedIndex {
                line: pos + 1,
                found: index_text.to_string(),
            })?;

            let timing_line = match lines.get(pos + 1) {
                Some(line) if !line.trim().is_empty() => line.trim(),
                Some(_) => return Err(GrammarError::Truncated { line: pos + 2, index }),
                None => return Err(GrammarError::Truncated { line: pos + 1, index }),
            };
            let (start, end) = Self::parse_timing(pos + 2, timing_line)?;

            let content_start = pos + 2;
            let content_end = Self::content_end(&lines, content_start);
            records.push(SrtRecord {
                index,
                start,
                end,
                content: lines[content_start..content_end].join("\n"),
            });
            pos = content_end;
        }

        Ok(records)
    }
}
