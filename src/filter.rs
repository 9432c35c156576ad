//! Thinning of an edge list by capping repeated edge types.

use crate::error::{Error, Result, Stream};
use derive_more::Display;
use log::info;
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

pub const DEFAULT_THRESHOLD: usize = 500;

/// Counters of one filter run. Displays as the two counters on their own
/// lines.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
#[display(fmt = "{}\n{}", type_counter, total_counter)]
pub struct FilterReport {
    /// Lines admitted since the last new type token.
    pub type_counter: usize,
    /// Lines admitted in total.
    pub total_counter: usize,
    pub stopped_early: bool,
}

/// Copies an edge list, admitting every line with a new type token and
/// stopping once `threshold` lines with already seen tokens have been admitted
/// since the last new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeThresholdFilter {
    threshold: usize,
}

impl Default for TypeThresholdFilter {
    fn default() -> Self {
        TypeThresholdFilter {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TypeThresholdFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A threshold of 0 never stops the run.
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Filters `reader` into `writer`.
    ///
    /// `seen_types` only grows: a token counts as seen after its first
    /// occurrence anywhere before, not only in the preceding run of lines.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
        seen_types: &mut HashSet<Vec<u8>>,
    ) -> Result<FilterReport> {
        let mut report = FilterReport::default();
        let mut line = Vec::new();
        let mut line_no = 0;
        while reader.read_until(b'\n', &mut line)? > 0 {
            line_no += 1;
            let token = match type_token(&line) {
                Some(token) => token,
                None => {
                    writer.flush()?;
                    return Err(Error::format(
                        Stream::EdgeList,
                        line_no,
                        "expected at least 3 tab-separated fields",
                    ));
                }
            };
            report.total_counter += 1;
            if seen_types.contains(token) {
                report.type_counter += 1;
                writer.write_all(&line)?;
                if report.type_counter == self.threshold {
                    report.stopped_early = true;
                    info!("threshold {} reached at line {}", self.threshold, line_no);
                    break;
                }
            } else {
                seen_types.insert(token.to_vec());
                report.type_counter = 0;
                writer.write_all(&line)?;
                if !line.ends_with(b"\n") {
                    writer.write_all(b"\n")?;
                }
                writer.write_all(b"\n")?;
            }
            line.clear();
        }
        writer.flush()?;
        Ok(report)
    }

    pub fn run_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<FilterReport> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let reader =
            BufReader::new(File::open(input).map_err(|e| Error::open(input.to_path_buf(), e))?);
        let mut writer = BufWriter::new(File::create(output)?);
        let mut seen_types = HashSet::new();
        let report = self.run(reader, &mut writer, &mut seen_types)?;
        info!(
            "{} -> {}: admitted {} lines, {} distinct types",
            input.display(),
            output.display(),
            report.total_counter,
            seen_types.len()
        );
        Ok(report)
    }
}

/// The third tab-separated field of an edge-list line, without the line
/// ending. Lines are bytes and are never decoded.
fn type_token(line: &[u8]) -> Option<&[u8]> {
    line.split(|&b| b == b'\t').nth(2).map(|field| {
        let end = field
            .iter()
            .rposition(|&b| b != b'\n' && b != b'\r')
            .map_or(0, |i| i + 1);
        &field[..end]
    })
}
