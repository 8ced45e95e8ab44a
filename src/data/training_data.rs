//! Line-oriented training data.
//!
//! Format:
//!
//! ```text
//! Topology: 2 4 1
//! i: 1.0 0.0
//! o: 1.0
//! i: 0.0 0.0
//! o: 0.0
//! ```
//!
//! The header gives the non-bias unit count of every layer, input layer
//! first. Each sample is an `i:` line followed by an `o:` line. Blank
//! lines are ignored; line numbers in errors are 1-based.
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;
use std::str::FromStr;

use crate::data::sample_source::SampleSource;
use crate::error::SampleError;

const TOPOLOGY_LABEL: &str = "Topology:";
const INPUT_LABEL: &str = "i:";
const TARGET_LABEL: &str = "o:";

pub struct TextSampleSource<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    pending: Option<(usize, String)>,
    pending_err: Option<std::io::Error>,
}

impl TextSampleSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let file = File::open(path)?;
        Ok(TextSampleSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TextSampleSource<R> {
    pub fn new(reader: R) -> Self {
        TextSampleSource {
            lines: reader.lines(),
            line_no: 0,
            pending: None,
            pending_err: None,
        }
    }

    /// Loads the next non-blank line into `pending`, keeping any read
    /// error for the next call that can report it.
    fn fill(&mut self) {
        if self.pending.is_some() || self.pending_err.is_some() {
            return;
        }
        for line in self.lines.by_ref() {
            self.line_no += 1;
            match line {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => {
                    self.pending = Some((self.line_no, text));
                    return;
                }
                Err(e) => {
                    self.pending_err = Some(e);
                    return;
                }
            }
        }
    }

    fn next_line(&mut self) -> Result<(usize, String), SampleError> {
        self.fill();
        if let Some(e) = self.pending_err.take() {
            return Err(e.into());
        }
        self.pending.take().ok_or(SampleError::UnexpectedEof)
    }

    fn read_labeled<T: FromStr>(&mut self, label: &'static str) -> Result<Vec<T>, SampleError> {
        let (line, text) = self.next_line()?;
        let mut tokens = text.split_whitespace();
        let found = tokens.next().unwrap_or_default();
        if found != label {
            return Err(SampleError::UnexpectedLabel { line, expected: label, found: found.to_string() });
        }
        parse_values(tokens, line)
    }
}

impl<R: BufRead> SampleSource for TextSampleSource<R> {
    fn has_more(&mut self) -> bool {
        self.fill();
        self.pending.is_some() || self.pending_err.is_some()
    }

    fn read_topology(&mut self) -> Result<Vec<usize>, SampleError> {
        let (line, text) = self.next_line()?;
        let mut tokens = text.split_whitespace();
        if tokens.next() != Some(TOPOLOGY_LABEL) {
            return Err(SampleError::MissingTopology { line });
        }
        parse_values(tokens, line)
    }

    fn read_inputs(&mut self) -> Result<Vec<f64>, SampleError> {
        self.read_labeled(INPUT_LABEL)
    }

    fn read_targets(&mut self) -> Result<Vec<f64>, SampleError> {
        self.read_labeled(TARGET_LABEL)
    }
}

fn parse_values<'a, T: FromStr>(tokens: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec<T>, SampleError> {
    tokens
        .map(|token| {
            token.parse::<T>().map_err(|_| SampleError::ParseValue { line, token: token.to_string() })
        })
        .collect()
}

/// Writes `topology` and the sample pairs in the format read by
/// `TextSampleSource`.
pub fn write_samples<W: Write>(
    mut writer: W,
    topology: &[usize],
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> std::io::Result<()> {
    writeln!(writer, "{} {}", TOPOLOGY_LABEL, join(topology))?;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        writeln!(writer, "{} {}", INPUT_LABEL, join(input))?;
        writeln!(writer, "{} {}", TARGET_LABEL, join(target))?;
    }
    writer.flush()
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}
