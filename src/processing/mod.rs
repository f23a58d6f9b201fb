//! Single-pass processing of a VCF stream.
//!
//! [`run`] reads the caller-declared header block, resolves the haploid
//! samples against it, then handles one data line at a time:
//!
//! 1. Parse the line into a [`VariantRecord`](crate::core::record::VariantRecord)
//! 2. Extract and classify the evidence of every haploid sample
//! 3. Mask heterozygous calls, or flag them in report mode
//! 4. Hand the result to a [`RecordSink`](emit::RecordSink)
//!
//! Memory use is bounded by one record regardless of file size. Any error
//! aborts the run; output written before the error is not guaranteed to be
//! consistent.

pub mod emit;
pub mod site;

use std::borrow::Cow;
use std::io::BufRead;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::FilterError;
use crate::core::ploidy::PloidySet;
use crate::parsing::vcf::{read_header, split_line_terminator};
use emit::RecordSink;
use site::{RunConfig, SiteOutcome, SiteProcessor};

/// Counts collected over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Data lines processed
    pub records: u64,
    /// Haploid samples checked at every record
    pub haploid_samples: usize,
    /// Heterozygous haploid calls found
    pub heterozygous_calls: u64,
    /// Calls rewritten to missing
    pub masked_calls: u64,
    /// Calls written to the report
    pub flagged_calls: u64,
    /// Haploid calls with missing or insufficient data
    pub uninformative_calls: u64,
    /// Records with at least one heterozygous haploid call
    pub affected_records: u64,
}

impl RunSummary {
    fn add(&mut self, outcome: &SiteOutcome<'_>) {
        self.records += 1;
        self.heterozygous_calls += outcome.heterozygous as u64;
        self.masked_calls += outcome.masked as u64;
        self.flagged_calls += outcome.flagged.len() as u64;
        self.uninformative_calls += outcome.uninformative as u64;
        if outcome.heterozygous > 0 {
            self.affected_records += 1;
        }
    }
}

/// Process a whole VCF stream.
///
/// `header_lines` is the number of lines before the first record, the
/// `#CHROM` line included.
///
/// # Errors
///
/// Returns `FilterError::Configuration` for an invalid configuration, header
/// line count or haploid list, `FilterError::MalformedRecord` or
/// `FilterError::MissingField` for the first bad record, and
/// `FilterError::Io` on read or write failure.
pub fn run<R: BufRead, S: RecordSink>(
    reader: &mut R,
    sink: &mut S,
    header_lines: usize,
    ploidy: &PloidySet,
    config: &RunConfig,
) -> Result<RunSummary, FilterError> {
    config.validate()?;

    let header = read_header(reader, header_lines)?;
    let haploids = ploidy.resolve(&header.sample_names)?;

    info!(
        "Checking {} haploid of {} samples using {} evidence ({} mode)",
        haploids.len(),
        header.sample_count(),
        config.evidence,
        config.action
    );

    let mut summary = RunSummary {
        haploid_samples: haploids.len(),
        ..RunSummary::default()
    };

    let processor = SiteProcessor::new(config.clone(), haploids, header.sample_count())?;
    sink.write_header(&header)?;

    let mut line_number = header_lines;
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_number += 1;

        let (content, terminator) = split_line_terminator(&line);
        if content.is_empty() {
            debug!("Skipping blank line {line_number}");
            sink.write_blank(&line)?;
            continue;
        }

        // Invalid bytes only become U+FFFD in the parsed view; the sinks
        // echo the raw bytes of every field they do not rewrite
        let text = String::from_utf8_lossy(content);
        if matches!(text, Cow::Owned(_)) {
            debug!("Line {line_number} is not valid UTF-8");
        }

        let outcome = processor
            .process(&text)
            .map_err(|e| e.at_line(line_number))?;
        summary.add(&outcome);
        sink.write_record(content, terminator, &outcome)?;

        if summary.records % 100_000 == 0 {
            debug!("Processed {} records", summary.records);
        }
    }

    sink.finish()?;

    info!(
        "Processed {} records: {} heterozygous haploid calls in {} records ({} masked, {} flagged, {} uninformative)",
        summary.records,
        summary.heterozygous_calls,
        summary.affected_records,
        summary.masked_calls,
        summary.flagged_calls,
        summary.uninformative_calls
    );

    Ok(summary)
}
