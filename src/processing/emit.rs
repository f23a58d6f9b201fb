//! Output sinks.
//!
//! [`VcfWriter`] echoes the header and every data line as raw bytes, replacing
//! only the sample columns that had a call masked. [`FlagWriter`] writes the
//! flagged-positions list instead and never emits VCF content.

use std::borrow::Cow;
use std::io::{self, Write};

use serde::Serialize;

use crate::parsing::vcf::{VcfHeader, SAMPLE_COLUMN_OFFSET};
use crate::processing::site::SiteOutcome;

/// Destination for processed records, one record at a time
pub trait RecordSink {
    /// Called once, before any record
    fn write_header(&mut self, header: &VcfHeader) -> io::Result<()>;

    /// Called for each data line; `raw_line` (without terminator) and
    /// `terminator` are the bytes as read
    fn write_record(
        &mut self,
        raw_line: &[u8],
        terminator: &[u8],
        outcome: &SiteOutcome<'_>,
    ) -> io::Result<()>;

    /// Called for blank lines between records
    fn write_blank(&mut self, raw_line: &[u8]) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()>;
}

/// Writes the (possibly rewritten) VCF
pub struct VcfWriter<W: Write> {
    writer: W,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for VcfWriter<W> {
    fn write_header(&mut self, header: &VcfHeader) -> io::Result<()> {
        for line in &header.lines {
            self.writer.write_all(line)?;
        }
        Ok(())
    }

    fn write_record(
        &mut self,
        raw_line: &[u8],
        terminator: &[u8],
        outcome: &SiteOutcome<'_>,
    ) -> io::Result<()> {
        if outcome.record.is_modified() {
            let samples = &outcome.record.sample_values;
            for (index, column) in raw_line.split(|&b| b == b'\t').enumerate() {
                if index > 0 {
                    self.writer.write_all(b"\t")?;
                }
                let replaced = index
                    .checked_sub(SAMPLE_COLUMN_OFFSET)
                    .and_then(|sample| samples.get(sample));
                match replaced {
                    Some(Cow::Owned(value)) => write_sample(&mut self.writer, column, value)?,
                    _ => self.writer.write_all(column)?,
                }
            }
        } else {
            self.writer.write_all(raw_line)?;
        }
        self.writer.write_all(terminator)
    }

    fn write_blank(&mut self, raw_line: &[u8]) -> io::Result<()> {
        self.writer.write_all(raw_line)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write a rewritten sample column, keeping the raw bytes of every sub-field
/// the rewrite left unchanged
fn write_sample<W: Write>(writer: &mut W, raw: &[u8], value: &str) -> io::Result<()> {
    let mut raw_fields = raw.split(|&b| b == b':');
    for (index, field) in value.split(':').enumerate() {
        if index > 0 {
            writer.write_all(b":")?;
        }
        match raw_fields.next() {
            Some(raw_field) if String::from_utf8_lossy(raw_field) == field => {
                writer.write_all(raw_field)?;
            }
            _ => writer.write_all(field.as_bytes())?,
        }
    }
    Ok(())
}

/// Layout of the flagged-positions list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Tab-separated with a `#CHROM` header line
    #[default]
    Tsv,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct FlaggedPosition<'a> {
    chrom: &'a str,
    pos: &'a str,
}

/// Writes one line per flagged call, or per flagged position with `unique_positions`.
///
/// Positions are de-duplicated against the last one written, which removes
/// every repeat in a sorted VCF (split multiallelic records included).
pub struct FlagWriter<W: Write> {
    writer: W,
    format: ReportFormat,
    unique_positions: bool,
    last_position: Option<(String, String)>,
}

impl<W: Write> FlagWriter<W> {
    pub fn new(writer: W, format: ReportFormat, unique_positions: bool) -> Self {
        Self {
            writer,
            format,
            unique_positions,
            last_position: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> RecordSink for FlagWriter<W> {
    fn write_header(&mut self, _header: &VcfHeader) -> io::Result<()> {
        match (self.format, self.unique_positions) {
            (ReportFormat::Json, _) => Ok(()),
            (ReportFormat::Tsv, true) => writeln!(self.writer, "#CHROM\tPOS"),
            (ReportFormat::Tsv, false) => writeln!(self.writer, "#CHROM\tPOS\tSAMPLE"),
        }
    }

    fn write_record(
        &mut self,
        _raw_line: &[u8],
        _terminator: &[u8],
        outcome: &SiteOutcome<'_>,
    ) -> io::Result<()> {
        if outcome.flagged.is_empty() {
            return Ok(());
        }

        if self.unique_positions {
            let position = FlaggedPosition {
                chrom: outcome.record.chromosome,
                pos: outcome.record.position,
            };
            let repeated = self
                .last_position
                .as_ref()
                .is_some_and(|(chrom, pos)| chrom == position.chrom && pos == position.pos);
            if repeated {
                return Ok(());
            }
            self.last_position = Some((position.chrom.to_string(), position.pos.to_string()));
            return match self.format {
                ReportFormat::Tsv => writeln!(self.writer, "{}\t{}", position.chrom, position.pos),
                ReportFormat::Json => self.write_json(&position),
            };
        }

        for flag in &outcome.flagged {
            match self.format {
                ReportFormat::Tsv => {
                    writeln!(self.writer, "{}\t{}\t{}", flag.chrom, flag.pos, flag.sample)?;
                }
                ReportFormat::Json => self.write_json(flag)?,
            }
        }
        Ok(())
    }

    fn write_blank(&mut self, _raw_line: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ploidy::HaploidSample;
    use crate::core::types::{ActionMode, MaskStyle};
    use crate::processing::site::{RunConfig, SiteProcessor};

    const LINE: &str = "chr1\t100\t.\tA\tT,G\t.\t.\t.\tGT\t0/1\t1/2\t0/2";

    fn header() -> VcfHeader {
        VcfHeader {
            lines: vec![
                b"##fileformat=VCFv4.2\n".to_vec(),
                b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tf1\tm1\tm2\n".to_vec(),
            ],
            sample_names: vec!["f1".to_string(), "m1".to_string(), "m2".to_string()],
        }
    }

    fn processor(action: ActionMode) -> SiteProcessor {
        let config = RunConfig {
            action,
            mask_style: MaskStyle::MatchArity,
            ..RunConfig::default()
        };
        let haploids = vec![
            HaploidSample { name: "m1".to_string(), column: 1 },
            HaploidSample { name: "m2".to_string(), column: 2 },
        ];
        SiteProcessor::new(config, haploids, 3).unwrap()
    }

    fn render<S: RecordSink>(sink: &mut S, processor: &SiteProcessor, raw: &str) {
        sink.write_header(&header()).unwrap();
        write_line(sink, processor, raw);
        sink.finish().unwrap();
    }

    fn write_line<S: RecordSink>(sink: &mut S, processor: &SiteProcessor, raw: &str) {
        let (content, terminator) = crate::parsing::vcf::split_line_terminator(raw.as_bytes());
        let text = std::str::from_utf8(content).unwrap();
        let outcome = processor.process(text).unwrap();
        sink.write_record(content, terminator, &outcome).unwrap();
    }

    #[test]
    fn test_vcf_writer_rewrites_masked_line() {
        let mut sink = VcfWriter::new(Vec::new());
        render(&mut sink, &processor(ActionMode::Mask), &format!("{LINE}\r\n"));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("##fileformat=VCFv4.2\n#CHROM"));
        assert!(out.ends_with("chr1\t100\t.\tA\tT,G\t.\t.\t.\tGT\t0/1\t./.\t./.\r\n"));
    }

    #[test]
    fn test_vcf_writer_echoes_clean_line_verbatim() {
        let mut sink = VcfWriter::new(Vec::new());
        let raw = "chr1\t5\t.\tA\tT\t.\t.\t.\tGT\t0/1\t1\t0\n";
        render(&mut sink, &processor(ActionMode::Mask), raw);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.ends_with(raw));
    }

    #[test]
    fn test_flag_writer_tsv() {
        let mut sink = FlagWriter::new(Vec::new(), ReportFormat::Tsv, false);
        render(&mut sink, &processor(ActionMode::Report), &format!("{LINE}\n"));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "#CHROM\tPOS\tSAMPLE\nchr1\t100\tm1\nchr1\t100\tm2\n");
    }

    #[test]
    fn test_flag_writer_unique_positions() {
        let mut sink = FlagWriter::new(Vec::new(), ReportFormat::Tsv, true);
        render(&mut sink, &processor(ActionMode::Report), &format!("{LINE}\n"));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "#CHROM\tPOS\nchr1\t100\n");
    }

    #[test]
    fn test_flag_writer_unique_positions_across_records() {
        let mut sink = FlagWriter::new(Vec::new(), ReportFormat::Tsv, true);
        let processor = processor(ActionMode::Report);
        sink.write_header(&header()).unwrap();
        write_line(&mut sink, &processor, "chr1\t100\t.\tA\tT\t.\t.\t.\tGT\t0\t0/1\t1\n");
        write_line(&mut sink, &processor, "chr1\t100\t.\tA\tG\t.\t.\t.\tGT\t0\t1\t0/1\n");
        write_line(&mut sink, &processor, "chr1\t200\t.\tA\tG\t.\t.\t.\tGT\t0\t0/1\t1\n");
        write_line(&mut sink, &processor, "chr2\t100\t.\tA\tG\t.\t.\t.\tGT\t0\t0/1\t1\n");
        sink.finish().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "#CHROM\tPOS\nchr1\t100\nchr1\t200\nchr2\t100\n");
    }

    #[test]
    fn test_flag_writer_json() {
        let mut sink = FlagWriter::new(Vec::new(), ReportFormat::Json, false);
        render(&mut sink, &processor(ActionMode::Report), &format!("{LINE}\n"));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let rows: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["chrom"], "chr1");
        assert_eq!(rows[0]["pos"], "100");
        assert_eq!(rows[1]["sample"], "m2");
    }
}
