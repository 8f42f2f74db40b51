//! Text and delimited-file rendering of a [`MetricSnapshot`].
//!
//! Rows carry the long report label of each statistic; per-class rows have
//! one column per class.

use std::ffi::OsString;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::snapshot::MetricSnapshot;

/// Extension of the per-class table written by [`Report::dump`].
pub const CLASS_STATS_EXT: &str = "cl_stats";
/// Extension of the overall table written by [`Report::dump`].
pub const OVERALL_STATS_EXT: &str = "overall_stats";

const VALUE_WIDTH: usize = 20;

/// Renderer over a borrowed snapshot.
///
/// # Example
///
/// ```
/// use scorer::{evaluate, Report};
///
/// let snapshot = evaluate(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
/// let text = Report::new(&snapshot).digits(2).to_string();
/// assert!(text.starts_with("Classes: 0, 1\n"));
/// assert!(text.contains("Overall Statistics:"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a, L> {
    snapshot: &'a MetricSnapshot<L>,
    digits: usize,
}

impl<'a, L> Report<'a, L> {
    pub fn new(snapshot: &'a MetricSnapshot<L>) -> Self {
        Self {
            snapshot,
            digits: 3,
        }
    }

    /// Decimal places of the text table. Default: 3.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    fn label_width(&self) -> usize {
        let snapshot = self.snapshot;
        snapshot
            .per_class()
            .map(|(stat, _)| stat)
            .chain(snapshot.overall().map(|(stat, _)| stat))
            .map(|stat| stat.label().chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl<L: Display> Report<'_, L> {
    /// Write `<prefix>.cl_stats` and `<prefix>.overall_stats`.
    ///
    /// Both files are comma-delimited with a header row. Returns the two
    /// paths written.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Io`](crate::ScorerError::Io) if either file
    /// cannot be created or written.
    pub fn dump(&self, prefix: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let class_path = with_suffix(prefix.as_ref(), CLASS_STATS_EXT);
        let overall_path = with_suffix(prefix.as_ref(), OVERALL_STATS_EXT);

        let mut out = BufWriter::new(File::create(&class_path)?);
        self.write_class_stats(&mut out)?;
        out.flush()?;

        let mut out = BufWriter::new(File::create(&overall_path)?);
        self.write_overall_stats(&mut out)?;
        out.flush()?;

        Ok((class_path, overall_path))
    }

    /// Per-class table: header `stats,<class...>`, one row per statistic.
    pub fn write_class_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "stats")?;
        for class in self.snapshot.classes() {
            write!(out, ",{}", csv_field(&class.to_string()))?;
        }
        writeln!(out)?;

        for (stat, values) in self.snapshot.per_class() {
            write!(out, "{}", csv_field(stat.label()))?;
            for v in values {
                write!(out, ",{v}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Overall table: header `stats,score`, one row per statistic.
    pub fn write_overall_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "stats,score")?;
        for (stat, value) in self.snapshot.overall() {
            writeln!(out, "{},{value}", csv_field(stat.label()))?;
        }
        Ok(())
    }
}

impl<L: Display> Display for Report<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let width = self.label_width();
        let digits = self.digits;

        let classes: Vec<String> = snapshot.classes().iter().map(ToString::to_string).collect();
        writeln!(f, "Classes: {}", classes.join(", "))?;
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "{}", snapshot.confusion_matrix())?;

        writeln!(f, "\nClass Statistics:\n")?;
        write!(f, "{:<width$}", "")?;
        for class in &classes {
            write!(f, " {class:>VALUE_WIDTH$}")?;
        }
        writeln!(f)?;
        for (stat, values) in snapshot.per_class() {
            write!(f, "{:<width$}", stat.label())?;
            for v in values {
                write!(f, " {v:>VALUE_WIDTH$.digits$}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nOverall Statistics:\n")?;
        for (stat, value) in snapshot.overall() {
            writeln!(f, "{:<width$} {value:>VALUE_WIDTH$.digits$}", stat.label())?;
        }
        Ok(())
    }
}

impl<L: Display> Display for MetricSnapshot<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&Report::new(self), f)
    }
}

impl<L: Display> MetricSnapshot<L> {
    /// Shorthand for [`Report::dump`] with default settings.
    pub fn dump(&self, prefix: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        Report::new(self).dump(prefix)
    }
}

fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Quote a field containing a delimiter, quote or line break.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;
    use crate::stats::Stat;
    use crate::testing::{CANONICAL_PRED, CANONICAL_TRUE};

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("TPR"), "TPR");
        assert_eq!(
            csv_field("SOA1(Landis & Koch), extra"),
            "\"SOA1(Landis & Koch), extra\""
        );
        assert_eq!(csv_field("a \"b\""), "\"a \"\"b\"\"\"");
    }

    #[test]
    fn test_with_suffix_keeps_dots_in_prefix() {
        let path = with_suffix(Path::new("/tmp/run.v2"), CLASS_STATS_EXT);
        assert_eq!(path, PathBuf::from("/tmp/run.v2.cl_stats"));
    }

    #[test]
    fn test_class_table_layout() {
        let snapshot = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
        let mut buf = Vec::new();
        Report::new(&snapshot).write_class_stats(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("stats,0,1,2"));
        assert_eq!(lines.next(), Some("TP(True positive/hit),3,1,3"));
        let n_rows = snapshot.per_class().count();
        assert_eq!(text.lines().count(), n_rows + 1);
    }

    #[test]
    fn test_overall_table_layout() {
        let snapshot = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
        let mut buf = Vec::new();
        Report::new(&snapshot).write_overall_stats(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().next(), Some("stats,score"));
        assert_eq!(text.lines().count(), snapshot.overall().count() + 1);
        assert!(text.lines().any(|l| l == "Zero-one Loss,5"));
    }

    #[test]
    fn test_display_sections() {
        let snapshot = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
        let text = snapshot.to_string();

        assert!(text.starts_with("Classes: 0, 1, 2\nConfusion Matrix:\n"));
        assert!(text.contains(" 3 0 0\n 0 1 2\n 2 1 3\n"));
        let class_at = text.find("Class Statistics:").unwrap();
        let overall_at = text.find("Overall Statistics:").unwrap();
        assert!(class_at < overall_at);

        assert!(text
            .lines()
            .any(|l| l.split_whitespace().eq([Stat::Kappa.label(), "0.355"])));
    }

    #[test]
    fn test_digits() {
        let snapshot = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
        let text = Report::new(&snapshot).digits(5).to_string();
        assert!(text.contains("0.58333"));
    }
}
