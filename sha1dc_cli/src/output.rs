//! Report types and rendering for the checksum tool.

use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;

/// Outcome of hashing one input.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Display name of the input (`-` for standard input).
    pub path: String,
    /// Hex digest, absent when withheld or on error.
    pub digest: Option<String>,
    /// Whether the input matched a collision attack construction.
    pub collision: bool,
    /// I/O or other per-file error, if any.
    pub error: Option<String>,
}

impl FileReport {
    pub fn ok(path: &str, digest: String) -> Self {
        Self {
            path: path.to_string(),
            digest: Some(digest),
            collision: false,
            error: None,
        }
    }

    pub fn collision(path: &str) -> Self {
        Self {
            path: path.to_string(),
            digest: None,
            collision: true,
            error: None,
        }
    }

    pub fn failed(path: &str, error: String) -> Self {
        Self {
            path: path.to_string(),
            digest: None,
            collision: false,
            error: Some(error),
        }
    }

    /// Whether this input produced a trustworthy digest.
    pub fn is_clean(&self) -> bool {
        self.digest.is_some()
    }
}

/// Write all reports in the requested format.
pub fn render(out: &mut impl Write, format: OutputFormat, reports: &[FileReport]) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                match (&report.digest, report.collision, &report.error) {
                    (Some(digest), _, _) => writeln!(out, "{digest}  {}", report.path)?,
                    (None, true, _) => {
                        writeln!(out, "*collision detected*  {}", report.path)?
                    }
                    (None, false, Some(error)) => {
                        writeln!(out, "sha1dcsum: {}: {error}", report.path)?
                    }
                    (None, false, None) => unreachable!("report without outcome"),
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, reports)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rendering() {
        let reports = vec![
            FileReport::ok("a.bin", "deadbeef".to_string()),
            FileReport::collision("evil.pdf"),
            FileReport::failed("missing.bin", "No such file".to_string()),
        ];
        let mut out = Vec::new();
        render(&mut out, OutputFormat::Text, &reports).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("deadbeef  a.bin"));
        assert!(text.contains("*collision detected*  evil.pdf"));
        assert!(text.contains("sha1dcsum: missing.bin: No such file"));
    }

    #[test]
    fn test_json_rendering() {
        let reports = vec![FileReport::collision("evil.pdf")];
        let mut out = Vec::new();
        render(&mut out, OutputFormat::Json, &reports).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["path"], "evil.pdf");
        assert_eq!(parsed[0]["collision"], true);
        assert!(parsed[0]["digest"].is_null());
    }

    #[test]
    fn test_clean_flag() {
        assert!(FileReport::ok("a", "d".into()).is_clean());
        assert!(!FileReport::collision("a").is_clean());
        assert!(!FileReport::failed("a", "e".into()).is_clean());
    }
}
