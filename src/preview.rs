//! Preview inspector: head and tail of a written job list.
//!
//! The head is read line by line from the start. The tail comes from a
//! bounded window at the end of the file, so the preview costs the same for a
//! ten-line list and a ten-million-line one. A last line longer than the
//! window shows up as its trailing fragment.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use serde::Serialize;

use crate::error::JobSpecError;

/// Bytes read from the end of the file for the tail.
pub const DEFAULT_TAIL_WINDOW: u64 = 64 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub head: Vec<String>,
    pub tail: Vec<String>,
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- HEAD ---")?;
        for line in &self.head {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "--- TAIL ---")?;
        for line in &self.tail {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// First and last `n` lines of `path`, with the default tail window.
pub fn head_tail(path: &Path, n: usize) -> Result<Preview, JobSpecError> {
    head_tail_with_window(path, n, DEFAULT_TAIL_WINDOW)
}

pub fn head_tail_with_window(path: &Path, n: usize, window: u64) -> Result<Preview, JobSpecError> {
    let io_err = |e| JobSpecError::io(path, e);
    let file = File::open(path).map_err(io_err)?;
    let head = read_head(&file, n).map_err(io_err)?;
    let tail = read_tail(&file, n, window).map_err(io_err)?;
    Ok(Preview { head, tail })
}

fn read_head(file: &File, n: usize) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(file);
    let mut head = Vec::with_capacity(n);
    let mut buf = Vec::new();
    while head.len() < n {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        head.push(trim_newline(&String::from_utf8_lossy(&buf)).to_string());
    }
    Ok(head)
}

fn read_tail(mut file: &File, n: usize, window: u64) -> std::io::Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let size = file.metadata()?.len();
    let start = size.saturating_sub(window);

    // Read one byte before the window to tell whether it opens on a line
    // boundary or in the middle of a line.
    let from = start.saturating_sub(1);
    file.seek(SeekFrom::Start(from))?;
    let mut buf = Vec::with_capacity((size - from) as usize);
    file.take(size - from).read_to_end(&mut buf)?;

    let body: &[u8] = if start == 0 {
        &buf
    } else if buf.first() == Some(&b'\n') {
        &buf[1..]
    } else {
        // Drop the partial first line, unless it is the only line in the
        // window: then its trailing fragment is all there is to show.
        let window = &buf[1..];
        match window.iter().position(|&b| b == b'\n') {
            Some(nl) if nl + 1 < window.len() => &window[nl + 1..],
            _ => window,
        }
    };

    let text = String::from_utf8_lossy(body);
    let lines: Vec<&str> = text.lines().collect();
    let skip = lines.len().saturating_sub(n);
    Ok(lines[skip..].iter().map(|l| l.to_string()).collect())
}

fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn numbered(count: usize) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=count {
            writeln!(f, "line {i}").unwrap();
        }
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_head_and_tail_of_100_lines() {
        let f = numbered(100);
        let p = head_tail(f.path(), 5).unwrap();
        assert_eq!(p.head, ["line 1", "line 2", "line 3", "line 4", "line 5"]);
        assert_eq!(
            p.tail,
            ["line 96", "line 97", "line 98", "line 99", "line 100"]
        );
    }

    #[test]
    fn test_short_file_returns_everything() {
        let f = numbered(3);
        let p = head_tail(f.path(), 8).unwrap();
        assert_eq!(p.head, ["line 1", "line 2", "line 3"]);
        assert_eq!(p.tail, p.head);
    }

    #[test]
    fn test_small_window_drops_partial_first_line() {
        let f = numbered(100);
        // "line 100\n" is 9 bytes, "line 99\n" 8: a 12-byte window starts
        // mid-way through "line 99".
        let p = head_tail_with_window(f.path(), 5, 12).unwrap();
        assert_eq!(p.tail, ["line 100"]);
    }

    #[test]
    fn test_last_line_longer_than_window_keeps_fragment() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "short").unwrap();
        writeln!(f, "{}", "x".repeat(100)).unwrap();
        f.flush().unwrap();

        let p = head_tail_with_window(f.path(), 5, 20).unwrap();
        assert_eq!(p.tail, ["x".repeat(19)]);
    }

    #[test]
    fn test_window_on_line_boundary_keeps_first_line() {
        let f = numbered(100);
        let p = head_tail_with_window(f.path(), 5, 17).unwrap();
        assert_eq!(p.tail, ["line 99", "line 100"]);
    }

    #[test]
    fn test_empty_file_and_zero_lines() {
        let f = numbered(0);
        assert_eq!(head_tail(f.path(), 5).unwrap(), Preview::default());

        let f = numbered(10);
        assert_eq!(head_tail(f.path(), 0).unwrap(), Preview::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = head_tail(&dir.path().join("jobs.list"), 5).unwrap_err();
        assert!(matches!(err, JobSpecError::Io { .. }));
    }

    #[test]
    fn test_display_labels_blocks() {
        let p = Preview {
            head: vec!["A 0 run.sh 1".into()],
            tail: vec!["A 1 run.sh 2".into()],
        };
        assert_eq!(
            p.to_string(),
            "--- HEAD ---\nA 0 run.sh 1\n--- TAIL ---\nA 1 run.sh 2\n"
        );
    }
}
