//! Job list writer.
//!
//! Format: one record per line, fields separated by a single space,
//! `<case> <step> <runfile> <field-1> … <field-k>`. No header, no quoting.
//!
//! Records are streamed one at a time. [`write_job_list`] writes into a
//! temporary file next to the target and renames it into place only after
//! every record has been written, so a failed run never leaves a truncated
//! job list behind.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::JobSpecError;
use crate::schedule::JobRecord;

/// Stream `records` into `out`. Returns the number of lines written.
pub fn write_records<'a, I, W>(records: I, out: W) -> io::Result<u64>
where
    I: IntoIterator<Item = JobRecord<'a>>,
    W: Write,
{
    let mut out = BufWriter::new(out);
    let mut lines = 0u64;
    for record in records {
        writeln!(out, "{record}")?;
        lines += 1;
    }
    out.flush()?;
    Ok(lines)
}

/// Write `records` to `path`, replacing any existing file atomically.
pub fn write_job_list<'a, I>(records: I, path: &Path) -> Result<u64, JobSpecError>
where
    I: IntoIterator<Item = JobRecord<'a>>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(|e| JobSpecError::io(dir, e))?;
    debug!(tmp = %tmp.path().display(), "writing job list");

    let lines = write_records(records, tmp.as_file()).map_err(|e| JobSpecError::io(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| JobSpecError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| JobSpecError::io(path, e.error))?;

    info!(path = %path.display(), lines, "wrote job list");
    Ok(lines)
}
