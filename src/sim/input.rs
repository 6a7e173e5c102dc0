//! Job list ingestion.
//!
//! One `name,burst` record per line. Blank lines are skipped, names are cut to
//! [`NAME_WIDTH`] characters and the burst is read as decimal after trimming.
//! Range checks (zero burst, duplicate names) happen when the run is built.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{
    error::{Error, InputError},
    job::{JobSpec, NAME_WIDTH},
};

pub fn parse_jobs<R: BufRead>(reader: R) -> Result<Vec<JobSpec>, Error> {
    let mut jobs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Io {
            path: "<input>".into(),
            source,
        })?;
        if let Some(job) = parse_line(idx + 1, &line)? {
            jobs.push(job);
        }
    }
    Ok(jobs)
}

pub fn read_jobs_file(path: &Path) -> Result<Vec<JobSpec>, Error> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(BufReader::new(file)).map_err(|err| match err {
        Error::Io { source, .. } => Error::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<JobSpec>, InputError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(',');
    let name = fields.next().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(InputError::MissingField {
            line: line_no,
            field: "name",
        });
    }
    let burst = fields.next().map(str::trim).ok_or(InputError::MissingField {
        line: line_no,
        field: "burst time",
    })?;

    let burst_time = burst.parse().map_err(|_| InputError::InvalidBurst {
        line: line_no,
        value: burst.to_string(),
    })?;

    Ok(Some(JobSpec::new(
        name.chars().take(NAME_WIDTH).collect::<String>(),
        burst_time,
    )))
}
