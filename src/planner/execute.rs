use super::Rename;
use crate::capabilities::{NewPath, OriginalPath};
use crate::utils;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

/// Why a single rename did not happen.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("source file not found")]
    SourceMissing,
    #[error("target already exists")]
    DestinationExists,
    #[error("aborted")]
    Aborted,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The outcome of a batch, where every plan entry is accounted for exactly once.
#[derive(Debug, Default)]
pub struct Report {
    pub renamed: usize,
    pub unchanged: usize,
    pub failures: Vec<(Rename, Failure)>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.renamed + self.unchanged + self.failures.len()
    }
}

/// Rename every entry of the plan in order, within the same file system.
///
/// Failures are collected and never stop the batch; there's no rollback.
pub fn execute(plan: Vec<Rename>) -> Report {
    execute_while(plan, utils::is_running)
}

/// Same as [execute], but entries are only attempted while `running` says so;
/// the rest are reported as aborted.
fn execute_while(plan: Vec<Rename>, running: impl Fn() -> bool) -> Report {
    let mut report = Report::default();
    for rename in plan {
        if !running() {
            report.failures.push((rename, Failure::Aborted));
            continue;
        }
        if rename.is_unchanged() {
            report.unchanged += 1;
            continue;
        }
        match rename_one(rename.path(), &rename.new_path()) {
            Ok(()) => report.renamed += 1,
            Err(failure) => {
                tracing::debug!(path = ?rename.path(), %failure, "rename failed");
                report.failures.push((rename, failure))
            }
        }
    }
    report
}

fn rename_one(p: &Path, q: &Path) -> Result<(), Failure> {
    tracing::debug!(from = ?p, to = ?q, "renaming");
    match p.symlink_metadata() {
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(Failure::SourceMissing),
        Err(err) => return Err(err.into()),
        Ok(_) => {}
    }
    if q.symlink_metadata().is_ok() {
        return Err(Failure::DestinationExists);
    }
    fs::rename(p, q).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Failure::SourceMissing, // removed between the checks.
        _ => Failure::Io(err),
    })
}
