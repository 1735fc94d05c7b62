use crate::entries::{Entry, Fetcher};
use anyhow::{Result, anyhow};
use clap::Args;
use std::path::PathBuf;

/// Where to look for videos and tracks.
#[derive(Debug, Args)]
pub struct Input {
    /// Directories to scan.
    #[arg(help_heading = None)]
    dirs: Vec<PathBuf>,
    /// The maximum recursion depth; use 0 for unlimited.
    #[arg(short = 'R', long, default_value_t = 1, value_name = "INT", help_heading = Some("Fetch"))]
    recurse: u32,
}

impl Input {
    #[cfg(test)]
    pub fn new(dirs: Vec<PathBuf>, recurse: u32) -> Self {
        Input { dirs, recurse }
    }
}

impl TryFrom<Input> for Fetcher {
    type Error = anyhow::Error;

    fn try_from(input: Input) -> Result<Fetcher> {
        let dirs = validate_dirs(input.dirs)?;
        Fetcher::new(dirs, input.recurse.into())
    }
}

fn validate_dirs(mut dirs: Vec<PathBuf>) -> Result<Vec<Entry>> {
    if dirs.is_empty() {
        dirs = vec![".".into()]; // use the current directory if no paths are given.
    }
    let n = dirs.len();
    dirs.sort_unstable();
    dirs.dedup();
    if n != dirs.len() {
        eprintln!("warning: {} duplicated directories ignored", n - dirs.len());
    }

    let (dirs, missing) = dirs
        .into_iter()
        .map(|pb| Entry::try_from(pb.clone()).and_then(|e| e.resolve()).map_err(|err| (pb, err)))
        .inspect(|res| {
            if let Err((pb, err)) = res {
                eprintln!("warning: invalid directory {pb:?}: {err}");
            }
        })
        .flatten()
        .partition::<Vec<_>, _>(|entry| entry.is_dir());

    missing
        .iter()
        .for_each(|entry| eprintln!("warning: directory not found: {entry}"));
    if dirs.is_empty() {
        return Err(anyhow!("no valid paths given"));
    }
    Ok(dirs)
}
