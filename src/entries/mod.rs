mod entry;
mod input;
mod kind;

use crate::utils;
use anyhow::{Result, anyhow};
pub use entry::*;
pub use input::*;
pub use kind::*;
use std::iter;

/// The object that fetches files from multiple directories.
#[derive(Debug)]
pub struct Fetcher {
    /// Effective input paths to scan, after deduplication and checking.
    dirs: Vec<Entry>,
    recurse: Recurse,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Recurse {
    Full,
    Shallow,
    UpTo(u32),
}

impl Fetcher {
    /// Reads all files from a single directory, recursively.
    pub fn single(dir: Entry) -> Self {
        Fetcher {
            dirs: vec![dir],
            recurse: Recurse::Full,
        }
    }

    pub fn new(dirs: Vec<Entry>, recurse: Recurse) -> Result<Self> {
        if dirs.is_empty() {
            return Err(anyhow!("no valid paths given"));
        }
        Ok(Fetcher { dirs, recurse })
    }

    /// Yield the files found, skipping hidden ones, in no particular order.
    pub fn fetch(self) -> impl Iterator<Item = Entry> {
        let depth = self.recurse.into();
        self.dirs
            .into_iter()
            .flat_map(move |dir| files(dir, depth))
    }
}

fn files(dir: Entry, depth: Depth) -> Box<dyn Iterator<Item = Entry>> {
    if !utils::is_running() {
        return Box::new(iter::empty());
    }

    match std::fs::read_dir(&dir) {
        Ok(rd) => Box::new(
            rd.inspect(|res| {
                if let Err(err) = res {
                    eprintln!("error: dir entry: {err}");
                }
            })
            .flatten()
            .map(move |de| de.file_name().to_str().map(|s| dir.join(s)).ok_or(de))
            .inspect(|res| {
                if let Err(de) = res {
                    eprintln!("error: no UTF-8 name: {de:?}");
                }
            })
            .flatten()
            .filter(|entry| !entry.file_name().starts_with('.'))
            .flat_map(move |entry| -> Box<dyn Iterator<Item = Entry>> {
                let (d, rec) = depth.inc();
                match (entry.is_dir(), rec) {
                    (false, _) => {
                        tracing::debug!(path = entry.to_str(), "fetched");
                        Box::new(iter::once(entry))
                    }
                    (true, true) => files(entry, d),
                    (true, false) => Box::new(iter::empty()),
                }
            }),
        ),
        Err(err) => {
            eprintln!("error: read dir {dir}: {err}");
            Box::new(iter::empty())
        }
    }
}

impl From<u32> for Recurse {
    fn from(d: u32) -> Self {
        match d {
            0 => Recurse::Full,
            1 => Recurse::Shallow,
            _ => Recurse::UpTo(d),
        }
    }
}

impl From<Recurse> for Depth {
    fn from(r: Recurse) -> Self {
        match r {
            Recurse::Full => Depth { max: 0, curr: 0 },
            Recurse::Shallow => Depth { max: 1, curr: 0 },
            Recurse::UpTo(d) => Depth { max: d, curr: 0 },
        }
    }
}

/// Tracks how deep the traversal is; a `max` of 0 means unlimited.
#[derive(Debug, Copy, Clone)]
struct Depth {
    max: u32,
    curr: u32,
}

impl Depth {
    fn inc(self) -> (Self, bool) {
        let Depth { max, curr } = self;
        let curr = curr + 1;
        (Depth { max, curr }, curr < max || max == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("s1/extras")).unwrap();
        for f in ["a.mkv", ".hidden.srt", "s1/b.srt", "s1/extras/c.srt"] {
            fs::write(root.join(f), "").unwrap();
        }
        dir
    }

    fn fetch(root: &Path, recurse: u32) -> Vec<String> {
        let dir = Entry::try_from(root.to_owned()).unwrap();
        let fetcher = Fetcher::new(vec![dir], recurse.into()).unwrap();
        let mut names = fetcher
            .fetch()
            .map(|e| e.file_name().to_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn depths() {
        let dir = tree();
        assert_eq!(fetch(dir.path(), 1), ["a.mkv"]);
        assert_eq!(fetch(dir.path(), 2), ["a.mkv", "b.srt"]);
        assert_eq!(fetch(dir.path(), 3), ["a.mkv", "b.srt", "c.srt"]);
        assert_eq!(fetch(dir.path(), 0), ["a.mkv", "b.srt", "c.srt"]);
    }

    #[test]
    fn single_is_recursive() {
        let dir = tree();
        let entry = Entry::try_from(dir.path().join("s1")).unwrap();
        let mut names = Fetcher::single(entry)
            .fetch()
            .map(|e| e.file_name().to_owned())
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, ["b.srt", "c.srt"]);
    }

    #[test]
    fn no_dirs() {
        assert!(Fetcher::new(vec![], Recurse::Full).is_err());
    }
}
