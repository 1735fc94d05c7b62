use super::{Gather, Job, Options};
use crate::entries::{Entry, Fetcher};
use crate::planner;
use crate::utils::{self, natural_cmp};
use anyhow::{Result, anyhow};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Pair {
    /// Template files, typically videos; directories are expanded recursively.
    #[arg(short = 't', long, num_args = 1.., required = true, value_name = "PATH")]
    templates: Vec<PathBuf>,
    /// The suffixes of the files of each template, in order; they may be empty.
    #[arg(short = 's', long, num_args = 1.., required = true, value_name = "STR", value_parser = utils::parse_name_part)]
    suffixes: Vec<String>,
    /// Files to rename, in blocks of one per suffix for each template; directories are expanded recursively.
    #[arg(required = true, value_name = "TARGETS")]
    targets: Vec<PathBuf>,
    /// Sort both templates and targets by file name, in natural order.
    #[arg(long)]
    sort: bool,
    #[command(flatten)]
    options: Options,
}

impl Gather for Pair {
    const OPENING_LINE: &'static str = "Pairing files with templates...";

    fn options(&self) -> &Options {
        &self.options
    }

    fn gather(self) -> Result<Vec<Job>> {
        let mut templates = expand(self.templates)?;
        let mut targets = expand(self.targets)?;
        if self.sort {
            templates.sort_by(|a, b| natural_cmp(a.file_name(), b.file_name()));
            targets.sort_by(|a, b| natural_cmp(a.file_name(), b.file_name()));
        }
        let templates = templates
            .iter()
            .map(|e| {
                planner::stem(e.as_ref())
                    .map(str::to_owned)
                    .ok_or_else(|| anyhow!("no file name: {e}"))
            })
            .collect::<Result<_>>()?;
        tracing::debug!(?templates, "templates");

        Ok(vec![Job {
            label: "files".to_owned(),
            templates,
            targets: targets.into_iter().map(Entry::into_path).collect(),
            suffixes: self.suffixes,
            ext: None,
        }])
    }
}

/// Check the paths for UTF-8, replacing directories with all their files in natural order.
fn expand(paths: Vec<PathBuf>) -> Result<Vec<Entry>> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let entry = Entry::try_from(path)?;
        match entry.is_dir() {
            false => out.push(entry),
            true => {
                let mut files = Fetcher::single(entry).fetch().collect::<Vec<_>>();
                files.sort_by(|a, b| natural_cmp(a.to_str(), b.to_str()));
                out.extend(files);
            }
        }
    }
    utils::aborted()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directories_expand_in_natural_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("subs")).unwrap();
        for f in ["ep10.srt", "ep2.srt", "ep1.srt"] {
            fs::write(dir.path().join("subs").join(f), "").unwrap();
        }
        let single = dir.path().join("extra.srt");
        fs::write(&single, "").unwrap();

        let entries = expand(vec![single, dir.path().join("subs")]).unwrap();
        let names = entries.iter().map(|e| e.file_name()).collect::<Vec<_>>();
        assert_eq!(names, ["extra.srt", "ep1.srt", "ep2.srt", "ep10.srt"]);
    }

    #[test]
    fn gather_sorted() {
        let cmd = Pair {
            templates: vec!["v/Show 10.mkv".into(), "v/Show 9.mkv".into()],
            suffixes: vec!["en".to_owned()],
            targets: vec!["b.srt".into(), "a.srt".into()],
            sort: true,
            options: Options {
                sep: "_".to_owned(),
                yes: false,
                force: false,
                dry_run: true,
            },
        };
        let jobs = cmd.gather().unwrap();
        let [job] = &jobs[..] else {
            panic!("expected a single job");
        };
        assert_eq!(job.templates, ["Show 9", "Show 10"]);
        assert_eq!(job.targets, [PathBuf::from("a.srt"), PathBuf::from("b.srt")]);
        assert_eq!(job.suffixes, ["en"]);
        assert_eq!(job.ext, None);
    }
}
