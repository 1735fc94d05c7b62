use super::{Gather, Job, Options};
use crate::entries::{Classifier, Entry, Fetcher, Input, Kind, Track, VideoMatch, parse_ext};
use crate::utils::{self, natural_cmp};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct Scan {
    /// The video extension; by default, any file of a known video type.
    #[arg(short = 'e', long, value_name = "EXT", value_parser = parse_ext)]
    video: Option<String>,
    /// A kind of file to rename with its suffixes for each video, e.g. srt=EN,JP or opus=main.
    #[arg(short = 'k', long = "track", required = true, value_name = "EXT=SUFFIXES")]
    tracks: Vec<Track>,
    #[command(flatten)]
    input: Input,
    #[command(flatten)]
    options: Options,
}

impl Gather for Scan {
    const OPENING_LINE: &'static str = "Scanning for videos and their tracks...";

    fn options(&self) -> &Options {
        &self.options
    }

    fn gather(self) -> Result<Vec<Job>> {
        let video = self.video.map_or(VideoMatch::Mime, VideoMatch::Ext);
        let classifier = Classifier::new(video, self.tracks);
        let fetcher = Fetcher::try_from(self.input)?;
        let (videos, lists) = split(&classifier, fetcher.fetch());
        utils::aborted()?;

        println!("videos: {}", videos.len());
        classifier
            .tracks()
            .iter()
            .zip(&lists)
            .for_each(|(t, l)| println!("  {}: {} files", t.ext, l.len()));
        println!();

        let templates = videos.into_iter().map(|(_, stem)| stem).collect::<Vec<_>>();
        let jobs = classifier
            .tracks()
            .iter()
            .zip(lists)
            .map(|(track, list)| Job {
                label: track.ext.clone(),
                templates: templates.clone(),
                targets: list.into_iter().map(Entry::into_path).collect(),
                suffixes: track.suffixes.clone(),
                ext: Some(track.ext.clone()),
            })
            .collect();
        Ok(jobs)
    }
}

/// Separate videos, with their template names, from the files of each track, all in natural order.
fn split(
    classifier: &Classifier,
    entries: impl Iterator<Item = Entry>,
) -> (Vec<(Entry, String)>, Vec<Vec<Entry>>) {
    let mut videos = Vec::new();
    let mut lists = vec![Vec::new(); classifier.tracks().len()];
    for entry in entries {
        match classifier.classify(entry.file_name()) {
            Kind::Video(stem) => {
                let stem = stem.to_owned();
                tracing::debug!(path = entry.to_str(), %stem, "video");
                videos.push((entry, stem));
            }
            Kind::Track(i) => {
                tracing::debug!(path = entry.to_str(), track = i, "track");
                lists[i].push(entry);
            }
            Kind::Other => tracing::debug!(path = entry.to_str(), "ignored"),
        }
    }
    videos.sort_by(|(a, _), (b, _)| natural_cmp(a.to_str(), b.to_str()));
    lists
        .iter_mut()
        .for_each(|l| l.sort_by(|a, b| natural_cmp(a.to_str(), b.to_str())));
    (videos, lists)
}
