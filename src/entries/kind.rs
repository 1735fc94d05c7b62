use crate::planner;
use crate::utils;
use anyhow::{Result, anyhow};
use mime_guess::mime;
use std::path::Path;
use std::str::FromStr;

/// How video files are recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoMatch {
    /// By this exact extension, dot included.
    Ext(String),
    /// By any extension known to be a video type.
    Mime,
}

/// A kind of companion file, with the suffixes of its files for each video.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Normalized extension, lowercase with a leading dot.
    pub ext: String,
    pub suffixes: Vec<String>,
}

/// The kind of a file name, as found by a [Classifier].
#[derive(Debug, PartialEq)]
pub enum Kind<'a> {
    /// A video, with its template name.
    Video(&'a str),
    /// A file of the track at this index.
    Track(usize),
    Other,
}

/// Decides what each file is, checking videos first and then tracks in order.
#[derive(Debug)]
pub struct Classifier {
    video: VideoMatch,
    tracks: Vec<Track>,
}

impl Classifier {
    pub fn new(video: VideoMatch, tracks: Vec<Track>) -> Self {
        Classifier { video, tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn classify<'a>(&self, name: &'a str) -> Kind<'a> {
        let video = match &self.video {
            VideoMatch::Ext(ext) => strip_ext(name, ext),
            VideoMatch::Mime => is_video_mime(name)
                .then(|| planner::stem(Path::new(name)))
                .flatten(),
        };
        if let Some(stem) = video {
            return Kind::Video(stem);
        }
        self.tracks
            .iter()
            .position(|t| strip_ext(name, &t.ext).is_some())
            .map_or(Kind::Other, Kind::Track)
    }
}

/// Remove the extension from the name, if it ends with it (ASCII case-insensitive)
/// and something is left.
fn strip_ext<'a>(name: &'a str, ext: &str) -> Option<&'a str> {
    let pos = name.len().checked_sub(ext.len()).filter(|&p| p > 0)?;
    (name.is_char_boundary(pos) && name[pos..].eq_ignore_ascii_case(ext)).then(|| &name[..pos])
}

fn is_video_mime(name: &str) -> bool {
    mime_guess::from_path(name)
        .iter()
        .any(|m| m.type_() == mime::VIDEO)
}

/// Normalize a user given extension, like "srt", ".SRT" or "en.srt", for use in clap.
pub fn parse_ext(s: &str) -> Result<String> {
    let ext = s.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(anyhow!("empty extension: {s:?}"));
    }
    let ext = utils::parse_name_part(ext)?;
    Ok(format!(".{}", ext.to_ascii_lowercase()))
}

/// Parse `EXT=SUFFIX[,SUFFIX...]`; an empty list means a single empty suffix.
impl FromStr for Track {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (ext, suffixes) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid EXT=SUFFIXES: {s:?}"))?;
        let suffixes = suffixes
            .split(',')
            .map(utils::parse_name_part)
            .collect::<Result<_>>()?;
        Ok(Track {
            ext: parse_ext(ext)?,
            suffixes,
        })
    }
}
