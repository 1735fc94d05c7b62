use anyhow::{Result, anyhow};
use std::env;
use std::fmt::{self, Display};
use std::path::{Component, Path, PathBuf};
use yansi::{Paint, Style};

/// A file or directory entry that is guaranteed to have a valid UTF-8 representation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry {
    path: PathBuf,
    is_dir: bool,
}

/// Create a new entry from a path, checking that it has a valid UTF-8 representation.
impl TryFrom<PathBuf> for Entry {
    type Error = anyhow::Error;

    fn try_from(path: PathBuf) -> Result<Self> {
        if path.to_str().is_none() {
            return Err(anyhow!("no UTF-8 path: {path:?}"));
        }
        let is_dir = path.is_dir();
        Ok(Entry { path, is_dir })
    }
}

impl Entry {
    /// Create a new entry with the given name adjoined without checking UTF-8 again.
    pub fn join(&self, name: impl AsRef<str>) -> Entry {
        let path = self.path.join(name.as_ref());
        let is_dir = path.is_dir();
        Entry { path, is_dir }
    }

    /// Return a cached directory flag, which does not touch the filesystem again.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Get the filename from entries directly as a &str.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .map(|n| n.to_str().unwrap()) // checked on creation.
            .unwrap_or_default()
    }

    pub fn to_str(&self) -> &str {
        self.path.to_str().unwrap() // checked on creation.
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    pub fn display_path(&self) -> impl Display {
        DisplayPath(self)
    }

    /// Make the path absolute, expanding `~` and resolving `.` and `..` without touching symlinks.
    pub fn resolve(&self) -> Result<Entry> {
        let mut it = self.path.components();
        let mut res = match it.next() {
            Some(Component::Normal(x)) if x == "~" => {
                dirs::home_dir().ok_or_else(|| anyhow!("no home dir"))?
            }
            Some(Component::Normal(x)) => env::current_dir()?.join(x),
            Some(Component::CurDir) | None => env::current_dir()?,
            Some(Component::ParentDir) => {
                let mut dir = env::current_dir()?;
                dir.pop();
                dir
            }
            Some(x) => PathBuf::from(x.as_os_str()),
        };
        for comp in it {
            match comp {
                Component::ParentDir => {
                    if !res.pop() {
                        return Err(anyhow!("invalid path: {}", self.to_str()));
                    }
                }
                Component::CurDir => {}
                _ => res.push(comp),
            }
        }
        Entry::try_from(res) // the prepended paths are NOT guaranteed to be valid UTF-8.
    }
}

/// A [Display] implementation for [Entry] that prints its full path, with a styled name.
#[derive(Debug)]
pub struct DisplayPath<'a>(&'a Entry);

const DIR_STYLE: (Style, Style) = {
    let parent_dir: Style = Style::new().yellow();
    (parent_dir, parent_dir.bold())
};
const FILE_STYLE: (Style, Style) = {
    let parent_file = Style::new().cyan();
    (parent_file, parent_file.bold())
};

impl Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entry = self.0;
        let (parent, name) = split_name(entry.to_str(), entry.file_name());
        let (p_style, n_style) = if entry.is_dir { DIR_STYLE } else { FILE_STYLE };
        let symbol = match entry.is_dir && !name.ends_with('/') {
            true => "/",
            false => "",
        };
        write!(
            f,
            "{}{}{}",
            parent.paint(p_style),
            name.paint(n_style),
            symbol.paint(n_style)
        )
    }
}

/// Split a full path into its parent part, trailing separator included, and its name.
pub fn split_name<'a>(full: &'a str, name: &str) -> (&'a str, &'a str) {
    match full.rfind(name).filter(|_| !name.is_empty()) {
        Some(pos) => (&full[..pos], &full[pos..pos + name.len()]),
        None => ("", full),
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.display_path().fmt(f)
    }
}

impl AsRef<Path> for Entry {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
