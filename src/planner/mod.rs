mod execute;

use crate::impl_new_name;
use crate::impl_original_path;
pub use execute::*;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal problems that block planning entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("there is nothing to rename")]
    EmptyInput,
    #[error(
        "{targets} files to rename, but {templates} templates with {suffixes} suffixes each need {}",
        .templates * .suffixes
    )]
    CountMismatch {
        targets: usize,
        templates: usize,
        suffixes: usize,
    },
}

/// Non-fatal problems, which need an explicit override to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// At least one suffix is empty.
    EmptySuffix,
    /// This suffix was given more than once.
    DuplicateSuffix(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::EmptySuffix => write!(f, "at least one suffix is empty"),
            Warning::DuplicateSuffix(s) => write!(f, "suffix {s:?} is used more than once"),
        }?;
        write!(f, ", files might overwrite each other")
    }
}

/// A single planned rename, always within the source's own directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    path: PathBuf,
    new_name: String,
}

impl_new_name!(Rename);
impl_original_path!(Rename);

impl Rename {
    /// The current file name of the source.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn is_unchanged(&self) -> bool {
        self.file_name() == self.new_name
    }
}

/// Check that templates, targets, and suffixes line up into blocks, and collect warnings.
pub fn validate(
    templates: &[impl AsRef<str>],
    targets: &[impl AsRef<Path>],
    suffixes: &[impl AsRef<str>],
) -> Result<Vec<Warning>, PlanError> {
    check_shape(templates.len(), targets.len(), suffixes.len())?;

    let mut warnings = Vec::new();
    if suffixes.iter().any(|s| s.as_ref().is_empty()) {
        warnings.push(Warning::EmptySuffix);
    }
    let mut seen = HashSet::with_capacity(suffixes.len());
    let mut reported = HashSet::new();
    for s in suffixes.iter().map(AsRef::as_ref) {
        if !seen.insert(s) && reported.insert(s) {
            warnings.push(Warning::DuplicateSuffix(s.to_owned()));
        }
    }
    tracing::debug!(
        templates = templates.len(),
        targets = targets.len(),
        suffixes = suffixes.len(),
        warnings = warnings.len(),
        "validated"
    );
    Ok(warnings)
}

/// Compute the new names, block by block: the target at `i * n + j` gets
/// `templates[i] + sep + suffixes[j]`, plus its own extension.
pub fn compute_plan(
    templates: &[impl AsRef<str>],
    targets: &[impl AsRef<Path>],
    suffixes: &[impl AsRef<str>],
    sep: &str,
) -> Result<Vec<Rename>, PlanError> {
    compute_plan_with(templates, targets, suffixes, sep, extension)
}

/// Same as [compute_plan], but with the extension of each target given by `ext`.
pub fn compute_plan_with(
    templates: &[impl AsRef<str>],
    targets: &[impl AsRef<Path>],
    suffixes: &[impl AsRef<str>],
    sep: &str,
    ext: impl Fn(&Path) -> String,
) -> Result<Vec<Rename>, PlanError> {
    check_shape(templates.len(), targets.len(), suffixes.len())?;

    let ext = &ext;
    let plan = targets
        .chunks_exact(suffixes.len())
        .zip(templates)
        .flat_map(|(block, template)| {
            block.iter().zip(suffixes).map(move |(target, suffix)| {
                let path = target.as_ref().to_owned();
                let new_name = format!(
                    "{}{sep}{}{}",
                    template.as_ref(),
                    suffix.as_ref(),
                    ext(&path)
                );
                Rename { path, new_name }
            })
        })
        .collect();
    Ok(plan)
}

fn check_shape(templates: usize, targets: usize, suffixes: usize) -> Result<(), PlanError> {
    if targets == 0 {
        return Err(PlanError::EmptyInput);
    }
    if templates.checked_mul(suffixes) != Some(targets) {
        return Err(PlanError::CountMismatch {
            targets,
            templates,
            suffixes,
        });
    }
    Ok(())
}

/// The extension of a path including its dot, or empty if there's none.
///
/// Leading dots never start an extension, but a trailing one does.
pub fn extension(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    split_ext(&name).1.to_owned()
}

/// The end of the file name if it matches `ext` (ASCII case-insensitive), spelled as in
/// the name; `ext` itself otherwise.
pub fn matched_extension(path: &Path, ext: &str) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    name.len()
        .checked_sub(ext.len())
        .and_then(|pos| name.get(pos..))
        .filter(|end| end.eq_ignore_ascii_case(ext))
        .unwrap_or(ext)
        .to_owned()
}

/// The file name of a path without its last extension, used as a template name.
pub fn stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    Some(split_ext(name).0)
}

fn split_ext(name: &str) -> (&str, &str) {
    let skip = name.len() - name.trim_start_matches('.').len();
    match name[skip..].rfind('.') {
        Some(pos) if pos > 0 => name.split_at(skip + pos),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::NewPath;

    fn names(plan: &[Rename]) -> Vec<&str> {
        plan.iter().map(|r| r.new_name.as_str()).collect()
    }

    #[test]
    fn episodes_scenario() {
        let templates = ["S01E01", "S01E02"];
        let suffixes = ["EN", "JP"];
        let targets = [
            "S01E01.mkv.opus0",
            "S01E01.mkv.opus1",
            "S01E02.mkv.opus0",
            "S01E02.mkv.opus1",
        ];
        assert_eq!(validate(&templates, &targets, &suffixes), Ok(vec![]));
        let plan = compute_plan(&templates, &targets, &suffixes, "_").unwrap();
        assert_eq!(
            names(&plan),
            [
                "S01E01_EN.opus0",
                "S01E01_JP.opus1",
                "S01E02_EN.opus0",
                "S01E02_JP.opus1"
            ]
        );
    }

    #[test]
    fn plan_keeps_target_directory_and_order() {
        let targets = ["subs/a/one.srt", "other/two.ass", "three"];
        let plan = compute_plan(&["ep"], &targets, &["x", "y", "z"], "-").unwrap();
        assert_eq!(plan.len(), targets.len());
        for (r, t) in plan.iter().zip(targets) {
            assert_eq!(r.path, Path::new(t));
            assert_eq!(r.new_path().parent(), Path::new(t).parent());
        }
        assert_eq!(names(&plan), ["ep-x.srt", "ep-y.ass", "ep-z"]);
    }

    #[test]
    fn empty_separator_concatenates() {
        let plan = compute_plan(&["Movie"], &["/tmp/sub.srt"], &[".en"], "").unwrap();
        assert_eq!(plan[0].new_path(), Path::new("/tmp/Movie.en.srt"));
    }

    #[test]
    fn plan_is_idempotent() {
        let args = (["a", "b"], ["1.srt", "2.srt", "3.srt", "4.srt"], ["x", "y"]);
        let first = compute_plan(&args.0, &args.1, &args.2, "_").unwrap();
        let second = compute_plan(&args.0, &args.1, &args.2, "_").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shape_errors() {
        #[track_caller]
        fn case(templates: usize, targets: usize, suffixes: usize, ok: bool) {
            let tm = vec!["t"; templates];
            let tg = vec!["f.srt"; targets];
            let sf = (0..suffixes).map(|i| i.to_string()).collect::<Vec<_>>();
            let res = validate(&tm, &tg, &sf);
            match (ok, targets) {
                (true, _) => assert!(res.is_ok(), "{res:?}"),
                (false, 0) => assert_eq!(res, Err(PlanError::EmptyInput)),
                (false, _) => assert_eq!(
                    res,
                    Err(PlanError::CountMismatch {
                        targets,
                        templates,
                        suffixes
                    })
                ),
            }
            assert_eq!(res.is_ok(), compute_plan(&tm, &tg, &sf, "_").is_ok());
        }

        case(2, 4, 2, true);
        case(1, 1, 1, true);
        case(3, 3, 1, true);
        case(2, 3, 1, false);
        case(2, 5, 2, false);
        case(0, 2, 2, false);
        case(2, 2, 0, false);
        case(0, 0, 0, false);
        case(2, 0, 1, false);
    }

    #[test]
    fn suffix_warnings() {
        #[track_caller]
        fn case(suffixes: &[&str], out: &[Warning]) {
            let targets = vec!["f"; suffixes.len()];
            assert_eq!(validate(&["t"], &targets, suffixes).unwrap(), out);
        }

        let dup = |s: &str| Warning::DuplicateSuffix(s.to_owned());
        case(&["en"], &[]);
        case(&["en", "jp"], &[]);
        case(&[""], &[Warning::EmptySuffix]);
        case(&["en", ""], &[Warning::EmptySuffix]);
        case(&["en", "en"], &[dup("en")]);
        case(&["en", "en", "en"], &[dup("en")]);
        case(&["a", "b", "a", "b"], &[dup("a"), dup("b")]);
        case(&["", ""], &[Warning::EmptySuffix, dup("")]);
        case(&["EN", "en"], &[]);
    }

    #[test]
    fn extensions() {
        #[track_caller]
        fn case(p: &str, ext: &str) {
            assert_eq!(extension(Path::new(p)), ext);
        }

        case("a.srt", ".srt");
        case("a.en.srt", ".srt");
        case("dir.d/a", "");
        case(".hidden", "");
        case(".hidden.srt", ".srt");
        case("a.", ".");
        case("a..b", ".b");
        case("..foo", "");
        case("...", "");
        case("..foo.srt", ".srt");
    }

    #[test]
    fn matched_extensions() {
        #[track_caller]
        fn case(p: &str, ext: &str, out: &str) {
            assert_eq!(matched_extension(Path::new(p), ext), out);
        }

        case("ep.en.srt", ".en.srt", ".en.srt");
        case("ep.EN.Srt", ".en.srt", ".EN.Srt");
        case("dir/ep.srt", ".srt", ".srt");
        case("ep.ass", ".srt", ".srt");
        case("t", ".srt", ".srt");
    }

    #[test]
    fn plan_with_matched_extension() {
        let targets = ["subs/ep1.EN.srt", "subs/ep2.en.srt"];
        let plan = compute_plan_with(&["a", "b"], &targets, &["forced"], "_", |p| {
            matched_extension(p, ".en.srt")
        })
        .unwrap();
        assert_eq!(names(&plan), ["a_forced.EN.srt", "b_forced.en.srt"]);
        let plan = compute_plan(&["a", "b"], &targets, &["forced"], "_").unwrap();
        assert_eq!(names(&plan), ["a_forced.srt", "b_forced.srt"]);
    }

    #[test]
    fn stems() {
        #[track_caller]
        fn case(p: &str, out: &str) {
            assert_eq!(stem(Path::new(p)), Some(out));
        }

        case("Show S01E01.mkv", "Show S01E01");
        case("/videos/a.b.mp4", "a.b");
        case("noext", "noext");
        case(".hidden", ".hidden");
        case("..foo", "..foo");
        case("a.", "a");
        case(".hidden.srt", ".hidden");
    }

    #[test]
    fn unchanged_detection() {
        let plan = compute_plan(&["a"], &["dir/a_x.srt"], &["x"], "_").unwrap();
        assert!(plan[0].is_unchanged());
        let plan = compute_plan(&["a"], &["dir/b.srt"], &["x"], "_").unwrap();
        assert!(!plan[0].is_unchanged());
    }
}
