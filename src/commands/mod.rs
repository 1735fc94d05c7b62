mod pair;
mod scan;

use crate::capabilities::{NewName, OriginalPath};
use crate::planner::{self, Rename, Warning};
use crate::utils;
use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use yansi::Paint;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rename the given files after the given templates, one per suffix.
    #[command(after_help = "-t and -s take all the values that follow them, so list the TARGETS \
        before them, or after a `--`.")]
    Pair(pair::Pair),
    /// Scan directories for videos, and rename the tracks found with them.
    Scan(scan::Scan),
}

/// Options that control how a plan is applied, common to all commands.
#[derive(Debug, Clone, Args)]
pub struct Options {
    /// The separator between the template name and the suffix.
    #[arg(long, default_value = "_", value_name = "STR", allow_hyphen_values = true, value_parser = utils::parse_name_part, help_heading = Some("Apply"))]
    sep: String,
    /// Skip the confirmation prompt, useful for automation.
    #[arg(short = 'y', long, help_heading = Some("Apply"))]
    yes: bool,
    /// Proceed even if there are warnings about the suffixes.
    #[arg(short = 'f', long, help_heading = Some("Apply"))]
    force: bool,
    /// Only display the plan, without renaming anything.
    #[arg(short = 'n', long, help_heading = Some("Apply"))]
    dry_run: bool,
}

/// The inputs of one plan: templates, the files to rename in blocks, and their suffixes.
#[derive(Debug)]
pub struct Job {
    /// What these files are, for messages.
    pub label: String,
    pub templates: Vec<String>,
    pub targets: Vec<PathBuf>,
    pub suffixes: Vec<String>,
    /// The extension all targets end with, kept whole in the new names;
    /// without it, targets keep only their last extension.
    pub ext: Option<String>,
}

/// The common interface for subren commands.
///
/// Each command only gathers its jobs; planning and renaming are shared.
pub trait Gather {
    const OPENING_LINE: &'static str;

    fn options(&self) -> &Options;
    fn gather(self) -> Result<Vec<Job>>;
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Pair(cmd) => run(cmd),
            Command::Scan(cmd) => run(cmd),
        }
    }
}

fn run<G: Gather>(cmd: G) -> Result<()> {
    println!("=> {}\n", G::OPENING_LINE);
    let opts = cmd.options().clone();
    let jobs = cmd.gather()?;
    utils::aborted()?;

    // step: validate all jobs before planning any.
    let mut warnings = Vec::new();
    for job in &jobs {
        planner::validate(&job.templates, &job.targets, &job.suffixes)
            .map_err(|err| anyhow!("{}: {err}", job.label))?
            .into_iter()
            .for_each(|w| warnings.push((&job.label, w)));
    }

    // step: compute the plans, in the order of the jobs.
    let mut plan = Vec::new();
    for job in &jobs {
        let (tm, tg, sf, sep) = (&job.templates, &job.targets, &job.suffixes, &opts.sep);
        let p = match &job.ext {
            Some(ext) => planner::compute_plan_with(tm, tg, sf, sep, |p| {
                planner::matched_extension(p, ext)
            }),
            None => planner::compute_plan(tm, tg, sf, sep),
        }
        .map_err(|err| anyhow!("{}: {err}", job.label))?;
        plan.extend(p);
    }

    // step: display the changes by parent directory.
    let changes = display(&plan);

    // step: display receipt summary.
    warnings
        .iter()
        .for_each(|(label, w)| eprintln!("warning: {label}: {w}"));
    if changes > 0 || !warnings.is_empty() {
        println!();
    }
    println!("total files: {}", plan.len());
    println!("  changes: {changes}");
    println!("  warnings: {}", warnings.len());
    if opts.dry_run {
        println!("dry run, nothing renamed");
        return Ok(());
    }
    if changes == 0 {
        return Ok(());
    }

    // step: apply changes, if the user agrees.
    confirm(&opts, &warnings)?;
    let total = plan.len();
    let report = planner::execute(plan);
    debug_assert_eq!(report.total(), total);
    report.failures.iter().for_each(|(r, failure)| {
        eprintln!("error: {failure}: {} --> {}", r.path().display(), r.new_name())
    });
    println!(
        "renamed: {}{}",
        report.renamed,
        utils::display_abort(!report.failures.is_empty())
    );
    match report.failures.is_empty() {
        true => println!("done"),
        false => println!("found {} errors", report.failures.len()),
    }
    Ok(())
}

/// Get the go-ahead, either from the flags or the user.
fn confirm(opts: &Options, warnings: &[(&String, Warning)]) -> Result<()> {
    if !warnings.is_empty() && !opts.force {
        if opts.yes {
            return Err(anyhow!(
                "{} warnings found, use --force to proceed anyway",
                warnings.len()
            ));
        }
        utils::prompt_yes_no("there are warnings, proceed anyway?")?;
    }
    if !opts.yes {
        println!("renaming can't be undone; to avoid data loss, consider backing up your files first.");
        utils::prompt_yes_no("apply changes?")?;
    }
    Ok(())
}

/// Print the pending renames grouped by consecutive parent directories, returning how many there are.
fn display(plan: &[Rename]) -> usize {
    let mut changes = 0;
    plan.chunk_by(|m, n| m.path().parent() == n.path().parent())
        .for_each(|g| {
            let pending = g.iter().filter(|r| !r.is_unchanged()).collect::<Vec<_>>();
            if pending.is_empty() {
                return;
            }
            let dir = match g[0].path().parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            println!("{}/:", dir.display().yellow());
            pending.iter().for_each(|r| {
                println!("  {} --> {}", r.file_name(), r.new_name().cyan())
            });
            changes += pending.len();
        });
    changes
}
