use anyhow::{Result, anyhow};
use std::sync::atomic::{self, AtomicBool};

/// Cleared when the user presses ctrl-c.
static RUNNING: AtomicBool = AtomicBool::new(true);

/// Install a ctrl-c handler that asks the program to stop, instead of killing it mid-rename.
pub fn install_ctrl_c_handler() {
    if let Err(err) = ctrlc::set_handler(|| {
        eprintln!("\nwarning: ctrl-c received, stopping...");
        RUNNING.store(false, atomic::Ordering::Relaxed);
    }) {
        eprintln!("error: set ctrl-c handler: {err}");
    }
}

/// Check whether the program should continue running.
pub fn is_running() -> bool {
    RUNNING.load(atomic::Ordering::Relaxed)
}

/// Same as `!is_running()`, but as a Result.
pub fn aborted() -> Result<()> {
    match is_running() {
        true => Ok(()),
        false => Err(anyhow!("aborted")),
    }
}

/// A suffix for summaries of work that may have been cut short.
pub fn display_abort(cond: bool) -> &'static str {
    match cond && !is_running() {
        true => " (partial, aborted)",
        false => "",
    }
}
