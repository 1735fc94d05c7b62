mod natural;
mod running;

use anyhow::{Result, anyhow};
pub use natural::*;
use regex::Regex;
pub use running::*;
use std::io::{Write, stdin, stdout};
use std::sync::{LazyLock, mpsc};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Prompt the user for confirmation, giving up early if ctrl-c is pressed.
pub fn prompt_yes_no(msg: impl Into<Box<str>>) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let msg = msg.into();
    let ask = move |input: &mut String| {
        aborted()?;
        print!("{msg} [y|n]: ");
        stdout().flush()?;
        input.clear();
        match stdin().read_line(input)? {
            0 => Err(anyhow!("no input")), // stdin was closed.
            _ => Ok(()),
        }
    };
    thread::spawn(move || {
        let mut input = String::new();
        let res = loop {
            match (ask(&mut input), input.trim()) {
                (Err(err), _) => break Err(err),
                (Ok(()), "y" | "Y") => break Ok(()),
                (Ok(()), "n" | "N" | "q") => break Err(anyhow!("cancelled")),
                _ => {}
            }
        };
        let _ = tx.send(res);
    });

    loop {
        match rx.recv_timeout(Duration::from_millis(1000 / 2)) {
            Ok(res) => break res,
            Err(mpsc::RecvTimeoutError::Timeout) => aborted()?,
            Err(mpsc::RecvTimeoutError::Disconnected) => break Err(anyhow!("prompt failed")),
        }
    }
}

/// Reject characters that are not allowed in file names, for use in clap.
pub fn parse_name_part(s: &str) -> Result<String> {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00]"#).unwrap());

    match RE.find(s) {
        None => Ok(s.to_owned()),
        Some(m) => Err(anyhow!("invalid character {:?} in {s:?}", m.as_str())),
    }
}

/// Send diagnostics to stderr, `subren=warn` by default or `subren=debug` when verbose.
///
/// `RUST_LOG` takes precedence over both.
pub fn install_tracing(verbose: bool) {
    let default = match verbose {
        true => "subren=debug",
        false => "subren=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
