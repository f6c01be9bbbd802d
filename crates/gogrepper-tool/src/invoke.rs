//! Running gogrep for a search request

use crate::relay::{relay_stderr, relay_stdout};
use crate::sink::DisplaySink;
use gogrepper_core::{GogrepError, Result, SearchMode, SearchRequest};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

/// Environment variable overridden by [`SearchRequest::gopath`]
pub const GOPATH_ENV: &str = "GOPATH";

/// Options for executing gogrep
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// gogrep binary name or path
    pub binary: String,
    /// Pass `-tests` so `_test.go` files are searched too
    pub include_tests: bool,
    /// Kills the child when cancelled
    pub cancel: Option<CancellationToken>,
}

impl ExecOptions {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            include_tests: true,
            cancel: None,
        }
    }
}

/// Result of one gogrep run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `-1` when the child was killed or cancelled
    pub exit_code: i32,
    /// Standard output lines that reached the sink
    pub streamed_lines: Vec<String>,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Build gogrep arguments; order follows gogrep's flag grammar.
pub fn build_args(request: &SearchRequest, include_tests: bool) -> Vec<String> {
    let mut args = Vec::new();
    if include_tests {
        args.push("-tests".to_string());
    }
    args.push("-x".to_string());
    args.push(request.search_pattern.clone());
    if !request.replace_pattern.is_empty() {
        args.push("-s".to_string());
        args.push(request.replace_pattern.clone());
    }
    if request.inplace {
        args.push("-w".to_string());
    }
    args.push(request.target.clone());
    args
}

/// The informational line printed before gogrep starts
pub fn describe(request: &SearchRequest) -> String {
    match request.mode() {
        SearchMode::Search => format!(
            "info: searching for `{}` pattern...",
            request.search_pattern
        ),
        SearchMode::Replace => format!(
            "info: replacing `{}` with `{}`...",
            request.search_pattern, request.replace_pattern
        ),
        SearchMode::ReplaceInplace => format!(
            "info: replacing `{}` with `{}` (inplace)...",
            request.search_pattern, request.replace_pattern
        ),
    }
}

fn build_command(request: &SearchRequest, options: &ExecOptions) -> Command {
    let mut cmd = Command::new(&options.binary);
    cmd.args(build_args(request, options.include_tests));

    // Set on the child only; our own environment stays untouched.
    if let Some(gopath) = request.gopath.as_deref().filter(|p| !p.is_empty()) {
        cmd.env(GOPATH_ENV, gopath);
    }
    if let Some(dir) = &request.workdir {
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Run gogrep for `request`, streaming its output into `sink`.
///
/// Resolves once the child exits. A launch failure is written to the sink
/// and returned as [`GogrepError::LaunchFailed`]; a non-zero exit is not an
/// error, it is reported through [`ProcessOutcome::exit_code`].
pub async fn run_search<S>(
    request: &SearchRequest,
    options: &ExecOptions,
    sink: &S,
) -> Result<ProcessOutcome>
where
    S: DisplaySink + ?Sized,
{
    request.validate()?;
    if let Some(dir) = request.workdir.as_ref().filter(|dir| !dir.is_dir()) {
        // A missing cwd also fails with ENOENT; keep it apart from a missing binary.
        return Err(GogrepError::NoActiveContext(format!(
            "Can't determine search directory {}",
            dir.display()
        )));
    }

    sink.append_line(&describe(request))?;

    let mut cmd = build_command(request, options);
    log::debug!(
        "spawning {} {:?} (workdir: {:?}, GOPATH override: {:?})",
        options.binary,
        build_args(request, options.include_tests),
        request.workdir,
        request.gopath
    );

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => {
            sink.append_line(&format!("error: {}", source))?;
            sink.show()?;
            return Err(GogrepError::LaunchFailed {
                binary: options.binary.clone(),
                source,
            });
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| GogrepError::Generic("failed to capture gogrep stdout".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| GogrepError::Generic("failed to capture gogrep stderr".to_string()))?;

    let filter = request.line_filter.as_deref();
    let (streamed, errors, status) = tokio::join!(
        relay_stdout(stdout, filter, sink),
        relay_stderr(stderr, sink),
        wait_for_exit(&mut child, options.cancel.as_ref()),
    );
    let streamed_lines = streamed?;
    errors?;
    let exit_code = status?.unwrap_or(-1);

    // Exit codes are gogrep's own: 0 on success, anything else is a failure.
    if exit_code == 0 {
        sink.append_line("info: gogrep finished successfully")?;
    } else {
        sink.append_line("info: gogrep finished with error")?;
    }
    sink.show()?;

    log::debug!(
        "gogrep exited with {} ({} lines shown)",
        exit_code,
        streamed_lines.len()
    );

    Ok(ProcessOutcome {
        exit_code,
        streamed_lines,
    })
}

async fn wait_for_exit(
    child: &mut Child,
    cancel: Option<&CancellationToken>,
) -> std::io::Result<Option<i32>> {
    let Some(token) = cancel else {
        return Ok(child.wait().await?.code());
    };
    tokio::select! {
        status = child.wait() => Ok(status?.code()),
        _ = token.cancelled() => {
            log::info!("search cancelled, killing gogrep");
            child.kill().await?;
            Ok(None)
        }
    }
}
