//! Search commands - run gogrep for a file, its directory, or the workspace

use crate::cli::PatternArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use gogrepper_core::workspace::find_root;
use gogrepper_core::{GogrepError, SearchRequest, SearchScope, Session, pattern};
use gogrepper_tool::{ExecOptions, InstallOutcome, TerminalSink, run_search};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Execute `gogrepper file`
pub fn run_file(config: Option<PathBuf>, file: PathBuf, args: PatternArgs) -> Result<i32> {
    let mut ctx = Context::new(config)?;
    if !file.is_file() {
        output::warn("Can't determine file path");
        return Ok(0);
    }
    // gogrep reports absolute paths, so the line filter has to be one too.
    let file = std::path::absolute(&file)?;
    run(&mut ctx, SearchScope::File(file), args)
}

/// Execute `gogrepper dir`
pub fn run_dir(config: Option<PathBuf>, file: PathBuf, args: PatternArgs) -> Result<i32> {
    let mut ctx = Context::new(config)?;
    if !file.is_file() {
        output::warn("Can't determine current directory path");
        return Ok(0);
    }
    let file = std::path::absolute(&file)?;
    run(&mut ctx, SearchScope::Relative(file), args)
}

/// Execute `gogrepper root`
pub fn run_root(
    config: Option<PathBuf>,
    workspace: Option<PathBuf>,
    args: PatternArgs,
) -> Result<i32> {
    let mut ctx = Context::new(config)?;
    let root = match workspace {
        Some(dir) if dir.is_dir() => dir,
        Some(_) => {
            output::warn("Can't determine search root folder");
            return Ok(0);
        }
        None => match find_root(&std::env::current_dir()?) {
            Some(root) => root,
            None => {
                output::warn("Can't run root search outside of the workspace");
                return Ok(0);
            }
        },
    };
    run(&mut ctx, SearchScope::Root(root), args)
}

fn run(ctx: &mut Context, scope: SearchScope, args: PatternArgs) -> Result<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Pattern source 1: given on the command line.
    if let Some(text) = args.pattern.filter(|p| !p.is_empty()) {
        return search_once(ctx, &runtime, &scope, &text);
    }

    // Pattern source 2: prompt, pre-filled with the previous pattern.
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut status = 0;
    loop {
        match prompt_pattern(&mut ctx.session, &mut input, &mut io::stderr())? {
            PatternInput::Pattern(text) => status = search_once(ctx, &runtime, &scope, &text)?,
            PatternInput::Empty => {}
            PatternInput::Eof => break,
        }
        if !args.interactive {
            break;
        }
    }
    Ok(status)
}

#[derive(Debug, PartialEq, Eq)]
enum PatternInput {
    Pattern(String),
    Empty,
    Eof,
}

/// Ask for a pattern; an empty answer accepts the previous one.
fn prompt_pattern<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    prompt: &mut W,
) -> io::Result<PatternInput> {
    if session.last_pattern.is_empty() {
        write!(prompt, "Search pattern: ")?;
    } else {
        write!(prompt, "Search pattern [{}]: ", session.last_pattern)?;
    }
    prompt.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(PatternInput::Eof);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    let text = if line.trim().is_empty() {
        session.last_pattern.clone()
    } else {
        line.to_string()
    };
    if text.is_empty() {
        return Ok(PatternInput::Empty);
    }
    session.remember_pattern(&text);
    Ok(PatternInput::Pattern(text))
}

/// Run one pattern; returns gogrep's exit code (0 when nothing ran).
fn search_once(
    ctx: &mut Context,
    runtime: &Runtime,
    scope: &SearchScope,
    text: &str,
) -> Result<i32> {
    let parsed = match pattern::parse(text) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => return Ok(0),
        Err(e) => {
            output::warn(e);
            return Ok(0);
        }
    };

    let request = SearchRequest::new(scope, parsed).with_gopath(ctx.config.gopath());
    if let Err(e) = request.validate() {
        output::warn(e);
        return Ok(0);
    }

    let Some(binary) = ctx.config.binary().map(str::to_string) else {
        output::warn(GogrepError::MissingBinary);
        return Ok(0);
    };
    let options = ExecOptions {
        binary: binary.clone(),
        include_tests: ctx.config.gogrep.tests,
        cancel: None,
    };

    match runtime.block_on(run_search(&request, &options, &TerminalSink)) {
        Ok(outcome) => Ok(outcome.exit_code),
        Err(e) if e.is_not_found() => {
            log::debug!("{}", e);
            output::error(format!("{} not found in PATH", binary));
            fix_missing_tool(ctx)?;
            Ok(1)
        }
        Err(e) if e.is_user_error() => {
            output::warn(e);
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Attempt the one-shot install after gogrep failed to launch
fn fix_missing_tool(ctx: &mut Context) -> Result<()> {
    let installer = ctx.installer()?;
    match installer.fix_missing_tool(&mut ctx.session.install, &ctx.store)? {
        InstallOutcome::Installed { binary } => {
            log::info!("installed {}", binary.display());
            output::notice("installed gogrep, 'gogrep.binary' setting is updated");
            ctx.reload()?;
        }
        InstallOutcome::Unsupported { key } => {
            log::info!("no bundled gogrep for {}", key);
        }
        InstallOutcome::AlreadyAttempted => {}
    }
    Ok(())
}
