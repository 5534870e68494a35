//! Shell command execution.

use crate::error::{PreflightError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout followed by stderr, trimmed.
    ///
    /// Some tools (`java -version`) report on stderr even when they succeed.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout.to_string(),
            (true, _) => stderr.to_string(),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Kill the command if it runs longer than this (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Runs named external commands on behalf of requirement checks.
///
/// `run` succeeds only when the command exits with status 0; any other
/// outcome is an error whose message is suitable as a check diagnostic.
pub trait CommandRunner: Send + Sync {
    /// Run a command and return its captured output.
    fn run(&self, command: &str) -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by `/bin/sh` (`cmd.exe` on Windows).
#[derive(Debug, Clone, Default)]
pub struct ShellCommandRunner {
    options: CommandOptions,
}

impl ShellCommandRunner {
    /// Create a runner that kills commands after `timeout`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            options: CommandOptions {
                timeout,
                ..Default::default()
            },
        }
    }

    /// Create a runner with explicit options.
    pub fn with_options(options: CommandOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CommandOptions {
        &self.options
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        tracing::debug!("Running command: {}", command);
        let result = execute(command, &self.options)?;
        if result.success {
            Ok(result)
        } else {
            let detail = if result.stderr.trim().is_empty() {
                result.stdout.trim().to_string()
            } else {
                result.stderr.trim().to_string()
            };
            Err(PreflightError::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
                detail: Some(detail),
            })
        }
    }
}

/// Execute a shell command, capturing stdout and stderr.
///
/// Returns `Ok` for any command that ran to completion, whatever its exit
/// code. Fails when the shell cannot be spawned or the timeout elapses; a
/// timed-out command is killed together with every process it started.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = shell_command(command);

    // Set working directory
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    // Set environment
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // Own process group, so a timeout can take down the whole pipeline.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|e| PreflightError::CommandFailed {
        command: command.to_string(),
        code: None,
        detail: Some(e.to_string()),
    })?;

    // Drain both pipes on their own threads so a chatty command can't block
    // on a full pipe while we wait for it.
    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let status = wait_with_timeout(&mut child, command, options.timeout)?;

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn wait_with_timeout(
    child: &mut Child,
    command: &str,
    timeout: Option<Duration>,
) -> Result<ExitStatus> {
    let Some(limit) = timeout else {
        return Ok(child.wait()?);
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            kill_process_group(child);
            let _ = child.wait();
            tracing::warn!("Command timed out after {:?}: {}", limit, command);
            return Err(PreflightError::CommandTimedOut {
                command: command.to_string(),
                timeout_secs: limit.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the command and every process it spawned.
#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // A negative pid signals the whole group the child leads.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
}

/// Build the shell invocation for `command`.
///
/// Always a plain, non-interactive shell: no rc or profile file is sourced,
/// so whatever those print never ends up in a check's output. Variables such
/// as `ANDROID_HOME` and `PATH` are inherited from the calling process.
fn shell_command(command: &str) -> Command {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd =
            Command::new(std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string()));
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);
    cmd
}
