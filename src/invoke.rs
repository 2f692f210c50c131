// ABOUTME: Engine invocation for the slideshot application
// ABOUTME: Runs LibreOffice headless with a fixed argument list and an optional deadline

use crate::errors::{Result, SlideError};
use crate::locator::EnginePath;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Arguments passed to the engine, after the executable itself.
pub fn engine_args(source: &Path, temp_dir: &Path) -> Vec<OsString> {
    vec![
        "--headless".into(),
        "--convert-to".into(),
        "png".into(),
        "--outdir".into(),
        temp_dir.as_os_str().to_owned(),
        source.as_os_str().to_owned(),
    ]
}

/// Run the engine and block until it exits, fails, or runs past `timeout`.
///
/// On Unix the engine gets its own process group, so helpers it starts are
/// killed along with it and cannot hold the call open past the deadline.
pub fn invoke(
    engine: &EnginePath,
    source: &Path,
    temp_dir: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    info!("Converting {:?} with {}", source, engine);
    let start_time = Instant::now();
    let deadline = timeout.map(|t| start_time + t);

    let mut command = Command::new(engine.as_path());
    command
        .args(engine_args(source, temp_dir))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command.spawn().map_err(|e| SlideError::EngineLaunch {
        path: engine.as_path().to_path_buf(),
        source: e,
    })?;

    let (tx, rx) = mpsc::channel();
    let mut pending = 0;
    if let Some(pipe) = child.stdout.take() {
        drain(pipe, Stream::Stdout, tx.clone());
        pending += 1;
    }
    if let Some(pipe) = child.stderr.take() {
        drain(pipe, Stream::Stderr, tx.clone());
        pending += 1;
    }
    drop(tx);

    let status = match wait_with_deadline(engine, &mut child, deadline) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let timeout = timeout.unwrap_or_default();
            warn!("LibreOffice ran past {:?}, killing it", timeout);
            kill_engine(&mut child);
            return Err(SlideError::ConversionTimeout { timeout });
        }
        Err(e) => {
            kill_engine(&mut child);
            return Err(e);
        }
    };

    let (output, complete) = collect(&rx, pending, deadline);
    if !complete {
        warn!("Processes left by LibreOffice held its output past the deadline, killing them");
        kill_engine(&mut child);
    }
    if !output.stdout.is_empty() {
        debug!("engine stdout: {}", output.stdout);
    }
    if !output.stderr.is_empty() {
        debug!("engine stderr: {}", output.stderr);
    }

    if !status.success() {
        let EngineOutput { stdout, stderr } = output;
        let output = if stderr.is_empty() { stdout } else { stderr };
        warn!("LibreOffice exited with {}", status);
        return Err(SlideError::ConversionFailed {
            status: status.to_string(),
            output,
        });
    }

    info!(
        "LibreOffice finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Poll the direct child until it exits. `None` means the deadline passed
/// first; killing is left to the caller.
fn wait_with_deadline(
    engine: &EnginePath,
    child: &mut Child,
    deadline: Option<Instant>,
) -> Result<Option<ExitStatus>> {
    loop {
        let polled = child.try_wait().map_err(|e| SlideError::EngineLaunch {
            path: engine.as_path().to_path_buf(),
            source: e,
        })?;
        if polled.is_some() {
            return Ok(polled);
        }

        if let Some(at) = deadline {
            if Instant::now() >= at {
                return Ok(None);
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the engine's process group (or just the engine off Unix) and reap it.
fn kill_engine(child: &mut Child) {
    #[cfg(unix)]
    {
        // The shell builtin takes a negative pid as a process group.
        let group = format!("-{}", child.id());
        match Command::new("/bin/sh")
            .arg("-c")
            .arg(format!("kill -s KILL -- {}", group))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if !status.success() => {
                debug!("kill {} exited with {}", group, status)
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to signal process group {}: {}", group, e),
        }
    }

    if let Err(e) = child.kill() {
        debug!("LibreOffice already gone: {}", e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap LibreOffice: {}", e);
    }
}

enum Stream {
    Stdout,
    Stderr,
}

#[derive(Default)]
struct EngineOutput {
    stdout: String,
    stderr: String,
}

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let text = String::from_utf8_lossy(&buf).trim().to_string();
        let _ = tx.send((stream, text));
    });
}

/// Gather what the reader threads captured. The second value is false when
/// the deadline passed before every pipe closed; unfinished readers are left
/// detached.
fn collect(
    rx: &Receiver<(Stream, String)>,
    mut pending: usize,
    deadline: Option<Instant>,
) -> (EngineOutput, bool) {
    let mut output = EngineOutput::default();
    while pending > 0 {
        let received = match deadline {
            Some(at) => {
                let left = at.saturating_duration_since(Instant::now());
                match rx.recv_timeout(left) {
                    Ok(msg) => Some(msg),
                    Err(RecvTimeoutError::Timeout) => return (output, false),
                    Err(RecvTimeoutError::Disconnected) => None,
                }
            }
            None => rx.recv().ok(),
        };
        let Some((stream, text)) = received else {
            break;
        };
        match stream {
            Stream::Stdout => output.stdout = text,
            Stream::Stderr => output.stderr = text,
        }
        pending -= 1;
    }
    (output, true)
}
