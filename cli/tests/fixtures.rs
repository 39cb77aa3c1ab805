//! End-to-end checks that spawn the fixture binaries the way a process
//! supervisor would: piped streams, wall-clock timing, exit status.
use std::process::Stdio;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

const CLOSER: &str = env!("CARGO_BIN_EXE_closer");
const STDIN_ECHO: &str = env!("CARGO_BIN_EXE_stdin-echo");
const SLEEPY: &str = env!("CARGO_BIN_EXE_sleepy");

const SECOND: Duration = Duration::from_secs(1);
const LAX_SECOND: Duration = Duration::from_millis(1500);
/// Slack for a reader observing two flushes that are one unit apart.
const JITTER: Duration = Duration::from_millis(100);

fn fixture(bin: &str) -> Command {
    let mut cmd = Command::new(bin);
    cmd.env_remove("STDIO_FIXTURES_LOG_DIR")
        .env_remove("STDIO_FIXTURES_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

fn still_running(child: &mut Child) -> bool {
    child.try_wait().unwrap().is_none()
}

#[tokio::test]
async fn closer_closes_streams_before_exiting() {
    let start = Instant::now();
    let mut child = fixture(CLOSER).spawn().unwrap();
    let mut stdout = child.stdout.take().unwrap();
    let mut stderr = child.stderr.take().unwrap();

    let mut out = String::new();
    stdout.read_to_string(&mut out).await.unwrap();
    let stdout_eof = start.elapsed();
    assert_eq!(out, "This is the last time I write to stdout!\n");
    assert!(stdout_eof < SECOND, "stdout EOF at {stdout_eof:?}");
    assert!(still_running(&mut child));

    let mut err = String::new();
    stderr.read_to_string(&mut err).await.unwrap();
    let stderr_eof = start.elapsed();
    assert_eq!(err, "And THIS is the last time I write to stderr!\n");
    assert!(stderr_eof >= SECOND - JITTER, "stderr EOF at {stderr_eof:?}");
    assert!(still_running(&mut child));

    let status = child.wait().await.unwrap();
    assert!(status.success());
    assert!(start.elapsed() >= 2 * SECOND);
}

#[cfg(unix)]
#[tokio::test]
async fn closer_fails_when_stdout_reader_is_gone() {
    use std::os::fd::OwnedFd;
    use std::os::unix::net::UnixStream;

    // The peer is gone before the child starts, so its first write fails.
    let (ours, theirs) = UnixStream::pair().unwrap();
    drop(ours);

    let output = fixture(CLOSER)
        .stdout(Stdio::from(OwnedFd::from(theirs)))
        .spawn()
        .unwrap()
        .wait_with_output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    // It stops at the failed write and never reaches its stderr line.
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.contains("And THIS"), "stderr: {stderr}");
}

#[tokio::test]
async fn log_dir_that_is_a_file_is_ignored() {
    let not_a_dir = tempfile::NamedTempFile::new().unwrap();
    let mut child = fixture(STDIN_ECHO)
        .env("STDIO_FIXTURES_LOG_DIR", not_a_dir.path())
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"still works\n").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Line 1: still works\n");
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn invalid_log_filter_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixture(STDIN_ECHO)
        .env("STDIO_FIXTURES_LOG_DIR", dir.path())
        .env("STDIO_FIXTURES_LOG", "stdin_echo=loudest")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn stdin_echo_numbers_and_strips_lines() {
    let mut child = fixture(STDIN_ECHO).stdin(Stdio::piped()).spawn().unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"hello\n  world \t\n").await.unwrap();
    drop(stdin);

    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();
    let first = lines.next_line().await.unwrap();
    let first_at = Instant::now();
    let second = lines.next_line().await.unwrap();
    let gap = first_at.elapsed();

    assert_eq!(first.as_deref(), Some("Line 1: hello"));
    assert_eq!(second.as_deref(), Some("Line 2: world"));
    assert!(gap >= SECOND - JITTER, "lines only {gap:?} apart");
    assert_eq!(lines.next_line().await.unwrap(), None);

    let status = child.wait().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn stdin_echo_handles_unterminated_input() {
    let mut child = fixture(STDIN_ECHO).stdin(Stdio::piped()).spawn().unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"Apple\n\nCoconut").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Line 1: Apple\nLine 2: \nLine 3: Coconut\n"
    );
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn stdin_echo_empty_input() {
    let output = fixture(STDIN_ECHO).output().await.unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn sleepy_reports_incrementally_when_piped() {
    let start = Instant::now();
    let mut child = fixture(SLEEPY).spawn().unwrap();
    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();

    let expected = [
        ("Starting...", 1),
        ("Working...", 3),
        ("Stdout is not a tty", 3),
        ("Shutting down...", 5),
    ];
    for (text, secs) in expected {
        let line = lines.next_line().await.unwrap();
        let at = start.elapsed();
        assert_eq!(line.as_deref(), Some(text));
        let due = SECOND * secs;
        assert!(at >= due - JITTER, "{text:?} arrived early at {at:?}");
        assert!(at < due + LAX_SECOND, "{text:?} arrived late at {at:?}");
    }
    assert_eq!(lines.next_line().await.unwrap(), None);

    let status = child.wait().await.unwrap();
    assert!(status.success());
    assert!(start.elapsed() >= 6 * SECOND);
}

#[tokio::test]
async fn sleepy_redirected_to_file() {
    let mut file = tempfile::tempfile().unwrap();
    let out = file.try_clone().unwrap();

    let status = fixture(SLEEPY).stdout(out).status().await.unwrap();
    assert!(status.success());

    let mut contents = String::new();
    std::io::Seek::rewind(&mut file).unwrap();
    std::io::Read::read_to_string(&mut file, &mut contents).unwrap();
    assert_eq!(
        contents,
        "Starting...\nWorking...\nStdout is not a tty\nShutting down...\n"
    );
}

#[tokio::test]
async fn logging_goes_to_file_not_streams() {
    let dir = tempfile::tempdir().unwrap();
    let output = fixture(CLOSER)
        .env("STDIO_FIXTURES_LOG_DIR", dir.path())
        .env("STDIO_FIXTURES_LOG", "info")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "This is the last time I write to stdout!\n"
    );
    assert_eq!(
        String::from_utf8(output.stderr).unwrap(),
        "And THIS is the last time I write to stderr!\n"
    );

    let log = std::fs::read_to_string(dir.path().join("closer.log")).unwrap();
    assert!(log.contains("stdout closed"), "log: {log}");
    assert!(log.contains("finished"), "log: {log}");
}
