use assert_cmd::Command;
use regex::Regex;

fn hashload() -> Command {
    Command::cargo_bin("hashload").unwrap()
}

#[test]
fn short_run_prints_throughput() {
    let output = hashload()
        .args(["-d", "2s", "-n", "4", "-b", "1024", "-a", "sha256", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let pattern =
        Regex::new(r"Throughput: ([0-9,]+) ops/s \| Operations: ([0-9,]+) \| Duration: ([0-9.]+)s")
            .unwrap();
    let captures = pattern.captures(&stdout).unwrap();

    let ops: u64 = captures[2].replace(',', "").parse().unwrap();
    let secs: f64 = captures[3].parse().unwrap();
    assert!(ops > 0);
    assert!(secs >= 2.0);
    assert!(stdout.contains("Stopped by: timeout"));
}

#[test]
fn unknown_algorithm_fails_before_workers_start() {
    let output = hashload()
        .args(["-d", "1s", "-a", "not-a-real-algorithm"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Configuration error: unknown algorithm: not-a-real-algorithm"));
    assert!(!stderr.contains("Runs "));
    assert!(!stdout.contains("Throughput"));
}

#[test]
fn bad_duration_fails() {
    let output = hashload().args(["-d", "soon"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn list_prints_all_algorithms() {
    let output = hashload().arg("--list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("sha512/224"));
    assert!(stdout.contains("ed25519"));
}

#[test]
fn excessive_threads_are_clamped() {
    let output = hashload()
        .args(["-d", "1s", "-n", "100000", "-a", "md5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Requested 100000 threads"));
}

#[test]
fn json_output_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    let output = hashload()
        .args(["-d", "1s", "-n", "1", "-a", "ed25519", "-q", "-o"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["algorithm"], "ed25519");
    assert_eq!(value["threads"], 1);
    assert_eq!(value["stop_reason"], "timeout");
    assert!(value["total_ops"].as_u64().unwrap() > 0);
}

#[test]
fn duration_past_clock_range_fails_cleanly() {
    let output = hashload()
        .args(["-d", "500000000000years", "-n", "1", "-q"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("too large"));
    assert!(!stdout.contains("Throughput"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let output = hashload().args(["-q", "-v", "-d", "1s"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(unix)]
fn signal_stops_run_cleanly(kill_flag: &str, signal_name: &str) {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread;
    use std::time::{Duration, Instant};

    let child = StdCommand::new(assert_cmd::cargo::cargo_bin("hashload"))
        .args(["-d", "60s", "-n", "2", "-a", "sha1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(1000));
    let start = Instant::now();
    let status = StdCommand::new("kill")
        .args([kill_flag, &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(signal_name));
    assert!(stdout.contains("Stopped by: interrupt"));
    assert!(stdout.contains("Mean latency per op, by batch (us)"));
}

#[cfg(unix)]
#[test]
fn sigterm_stops_run_cleanly() {
    signal_stops_run_cleanly("-TERM", "SIGTERM");
}

#[cfg(unix)]
#[test]
fn sigint_stops_run_cleanly() {
    signal_stops_run_cleanly("-INT", "SIGINT");
}
