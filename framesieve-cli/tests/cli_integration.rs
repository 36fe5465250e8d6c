use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn framesieve_cmd() -> Command {
    let mut cmd = Command::cargo_bin("framesieve").expect("Failed to find framesieve binary");
    cmd.env_remove("FRAMESIEVE_ORACLE_ADDR");
    cmd
}

#[test]
fn test_missing_required_args_fail() {
    framesieve_cmd()
        .arg("extract")
        .arg("--input")
        .arg("videos.txt")
        .assert()
        .failure()
        .stderr(contains("required"));
}

#[test]
fn test_missing_oracle_addr_fails() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;

    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("videos.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .assert()
        .failure()
        .stderr(contains("--addr"));

    Ok(())
}

#[test]
fn test_oracle_addr_from_environment() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;

    framesieve_cmd()
        .env("FRAMESIEVE_ORACLE_ADDR", "127.0.0.1:9")
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("does-not-exist.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_missing_video_list_is_empty_run() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;

    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("does-not-exist.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .arg("-a")
        .arg("127.0.0.1:9")
        .assert()
        .success()
        .stdout(contains("nothing to do"))
        .stdout(contains("0 listed"));

    Ok(())
}

#[test]
fn test_unreadable_video_is_reported_and_run_succeeds() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let list = work.path().join("videos.txt");
    std::fs::write(&list, format!("{}\n", work.path().join("missing.mp4").display()))?;

    // Whether or not ffmpeg is installed, the video cannot be decoded
    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(&list)
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .arg("-a")
        .arg("127.0.0.1:9")
        .assert()
        .success()
        .stdout(contains("[FAIL]"))
        .stdout(contains("decode failed"))
        .stdout(contains("1 listed, 0 decoded"));

    Ok(())
}

#[test]
fn test_non_finite_threshold_fails() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;

    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("videos.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("NaN")
        .arg("-a")
        .arg("127.0.0.1:9")
        .assert()
        .failure()
        .stderr(contains("threshold"));

    Ok(())
}

#[test]
fn test_invalid_policy_fails() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;

    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("videos.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .arg("-a")
        .arg("127.0.0.1:9")
        .arg("--on-oracle-error")
        .arg("sometimes")
        .assert()
        .failure()
        .stderr(contains("sometimes"));

    Ok(())
}

#[test]
fn test_log_file_is_written() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let log_path = work.path().join("logs").join("run.log");

    framesieve_cmd()
        .arg("extract")
        .arg("-i")
        .arg(work.path().join("does-not-exist.txt"))
        .arg("-o")
        .arg(work.path().join("out"))
        .arg("-t")
        .arg("0.5")
        .arg("-a")
        .arg("127.0.0.1:9")
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log_path)?;
    assert!(contents.contains("Video list:"));
    Ok(())
}
