use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn powgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_powgen"))
        .args(args)
        .output()
        .expect("powgen process should run")
}

fn scenario(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
        .display()
        .to_string()
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "powgen failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn default_preset_streams_csv_to_stdout() {
    let output = powgen(&["--seed", "7", "--log-level", "error"]);
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "datetime,power,bathroom,car,coffee,stove");
    assert_eq!(lines.len(), 1441);
    assert!(lines[1].starts_with("2020-01-01 00:00:00.000000,"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--- Run Summary ---"), "stderr={stderr}");
}

#[test]
fn fixed_seed_is_reproducible() {
    let a = stdout_of(&powgen(&["--seed", "11", "--days", "2"]));
    let b = stdout_of(&powgen(&["--seed", "11", "--days", "2"]));
    assert_eq!(a, b);
    assert_eq!(a.lines().count(), 2881);
}

#[test]
fn scenario_file_is_loaded() {
    let output = powgen(&["--scenario", &scenario("weekend.toml")]);
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "datetime,power,coffee,floor,scooter,stove");
    assert_eq!(lines.len(), 2 * 1440 + 1);
    assert!(lines[1].starts_with("2024-06-01 00:00:00.000000,"));
    // seed comes from the file
    let again = stdout_of(&powgen(&["--scenario", &scenario("weekend.toml")]));
    assert_eq!(stdout, again);
}

#[test]
fn household_scenario_file_matches_preset_columns() {
    let from_file = stdout_of(&powgen(&["--scenario", &scenario("household.toml"), "--seed", "1"]));
    let from_preset = stdout_of(&powgen(&["--preset", "household", "--seed", "1"]));
    assert_eq!(from_file.lines().next(), from_preset.lines().next());
    assert_eq!(from_file.lines().count(), from_preset.lines().count());
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("power.csv");
    let path_str = path.display().to_string();

    let output = powgen(&["--seed", "3", "--output", &path_str]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "CSV should not go to stdout");

    let content = fs::read_to_string(&path).expect("CSV file should exist");
    assert_eq!(content.lines().count(), 1441);
}

#[test]
fn invalid_scenario_fails_before_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        "[devices.toaster]\ntype = \"Toaster\"\npower = 800\n",
    )
    .expect("write scenario");

    let output = powgen(&["--scenario", &path.display().to_string()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Toaster"), "stderr={stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = powgen(&["--preset", "castle"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr={stderr}");
}

#[test]
fn scenario_and_preset_conflict() {
    let output = powgen(&["--preset", "household", "--scenario", &scenario("household.toml")]);
    assert!(!output.status.success());
}
