//! End-to-end runs of the rpsl-resolve binary.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const POLICY: &str = "\
% served by a test registry

route: 1.1.1.0/24
origin: AS1
mnt-by: MNTR-ONE
member-of: rs-customers

route-set: rs-customers
mbrs-by-ref: MNTR-ONE

route-set: rs-out
members: 10.0.0.0/8,
 rs-customers

aut-num: AS1
as-name: ONE-NET
export: to AS2 2.2.2.2 at 1.1.1.1 announce rs-out
";

fn rpsl_resolve(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rpsl-resolve"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run rpsl-resolve")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_text_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "policy.rpsl", POLICY);

    let output = rpsl_resolve(&["-i", &input, "-m", "aut-num=AS1"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "aut-num ONE-NET (AS1)\n  peer AS2 2.2.2.2 at 1.1.1.1\n    \
         1.1.1.0/24 via MNTR-ONE\n    10.0.0.0/8 via null\n\n"
    );
}

#[test]
fn test_json_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "policy.rpsl", POLICY);
    let out_path = dir.path().join("out.json");

    let output = rpsl_resolve(&[
        "-i",
        &input,
        "-o",
        out_path.to_str().unwrap(),
        "-e",
        "json",
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let routes = &value["aut_nums"][0]["peers"][0]["routes"];
    assert_eq!(routes.as_array().unwrap().len(), 2);

    let names: Vec<&str> = value["route_sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|set| set["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["rs-customers", "rs-out"]);
}

#[test]
fn test_config_file_selects_emitter() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "policy.rpsl", POLICY);
    let config = write(
        &dir,
        "resolve.toml",
        "[output]\nemitter = \"null\"\n\n[logging]\nlevel = \"warn\"\n",
    );

    let output = rpsl_resolve(&["-c", &config, "-i", &input]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    // The command line overrides the file.
    let output = rpsl_resolve(&["-c", &config, "-i", &input, "-e", "text"]);
    assert!(stdout(&output).starts_with("aut-num ONE-NET (AS1)"));
}

#[test]
fn test_list_emitters() {
    let output = rpsl_resolve(&["--list-emitters"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    for name in ["null", "text", "json"] {
        assert!(listing.contains(name), "{}", listing);
    }
}

#[test]
fn test_failures_exit_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "policy.rpsl", POLICY);

    let unknown_emitter = rpsl_resolve(&["-i", &input, "-e", "bird"]);
    assert!(!unknown_emitter.status.success());
    assert!(String::from_utf8_lossy(&unknown_emitter.stderr).contains("Unknown emitter 'bird'"));

    let bad_argument = rpsl_resolve(&["-i", &input, "-e", "json", "-m", "colour=red"]);
    assert!(!bad_argument.status.success());

    let missing_input = dir.path().join("missing.rpsl");
    assert!(!Path::new(&missing_input).exists());
    let output = rpsl_resolve(&["-i", missing_input.to_str().unwrap()]);
    assert!(!output.status.success());
}
