//! End-to-end tests for the polymerge binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A temp project with `app.py` and `app.js`, isolated from any global config.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.py"), "print(\"hi\")\n").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(\"hi\")\n").unwrap();
    dir
}

fn polymerge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("polymerge").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("POLYMERGE_LOG");
    cmd
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_default_output_path() {
    let dir = project();
    let output = polymerge(dir.path())
        .args(["app.py", "app.js"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Merged files written to out/result.py.js\n"
    );
    let merged = read(dir.path().join("out/result.py.js"));
    assert!(merged.starts_with("eval([\"exec("));
    assert!(merged.ends_with("][1|0==2]);\n"));
}

#[test]
fn test_input_order_does_not_matter() {
    let dir = project();
    polymerge(dir.path())
        .args(["app.py", "app.js", "a.py.js"])
        .assert()
        .success();
    polymerge(dir.path())
        .args(["app.js", "app.py", "b.py.js"])
        .assert()
        .success();

    assert_eq!(read(dir.path().join("a.py.js")), read(dir.path().join("b.py.js")));
}

#[test]
fn test_nested_output_directory_is_created() {
    let dir = project();
    polymerge(dir.path())
        .args(["app.py", "app.js", "dist/deep/app.py.js"])
        .assert()
        .success();
    assert!(dir.path().join("dist/deep/app.py.js").is_file());
}

#[test]
fn test_literal_flag() {
    let dir = project();
    polymerge(dir.path())
        .args(["app.py", "app.js", "lit.py.js", "--literal"])
        .assert()
        .success();
    let merged = read(dir.path().join("lit.py.js"));
    assert!(merged.starts_with("1 // 1; (lambda: exec(\"\"\"print(\\\"hi\\\")\\n\"\"\""));
    assert!(merged.ends_with("\n// '''\n"));
}

#[test]
fn test_json_report() {
    let dir = project();
    let output = polymerge(dir.path())
        .args(["app.py", "app.js", "z.py.js", "--compress", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["output"], "z.py.js");
    assert_eq!(report["strategy"], "compressed-transport");
    let written = std::fs::metadata(dir.path().join("z.py.js")).unwrap().len();
    assert_eq!(report["bytes"], written);
}

#[test]
fn test_project_config_sets_defaults() {
    let dir = project();
    std::fs::create_dir_all(dir.path().join(".polymerge")).unwrap();
    std::fs::write(
        dir.path().join(".polymerge/config.toml"),
        "[merge]\nstrategy = \"literal-embed\"\n\n[output]\npath = \"build/app.py.js\"\n",
    )
    .unwrap();

    polymerge(dir.path())
        .args(["app.py", "app.js"])
        .assert()
        .success();
    assert!(read(dir.path().join("build/app.py.js")).starts_with("1 // 1;"));

    // A strategy flag overrides the config file.
    polymerge(dir.path())
        .args(["app.py", "app.js", "--compress"])
        .assert()
        .success();
    assert!(read(dir.path().join("build/app.py.js")).contains("zlib"));
}

#[test]
fn test_unsupported_pair() {
    let dir = project();
    std::fs::write(dir.path().join("other.py"), "print(2)\n").unwrap();
    let output = polymerge(dir.path())
        .args(["app.py", "other.py"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(
        "Merging py and py is not supported. Only Python and JavaScript files can be merged."
    ));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_input() {
    let dir = project();
    let output = polymerge(dir.path())
        .args(["app.py", "missing.js"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("One or more input files do not exist.")
    );
}
