use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_gfxdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_dumps_json() {
    let input = r#"// (% \function "fill" \abstract "Fill the path." %)"#;

    let assert = cmd().write_stdin(input).assert().success();
    let modules = stdout_json(&assert);

    assert_eq!(modules[0]["name"], "anonymous");
    assert_eq!(modules[0]["type"], "module");
    assert_eq!(modules[0]["doc_infos"][0]["name"], "fill");
    assert_eq!(modules[0]["doc_infos"][0]["type"], "function");
    assert_eq!(modules[0]["doc_infos"][0]["abstract"], "Fill the path.");
}

#[test]
fn stdin_without_doc_strings() {
    let assert = cmd().write_stdin("int main() {}\n").assert().success();
    let modules = stdout_json(&assert);
    assert_eq!(modules[0]["name"], "anonymous");
    assert_eq!(modules[0]["doc_infos"], Value::Array(Vec::new()));
}

#[test]
fn stdin_html_format() {
    let input = r#"(% \module "gfx" %) (% \constant "PI" %)"#;

    let assert = cmd()
        .args(["-f", "html"])
        .write_stdin(input)
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("<!DOCTYPE html>"));
    assert!(output.contains("<title>gfx</title>"));
}

// -- file mode --

#[test]
fn file_mode_full_fixture() {
    let assert = cmd().arg(fixture_path("color.cpp")).assert().success();
    let modules = stdout_json(&assert);
    let module = &modules[0];

    assert_eq!(module["name"], "color");
    assert_eq!(module["abstract"], "Color construction and conversion.");
    assert_eq!(module["see_also"][0], "path");

    let children = module["doc_infos"].as_array().unwrap();
    let names: Vec<&str> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Color", "rgba", "black", "invert"]);

    assert_eq!(children[0]["supertype"], "Object");
    assert_eq!(children[0]["fields"].as_array().unwrap().len(), 4);
    assert_eq!(children[1]["abstract"], "Builds a color from \"raw\" components.");
    assert_eq!(children[1]["params"].as_array().unwrap().len(), 4);
    assert_eq!(children[2]["type"], "constant");
    assert_eq!(children[2]["value_type"], "<color>");
}

#[test]
fn file_mode_reports_warnings() {
    cmd()
        .arg(fixture_path("color.cpp"))
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported doc type swatch"))
        .stderr(predicate::str::contains(
            "did not recognize directive tags for function, ignoring",
        ))
        .stderr(predicate::str::contains(
            "(expected one of: signature, params, returns, name, abstract, discussion, see_also)",
        ));
}

#[test]
fn quiet_suppresses_warnings() {
    cmd()
        .arg("-q")
        .arg(fixture_path("color.cpp"))
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported").not());
}

#[test]
fn file_name_names_undeclared_module() {
    let assert = cmd()
        .arg(fixture_path("path.h"))
        .arg(fixture_path("color.cpp"))
        .assert()
        .success();
    let modules = stdout_json(&assert);
    let names: Vec<&str> = modules
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    // inputs are sorted by path
    assert_eq!(names, vec!["color", "path.h"]);
    assert_eq!(modules[1]["doc_infos"].as_array().unwrap().len(), 2);
}

#[test]
fn directory_input_is_scanned() {
    let assert = cmd()
        .arg(format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR")))
        .assert()
        .success();
    assert_eq!(stdout_json(&assert).as_array().unwrap().len(), 2);
}

#[test]
fn json_to_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested/docs.json");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("path.h"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let modules: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(modules[0]["doc_infos"][1]["name"], "line_to");
}

#[test]
fn include_empty_emits_null_keys() {
    let input = r#"(% \constant "PI" %)"#;

    let assert = cmd()
        .arg("--include-empty")
        .write_stdin(input)
        .assert()
        .success();
    let modules = stdout_json(&assert);
    assert!(modules[0]["abstract"].is_null());
    assert!(modules[0].get("abstract").is_some());
    assert!(modules[0]["doc_infos"][0].get("value_type").is_some());
}

// -- page formats --

#[test]
fn html_writes_one_page_per_module() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "html"])
        .arg(fixture_path("color.cpp"))
        .arg(fixture_path("path.h"))
        .assert()
        .success();

    let color = std::fs::read_to_string(dir.path().join("color.html")).unwrap();
    assert!(color.contains("<!DOCTYPE html>"));
    assert!(color.contains("rgba"));
    assert!(dir.path().join("path.h.html").exists());
}

#[test]
fn markdown_writes_one_page_per_module() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--format", "markdown"])
        .arg(fixture_path("color.cpp"))
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("color.md")).unwrap();
    assert!(output.starts_with("# color\n"));
    assert!(output.contains("* [rgba](#rgba)"));
}

#[test]
fn page_format_requires_output_for_files() {
    cmd()
        .args(["-f", "html"])
        .arg(fixture_path("color.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "xml"])
        .arg(fixture_path("color.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn unreadable_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("binary.cpp");
    std::fs::write(&input, [0xff, 0xfe, 0x00]).unwrap();

    cmd()
        .arg(input.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
