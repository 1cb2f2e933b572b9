use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn run_cmd(root: &Path, args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_jobtrack"))
        .env("JOBTRACK_HOME", root)
        .args(args)
        .output()
        .expect("run jobtrack");
    assert!(
        output.status.success(),
        "command failed: {:?}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find('{').expect("json output start");
    serde_json::from_str(&stdout[json_start..]).expect("parse json")
}

fn add_entry(root: &Path, company: &str) -> Value {
    run_cmd(
        root,
        &[
            "entry",
            "--format",
            "json",
            "add",
            "--set",
            &format!("Company Name={company}"),
            "--set",
            "Job Title=Engineer",
            "--set",
            "Term=Fall 2026",
            "--set",
            "Status=Applied",
            "--set",
            "Company Website=https://example.com",
            "--set",
            "Location=Remote",
            "--set",
            "Application Method=LinkedIn",
            "--set",
            "Resume Version=resume_v1.pdf",
        ],
    )
}

#[test]
fn add_list_delete_lifecycle() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();

    let added = add_entry(root, "Acme");
    assert_eq!(added["status"], "ok");
    assert_eq!(added["index"], 1);
    add_entry(root, "Globex");

    let listed = run_cmd(root, &["entry", "--format", "json", "list"]);
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["records"][1]["values"]["Company Name"], "Globex");

    let filtered = run_cmd(root, &["entry", "--format", "json", "list", "--query", "GLOBEX"]);
    assert_eq!(filtered["count"], 1);

    let deleted = run_cmd(
        root,
        &["entry", "--format", "json", "delete", "--index", "1", "--yes"],
    );
    assert_eq!(deleted["remaining"], 1);

    // Remaining entry was renumbered to index 1.
    let got = run_cmd(root, &["entry", "--format", "json", "get", "--index", "1"]);
    assert_eq!(got["record"]["values"]["Company Name"], "Globex");
}

#[test]
fn add_missing_required_fields_fails_and_names_them() {
    let tmp = tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_jobtrack"))
        .env("JOBTRACK_HOME", tmp.path())
        .args([
            "entry",
            "add",
            "--set",
            "Company Name=Acme",
        ])
        .output()
        .expect("run jobtrack");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required fields"), "stderr: {stderr}");
    assert!(stderr.contains("Job Title"), "stderr: {stderr}");
    assert!(!stderr.contains("Company Name"), "stderr: {stderr}");
}

#[test]
fn import_dry_run_then_commit_replaces_entries() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    add_entry(root, "Old Corp");

    let csv_path = root.join("incoming.csv");
    fs::write(&csv_path, "Company,Role\nAcme,Engineer\nGlobex,Analyst\nInitech,PM\n").unwrap();
    let csv = csv_path.to_string_lossy().to_string();

    let preview = run_cmd(
        root,
        &[
            "transfer", "--format", "json", "import", "--path", &csv,
            "--map", "Company Name=Company",
            "--map", "Job Title=Role",
            "--dry-run",
        ],
    );
    assert_eq!(preview["rows"], 3);
    assert_eq!(preview["mapping"]["Company Name"], "Company");
    assert_eq!(preview["mapping"]["Notes"], Value::Null);

    // Dry run must not have touched the store.
    let listed = run_cmd(root, &["entry", "--format", "json", "list"]);
    assert_eq!(listed["count"], 1);

    let committed = run_cmd(
        root,
        &[
            "transfer", "--format", "json", "import", "--path", &csv,
            "--map", "Company Name=Company",
            "--map", "Job Title=Role",
            "--yes",
        ],
    );
    assert_eq!(committed["imported"], 3);

    let listed = run_cmd(root, &["entry", "--format", "json", "list"]);
    assert_eq!(listed["count"], 3);
    assert_eq!(listed["records"][0]["index"], 1);
    assert_eq!(listed["records"][0]["values"]["Company Name"], "Acme");
    assert_eq!(listed["records"][0]["values"]["Notes"], "");
}

#[test]
fn export_writes_header_and_rows() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    add_entry(root, "Acme");

    let out_path = root.join("out.csv");
    let out = out_path.to_string_lossy().to_string();
    let exported = run_cmd(
        root,
        &["transfer", "--format", "json", "export", "--path", &out],
    );
    assert_eq!(exported["exported"], 1);

    let contents = fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert!(lines.next().unwrap().starts_with("Index,Company Name,"));
    assert!(lines.next().unwrap().starts_with("1,Acme,"));
}

#[test]
fn report_counts_by_status() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    add_entry(root, "Acme");
    add_entry(root, "Globex");

    let summary = run_cmd(root, &["report", "--format", "json", "summary"]);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["by_status"]["Applied"], 2);
    assert_eq!(summary["by_status"]["Rejected"], 0);

    let counts = run_cmd(
        root,
        &["report", "--format", "json", "counts", "--field", "Status"],
    );
    assert_eq!(counts["counts"][0]["value"], "Applied");
    assert_eq!(counts["counts"][0]["count"], 2);
}

#[test]
fn attach_ingest_and_list() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let source = root.join("my_resume.pdf");
    fs::write(&source, b"pdf").unwrap();
    let source_arg = source.to_string_lossy().to_string();

    let stored = run_cmd(
        root,
        &[
            "attach",
            "--format",
            "json",
            "ingest",
            "--kind",
            "resume",
            "--path",
            &source_arg,
            "--no-date-suffix",
        ],
    );
    assert_eq!(stored["stored"], "my_resume.pdf");

    let listed = run_cmd(root, &["attach", "--format", "json", "list", "--kind", "resume"]);
    assert_eq!(listed["files"][0], "my_resume.pdf");
}
