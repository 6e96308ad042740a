use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn queue_cmd(base: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prompt-queue"));
    cmd.env_remove("PROMPT_QUEUE_DIR")
        .env_remove("RUST_LOG")
        .arg("--base")
        .arg(base);
    cmd
}

fn run(base: &Path, args: &[&str]) -> Output {
    queue_cmd(base).args(args).output().unwrap()
}

fn archive_dirs(base: &Path) -> Vec<String> {
    let mut dirs: Vec<_> = fs::read_dir(base.join("run"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    dirs.sort();
    dirs
}

#[test]
fn test_init_creates_layout() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");

    let output = run(&base, &["init"]);

    assert!(output.status.success());
    assert!(base.join("queued").is_dir());
    assert!(base.join("run").is_dir());
}

#[test]
fn test_run_on_empty_queue_is_noop() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");

    let output = run(&base, &["run"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No prompts found in queue."));
    assert!(archive_dirs(&base).is_empty());
}

#[test]
fn test_run_archives_emergency_note() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);
    fs::write(
        base.join("queued/note.txt"),
        "# Topic: Emergency\n\nPatient has chest pain",
    )
    .unwrap();

    let output = run(&base, &["run"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PROCESSING SUMMARY"));
    assert!(stdout.contains("Prompts processed: 1"));
    assert!(stdout.contains("note.txt -> emergency_room"));
    // Progress is printed once, before the summary
    assert_eq!(stdout.matches("Processing: note.txt").count(), 1);
    assert!(stdout.find("Processing: note.txt").unwrap() < stdout.find("PROCESSING SUMMARY").unwrap());

    assert!(!base.join("queued/note.txt").exists());
    let dirs = archive_dirs(&base);
    assert_eq!(dirs.len(), 1);
    assert!(dirs[0].ends_with("_note"));

    let archive = base.join("run").join(&dirs[0]);
    assert!(archive.join("note.txt").exists());
    let logic = fs::read_to_string(archive.join("decision_logic.txt")).unwrap();
    assert!(logic.starts_with("EMERGENCY ROOM DECISION LOGIC"));
    let flowchart = fs::read_to_string(archive.join("flowchart.md")).unwrap();
    assert!(flowchart.contains("Call 911 immediately"));

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(archive.join("execution_metadata.json")).unwrap())
            .unwrap();
    assert_eq!(metadata["original_prompt"], "note.txt");
    assert_eq!(metadata["topic"], "emergency_room");
    assert_eq!(
        metadata["files_generated"],
        serde_json::json!(["decision_logic.txt", "flowchart.md"])
    );
}

#[test]
fn test_run_with_seed_then_history() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");

    let output = run(&base, &["run", "--seed", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["archived"].as_array().unwrap().len(), 3);
    assert!(report["failures"].as_array().unwrap().is_empty());
    for record in report["archived"].as_array().unwrap() {
        assert!(record["original_file"].as_str().unwrap().contains("_prompt."));
        let mermaid = record["files_created"]["mermaid_file"].as_str().unwrap();
        assert!(Path::new(mermaid).exists());
        assert!(record["files_created"]["prompt_file"].is_string());
    }

    let output = run(&base, &["pending", "--json"]);
    assert!(output.status.success());
    let pending: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(pending.is_empty());

    let output = run(&base, &["history", "--json"]);
    assert!(output.status.success());
    let history: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let mut topics: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["topic"].as_str().unwrap().to_string())
        .collect();
    topics.sort();
    assert_eq!(
        topics,
        vec!["business_investment", "emergency_room", "software_deployment"]
    );
}

#[test]
fn test_seed_config_flag() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    fs::create_dir_all(&base).unwrap();
    fs::write(base.join("queue.yaml"), "seed_samples: true\nrun_dir: archive\n").unwrap();

    let output = run(&base, &["run"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating sample prompts"));
    assert_eq!(fs::read_dir(base.join("archive")).unwrap().count(), 3);
}

#[test]
fn test_pending_lists_only_prompt_files() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);
    fs::write(base.join("queued/b.md"), "b").unwrap();
    fs::write(base.join("queued/a.txt"), "a").unwrap();
    fs::write(base.join("queued/ignored.json"), "{}").unwrap();

    let output = run(&base, &["pending"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 queued prompt(s)"));
    assert!(stdout.find("a.txt").unwrap() < stdout.find("b.md").unwrap());
    assert!(!stdout.contains("ignored.json"));
}

#[test]
fn test_history_without_init_fails() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");

    let output = run(&base, &["history"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Queue not initialized"));
}

#[test]
fn test_history_orders_most_recent_first() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);

    for (dir, original) in [("20240101_120000_a", "a.txt"), ("20240102_090000_b", "b.txt")] {
        let archive = base.join("run").join(dir);
        fs::create_dir_all(&archive).unwrap();
        fs::write(
            archive.join("execution_metadata.json"),
            serde_json::json!({
                "original_prompt": original,
                "processed_at": "2024-01-01T12:00:00",
                "topic": "generic_decision",
                "files_generated": ["decision_logic.txt", "flowchart.md"],
            })
            .to_string(),
        )
        .unwrap();
    }

    let output = run(&base, &["history"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let b = stdout.find("b.txt").unwrap();
    let a = stdout.find("a.txt").unwrap();
    assert!(b < a);
}

#[test]
fn test_history_filters_by_topic() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["run", "--seed", "--json"]);

    let output = run(&base, &["history", "--topic", "emergency_room", "--json"]);
    assert!(output.status.success());

    let history: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["topic"], "emergency_room");
}

#[test]
fn test_history_rejects_unknown_topic() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);

    let output = run(&base, &["history", "--topic", "weather"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid topic"));
}

#[test]
fn test_prompt_named_like_artifact_fails_loudly() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);
    fs::write(base.join("queued/flowchart.md"), "Should we deploy the release?").unwrap();
    fs::write(base.join("queued/ok.txt"), "Patient in the emergency room").unwrap();

    let output = run(&base, &["run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("flowchart.md"));
    assert_eq!(
        fs::read_to_string(base.join("queued/flowchart.md")).unwrap(),
        "Should we deploy the release?"
    );
    let dirs = archive_dirs(&base);
    assert_eq!(dirs.len(), 1);
    assert!(dirs[0].ends_with("_ok"));
}

#[test]
fn test_classify_does_not_move_file() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    let prompt = tmp.path().join("idea.md");
    fs::write(&prompt, "# Owner: finance\nShould we make this investment?").unwrap();

    let output = run(&base, &["classify", prompt.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["topic"], "business_investment");
    assert_eq!(result["metadata"]["Owner"], "finance");
    assert!(prompt.exists());
}

#[test]
fn test_classify_rejects_other_extensions() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    let file = tmp.path().join("data.csv");
    fs::write(&file, "a,b").unwrap();

    let output = run(&base, &["classify", file.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a prompt file"));
}

#[test]
fn test_export_writes_templates() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    let out = tmp.path().join("decision_outputs");

    let output = run(&base, &["export", "--out", out.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 6 files"));
    assert!(out.join("emergency_room_flowchart.md").exists());
    assert!(out.join("business_investment_logic.txt").exists());
}

#[test]
fn test_unreadable_prompt_fails_loudly() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("prompts");
    run(&base, &["init"]);
    fs::write(base.join("queued/broken.txt"), b"\xff\xfe\xfd").unwrap();
    fs::write(base.join("queued/fine.txt"), "deployment checklist").unwrap();

    let output = run(&base, &["run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.txt"));
    assert!(stderr.contains("1 prompt(s) failed to process"));
    assert!(base.join("queued/broken.txt").exists());
    assert!(!base.join("queued/fine.txt").exists());
}
