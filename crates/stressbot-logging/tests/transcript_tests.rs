use std::fs;

use stressbot_logging::TranscriptWriter;
use tempfile::TempDir;

#[test]
fn test_transcript_writes_jsonl_lines_in_order() {
    let dir = TempDir::new().unwrap();
    let writer = TranscriptWriter::in_dir(dir.path(), "session-abc").unwrap();

    writer.write_start("session-abc", "csss", "canned", None, 2);
    writer.write_item(0, "Felt overwhelmed", "Felt overwhelmed", "Often", 4);
    writer.write_follow_up(0, "How much has this affected you?", "Rarely", 2);
    writer.write_item(1, "Felt anxious about housing", "Felt anxious about housing", "Never", 1);
    writer.write_survey(
        vec![("func_1".to_string(), 5)],
        vec![("liked".to_string(), "it was quick".to_string())],
    );
    writer.write_end("completed", 42.5);

    let content = fs::read_to_string(writer.path()).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0]["type"], "session_start");
    assert_eq!(lines[0]["session_id"], "session-abc");
    assert_eq!(lines[0]["items"], 2);
    assert_eq!(lines[1]["type"], "item");
    assert_eq!(lines[1]["score"], 4);
    assert_eq!(lines[2]["type"], "follow_up");
    assert_eq!(lines[2]["answer"], "Rarely");
    assert_eq!(lines[4]["type"], "survey");
    assert_eq!(lines[5]["type"], "session_end");
    assert_eq!(lines[5]["outcome"], "completed");
}

#[test]
fn test_transcript_filename_contains_session_hash() {
    let dir = TempDir::new().unwrap();
    let writer = TranscriptWriter::in_dir(dir.path(), "session-abc").unwrap();

    let name = writer.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.ends_with(".jsonl"));
    // timestamp prefix + underscore + 6 hex chars
    let hash_part = name.trim_end_matches(".jsonl").rsplit('_').next().unwrap();
    assert_eq!(hash_part.len(), 6);
    assert!(hash_part.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_distinct_sessions_get_distinct_files() {
    let dir = TempDir::new().unwrap();
    let a = TranscriptWriter::in_dir(dir.path(), "session-a").unwrap();
    let b = TranscriptWriter::in_dir(dir.path(), "session-b").unwrap();
    assert_ne!(a.path(), b.path());
}
