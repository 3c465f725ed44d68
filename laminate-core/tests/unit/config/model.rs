use super::*;
use crate::foundation::core::OutputFormat;

fn named_slot(name: &str) -> SlotConfig {
    SlotConfig {
        directory: PathBuf::from("/tmp"),
        name_filter: name.to_string(),
        opacity: Opacity::OPAQUE,
    }
}

fn job_with_slots(names: &[&str]) -> CompileJob {
    CompileJob {
        slots: names.iter().map(|n| named_slot(n)).collect(),
        output_directory: None,
        format: OutputFormat::Png,
    }
}

fn slot_order(job: &CompileJob) -> Vec<String> {
    job.slots.iter().map(|s| s.name_filter.clone()).collect()
}

#[test]
fn job_json_defaults() {
    let json = r#"{ "slots": [ { "directory": "/data/fg" } ] }"#;
    let job = CompileJob::from_reader(json.as_bytes()).unwrap();
    assert_eq!(job.slots.len(), 1);
    assert_eq!(job.slots[0].directory, PathBuf::from("/data/fg"));
    assert_eq!(job.slots[0].name_filter, "");
    assert_eq!(job.slots[0].opacity, Opacity::OPAQUE);
    assert!(job.output_directory.is_none());
    assert_eq!(job.format, OutputFormat::Png);
}

#[test]
fn job_json_full_fields() {
    let json = r#"
    {
      "slots": [
        { "directory": "/data/fg", "name_filter": "fg", "opacity": 25 },
        { "directory": "/data/bg" }
      ],
      "output_directory": "/data/out",
      "format": "bmp"
    }
    "#;
    let job = CompileJob::from_reader(json.as_bytes()).unwrap();
    assert_eq!(job.slots.len(), 2);
    assert_eq!(job.slots[0].opacity.percent(), 25);
    assert_eq!(job.output_directory, Some(PathBuf::from("/data/out")));
    assert_eq!(job.format, OutputFormat::Bmp);
}

#[test]
fn job_json_rejects_malformed_input() {
    assert!(CompileJob::from_reader(&b"{ not json"[..]).is_err());
    assert!(CompileJob::from_reader(&b"{}"[..]).is_err());
}

#[test]
fn validate_rejects_empty_slots() {
    let job = job_with_slots(&[]);
    assert!(job.validate().is_err());
}

#[test]
fn validate_rejects_out_of_range_opacity() {
    // Serde admits any u8; validate() is the range gate.
    let json = r#"{ "slots": [ { "directory": "/d", "opacity": 180 } ] }"#;
    let job = CompileJob::from_reader(json.as_bytes()).unwrap();
    assert!(job.validate().is_err());
}

#[test]
fn move_slot_reorders() {
    let mut job = job_with_slots(&["a", "b", "c"]);
    assert!(job.move_slot(2, -1));
    assert_eq!(slot_order(&job), ["a", "c", "b"]);

    let mut job = job_with_slots(&["a", "b", "c"]);
    assert!(job.move_slot(0, 2));
    assert_eq!(slot_order(&job), ["b", "c", "a"]);
}

#[test]
fn move_slot_out_of_bounds_is_noop() {
    let mut job = job_with_slots(&["a", "b", "c"]);
    assert!(!job.move_slot(0, -1));
    assert!(!job.move_slot(2, 1));
    assert!(!job.move_slot(5, 0));
    assert_eq!(slot_order(&job), ["a", "b", "c"]);
}
