use relative_path::RelativePathBuf;
use testlink_engine::{
    CodecError, TestCaseRecord, VerificationLink, VerifyType, link_test_cases, load_links,
    load_records, store_links, store_records,
};

fn reported_cases() -> Vec<TestCaseRecord> {
    vec![
        TestCaseRecord::from_fields([
            ("name", "t1"),
            ("file", "a/b.cc"),
            ("line", "10"),
            ("result", "failed"),
            ("TestType", "unit"),
            ("DerivationTechnique", "spec"),
            ("result_text", "\x1b[31mFAIL\x1b[0m\n&amp;done"),
            ("PartiallyVerifies", "REQ_1"),
        ]),
        TestCaseRecord::from_fields([
            ("name", "t2"),
            ("file", "a/c.cc"),
            ("line", "20"),
            ("result", "passed"),
            ("DerivationTechnique", "spec"),
            ("result_text", ""),
            ("FullyVerifies", "REQ_2"),
        ]),
        TestCaseRecord::from_fields([
            ("name", "t3"),
            ("file", "a/d.cc"),
            ("line", "30"),
            ("result", "passed"),
            ("TestType", "integration"),
            ("DerivationTechnique", "equivalence-classes"),
            ("result_text", ""),
            ("PartiallyVerifies", "REQ_3"),
            ("FullyVerifies", "REQ_4, REQ_5"),
        ]),
    ]
}

/// The records cache and the links file survive a reload and link identically
#[test]
fn records_and_links_survive_reload() {
    let build_dir = tempfile::tempdir().unwrap();
    let records_path = build_dir.path().join("_build").join("test_cases.json");
    let links_path = build_dir.path().join("_build").join("test_links.json");

    let records = reported_cases();
    store_records(&records_path, &records).unwrap();
    let reloaded = load_records(&records_path).unwrap();
    assert_eq!(reloaded, records);

    let report = link_test_cases(&reloaded).unwrap();
    store_links(&links_path, &report.links).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(load_links(&links_path).unwrap(), report.links);
}

#[test]
fn links_follow_record_then_field_order() {
    let report = link_test_cases(&reported_cases()).unwrap();

    assert_eq!(
        report.links,
        vec![
            VerificationLink {
                name: "t1".to_string(),
                file: RelativePathBuf::from("a/b.cc"),
                line: 10,
                need: "REQ_1".to_string(),
                verify_type: VerifyType::Partially,
                result: "failed".to_string(),
                result_text: "FAIL &done".to_string(),
            },
            link("t3", "a/d.cc", 30, "REQ_3", VerifyType::Partially),
            link("t3", "a/d.cc", 30, "REQ_4", VerifyType::Fully),
            link("t3", "a/d.cc", 30, "REQ_5", VerifyType::Fully),
        ]
    );
}

#[test]
fn links_file_is_readable_json() {
    let build_dir = tempfile::tempdir().unwrap();
    let links_path = build_dir.path().join("test_links.json");
    let report = link_test_cases(&reported_cases()).unwrap();

    store_links(&links_path, &report.links).unwrap();

    let text = std::fs::read_to_string(&links_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["need"], "REQ_1");
    assert_eq!(value[0]["verify_type"], "partially");
    assert_eq!(value[0]["result_text"], "FAIL &done");
    assert_eq!(value.as_array().unwrap().len(), 4);
}

#[test]
fn loading_a_links_file_as_records_fails() {
    let build_dir = tempfile::tempdir().unwrap();
    let links_path = build_dir.path().join("test_links.json");
    let report = link_test_cases(&reported_cases()).unwrap();
    store_links(&links_path, &report.links).unwrap();

    let result = load_records(&links_path);

    assert!(matches!(result, Err(CodecError::Load { .. })));
}

fn link(name: &str, file: &str, line: u32, need: &str, verify_type: VerifyType) -> VerificationLink {
    VerificationLink {
        name: name.to_string(),
        file: RelativePathBuf::from(file),
        line,
        need: need.to_string(),
        verify_type,
        result: "passed".to_string(),
        result_text: String::new(),
    }
}
