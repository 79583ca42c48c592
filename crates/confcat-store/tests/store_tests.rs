use confcat_engine::{ReportSink, SlugPolicy, aggregate_category, collect_sessions, run_batch};
use confcat_store::{CaptureDirSource, CsvReportSink, RawFileSource, SessionSource, SessionStore};
use confcat_types::{Category, RawSession, Session};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn sample_sessions() -> Vec<Session> {
    let raw: Vec<RawSession> = serde_json::from_value(json!([
        {
            "sessionID": "1", "code": "SVS201", "title": "Serverless, at scale",
            "type": "Breakout session", "length": 60, "eventId": "evt-9",
            "published": 1700000000, "modified": "2025-10-01",
            "attributevalues": [
                {"attribute_id": "role", "value": "Developer"},
                {"attribute_id": "role", "value": "DevOps / SRE"},
                {"attribute_id": "services", "value": "AWS Lambda"}
            ],
            "participants": [{"fullName": "Ada Lovelace", "roles": "Speaker"}]
        },
        {
            "sessionID": "2", "code": "ARC302", "title": "Cells",
            "type": null,
            "attributevalues": [{"attribute_id": "role", "value": "Developer"}]
        },
        {"sessionID": "3", "code": "KEY001"}
    ]))
    .unwrap();

    collect_sessions(&raw).0
}

#[test]
fn test_msgpack_store_round_trips_and_is_smaller() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let sessions = sample_sessions();

    store.save(&sessions).unwrap();
    let report = store.encode_msgpack().unwrap();

    let decoded = confcat_store::store::read_sessions(&store.msgpack_path()).unwrap();
    assert_eq!(decoded, sessions);
    assert!(report.msgpack_bytes < report.json_bytes);
    assert!(report.reduction_percent > 0.0);
}

#[test]
fn test_json_store_keeps_absent_markers() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    store.save(&sample_sessions()).unwrap();

    let text = fs::read_to_string(store.json_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[1]["type"], serde_json::Value::Null);
    assert_eq!(value[2]["title"], serde_json::Value::Null);
    assert_eq!(value[0]["sessionId"], json!("1"));
    assert_eq!(value[0]["length"], json!("60"));
    assert_eq!(store.load().unwrap(), sample_sessions());
}

#[test]
fn test_csv_sink_writes_distribution_and_listings() {
    let dir = TempDir::new().unwrap();
    let sessions = sample_sessions();
    let report = aggregate_category(&sessions, Category::Roles, SlugPolicy::Suffix)
        .unwrap()
        .unwrap();

    let mut sink = CsvReportSink::new(dir.path());
    sink.write_report(&report).unwrap();

    let roles = dir.path().join("roles");
    let distribution = fs::read_to_string(roles.join("distribution.csv")).unwrap();
    insta::assert_snapshot!(distribution, @r"
    role,session_count,percentage
    Developer,2,66.67
    DevOps / SRE,1,33.33
    ");

    let developer = fs::read_to_string(roles.join("developer_sessions.csv")).unwrap();
    insta::assert_snapshot!(developer, @r#"
    code,title,type
    SVS201,"Serverless, at scale",Breakout session
    ARC302,Cells,
    "#);

    assert!(roles.join("devops___sre_sessions.csv").exists());
    assert_eq!(sink.written().len(), 3);
}

#[test]
fn test_rerun_replaces_stale_listings() {
    let dir = TempDir::new().unwrap();
    let roles = dir.path().join("roles");
    fs::create_dir_all(&roles).unwrap();
    fs::write(roles.join("retired_role_sessions.csv"), "code,title,type\n").unwrap();
    fs::write(roles.join("notes.txt"), "keep me").unwrap();

    let sessions = sample_sessions();
    let mut sink = CsvReportSink::new(dir.path());
    run_batch(&sessions, &[Category::Roles], SlugPolicy::Suffix, &mut sink).unwrap();

    assert!(!roles.join("retired_role_sessions.csv").exists());
    assert!(roles.join("notes.txt").exists());
    assert!(roles.join("developer_sessions.csv").exists());
}

#[test]
fn test_empty_categories_write_nothing() {
    let dir = TempDir::new().unwrap();
    let mut sink = CsvReportSink::new(dir.path());

    let summary = run_batch(&[], &Category::ALL, SlugPolicy::Suffix, &mut sink).unwrap();

    assert_eq!(summary.empty.len(), 9);
    assert!(sink.written().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_sink_failure_names_category_and_file() {
    let dir = TempDir::new().unwrap();
    // A regular file where the category directory should go
    fs::write(dir.path().join("roles"), "not a directory").unwrap();

    let sessions = sample_sessions();
    let mut sink = CsvReportSink::new(dir.path());
    let err = run_batch(&sessions, &Category::ALL, SlugPolicy::Suffix, &mut sink).unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("roles"), "unexpected error: {}", msg);
}

#[test]
fn test_capture_dir_source_filters_endpoints() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("001.json"),
        json!({
            "url": "https://catalog.awsevents.com/api/search?page=1",
            "body": {
                "responseCode": "0",
                "totalSearchItems": 3,
                "sectionList": [{"items": [{"sessionID": "1"}, {"sessionID": "2"}]}]
            }
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("002.json"),
        json!({
            "url": "https://catalog.awsevents.com/api/attributes",
            "body": {"responseCode": "0", "items": [{"sessionID": "ignored"}]}
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("003.json"),
        json!({"responseCode": "0", "items": [{"sessionID": "3"}]}).to_string(),
    )
    .unwrap();
    fs::write(dir.path().join("004.json"), "{ truncated").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let source = CaptureDirSource::new(dir.path(), r"catalog\.awsevents\.com/api/search").unwrap();
    let raw = source.collect().unwrap();

    let ids: Vec<_> = raw.iter().map(|r| r.session_id.clone().unwrap()).collect();
    assert_eq!(ids, vec![json!("1"), json!("2"), json!("3")]);
}

#[test]
fn test_raw_file_source_reads_item_arrays() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.json");
    fs::write(&path, json!([{"sessionID": "1"}, {"sessionID": "2"}]).to_string()).unwrap();

    assert_eq!(RawFileSource::new(&path).collect().unwrap().len(), 2);

    fs::write(&path, "42").unwrap();
    assert!(RawFileSource::new(&path).collect().is_err());
}

#[test]
fn test_rerun_removes_reports_of_emptied_category() {
    let dir = TempDir::new().unwrap();
    let mut sessions = sample_sessions();

    let mut sink = CsvReportSink::new(dir.path());
    run_batch(&sessions, &[Category::Services, Category::Roles], SlugPolicy::Suffix, &mut sink)
        .unwrap();
    let services = dir.path().join("services");
    assert!(services.join("distribution.csv").exists());
    assert!(services.join("aws_lambda_sessions.csv").exists());

    for session in &mut sessions {
        session.attributes.services.clear();
    }
    let mut sink = CsvReportSink::new(dir.path());
    let summary =
        run_batch(&sessions, &[Category::Services, Category::Roles], SlugPolicy::Suffix, &mut sink)
            .unwrap();

    assert_eq!(summary.empty, vec![Category::Services]);
    assert!(!services.exists());
    assert!(dir.path().join("roles/distribution.csv").exists());
}

#[test]
fn test_emptied_category_keeps_unrelated_files() {
    let dir = TempDir::new().unwrap();
    let services = dir.path().join("services");
    fs::create_dir_all(&services).unwrap();
    fs::write(services.join("distribution.csv"), "service,session_count,percentage\n").unwrap();
    fs::write(services.join("notes.txt"), "keep me").unwrap();

    let mut sink = CsvReportSink::new(dir.path());
    run_batch(&[], &[Category::Services], SlugPolicy::Suffix, &mut sink).unwrap();

    assert!(!services.join("distribution.csv").exists());
    assert!(services.join("notes.txt").exists());
}

#[test]
fn test_overwrite_policy_counts_each_file_once() {
    let dir = TempDir::new().unwrap();
    let raw: Vec<RawSession> = serde_json::from_value(json!([
        {"sessionID": "1", "code": "A1", "attributevalues": [
            {"attribute_id": "topic", "value": "R/D"},
            {"attribute_id": "topic", "value": "R D"}
        ]}
    ]))
    .unwrap();
    let (sessions, _) = collect_sessions(&raw);

    let mut sink = CsvReportSink::new(dir.path());
    run_batch(&sessions, &[Category::Topics], SlugPolicy::Overwrite, &mut sink).unwrap();

    let topics = dir.path().join("topics");
    let on_disk = fs::read_dir(&topics).unwrap().count();
    assert_eq!(on_disk, 2);
    assert_eq!(sink.written().len(), on_disk);
}
