use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

use jobstats::test_utils::fixtures::{BatchDir, ListingBuilder, fixed_now};

/// Command isolated from the user's config and environment.
fn jobstats(home: &BatchDir) -> Command {
    let mut cmd = Command::cargo_bin("jobstats").unwrap();
    cmd.env("XDG_CONFIG_HOME", &home.path)
        .env_remove("JOBSTATS_CONFIG")
        .env_remove("JOBSTATS_OUTPUT_FORMAT")
        .env_remove("JOBSTATS_TOP_N")
        .env_remove("JOBSTATS_MIN_TOKEN_CHARS")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write(dir: &BatchDir, name: &str, value: &Value) -> std::path::PathBuf {
    dir.write_raw(name, &value.to_string())
}

fn banca_page() -> Value {
    json!({
        "count": 321,
        "results": [
            {"id": "1", "title": "Addetto banco", "description": "Banco salumi"},
            {"id": "2", "title": "Analista banca e banco", "company": {"display_name": "Credito Srl"}},
            {"id": "3", "title": "Consulente banca", "salary_min": 30000, "salary_max": 40000}
        ]
    })
}

#[test]
fn test_cli_help() {
    let home = BatchDir::new();
    jobstats(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_cli_version() {
    let home = BatchDir::new();
    jobstats(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_filter_json_applies_exclusions() {
    let home = BatchDir::new();
    let page = write(&home, "page.json", &banca_page());

    let json = stdout_json(jobstats(&home).args(["-O", "json", "filter", "--keyword", "banca"]).arg(&page));
    assert_eq!(json["success"], true);
    assert_eq!(json["keyword"], "banca");
    assert_eq!(json["originalCount"], 3);
    assert_eq!(json["filteredCount"], 2);
    assert_eq!(json["fallback"], false);
    assert_eq!(json["results"][0]["id"], "2");
    assert_eq!(json["results"][1]["id"], "3");
}

#[test]
fn test_filter_reads_stdin() {
    let home = BatchDir::new();
    let listings = json!([
        {"id": "a", "title": "Cuoco"},
        {"id": "b", "title": "Cameriere"}
    ]);

    let json = stdout_json(
        jobstats(&home)
            .args(["--machine", "filter", "-k", "astronauta"])
            .write_stdin(listings.to_string()),
    );
    assert_eq!(json["fallback"], true);
    assert_eq!(json["filteredCount"], 2);
}

#[test]
fn test_filter_plain_output() {
    let home = BatchDir::new();
    let page = write(&home, "page.json", &banca_page());
    jobstats(&home)
        .args(["-O", "plain", "filter", "--keyword", "banca"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("3\tConsulente banca"))
        .stdout(predicate::str::contains("Addetto banco").not());
}

#[test]
fn test_stats_merges_batches() {
    let home = BatchDir::new();
    let by_date = write(
        &home,
        "by_date.json",
        &json!({
            "count": 1200,
            "results": [
                {"id": "1", "title": "Junior Data Analyst", "created": "2024-05-30T09:00:00Z",
                 "salary_min": 24000, "location": {"display_name": "Milano"}},
                {"id": "2", "title": "Data Engineer", "created": "2024-05-10T09:00:00Z",
                 "location": {"display_name": "Roma"}, "contract_type": "permanent"}
            ]
        }),
    );
    let by_salary = write(
        &home,
        "by_salary.json",
        &json!({
            "count": 1200,
            "results": [
                {"id": "3", "title": "Senior Data Scientist", "created": "2024-01-15T09:00:00Z",
                 "salary_min": 60000, "salary_max": 80000, "location": {"display_name": "Milano"}},
                {"id": "1", "title": "Junior Data Analyst", "created": "2024-05-30T09:00:00Z",
                 "salary_min": 26000, "location": {"display_name": "Milano"}}
            ]
        }),
    );

    let json = stdout_json(
        jobstats(&home)
            .args(["-O", "json", "stats", "--keyword", "data", "--now", "2024-06-01T12:00:00Z"])
            .arg(&by_date)
            .arg(&by_salary),
    );
    assert_eq!(json["success"], true);
    assert_eq!(json["totalJobs"], 1200);
    assert_eq!(json["analyzedJobs"], 3);

    let stats = &json["statistics"];
    assert_eq!(stats["totalAnalyzed"], 3);
    assert_eq!(stats["timeline"], json!({"last7days": 1, "last30days": 2, "last90days": 2}));
    assert_eq!(stats["salary"]["min"], 26000.0);
    assert_eq!(stats["salary"]["max"], 70000.0);
    assert_eq!(stats["locations"][0]["name"], "Milano");
    assert_eq!(stats["locations"][0]["count"], 2);
    assert_eq!(stats["contractTypes"]["permanent"], 1);
    assert_eq!(stats["contractTypes"]["Non specificato"], 2);
    assert_eq!(stats["seniority"]["junior"], 1);
    assert_eq!(stats["seniority"]["senior"], 1);
    // one listing this week against one in the prior three weeks
    assert_eq!(stats["trend"], "growing");
}

#[test]
fn test_stats_page_and_bare_array() {
    let home = BatchDir::new();
    let now = fixed_now();
    let recent = ListingBuilder::new("r1")
        .title("Senior Backend Engineer")
        .location("Torino")
        .salary(Some(50_000.0), Some(70_000.0))
        .created_at(now - chrono::Duration::days(2))
        .build();
    let older = ListingBuilder::new("o1")
        .title("Backend Engineer")
        .location("Torino")
        .created_at(now - chrono::Duration::days(12))
        .build();
    let page = home.write_page("page.json", 77, &[recent.clone(), older]);
    let bare = home.write_listings("bare.json", &[recent]);

    let json = stdout_json(
        jobstats(&home)
            .args(["-O", "json", "stats", "--now", "2024-06-01T12:00:00Z"])
            .arg(&page)
            .arg(&bare),
    );
    assert_eq!(json["totalJobs"], 77);
    assert_eq!(json["analyzedJobs"], 2);
    assert_eq!(json["statistics"]["salary"]["avg"], 60000);
    assert_eq!(json["statistics"]["timeline"]["last7days"], 1);
    // one this week against one in days 8 to 30
    assert_eq!(json["statistics"]["trend"], "growing");
}

#[test]
fn test_stats_empty_batch() {
    let home = BatchDir::new();
    let json = stdout_json(
        jobstats(&home)
            .args(["-m", "stats", "--now", "2024-06-01T12:00:00Z"])
            .write_stdin(r#"{"count": 0, "results": []}"#),
    );
    assert_eq!(json["analyzedJobs"], 0);
    assert!(json["statistics"]["salary"]["avg"].is_null());
    assert_eq!(json["statistics"]["salary"]["distribution"], json!([]));
    assert_eq!(json["statistics"]["trend"], "stable");
}

#[test]
fn test_stats_human_output() {
    let home = BatchDir::new();
    let page = write(&home, "page.json", &banca_page());
    jobstats(&home)
        .env("NO_COLOR", "1")
        .args(["stats", "-k", "banca", "--now", "2024-06-01T12:00:00Z"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("Market statistics for 'banca'"))
        .stdout(predicate::str::contains("Timeline"));
}

#[test]
fn test_dedup_last_occurrence_wins() {
    let home = BatchDir::new();
    let first = write(&home, "a.json", &json!([{"id": "x", "title": "old"}, {"adref": "r", "title": "ref"}]));
    let second = write(&home, "b.json", &json!([{"id": "x", "title": "new"}]));

    let json = stdout_json(jobstats(&home).args(["-O", "json", "dedup"]).arg(&first).arg(&second));
    assert_eq!(json, json!([{"id": "x", "title": "new"}, {"adref": "r", "title": "ref"}]));
}

#[test]
fn test_malformed_batch_machine_error() {
    let home = BatchDir::new();
    let broken = home.write_raw("broken.json", "{not json");

    let output = jobstats(&home)
        .args(["--machine", "filter", "-k", "java"])
        .arg(&broken)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "INPUT_MALFORMED");
    assert_eq!(json["error"]["numeric_code"], 102);
}

#[test]
fn test_missing_file_human_error() {
    let home = BatchDir::new();
    jobstats(&home)
        .args(["dedup", "/nonexistent/batch.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E101"));
}

#[test]
fn test_plain_errors_are_uncolored() {
    let home = BatchDir::new();
    jobstats(&home)
        .env("CLICOLOR_FORCE", "1")
        .args(["-O", "plain", "dedup", "/nonexistent/batch.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: [E101]"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_invalid_now_is_rejected() {
    let home = BatchDir::new();
    let page = write(&home, "page.json", &banca_page());
    let output = jobstats(&home)
        .args(["-m", "stats", "--now", "tomorrow"])
        .arg(&page)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"]["code"], "TIMESTAMP_INVALID");
}

#[test]
fn test_config_file_replaces_exclusions() {
    let home = BatchDir::new();
    let config = home.write_raw("jobstats.toml", "[filter]\nreplace_exclusions = true\n");
    let page = write(
        &home,
        "page.json",
        &json!([
            {"id": "1", "title": "Banconista", "description": "Bar vicino alla banca"},
            {"id": "2", "title": "Consulente banca"}
        ]),
    );

    let builtin = stdout_json(jobstats(&home).args(["-O", "json", "filter", "-k", "banca"]).arg(&page));
    assert_eq!(builtin["filteredCount"], 1);

    let replaced = stdout_json(
        jobstats(&home)
            .args(["-O", "json", "--config"])
            .arg(&config)
            .args(["filter", "-k", "banca"])
            .arg(&page),
    );
    assert_eq!(replaced["filteredCount"], 2);
}

#[test]
fn test_global_config_and_env_override() {
    let home = BatchDir::new();
    std::fs::create_dir_all(home.path.join("jobstats")).unwrap();
    home.write_raw("jobstats/config.toml", "[output]\nformat = \"json\"\n");

    let json = stdout_json(jobstats(&home).env("JOBSTATS_TOP_N", "4").arg("config"));
    assert_eq!(json["output"]["format"], "json");
    assert_eq!(json["stats"]["top_n"], 4);
    assert_eq!(json["filter"]["min_token_chars"], 3);
}

#[test]
fn test_invalid_config_is_reported() {
    let home = BatchDir::new();
    let config = home.write_raw("bad.toml", "[stats\ntop_n = ");
    jobstats(&home)
        .args(["--config"])
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("E302"));
}

#[test]
fn test_config_exclusions_listing() {
    let home = BatchDir::new();
    jobstats(&home)
        .args(["-O", "plain", "config", "--exclusions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("developer\tdevelopment, developing"));
}
