use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "formpath-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write_json(&self, name: &str, value: &Value) -> String {
        let path = self.path.join(name);
        fs::write(&path, serde_json::to_vec_pretty(value).expect("fixture should render"))
            .expect("fixture should write");
        path.to_string_lossy().into_owned()
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_formpath<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_formpath");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("formpath command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be json: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn schema() -> Value {
    json!([
        {
            "type": "section",
            "name": "proposalSummarySection",
            "label": "1. Proposal Summary",
            "children": [
                {"name": "Section0-0", "label": "Title", "type": "text", "isRequired": "true",
                 "help_text_url": "<a href=\"/help/anchor=title\">Help</a>"},
                {"name": "Section0-1", "label": "Purpose", "type": "text_area", "isRequired": "true"}
            ]
        },
        {
            "type": "section",
            "name": "tenureSection",
            "label": "2. Tenure",
            "children": [{
                "name": "Section1-0",
                "label": "Tenure type",
                "type": "checkbox",
                "children": [
                    {"name": "Section1-0-0", "label": "Freehold", "group": "Section1-0", "type": "checkbox"},
                    {"name": "Section1-0-1", "label": "Crown Land", "group": "Section1-0", "type": "checkbox"}
                ]
            }]
        }
    ])
}

fn proposal() -> Value {
    json!({
        "id": 42,
        "lodgement_number": "P000042",
        "application_type": "Disturbance",
        "schema": schema(),
        "data": [{
            "proposalSummarySection": [{"Section0-0": "Hives near Dwellingup", "Section0-1": " "}],
            "tenureSection": [{"Section1-0": [{"Section1-0-0": "", "Section1-0-1": "on"}]}]
        }],
        "layer_data": [{"name": "Section0-0", "layer_name": "cadastre"}],
        "previous_data": [{
            "proposalSummarySection": [{"Section0-0": "Hives near Jarrahdale", "Section0-1": ""}]
        }]
    })
}

#[test]
fn flatten_json_output() {
    let tmp = TempDirGuard::new("flatten");
    let doc = tmp.write_json("doc.json", &json!({"a": [{"b": 1}], "c": [1, 2]}));

    let output = run_formpath(["flatten", doc.as_str(), "--json"]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!({"a.b": 1, "c.0000": 1, "c.0001": 2})
    );
}

#[test]
fn flatten_honours_config_options() {
    let tmp = TempDirGuard::new("flatten-config");
    let doc = tmp.write_json("doc.json", &json!({"c": [1, 2]}));
    let config = tmp.path().join("formpath.toml");
    fs::write(&config, "[flatten]\nseparator = \"/\"\nindex_width = 2\n").expect("config should write");

    let output = run_formpath([
        "--config",
        config.to_str().expect("utf-8 path"),
        "flatten",
        doc.as_str(),
        "--json",
    ]);
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output), json!({"c/00": 1, "c/01": 2}));
}

#[test]
fn flatten_duplicate_key_fails() {
    let tmp = TempDirGuard::new("flatten-dup");
    let doc = tmp.write_json("doc.json", &json!({"a.b": 1, "a": {"b": 2}}));

    let output = run_formpath(["flatten", doc.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("key a.b is already used"));
}

#[test]
fn unreadable_input_is_invalid() {
    let tmp = TempDirGuard::new("missing");
    let missing = tmp.path().join("nope.json");

    let output = run_formpath(["validate", missing.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn documents_past_parser_nesting_limit_are_invalid() {
    let tmp = TempDirGuard::new("deep");
    let path = tmp.path().join("deep.json");
    let depth = 200;
    let text = format!("{}1{}", "{\"n\":".repeat(depth), "}".repeat(depth));
    fs::write(&path, text).expect("fixture should write");

    let output = run_formpath(["flatten", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("recursion limit"));
}

#[test]
fn shallow_nesting_flattens_through_cli() {
    let tmp = TempDirGuard::new("nested");
    let path = tmp.path().join("nested.json");
    let depth = 100;
    let text = format!("{}1{}", "{\"n\":".repeat(depth), "}".repeat(depth));
    fs::write(&path, text).expect("fixture should write");

    let output = run_formpath(["flatten", path.to_str().expect("utf-8 path"), "--json"]);
    assert_success(&output);
    let key = vec!["n"; depth].join(".");
    assert_eq!(parse_json_stdout(&output), json!({ key: 1 }));
}

#[test]
fn help_page_version_overflow_is_invalid() {
    let tmp = TempDirGuard::new("help-overflow");
    let path = tmp.write_json("schema.json", &schema());

    let output = run_formpath(["help-page", path.as_str(), "--latest-version", "4294967295"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("has no successor"));
}

#[test]
fn validate_reports_blank_required_answer() {
    let tmp = TempDirGuard::new("validate");
    let path = tmp.write_json("proposal.json", &proposal());

    let output = run_formpath(["validate", path.as_str(), "--json"]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!([{"path": "proposalSummarySection.Section0-1", "label": "Purpose"}])
    );
}

#[test]
fn diff_against_recorded_previous() {
    let tmp = TempDirGuard::new("diff");
    let path = tmp.write_json("proposal.json", &proposal());

    let output = run_formpath(["diff", path.as_str(), "--json"]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!({
            "proposalSummarySection.Section0-0": {
                "Title": ["Hives near Dwellingup", "Hives near Jarrahdale"]
            }
        })
    );
}

#[test]
fn redact_writes_stripped_proposal() {
    let tmp = TempDirGuard::new("redact");
    let path = tmp.write_json("proposal.json", &proposal());
    let out = tmp.path().join("out/redacted.json");

    let output = run_formpath([
        "redact",
        path.as_str(),
        "--out",
        out.to_str().expect("utf-8 path"),
    ]);
    assert_success(&output);

    let written: Value =
        serde_json::from_slice(&fs::read(&out).expect("redacted file should exist"))
            .expect("redacted file should be json");
    assert_eq!(
        written["data"],
        json!([{
            "proposalSummarySection": [{"Section0-1": " "}],
            "tenureSection": [{"Section1-0": [{"Section1-0-0": "", "Section1-0-1": "on"}]}]
        }])
    );
    assert_eq!(written["lodgement_number"], json!("P000042"));
}

#[test]
fn search_section_checkbox_option() {
    let tmp = TempDirGuard::new("search-section");
    let path = tmp.write_json("proposal.json", &proposal());

    let output = run_formpath([
        "search-section",
        path.as_str(),
        "--section",
        "2. Tenure",
        "--question",
        "Tenure type",
        "--answer-type",
        "checkbox",
        "--answer",
        "Crown Land",
        "--json",
    ]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!([{"key": "Crown Land", "value": "on"}])
    );
}

#[test]
fn questions_lists_labels() {
    let tmp = TempDirGuard::new("questions");
    let path = tmp.write_json("schema.json", &schema());

    let output = run_formpath(["questions", path.as_str(), "--json"]);
    assert_success(&output);
    assert_eq!(
        parse_json_stdout(&output),
        json!([
            "1. Proposal Summary",
            "Title",
            "Purpose",
            "2. Tenure",
            "Tenure type",
            "Freehold",
            "Crown Land"
        ])
    );
}

#[test]
fn help_page_next_version() {
    let tmp = TempDirGuard::new("help-page");
    let path = tmp.write_json("schema.json", &schema());

    let output = run_formpath(["help-page", path.as_str(), "--latest-version", "2", "--json"]);
    assert_success(&output);
    let page = parse_json_stdout(&output);
    assert_eq!(page["version"], json!(3));
    assert_eq!(page["audience"], json!("external"));
    assert_eq!(page["application_type"], json!("Disturbance"));
    assert_eq!(
        page["content"],
        json!("<h1><a id=\"title\" name=\"title\"> Title </a></h1><p>&nbsp;</p>")
    );
}

#[test]
fn help_page_rejects_unknown_audience() {
    let tmp = TempDirGuard::new("help-audience");
    let path = tmp.write_json("schema.json", &schema());

    let output = run_formpath(["help-page", path.as_str(), "--audience", "public"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn tenure_uses_configured_section() {
    let tmp = TempDirGuard::new("tenure");
    let path = tmp.write_json("proposal.json", &proposal());
    let config = tmp.path().join("formpath.toml");
    fs::write(&config, "[proposal]\ntenure_section = \"Section1-0\"\n").expect("config should write");

    let output = run_formpath([
        "--config",
        config.to_str().expect("utf-8 path"),
        "tenure",
        path.as_str(),
        "--json",
    ]);
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["tenure"], json!("Crown Land"));

    let unconfigured = run_formpath(["tenure", path.as_str()]);
    assert_eq!(unconfigured.status.code(), Some(2));
}
