use formpath_kernel::EngineConfig;
use formpath_records::Proposal;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Invalid input: unreadable or unparsable files, bad arguments.
pub const EXIT_INVALID_INPUT: i32 = 2;
/// The operation itself failed on well-formed input.
pub const EXIT_OPERATION_FAILED: i32 = 1;

pub fn emit_error(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(code);
}

pub fn load_config_or_exit(path: Option<&str>) -> EngineConfig {
    match path {
        None => EngineConfig::default(),
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| emit_error(EXIT_INVALID_INPUT, e)),
    }
}

/// Read and parse a JSON file.
///
/// Parsing keeps serde_json's nesting limit of 128 levels; deeper
/// documents are invalid input here even though the engines themselves
/// walk any depth.
pub fn load_json_or_exit(path: &str) -> Value {
    let bytes = fs::read(path).unwrap_or_else(|e| {
        emit_error(EXIT_INVALID_INPUT, format!("failed to read {path}: {e}"));
    });
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        emit_error(EXIT_INVALID_INPUT, format!("failed to parse json {path}: {e}"));
    })
}

pub fn load_proposal_or_exit(path: &str) -> Proposal {
    let value = load_json_or_exit(path);
    serde_json::from_value(value).unwrap_or_else(|e| {
        emit_error(EXIT_INVALID_INPUT, format!("invalid proposal {path}: {e}"));
    })
}

pub fn render_json_or_exit(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        emit_error(EXIT_OPERATION_FAILED, format!("failed to render json: {e}"));
    })
}

pub fn print_json_or_exit(value: &impl Serialize) {
    println!("{}", render_json_or_exit(value));
}

pub fn write_json_or_exit(path: &str, value: &impl Serialize) {
    let rendered = render_json_or_exit(value);
    let path = Path::new(path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).unwrap_or_else(|e| {
            emit_error(EXIT_OPERATION_FAILED, format!("{}: {e}", parent.display()));
        });
    }
    fs::write(path, format!("{rendered}\n")).unwrap_or_else(|e| {
        emit_error(EXIT_OPERATION_FAILED, format!("{}: {e}", path.display()));
    });
}

pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
