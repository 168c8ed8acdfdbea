use crate::support::{EXIT_OPERATION_FAILED, emit_error, load_json_or_exit, print_json_or_exit};
use formpath_kernel::schema_questions;

pub fn run(schema_path: String, json_output: bool) {
    let schema = load_json_or_exit(&schema_path);
    let questions = schema_questions(&schema)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{schema_path}: {e}")));

    if json_output {
        print_json_or_exit(&questions);
        return;
    }

    println!("formpath questions");
    println!("  Schema: {schema_path}");
    println!("  Questions: {}", questions.len());
    for label in &questions {
        println!("    - {label}");
    }
}
