use crate::support::{
    EXIT_OPERATION_FAILED, display_scalar, emit_error, load_json_or_exit, print_json_or_exit,
};
use formpath_kernel::{EngineConfig, flatten_with};

pub fn run(document: String, config: &EngineConfig, json_output: bool) {
    let value = load_json_or_exit(&document);
    let flat = flatten_with(&value, &config.flatten)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{document}: {e}")));

    if json_output {
        print_json_or_exit(&flat);
        return;
    }

    println!("formpath flatten");
    println!("  Document: {document}");
    println!("  Leaves: {}", flat.len());
    for entry in &flat {
        println!("  {} = {}", entry.key, display_scalar(&entry.value));
    }
}
