use crate::support::{EXIT_OPERATION_FAILED, emit_error, load_proposal_or_exit, print_json_or_exit};
use formpath_records::proposal_missing_fields;

pub fn run(proposal_path: String, json_output: bool) {
    let proposal = load_proposal_or_exit(&proposal_path);
    let missing = proposal_missing_fields(&proposal)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{proposal_path}: {e}")));

    if json_output {
        print_json_or_exit(&missing);
        return;
    }

    println!("formpath validate");
    println!("  Proposal: {}", proposal.lodgement_number);
    if missing.is_empty() {
        println!("  Missing: (none)");
        return;
    }
    println!("  Missing: {}", missing.len());
    for field in &missing {
        println!("    - {} ({})", field.label, field.path);
    }
}
