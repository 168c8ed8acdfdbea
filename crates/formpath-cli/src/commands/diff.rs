use crate::support::{
    EXIT_OPERATION_FAILED, display_scalar, emit_error, load_proposal_or_exit, print_json_or_exit,
};
use formpath_records::{compare_proposal, compare_with_previous};

pub fn run(proposal_path: String, previous_path: Option<String>, json_output: bool) {
    let proposal = load_proposal_or_exit(&proposal_path);
    let result = match previous_path.as_deref() {
        Some(previous_path) => {
            let previous = load_proposal_or_exit(previous_path);
            compare_proposal(&proposal, &previous)
        }
        None => compare_with_previous(&proposal),
    }
    .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{proposal_path}: {e}")));

    if json_output {
        print_json_or_exit(&result);
        return;
    }

    println!("formpath diff");
    println!("  Proposal: {}", proposal.lodgement_number);
    if result.is_empty() {
        println!("  Changes: (none)");
        return;
    }
    println!("  Changes: {}", result.len());
    for change in &result.changes {
        println!(
            "    - {}: {} -> {} ({})",
            change.label,
            display_scalar(&change.previous),
            display_scalar(&change.current),
            change.key
        );
    }
}
