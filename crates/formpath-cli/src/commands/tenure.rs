use crate::support::{
    EXIT_INVALID_INPUT, EXIT_OPERATION_FAILED, emit_error, load_proposal_or_exit,
    print_json_or_exit,
};
use formpath_kernel::EngineConfig;
use formpath_records::tenure_labels;
use serde_json::json;

pub fn run(proposal_path: String, section: Option<String>, config: &EngineConfig, json_output: bool) {
    let Some(section) = section.or_else(|| config.proposal.tenure_section.clone()) else {
        emit_error(
            EXIT_INVALID_INPUT,
            "no tenure section: pass --section or set proposal.tenure_section",
        );
    };
    let proposal = load_proposal_or_exit(&proposal_path);
    let labels = tenure_labels(&proposal, &section)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{proposal_path}: {e}")));

    if json_output {
        print_json_or_exit(&json!({
            "lodgementNumber": proposal.lodgement_number,
            "section": section,
            "tenure": labels,
        }));
        return;
    }

    println!("formpath tenure");
    println!("  Proposal: {}", proposal.lodgement_number);
    println!(
        "  Tenure: {}",
        if labels.is_empty() { "(none)" } else { labels.as_str() }
    );
}
