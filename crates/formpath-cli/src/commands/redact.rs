use crate::support::{
    EXIT_OPERATION_FAILED, emit_error, load_proposal_or_exit, print_json_or_exit,
    write_json_or_exit,
};
use formpath_records::remove_prefilled_data;

pub fn run(proposal_path: String, out: Option<String>) {
    let proposal = load_proposal_or_exit(&proposal_path);
    let redacted = remove_prefilled_data(proposal)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{proposal_path}: {e}")));

    match out {
        Some(out) => {
            write_json_or_exit(&out, &redacted);
            tracing::info!(proposal = %redacted.lodgement_number, out = %out, "wrote redacted proposal");
        }
        None => print_json_or_exit(&redacted),
    }
}
