use crate::support::{
    EXIT_OPERATION_FAILED, display_scalar, emit_error, load_proposal_or_exit, print_json_or_exit,
};
use formpath_records::{AnswerType, SectionQuery, search_section};
use serde_json::Value;

pub struct Args {
    pub proposal: String,
    pub section: String,
    pub question: String,
    pub answer_type: String,
    pub answer: String,
    pub json: bool,
}

pub fn run(args: Args) {
    let proposal = load_proposal_or_exit(&args.proposal);
    let query = SectionQuery {
        section_label: args.section,
        question: args.question,
        answer_type: AnswerType::from(args.answer_type.as_str()),
        answer: args.answer,
    };
    let answers = proposal.answers().cloned().unwrap_or(Value::Null);
    let hits = search_section(&proposal.schema, &query, &answers)
        .unwrap_or_else(|e| emit_error(EXIT_OPERATION_FAILED, format!("{}: {e}", args.proposal)));

    if args.json {
        print_json_or_exit(&hits);
        return;
    }

    println!("formpath search-section");
    println!("  Section: {}", query.section_label);
    println!("  Question: {} ({})", query.question, query.answer_type);
    if hits.is_empty() {
        println!("  Hits: (none)");
        return;
    }
    println!("  Hits: {}", hits.len());
    for hit in &hits {
        println!("    - {}: {}", hit.key, display_scalar(&hit.value));
    }
}
