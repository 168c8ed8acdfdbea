use crate::support::{
    EXIT_INVALID_INPUT, EXIT_OPERATION_FAILED, emit_error, load_json_or_exit, print_json_or_exit,
};
use formpath_kernel::EngineConfig;
use formpath_records::{HelpAudience, HelpPage, RecordError};

pub struct Args {
    pub schema: String,
    pub audience: String,
    pub latest_version: Option<u32>,
    pub application_type: Option<String>,
    pub json: bool,
}

pub fn run(args: Args, config: &EngineConfig) {
    let audience: HelpAudience = args
        .audience
        .parse()
        .unwrap_or_else(|e: String| emit_error(EXIT_INVALID_INPUT, e));
    let schema = load_json_or_exit(&args.schema);
    let application_type = args
        .application_type
        .unwrap_or_else(|| config.proposal.application_type.clone());

    let page = match HelpPage::next(application_type, audience, args.latest_version, &schema) {
        Ok(page) => page,
        Err(e @ RecordError::VersionOverflow { .. }) => emit_error(EXIT_INVALID_INPUT, e),
        Err(e) => emit_error(EXIT_OPERATION_FAILED, format!("{}: {e}", args.schema)),
    };

    if args.json {
        print_json_or_exit(&page);
        return;
    }
    println!("{}", page.content);
}
