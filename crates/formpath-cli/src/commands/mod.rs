pub mod diff;
pub mod flatten;
pub mod help_page;
pub mod questions;
pub mod redact;
pub mod search_section;
pub mod tenure;
pub mod validate;
