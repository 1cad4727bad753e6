
/// the main CLI module
pub mod core;
/// the match CLI subcommand for filtering a rule table against one person
pub mod matching;
