
/// Decides individual variant and gene clauses
pub mod clause_evaluator;
/// Errors and advisories produced while evaluating rules
pub mod errors;
/// Splits rule rows into clauses and combines their verdicts
pub mod rule_evaluator;
