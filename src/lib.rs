/// Contains all the CLI related functionality
pub mod cli;
/// Contains any specialized data types that are shared across the tooling
pub mod data_types;
/// Contains the rule and clause evaluation engine
pub mod evaluator;
/// Contains the functionality for matching a full rule table
pub mod matcher;
/// Contains the variant and reference lookups the engine consumes
pub mod sources;
/// Contains generic utilities that are handy wrappers
pub mod util;
