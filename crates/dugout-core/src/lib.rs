// Shared plumbing for the league statistics engine: the positional grid
// parser, safe numeric coercion, configuration, and logging bootstrap.

pub mod config;
pub mod grid;
pub mod logging;
pub mod numeric;
