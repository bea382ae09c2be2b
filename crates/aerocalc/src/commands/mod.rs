//! Command handlers, one module per subcommand.

pub mod balance;
pub mod completion;
pub mod config_cmd;
pub mod mass;
pub mod run;
