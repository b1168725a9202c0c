//! Infrastructure adapters for the directory service and the scheduler CLI.

pub mod accounts;
pub mod command;
pub mod directory;

pub use accounts::{InMemoryAccounts, SacctmgrCli};
pub use command::{CommandOutput, CommandRunner};
pub use directory::{InMemoryDirectory, LdapsearchDirectory, LdapsearchSettings, NssDirectory};
