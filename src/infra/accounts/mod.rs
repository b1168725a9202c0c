//! Scheduler accounting backends.

pub mod memory;
pub mod sacctmgr;

pub use memory::InMemoryAccounts;
pub use sacctmgr::SacctmgrCli;
