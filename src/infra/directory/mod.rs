//! Directory service backends.

pub mod ldapsearch;
pub mod memory;
pub mod nss;

pub use ldapsearch::{LdapsearchDirectory, LdapsearchSettings};
pub use memory::InMemoryDirectory;
pub use nss::NssDirectory;
