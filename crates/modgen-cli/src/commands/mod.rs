//! Command implementations. Each exposes an `execute` taking its parsed
//! arguments.

pub mod generate;
pub mod init;

pub use generate::execute as generate_execute;
pub use init::execute as init_execute;
