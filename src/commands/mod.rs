//! CLI commands implementation

pub mod init;
pub mod load;
pub mod status;
pub mod validate;

pub use init::*;
pub use load::*;
pub use status::*;
pub use validate::*;
