pub mod config;
pub mod connectivity;
pub mod entry;
pub mod identity;
pub mod scan;
pub mod security;

pub use config::*;
pub use connectivity::*;
pub use entry::*;
pub use identity::*;
pub use scan::*;
pub use security::*;
