//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - device: Device records, sort state and the device table
//! - scan: Scan bookkeeping and status
//! - update: Firmware update lifecycle state
//! - i18n: Text resolver and translation tables
//! - view: Display description handed to the shell
//! - config: Core configuration
//! - error: Error taxonomy

pub mod config;
pub mod device;
pub mod error;
pub mod i18n;
pub mod scan;
pub mod update;
pub mod view;

pub use config::*;
pub use device::*;
pub use error::*;
pub use i18n::*;
pub use scan::*;
pub use update::*;
pub use view::*;
