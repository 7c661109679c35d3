pub mod bootstrap;
pub mod config;
pub mod error;
pub mod page;
pub mod qr;
pub mod refresh;
pub mod update;

#[cfg(test)]
pub(crate) mod testutil;

pub use bootstrap::{bootstrap, Session};
pub use config::{BootstrapConfig, ConfigOverrides};
pub use error::{Error, Result};
pub use page::{BootstrapPage, ProbeStatus};
pub use qr::{QrCallback, QrPayload};
pub use refresh::{run_qr_refresh, QrStop};
pub use update::{up_to_date, UpdateCheck, VersionSource};
