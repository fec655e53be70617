pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::esim::EsimApi;
pub use app::oracle::EthereumOracle;
pub use config::{CliConfig, RelayConfig};
pub use core::purchase::{PurchasePolicy, PurchaseService};
pub use utils::error::{RelayError, Result};
