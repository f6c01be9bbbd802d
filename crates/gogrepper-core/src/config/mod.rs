//! gogrepper configuration file

mod model;
mod store;

pub use model::{Config, GoConfig, GogrepConfig, InstallConfig};
pub use store::{CONFIG_ENV, ConfigStore, default_config_path};
