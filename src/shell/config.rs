use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, read from the environment by the composition
/// root. Everything has a default: no data directory means the
/// in-memory store, no logo means unbranded exports.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = match env::var("LABOUR_COSTS_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%raw, "unparseable LABOUR_COSTS_ADDR, using default");
                DEFAULT_ADDR.parse().expect("default address is valid")
            }),
            Err(_) => DEFAULT_ADDR.parse().expect("default address is valid"),
        };
        Self {
            bind_addr,
            data_dir: env::var_os("LABOUR_COSTS_DATA_DIR").map(PathBuf::from),
            logo_path: env::var_os("LABOUR_COSTS_LOGO").map(PathBuf::from),
        }
    }
}
