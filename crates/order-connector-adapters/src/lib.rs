pub mod config;
pub mod deterministic;
pub mod eip1193;
pub mod factory;
pub mod session;

pub use config::{ConfigError, ConnectorConfig, RuntimeProfile};
pub use deterministic::DeterministicDispatcher;
pub use eip1193::Eip1193ProxyDispatcher;
pub use factory::{
    dispatcher_from_config, Eip1193Client, LegacySendProvider, RequestArguments, SessionProvider,
};
pub use session::WalletSessionManager;
