pub mod connector;
pub mod domain;
pub mod error;
pub mod ports;

pub use connector::ProviderConnector;
pub use domain::{
    parse_chain_id, parse_signature, validate_address, validate_call_data, CallRequest, RpcMethod,
    SessionInfo, TypedDataPayload, SIGNATURE_LEN,
};
pub use error::{ConnectorError, ErrorKind};
pub use ports::{OrderSigningProvider, RequestDispatcher, SessionSnapshot, WalletSession};
