use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("rpc error: {0}")]
    Rpc(#[from] subxt::Error),

    #[error("invalid ss58 address: {0}")]
    BadAddress(String),

    #[error("invalid hex payload: {0}")]
    BadHex(#[from] hex::FromHexError),

    #[error("cannot find sender: {0}")]
    NoSender(String),

    #[error("vault error: {0}")]
    Vault(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
