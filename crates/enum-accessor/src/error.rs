use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumError {
    #[error("Duplicate key '{key}' in enum definition for '{attribute}'")]
    DuplicateKey { attribute: String, key: String },

    #[error("Duplicate raw value {value} in enum definition for '{attribute}'")]
    DuplicateValue { attribute: String, value: i64 },

    #[error("Enum definition for '{0}' has no keys")]
    EmptyDefinition(String),

    #[error("Invalid enum declaration: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, EnumError>;
