use dloformal::axiom::FrameError;
use dloformal::variable::VarName;
use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, Error, EnumIs)]
pub enum DloError {
    #[error("Failed to parse program: {0}")]
    Parse(#[from] dloprog::utils::Error),

    #[error(
        "Variable `{name}` is used by {context} but is not part of the variable universe of the program"
    )]
    UnknownVariable { name: VarName, context: String },

    #[error("Variable `{name}` clashes with a loop index symbol and cannot be formalized")]
    ReservedVariable { name: VarName },

    #[error("Record #{record} is not frame-consistent: {source}")]
    FrameViolation { record: usize, source: FrameError },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize configuration for '{file}': {source}")]
    ConfigSerializeError {
        source: toml::ser::Error,
        file: String,
    },
}

pub type DloResult<T> = Result<T, DloError>;
