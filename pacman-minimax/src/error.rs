use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Returned when an agent or search engine can't be built from the configuration it was given
///
/// This always happens before any search runs.
pub enum ConfigurationError {
    /// The evaluation function name didn't match any known evaluation function
    #[error("unknown evaluation function {0:?}")]
    UnknownEvaluationFunction(String),
    /// The agent name didn't match any known agent
    #[error("unknown agent {0:?}")]
    UnknownAgent(String),
    /// The chance model name wasn't `uniform` or `resampled`
    #[error("unknown chance model {0:?}")]
    UnknownChanceModel(String),
    /// An agent argument key we don't understand
    #[error("unknown agent argument {0:?}")]
    UnknownArgument(String),
    /// An agent argument wasn't of the form `key=value`
    #[error("malformed agent argument {0:?}, expected key=value")]
    MalformedArgument(String),
    /// An agent argument value couldn't be parsed
    #[error("invalid value {value:?} for agent argument {key:?}")]
    InvalidValue {
        #[allow(missing_docs)]
        key: String,
        #[allow(missing_docs)]
        value: String,
    },
}
