use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    TokenMissing(&'static str),

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures talking to the homework API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to homework API failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("homework API answered with status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("homework API answer is not valid JSON: {0}")]
    JsonDecode(#[source] serde_json::Error),

    #[error("homework API answer is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error, PartialEq)]
pub enum ResponseShapeError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no '{0}' key")]
    MissingKey(&'static str),

    #[error("'homeworks' must be a list")]
    HomeworksNotList,

    #[error("'current_date' must be an integer timestamp")]
    CurrentDateNotInteger,
}

#[derive(Debug, Error, PartialEq)]
pub enum HomeworkError {
    #[error("homework record has no 'homework_name'")]
    MissingName,

    #[error("homework record has no 'status'")]
    MissingStatus,

    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),

    #[error("homework record is malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
#[error("failed to send message to chat: {0}")]
pub struct SendMessageError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

/// Everything that can interrupt a single poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ResponseShapeError),

    #[error(transparent)]
    Homework(#[from] HomeworkError),

    #[error(transparent)]
    Send(#[from] SendMessageError),
}
