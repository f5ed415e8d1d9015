use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{HomeworkError, ResponseShapeError};

/// Review state reported by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Verdict text shown to the student.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Reviewed: the reviewer liked everything. Hooray!",
            HomeworkStatus::Reviewing => "Working on it.",
            HomeworkStatus::Rejected => "Reviewed: the reviewer has some remarks.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(HomeworkError::UnknownStatus(other.to_string())),
        }
    }
}

/// One entry of the `homeworks` list. Name and status are checked by
/// [`parse_status`], not on decoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HomeworkRecord {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl HomeworkRecord {
    pub fn from_value(value: &Value) -> Result<Self, HomeworkError> {
        Self::deserialize(value).map_err(|e| HomeworkError::Malformed(e.to_string()))
    }
}

/// A validated answer from the homework API. Entries stay raw JSON until
/// [`parse_status`] decodes the one being reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResponse {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Validate the shape of an API answer and convert it into a [`PollResponse`].
pub fn check_response(response: &Value) -> Result<PollResponse, ResponseShapeError> {
    let object = response.as_object().ok_or(ResponseShapeError::NotAnObject)?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ResponseShapeError::MissingKey("homeworks"))?;
    let current_date = object
        .get("current_date")
        .ok_or(ResponseShapeError::MissingKey("current_date"))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ResponseShapeError::HomeworksNotList)?;
    let current_date = current_date
        .as_i64()
        .ok_or(ResponseShapeError::CurrentDateNotInteger)?;

    Ok(PollResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

/// Build the chat message for a homework whose status changed.
pub fn parse_status(homework: &Value) -> Result<String, HomeworkError> {
    let homework = HomeworkRecord::from_value(homework)?;
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(HomeworkError::MissingName)?;
    let status: HomeworkStatus = homework
        .status
        .as_deref()
        .ok_or(HomeworkError::MissingStatus)?
        .parse()?;

    Ok(format!(
        "Changed review status of \"{}\". {}",
        name,
        status.verdict()
    ))
}
