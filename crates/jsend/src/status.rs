use crate::error::JSendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three JSend response kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Success, Status::Fail, Status::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = JSendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "fail" => Ok(Self::Fail),
            "error" => Ok(Self::Error),
            other => Err(JSendError::InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = JSendError;

    fn try_from(value: &str) -> Result<Self, JSendError> {
        value.parse()
    }
}
