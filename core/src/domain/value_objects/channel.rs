//! Delivery channel for one-time passcodes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::OtpError;

/// Medium a code is delivered over; also decides how identifiers are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "phone" | "sms" => Ok(Channel::Phone),
            other => Err(OtpError::InvalidChannel(other.to_string())),
        }
    }
}
