use rdkafka::error::KafkaError;
use std::error::Error as StdError;
use std::fmt::Result as FmtResult;
use std::fmt::{Display, Formatter};
use std::result::Result as StdResult;

/// Wrapper for Result from standard library to be used across application.
pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enum for handling errors for whole application.
pub enum Error {
    /// Upstream weather API could not be reached or answered with an error status.
    Fetch { url: String, msg: String, err: String },
    /// Payload (upstream response or broker message) could not be decoded.
    Parse { what: String, msg: String, err: String },
    /// Anything reported by the kafka client: admin, producer or consumer.
    Broker {
        place: String, // where error occurred
        msg: String,
        err: String,
    },
    Io { msg: String, err: String },
}

impl From<KafkaError> for Error {
    fn from(e: KafkaError) -> Self {
        Self::Broker {
            place: String::from("from kafka"),
            msg: e.to_string(),
            err: e.source().map_or(String::new(), |s| s.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            msg: e.to_string(),
            err: e.source().map_or(String::new(), |s| s.to_string()),
        }
    }
}

impl Error {
    pub fn new_fetch<S: ToString>(url: S, msg: S, err: S) -> Self {
        Self::Fetch {
            url: url.to_string(),
            msg: msg.to_string(),
            err: err.to_string(),
        }
    }

    pub fn new_parse<S: ToString>(what: S, msg: S, err: S) -> Self {
        Self::Parse {
            what: what.to_string(),
            msg: msg.to_string(),
            err: err.to_string(),
        }
    }

    pub fn new_broker<S: ToString>(place: S, msg: S, err: S) -> Self {
        Self::Broker {
            place: place.to_string(),
            msg: msg.to_string(),
            err: err.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:?}", *self)
    }
}

impl StdError for Error {}
