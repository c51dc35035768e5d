#![forbid(unsafe_code)]

//! Leafkit public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! data model from `leafkit-core`, the host adapters from `leafkit-web`, and
//! offers a lightweight prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use leafkit_core::event::{
    ChangeEvent, EventFlags, EventInfo, EventPhase, EventTarget, InputElement, InputType,
    InvalidTargetError, InvalidTargetReason,
};
pub use leafkit_core::geometry::{Leaf, Vector};
pub use leafkit_core::logging::{LogConfig, LogFormat, LogInitError};

#[cfg(feature = "tracing-json")]
pub use leafkit_core::logging::init_subscriber;

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use leafkit_web::{
    ChangeEventJson, ChangeInputError, HostTarget, InputSnapshot, decode_change_event,
    decode_leaf, decode_leaves, encode_change_event, encode_leaf,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Leafkit apps.
#[derive(Debug)]
pub enum Error {
    /// A change event's target was not an input element.
    InvalidTarget(InvalidTargetError),
    /// Host payload could not be decoded.
    #[cfg(feature = "web")]
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTarget(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<InvalidTargetError> for Error {
    fn from(err: InvalidTargetError) -> Self {
        Self::InvalidTarget(err)
    }
}

#[cfg(feature = "web")]
impl From<ChangeInputError> for Error {
    fn from(err: ChangeInputError) -> Self {
        match err {
            ChangeInputError::InvalidTarget(err) => Self::InvalidTarget(err),
            ChangeInputError::Json(err) => Self::Decode(err),
        }
    }
}

/// Standard result type for Leafkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChangeEvent, Error, EventInfo, InputElement, InputType, InvalidTargetError, Leaf, Result,
        Vector,
    };

    #[cfg(feature = "web")]
    pub use crate::{InputSnapshot, decode_change_event};

    pub use crate::core;
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use leafkit_core as core;
#[cfg(feature = "web")]
pub use leafkit_web as web;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_converts() {
        let err = InvalidTargetError {
            event_type: "change".into(),
            reason: InvalidTargetReason::MissingTarget,
        };
        let top: Error = err.clone().into();
        assert_eq!(top.to_string(), err.to_string());
        assert!(std::error::Error::source(&top).is_some());
    }

    #[cfg(feature = "web")]
    #[test]
    fn host_errors_flatten() {
        fn read(payload: &str) -> Result<String> {
            let ev = decode_change_event(payload)?;
            Ok(ev.value().into_owned())
        }

        assert_eq!(
            read(r#"{"type":"change","currentTarget":{"nodeName":"INPUT","value":"on"}}"#).unwrap(),
            "on"
        );
        assert!(matches!(
            read(r#"{"type":"change","currentTarget":{"nodeName":"DIV"}}"#),
            Err(Error::InvalidTarget(_))
        ));
        let err = read("{").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        let source = std::error::Error::source(&err).expect("decode error keeps its source");
        assert!(source.is::<serde_json::Error>());
        assert!(err.to_string().starts_with("decode error: "));
    }

    #[test]
    fn prelude_covers_geometry() {
        use crate::prelude::*;
        let mut leaf = Leaf::at(Vector::new(1.0, 2.0));
        leaf.transform = Vector::new(4.0, 2.0);
        assert_eq!(leaf.original, Vector::new(1.0, 2.0));
    }
}
