#![forbid(unsafe_code)]

//! JSON schema for change events pushed by a JS host.
//!
//! The host serializes the DOM event it received, including a description of
//! `currentTarget`, using the DOM's own property names:
//!
//! ```json
//! {"type":"change","bubbles":true,"timeStamp":812.5,
//!  "currentTarget":{"nodeName":"INPUT","type":"range","value":"40"}}
//! ```
//!
//! Decoding narrows the target on the Rust side, so a host that forwards the
//! wrong element gets an [`InvalidTargetError`] instead of a silently empty
//! value.

use std::borrow::Cow;
use std::fmt;

use leafkit_core::event::{
    ChangeEvent, EventFlags, EventInfo, EventPhase, EventTarget, InputElement, InputType,
    InvalidTargetError,
};
use serde::{Deserialize, Serialize};

const INPUT_NODE_NAME: &str = "INPUT";

/// A host-described event target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostTarget {
    pub node_name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub name: String,
}

impl HostTarget {
    /// Whether the host reported an `<input>` element.
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.node_name.eq_ignore_ascii_case(INPUT_NODE_NAME)
    }
}

impl From<&InputSnapshot> for HostTarget {
    fn from(input: &InputSnapshot) -> Self {
        Self {
            node_name: INPUT_NODE_NAME.to_string(),
            input_type: Some(input.input_type.as_str().to_string()),
            value: input.value.to_string(),
            checked: input.checked,
            name: input.name.to_string(),
        }
    }
}

/// Input element state captured by the host at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSnapshot {
    pub input_type: InputType,
    pub value: Box<str>,
    pub checked: bool,
    pub name: Box<str>,
}

impl InputElement for InputSnapshot {
    fn input_type(&self) -> InputType {
        self.input_type.clone()
    }

    fn value(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.value)
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl EventTarget for HostTarget {
    type Input = InputSnapshot;

    fn node_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.node_name)
    }

    fn into_input(self) -> Result<InputSnapshot, Self> {
        if !self.is_input() {
            return Err(self);
        }
        Ok(InputSnapshot {
            input_type: InputType::from_dom_str(self.input_type.as_deref().unwrap_or("")),
            value: self.value.into(),
            checked: self.checked,
            name: self.name.into(),
        })
    }
}

/// Wire form of a host change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEventJson {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub bubbles: bool,
    #[serde(default)]
    pub cancelable: bool,
    #[serde(default)]
    pub composed: bool,
    #[serde(default)]
    pub is_trusted: bool,
    #[serde(default)]
    pub default_prevented: bool,
    #[serde(default)]
    pub event_phase: u16,
    #[serde(default)]
    pub time_stamp: f64,
    #[serde(default)]
    pub current_target: Option<HostTarget>,
}

impl ChangeEventJson {
    /// Split into generic attributes and the (unchecked) target.
    #[must_use]
    pub fn into_parts(self) -> (EventInfo, Option<HostTarget>) {
        let mut flags = EventFlags::empty();
        flags.set(EventFlags::BUBBLES, self.bubbles);
        flags.set(EventFlags::CANCELABLE, self.cancelable);
        flags.set(EventFlags::COMPOSED, self.composed);
        flags.set(EventFlags::TRUSTED, self.is_trusted);
        flags.set(EventFlags::DEFAULT_PREVENTED, self.default_prevented);

        let info = EventInfo::new(self.event_type)
            .with_flags(flags)
            .with_phase(EventPhase::from_u16(self.event_phase))
            .with_time_stamp(self.time_stamp);
        (info, self.current_target)
    }

    /// Narrow the described target to an input element.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTargetError`] when the target is missing or is not
    /// an `<input>`.
    pub fn narrow(self) -> Result<ChangeEvent<InputSnapshot>, InvalidTargetError> {
        let (info, target) = self.into_parts();
        ChangeEvent::narrow(info, target)
    }
}

impl From<&ChangeEvent<InputSnapshot>> for ChangeEventJson {
    fn from(event: &ChangeEvent<InputSnapshot>) -> Self {
        let info = event.info();
        Self {
            event_type: info.event_type.to_string(),
            bubbles: info.bubbles(),
            cancelable: info.cancelable(),
            composed: info.composed(),
            is_trusted: info.is_trusted(),
            default_prevented: info.default_prevented(),
            event_phase: info.phase.to_u16(),
            time_stamp: info.time_stamp,
            current_target: Some(HostTarget::from(event.current_target())),
        }
    }
}

/// Failure to turn host JSON into a [`ChangeEvent`].
#[derive(Debug)]
pub enum ChangeInputError {
    /// The payload did not match [`ChangeEventJson`].
    Json(serde_json::Error),
    /// The payload was well-formed but its target is not an input element.
    InvalidTarget(InvalidTargetError),
}

impl fmt::Display for ChangeInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed change event: {err}"),
            Self::InvalidTarget(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ChangeInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidTarget(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ChangeInputError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<InvalidTargetError> for ChangeInputError {
    fn from(err: InvalidTargetError) -> Self {
        Self::InvalidTarget(err)
    }
}

/// Decode a host change event and narrow its target.
///
/// # Errors
///
/// [`ChangeInputError::Json`] for schema violations,
/// [`ChangeInputError::InvalidTarget`] for a well-formed event whose target
/// is not an input element.
pub fn decode_change_event(s: &str) -> Result<ChangeEvent<InputSnapshot>, ChangeInputError> {
    let json: ChangeEventJson = serde_json::from_str(s)?;
    Ok(json.narrow()?)
}

/// Encode a narrowed change event in the host schema, so it can be handed
/// back to the host and decoded again.
///
/// Fails for a non-finite timestamp, which JSON cannot represent (it would be
/// written as `null` and rejected by [`decode_change_event`]).
pub fn encode_change_event(
    event: &ChangeEvent<InputSnapshot>,
) -> Result<String, serde_json::Error> {
    if !event.info().time_stamp.is_finite() {
        return Err(serde::ser::Error::custom(
            "event timestamp must be finite to encode as JSON",
        ));
    }
    serde_json::to_string(&ChangeEventJson::from(event))
}
