#![forbid(unsafe_code)]

//! Change events narrowed to input elements.
//!
//! A host (browser, test harness, replay log) dispatches generic events whose
//! `currentTarget` may be anything. Form handlers need a guarantee that the
//! target is an input element so they can read its value. That guarantee is
//! established exactly once, in [`ChangeEvent::narrow`], and carried by the
//! type afterwards.
//!
//! # Design Notes
//!
//! - [`EventTarget::into_input`] is a checked downcast in the shape of
//!   `JsCast::dyn_into`: on failure the original target is handed back.
//! - Generic attributes live in [`EventInfo`] and use a compact bitset.
//! - A [`ChangeEvent`] is read-only once constructed.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Boolean attributes of a dispatched event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        const BUBBLES           = 0b0_0001;
        const CANCELABLE        = 0b0_0010;
        const COMPOSED          = 0b0_0100;
        const TRUSTED           = 0b0_1000;
        const DEFAULT_PREVENTED = 0b1_0000;
    }
}

/// Dispatch phase, using the DOM numeric codes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

impl EventPhase {
    /// Map a DOM `eventPhase` code. Unknown codes map to [`EventPhase::None`].
    #[must_use]
    pub const fn from_u16(code: u16) -> Self {
        match code {
            1 => Self::Capturing,
            2 => Self::AtTarget,
            3 => Self::Bubbling,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Capturing => 1,
            Self::AtTarget => 2,
            Self::Bubbling => 3,
        }
    }
}

/// Attributes shared by every event, regardless of its target.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    /// Event type name, e.g. `"change"` or `"input"`.
    pub event_type: Box<str>,
    pub flags: EventFlags,
    pub phase: EventPhase,
    /// Host timestamp in milliseconds.
    pub time_stamp: f64,
}

impl EventInfo {
    /// Create attributes for an event type with no flags set.
    #[must_use]
    pub fn new(event_type: impl Into<Box<str>>) -> Self {
        Self {
            event_type: event_type.into(),
            flags: EventFlags::empty(),
            phase: EventPhase::None,
            time_stamp: 0.0,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: EventPhase) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn with_time_stamp(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    #[must_use]
    pub const fn bubbles(&self) -> bool {
        self.flags.contains(EventFlags::BUBBLES)
    }

    #[must_use]
    pub const fn cancelable(&self) -> bool {
        self.flags.contains(EventFlags::CANCELABLE)
    }

    #[must_use]
    pub const fn composed(&self) -> bool {
        self.flags.contains(EventFlags::COMPOSED)
    }

    /// Whether the event was generated by the user agent.
    #[must_use]
    pub const fn is_trusted(&self) -> bool {
        self.flags.contains(EventFlags::TRUSTED)
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }
}

/// Normalized `<input type>` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Number,
    Range,
    Checkbox,
    Radio,
    Color,
    Date,
    Email,
    Password,
    Search,
    Tel,
    Url,
    File,
    Hidden,
    /// Any type not listed above, lowercased.
    Other(Box<str>),
}

impl InputType {
    /// Parse a DOM `type` attribute. The empty string is `text`, as in the DOM.
    #[must_use]
    pub fn from_dom_str(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        match lower.as_str() {
            "" | "text" => Self::Text,
            "number" => Self::Number,
            "range" => Self::Range,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "color" => Self::Color,
            "date" => Self::Date,
            "email" => Self::Email,
            "password" => Self::Password,
            "search" => Self::Search,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            _ => Self::Other(lower.into()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Range => "range",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Color => "color",
            Self::Date => "date",
            Self::Email => "email",
            Self::Password => "password",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::File => "file",
            Self::Hidden => "hidden",
            Self::Other(name) => name,
        }
    }

    /// Types whose meaningful state is `checked` rather than `value`.
    #[must_use]
    pub const fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Types that expose a numeric value.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value-reading capability of an input element.
pub trait InputElement {
    fn input_type(&self) -> InputType;

    /// Current value as text.
    fn value(&self) -> Cow<'_, str>;

    fn checked(&self) -> bool;

    /// The element's `name` attribute (empty when unset).
    fn name(&self) -> Cow<'_, str>;

    /// Numeric value for `number`/`range` inputs.
    ///
    /// Returns `None` for other types and for values that do not parse to a
    /// finite number.
    fn value_as_number(&self) -> Option<f64> {
        if !self.input_type().is_numeric() {
            return None;
        }
        self.value()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }
}

/// A generic event target that may or may not be an input element.
pub trait EventTarget: Sized {
    type Input: InputElement;

    /// Node name used in diagnostics (e.g. `"DIV"`).
    fn node_name(&self) -> Cow<'_, str>;

    /// Checked downcast. Returns the target unchanged when it is not an input.
    fn into_input(self) -> Result<Self::Input, Self>;
}

/// Why a target was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTargetReason {
    /// The event carried no current target.
    MissingTarget,
    /// The current target is some other kind of node.
    NotInput { node_name: Box<str> },
}

/// A change event's target was not an input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTargetError {
    pub event_type: Box<str>,
    pub reason: InvalidTargetReason,
}

impl fmt::Display for InvalidTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            InvalidTargetReason::MissingTarget => write!(
                f,
                "invalid target for `{}` event: no current target",
                self.event_type
            ),
            InvalidTargetReason::NotInput { node_name } => write!(
                f,
                "invalid target for `{}` event: `{node_name}` is not an input element",
                self.event_type
            ),
        }
    }
}

impl std::error::Error for InvalidTargetError {}

/// A change event whose current target is known to be an input element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<I> {
    info: EventInfo,
    current_target: I,
}

impl<I: InputElement> ChangeEvent<I> {
    /// Narrow a generic event to a change event.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTargetError`] when `current_target` is absent or is
    /// not an input element.
    pub fn narrow<T>(info: EventInfo, current_target: Option<T>) -> Result<Self, InvalidTargetError>
    where
        T: EventTarget<Input = I>,
    {
        let reason = match current_target.map(EventTarget::into_input) {
            Some(Ok(input)) => {
                crate::trace!(
                    event_type = %info.event_type,
                    input_type = %input.input_type(),
                    "narrowed change event target"
                );
                return Ok(Self {
                    info,
                    current_target: input,
                });
            }
            Some(Err(other)) => InvalidTargetReason::NotInput {
                node_name: other.node_name().into(),
            },
            None => InvalidTargetReason::MissingTarget,
        };

        let err = InvalidTargetError {
            event_type: info.event_type,
            reason,
        };
        crate::warn!(error = %err, "rejected change event target");
        Err(err)
    }

    /// Wrap an input handle that is already known to be valid.
    #[must_use]
    pub fn from_input(info: EventInfo, current_target: I) -> Self {
        Self {
            info,
            current_target,
        }
    }

    #[must_use]
    pub fn info(&self) -> &EventInfo {
        &self.info
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.info.event_type
    }

    #[must_use]
    pub fn current_target(&self) -> &I {
        &self.current_target
    }

    /// Shorthand for `current_target().value()`.
    #[must_use]
    pub fn value(&self) -> Cow<'_, str> {
        self.current_target.value()
    }

    /// Shorthand for `current_target().checked()`.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.current_target.checked()
    }

    #[must_use]
    pub fn into_parts(self) -> (EventInfo, I) {
        (self.info, self.current_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeInput {
        kind: InputType,
        value: String,
        checked: bool,
    }

    impl InputElement for FakeInput {
        fn input_type(&self) -> InputType {
            self.kind.clone()
        }

        fn value(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.value)
        }

        fn checked(&self) -> bool {
            self.checked
        }

        fn name(&self) -> Cow<'_, str> {
            Cow::Borrowed("")
        }
    }

    enum FakeTarget {
        Input(FakeInput),
        Div,
    }

    impl EventTarget for FakeTarget {
        type Input = FakeInput;

        fn node_name(&self) -> Cow<'_, str> {
            match self {
                Self::Input(_) => Cow::Borrowed("INPUT"),
                Self::Div => Cow::Borrowed("DIV"),
            }
        }

        fn into_input(self) -> Result<FakeInput, Self> {
            match self {
                Self::Input(input) => Ok(input),
                other => Err(other),
            }
        }
    }

    fn range(value: &str) -> FakeInput {
        FakeInput {
            kind: InputType::Range,
            value: value.to_string(),
            checked: false,
        }
    }

    #[test]
    fn narrow_accepts_input_target() {
        let info = EventInfo::new("change").with_flags(EventFlags::BUBBLES);
        let ev = ChangeEvent::narrow(info, Some(FakeTarget::Input(range("42")))).unwrap();
        assert_eq!(ev.event_type(), "change");
        assert!(ev.info().bubbles());
        assert_eq!(ev.value(), "42");
        assert_eq!(ev.current_target().value_as_number(), Some(42.0));
    }

    #[test]
    fn narrow_rejects_non_input_target() {
        let err = ChangeEvent::narrow(EventInfo::new("change"), Some(FakeTarget::Div)).unwrap_err();
        assert_eq!(
            err.reason,
            InvalidTargetReason::NotInput {
                node_name: "DIV".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid target for `change` event: `DIV` is not an input element"
        );
    }

    #[test]
    fn narrow_rejects_missing_target() {
        let err = ChangeEvent::narrow::<FakeTarget>(EventInfo::new("input"), None).unwrap_err();
        assert_eq!(&*err.event_type, "input");
        assert_eq!(err.reason, InvalidTargetReason::MissingTarget);
        assert_eq!(
            err.to_string(),
            "invalid target for `input` event: no current target"
        );
    }

    #[test]
    fn from_input_skips_the_check() {
        let ev = ChangeEvent::from_input(EventInfo::new("change"), range("1"));
        let (info, input) = ev.into_parts();
        assert_eq!(&*info.event_type, "change");
        assert_eq!(input, range("1"));
    }

    #[test]
    fn event_flags_accessors() {
        let info = EventInfo::new("change").with_flags(
            EventFlags::CANCELABLE | EventFlags::TRUSTED | EventFlags::DEFAULT_PREVENTED,
        );
        assert!(!info.bubbles());
        assert!(info.cancelable());
        assert!(!info.composed());
        assert!(info.is_trusted());
        assert!(info.default_prevented());
    }

    #[test]
    fn event_phase_codes() {
        for phase in [
            EventPhase::None,
            EventPhase::Capturing,
            EventPhase::AtTarget,
            EventPhase::Bubbling,
        ] {
            assert_eq!(EventPhase::from_u16(phase.to_u16()), phase);
        }
        assert_eq!(EventPhase::from_u16(9), EventPhase::None);
    }

    #[test]
    fn input_type_parsing() {
        assert_eq!(InputType::from_dom_str(""), InputType::Text);
        assert_eq!(InputType::from_dom_str("RANGE"), InputType::Range);
        assert_eq!(InputType::from_dom_str(" checkbox "), InputType::Checkbox);
        assert_eq!(
            InputType::from_dom_str("Week"),
            InputType::Other("week".into())
        );
        assert_eq!(InputType::Other("week".into()).as_str(), "week");
        assert!(InputType::Radio.is_checkable());
        assert!(InputType::Number.is_numeric());
        assert!(!InputType::Text.is_numeric());
    }

    #[test]
    fn value_as_number_requires_numeric_type() {
        let text = FakeInput {
            kind: InputType::Text,
            value: "12".to_string(),
            checked: false,
        };
        assert_eq!(text.value_as_number(), None);
        assert_eq!(range(" 2.5 ").value_as_number(), Some(2.5));
        assert_eq!(range("").value_as_number(), None);
        assert_eq!(range("inf").value_as_number(), None);
        assert_eq!(range("abc").value_as_number(), None);
    }

    #[test]
    fn checked_is_forwarded() {
        let checkbox = FakeInput {
            kind: InputType::Checkbox,
            value: "on".to_string(),
            checked: true,
        };
        let ev = ChangeEvent::from_input(EventInfo::new("change"), checkbox);
        assert!(ev.checked());
    }
}
