#![forbid(unsafe_code)]

//! Live DOM adapter.
//!
//! Narrowing has to happen inside the event listener: once dispatch
//! finishes the DOM resets `currentTarget` to `null`, which shows up here as
//! [`InvalidTargetReason::MissingTarget`](leafkit_core::event::InvalidTargetReason::MissingTarget).

use std::borrow::Cow;

use leafkit_core::event::{
    ChangeEvent, EventFlags, EventInfo, EventPhase, EventTarget, InputElement, InputType,
    InvalidTargetError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, Node};

/// A DOM `EventTarget` that has not been narrowed yet.
#[derive(Debug, Clone)]
pub struct DomTarget(pub web_sys::EventTarget);

/// A DOM `<input>` element.
#[derive(Debug, Clone)]
pub struct DomInput(pub HtmlInputElement);

impl EventTarget for DomTarget {
    type Input = DomInput;

    fn node_name(&self) -> Cow<'_, str> {
        match self.0.dyn_ref::<Node>() {
            Some(node) => Cow::Owned(node.node_name()),
            // Window, XMLHttpRequest, AbortSignal, ...
            None => Cow::Borrowed("EventTarget"),
        }
    }

    fn into_input(self) -> Result<DomInput, Self> {
        self.0
            .dyn_into::<HtmlInputElement>()
            .map(DomInput)
            .map_err(DomTarget)
    }
}

impl InputElement for DomInput {
    fn input_type(&self) -> InputType {
        InputType::from_dom_str(&self.0.type_())
    }

    fn value(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.value())
    }

    fn checked(&self) -> bool {
        self.0.checked()
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.name())
    }

    // The DOM also reports finite numbers for date/time inputs; those stay
    // `None` so both adapters agree.
    fn value_as_number(&self) -> Option<f64> {
        if !self.input_type().is_numeric() {
            return None;
        }
        let n = self.0.value_as_number();
        n.is_finite().then_some(n)
    }
}

fn dom_event_info(event: &web_sys::Event) -> EventInfo {
    let mut flags = EventFlags::empty();
    flags.set(EventFlags::BUBBLES, event.bubbles());
    flags.set(EventFlags::CANCELABLE, event.cancelable());
    flags.set(EventFlags::COMPOSED, event.composed());
    flags.set(EventFlags::TRUSTED, event.is_trusted());
    flags.set(EventFlags::DEFAULT_PREVENTED, event.default_prevented());

    EventInfo::new(event.type_())
        .with_flags(flags)
        .with_phase(EventPhase::from_u16(event.event_phase()))
        .with_time_stamp(event.time_stamp())
}

/// Narrow a DOM event that is currently being dispatched.
///
/// # Errors
///
/// Returns [`InvalidTargetError`] when `currentTarget` is `null` or is not an
/// `HTMLInputElement`.
pub fn narrow_dom_event(
    event: &web_sys::Event,
) -> Result<ChangeEvent<DomInput>, InvalidTargetError> {
    ChangeEvent::narrow(dom_event_info(event), event.current_target().map(DomTarget))
}

fn to_js_error(err: InvalidTargetError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Read the input value of a change event from a JS listener.
///
/// Throws an `Error` when the event's current target is not an input element.
#[wasm_bindgen(js_name = readChangeValue)]
pub fn read_change_value(event: &web_sys::Event) -> Result<String, JsValue> {
    narrow_dom_event(event)
        .map(|ev| ev.value().into_owned())
        .map_err(to_js_error)
}

/// Read the numeric value of a `number`/`range` change event.
///
/// Returns `undefined` for non-numeric inputs or unparsable values.
#[wasm_bindgen(js_name = readChangeNumber)]
pub fn read_change_number(event: &web_sys::Event) -> Result<Option<f64>, JsValue> {
    narrow_dom_event(event)
        .map(|ev| ev.current_target().value_as_number())
        .map_err(to_js_error)
}
