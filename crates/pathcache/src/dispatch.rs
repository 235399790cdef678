//! Expectations over dispatched actions.
//!
//! An action is an object with a `type` field and, for actions that carry the
//! outcome of a request, a `response` field. These helpers dispatch an action
//! and check that the resulting action has the expected type.

use async_trait::async_trait;

use crate::value::Value;

pub const ACTION_TYPE_FIELD: &str = "type";
pub const ACTION_RESPONSE_FIELD: &str = "response";

/// Something that actions can be dispatched to.
///
/// A dispatch either resolves or rejects; both outcomes carry a value.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, action: Value) -> Result<Value, Value>;
}

/// Outcome of a dispatch that did not produce the expected action.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchRejection {
    /// The resulting action carried a response; this is its payload.
    #[error("dispatch rejected with response: {0}")]
    Response(Value),

    /// The resulting value, as it was.
    #[error("dispatch rejected with action: {0}")]
    Action(Value),
}

impl DispatchRejection {
    pub fn into_value(self) -> Value {
        match self {
            Self::Response(value) | Self::Action(value) => value,
        }
    }
}

/// Passes `action` through when its type is `expected_type`, otherwise
/// returns it as the error.
pub fn ensure_action_matches(expected_type: &str, action: Value) -> Result<Value, Value> {
    let matches = action
        .get(ACTION_TYPE_FIELD)
        .and_then(Value::as_str)
        .is_some_and(|kind| kind == expected_type);
    if matches {
        Ok(action)
    } else {
        Err(action)
    }
}

/// True when `value` has both a `type` and a `response`.
pub fn is_response_action(value: &Value) -> bool {
    value.get(ACTION_TYPE_FIELD).is_some() && value.get(ACTION_RESPONSE_FIELD).is_some()
}

/// Dispatches `action` and expects an action of `expected_type` back.
///
/// On success yields that action's `response`, if any. A rejected dispatch or
/// an action of another type becomes a [`DispatchRejection`].
pub async fn run_dispatch_and_expect<D>(
    dispatcher: &D,
    action: Value,
    expected_type: &str,
) -> Result<Option<Value>, DispatchRejection>
where
    D: Dispatch + ?Sized,
{
    let outcome = dispatcher
        .dispatch(action)
        .await
        .and_then(|resolved| ensure_action_matches(expected_type, resolved));

    match outcome {
        Ok(resolved) => Ok(resolved.get(ACTION_RESPONSE_FIELD).cloned()),
        Err(rejected) => {
            log::debug!("dispatch did not produce '{}': {}", expected_type, rejected);
            if is_response_action(&rejected) {
                let response = rejected
                    .get(ACTION_RESPONSE_FIELD)
                    .cloned()
                    .unwrap_or_default();
                Err(DispatchRejection::Response(response))
            } else {
                Err(DispatchRejection::Action(rejected))
            }
        }
    }
}
