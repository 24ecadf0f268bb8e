//! Error taxonomy for the arcade runtime.
//!
//! Only two things can actually go wrong: the page is missing one of the DOM
//! surfaces the host draws into, or the page asked for a game we do not know.
//! Browser calls that reject (`Result<_, JsValue>`) are folded into `Js`.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArcadeError {
    /// No `window` / `document` (running outside a browser page).
    NoDocument,
    /// A required element is absent. `role` names what it is used for.
    MissingElement { role: &'static str, id: String },
    /// The canvas exists but refused to hand out a 2D context.
    NoContext,
    UnknownGame(String),
    /// A DOM call threw; the payload is the stringified JS value.
    Js(String),
}

impl fmt::Display for ArcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcadeError::NoDocument => write!(f, "no window/document available"),
            ArcadeError::MissingElement { role, id } => {
                write!(f, "game {role} element '#{id}' not found")
            }
            ArcadeError::NoContext => write!(f, "game canvas has no 2d context"),
            ArcadeError::UnknownGame(kind) => write!(f, "unknown game type: {kind}"),
            ArcadeError::Js(msg) => write!(f, "dom error: {msg}"),
        }
    }
}

impl std::error::Error for ArcadeError {}

impl From<JsValue> for ArcadeError {
    fn from(value: JsValue) -> Self {
        ArcadeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<ArcadeError> for JsValue {
    fn from(err: ArcadeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        let err = ArcadeError::MissingElement { role: "canvas", id: "gameCanvas".into() };
        assert_eq!(err.to_string(), "game canvas element '#gameCanvas' not found");
        assert_eq!(
            ArcadeError::UnknownGame("pong".into()).to_string(),
            "unknown game type: pong"
        );
    }
}
