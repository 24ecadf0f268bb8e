//! Host configuration: which DOM elements the arcade binds to, plus the fixed
//! logical playfield every game is drawn against.

/// Logical canvas width shared by all games.
pub const CANVAS_WIDTH: f64 = 400.0;
/// Logical canvas height (cricket and snake only use the top 400px as field).
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Element ids looked up on `open_game`. Defaults match the portfolio page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct HostConfig {
    pub modal_id: String,
    pub title_id: String,
    pub instructions_id: String,
    pub canvas_id: String,
    pub score_id: String,
    /// Completion notice overlay; created inside the modal when absent.
    pub notice_id: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            modal_id: "gameModal".into(),
            title_id: "gameTitle".into(),
            instructions_id: "gameInstructions".into(),
            canvas_id: "gameCanvas".into(),
            score_id: "gameScore".into(),
            notice_id: "gameNotice".into(),
        }
    }
}

#[cfg(feature = "serde_json")]
impl HostConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
