//! Settings for the external search process.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Color;

pub const DEFAULT_SEARCH_DEPTH: u32 = 12;
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// What changed after a `setoption`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionChange {
    SearchDepth(u32),
    Opponent(Option<Color>),
    EnginePath(Option<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineOptions {
    /// Depth passed to `go depth`
    pub search_depth: u32,
    /// Side the external process plays, if any
    pub opponent: Option<Color>,
    pub engine_path: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            search_depth: DEFAULT_SEARCH_DEPTH,
            opponent: None,
            engine_path: None,
        }
    }
}

impl EngineOptions {
    /// Option lines in the form a UCI process announces its own.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!(
                "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                self.search_depth
            ),
            format!(
                "option name Opponent type combo default {} var none var white var black",
                self.opponent
                    .map_or("none".to_string(), |c| c.to_string().to_ascii_lowercase())
            ),
            format!(
                "option name Engine Path type string default {}",
                self.engine_path.as_deref().unwrap_or("<empty>")
            ),
        ]
    }

    /// Apply one named setting. Unknown names and unparseable values leave
    /// the options untouched and return `None`.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<OptionChange> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "depth" => {
                let depth = value
                    .and_then(|v| v.trim().parse::<u32>().ok())?
                    .clamp(1, MAX_SEARCH_DEPTH);
                self.search_depth = depth;
                Some(OptionChange::SearchDepth(depth))
            }
            "opponent" => {
                let opponent = match value.map(|v| v.trim().to_ascii_lowercase()) {
                    None => None,
                    Some(v) if v == "none" || v.is_empty() => None,
                    Some(v) => Some(v.parse::<Color>().ok()?),
                };
                self.opponent = opponent;
                Some(OptionChange::Opponent(opponent))
            }
            "engine path" | "enginepath" => {
                self.engine_path = value
                    .map(str::trim)
                    .filter(|v| !v.is_empty() && *v != "<empty>")
                    .map(str::to_string);
                Some(OptionChange::EnginePath(self.engine_path.clone()))
            }
            _ => None,
        }
    }
}

/// Split `setoption name <name...> [value <value...>]` into name and value.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.first() != Some(&"setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some((name_parts.join(" "), value))
}
