//! Global field state

use std::collections::BTreeSet;

use serde::Serialize;

/// Battle-wide conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    /// Current weather, as named by the server
    pub weather: Option<String>,

    /// Active field effects (terrains, rooms, ...), sorted by name
    pub effects: BTreeSet<String>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_weather(&mut self, weather: Option<String>) {
        self.weather = weather;
    }

    pub fn start_effect(&mut self, effect: &str) {
        self.effects.insert(effect.to_string());
    }

    pub fn end_effect(&mut self, effect: &str) {
        self.effects.remove(effect);
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.contains(effect)
    }
}
