/// Opt-in engine behaviours toggled through environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineFeatures {
    observe_nobody: bool,
    decision_details: bool,
}

impl EngineFeatures {
    pub const fn new(observe_nobody: bool, decision_details: bool) -> Self {
        Self {
            observe_nobody,
            decision_details,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Whether a query of another player that nobody could answer marks the
    /// queried cards as lacking for every player but the asker.
    pub const fn observe_nobody_enabled(self) -> bool {
        self.observe_nobody
    }

    pub const fn decision_details_enabled(self) -> bool {
        self.decision_details
    }

    pub fn with_observe_nobody(mut self, enabled: bool) -> Self {
        self.observe_nobody = enabled;
        self
    }

    pub fn with_decision_details(mut self, enabled: bool) -> Self {
        self.decision_details = enabled;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let flag = |raw: String| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON");
        let observe_nobody = read("CLUE_OBSERVE_NOBODY").map(flag).unwrap_or(false);
        let decision_details = read("CLUE_DECISION_DETAILS").map(flag).unwrap_or(false);
        Self {
            observe_nobody,
            decision_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineFeatures;

    #[test]
    fn defaults_are_off() {
        let features = EngineFeatures::from_reader(|_| None);
        assert_eq!(features, EngineFeatures::default());
        assert!(!features.observe_nobody_enabled());
        assert!(!features.decision_details_enabled());
    }

    #[test]
    fn reads_truthy_values() {
        let features = EngineFeatures::from_reader(|key| match key {
            "CLUE_OBSERVE_NOBODY" => Some(" on ".to_string()),
            "CLUE_DECISION_DETAILS" => Some("0".to_string()),
            _ => None,
        });
        assert!(features.observe_nobody_enabled());
        assert!(!features.decision_details_enabled());
    }
}
