use crate::api::{ModelStatus, ScalingDecision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Increase,
    Decrease,
    Neutral,
}

impl Glyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Increase => "▲",
            Glyph::Decrease => "▼",
            Glyph::Neutral => "−",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Alert,
    Positive,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    pub glyph: Glyph,
    pub tone: Tone,
    pub description: &'static str,
}

pub fn classify(decision: &ScalingDecision) -> StatusView {
    match decision {
        ScalingDecision::ScaleUp => StatusView {
            glyph: Glyph::Increase,
            tone: Tone::Alert,
            description: "System is scaling up to handle increased load",
        },
        ScalingDecision::ScaleDown => StatusView {
            glyph: Glyph::Decrease,
            tone: Tone::Positive,
            description: "System is scaling down to optimize resources",
        },
        ScalingDecision::NoAction | ScalingDecision::Other(_) => StatusView {
            glyph: Glyph::Neutral,
            tone: Tone::Neutral,
            description: "System is operating within normal parameters",
        },
    }
}

pub fn model_tone(status: &ModelStatus) -> Tone {
    if status.is_loaded() {
        Tone::Positive
    } else {
        Tone::Warning
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_decisions() {
        let up = classify(&ScalingDecision::ScaleUp);
        assert_eq!(up.glyph, Glyph::Increase);
        assert_eq!(up.tone, Tone::Alert);
        assert_eq!(up.description, "System is scaling up to handle increased load");

        let down = classify(&ScalingDecision::ScaleDown);
        assert_eq!(down.glyph, Glyph::Decrease);
        assert_eq!(down.tone, Tone::Positive);
        assert_eq!(down.description, "System is scaling down to optimize resources");

        let none = classify(&ScalingDecision::NoAction);
        assert_eq!(none.glyph, Glyph::Neutral);
        assert_eq!(none.tone, Tone::Neutral);
        assert_eq!(none.description, "System is operating within normal parameters");
    }

    #[test]
    fn test_unknown_decision_is_neutral() {
        let view = classify(&ScalingDecision::from("unknown_mode".to_string()));
        assert_eq!(view.glyph, Glyph::Neutral);
        assert_eq!(view.tone, Tone::Neutral);
        assert_eq!(view.description, "System is operating within normal parameters");
    }

    #[test]
    fn test_classification_is_idempotent() {
        for raw in ["scale_up", "scale_down", "no_action", "unknown_mode", ""] {
            let decision = ScalingDecision::from(raw.to_string());
            let first = classify(&decision);
            for _ in 0..3 {
                assert_eq!(classify(&decision), first);
            }
        }
    }

    #[test]
    fn test_model_tone() {
        assert_eq!(model_tone(&ModelStatus::Loaded), Tone::Positive);
        assert_eq!(model_tone(&ModelStatus::from("not loaded".to_string())), Tone::Warning);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(61.94)), "61.9%");
        assert_eq!(format_percent(None), "N/A");
    }
}
