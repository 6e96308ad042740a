use serde::{Deserialize, Serialize};

/// Classification label that selects a prompt's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    EmergencyRoom,
    SoftwareDeployment,
    BusinessInvestment,
    #[default]
    GenericDecision,
}

/// Keyword groups tested in order. The first group with any member present wins.
const KEYWORD_RULES: &[(Topic, &[&str])] = &[
    (Topic::EmergencyRoom, &["emergency", "hospital"]),
    (Topic::SoftwareDeployment, &["software", "deployment"]),
    (Topic::BusinessInvestment, &["business", "investment"]),
];

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::EmergencyRoom,
        Topic::SoftwareDeployment,
        Topic::BusinessInvestment,
        Topic::GenericDecision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::EmergencyRoom => "emergency_room",
            Topic::SoftwareDeployment => "software_deployment",
            Topic::BusinessInvestment => "business_investment",
            Topic::GenericDecision => "generic_decision",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = crate::error::QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emergency_room" => Ok(Topic::EmergencyRoom),
            "software_deployment" => Ok(Topic::SoftwareDeployment),
            "business_investment" => Ok(Topic::BusinessInvestment),
            "generic_decision" => Ok(Topic::GenericDecision),
            _ => Err(crate::error::QueueError::InvalidTopic(s.to_string())),
        }
    }
}

/// Pick a topic by plain substring matching over the lowercased body.
///
/// This is deliberately crude: no tokenization, stemming or negation, so
/// "not an emergency" still classifies as an emergency. Only the
/// first-match ordering of the keyword groups is meaningful.
pub fn classify(body: &str) -> Topic {
    let lowered = body.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or_default()
}
