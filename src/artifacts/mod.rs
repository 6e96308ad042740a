//! Static decision artifacts
//!
//! Each topic maps to a pre-written decision-logic text and a Mermaid
//! flowchart. Nothing here looks at the prompt itself.

use std::fs;
use std::path::{Path, PathBuf};

use crate::entity::Topic;
use crate::Result;

/// File name of the decision-logic artifact inside an archive directory
pub const LOGIC_FILE: &str = "decision_logic.txt";
/// File name of the flowchart artifact inside an archive directory
pub const FLOWCHART_FILE: &str = "flowchart.md";

const EMERGENCY_ROOM_LOGIC: &str = include_str!("templates/emergency_room_logic.txt");
const EMERGENCY_ROOM_FLOWCHART: &str = include_str!("templates/emergency_room_flowchart.md");
const SOFTWARE_DEPLOYMENT_LOGIC: &str = include_str!("templates/software_deployment_logic.txt");
const SOFTWARE_DEPLOYMENT_FLOWCHART: &str =
    include_str!("templates/software_deployment_flowchart.md");
const BUSINESS_INVESTMENT_LOGIC: &str = include_str!("templates/business_investment_logic.txt");
const BUSINESS_INVESTMENT_FLOWCHART: &str =
    include_str!("templates/business_investment_flowchart.md");

/// Topics with their own templates, in export order
const EXPORTED_TOPICS: [Topic; 3] = [
    Topic::EmergencyRoom,
    Topic::SoftwareDeployment,
    Topic::BusinessInvestment,
];

/// The logic text and flowchart selected for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionArtifacts {
    pub logic: &'static str,
    pub flowchart: &'static str,
}

/// Look up the artifacts for a topic.
///
/// Generic decisions fall back to the business investment templates.
pub fn artifacts_for(topic: Topic) -> DecisionArtifacts {
    match topic {
        Topic::EmergencyRoom => DecisionArtifacts {
            logic: EMERGENCY_ROOM_LOGIC,
            flowchart: EMERGENCY_ROOM_FLOWCHART,
        },
        Topic::SoftwareDeployment => DecisionArtifacts {
            logic: SOFTWARE_DEPLOYMENT_LOGIC,
            flowchart: SOFTWARE_DEPLOYMENT_FLOWCHART,
        },
        Topic::BusinessInvestment | Topic::GenericDecision => DecisionArtifacts {
            logic: BUSINESS_INVESTMENT_LOGIC,
            flowchart: BUSINESS_INVESTMENT_FLOWCHART,
        },
    }
}

/// Write `<topic>_logic.txt` and `<topic>_flowchart.md` for every topic
/// that has its own templates.
pub fn export_all(out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(EXPORTED_TOPICS.len() * 2);
    for topic in EXPORTED_TOPICS {
        let artifacts = artifacts_for(topic);

        let logic_path = out_dir.join(format!("{}_logic.txt", topic));
        fs::write(&logic_path, artifacts.logic)?;

        let flowchart_path = out_dir.join(format!("{}_flowchart.md", topic));
        fs::write(&flowchart_path, artifacts.flowchart)?;

        tracing::debug!(%topic, dir = %out_dir.display(), "exported templates");
        written.push(logic_path);
        written.push(flowchart_path);
    }

    Ok(written)
}
