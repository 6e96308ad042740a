use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::Result;

/// Canned prompts, one per specific topic.
pub const SAMPLE_PROMPTS: [(&str, &str); 3] = [
    (
        "emergency_room_prompt.txt",
        "# Topic: Emergency Room Decision Making
# Description: NHS guidelines for when to visit emergency room

Create a decision-making flowchart for when patients should visit the emergency room during medical emergencies. Include criteria for severe symptoms, urgency levels, and appropriate care pathways.",
    ),
    (
        "software_deployment_prompt.md",
        "# Topic: Software Deployment
# Description: Decision tree for deploying software to production

Generate a comprehensive decision-making flowchart for software deployment processes. Include code review requirements, testing gates, staging validation, and rollback procedures.",
    ),
    (
        "business_investment_prompt.txt",
        "# Topic: Business Investment
# Description: Investment decision framework for startups

Create a decision-making framework for evaluating business investment opportunities. Include market analysis, competitive assessment, financial evaluation, and risk assessment criteria.",
    ),
];

/// Write the sample prompts into `queued_dir`, skipping names already present.
///
/// Returns the paths actually written.
pub fn seed_samples(queued_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (filename, content) in SAMPLE_PROMPTS {
        let path = queued_dir.join(filename);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "sample prompt already queued");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;
        written.push(path);
    }

    Ok(written)
}
