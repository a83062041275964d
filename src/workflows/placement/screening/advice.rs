use super::catalog::{RequirementKind, RequirementPriority};
use super::EligibilityResult;

impl EligibilityResult {
    /// One-line digest for dashboards and outreach emails.
    pub fn summary(&self) -> String {
        if self.eligible {
            let advisories: Vec<&str> = self
                .failed_requirements
                .iter()
                .filter(|failure| failure.priority == RequirementPriority::Warning)
                .map(|failure| failure.message.as_str())
                .collect();

            if advisories.is_empty() {
                "Eligible".to_string()
            } else {
                format!("Eligible with advisories: {}", advisories.join("; "))
            }
        } else {
            format!("Ineligible: {}", self.disqualifications.join("; "))
        }
    }

    /// Actionable suggestions derived from the failed requirements.
    ///
    /// Fixed kind-to-suggestion lookup; requirement families with no
    /// actionable remedy (age, criminal record) produce nothing. Duplicate
    /// suggestions collapse while preserving first-seen order.
    pub fn recommendations(&self) -> Vec<String> {
        let mut suggestions: Vec<String> = Vec::new();
        for failure in &self.failed_requirements {
            if let Some(suggestion) = recommendation_for(failure.kind) {
                if !suggestions.iter().any(|existing| existing == suggestion) {
                    suggestions.push(suggestion.to_string());
                }
            }
        }
        suggestions
    }
}

fn recommendation_for(kind: RequirementKind) -> Option<&'static str> {
    match kind {
        RequirementKind::Certification => {
            Some("Obtain a 120-hour TEFL/TESOL certification")
        }
        RequirementKind::Degree => {
            Some("Complete a bachelor's degree or higher before applying")
        }
        RequirementKind::Experience => {
            Some("Build classroom hours through substitute, volunteer, or online teaching")
        }
        RequirementKind::BackgroundCheck => {
            Some("Request an apostilled national-level background check")
        }
        RequirementKind::Citizenship => {
            Some("Focus on destinations without passport restrictions")
        }
        RequirementKind::CountrySupport => {
            Some("Choose one of the supported destination countries")
        }
        RequirementKind::Age | RequirementKind::CriminalRecord => None,
    }
}
