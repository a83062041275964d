mod advice;
mod catalog;
mod rules;

pub use catalog::{
    CountryRequirement, RequirementCatalog, RequirementKind, RequirementPredicate,
    RequirementPriority, RequirementRule,
};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{CandidateProfile, CountryCode};

/// One requirement the candidate did not meet, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRequirement {
    pub kind: RequirementKind,
    pub priority: RequirementPriority,
    pub message: String,
}

/// Verdict for one candidate/country pair.
///
/// Non-eligibility is a normal outcome carried as data; the engine never
/// raises for business-rule failures. `eligible` is true exactly when
/// `disqualifications` is empty: warnings are advisory and never block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Destination code as requested (normalized for supported countries).
    pub country: String,
    pub eligible: bool,
    pub failed_requirements: Vec<FailedRequirement>,
    /// Messages of the critical failures only.
    pub disqualifications: Vec<String>,
}

impl EligibilityResult {
    fn from_failures(country: String, failed_requirements: Vec<FailedRequirement>) -> Self {
        let disqualifications: Vec<String> = failed_requirements
            .iter()
            .filter(|failure| failure.priority == RequirementPriority::Critical)
            .map(|failure| failure.message.clone())
            .collect();

        Self {
            country,
            eligible: disqualifications.is_empty(),
            failed_requirements,
            disqualifications,
        }
    }

    fn unsupported(country: &str) -> Self {
        let failure = FailedRequirement {
            kind: RequirementKind::CountrySupport,
            priority: RequirementPriority::Critical,
            message: format!("{} is not a supported destination country", country.trim()),
        };
        Self::from_failures(country.trim().to_string(), vec![failure])
    }
}

/// Stateless evaluator applying the requirement catalog to candidate
/// profiles. Each call is pure given its inputs; callers own any caching.
pub struct EligibilityEngine {
    catalog: RequirementCatalog,
}

impl EligibilityEngine {
    pub fn new(catalog: RequirementCatalog) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(RequirementCatalog::standard())
    }

    pub fn catalog(&self) -> &RequirementCatalog {
        &self.catalog
    }

    /// Evaluate the candidate against one destination.
    ///
    /// Every predicate in the country's catalog runs (no short-circuit) so
    /// the full failure list is available. An unsupported destination code
    /// yields an ineligible result with a single synthetic failure.
    pub fn check(
        &self,
        candidate: &CandidateProfile,
        country: &str,
        today: NaiveDate,
    ) -> EligibilityResult {
        let Some(code) = CountryCode::from_code(country) else {
            return EligibilityResult::unsupported(country);
        };
        let Some(requirement) = self.catalog.get(code) else {
            return EligibilityResult::unsupported(country);
        };

        let failed_requirements: Vec<FailedRequirement> = requirement
            .predicates
            .iter()
            .filter_map(|predicate| rules::evaluate(candidate, predicate, today))
            .collect();

        EligibilityResult::from_failures(code.code().to_string(), failed_requirements)
    }

    /// Evaluate the candidate against every supported destination, one
    /// entry per country in deterministic order.
    pub fn check_all(
        &self,
        candidate: &CandidateProfile,
        today: NaiveDate,
    ) -> BTreeMap<CountryCode, EligibilityResult> {
        self.catalog
            .countries()
            .map(|country| (country, self.check(candidate, country.code(), today)))
            .collect()
    }

    pub fn eligible_countries(
        &self,
        candidate: &CandidateProfile,
        today: NaiveDate,
    ) -> Vec<(CountryCode, EligibilityResult)> {
        self.check_all(candidate, today)
            .into_iter()
            .filter(|(_, result)| result.eligible)
            .collect()
    }

    pub fn ineligible_countries(
        &self,
        candidate: &CandidateProfile,
        today: NaiveDate,
    ) -> Vec<(CountryCode, EligibilityResult)> {
        self.check_all(candidate, today)
            .into_iter()
            .filter(|(_, result)| !result.eligible)
            .collect()
    }

    /// Destinations the candidate both opted into and qualifies for.
    pub fn eligible_preferred_countries(
        &self,
        candidate: &CandidateProfile,
        today: NaiveDate,
    ) -> Vec<CountryCode> {
        candidate
            .preferred_countries
            .iter()
            .filter_map(|code| CountryCode::from_code(code))
            .filter(|country| self.check(candidate, country.code(), today).eligible)
            .collect()
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}
