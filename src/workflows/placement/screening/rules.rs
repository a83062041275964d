use chrono::NaiveDate;

use super::super::domain::CandidateProfile;
use super::catalog::{RequirementPredicate, RequirementRule};
use super::FailedRequirement;

const MISSING_BIRTH_DATE: &str = "Date of birth is missing from the profile";
const MISSING_DEGREE: &str = "Highest completed degree is missing from the profile";
const MISSING_EXPERIENCE: &str = "Years of teaching experience are missing from the profile";
const MISSING_CITIZENSHIP: &str = "Citizenship is missing from the profile";

/// Evaluate one predicate against the candidate.
///
/// Returns the failure record, or `None` when the predicate is satisfied.
/// A missing attribute fails the dependent predicate with an explicit
/// message so a malformed profile surfaces as data, not as an error.
pub(crate) fn evaluate(
    candidate: &CandidateProfile,
    predicate: &RequirementPredicate,
    today: NaiveDate,
) -> Option<FailedRequirement> {
    let fail = |message: &str| {
        Some(FailedRequirement {
            kind: predicate.rule.kind(),
            priority: predicate.priority,
            message: message.to_string(),
        })
    };

    match &predicate.rule {
        RequirementRule::MinimumAge(minimum) => match candidate.age_on(today) {
            None => fail(MISSING_BIRTH_DATE),
            Some(age) if age < *minimum => fail(predicate.message),
            Some(_) => None,
        },
        RequirementRule::MaximumAge(maximum) => match candidate.age_on(today) {
            None => fail(MISSING_BIRTH_DATE),
            Some(age) if age > *maximum => fail(predicate.message),
            Some(_) => None,
        },
        RequirementRule::MinimumDegree(minimum) => match candidate.highest_degree {
            None => fail(MISSING_DEGREE),
            Some(degree) if degree < *minimum => fail(predicate.message),
            Some(_) => None,
        },
        RequirementRule::MinimumExperienceYears(minimum) => match candidate.years_experience {
            None => fail(MISSING_EXPERIENCE),
            Some(years) if years < *minimum => fail(predicate.message),
            Some(_) => None,
        },
        RequirementRule::TeachingCertification => {
            if candidate.has_teaching_certification {
                None
            } else {
                fail(predicate.message)
            }
        }
        RequirementRule::ClearedBackgroundCheck => {
            if candidate.background_check_cleared {
                None
            } else {
                fail(predicate.message)
            }
        }
        RequirementRule::CleanCriminalRecord => {
            if candidate.has_criminal_record {
                fail(predicate.message)
            } else {
                None
            }
        }
        RequirementRule::CitizenshipAmong(accepted) => match candidate.citizenship.as_deref() {
            None => fail(MISSING_CITIZENSHIP),
            Some(citizenship) => {
                let held = citizenship.trim().to_ascii_uppercase();
                if accepted.iter().any(|code| *code == held) {
                    None
                } else {
                    fail(predicate.message)
                }
            }
        },
    }
}
