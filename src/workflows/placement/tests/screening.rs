use super::common::*;
use crate::workflows::placement::domain::{CountryCode, DegreeLevel};
use crate::workflows::placement::screening::{RequirementKind, RequirementPriority};
use chrono::NaiveDate;

#[test]
fn qualified_candidate_clears_south_korea() {
    let result = engine().check(&qualified_profile("t-1"), "KR", today());

    assert!(result.eligible);
    assert!(result.failed_requirements.is_empty());
    assert!(result.disqualifications.is_empty());
    assert_eq!(result.country, "KR");
    assert_eq!(result.summary(), "Eligible");
}

#[test]
fn qualified_candidate_clears_every_destination() {
    let matrix = engine().check_all(&qualified_profile("t-1"), today());

    assert_eq!(matrix.len(), CountryCode::ordered().len());
    for (country, result) in &matrix {
        assert!(
            result.eligible,
            "expected eligibility for {}, failures: {:?}",
            country.code(),
            result.failed_requirements
        );
    }
}

#[test]
fn matrix_covers_each_supported_country_once() {
    let matrix = engine().check_all(&qualified_profile("t-1"), today());
    let countries: Vec<CountryCode> = matrix.keys().copied().collect();
    assert_eq!(countries, CountryCode::ordered().to_vec());
}

#[test]
fn eligible_and_ineligible_partition_the_matrix() {
    let mut profile = qualified_profile("t-1");
    profile.has_teaching_certification = false;
    let engine = engine();

    let eligible = engine.eligible_countries(&profile, today());
    let ineligible = engine.ineligible_countries(&profile, today());

    assert_eq!(
        eligible.len() + ineligible.len(),
        CountryCode::ordered().len()
    );
    for (country, _) in &eligible {
        assert!(
            !ineligible.iter().any(|(other, _)| other == country),
            "{} appears in both partitions",
            country.code()
        );
    }
}

#[test]
fn unsupported_country_is_data_not_error() {
    let result = engine().check(&qualified_profile("t-1"), "XX", today());

    assert!(!result.eligible);
    assert_eq!(result.failed_requirements.len(), 1);
    assert_eq!(result.disqualifications.len(), 1);
    assert_eq!(
        result.failed_requirements[0].kind,
        RequirementKind::CountrySupport
    );
    assert!(result.disqualifications[0].contains("not a supported destination"));
}

#[test]
fn warning_failures_never_block_eligibility() {
    // Spain requires a degree only as an advisory; the critical checks pass.
    let mut profile = qualified_profile("t-1");
    profile.highest_degree = None;

    let result = engine().check(&profile, "ES", today());

    assert!(result.eligible);
    assert!(!result.failed_requirements.is_empty());
    assert!(result.disqualifications.is_empty());
    assert!(result.summary().starts_with("Eligible with advisories:"));
}

#[test]
fn eligibility_always_mirrors_the_disqualification_list() {
    let mut stripped = qualified_profile("t-1");
    stripped.birth_date = None;
    stripped.highest_degree = None;
    stripped.has_teaching_certification = false;
    stripped.has_criminal_record = true;

    for candidate in [qualified_profile("t-2"), stripped] {
        for (_, result) in engine().check_all(&candidate, today()) {
            assert_eq!(result.eligible, result.disqualifications.is_empty());
        }
    }
}

#[test]
fn missing_birth_date_fails_the_age_predicate_as_data() {
    let mut profile = qualified_profile("t-1");
    profile.birth_date = None;

    let result = engine().check(&profile, "KR", today());

    assert!(!result.eligible);
    let age_failure = result
        .failed_requirements
        .iter()
        .find(|failure| failure.kind == RequirementKind::Age)
        .expect("age predicate fails");
    assert_eq!(
        age_failure.message,
        "Date of birth is missing from the profile"
    );
}

#[test]
fn repeated_checks_are_deterministic() {
    let mut profile = qualified_profile("t-1");
    profile.has_teaching_certification = false;
    profile.years_experience = Some(0);
    let engine = engine();

    let first = engine.check(&profile, "KR", today());
    let second = engine.check(&profile, "KR", today());

    assert_eq!(first, second);
    let messages: Vec<&str> = first
        .failed_requirements
        .iter()
        .map(|failure| failure.message.as_str())
        .collect();
    let repeat: Vec<&str> = second
        .failed_requirements
        .iter()
        .map(|failure| failure.message.as_str())
        .collect();
    assert_eq!(messages, repeat);
}

#[test]
fn young_certified_bachelor_clears_korea() {
    let mut profile = qualified_profile("t-1");
    profile.birth_date = NaiveDate::from_ymd_opt(2000, 5, 1);
    profile.highest_degree = Some(DegreeLevel::Bachelors);
    profile.years_experience = Some(3);

    let result = engine().check(&profile, "KR", today());

    assert!(result.eligible);
    assert!(result.failed_requirements.is_empty());
}

#[test]
fn zero_experience_disqualifies_in_korea() {
    let mut profile = qualified_profile("t-1");
    profile.birth_date = NaiveDate::from_ymd_opt(2000, 5, 1);
    profile.highest_degree = Some(DegreeLevel::Bachelors);
    profile.years_experience = Some(0);

    let result = engine().check(&profile, "KR", today());

    assert!(!result.eligible);
    assert!(result
        .disqualifications
        .iter()
        .any(|message| message.contains("teaching experience")));
    let failure = result
        .failed_requirements
        .iter()
        .find(|failure| failure.kind == RequirementKind::Experience)
        .expect("experience predicate fails");
    assert_eq!(failure.priority, RequirementPriority::Critical);
}

#[test]
fn all_predicates_run_without_short_circuit() {
    let mut profile = qualified_profile("t-1");
    profile.citizenship = Some("FR".to_string());
    profile.highest_degree = None;
    profile.has_teaching_certification = false;
    profile.background_check_cleared = false;

    let result = engine().check(&profile, "KR", today());

    // Citizenship fails first in catalog order yet later predicates still report.
    let kinds: Vec<RequirementKind> = result
        .failed_requirements
        .iter()
        .map(|failure| failure.kind)
        .collect();
    assert_eq!(kinds[0], RequirementKind::Citizenship);
    assert!(kinds.contains(&RequirementKind::Degree));
    assert!(kinds.contains(&RequirementKind::Certification));
    assert!(kinds.contains(&RequirementKind::BackgroundCheck));
}

#[test]
fn recommendations_come_from_the_fixed_lookup() {
    let mut profile = qualified_profile("t-1");
    profile.highest_degree = None;
    profile.has_teaching_certification = false;
    profile.years_experience = Some(0);

    let result = engine().check(&profile, "KR", today());
    let recommendations = result.recommendations();

    assert!(recommendations
        .iter()
        .any(|suggestion| suggestion.contains("TEFL/TESOL")));
    assert!(recommendations
        .iter()
        .any(|suggestion| suggestion.contains("bachelor's degree")));
    assert!(recommendations
        .iter()
        .any(|suggestion| suggestion.contains("classroom hours")));

    let mut deduped = recommendations.clone();
    deduped.dedup();
    assert_eq!(recommendations, deduped);
}

#[test]
fn age_failures_produce_no_recommendation() {
    let mut profile = qualified_profile("t-1");
    profile.birth_date = NaiveDate::from_ymd_opt(2010, 1, 1);

    let result = engine().check(&profile, "KR", today());

    assert!(!result.eligible);
    assert!(result.recommendations().is_empty());
}

#[test]
fn preferred_countries_intersect_with_eligibility() {
    let mut profile = qualified_profile("t-1");
    profile.preferred_countries = vec!["KR".to_string(), "XX".to_string(), "vn".to_string()];

    let preferred = engine().eligible_preferred_countries(&profile, today());

    assert_eq!(
        preferred,
        vec![CountryCode::SouthKorea, CountryCode::Vietnam]
    );
}
