use super::common::*;

#[test]
fn stage_counts_follow_the_drop_order() {
    // Two candidates fail the visa stage, one more falls below the
    // posting's experience bar, and the remaining two survive.
    let mut visa_fail_a = match_candidate("t-1", 0.9);
    visa_fail_a.profile.has_criminal_record = true;
    let mut visa_fail_b = match_candidate("t-2", 0.8);
    visa_fail_b.profile.has_teaching_certification = false;
    let mut short_experience = match_candidate("t-3", 0.7);
    short_experience.profile.years_experience = Some(1);

    let candidates = vec![
        visa_fail_a,
        visa_fail_b,
        short_experience,
        match_candidate("t-4", 0.6),
        match_candidate("t-5", 0.5),
    ];

    let outcome = pipeline().apply(candidates, &job(), today());

    assert_eq!(outcome.stats.initial, 5);
    assert_eq!(outcome.stats.after_visa, 3);
    assert_eq!(outcome.stats.after_experience, 2);
    assert_eq!(outcome.stats.after_salary, 2);
    assert_eq!(outcome.stats.after_subject, 2);
    assert_eq!(outcome.survivors.len(), 2);
}

#[test]
fn stage_counts_never_increase() {
    let candidates = vec![
        match_candidate("t-1", 0.9),
        match_candidate("t-2", 0.8),
        match_candidate("t-3", 0.7),
    ];

    let stats = pipeline().apply(candidates, &job(), today()).stats;

    assert!(stats.after_visa <= stats.initial);
    assert!(stats.after_experience <= stats.after_visa);
    assert!(stats.after_salary <= stats.after_experience);
    assert_eq!(stats.after_subject, stats.after_salary);
}

#[test]
fn salary_stage_keeps_floors_within_tolerance() {
    // Offer is 2400; the default 5% tolerance allows floors up to 2520.
    let mut within_budget = match_candidate("t-1", 0.9);
    within_budget.profile.min_salary_usd = Some(2300);
    let mut stretch = match_candidate("t-2", 0.9);
    stretch.profile.min_salary_usd = Some(2500);
    let mut beyond = match_candidate("t-3", 0.9);
    beyond.profile.min_salary_usd = Some(2600);
    let mut unstated = match_candidate("t-4", 0.9);
    unstated.profile.min_salary_usd = None;

    let outcome = pipeline().apply(
        vec![within_budget, stretch, beyond, unstated],
        &job(),
        today(),
    );

    assert_eq!(outcome.stats.after_salary, 3);
    let flags: Vec<(String, bool)> = outcome
        .survivors
        .iter()
        .map(|candidate| {
            (
                candidate.profile.teacher_id.0.clone(),
                candidate.salary_stretch,
            )
        })
        .collect();
    assert!(flags.contains(&("t-1".to_string(), false)));
    assert!(flags.contains(&("t-2".to_string(), true)));
    assert!(flags.contains(&("t-4".to_string(), false)));
}

#[test]
fn subject_stage_annotates_without_dropping() {
    let english = match_candidate("t-1", 0.9);
    let mut science = match_candidate("t-2", 0.9);
    science.profile.subjects = vec!["Chemistry".to_string()];

    let outcome = pipeline().apply(vec![english, science], &job(), today());

    assert_eq!(outcome.stats.after_salary, outcome.stats.after_subject);
    assert_eq!(outcome.survivors.len(), 2);

    let english_survivor = outcome
        .survivors
        .iter()
        .find(|candidate| candidate.profile.teacher_id.0 == "t-1")
        .expect("english teacher survives");
    assert!(english_survivor.subject_match);

    let science_survivor = outcome
        .survivors
        .iter()
        .find(|candidate| candidate.profile.teacher_id.0 == "t-2")
        .expect("science teacher survives");
    assert!(!science_survivor.subject_match);
}

#[test]
fn empty_batch_yields_zeroed_stats() {
    let outcome = pipeline().apply(Vec::new(), &job(), today());

    assert!(outcome.survivors.is_empty());
    assert_eq!(outcome.stats.initial, 0);
    assert_eq!(outcome.stats.after_visa, 0);
    assert_eq!(outcome.stats.after_experience, 0);
    assert_eq!(outcome.stats.after_salary, 0);
    assert_eq!(outcome.stats.after_subject, 0);
}

#[test]
fn missing_experience_counts_as_none_at_all() {
    let mut unknown_experience = match_candidate("t-1", 0.9);
    unknown_experience.profile.years_experience = None;

    let outcome = pipeline().apply(vec![unknown_experience], &job(), today());

    // Visa stage already drops the profile: Korea's catalog treats the
    // missing attribute as a failed critical predicate.
    assert_eq!(outcome.stats.after_visa, 0);
    assert!(outcome.survivors.is_empty());
}

#[test]
fn applying_twice_with_identical_input_is_idempotent() {
    let candidates = vec![
        match_candidate("t-1", 0.9),
        match_candidate("t-2", 0.4),
    ];
    let pipeline = pipeline();

    let first = pipeline.apply(candidates.clone(), &job(), today());
    let second = pipeline.apply(candidates, &job(), today());

    assert_eq!(first, second);
}
