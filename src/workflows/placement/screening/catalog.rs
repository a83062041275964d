use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{CountryCode, DegreeLevel};

/// Whether a failed requirement blocks eligibility or is advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementPriority {
    Critical,
    Warning,
}

impl RequirementPriority {
    pub const fn label(self) -> &'static str {
        match self {
            RequirementPriority::Critical => "critical",
            RequirementPriority::Warning => "warning",
        }
    }
}

/// Requirement families used to key recommendations and group failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementKind {
    Age,
    Degree,
    Experience,
    Certification,
    BackgroundCheck,
    CriminalRecord,
    Citizenship,
    CountrySupport,
}

impl RequirementKind {
    pub const fn label(self) -> &'static str {
        match self {
            RequirementKind::Age => "age",
            RequirementKind::Degree => "degree",
            RequirementKind::Experience => "experience",
            RequirementKind::Certification => "certification",
            RequirementKind::BackgroundCheck => "background_check",
            RequirementKind::CriminalRecord => "criminal_record",
            RequirementKind::Citizenship => "citizenship",
            RequirementKind::CountrySupport => "country_support",
        }
    }
}

/// Threshold test applied to one candidate attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementRule {
    MinimumAge(u32),
    MaximumAge(u32),
    MinimumDegree(DegreeLevel),
    MinimumExperienceYears(u8),
    TeachingCertification,
    ClearedBackgroundCheck,
    CleanCriminalRecord,
    CitizenshipAmong(&'static [&'static str]),
}

impl RequirementRule {
    pub const fn kind(&self) -> RequirementKind {
        match self {
            RequirementRule::MinimumAge(_) | RequirementRule::MaximumAge(_) => {
                RequirementKind::Age
            }
            RequirementRule::MinimumDegree(_) => RequirementKind::Degree,
            RequirementRule::MinimumExperienceYears(_) => RequirementKind::Experience,
            RequirementRule::TeachingCertification => RequirementKind::Certification,
            RequirementRule::ClearedBackgroundCheck => RequirementKind::BackgroundCheck,
            RequirementRule::CleanCriminalRecord => RequirementKind::CriminalRecord,
            RequirementRule::CitizenshipAmong(_) => RequirementKind::Citizenship,
        }
    }
}

/// One predicate in a country's ordered requirement list.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementPredicate {
    pub rule: RequirementRule,
    pub priority: RequirementPriority,
    /// Shown to recruiters when the threshold test fails.
    pub message: &'static str,
}

/// Ordered visa requirement set for one destination country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRequirement {
    pub country: CountryCode,
    pub predicates: Vec<RequirementPredicate>,
}

/// Immutable per-country requirement configuration handed to the engine at
/// construction. Built once; never mutated at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementCatalog {
    entries: BTreeMap<CountryCode, CountryRequirement>,
}

/// Passports accepted for the native-speaker visa classes (E-2, Z, ...).
const NATIVE_ENGLISH_PASSPORTS: &[&str] = &["US", "GB", "CA", "AU", "NZ", "IE", "ZA"];

fn predicate(
    rule: RequirementRule,
    priority: RequirementPriority,
    message: &'static str,
) -> RequirementPredicate {
    RequirementPredicate {
        rule,
        priority,
        message,
    }
}

impl RequirementCatalog {
    pub fn new(requirements: Vec<CountryRequirement>) -> Self {
        let entries = requirements
            .into_iter()
            .map(|requirement| (requirement.country, requirement))
            .collect();
        Self { entries }
    }

    pub fn get(&self, country: CountryCode) -> Option<&CountryRequirement> {
        self.entries.get(&country)
    }

    /// Supported destinations in deterministic (code) order.
    pub fn countries(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog maintained by the placement team, mirroring the posted
    /// hiring requirements of each destination's teaching visa class.
    pub fn standard() -> Self {
        use RequirementPriority::{Critical, Warning};
        use RequirementRule::*;

        Self::new(vec![
            CountryRequirement {
                country: CountryCode::SouthKorea,
                predicates: vec![
                    predicate(
                        CitizenshipAmong(NATIVE_ENGLISH_PASSPORTS),
                        Critical,
                        "E-2 visas are limited to citizens of the seven recognized English-speaking countries",
                    ),
                    predicate(
                        MinimumAge(22),
                        Critical,
                        "Applicants must be at least 22 years old",
                    ),
                    predicate(
                        MaximumAge(62),
                        Warning,
                        "Public school programs rarely hire past age 62",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for an E-2 teaching visa",
                    ),
                    predicate(
                        MinimumExperienceYears(1),
                        Critical,
                        "At least one year of classroom teaching experience is required",
                    ),
                    predicate(
                        TeachingCertification,
                        Critical,
                        "A TEFL/TESOL certificate is required for hagwon and public school placements",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean national criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Critical,
                        "An apostilled criminal background check must be on file",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Japan,
                predicates: vec![
                    predicate(
                        MinimumAge(21),
                        Critical,
                        "Applicants must be at least 21 years old",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for instructor visa sponsorship",
                    ),
                    predicate(
                        TeachingCertification,
                        Warning,
                        "A TEFL certificate strengthens instructor visa sponsorship",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Warning,
                        "Schools typically request a background check during onboarding",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::China,
                predicates: vec![
                    predicate(
                        CitizenshipAmong(NATIVE_ENGLISH_PASSPORTS),
                        Critical,
                        "Z visas for language teachers are limited to native English speaking passports",
                    ),
                    predicate(
                        MinimumAge(21),
                        Critical,
                        "Applicants must be at least 21 years old",
                    ),
                    predicate(
                        MaximumAge(55),
                        Critical,
                        "Work permits for foreign teachers are capped at age 55",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for a Z visa",
                    ),
                    predicate(
                        MinimumExperienceYears(2),
                        Critical,
                        "Two years of post-graduation teaching experience are required",
                    ),
                    predicate(
                        TeachingCertification,
                        Critical,
                        "A 120-hour TEFL certificate is required",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Critical,
                        "An authenticated background check must be on file",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Taiwan,
                predicates: vec![
                    predicate(
                        MinimumAge(20),
                        Critical,
                        "Applicants must be at least 20 years old",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for a teaching work permit",
                    ),
                    predicate(
                        TeachingCertification,
                        Warning,
                        "Buxiban employers prefer TEFL-certified applicants",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Vietnam,
                predicates: vec![
                    predicate(
                        MinimumAge(21),
                        Critical,
                        "Applicants must be at least 21 years old",
                    ),
                    predicate(
                        MaximumAge(65),
                        Warning,
                        "Work permit renewals past age 65 need employer sponsorship review",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for a work permit",
                    ),
                    predicate(
                        TeachingCertification,
                        Critical,
                        "A TEFL/TESOL certificate is required for language center roles",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Thailand,
                predicates: vec![
                    predicate(
                        MinimumAge(20),
                        Critical,
                        "Applicants must be at least 20 years old",
                    ),
                    predicate(
                        MaximumAge(60),
                        Warning,
                        "Government school contracts rarely renew past age 60",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "A bachelor's degree is required for a teaching license waiver",
                    ),
                    predicate(
                        TeachingCertification,
                        Warning,
                        "A TEFL certificate improves school placement options",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Critical,
                        "A police clearance certificate must be on file",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::UnitedArabEmirates,
                predicates: vec![
                    predicate(
                        MinimumAge(21),
                        Critical,
                        "Applicants must be at least 21 years old",
                    ),
                    predicate(
                        MaximumAge(65),
                        Critical,
                        "Teaching licenses are not issued past age 65",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "An attested bachelor's degree is required",
                    ),
                    predicate(
                        MinimumExperienceYears(2),
                        Critical,
                        "Licensed schools require two years of teaching experience",
                    ),
                    predicate(
                        TeachingCertification,
                        Critical,
                        "A recognized teaching qualification is required",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::SaudiArabia,
                predicates: vec![
                    predicate(
                        MinimumAge(25),
                        Critical,
                        "Applicants must be at least 25 years old",
                    ),
                    predicate(
                        MaximumAge(60),
                        Critical,
                        "Block visas are not issued past age 60",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Critical,
                        "An attested bachelor's degree is required",
                    ),
                    predicate(
                        MinimumExperienceYears(2),
                        Critical,
                        "Two years of teaching experience are required",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Critical,
                        "An attested background check must be on file",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Spain,
                predicates: vec![
                    predicate(
                        MinimumAge(18),
                        Critical,
                        "Applicants must be at least 18 years old",
                    ),
                    predicate(
                        MaximumAge(60),
                        Warning,
                        "Language assistant programs prioritize applicants under 60",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Warning,
                        "Most language assistant programs expect a completed degree",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                    predicate(
                        ClearedBackgroundCheck,
                        Critical,
                        "A background check is required for the student visa dossier",
                    ),
                ],
            },
            CountryRequirement {
                country: CountryCode::Mexico,
                predicates: vec![
                    predicate(
                        MinimumAge(18),
                        Critical,
                        "Applicants must be at least 18 years old",
                    ),
                    predicate(
                        MinimumDegree(DegreeLevel::Bachelors),
                        Warning,
                        "Private schools prefer degree-holding applicants",
                    ),
                    predicate(
                        TeachingCertification,
                        Warning,
                        "A TEFL certificate improves placement options",
                    ),
                    predicate(
                        CleanCriminalRecord,
                        Critical,
                        "A clean criminal record is required",
                    ),
                ],
            },
        ])
    }
}

impl Default for RequirementCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
