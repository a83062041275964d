use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for teachers registered on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub String);

/// Destination countries with a maintained visa requirement catalog.
///
/// Variants are ordered by ISO code so `BTreeMap` iteration and
/// [`CountryCode::ordered`] agree on a single deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "AE")]
    UnitedArabEmirates,
    #[serde(rename = "CN")]
    China,
    #[serde(rename = "ES")]
    Spain,
    #[serde(rename = "JP")]
    Japan,
    #[serde(rename = "KR")]
    SouthKorea,
    #[serde(rename = "MX")]
    Mexico,
    #[serde(rename = "SA")]
    SaudiArabia,
    #[serde(rename = "TH")]
    Thailand,
    #[serde(rename = "TW")]
    Taiwan,
    #[serde(rename = "VN")]
    Vietnam,
}

impl CountryCode {
    pub const fn code(self) -> &'static str {
        match self {
            CountryCode::UnitedArabEmirates => "AE",
            CountryCode::China => "CN",
            CountryCode::Spain => "ES",
            CountryCode::Japan => "JP",
            CountryCode::SouthKorea => "KR",
            CountryCode::Mexico => "MX",
            CountryCode::SaudiArabia => "SA",
            CountryCode::Thailand => "TH",
            CountryCode::Taiwan => "TW",
            CountryCode::Vietnam => "VN",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CountryCode::UnitedArabEmirates => "United Arab Emirates",
            CountryCode::China => "China",
            CountryCode::Spain => "Spain",
            CountryCode::Japan => "Japan",
            CountryCode::SouthKorea => "South Korea",
            CountryCode::Mexico => "Mexico",
            CountryCode::SaudiArabia => "Saudi Arabia",
            CountryCode::Thailand => "Thailand",
            CountryCode::Taiwan => "Taiwan",
            CountryCode::Vietnam => "Vietnam",
        }
    }

    pub fn ordered() -> [CountryCode; 10] {
        [
            CountryCode::UnitedArabEmirates,
            CountryCode::China,
            CountryCode::Spain,
            CountryCode::Japan,
            CountryCode::SouthKorea,
            CountryCode::Mexico,
            CountryCode::SaudiArabia,
            CountryCode::Thailand,
            CountryCode::Taiwan,
            CountryCode::Vietnam,
        ]
    }

    /// Parse a destination code as stored on job postings ("KR", "jp", ...).
    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AE" => Some(CountryCode::UnitedArabEmirates),
            "CN" => Some(CountryCode::China),
            "ES" => Some(CountryCode::Spain),
            "JP" => Some(CountryCode::Japan),
            "KR" => Some(CountryCode::SouthKorea),
            "MX" => Some(CountryCode::Mexico),
            "SA" => Some(CountryCode::SaudiArabia),
            "TH" => Some(CountryCode::Thailand),
            "TW" => Some(CountryCode::Taiwan),
            "VN" => Some(CountryCode::Vietnam),
            _ => None,
        }
    }
}

/// Highest completed academic credential, ordered low to high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DegreeLevel {
    Associate,
    Bachelors,
    Masters,
    Doctorate,
}

impl DegreeLevel {
    pub const fn label(self) -> &'static str {
        match self {
            DegreeLevel::Associate => "associate degree",
            DegreeLevel::Bachelors => "bachelor's degree",
            DegreeLevel::Masters => "master's degree",
            DegreeLevel::Doctorate => "doctorate",
        }
    }
}

/// Candidate snapshot consumed by the eligibility rules and filter stages.
///
/// Optional attributes are genuinely optional in stored profiles; a rule
/// that needs a missing attribute records a failed requirement instead of
/// raising an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub teacher_id: TeacherId,
    pub full_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// ISO 3166-1 alpha-2 citizenship code.
    #[serde(default)]
    pub citizenship: Option<String>,
    #[serde(default)]
    pub highest_degree: Option<DegreeLevel>,
    #[serde(default)]
    pub years_experience: Option<u8>,
    #[serde(default)]
    pub has_teaching_certification: bool,
    #[serde(default)]
    pub background_check_cleared: bool,
    #[serde(default)]
    pub has_criminal_record: bool,
    /// Destination codes the candidate opted into.
    #[serde(default)]
    pub preferred_countries: Vec<String>,
    #[serde(default)]
    pub min_salary_usd: Option<u32>,
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Reviewer score for the intro video, in [0, 1].
    #[serde(default)]
    pub video_quality_score: Option<f32>,
}

impl CandidateProfile {
    /// Whole years of age on the given date, if a birth date is on file.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        self.birth_date
            .and_then(|birth_date| date.years_since(birth_date))
    }
}

/// Job posting attributes consumed by the filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_id: String,
    pub school_name: String,
    /// Destination code as stored on the posting; not guaranteed supported.
    pub country: String,
    pub subject: String,
    pub salary_usd: u32,
    #[serde(default)]
    pub min_years_experience: u8,
}

/// A candidate joined with the externally computed similarity score and
/// outreach history, as produced for one job's match run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub profile: CandidateProfile,
    /// Pluggable similarity input in [0, 1]; clamped during scoring.
    pub similarity: f32,
    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,
    /// Set by the subject annotation stage; false until the pipeline runs.
    #[serde(default)]
    pub subject_match: bool,
    /// Set by the salary stage when the floor exceeds the offer but stays
    /// within tolerance.
    #[serde(default)]
    pub salary_stretch: bool,
}

impl MatchCandidate {
    pub fn new(profile: CandidateProfile, similarity: f32) -> Self {
        Self {
            profile,
            similarity,
            last_contacted_at: None,
            subject_match: false,
            salary_stretch: false,
        }
    }
}
