use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::DegreeLevel;
use super::RosterImportError;

/// One fully typed roster row, before assembly into a match candidate.
#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) teacher_id: String,
    pub(crate) full_name: String,
    pub(crate) birth_date: Option<NaiveDate>,
    pub(crate) citizenship: Option<String>,
    pub(crate) highest_degree: Option<DegreeLevel>,
    pub(crate) years_experience: Option<u8>,
    pub(crate) has_teaching_certification: bool,
    pub(crate) background_check_cleared: bool,
    pub(crate) has_criminal_record: bool,
    pub(crate) min_salary_usd: Option<u32>,
    pub(crate) subjects: Vec<String>,
    pub(crate) preferred_countries: Vec<String>,
    pub(crate) video_quality_score: Option<f32>,
    pub(crate) similarity: f32,
    pub(crate) last_contacted_at: Option<DateTime<Utc>>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        // Header occupies line 1; the first data row is line 2.
        let line = index + 2;
        let row = row?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Teacher ID")]
    teacher_id: String,
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Birth Date", default, deserialize_with = "empty_string_as_none")]
    birth_date: Option<String>,
    #[serde(rename = "Citizenship", default, deserialize_with = "empty_string_as_none")]
    citizenship: Option<String>,
    #[serde(
        rename = "Highest Degree",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    highest_degree: Option<String>,
    #[serde(
        rename = "Years Experience",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    years_experience: Option<String>,
    #[serde(
        rename = "Teaching Certification",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    teaching_certification: Option<String>,
    #[serde(
        rename = "Background Check",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    background_check: Option<String>,
    #[serde(
        rename = "Criminal Record",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    criminal_record: Option<String>,
    #[serde(
        rename = "Min Salary USD",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    min_salary_usd: Option<String>,
    #[serde(rename = "Subjects", default, deserialize_with = "empty_string_as_none")]
    subjects: Option<String>,
    #[serde(
        rename = "Preferred Countries",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    preferred_countries: Option<String>,
    #[serde(
        rename = "Video Quality",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    video_quality: Option<String>,
    #[serde(rename = "Similarity", default, deserialize_with = "empty_string_as_none")]
    similarity: Option<String>,
    #[serde(
        rename = "Last Contacted",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_contacted: Option<String>,
}

impl RosterRow {
    fn into_record(self, line: usize) -> Result<RosterRecord, RosterImportError> {
        let row_error = |message: String| RosterImportError::Row { line, message };

        if self.teacher_id.is_empty() {
            return Err(row_error("Teacher ID is empty".to_string()));
        }

        let birth_date = self
            .birth_date
            .as_deref()
            .map(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|err| row_error(format!("invalid Birth Date '{value}': {err}")))
            })
            .transpose()?;

        let highest_degree = self
            .highest_degree
            .as_deref()
            .map(|value| {
                parse_degree(value)
                    .ok_or_else(|| row_error(format!("unknown Highest Degree '{value}'")))
            })
            .transpose()?;

        let years_experience = self
            .years_experience
            .as_deref()
            .map(|value| {
                value
                    .parse::<u8>()
                    .map_err(|_| row_error(format!("invalid Years Experience '{value}'")))
            })
            .transpose()?;

        let min_salary_usd = self
            .min_salary_usd
            .as_deref()
            .map(|value| {
                value
                    .parse::<u32>()
                    .map_err(|_| row_error(format!("invalid Min Salary USD '{value}'")))
            })
            .transpose()?;

        let video_quality_score = self
            .video_quality
            .as_deref()
            .map(|value| {
                value
                    .parse::<f32>()
                    .map_err(|_| row_error(format!("invalid Video Quality '{value}'")))
            })
            .transpose()?;

        let similarity = self
            .similarity
            .as_deref()
            .map(|value| {
                value
                    .parse::<f32>()
                    .map_err(|_| row_error(format!("invalid Similarity '{value}'")))
            })
            .transpose()?
            .unwrap_or(0.0);

        let last_contacted_at = self
            .last_contacted
            .as_deref()
            .map(|value| {
                parse_timestamp(value)
                    .ok_or_else(|| row_error(format!("invalid Last Contacted '{value}'")))
            })
            .transpose()?;

        Ok(RosterRecord {
            teacher_id: self.teacher_id,
            full_name: self.full_name,
            birth_date,
            citizenship: self.citizenship,
            highest_degree,
            years_experience,
            has_teaching_certification: parse_flag(self.teaching_certification.as_deref()),
            background_check_cleared: parse_flag(self.background_check.as_deref()),
            has_criminal_record: parse_flag(self.criminal_record.as_deref()),
            min_salary_usd,
            subjects: split_list(self.subjects.as_deref()),
            preferred_countries: split_list(self.preferred_countries.as_deref()),
            video_quality_score,
            similarity,
            last_contacted_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_degree(value: &str) -> Option<DegreeLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "associate" | "associates" | "associate's" => Some(DegreeLevel::Associate),
        "bachelor" | "bachelors" | "bachelor's" | "ba" | "bs" => Some(DegreeLevel::Bachelors),
        "master" | "masters" | "master's" | "ma" | "msc" => Some(DegreeLevel::Masters),
        "doctorate" | "phd" | "edd" => Some(DegreeLevel::Doctorate),
        _ => None,
    }
}

/// ATS exports vary between yes/no, true/false, and 1/0; anything else
/// (or an empty cell) counts as unset.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|cell| {
            cell.split(';')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
