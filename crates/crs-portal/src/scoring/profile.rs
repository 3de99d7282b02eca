use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Applicant answers captured by the CRS form. Every field is optional so partially
/// filled forms can be scored while the applicant is still typing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_education")]
    pub education: Option<EducationLevel>,
    #[serde(default, deserialize_with = "deserialize_answered_years")]
    pub work_experience: Option<f64>,
    #[serde(default)]
    pub english_listening: Option<f64>,
    #[serde(default)]
    pub english_reading: Option<f64>,
    #[serde(default)]
    pub english_writing: Option<f64>,
    #[serde(default)]
    pub english_speaking: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_spouse: bool,
    #[serde(default, deserialize_with = "deserialize_education")]
    pub spouse_education: Option<EducationLevel>,
    #[serde(default)]
    pub spouse_work_experience: Option<f64>,
    #[serde(default)]
    pub spouse_english_listening: Option<f64>,
    #[serde(default)]
    pub spouse_english_reading: Option<f64>,
    #[serde(default)]
    pub spouse_english_writing: Option<f64>,
    #[serde(default)]
    pub spouse_english_speaking: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub job_offer: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub provincial_nomination: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub sibling_in_canada: bool,
}

impl ApplicantProfile {
    pub(crate) fn english_scores(&self) -> [Option<f64>; 4] {
        [
            self.english_listening,
            self.english_reading,
            self.english_writing,
            self.english_speaking,
        ]
    }

    pub(crate) fn spouse_english_scores(&self) -> [Option<f64>; 4] {
        [
            self.spouse_english_listening,
            self.spouse_english_reading,
            self.spouse_english_writing,
            self.spouse_english_speaking,
        ]
    }
}

/// Highest completed education tier. Labels outside the table land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Secondary,
    Certificate,
    Diploma,
    Bachelor,
    Master,
    Phd,
    Other,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::Secondary => "secondary",
            EducationLevel::Certificate => "certificate",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Phd => "phd",
            EducationLevel::Other => "other",
        }
    }

    /// Parses a form value. Matching is exact, the same way the portal's lookup tables are keyed.
    pub fn from_label(value: &str) -> Self {
        match value {
            "secondary" => EducationLevel::Secondary,
            "certificate" => EducationLevel::Certificate,
            "diploma" => EducationLevel::Diploma,
            "bachelor" => EducationLevel::Bachelor,
            "master" => EducationLevel::Master,
            "phd" => EducationLevel::Phd,
            _ => EducationLevel::Other,
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EducationLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(EducationLevel::from_label(&raw))
    }
}

// An empty select box submits "", which counts as unanswered.
fn deserialize_education<'de, D>(deserializer: D) -> Result<Option<EducationLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .filter(|value| !value.is_empty())
        .map(|value| EducationLevel::from_label(&value)))
}

// Unchecked boxes may arrive as null.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// A cleared number input sends null: the question was seen, so it counts as zero years.
fn deserialize_answered_years<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_form_payload() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "age": 31,
            "education": "master",
            "workExperience": 4,
            "englishListening": 8.5,
            "hasSpouse": true,
            "spouseEducation": "phd",
            "jobOffer": true
        }))
        .expect("profile parses");

        assert_eq!(profile.age, Some(31));
        assert_eq!(profile.education, Some(EducationLevel::Master));
        assert_eq!(profile.work_experience, Some(4.0));
        assert_eq!(profile.english_listening, Some(8.5));
        assert_eq!(profile.english_reading, None);
        assert!(profile.has_spouse);
        assert_eq!(profile.spouse_education, Some(EducationLevel::Phd));
        assert!(profile.job_offer);
        assert!(!profile.provincial_nomination);
    }

    #[test]
    fn unknown_education_maps_to_other() {
        let profile: ApplicantProfile =
            serde_json::from_value(json!({ "education": "doctorate" })).expect("profile parses");
        assert_eq!(profile.education, Some(EducationLevel::Other));

        let profile: ApplicantProfile =
            serde_json::from_value(json!({ "education": "Bachelor" })).expect("profile parses");
        assert_eq!(profile.education, Some(EducationLevel::Other));
    }

    #[test]
    fn blank_or_null_education_is_absent() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "education": null,
            "spouseEducation": ""
        }))
        .expect("profile parses");
        assert_eq!(profile.education, None);
        assert_eq!(profile.spouse_education, None);
    }

    #[test]
    fn null_flags_read_as_unchecked() {
        let profile: ApplicantProfile = serde_json::from_value(json!({
            "hasSpouse": null,
            "jobOffer": null,
            "provincialNomination": true,
            "siblingInCanada": null
        }))
        .expect("profile parses");
        assert!(!profile.has_spouse);
        assert!(!profile.job_offer);
        assert!(profile.provincial_nomination);
        assert!(!profile.sibling_in_canada);
    }

    #[test]
    fn null_work_experience_is_answered_as_zero() {
        let cleared: ApplicantProfile =
            serde_json::from_value(json!({ "workExperience": null })).expect("profile parses");
        assert_eq!(cleared.work_experience, Some(0.0));

        let omitted: ApplicantProfile =
            serde_json::from_value(json!({})).expect("profile parses");
        assert_eq!(omitted.work_experience, None);
    }

    #[test]
    fn serializes_education_as_label() {
        let profile = ApplicantProfile {
            education: Some(EducationLevel::Phd),
            ..ApplicantProfile::default()
        };
        let value = serde_json::to_value(&profile).expect("serializes");
        assert_eq!(value["education"], json!("phd"));
        assert_eq!(value["hasSpouse"], json!(false));
    }
}
