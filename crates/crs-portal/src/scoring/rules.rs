use super::profile::{ApplicantProfile, EducationLevel};
use super::{CrsFactor, ScoreBreakdown, ScoreComponent, MAX_SCORE};

/// Inclusive age ranges, checked in order.
const AGE_BANDS: [(i32, i32, u32); 6] = [
    (20, 29, 110),
    (30, 31, 105),
    (32, 35, 100),
    (36, 39, 90),
    (40, 45, 80),
    (46, 47, 70),
];

/// `(minimum CLB, points)` pairs, highest threshold first.
const LANGUAGE_BANDS: [(f64, u32); 6] = [
    (9.0, 136),
    (8.0, 124),
    (7.0, 110),
    (6.0, 88),
    (5.0, 68),
    (4.0, 32),
];

const WORK_EXPERIENCE_BANDS: [(f64, u32); 4] = [(6.0, 80), (4.0, 70), (2.0, 60), (1.0, 40)];

const SPOUSE_LANGUAGE_BANDS: [(f64, u32); 3] = [(9.0, 20), (7.0, 16), (5.0, 8)];

const SPOUSE_WORK_EXPERIENCE_BANDS: [(f64, u32); 3] = [(5.0, 10), (3.0, 8), (1.0, 5)];

const JOB_OFFER_POINTS: u32 = 50;
const PROVINCIAL_NOMINATION_POINTS: u32 = 600;
const SIBLING_IN_CANADA_POINTS: u32 = 15;

pub(crate) fn age_points(age: Option<i32>) -> u32 {
    let Some(age) = age else {
        return 0;
    };
    AGE_BANDS
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&age))
        .map(|(_, _, points)| *points)
        .unwrap_or(0)
}

pub(crate) fn education_points(education: Option<EducationLevel>) -> u32 {
    match education {
        Some(EducationLevel::Secondary) => 30,
        Some(EducationLevel::Certificate) => 90,
        Some(EducationLevel::Diploma) => 98,
        Some(EducationLevel::Bachelor) => 120,
        Some(EducationLevel::Master) => 135,
        Some(EducationLevel::Phd) => 150,
        Some(EducationLevel::Other) | None => 0,
    }
}

pub(crate) fn spouse_education_points(education: EducationLevel) -> u32 {
    match education {
        EducationLevel::Secondary => 2,
        EducationLevel::Certificate => 6,
        EducationLevel::Diploma => 7,
        EducationLevel::Bachelor => 8,
        EducationLevel::Master | EducationLevel::Phd => 10,
        EducationLevel::Other => 0,
    }
}

/// Weakest skill after flooring each one. Missing or NaN scores count as zero.
pub(crate) fn clb_level(scores: [Option<f64>; 4]) -> f64 {
    scores
        .iter()
        .map(|score| {
            score
                .filter(|value| !value.is_nan())
                .unwrap_or(0.0)
                .floor()
        })
        .fold(f64::INFINITY, f64::min)
}

fn banded(value: f64, bands: &[(f64, u32)]) -> u32 {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub(crate) fn language_points(clb: f64) -> u32 {
    banded(clb, &LANGUAGE_BANDS)
}

pub(crate) fn work_experience_points(years: Option<f64>) -> u32 {
    years
        .map(|years| banded(years, &WORK_EXPERIENCE_BANDS))
        .unwrap_or(0)
}

fn is_answered(score: Option<f64>) -> bool {
    matches!(score, Some(value) if value != 0.0 && !value.is_nan())
}

/// Spouse language only counts once all four skills are answered.
pub(crate) fn spouse_language_points(scores: [Option<f64>; 4]) -> Option<u32> {
    if !scores.iter().all(|score| is_answered(*score)) {
        return None;
    }
    Some(banded(clb_level(scores), &SPOUSE_LANGUAGE_BANDS))
}

// A zero-year answer is indistinguishable from no answer; both fall below the first band.
pub(crate) fn spouse_work_experience_points(years: Option<f64>) -> u32 {
    years
        .map(|years| banded(years, &SPOUSE_WORK_EXPERIENCE_BANDS))
        .unwrap_or(0)
}

pub(crate) fn score_profile(profile: &ApplicantProfile) -> (Vec<ScoreComponent>, ScoreBreakdown) {
    let mut components = Vec::new();
    let mut core_factors: u32 = 0;
    let mut spouse_factors: u32 = 0;
    let mut additional_points: u32 = 0;

    let age = age_points(profile.age);
    components.push(ScoreComponent {
        factor: CrsFactor::Age,
        points: age,
        notes: match profile.age {
            Some(years) if age > 0 => format!("age {years} within scoring band"),
            Some(years) => format!("age {years} outside scoring bands"),
            None => "age not provided".to_string(),
        },
    });
    core_factors += age;

    let education = education_points(profile.education);
    components.push(ScoreComponent {
        factor: CrsFactor::Education,
        points: education,
        notes: match profile.education {
            Some(level) => format!("highest education: {level}"),
            None => "education not provided".to_string(),
        },
    });
    core_factors += education;

    let clb = clb_level(profile.english_scores());
    let language = language_points(clb);
    components.push(ScoreComponent {
        factor: CrsFactor::Language,
        points: language,
        notes: format!("English CLB {clb} (weakest skill)"),
    });
    core_factors += language;

    let work = work_experience_points(profile.work_experience);
    components.push(ScoreComponent {
        factor: CrsFactor::WorkExperience,
        points: work,
        notes: match profile.work_experience {
            Some(years) => format!("{years} year(s) of work experience"),
            None => "work experience not provided".to_string(),
        },
    });
    core_factors += work;

    // The spouse block is keyed on the spouse education answer as well as the flag.
    if let (true, Some(level)) = (profile.has_spouse, profile.spouse_education) {
        let education = spouse_education_points(level);
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseEducation,
            points: education,
            notes: format!("spouse education: {level}"),
        });
        spouse_factors += education;

        let scores = profile.spouse_english_scores();
        let language = spouse_language_points(scores);
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseLanguage,
            points: language.unwrap_or(0),
            notes: match language {
                Some(_) => format!("spouse English CLB {}", clb_level(scores)),
                None => "spouse language scores incomplete".to_string(),
            },
        });
        spouse_factors += language.unwrap_or(0);

        let work = spouse_work_experience_points(profile.spouse_work_experience);
        components.push(ScoreComponent {
            factor: CrsFactor::SpouseWorkExperience,
            points: work,
            notes: format!(
                "{} year(s) of spouse work experience",
                profile.spouse_work_experience.unwrap_or(0.0)
            ),
        });
        spouse_factors += work;
    }

    let bonuses = [
        (
            profile.job_offer,
            CrsFactor::JobOffer,
            JOB_OFFER_POINTS,
            "valid Canadian job offer",
        ),
        (
            profile.provincial_nomination,
            CrsFactor::ProvincialNomination,
            PROVINCIAL_NOMINATION_POINTS,
            "provincial nomination",
        ),
        (
            profile.sibling_in_canada,
            CrsFactor::SiblingInCanada,
            SIBLING_IN_CANADA_POINTS,
            "sibling who is a citizen or permanent resident",
        ),
    ];
    for (present, factor, points, note) in bonuses {
        if present {
            components.push(ScoreComponent {
                factor,
                points,
                notes: note.to_string(),
            });
            additional_points += points;
        }
    }

    let breakdown = ScoreBreakdown::from_parts(core_factors, spouse_factors, additional_points);
    debug_assert!(breakdown.total <= MAX_SCORE);

    (components, breakdown)
}
