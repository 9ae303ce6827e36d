//! Registration wizard steps and the resume-point resolver.

use serde::{Deserialize, Serialize};

use super::fields::{ProfileField, field_is_filled};
use super::model::UserProfile;

/// The five ordered steps of the registration wizard.
///
/// Account (email verification + password) is satisfied by the profile
/// existing at all. Background (religion, caste, mother tongue) and Career
/// (education, profession) collect data but currently gate nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    Account = 1,
    Background = 2,
    Personal = 3,
    Career = 4,
    Lifestyle = 5,
}

/// Lifestyle arrays, re-checked after the walk.
const LIFESTYLE_FIELDS: [ProfileField; 3] = [
    ProfileField::Interests,
    ProfileField::PersonalityTraits,
    ProfileField::DietPreference,
];

impl RegistrationStep {
    pub const ALL: [RegistrationStep; 5] = [
        Self::Account,
        Self::Background,
        Self::Personal,
        Self::Career,
        Self::Lifestyle,
    ];

    /// 1-based position in the wizard.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Fields that must be filled before this step counts as done.
    pub fn required_fields(&self) -> &'static [ProfileField] {
        match self {
            Self::Account | Self::Background | Self::Career => &[],
            Self::Personal => &[ProfileField::MaritalStatus],
            Self::Lifestyle => &LIFESTYLE_FIELDS,
        }
    }

    fn is_satisfied_by(&self, profile: &UserProfile) -> bool {
        self.required_fields()
            .iter()
            .all(|f| field_is_filled(profile, *f))
    }
}

impl std::fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Account => "account",
            Self::Background => "background",
            Self::Personal => "personal",
            Self::Career => "career",
            Self::Lifestyle => "lifestyle",
        };
        write!(f, "{s}")
    }
}

/// Step the user should resume the wizard at, or `None` when nothing remains.
///
/// A missing profile, or one holding nothing beyond identity fields, has not
/// started the wizard and resumes at Background. Otherwise the first step
/// with unfilled required fields wins; steps without required fields are
/// never returned from the walk.
pub fn next_registration_step(profile: Option<&UserProfile>) -> Option<RegistrationStep> {
    let Some(profile) = profile else {
        return Some(RegistrationStep::Background);
    };

    if !has_registration_data(profile) {
        return Some(RegistrationStep::Background);
    }

    let pending = RegistrationStep::ALL
        .into_iter()
        .filter(|s| *s > RegistrationStep::Account)
        .find(|s| !s.required_fields().is_empty() && !s.is_satisfied_by(profile));
    if pending.is_some() {
        return pending;
    }

    if LIFESTYLE_FIELDS.iter().any(|f| !field_is_filled(profile, *f)) {
        return Some(RegistrationStep::Lifestyle);
    }

    None
}

/// Numeric resume point: `2..=5`, or `0` when every step is done.
pub fn next_incomplete_step(profile: Option<&UserProfile>) -> u8 {
    next_registration_step(profile).map_or(0, |s| s.number())
}

fn has_registration_data(profile: &UserProfile) -> bool {
    ProfileField::ALL
        .iter()
        .filter(|f| !f.is_identity())
        .any(|f| field_is_filled(profile, *f))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn profile(value: Value) -> UserProfile {
        UserProfile::try_from(value).unwrap()
    }

    #[test]
    fn steps_are_numbered_in_order() {
        let numbers: Vec<u8> = RegistrationStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn no_profile_resumes_at_step_two() {
        assert_eq!(next_incomplete_step(None), 2);
        assert_eq!(next_registration_step(None), Some(RegistrationStep::Background));
    }

    #[test]
    fn fresh_signup_resumes_at_step_two() {
        let p = profile(json!({"email": "a@b.com", "name": "A"}));
        assert_eq!(next_incomplete_step(Some(&p)), 2);

        let p = profile(json!({"email": "a@b.com", "fullName": "A", "otpVerified": true}));
        assert_eq!(next_incomplete_step(Some(&p)), 2);
    }

    #[test]
    fn blank_values_do_not_count_as_started() {
        let p = profile(json!({"email": "a@b.com", "gender": "", "interests": []}));
        assert_eq!(next_incomplete_step(Some(&p)), 2);
    }

    #[test]
    fn byte_order_mark_alone_does_not_count_as_started() {
        let p = profile(json!({"email": "a@b.com", "gender": "\u{FEFF}"}));
        assert_eq!(next_incomplete_step(Some(&p)), 2);
    }

    #[test]
    fn started_without_marital_status_resumes_at_step_three() {
        let p = profile(json!({"email": "a@b.com", "gender": "female", "dob": "1990-01-01"}));
        assert_eq!(next_incomplete_step(Some(&p)), 3);
    }

    #[test]
    fn marital_status_filled_but_lifestyle_missing_is_step_five() {
        let p = profile(json!({"email": "a@b.com", "maritalStatus": "single"}));
        assert_eq!(next_incomplete_step(Some(&p)), 5);
    }

    #[test]
    fn earlier_step_wins_over_later() {
        let p = profile(json!({"gender": "male", "interests": ["x"]}));
        assert_eq!(next_incomplete_step(Some(&p)), 3);
    }

    #[test]
    fn empty_interests_resume_at_step_five() {
        let p = profile(json!({
            "accountFor": "self",
            "fullName": "A",
            "gender": "male",
            "dateOfBirth": "1990-01-01",
            "heightCm": 170,
            "weightKg": 65,
            "maritalStatus": "single",
            "course": "BA",
            "interests": [],
            "personalityTraits": ["y"],
            "dietPreference": ["z"]
        }));
        assert_eq!(next_incomplete_step(Some(&p)), 5);
    }

    #[test]
    fn legacy_shaped_complete_profile_has_no_steps_left() {
        let p = profile(json!({
            "accountFor": "self",
            "fullName": "A",
            "gender": "male",
            "dob": "1990-01-01",
            "language": "hi",
            "height": "170",
            "weight": "65",
            "maritalStatus": "single",
            "education": "BA",
            "interests": ["x"],
            "traits": ["y"],
            "diets": ["z"]
        }));
        assert_eq!(next_incomplete_step(Some(&p)), 0);
        assert_eq!(next_registration_step(Some(&p)), None);
    }

    #[test]
    fn steps_without_requirements_are_never_returned() {
        // Religion, education, profession all absent.
        let p = profile(json!({
            "maritalStatus": "single",
            "interests": ["x"],
            "traits": ["y"],
            "diets": ["z"]
        }));
        assert_eq!(next_incomplete_step(Some(&p)), 0);
    }

    #[test]
    fn result_is_always_in_range() {
        let samples = [
            json!({}),
            json!({"email": "a@b.com"}),
            json!({"maritalStatus": "single"}),
            json!({"maritalStatus": "single", "interests": ["x"], "traits": ["y"], "diets": ["z"]}),
            json!({"height": 0}),
        ];
        for raw in samples {
            let step = next_incomplete_step(Some(&profile(raw)));
            assert!(matches!(step, 0 | 2 | 3 | 4 | 5), "unexpected step {step}");
        }
    }

    #[test]
    fn resolution_is_repeatable() {
        let p = profile(json!({"maritalStatus": "single", "diets": ["veg"]}));
        assert_eq!(next_incomplete_step(Some(&p)), next_incomplete_step(Some(&p)));
    }

    #[test]
    fn required_fields_per_step() {
        assert!(RegistrationStep::Account.required_fields().is_empty());
        assert!(RegistrationStep::Background.required_fields().is_empty());
        assert_eq!(
            RegistrationStep::Personal.required_fields(),
            &[ProfileField::MaritalStatus]
        );
        assert!(RegistrationStep::Career.required_fields().is_empty());
        assert_eq!(RegistrationStep::Lifestyle.required_fields().len(), 3);
    }

    #[test]
    fn display_matches_serde() {
        for step in RegistrationStep::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json);
        }
    }
}
