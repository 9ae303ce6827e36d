//! Profile completion status: BASIC until every tracked field is filled.

use super::fields::{ProfileField, field_is_filled};
use super::model::{ProfileStatus, UserProfile};

/// Fields that must all be filled for a profile to count as COMPLETED.
///
/// `physicallyChallenged`, `profession`, `income` and `preferredLanguage`
/// are part of the profile but deliberately not required.
pub const TRACKED_FIELDS: [ProfileField; 11] = [
    ProfileField::AccountFor,
    ProfileField::FullName,
    ProfileField::Gender,
    ProfileField::DateOfBirth,
    ProfileField::HeightCm,
    ProfileField::WeightKg,
    ProfileField::MaritalStatus,
    ProfileField::Course,
    ProfileField::Interests,
    ProfileField::PersonalityTraits,
    ProfileField::DietPreference,
];

/// Classify a profile. No profile, or any tracked field unfilled, is BASIC.
pub fn classify(profile: Option<&UserProfile>) -> ProfileStatus {
    match profile {
        Some(p) if TRACKED_FIELDS.iter().all(|f| field_is_filled(p, *f)) => {
            ProfileStatus::Completed
        }
        _ => ProfileStatus::Basic,
    }
}

/// Tracked fields still unfilled, in declaration order. Every tracked field
/// is missing when there is no profile.
pub fn missing_fields(profile: Option<&UserProfile>) -> Vec<ProfileField> {
    match profile {
        Some(p) => TRACKED_FIELDS
            .iter()
            .copied()
            .filter(|f| !field_is_filled(p, *f))
            .collect(),
        None => TRACKED_FIELDS.to_vec(),
    }
}
