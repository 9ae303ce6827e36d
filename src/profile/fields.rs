//! Logical profile fields, their intake aliases, and value resolution.

use serde_json::Value;

use super::model::UserProfile;

/// A logical attribute of a user profile, named by its canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Email,
    Name,
    FullName,
    AccountFor,
    Gender,
    DateOfBirth,
    PreferredLanguage,
    HeightCm,
    WeightKg,
    MaritalStatus,
    PhysicallyChallenged,
    Course,
    Profession,
    Income,
    Interests,
    PersonalityTraits,
    DietPreference,
}

impl ProfileField {
    pub const ALL: [ProfileField; 17] = [
        Self::Email,
        Self::Name,
        Self::FullName,
        Self::AccountFor,
        Self::Gender,
        Self::DateOfBirth,
        Self::PreferredLanguage,
        Self::HeightCm,
        Self::WeightKg,
        Self::MaritalStatus,
        Self::PhysicallyChallenged,
        Self::Course,
        Self::Profession,
        Self::Income,
        Self::Interests,
        Self::PersonalityTraits,
        Self::DietPreference,
    ];

    /// Canonical JSON key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::FullName => "fullName",
            Self::AccountFor => "accountFor",
            Self::Gender => "gender",
            Self::DateOfBirth => "dateOfBirth",
            Self::PreferredLanguage => "preferredLanguage",
            Self::HeightCm => "heightCm",
            Self::WeightKg => "weightKg",
            Self::MaritalStatus => "maritalStatus",
            Self::PhysicallyChallenged => "physicallyChallenged",
            Self::Course => "course",
            Self::Profession => "profession",
            Self::Income => "income",
            Self::Interests => "interests",
            Self::PersonalityTraits => "personalityTraits",
            Self::DietPreference => "dietPreference",
        }
    }

    /// Fields captured when the account is created, before the wizard starts.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Email | Self::Name | Self::FullName)
    }

    /// Intake aliases for this field, in precedence order.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        self.aliases_in(FIELD_ALIASES)
    }

    fn aliases_in(self, table: &[FieldAlias]) -> impl Iterator<Item = &'static str> + '_ {
        table
            .iter()
            .filter(move |a| a.canonical == self)
            .map(|a| a.alias)
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// An intake-wizard key that stores the same attribute as a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub canonical: ProfileField,
    pub alias: &'static str,
}

/// Intake aliases, in lookup order. When several aliases target the same
/// canonical field, the first one present on the profile wins.
pub static FIELD_ALIASES: &[FieldAlias] = &[
    FieldAlias { canonical: ProfileField::DateOfBirth, alias: "dob" },
    FieldAlias { canonical: ProfileField::PreferredLanguage, alias: "language" },
    FieldAlias { canonical: ProfileField::HeightCm, alias: "height" },
    FieldAlias { canonical: ProfileField::WeightKg, alias: "weight" },
    FieldAlias { canonical: ProfileField::Course, alias: "education" },
    FieldAlias { canonical: ProfileField::PersonalityTraits, alias: "traits" },
    FieldAlias { canonical: ProfileField::DietPreference, alias: "diets" },
];

/// Whether a value counts as provided.
///
/// Absent and `null` are not filled; strings must have non-whitespace
/// content (a lone byte-order mark is blank too); arrays need at least one element. Numbers, booleans and objects
/// are always filled, so `0` and `false` are legitimate answers.
pub fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim_matches(is_blank).is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Whitespace, plus the byte-order mark browsers leave in pasted text.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Effective value of `field`: the canonical key if present (even when
/// empty), otherwise the first alias present on the profile.
pub fn resolve_field(profile: &UserProfile, field: ProfileField) -> Option<&Value> {
    profile
        .get(field.key())
        .or_else(|| field.aliases().find_map(|alias| profile.get(alias)))
}

/// Resolve `field` and apply [`is_filled`].
pub fn field_is_filled(profile: &UserProfile, field: ProfileField) -> bool {
    is_filled(resolve_field(profile, field))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn profile(value: Value) -> UserProfile {
        UserProfile::try_from(value).unwrap()
    }

    #[test]
    fn filled_predicate() {
        assert!(!is_filled(None));
        assert!(!is_filled(Some(&json!(null))));
        assert!(!is_filled(Some(&json!(""))));
        assert!(!is_filled(Some(&json!("   \t"))));
        assert!(!is_filled(Some(&json!([]))));
        assert!(!is_filled(Some(&json!("\u{FEFF}"))));
        assert!(!is_filled(Some(&json!(" \u{FEFF}\n"))));
        assert!(is_filled(Some(&json!("\u{FEFF}x"))));

        assert!(is_filled(Some(&json!("x"))));
        assert!(is_filled(Some(&json!([""]))));
        assert!(is_filled(Some(&json!(0))));
        assert!(is_filled(Some(&json!(false))));
        assert!(is_filled(Some(&json!({}))));
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = ProfileField::ALL.iter().map(|f| f.key()).collect();
        keys.extend(FIELD_ALIASES.iter().map(|a| a.alias));
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn alias_table_matches_field_names() {
        let pairs: Vec<(&str, &str)> = FIELD_ALIASES
            .iter()
            .map(|a| (a.canonical.key(), a.alias))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("dateOfBirth", "dob"),
                ("preferredLanguage", "language"),
                ("heightCm", "height"),
                ("weightKg", "weight"),
                ("course", "education"),
                ("personalityTraits", "traits"),
                ("dietPreference", "diets"),
            ]
        );
        assert_eq!(ProfileField::Course.aliases().collect::<Vec<_>>(), vec!["education"]);
        assert_eq!(ProfileField::MaritalStatus.aliases().count(), 0);
    }

    #[test]
    fn canonical_key_wins_even_when_empty() {
        let p = profile(json!({"dateOfBirth": "", "dob": "1990-01-01"}));
        assert_eq!(resolve_field(&p, ProfileField::DateOfBirth), Some(&json!("")));
        assert!(!field_is_filled(&p, ProfileField::DateOfBirth));
    }

    #[test]
    fn canonical_key_wins_over_empty_alias() {
        let p = profile(json!({"dob": "", "dateOfBirth": "1990-01-01"}));
        assert_eq!(
            resolve_field(&p, ProfileField::DateOfBirth),
            Some(&json!("1990-01-01"))
        );
        assert!(field_is_filled(&p, ProfileField::DateOfBirth));
    }

    #[test]
    fn alias_used_when_canonical_absent() {
        let p = profile(json!({"traits": ["calm"], "height": 170}));
        assert_eq!(
            resolve_field(&p, ProfileField::PersonalityTraits),
            Some(&json!(["calm"]))
        );
        assert_eq!(resolve_field(&p, ProfileField::HeightCm), Some(&json!(170)));
    }

    #[test]
    fn explicit_null_canonical_blocks_alias() {
        let p = profile(json!({"heightCm": null, "height": "170"}));
        assert_eq!(resolve_field(&p, ProfileField::HeightCm), Some(&Value::Null));
        assert!(!field_is_filled(&p, ProfileField::HeightCm));
    }

    #[test]
    fn missing_everywhere_resolves_to_none() {
        let p = profile(json!({"email": "a@b.com"}));
        assert!(resolve_field(&p, ProfileField::Course).is_none());
        assert!(resolve_field(&p, ProfileField::MaritalStatus).is_none());
    }

    #[test]
    fn first_declared_alias_wins() {
        let table = [
            FieldAlias { canonical: ProfileField::Course, alias: "education" },
            FieldAlias { canonical: ProfileField::Course, alias: "degree" },
        ];
        let lookup = |p: &UserProfile| {
            ProfileField::Course
                .aliases_in(&table)
                .find_map(|alias| p.get(alias).cloned())
        };

        let both = profile(json!({"degree": "MSc", "education": "BA"}));
        assert_eq!(lookup(&both), Some(json!("BA")));

        let second_only = profile(json!({"degree": "MSc"}));
        assert_eq!(lookup(&second_only), Some(json!("MSc")));
        assert_eq!(ProfileField::Gender.aliases_in(&table).count(), 0);
    }

    #[test]
    fn aliases_do_not_leak_across_fields() {
        let p = profile(json!({"weight": "60"}));
        assert!(resolve_field(&p, ProfileField::HeightCm).is_none());
        assert!(field_is_filled(&p, ProfileField::WeightKg));
    }
}
