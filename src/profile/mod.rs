//! Profile completion — how complete a user's matrimony profile is, and
//! which registration step they should resume at.
//!
//! Records are filled in piecemeal by the multi-step registration wizard
//! (intake field names) and later by the dashboard edit form (canonical
//! field names). `fields` reconciles the two naming schemes; `status` and
//! `steps` are pure functions over a profile snapshot; `session` owns the
//! live profile and recomputes both after every change.

pub mod fields;
pub mod model;
pub mod routes;
pub mod session;
pub mod status;
pub mod steps;

pub use fields::{FIELD_ALIASES, FieldAlias, ProfileField, is_filled, resolve_field};
pub use model::{ProfileStatus, UserProfile};
pub use routes::{ProfileRouteState, profile_routes};
pub use session::{ProfileSession, ProfileSnapshot};
pub use status::{TRACKED_FIELDS, classify, missing_fields};
pub use steps::{RegistrationStep, next_incomplete_step, next_registration_step};
