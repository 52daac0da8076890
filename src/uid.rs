//! Generation of unique identifiers for derived DICOM objects.

use crate::types::UI;
use uuid::Uuid;

/// Root under which all UIDs generated by this crate are placed.
/// `2.25` is the UUID-derived root defined by the DICOM standard: the UID is
/// a randomly generated UUID represented as a single integer value.
pub const UID_ROOT: &str = "2.25";

/// Generates a fresh, globally unique DICOM UID.
///
/// Each call draws a new random UUID, so the returned value is unique per
/// invocation. The result is at most 44 characters, within the 64-character
/// limit of the UI value representation.
pub fn generate_uid() -> UI {
	format!("{UID_ROOT}.{}", Uuid::new_v4().as_u128())
}
