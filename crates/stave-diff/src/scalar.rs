//! Diff functions for scalar delta types.
//!
//! Scalars are atomic: whenever the value differs, the diff carries a full
//! copy of the changes-side payload. There is no field-level diffing inside
//! a scalar value.

use stave_tree::SerializedTree;
use stave_types::{DeltaDescription, DeltaType};

use crate::delta_diff::DeltaDiff;

/// Signature shared by all scalar diff functions: `(state, changes)`.
pub type ScalarDiffFn = fn(Option<&SerializedTree>, &SerializedTree) -> DeltaDiff;

fn replace_with(delta_type: DeltaType, description: &str, changes: &SerializedTree) -> DeltaDiff {
    DeltaDiff::from_parts(delta_type, DeltaDescription::new(description), changes.clone())
}

pub fn create_path_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::TrackPath, "path changed", changes)
}

pub fn create_colour_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::TrackColour, "colour changed", changes)
}

pub fn create_instrument_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::TrackInstrument, "instrument changed", changes)
}

pub fn create_controller_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::TrackController, "controller changed", changes)
}

pub fn create_time_signature_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::TrackTimeSignature, "time signature changed", changes)
}

pub fn create_title_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::ProjectTitle, "title changed", changes)
}

pub fn create_author_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::ProjectAuthor, "author changed", changes)
}

pub fn create_description_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::ProjectDescription, "description changed", changes)
}

pub fn create_license_diff(_state: Option<&SerializedTree>, changes: &SerializedTree) -> DeltaDiff {
    replace_with(DeltaType::ProjectLicense, "license changed", changes)
}
