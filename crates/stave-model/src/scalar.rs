//! Single-value payloads.
//!
//! Scalar deltas carry one atomic value in the attributes of their payload
//! root. The builders here produce those payloads; the readers return `None`
//! for an absent or default payload.

use stave_tree::{schema, SerializedTree};
use stave_types::DeltaType;

/// The default (empty) payload of a delta type.
pub fn default_payload(delta_type: DeltaType) -> SerializedTree {
    SerializedTree::new(delta_type.as_str())
}

pub fn track_path(path: &str) -> SerializedTree {
    default_payload(DeltaType::TrackPath).with_attribute(schema::PATH, path)
}

/// Track colour as ARGB.
pub fn track_colour(argb: u32) -> SerializedTree {
    default_payload(DeltaType::TrackColour).with_attribute(schema::COLOUR, argb)
}

pub fn track_instrument(instrument_id: &str) -> SerializedTree {
    default_payload(DeltaType::TrackInstrument).with_attribute(schema::INSTRUMENT_ID, instrument_id)
}

/// MIDI controller number an automation track drives.
pub fn track_controller(controller: i32) -> SerializedTree {
    default_payload(DeltaType::TrackController).with_attribute(schema::CONTROLLER, controller)
}

pub fn track_time_signature(numerator: i32, denominator: i32) -> SerializedTree {
    default_payload(DeltaType::TrackTimeSignature)
        .with_attribute(schema::NUMERATOR, numerator)
        .with_attribute(schema::DENOMINATOR, denominator)
}

/// A text-valued project info payload (title, author, description, license).
pub fn project_text(delta_type: DeltaType, text: &str) -> SerializedTree {
    default_payload(delta_type).with_attribute(schema::VALUE, text)
}

pub fn read_path(payload: &SerializedTree) -> Option<&str> {
    payload.get_str(schema::PATH)
}

pub fn read_colour(payload: &SerializedTree) -> Option<u32> {
    payload
        .get_i64(schema::COLOUR)
        .and_then(|c| u32::try_from(c).ok())
}

pub fn read_instrument(payload: &SerializedTree) -> Option<&str> {
    payload.get_str(schema::INSTRUMENT_ID)
}

pub fn read_controller(payload: &SerializedTree) -> Option<i32> {
    payload
        .get_i64(schema::CONTROLLER)
        .and_then(|c| i32::try_from(c).ok())
}

/// `(numerator, denominator)`; both attributes must be present.
pub fn read_time_signature(payload: &SerializedTree) -> Option<(i32, i32)> {
    let numerator = payload.get_i64(schema::NUMERATOR)?;
    let denominator = payload.get_i64(schema::DENOMINATOR)?;
    Some((i32::try_from(numerator).ok()?, i32::try_from(denominator).ok()?))
}

pub fn read_text(payload: &SerializedTree) -> Option<&str> {
    payload.get_str(schema::VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_tag_is_delta_type_tag() {
        assert_eq!(track_path("Lead").tag(), "trackPath");
        assert_eq!(track_controller(7).tag(), "trackController");
        assert_eq!(project_text(DeltaType::ProjectTitle, "Song").tag(), "projectTitle");
    }

    #[test]
    fn readers_return_written_values() {
        assert_eq!(read_path(&track_path("Lead")), Some("Lead"));
        assert_eq!(read_colour(&track_colour(0xff00_ff00)), Some(0xff00_ff00));
        assert_eq!(read_instrument(&track_instrument("piano-1")), Some("piano-1"));
        assert_eq!(read_controller(&track_controller(11)), Some(11));
        assert_eq!(read_time_signature(&track_time_signature(6, 8)), Some((6, 8)));
        assert_eq!(
            read_text(&project_text(DeltaType::ProjectLicense, "CC-BY")),
            Some("CC-BY")
        );
    }

    #[test]
    fn default_payload_reads_as_absent() {
        let empty = default_payload(DeltaType::TrackTimeSignature);
        assert!(empty.is_empty());
        assert_eq!(read_time_signature(&empty), None);
        assert_eq!(read_path(&default_payload(DeltaType::TrackPath)), None);
    }
}
