//! Tag and attribute names of the payload schema.
//!
//! Delta payload roots are tagged with the delta type tag (owned by
//! `stave-types`). The constants here name the record nodes found under
//! collection payloads and the attributes carried by records and scalar
//! payloads.

// Record node tags.
pub const AUTOMATION_EVENT: &str = "event";
pub const NOTE: &str = "note";
pub const CLIP: &str = "clip";
pub const ANNOTATION: &str = "annotation";
pub const KEY_SIGNATURE: &str = "keySignature";
pub const TIME_SIGNATURE: &str = "timeSignature";

// Record attributes.
pub const ID: &str = "id";
pub const BEAT: &str = "beat";
pub const CURVATURE: &str = "curve";
pub const CONTROLLER_VALUE: &str = "value";
pub const KEY: &str = "key";
pub const LENGTH: &str = "len";
pub const VELOCITY: &str = "vel";
pub const MUTE: &str = "mute";
pub const SOLO: &str = "solo";
pub const DESCRIPTION: &str = "text";
pub const COLOUR: &str = "colour";
pub const ROOT_KEY: &str = "root";
pub const SCALE: &str = "scale";
pub const NUMERATOR: &str = "numerator";
pub const DENOMINATOR: &str = "denominator";

// Scalar payload attributes.
pub const PATH: &str = "path";
pub const INSTRUMENT_ID: &str = "instrumentId";
pub const CONTROLLER: &str = "controller";
pub const VALUE: &str = "value";
