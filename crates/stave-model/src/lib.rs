//! Document records for Stave.
//!
//! Collection payloads hold id-keyed records: automation events, piano
//! notes, clips, and timeline markers. Each record type implements
//! [`Record`], which ties it to a [`CollectionKind`](stave_types::CollectionKind),
//! its tree encoding, and the fields whose change counts as a modification.
//!
//! [`RecordSet`] is the id-keyed arena the diff and merge primitives operate
//! on. [`scalar`] builds and reads the single-value payloads (track path,
//! colour, instrument, controller, time signature, project info fields).

pub mod clip;
pub mod event;
pub mod note;
pub mod record;
pub mod scalar;
pub mod set;
pub mod timeline;

pub use clip::Clip;
pub use event::AutomationEvent;
pub use note::Note;
pub use record::Record;
pub use set::RecordSet;
pub use timeline::{Annotation, KeySignature, TimeSignature};
