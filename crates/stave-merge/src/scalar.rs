//! Last-write-wins merge for scalar delta types.
//!
//! A scalar merge never inspects the state value: the changes payload
//! replaces it wholesale.

use stave_tree::SerializedTree;

/// Signature shared by all scalar merge functions: `(state, changes)`.
pub type ScalarMergeFn = fn(Option<&SerializedTree>, &SerializedTree) -> SerializedTree;

fn last_write_wins(_state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    changes.clone()
}

pub fn merge_path(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_colour(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_instrument(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_controller(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_time_signature(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_title(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_author(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_description(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

pub fn merge_license(state: Option<&SerializedTree>, changes: &SerializedTree) -> SerializedTree {
    last_write_wins(state, changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_model::scalar;
    use stave_types::DeltaType;

    #[test]
    fn changes_win() {
        let merged = merge_path(Some(&scalar::track_path("A")), &scalar::track_path("B"));
        assert_eq!(scalar::read_path(&merged), Some("B"));
    }

    #[test]
    fn missing_state_takes_changes() {
        let merged = merge_time_signature(None, &scalar::track_time_signature(7, 8));
        assert_eq!(scalar::read_time_signature(&merged), Some((7, 8)));
    }

    #[test]
    fn equal_values_are_unchanged() {
        let value = scalar::project_text(DeltaType::ProjectAuthor, "Ada");
        assert_eq!(merge_author(Some(&value), &value), value);
    }

    #[test]
    fn default_changes_clear_the_value() {
        let merged = merge_colour(
            Some(&scalar::track_colour(0xff11_2233)),
            &scalar::default_payload(DeltaType::TrackColour),
        );
        assert_eq!(scalar::read_colour(&merged), None);
    }
}
