use serde::{Deserialize, Serialize};

use crate::error::DraftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeminarId(pub i64);

/// A seminar record exactly as the remote collection returns it. `date` and
/// `time` keep whatever strings the remote supplied; the client never parses
/// or reformats them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seminar {
    pub id: SeminarId,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub photo: String,
}

/// The five editable fields of a seminar, the typed input to an update.
/// Updates are full replacements, so every field must be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub photo: String,
}

impl SeminarDraft {
    /// Trims every field and rejects any draft with a blank field. A blank
    /// field in a full-replace update would wipe remote data, not keep the
    /// old value.
    pub fn validated(self) -> Result<Self, DraftError> {
        let draft = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            photo: self.photo.trim().to_string(),
        };

        if draft.title.is_empty() {
            return Err(DraftError::empty("title"));
        }
        if draft.description.is_empty() {
            return Err(DraftError::empty("description"));
        }
        if draft.date.is_empty() {
            return Err(DraftError::empty("date"));
        }
        if draft.time.is_empty() {
            return Err(DraftError::empty("time"));
        }
        if draft.photo.is_empty() {
            return Err(DraftError::empty("photo"));
        }

        Ok(draft)
    }

    /// Combines the draft with a remote-assigned id into the full record
    /// sent as the update body.
    pub fn into_seminar(self, id: SeminarId) -> Seminar {
        Seminar {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            photo: self.photo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SeminarDraft {
        SeminarDraft {
            title: "Intro to async Rust".to_string(),
            description: "Futures, executors, pitfalls".to_string(),
            date: "2025-03-01".to_string(),
            time: "10:00".to_string(),
            photo: "/photos/async.jpg".to_string(),
        }
    }

    #[test]
    fn validated_trims_surrounding_whitespace() {
        let mut raw = draft();
        raw.title = "  Intro to async Rust \n".to_string();
        raw.time = "\t10:00".to_string();

        let clean = raw.validated().expect("valid draft");
        assert_eq!(clean.title, "Intro to async Rust");
        assert_eq!(clean.time, "10:00");
    }

    #[test]
    fn validated_rejects_blank_fields() {
        let mut raw = draft();
        raw.description = "   ".to_string();

        let err = raw.validated().expect_err("blank description");
        assert_eq!(err.field, "description");
    }

    #[test]
    fn seminar_wire_shape_is_the_six_field_object() {
        let record = draft().into_seminar(SeminarId(7));
        let value = serde_json::to_value(&record).expect("serialize");
        let object = value.as_object().expect("object");

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["date", "description", "id", "photo", "time", "title"]
        );
        assert_eq!(object["id"], 7);
    }
}
