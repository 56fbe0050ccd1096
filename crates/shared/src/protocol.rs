//! Wire-level contact payloads for the REST contact API.
//!
//! On the wire, `tags` travels as one comma-joined string. It is split into
//! an ordered sequence on ingestion and rejoined on egress; the in-memory
//! [`Contact`] never sees the delimited form.

use serde::{Deserialize, Serialize};

use crate::domain::{Contact, ContactId};

/// One contact object as returned by `GET /api/contacts/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Contact {
            id: record.id,
            full_name: record.full_name,
            phone_number: record.phone_number,
            email: record.email,
            tags: split_tags(record.tags.as_deref().unwrap_or_default()),
        }
    }
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        ContactRecord {
            id: contact.id,
            full_name: contact.full_name.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
            tags: if contact.tags.is_empty() {
                None
            } else {
                Some(join_tags(&contact.tags))
            },
        }
    }
}

/// The full set of values a submitted contact form carries, with tags
/// already comma-joined. Serializes to the form-encoded create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub tags: String,
}

/// Split a comma-joined tag string into an ordered sequence, dropping empty
/// segments so `""` and `"a,,b"` never produce empty tags.
pub fn split_tags(wire: &str) -> Vec<String> {
    wire.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_tags_ingests_as_empty_sequence() {
        let record: ContactRecord = serde_json::from_str(
            r#"{"id":1,"full_name":"Ada Lovelace","phone_number":"555-0100","email":"ada@example.com"}"#,
        )
        .unwrap();
        let contact = Contact::from(record);
        assert!(contact.tags.is_empty());
    }

    #[test]
    fn comma_joined_tags_split_in_order() {
        let record = ContactRecord {
            id: ContactId(2),
            full_name: "Grace Hopper".into(),
            phone_number: "555-0101".into(),
            email: "grace@example.com".into(),
            tags: Some("work,navy".into()),
        };
        let contact = Contact::from(record);
        assert_eq!(contact.tags, vec!["work".to_string(), "navy".to_string()]);
    }

    #[test]
    fn empty_segments_are_dropped_on_ingestion() {
        assert_eq!(split_tags("a,,b,"), vec!["a".to_string(), "b".to_string()]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn egress_omits_tags_for_untagged_contacts() {
        let contact = Contact {
            id: ContactId(3),
            full_name: "Alan Turing".into(),
            phone_number: "555-0102".into(),
            email: "alan@example.com".into(),
            tags: Vec::new(),
        };
        let record = ContactRecord::from(&contact);
        assert_eq!(record.tags, None);
    }
}
