use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned contact identifier. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contact id: {raw:?}")]
pub struct ParseContactIdError {
    pub raw: String,
}

impl FromStr for ContactId {
    type Err = ParseContactIdError;

    /// UI-sourced identifiers arrive as strings and must be numerically
    /// coerced; anything non-numeric is an error, never a silent zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ContactId)
            .map_err(|_| ParseContactIdError { raw: s.to_string() })
    }
}

/// One contact as held in the cache. `tags` is an ordered sequence; a
/// contact absent a tag string on the wire has an empty sequence here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub tags: Vec<String>,
}

impl Contact {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Value of one diffable scalar field.
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
        }
    }
}

/// The diffable scalar fields of a contact. Tags are deliberately not a
/// member: they are always transmitted wholesale on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FullName,
    PhoneNumber,
    Email,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::FullName,
        ContactField::PhoneNumber,
        ContactField::Email,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            ContactField::FullName => "full_name",
            ContactField::PhoneNumber => "phone_number",
            ContactField::Email => "email",
        }
    }

    /// Humanized form used in user-facing messages: underscore-separated
    /// words split and capitalized (`full_name` -> `Full Name`).
    pub fn label(self) -> &'static str {
        match self {
            ContactField::FullName => "Full Name",
            ContactField::PhoneNumber => "Phone Number",
            ContactField::Email => "Email",
        }
    }
}

/// Split-and-capitalize for arbitrary underscore identifiers, matching
/// `ContactField::label` for the known fields.
pub fn humanize_field_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_parses_ui_sourced_strings() {
        assert_eq!("42".parse::<ContactId>().unwrap(), ContactId(42));
        assert_eq!(" 7 ".parse::<ContactId>().unwrap(), ContactId(7));
    }

    #[test]
    fn contact_id_rejects_non_numeric_input() {
        let err = "abc".parse::<ContactId>().unwrap_err();
        assert_eq!(err.raw, "abc");
        assert!("".parse::<ContactId>().is_err());
    }

    #[test]
    fn humanizes_underscore_identifiers() {
        assert_eq!(humanize_field_name("full_name"), "Full Name");
        assert_eq!(humanize_field_name("email"), "Email");
        assert_eq!(humanize_field_name("phone_number"), "Phone Number");
    }

    #[test]
    fn field_labels_match_humanized_wire_names() {
        for field in ContactField::ALL {
            assert_eq!(field.label(), humanize_field_name(field.wire_name()));
        }
    }
}
