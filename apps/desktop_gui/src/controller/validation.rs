//! Field validation: derived on demand, never stored beyond the open form.

use regex::Regex;
use shared::domain::ContactField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    Missing,
    Pattern,
}

pub struct Validator {
    full_name: Regex,
    phone_number: Regex,
    email: Regex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            full_name: Regex::new(r"^[A-Za-z' ]+$").expect("literal pattern"),
            phone_number: Regex::new(r"^[0-9-]+$").expect("literal pattern"),
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("literal pattern"),
        }
    }

    /// `None` means the field is valid. Presence is checked before pattern,
    /// so an empty required field reports `Missing`, never `Pattern`.
    pub fn check(&self, field: ContactField, value: &str) -> Option<FieldViolation> {
        if value.trim().is_empty() {
            return Some(FieldViolation::Missing);
        }
        let pattern = match field {
            ContactField::FullName => &self.full_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
        };
        if pattern.is_match(value) {
            None
        } else {
            Some(FieldViolation::Pattern)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn violation_message(field: ContactField, violation: FieldViolation) -> String {
    match violation {
        FieldViolation::Missing => format!("{} is a required field.", field.label()),
        FieldViolation::Pattern => format!("{} is not valid.", field.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_fields_report_missing() {
        let validator = Validator::new();
        for field in ContactField::ALL {
            assert_eq!(validator.check(field, ""), Some(FieldViolation::Missing));
            assert_eq!(validator.check(field, "   "), Some(FieldViolation::Missing));
        }
    }

    #[test]
    fn name_admits_letters_apostrophe_and_space() {
        let validator = Validator::new();
        assert_eq!(validator.check(ContactField::FullName, "Conan O'Brien"), None);
        assert_eq!(
            validator.check(ContactField::FullName, "Ada L0velace"),
            Some(FieldViolation::Pattern)
        );
    }

    #[test]
    fn phone_admits_digits_and_hyphen_only() {
        let validator = Validator::new();
        assert_eq!(validator.check(ContactField::PhoneNumber, "555-0100"), None);
        assert_eq!(
            validator.check(ContactField::PhoneNumber, "555 0100"),
            Some(FieldViolation::Pattern)
        );
    }

    #[test]
    fn email_needs_local_domain_and_tld_without_whitespace() {
        let validator = Validator::new();
        assert_eq!(validator.check(ContactField::Email, "ada@example.com"), None);
        assert_eq!(
            validator.check(ContactField::Email, "ada example.com"),
            Some(FieldViolation::Pattern)
        );
        assert_eq!(
            validator.check(ContactField::Email, "ada@example"),
            Some(FieldViolation::Pattern)
        );
    }

    #[test]
    fn messages_humanize_the_field_name() {
        assert_eq!(
            violation_message(ContactField::FullName, FieldViolation::Missing),
            "Full Name is a required field."
        );
        assert_eq!(
            violation_message(ContactField::Email, FieldViolation::Pattern),
            "Email is not valid."
        );
    }
}
