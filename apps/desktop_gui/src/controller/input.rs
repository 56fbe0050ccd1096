//! Keystroke admission: a deny-list applied before a typed character
//! reaches the field value. This is pre-insertion filtering, not a
//! post-hoc reformat, so a denied character never changes the field.

/// Which admission rules apply to the focused input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FullName,
    PhoneNumber,
    Email,
    TagInput,
    Search,
}

/// A single keystroke as the admission filter sees it. Editing keys are
/// never denied; Backspace is admitted in every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Backspace,
}

pub fn admits(kind: FieldKind, key: KeyPress) -> bool {
    match key {
        KeyPress::Backspace => true,
        KeyPress::Char(ch) => admits_char(kind, ch),
    }
}

pub fn admits_char(kind: FieldKind, ch: char) -> bool {
    match kind {
        FieldKind::FullName => ch.is_ascii_alphabetic() || ch == '\'' || ch == ' ',
        FieldKind::PhoneNumber => ch.is_ascii_digit() || ch == '-',
        FieldKind::Email => !ch.is_whitespace(),
        // Comma is the tag delimiter on the wire and may never appear
        // inside a tag; spaces are rejected with it.
        FieldKind::TagInput => ch != ',' && !ch.is_whitespace(),
        FieldKind::Search => true,
    }
}

/// Filter a burst of typed text (egui delivers text events as strings)
/// down to the admissible characters.
pub fn filter_typed_text(kind: FieldKind, text: &str) -> String {
    text.chars().filter(|&ch| admits_char(kind, ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_never_enters_a_tag_input() {
        assert!(!admits(FieldKind::TagInput, KeyPress::Char(',')));
        assert!(!admits(FieldKind::TagInput, KeyPress::Char(' ')));
        assert!(admits(FieldKind::TagInput, KeyPress::Char('x')));
        assert_eq!(filter_typed_text(FieldKind::TagInput, "a,b c"), "abc");
    }

    #[test]
    fn digits_never_enter_a_name_field() {
        assert!(!admits(FieldKind::FullName, KeyPress::Char('7')));
        assert!(admits(FieldKind::FullName, KeyPress::Char('\'')));
        assert!(admits(FieldKind::FullName, KeyPress::Char(' ')));
        assert_eq!(filter_typed_text(FieldKind::FullName, "O'Brien 3rd"), "O'Brien rd");
    }

    #[test]
    fn phone_fields_admit_digits_and_hyphen_only() {
        assert!(admits(FieldKind::PhoneNumber, KeyPress::Char('-')));
        assert!(!admits(FieldKind::PhoneNumber, KeyPress::Char('a')));
        assert_eq!(filter_typed_text(FieldKind::PhoneNumber, "(555) 01-00"), "555-01-00");
    }

    #[test]
    fn email_fields_reject_whitespace_only() {
        assert!(admits(FieldKind::Email, KeyPress::Char('@')));
        assert!(!admits(FieldKind::Email, KeyPress::Char(' ')));
        assert!(!admits(FieldKind::Email, KeyPress::Char('\t')));
    }

    #[test]
    fn backspace_is_admitted_in_every_field() {
        for kind in [
            FieldKind::FullName,
            FieldKind::PhoneNumber,
            FieldKind::Email,
            FieldKind::TagInput,
            FieldKind::Search,
        ] {
            assert!(admits(kind, KeyPress::Backspace));
        }
    }

    #[test]
    fn search_admits_everything() {
        assert_eq!(filter_typed_text(FieldKind::Search, "a,1 @"), "a,1 @");
    }
}
