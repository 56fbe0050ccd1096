//! Per-form state: one [`ContactForm`] value exists while a form is open
//! and is dropped when it closes or submits. The in-progress tag set lives
//! here as an explicit [`TagDraft`] owned by the form, scoped to its
//! lifetime, and the comma-joined `TagDraft::wire` string is the single
//! value consumed at submission time.

use std::collections::HashMap;

use shared::{
    domain::{Contact, ContactField, ContactId},
    protocol::ContactDraft,
};

use crate::controller::events::MutationKind;
use crate::controller::validation::{FieldViolation, Validator};

/// Fixed at open time on the form value itself; add vs. edit is never
/// inferred from shared mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Add,
    Edit(ContactId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAddError {
    Empty,
    Duplicate(String),
}

impl TagAddError {
    /// User-facing warning; empty input is rejected silently.
    pub fn warning(&self) -> Option<String> {
        match self {
            TagAddError::Empty => None,
            TagAddError::Duplicate(tag) => {
                Some(format!("\"{tag}\" already exists as a tag on this contact."))
            }
        }
    }
}

/// Ordered tag list for one open form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDraft {
    tags: Vec<String>,
}

impl TagDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: &[String]) -> Self {
        Self {
            tags: tags.to_vec(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Append a tag. Empty input is rejected, as is a duplicate; the
    /// duplicate check is case-sensitive (matching the tag filter's exact
    /// membership semantics).
    pub fn add(&mut self, input: &str) -> Result<(), TagAddError> {
        let tag = input.trim();
        if tag.is_empty() {
            return Err(TagAddError::Empty);
        }
        if self.tags.iter().any(|existing| existing == tag) {
            return Err(TagAddError::Duplicate(tag.to_string()));
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove by trimmed text match, preserving the order of the rest.
    /// Removing an absent tag is a no-op.
    pub fn remove(&mut self, name: &str) {
        let name = name.trim();
        self.tags.retain(|tag| tag != name);
    }

    /// The comma-joined wire form consumed at submit time.
    pub fn wire(&self) -> String {
        self.tags.join(",")
    }
}

/// State of the one open add/edit form.
pub struct ContactForm {
    pub target: FormTarget,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub tag_input: String,
    pub tags: TagDraft,
    pub tag_warning: Option<String>,
    field_errors: HashMap<ContactField, FieldViolation>,
    banner: bool,
    pub submitting: bool,
}

impl ContactForm {
    pub fn open_add() -> Self {
        Self::empty(FormTarget::Add)
    }

    /// Seed the scalar fields and the tag draft from the cached contact.
    pub fn open_edit(contact: &Contact) -> Self {
        let mut form = Self::empty(FormTarget::Edit(contact.id));
        form.full_name = contact.full_name.clone();
        form.phone_number = contact.phone_number.clone();
        form.email = contact.email.clone();
        form.tags = TagDraft::from_tags(&contact.tags);
        form
    }

    fn empty(target: FormTarget) -> Self {
        Self {
            target,
            full_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            tag_input: String::new(),
            tags: TagDraft::new(),
            tag_warning: None,
            field_errors: HashMap::new(),
            banner: false,
            submitting: false,
        }
    }

    pub fn mutation_kind(&self) -> MutationKind {
        match self.target {
            FormTarget::Add => MutationKind::Create,
            FormTarget::Edit(_) => MutationKind::Update,
        }
    }

    pub fn field_value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
        }
    }

    pub fn field_value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FullName => &mut self.full_name,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Email => &mut self.email,
        }
    }

    pub fn field_error(&self, field: ContactField) -> Option<FieldViolation> {
        self.field_errors.get(&field).copied()
    }

    pub fn banner_visible(&self) -> bool {
        self.banner
    }

    /// Revalidate one field, as happens on blur.
    pub fn validate_field(&mut self, field: ContactField, validator: &Validator) {
        match validator.check(field, self.field_value(field)) {
            Some(violation) => {
                self.field_errors.insert(field, violation);
            }
            None => {
                self.field_errors.remove(&field);
            }
        }
    }

    /// Eager message removal on re-focus, independent of the revalidation
    /// that happens on blur.
    pub fn clear_field_error(&mut self, field: ContactField) {
        self.field_errors.remove(&field);
    }

    /// Route the tag input box through the draft. Success clears the box
    /// and any warning; a duplicate surfaces its warning; empty input is a
    /// silent no-op.
    pub fn add_tag_from_input(&mut self) {
        let input = self.tag_input.clone();
        match self.tags.add(&input) {
            Ok(()) => {
                self.tag_input.clear();
                self.tag_warning = None;
            }
            Err(err) => {
                self.tag_warning = err.warning();
            }
        }
    }

    pub fn remove_tag(&mut self, name: &str) {
        self.tags.remove(name);
    }

    /// Gate submission on validation. On any violation no draft is produced
    /// and the form-level banner is set (a bool, so repeated invalid
    /// submits can never stack duplicate banners). On a clean pass the
    /// form enters Submitting and yields the draft to dispatch.
    pub fn try_submit(&mut self, validator: &Validator) -> Option<ContactDraft> {
        let mut invalid = false;
        for field in ContactField::ALL {
            if let Some(violation) = validator.check(field, self.field_value(field)) {
                self.field_errors.insert(field, violation);
                invalid = true;
            }
        }
        if invalid {
            self.banner = true;
            return None;
        }

        self.banner = false;
        self.submitting = true;
        Some(ContactDraft {
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            tags: self.tags.wire(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ContactId;

    fn contact() -> Contact {
        Contact {
            id: ContactId(5),
            full_name: "Ada Lovelace".into(),
            phone_number: "555-0100".into(),
            email: "ada@example.com".into(),
            tags: vec!["work".into(), "home".into()],
        }
    }

    #[test]
    fn duplicate_tag_add_is_rejected_with_a_warning() {
        let mut draft = TagDraft::from_tags(&["work".to_string(), "home".to_string()]);
        let err = draft.add("work").unwrap_err();
        assert_eq!(err, TagAddError::Duplicate("work".to_string()));
        assert_eq!(
            err.warning().unwrap(),
            "\"work\" already exists as a tag on this contact."
        );
        assert_eq!(draft.tags(), ["work", "home"]);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut draft = TagDraft::from_tags(&["work".to_string()]);
        draft.add("Work").expect("different case is a new tag");
        assert_eq!(draft.tags(), ["work", "Work"]);
    }

    #[test]
    fn empty_tag_input_is_silently_rejected() {
        let mut draft = TagDraft::new();
        let err = draft.add("   ").unwrap_err();
        assert_eq!(err, TagAddError::Empty);
        assert_eq!(err.warning(), None);
        assert!(draft.tags().is_empty());
    }

    #[test]
    fn remove_preserves_order_of_remaining_tags() {
        let mut draft =
            TagDraft::from_tags(&["work".to_string(), "home".to_string(), "gym".to_string()]);
        draft.remove("work");
        assert_eq!(draft.tags(), ["home", "gym"]);
        draft.remove(" gym ");
        assert_eq!(draft.tags(), ["home"]);
        draft.remove("absent");
        assert_eq!(draft.tags(), ["home"]);
    }

    #[test]
    fn edit_form_seeds_fields_and_tag_draft_from_cached_contact() {
        let form = ContactForm::open_edit(&contact());
        assert_eq!(form.target, FormTarget::Edit(ContactId(5)));
        assert_eq!(form.full_name, "Ada Lovelace");
        assert_eq!(form.tags.wire(), "work,home");
        assert_eq!(form.mutation_kind(), MutationKind::Update);
    }

    #[test]
    fn invalid_submit_produces_no_draft_and_sets_the_banner_once() {
        let validator = Validator::new();
        let mut form = ContactForm::open_add();
        assert!(form.try_submit(&validator).is_none());
        assert!(form.banner_visible());
        assert!(!form.submitting);

        // A second invalid submit cannot stack another banner.
        assert!(form.try_submit(&validator).is_none());
        assert!(form.banner_visible());
    }

    #[test]
    fn clean_submit_yields_the_draft_with_wire_tags() {
        let validator = Validator::new();
        let mut form = ContactForm::open_edit(&contact());
        form.email = "ada@lovelace.example".into();
        let draft = form.try_submit(&validator).expect("valid form");
        assert_eq!(draft.email, "ada@lovelace.example");
        assert_eq!(draft.tags, "work,home");
        assert!(form.submitting);
        assert!(!form.banner_visible());
    }

    #[test]
    fn refocus_clears_the_message_before_revalidation() {
        let validator = Validator::new();
        let mut form = ContactForm::open_add();
        form.validate_field(ContactField::FullName, &validator);
        assert_eq!(
            form.field_error(ContactField::FullName),
            Some(FieldViolation::Missing)
        );

        form.clear_field_error(ContactField::FullName);
        assert_eq!(form.field_error(ContactField::FullName), None);
    }

    #[test]
    fn tag_input_routes_through_the_draft() {
        let mut form = ContactForm::open_add();
        form.tag_input = "gym".into();
        form.add_tag_from_input();
        assert_eq!(form.tags.tags(), ["gym"]);
        assert!(form.tag_input.is_empty());
        assert_eq!(form.tag_warning, None);

        form.tag_input = "gym".into();
        form.add_tag_from_input();
        assert!(form.tag_warning.is_some());
        assert_eq!(form.tag_input, "gym");
    }
}
