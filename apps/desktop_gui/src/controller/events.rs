//! UI/backend events and the tagged action dispatch for interactive
//! elements. Every clickable element emits a [`ContactAction`] variant
//! consumed by one `match`, rather than being classified by string or
//! style sniffing at the click site.

use shared::domain::{Contact, ContactId};

/// Events flowing backend worker -> UI thread.
pub enum UiEvent {
    ContactsLoaded(Vec<Contact>),
    ContactsLoadFailed(String),
    MutationSucceeded(MutationKind),
    MutationFailed { kind: MutationKind, reason: String },
    Info(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn noun(self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            MutationKind::Create => "added",
            MutationKind::Update => "saved",
            MutationKind::Delete => "deleted",
        }
    }

    pub fn success_notice(self) -> String {
        format!("Contact was successfully {}.", self.verb())
    }

    /// The single generic alert all network failures collapse into.
    pub fn failure_notice(self) -> String {
        format!("Contact could not be {}.", self.verb())
    }
}

/// Actions emitted by interactive elements in the contact listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAction {
    OpenAddForm,
    OpenEditForm(ContactId),
    RequestDelete(ContactId),
    ConfirmDelete(ContactId),
    CancelDelete,
    FilterByTag(String),
    ClearTagFilter,
}

/// Which subset of the cached collection the listing currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Search(String),
    Tag(String),
}

impl ListFilter {
    pub fn is_search(&self) -> bool {
        matches!(self, ListFilter::Search(_))
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, ListFilter::Tag(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_notices_use_the_mutation_verb() {
        assert_eq!(
            MutationKind::Create.success_notice(),
            "Contact was successfully added."
        );
        assert_eq!(
            MutationKind::Update.success_notice(),
            "Contact was successfully saved."
        );
        assert_eq!(
            MutationKind::Delete.success_notice(),
            "Contact was successfully deleted."
        );
    }

    #[test]
    fn failure_notices_are_generic_per_mutation() {
        assert_eq!(
            MutationKind::Delete.failure_notice(),
            "Contact could not be deleted."
        );
    }
}
