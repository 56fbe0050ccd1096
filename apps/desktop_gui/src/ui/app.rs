use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Contact, ContactField, ContactId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ContactAction, ListFilter, MutationKind, UiEvent};
use crate::controller::form::{ContactForm, FormTarget};
use crate::controller::input::{self, FieldKind};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::search::SearchDebouncer;
use crate::controller::validation::{violation_message, Validator};

pub const NO_CONTACTS_MESSAGE: &str = "There are no contacts.";
pub const NO_RESULTS_MESSAGE: &str = "Search returned no contacts.";

/// Three-way rendering outcome for the contact listing, so the user can
/// tell "search too narrow" apart from "dataset empty". Never both
/// messages at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Populated,
    NoSearchResults,
    NoContacts,
}

pub fn list_view(visible_count: usize, filter: &ListFilter) -> ListView {
    if visible_count > 0 {
        ListView::Populated
    } else if filter.is_search() {
        ListView::NoSearchResults
    } else {
        ListView::NoContacts
    }
}

pub struct ContactDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    contacts: Vec<Contact>,
    loaded_once: bool,
    filter: ListFilter,
    search_input: String,
    debouncer: SearchDebouncer,
    validator: Validator,
    form: Option<ContactForm>,
    pending_delete: Option<ContactId>,
    focused_kind: Option<FieldKind>,
    status: String,
}

impl ContactDeskApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            contacts: Vec::new(),
            loaded_once: false,
            filter: ListFilter::All,
            search_input: String::new(),
            debouncer: SearchDebouncer::default(),
            validator: Validator::new(),
            form: None,
            pending_delete: None,
            focused_kind: None,
            status: String::new(),
        }
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ContactsLoaded(contacts) => {
                    self.contacts = contacts;
                    self.loaded_once = true;
                }
                UiEvent::ContactsLoadFailed(message) => {
                    self.status = message;
                }
                UiEvent::MutationSucceeded(kind) => {
                    self.status = kind.success_notice();
                    // Form closes on a successful submit; a delete has no
                    // open form to close.
                    if matches!(kind, MutationKind::Create | MutationKind::Update) {
                        self.form = None;
                    }
                }
                UiEvent::MutationFailed { kind, reason } => {
                    tracing::debug!(kind = kind.noun(), %reason, "mutation failed");
                    self.status = kind.failure_notice();
                    if let Some(form) = self.form.as_mut() {
                        form.submitting = false;
                    }
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
            }
        }
    }

    /// Drop inadmissible characters from the input queue before any widget
    /// consumes them, keyed by which field held focus last frame. Editing
    /// keys (Backspace included) are never text events and always pass.
    fn admit_keystrokes(&self, ctx: &egui::Context) {
        let Some(kind) = self.focused_kind else {
            return;
        };
        ctx.input_mut(|state| {
            state.events.retain_mut(|event| match event {
                egui::Event::Text(text) | egui::Event::Paste(text) => {
                    let admitted = input::filter_typed_text(kind, text);
                    let keep = !admitted.is_empty();
                    *text = admitted;
                    keep
                }
                _ => true,
            });
        });
    }

    fn handle_action(&mut self, action: ContactAction) {
        match action {
            ContactAction::OpenAddForm => {
                self.form = Some(ContactForm::open_add());
            }
            ContactAction::OpenEditForm(id) => {
                match self.contacts.iter().find(|contact| contact.id == id) {
                    Some(contact) => self.form = Some(ContactForm::open_edit(contact)),
                    None => {
                        // Defect signal: an edit affordance existed for a
                        // contact missing from the snapshot.
                        tracing::error!(%id, "edit requested for unknown contact id");
                        self.status = "Contact could not be found.".to_string();
                    }
                }
            }
            ContactAction::RequestDelete(id) => {
                self.pending_delete = Some(id);
            }
            ContactAction::ConfirmDelete(id) => {
                self.pending_delete = None;
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::DeleteContact { id },
                    &mut self.status,
                );
            }
            ContactAction::CancelDelete => {
                self.pending_delete = None;
            }
            ContactAction::FilterByTag(tag) => {
                self.search_input.clear();
                self.filter = ListFilter::Tag(tag);
            }
            ContactAction::ClearTagFilter => {
                self.filter = ListFilter::All;
            }
        }
    }

    fn visible_contacts(&self) -> Vec<Contact> {
        match &self.filter {
            ListFilter::All => self.contacts.clone(),
            ListFilter::Search(query) => contact_core::filter_by_prefix(&self.contacts, query),
            ListFilter::Tag(tag) => contact_core::filter_by_tag(&self.contacts, tag),
        }
    }

    fn top_bar(
        &mut self,
        ctx: &egui::Context,
        actions: &mut Vec<ContactAction>,
        focused: &mut Option<FieldKind>,
    ) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Add Contact").clicked() {
                    actions.push(ContactAction::OpenAddForm);
                }
                // The affordance exists iff the tag filter is active, which
                // makes its insertion idempotent by construction.
                if self.filter.is_tag() {
                    if ui.button("See All Contacts").clicked() {
                        actions.push(ContactAction::ClearTagFilter);
                    }
                }
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search_input).hint_text("Search"),
                );
                if response.has_focus() {
                    *focused = Some(FieldKind::Search);
                }
                if response.changed() {
                    self.debouncer
                        .note_keystroke(self.search_input.clone(), Instant::now());
                }
            });
        });
    }

    fn contact_list(&mut self, ctx: &egui::Context, actions: &mut Vec<ContactAction>) {
        let visible = self.visible_contacts();
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.loaded_once {
                ui.label("Loading contacts...");
                return;
            }
            match list_view(visible.len(), &self.filter) {
                ListView::NoContacts => {
                    ui.heading(NO_CONTACTS_MESSAGE);
                }
                ListView::NoSearchResults => {
                    ui.heading(NO_RESULTS_MESSAGE);
                }
                ListView::Populated => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for contact in &visible {
                            contact_card(ui, contact, actions);
                            ui.separator();
                        }
                    });
                }
            }
        });
    }

    fn form_window(&mut self, ctx: &egui::Context, focused: &mut Option<FieldKind>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let validator = &self.validator;
        let mut submit = false;
        let mut cancel = false;
        let title = match form.target {
            FormTarget::Add => "Add Contact",
            FormTarget::Edit(_) => "Edit Contact",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                if form.banner_visible() {
                    ui.colored_label(
                        egui::Color32::RED,
                        "Fix errors before submitting this form.",
                    );
                }

                for field in ContactField::ALL {
                    ui.label(field.label());
                    let response = ui.text_edit_singleline(form.field_value_mut(field));
                    if response.has_focus() {
                        *focused = Some(field_kind(field));
                    }
                    if response.gained_focus() {
                        form.clear_field_error(field);
                    }
                    if response.lost_focus() {
                        form.validate_field(field, validator);
                    }
                    if let Some(violation) = form.field_error(field) {
                        ui.colored_label(
                            egui::Color32::RED,
                            violation_message(field, violation),
                        );
                    }
                }

                ui.label("Tags");
                ui.horizontal(|ui| {
                    let response = ui.text_edit_singleline(&mut form.tag_input);
                    if response.has_focus() {
                        *focused = Some(FieldKind::TagInput);
                    }
                    if ui.button("Add Tag").clicked() {
                        form.add_tag_from_input();
                    }
                });
                if let Some(warning) = form.tag_warning.clone() {
                    ui.colored_label(egui::Color32::YELLOW, warning);
                }
                let mut removed: Option<String> = None;
                ui.horizontal_wrapped(|ui| {
                    for tag in form.tags.tags() {
                        if ui.small_button(format!("{tag} ✕")).clicked() {
                            removed = Some(tag.clone());
                        }
                    }
                });
                if let Some(tag) = removed {
                    form.remove_tag(&tag);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    let submit_label = match form.target {
                        FormTarget::Add => "Add",
                        FormTarget::Edit(_) => "Save",
                    };
                    let button = egui::Button::new(submit_label);
                    if ui.add_enabled(!form.submitting, button).clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            // Dropping the form destroys the pending edit, tag draft
            // included.
            self.form = None;
            return;
        }
        if submit {
            if let Some(form) = self.form.as_mut() {
                if let Some(draft) = form.try_submit(&self.validator) {
                    let cmd = match form.target {
                        FormTarget::Add => BackendCommand::CreateContact { draft },
                        FormTarget::Edit(id) => BackendCommand::UpdateContact { id, draft },
                    };
                    dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
                }
            }
        }
    }

    fn delete_confirmation(&mut self, ctx: &egui::Context, actions: &mut Vec<ContactAction>) {
        let Some(id) = self.pending_delete else {
            return;
        };
        egui::Window::new("Delete Contact")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete contact?");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        actions.push(ContactAction::ConfirmDelete(id));
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(ContactAction::CancelDelete);
                    }
                });
            });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        if self.status.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                if ui.small_button("Dismiss").clicked() {
                    self.status.clear();
                }
            });
        });
    }
}

impl eframe::App for ContactDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();
        self.admit_keystrokes(ctx);

        if let Some(query) = self.debouncer.poll(Instant::now()) {
            self.filter = if query.is_empty() {
                ListFilter::All
            } else {
                ListFilter::Search(query)
            };
        }
        if let Some(deadline) = self.debouncer.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        let mut actions = Vec::new();
        let mut focused = None;
        self.top_bar(ctx, &mut actions, &mut focused);
        self.contact_list(ctx, &mut actions);
        self.form_window(ctx, &mut focused);
        self.delete_confirmation(ctx, &mut actions);
        self.status_bar(ctx);
        self.focused_kind = focused;

        for action in actions {
            self.handle_action(action);
        }
    }
}

fn field_kind(field: ContactField) -> FieldKind {
    match field {
        ContactField::FullName => FieldKind::FullName,
        ContactField::PhoneNumber => FieldKind::PhoneNumber,
        ContactField::Email => FieldKind::Email,
    }
}

fn contact_card(ui: &mut egui::Ui, contact: &Contact, actions: &mut Vec<ContactAction>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.strong(contact.full_name.as_str());
            ui.label(contact.phone_number.as_str());
            ui.label(contact.email.as_str());
            if !contact.tags.is_empty() {
                ui.horizontal(|ui| {
                    for tag in &contact.tags {
                        if ui.small_button(tag.as_str()).clicked() {
                            actions.push(ContactAction::FilterByTag(tag.clone()));
                        }
                    }
                });
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.button("Delete").clicked() {
                actions.push(ContactAction::RequestDelete(contact.id));
            }
            if ui.button("Edit").clicked() {
                actions.push(ContactAction::OpenEditForm(contact.id));
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_during_search_reports_no_results() {
        let filter = ListFilter::Search("zzz".to_string());
        assert_eq!(list_view(0, &filter), ListView::NoSearchResults);
    }

    #[test]
    fn empty_list_without_search_reports_no_contacts() {
        assert_eq!(list_view(0, &ListFilter::All), ListView::NoContacts);
        assert_eq!(
            list_view(0, &ListFilter::Tag("work".to_string())),
            ListView::NoContacts
        );
    }

    #[test]
    fn populated_list_renders_the_collection_never_a_message() {
        assert_eq!(list_view(3, &ListFilter::All), ListView::Populated);
        assert_eq!(
            list_view(1, &ListFilter::Search("a".to_string())),
            ListView::Populated
        );
    }

    #[test]
    fn see_all_affordance_exists_only_under_a_tag_filter() {
        assert!(ListFilter::Tag("work".to_string()).is_tag());
        assert!(!ListFilter::All.is_tag());
        assert!(!ListFilter::Search("w".to_string()).is_tag());
    }
}
