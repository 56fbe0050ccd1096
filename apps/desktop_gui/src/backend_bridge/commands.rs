//! Backend commands queued from UI to backend worker.

use shared::{domain::ContactId, protocol::ContactDraft};

pub enum BackendCommand {
    FetchContacts,
    CreateContact {
        draft: ContactDraft,
    },
    UpdateContact {
        id: ContactId,
        draft: ContactDraft,
    },
    DeleteContact {
        id: ContactId,
    },
}
