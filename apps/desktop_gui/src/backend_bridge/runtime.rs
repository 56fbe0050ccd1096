//! Backend worker: a dedicated thread hosting a tokio runtime and the
//! [`ContactStore`]. Commands are served sequentially off the bounded
//! channel, so the UI never observes a half-applied mutation, and every
//! successful write is followed by the worker's own refresh fetch.

use std::thread;

use contact_core::ContactStore;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{MutationKind, UiEvent};

pub fn spawn(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ContactsLoadFailed(format!(
                    "Backend worker startup failure: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let store = ContactStore::new(server_url);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchContacts => refresh(&store, &ui_tx).await,
                    BackendCommand::CreateContact { draft } => {
                        let result = store.create(&draft).await;
                        settle_mutation(&store, &ui_tx, MutationKind::Create, result).await;
                    }
                    BackendCommand::UpdateContact { id, draft } => {
                        let result = store.update(id, &draft).await;
                        settle_mutation(&store, &ui_tx, MutationKind::Update, result).await;
                    }
                    BackendCommand::DeleteContact { id } => {
                        let result = store.delete(id).await;
                        settle_mutation(&store, &ui_tx, MutationKind::Delete, result).await;
                    }
                }
            }
        });
    });
}

async fn refresh(store: &ContactStore, ui_tx: &Sender<UiEvent>) {
    match store.fetch_all().await {
        Ok(contacts) => {
            let _ = ui_tx.try_send(UiEvent::ContactsLoaded(contacts));
        }
        Err(err) => {
            tracing::warn!("contact refresh failed: {err}");
            let _ = ui_tx.try_send(UiEvent::ContactsLoadFailed(
                "Contacts could not be retrieved.".to_string(),
            ));
        }
    }
}

/// Report a mutation outcome, and on success re-fetch so the UI sees the
/// server's view of the collection rather than an optimistic local patch.
async fn settle_mutation(
    store: &ContactStore,
    ui_tx: &Sender<UiEvent>,
    kind: MutationKind,
    result: Result<(), contact_core::StoreError>,
) {
    match result {
        Ok(()) => {
            let _ = ui_tx.try_send(UiEvent::MutationSucceeded(kind));
            refresh(store, ui_tx).await;
        }
        Err(err) => {
            tracing::warn!(kind = kind.noun(), "contact mutation failed: {err}");
            let _ = ui_tx.try_send(UiEvent::MutationFailed {
                kind,
                reason: err.to_string(),
            });
        }
    }
}
