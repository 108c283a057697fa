use super::{Navigator, Store, ToastStore};
use crate::client::ChatApi;
use crate::forms;
use crate::models::{self, Conversation, Toast};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationsState {
    pub conversations: Vec<Conversation>,
}

pub struct ConversationsStore {
    store: Store<ConversationsState>,
    api: Arc<dyn ChatApi>,
    navigator: Arc<dyn Navigator>,
    toasts: ToastStore,
    max_label_size: usize,
    // one queue per conversation so appends land in submission order
    append_queues: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl ConversationsStore {
    pub fn new(
        api: Arc<dyn ChatApi>,
        navigator: Arc<dyn Navigator>,
        toasts: ToastStore,
        max_label_size: usize,
    ) -> Self {
        Self {
            store: Store::default(),
            api,
            navigator,
            toasts,
            max_label_size,
            append_queues: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self) -> ConversationsState {
        self.store.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ConversationsState> {
        self.store.subscribe()
    }

    pub fn set(&self, state: ConversationsState) {
        self.store.set(state);
    }

    pub fn update(&self, modify: impl FnOnce(&mut ConversationsState)) {
        self.store.update(modify);
    }

    pub fn set_conversations(&self, conversations: Vec<Conversation>) {
        self.store.update(|state| state.conversations = conversations);
    }

    pub fn change_conversation(&self, id: Option<Uuid>) {
        match id {
            Some(id) => self.navigator.goto(&format!("/chat/{}", id)),
            None => self.navigator.goto("/chat"),
        }
    }

    pub async fn new_conversation(&self, label: &str) {
        let form = forms::NewConversationForm {
            label: models::truncate_label(label, self.max_label_size),
            ..Default::default()
        };

        match self.api.create_conversation(&form).await {
            Ok(mut conversation) => {
                conversation.messages.clear();
                let id = conversation.id;
                self.store.update(|state| state.conversations.push(conversation));
                self.navigator.goto(&format!("/chat/{}", id));
            }
            Err(err) => {
                tracing::error!("Failed to save conversation: {}", err);
                self.toasts.add_toast(Toast::error("Error saving conversation."));
            }
        }
    }

    fn append_queues(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>> {
        match self.append_queues.lock() {
            Ok(queues) => queues,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn append_queue(&self, conversation_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        self.append_queues().entry(conversation_id).or_default().clone()
    }

    /// Drops the queue once no append holds or waits on it.
    fn release_append_queue(&self, conversation_id: Uuid) {
        let mut queues = self.append_queues();
        if queues
            .get(&conversation_id)
            .is_some_and(|queue| Arc::strong_count(queue) == 1)
        {
            queues.remove(&conversation_id);
        }
    }

    pub async fn new_message(&self, form: forms::NewMessageForm) {
        let conversation_id = form.conversation_id;
        let queue = self.append_queue(conversation_id);
        {
            let _turn = queue.lock().await;
            self.append_message(&form).await;
        }
        drop(queue);
        self.release_append_queue(conversation_id);
    }

    async fn append_message(&self, form: &forms::NewMessageForm) {
        let message = match self.api.create_message(form).await {
            Ok(message) => message,
            Err(err) => {
                tracing::error!("Failed to create message: {}", err);
                self.toasts.add_toast(Toast::error("Error creating message."));
                return;
            }
        };

        self.store.update(|state| {
            match state
                .conversations
                .iter_mut()
                .find(|c| c.id == message.conversation_id)
            {
                Some(conversation) => conversation.messages.push(message),
                None => tracing::warn!(
                    "Message {} created for unknown conversation {}",
                    message.id,
                    message.conversation_id
                ),
            }
        });
    }

    pub fn delete_conversation(&self, id: Uuid) {
        self.store.update(|state| state.conversations.retain(|c| c.id != id));
        self.append_queues().remove(&id);
        self.navigator.goto("/chat");
    }

    pub fn update_conversation_label(&self, id: Uuid, label: &str) {
        let label = models::truncate_label(label, self.max_label_size);
        self.store.update(|state| {
            if let Some(conversation) = state.conversations.iter_mut().find(|c| c.id == id) {
                conversation.label = label;
            }
        });
    }

    async fn import_one(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, crate::client::ApiError> {
        let form = forms::NewConversationForm {
            id: Some(conversation.id),
            label: conversation.label.clone(),
            inserted_at: Some(conversation.inserted_at),
        };
        let mut created = self.api.create_conversation(&form).await?;
        created.messages.clear();

        for message in &conversation.messages {
            let form = forms::NewMessageForm {
                id: Some(message.id),
                conversation_id: created.id,
                content: message.content.clone(),
                role: message.role,
                inserted_at: Some(message.inserted_at),
            };
            created.messages.push(self.api.create_message(&form).await?);
        }

        Ok(created)
    }

    /// Imports one conversation at a time. A failed conversation leaves a
    /// toast and the rest of the batch still runs.
    pub async fn import_conversations(&self, batch: Vec<Conversation>) {
        let mut imported = Vec::with_capacity(batch.len());
        for conversation in &batch {
            match self.import_one(conversation).await {
                Ok(created) => imported.push(created),
                Err(err) => {
                    tracing::error!("Failed to import conversation {}: {}", conversation.id, err);
                    self.toasts.add_toast(Toast::error(format!(
                        "Error importing conversation: {}",
                        conversation.label
                    )));
                }
            }
        }

        self.store.update(|state| {
            for conversation in imported {
                match state.conversations.iter_mut().find(|c| c.id == conversation.id) {
                    Some(existing) => *existing = conversation,
                    None => state.conversations.push(conversation),
                }
            }
        });
    }
}
