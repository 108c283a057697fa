//! Client-side state containers.
//!
//! Every store keeps its snapshot in a `watch` channel: readers clone the
//! current value or subscribe to changes, writers replace it through
//! [`Store::update`], which runs under the channel lock so concurrent updates
//! never lose writes.

use crate::client::ChatApi;
use std::sync::Arc;
use tokio::sync::watch;

pub mod chat;
pub mod conversations;
pub mod files;
pub mod toast;

pub use chat::{ChatState, ChatStore};
pub use conversations::{ConversationsState, ConversationsStore};
pub use files::{FilesState, FilesStore, Invalidator, FILES_DEPENDENCY};
pub use toast::ToastStore;

/// Client-side route changes
pub trait Navigator: Send + Sync {
    fn goto(&self, path: &str);
}

pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.tx.send_modify(modify);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

/// All stores of one UI session, sharing one toast store.
#[derive(Clone)]
pub struct StoreContext {
    pub conversations: Arc<ConversationsStore>,
    pub files: FilesStore,
    pub chat: ChatStore,
    pub toasts: ToastStore,
}

impl StoreContext {
    pub fn new(
        api: Arc<dyn ChatApi>,
        navigator: Arc<dyn Navigator>,
        invalidator: Arc<dyn Invalidator>,
        max_label_size: usize,
    ) -> Self {
        let toasts = ToastStore::default();
        Self {
            conversations: Arc::new(ConversationsStore::new(
                api,
                navigator,
                toasts.clone(),
                max_label_size,
            )),
            files: FilesStore::new(invalidator),
            chat: ChatStore::default(),
            toasts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_updates() {
        let store = Store::new(vec![1]);
        let mut rx = store.subscribe();

        store.update(|items| items.push(2));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), vec![1, 2]);
        assert_eq!(store.get(), vec![1, 2]);
    }

    struct Nowhere;

    impl Navigator for Nowhere {
        fn goto(&self, _path: &str) {}
    }

    impl Invalidator for Nowhere {
        fn invalidate(&self, _dependency: &str) {}
    }

    #[tokio::test]
    async fn context_stores_share_one_toast_list() {
        let context = StoreContext::new(
            Arc::new(crate::client::MockChatApi::failing_messages()),
            Arc::new(Nowhere),
            Arc::new(Nowhere),
            100,
        );

        context
            .conversations
            .new_message(crate::forms::NewMessageForm {
                id: None,
                conversation_id: uuid::Uuid::new_v4(),
                content: "hi".to_string(),
                role: crate::models::Role::User,
                inserted_at: None,
            })
            .await;

        assert_eq!(context.toasts.get().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() {
        let store = Store::new(0usize);
        let mut handles = vec![];
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.update(|n| *n += 1) }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.get(), 50);
    }
}
