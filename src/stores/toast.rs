use super::Store;
use crate::models::Toast;

/// Pending notifications, oldest first.
#[derive(Clone, Default)]
pub struct ToastStore {
    store: Store<Vec<Toast>>,
}

impl ToastStore {
    pub fn get(&self) -> Vec<Toast> {
        self.store.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<Toast>> {
        self.store.subscribe()
    }

    pub fn add_toast(&self, toast: Toast) {
        tracing::debug!("Toast: {} {}", toast.title, toast.subtitle);
        self.store.update(|toasts| toasts.push(toast));
    }

    pub fn dismiss(&self, index: usize) {
        self.store.update(|toasts| {
            if index < toasts.len() {
                toasts.remove(index);
            }
        });
    }

    pub fn clear(&self) {
        self.store.set(vec![]);
    }
}
