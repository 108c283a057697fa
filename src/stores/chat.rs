use super::Store;
use crate::models::Message;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub all_streamed_messages: Vec<Message>,
}

/// Messages streamed for the active conversation.
#[derive(Clone, Default)]
pub struct ChatStore {
    store: Store<ChatState>,
}

impl ChatStore {
    pub fn get(&self) -> ChatState {
        self.store.get()
    }

    pub fn set(&self, state: ChatState) {
        self.store.set(state);
    }

    pub fn update(&self, modify: impl FnOnce(&mut ChatState)) {
        self.store.update(modify);
    }

    /// Stores the messages oldest first; equal timestamps keep their order.
    pub fn set_all_streamed_messages(&self, mut messages: Vec<Message>) {
        messages.sort_by_key(|message| message.inserted_at);
        self.store.update(|state| state.all_streamed_messages = messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn message(content: &str, offset_secs: i64) -> Message {
        Message {
            id: Uuid::new_v4(),
            conversation_id: Uuid::nil(),
            user_id: "user-1".to_string(),
            role: Role::User,
            content: content.to_string(),
            inserted_at: Utc::now() - Duration::seconds(100) + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn messages_sorted_by_time_and_stable() {
        let base = message("first", 0);
        let mut same_time = message("second", 0);
        same_time.inserted_at = base.inserted_at;
        let late = message("third", 10);

        let chat = ChatStore::default();
        chat.set_all_streamed_messages(vec![late, base, same_time]);

        let contents: Vec<String> = chat
            .get()
            .all_streamed_messages
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }
}
