use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

pub const GREETING: &str = "Olá! Como posso ajudar você hoje? Você pode me perguntar sobre museus, restaurantes, rotas de caminhada, castelos, praias fluviais e muito mais!";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Message history of one chat session, opened with the greeting.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Role::Bot, GREETING)],
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message::new(role, content);
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Bot);
        assert_eq!(conversation.messages()[0].content, GREETING);
    }

    #[test]
    fn test_push_keeps_order_and_unique_ids() {
        let mut conversation = Conversation::new();
        let user = conversation.push(Role::User, "museus em coimbra");
        let bot = conversation.push(Role::Bot, "1. Museu");
        assert_eq!(conversation.len(), 3);
        assert_ne!(user.id, bot.id);
        assert_eq!(conversation.messages()[2].content, "1. Museu");
        assert!(user.timestamp <= bot.timestamp);
    }

    #[test]
    fn test_role_strings() {
        let role: &'static str = Role::User.into();
        assert_eq!(role, "user");
        assert_eq!(Role::from_str("bot").unwrap(), Role::Bot);
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
    }
}
