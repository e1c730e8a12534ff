//! Canned "learning buddy" chat.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::deferred::{Deferred, ViewGeneration};

pub const GREETING: &str = "Hi! I'm your learning buddy! 🌟 Ask me anything!";

pub const CANNED_REPLIES: [&str; 5] = [
    "That's a great question! Keep being curious! 🌈",
    "You're doing amazing! Keep learning! ⭐",
    "Wow! You're so smart! 🎉",
    "Let's figure this out together! 🤔",
    "I'm so proud of you! 🏆",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub from_helper: bool,
}

impl ChatMessage {
    fn helper(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_helper: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HelperChat {
    messages: Vec<ChatMessage>,
    open: bool,
    view: ViewGeneration,
    reply_delay: Duration,
}

impl HelperChat {
    #[must_use]
    pub fn new(reply_delay: Duration, view: ViewGeneration) -> Self {
        Self {
            messages: vec![ChatMessage::helper(GREETING)],
            open: false,
            view,
            reply_delay,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the panel; replies still in flight are dropped.
    pub fn close(&mut self) {
        self.open = false;
        self.view.invalidate();
    }

    /// Posts the learner's message and schedules a canned reply. Blank input is ignored.
    pub fn send<R: Rng>(&mut self, text: &str, rng: &mut R) -> Option<Deferred<String>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            text: text.to_string(),
            from_helper: false,
        });

        let reply = CANNED_REPLIES[rng.random_range(0..CANNED_REPLIES.len())];
        Some(Deferred::new(
            self.view.ticket(),
            self.reply_delay,
            reply.to_string(),
        ))
    }

    /// Appends a reply whose delay has passed. Returns false for stale replies.
    pub fn deliver(&mut self, reply: Deferred<String>) -> bool {
        match reply.take_if_current() {
            Some(text) => {
                self.messages.push(ChatMessage::helper(text));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn chat() -> HelperChat {
        HelperChat::new(Duration::from_secs(1), ViewGeneration::new())
    }

    #[test]
    fn starts_with_greeting_and_ignores_blank_input() {
        let mut chat = chat();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.messages()[0].from_helper);
        assert!(chat.send("   ", &mut rng).is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let mut chat = chat();
        chat.open();
        let mut rng = StdRng::seed_from_u64(7);
        let pending = chat.send("why is the sky blue?", &mut rng).unwrap();
        assert_eq!(chat.messages().len(), 2);

        pending.elapsed().await;
        assert!(chat.deliver(pending));
        let last = chat.messages().last().unwrap();
        assert!(last.from_helper);
        assert!(CANNED_REPLIES.contains(&last.text.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_drops_pending_reply() {
        let mut chat = chat();
        chat.open();
        let mut rng = StdRng::seed_from_u64(7);
        let pending = chat.send("hello", &mut rng).unwrap();
        chat.close();

        pending.elapsed().await;
        assert!(!chat.deliver(pending));
        assert_eq!(chat.messages().len(), 2);
        assert!(!chat.is_open());
    }
}
