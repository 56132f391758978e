/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub id: u64,
    pub origin: Origin,
    pub text: String,
}

/// Append-only transcript plus the single-request lifecycle flag.
///
/// A submission cycle is `begin` (append the user entry, raise `pending`)
/// followed by `resolve` (append the bot entry, clear `pending`). While
/// `pending` is raised, `begin` refuses further submissions, so entries
/// always alternate user, bot, user, bot.
pub struct ConversationState {
    entries: Vec<ChatEntry>,
    pending: bool,
    next_id: u64,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pending: false,
            next_id: 0,
        }
    }

    /// Starts a submission cycle. Returns `None` without touching the
    /// transcript if a request is already awaiting its response.
    pub fn begin(&mut self, text: &str) -> Option<ChatEntry> {
        if self.pending {
            return None;
        }

        self.pending = true;
        Some(self.push(Origin::User, text.to_string()))
    }

    /// Completes the in-flight cycle with the bot's text (generated or
    /// fallback). `pending` is cleared only after the entry is appended.
    pub fn resolve(&mut self, text: String) -> ChatEntry {
        debug_assert!(self.pending, "resolve without a pending submission");
        let entry = self.push(Origin::Bot, text);
        self.pending = false;
        entry
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    fn push(&mut self, origin: Origin, text: String) -> ChatEntry {
        let entry = ChatEntry {
            id: self.next_id,
            origin,
            text,
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        entry
    }
}
