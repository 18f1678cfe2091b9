//! Bounded queue of transient notices.

/// Maximum number of notices kept; older ones are dropped first.
pub const MAX_VISIBLE_NOTICES: usize = 4;

/// Visual tone of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral information.
    Info,
    /// Completed action.
    Success,
    /// Failed action.
    Error,
}

impl NoticeKind {
    /// CSS modifier and log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Identifier used to dismiss the notice.
    pub id: u64,
    /// Tone.
    pub kind: NoticeKind,
    /// Text.
    pub message: String,
}

/// Newest-last queue holding at most [`MAX_VISIBLE_NOTICES`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeQueue {
    /// Append a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        if self.notices.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.notices.len() - MAX_VISIBLE_NOTICES;
            self.notices.drain(..overflow);
        }
        id
    }

    /// Append a success notice.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    /// Append an error notice.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    /// Remove a notice; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    /// Current notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_keeps_newest_four() {
        let mut queue = NoticeQueue::default();
        for n in 0..6 {
            queue.success(format!("n{n}"));
        }
        let messages: Vec<_> = queue.notices().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4", "n5"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = NoticeQueue::default();
        let first = queue.error("boom");
        let second = queue.success("ok");
        queue.dismiss(first);
        queue.dismiss(999);
        assert_eq!(queue.notices().len(), 1);
        assert_eq!(queue.notices()[0].id, second);
        assert_eq!(queue.notices()[0].kind.as_str(), "success");
    }
}
