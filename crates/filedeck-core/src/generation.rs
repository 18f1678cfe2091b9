//! Request generations used to drop responses that arrive out of order.

/// Generation a fetch was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw generation number, for logging.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic counter; only the most recently issued ticket is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    latest: u64,
}

impl RequestGeneration {
    /// Start a new fetch, superseding every earlier ticket.
    pub const fn issue(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket(self.latest)
    }

    /// Whether a response carrying `ticket` may still be applied.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let mut generation = RequestGeneration::default();
        let first = generation.issue();
        assert!(generation.is_current(first));
        let second = generation.issue();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(second.get(), first.get() + 1);
    }
}
