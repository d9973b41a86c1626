//! Request tickets for latest-wins updates.
//!
//! Every request a view starts is stamped with a [`Ticket`]. When a response
//! comes back the view applies it only if its ticket is still the latest one
//! issued, so a slow earlier response can never overwrite a newer one.

/// Token identifying one request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues tickets and remembers the newest.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issue a ticket newer than every previous one.
    pub const fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Whether `ticket` is the most recently issued.
    #[must_use]
    pub const fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}
