//! Toast notifications and their display window.
use serde::{Deserialize, Serialize};

/// How long a notice stays visible.
pub const NOTICE_VISIBLE_MS: u32 = 2400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Success => "✅",
            Self::Error => "⚠️",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// Identifies one scheduled deferred callback. Only the most recently issued
/// ticket is honoured; older ones are stale and complete as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Issues [`Ticket`]s and tracks which one is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketClock {
    issued: u64,
    pending: Option<u64>,
}

impl TicketClock {
    /// Issue a new ticket, invalidating any pending one.
    pub fn issue(&mut self) -> Ticket {
        self.issued = self.issued.wrapping_add(1);
        self.pending = Some(self.issued);
        Ticket(self.issued)
    }

    /// Consume `ticket`; returns `true` only if it is still current.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket.0) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// The single visible toast slot. A newer notice replaces the current one and
/// restarts the hide timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeSlot {
    current: Option<Notice>,
    clock: TicketClock,
}

impl NoticeSlot {
    /// Show `notice`; the returned ticket hides it when completed.
    pub fn show(&mut self, notice: Notice) -> Ticket {
        self.current = Some(notice);
        self.clock.issue()
    }

    /// Hide the notice if `ticket` belongs to the latest `show`.
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        let fresh = self.clock.complete(ticket);
        if fresh {
            self.current = None;
        }
        fresh
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
