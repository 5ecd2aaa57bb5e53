use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one request issued for a [QuerySlot].
///
/// Tickets are unique for the lifetime of the process, so a result can only ever be
/// applied to the slot instance that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState<T> {
    #[default]
    Idle,
    Loading,
    Error(String),
    Data(T),
}

/// Response slot owned by a single query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySlot<T> {
    state: QueryState<T>,
    in_flight: Option<QueryTicket>,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self {
            state: QueryState::Idle,
            in_flight: None,
        }
    }
}

impl<T> QuerySlot<T> {
    /// Marks the slot as loading and returns the ticket the result must carry.
    ///
    /// Any request already in flight becomes stale.
    pub fn start(&mut self) -> QueryTicket {
        let ticket = QueryTicket::next();
        self.state = QueryState::Loading;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Applies a result if `ticket` is the request currently in flight.
    ///
    /// Returns `false` when the result was stale and has been discarded.
    pub fn resolve(&mut self, ticket: QueryTicket, result: Result<T, String>) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(data) => QueryState::Data(data),
            Err(error) => QueryState::Error(error),
        };
        true
    }

    /// Forgets the current state; results of earlier requests are discarded.
    pub fn reset(&mut self) {
        self.state = QueryState::Idle;
        self.in_flight = None;
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            QueryState::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }
}
