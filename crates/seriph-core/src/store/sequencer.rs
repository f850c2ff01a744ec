// ── Response sequencing ──
//
// Overlapping actions on one controller are not cancelled; each gets a
// ticket and the store decides at settle time whether the response may
// still touch state.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// How a controller treats responses that resolve out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseOrdering {
    /// A read whose request was superseded on the same lane is dropped:
    /// state always reflects the most recently *issued* read. `reset()`
    /// drops everything in flight.
    #[default]
    LatestRequest,
    /// No guarding: whichever response resolves last wins, even if its
    /// request was issued first.
    LastResolved,
}

/// Issued at the start of an action, checked when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    lane: Option<(&'static str, u64)>,
}

pub(crate) struct Sequencer {
    ordering: ResponseOrdering,
    epoch: AtomicU64,
    lanes: DashMap<&'static str, u64>,
}

impl Sequencer {
    pub(crate) fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            epoch: AtomicU64::new(0),
            lanes: DashMap::new(),
        }
    }

    pub(crate) fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub(crate) fn set_ordering(&mut self, ordering: ResponseOrdering) {
        self.ordering = ordering;
    }

    /// Issue a ticket. `lane` names a replacing read; `None` marks an
    /// incremental mutation that is only invalidated by `reset`.
    pub(crate) fn issue(&self, lane: Option<&'static str>) -> Ticket {
        let epoch = self.epoch.load(Ordering::SeqCst);
        let lane = lane.map(|name| {
            let mut generation = self.lanes.entry(name).or_insert(0);
            *generation += 1;
            (name, *generation)
        });
        Ticket { epoch, lane }
    }

    pub(crate) fn is_current(&self, ticket: &Ticket) -> bool {
        if self.ordering == ResponseOrdering::LastResolved {
            return true;
        }
        if self.epoch.load(Ordering::SeqCst) != ticket.epoch {
            return false;
        }
        match ticket.lane {
            None => true,
            Some((name, generation)) => self.lanes.get(name).is_some_and(|g| *g == generation),
        }
    }

    /// Invalidate every ticket issued so far.
    pub(crate) fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}
