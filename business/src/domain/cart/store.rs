use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::domain::shared::value_objects::LineId;

use super::errors::CartError;
use super::model::{CartLine, CartSnapshot, CartSummary, LineAmounts, PendingMutation};
use super::outcome::MutationOutcome;

/// Everything needed to put a removed line back where it was.
#[derive(Debug, Clone)]
pub struct RemovalTicket {
    pub line: CartLine,
    pub index: usize,
    was_selected: bool,
    epoch: u64,
}

/// The whole cart as it was before an optimistic clear.
#[derive(Debug, Clone)]
pub struct ClearTicket {
    pub snapshot: CartSnapshot,
    epoch: u64,
}

/// Sequence point a cart fetch was issued at. Confirmations issued after it
/// are newer than anything the fetch can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    as_of: u64,
}

/// Authoritative copy of a hidden line, as delivered by the latest refresh.
#[derive(Debug, Clone)]
struct ParkedLine {
    index: usize,
    line: CartLine,
}

#[derive(Debug, Default)]
struct CartState {
    snapshot: CartSnapshot,
    pending: HashMap<LineId, PendingMutation>,
    /// Sequence number of the newest authoritative amounts seen per line.
    confirmed_seq: HashMap<LineId, u64>,
    /// Lines removed optimistically whose removal (or clear) is still in flight.
    hidden: HashSet<LineId>,
    /// Settled amounts of hidden lines with the sequence they were settled at,
    /// applied if the lines come back on rollback.
    detached: HashMap<LineId, (u64, LineAmounts)>,
    /// Hidden lines the server still returned on the latest refresh.
    parked: HashMap<LineId, ParkedLine>,
    /// Sequence point of the last applied refresh.
    base_seq: u64,
    next_seq: u64,
    /// Bumped whenever the snapshot is replaced wholesale or cleared.
    epoch: u64,
    consecutive_failures: u32,
}

impl CartState {
    fn confirmed_seq(&self, line_id: LineId) -> u64 {
        self.confirmed_seq
            .get(&line_id)
            .copied()
            .unwrap_or(self.base_seq)
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// The last server-confirmed amounts of a visible line, ignoring any
    /// optimistic value currently shown.
    fn settled(&self, line_id: LineId) -> Option<(u64, LineAmounts)> {
        match self.pending.get(&line_id) {
            Some(pending) => Some((pending.prior_seq, pending.prior.clone())),
            None => self
                .snapshot
                .line(line_id)
                .map(|line| (self.confirmed_seq(line_id), line.amounts())),
        }
    }

    /// Records a confirmation that arrived with no pending intent left on
    /// the line. It wins only if nothing newer has been confirmed since.
    fn adopt_late_confirmation(&mut self, seq: u64, server: &CartLine) {
        let line_id = server.id;
        if seq <= self.confirmed_seq(line_id) {
            return;
        }
        self.confirmed_seq.insert(line_id, seq);
        if self.hidden.contains(&line_id) {
            self.detached.insert(line_id, (seq, server.amounts()));
        } else if let Some(line) = self.snapshot.line_mut(line_id) {
            line.merge_authoritative(server);
        }
    }

    fn reinsert(&mut self, index: usize, mut line: CartLine, selected: bool) {
        let line_id = line.id;
        if self.snapshot.position(line_id).is_some() {
            return;
        }
        if let Some((_, amounts)) = self.detached.remove(&line_id) {
            line.apply(&amounts);
        }
        let index = index.min(self.snapshot.lines.len());
        self.snapshot.lines.insert(index, line);
        if selected {
            self.snapshot.selected.insert(line_id);
        }
    }
}

/// The Local Cart Snapshot. Only the coordinator use cases write to it; every
/// mutation step runs under one lock acquisition, so readers never observe a
/// half-applied change.
#[derive(Debug, Default)]
pub struct CartStore {
    state: Mutex<CartState>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn line(&self, line_id: LineId) -> Option<CartLine> {
        self.lock().snapshot.line(line_id).cloned()
    }

    pub fn summary(&self) -> CartSummary {
        self.lock().snapshot.summary()
    }

    pub fn has_pending(&self, line_id: LineId) -> bool {
        self.lock().pending.contains_key(&line_id)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    /// Must be taken right before the cart fetch is sent.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            as_of: self.lock().next_seq,
        }
    }

    /// Replaces the snapshot with a cart fetched just now.
    pub fn replace(&self, lines: Vec<CartLine>, fetched_at: DateTime<Utc>) -> usize {
        let ticket = self.begin_refresh();
        self.resolve_refresh(ticket, lines, fetched_at)
    }

    /// Replaces the snapshot with the authoritative cart fetched at `ticket`.
    ///
    /// Quantity changes still in flight are re-applied on top of the fresh
    /// lines, confirmations newer than the fetch are kept, and lines with an
    /// in-flight removal stay hidden. A fetch older than the last applied one
    /// is dropped.
    pub fn resolve_refresh(
        &self,
        ticket: RefreshTicket,
        lines: Vec<CartLine>,
        fetched_at: DateTime<Utc>,
    ) -> usize {
        let mut guard = self.lock();
        let state = &mut *guard;
        let as_of = ticket.as_of;

        if as_of < state.base_seq {
            return state.snapshot.lines.len();
        }

        state.epoch += 1;
        state.consecutive_failures = 0;
        state.parked.clear();

        let mut fresh = Vec::with_capacity(lines.len());
        let mut confirmed_seq = HashMap::new();
        for (index, mut line) in lines.into_iter().enumerate() {
            let line_id = line.id;
            if state.hidden.contains(&line_id) {
                if let Some((seq, amounts)) = state.detached.remove(&line_id) {
                    if seq > as_of {
                        line.apply(&amounts);
                        confirmed_seq.insert(line_id, seq);
                    }
                }
                state.parked.insert(line_id, ParkedLine { index, line });
                continue;
            }
            if let Some((seq, amounts)) = state.settled(line_id) {
                if seq > as_of {
                    line.apply(&amounts);
                    confirmed_seq.insert(line_id, seq);
                }
            }
            fresh.push(line);
        }

        state.pending.retain(|line_id, pending| {
            let Some(line) = fresh.iter_mut().find(|line| line.id == *line_id) else {
                return false;
            };
            pending.prior = line.amounts();
            pending.prior_seq = confirmed_seq.get(line_id).copied().unwrap_or(as_of);
            pending.optimistic = line.priced_at(pending.optimistic.quantity);
            line.apply(&pending.optimistic);
            true
        });
        state.confirmed_seq = confirmed_seq;
        state.base_seq = as_of;

        let selected = state
            .snapshot
            .selected
            .iter()
            .copied()
            .filter(|line_id| fresh.iter().any(|line| line.id == *line_id))
            .collect();

        let line_count = fresh.len();
        state.snapshot = CartSnapshot {
            lines: fresh,
            selected,
            fetched_at: Some(fetched_at),
        };
        line_count
    }

    /// Validates the change and applies it optimistically.
    ///
    /// On success the returned record must be handed back to
    /// [`CartStore::resolve_set_quantity`] once the remote call settles.
    pub fn begin_set_quantity(
        &self,
        line_id: LineId,
        quantity: u32,
    ) -> Result<PendingMutation, CartError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let line = state
            .snapshot
            .line(line_id)
            .ok_or(CartError::LineNotFound(line_id))?;
        line.check_quantity(quantity)?;

        // A superseded call's optimistic value is never a rollback target.
        let (prior, prior_seq) = match state.pending.get(&line_id) {
            Some(outstanding) => (outstanding.prior.clone(), outstanding.prior_seq),
            None => (line.amounts(), state.confirmed_seq(line_id)),
        };
        let optimistic = line.priced_at(quantity);

        let seq = state.next_seq();
        let pending = PendingMutation {
            seq,
            line_id,
            prior,
            prior_seq,
            optimistic,
        };

        if let Some(line) = state.snapshot.line_mut(line_id) {
            line.apply(&pending.optimistic);
        }
        state.pending.insert(line_id, pending.clone());
        Ok(pending)
    }

    /// Reconciles the snapshot with the settled remote call for `issued`.
    pub fn resolve_set_quantity(
        &self,
        issued: &PendingMutation,
        result: Result<CartLine, CartError>,
    ) -> MutationOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        let line_id = issued.line_id;

        if result.is_ok() {
            state.consecutive_failures = 0;
        }

        let current_seq = state.pending.get(&line_id).map(|pending| pending.seq);
        match current_seq {
            Some(seq) if seq == issued.seq => {
                let Some(pending) = state.pending.remove(&line_id) else {
                    return MutationOutcome::Superseded;
                };
                let settled = match &result {
                    Ok(server) => {
                        state.confirmed_seq.insert(line_id, issued.seq);
                        (issued.seq, server.amounts())
                    }
                    Err(_) => (pending.prior_seq, pending.prior.clone()),
                };

                if state.hidden.contains(&line_id) {
                    state.detached.insert(line_id, settled);
                    return MutationOutcome::Superseded;
                }

                let Some(line) = state.snapshot.line_mut(line_id) else {
                    return MutationOutcome::Superseded;
                };
                match result {
                    Ok(server) => {
                        line.merge_authoritative(&server);
                        MutationOutcome::Updated(line.clone())
                    }
                    Err(error) => {
                        line.apply(&pending.prior);
                        state.consecutive_failures += 1;
                        MutationOutcome::RolledBack(error)
                    }
                }
            }
            Some(_) => {
                // A newer intent owns the display; only its rollback target may move.
                if let Ok(server) = result {
                    if issued.seq > state.confirmed_seq(line_id) {
                        state.confirmed_seq.insert(line_id, issued.seq);
                        if let Some(newer) = state.pending.get_mut(&line_id) {
                            if issued.seq > newer.prior_seq {
                                newer.prior = server.amounts();
                                newer.prior_seq = issued.seq;
                            }
                        }
                    }
                }
                MutationOutcome::Superseded
            }
            None => {
                // The newer intents already settled. If they all failed, the
                // server now holds this call's value.
                if let Ok(server) = result {
                    state.adopt_late_confirmation(issued.seq, &server);
                }
                MutationOutcome::Superseded
            }
        }
    }

    /// Removes the line from view, remembering its slot for rollback.
    pub fn begin_remove(&self, line_id: LineId) -> Result<RemovalTicket, CartError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let index = state
            .snapshot
            .position(line_id)
            .ok_or(CartError::LineNotFound(line_id))?;
        let line = state.snapshot.lines.remove(index);
        let was_selected = state.snapshot.selected.remove(&line_id);
        state.hidden.insert(line_id);

        Ok(RemovalTicket {
            line,
            index,
            was_selected,
            epoch: state.epoch,
        })
    }

    pub fn resolve_remove(
        &self,
        ticket: RemovalTicket,
        result: Result<(), CartError>,
    ) -> MutationOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        let line_id = ticket.line.id;

        state.hidden.remove(&line_id);
        let parked = state.parked.remove(&line_id);

        match result {
            Ok(()) => {
                state.consecutive_failures = 0;
                state.detached.remove(&line_id);
                state.pending.remove(&line_id);
                state.confirmed_seq.remove(&line_id);
                MutationOutcome::Removed(line_id)
            }
            Err(error) => {
                state.consecutive_failures += 1;
                // After a refresh only the copy the server returned may come back.
                let restored = if ticket.epoch == state.epoch {
                    Some((ticket.index, ticket.line))
                } else {
                    parked.map(|parked| (parked.index, parked.line))
                };
                match restored {
                    Some((index, line)) => state.reinsert(index, line, ticket.was_selected),
                    None => {
                        state.detached.remove(&line_id);
                    }
                }
                MutationOutcome::RolledBack(error)
            }
        }
    }

    /// Empties the cart optimistically, capturing lines and selection verbatim.
    pub fn begin_clear(&self) -> ClearTicket {
        let mut guard = self.lock();
        let state = &mut *guard;

        let snapshot = CartSnapshot {
            lines: std::mem::take(&mut state.snapshot.lines),
            selected: std::mem::take(&mut state.snapshot.selected),
            fetched_at: state.snapshot.fetched_at,
        };
        state
            .hidden
            .extend(snapshot.lines.iter().map(|line| line.id));
        state.epoch += 1;

        ClearTicket {
            snapshot,
            epoch: state.epoch,
        }
    }

    pub fn resolve_clear(
        &self,
        ticket: ClearTicket,
        result: Result<(), CartError>,
    ) -> MutationOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;

        let cleared: Vec<LineId> = ticket.snapshot.lines.iter().map(|line| line.id).collect();
        let mut parked: Vec<ParkedLine> = Vec::new();
        for line_id in &cleared {
            state.hidden.remove(line_id);
            if let Some(line) = state.parked.remove(line_id) {
                parked.push(line);
            }
        }

        match result {
            Ok(()) => {
                state.consecutive_failures = 0;
                for line_id in &cleared {
                    state.detached.remove(line_id);
                    state.pending.remove(line_id);
                    state.confirmed_seq.remove(line_id);
                }
                MutationOutcome::Cleared
            }
            Err(error) => {
                state.consecutive_failures += 1;
                if ticket.epoch == state.epoch && state.snapshot.is_empty() {
                    let mut restored = ticket.snapshot;
                    for line in restored.lines.iter_mut() {
                        if let Some((_, amounts)) = state.detached.remove(&line.id) {
                            line.apply(&amounts);
                        }
                    }
                    state.snapshot = restored;
                } else {
                    // Refreshed meanwhile: bring back what the server still holds.
                    parked.sort_by_key(|parked| parked.index);
                    for ParkedLine { index, line } in parked {
                        let selected = ticket.snapshot.selected.contains(&line.id);
                        state.reinsert(index, line, selected);
                    }
                    for line_id in &cleared {
                        state.detached.remove(line_id);
                    }
                }
                MutationOutcome::RolledBack(error)
            }
        }
    }

    pub fn set_selected(&self, line_id: LineId, selected: bool) -> Result<(), CartError> {
        let mut state = self.lock();
        if state.snapshot.position(line_id).is_none() {
            return Err(CartError::LineNotFound(line_id));
        }
        if selected {
            state.snapshot.selected.insert(line_id);
        } else {
            state.snapshot.selected.remove(&line_id);
        }
        Ok(())
    }

    pub fn select_all(&self, selected: bool) {
        let mut guard = self.lock();
        let state = &mut *guard;
        if selected {
            state.snapshot.selected = state.snapshot.lines.iter().map(|line| line.id).collect();
        } else {
            state.snapshot.selected.clear();
        }
    }
}
