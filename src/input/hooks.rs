//! Per-kind hook chains

use std::cell::Cell;
use std::rc::Rc;

use enum_map::EnumMap;
use tracing::{debug, trace};

use super::events::{EventKind, InputEvent};
use super::handler::Hook;

/// A hook as stored in a chain
#[derive(Debug)]
pub(crate) struct HookEntry {
    hook: Hook,
    live: Cell<bool>,
}

impl HookEntry {
    pub(crate) fn is_live(&self) -> bool {
        self.live.get()
    }

    pub(crate) fn kill(&self) {
        self.live.set(false);
    }
}

/// Ordered hook chains, one per event kind
#[derive(Debug, Default)]
pub struct HookRegistry {
    chains: EnumMap<EventKind, Vec<Rc<HookEntry>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook to the chain for `kind`; duplicates are kept
    pub fn add(&mut self, kind: EventKind, hook: Hook) {
        self.chains[kind].push(Rc::new(HookEntry {
            hook,
            live: Cell::new(true),
        }));
        debug!(?kind, chain_len = self.chains[kind].len(), "Hook added");
    }

    /// Remove the first chain entry for `kind` that is `hook`
    pub fn remove(&mut self, kind: EventKind, hook: &Hook) {
        let chain = &mut self.chains[kind];
        if let Some(pos) = chain.iter().position(|entry| entry.hook.same(hook)) {
            let entry = chain.remove(pos);
            entry.kill();
            debug!(?kind, chain_len = chain.len(), "Hook removed");
        }
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.chains[kind].len()
    }

    pub fn is_empty(&self, kind: EventKind) -> bool {
        self.chains[kind].is_empty()
    }

    /// Snapshot of the chain for `kind`, taken before dispatch starts
    pub(crate) fn chain(&self, kind: EventKind) -> Vec<Rc<HookEntry>> {
        self.chains[kind].clone()
    }

    /// Drop every hook, marking them dead for any dispatch in flight
    pub fn clear(&mut self) {
        for (_, chain) in self.chains.iter_mut() {
            for entry in chain.drain(..) {
                entry.kill();
            }
        }
    }
}

/// Run a chain snapshot in order, stopping at the first veto
///
/// An empty chain passes without touching the event. Entries removed while
/// the chain runs are skipped.
pub(crate) fn run_chain(chain: &[Rc<HookEntry>], event: &InputEvent) -> bool {
    for entry in chain {
        if !entry.is_live() {
            continue;
        }
        if !entry.hook.call(event) {
            trace!(kind = ?event.kind(), "Event vetoed by hook");
            return false;
        }
    }
    true
}
