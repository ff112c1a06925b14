/// An item's current in-run assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TentativeEntry {
    /// Agent the item is held by.
    pub agent: usize,
    /// Share of the item assigned, in `(0, 1]`. The phase engine always
    /// assigns whole items; the field exists so the rounding step can price
    /// partial holdings uniformly.
    pub fraction: f64,
}

/// The mutable assignment the phase engine works on.
///
/// Kept consistent from both sides: an item knows its entry, an agent knows
/// the list of items it holds. Nothing here is final until the rounding step
/// has enforced the budgets.
#[derive(Debug, Clone)]
pub struct TentativeAllocation {
    entries: Vec<Option<TentativeEntry>>,
    held: Vec<Vec<usize>>,
    assigned: usize,
}

impl TentativeAllocation {
    pub fn new(num_agents: usize, num_items: usize) -> Self {
        Self {
            entries: vec![None; num_items],
            held: vec![Vec::new(); num_agents],
            assigned: 0,
        }
    }

    pub fn num_items(&self) -> usize {
        self.entries.len()
    }

    pub fn num_agents(&self) -> usize {
        self.held.len()
    }

    pub fn is_assigned(&self, item: usize) -> bool {
        self.entries[item].is_some()
    }

    pub fn entry(&self, item: usize) -> Option<&TentativeEntry> {
        self.entries[item].as_ref()
    }

    pub fn owner(&self, item: usize) -> Option<usize> {
        self.entries[item].map(|e| e.agent)
    }

    /// Items currently held by `agent`, in commit order.
    pub fn held(&self, agent: usize) -> &[usize] {
        &self.held[agent]
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned
    }

    /// Hands `item` to `agent`. The item must currently be unassigned.
    pub fn assign(&mut self, item: usize, agent: usize, fraction: f64) {
        debug_assert!(self.entries[item].is_none());
        debug_assert!(fraction > 0.0 && fraction <= 1.0);
        self.entries[item] = Some(TentativeEntry { agent, fraction });
        self.held[agent].push(item);
        self.assigned += 1;
    }

    /// Withdraws `item` from its holder, returning the holder's id.
    pub fn release(&mut self, item: usize) -> Option<usize> {
        let entry = self.entries[item].take()?;
        let held = &mut self.held[entry.agent];
        if let Some(pos) = held.iter().position(|&h| h == item) {
            held.remove(pos);
        }
        self.assigned -= 1;
        Some(entry.agent)
    }

    /// Withdraws everything `agent` holds, returning the items.
    pub fn release_all_of(&mut self, agent: usize) -> Vec<usize> {
        let items = std::mem::take(&mut self.held[agent]);
        for &item in &items {
            self.entries[item] = None;
        }
        self.assigned -= items.len();
        items
    }

    /// All assigned items with their entries, by ascending item id.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (usize, &TentativeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(item, entry)| entry.as_ref().map(|e| (item, e)))
    }
}
