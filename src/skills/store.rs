//! Mutable progression aggregate: purchases, stat aggregation, remote merge.

use super::persistence::{
    load_legacy_upgrades, load_progression, migrate_legacy_upgrades, save_progression,
};
use super::types::{
    Modifiers, ProgressionState, PurchaseError, SkillNodeId, StatBonuses, STATE_VERSION,
};
use crate::core::constants::DAMAGE_REDUCTION_CAP;
use crate::remote::RemoteStore;
use crate::utils::persistence::data_dir;
use log::{debug, warn};
use std::path::PathBuf;
use std::rc::Rc;

/// Which side won the load-time reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    AdoptedRemote,
    KeptLocal,
}

/// Last-write-wins reconciliation, applied uniformly at load.
///
/// The remote copy is adopted wholesale only when it carries the current
/// schema version and a strictly newer `updated_at`; ties keep local. A
/// version-mismatched remote copy is treated as absent.
pub fn merge_remote(
    local: &ProgressionState,
    remote: Option<ProgressionState>,
) -> (ProgressionState, MergeOutcome) {
    match remote {
        Some(remote)
            if remote.version == STATE_VERSION && remote.updated_at > local.updated_at =>
        {
            (remote, MergeOutcome::AdoptedRemote)
        }
        _ => (local.clone(), MergeOutcome::KeptLocal),
    }
}

/// Owns [`ProgressionState`] for a session. All mutation goes through
/// [`purchase`](ProgressionStore::purchase); reads are derived on demand.
pub struct ProgressionStore {
    device_id: String,
    save_dir: Option<PathBuf>,
    remote: Option<Rc<dyn RemoteStore>>,
    state: ProgressionState,
}

impl ProgressionStore {
    /// Build an empty store. `save_dir: None` keeps the store memory-only
    /// (no disk writes); `remote: None` runs fully offline.
    pub fn new(
        device_id: impl Into<String>,
        save_dir: Option<PathBuf>,
        remote: Option<Rc<dyn RemoteStore>>,
    ) -> Self {
        ProgressionStore {
            device_id: device_id.into(),
            save_dir,
            remote,
            state: ProgressionState::default(),
        }
    }

    /// Build a store over the default per-device directory and hydrate it.
    pub fn open(device_id: &str, remote: Option<Rc<dyn RemoteStore>>, now_ms: i64) -> Self {
        let save_dir = match data_dir(device_id) {
            Ok(dir) => Some(dir),
            Err(e) => {
                warn!("progression cache dir unavailable: {}", e);
                None
            }
        };
        let mut store = ProgressionStore::new(device_id, save_dir, remote);
        store.hydrate(now_ms);
        store
    }

    /// Load local state, run legacy migration if the graph is empty, then
    /// reconcile with the remote copy (last-write-wins). When local wins it
    /// is pushed back so the mirror catches up.
    pub fn hydrate(&mut self, now_ms: i64) {
        let mut local = match &self.save_dir {
            Some(dir) => load_progression(dir),
            None => self.state.clone(),
        };

        // Legacy flat records migrate exactly once, only into an empty graph.
        if local.is_empty() {
            if let Some(dir) = &self.save_dir {
                if let Some(legacy) = load_legacy_upgrades(dir) {
                    local = migrate_legacy_upgrades(&legacy, now_ms);
                    debug!("migrated legacy upgrade record into skill graph");
                }
            }
        }

        if let Some(remote) = &self.remote {
            let fetched = remote.fetch_progression(&self.device_id);
            let (merged, outcome) = merge_remote(&local, fetched);
            local = merged;
            if outcome == MergeOutcome::KeptLocal {
                let _ = remote.push_progression(&self.device_id, &local);
            }
        }

        self.state = local;
        self.persist_local();
    }

    /// Attempt to buy the next rank of a node.
    ///
    /// `total_earned_points` is the session's lifetime point income; the
    /// store owns what has been spent, so the available balance can never
    /// go negative. Returns the charged cost, or the rejection reason
    /// without mutating anything.
    pub fn purchase(
        &mut self,
        node: SkillNodeId,
        total_earned_points: u32,
        now_ms: i64,
    ) -> Result<u32, PurchaseError> {
        let current = self.state.rank(node);
        if current >= node.max_rank() {
            return Err(PurchaseError::MaxRank {
                max_rank: node.max_rank(),
            });
        }

        for &(prerequisite, required) in node.prerequisites() {
            let have = self.state.rank(prerequisite);
            if have < required {
                return Err(PurchaseError::PrerequisiteUnmet {
                    prerequisite,
                    required,
                    have,
                });
            }
        }

        let cost = node.cost_at(current);
        let available = self.available_points(total_earned_points);
        if available < cost {
            return Err(PurchaseError::InsufficientPoints { cost, available });
        }

        self.state.unlocked.insert(node, current + 1);
        self.state.total_spent += cost;
        self.state.updated_at = now_ms;

        self.persist_local();
        if let Some(remote) = &self.remote {
            let _ = remote.push_progression(&self.device_id, &self.state);
        }
        Ok(cost)
    }

    pub fn rank(&self, node: SkillNodeId) -> u8 {
        self.state.rank(node)
    }

    pub fn total_spent(&self) -> u32 {
        self.state.total_spent
    }

    /// Points left to spend given lifetime income. Saturates at zero.
    pub fn available_points(&self, total_earned_points: u32) -> u32 {
        total_earned_points.saturating_sub(self.state.total_spent)
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Fold every purchased node's stat deltas into one snapshot.
    /// Queried by gameplay at entity-creation time.
    pub fn effective_stats(&self) -> StatBonuses {
        let mut total = StatBonuses::default();
        for node in SkillNodeId::ALL {
            let rank = self.state.rank(node);
            if rank > 0 {
                total.add(&node.effect(rank).stats);
            }
        }
        total
    }

    /// Fold every purchased node's modifiers: numeric values sum, flags OR,
    /// and damage reduction clamps to the design cap after summation.
    pub fn active_modifiers(&self) -> Modifiers {
        let mut total = Modifiers::default();
        for node in SkillNodeId::ALL {
            let rank = self.state.rank(node);
            if rank > 0 {
                total.add(&node.effect(rank).modifiers);
            }
        }
        total.damage_reduction_pct = total.damage_reduction_pct.min(DAMAGE_REDUCTION_CAP);
        total
    }

    fn persist_local(&self) {
        if let Some(dir) = &self.save_dir {
            if let Err(e) = save_progression(dir, &self.state) {
                warn!("progression cache write failed: {}", e);
            }
        }
    }
}
