//! Integration test: skill graph purchases, aggregation, and sync merge.
//!
//! Runs the progression store through full purchase chains (prerequisite
//! gating, cost curves, wallet bounds), the stat/modifier fold, and the
//! load-time reconciliation against an in-memory remote.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use voidstorm::core::constants::DAMAGE_REDUCTION_CAP;
use voidstorm::remote::RemoteStore;
use voidstorm::score::WaveScoreEntry;
use voidstorm::skills::{
    ProgressionState, ProgressionStore, PurchaseError, SkillNodeId, STATE_VERSION,
};

#[derive(Default)]
struct MemoryRemote {
    online: Cell<bool>,
    progression: RefCell<Option<ProgressionState>>,
}

impl MemoryRemote {
    fn online_with(state: Option<ProgressionState>) -> Rc<Self> {
        let remote = Rc::new(MemoryRemote {
            online: Cell::new(true),
            progression: RefCell::new(state),
        });
        remote
    }
}

impl RemoteStore for MemoryRemote {
    fn fetch_progression(&self, _device_id: &str) -> Option<ProgressionState> {
        if self.online.get() {
            self.progression.borrow().clone()
        } else {
            None
        }
    }

    fn push_progression(&self, _device_id: &str, state: &ProgressionState) -> bool {
        if self.online.get() {
            *self.progression.borrow_mut() = Some(state.clone());
        }
        self.online.get()
    }

    fn fetch_scores(&self, _device_id: &str) -> Option<Vec<WaveScoreEntry>> {
        None
    }

    fn push_score(&self, _device_id: &str, _entry: &WaveScoreEntry) -> bool {
        self.online.get()
    }

    fn reset_scores(&self, _device_id: &str) -> bool {
        self.online.get()
    }
}

fn memory_store() -> ProgressionStore {
    ProgressionStore::new("dev", None, None)
}

// =============================================================================
// Purchase chains
// =============================================================================

#[test]
fn test_documented_cost_curve_example() {
    // base 150, scale 1.5: first rank costs 150, second floor(150*1.5) = 225
    let mut store = memory_store();
    assert_eq!(store.purchase(SkillNodeId::HollowPoint, 10_000, 1), Ok(150));
    assert_eq!(store.purchase(SkillNodeId::HollowPoint, 10_000, 2), Ok(225));
}

#[test]
fn test_prerequisite_chain_unlocks_in_order() {
    let mut store = memory_store();
    let budget = 1_000_000;

    // Bulwark needs Aegis 2, which needs Plating 2.
    assert!(matches!(
        store.purchase(SkillNodeId::Bulwark, budget, 1),
        Err(PurchaseError::PrerequisiteUnmet { .. })
    ));

    store.purchase(SkillNodeId::Plating, budget, 1).unwrap();
    store.purchase(SkillNodeId::Plating, budget, 2).unwrap();
    assert!(matches!(
        store.purchase(SkillNodeId::Bulwark, budget, 3),
        Err(PurchaseError::PrerequisiteUnmet { .. })
    ));

    store.purchase(SkillNodeId::Aegis, budget, 4).unwrap();
    store.purchase(SkillNodeId::Aegis, budget, 5).unwrap();
    assert!(store.purchase(SkillNodeId::Bulwark, budget, 6).is_ok());
}

#[test]
fn test_wallet_never_goes_negative_and_ranks_never_exceed_cap() {
    let mut store = memory_store();
    let earned = 700;

    // Spend the wallet down; every acceptance stays within budget.
    let mut guard = 0;
    loop {
        match store.purchase(SkillNodeId::RapidFire, earned, 1) {
            Ok(_) => {
                assert!(store.total_spent() <= earned);
            }
            Err(_) => break,
        }
        guard += 1;
        assert!(guard < 20, "purchase loop never rejected");
    }

    assert!(store.rank(SkillNodeId::RapidFire) <= SkillNodeId::RapidFire.max_rank());
    assert_eq!(
        store.available_points(earned),
        earned - store.total_spent()
    );

    // Repeated attempts after rejection change nothing.
    let spent = store.total_spent();
    assert!(store.purchase(SkillNodeId::RapidFire, earned, 2).is_err());
    assert_eq!(store.total_spent(), spent);
}

#[test]
fn test_max_rank_rejection_is_stable() {
    let mut store = memory_store();
    let budget = 1_000_000;
    for _ in 0..SkillNodeId::Magnet.max_rank() {
        store.purchase(SkillNodeId::Magnet, budget, 1).unwrap();
    }
    for _ in 0..3 {
        assert_eq!(
            store.purchase(SkillNodeId::Magnet, budget, 2),
            Err(PurchaseError::MaxRank {
                max_rank: SkillNodeId::Magnet.max_rank()
            })
        );
    }
    assert_eq!(store.rank(SkillNodeId::Magnet), SkillNodeId::Magnet.max_rank());
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_stats_and_modifiers_fold_over_every_node() {
    let mut store = memory_store();
    let budget = 1_000_000;

    store.purchase(SkillNodeId::HollowPoint, budget, 1).unwrap(); // +2 dmg
    store.purchase(SkillNodeId::RapidFire, budget, 2).unwrap(); // +8% fire rate
    store.purchase(SkillNodeId::Plating, budget, 3).unwrap(); // +20 hp
    store.purchase(SkillNodeId::LuckyShot, budget, 4).unwrap(); // +3% crit
    store.purchase(SkillNodeId::LuckyShot, budget, 5).unwrap(); // +3% crit
    store.purchase(SkillNodeId::PetDrone, budget, 6).unwrap(); // flag

    let stats = store.effective_stats();
    assert_eq!(stats.damage, 2.0);
    assert_eq!(stats.fire_rate_pct, 8.0);
    assert_eq!(stats.max_hp, 20.0);

    let modifiers = store.active_modifiers();
    assert_eq!(modifiers.crit_chance_pct, 6.0);
    assert!(modifiers.pet_drone);
    assert!(!modifiers.shield_after_idle);
}

#[test]
fn test_damage_reduction_cap_holds_at_full_stack() {
    let mut store = memory_store();
    let budget = 10_000_000;
    for _ in 0..SkillNodeId::Plating.max_rank() {
        store.purchase(SkillNodeId::Plating, budget, 1).unwrap();
    }
    for _ in 0..SkillNodeId::Aegis.max_rank() {
        store.purchase(SkillNodeId::Aegis, budget, 1).unwrap();
    }
    for _ in 0..SkillNodeId::Bulwark.max_rank() {
        store.purchase(SkillNodeId::Bulwark, budget, 1).unwrap();
    }
    assert_eq!(
        store.active_modifiers().damage_reduction_pct,
        DAMAGE_REDUCTION_CAP
    );
}

// =============================================================================
// Remote reconciliation
// =============================================================================

#[test]
fn test_newer_remote_state_is_adopted_on_hydrate() {
    let mut canned = ProgressionState::default();
    canned.unlocked.insert(SkillNodeId::Sprinter, 2);
    canned.total_spent = 216;
    canned.updated_at = 9_000;
    let remote = MemoryRemote::online_with(Some(canned));

    let mut store = ProgressionStore::new("dev", None, Some(remote as Rc<dyn RemoteStore>));
    store.hydrate(1);
    assert_eq!(store.rank(SkillNodeId::Sprinter), 2);
    assert_eq!(store.total_spent(), 216);
}

#[test]
fn test_version_mismatched_remote_is_ignored() {
    let mut foreign = ProgressionState::default();
    foreign.version = STATE_VERSION + 7;
    foreign.unlocked.insert(SkillNodeId::Overcharge, 3);
    foreign.updated_at = i64::MAX;
    let remote = MemoryRemote::online_with(Some(foreign));

    let mut store = ProgressionStore::new("dev", None, Some(remote.clone() as Rc<dyn RemoteStore>));
    store.hydrate(1);
    assert_eq!(store.rank(SkillNodeId::Overcharge), 0);

    // Local (empty but current-version) state was pushed back over it.
    let mirrored = remote.progression.borrow().clone().unwrap();
    assert_eq!(mirrored.version, STATE_VERSION);
}

#[test]
fn test_purchases_mirror_to_remote_and_survive_outages() {
    let remote = MemoryRemote::online_with(None);
    let mut store = ProgressionStore::new("dev", None, Some(remote.clone() as Rc<dyn RemoteStore>));
    store.hydrate(1);

    store.purchase(SkillNodeId::RapidFire, 1_000, 100).unwrap();
    assert_eq!(
        remote.progression.borrow().as_ref().unwrap().updated_at,
        100
    );

    // Outage mid-session: the purchase still lands locally.
    remote.online.set(false);
    store.purchase(SkillNodeId::RapidFire, 1_000, 200).unwrap();
    assert_eq!(store.rank(SkillNodeId::RapidFire), 2);
    assert_eq!(
        remote.progression.borrow().as_ref().unwrap().updated_at,
        100
    );

    // A fresh session with no local state adopts whatever the mirror holds.
    remote.online.set(true);
    let mut rejoined =
        ProgressionStore::new("dev", None, Some(remote.clone() as Rc<dyn RemoteStore>));
    rejoined.hydrate(300);
    assert_eq!(rejoined.rank(SkillNodeId::RapidFire), 1);
}
