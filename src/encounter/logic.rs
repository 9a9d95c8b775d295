//! The encounter controller: one state machine instance per run.
//!
//! The host render loop calls [`EncounterController::update`] every frame
//! and reports collision-system callbacks through the `report_*` methods.
//! All transitions happen synchronously inside `update`; a single phase
//! timer drives the timed choreography and is cancelled wholesale on
//! [`reset`](EncounterController::reset), so no orphaned callback can
//! mutate a torn-down encounter.

use super::placement::{boss_positions, find_spawn_point, place_obstacles};
use super::types::{
    BossState, EncounterConfig, EncounterEvent, Obstacle, Phase, WaveHudState,
};
use crate::score::{ScoreLedger, WaveStats};
use crate::waves::{wave_spec, BossKind, WaveProgress};
use glam::Vec2;
use rand::Rng;
use std::collections::HashMap;

pub struct EncounterController {
    config: EncounterConfig,
    phase: Phase,
    wave_number: u32,
    progress: WaveProgress,
    /// Remaining time in the current timed phase. The only pending
    /// "callback" in the machine; reset cancels it with everything else.
    phase_timer: f64,
    spawn_timer: f64,
    /// Time spent in combat this wave, feeding the speed bonus.
    combat_elapsed: f64,
    /// Monotonic clock over the whole run, used for hit debouncing.
    run_clock: f64,
    bosses: Vec<BossState>,
    obstacles: Vec<Obstacle>,
    /// Boss id -> run_clock of the last accepted hit.
    last_boss_hit: HashMap<u32, f64>,
    next_entity_id: u32,
    pending: Vec<EncounterEvent>,
}

impl EncounterController {
    pub fn new(config: EncounterConfig) -> Self {
        EncounterController {
            config,
            phase: Phase::Idle,
            wave_number: 0,
            progress: WaveProgress::default(),
            phase_timer: 0.0,
            spawn_timer: 0.0,
            combat_elapsed: 0.0,
            run_clock: 0.0,
            bosses: Vec::new(),
            obstacles: Vec::new(),
            last_boss_hit: HashMap::new(),
            next_entity_id: 1,
            pending: Vec::new(),
        }
    }

    /// Begin a wave. Resets the per-wave counters and re-derives the spec;
    /// boss waves run the intro/countdown choreography before anything
    /// spawns, regular waves arm the spawn timer immediately.
    ///
    /// Events surface on the next `update` call.
    pub fn start_wave(&mut self, wave_number: u32) {
        self.wave_number = wave_number.max(1);
        self.progress.reset();
        self.bosses.clear();
        self.obstacles.clear();
        self.last_boss_hit.clear();
        self.spawn_timer = 0.0;
        self.combat_elapsed = 0.0;

        let spec = wave_spec(self.wave_number);
        self.pending.push(EncounterEvent::WaveStarted {
            wave_number: self.wave_number,
            title: spec.title.clone(),
        });
        if spec.is_boss {
            self.phase = Phase::Intro;
            self.phase_timer = self.config.intro_secs;
            self.pending.push(EncounterEvent::BossIntroStarted {
                wave_number: self.wave_number,
            });
        } else {
            self.phase = Phase::InCombat;
        }
    }

    /// Advance the machine by `dt` seconds. Returns the effects the host
    /// engine must apply this frame, including any queued by `report_*`
    /// calls since the last tick.
    pub fn update<R: Rng>(
        &mut self,
        dt: f64,
        player_pos: Vec2,
        ledger: &mut ScoreLedger,
        now_ms: i64,
        rng: &mut R,
    ) -> Vec<EncounterEvent> {
        let mut events = std::mem::take(&mut self.pending);
        self.run_clock += dt;

        match self.phase {
            Phase::Idle => {}
            Phase::Intro => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.phase = Phase::Countdown;
                    self.phase_timer = self.config.countdown_secs;
                    events.push(EncounterEvent::BossCountdownStarted {
                        wave_number: self.wave_number,
                    });
                }
            }
            Phase::Countdown => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.spawn_bosses(player_pos, rng, &mut events);
                    self.phase = Phase::InCombat;
                }
            }
            Phase::InCombat => {
                self.combat_elapsed += dt;
                let spec = wave_spec(self.wave_number);
                if !spec.is_boss {
                    self.spawn_timer += dt;
                    let delay = spec.spawn_delay_ms as f64 / 1000.0;
                    while self.spawn_timer >= delay && self.progress.spawned < spec.enemy_count {
                        self.spawn_timer -= delay;
                        let kind = spec.sample_kind(rng);
                        let pos = find_spawn_point(player_pos, &self.config, rng);
                        self.progress.spawned += 1;
                        events.push(EncounterEvent::SpawnEnemy { kind, pos });
                    }
                }
                if self.is_wave_complete() {
                    let recorded = self.record_completion(ledger, now_ms);
                    self.phase = Phase::Cleared;
                    self.phase_timer = self.config.cleared_linger_secs;
                    events.push(EncounterEvent::WaveCompleted {
                        wave_number: self.wave_number,
                        recorded,
                    });
                }
            }
            Phase::Cleared => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    let spec = wave_spec(self.wave_number);
                    self.phase = Phase::Break;
                    self.phase_timer = spec.break_duration_ms as f64 / 1000.0;
                    events.push(EncounterEvent::BreakStarted {
                        duration_ms: spec.break_duration_ms,
                    });
                }
            }
            Phase::Break => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.start_wave(self.wave_number + 1);
                    events.append(&mut self.pending);
                }
            }
        }

        events
    }

    /// Collision callback: a regular enemy died.
    pub fn report_enemy_killed(&mut self) {
        if self.phase == Phase::InCombat && self.progress.killed < self.progress.spawned {
            self.progress.killed += 1;
        }
    }

    /// Collision callback: a player bullet hit a boss.
    ///
    /// Hits inside the debounce window for the same boss id are dropped —
    /// one physics step can deliver the same overlap twice. Returns whether
    /// the hit was applied.
    pub fn report_boss_hit(&mut self, boss_id: u32, damage: i32) -> bool {
        if self.phase != Phase::InCombat {
            return false;
        }
        if let Some(&last) = self.last_boss_hit.get(&boss_id) {
            if self.run_clock - last < self.config.boss_hit_debounce_secs {
                return false;
            }
        }
        let idx = match self.bosses.iter().position(|b| b.id == boss_id) {
            Some(idx) => idx,
            None => return false,
        };
        if self.bosses[idx].is_defeated() {
            return false;
        }

        self.last_boss_hit.insert(boss_id, self.run_clock);
        self.bosses[idx].hp -= damage.max(0);

        let boss = &self.bosses[idx];
        self.pending.push(EncounterEvent::BossDamaged {
            id: boss.id,
            hp: boss.hp.max(0),
            max_hp: boss.max_hp,
        });
        if boss.is_defeated() {
            self.pending.push(EncounterEvent::BossDefeated {
                id: boss.id,
                kind: boss.kind,
            });
        }
        true
    }

    /// Collision callback: a player bullet hit a pillar. Hits past zero are
    /// no-ops; destruction is one-way. Returns whether the hit was applied.
    pub fn report_obstacle_hit(&mut self, obstacle_id: u32) -> bool {
        if self.phase != Phase::InCombat {
            return false;
        }
        let obstacle = match self.obstacles.iter_mut().find(|o| o.id == obstacle_id) {
            Some(o) => o,
            None => return false,
        };
        if obstacle.destroyed || obstacle.hp == 0 {
            return false;
        }
        obstacle.hp -= 1;
        if obstacle.hp == 0 {
            obstacle.destroyed = true;
            let id = obstacle.id;
            self.pending.push(EncounterEvent::ObstacleDestroyed { id });
        }
        true
    }

    /// Completion check. Regular waves require every enemy spawned and
    /// killed with no boss active; boss waves require every boss defeated
    /// (both of them, on rush waves).
    pub fn is_wave_complete(&self) -> bool {
        if self.phase != Phase::InCombat {
            return false;
        }
        let spec = wave_spec(self.wave_number);
        if spec.is_boss {
            !self.bosses.is_empty() && self.bosses.iter().all(|b| b.is_defeated())
        } else {
            self.bosses.is_empty()
                && self.progress.spawned == spec.enemy_count
                && self.progress.killed == spec.enemy_count
        }
    }

    /// Tear the machine down to `Idle`, cancelling the pending phase timer
    /// and dropping queued events.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = EncounterController::new(config);
    }

    /// HUD snapshot for the display layer.
    pub fn hud(&self) -> WaveHudState {
        let title = if self.wave_number == 0 {
            String::new()
        } else {
            wave_spec(self.wave_number).title
        };
        WaveHudState {
            wave_number: self.wave_number,
            title,
            phase: self.phase,
            boss_health_pct: self.bosses.iter().map(|b| b.health_pct()).collect(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn progress(&self) -> WaveProgress {
        self.progress
    }

    pub fn bosses(&self) -> &[BossState] {
        &self.bosses
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    fn spawn_bosses<R: Rng>(
        &mut self,
        player_pos: Vec2,
        rng: &mut R,
        events: &mut Vec<EncounterEvent>,
    ) {
        let spec = wave_spec(self.wave_number);
        let kind = spec.boss_kind.unwrap_or(BossKind::Sentinel);
        let count = spec.boss_count().max(1);

        for pos in boss_positions(count, &self.config) {
            let id = self.next_id();
            let max_hp = kind.max_hp(self.wave_number);
            self.bosses.push(BossState {
                id,
                kind,
                hp: max_hp,
                max_hp,
                pos,
            });
            events.push(EncounterEvent::BossSpawned {
                id,
                kind,
                pos,
                max_hp,
            });
        }

        for pos in place_obstacles(player_pos, &self.config, rng) {
            let id = self.next_id();
            self.obstacles.push(Obstacle::new(id, pos));
            events.push(EncounterEvent::ObstacleSpawned { id, pos });
        }
    }

    fn record_completion(&mut self, ledger: &mut ScoreLedger, now_ms: i64) -> bool {
        let spec = wave_spec(self.wave_number);
        let stats = WaveStats {
            spawned: self.progress.spawned,
            killed: self.progress.killed,
            clear_time_secs: self.combat_elapsed,
        };
        ledger.complete_wave(
            self.wave_number,
            0,
            spec.is_boss,
            spec.boss_kind,
            &stats,
            now_ms,
        )
    }
}
