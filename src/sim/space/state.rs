//! Space shooter state and entity types
//!
//! One aggregate [`SpaceState`] per run owns every collection. Per-kind data
//! (health, points, sizes, rarity) lives in lookup tables on closed enums.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::create_enemy_wave;
use crate::profile::Loadout;
use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::ids::{EntityId, IdAllocator};
use crate::sim::particles::{Particle, ParticleField};
use crate::sim::runner::{FrameInput, RunPhase};

pub const GAME_WIDTH: f32 = 520.0;
pub const GAME_HEIGHT: f32 = 700.0;
pub const PLAYER_WIDTH: f32 = 36.0;
pub const PLAYER_HEIGHT: f32 = 28.0;
pub const PLAYER_SPEED: f32 = 7.0;
/// Highest the player may fly
pub const PLAYER_MIN_Y: f32 = GAME_HEIGHT - 280.0;
pub const PLAYER_MAX_Y: f32 = GAME_HEIGHT - 40.0;
pub const BULLET_SPEED: f32 = 10.0;
pub const BASE_BULLET_SIZE: f32 = 4.0;
pub const GIANT_BULLET_SIZE: f32 = 12.0;
pub const ENEMY_WIDTH: f32 = 30.0;
pub const ENEMY_HEIGHT: f32 = 26.0;
pub const PICKUP_SIZE: f32 = 24.0;
pub const TOTAL_WAVES: u32 = 50;
pub const BOSS_WAVE_INTERVAL: u32 = 5;
pub const BASE_LIVES: u32 = 3;
/// Enemies past this line overrun the player
pub const LOSE_LINE_Y: f32 = GAME_HEIGHT - 100.0;
/// Boss is targetable and fights once it has descended this far
pub const BOSS_ENGAGE_Y: f32 = 60.0;
pub const BOSS_INTRO_TICKS: u32 = 120;
pub const BOSS_INTRO_STOP_Y: f32 = 80.0;
pub const COMBO_WINDOW_TICKS: u32 = 90;
pub const MAX_COMBO_MULTIPLIER: u32 = 10;
pub const BUFF_DURATION_TICKS: u32 = 600;
pub const SLOWMO_DURATION_TICKS: u32 = 400;
pub const SLOWMO_FACTOR: f32 = 0.4;
pub const GHOST_TICKS: u32 = 180;
pub const FREEZE_TICKS: u32 = 180;
pub const BERSERK_TICKS: u32 = 400;
pub const SHIELD_CHARGES: u32 = 3;
/// Distance from the player inside which enemy bullets vanish after a hit
pub const MERCY_RADIUS: f32 = 80.0;
pub const EXPLOSIVE_SPLASH_RADIUS: f32 = 50.0;

/// Enemy vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Grunt,
    Speeder,
    Tank,
    Bomber,
    Sniper,
    Splitter,
    Zigzag,
    Elite,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub health: f32,
    pub points: u64,
    pub color: u32,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        let (health, points, color) = match self {
            EnemyKind::Grunt => (1.0, 10, 0x22c55e),
            EnemyKind::Speeder => (1.0, 20, 0xec4899),
            EnemyKind::Tank => (4.0, 50, 0xf59e0b),
            EnemyKind::Bomber => (2.0, 30, 0xef4444),
            EnemyKind::Sniper => (2.0, 40, 0x8b5cf6),
            EnemyKind::Splitter => (3.0, 35, 0x06b6d4),
            EnemyKind::Zigzag => (2.0, 25, 0xfacc15),
            EnemyKind::Elite => (6.0, 100, 0xf43f5e),
        };
        EnemyStats {
            health,
            points,
            color,
        }
    }
}

/// Boss vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossKind {
    Mothership,
    Kraken,
    Phoenix,
    Hydra,
    Deathstar,
}

#[derive(Debug, Clone, Copy)]
pub struct BossStats {
    pub name: &'static str,
    pub base_health: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl BossKind {
    /// Encounter order, one per boss wave
    pub const ROTATION: [BossKind; 5] = [
        BossKind::Mothership,
        BossKind::Kraken,
        BossKind::Phoenix,
        BossKind::Hydra,
        BossKind::Deathstar,
    ];

    pub const fn stats(self) -> BossStats {
        let (name, base_health, width, height, color) = match self {
            BossKind::Mothership => ("MOTHERSHIP", 50.0, 120.0, 60.0, 0x22c55e),
            BossKind::Kraken => ("COSMIC KRAKEN", 80.0, 140.0, 100.0, 0xa855f7),
            BossKind::Phoenix => ("SPACE PHOENIX", 100.0, 130.0, 80.0, 0xf97316),
            BossKind::Hydra => ("CYBER HYDRA", 130.0, 150.0, 110.0, 0x14b8a6),
            BossKind::Deathstar => ("DEATH STAR", 180.0, 160.0, 160.0, 0xef4444),
        };
        BossStats {
            name,
            base_health,
            width,
            height,
            color,
        }
    }
}

/// Pickup vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Rapid,
    Shield,
    Spread,
    Laser,
    Missile,
    Slowmo,
    Nuke,
    Extralife,
    Magnet,
    Ghost,
    Doublepoints,
    Freeze,
    Ricochet,
    Homing,
    Giant,
    Vampire,
    Berserk,
    Wingmen,
    Blackhole,
    Lightning,
    Firetrail,
    Minigun,
    Explosive,
    Orbital,
    Coin,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerUpInfo {
    pub name: &'static str,
    /// Higher is rarer; drop weight is proportional to 1/rarity
    pub rarity: f32,
    pub color: u32,
}

impl PowerUpKind {
    /// Everything a random drop can produce (coins drop separately)
    pub const DROPPABLE: [PowerUpKind; 24] = [
        PowerUpKind::Rapid,
        PowerUpKind::Shield,
        PowerUpKind::Spread,
        PowerUpKind::Laser,
        PowerUpKind::Missile,
        PowerUpKind::Slowmo,
        PowerUpKind::Nuke,
        PowerUpKind::Extralife,
        PowerUpKind::Magnet,
        PowerUpKind::Ghost,
        PowerUpKind::Doublepoints,
        PowerUpKind::Freeze,
        PowerUpKind::Ricochet,
        PowerUpKind::Homing,
        PowerUpKind::Giant,
        PowerUpKind::Vampire,
        PowerUpKind::Berserk,
        PowerUpKind::Wingmen,
        PowerUpKind::Blackhole,
        PowerUpKind::Lightning,
        PowerUpKind::Firetrail,
        PowerUpKind::Minigun,
        PowerUpKind::Explosive,
        PowerUpKind::Orbital,
    ];

    pub const fn info(self) -> PowerUpInfo {
        let (name, rarity, color) = match self {
            PowerUpKind::Rapid => ("Rapid Fire", 1.0, 0xf97316),
            PowerUpKind::Shield => ("Shield", 1.0, 0x3b82f6),
            PowerUpKind::Spread => ("Spread", 1.0, 0xa855f7),
            PowerUpKind::Laser => ("Laser", 1.5, 0x06b6d4),
            PowerUpKind::Missile => ("Missiles", 1.5, 0xef4444),
            PowerUpKind::Slowmo => ("Slow-Mo", 1.0, 0x22c55e),
            PowerUpKind::Nuke => ("NUKE", 6.0, 0xfbbf24),
            PowerUpKind::Extralife => ("+1 Life", 6.0, 0xec4899),
            PowerUpKind::Magnet => ("Magnet", 1.5, 0x6366f1),
            PowerUpKind::Ghost => ("Phase", 2.0, 0xe2e8f0),
            PowerUpKind::Doublepoints => ("2X Points", 1.5, 0xfcd34d),
            PowerUpKind::Freeze => ("Freeze", 2.0, 0x7dd3fc),
            PowerUpKind::Ricochet => ("Ricochet", 2.0, 0xc084fc),
            PowerUpKind::Homing => ("Homing", 2.0, 0xf472b6),
            PowerUpKind::Giant => ("Giant", 1.5, 0xdc2626),
            PowerUpKind::Vampire => ("Lifesteal", 3.0, 0x7f1d1d),
            PowerUpKind::Berserk => ("Berserk", 3.0, 0xb91c1c),
            PowerUpKind::Wingmen => ("Wingmen", 3.0, 0x0ea5e9),
            PowerUpKind::Blackhole => ("Black Hole", 4.0, 0x1e1b4b),
            PowerUpKind::Lightning => ("Lightning", 3.0, 0xa5b4fc),
            PowerUpKind::Firetrail => ("Fire Trail", 2.0, 0xea580c),
            PowerUpKind::Minigun => ("Minigun", 3.0, 0x737373),
            PowerUpKind::Explosive => ("Explosive", 3.0, 0xdc2626),
            PowerUpKind::Orbital => ("Orbitals", 4.0, 0xfef08a),
            PowerUpKind::Coin => ("Coin", 1.0, 0xfbbf24),
        };
        PowerUpInfo {
            name,
            rarity,
            color,
        }
    }

    /// Duration for buffs tracked in the active list; `None` for instant kinds
    pub const fn timed_duration(self) -> Option<u32> {
        match self {
            PowerUpKind::Slowmo => Some(SLOWMO_DURATION_TICKS),
            PowerUpKind::Rapid
            | PowerUpKind::Spread
            | PowerUpKind::Laser
            | PowerUpKind::Missile
            | PowerUpKind::Magnet
            | PowerUpKind::Doublepoints
            | PowerUpKind::Ricochet
            | PowerUpKind::Homing
            | PowerUpKind::Giant
            | PowerUpKind::Vampire
            | PowerUpKind::Lightning
            | PowerUpKind::Firetrail
            | PowerUpKind::Minigun
            | PowerUpKind::Explosive
            | PowerUpKind::Orbital => Some(BUFF_DURATION_TICKS),
            PowerUpKind::Shield
            | PowerUpKind::Nuke
            | PowerUpKind::Extralife
            | PowerUpKind::Ghost
            | PowerUpKind::Freeze
            | PowerUpKind::Berserk
            | PowerUpKind::Wingmen
            | PowerUpKind::Blackhole
            | PowerUpKind::Coin => None,
        }
    }
}

/// A projectile (player or enemy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Passes through targets instead of despawning
    pub piercing: bool,
    /// Steers toward the nearest target
    pub homing: bool,
    /// Remaining wall reflections
    pub bounces: u32,
    /// Reserved for chain-lightning propagation
    pub chain: u32,
    pub size: f32,
}

impl Bullet {
    /// Plain projectile with no modifiers
    pub fn plain(id: EntityId, pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            piercing: false,
            homing: false,
            bounces: 0,
            chain: 0,
            size,
        }
    }

    /// Player bullets are size wide and twice as tall
    pub fn hitbox(&self) -> Rect {
        Rect::at(self.pos, self.size, self.size * 2.0)
    }

    /// Enemy bullets use a fixed 8x8 box around their position
    pub fn enemy_hitbox(&self) -> Rect {
        Rect::new(self.pos.x - 3.0, self.pos.y - 3.0, 8.0, 8.0)
    }

    pub fn out_of_bounds(&self) -> bool {
        self.pos.y <= -20.0
            || self.pos.y >= GAME_HEIGHT + 20.0
            || self.pos.x <= -20.0
            || self.pos.x >= GAME_WIDTH + 20.0
    }
}

/// A regular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub shoot_cooldown: f32,
    /// Oscillation phase accumulator
    pub behavior: f32,
    /// Ticks left frozen
    pub frozen: u32,
    /// Ticks left showing the burning status
    pub burning: u32,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::at(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(ENEMY_WIDTH / 2.0, ENEMY_HEIGHT / 2.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tentacle {
    pub angle: f32,
    pub length: f32,
}

/// The wave boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub kind: BossKind,
    pub pos: Vec2,
    /// 1..=3, only ever increases
    pub phase: u8,
    pub health: f32,
    pub max_health: f32,
    /// Index into the attack cycle
    pub attack_pattern: u8,
    pub attack_timer: f32,
    /// +1 right, -1 left
    pub move_direction: f32,
    pub frozen: u32,
    /// Deathstar shield charges
    pub shields: u32,
    /// Kraken tentacles
    pub tentacles: Vec<Tentacle>,
    /// Hydra heads
    pub heads: u32,
}

impl Boss {
    pub const ATTACK_PATTERNS: u8 = 4;

    pub fn size(&self) -> Vec2 {
        let stats = self.kind.stats();
        Vec2::new(stats.width, stats.height)
    }

    pub fn hitbox(&self) -> Rect {
        let size = self.size();
        Rect::at(self.pos, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Descended far enough to fight and be targeted
    pub fn is_engaged(&self) -> bool {
        self.pos.y >= BOSS_ENGAGE_Y
    }

    pub fn absorbs_hits(&self) -> bool {
        self.kind == BossKind::Deathstar && self.shields > 0
    }

    /// Escalate phase from the current health fraction. One-way.
    pub fn update_phase(&mut self) -> bool {
        let fraction = self.health_fraction();
        let target = if fraction < 0.3 {
            3
        } else if fraction < 0.6 {
            2
        } else {
            1
        };
        if target > self.phase {
            self.phase = target;
            true
        } else {
            false
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn hitbox(&self) -> Rect {
        Rect::at(self.pos, PICKUP_SIZE, PICKUP_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Escort ship that fires alongside the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wingman {
    pub id: EntityId,
    pub side: Side,
    pub pos: Vec2,
}

/// Satellite circling the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orbital {
    pub id: EntityId,
    pub angle: f32,
}

/// Gravity well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    pub id: EntityId,
    pub pos: Vec2,
    pub life: u32,
}

/// Damaging puddle dropped behind the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireTrail {
    pub id: EntityId,
    pub pos: Vec2,
    pub life: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub lives: u32,
    pub max_lives: u32,
    pub has_shield: bool,
    pub shield_hits: u32,
    pub has_auto_revive: bool,
    pub used_revive: bool,
    /// Hundredths of a life banked by lifesteal kills
    pub life_bank: u32,
}

impl Player {
    pub fn start_pos() -> Vec2 {
        Vec2::new(GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, GAME_HEIGHT - 70.0)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0)
    }

    /// Forgiving box used against enemy bullets
    pub fn hurtbox(&self) -> Rect {
        Rect::at(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT).inflate(-5.0)
    }

    /// Generous box used for collecting pickups
    pub fn pickup_box(&self) -> Rect {
        Rect::at(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT).inflate(5.0)
    }

    /// Gain a life without exceeding the cap
    pub fn heal(&mut self, amount: u32) {
        self.lives = (self.lives + amount).min(self.max_lives);
    }
}

/// Boolean capabilities granted by buffs (and permanent upgrades)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub rapid_fire: bool,
    pub spread_shot: bool,
    pub laser: bool,
    pub missile: bool,
    pub slow_mo: bool,
    pub magnet: bool,
    pub double_points: bool,
    pub ricochet: bool,
    pub homing: bool,
    pub giant: bool,
    pub vampire: bool,
    pub lightning: bool,
    pub fire_trail: bool,
    pub minigun: bool,
    pub explosive: bool,
    pub orbital: bool,
}

/// One tracked timed buff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub kind: PowerUpKind,
    pub remaining: u32,
    pub duration: u32,
}

impl ActiveBuff {
    pub fn fraction(&self) -> f32 {
        if self.duration == 0 {
            0.0
        } else {
            self.remaining as f32 / self.duration as f32
        }
    }
}

/// Buff bookkeeping: flags, the timed list and the dedicated countdowns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Buffs {
    pub caps: Capabilities,
    pub active: Vec<ActiveBuff>,
    pub ghost_timer: u32,
    pub freeze_timer: u32,
    pub berserk_timer: u32,
}

impl Buffs {
    pub fn is_ghost(&self) -> bool {
        self.ghost_timer > 0
    }

    pub fn is_berserk(&self) -> bool {
        self.berserk_timer > 0
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_timer > 0
    }

    /// Motion multiplier applied to every per-tick delta
    pub fn slow_factor(&self) -> f32 {
        if self.caps.slow_mo { SLOWMO_FACTOR } else { 1.0 }
    }

    pub fn score_multiplier(&self) -> u64 {
        if self.caps.double_points { 2 } else { 1 }
    }
}

/// Group march of the formation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct March {
    pub direction: f32,
    pub timer: f32,
}

impl Default for March {
    fn default() -> Self {
        Self {
            direction: 1.0,
            timer: 0.0,
        }
    }
}

/// Per-tick input from the host
#[derive(Debug, Clone, Default)]
pub struct SpaceInput {
    /// Horizontal intent in [-1, 1]
    pub move_x: f32,
    /// Vertical intent in [-1, 1]
    pub move_y: f32,
    /// Touch/pointer target (player seeks toward it)
    pub pointer: Option<Vec2>,
    pub firing: bool,
    /// Quit to menu
    pub quit: bool,
}

impl FrameInput for SpaceInput {
    fn clear_one_shots(&mut self) {
        self.quit = false;
    }
}

/// Complete space shooter run state
#[derive(Debug, Clone)]
pub struct SpaceState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ids: IdAllocator,
    pub loadout: Loadout,
    pub phase: RunPhase,
    pub time_ticks: u64,
    pub wave: u32,
    pub player: Player,
    pub buffs: Buffs,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub power_ups: Vec<PowerUp>,
    pub wingmen: Vec<Wingman>,
    pub orbitals: Vec<Orbital>,
    pub black_holes: Vec<BlackHole>,
    pub fire_trails: Vec<FireTrail>,
    pub particles: ParticleField,
    pub score: u64,
    /// Coins picked up this run, before the end-of-run bonus
    pub coins_collected: u64,
    pub combo: u32,
    pub combo_timer: u32,
    pub screen_shake: f32,
    pub intro_timer: u32,
    pub bosses_killed: u32,
    pub march: March,
    /// Milliseconds since the last player volley
    pub ms_since_shot: f32,
    /// Set on the tick a boss appears
    pub boss_incoming: bool,
    pub(crate) shake_enabled: bool,
}

impl SpaceState {
    /// Start a run: seed the loadout from the profile-derived modifiers
    pub fn new(seed: u64, loadout: Loadout, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAllocator::new();
        let enemies = create_enemy_wave(1, &mut ids, &mut rng);
        let lives = BASE_LIVES + loadout.extra_lives;

        let caps = Capabilities {
            rapid_fire: loadout.start_rapid,
            spread_shot: loadout.start_spread,
            magnet: loadout.has_magnet(),
            giant: loadout.has_giant(),
            ..Default::default()
        };

        Self {
            seed,
            rng,
            ids,
            loadout,
            phase: RunPhase::Active,
            time_ticks: 0,
            wave: 1,
            player: Player {
                pos: Player::start_pos(),
                lives,
                max_lives: lives,
                has_shield: loadout.start_shield_charges > 0,
                shield_hits: loadout.start_shield_charges,
                has_auto_revive: loadout.auto_revive,
                used_revive: false,
                life_bank: 0,
            },
            buffs: Buffs {
                caps,
                ..Default::default()
            },
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies,
            boss: None,
            power_ups: Vec::new(),
            wingmen: Vec::new(),
            orbitals: Vec::new(),
            black_holes: Vec::new(),
            fire_trails: Vec::new(),
            particles: ParticleField::new(settings.max_particles(), seed),
            score: 0,
            coins_collected: 0,
            combo: 0,
            combo_timer: 0,
            screen_shake: 0.0,
            intro_timer: 0,
            bosses_killed: 0,
            march: March::default(),
            ms_since_shot: f32::MAX,
            boss_incoming: false,
            shake_enabled: settings.effective_screen_shake(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn is_boss_wave(wave: u32) -> bool {
        wave % BOSS_WAVE_INTERVAL == 0
    }

    /// Current combo multiplier (1 when no combo)
    pub fn combo_multiplier(&self) -> u32 {
        self.combo.clamp(1, MAX_COMBO_MULTIPLIER)
    }

    pub(crate) fn shake(&mut self, amount: f32) {
        self.screen_shake = self.screen_shake.max(amount);
    }
}

/// Buff entry as shown on the HUD
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuffView {
    pub kind: PowerUpKind,
    /// 1.0 just picked up, 0.0 about to expire
    pub remaining_fraction: f32,
}

/// Immutable per-tick view for the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceSnapshot {
    pub phase: RunPhase,
    pub tick: u64,
    pub wave: u32,
    pub total_waves: u32,
    pub score: u64,
    pub coins: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub player: Player,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub power_ups: Vec<PowerUp>,
    pub wingmen: Vec<Wingman>,
    pub orbitals: Vec<Orbital>,
    pub black_holes: Vec<BlackHole>,
    pub fire_trails: Vec<FireTrail>,
    pub particles: Vec<Particle>,
    pub buffs: Vec<BuffView>,
    pub ghost: bool,
    pub berserk: bool,
    pub frozen: bool,
    pub combo_multiplier: u32,
    pub screen_shake: f32,
    /// Boss entry animation is playing
    pub boss_intro: bool,
    /// A boss appeared this tick
    pub boss_incoming: bool,
}

impl From<&SpaceState> for SpaceSnapshot {
    fn from(state: &SpaceState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            wave: state.wave,
            total_waves: TOTAL_WAVES,
            score: state.score,
            coins: state.coins_collected,
            lives: state.player.lives,
            max_lives: state.player.max_lives,
            player: state.player.clone(),
            player_bullets: state.player_bullets.clone(),
            enemy_bullets: state.enemy_bullets.clone(),
            enemies: state.enemies.clone(),
            boss: state.boss.clone(),
            power_ups: state.power_ups.clone(),
            wingmen: state.wingmen.clone(),
            orbitals: state.orbitals.clone(),
            black_holes: state.black_holes.clone(),
            fire_trails: state.fire_trails.clone(),
            particles: state.particles.to_vec(),
            buffs: state
                .buffs
                .active
                .iter()
                .map(|b| BuffView {
                    kind: b.kind,
                    remaining_fraction: b.fraction(),
                })
                .collect(),
            ghost: state.buffs.is_ghost(),
            berserk: state.buffs.is_berserk(),
            frozen: state.buffs.is_frozen(),
            combo_multiplier: state.combo_multiplier(),
            screen_shake: if state.shake_enabled {
                state.screen_shake
            } else {
                0.0
            },
            boss_intro: state.phase == RunPhase::Intro,
            boss_incoming: state.boss_incoming,
        }
    }
}
