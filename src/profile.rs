//! Persistent player profile and upgrade catalogue
//!
//! The profile outlives runs and belongs to the surrounding application. The
//! simulation reads it once at run start (through [`Loadout`]) and hands back
//! a [`RunResults`] at run end; it never touches the profile mid-run.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::RunResults;

/// Purchasable permanent upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeId {
    MaxHealth,
    StartShield,
    Damage,
    FireRate,
    MagnetRange,
    CoinBonus,
    StartRapid,
    StartSpread,
    BulletSize,
    Luck,
    Speed,
    Revive,
}

/// Static shop data for one upgrade
#[derive(Debug, Clone, Copy)]
pub struct UpgradeInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Price of level 1; level n costs `base_price * n`
    pub base_price: u64,
    pub max_level: u32,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 12] = [
        UpgradeId::MaxHealth,
        UpgradeId::StartShield,
        UpgradeId::Damage,
        UpgradeId::FireRate,
        UpgradeId::MagnetRange,
        UpgradeId::CoinBonus,
        UpgradeId::StartRapid,
        UpgradeId::StartSpread,
        UpgradeId::BulletSize,
        UpgradeId::Luck,
        UpgradeId::Speed,
        UpgradeId::Revive,
    ];

    pub const fn info(self) -> UpgradeInfo {
        let (name, description, base_price, max_level) = match self {
            UpgradeId::MaxHealth => ("Max Health", "+1 starting life", 100, 5),
            UpgradeId::StartShield => ("Start Shield", "Begin with shield", 150, 3),
            UpgradeId::Damage => ("Damage Up", "+1 bullet damage", 200, 5),
            UpgradeId::FireRate => ("Fire Rate", "Shoot faster", 150, 5),
            UpgradeId::MagnetRange => ("Magnet Range", "Attract pickups", 100, 5),
            UpgradeId::CoinBonus => ("Coin Bonus", "+10% coins earned", 250, 10),
            UpgradeId::StartRapid => ("Start Rapid", "Begin with rapid fire", 300, 1),
            UpgradeId::StartSpread => ("Start Spread", "Begin with spread shot", 400, 1),
            UpgradeId::BulletSize => ("Bullet Size", "Larger bullets", 175, 3),
            UpgradeId::Luck => ("Lucky Drops", "Better power-up drops", 200, 5),
            UpgradeId::Speed => ("Move Speed", "Move faster", 125, 3),
            UpgradeId::Revive => ("Auto Revive", "Revive once per game", 500, 1),
        };
        UpgradeInfo {
            name,
            description,
            base_price,
            max_level,
        }
    }

    pub const fn max_level(self) -> u32 {
        self.info().max_level
    }
}

/// Long-lived player record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    pub nickname: String,
    pub coins: u64,
    pub gems: u64,
    pub high_score: u64,
    pub highest_wave: u32,
    pub games_played: u32,
    pub bosses_defeated: u32,
    pub upgrades: BTreeMap<UpgradeId, u32>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            nickname: "Player".to_string(),
            coins: 0,
            gems: 0,
            high_score: 0,
            highest_wave: 0,
            games_played: 0,
            bosses_defeated: 0,
            upgrades: BTreeMap::new(),
        }
    }
}

impl PlayerProfile {
    /// Raw stored level (untrusted, may exceed the max)
    pub fn level(&self, id: UpgradeId) -> u32 {
        self.upgrades.get(&id).copied().unwrap_or(0)
    }

    /// Stored level clamped to the upgrade's max
    pub fn clamped_level(&self, id: UpgradeId) -> u32 {
        let raw = self.level(id);
        let max = id.max_level();
        if raw > max {
            log::warn!("Upgrade {:?} level {} exceeds max {}, clamping", id, raw, max);
        }
        raw.min(max)
    }

    /// Price of the next level, `None` when maxed
    pub fn next_price(&self, id: UpgradeId) -> Option<u64> {
        let level = self.clamped_level(id);
        let info = id.info();
        (level < info.max_level).then(|| info.base_price * (level as u64 + 1))
    }

    /// Buy one level of an upgrade
    pub fn purchase(&mut self, id: UpgradeId) -> Result<u32> {
        let price = self.next_price(id).ok_or(Error::UpgradeMaxed(id))?;
        if self.coins < price {
            return Err(Error::InsufficientCoins {
                needed: price,
                available: self.coins,
            });
        }
        self.coins -= price;
        let level = self.clamped_level(id) + 1;
        self.upgrades.insert(id, level);
        log::info!("Purchased {:?} level {} for {} coins", id, level, price);
        Ok(level)
    }

    /// Fold a finished run into the profile. Fields only ever grow.
    pub fn apply_results(&mut self, results: &RunResults) {
        self.coins = self.coins.saturating_add(results.coins_earned);
        self.high_score = self.high_score.max(results.final_score);
        self.highest_wave = self.highest_wave.max(results.wave_reached);
        self.games_played = self.games_played.saturating_add(1);
        self.bosses_defeated = self.bosses_defeated.saturating_add(results.bosses_defeated);
    }

    /// Clamped view of the upgrades for a new run
    pub fn loadout(&self) -> Loadout {
        Loadout::from_profile(self)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

/// Upgrade-derived run modifiers, read once at run start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub extra_lives: u32,
    pub start_shield_charges: u32,
    pub damage_bonus: u32,
    pub fire_rate_bonus: u32,
    pub magnet_level: u32,
    pub coin_bonus_level: u32,
    pub start_rapid: bool,
    pub start_spread: bool,
    pub bullet_size_level: u32,
    pub luck: u32,
    pub speed_level: u32,
    pub auto_revive: bool,
}

impl Default for Loadout {
    fn default() -> Self {
        Loadout::from_profile(&PlayerProfile::default())
    }
}

impl Loadout {
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        let lvl = |id| profile.clamped_level(id);
        Self {
            extra_lives: lvl(UpgradeId::MaxHealth),
            start_shield_charges: lvl(UpgradeId::StartShield),
            damage_bonus: lvl(UpgradeId::Damage),
            fire_rate_bonus: lvl(UpgradeId::FireRate),
            magnet_level: lvl(UpgradeId::MagnetRange),
            coin_bonus_level: lvl(UpgradeId::CoinBonus),
            start_rapid: lvl(UpgradeId::StartRapid) > 0,
            start_spread: lvl(UpgradeId::StartSpread) > 0,
            bullet_size_level: lvl(UpgradeId::BulletSize),
            luck: lvl(UpgradeId::Luck),
            speed_level: lvl(UpgradeId::Speed),
            auto_revive: lvl(UpgradeId::Revive) > 0,
        }
    }

    /// Pickup attraction radius in pixels
    pub fn magnet_range(&self) -> f32 {
        50.0 + self.magnet_level as f32 * 30.0
    }

    /// End-of-run coin multiplier
    pub fn coin_bonus(&self) -> f32 {
        1.0 + self.coin_bonus_level as f32 * 0.1
    }

    pub fn speed_multiplier(&self) -> f32 {
        1.0 + self.speed_level as f32 * 0.15
    }

    pub fn bullet_size_bonus(&self) -> f32 {
        self.bullet_size_level as f32 * 2.0
    }

    pub fn has_magnet(&self) -> bool {
        self.magnet_level > 0
    }

    pub fn has_giant(&self) -> bool {
        self.bullet_size_level > 0
    }
}
