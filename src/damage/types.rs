use serde::Serialize;

/// How a damage event is routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Battle attack: checks the attacker deck for a soul trigger first
    #[default]
    Attack,
    /// Non-attack effect damage: skips the soul trigger check
    Effect,
}

/// One damage event in a battle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DamageEvent {
    pub base_damage: u32,
    pub kind: DamageKind,
}

impl DamageEvent {
    pub fn attack(base_damage: u32) -> Self {
        Self {
            base_damage,
            kind: DamageKind::Attack,
        }
    }

    pub fn effect(base_damage: u32) -> Self {
        Self {
            base_damage,
            kind: DamageKind::Effect,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.kind == DamageKind::Attack
    }
}

/// Bare damage values are battle attacks.
impl From<u32> for DamageEvent {
    fn from(base_damage: u32) -> Self {
        Self::attack(base_damage)
    }
}

/// Normalize a sequence of bare damage values into attack events.
pub fn attacks(damages: &[u32]) -> Vec<DamageEvent> {
    damages.iter().copied().map(DamageEvent::from).collect()
}

/// Outcome of resolving one cancellable damage event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage that went through (0 when cancelled)
    pub dealt: u32,
    /// Refresh penalty points incurred while drawing; never cancelled
    pub refresh_penalty: u32,
    pub cancelled: bool,
    /// 1-based index of the first cancelling card
    pub cancel_position: Option<u32>,
}

impl DamageOutcome {
    /// Dealt damage plus refresh penalties.
    pub fn total(&self) -> u32 {
        self.dealt + self.refresh_penalty
    }
}

/// Outcome of an uncancellable reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealOutcome {
    pub climax_revealed: u32,
    pub refresh_penalty: u32,
}
