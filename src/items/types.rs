use serde::{Deserialize, Serialize};

pub const TIER_COUNT: usize = 5;
pub const SLOT_COUNT: usize = 4;

/// Material rarity tiers, in upgrade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Common = 0,
    Rare = 1,
    Elite = 2,
    Epic = 3,
    Legendary = 4,
}

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [
        Tier::Common,
        Tier::Rare,
        Tier::Elite,
        Tier::Epic,
        Tier::Legendary,
    ];

    /// Tiers a gacha draw can produce. Legendary is never drawn directly.
    pub const DRAWABLE: [Tier; 4] = [Tier::Common, Tier::Rare, Tier::Elite, Tier::Epic];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the display name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Common => "Common",
            Tier::Rare => "Rare",
            Tier::Elite => "Elite",
            Tier::Epic => "Epic",
            Tier::Legendary => "Legendary",
        }
    }

    /// The tier one step up, or None for Legendary.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Common => Some(Tier::Rare),
            Tier::Rare => Some(Tier::Elite),
            Tier::Elite => Some(Tier::Epic),
            Tier::Epic => Some(Tier::Legendary),
            Tier::Legendary => None,
        }
    }
}

/// Equipment slots. Each slot owns its own materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Head = 0,
    Top = 1,
    Bottom = 2,
    Gloves = 3,
}

impl Slot {
    /// All slots in processing order
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::Head, Slot::Top, Slot::Bottom, Slot::Gloves];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Head => "Head",
            Slot::Top => "Top",
            Slot::Bottom => "Bottom",
            Slot::Gloves => "Gloves",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// A fixed-size set of slots, used for trial targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotSet {
    members: [bool; SLOT_COUNT],
}

impl SlotSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            members: [true; SLOT_COUNT],
        }
    }

    pub fn from_slots(slots: &[Slot]) -> Self {
        let mut set = Self::empty();
        for slot in slots {
            set.insert(*slot);
        }
        set
    }

    /// Inserts a slot. Returns false if it was already present.
    pub fn insert(&mut self, slot: Slot) -> bool {
        let was_present = self.members[slot.index()];
        self.members[slot.index()] = true;
        !was_present
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.members[slot.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|m| !m)
    }

    pub fn len(&self) -> usize {
        self.members.iter().filter(|m| **m).count()
    }

    /// Member slots in processing order.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::ALL.into_iter().filter(|slot| self.contains(*slot))
    }

    /// An unspecified or empty selection means every slot.
    pub fn resolve(targets: Option<&SlotSet>) -> SlotSet {
        match targets {
            Some(set) if !set.is_empty() => *set,
            _ => SlotSet::all(),
        }
    }
}
