//! Per-player zone counters.
//!
//! The resolution core does not track individual cards. It tracks how many
//! objects each player has in the zones that resolution moves things
//! between, which is enough to observe destroy, exile and draw outcomes.

use serde::{Deserialize, Serialize};

/// Named zone, used for trace details and moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
        };
        f.write_str(name)
    }
}

/// Object counts for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub library: u32,
    pub hand: u32,
    pub battlefield: u32,
    pub graveyard: u32,
    pub exile: u32,
}

impl ZoneCounts {
    /// Count in `zone`.
    #[must_use]
    pub fn get(&self, zone: Zone) -> u32 {
        match zone {
            Zone::Library => self.library,
            Zone::Hand => self.hand,
            Zone::Battlefield => self.battlefield,
            Zone::Graveyard => self.graveyard,
            Zone::Exile => self.exile,
        }
    }

    fn slot(&mut self, zone: Zone) -> &mut u32 {
        match zone {
            Zone::Library => &mut self.library,
            Zone::Hand => &mut self.hand,
            Zone::Battlefield => &mut self.battlefield,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Exile => &mut self.exile,
        }
    }

    /// Set the count in `zone`.
    pub fn set(&mut self, zone: Zone, count: u32) {
        *self.slot(zone) = count;
    }

    /// Move one object from `from` to `to`.
    ///
    /// Returns false (and changes nothing) if `from` is empty.
    pub fn move_one(&mut self, from: Zone, to: Zone) -> bool {
        if self.get(from) == 0 {
            return false;
        }
        *self.slot(from) -= 1;
        *self.slot(to) += 1;
        true
    }
}
