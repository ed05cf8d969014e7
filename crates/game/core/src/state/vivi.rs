//! Local mirror of the ledger's view of player progress.

/// Authoritative progress snapshot owned by the ledger.
///
/// The session seeds its room and health from this at start-up and applies
/// the same arithmetic the ledger does after every confirmed room advance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ViviState {
    pub health_points: u32,
    pub room: u32,
    pub owner: String,
    pub contract_address: String,
}

impl ViviState {
    /// Applies a confirmed room advance: health drops by the room's damage
    /// (floored at zero) and the room index moves forward by one.
    pub fn apply_advance(&mut self, damage: u32) {
        self.health_points = self.health_points.saturating_sub(damage);
        self.room += 1;
    }
}
