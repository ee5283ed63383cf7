use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Guardian slots are stored exactly as supplied at instantiation; an empty
/// string marks a slot that was intentionally left unused.
pub const UNUSED_GUARDIAN_SLOT: &str = "";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct State {
    /// Native denomination all accounting is done in.
    pub denom: String,
    /// Payee set in construction order. Immutable after instantiation.
    pub payees: Vec<Addr>,
    /// Sum of all share weights. Fixed at instantiation, always > 0.
    pub total_shares: Uint128,
    /// Sum of everything ever paid out across all payees.
    pub total_released: Uint128,
}

pub const STATE: Item<State> = Item::new("state");
pub const SHARES: Map<&Addr, Uint128> = Map::new("shares");
pub const RELEASED: Map<&Addr, Uint128> = Map::new("released");

/// Guardian list as given at instantiation, unused slots included.
pub const GUARDIANS: Item<Vec<String>> = Item::new("guardians");
/// Validated, deduplicated guardians; the only addresses that can approve.
pub const ACTIVE_GUARDIANS: Item<Vec<Addr>> = Item::new("active_guardians");
/// Payee -> guardians holding a live approval for that payee's next release.
pub const APPROVALS: Map<&Addr, Vec<Addr>> = Map::new("approvals");
