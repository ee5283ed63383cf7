use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Native denomination the splitter custodies and accounts in.
    pub denom: String,
    pub payees: Vec<String>,
    pub shares: Vec<u64>,
    /// May contain empty-string entries for slots intentionally left unused.
    pub guardians: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Pay out the payee's unclaimed entitlement. Needs a quorum of guardian
    /// approvals; with no active guardians, only the payee itself may call.
    Release { address: String },
    /// Guardian endorsement of the next release for `address`.
    Approve { address: String },
    /// Withdraw the sender's live approval for `address`.
    Revoke { address: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetTotalShares {},
    GetTotalReceived {},
    GetTotalReleased {},
    GetShares { address: String },
    GetReleased { address: String },
    GetDue { address: String },
    GetPayees {},
    GetGuardians {},
    IsGuardian { address: String },
    GetApprovals { address: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TotalSharesResponse {
    pub total_shares: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TotalReceivedResponse {
    /// Current balance plus everything already paid out.
    pub total_received: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TotalReleasedResponse {
    pub total_released: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct SharesResponse {
    pub shares: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ReleasedResponse {
    pub released: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct DueResponse {
    pub due: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PayeesResponse {
    pub payees: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct GuardiansResponse {
    /// Verbatim instantiation list, unused slots included.
    pub guardians: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct IsGuardianResponse {
    pub is_guardian: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ApprovalsResponse {
    /// Guardians holding a live approval for the payee.
    pub approvals: Vec<String>,
    /// Approvals needed before anyone may trigger the release.
    pub quorum: u32,
}
