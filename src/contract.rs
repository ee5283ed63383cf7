use cosmwasm_std::{
    attr, entry_point, to_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
    Response, StdError, StdResult, Uint128,
};

use crate::error::ContractError;
use crate::msg::{
    ApprovalsResponse, DueResponse, ExecuteMsg, GuardiansResponse, InstantiateMsg,
    IsGuardianResponse, PayeesResponse, QueryMsg, ReleasedResponse, SharesResponse,
    TotalReceivedResponse, TotalReleasedResponse, TotalSharesResponse,
};
use crate::state::{
    State, ACTIVE_GUARDIANS, APPROVALS, GUARDIANS, RELEASED, SHARES, STATE, UNUSED_GUARDIAN_SLOT,
};

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.denom.is_empty() {
        return Err(StdError::generic_err("denom must not be empty").into());
    }
    if msg.payees.is_empty() || msg.payees.len() != msg.shares.len() {
        return Err(ContractError::InvalidLength {});
    }
    if msg.shares.iter().any(|&weight| weight == 0) {
        return Err(ContractError::InvalidShares {});
    }

    let mut payees = Vec::with_capacity(msg.payees.len());
    for (raw, &weight) in msg.payees.iter().zip(msg.shares.iter()) {
        let payee = deps.api.addr_validate(raw)?;
        if SHARES.has(deps.storage, &payee) {
            return Err(ContractError::InvalidPayees {});
        }
        SHARES.save(deps.storage, &payee, &Uint128::from(weight))?;
        RELEASED.save(deps.storage, &payee, &Uint128::zero())?;
        payees.push(payee);
    }

    // Unused slots stay in the verbatim list but never become approvers.
    let mut active: Vec<Addr> = Vec::new();
    for slot in &msg.guardians {
        if slot == UNUSED_GUARDIAN_SLOT {
            continue;
        }
        let guardian = deps.api.addr_validate(slot)?;
        if !active.contains(&guardian) {
            active.push(guardian);
        }
    }

    let total_shares = msg
        .shares
        .iter()
        .fold(Uint128::zero(), |acc, &weight| acc + Uint128::from(weight));

    let state = State {
        denom: msg.denom,
        payees,
        total_shares,
        total_released: Uint128::zero(),
    };
    STATE.save(deps.storage, &state)?;
    GUARDIANS.save(deps.storage, &msg.guardians)?;
    ACTIVE_GUARDIANS.save(deps.storage, &active)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("denom", state.denom),
        attr("payees", state.payees.len().to_string()),
        attr("total_shares", state.total_shares.to_string()),
        attr("active_guardians", active.len().to_string()),
    ]))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Release { address } => execute_release(deps, env, info, address),
        ExecuteMsg::Approve { address } => execute_approve(deps, info, address),
        ExecuteMsg::Revoke { address } => execute_revoke(deps, info, address),
    }
}

fn execute_release(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let (payee, shares) = load_payee(deps.as_ref(), &address)?;
    let mut state = STATE.load(deps.storage)?;

    let received = total_received(deps.as_ref(), &env, &state)?;
    let entitlement = received.multiply_ratio(shares, state.total_shares);
    let released = RELEASED
        .may_load(deps.storage, &payee)?
        .unwrap_or_default();
    let due = entitlement.checked_sub(released).map_err(StdError::from)?;
    if due.is_zero() {
        return Err(ContractError::NoPaymentDue {});
    }

    let active = ACTIVE_GUARDIANS.load(deps.storage)?;
    let authorized = if active.is_empty() {
        // No guardians were configured; only the payee may move its funds.
        info.sender == payee
    } else {
        let approvals = APPROVALS
            .may_load(deps.storage, &payee)?
            .unwrap_or_default();
        approvals.len() >= quorum(active.len())
    };
    if !authorized {
        return Err(ContractError::Unauthorized {});
    }

    // Accounting is committed before the bank send is dispatched; the
    // transfer must never observe a stale released amount.
    APPROVALS.remove(deps.storage, &payee);
    RELEASED.save(deps.storage, &payee, &(released + due))?;
    state.total_released += due;
    STATE.save(deps.storage, &state)?;

    let send = BankMsg::Send {
        to_address: payee.to_string(),
        amount: vec![Coin {
            denom: state.denom,
            amount: due,
        }],
    };

    Ok(Response::new().add_message(send).add_attributes(vec![
        attr("action", "release"),
        attr("to", payee.to_string()),
        attr("amount", due.to_string()),
    ]))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let (payee, _) = load_payee(deps.as_ref(), &address)?;
    let active = ACTIVE_GUARDIANS.load(deps.storage)?;
    if !active.contains(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }

    let mut approvals = APPROVALS
        .may_load(deps.storage, &payee)?
        .unwrap_or_default();
    // Repeat approvals by the same guardian do not double-count.
    if !approvals.contains(&info.sender) {
        approvals.push(info.sender.clone());
        APPROVALS.save(deps.storage, &payee, &approvals)?;
    }

    Ok(Response::new().add_attributes(vec![
        attr("action", "approve"),
        attr("payee", payee.to_string()),
        attr("guardian", info.sender.to_string()),
        attr("approvals", approvals.len().to_string()),
        attr("quorum", quorum(active.len()).to_string()),
    ]))
}

fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let (payee, _) = load_payee(deps.as_ref(), &address)?;
    let active = ACTIVE_GUARDIANS.load(deps.storage)?;
    if !active.contains(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }

    let mut approvals = APPROVALS
        .may_load(deps.storage, &payee)?
        .unwrap_or_default();
    if let Some(pos) = approvals.iter().position(|g| g == &info.sender) {
        approvals.remove(pos);
        if approvals.is_empty() {
            APPROVALS.remove(deps.storage, &payee);
        } else {
            APPROVALS.save(deps.storage, &payee, &approvals)?;
        }
    }

    Ok(Response::new().add_attributes(vec![
        attr("action", "revoke"),
        attr("payee", payee.to_string()),
        attr("guardian", info.sender.to_string()),
        attr("approvals", approvals.len().to_string()),
        attr("quorum", quorum(active.len()).to_string()),
    ]))
}

fn load_payee(deps: Deps, address: &str) -> Result<(Addr, Uint128), ContractError> {
    let payee = deps
        .api
        .addr_validate(address)
        .map_err(|_| ContractError::UnknownPayee {
            address: address.to_string(),
        })?;
    match SHARES.may_load(deps.storage, &payee)? {
        Some(shares) => Ok((payee, shares)),
        None => Err(ContractError::UnknownPayee {
            address: address.to_string(),
        }),
    }
}

/// Everything ever transferred in: current balance plus what already left
/// through releases. Recomputed on demand so plain bank sends are counted.
fn total_received(deps: Deps, env: &Env, state: &State) -> StdResult<Uint128> {
    let balance = deps
        .querier
        .query_balance(env.contract.address.to_string(), state.denom.as_str())?;
    Ok(balance.amount + state.total_released)
}

/// Majority threshold over the active guardian set.
fn quorum(active: usize) -> usize {
    active / 2 + 1
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetTotalShares {} => to_binary(&query_total_shares(deps)?),
        QueryMsg::GetTotalReceived {} => to_binary(&query_total_received(deps, env)?),
        QueryMsg::GetTotalReleased {} => to_binary(&query_total_released(deps)?),
        QueryMsg::GetShares { address } => to_binary(&query_shares(deps, address)?),
        QueryMsg::GetReleased { address } => to_binary(&query_released(deps, address)?),
        QueryMsg::GetDue { address } => to_binary(&query_due(deps, env, address)?),
        QueryMsg::GetPayees {} => to_binary(&query_payees(deps)?),
        QueryMsg::GetGuardians {} => to_binary(&query_guardians(deps)?),
        QueryMsg::IsGuardian { address } => to_binary(&query_is_guardian(deps, address)?),
        QueryMsg::GetApprovals { address } => to_binary(&query_approvals(deps, address)?),
    }
}

fn query_total_shares(deps: Deps) -> StdResult<TotalSharesResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(TotalSharesResponse {
        total_shares: state.total_shares,
    })
}

fn query_total_received(deps: Deps, env: Env) -> StdResult<TotalReceivedResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(TotalReceivedResponse {
        total_received: total_received(deps, &env, &state)?,
    })
}

fn query_total_released(deps: Deps) -> StdResult<TotalReleasedResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(TotalReleasedResponse {
        total_released: state.total_released,
    })
}

fn query_shares(deps: Deps, address: String) -> StdResult<SharesResponse> {
    let shares = SHARES
        .may_load(deps.storage, &Addr::unchecked(address))?
        .unwrap_or_default();
    Ok(SharesResponse { shares })
}

fn query_released(deps: Deps, address: String) -> StdResult<ReleasedResponse> {
    let released = RELEASED
        .may_load(deps.storage, &Addr::unchecked(address))?
        .unwrap_or_default();
    Ok(ReleasedResponse { released })
}

fn query_due(deps: Deps, env: Env, address: String) -> StdResult<DueResponse> {
    let payee = Addr::unchecked(address);
    let shares = SHARES
        .may_load(deps.storage, &payee)?
        .unwrap_or_default();
    if shares.is_zero() {
        return Ok(DueResponse {
            due: Uint128::zero(),
        });
    }
    let state = STATE.load(deps.storage)?;
    let entitlement = total_received(deps, &env, &state)?.multiply_ratio(shares, state.total_shares);
    let released = RELEASED
        .may_load(deps.storage, &payee)?
        .unwrap_or_default();
    Ok(DueResponse {
        due: entitlement.checked_sub(released)?,
    })
}

fn query_payees(deps: Deps) -> StdResult<PayeesResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(PayeesResponse {
        payees: state.payees.into_iter().map(|p| p.into_string()).collect(),
    })
}

fn query_guardians(deps: Deps) -> StdResult<GuardiansResponse> {
    Ok(GuardiansResponse {
        guardians: GUARDIANS.load(deps.storage)?,
    })
}

fn query_is_guardian(deps: Deps, address: String) -> StdResult<IsGuardianResponse> {
    let active = ACTIVE_GUARDIANS.load(deps.storage)?;
    Ok(IsGuardianResponse {
        is_guardian: active.iter().any(|g| g.as_str() == address),
    })
}

fn query_approvals(deps: Deps, address: String) -> StdResult<ApprovalsResponse> {
    let approvals = APPROVALS
        .may_load(deps.storage, &Addr::unchecked(address))?
        .unwrap_or_default();
    let active = ACTIVE_GUARDIANS.load(deps.storage)?;
    let quorum = if active.is_empty() {
        0
    } else {
        quorum(active.len()) as u32
    };
    Ok(ApprovalsResponse {
        approvals: approvals.into_iter().map(|g| g.into_string()).collect(),
        quorum,
    })
}
