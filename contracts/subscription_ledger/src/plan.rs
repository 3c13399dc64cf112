//! Plan registry: append-only catalog of merchant billing plans.
//!
//! **PRs that only change how plans are defined or stored should edit this file only.**

use crate::types::{DataKey, Error, Plan, PlanCreatedEvent, PERSISTENT_BUMP_LEDGERS};
use soroban_sdk::{Address, Env, Symbol};

pub fn plan_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PlanCount)
        .unwrap_or(0)
}

pub fn get_plan(env: &Env, plan_index: u32) -> Result<Plan, Error> {
    let key = DataKey::Plan(plan_index);
    let plan: Plan = env.storage().persistent().get(&key).ok_or(Error::NotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    Ok(plan)
}

pub fn do_create_plan(
    env: &Env,
    merchant: Address,
    token: Address,
    amount: i128,
    frequency: u64,
) -> Result<u32, Error> {
    merchant.require_auth();

    if amount <= 0 || frequency == 0 {
        return Err(Error::InvalidParameter);
    }

    let plan_index = plan_count(env);
    let next_count = plan_index.checked_add(1).ok_or(Error::Overflow)?;
    let key = DataKey::Plan(plan_index);
    let plan = Plan {
        token: token.clone(),
        amount,
        frequency,
        merchant: merchant.clone(),
    };
    env.storage().persistent().set(&key, &plan);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    env.storage()
        .instance()
        .set(&DataKey::PlanCount, &next_count);
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);

    env.events().publish(
        (Symbol::new(env, "plan_created"), merchant.clone()),
        PlanCreatedEvent {
            plan_index,
            merchant,
            token,
            amount,
            frequency,
        },
    );

    Ok(plan_index)
}
