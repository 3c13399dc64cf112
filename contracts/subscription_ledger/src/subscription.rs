//! Subscription records: enrollment and per-subscriber storage.
//!
//! **PRs that only change subscription lifecycle should edit this file only.**

use crate::plan::get_plan;
use crate::types::{
    DataKey, Error, Subscription, SubscriptionCreatedEvent, PERSISTENT_BUMP_LEDGERS,
};
use soroban_sdk::{Address, Env, Symbol};

pub fn subscription_count(env: &Env, subscriber: &Address) -> u32 {
    let key = DataKey::SubscriptionCount(subscriber.clone());
    match env.storage().persistent().get::<_, u32>(&key) {
        Some(count) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
            count
        }
        None => 0,
    }
}

pub fn get_subscription(
    env: &Env,
    subscriber: &Address,
    subscription_id: u32,
) -> Result<Subscription, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscription(subscriber.clone(), subscription_id))
        .ok_or(Error::NotFound)
}

pub fn save_subscription(env: &Env, subscription_id: u32, sub: &Subscription) {
    let key = DataKey::Subscription(sub.subscriber.clone(), subscription_id);
    env.storage().persistent().set(&key, sub);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn next_subscription_id(env: &Env, subscriber: &Address) -> Result<u32, Error> {
    let key = DataKey::SubscriptionCount(subscriber.clone());
    let id: u32 = env.storage().persistent().get(&key).unwrap_or(0);
    let next = id.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().persistent().set(&key, &next);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    Ok(id)
}

pub fn do_subscribe(env: &Env, subscriber: Address, plan_index: u32) -> Result<u32, Error> {
    subscriber.require_auth();

    let plan = get_plan(env, plan_index)?;

    let start = env.ledger().timestamp();
    let next_payment = start.checked_add(plan.frequency).ok_or(Error::Overflow)?;

    let sub = Subscription {
        subscriber: subscriber.clone(),
        plan_index,
        start,
        next_payment,
    };
    let id = next_subscription_id(env, &subscriber)?;
    save_subscription(env, id, &sub);

    env.events().publish(
        (Symbol::new(env, "subscription_created"), subscriber.clone()),
        SubscriptionCreatedEvent {
            subscriber,
            subscription_id: id,
            plan_index,
            start,
            next_payment,
        },
    );

    Ok(id)
}
