//! Read-only views over plans and subscriptions.

use crate::plan::get_plan;
use crate::subscription::{get_subscription, subscription_count};
use crate::types::{Error, NextPaymentInfo, Subscription, SubscriptionsPage, MAX_PAGE_LIMIT};
use soroban_sdk::{Address, Env, Vec};

/// Compute the collection schedule of `sub` at time `now`.
///
/// `periods_due` counts every elapsed `next_payment + k * frequency` boundary,
/// i.e. how many consecutive `pay` calls would succeed on timing alone.
pub fn compute_next_payment_info(
    sub: &Subscription,
    frequency: u64,
    now: u64,
) -> NextPaymentInfo {
    let is_due = now >= sub.next_payment;
    let periods_due = if is_due && frequency > 0 {
        (now - sub.next_payment) / frequency + 1
    } else {
        0
    };
    NextPaymentInfo {
        next_payment: sub.next_payment,
        is_due,
        periods_due,
    }
}

pub fn get_next_payment_info(
    env: &Env,
    subscriber: &Address,
    subscription_id: u32,
) -> Result<NextPaymentInfo, Error> {
    let sub = get_subscription(env, subscriber, subscription_id)?;
    let plan = get_plan(env, sub.plan_index)?;
    Ok(compute_next_payment_info(
        &sub,
        plan.frequency,
        env.ledger().timestamp(),
    ))
}

/// List a subscriber's subscriptions starting at `start` (inclusive), at most
/// `limit` entries, in ascending id order.
pub fn list_subscriptions(
    env: &Env,
    subscriber: &Address,
    start: u32,
    limit: u32,
) -> Result<SubscriptionsPage, Error> {
    if limit > MAX_PAGE_LIMIT {
        return Err(Error::InvalidParameter);
    }

    let mut subscription_ids = Vec::new(env);
    let mut subscriptions = Vec::new(env);
    let count = subscription_count(env, subscriber);
    if limit == 0 || start >= count {
        return Ok(SubscriptionsPage {
            subscription_ids,
            subscriptions,
            has_next: false,
        });
    }

    let end = start.saturating_add(limit).min(count);
    for id in start..end {
        subscriptions.push_back(get_subscription(env, subscriber, id)?);
        subscription_ids.push_back(id);
    }

    Ok(SubscriptionsPage {
        subscription_ids,
        subscriptions,
        has_next: end < count,
    })
}
