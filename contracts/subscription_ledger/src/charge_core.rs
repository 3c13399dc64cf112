//! Payment collection (no auth). Used by `pay` and `pay_many`.
//!
//! **PRs that only change how one period is collected should edit this file only.**

use crate::plan::get_plan;
use crate::subscription::{get_subscription, save_subscription};
use crate::types::{Error, PaymentResult, PaymentSentEvent};
use soroban_sdk::{token::TokenClient, Address, Env, Symbol, Vec};

/// Collect one period of `subscription_id` from `subscriber` to the plan's merchant.
///
/// Nothing is written unless the token transfer succeeds: a rejected transfer
/// is rolled back by the host and reported as [`Error::TransferFailed`] with
/// `next_payment` untouched.
pub fn pay_one(
    env: &Env,
    subscriber: &Address,
    subscription_id: u32,
    now: u64,
) -> Result<(), Error> {
    let mut sub = get_subscription(env, subscriber, subscription_id)?;

    if now < sub.next_payment {
        return Err(Error::PaymentNotDue);
    }

    let plan = get_plan(env, sub.plan_index)?;
    let next_payment = sub
        .next_payment
        .checked_add(plan.frequency)
        .ok_or(Error::Overflow)?;

    let token = TokenClient::new(env, &plan.token);
    match token.try_transfer_from(
        &env.current_contract_address(),
        subscriber,
        &plan.merchant,
        &plan.amount,
    ) {
        Ok(Ok(())) => {}
        _ => return Err(Error::TransferFailed),
    }

    sub.next_payment = next_payment;
    save_subscription(env, subscription_id, &sub);

    env.events().publish(
        (Symbol::new(env, "payment_sent"), subscriber.clone()),
        PaymentSentEvent {
            from: subscriber.clone(),
            to: plan.merchant,
            amount: plan.amount,
            plan_index: sub.plan_index,
            subscription_id,
            next_payment,
            timestamp: now,
        },
    );
    Ok(())
}

/// Collect several subscriptions of one subscriber, in input order.
///
/// Each entry is attempted independently; a failure leaves that subscription
/// unchanged and does not stop the batch.
pub fn do_pay_many(
    env: &Env,
    subscriber: &Address,
    subscription_ids: &Vec<u32>,
) -> Vec<PaymentResult> {
    let now = env.ledger().timestamp();
    let mut results = Vec::new(env);
    for id in subscription_ids.iter() {
        let res = match pay_one(env, subscriber, id, now) {
            Ok(()) => PaymentResult {
                subscription_id: id,
                success: true,
                error_code: 0,
            },
            Err(e) => PaymentResult {
                subscription_id: id,
                success: false,
                error_code: e.to_code(),
            },
        };
        results.push_back(res);
    }
    results
}
