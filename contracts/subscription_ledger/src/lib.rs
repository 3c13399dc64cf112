#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod charge_core;
mod plan;
mod queries;
mod subscription;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use queries::compute_next_payment_info;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

// ── Contract ─────────────────────────────────────────────────────────────────

/// Recurring-payment ledger: merchants publish plans, subscribers enroll,
/// and anyone collects a period once it falls due.
///
/// The ledger never holds funds. Each collection moves tokens directly from
/// the subscriber to the merchant using the allowance the subscriber granted
/// to this contract's address on the plan's token.
#[contract]
pub struct SubscriptionLedger;

#[contractimpl]
impl SubscriptionLedger {
    // ── Plans ────────────────────────────────────────────────────────────

    /// Create a billing plan owned by `merchant`. Returns its permanent index.
    ///
    /// `amount` and `frequency` (seconds) must be strictly positive, otherwise
    /// [`Error::InvalidParameter`] is returned and nothing is stored. `token`
    /// is not checked; a plan on a non-token address simply never collects.
    pub fn create_plan(
        env: Env,
        merchant: Address,
        token: Address,
        amount: i128,
        frequency: u64,
    ) -> Result<u32, Error> {
        plan::do_create_plan(&env, merchant, token, amount, frequency)
    }

    /// Read a plan by index.
    pub fn get_plan(env: Env, plan_index: u32) -> Result<Plan, Error> {
        plan::get_plan(&env, plan_index)
    }

    /// Number of plans created so far. Valid indices are `0..plan_count()`.
    pub fn plan_count(env: Env) -> u32 {
        plan::plan_count(&env)
    }

    // ── Subscriptions ────────────────────────────────────────────────────

    /// Enroll `subscriber` in a plan. Returns the subscriber-local subscription id.
    ///
    /// Nothing is charged now; the first period becomes collectible one full
    /// `frequency` after the current ledger timestamp. Enrolling in the same
    /// plan again creates an independent subscription.
    pub fn subscribe(env: Env, subscriber: Address, plan_index: u32) -> Result<u32, Error> {
        subscription::do_subscribe(&env, subscriber, plan_index)
    }

    // ── Collection ───────────────────────────────────────────────────────

    /// Collect one period of a subscription. Callable by anyone.
    ///
    /// # Preconditions
    ///
    /// - The subscription exists.
    /// - The current ledger timestamp is `>= next_payment`.
    /// - The subscriber holds `amount` of the plan's token and has approved
    ///   this contract for at least `amount`.
    ///
    /// # Behavior
    ///
    /// On success `amount` moves from the subscriber to the merchant and
    /// `next_payment` advances by exactly one `frequency`. Overdue periods are
    /// not skipped: each call collects one, so repeated calls catch up.
    ///
    /// # Error Cases
    ///
    /// | Error | Condition |
    /// |-------|-----------|
    /// | `NotFound` | Unknown subscription id for this subscriber |
    /// | `PaymentNotDue` | Ledger timestamp is before `next_payment` |
    /// | `TransferFailed` | Token contract rejected the transfer |
    /// | `Overflow` | Advancing `next_payment` would overflow |
    ///
    /// Every failure leaves balances and `next_payment` unchanged.
    pub fn pay(env: Env, subscriber: Address, subscription_id: u32) -> Result<(), Error> {
        let now = env.ledger().timestamp();
        charge_core::pay_one(&env, &subscriber, subscription_id, now)
    }

    /// Collect several subscriptions of one subscriber in one transaction.
    ///
    /// Returns one [`PaymentResult`] per id, in input order, so callers can
    /// see which collections succeeded and which failed (with error codes).
    pub fn pay_many(
        env: Env,
        subscriber: Address,
        subscription_ids: Vec<u32>,
    ) -> Vec<PaymentResult> {
        charge_core::do_pay_many(&env, &subscriber, &subscription_ids)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Read a subscription by subscriber and id.
    pub fn get_subscription(
        env: Env,
        subscriber: Address,
        subscription_id: u32,
    ) -> Result<Subscription, Error> {
        subscription::get_subscription(&env, &subscriber, subscription_id)
    }

    /// Number of subscriptions `subscriber` has created.
    pub fn subscription_count(env: Env, subscriber: Address) -> u32 {
        subscription::subscription_count(&env, &subscriber)
    }

    /// List a subscriber's subscriptions with pagination.
    ///
    /// `limit` may not exceed [`MAX_PAGE_LIMIT`]. Use the last returned id + 1
    /// as the next `start` while `has_next` is true.
    pub fn list_subscriptions(
        env: Env,
        subscriber: Address,
        start: u32,
        limit: u32,
    ) -> Result<SubscriptionsPage, Error> {
        queries::list_subscriptions(&env, &subscriber, start, limit)
    }

    /// Next collection time, whether it is due, and how many periods are outstanding.
    pub fn get_next_payment_info(
        env: Env,
        subscriber: Address,
        subscription_id: u32,
    ) -> Result<NextPaymentInfo, Error> {
        queries::get_next_payment_info(&env, &subscriber, subscription_id)
    }

    /// On-chain storage schema version, for migration tooling.
    pub fn storage_version(_env: Env) -> u32 {
        STORAGE_VERSION
    }
}
