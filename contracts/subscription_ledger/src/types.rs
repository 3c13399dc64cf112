//! Contract types: errors, storage keys, plan and subscription records, events.
//!
//! Kept in a separate module to reduce merge conflicts when editing the
//! collection logic or contract entrypoints.

use soroban_sdk::{contracterror, contracttype, Address, Vec};

/// Increment this constant whenever the on-chain storage schema changes.
///
/// ⚠️ Upgrade-sensitive: reported by `storage_version()` so migration tooling
/// can branch on it before touching storage.
pub const STORAGE_VERSION: u32 = 1;

/// Storage TTL in ledgers (~30 days at 5 s/ledger).
/// Plan and subscription entries, the per-subscriber counters and the contract
/// instance (which holds `PlanCount`) are bumped to this on every write and on
/// reads of plans and counters.
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Upper bound on `limit` for paginated queries.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Canonical storage key enum for all contract state.
///
/// ⚠️ Upgrade-sensitive: discriminant order is fixed. Never remove or reorder
/// variants — only append new ones.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Number of plans ever created (instance storage). Discriminant 0.
    PlanCount,
    /// Plan record keyed by its index (persistent). Discriminant 1.
    Plan(u32),
    /// Number of subscriptions held by a subscriber (persistent). Discriminant 2.
    SubscriptionCount(Address),
    /// Subscription record keyed by subscriber and collection-local id. Discriminant 3.
    Subscription(Address, u32),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    /// Non-positive amount, zero frequency, or an out-of-range page limit.
    InvalidParameter = 400,
    /// Arithmetic overflow on a payment timestamp.
    Overflow = 403,
    /// Unknown plan index or subscription id.
    NotFound = 404,
    /// `pay` called before the subscription's `next_payment`.
    PaymentNotDue = 1001,
    /// The token contract rejected the transfer (balance or allowance).
    TransferFailed = 1002,
}

impl Error {
    /// Returns the numeric code for this error (for batch result reporting).
    pub const fn to_code(self) -> u32 {
        match self {
            Error::InvalidParameter => 400,
            Error::Overflow => 403,
            Error::NotFound => 404,
            Error::PaymentNotDue => 1001,
            Error::TransferFailed => 1002,
        }
    }
}

/// A merchant-defined billing template. Immutable once created.
///
/// ⚠️ Upgrade-sensitive: field order and types are serialised as XDR by Soroban.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    /// Token contract used for billing. Not validated at creation.
    pub token: Address,
    /// Token units charged per period. Always `> 0`.
    pub amount: i128,
    /// Seconds between charges. Always `> 0`.
    pub frequency: u64,
    /// Creator of the plan and beneficiary of every collection.
    pub merchant: Address,
}

/// A subscriber's enrollment in a [`Plan`].
///
/// `next_payment` starts at `start + frequency` and only ever advances by one
/// `frequency` per successful collection, so the cadence stays anchored to
/// `start` even when a payment is collected late.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub subscriber: Address,
    /// Index of the plan in the registry. Plans are never removed.
    pub plan_index: u32,
    /// Ledger timestamp at enrollment.
    pub start: u64,
    /// Earliest ledger timestamp at which the next period may be collected.
    pub next_payment: u64,
}

/// Result of collecting one subscription in a batch. Used by
/// [`crate::SubscriptionLedger::pay_many`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentResult {
    pub subscription_id: u32,
    /// True if the payment was collected.
    pub success: bool,
    /// If success is false, the error code (from [`Error::to_code`]); otherwise 0.
    pub error_code: u32,
}

/// One page of a subscriber's subscriptions, in ascending id order.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionsPage {
    pub subscription_ids: Vec<u32>,
    pub subscriptions: Vec<Subscription>,
    /// True if more subscriptions exist after the last id on this page.
    pub has_next: bool,
}

/// Collection schedule of a subscription as seen at the current ledger time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NextPaymentInfo {
    pub next_payment: u64,
    /// Whether `pay` would pass its timing check right now.
    pub is_due: bool,
    /// Whole periods collectible right now, one `pay` call each.
    pub periods_due: u64,
}

// Event types
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanCreatedEvent {
    pub plan_index: u32,
    pub merchant: Address,
    pub token: Address,
    pub amount: i128,
    pub frequency: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCreatedEvent {
    pub subscriber: Address,
    pub subscription_id: u32,
    pub plan_index: u32,
    pub start: u64,
    pub next_payment: u64,
}

/// Emitted after a period has been collected and the schedule advanced.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentSentEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub plan_index: u32,
    pub subscription_id: u32,
    /// `next_payment` after the advance.
    pub next_payment: u64,
    pub timestamp: u64,
}
