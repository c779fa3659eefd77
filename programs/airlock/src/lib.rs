/// Airlock — liquidity-bootstrapping and vesting ledger.
///
/// Users deposit a whitelisted asset (or attach native value on the
/// wrapped-native path); the airlock pairs it with treasury ARMOR at the
/// pool's spot ratio, provisions both sides into the constant-product pool,
/// and stakes the minted LP shares in the pair's reward pool. Each deposit
/// becomes a batch that unlocks linearly after a lock period, while staked
/// shares earn ARMOR yield through a per-pair accumulator.
///
/// Core instructions:
///   deposit              — pull asset in, pair with ARMOR, mint + stake LP,
///                          queue a vesting batch
///   claim_lp             — release the vested portion of a batch
///   claim_armor_reward   — claim a batch's accrued ARMOR yield
///   pending_lp           — view: claimable shares right now
///   pending_armor_reward — view: claimable yield right now
///
/// Setup / admin:
///   initialize, initialize_pool, initialize_reward_pool, add_token,
///   increase_allocation, decrease_allocation, flush_to_treasury, fund_reward

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Airlock",
    project_url:      "https://github.com/armorlabs/airlock",
    contacts:         "email:security@armorlabs.xyz",
    policy:           "Please report security vulnerabilities by email. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/armorlabs/airlock",
    preferred_languages: "en"
}

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod airlock {
    use super::*;

    /// Create the airlock config and ARMOR treasury. Periods are immutable.
    pub fn initialize(
        ctx: Context<Initialize>,
        lock_period: i64,
        vesting_period: i64,
    ) -> Result<()> {
        initialize::handler(ctx, lock_period, vesting_period)
    }

    /// Create and seed an asset/ARMOR constant-product pool.
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        asset_amount: u64,
        armor_amount: u64,
    ) -> Result<()> {
        initialize_pool::handler(ctx, asset_amount, armor_amount)
    }

    /// Create the reward pool bound to a liquidity pool.
    pub fn initialize_reward_pool(ctx: Context<InitializeRewardPool>) -> Result<()> {
        initialize_reward_pool::handler(ctx)
    }

    /// Whitelist an asset for deposits. Authority only.
    pub fn add_token(ctx: Context<AddToken>) -> Result<()> {
        add_token::handler(ctx)
    }

    /// Credit a user's ARMOR allocation, backing it with treasury ARMOR.
    pub fn increase_allocation(ctx: Context<IncreaseAllocation>, amount: u64) -> Result<()> {
        allocation::increase_handler(ctx, amount)
    }

    /// Debit a user's ARMOR allocation and withdraw the backing ARMOR.
    pub fn decrease_allocation(ctx: Context<DecreaseAllocation>, amount: u64) -> Result<()> {
        allocation::decrease_handler(ctx, amount)
    }

    /// Withdraw spendable treasury ARMOR. Authority only.
    pub fn flush_to_treasury(ctx: Context<FlushToTreasury>, amount: u64) -> Result<()> {
        flush_to_treasury::handler(ctx, amount)
    }

    /// Top up a reward pool with ARMOR yield. Permissionless.
    pub fn fund_reward(ctx: Context<FundReward>, amount: u64) -> Result<()> {
        fund_reward::handler(ctx, amount)
    }

    /// Deposit an asset for a beneficiary; queues a vesting LP batch.
    /// native_value must equal amount on the wrapped-native path and be zero
    /// otherwise.
    pub fn deposit(ctx: Context<Deposit>, amount: u64, native_value: u64) -> Result<()> {
        deposit::handler(ctx, amount, native_value)
    }

    /// Release the vested portion of batch `index`. Settles rewards first.
    pub fn claim_lp(ctx: Context<ClaimLp>, index: u64) -> Result<()> {
        claim_lp::handler(ctx, index)
    }

    /// Claim batch `index`'s accrued ARMOR yield.
    pub fn claim_armor_reward(ctx: Context<ClaimArmorReward>, index: u64) -> Result<()> {
        claim_reward::handler(ctx, index)
    }

    /// View: shares claim_lp would release right now.
    pub fn pending_lp(ctx: Context<PendingLp>, index: u64) -> Result<u64> {
        claim_lp::pending_handler(ctx, index)
    }

    /// View: yield claim_armor_reward would pay right now, including
    /// unharvested funding.
    pub fn pending_armor_reward(ctx: Context<PendingArmorReward>, index: u64) -> Result<u64> {
        claim_reward::pending_handler(ctx, index)
    }
}
