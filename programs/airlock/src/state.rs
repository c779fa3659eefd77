use anchor_lang::prelude::*;

// ─── Airlock ───────────────────────────────────────────────────────────────
// Singleton configuration. lock_period / vesting_period are set once at
// initialization and never change.
#[account]
pub struct Airlock {
    pub authority: Pubkey,            // 32
    pub armor_mint: Pubkey,           // 32
    /// Treasury ARMOR vault, owned by the vault-authority PDA
    pub armor_vault: Pubkey,          // 32
    pub vault_authority_bump: u8,     // 1
    /// Seconds before any vesting begins
    pub lock_period: i64,             // 8
    /// Seconds over which a batch unlocks linearly after maturity
    pub vesting_period: i64,          // 8
    /// ARMOR sitting in the treasury vault that is already owed to stakers.
    /// Spendable treasury = vault balance − this.
    pub undistributed_reward: u64,    // 8
    pub bump: u8,                     // 1
}

impl Airlock {
    // 8 discriminator + 32+32+32+1+8+8+8+1 = 130
    pub const LEN: usize = 130;
}

// ─── Pool ──────────────────────────────────────────────────────────────────
// Constant-product asset/ARMOR pool. Reserves are the vault balances; LP
// shares are tracked in-account (no mint), held by Positions.
#[account]
pub struct Pool {
    pub asset_mint: Pubkey,       // 32
    pub asset_vault: Pubkey,      // 32
    pub armor_vault: Pubkey,      // 32
    /// Total LP shares outstanding
    pub lp_supply: u64,           // 8
    pub authority_bump: u8,       // 1
    pub bump: u8,                 // 1
}

impl Pool {
    // 8 + 32+32+32+8+1+1 = 114
    pub const LEN: usize = 114;
}

// ─── Position ──────────────────────────────────────────────────────────────
// One holder's LP shares in a single pool. Released (vested) shares from the
// airlock land here.
#[account]
pub struct Position {
    pub owner: Pubkey,    // 32
    pub pool: Pubkey,     // 32
    pub lp_shares: u64,   // 8
    pub bump: u8,         // 1
}

impl Position {
    // 8 + 32+32+8+1 = 81
    pub const LEN: usize = 81;
}

// ─── RewardPool ────────────────────────────────────────────────────────────
// External staking contract for one pool's LP shares. Yield arrives as ARMOR
// via fund_reward and sits in unharvested until the airlock harvests it.
#[account]
pub struct RewardPool {
    pub pool: Pubkey,           // 32
    /// ARMOR vault owned by the reward-authority PDA
    pub reward_vault: Pubkey,   // 32
    /// LP shares currently staked by the airlock
    pub staked: u64,            // 8
    /// Yield received but not yet harvested
    pub unharvested: u64,       // 8
    pub authority_bump: u8,     // 1
    pub bump: u8,               // 1
}

impl RewardPool {
    // 8 + 32+32+8+8+1+1 = 90
    pub const LEN: usize = 90;
}

// ─── PairInfo ──────────────────────────────────────────────────────────────
// Registry entry for a whitelisted asset plus its reward bookkeeping.
#[account]
pub struct PairInfo {
    pub asset_mint: Pubkey,        // 32
    pub pool: Pubkey,              // 32
    pub reward_pool: Pubkey,       // 32
    /// Invariant: equals Σ (amount − claimed_amount) over live batches
    pub lp_staked: u64,            // 8
    /// Harvested but undistributed ARMOR owed to this pair's stakers
    pub reward: u64,               // 8
    /// Cumulative ARMOR per staked LP share, scaled by ACC_SCALE
    pub acc_armor_per_lp: u128,    // 16
    pub bump: u8,                  // 1
}

impl PairInfo {
    // 8 + 32+32+32+8+8+16+1 = 137
    pub const LEN: usize = 137;
}

// ─── Allocation ────────────────────────────────────────────────────────────
// Per-user ARMOR credit that deposits draw against, plus the user's
// append-only batch counter.
#[account]
pub struct Allocation {
    pub user: Pubkey,       // 32
    pub amount: u64,        // 8
    pub batch_count: u64,   // 8
    pub bump: u8,           // 1
}

impl Allocation {
    // 8 + 32+8+8+1 = 57
    pub const LEN: usize = 57;
}

// ─── LpBatch ───────────────────────────────────────────────────────────────
// One deposit's vesting record. Created once, never closed; a fully claimed
// batch is retained as inert history.
#[account]
pub struct LpBatch {
    pub holder: Pubkey,          // 32
    /// PairInfo this batch is staked under
    pub pair: Pubkey,            // 32
    pub index: u64,              // 8
    /// LP shares minted at deposit time
    pub amount: u64,             // 8
    /// Shares already released, ≤ amount, monotonically non-decreasing
    pub claimed_amount: u64,     // 8
    /// remaining × acc_armor_per_lp / ACC_SCALE at last settlement
    pub reward_debt: u128,       // 16
    /// Timestamp at which linear vesting begins
    pub maturity: i64,           // 8
    pub bump: u8,                // 1
}

impl LpBatch {
    // 8 + 32+32+8+8+8+16+8+1 = 121
    pub const LEN: usize = 121;

    pub fn remaining(&self) -> u64 {
        self.amount.saturating_sub(self.claimed_amount)
    }
}
