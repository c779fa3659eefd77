/// PDA seeds
pub const AIRLOCK_SEED: &[u8] = b"airlock";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const POSITION_SEED: &[u8] = b"position";
pub const REWARD_POOL_SEED: &[u8] = b"reward_pool";
pub const REWARD_AUTHORITY_SEED: &[u8] = b"reward_authority";
pub const PAIR_SEED: &[u8] = b"pair";
pub const ALLOCATION_SEED: &[u8] = b"allocation";
pub const BATCH_SEED: &[u8] = b"batch";

/// Fixed-point scale for the per-LP reward accumulator.
/// Large enough that reward * ACC_SCALE / lp_staked never truncates to zero
/// for realistic stake/reward ratios.
pub const ACC_SCALE: u128 = 1_000_000_000_000;
