use anchor_lang::prelude::*;

#[error_code]
pub enum AirlockError {
    #[msg("Caller is not the airlock authority")]
    Unauthorized,
    #[msg("Pair is not registered")]
    PairNotRegistered,
    #[msg("Pair does not exist")]
    PairNotFound,
    #[msg("Reward pool is not bound to this pair")]
    InvalidRewardPool,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Beneficiary cannot be the zero address")]
    ZeroAddress,
    #[msg("Attached value does not match amount")]
    InvalidAmount,
    #[msg("Attached native value requires the wrapped-native asset")]
    MustBeWrappedNative,
    #[msg("Allocation below required counterpart")]
    InsufficientAllocation,
    #[msg("Insufficient ARMOR in airlock")]
    InsufficientArmor,
    #[msg("Batch has not reached maturity")]
    StillLocked,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Lock and vesting periods must be positive")]
    InvalidPeriod,
    #[msg("Pool has insufficient liquidity")]
    InsufficientLiquidity,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Token mint or vault does not match")]
    MintMismatch,
}
