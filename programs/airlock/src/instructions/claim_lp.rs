use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::{
    constants::*,
    error::AirlockError,
    events::LpClaimed,
    state::{Airlock, LpBatch, PairInfo, Pool, Position, RewardPool},
};
use super::claim_reward::{harvest, reward_baseline, settle_batch};

// ─── Vesting curve ─────────────────────────────────────────────────────────

/// Shares unlocked by time `now`: zero before maturity, then linear over
/// vesting_period, capped at the full amount. Floors on the way up; the cap
/// guarantees the exact remainder is released once vesting completes.
pub fn unlocked_amount(amount: u64, maturity: i64, vesting_period: i64, now: i64) -> u64 {
    if now < maturity {
        return 0;
    }
    let elapsed = (now - maturity).min(vesting_period);
    if elapsed >= vesting_period {
        return amount;
    }
    ((amount as u128) * (elapsed as u128) / (vesting_period as u128)) as u64
}

/// Newly claimable shares: unlocked minus what was already released.
pub fn claimable_lp(
    amount: u64,
    claimed_amount: u64,
    maturity: i64,
    vesting_period: i64,
    now: i64,
) -> u64 {
    unlocked_amount(amount, maturity, vesting_period, now).saturating_sub(claimed_amount)
}

// ─── Handler ───────────────────────────────────────────────────────────────
/// Release the vested portion of a batch. Rewards are settled on the
/// pre-claim stake first — settle-then-mutate — then the released shares are
/// unstaked and credited to the holder's pool position. A zero claimable
/// amount is a no-op success (the reward settlement still runs).
pub fn handler(ctx: Context<ClaimLp>, _index: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require!(
        now >= ctx.accounts.batch.maturity,
        AirlockError::StillLocked
    );

    harvest(
        &mut ctx.accounts.airlock,
        &mut ctx.accounts.pair,
        &mut ctx.accounts.reward_pool,
        &ctx.accounts.reward_vault.to_account_info(),
        &ctx.accounts.armor_vault.to_account_info(),
        &ctx.accounts.reward_authority.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
    )?;

    // Reward entitlement is a function of the stake that is about to shrink,
    // so settlement must run before claimed_amount / lp_staked change.
    settle_batch(
        &mut ctx.accounts.airlock,
        &mut ctx.accounts.pair,
        &mut ctx.accounts.batch,
        &ctx.accounts.armor_vault.to_account_info(),
        &ctx.accounts.holder_armor.to_account_info(),
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
    )?;

    let vesting_period = ctx.accounts.airlock.vesting_period;
    let batch = &ctx.accounts.batch;
    let claimable = claimable_lp(
        batch.amount,
        batch.claimed_amount,
        batch.maturity,
        vesting_period,
        now,
    );

    if claimable > 0 {
        // Unstake and hand the shares to the holder's own position
        let position = &mut ctx.accounts.position;
        if position.owner == Pubkey::default() {
            position.owner = ctx.accounts.holder.key();
            position.pool = ctx.accounts.pool.key();
            position.bump = ctx.bumps.position;
        }
        position.lp_shares = position
            .lp_shares
            .checked_add(claimable)
            .ok_or(AirlockError::MathOverflow)?;

        let batch = &mut ctx.accounts.batch;
        batch.claimed_amount = batch
            .claimed_amount
            .checked_add(claimable)
            .ok_or(AirlockError::MathOverflow)?;
        ctx.accounts.pair.lp_staked = ctx
            .accounts
            .pair
            .lp_staked
            .checked_sub(claimable)
            .ok_or(AirlockError::MathOverflow)?;
        ctx.accounts.reward_pool.staked = ctx
            .accounts
            .reward_pool
            .staked
            .checked_sub(claimable)
            .ok_or(AirlockError::MathOverflow)?;

        // Re-baseline against the reduced remaining so the next settlement's
        // delta starts at zero
        let remaining = ctx.accounts.batch.remaining();
        ctx.accounts.batch.reward_debt =
            reward_baseline(remaining, ctx.accounts.pair.acc_armor_per_lp)?;

        emit!(LpClaimed {
            holder: ctx.accounts.holder.key(),
            pair: ctx.accounts.batch.pair,
            amount: claimable,
        });
    }

    msg!("LP claimed: {} shares", claimable);
    Ok(())
}

/// Read-only view: shares claim_lp would release right now.
pub fn pending_handler(ctx: Context<PendingLp>, _index: u64) -> Result<u64> {
    let batch = &ctx.accounts.batch;
    let now = Clock::get()?.unix_timestamp;
    Ok(claimable_lp(
        batch.amount,
        batch.claimed_amount,
        batch.maturity,
        ctx.accounts.airlock.vesting_period,
        now,
    ))
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct ClaimLp<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(mut, seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    /// CHECK: PDA treasury authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump = airlock.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = armor_vault.key() == airlock.armor_vault @ AirlockError::MintMismatch,
    )]
    pub armor_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [BATCH_SEED, holder.key().as_ref(), &index.to_le_bytes()],
        bump = batch.bump,
        constraint = batch.holder == holder.key() @ AirlockError::NothingToClaim,
    )]
    pub batch: Account<'info, LpBatch>,

    #[account(
        mut,
        constraint = pair.key() == batch.pair @ AirlockError::PairNotRegistered,
    )]
    pub pair: Account<'info, PairInfo>,

    #[account(constraint = pool.key() == pair.pool @ AirlockError::PairNotRegistered)]
    pub pool: Account<'info, Pool>,

    #[account(
        init_if_needed,
        payer = holder,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), holder.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        constraint = reward_pool.key() == pair.reward_pool @ AirlockError::InvalidRewardPool,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// CHECK: PDA reward authority
    #[account(
        seeds = [REWARD_AUTHORITY_SEED, reward_pool.pool.as_ref()],
        bump = reward_pool.authority_bump,
    )]
    pub reward_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = reward_vault.key() == reward_pool.reward_vault @ AirlockError::MintMismatch,
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_armor.mint == airlock.armor_mint @ AirlockError::MintMismatch,
        constraint = holder_armor.owner == holder.key(),
    )]
    pub holder_armor: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct PendingLp<'info> {
    /// CHECK: batch holder; not required to sign for a view
    pub holder: UncheckedAccount<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    #[account(
        seeds = [BATCH_SEED, holder.key().as_ref(), &index.to_le_bytes()],
        bump = batch.bump,
        constraint = batch.holder == holder.key() @ AirlockError::NothingToClaim,
    )]
    pub batch: Account<'info, LpBatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VESTING: i64 = 1_000;
    const MATURITY: i64 = 10_000;

    #[test]
    fn locked_before_maturity() {
        assert_eq!(unlocked_amount(500, MATURITY, VESTING, MATURITY - 1), 0);
        assert_eq!(unlocked_amount(500, MATURITY, VESTING, 0), 0);
    }

    #[test]
    fn zero_at_exact_maturity() {
        assert_eq!(unlocked_amount(500, MATURITY, VESTING, MATURITY), 0);
    }

    #[test]
    fn halfway_releases_half_rounded_down() {
        assert_eq!(
            unlocked_amount(500, MATURITY, VESTING, MATURITY + VESTING / 2),
            250
        );
        // Odd amount floors
        assert_eq!(
            unlocked_amount(501, MATURITY, VESTING, MATURITY + VESTING / 2),
            250
        );
    }

    #[test]
    fn full_vesting_releases_exact_amount() {
        assert_eq!(unlocked_amount(501, MATURITY, VESTING, MATURITY + VESTING), 501);
        assert_eq!(
            unlocked_amount(501, MATURITY, VESTING, MATURITY + VESTING * 10),
            501
        );
    }

    #[test]
    fn claim_is_idempotent_with_no_elapsed_time() {
        let now = MATURITY + 300;
        let first = claimable_lp(500, 0, MATURITY, VESTING, now);
        assert_eq!(first, 150);
        // Second call at the same instant, after claimed_amount advanced
        assert_eq!(claimable_lp(500, first, MATURITY, VESTING, now), 0);
    }

    #[test]
    fn incremental_claims_sum_to_amount() {
        // Piecewise claims with floor rounding leave dust until the final
        // claim, which must release the exact remainder.
        let amount = 1_003u64;
        let mut claimed = 0u64;
        for step in [1, 7, 333, 334, 999, 1_000] {
            claimed += claimable_lp(amount, claimed, MATURITY, VESTING, MATURITY + step);
            assert!(claimed <= amount);
        }
        assert_eq!(claimed, amount);
    }

    #[test]
    fn monotonic_claimed_never_exceeds_amount() {
        let amount = 77u64;
        let mut claimed = 0u64;
        let mut last = 0u64;
        for t in (0..=2 * VESTING).step_by(13) {
            claimed += claimable_lp(amount, claimed, MATURITY, VESTING, MATURITY + t);
            assert!(claimed >= last);
            assert!(claimed <= amount);
            last = claimed;
        }
        assert_eq!(claimed, amount);
    }
}
