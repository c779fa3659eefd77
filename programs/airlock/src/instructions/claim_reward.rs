use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::AirlockError,
    events::RewardClaimed,
    state::{Airlock, LpBatch, PairInfo, RewardPool},
};

// ─── Accumulator math ──────────────────────────────────────────────────────
// MasterChef-style running sum: acc_armor_per_lp only ever grows, and each
// batch keeps a reward_debt baseline so owed = remaining * acc / SCALE − debt.

/// Fold a harvested amount into the accumulator. With zero stake the harvest
/// stays in PairInfo.reward unattributed until some stake exists.
pub fn accumulate(acc: u128, harvested: u64, lp_staked: u64) -> Result<u128> {
    if lp_staked == 0 || harvested == 0 {
        return Ok(acc);
    }
    let delta = (harvested as u128)
        .checked_mul(ACC_SCALE)
        .ok_or(AirlockError::MathOverflow)?
        / lp_staked as u128;
    acc.checked_add(delta)
        .ok_or_else(|| AirlockError::MathOverflow.into())
}

/// Reward owed to a batch with `remaining` unclaimed shares.
pub fn pending_armor(remaining: u64, acc: u128, reward_debt: u128) -> Result<u64> {
    let accumulated = (remaining as u128)
        .checked_mul(acc)
        .ok_or(AirlockError::MathOverflow)?
        / ACC_SCALE;
    Ok(accumulated.saturating_sub(reward_debt) as u64)
}

/// Baseline recorded after a settlement so the next owed delta starts at zero.
pub fn reward_baseline(remaining: u64, acc: u128) -> Result<u128> {
    Ok((remaining as u128)
        .checked_mul(acc)
        .ok_or(AirlockError::MathOverflow)?
        / ACC_SCALE)
}

// ─── Harvest ───────────────────────────────────────────────────────────────
// Lazy accumulator update: pull everything the reward pool has accrued since
// the last touch into the treasury and fold it into acc_armor_per_lp.
// Called by every operation that reads or mutates a pair's reward state.
pub fn harvest<'info>(
    airlock: &mut Account<'info, Airlock>,
    pair: &mut Account<'info, PairInfo>,
    reward_pool: &mut Account<'info, RewardPool>,
    reward_vault: &AccountInfo<'info>,
    armor_vault: &AccountInfo<'info>,
    reward_authority: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
) -> Result<()> {
    let harvested = reward_pool.unharvested;
    if harvested == 0 {
        return Ok(());
    }
    reward_pool.unharvested = 0;

    pair.reward = pair
        .reward
        .checked_add(harvested)
        .ok_or(AirlockError::MathOverflow)?;
    airlock.undistributed_reward = airlock
        .undistributed_reward
        .checked_add(harvested)
        .ok_or(AirlockError::MathOverflow)?;
    pair.acc_armor_per_lp = accumulate(pair.acc_armor_per_lp, harvested, pair.lp_staked)?;

    let pool_key = reward_pool.pool;
    let seeds: &[&[u8]] = &[
        REWARD_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[reward_pool.authority_bump],
    ];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: reward_vault.clone(),
                to: armor_vault.clone(),
                authority: reward_authority.clone(),
            },
            signer,
        ),
        harvested,
    )?;

    msg!("Harvested {} ARMOR for pair {}", harvested, pair.key());
    Ok(())
}

// ─── Settlement ────────────────────────────────────────────────────────────
// Settle-then-mutate: pays the owed delta on the batch's current remaining
// stake and re-baselines reward_debt against that same remaining amount.
// Callers that shrink the stake afterwards must re-baseline again with the
// reduced remaining (claim_lp does).
pub fn settle_batch<'info>(
    airlock: &mut Account<'info, Airlock>,
    pair: &mut Account<'info, PairInfo>,
    batch: &mut Account<'info, LpBatch>,
    armor_vault: &AccountInfo<'info>,
    holder_armor: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
) -> Result<u64> {
    let remaining = batch.remaining();
    let owed = pending_armor(remaining, pair.acc_armor_per_lp, batch.reward_debt)?;
    batch.reward_debt = reward_baseline(remaining, pair.acc_armor_per_lp)?;

    if owed == 0 {
        return Ok(0);
    }

    pair.reward = pair
        .reward
        .checked_sub(owed)
        .ok_or(AirlockError::MathOverflow)?;
    airlock.undistributed_reward = airlock
        .undistributed_reward
        .checked_sub(owed)
        .ok_or(AirlockError::MathOverflow)?;

    let bump = airlock.vault_authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: armor_vault.clone(),
                to: holder_armor.clone(),
                authority: vault_authority.clone(),
            },
            signer,
        ),
        owed,
    )?;

    emit!(RewardClaimed {
        holder: batch.holder,
        amount: owed,
    });
    Ok(owed)
}

// ─── Handlers ──────────────────────────────────────────────────────────────

/// Claim the ARMOR yield accrued to one batch. A zero owed amount is a
/// no-op success; the settlement baseline still advances.
pub fn handler(ctx: Context<ClaimArmorReward>, _index: u64) -> Result<()> {
    harvest(
        &mut ctx.accounts.airlock,
        &mut ctx.accounts.pair,
        &mut ctx.accounts.reward_pool,
        &ctx.accounts.reward_vault.to_account_info(),
        &ctx.accounts.armor_vault.to_account_info(),
        &ctx.accounts.reward_authority.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
    )?;

    let owed = settle_batch(
        &mut ctx.accounts.airlock,
        &mut ctx.accounts.pair,
        &mut ctx.accounts.batch,
        &ctx.accounts.armor_vault.to_account_info(),
        &ctx.accounts.holder_armor.to_account_info(),
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
    )?;

    msg!("Reward claimed: {} ARMOR", owed);
    Ok(())
}

/// Read-only view: what claim_armor_reward would pay right now, including
/// not-yet-harvested yield.
pub fn pending_handler(ctx: Context<PendingArmorReward>, _index: u64) -> Result<u64> {
    let pair = &ctx.accounts.pair;
    let batch = &ctx.accounts.batch;
    let projected = accumulate(
        pair.acc_armor_per_lp,
        ctx.accounts.reward_pool.unharvested,
        pair.lp_staked,
    )?;
    pending_armor(batch.remaining(), projected, batch.reward_debt)
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct ClaimArmorReward<'info> {
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
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct PendingArmorReward<'info> {
    /// CHECK: batch holder; not required to sign for a view
    pub holder: UncheckedAccount<'info>,

    #[account(
        seeds = [BATCH_SEED, holder.key().as_ref(), &index.to_le_bytes()],
        bump = batch.bump,
        constraint = batch.holder == holder.key() @ AirlockError::NothingToClaim,
    )]
    pub batch: Account<'info, LpBatch>,

    #[account(constraint = pair.key() == batch.pair @ AirlockError::PairNotRegistered)]
    pub pair: Account<'info, PairInfo>,

    #[account(constraint = reward_pool.key() == pair.reward_pool @ AirlockError::InvalidRewardPool)]
    pub reward_pool: Account<'info, RewardPool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: u128 = ACC_SCALE;

    #[test]
    fn accumulate_is_monotonic() {
        let acc0 = accumulate(0, 1_000, 10_000).unwrap();
        let acc1 = accumulate(acc0, 500, 10_000).unwrap();
        assert!(acc1 > acc0);
        assert_eq!(acc0, 1_000u128 * SCALE / 10_000);
    }

    #[test]
    fn accumulate_zero_stake_is_noop() {
        assert_eq!(accumulate(42, 1_000, 0).unwrap(), 42);
        assert_eq!(accumulate(42, 0, 1_000).unwrap(), 42);
    }

    #[test]
    fn two_harvests_pay_exactly_r1_plus_r2() {
        // Single staker, stake never changes: claims after each harvest must
        // sum to the total funded yield with no rounding loss.
        let stake = 12_345u64;
        let (r1, r2) = (7_777u64, 13_131u64);

        let mut acc = accumulate(0, r1, stake).unwrap();
        let mut debt = 0u128;

        let pay1 = pending_armor(stake, acc, debt).unwrap();
        debt = reward_baseline(stake, acc).unwrap();

        acc = accumulate(acc, r2, stake).unwrap();
        let pay2 = pending_armor(stake, acc, debt).unwrap();

        // Per-claim floor rounding may drop at most 1 unit per harvest
        let total = pay1 + pay2;
        assert!(total <= r1 + r2);
        assert!(r1 + r2 - total <= 2);
    }

    #[test]
    fn reduced_stake_earns_only_on_remainder() {
        // Holder stakes 1000, earns 100, releases half, then fresh yield of
        // 100 lands. The second claim must reflect 500 shares, not 1000.
        let acc0 = accumulate(0, 100, 1_000).unwrap();
        let first = pending_armor(1_000, acc0, 0).unwrap();
        assert_eq!(first, 100);
        // claim_lp re-baselines on the reduced remaining after releasing 500
        let debt = reward_baseline(500, acc0).unwrap();

        let acc1 = accumulate(acc0, 100, 500).unwrap();
        let owed = pending_armor(500, acc1, debt).unwrap();
        assert_eq!(owed, 100);
    }

    #[test]
    fn settlement_is_idempotent() {
        let acc = accumulate(0, 999, 333).unwrap();
        let owed = pending_armor(333, acc, 0).unwrap();
        assert_eq!(owed, 999);
        let debt = reward_baseline(333, acc).unwrap();
        assert_eq!(pending_armor(333, acc, debt).unwrap(), 0);
    }

    #[test]
    fn conservation_across_two_holders() {
        // Two batches of 300 and 700, one harvest of 1000: payouts pro-rata,
        // never exceeding the harvest.
        let acc = accumulate(0, 1_000, 1_000).unwrap();
        let a = pending_armor(300, acc, 0).unwrap();
        let b = pending_armor(700, acc, 0).unwrap();
        assert_eq!(a, 300);
        assert_eq!(b, 700);
        assert!(a + b <= 1_000);
    }

    #[test]
    fn late_batch_earns_nothing_from_past_harvests() {
        // Yield lands while only batch A is staked. Batch B, created
        // afterwards with its debt baselined against the current
        // accumulator, must owe nothing until fresh yield arrives — and the
        // combined payouts must stay within what was harvested.
        let acc0 = accumulate(0, 900, 300).unwrap();
        let b_debt = reward_baseline(600, acc0).unwrap();
        assert_eq!(pending_armor(600, acc0, b_debt).unwrap(), 0);

        // Fresh yield over the combined stake splits pro-rata
        let acc1 = accumulate(acc0, 450, 900).unwrap();
        let a_paid = pending_armor(300, acc1, 0).unwrap();
        let b_paid = pending_armor(600, acc1, b_debt).unwrap();
        assert_eq!(a_paid, 900 + 150);
        assert_eq!(b_paid, 300);
        assert!(a_paid + b_paid <= 900 + 450);
    }

    #[test]
    fn interleaved_claims_keep_books_consistent() {
        use super::super::claim_lp::claimable_lp;

        // Two batches vesting on the same pair, harvests landing between
        // partial LP claims. Checks the two global invariants: lp_staked
        // equals the sum of batch remainders, and rewards paid never exceed
        // rewards harvested.
        struct Batch {
            amount: u64,
            claimed: u64,
            debt: u128,
            maturity: i64,
        }
        let vesting = 1_000i64;
        let mut batches = [
            Batch { amount: 600, claimed: 0, debt: 0, maturity: 100 },
            Batch { amount: 400, claimed: 0, debt: 0, maturity: 200 },
        ];
        let mut lp_staked = 1_000u64;
        let mut acc = 0u128;
        let mut harvested_total = 0u64;
        let mut paid_total = 0u64;

        for (now, fund) in [(150, 500u64), (600, 0), (900, 250), (1_500, 1_000)] {
            acc = accumulate(acc, fund, lp_staked).unwrap();
            harvested_total += fund;

            for b in batches.iter_mut() {
                if now < b.maturity {
                    continue;
                }
                // settle-then-mutate, then re-baseline on the new remaining
                let remaining = b.amount - b.claimed;
                paid_total += pending_armor(remaining, acc, b.debt).unwrap();

                let release = claimable_lp(b.amount, b.claimed, b.maturity, vesting, now);
                b.claimed += release;
                lp_staked -= release;
                b.debt = reward_baseline(b.amount - b.claimed, acc).unwrap();
            }

            let remainder_sum: u64 = batches.iter().map(|b| b.amount - b.claimed).sum();
            assert_eq!(lp_staked, remainder_sum);
            assert!(paid_total <= harvested_total);
        }

        // Everything vested by the last step
        assert_eq!(lp_staked, 0);
    }

    #[test]
    fn tiny_reward_large_stake_does_not_truncate_to_zero() {
        // 1 unit of yield over a large (but realistic) stake still moves acc.
        let acc = accumulate(0, 1, 1_000_000_000).unwrap();
        assert!(acc > 0);
        assert_eq!(pending_armor(1_000_000_000, acc, 0).unwrap(), 1);
    }
}
