use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, spl_token, Mint, SyncNative, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::AirlockError,
    events::LpQueued,
    state::{Airlock, Allocation, LpBatch, PairInfo, Pool, RewardPool},
};
use super::claim_reward::{harvest, reward_baseline};

// ─── Deposit math ──────────────────────────────────────────────────────────

/// ARMOR the treasury must pair with `amount` of asset at current reserves.
/// Truncating division — rounds down so the treasury never over-commits.
pub fn counterpart_amount(amount: u64, asset_reserve: u64, armor_reserve: u64) -> Result<u64> {
    require!(asset_reserve > 0, AirlockError::InsufficientLiquidity);
    let counterpart = (amount as u128)
        .checked_mul(armor_reserve as u128)
        .ok_or(AirlockError::MathOverflow)?
        / asset_reserve as u128;
    u64::try_from(counterpart).map_err(|_| AirlockError::MathOverflow.into())
}

/// LP shares for a proportional deposit. Min of the two ratios so an
/// imbalanced deposit can never dilute existing holders.
pub fn proportional_lp(
    asset_amount: u64,
    armor_amount: u64,
    asset_reserve: u64,
    armor_reserve: u64,
    lp_supply: u64,
) -> Result<u64> {
    require!(
        asset_reserve > 0 && armor_reserve > 0 && lp_supply > 0,
        AirlockError::InsufficientLiquidity
    );
    let from_asset = (asset_amount as u128)
        .checked_mul(lp_supply as u128)
        .ok_or(AirlockError::MathOverflow)?
        / asset_reserve as u128;
    let from_armor = (armor_amount as u128)
        .checked_mul(lp_supply as u128)
        .ok_or(AirlockError::MathOverflow)?
        / armor_reserve as u128;
    Ok(from_asset.min(from_armor) as u64)
}

// ─── Handler ───────────────────────────────────────────────────────────────
/// Deposit a whitelisted asset. The airlock pairs it with treasury ARMOR at
/// the pool's current price, provisions both into the pool, stakes the minted
/// LP shares, and queues them in a new vesting batch for the beneficiary.
///
/// native_value > 0 is the wrapped-native path: lamports are attached instead
/// of pulling from a token account, and must equal `amount` exactly.
pub fn handler(ctx: Context<Deposit>, amount: u64, native_value: u64) -> Result<()> {
    require!(amount > 0, AirlockError::ZeroAmount);
    require!(
        ctx.accounts.beneficiary.key() != Pubkey::default(),
        AirlockError::ZeroAddress
    );

    let is_native = ctx.accounts.asset_mint.key() == spl_token::native_mint::ID;
    if native_value > 0 {
        require!(is_native, AirlockError::MustBeWrappedNative);
        require!(native_value == amount, AirlockError::InvalidAmount);
    }

    // Lazy accumulator update before touching this pair's reward state
    harvest(
        &mut ctx.accounts.airlock,
        &mut ctx.accounts.pair,
        &mut ctx.accounts.reward_pool,
        &ctx.accounts.reward_vault.to_account_info(),
        &ctx.accounts.armor_vault.to_account_info(),
        &ctx.accounts.reward_authority.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
    )?;
    // Harvest may have moved ARMOR into the treasury vault
    ctx.accounts.armor_vault.reload()?;

    // Pre-deposit reserves
    let asset_reserve = ctx.accounts.asset_vault.amount;
    let armor_reserve = ctx.accounts.pool_armor_vault.amount;
    let lp_supply = ctx.accounts.pool.lp_supply;

    let counterpart = counterpart_amount(amount, asset_reserve, armor_reserve)?;

    require!(
        ctx.accounts.allocation.amount >= counterpart,
        AirlockError::InsufficientAllocation
    );
    let spendable = ctx
        .accounts
        .armor_vault
        .amount
        .saturating_sub(ctx.accounts.airlock.undistributed_reward);
    require!(spendable >= counterpart, AirlockError::InsufficientArmor);

    let minted = proportional_lp(amount, counterpart, asset_reserve, armor_reserve, lp_supply)?;
    require!(minted > 0, AirlockError::ZeroAmount);

    ctx.accounts.allocation.amount -= counterpart;

    // Pull the asset in: lamports + sync for wrapped native, SPL transfer
    // otherwise
    if native_value > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.depositor.to_account_info(),
                    to: ctx.accounts.asset_vault.to_account_info(),
                },
            ),
            native_value,
        )?;
        token::sync_native(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            SyncNative {
                account: ctx.accounts.asset_vault.to_account_info(),
            },
        ))?;
    } else {
        let depositor_asset = ctx
            .accounts
            .depositor_asset
            .as_ref()
            .ok_or(AirlockError::InvalidAmount)?;
        require!(
            depositor_asset.mint == ctx.accounts.asset_mint.key(),
            AirlockError::MintMismatch
        );
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: depositor_asset.to_account_info(),
                    to: ctx.accounts.asset_vault.to_account_info(),
                    authority: ctx.accounts.depositor.to_account_info(),
                },
            ),
            amount,
        )?;
    }

    // Counterpart ARMOR: treasury → pool
    let bump = ctx.accounts.airlock.vault_authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &[bump]];
    let signer = &[seeds];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.armor_vault.to_account_info(),
                to: ctx.accounts.pool_armor_vault.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        counterpart,
    )?;

    // Mint and immediately stake
    ctx.accounts.pool.lp_supply = lp_supply
        .checked_add(minted)
        .ok_or(AirlockError::MathOverflow)?;
    ctx.accounts.pair.lp_staked = ctx
        .accounts
        .pair
        .lp_staked
        .checked_add(minted)
        .ok_or(AirlockError::MathOverflow)?;
    ctx.accounts.reward_pool.staked = ctx
        .accounts
        .reward_pool
        .staked
        .checked_add(minted)
        .ok_or(AirlockError::MathOverflow)?;

    let now = Clock::get()?.unix_timestamp;
    let maturity = now
        .checked_add(ctx.accounts.airlock.lock_period)
        .ok_or(AirlockError::MathOverflow)?;

    let batch = &mut ctx.accounts.batch;
    batch.holder = ctx.accounts.beneficiary.key();
    batch.pair = ctx.accounts.pair.key();
    batch.index = ctx.accounts.allocation.batch_count;
    batch.amount = minted;
    batch.claimed_amount = 0;
    // Baseline against the current accumulator so the batch earns only from
    // here on
    batch.reward_debt = reward_baseline(minted, ctx.accounts.pair.acc_armor_per_lp)?;
    batch.maturity = maturity;
    batch.bump = ctx.bumps.batch;

    ctx.accounts.allocation.batch_count = ctx
        .accounts
        .allocation
        .batch_count
        .checked_add(1)
        .ok_or(AirlockError::MathOverflow)?;

    emit!(LpQueued {
        holder: batch.holder,
        pair: batch.pair,
        lp_amount: minted,
        token_amount: amount,
        armor_amount: counterpart,
        maturity,
    });
    msg!(
        "LP queued: holder={} lp={} asset={} armor={} maturity={}",
        ctx.accounts.beneficiary.key(),
        minted,
        amount,
        counterpart,
        maturity
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    /// CHECK: batch holder; any address
    pub beneficiary: UncheckedAccount<'info>,

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

    pub asset_mint: Account<'info, Mint>,

    // Missing registry PDA surfaces as "pair is not registered"
    #[account(
        mut,
        seeds = [PAIR_SEED, asset_mint.key().as_ref()],
        bump = pair.bump,
        constraint = pair.asset_mint == asset_mint.key() @ AirlockError::PairNotRegistered,
    )]
    pub pair: Account<'info, PairInfo>,

    #[account(
        mut,
        constraint = pool.key() == pair.pool @ AirlockError::PairNotRegistered,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        constraint = asset_vault.key() == pool.asset_vault @ AirlockError::MintMismatch,
    )]
    pub asset_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = pool_armor_vault.key() == pool.armor_vault @ AirlockError::MintMismatch,
    )]
    pub pool_armor_vault: Box<Account<'info, TokenAccount>>,

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
        seeds = [ALLOCATION_SEED, beneficiary.key().as_ref()],
        bump = allocation.bump,
        constraint = allocation.user == beneficiary.key() @ AirlockError::InsufficientAllocation,
    )]
    pub allocation: Account<'info, Allocation>,

    #[account(
        init,
        payer = depositor,
        space = LpBatch::LEN,
        seeds = [
            BATCH_SEED,
            beneficiary.key().as_ref(),
            &allocation.batch_count.to_le_bytes(),
        ],
        bump,
    )]
    pub batch: Account<'info, LpBatch>,

    /// Depositor's asset token account; unused on the wrapped-native path
    #[account(mut)]
    pub depositor_asset: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterpart_matches_reserve_ratio() {
        // 10 asset against 50:10000 reserves → 2000 ARMOR
        assert_eq!(counterpart_amount(10, 50, 10_000).unwrap(), 2_000);
    }

    #[test]
    fn counterpart_rounds_down() {
        assert_eq!(counterpart_amount(1, 3, 10).unwrap(), 3);
        assert_eq!(counterpart_amount(7, 3, 2).unwrap(), 4);
    }

    #[test]
    fn counterpart_rejects_empty_reserve() {
        assert!(counterpart_amount(10, 0, 10_000).is_err());
    }

    #[test]
    fn proportional_lp_both_ratios_agree() {
        // Proportional deposit: both ratios give the same share count
        let lp = proportional_lp(10, 2_000, 50, 10_000, 707).unwrap();
        assert_eq!(lp, 10 * 707 / 50);
    }

    #[test]
    fn proportional_lp_takes_min_ratio() {
        // Excess ARMOR does not buy extra shares
        let lp = proportional_lp(10, 9_999, 50, 10_000, 707).unwrap();
        assert_eq!(lp, 141);
    }

    #[test]
    fn proportional_lp_rejects_empty_pool() {
        assert!(proportional_lp(10, 10, 0, 10, 10).is_err());
        assert!(proportional_lp(10, 10, 10, 10, 0).is_err());
    }
}
