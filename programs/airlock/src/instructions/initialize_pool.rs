use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::{constants::*, error::AirlockError, state::{Airlock, Pool, Position}};

// ─── Integer square root (Babylonian method) ──────────────────────────────
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) >> 1;
    while y < x {
        x = y;
        y = (y + n / y) >> 1;
    }
    x
}

/// Create a constant-product asset/ARMOR pool and seed its initial reserves.
/// The creator sets the initial price via asset_amount / armor_amount and
/// receives LP = sqrt(asset_amount * armor_amount) in their Position.
/// Seeding at creation guarantees reserves are non-zero once the pair can be
/// registered.
pub fn handler(ctx: Context<InitializePool>, asset_amount: u64, armor_amount: u64) -> Result<()> {
    require!(asset_amount > 0 && armor_amount > 0, AirlockError::ZeroAmount);

    let product = (asset_amount as u128)
        .checked_mul(armor_amount as u128)
        .ok_or(AirlockError::MathOverflow)?;
    let lp_minted = isqrt(product) as u64;
    require!(lp_minted > 0, AirlockError::ZeroAmount);

    let pool = &mut ctx.accounts.pool;
    pool.asset_mint = ctx.accounts.asset_mint.key();
    pool.asset_vault = ctx.accounts.asset_vault.key();
    pool.armor_vault = ctx.accounts.armor_vault.key();
    pool.lp_supply = lp_minted;
    pool.authority_bump = ctx.bumps.pool_authority;
    pool.bump = ctx.bumps.pool;

    let position = &mut ctx.accounts.creator_position;
    position.owner = ctx.accounts.creator.key();
    position.pool = ctx.accounts.pool.key();
    position.lp_shares = lp_minted;
    position.bump = ctx.bumps.creator_position;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.creator_asset.to_account_info(),
                to: ctx.accounts.asset_vault.to_account_info(),
                authority: ctx.accounts.creator.to_account_info(),
            },
        ),
        asset_amount,
    )?;
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.creator_armor.to_account_info(),
                to: ctx.accounts.armor_vault.to_account_info(),
                authority: ctx.accounts.creator.to_account_info(),
            },
        ),
        armor_amount,
    )?;

    msg!(
        "Pool created: asset={} reserves {}:{} lp={}",
        ctx.accounts.asset_mint.key(),
        asset_amount,
        armor_amount,
        lp_minted
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(seeds = [AIRLOCK_SEED], bump = airlock.bump)]
    pub airlock: Account<'info, Airlock>,

    pub asset_mint: Account<'info, Mint>,

    #[account(constraint = armor_mint.key() == airlock.armor_mint @ AirlockError::MintMismatch)]
    pub armor_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        space = Pool::LEN,
        seeds = [POOL_SEED, asset_mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: PDA vault authority — owns both vaults, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        token::mint = asset_mint,
        token::authority = pool_authority,
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        token::mint = armor_mint,
        token::authority = pool_authority,
    )]
    pub armor_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), creator.key().as_ref()],
        bump,
    )]
    pub creator_position: Account<'info, Position>,

    #[account(
        mut,
        constraint = creator_asset.mint == asset_mint.key() @ AirlockError::MintMismatch,
        constraint = creator_asset.owner == creator.key(),
    )]
    pub creator_asset: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = creator_armor.mint == armor_mint.key() @ AirlockError::MintMismatch,
        constraint = creator_armor.owner == creator.key(),
    )]
    pub creator_armor: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[cfg(test)]
mod tests {
    use super::isqrt;

    #[test]
    fn isqrt_exact_squares() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(144), 12);
        assert_eq!(isqrt(1_000_000_000_000), 1_000_000);
    }

    #[test]
    fn isqrt_rounds_down() {
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(143), 11);
        assert_eq!(isqrt(u128::from(u64::MAX)), 4_294_967_295);
    }
}
