use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{error::AirlockError, state::RewardPool};

/// Top up a reward pool with ARMOR yield. Permissionless — this is the
/// external reward source's entry point. The amount stays in unharvested
/// until the airlock's next lazy harvest.
pub fn handler(ctx: Context<FundReward>, amount: u64) -> Result<()> {
    require!(amount > 0, AirlockError::ZeroAmount);

    let reward_pool = &mut ctx.accounts.reward_pool;
    reward_pool.unharvested = reward_pool
        .unharvested
        .checked_add(amount)
        .ok_or(AirlockError::MathOverflow)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_armor.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Reward funded: {} ARMOR", amount);
    Ok(())
}

#[derive(Accounts)]
pub struct FundReward<'info> {
    pub funder: Signer<'info>,

    #[account(mut)]
    pub reward_pool: Account<'info, RewardPool>,

    #[account(
        mut,
        constraint = reward_vault.key() == reward_pool.reward_vault @ AirlockError::MintMismatch,
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = funder_armor.mint == reward_vault.mint @ AirlockError::MintMismatch,
        constraint = funder_armor.owner == funder.key(),
    )]
    pub funder_armor: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
