//! Casino handlers.
//!
//! The caller carries the [`CasinoPlay`] between steps. Only [`spin`] touches
//! the store: it takes the bet, resolves the draw and records statistics in
//! one atomic operation.

use rand::Rng;
use serde::Serialize;

use clicker_core::{
    draw_spin, BetColor, CasinoPlay, CasinoStats, EconomyError, Money, Multiplier, PlayerKey,
    SpinOutcome,
};
use clicker_store::Store;

use super::require_player;
use crate::auth::AdminAuth;
use crate::error::ServiceError;
use crate::state::AppState;

/// Place the bet amount, checked against the current balance.
pub fn place_bet(
    state: &AppState,
    key: PlayerKey,
    play: CasinoPlay,
    bet: i64,
) -> Result<CasinoPlay, ServiceError> {
    let player = require_player(state, key)?;
    Ok(play.place_bet(bet, state.config.min_bet, player.money)?)
}

/// Choose the cosmetic color.
pub fn choose_color(play: CasinoPlay, color: BetColor) -> Result<CasinoPlay, ServiceError> {
    Ok(play.choose_color(color)?)
}

/// Choose the multiplier by its factor (2, 3, 5 or 10).
pub fn choose_multiplier(play: CasinoPlay, factor: u32) -> Result<CasinoPlay, ServiceError> {
    let multiplier = Multiplier::from_factor(factor)?;
    Ok(play.choose_multiplier(multiplier)?)
}

/// Result of a spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpinResponse {
    /// The play, now resolved.
    pub play: CasinoPlay,
    /// The resolved spin.
    pub outcome: SpinOutcome,
    /// Balance after settlement.
    pub balance_after: Money,
    /// Statistics after settlement.
    pub stats: StatsResponse,
}

/// Spin with the thread-local RNG.
pub fn spin(
    state: &AppState,
    key: PlayerKey,
    play: CasinoPlay,
) -> Result<SpinResponse, ServiceError> {
    spin_with(state, key, play, &mut rand::thread_rng())
}

/// Spin with the given RNG.
pub fn spin_with<R: Rng + ?Sized>(
    state: &AppState,
    key: PlayerKey,
    play: CasinoPlay,
    rng: &mut R,
) -> Result<SpinResponse, ServiceError> {
    let ticket = play.ticket().ok_or(EconomyError::InvalidTransition {
        state: play.state_name(),
        action: "spin",
    })?;

    let settlement = state.store.settle_spin(key, &ticket, draw_spin(rng))?;
    let play = play.complete(settlement.outcome)?;

    tracing::debug!(
        %key,
        bet = %ticket.bet,
        multiplier = ticket.multiplier.factor(),
        draw = settlement.outcome.draw,
        won = settlement.outcome.won,
        "Casino spin settled"
    );

    Ok(SpinResponse {
        play,
        outcome: settlement.outcome,
        balance_after: settlement.balance_after,
        stats: settlement.stats.into(),
    })
}

/// Play again with the same bet.
pub fn play_again(play: CasinoPlay) -> Result<CasinoPlay, ServiceError> {
    Ok(play.play_again()?)
}

/// Start over with a new bet amount.
pub fn change_bet(play: CasinoPlay) -> Result<CasinoPlay, ServiceError> {
    Ok(play.change_bet()?)
}

/// Casino statistics response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsResponse {
    /// Spins won.
    pub wins: u64,
    /// Spins lost.
    pub losses: u64,
    /// Spins played.
    pub games: u64,
    /// Total staked.
    pub total_bet: Money,
    /// Win rate in percent.
    pub win_rate: f64,
}

impl From<CasinoStats> for StatsResponse {
    fn from(stats: CasinoStats) -> Self {
        Self {
            wins: stats.wins,
            losses: stats.losses,
            games: stats.games(),
            total_bet: stats.total_bet,
            win_rate: stats.win_rate(),
        }
    }
}

/// A player's casino statistics. Players who never played get zeros.
pub fn stats(state: &AppState, key: PlayerKey) -> Result<StatsResponse, ServiceError> {
    Ok(state.store.get_casino_stats(key)?.unwrap_or_default().into())
}

/// Clear a player's casino statistics (admin only).
pub fn reset_stats(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
) -> Result<(), ServiceError> {
    state.store.reset_casino_stats(key)?;
    tracing::info!(admin = %auth.user_id, %key, "Casino stats reset");
    Ok(())
}
