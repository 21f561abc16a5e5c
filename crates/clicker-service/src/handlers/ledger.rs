//! Player ledger handlers.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;

use clicker_core::{
    ClickReceipt, Money, PlayerKey, PlayerRecord, ServerId, UpgradePricing, UpgradeReceipt,
    UpgradeTrack, UserId,
};
use clicker_store::{PlayerChange, Store};

use super::require_player;
use crate::auth::AdminAuth;
use crate::error::ServiceError;
use crate::state::AppState;

/// Default number of entries on the server leaderboard.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Player profile response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResponse {
    /// The user.
    pub user_id: UserId,
    /// The server.
    pub server_id: ServerId,
    /// Current balance.
    pub money: Money,
    /// Click level.
    pub level: u32,
    /// Coins per click.
    pub income_per_click: u64,
    /// Passive income per second.
    pub income_per_sec: u64,
    /// Price of the next click upgrade.
    pub click_upgrade_cost: Money,
    /// Price of the next idle upgrade.
    pub idle_upgrade_cost: Money,
    /// Whether the player holds a certificate.
    pub has_certificate: bool,
    /// When the certificate was issued.
    pub certificate_date: Option<DateTime<Utc>>,
}

impl ProfileResponse {
    pub(crate) fn new(player: &PlayerRecord, pricing: &UpgradePricing) -> Self {
        Self {
            user_id: player.user_id,
            server_id: player.server_id,
            money: player.money,
            level: player.level,
            income_per_click: player.income_per_click,
            income_per_sec: player.income_per_sec,
            click_upgrade_cost: pricing.cost(UpgradeTrack::Click, player.level),
            idle_upgrade_cost: pricing.cost(UpgradeTrack::Idle, player.level),
            has_certificate: player.has_certificate,
            certificate_date: player.certificate_date,
        }
    }
}

/// Register a player.
pub fn start(state: &AppState, key: PlayerKey) -> Result<ProfileResponse, ServiceError> {
    let player = state.store.create_player(key, Utc::now())?;
    tracing::info!(%key, "Player started");
    Ok(ProfileResponse::new(&player, &state.config.pricing))
}

/// Show a player's profile.
pub fn profile(state: &AppState, key: PlayerKey) -> Result<ProfileResponse, ServiceError> {
    let player = require_player(state, key)?;
    Ok(ProfileResponse::new(&player, &state.config.pricing))
}

/// Click once.
pub fn click(state: &AppState, key: PlayerKey) -> Result<ClickReceipt, ServiceError> {
    click_at(state, key, Utc::now())
}

/// Click once at a given time.
pub fn click_at(
    state: &AppState,
    key: PlayerKey,
    now: DateTime<Utc>,
) -> Result<ClickReceipt, ServiceError> {
    Ok(state.store.record_click(key, now, state.config.click_cooldown())?)
}

/// Buy one upgrade on a track.
pub fn upgrade(
    state: &AppState,
    key: PlayerKey,
    track: UpgradeTrack,
) -> Result<UpgradeReceipt, ServiceError> {
    let receipt = state.store.upgrade(key, track, &state.config.pricing)?;
    tracing::debug!(
        %key,
        ?track,
        cost = %receipt.cost,
        level = receipt.level,
        "Upgrade bought"
    );
    Ok(receipt)
}

/// Issue a certificate to a player.
pub fn issue_certificate(
    state: &AppState,
    key: PlayerKey,
) -> Result<ProfileResponse, ServiceError> {
    let player = state
        .store
        .update_player(key, PlayerChange::IssueCertificate(Utc::now()))?;
    tracing::info!(%key, "Certificate issued");
    Ok(ProfileResponse::new(&player, &state.config.pricing))
}

/// One row of the server leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntry {
    /// 1-based position.
    pub position: usize,
    /// The user.
    pub user_id: UserId,
    /// Balance.
    pub money: Money,
    /// Click level.
    pub level: u32,
    /// Coins per click.
    pub income_per_click: u64,
}

/// Richest players of a server, richest first.
pub fn server_top(
    state: &AppState,
    server_id: ServerId,
    limit: usize,
) -> Result<Vec<TopEntry>, ServiceError> {
    let mut players = state.store.list_players(server_id)?;
    players.sort_by_key(|player| (Reverse(player.money), player.user_id));

    Ok(players
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, player)| TopEntry {
            position: index + 1,
            user_id: player.user_id,
            money: player.money,
            level: player.level,
            income_per_click: player.income_per_click,
        })
        .collect())
}

/// A certified player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertifiedEntry {
    /// The user.
    pub user_id: UserId,
    /// When the certificate was issued.
    pub certificate_date: Option<DateTime<Utc>>,
}

/// Certified players of a server (admin only).
pub fn certified(
    state: &AppState,
    _auth: &AdminAuth,
    server_id: ServerId,
) -> Result<Vec<CertifiedEntry>, ServiceError> {
    Ok(state
        .store
        .list_players(server_id)?
        .into_iter()
        .filter(|player| player.has_certificate)
        .map(|player| CertifiedEntry {
            user_id: player.user_id,
            certificate_date: player.certificate_date,
        })
        .collect())
}
