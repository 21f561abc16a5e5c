//! Casino: a single-spin bet with a chosen multiplier.
//!
//! A play walks through four steps:
//!
//! ```text
//! SelectBetAmount -> SelectColor -> SelectMultiplier -> Ready -> Resolved
//! ```
//!
//! The color is cosmetic. The multiplier fixes the win chance: a uniform draw
//! in `[1, 100]` wins if it is at most the multiplier's win percent. Money
//! only moves when a `SpinTicket` is settled against the ledger, which the
//! store does atomically.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, Result};
use crate::money::Money;

/// Minimum bet in whole coins.
pub const MIN_BET: i64 = 100;

/// Payout multipliers offered by the casino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplier {
    /// x2, 40 % win chance.
    X2,
    /// x3, 31 % win chance.
    X3,
    /// x5, 20 % win chance.
    X5,
    /// x10, 10 % win chance.
    X10,
}

impl Multiplier {
    /// All multipliers in display order.
    pub const ALL: [Self; 4] = [Self::X2, Self::X3, Self::X5, Self::X10];

    /// Payout factor applied to the bet on a win.
    #[must_use]
    pub const fn factor(self) -> u64 {
        match self {
            Self::X2 => 2,
            Self::X3 => 3,
            Self::X5 => 5,
            Self::X10 => 10,
        }
    }

    /// Win chance in percent.
    #[must_use]
    pub const fn win_percent(self) -> u8 {
        match self {
            Self::X2 => 40,
            Self::X3 => 31,
            Self::X5 => 20,
            Self::X10 => 10,
        }
    }

    /// Look up a multiplier by its factor.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::UnsupportedMultiplier` for factors the casino
    /// does not offer.
    pub const fn from_factor(factor: u32) -> Result<Self> {
        match factor {
            2 => Ok(Self::X2),
            3 => Ok(Self::X3),
            5 => Ok(Self::X5),
            10 => Ok(Self::X10),
            other => Err(EconomyError::UnsupportedMultiplier(other)),
        }
    }
}

/// Color a player bets on. Has no effect on the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetColor {
    /// Red.
    Red,
    /// Black.
    Black,
    /// Yellow.
    Yellow,
}

/// A fully specified bet, ready to be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinTicket {
    /// Amount staked.
    pub bet: Money,
    /// Chosen color.
    pub color: BetColor,
    /// Chosen multiplier.
    pub multiplier: Multiplier,
}

impl SpinTicket {
    /// Resolve the ticket against a draw in `[1, 100]`.
    #[must_use]
    pub fn resolve(&self, draw: u8) -> SpinOutcome {
        let won = draw <= self.multiplier.win_percent();
        let payout = if won {
            self.bet.times(self.multiplier.factor())
        } else {
            Money::ZERO
        };
        SpinOutcome {
            ticket: *self,
            draw,
            won,
            payout,
        }
    }
}

/// Draw a uniform integer in `[1, 100]`.
pub fn draw_spin<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=100)
}

/// The result of one spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// The bet that was resolved.
    pub ticket: SpinTicket,
    /// The draw in `[1, 100]`.
    pub draw: u8,
    /// Whether the spin won.
    pub won: bool,
    /// Amount credited back (`bet * factor` on a win, zero otherwise).
    pub payout: Money,
}

/// State of one casino play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CasinoPlay {
    /// Waiting for a bet amount.
    #[default]
    SelectBetAmount,
    /// Bet accepted, waiting for a color.
    SelectColor {
        /// Amount staked.
        bet: Money,
    },
    /// Color chosen, waiting for a multiplier.
    SelectMultiplier {
        /// Amount staked.
        bet: Money,
        /// Chosen color.
        color: BetColor,
    },
    /// Everything chosen; waiting for settlement.
    Ready(SpinTicket),
    /// Settled.
    Resolved(SpinOutcome),
}

impl CasinoPlay {
    /// Start a new play.
    #[must_use]
    pub const fn new() -> Self {
        Self::SelectBetAmount
    }

    /// Name of the current state.
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::SelectBetAmount => "select_bet_amount",
            Self::SelectColor { .. } => "select_color",
            Self::SelectMultiplier { .. } => "select_multiplier",
            Self::Ready(_) => "ready",
            Self::Resolved(_) => "resolved",
        }
    }

    /// Place a bet of `bet` whole coins against the current `balance`.
    ///
    /// # Errors
    ///
    /// - `EconomyError::BetTooSmall` if `bet < min_bet`.
    /// - `EconomyError::InsufficientFunds` if the balance does not cover it.
    /// - `EconomyError::InvalidTransition` outside `SelectBetAmount`.
    pub fn place_bet(self, bet: i64, min_bet: i64, balance: Money) -> Result<Self> {
        self.require(matches!(self, Self::SelectBetAmount), "place a bet")?;
        if bet < min_bet {
            return Err(EconomyError::BetTooSmall {
                bet,
                minimum: min_bet,
            });
        }
        let bet = Money::coins(bet);
        if balance < bet {
            return Err(EconomyError::InsufficientFunds {
                balance,
                required: bet,
            });
        }
        Ok(Self::SelectColor { bet })
    }

    /// Choose a color.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidTransition` outside `SelectColor`.
    pub fn choose_color(self, color: BetColor) -> Result<Self> {
        match self {
            Self::SelectColor { bet } => Ok(Self::SelectMultiplier { bet, color }),
            _ => Err(self.invalid("choose a color")),
        }
    }

    /// Choose a multiplier, producing a ticket ready for settlement.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidTransition` outside `SelectMultiplier`.
    pub fn choose_multiplier(self, multiplier: Multiplier) -> Result<Self> {
        match self {
            Self::SelectMultiplier { bet, color } => Ok(Self::Ready(SpinTicket {
                bet,
                color,
                multiplier,
            })),
            _ => Err(self.invalid("choose a multiplier")),
        }
    }

    /// The ticket awaiting settlement, if any.
    #[must_use]
    pub const fn ticket(&self) -> Option<SpinTicket> {
        match self {
            Self::Ready(ticket) => Some(*ticket),
            _ => None,
        }
    }

    /// Record the settled outcome of the pending ticket.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidTransition` if no ticket is pending or
    /// the outcome belongs to a different ticket.
    pub fn complete(self, outcome: SpinOutcome) -> Result<Self> {
        match self {
            Self::Ready(ticket) if ticket == outcome.ticket => Ok(Self::Resolved(outcome)),
            _ => Err(self.invalid("complete a spin")),
        }
    }

    /// Play again with the same bet, skipping the amount step.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidTransition` outside `Resolved`.
    pub fn play_again(self) -> Result<Self> {
        match self {
            Self::Resolved(outcome) => Ok(Self::SelectColor {
                bet: outcome.ticket.bet,
            }),
            _ => Err(self.invalid("play again")),
        }
    }

    /// Start over with a new bet amount.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidTransition` outside `Resolved`.
    pub fn change_bet(self) -> Result<Self> {
        self.require(matches!(self, Self::Resolved(_)), "change the bet")?;
        Ok(Self::SelectBetAmount)
    }

    fn require(&self, ok: bool, action: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> EconomyError {
        EconomyError::InvalidTransition {
            state: self.state_name(),
            action,
        }
    }
}

/// Accumulated casino statistics for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasinoStats {
    /// Spins won.
    pub wins: u64,
    /// Spins lost.
    pub losses: u64,
    /// Total amount staked.
    pub total_bet: Money,
}

impl CasinoStats {
    /// Add one settled spin.
    pub fn record(&mut self, outcome: &SpinOutcome) {
        if outcome.won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.total_bet += outcome.ticket.bet;
    }

    /// Number of spins played.
    #[must_use]
    pub const fn games(&self) -> u64 {
        self.wins + self.losses
    }

    /// Win rate in percent (0 when nothing has been played).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => self.wins as f64 / games as f64 * 100.0,
        }
    }
}
