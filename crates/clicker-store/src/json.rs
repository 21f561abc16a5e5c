//! JSON-file store implementation.
//!
//! This module provides the `JsonStore` implementation of the `Store` trait.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use clicker_core::{
    BusinessKind, CasinoStats, ClickReceipt, JarProgress, PlayerKey, PlayerRecord, Portfolio,
    PurchaseReceipt, ServerId, SpinTicket, UpgradePricing, UpgradeReceipt, UpgradeTrack, UserId,
};

use crate::error::{Result, StoreError};
use crate::files;
use crate::schema::{
    all_domains, AdminDocument, BusinessDocument, CasinoDocument, Domain, JarDocument,
    LedgerDocument,
};
use crate::{FlushReport, IncomeReport, PlayerChange, SpinSettlement, Store};

/// A document plus whether it changed since the last flush.
#[derive(Debug, Default)]
struct Tracked<T> {
    doc: T,
    dirty: bool,
}

impl<T> Tracked<T> {
    fn clean(doc: T) -> Self {
        Self { doc, dirty: false }
    }

    fn touch(&mut self) -> &mut T {
        self.dirty = true;
        &mut self.doc
    }
}

/// All domains, guarded together by one lock.
#[derive(Debug, Default)]
struct Domains {
    ledger: Tracked<LedgerDocument>,
    businesses: Tracked<BusinessDocument>,
    casino: Tracked<CasinoDocument>,
    jars: Tracked<JarDocument>,
    admins: Tracked<AdminDocument>,
}

impl Domains {
    fn is_dirty(&self, domain: Domain) -> bool {
        match domain {
            Domain::Ledger => self.ledger.dirty,
            Domain::Businesses => self.businesses.dirty,
            Domain::Casino => self.casino.dirty,
            Domain::Jars => self.jars.dirty,
            Domain::Admins => self.admins.dirty,
        }
    }

    fn set_dirty(&mut self, domain: Domain, dirty: bool) {
        match domain {
            Domain::Ledger => self.ledger.dirty = dirty,
            Domain::Businesses => self.businesses.dirty = dirty,
            Domain::Casino => self.casino.dirty = dirty,
            Domain::Jars => self.jars.dirty = dirty,
            Domain::Admins => self.admins.dirty = dirty,
        }
    }

    fn encode(&self, domain: Domain) -> Result<Vec<u8>> {
        match domain {
            Domain::Ledger => files::encode_document(&self.ledger.doc),
            Domain::Businesses => files::encode_document(&self.businesses.doc),
            Domain::Casino => files::encode_document(&self.casino.doc),
            Domain::Jars => files::encode_document(&self.jars.doc),
            Domain::Admins => files::encode_document(&self.admins.doc),
        }
    }

    fn player_mut(&mut self, key: PlayerKey) -> Result<&mut PlayerRecord> {
        self.ledger
            .doc
            .users
            .get_mut(&key)
            .ok_or(StoreError::PlayerNotFound { key })
    }
}

/// Store that keeps every domain in memory and persists each as a JSON file.
pub struct JsonStore {
    dir: PathBuf,
    domains: Mutex<Domains>,
    flush_lock: Mutex<()>,
}

impl JsonStore {
    /// Open or create a store in the given directory.
    ///
    /// Missing documents start empty. Malformed documents are moved aside
    /// and start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a document
    /// cannot be read.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let domains = Domains {
            ledger: Tracked::clean(files::read_document(&dir.join(Domain::Ledger.file_name()))?),
            businesses: Tracked::clean(files::read_document(
                &dir.join(Domain::Businesses.file_name()),
            )?),
            casino: Tracked::clean(files::read_document(&dir.join(Domain::Casino.file_name()))?),
            jars: Tracked::clean(files::read_document(&dir.join(Domain::Jars.file_name()))?),
            admins: Tracked::clean(files::read_document(&dir.join(Domain::Admins.file_name()))?),
        };

        tracing::info!(
            dir = %dir.display(),
            players = domains.ledger.doc.users.len(),
            portfolios = domains.businesses.doc.businesses.len(),
            casino_players = domains.casino.doc.players.len(),
            jars = domains.jars.doc.len(),
            admins = domains.admins.doc.len(),
            "Store opened"
        );

        Ok(Self {
            dir,
            domains: Mutex::new(domains),
            flush_lock: Mutex::new(()),
        })
    }

    /// The directory documents are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether any domain has changes not yet flushed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the lock is poisoned.
    pub fn has_pending_changes(&self) -> Result<bool> {
        let domains = self.lock()?;
        Ok(all_domains().into_iter().any(|d| domains.is_dirty(d)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Domains>> {
        self.domains.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Store for JsonStore {
    // =========================================================================
    // Ledger Operations
    // =========================================================================

    fn create_player(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<PlayerRecord> {
        let mut domains = self.lock()?;
        if domains.ledger.doc.users.contains_key(&key) {
            return Err(StoreError::PlayerAlreadyExists { key });
        }

        let record = PlayerRecord::new(key, now);
        domains.ledger.touch().users.insert(key, record.clone());
        tracing::debug!(%key, "Player created");
        Ok(record)
    }

    fn get_player(&self, key: PlayerKey) -> Result<Option<PlayerRecord>> {
        Ok(self.lock()?.ledger.doc.users.get(&key).cloned())
    }

    fn update_player(&self, key: PlayerKey, change: PlayerChange) -> Result<PlayerRecord> {
        let mut domains = self.lock()?;
        let player = domains.player_mut(key)?;
        change.apply(player);
        let updated = player.clone();
        domains.ledger.dirty = true;
        Ok(updated)
    }

    fn record_click(
        &self,
        key: PlayerKey,
        now: DateTime<Utc>,
        cooldown: Duration,
    ) -> Result<ClickReceipt> {
        let mut domains = self.lock()?;
        let receipt = domains.player_mut(key)?.click(now, cooldown)?;
        domains.ledger.dirty = true;
        Ok(receipt)
    }

    fn upgrade(
        &self,
        key: PlayerKey,
        track: UpgradeTrack,
        pricing: &UpgradePricing,
    ) -> Result<UpgradeReceipt> {
        let mut domains = self.lock()?;
        let receipt = domains.player_mut(key)?.upgrade(track, pricing)?;
        domains.ledger.dirty = true;
        Ok(receipt)
    }

    fn list_players(&self, server_id: ServerId) -> Result<Vec<PlayerRecord>> {
        let domains = self.lock()?;
        Ok(domains
            .ledger
            .doc
            .users
            .values()
            .filter(|player| player.server_id == server_id)
            .cloned()
            .collect())
    }

    // =========================================================================
    // Business Operations
    // =========================================================================

    fn get_portfolio(&self, key: PlayerKey) -> Result<Portfolio> {
        let domains = self.lock()?;
        Ok(domains
            .businesses
            .doc
            .businesses
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    fn buy_business(
        &self,
        key: PlayerKey,
        kind: &BusinessKind,
        now: DateTime<Utc>,
    ) -> Result<PurchaseReceipt> {
        let mut domains = self.lock()?;
        let balance_after = domains.player_mut(key)?.debit(kind.price())?;
        domains.ledger.dirty = true;

        let holding = domains
            .businesses
            .touch()
            .businesses
            .entry(key)
            .or_default()
            .add_unit(kind, now);

        Ok(PurchaseReceipt {
            business_key: holding.business_key.clone(),
            price: kind.price(),
            count: holding.count,
            profit_per_tick: kind.profit_per_tick(),
            balance_after,
        })
    }

    fn reset_businesses(&self, key: PlayerKey) -> Result<()> {
        let mut domains = self.lock()?;
        if domains.businesses.doc.businesses.contains_key(&key) {
            domains.businesses.touch().businesses.remove(&key);
        }
        Ok(())
    }

    fn accrue_income(&self) -> Result<IncomeReport> {
        let mut domains = self.lock()?;
        let Domains {
            ledger, businesses, ..
        } = &mut *domains;

        let mut report = IncomeReport::default();
        for (key, portfolio) in &businesses.doc.businesses {
            let profit = portfolio.profit_per_tick();
            if profit.is_zero() {
                continue;
            }
            match ledger.doc.users.get_mut(key) {
                Some(player) => {
                    player.credit(profit);
                    report.players_credited += 1;
                    report.total_credited += profit;
                }
                None => report.orphaned.push(*key),
            }
        }

        if report.players_credited > 0 {
            ledger.dirty = true;
        }
        Ok(report)
    }

    // =========================================================================
    // Casino Operations
    // =========================================================================

    fn get_casino_stats(&self, key: PlayerKey) -> Result<Option<CasinoStats>> {
        Ok(self.lock()?.casino.doc.players.get(&key).copied())
    }

    fn settle_spin(
        &self,
        key: PlayerKey,
        ticket: &SpinTicket,
        draw: u8,
    ) -> Result<SpinSettlement> {
        let mut domains = self.lock()?;
        let player = domains.player_mut(key)?;
        player.debit(ticket.bet)?;
        let outcome = ticket.resolve(draw);
        player.credit(outcome.payout);
        let balance_after = player.money;
        domains.ledger.dirty = true;

        let stats = domains.casino.touch().players.entry(key).or_default();
        stats.record(&outcome);

        Ok(SpinSettlement {
            outcome,
            balance_after,
            stats: *stats,
        })
    }

    fn reset_casino_stats(&self, key: PlayerKey) -> Result<()> {
        let mut domains = self.lock()?;
        if domains.casino.doc.players.contains_key(&key) {
            domains.casino.touch().players.remove(&key);
        }
        Ok(())
    }

    // =========================================================================
    // Milk Jar Operations
    // =========================================================================

    fn get_jar(&self, key: PlayerKey) -> Result<Option<JarProgress>> {
        Ok(self.lock()?.jars.doc.get(&key).cloned())
    }

    fn fill_jar(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<JarProgress> {
        let mut domains = self.lock()?;
        let jar = domains
            .jars
            .touch()
            .entry(key)
            .or_insert_with(|| JarProgress::new(key, now));
        jar.fill(now);
        Ok(jar.clone())
    }

    fn empty_jar(&self, key: PlayerKey, now: DateTime<Utc>) -> Result<Option<JarProgress>> {
        let mut domains = self.lock()?;
        if !domains.jars.doc.contains_key(&key) {
            return Ok(None);
        }
        let jar = domains.jars.touch().get_mut(&key).map(|jar| {
            jar.empty(now);
            jar.clone()
        });
        Ok(jar)
    }

    // =========================================================================
    // Admin Operations
    // =========================================================================

    fn list_admins(&self) -> Result<Vec<UserId>> {
        Ok(self.lock()?.admins.doc.iter().copied().collect())
    }

    fn grant_admin(&self, user_id: UserId) -> Result<bool> {
        let mut domains = self.lock()?;
        if domains.admins.doc.contains(&user_id) {
            return Ok(false);
        }
        Ok(domains.admins.touch().insert(user_id))
    }

    fn revoke_admin(&self, user_id: UserId) -> Result<bool> {
        let mut domains = self.lock()?;
        if !domains.admins.doc.contains(&user_id) {
            return Ok(false);
        }
        Ok(domains.admins.touch().remove(&user_id))
    }

    fn reset_player(&self, key: PlayerKey) -> Result<PlayerRecord> {
        let mut domains = self.lock()?;
        let player = domains.player_mut(key)?;
        player.reset();
        let record = player.clone();
        domains.ledger.dirty = true;

        if domains.businesses.doc.businesses.contains_key(&key) {
            domains.businesses.touch().businesses.remove(&key);
        }
        if domains.casino.doc.players.contains_key(&key) {
            domains.casino.touch().players.remove(&key);
        }
        Ok(record)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn flush(&self) -> Result<FlushReport> {
        // Serializes writers so an older snapshot never lands after a newer one.
        let _flushing = self.flush_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        let pending = {
            let mut domains = self.lock()?;
            let mut pending = Vec::new();
            for domain in all_domains() {
                if domains.is_dirty(domain) {
                    pending.push((domain, domains.encode(domain)?));
                }
            }
            // Every domain encoded; only now are they handed to the writer.
            for (domain, _) in &pending {
                domains.set_dirty(*domain, false);
            }
            pending
        };

        let mut report = FlushReport::default();
        for (index, (domain, bytes)) in pending.iter().enumerate() {
            let path = self.dir.join(domain.file_name());
            if let Err(err) = files::write_document(&path, bytes) {
                let mut domains = self.lock()?;
                for (unwritten, _) in &pending[index..] {
                    domains.set_dirty(*unwritten, true);
                }
                return Err(err);
            }
            report.written.push(*domain);
        }

        if !report.written.is_empty() {
            tracing::debug!(domains = ?report.written, "Store flushed");
        }
        Ok(report)
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::error!(error = %err, dir = %self.dir.display(), "Final flush failed");
        }
    }
}
