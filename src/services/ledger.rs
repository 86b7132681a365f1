//! SQLite persistence for trades, positions and settings.
//!
//! The trade table is append-only; the position table is replaced
//! wholesale on every sync; settings are a JSON-valued key/value
//! store. The core market-data components never touch this layer.

use crate::types::{NewTrade, Position, PositionSync, TradeRecord};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};

/// SQLite-backed trade ledger.
pub struct Ledger {
    conn: Mutex<Connection>,
}

impl Ledger {
    /// Open (or create) the ledger at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let ledger = Self {
            conn: Mutex::new(conn),
        };
        ledger.init_schema()?;
        info!("Trade ledger initialized");
        Ok(ledger)
    }

    /// In-memory ledger (for testing).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let ledger = Self {
            conn: Mutex::new(conn),
        };
        ledger.init_schema()?;
        debug!("In-memory trade ledger initialized");
        Ok(ledger)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS trades (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                side TEXT NOT NULL,
                qty REAL NOT NULL,
                price REAL NOT NULL,
                timestamp INTEGER NOT NULL,
                strategy TEXT NOT NULL,
                pnl REAL,
                fee REAL NOT NULL DEFAULT 0
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(symbol)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS positions (
                symbol TEXT PRIMARY KEY,
                qty REAL NOT NULL,
                avg_price REAL NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // ========== Trades ==========

    /// Append a trade row; returns its id.
    pub fn record_trade(&self, trade: &NewTrade) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO trades (symbol, side, qty, price, timestamp, strategy, pnl, fee)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                trade.symbol,
                trade.side,
                trade.qty,
                trade.price,
                now,
                trade.strategy,
                trade.pnl,
                trade.fee,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(
            "Recorded trade #{}: {} {} {}",
            id, trade.side, trade.qty, trade.symbol
        );
        Ok(id)
    }

    /// Number of recorded trades.
    pub fn trade_count(&self) -> i64 {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM trades", [], |row| row.get(0))
            .unwrap_or_else(|e| {
                error!("Error counting trades: {}", e);
                0
            })
    }

    /// Most recent trades, newest first.
    pub fn recent_trades(&self, limit: i64) -> Vec<TradeRecord> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = match conn.prepare(
            "SELECT id, symbol, side, qty, price, timestamp, strategy, pnl, fee
             FROM trades ORDER BY id DESC LIMIT ?1",
        ) {
            Ok(stmt) => stmt,
            Err(e) => {
                error!("Error preparing trade query: {}", e);
                return Vec::new();
            }
        };

        let rows = stmt.query_map(params![limit], |row| {
            Ok(TradeRecord {
                id: row.get(0)?,
                symbol: row.get(1)?,
                side: row.get(2)?,
                qty: row.get(3)?,
                price: row.get(4)?,
                timestamp: row.get(5)?,
                strategy: row.get(6)?,
                pnl: row.get(7)?,
                fee: row.get(8)?,
            })
        });

        match rows {
            Ok(rows) => rows.filter_map(|r| r.ok()).collect(),
            Err(e) => {
                error!("Error fetching trades: {}", e);
                Vec::new()
            }
        }
    }

    // ========== Positions ==========

    /// Replace the whole position table with the given snapshot.
    pub fn replace_positions(&self, positions: &[PositionSync]) -> Result<usize, rusqlite::Error> {
        let mut conn = self.conn.lock().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM positions", [])?;
        for p in positions {
            tx.execute(
                "INSERT INTO positions (symbol, qty, avg_price, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                params![p.symbol, p.qty, p.avg_price, now],
            )?;
        }
        tx.commit()?;

        debug!("Synced {} positions", positions.len());
        Ok(positions.len())
    }

    /// Number of open positions.
    pub fn position_count(&self) -> i64 {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM positions", [], |row| row.get(0))
            .unwrap_or_else(|e| {
                error!("Error counting positions: {}", e);
                0
            })
    }

    /// All open positions, ordered by symbol.
    pub fn positions(&self) -> Vec<Position> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = match conn
            .prepare("SELECT symbol, qty, avg_price, timestamp FROM positions ORDER BY symbol")
        {
            Ok(stmt) => stmt,
            Err(e) => {
                error!("Error preparing position query: {}", e);
                return Vec::new();
            }
        };

        let rows = stmt.query_map([], |row| {
            Ok(Position {
                symbol: row.get(0)?,
                qty: row.get(1)?,
                avg_price: row.get(2)?,
                timestamp: row.get(3)?,
            })
        });

        match rows {
            Ok(rows) => rows.filter_map(|r| r.ok()).collect(),
            Err(e) => {
                error!("Error fetching positions: {}", e);
                Vec::new()
            }
        }
    }

    // ========== Settings ==========

    /// Upsert a setting. Values are JSON-encoded strings.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read a setting.
    pub fn get_setting(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                error!("Error fetching setting {}: {}", key, e);
                None
            }
        }
    }
}
