//! In-memory output database fixture shared by the integration tests.
#![allow(dead_code)]

use fuelcycle_core::{Analytics, AnalyticsConfig, OutputStore};
use rusqlite::{params, Connection};

/// No primary keys: the integrity tests need to insert duplicate ids.
const SCHEMA: &str = "
    CREATE TABLE Agents (
        ID        INTEGER NOT NULL,
        Prototype TEXT    NOT NULL,
        EnterDate INTEGER NOT NULL
    );
    CREATE TABLE AgentDeaths (
        AgentID   INTEGER NOT NULL,
        DeathDate INTEGER NOT NULL
    );
    CREATE TABLE Transactions (
        ID         INTEGER NOT NULL,
        SenderID   INTEGER NOT NULL,
        ReceiverID INTEGER NOT NULL,
        Time       INTEGER NOT NULL,
        Commodity  TEXT    NOT NULL
    );
    CREATE TABLE TransactedResources (
        TransactionID INTEGER NOT NULL,
        Quantity      REAL    NOT NULL
    );
    CREATE TABLE Enrichments (
        ID              INTEGER NOT NULL,
        Time            INTEGER NOT NULL,
        SWU             REAL    NOT NULL,
        Natural_Uranium REAL    NOT NULL
    );
    CREATE TABLE SimulationTimeInfo (
        SimId           INTEGER NOT NULL,
        SimulationStart INTEGER NOT NULL,
        Duration        INTEGER NOT NULL
    );
";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Fixture {
    conn: Connection,
}

impl Fixture {
    pub fn new() -> Self {
        Self::on(Connection::open_in_memory().unwrap())
    }

    /// Build the schema on a caller-supplied connection, e.g. a file database.
    pub fn on(conn: Connection) -> Self {
        init_logging();
        conn.execute_batch(SCHEMA).unwrap();
        Self { conn }
    }

    pub fn agent(&self, id: i64, prototype: &str, enter: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO Agents (ID, Prototype, EnterDate) VALUES (?1, ?2, ?3)",
                params![id, prototype, enter],
            )
            .unwrap();
        self
    }

    pub fn death(&self, agent_id: i64, date: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO AgentDeaths (AgentID, DeathDate) VALUES (?1, ?2)",
                params![agent_id, date],
            )
            .unwrap();
        self
    }

    pub fn transaction(
        &self,
        id: i64,
        sender: i64,
        receiver: i64,
        time: i64,
        commodity: &str,
    ) -> &Self {
        self.conn
            .execute(
                "INSERT INTO Transactions (ID, SenderID, ReceiverID, Time, Commodity)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, sender, receiver, time, commodity],
            )
            .unwrap();
        self
    }

    pub fn resource(&self, transaction_id: i64, quantity: f64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO TransactedResources (TransactionID, Quantity) VALUES (?1, ?2)",
                params![transaction_id, quantity],
            )
            .unwrap();
        self
    }

    /// A transaction carrying a single resource quantum.
    pub fn shipment(
        &self,
        id: i64,
        sender: i64,
        receiver: i64,
        time: i64,
        commodity: &str,
        quantity: f64,
    ) -> &Self {
        self.transaction(id, sender, receiver, time, commodity)
            .resource(id, quantity)
    }

    pub fn enrichment(&self, id: i64, time: i64, swu: f64, natural_uranium: f64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO Enrichments (ID, Time, SWU, Natural_Uranium) VALUES (?1, ?2, ?3, ?4)",
                params![id, time, swu, natural_uranium],
            )
            .unwrap();
        self
    }

    pub fn time_info(&self, sim_id: i64, start: i64, duration: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO SimulationTimeInfo (SimId, SimulationStart, Duration)
                 VALUES (?1, ?2, ?3)",
                params![sim_id, start, duration],
            )
            .unwrap();
        self
    }

    /// Close the fixture connection, leaving the data on disk.
    pub fn close(self) {
        self.conn.close().map_err(|(_, e)| e).unwrap();
    }

    pub fn into_store(self) -> OutputStore {
        OutputStore::from_connection(self.conn)
    }
}

pub fn analytics(store: &OutputStore) -> Analytics<'_> {
    Analytics::with_defaults(store)
}

pub fn analytics_with(store: &OutputStore, config: AnalyticsConfig) -> Analytics<'_> {
    Analytics::new(store, config)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
