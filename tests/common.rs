#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use prodlog::db::initialize::init_db;
use prodlog::db::pool::DbPool;
use prodlog::models::{Entry, Identity};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_PASSWORD: &str = "Admin@123";

/// Isolated home (config + session file) and database for one CLI test.
pub struct Sandbox {
    pub home: PathBuf,
    pub db: String,
}

impl Sandbox {
    /// Create a fresh sandbox inside the system temp dir, wiping leftovers.
    pub fn new(name: &str) -> Self {
        let mut home: PathBuf = env::temp_dir();
        home.push(format!("prodlog_test_{}", name));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create sandbox home");

        let db = home.join("prodlog.sqlite").to_string_lossy().to_string();
        Self { home, db }
    }

    /// `prodlog --db <sandbox db>` with the sandbox as config home.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("prodlog");
        cmd.env(prodlog::config::HOME_ENV, &self.home)
            .args(["--db", &self.db]);
        cmd
    }

    /// Output file path inside the sandbox.
    pub fn out(&self, name: &str) -> String {
        self.home.join(name).to_string_lossy().to_string()
    }

    /// `init` in test mode, then log in as the default admin.
    pub fn init_as_admin(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
        self.login("admin", ADMIN_PASSWORD);
    }

    pub fn login(&self, username: &str, password: &str) {
        self.cmd()
            .args(["login", username, "--password", password])
            .assert()
            .success();
    }
}

/// Migrated in-memory database (with the default crews and types).
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn entry(date: &str, crew: &str, kind: &str, feet: u32, user: &str) -> Entry {
    Entry::new(date, crew, kind, feet, user)
}

pub fn admin() -> Identity {
    Identity::Admin {
        username: "admin".to_string(),
    }
}

pub fn supervisor(name: &str) -> Identity {
    Identity::Supervisor {
        username: name.to_string(),
        crew: Some("AJS1".to_string()),
    }
}
