//! Database schema

/// SQL schema for initialization; creating the table on open is the
/// store's auto-provisioning.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS player_attributes (
    user_id TEXT PRIMARY KEY,
    attributes TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";
