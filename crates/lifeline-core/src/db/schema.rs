//! SQLite schema definition.

/// Complete database schema for lifeline.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Profiles
-- ============================================================================

CREATE TABLE IF NOT EXISTS profiles (
    principal_id TEXT PRIMARY KEY,
    role TEXT NOT NULL CHECK (role IN ('donor', 'hospital', 'admin')),
    display_name TEXT NOT NULL,
    phone TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_profiles_role ON profiles(role);

-- ============================================================================
-- Donor Records
-- ============================================================================

CREATE TABLE IF NOT EXISTS donor_records (
    id TEXT PRIMARY KEY,
    principal_id TEXT NOT NULL UNIQUE REFERENCES profiles(principal_id),
    blood_type TEXT NOT NULL,
    address TEXT,
    city TEXT NOT NULL,
    state TEXT,
    pincode TEXT,
    latitude REAL,
    longitude REAL,
    is_available INTEGER NOT NULL DEFAULT 1,
    is_verified INTEGER NOT NULL DEFAULT 0,
    date_of_birth TEXT,
    gender TEXT,
    weight_kg REAL,
    last_donation_date TEXT,
    medical_notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_donors_blood_type ON donor_records(blood_type);
CREATE INDEX IF NOT EXISTS idx_donors_city ON donor_records(city);
CREATE INDEX IF NOT EXISTS idx_donors_verified ON donor_records(is_verified);

-- ============================================================================
-- Blood Banks
-- ============================================================================

CREATE TABLE IF NOT EXISTS blood_banks (
    id TEXT PRIMARY KEY,
    principal_id TEXT NOT NULL UNIQUE REFERENCES profiles(principal_id),
    name TEXT NOT NULL,
    registration_number TEXT,
    address TEXT,
    city TEXT NOT NULL,
    state TEXT,
    pincode TEXT,
    latitude REAL,
    longitude REAL,
    phone TEXT,
    email TEXT,
    operating_hours TEXT,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_banks_city ON blood_banks(city);
CREATE INDEX IF NOT EXISTS idx_banks_verified ON blood_banks(is_verified);

-- ============================================================================
-- Blood Stock (one row per bank per canonical type)
-- ============================================================================

CREATE TABLE IF NOT EXISTS blood_stock (
    blood_bank_id TEXT NOT NULL REFERENCES blood_banks(id),
    blood_type TEXT NOT NULL,
    units_available INTEGER NOT NULL DEFAULT 0 CHECK (units_available >= 0),
    last_updated TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (blood_bank_id, blood_type)
);

-- ============================================================================
-- Blood Requests
-- ============================================================================

CREATE TABLE IF NOT EXISTS blood_requests (
    id TEXT PRIMARY KEY,
    requester_principal_id TEXT NOT NULL,
    requester_role TEXT NOT NULL DEFAULT 'patient'
        CHECK (requester_role IN ('patient', 'hospital')),
    patient_name TEXT NOT NULL,
    blood_type TEXT NOT NULL,
    units_needed INTEGER NOT NULL CHECK (units_needed >= 1),
    urgency TEXT NOT NULL DEFAULT 'normal'
        CHECK (urgency IN ('normal', 'urgent', 'critical')),
    hospital_name TEXT,
    contact_phone TEXT NOT NULL,
    address TEXT,
    city TEXT NOT NULL,
    state TEXT,
    pincode TEXT,
    latitude REAL,
    longitude REAL,
    required_by TEXT,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'active'
        CHECK (status IN ('active', 'fulfilled', 'cancelled')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_requests_status ON blood_requests(status);
CREATE INDEX IF NOT EXISTS idx_requests_city ON blood_requests(city);
CREATE INDEX IF NOT EXISTS idx_requests_requester ON blood_requests(requester_principal_id);

-- ============================================================================
-- Donations
-- ============================================================================

CREATE TABLE IF NOT EXISTS donations (
    id TEXT PRIMARY KEY,
    donor_id TEXT NOT NULL REFERENCES donor_records(id),
    blood_bank_id TEXT REFERENCES blood_banks(id),
    blood_type TEXT NOT NULL,
    units INTEGER NOT NULL CHECK (units >= 1),
    donation_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_donations_donor ON donations(donor_id);
CREATE INDEX IF NOT EXISTS idx_donations_date ON donations(donation_date);
"#;
