//! Engine-wide constants and magic numbers.
//!
//! All engine-wide constants are defined here for easy auditing and modification.

// ═══════════════════════════════════════════════════════════════════════════════
// FIXED-POINT CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Scale factor for configuration rates (1.0 == 10^9)
pub const RATE_SCALE: u64 = 1_000_000_000;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIER LENGTHS
// ═══════════════════════════════════════════════════════════════════════════════

/// Length of a source identifier in bytes
pub const SOURCE_ID_LENGTH: usize = 32;

/// Length of an account address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Length of an asset identifier in bytes
pub const ASSET_ID_LENGTH: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of events retained in the engine's in-memory log
pub const MAX_ENGINE_EVENTS: usize = 1000;
