//! Semantic action IDs for PathFinder click targets.

// ── Program selector ─────────────────────────────────────────
pub const CLEAR_PROGRAM: u16 = 10;
pub const SELECT_PROGRAM_BASE: u16 = 11; // +index 0..2

// ── Career field ─────────────────────────────────────────────
pub const FOCUS_CAREER: u16 = 20;

// ── Trigger ──────────────────────────────────────────────────
pub const REQUEST_RECOMMENDATIONS: u16 = 30;
