//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the core builds without terminal crates.

pub mod terminal_guard;
