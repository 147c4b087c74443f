//! Total order over a session list.
//!
//! Sessions further into playback come first. Equal positions fall back to
//! `session_key` ascending so refreshes never shuffle rows that happen to be
//! at the same offset (two sessions paused at zero, for instance).

use std::cmp::Ordering;

use streamdash_model::Session;

/// Compare two sessions: `position_ticks` descending, then `session_key`
/// ascending.
pub fn compare_sessions(a: &Session, b: &Session) -> Ordering {
    b.position_ticks
        .cmp(&a.position_ticks)
        .then_with(|| a.session_key.cmp(&b.session_key))
}

/// Ranked copy of `sessions`. The input is left untouched.
///
/// The sort is stable, so duplicate keys at equal positions (an upstream
/// bug) keep their arrival order instead of panicking or flickering.
pub fn rank_sessions(sessions: &[Session]) -> Vec<Session> {
    let mut ranked = sessions.to_vec();
    ranked.sort_by(compare_sessions);
    ranked
}

/// Borrowing variant of [`rank_sessions`] for render paths that only read.
pub fn ranked_refs(sessions: &[Session]) -> Vec<&Session> {
    let mut ranked: Vec<&Session> = sessions.iter().collect();
    ranked.sort_by(|a, b| compare_sessions(a, b));
    ranked
}

/// Whether `sessions` is already in ranked order.
pub fn is_ranked(sessions: &[Session]) -> bool {
    sessions
        .windows(2)
        .all(|pair| compare_sessions(&pair[0], &pair[1]) != Ordering::Greater)
}
