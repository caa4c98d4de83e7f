// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture debouncing: one logical action per cooldown window.
//!
//! A single physical wheel gesture produces a burst of tick events. Feeding
//! every tick through [`GestureDebouncer::fire`] turns the burst into one
//! action: the first call runs the effect and suppresses the action for the
//! given delay; calls inside that window do nothing. The window is fixed at
//! the first call and is not extended by later ones.
//!
//! Cooldowns are keyed by action, created lazily, and independent of each
//! other. Time is a caller-supplied monotonic millisecond clock.
//!
//! ## Minimal example
//!
//! ```
//! use geodrill_event_state::cooldown::GestureDebouncer;
//!
//! let mut debouncer = GestureDebouncer::new();
//! let mut drills = 0;
//!
//! for now in [0, 16, 32, 48] {
//!     debouncer.fire("drillDown", 700, now, || drills += 1);
//! }
//! assert_eq!(drills, 1);
//!
//! // A different action is not blocked.
//! assert!(debouncer.fire("rollUp", 700, 50, || ()).is_some());
//!
//! // After the window, the action fires again.
//! debouncer.fire("drillDown", 700, 700, || drills += 1);
//! assert_eq!(drills, 2);
//! ```

use core::hash::Hash;

use hashbrown::HashMap;

/// Suppression state of one named action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureCooldown {
    /// Whether the action is currently suppressed.
    pub suppressed: bool,
    /// Timestamp at which suppression lifts.
    pub expires_at: u64,
}

impl GestureCooldown {
    fn is_active(&self, now_ms: u64) -> bool {
        self.suppressed && now_ms < self.expires_at
    }
}

/// Coalesces repeated low-level input into single actions, per action key.
#[derive(Clone, Debug)]
pub struct GestureDebouncer<A> {
    cooldowns: HashMap<A, GestureCooldown>,
}

impl<A> Default for GestureDebouncer<A> {
    fn default() -> Self {
        Self {
            cooldowns: HashMap::new(),
        }
    }
}

impl<A> GestureDebouncer<A>
where
    A: Hash + Eq,
{
    /// Creates a debouncer with no cooldowns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `effect` unless `action` is suppressed, then suppresses it for `delay_ms`.
    ///
    /// Returns the effect's result, or `None` if the call fell inside an
    /// active cooldown window.
    pub fn fire<R>(
        &mut self,
        action: A,
        delay_ms: u64,
        now_ms: u64,
        effect: impl FnOnce() -> R,
    ) -> Option<R> {
        self.try_acquire(action, delay_ms, now_ms).then(effect)
    }

    /// Claims the cooldown window for `action` without running anything.
    ///
    /// Returns `true` if the caller should perform the action now. This is
    /// the split form of [`fire`](Self::fire) for callers whose effect needs
    /// mutable access to the structure that owns the debouncer.
    pub fn try_acquire(&mut self, action: A, delay_ms: u64, now_ms: u64) -> bool {
        let cooldown = self.cooldowns.entry(action).or_default();
        if cooldown.is_active(now_ms) {
            return false;
        }
        cooldown.suppressed = delay_ms > 0;
        cooldown.expires_at = now_ms.saturating_add(delay_ms);
        true
    }

    /// Returns `true` if `action` is suppressed at `now_ms`.
    #[must_use]
    pub fn is_suppressed(&self, action: &A, now_ms: u64) -> bool {
        self.cooldowns
            .get(action)
            .is_some_and(|cooldown| cooldown.is_active(now_ms))
    }

    /// Returns the cooldown record for `action`, if one was ever created.
    #[must_use]
    pub fn cooldown(&self, action: &A) -> Option<&GestureCooldown> {
        self.cooldowns.get(action)
    }

    /// Resets every cooldown whose delay has elapsed by `now_ms`.
    ///
    /// Returns how many were reset. Calling this is optional, since expiry
    /// is also checked on each [`fire`](Self::fire); it keeps the recorded
    /// flags accurate for observers.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let mut reset = 0;
        for cooldown in self.cooldowns.values_mut() {
            if cooldown.suppressed && now_ms >= cooldown.expires_at {
                cooldown.suppressed = false;
                reset += 1;
            }
        }
        reset
    }

    /// Cancels the cooldown for `action`, so the next call fires.
    pub fn cancel(&mut self, action: &A) {
        if let Some(cooldown) = self.cooldowns.get_mut(action) {
            cooldown.suppressed = false;
        }
    }

    /// Cancels and forgets every cooldown.
    pub fn cancel_all(&mut self) {
        self.cooldowns.clear();
    }

    /// Number of actions currently suppressed at `now_ms`.
    #[must_use]
    pub fn active_count(&self, now_ms: u64) -> usize {
        self.cooldowns
            .values()
            .filter(|cooldown| cooldown.is_active(now_ms))
            .count()
    }
}
