//! Cancelable timer bookkeeping for dwell, fade, and toast deadlines.
//!
//! The reducer owns a [`TimerTable`] holding at most one armed [`TimerToken`] per
//! [`TimerKind`]. Arming a kind that is already armed supersedes the old token, and every
//! arm/disarm is mirrored by a [`RuntimeEffect`] so the host driver (browser timeouts or the
//! virtual [`TimerQueue`]) cancels the superseded callback for real.

use std::collections::BTreeMap;

use crate::reducer::RuntimeEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    BootDwell,
    WelcomeDwell,
    FadeOut,
    FadeIn,
    ToastShow,
    ToastAutoHide,
}

impl TimerKind {
    /// Timers that belong to the current phase and die with it.
    pub const PHASE_SCOPED: [TimerKind; 5] = [
        TimerKind::BootDwell,
        TimerKind::WelcomeDwell,
        TimerKind::FadeIn,
        TimerKind::ToastShow,
        TimerKind::ToastAutoHide,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BootDwell => "boot-dwell",
            Self::WelcomeDwell => "welcome-dwell",
            Self::FadeOut => "fade-out",
            Self::FadeIn => "fade-in",
            Self::ToastShow => "toast-show",
            Self::ToastAutoHide => "toast-auto-hide",
        }
    }
}

/// Identity of one scheduled callback. A newer generation of the same kind supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimerTable {
    next_generation: u64,
    armed: BTreeMap<TimerKind, u64>,
}

impl TimerTable {
    /// Arms `kind`, returning the new token and the superseded one, if any.
    pub fn arm(&mut self, kind: TimerKind) -> (TimerToken, Option<TimerToken>) {
        self.next_generation = self.next_generation.saturating_add(1);
        let generation = self.next_generation;
        let superseded = self
            .armed
            .insert(kind, generation)
            .map(|generation| TimerToken { kind, generation });
        (TimerToken { kind, generation }, superseded)
    }

    pub fn disarm(&mut self, kind: TimerKind) -> Option<TimerToken> {
        self.armed
            .remove(&kind)
            .map(|generation| TimerToken { kind, generation })
    }

    /// Consumes `token` if it is the armed token for its kind.
    pub fn take(&mut self, token: TimerToken) -> bool {
        if self.armed.get(&token.kind) == Some(&token.generation) {
            self.armed.remove(&token.kind);
            true
        } else {
            false
        }
    }

    pub fn armed(&self, kind: TimerKind) -> Option<TimerToken> {
        self.armed
            .get(&kind)
            .map(|&generation| TimerToken { kind, generation })
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains_key(&kind)
    }
}

pub(crate) fn arm_timer(
    table: &mut TimerTable,
    effects: &mut Vec<RuntimeEffect>,
    kind: TimerKind,
    delay_ms: u32,
) {
    let (token, superseded) = table.arm(kind);
    if let Some(old) = superseded {
        effects.push(RuntimeEffect::CancelTimer(old));
    }
    effects.push(RuntimeEffect::ScheduleTimer { token, delay_ms });
}

pub(crate) fn disarm_timer(table: &mut TimerTable, effects: &mut Vec<RuntimeEffect>, kind: TimerKind) {
    if let Some(token) = table.disarm(kind) {
        effects.push(RuntimeEffect::CancelTimer(token));
    }
}

/// Host-side executor for timer effects.
pub trait TimerDriver {
    /// Schedules `token` to fire after `delay_ms`, replacing any pending timer of the same kind.
    fn schedule(&mut self, token: TimerToken, delay_ms: u32);

    /// Cancels `token`; a cancelled timer must never fire.
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTimer {
    token: TimerToken,
    deadline_ms: u64,
    seq: u64,
}

/// Deterministic virtual-time timer queue for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending timers as `(token, absolute deadline)` in firing order.
    pub fn pending(&self) -> Vec<(TimerToken, u64)> {
        let mut pending = self.pending.clone();
        pending.sort_by_key(|timer| (timer.deadline_ms, timer.seq));
        pending
            .into_iter()
            .map(|timer| (timer.token, timer.deadline_ms))
            .collect()
    }

    pub fn deadline_of(&self, kind: TimerKind) -> Option<u64> {
        self.pending
            .iter()
            .find(|timer| timer.token.kind == kind)
            .map(|timer| timer.deadline_ms)
    }

    /// Removes and returns the earliest timer due at or before `until_ms`, moving the clock to
    /// its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerToken> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.deadline_ms, timer.seq))
            .map(|(index, _)| index)?;
        let timer = self.pending.remove(index);
        self.now_ms = self.now_ms.max(timer.deadline_ms);
        Some(timer.token)
    }

    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl TimerDriver for TimerQueue {
    fn schedule(&mut self, token: TimerToken, delay_ms: u32) {
        self.pending.retain(|timer| timer.token.kind != token.kind);
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            token,
            deadline_ms: self.now_ms + u64::from(delay_ms),
            seq: self.next_seq,
        });
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|timer| timer.token != token);
    }
}
