//! Animation service used by the transition driver.
//!
//! [`Animator`] is the narrow seam to whatever tweening system the host has.
//! [`TweenEngine`] is the built-in, frame-driven implementation both
//! front-ends use.

use crate::easing::Easing;
use crate::surface::{PanelHandle, PanelSurface};
use smallvec::SmallVec;
use std::time::Duration;

/// Identifies a deferred call handed out by [`Animator::schedule_delayed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Timers that elapsed during one [`Animator::tick`].
pub type FiredTimers = SmallVec<[TimerId; 2]>;

pub trait Animator {
    /// Ease `panel`'s anchored X to `target_x` over `duration`, holding Y.
    fn animate_position_x(
        &mut self,
        panel: PanelHandle,
        target_x: f32,
        duration: Duration,
        easing: Easing,
    );

    /// Schedule a deferred call; its id is reported by `tick` once `delay`
    /// has elapsed.
    fn schedule_delayed(&mut self, delay: Duration) -> TimerId;

    /// Advance by one frame, writing tweened positions into `surface`.
    fn tick<S: PanelSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> FiredTimers;

    /// Drop every running tween and pending timer. Panels stay where the
    /// last tick left them.
    fn cancel_all(&mut self);
}

#[derive(Clone, Debug)]
struct PositionTween {
    panel: PanelHandle,
    // captured from the surface on the first tick
    from: Option<f32>,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

#[derive(Clone, Debug)]
struct DelayedCall {
    id: TimerId,
    remaining: Duration,
}

/// Frame-driven tween and timer scheduler.
///
/// Tweens advance before timers within a tick, so a timer scheduled with the
/// same duration as a group of tweens fires on the frame they land.
#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: Vec<PositionTween>,
    timers: Vec<DelayedCall>,
    next_timer: u64,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty() && self.timers.is_empty()
    }
}

impl Animator for TweenEngine {
    fn animate_position_x(
        &mut self,
        panel: PanelHandle,
        target_x: f32,
        duration: Duration,
        easing: Easing,
    ) {
        // A newer tween on the same panel takes over from wherever it is.
        self.tweens.retain(|t| t.panel != panel);
        self.tweens.push(PositionTween {
            panel,
            from: None,
            to: target_x,
            elapsed: Duration::ZERO,
            duration,
            easing,
        });
    }

    fn schedule_delayed(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(DelayedCall {
            id,
            remaining: delay,
        });
        id
    }

    fn tick<S: PanelSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> FiredTimers {
        self.tweens.retain_mut(|tween| {
            let current = surface.anchored_position(tween.panel);
            let from = *tween.from.get_or_insert(current.x);
            tween.elapsed += dt;
            let done = tween.elapsed >= tween.duration;
            let x = if done {
                tween.to
            } else {
                let t = tween.elapsed.as_secs_f32() / tween.duration.as_secs_f32();
                from + (tween.to - from) * tween.easing.apply(t)
            };
            surface.set_anchored_position(tween.panel, glam::Vec2::new(x, current.y));
            !done
        });

        let mut fired = FiredTimers::new();
        self.timers.retain_mut(|timer| {
            timer.remaining = timer.remaining.saturating_sub(dt);
            if timer.remaining.is_zero() {
                fired.push(timer.id);
                false
            } else {
                true
            }
        });
        fired
    }

    fn cancel_all(&mut self) {
        self.tweens.clear();
        self.timers.clear();
    }
}
