//! Carousel controller: selection state and the transition driver.
//!
//! The controller owns no panels. Hosts pass their [`PanelSurface`] into
//! every call that reads or moves panels, and call [`CarouselController::update`]
//! once per rendered frame so tweens and the completion timer can advance.

use crate::animator::{Animator, TimerId, TweenEngine};
use crate::config::CarouselConfig;
use crate::constants::INITIAL_INDEX;
use crate::error::{CarouselError, Result};
use crate::layout::{layout, position_for, slide_offset};
use crate::surface::{CarouselBindings, PanelHandle, PanelSurface};
use fnv::FnvHashMap;
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Transitioning { target: usize, timer: TimerId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Started { from: usize, to: usize },
    /// Another slide is still running; the request was dropped.
    Ignored,
    /// Target is already selected; nothing to do.
    AlreadySelected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The selected panel was clicked again and listeners were notified.
    Reselected(usize),
    Transition(TransitionOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Realignment {
    /// Panels were laid out around the new alignment immediately.
    Applied,
    /// A slide is running; the next accepted slide uses the new alignment.
    Deferred,
}

type ReselectListener = Box<dyn FnMut(usize)>;

pub struct CarouselController<A: Animator = TweenEngine> {
    config: CarouselConfig,
    bindings: CarouselBindings,
    index_of: FnvHashMap<PanelHandle, usize>,
    current_index: usize,
    phase: Phase,
    realign_pending: bool,
    animator: A,
    reselect_listeners: Vec<ReselectListener>,
}

impl CarouselController<TweenEngine> {
    /// Controller driven by the built-in [`TweenEngine`].
    pub fn with_tween_engine(bindings: CarouselBindings, config: CarouselConfig) -> Result<Self> {
        Self::new(bindings, config, TweenEngine::new())
    }
}

impl<A: Animator> CarouselController<A> {
    pub fn new(bindings: CarouselBindings, config: CarouselConfig, animator: A) -> Result<Self> {
        config.validate()?;
        if bindings.panels.is_empty() {
            return Err(CarouselError::NoPanels);
        }
        let mut index_of = FnvHashMap::default();
        for (i, &panel) in bindings.panels.iter().enumerate() {
            if index_of.insert(panel, i).is_some() {
                return Err(CarouselError::DuplicatePanel(panel));
            }
        }
        Ok(Self {
            config,
            bindings,
            index_of,
            current_index: INITIAL_INDEX,
            phase: Phase::Idle,
            realign_pending: false,
            animator,
            reselect_listeners: Vec::new(),
        })
    }

    /// Reset selection and prepare the host panels.
    ///
    /// Any slide still running is cancelled. Lays panels out around the alignment point when a container is bound,
    /// and turns off transparent-mesh culling when a mask is bound so panels
    /// keep rendering while they slide outside the clip region.
    pub fn start<S: PanelSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.config.initial_index != INITIAL_INDEX {
            log::debug!(
                "[carousel] configured initial index {} ignored; starting at {}",
                self.config.initial_index,
                INITIAL_INDEX
            );
        }
        self.animator.cancel_all();
        self.current_index = INITIAL_INDEX;
        self.phase = Phase::Idle;
        self.realign_pending = false;

        if self.bindings.container.is_some() {
            self.apply_layout(surface);
        } else {
            log::warn!("[carousel] no panel container bound; keeping host panel positions");
        }

        if self.bindings.mask.is_some() {
            for &panel in &self.bindings.panels {
                surface.set_cull_transparent_mesh(panel, false);
            }
        } else {
            log::warn!("[carousel] no mask bound; panels may be culled while sliding");
        }

        log::info!(
            "[carousel] started panels={} spacing={} align=({:.1},{:.1})",
            self.bindings.panels.len(),
            self.config.panel_spacing,
            self.config.alignment.x,
            self.config.alignment.y
        );
    }

    /// Register a listener for clicks on the already-selected panel.
    pub fn on_selected_panel_clicked(&mut self, listener: impl FnMut(usize) + 'static) {
        self.reselect_listeners.push(Box::new(listener));
    }

    /// Click on the panel bound as `handle`.
    pub fn on_panel_activated<S: PanelSurface + ?Sized>(
        &mut self,
        handle: PanelHandle,
        surface: &mut S,
    ) -> Result<ClickOutcome> {
        let index = self
            .index_of(handle)
            .ok_or(CarouselError::UnknownPanel(handle))?;
        self.on_panel_clicked(index, surface)
    }

    pub fn on_panel_clicked<S: PanelSurface + ?Sized>(
        &mut self,
        index: usize,
        surface: &mut S,
    ) -> Result<ClickOutcome> {
        self.check_index(index)?;
        if index == self.current_index {
            log::info!("[click] selected panel {} clicked again", index);
            for listener in &mut self.reselect_listeners {
                listener(index);
            }
            return Ok(ClickOutcome::Reselected(index));
        }
        self.request_transition(index, surface)
            .map(ClickOutcome::Transition)
    }

    /// Slide every panel so `target_index` lands on the alignment point.
    pub fn request_transition<S: PanelSurface + ?Sized>(
        &mut self,
        target_index: usize,
        surface: &mut S,
    ) -> Result<TransitionOutcome> {
        self.check_index(target_index)?;
        if self.is_transitioning() {
            log::debug!(
                "[carousel] transition to {} dropped; slide in progress",
                target_index
            );
            return Ok(TransitionOutcome::Ignored);
        }
        if target_index == self.current_index {
            return Ok(TransitionOutcome::AlreadySelected);
        }

        let from = self.current_index;
        let duration = self.config.slide_duration;
        let easing = self.config.slide_easing;
        let realign = std::mem::take(&mut self.realign_pending);
        let offset = slide_offset(from, target_index, self.config.panel_spacing);

        for (i, &panel) in self.bindings.panels.iter().enumerate() {
            let current = surface.anchored_position(panel);
            let target_x = if realign {
                let rest = position_for(
                    i,
                    target_index,
                    self.config.alignment,
                    self.config.panel_spacing,
                );
                surface.set_anchored_position(panel, Vec2::new(current.x, rest.y));
                rest.x
            } else {
                current.x + offset
            };
            self.animator
                .animate_position_x(panel, target_x, duration, easing);
        }
        let timer = self.animator.schedule_delayed(duration);
        self.phase = Phase::Transitioning {
            target: target_index,
            timer,
        };

        log::info!(
            "[carousel] slide {} -> {} offset={:.1}{}",
            from,
            target_index,
            offset,
            if realign { " (realigned)" } else { "" }
        );
        Ok(TransitionOutcome::Started {
            from,
            to: target_index,
        })
    }

    /// Move the alignment point.
    ///
    /// While idle the panels are re-laid out at once. While a slide runs the
    /// slide keeps its targets and the new point applies from the next slide.
    pub fn set_alignment_position<S: PanelSurface + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        surface: &mut S,
    ) -> Result<Realignment> {
        let alignment = Vec2::new(x, y);
        if !alignment.is_finite() {
            return Err(CarouselError::InvalidSetting {
                name: "alignment",
                value: format!("({x}, {y})"),
            });
        }
        self.config.alignment = alignment;
        if self.is_transitioning() {
            self.realign_pending = true;
            log::debug!("[carousel] alignment ({x:.1},{y:.1}) deferred until next slide");
            return Ok(Realignment::Deferred);
        }
        self.realign_pending = false;
        self.apply_layout(surface);
        log::debug!("[carousel] realigned to ({x:.1},{y:.1})");
        Ok(Realignment::Applied)
    }

    /// Advance one frame. Returns the newly committed index when the running
    /// slide's completion timer fires on this frame.
    pub fn update<S: PanelSurface + ?Sized>(
        &mut self,
        dt: Duration,
        surface: &mut S,
    ) -> Option<usize> {
        let fired = self.animator.tick(dt, surface);
        match self.phase {
            Phase::Transitioning { target, timer } if fired.contains(&timer) => {
                self.current_index = target;
                self.phase = Phase::Idle;
                log::info!("[carousel] settled on panel {}", target);
                Some(target)
            }
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn alignment(&self) -> Vec2 {
        self.config.alignment
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn panel_count(&self) -> usize {
        self.bindings.panels.len()
    }

    pub fn panels(&self) -> &[PanelHandle] {
        &self.bindings.panels
    }

    pub fn index_of(&self, handle: PanelHandle) -> Option<usize> {
        self.index_of.get(&handle).copied()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    fn apply_layout<S: PanelSurface + ?Sized>(&self, surface: &mut S) {
        let rest = layout(
            self.bindings.panels.len(),
            self.current_index,
            self.config.alignment,
            self.config.panel_spacing,
        );
        for (&panel, position) in self.bindings.panels.iter().zip(rest) {
            surface.set_anchored_position(panel, position);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let count = self.bindings.panels.len();
        if index < count {
            Ok(())
        } else {
            Err(CarouselError::IndexOutOfRange { index, count })
        }
    }
}
