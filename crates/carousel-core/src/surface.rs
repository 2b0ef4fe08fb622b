//! Host-side panel access.
//!
//! Panels belong to the host scene. The carousel only ever refers to them by
//! [`PanelHandle`] and reaches their positions through [`PanelSurface`].

use glam::Vec2;
use std::fmt;

/// Opaque, copyable identity of a host panel (its click source).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelHandle(pub u32);

impl fmt::Display for PanelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identity of the host container that parents all panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerHandle(pub u32);

/// Opaque identity of the host clipping/mask region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskHandle(pub u32);

/// Positionable side of a panel, implemented by each front-end.
pub trait PanelSurface {
    /// Current anchored position of `panel`.
    fn anchored_position(&self, panel: PanelHandle) -> Vec2;

    fn set_anchored_position(&mut self, panel: PanelHandle, position: Vec2);

    /// Whether the renderer may skip `panel` while it lies outside the mask.
    fn set_cull_transparent_mesh(&mut self, panel: PanelHandle, cull: bool);
}

/// Everything the host hands the carousel at setup.
#[derive(Clone, Debug, Default)]
pub struct CarouselBindings {
    /// Panels in selection order; a panel's index is its position here.
    pub panels: Vec<PanelHandle>,
    pub container: Option<ContainerHandle>,
    pub mask: Option<MaskHandle>,
}

impl CarouselBindings {
    pub fn new(panels: Vec<PanelHandle>) -> Self {
        Self {
            panels,
            container: None,
            mask: None,
        }
    }

    pub fn with_container(mut self, container: ContainerHandle) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_mask(mut self, mask: MaskHandle) -> Self {
        self.mask = Some(mask);
        self
    }
}
