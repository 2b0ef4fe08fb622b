use crate::surface::PanelHandle;
use thiserror::Error;

/// Errors surfaced by the carousel controller.
///
/// Only setup and host-supplied indices can fail. A transition request that
/// arrives while another slide is running is not an error; it is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    #[error("carousel needs at least one panel")]
    NoPanels,

    #[error("panel {0} was bound more than once")]
    DuplicatePanel(PanelHandle),

    #[error("invalid setting `{name}`: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("panel index {index} out of range (have {count} panels)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("panel {0} is not bound to this carousel")]
    UnknownPanel(PanelHandle),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
