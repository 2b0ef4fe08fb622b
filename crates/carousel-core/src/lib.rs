pub mod animator;
pub mod config;
pub mod constants;
pub mod controller;
pub mod easing;
pub mod error;
pub mod layout;
pub mod surface;

pub use animator::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use easing::*;
pub use error::CarouselError;
pub use layout::*;
pub use surface::*;
