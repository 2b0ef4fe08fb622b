#![cfg(target_arch = "wasm32")]
use carousel_core::{CarouselBindings, CarouselController, ContainerHandle, MaskHandle};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod reselect;
mod settings;

use constants::{CONTAINER_ID, MASK_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("carousel-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let container = document.get_element_by_id(CONTAINER_ID);
    let mask = document.get_element_by_id(MASK_ID);
    let config = match &container {
        Some(el) => settings::config_from_attributes(|name| el.get_attribute(name)),
        None => Default::default(),
    };

    let panels = dom::DomPanels::collect(&document)?;
    let titles = panels.titles();
    let mut bindings = CarouselBindings::new(panels.handles());
    if container.is_some() {
        bindings = bindings.with_container(ContainerHandle(0));
    }
    if mask.is_some() {
        bindings = bindings.with_mask(MaskHandle(0));
    }

    let panels = Rc::new(RefCell::new(panels));
    let carousel = Rc::new(RefCell::new(CarouselController::with_tween_engine(
        bindings, config,
    )?));
    carousel.borrow_mut().start(&mut *panels.borrow_mut());

    let notifier = events::wire_reselect(&carousel, &document, container, titles);
    events::wire_panel_clicks(&carousel, &panels, &notifier);
    events::wire_detail_close(&document);
    events::wire_global_keydown(carousel.clone(), panels.clone(), notifier, document.clone());

    // Tweens and the completion timer advance on requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        carousel,
        panels,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
