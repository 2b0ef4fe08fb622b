use crate::constants::{DETAIL_CLOSE_ID, PANEL_RESELECTED_EVENT};
use crate::dom::{self, DomPanels};
use crate::overlay;
use crate::reselect::PendingReselect;
use carousel_core::{CarouselController, PanelHandle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub type SharedCarousel = Rc<RefCell<CarouselController>>;
pub type SharedPanels = Rc<RefCell<DomPanels>>;

/// Shows the detail overlay and raises `panel-reselected` for a recorded
/// re-click. Must run with no carousel or panel borrow held.
pub struct ReselectNotifier {
    pending: PendingReselect,
    document: web::Document,
    container: Option<web::Element>,
    titles: Vec<String>,
}

impl ReselectNotifier {
    pub fn flush(&self) {
        let Some(index) = self.pending.take() else {
            return;
        };
        let title = self.titles.get(index).map(String::as_str).unwrap_or("");
        overlay::show(&self.document, title);
        if let Some(container) = &self.container {
            dispatch_reselected(container, index);
        }
    }
}

fn click_panel(carousel: &SharedCarousel, panels: &SharedPanels, handle: PanelHandle) {
    let mut panels = panels.borrow_mut();
    if let Err(e) = carousel
        .borrow_mut()
        .on_panel_activated(handle, &mut *panels)
    {
        log::warn!("[click] {}", e);
    }
}

/// Bind one click listener per panel. Each listener carries its panel's
/// handle, fixed at setup.
pub fn wire_panel_clicks(
    carousel: &SharedCarousel,
    panels: &SharedPanels,
    notifier: &Rc<ReselectNotifier>,
) {
    let targets: Vec<(PanelHandle, web::HtmlElement)> = {
        let p = panels.borrow();
        p.handles().into_iter().zip(p.elements().iter().cloned()).collect()
    };
    for (handle, el) in targets {
        let carousel = carousel.clone();
        let panels = panels.clone();
        let notifier = notifier.clone();
        dom::add_click_listener(&el, move || {
            click_panel(&carousel, &panels, handle);
            notifier.flush();
        });
    }
}

/// Re-clicks open the detail overlay and raise `panel-reselected` on the
/// container so page scripts can react.
pub fn wire_reselect(
    carousel: &SharedCarousel,
    document: &web::Document,
    container: Option<web::Element>,
    titles: Vec<String>,
) -> Rc<ReselectNotifier> {
    let pending = PendingReselect::new();
    carousel
        .borrow_mut()
        .on_selected_panel_clicked(pending.recorder());
    Rc::new(ReselectNotifier {
        pending,
        document: document.clone(),
        container,
        titles,
    })
}

fn dispatch_reselected(target: &web::Element, index: usize) {
    let init = web::CustomEventInit::new();
    init.set_detail(&JsValue::from(index as u32));
    match web::CustomEvent::new_with_event_init_dict(PANEL_RESELECTED_EVENT, &init) {
        Ok(ev) => {
            _ = target.dispatch_event(&ev);
        }
        Err(e) => log::warn!("[events] could not create {}: {:?}", PANEL_RESELECTED_EVENT, e),
    }
}

pub fn wire_detail_close(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener_by_id(document, DETAIL_CLOSE_ID, move || overlay::hide(&doc));
}

/// Arrow keys select the neighbouring panel; Escape closes the overlay.
pub fn wire_global_keydown(
    carousel: SharedCarousel,
    panels: SharedPanels,
    notifier: Rc<ReselectNotifier>,
    document: web::Document,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if key == "Escape" {
            overlay::hide(&document);
            return;
        }
        {
            let mut carousel = carousel.borrow_mut();
            let current = carousel.current_index();
            let target = match key.as_str() {
                "ArrowLeft" => current.checked_sub(1),
                "ArrowRight" => Some(current + 1).filter(|&i| i < carousel.panel_count()),
                _ => return,
            };
            if let Some(target) = target {
                let mut panels = panels.borrow_mut();
                if let Err(e) = carousel.on_panel_clicked(target, &mut *panels) {
                    log::warn!("[key] {}", e);
                }
            }
        }
        notifier.flush();
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
