use crate::constants::{PANEL_SELECTOR, PANEL_TITLE_ATTR};
use crate::settings::{content_visibility, translate_css};
use carousel_core::{PanelHandle, PanelSurface};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener_by_id(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        add_click_listener(&el, handler);
    }
}

/// Panel elements in document order. Each panel's handle is its position in
/// this list.
pub struct DomPanels {
    elements: Vec<web::HtmlElement>,
    positions: Vec<Vec2>,
}

impl DomPanels {
    pub fn collect(document: &web::Document) -> anyhow::Result<Self> {
        let nodes = document
            .query_selector_all(PANEL_SELECTOR)
            .map_err(|e| anyhow::anyhow!("query {PANEL_SELECTOR}: {:?}", e))?;
        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(node) = nodes.item(i) else {
                continue;
            };
            match node.dyn_into::<web::HtmlElement>() {
                Ok(el) => elements.push(el),
                Err(_) => log::warn!("[dom] panel {} is not an HTML element; skipped", i),
            }
        }
        let positions = vec![Vec2::ZERO; elements.len()];
        Ok(Self {
            elements,
            positions,
        })
    }

    pub fn handles(&self) -> Vec<PanelHandle> {
        (0..self.elements.len())
            .map(|i| PanelHandle(i as u32))
            .collect()
    }

    pub fn elements(&self) -> &[web::HtmlElement] {
        &self.elements
    }

    pub fn titles(&self) -> Vec<String> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, el)| {
                el.get_attribute(PANEL_TITLE_ATTR)
                    .unwrap_or_else(|| format!("Panel {}", i + 1))
            })
            .collect()
    }
}

impl PanelSurface for DomPanels {
    fn anchored_position(&self, panel: PanelHandle) -> Vec2 {
        self.positions
            .get(panel.0 as usize)
            .copied()
            .unwrap_or(Vec2::ZERO)
    }

    fn set_anchored_position(&mut self, panel: PanelHandle, position: Vec2) {
        let i = panel.0 as usize;
        if let (Some(slot), Some(el)) = (self.positions.get_mut(i), self.elements.get(i)) {
            *slot = position;
            _ = el
                .style()
                .set_property("transform", &translate_css(position));
        }
    }

    fn set_cull_transparent_mesh(&mut self, panel: PanelHandle, cull: bool) {
        if let Some(el) = self.elements.get(panel.0 as usize) {
            _ = el
                .style()
                .set_property("content-visibility", content_visibility(cull));
        }
    }
}
