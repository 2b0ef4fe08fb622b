use crate::constants::{DETAIL_OVERLAY_ID, DETAIL_TITLE_ID};
use web_sys as web;

/// Show the detail overlay for a re-clicked panel.
#[inline]
pub fn show(document: &web::Document, title: &str) {
    if let Some(el) = document.get_element_by_id(DETAIL_TITLE_ID) {
        el.set_text_content(Some(title));
    }
    if let Some(el) = document.get_element_by_id(DETAIL_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(DETAIL_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}
