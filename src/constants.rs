// DOM hooks the web front-end expects in the host page.

// Panels
pub const PANEL_SELECTOR: &str = ".map-panel"; // every selectable panel, in order
pub const PANEL_TITLE_ATTR: &str = "data-title"; // shown in the detail overlay
pub const CONTAINER_ID: &str = "panel-container"; // parent of all panels
pub const MASK_ID: &str = "panel-mask"; // optional clipping region

// Detail overlay shown when the selected panel is clicked again
pub const DETAIL_OVERLAY_ID: &str = "panel-detail";
pub const DETAIL_TITLE_ID: &str = "panel-detail-title";
pub const DETAIL_CLOSE_ID: &str = "panel-detail-close";

// Event raised on the container for re-clicks (detail = panel index)
pub const PANEL_RESELECTED_EVENT: &str = "panel-reselected";

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp long stalls (tab switches)
