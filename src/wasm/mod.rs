//! WASM bindings for the paginator
//!
//! The host page owns the real document tree and the timers; this bridge owns
//! the engine and the rate limiters. Raw browser notifications (observer
//! callbacks, scroll, beforeprint) arrive through the `notify*` methods and
//! are coalesced before reaching the engine; the host drives `tick()` from a
//! periodic timer to flush trailing-edge firings.

use crate::debounce::{Clock, Debouncer};
use crate::engine::Paginator;
use crate::options::PaginatorOptions;
use crate::surface::{NodeId, Surface, Zone};
use wasm_bindgen::prelude::*;

/// Scroll signals only maintain a flag, so they coalesce on a short
/// leading-edge window instead of the configured debounce time.
const SCROLL_SIGNAL_WINDOW_MS: f64 = 50.0;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

#[wasm_bindgen]
extern "C" {
    /// Host-implemented rendering surface over the real document tree.
    ///
    /// Nodes cross the boundary as non-negative numeric ids assigned by the
    /// host; methods returning an optional node report absence as `-1`.
    pub type HostSurface;

    #[wasm_bindgen(method, js_name = zoneCount)]
    fn zone_count(this: &HostSurface, zone: &str) -> u32;

    #[wasm_bindgen(method, js_name = contentHeight)]
    fn content_height(this: &HostSurface) -> f32;

    #[wasm_bindgen(method, js_name = unitPx)]
    fn unit_px(this: &HostSurface, unit: &str) -> f32;

    #[wasm_bindgen(method, js_name = queryBreakables)]
    fn query_breakables(this: &HostSurface, selector: &str) -> Vec<f64>;

    #[wasm_bindgen(method, js_name = nodeTop)]
    fn node_top(this: &HostSurface, node: f64) -> f32;

    #[wasm_bindgen(method, js_name = nodeHeight)]
    fn node_height(this: &HostSurface, node: f64) -> f32;

    #[wasm_bindgen(method, js_name = documentPosition)]
    fn document_position(this: &HostSurface, node: f64) -> f64;

    #[wasm_bindgen(method, js_name = lastChild)]
    fn last_child(this: &HostSurface) -> f64;

    #[wasm_bindgen(method, js_name = nextSibling)]
    fn next_sibling(this: &HostSurface, node: f64) -> f64;

    #[wasm_bindgen(method, js_name = isBreakable)]
    fn is_breakable(this: &HostSurface, node: f64) -> bool;

    #[wasm_bindgen(method)]
    fn spacers(this: &HostSurface) -> Vec<f64>;

    #[wasm_bindgen(method, js_name = insertSpacerBefore)]
    fn insert_spacer_before(this: &HostSurface, node: f64, height: f32) -> f64;

    #[wasm_bindgen(method, js_name = removeSpacer)]
    fn remove_spacer(this: &HostSurface, node: f64);

    #[wasm_bindgen(method, js_name = markBreakBefore)]
    fn mark_break_before(this: &HostSurface, node: f64);

    #[wasm_bindgen(method, js_name = appendSentinel)]
    fn append_sentinel(this: &HostSurface) -> f64;

    #[wasm_bindgen(method, js_name = pageCardCount)]
    fn page_card_count(this: &HostSurface) -> u32;

    #[wasm_bindgen(method, js_name = pushPageCard)]
    fn push_page_card(this: &HostSurface);

    #[wasm_bindgen(method, js_name = popPageCard)]
    fn pop_page_card(this: &HostSurface);
}

fn opt_id(raw: f64) -> Option<NodeId> {
    if raw < 0.0 {
        None
    } else {
        Some(NodeId(raw as u64))
    }
}

/// Adapter presenting the host object as a [`Surface`].
pub struct JsSurface {
    host: HostSurface,
}

impl JsSurface {
    pub fn new(host: HostSurface) -> Self {
        Self { host }
    }
}

impl Surface for JsSurface {
    fn zone_count(&self, zone: Zone) -> usize {
        self.host.zone_count(zone.as_str()) as usize
    }

    fn content_height(&self) -> f32 {
        self.host.content_height()
    }

    fn unit_px(&self, unit: &str) -> f32 {
        self.host.unit_px(unit)
    }

    fn query_breakables(&self, selector: &str) -> Vec<NodeId> {
        self.host
            .query_breakables(selector)
            .into_iter()
            .filter_map(opt_id)
            .collect()
    }

    fn node_top(&self, node: NodeId) -> f32 {
        self.host.node_top(node.0 as f64)
    }

    fn node_height(&self, node: NodeId) -> f32 {
        self.host.node_height(node.0 as f64)
    }

    fn document_position(&self, node: NodeId) -> u64 {
        self.host.document_position(node.0 as f64) as u64
    }

    fn last_child(&self) -> Option<NodeId> {
        opt_id(self.host.last_child())
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        opt_id(self.host.next_sibling(node.0 as f64))
    }

    fn is_breakable(&self, node: NodeId) -> bool {
        self.host.is_breakable(node.0 as f64)
    }

    fn spacers(&self) -> Vec<NodeId> {
        self.host.spacers().into_iter().filter_map(opt_id).collect()
    }

    fn insert_spacer_before(&mut self, node: NodeId, height: f32) -> NodeId {
        NodeId(self.host.insert_spacer_before(node.0 as f64, height) as u64)
    }

    fn remove_spacer(&mut self, node: NodeId) {
        self.host.remove_spacer(node.0 as f64);
    }

    fn mark_break_before(&mut self, node: NodeId) {
        self.host.mark_break_before(node.0 as f64);
    }

    fn append_sentinel(&mut self) -> NodeId {
        NodeId(self.host.append_sentinel() as u64)
    }

    fn page_card_count(&self) -> usize {
        self.host.page_card_count() as usize
    }

    fn push_page_card(&mut self) {
        self.host.push_page_card();
    }

    fn pop_page_card(&mut self) {
        self.host.pop_page_card();
    }
}

/// Wall clock from the host environment.
struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-exposed paginator wrapper.
#[wasm_bindgen]
pub struct WasmPaginator {
    engine: Paginator<JsSurface>,
    content_debounce: Debouncer,
    container_debounce: Debouncer,
    mutation_debounce: Debouncer,
    scroll_debounce: Debouncer,
    pending_content_height: Option<f32>,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Attach to a host surface. `options_json` is a JSON object with
    /// camelCase option keys; omit it for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HostSurface, options_json: Option<String>) -> Result<WasmPaginator, JsValue> {
        let options = match options_json {
            Some(json) => PaginatorOptions::from_json(&json).map_err(to_js_error)?,
            None => PaginatorOptions::default(),
        };
        let debounce_time = options.debounce_time;

        let engine = Paginator::with_clock(JsSurface::new(host), options, Box::new(JsClock))
            .map_err(to_js_error)?;

        Ok(Self {
            engine,
            content_debounce: Debouncer::new(debounce_time, false),
            container_debounce: Debouncer::new(debounce_time, false),
            mutation_debounce: Debouncer::new(debounce_time, false),
            scroll_debounce: Debouncer::new(SCROLL_SIGNAL_WINDOW_MS, true),
            pending_content_height: None,
        })
    }

    /// Raw content-layer resize notification (observer callback).
    #[wasm_bindgen(js_name = notifyContentSizeChanged)]
    pub fn notify_content_size_changed(&mut self, height: f32) {
        self.pending_content_height = Some(height);
        self.content_debounce.signal(JsClock.now_ms());
    }

    /// Raw container resize notification.
    #[wasm_bindgen(js_name = notifyContainerResized)]
    pub fn notify_container_resized(&mut self) {
        self.container_debounce.signal(JsClock.now_ms());
    }

    /// Raw content mutation notification.
    #[wasm_bindgen(js_name = notifyContentMutated)]
    pub fn notify_content_mutated(&mut self) {
        self.mutation_debounce.signal(JsClock.now_ms());
    }

    /// Raw scroll notification; fires on the leading edge so the scroll flag
    /// is stamped without waiting out the window.
    #[wasm_bindgen(js_name = notifyScroll)]
    pub fn notify_scroll(&mut self) {
        if self.scroll_debounce.signal(JsClock.now_ms()) {
            self.engine.on_user_scrolled();
        }
    }

    /// The environment is about to print; not debounced.
    #[wasm_bindgen(js_name = notifyBeforePrint)]
    pub fn notify_before_print(&mut self) {
        self.engine.on_before_print();
    }

    /// Flush debouncers whose quiet period has elapsed. The host calls this
    /// from a periodic timer.
    pub fn tick(&mut self) {
        let now = JsClock.now_ms();
        if self.content_debounce.poll(now) {
            if let Some(height) = self.pending_content_height.take() {
                self.engine.on_content_size_changed(height);
            }
        }
        if self.container_debounce.poll(now) {
            self.engine.on_container_resized();
        }
        if self.mutation_debounce.poll(now) {
            self.engine.on_content_mutated();
        }
        self.scroll_debounce.poll(now);
    }

    /// Force a full pagination cycle now.
    pub fn recompute(&mut self) {
        self.engine.recompute();
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.engine.page_count()
    }

    /// Current page boundaries as a JSON array of `{top, bottom}` objects.
    #[wasm_bindgen(js_name = pageBoundaries)]
    pub fn page_boundaries(&self) -> String {
        serde_json::to_string(self.engine.page_boundaries()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Cancel pending notifications and detach. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.content_debounce.cancel();
        self.container_debounce.cancel();
        self.mutation_debounce.cancel();
        self.scroll_debounce.cancel();
        self.pending_content_height = None;
        self.engine.teardown();
    }
}
