//! Recomputation orchestration
//!
//! One engine instance owns its rendering surface and sequences each
//! pagination cycle: clear spacers, recompute boundaries and the page-card
//! pool, collect breakables, resolve overflow. A cycle runs synchronously and
//! to completion; the `is_updating` flag is the sole re-entrancy guard and
//! calls arriving mid-cycle are dropped, not queued. Inbound change
//! notifications are assumed to be coalesced by the caller (see `debounce`).

use crate::debounce::{Clock, SystemClock};
use crate::error::PaginatorError;
use crate::layout::geometry::{self, Boundaries, PageBoundary, ResolvedGeometry};
use crate::layout::{breakables, drift, overflow, spacer};
use crate::options::PaginatorOptions;
use crate::surface::{Surface, Zone};
use crate::units::{Length, UnitConverter};
use log::{debug, error, warn};

/// Mutable engine state, owned exclusively by the orchestrator.
#[derive(Debug, Default)]
pub struct EngineState {
    /// True for the entire duration of one recomputation cycle.
    pub is_updating: bool,
    /// Boundary list from the last completed cycle, fully overwritten each
    /// cycle. The only thing cached across cycles.
    pub page_boundaries: Boundaries,
    /// Set by scroll notifications; cleared by drift validation or expiry.
    pub user_recently_scrolled: bool,
    /// Timestamp of the last scroll notification, in clock milliseconds.
    pub last_scroll_ms: f64,
}

/// The pagination engine.
///
/// Construction validates the container's structural zones and the configured
/// page lengths, plants the sentinel, and runs the initial cycle; a failure
/// leaves no partial engine behind.
pub struct Paginator<S: Surface> {
    surface: S,
    options: PaginatorOptions,
    units: UnitConverter,
    clock: Box<dyn Clock>,
    state: EngineState,
    last_ink_height: f32,
    destroyed: bool,
}

impl<S: Surface> Paginator<S> {
    pub fn new(surface: S, options: PaginatorOptions) -> Result<Self, PaginatorError> {
        Self::with_clock(surface, options, Box::new(SystemClock::new()))
    }

    pub fn with_clock(
        surface: S,
        options: PaginatorOptions,
        clock: Box<dyn Clock>,
    ) -> Result<Self, PaginatorError> {
        for zone in Zone::ALL {
            let count = surface.zone_count(zone);
            if count != 1 {
                return Err(PaginatorError::Zone { zone, count });
            }
        }

        let mut engine = Self {
            surface,
            options,
            units: UnitConverter::new(),
            clock,
            state: EngineState::default(),
            last_ink_height: 0.0,
            destroyed: false,
        };
        engine.check_lengths()?;

        spacer::ensure_sentinel(&mut engine.surface);
        engine.recompute();
        engine.last_ink_height = engine.surface.content_height();
        Ok(engine)
    }

    /// The sole mutating entry point: one complete, self-contained cycle.
    ///
    /// Idempotent given stable measured state. A call arriving while a cycle
    /// is in progress is logged and dropped.
    pub fn recompute(&mut self) {
        if self.destroyed {
            return;
        }
        if self.state.is_updating {
            warn!("recompute requested while a cycle is in progress; dropping the call");
            return;
        }
        self.state.is_updating = true;
        debug!("pagination cycle started");

        let geom = self.resolved_geometry();
        if !geom.is_finite() {
            error!("page geometry did not resolve to finite pixels; aborting cycle");
            self.state.is_updating = false;
            return;
        }

        spacer::clear_all(&mut self.surface);
        let ink_height = self.surface.content_height();
        let boundaries = geometry::page_boundaries(ink_height, &geom);
        geometry::reconcile_page_cards(&mut self.surface, boundaries.len());

        let breakables = breakables::collect(&mut self.surface, &self.options.breakable_selector);
        overflow::resolve(&mut self.surface, &breakables, &boundaries);

        self.state.page_boundaries = boundaries;
        self.state.is_updating = false;
        debug!(
            "pagination cycle complete: {} pages, {} breakables",
            self.state.page_boundaries.len(),
            breakables.len()
        );
    }

    /// Measured-height change from the content layer.
    ///
    /// A delta past the threshold means real growth or shrinkage and forces a
    /// cycle. A flat height right after scrolling can still hide a layout
    /// shift, so drift validation runs instead.
    pub fn on_content_size_changed(&mut self, new_height: f32) {
        if self.destroyed {
            return;
        }
        let delta = (new_height - self.last_ink_height).abs();
        if delta > self.options.height_change_threshold && !self.state.is_updating {
            self.recompute();
        } else if self.scroll_window_active() {
            self.run_drift_validation();
        }
        self.last_ink_height = new_height;
    }

    /// Container geometry changed; page capacity may differ.
    pub fn on_container_resized(&mut self) {
        if self.destroyed || self.state.is_updating {
            return;
        }
        self.recompute();
    }

    /// Content tree mutated underneath the engine.
    pub fn on_content_mutated(&mut self) {
        if self.destroyed || self.state.is_updating {
            return;
        }
        self.recompute();
    }

    /// The user scrolled; remember it for the drift-validation window.
    pub fn on_user_scrolled(&mut self) {
        if self.destroyed {
            return;
        }
        self.state.user_recently_scrolled = true;
        self.state.last_scroll_ms = self.clock.now_ms();
    }

    /// The environment is about to print; spacer state must be current.
    pub fn on_before_print(&mut self) {
        if self.destroyed || self.state.is_updating {
            return;
        }
        self.recompute();
    }

    /// Detach and remove engine-owned spacers. Idempotent; every entry point
    /// is a no-op afterwards.
    pub fn teardown(&mut self) {
        if self.destroyed {
            return;
        }
        spacer::clear_all(&mut self.surface);
        self.destroyed = true;
        debug!("paginator torn down");
    }

    pub fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn page_boundaries(&self) -> &[PageBoundary] {
        &self.state.page_boundaries
    }

    pub fn page_count(&self) -> usize {
        self.state.page_boundaries.len().max(1)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host-side access for content mutation between cycles.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn check_lengths(&mut self) -> Result<(), PaginatorError> {
        let lengths: [(&'static str, Length); 4] = [
            ("pageWidth", self.options.page_width.clone()),
            ("pageHeight", self.options.page_height.clone()),
            ("pageInset", self.options.page_inset.clone()),
            ("pageGap", self.options.page_gap.clone()),
        ];
        for (field, length) in lengths {
            let surface = &self.surface;
            let px = self.units.to_pixels(&length, |unit| surface.unit_px(unit));
            if !px.is_finite() {
                return Err(PaginatorError::UnparseableLength {
                    field,
                    value: length.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve the configured page lengths for this cycle. NaN components
    /// mean no pagination is possible until the environment recovers.
    fn resolved_geometry(&mut self) -> ResolvedGeometry {
        let surface = &self.surface;
        let probe = |unit: &str| surface.unit_px(unit);
        ResolvedGeometry {
            page_width: self.units.to_pixels(&self.options.page_width, probe),
            page_height: self.units.to_pixels(&self.options.page_height, probe),
            page_inset: self.units.to_pixels(&self.options.page_inset, probe),
            page_gap: self.units.to_pixels(&self.options.page_gap, probe),
        }
    }

    fn scroll_window_active(&self) -> bool {
        self.state.user_recently_scrolled
            && self.clock.now_ms() - self.state.last_scroll_ms < self.options.scroll_debounce_time
    }

    fn run_drift_validation(&mut self) {
        if self.state.is_updating {
            return;
        }
        let geom = self.resolved_geometry();
        let needs_recompute = geom.is_finite()
            && drift::validate(
                &self.surface,
                &geom,
                &self.state.page_boundaries,
                self.options.height_change_threshold,
            );
        self.state.user_recently_scrolled = false;
        if needs_recompute {
            debug!("drift validation requested a full recompute");
            self.recompute();
        }
    }

    #[cfg(test)]
    pub(crate) fn force_updating(&mut self, updating: bool) {
        self.state.is_updating = updating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::testing::ManualClock;
    use crate::surface::{MemorySurface, NodeId};
    use crate::units::Length;

    // 900px pages with a 100px inset: page 0's content area is {100, 800}
    fn test_options() -> PaginatorOptions {
        PaginatorOptions {
            page_width: Length::Px(800.0),
            page_height: Length::Px(900.0),
            page_inset: Length::Px(100.0),
            page_gap: Length::Px(0.0),
            ..PaginatorOptions::default()
        }
    }

    /// Content that paginates to two pages with one 20px spacer: filler to
    /// 780, a 50px breakable overflowing {100, 800}, then more filler.
    fn overflowing_surface() -> MemorySurface {
        let mut surface = MemorySurface::new().with_origin(100.0);
        surface.push_content(680.0);
        surface.push_breakable(50.0);
        surface.push_content(600.0);
        surface
    }

    fn engine_with(surface: MemorySurface) -> (Paginator<MemorySurface>, ManualClock) {
        let clock = ManualClock::new();
        let engine =
            Paginator::with_clock(surface, test_options(), Box::new(clock.clone())).unwrap();
        (engine, clock)
    }

    #[test]
    fn test_initial_cycle_paginates() {
        let (engine, _clock) = engine_with(overflowing_surface());
        assert_eq!(engine.page_count(), 2);
        assert_eq!(engine.surface().page_card_count(), 2);
        assert_eq!(engine.surface().spacer_layout(), vec![(1, 20.0)]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (mut engine, _clock) = engine_with(overflowing_surface());
        let first = engine.surface().spacer_layout();
        let cards = engine.surface().page_card_count();

        engine.recompute();
        assert_eq!(engine.surface().spacer_layout(), first);
        assert_eq!(engine.surface().page_card_count(), cards);

        engine.recompute();
        assert_eq!(engine.surface().spacer_layout(), first);
    }

    #[test]
    fn test_reentrant_recompute_is_dropped() {
        let (mut engine, _clock) = engine_with(overflowing_surface());
        let spacers = engine.surface().spacer_layout();
        let cards = engine.surface().page_card_count();

        engine.force_updating(true);
        engine.recompute();

        // No mutation happened and the cycle flag is untouched
        assert_eq!(engine.surface().spacer_layout(), spacers);
        assert_eq!(engine.surface().page_card_count(), cards);
        assert!(engine.state().is_updating);
        engine.force_updating(false);
    }

    #[test]
    fn test_zone_validation_is_fatal() {
        let mut surface = MemorySurface::new();
        surface.set_zone_count(Zone::Paper, 2);
        let err = Paginator::new(surface, test_options()).err().unwrap();
        assert!(matches!(
            err,
            PaginatorError::Zone { zone: Zone::Paper, count: 2 }
        ));
    }

    #[test]
    fn test_unparseable_length_is_fatal() {
        let options = PaginatorOptions {
            page_height: "11furlongs".into(),
            ..test_options()
        };
        let err = Paginator::new(MemorySurface::new(), options).err().unwrap();
        assert!(matches!(
            err,
            PaginatorError::UnparseableLength { field: "pageHeight", .. }
        ));
    }

    #[test]
    fn test_height_change_beyond_threshold_recomputes() {
        let (mut engine, _clock) = engine_with(overflowing_surface());

        // Content grows: the spacer target element moves with it
        let grown = {
            let surface = engine.surface_mut();
            surface.push_content(300.0);
            surface.content_height()
        };
        engine.on_content_size_changed(grown);

        assert_eq!(engine.page_count(), 3);
    }

    #[test]
    fn test_flat_height_without_scroll_does_nothing() {
        let (mut engine, _clock) = engine_with(overflowing_surface());
        let spacers = engine.surface().spacer_layout();
        let height = engine.surface().content_height();

        engine.on_content_size_changed(height + 0.5);
        assert_eq!(engine.surface().spacer_layout(), spacers);
    }

    #[test]
    fn test_scroll_flag_expires_after_window() {
        let (mut engine, clock) = engine_with(overflowing_surface());
        clock.set(0.0);
        engine.on_user_scrolled();
        assert!(engine.state().user_recently_scrolled);

        clock.set(1000.0); // past the 500ms window
        assert!(!engine.scroll_window_active());
    }

    #[test]
    fn test_teardown_is_idempotent_and_disables_entry_points() {
        let (mut engine, _clock) = engine_with(overflowing_surface());
        assert!(!engine.surface().spacer_layout().is_empty());

        engine.teardown();
        assert!(engine.surface().spacer_layout().is_empty());

        engine.teardown();
        engine.recompute();
        engine.on_container_resized();
        assert!(engine.surface().spacer_layout().is_empty());
    }

    /// Drift scenario: zero-inset geometry so pushed elements land exactly on
    /// page tops, then shift content without changing total height.
    fn drift_fixture() -> (Paginator<MemorySurface>, ManualClock, NodeId, NodeId) {
        let options = PaginatorOptions {
            page_width: Length::Px(800.0),
            page_height: Length::Px(1000.0),
            page_inset: Length::Px(0.0),
            page_gap: Length::Px(0.0),
            ..PaginatorOptions::default()
        };
        let mut surface = MemorySurface::new();
        let lead = surface.push_content(980.0);
        surface.push_breakable(50.0);
        let tail = surface.push_content(600.0);

        let clock = ManualClock::new();
        let engine =
            Paginator::with_clock(surface, options, Box::new(clock.clone())).unwrap();
        // 980 + 50 → overflow at 1000, spacer of 20 pushes the element to
        // exactly the second page's top
        assert_eq!(engine.surface().spacer_layout(), vec![(1, 20.0)]);
        (engine, clock, lead, tail)
    }

    #[test]
    fn test_drift_beyond_threshold_forces_recompute() {
        let (mut engine, clock, lead, tail) = drift_fixture();

        clock.set(0.0);
        engine.on_user_scrolled();

        // Shift 2px of height from tail to lead: total height unchanged,
        // the pushed element now sits 2px past its page top
        let height = {
            let surface = engine.surface_mut();
            surface.set_height(lead, 982.0);
            surface.set_height(tail, 598.0);
            surface.content_height()
        };
        clock.set(100.0);
        engine.on_content_size_changed(height);

        // The recompute resized the spacer for the new layout
        assert_eq!(engine.surface().spacer_layout(), vec![(1, 18.0)]);
        assert!(!engine.state().user_recently_scrolled);
    }

    #[test]
    fn test_drift_within_threshold_only_clears_flag() {
        let (mut engine, clock, lead, tail) = drift_fixture();

        clock.set(0.0);
        engine.on_user_scrolled();

        let height = {
            let surface = engine.surface_mut();
            surface.set_height(lead, 980.5);
            surface.set_height(tail, 599.5);
            surface.content_height()
        };
        clock.set(100.0);
        engine.on_content_size_changed(height);

        assert_eq!(engine.surface().spacer_layout(), vec![(1, 20.0)]);
        assert!(!engine.state().user_recently_scrolled);
    }
}
