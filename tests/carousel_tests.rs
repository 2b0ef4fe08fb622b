// Host-side tests for the carousel controller: layout, transitions and selection.

use carousel_core::*;
use glam::Vec2;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const OFFSCREEN: Vec2 = Vec2::new(-9999.0, -9999.0);

#[derive(Default)]
struct FakePanels {
    positions: HashMap<PanelHandle, Vec2>,
    cull: HashMap<PanelHandle, bool>,
}

impl FakePanels {
    fn new(handles: &[PanelHandle]) -> Self {
        Self {
            positions: handles.iter().map(|&h| (h, OFFSCREEN)).collect(),
            cull: handles.iter().map(|&h| (h, true)).collect(),
        }
    }

    fn at(&self, handle: PanelHandle) -> Vec2 {
        self.positions[&handle]
    }
}

impl PanelSurface for FakePanels {
    fn anchored_position(&self, panel: PanelHandle) -> Vec2 {
        self.positions[&panel]
    }

    fn set_anchored_position(&mut self, panel: PanelHandle, position: Vec2) {
        self.positions.insert(panel, position);
    }

    fn set_cull_transparent_mesh(&mut self, panel: PanelHandle, cull: bool) {
        self.cull.insert(panel, cull);
    }
}

fn handles(n: usize) -> Vec<PanelHandle> {
    (0..n).map(|i| PanelHandle(i as u32)).collect()
}

fn make_carousel(n: usize, spacing: f32, alignment: Vec2) -> (CarouselController, FakePanels) {
    let panels = handles(n);
    let mut surface = FakePanels::new(&panels);
    let bindings = CarouselBindings::new(panels)
        .with_container(ContainerHandle(1))
        .with_mask(MaskHandle(2));
    let config = CarouselConfig::default()
        .with_panel_spacing(spacing)
        .with_alignment(alignment.x, alignment.y);
    let mut carousel = CarouselController::with_tween_engine(bindings, config).unwrap();
    carousel.start(&mut surface);
    (carousel, surface)
}

fn run_for(carousel: &mut CarouselController, surface: &mut FakePanels, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        carousel.update(FRAME, surface);
        elapsed += FRAME;
    }
}

fn settle(carousel: &mut CarouselController, surface: &mut FakePanels) {
    let slide = carousel.config().slide_duration;
    run_for(carousel, surface, slide);
    assert!(!carousel.is_transitioning(), "slide should have settled");
}

fn assert_at_rest(carousel: &CarouselController, surface: &FakePanels) {
    let current = carousel.current_index();
    let alignment = carousel.alignment();
    let spacing = carousel.config().panel_spacing;
    for (i, &h) in carousel.panels().iter().enumerate() {
        let expected = Vec2::new(
            alignment.x + (i as f32 - current as f32) * spacing,
            alignment.y,
        );
        let got = surface.at(h);
        assert!(
            (got - expected).abs().max_element() < 1e-3,
            "panel {i}: expected {expected:?}, got {got:?}"
        );
    }
}

#[test]
fn start_lays_out_every_panel_around_the_alignment() {
    for n in 1..=6 {
        let (carousel, surface) = make_carousel(n, 320.0, Vec2::new(12.0, -7.5));
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_transitioning());
        assert_at_rest(&carousel, &surface);
    }
}

#[test]
fn start_disables_culling_when_mask_is_bound() {
    let (_carousel, surface) = make_carousel(4, 100.0, Vec2::ZERO);
    assert!(surface.cull.values().all(|&cull| !cull));
}

#[test]
fn start_forces_index_zero_even_if_configured_otherwise() {
    let panels = handles(3);
    let mut surface = FakePanels::new(&panels);
    let config = CarouselConfig {
        initial_index: 2,
        ..CarouselConfig::default()
    };
    let bindings = CarouselBindings::new(panels).with_container(ContainerHandle(0));
    let mut carousel = CarouselController::with_tween_engine(bindings, config).unwrap();
    carousel.start(&mut surface);
    assert_eq!(carousel.current_index(), 0);
    assert_at_rest(&carousel, &surface);
}

#[test]
fn three_panel_slide_matches_worked_example() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    let xs: Vec<f32> = carousel.panels().iter().map(|&h| surface.at(h).x).collect();
    assert_eq!(xs, vec![0.0, 1000.0, 2000.0]);

    let outcome = carousel.on_panel_clicked(2, &mut surface).unwrap();
    assert_eq!(
        outcome,
        ClickOutcome::Transition(TransitionOutcome::Started { from: 0, to: 2 })
    );
    assert!(carousel.is_transitioning());
    assert_eq!(carousel.current_index(), 0);

    settle(&mut carousel, &mut surface);
    let xs: Vec<f32> = carousel.panels().iter().map(|&h| surface.at(h).x).collect();
    assert_eq!(xs, vec![-2000.0, -1000.0, 0.0]);
    assert_eq!(carousel.current_index(), 2);
    assert_at_rest(&carousel, &surface);
}

#[test]
fn panels_keep_their_spacing_mid_slide() {
    let (mut carousel, mut surface) = make_carousel(4, 250.0, Vec2::new(0.0, 30.0));
    carousel.on_panel_clicked(3, &mut surface).unwrap();
    for _ in 0..10 {
        carousel.update(FRAME, &mut surface);
        let panels = carousel.panels();
        for pair in panels.windows(2) {
            let gap = surface.at(pair[1]).x - surface.at(pair[0]).x;
            assert!((gap - 250.0).abs() < 1e-2, "gap drifted to {gap}");
            assert_eq!(surface.at(pair[0]).y, 30.0);
        }
    }
}

#[test]
fn reclick_notifies_listeners_without_moving_anything() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    carousel.on_panel_clicked(1, &mut surface).unwrap();
    settle(&mut carousel, &mut surface);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_a = seen.clone();
    let seen_b = seen.clone();
    carousel.on_selected_panel_clicked(move |i| seen_a.borrow_mut().push(i));
    carousel.on_selected_panel_clicked(move |i| seen_b.borrow_mut().push(i + 100));

    let before: Vec<Vec2> = carousel.panels().iter().map(|&h| surface.at(h)).collect();
    let outcome = carousel.on_panel_clicked(1, &mut surface).unwrap();
    assert_eq!(outcome, ClickOutcome::Reselected(1));
    assert_eq!(*seen.borrow(), vec![1, 101]);
    assert_eq!(carousel.current_index(), 1);
    assert!(!carousel.is_transitioning());

    carousel.update(FRAME, &mut surface);
    let after: Vec<Vec2> = carousel.panels().iter().map(|&h| surface.at(h)).collect();
    assert_eq!(before, after);
}

#[test]
fn requesting_the_current_index_never_starts_a_slide() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    let outcome = carousel.request_transition(0, &mut surface).unwrap();
    assert_eq!(outcome, TransitionOutcome::AlreadySelected);
    assert!(!carousel.is_transitioning());
    assert!(carousel.animator().is_idle());
    assert_at_rest(&carousel, &surface);
}

#[test]
fn second_request_during_a_slide_is_dropped() {
    let (mut carousel, mut surface) = make_carousel(4, 500.0, Vec2::ZERO);
    let first = carousel.request_transition(1, &mut surface).unwrap();
    let second = carousel.request_transition(2, &mut surface).unwrap();
    assert_eq!(first, TransitionOutcome::Started { from: 0, to: 1 });
    assert_eq!(second, TransitionOutcome::Ignored);

    // also dropped through the click path
    let third = carousel.on_panel_clicked(3, &mut surface).unwrap();
    assert_eq!(third, ClickOutcome::Transition(TransitionOutcome::Ignored));

    let slide = carousel.config().slide_duration;
    run_for(&mut carousel, &mut surface, slide * 2);
    assert_eq!(carousel.current_index(), 1);
    assert!(!carousel.is_transitioning());
    assert_at_rest(&carousel, &surface);
}

#[test]
fn commit_happens_once_and_never_before_the_slide_duration() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    carousel.request_transition(2, &mut surface).unwrap();

    let step = Duration::from_millis(100);
    let mut elapsed = Duration::ZERO;
    let mut commits = Vec::new();
    for _ in 0..10 {
        let committed = carousel.update(step, &mut surface);
        elapsed += step;
        if let Some(i) = committed {
            commits.push((i, elapsed));
        }
        if elapsed < carousel.config().slide_duration {
            assert!(carousel.is_transitioning(), "committed early at {elapsed:?}");
        } else {
            assert!(!carousel.is_transitioning());
        }
    }
    assert_eq!(commits, vec![(2, Duration::from_millis(500))]);
}

#[test]
fn repeated_slides_restore_the_layout_invariant() {
    let (mut carousel, mut surface) = make_carousel(4, -250.0, Vec2::new(40.0, -10.0));
    for target in [2, 0, 3, 1, 3] {
        carousel.on_panel_clicked(target, &mut surface).unwrap();
        settle(&mut carousel, &mut surface);
        assert_eq!(carousel.current_index(), target);
        assert_at_rest(&carousel, &surface);
    }
}

#[test]
fn realigning_while_idle_moves_panels_immediately() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    carousel.on_panel_clicked(1, &mut surface).unwrap();
    settle(&mut carousel, &mut surface);

    let result = carousel.set_alignment_position(100.0, 50.0, &mut surface).unwrap();
    assert_eq!(result, Realignment::Applied);
    assert_eq!(surface.at(PanelHandle(1)), Vec2::new(100.0, 50.0));
    assert_eq!(surface.at(PanelHandle(0)), Vec2::new(-900.0, 50.0));
    assert_eq!(surface.at(PanelHandle(2)), Vec2::new(1100.0, 50.0));
    assert_eq!(carousel.current_index(), 1);
    assert!(!carousel.is_transitioning());
}

#[test]
fn realigning_mid_slide_applies_from_the_next_slide() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    carousel.on_panel_clicked(1, &mut surface).unwrap();
    carousel.update(FRAME, &mut surface);

    let result = carousel.set_alignment_position(100.0, 50.0, &mut surface).unwrap();
    assert_eq!(result, Realignment::Deferred);
    assert_eq!(carousel.alignment(), Vec2::new(100.0, 50.0));

    // in-flight slide keeps its original targets
    settle(&mut carousel, &mut surface);
    assert_eq!(surface.at(PanelHandle(1)), Vec2::new(0.0, 0.0));

    carousel.on_panel_clicked(2, &mut surface).unwrap();
    settle(&mut carousel, &mut surface);
    assert_eq!(carousel.current_index(), 2);
    assert_eq!(surface.at(PanelHandle(2)), Vec2::new(100.0, 50.0));
    assert_at_rest(&carousel, &surface);
}

#[test]
fn handles_map_to_their_setup_index() {
    let panels = vec![PanelHandle(40), PanelHandle(10), PanelHandle(25)];
    let mut surface = FakePanels::new(&panels);
    let bindings = CarouselBindings::new(panels.clone()).with_container(ContainerHandle(0));
    let mut carousel =
        CarouselController::with_tween_engine(bindings, CarouselConfig::default()).unwrap();
    carousel.start(&mut surface);

    assert_eq!(carousel.index_of(PanelHandle(10)), Some(1));
    let outcome = carousel
        .on_panel_activated(PanelHandle(25), &mut surface)
        .unwrap();
    assert_eq!(
        outcome,
        ClickOutcome::Transition(TransitionOutcome::Started { from: 0, to: 2 })
    );

    let err = carousel
        .on_panel_activated(PanelHandle(99), &mut surface)
        .unwrap_err();
    assert_eq!(err, CarouselError::UnknownPanel(PanelHandle(99)));
}

#[test]
fn out_of_range_index_is_rejected_without_state_change() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    let err = carousel.on_panel_clicked(3, &mut surface).unwrap_err();
    assert_eq!(err, CarouselError::IndexOutOfRange { index: 3, count: 3 });
    assert!(!carousel.is_transitioning());
    assert_eq!(carousel.current_index(), 0);
    assert_at_rest(&carousel, &surface);
}

#[test]
fn construction_validates_bindings_and_settings() {
    let empty = CarouselController::with_tween_engine(
        CarouselBindings::new(Vec::new()),
        CarouselConfig::default(),
    );
    assert_eq!(empty.err(), Some(CarouselError::NoPanels));

    let dup = CarouselController::with_tween_engine(
        CarouselBindings::new(vec![PanelHandle(1), PanelHandle(1)]),
        CarouselConfig::default(),
    );
    assert_eq!(dup.err(), Some(CarouselError::DuplicatePanel(PanelHandle(1))));

    let zero = CarouselController::with_tween_engine(
        CarouselBindings::new(handles(2)),
        CarouselConfig::default().with_slide_duration(Duration::ZERO),
    );
    assert!(matches!(
        zero.err(),
        Some(CarouselError::InvalidSetting {
            name: "slide_duration",
            ..
        })
    ));

    let nan = CarouselController::with_tween_engine(
        CarouselBindings::new(handles(2)),
        CarouselConfig::default().with_panel_spacing(f32::NAN),
    );
    assert!(matches!(
        nan.err(),
        Some(CarouselError::InvalidSetting {
            name: "panel_spacing",
            ..
        })
    ));
}

#[test]
fn non_finite_alignment_is_rejected() {
    let (mut carousel, mut surface) = make_carousel(2, 100.0, Vec2::ZERO);
    let err = carousel
        .set_alignment_position(f32::INFINITY, 0.0, &mut surface)
        .unwrap_err();
    assert!(matches!(err, CarouselError::InvalidSetting { name: "alignment", .. }));
    assert_eq!(carousel.alignment(), Vec2::ZERO);
}

#[test]
fn missing_container_and_mask_leave_host_state_alone() {
    let panels = handles(3);
    let mut surface = FakePanels::new(&panels);
    surface.set_anchored_position(PanelHandle(0), Vec2::new(5.0, 5.0));
    surface.set_anchored_position(PanelHandle(1), Vec2::new(105.0, 5.0));
    surface.set_anchored_position(PanelHandle(2), Vec2::new(205.0, 5.0));
    let config = CarouselConfig::default().with_panel_spacing(100.0);
    let mut carousel =
        CarouselController::with_tween_engine(CarouselBindings::new(panels), config).unwrap();
    carousel.start(&mut surface);

    assert_eq!(surface.at(PanelHandle(1)), Vec2::new(105.0, 5.0));
    assert!(surface.cull.values().all(|&cull| cull));

    // slides stay relative to wherever the host placed the panels
    carousel.on_panel_clicked(2, &mut surface).unwrap();
    settle(&mut carousel, &mut surface);
    assert_eq!(surface.at(PanelHandle(0)), Vec2::new(-195.0, 5.0));
    assert_eq!(surface.at(PanelHandle(2)), Vec2::new(5.0, 5.0));
}

#[test]
fn reclick_during_slide_notifies_and_keeps_the_slide() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    carousel.on_selected_panel_clicked(move |i| sink.borrow_mut().push(i));

    carousel.on_panel_clicked(1, &mut surface).unwrap();
    carousel.update(FRAME, &mut surface);

    // panel 0 is still the committed selection while the slide runs
    let outcome = carousel.on_panel_clicked(0, &mut surface).unwrap();
    assert_eq!(outcome, ClickOutcome::Reselected(0));
    assert_eq!(*seen.borrow(), vec![0]);
    assert!(carousel.is_transitioning());

    settle(&mut carousel, &mut surface);
    assert_eq!(carousel.current_index(), 1);
    assert_at_rest(&carousel, &surface);
}

#[test]
fn restarting_mid_slide_cancels_the_running_slide() {
    let (mut carousel, mut surface) = make_carousel(3, 1000.0, Vec2::ZERO);
    carousel.on_panel_clicked(2, &mut surface).unwrap();
    carousel.update(FRAME, &mut surface);

    carousel.start(&mut surface);
    assert_eq!(carousel.current_index(), 0);
    assert!(!carousel.is_transitioning());
    assert!(carousel.animator().is_idle());
    assert_at_rest(&carousel, &surface);

    run_for(&mut carousel, &mut surface, Duration::from_secs(1));
    assert_eq!(carousel.current_index(), 0);
    assert_at_rest(&carousel, &surface);
}

#[test]
fn configured_easing_drives_the_slide() {
    let panels = handles(2);
    let mut surface = FakePanels::new(&panels);
    let bindings = CarouselBindings::new(panels).with_container(ContainerHandle(0));
    let config = CarouselConfig::default()
        .with_slide_duration(Duration::from_secs(1))
        .with_slide_easing(Easing::Linear);
    let mut carousel = CarouselController::with_tween_engine(bindings, config).unwrap();
    carousel.start(&mut surface);

    carousel.on_panel_clicked(1, &mut surface).unwrap();
    carousel.update(Duration::from_millis(250), &mut surface);
    assert!((surface.at(PanelHandle(0)).x + 250.0).abs() < 1e-3);
    assert!((surface.at(PanelHandle(1)).x - 750.0).abs() < 1e-3);
}
