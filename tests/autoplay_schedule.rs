//! Autoplay cadence against a simulated millisecond clock.

use carousel_core_view::{
    Carousel, CarouselConfig, IgnoreReason, IntervalTimer, MemoryView, Navigation,
};

struct Armed {
    id: u64,
    interval: u64,
    due: u64,
}

/// Virtual clock with `setInterval`-like timers.
#[derive(Default)]
struct SimTimers {
    now: u64,
    next_id: u64,
    armed: Vec<Armed>,
}

impl IntervalTimer for SimTimers {
    type Handle = u64;

    fn start_interval(&mut self, interval_ms: u32) -> u64 {
        self.next_id += 1;
        self.armed.push(Armed {
            id: self.next_id,
            interval: interval_ms as u64,
            due: self.now + interval_ms as u64,
        });
        self.next_id
    }

    fn cancel_interval(&mut self, handle: u64) {
        self.armed.retain(|armed| armed.id != handle);
    }
}

struct Sim {
    carousel: Carousel<u64>,
    view: MemoryView,
    timers: SimTimers,
    /// (time, outcome) of every autoplay firing
    fired: Vec<(u64, Navigation)>,
}

impl Sim {
    fn new(slides: usize, config: &CarouselConfig) -> Self {
        let mut sim = Self {
            carousel: Carousel::new(slides, config),
            view: MemoryView::default(),
            timers: SimTimers::default(),
            fired: Vec::new(),
        };
        sim.carousel.mount(&mut sim.view);
        sim.carousel.start_autoplay(&mut sim.timers);
        sim
    }

    /// Advance the clock to `end`, firing timers and refreshing every 16ms.
    fn run_until(&mut self, end: u64) {
        while self.timers.now < end {
            self.timers.now += 1;
            let now = self.timers.now;

            let due: Vec<u64> = self
                .timers
                .armed
                .iter_mut()
                .filter(|armed| armed.due == now)
                .map(|armed| {
                    armed.due += armed.interval;
                    armed.id
                })
                .collect();
            for _ in due {
                let outcome = self.carousel.autoplay_fired(now as f64, &mut self.view);
                self.fired.push((now, outcome));
            }

            if now % 16 == 0 {
                self.carousel.advance_frame(now as f64, &mut self.view);
            }
        }
    }

    fn fire_times(&self) -> Vec<u64> {
        self.fired.iter().map(|(time, _)| *time).collect()
    }
}

fn config() -> CarouselConfig {
    CarouselConfig::default()
        .with_transition_ms(500)
        .with_autoplay_interval_ms(2000)
}

#[test]
fn fires_next_every_interval_with_wraparound() {
    let mut sim = Sim::new(3, &config());
    sim.run_until(8_600);

    assert_eq!(sim.fire_times(), vec![2000, 4000, 6000, 8000]);
    let targets: Vec<_> = sim
        .fired
        .iter()
        .map(|(_, outcome)| match outcome {
            Navigation::Started { to, .. } => *to,
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect();
    assert_eq!(targets, vec![1, 2, 0, 1]);

    assert_eq!(sim.carousel.settled_index(), 1);
    assert_eq!(sim.view.offset, 100.0);
    assert_eq!(sim.view.active_indicators(), vec![1]);
}

#[test]
fn hover_restarts_with_fresh_interval() {
    let mut sim = Sim::new(3, &config());
    sim.run_until(2_500);

    sim.carousel.pointer_entered(&mut sim.timers);
    assert!(sim.timers.armed.is_empty());
    sim.run_until(7_000);

    sim.carousel.pointer_left(&mut sim.timers);
    assert_eq!(sim.timers.armed.len(), 1);
    sim.run_until(11_500);

    // Nothing while hovered, then a full interval after leaving
    assert_eq!(sim.fire_times(), vec![2000, 9000, 11000]);
    assert_eq!(sim.timers.armed.len(), 1);
}

#[test]
fn repeated_leave_does_not_stack_timers() {
    let mut sim = Sim::new(3, &config());
    sim.run_until(1_000);

    sim.carousel.pointer_entered(&mut sim.timers);
    sim.carousel.pointer_left(&mut sim.timers);
    sim.carousel.pointer_left(&mut sim.timers);
    sim.carousel.visibility_changed(true, &mut sim.timers);
    sim.run_until(5_500);

    assert_eq!(sim.timers.armed.len(), 1);
    assert_eq!(sim.fire_times(), vec![3000, 5000]);
}

#[test]
fn hidden_page_pauses_autoplay() {
    let mut sim = Sim::new(4, &config());
    sim.run_until(1_500);

    sim.carousel.visibility_changed(false, &mut sim.timers);
    sim.run_until(10_000);
    assert!(sim.fired.is_empty());

    sim.carousel.visibility_changed(true, &mut sim.timers);
    sim.run_until(12_000);
    assert_eq!(sim.fire_times(), vec![12000]);
}

#[test]
fn disabled_autoplay_never_fires() {
    let config = config().with_autoplay(false);
    let mut sim = Sim::new(3, &config);

    sim.carousel.pointer_entered(&mut sim.timers);
    sim.carousel.pointer_left(&mut sim.timers);
    sim.carousel.visibility_changed(false, &mut sim.timers);
    sim.carousel.visibility_changed(true, &mut sim.timers);
    sim.run_until(20_000);

    assert_eq!(sim.timers.next_id, 0);
    assert!(sim.fired.is_empty());
}

#[test]
fn firing_during_transition_is_ignored() {
    // Transition outlasts the interval
    let config = CarouselConfig::default()
        .with_transition_ms(1_500)
        .with_autoplay_interval_ms(1_000);
    let mut sim = Sim::new(3, &config);
    sim.run_until(2_200);

    assert_eq!(sim.fired.len(), 2);
    assert!(sim.fired[0].1.is_started());
    assert_eq!(
        sim.fired[1].1,
        Navigation::Ignored(IgnoreReason::Transitioning)
    );
    assert_eq!(sim.carousel.current_index(), 1);
}

#[test]
fn teardown_cancels_timer() {
    let mut sim = Sim::new(3, &config());
    sim.run_until(2_100);
    assert!(sim.carousel.is_transitioning());

    sim.carousel.teardown(&mut sim.timers, &mut sim.view);
    assert!(sim.timers.armed.is_empty());
    assert_eq!(sim.view.offset, 100.0);
    assert!(!sim.view.controls_enabled);

    sim.run_until(10_000);
    assert_eq!(sim.fire_times(), vec![2000]);
}
