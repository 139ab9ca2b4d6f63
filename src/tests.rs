use crate::{
    clicker::EngineState,
    controller::{CaptureMode, Controller},
    platform::{FakePointer, PointerEvent},
    settings::{Settings, SettingsStore, SETTINGS_DIR_NAME},
    timer::RepeatingTimer,
};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};

fn controller_at(x: i32, y: i32) -> Controller<FakePointer> {
    Controller::new(FakePointer::at(x, y))
}

#[test]
fn test_first_start_uses_defaults_and_creates_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(tmp.path().join(SETTINGS_DIR_NAME));
    let mut c = controller_at(0, 0);

    c.load(&store);
    assert!(store.dir().is_dir());
    assert_eq!(c.settings().min_delay_ms, 1400);
    assert_eq!(c.settings().max_delay_ms, 1600);
    assert_eq!(c.settings(), &Settings::default());
    assert_eq!(c.form.min_delay, "1400");
}

#[test]
fn test_corrupt_file_keeps_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(tmp.path());
    std::fs::write(store.path(), "{\"MIN_DELAY\": ").unwrap();
    let mut c = controller_at(0, 0);

    c.load(&store);
    assert_eq!(c.settings(), &Settings::default());
}

#[test]
fn test_settings_survive_a_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(tmp.path());

    let mut first = controller_at(640, 480);
    first.handle_key("end");
    first.arm_toggle_rebind();
    first.handle_key("f8");
    first.form.min_delay = "20".into();
    first.form.max_delay = "40".into();
    assert!(first.commit_form());
    first.save(&store);

    let mut second = controller_at(0, 0);
    second.load(&store);
    assert_eq!(second.settings(), first.settings());
    assert_eq!(second.form.mark_x, "640");
}

#[test]
fn test_toggle_key_starts_clicking() {
    let mut c = controller_at(0, 0);
    c.handle_key("page up");

    assert_eq!(c.state(), EngineState::Active);
    assert_eq!(c.button_label(), "Stop");
    assert!(c.title().ends_with("*active*"));

    c.handle_key("page up");
    assert_eq!(c.state(), EngineState::Idle);
    assert_eq!(c.button_label(), "Start");
    assert!(!c.title().contains("*active*"));
}

#[test]
fn test_mark_key_records_cursor() {
    let mut c = controller_at(-1280, 1337);
    c.handle_key("end");

    assert_eq!((c.settings().mark_x, c.settings().mark_y), (-1280, 1337));
    assert_eq!(c.form.mark_x, "-1280");
    assert_eq!(c.form.mark_y, "1337");
}

#[test]
fn test_inverted_delays_are_rejected() {
    let mut c = controller_at(0, 0);
    c.form.min_delay = "2000".into();
    c.form.max_delay = "1000".into();
    c.form.mark_x = "55".into();

    c.handle_key("enter");
    assert_eq!(c.error(), "The min/max is incorrect!");
    assert_eq!(c.settings(), &Settings::default());
}

#[test]
fn test_rebind_does_not_trigger_old_action() {
    let mut c = controller_at(0, 0);
    c.arm_toggle_rebind();
    assert_eq!(c.mode(), CaptureMode::AwaitingToggleKey);

    c.handle_key("f6");
    assert_eq!(c.settings().toggle_key, "f6");
    assert_eq!(c.mode(), CaptureMode::Normal);
    assert_eq!(c.state(), EngineState::Idle);

    // old binding is dead, new one toggles
    c.handle_key("page up");
    assert_eq!(c.state(), EngineState::Idle);
    c.handle_key("f6");
    assert_eq!(c.state(), EngineState::Active);
}

#[test]
fn test_timer_chain_clicks_only_while_active() {
    let mut c = controller_at(0, 0);
    c.form.min_delay = "10".into();
    c.form.max_delay = "20".into();
    c.form.mark_x = "300".into();
    c.form.mark_y = "200".into();
    c.form.jitter_width = "4".into();
    c.form.jitter_height = "2".into();
    assert!(c.commit_form());

    let mut rng = StdRng::seed_from_u64(11);
    let t0 = Instant::now();
    let mut timer = RepeatingTimer::start(t0);
    let handle = timer.handle();

    let mut now = t0;
    let mut ticks = 0;
    let mut last_due = t0;
    while ticks < 200 {
        if timer.run_due(now, || c.tick(&mut rng)) {
            ticks += 1;
            let due = timer.next_due().unwrap();
            let gap = due - now;
            assert!(gap >= Duration::from_millis(10) && gap <= Duration::from_millis(20));
            last_due = due;
            if ticks == 100 {
                c.toggle();
            }
        }
        now += Duration::from_millis(1);
    }
    handle.stop();
    assert!(!timer.run_due(last_due, || c.tick(&mut rng)));

    let downs: Vec<_> = c
        .pointer()
        .events()
        .into_iter()
        .filter_map(|e| match e {
            PointerEvent::Down(x, y) => Some((x, y)),
            _ => None,
        })
        .collect();
    assert_eq!(downs.len(), 100);
    for (x, y) in downs {
        assert!((296..=304).contains(&x));
        assert!((198..=202).contains(&y));
    }
}
