//! End-to-end screen stack behavior: dialog completion plumbing and
//! screen ownership across push, pop, and switch.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use bower_core::{
    DialogResult, DrawContext, InputState, LayerFlags, Screen, ScreenCx, ScreenManager,
    testing::TestDraw,
};

/// A screen that can finish itself as a dialog and counts its own drop.
struct Dialog {
    finish_next_update: Option<DialogResult>,
    drops: Arc<AtomicUsize>,
}

impl Dialog {
    fn new(drops: &Arc<AtomicUsize>) -> Box<Self> {
        Box::new(Self {
            finish_next_update: None,
            drops: drops.clone(),
        })
    }

    fn finishing(result: DialogResult, drops: &Arc<AtomicUsize>) -> Box<Self> {
        Box::new(Self {
            finish_next_update: Some(result),
            drops: drops.clone(),
        })
    }
}

impl Screen for Dialog {
    fn update(&mut self, _input: &InputState, cx: &mut ScreenCx) {
        if let Some(result) = self.finish_next_update.take() {
            cx.finish_dialog(result);
        }
    }

    fn render(&mut self, _dc: &mut dyn DrawContext, _enabled: bool) {}

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Drop for Dialog {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// A screen that pushes another screen and then tries to finish itself as a
/// dialog, all within one update.
struct PushThenFinish {
    done: bool,
    drops: Arc<AtomicUsize>,
}

impl PushThenFinish {
    fn new(drops: &Arc<AtomicUsize>) -> Box<Self> {
        Box::new(Self {
            done: false,
            drops: drops.clone(),
        })
    }
}

impl Screen for PushThenFinish {
    fn update(&mut self, _input: &InputState, cx: &mut ScreenCx) {
        if !self.done {
            self.done = true;
            cx.push(Dialog::new(&self.drops));
            cx.finish_dialog(DialogResult::Ok);
        }
    }

    fn render(&mut self, _dc: &mut dyn DrawContext, _enabled: bool) {}

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Drop for PushThenFinish {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// A caller screen that records the dialog results it receives.
#[derive(Default)]
struct Caller {
    results: Vec<DialogResult>,
}

impl Screen for Caller {
    fn update(&mut self, _input: &InputState, _cx: &mut ScreenCx) {}

    fn render(&mut self, _dc: &mut dyn DrawContext, _enabled: bool) {}

    fn dialog_finished(&mut self, _dialog: &dyn Screen, result: DialogResult) {
        self.results.push(result);
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn caller_results(sm: &mut ScreenManager) -> Vec<DialogResult> {
    sm.top_mut()
        .and_then(|s| s.as_any_mut().downcast_mut::<Caller>())
        .map(|c| c.results.clone())
        .unwrap_or_default()
}

#[test]
fn dialog_result_reaches_the_caller_exactly_once() {
    init_tracing();
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();
    let mut dc = TestDraw::new();

    sm.push(Box::new(Caller::default()));
    sm.push_layer(
        Dialog::finishing(DialogResult::Ok, &drops),
        LayerFlags::TRANSPARENT,
    );

    // The dialog asks to finish during update.
    sm.update(&InputState::default());
    // Still on the stack through the frame that saw it finish.
    assert_eq!(sm.stack_size(), 2);
    assert_eq!(caller_results(&mut sm), vec![]);

    // Resolution happens after render: layer removed, dialog dropped,
    // caller notified once.
    sm.render(&mut dc);
    assert_eq!(sm.stack_size(), 1);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(caller_results(&mut sm), vec![DialogResult::Ok]);

    // Further frames deliver nothing more.
    sm.update(&InputState::default());
    sm.render(&mut dc);
    assert_eq!(caller_results(&mut sm), vec![DialogResult::Ok]);
}

#[test]
fn no_callback_when_the_caller_is_not_the_new_top() {
    init_tracing();
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();
    let mut dc = TestDraw::new();

    sm.push(Box::new(Caller::default()));
    sm.push_layer(
        Dialog::finishing(DialogResult::Cancel, &drops),
        LayerFlags::TRANSPARENT,
    );
    sm.update(&InputState::default());
    // Something lands on top before the finish resolves.
    sm.push(Dialog::new(&drops));

    sm.render(&mut dc);
    // The finished dialog is gone but its caller never hears about it.
    assert_eq!(sm.stack_size(), 2);
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    sm.pop();
    assert_eq!(caller_results(&mut sm), vec![]);
}

#[test]
fn push_on_an_empty_stack_resolves_the_pending_switch_first() {
    init_tracing();
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();

    sm.switch_screen(Dialog::new(&drops));
    sm.push(Dialog::new(&drops));
    // The staged screen became the bottom layer; the push landed on top.
    assert_eq!(sm.stack_size(), 2);

    sm.update(&InputState::default());
    assert_eq!(sm.stack_size(), 2);
    assert_eq!(drops.load(Ordering::SeqCst), 0);
}

#[test]
fn finish_from_a_screen_no_longer_on_top_is_ignored() {
    init_tracing();
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();
    let mut dc = TestDraw::new();

    sm.push(Box::new(Caller::default()));
    sm.push(PushThenFinish::new(&drops));

    // The push lands before the finish request is applied, so the finish
    // comes from a screen that is no longer on top and must be dropped.
    sm.update(&InputState::default());
    sm.render(&mut dc);

    assert_eq!(sm.stack_size(), 3);
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    sm.pop();
    sm.pop();
    assert_eq!(caller_results(&mut sm), vec![]);
}

#[test]
fn pop_drops_the_screen() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();

    sm.push(Dialog::new(&drops));
    sm.push(Dialog::new(&drops));
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    sm.pop();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(sm.stack_size(), 1);

    sm.shutdown();
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

#[test]
fn switch_replaces_and_drops_the_old_top() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut sm = ScreenManager::new();

    sm.switch_screen(Dialog::new(&drops));
    sm.update(&InputState::default());
    assert_eq!(sm.stack_size(), 1);

    sm.switch_screen(Dialog::new(&drops));
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    sm.update(&InputState::default());
    // Old top dropped at the switch boundary; stack depth unchanged.
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(sm.stack_size(), 1);
}
