//! Run-loop lifecycle driver
//!
//! The cooperative state machine behind the platform loop, kept free of
//! any windowing or device types so its ordering guarantees can be
//! tested directly:
//!
//! - `on_init` runs exactly once, before the first frame
//! - events are dispatched synchronously, in arrival order, between frames
//! - `on_frame` runs once per iteration; the shutdown flag is checked
//!   once per iteration, after the frame callback
//! - `on_cleanup` runs exactly once, after the last frame

use tracing::debug;

use crate::core::event::Event;
use crate::shell::app::Application;
use crate::shell::context::AppContext;

/// Lifecycle phase of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Created, `on_init` not yet delivered
    Created,
    /// `on_init` delivered, loop running
    Running,
    /// `on_cleanup` delivered, no further callbacks
    Finished,
}

/// Drives an application's lifecycle callbacks in loop order.
pub struct LoopDriver<A: Application> {
    app: A,
    phase: Phase,
    frames: u64,
}

impl<A: Application> LoopDriver<A> {
    /// Wrap an application; no callback runs yet.
    pub fn new(app: A) -> Self {
        Self {
            app,
            phase: Phase::Created,
            frames: 0,
        }
    }

    /// Deliver `on_init`. Idempotent; only the first call reaches the app.
    pub fn startup(&mut self, ctx: &mut dyn AppContext) {
        if self.phase != Phase::Created {
            return;
        }
        debug!("Delivering on_init");
        self.app.on_init(ctx);
        self.phase = Phase::Running;
    }

    /// Dispatch one event to the application, synchronously.
    ///
    /// Returns whether the application consumed it. Events arriving
    /// before startup or after finish are dropped.
    pub fn dispatch(&mut self, ctx: &mut dyn AppContext, event: &mut dyn Event) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let consumed = self.app.on_event(ctx, event);
        event.set_handled(consumed);
        consumed
    }

    /// Run one frame.
    ///
    /// Delivers `on_frame`, then checks the shutdown flag once. Returns
    /// `true` when the loop should continue; `false` when shutdown was
    /// requested (no further frames will run). A no-op returning `false`
    /// before startup or after finish.
    pub fn frame(&mut self, ctx: &mut dyn AppContext) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.app.on_frame(ctx);
        self.frames += 1;
        !ctx.shutdown_requested()
    }

    /// Deliver `on_cleanup`. Idempotent; only the first call after
    /// startup reaches the app, and only ever once.
    pub fn finish(&mut self, ctx: &mut dyn AppContext) {
        if self.phase != Phase::Running {
            return;
        }
        debug!(frames = self.frames, "Delivering on_cleanup");
        self.app.on_cleanup(ctx);
        self.phase = Phase::Finished;
    }

    /// Number of frames delivered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{KeyCode, KeyEvent, PointerMoveEvent, WindowResizeEvent};
    use crate::gfx::BackendSelection;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Context stand-in with no window or devices behind it.
    struct MockContext {
        shutdown: bool,
    }

    impl MockContext {
        fn new() -> Self {
            Self { shutdown: false }
        }
    }

    impl AppContext for MockContext {
        fn backend(&self) -> BackendSelection {
            BackendSelection::GlCore33
        }

        fn surface_size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn set_clear_color(&mut self, _color: [f32; 4]) {}

        fn request_shutdown(&mut self) {
            self.shutdown = true;
        }

        fn shutdown_requested(&self) -> bool {
            self.shutdown
        }

        fn submit_audio(&mut self, samples: &[f32]) -> usize {
            samples.len()
        }

        fn sample_rate(&self) -> u32 {
            44100
        }

        fn channels(&self) -> u16 {
            2
        }
    }

    /// Records every callback invocation in order.
    struct RecordingApp {
        log: Rc<RefCell<Vec<String>>>,
        shutdown_on_frame: Option<u64>,
        consume_events: bool,
        frames_seen: u64,
    }

    impl RecordingApp {
        fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                log,
                shutdown_on_frame: None,
                consume_events: false,
                frames_seen: 0,
            }
        }
    }

    impl Application for RecordingApp {
        fn on_init(&mut self, _ctx: &mut dyn AppContext) {
            self.log.borrow_mut().push("init".to_string());
        }

        fn on_frame(&mut self, ctx: &mut dyn AppContext) {
            self.frames_seen += 1;
            self.log.borrow_mut().push(format!("frame{}", self.frames_seen));
            if self.shutdown_on_frame == Some(self.frames_seen) {
                ctx.request_shutdown();
            }
        }

        fn on_event(&mut self, _ctx: &mut dyn AppContext, event: &mut dyn crate::core::event::Event) -> bool {
            self.log.borrow_mut().push(format!("event:{}", event.detail()));
            self.consume_events
        }

        fn on_cleanup(&mut self, _ctx: &mut dyn AppContext) {
            self.log.borrow_mut().push("cleanup".to_string());
        }
    }

    #[test]
    fn test_init_runs_once_before_first_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        driver.startup(&mut ctx);
        driver.startup(&mut ctx); // second call must not reach the app
        assert!(driver.frame(&mut ctx));
        assert!(driver.frame(&mut ctx));

        assert_eq!(*log.borrow(), vec!["init", "frame1", "frame2"]);
    }

    #[test]
    fn test_frame_is_noop_before_startup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        assert!(!driver.frame(&mut ctx));
        assert!(log.borrow().is_empty());
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn test_events_dispatch_in_order_between_frames() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        driver.startup(&mut ctx);
        driver.frame(&mut ctx);

        let mut e1 = KeyEvent::pressed(KeyCode::W);
        let mut e2 = PointerMoveEvent::new(10.0, 20.0);
        let mut e3 = WindowResizeEvent::new(1024, 768);
        driver.dispatch(&mut ctx, &mut e1);
        driver.dispatch(&mut ctx, &mut e2);
        driver.dispatch(&mut ctx, &mut e3);

        driver.frame(&mut ctx);

        assert_eq!(
            *log.borrow(),
            vec![
                "init",
                "frame1",
                "event:KeyDown: W",
                "event:PointerMove: (10, 20)",
                "event:WindowResize: 1024x768",
                "frame2",
            ]
        );
    }

    #[test]
    fn test_shutdown_during_frame_stops_the_loop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = RecordingApp::new(log.clone());
        app.shutdown_on_frame = Some(2);
        let mut driver = LoopDriver::new(app);
        let mut ctx = MockContext::new();

        driver.startup(&mut ctx);
        assert!(driver.frame(&mut ctx));
        assert!(!driver.frame(&mut ctx)); // shutdown requested in this frame
        driver.finish(&mut ctx);

        // no further frames after finish
        assert!(!driver.frame(&mut ctx));

        assert_eq!(*log.borrow(), vec!["init", "frame1", "frame2", "cleanup"]);
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_cleanup_runs_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        driver.startup(&mut ctx);
        driver.frame(&mut ctx);
        driver.finish(&mut ctx);
        driver.finish(&mut ctx); // idempotent

        assert_eq!(*log.borrow(), vec!["init", "frame1", "cleanup"]);
    }

    #[test]
    fn test_cleanup_skipped_without_startup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        driver.finish(&mut ctx);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_events_dropped_outside_running_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = LoopDriver::new(RecordingApp::new(log.clone()));
        let mut ctx = MockContext::new();

        let mut early = KeyEvent::pressed(KeyCode::Escape);
        assert!(!driver.dispatch(&mut ctx, &mut early));
        assert!(log.borrow().is_empty());

        driver.startup(&mut ctx);
        driver.finish(&mut ctx);

        let mut late = KeyEvent::pressed(KeyCode::Escape);
        assert!(!driver.dispatch(&mut ctx, &mut late));
        assert_eq!(*log.borrow(), vec!["init", "cleanup"]);
    }

    #[test]
    fn test_dispatch_marks_consumed_events_handled() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = RecordingApp::new(log.clone());
        app.consume_events = true;
        let mut driver = LoopDriver::new(app);
        let mut ctx = MockContext::new();

        driver.startup(&mut ctx);

        let mut event = KeyEvent::pressed(KeyCode::Space);
        assert!(driver.dispatch(&mut ctx, &mut event));
        assert!(crate::core::event::Event::is_handled(&event));
    }
}
