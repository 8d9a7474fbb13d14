//! [`DisplaySurface`]: an owned window with borderless full-screen toggling.
//!
//! # Full-screen model
//!
//! Full-screen is a borderless window covering the nearest monitor, not
//! DXGI exclusive mode.  Exclusive mode needs a display mode that exactly
//! matches a supported resolution and refresh rate, can blank the other
//! monitors, locks the cursor to the display and fails outright when the
//! rendering GPU is not wired to the display (hybrid laptops).  With a
//! flip-model swap chain the borderless window still reaches full frame
//! rates.
//!
//! Going full-screen snapshots the window bounds, strips the decorations,
//! covers the monitor the window overlaps most and shows it maximized.
//! Going back restores the decorated style and the snapshot.
//!
//! # Threading
//!
//! All calls must come from the thread that owns the window's message
//! loop.  Nothing here is synchronized.

use crate::backend::DisplayBackend;
use crate::config::{validate_client_size, SurfaceConfig};
use crate::errors::SurfaceError;
use crate::geometry::{centered_origin, Point, Rect};
use crate::registration::ClassAtom;
use crate::style::{ShowCommand, WindowStyle, ZOrder};

/// Outer window rectangle for a `width` x `height` client area in the
/// default decorated style, centred on the primary display.
///
/// Fails with [`SurfaceError::Config`] when the framed window does not fit
/// in screen coordinates.
pub fn initial_window_rect<B: DisplayBackend>(
    backend: &B,
    width: u32,
    height: u32,
) -> Result<Rect, SurfaceError> {
    let too_large =
        || SurfaceError::Config(format!("client size {width}x{height} too large for a window"));

    let client = Rect::new(
        0,
        0,
        i32::try_from(width).map_err(|_| too_large())?,
        i32::try_from(height).map_err(|_| too_large())?,
    );
    let outer = backend
        .adjust_window_rect(client, WindowStyle::OVERLAPPED_WINDOW)
        .checked_size()
        .ok_or_else(too_large)?;
    let origin = centered_origin(backend.primary_display_size(), outer);
    if origin.x.checked_add(outer.width).is_none()
        || origin.y.checked_add(outer.height).is_none()
    {
        return Err(too_large());
    }
    Ok(Rect::from_origin_size(origin, outer))
}

/// An OS window plus its full-screen state.
///
/// The window is owned: dropping the surface destroys it.
#[derive(Debug)]
pub struct DisplaySurface<B: DisplayBackend> {
    backend: B,
    window: B::Window,
    /// Bounds to restore when leaving full-screen.
    windowed_rect: Rect,
    fullscreen: bool,
}

impl<B: DisplayBackend> DisplaySurface<B> {
    /// Register the window class (once per process) through `backend`.
    pub fn register_window_class(backend: &mut B) -> Result<ClassAtom, SurfaceError> {
        backend.register_window_class()
    }

    /// Create a centred, decorated window whose client area is exactly
    /// `width` x `height`.
    pub fn create(
        mut backend: B,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Self, SurfaceError> {
        validate_client_size(width, height)?;
        backend.register_window_class()?;

        let frame = initial_window_rect(&backend, width, height)?;
        log::debug!("creating window {title:?}: client {width}x{height}, frame {frame:?}");

        let window = backend.create_window(title, WindowStyle::OVERLAPPED_WINDOW, frame)?;

        let windowed_rect = match backend.window_rect(window) {
            Some(rect) if !rect.is_degenerate() => rect,
            _ => {
                log::warn!("window bounds query failed after creation; using requested frame");
                frame
            }
        };

        Ok(Self {
            backend,
            window,
            windowed_rect,
            fullscreen: false,
        })
    }

    /// Create from a validated [`SurfaceConfig`], entering full-screen if
    /// the config asks for it.
    pub fn from_config(backend: B, config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        config.validate()?;
        let mut surface = Self::create(backend, &config.title, config.width, config.height)?;
        if config.fullscreen {
            surface.set_fullscreen(true);
        }
        Ok(surface)
    }

    pub fn window(&self) -> B::Window {
        self.window
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Bounds the window returns to when leaving full-screen.
    pub fn windowed_rect(&self) -> Rect {
        self.windowed_rect
    }

    pub fn show(&mut self) {
        self.backend.show_window(self.window, ShowCommand::Show);
    }

    /// Switch between borderless full-screen and the decorated window.
    ///
    /// Does nothing when `fullscreen` equals the current state.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }
        self.fullscreen = fullscreen;

        if fullscreen {
            self.enter_fullscreen();
        } else {
            self.leave_fullscreen();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.set_fullscreen(!self.fullscreen);
    }

    fn enter_fullscreen(&mut self) {
        match self.backend.window_rect(self.window) {
            Some(rect) if !rect.is_degenerate() => self.windowed_rect = rect,
            other => log::warn!(
                "window bounds unavailable ({other:?}); keeping {:?} for restore",
                self.windowed_rect
            ),
        }

        // Best effort: the transition continues if the style is rejected.
        if !self
            .backend
            .set_window_style(self.window, WindowStyle::borderless())
        {
            log::warn!("failed to apply borderless style to {:?}", self.window);
        }

        let monitor = self.backend.monitor_rect(self.window).unwrap_or_else(|| {
            let primary = self.backend.primary_display_size();
            log::warn!("monitor lookup failed; covering primary display {primary:?}");
            Rect::from_origin_size(Point::default(), primary)
        });

        if !self
            .backend
            .set_window_pos(self.window, ZOrder::Top, monitor)
        {
            log::warn!("failed to move {:?} over monitor {monitor:?}", self.window);
        }
        self.backend.show_window(self.window, ShowCommand::Maximize);

        log::info!("entered borderless full-screen on monitor {monitor:?}");
    }

    fn leave_fullscreen(&mut self) {
        if !self
            .backend
            .set_window_style(self.window, WindowStyle::OVERLAPPED_WINDOW)
        {
            log::warn!("failed to restore window decorations on {:?}", self.window);
        }

        let rect = self.windowed_rect;
        if !self
            .backend
            .set_window_pos(self.window, ZOrder::NoTopmost, rect)
        {
            log::warn!("failed to restore {:?} to {rect:?}", self.window);
        }
        self.backend.show_window(self.window, ShowCommand::Normal);

        log::info!("left full-screen; restored {rect:?}");
    }
}

impl<B: DisplayBackend> Drop for DisplaySurface<B> {
    fn drop(&mut self) {
        self.backend.destroy_window(self.window);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Size;
    use crate::registration::ClassRegistrar;

    /// Frame thickness the fake adds around the client area.
    const INSET_LEFT: i32 = 8;
    const INSET_TOP: i32 = 31;
    const INSET_RIGHT: i32 = 8;
    const INSET_BOTTOM: i32 = 8;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        RegisterClass,
        Create(Rect),
        SetStyle(WindowStyle),
        SetPos(ZOrder, Rect),
        Show(ShowCommand),
        Destroy,
    }

    #[derive(Debug, Default)]
    struct FakeState {
        calls: Vec<Call>,
        registrations: usize,
        rect: Rect,
        style: WindowStyle,
        fail_create: bool,
        fail_window_rect: bool,
        fail_style: bool,
        fail_monitor: bool,
    }

    #[derive(Debug, Clone)]
    struct FakeBackend {
        display: Size,
        monitors: Vec<Rect>,
        registrar: Rc<ClassRegistrar>,
        state: Rc<RefCell<FakeState>>,
    }

    impl FakeBackend {
        fn new(display: Size) -> Self {
            Self {
                display,
                monitors: vec![Rect::from_origin_size(Point::default(), display)],
                registrar: Rc::new(ClassRegistrar::new()),
                state: Rc::default(),
            }
        }

        fn with_monitor(mut self, monitor: Rect) -> Self {
            self.monitors.push(monitor);
            self
        }

        fn client_size(&self) -> Size {
            let rect = self.state.borrow().rect;
            Size::new(
                rect.width() - INSET_LEFT - INSET_RIGHT,
                rect.height() - INSET_TOP - INSET_BOTTOM,
            )
        }

        fn calls(&self) -> Vec<Call> {
            self.state.borrow().calls.clone()
        }

        fn clear_calls(&self) {
            self.state.borrow_mut().calls.clear();
        }

        /// Simulate the user dragging the window.
        fn move_window(&self, rect: Rect) {
            self.state.borrow_mut().rect = rect;
        }
    }

    impl DisplayBackend for FakeBackend {
        type Window = u32;

        fn register_window_class(&mut self) -> Result<ClassAtom, SurfaceError> {
            let state = Rc::clone(&self.state);
            self.registrar.register_with(|| {
                let mut s = state.borrow_mut();
                s.registrations += 1;
                s.calls.push(Call::RegisterClass);
                Ok(ClassAtom(0xC001))
            })
        }

        fn primary_display_size(&self) -> Size {
            self.display
        }

        fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect {
            if style.contains(WindowStyle::THICKFRAME) {
                Rect::new(
                    client.left - INSET_LEFT,
                    client.top - INSET_TOP,
                    client.right + INSET_RIGHT,
                    client.bottom + INSET_BOTTOM,
                )
            } else {
                client
            }
        }

        fn create_window(
            &mut self,
            _title: &str,
            style: WindowStyle,
            frame: Rect,
        ) -> Result<u32, SurfaceError> {
            let mut s = self.state.borrow_mut();
            if s.fail_create {
                return Err(SurfaceError::WindowCreation("CreateWindowExW failed".into()));
            }
            s.calls.push(Call::Create(frame));
            s.rect = frame;
            s.style = style;
            Ok(7)
        }

        fn window_rect(&self, _window: u32) -> Option<Rect> {
            let s = self.state.borrow();
            (!s.fail_window_rect).then_some(s.rect)
        }

        fn set_window_style(&mut self, _window: u32, style: WindowStyle) -> bool {
            let mut s = self.state.borrow_mut();
            s.calls.push(Call::SetStyle(style));
            if s.fail_style {
                return false;
            }
            s.style = style;
            true
        }

        fn monitor_rect(&self, _window: u32) -> Option<Rect> {
            if self.state.borrow().fail_monitor {
                return None;
            }
            let rect = self.state.borrow().rect;
            let cx = rect.left + rect.width() / 2;
            let cy = rect.top + rect.height() / 2;
            self.monitors
                .iter()
                .copied()
                .find(|m| cx >= m.left && cx < m.right && cy >= m.top && cy < m.bottom)
                .or_else(|| self.monitors.first().copied())
        }

        fn set_window_pos(&mut self, _window: u32, z_order: ZOrder, rect: Rect) -> bool {
            let mut s = self.state.borrow_mut();
            s.calls.push(Call::SetPos(z_order, rect));
            s.rect = rect;
            true
        }

        fn show_window(&mut self, _window: u32, command: ShowCommand) {
            self.state.borrow_mut().calls.push(Call::Show(command));
        }

        fn destroy_window(&mut self, _window: u32) {
            self.state.borrow_mut().calls.push(Call::Destroy);
        }
    }

    fn hd_backend() -> FakeBackend {
        FakeBackend::new(Size::new(1920, 1080))
    }

    fn set_pos_calls(backend: &FakeBackend) -> Vec<Call> {
        backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::SetPos(..)))
            .collect()
    }

    #[test]
    fn test_create_720p_on_1080p_display() {
        let backend = hd_backend();
        let surface = DisplaySurface::create(backend.clone(), "Demo", 1280, 720).unwrap();

        let outer = Size::new(1280 + 16, 720 + 39);
        let expected = Rect::from_origin_size(
            Point {
                x: (1920 - outer.width) / 2,
                y: (1080 - outer.height) / 2,
            },
            outer,
        );
        assert_eq!(surface.windowed_rect(), expected);
        assert_eq!(backend.client_size(), Size::new(1280, 720));
        assert!(!surface.is_fullscreen());
        assert_eq!(surface.window(), 7);
    }

    #[test]
    fn test_client_size_round_trips_for_many_sizes() {
        for (w, h) in [(1, 1), (320, 240), (800, 600), (1920, 1080), (3840, 2160), (4000, 3)] {
            let backend = hd_backend();
            let _surface = DisplaySurface::create(backend.clone(), "sizes", w, h).unwrap();
            assert_eq!(backend.client_size(), Size::new(w as i32, h as i32), "{w}x{h}");
        }
    }

    #[test]
    fn test_oversized_window_clamps_to_origin() {
        let backend = hd_backend();
        let surface = DisplaySurface::create(backend, "big", 2560, 1440).unwrap();
        assert_eq!(surface.windowed_rect().origin(), Point { x: 0, y: 0 });
    }

    #[test]
    fn test_zero_size_is_rejected_before_any_os_call() {
        let backend = hd_backend();
        let err = DisplaySurface::create(backend.clone(), "zero", 0, 600).unwrap_err();
        assert!(matches!(err, SurfaceError::Config(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_huge_client_size_is_an_error_not_a_panic() {
        let backend = hd_backend();
        let err = DisplaySurface::create(backend.clone(), "huge", (i32::MAX - 8) as u32, 100)
            .unwrap_err();
        assert!(matches!(err, SurfaceError::Config(_)));
        assert!(backend.calls().is_empty());

        // Bypassing validation, the frame arithmetic itself reports overflow.
        let err = initial_window_rect(&backend, (i32::MAX - 8) as u32, 100).unwrap_err();
        assert!(matches!(err, SurfaceError::Config(_)));
        assert!(initial_window_rect(&backend, u32::MAX, 100).is_err());
    }

    #[test]
    fn test_largest_accepted_client_size_creates_a_window() {
        let backend = hd_backend();
        let extent = crate::config::MAX_CLIENT_EXTENT;
        let surface = DisplaySurface::create(backend.clone(), "max", extent, 100).unwrap();
        assert_eq!(surface.windowed_rect().origin(), Point { x: 0, y: 0 });
        assert_eq!(backend.client_size(), Size::new(extent as i32, 100));
    }

    #[test]
    fn test_window_creation_failure_is_fatal() {
        let backend = hd_backend();
        backend.state.borrow_mut().fail_create = true;
        let err = DisplaySurface::create(backend, "fail", 640, 480).unwrap_err();
        assert!(matches!(err, SurfaceError::WindowCreation(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_class_registration_is_idempotent() {
        let mut backend = hd_backend();
        let first = DisplaySurface::register_window_class(&mut backend).unwrap();
        let second = DisplaySurface::register_window_class(&mut backend).unwrap();
        let _surface = DisplaySurface::create(backend.clone(), "again", 640, 480).unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.state.borrow().registrations, 1);
    }

    #[test]
    fn test_fullscreen_round_trip_restores_exact_rect() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "rt", 1280, 720).unwrap();

        let dragged = Rect::new(101, 57, 101 + 1296, 57 + 759);
        backend.move_window(dragged);

        surface.set_fullscreen(true);
        assert!(surface.is_fullscreen());
        assert_eq!(surface.windowed_rect(), dragged);
        assert_eq!(backend.state.borrow().rect, Rect::new(0, 0, 1920, 1080));
        assert_eq!(backend.state.borrow().style, WindowStyle::borderless());

        surface.set_fullscreen(false);
        assert!(!surface.is_fullscreen());
        assert_eq!(backend.state.borrow().rect, dragged);
        assert_eq!(backend.state.borrow().style, WindowStyle::OVERLAPPED_WINDOW);
    }

    #[test]
    fn test_transition_call_sequences() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "seq", 1280, 720).unwrap();
        let windowed = surface.windowed_rect();
        backend.clear_calls();

        surface.set_fullscreen(true);
        assert_eq!(
            backend.calls(),
            vec![
                Call::SetStyle(WindowStyle::borderless()),
                Call::SetPos(ZOrder::Top, Rect::new(0, 0, 1920, 1080)),
                Call::Show(ShowCommand::Maximize),
            ]
        );
        backend.clear_calls();

        surface.set_fullscreen(false);
        assert_eq!(
            backend.calls(),
            vec![
                Call::SetStyle(WindowStyle::OVERLAPPED_WINDOW),
                Call::SetPos(ZOrder::NoTopmost, windowed),
                Call::Show(ShowCommand::Normal),
            ]
        );
    }

    #[test]
    fn test_same_state_is_a_no_op() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "noop", 800, 600).unwrap();
        backend.clear_calls();

        surface.set_fullscreen(false);
        assert!(backend.calls().is_empty());

        surface.set_fullscreen(true);
        backend.clear_calls();
        surface.set_fullscreen(true);
        assert!(set_pos_calls(&backend).is_empty());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_toggle_twice_returns_to_original_state() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "toggle", 800, 600).unwrap();
        let original = backend.state.borrow().rect;

        surface.toggle_fullscreen();
        assert!(surface.is_fullscreen());
        surface.toggle_fullscreen();
        assert!(!surface.is_fullscreen());
        assert_eq!(backend.state.borrow().rect, original);
    }

    #[test]
    fn test_fullscreen_covers_the_monitor_holding_the_window() {
        let secondary = Rect::new(1920, -200, 1920 + 2560, -200 + 1440);
        let backend = hd_backend().with_monitor(secondary);
        let mut surface = DisplaySurface::create(backend.clone(), "multi", 800, 600).unwrap();

        backend.move_window(Rect::new(2500, 100, 3316, 739));
        surface.set_fullscreen(true);

        assert_eq!(set_pos_calls(&backend), vec![Call::SetPos(ZOrder::Top, secondary)]);
    }

    #[test]
    fn test_monitor_lookup_failure_covers_primary_display() {
        let backend = hd_backend();
        backend.state.borrow_mut().fail_monitor = true;
        let mut surface = DisplaySurface::create(backend.clone(), "nomon", 800, 600).unwrap();

        surface.set_fullscreen(true);
        assert_eq!(
            set_pos_calls(&backend),
            vec![Call::SetPos(ZOrder::Top, Rect::new(0, 0, 1920, 1080))]
        );
    }

    #[test]
    fn test_style_failure_is_best_effort() {
        let backend = hd_backend();
        backend.state.borrow_mut().fail_style = true;
        let mut surface = DisplaySurface::create(backend.clone(), "style", 800, 600).unwrap();

        surface.set_fullscreen(true);
        assert!(surface.is_fullscreen());
        assert_eq!(set_pos_calls(&backend).len(), 1);
    }

    #[test]
    fn test_failed_bounds_query_keeps_previous_restore_rect() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "bounds", 800, 600).unwrap();
        let created = surface.windowed_rect();

        backend.state.borrow_mut().fail_window_rect = true;
        surface.set_fullscreen(true);
        assert_eq!(surface.windowed_rect(), created);
        assert!(!surface.windowed_rect().is_degenerate());

        surface.set_fullscreen(false);
        assert_eq!(backend.state.borrow().rect, created);
    }

    #[test]
    fn test_from_config_can_start_fullscreen() {
        let backend = hd_backend();
        let mut config = SurfaceConfig::new("cfg", 1024, 768);
        config.fullscreen = true;

        let surface = DisplaySurface::from_config(backend.clone(), &config).unwrap();
        assert!(surface.is_fullscreen());
        assert_eq!(backend.state.borrow().rect, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn test_from_config_validates_buffer_count() {
        let mut config = SurfaceConfig::default();
        config.buffer_count = 0;
        let backend = hd_backend();
        assert!(DisplaySurface::from_config(backend.clone(), &config).is_err());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_show_and_drop() {
        let backend = hd_backend();
        let mut surface = DisplaySurface::create(backend.clone(), "drop", 640, 480).unwrap();
        surface.show();
        drop(surface);

        let calls = backend.calls();
        assert_eq!(&calls[calls.len() - 2..], &[Call::Show(ShowCommand::Show), Call::Destroy]);
    }
}
