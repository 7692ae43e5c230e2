use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::App;

use super::{round_view::render_round, setup_view::render_setup};

/// A UI Screen boundary: reads the app and draws into the frame buffer
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Mode, length, categories and the last round's words
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_setup(app, area, buf);
    }
}

/// The word card and its countdown
pub struct RoundScreen;

impl Screen for RoundScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_round(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(app: &App) -> Box<dyn Screen> {
    if app.engine.in_round() {
        Box::new(RoundScreen)
    } else {
        Box::new(SetupScreen)
    }
}
