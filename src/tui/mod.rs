// Terminal front end: list display, path prompt, rename field and alert popup.
mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use app_logic::TuiApp;

// The main function to run the TUI
pub use self::run_tui::run_tui;

// This module will contain the main TUI loop and terminal setup/teardown
mod run_tui {
    use super::app_logic::TuiApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::session::Session;
    use anyhow::Result;
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Run the interactive loop until the user quits. Returns the session so
    /// the caller can report on its final state.
    pub fn run_tui(session: Session) -> Result<Session> {
        let mut app = TuiApp::new(session);

        install_panic_hook();
        let mut terminal = init_terminal()?;

        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;
        }

        restore_terminal(terminal)?;
        Ok(app.session)
    }

    fn install_panic_hook() {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            tracing::error!(%info, "panic");
            default_hook(info);
        }));
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor().map_err(Into::into)
    }
}
