use super::app_state::{AppMode, LineInput};
use crate::error::SessionError;
use crate::renamer::RenameOutcome;
use crate::session::{RowHandle, Session};
use crate::utils;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

pub struct TuiApp {
    pub(super) session: Session,
    pub(super) current_selection_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) mode: AppMode,
    pub(super) input: LineInput,
    pub(super) rename_target: Option<RowHandle>,
    pub(super) alert_message: String,
    pub(super) list_viewport_height: usize,
}

impl TuiApp {
    pub fn new(session: Session) -> Self {
        let mode = if session.root().is_some() {
            AppMode::Normal
        } else {
            AppMode::PickingRoot
        };
        TuiApp {
            session,
            current_selection_idx: 0,
            scroll_offset: 0,
            quit: false,
            mode,
            input: LineInput::default(),
            rename_target: None,
            alert_message: String::new(),
            list_viewport_height: 0, // Will be updated by ui_renderer
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.session.entries().len();
        if len == 0 {
            return;
        }
        let target = self.current_selection_idx as isize + delta;
        self.current_selection_idx = target.clamp(0, len as isize - 1) as usize;
    }

    fn page(&self) -> isize {
        self.list_viewport_height.max(1) as isize
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.session.entries().len();
        self.current_selection_idx = self.current_selection_idx.min(len.saturating_sub(1));
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        let len = self.session.entries().len();
        if len == 0 || self.list_viewport_height == 0 {
            self.scroll_offset = 0;
            return;
        }
        let height = self.list_viewport_height;
        let pos = self.current_selection_idx;
        if pos < self.scroll_offset {
            self.scroll_offset = pos;
        } else if pos >= self.scroll_offset + height {
            self.scroll_offset = pos + 1 - height;
        }
        self.scroll_offset = self.scroll_offset.min(len.saturating_sub(height));
    }

    fn refresh_keeping_selection(&mut self) {
        let selected_path = self
            .session
            .entries()
            .get(self.current_selection_idx)
            .map(|e| e.full_path().to_path_buf());
        self.session.refresh();
        if let Some(idx) = selected_path.and_then(|p| self.session.position_of(&p)) {
            self.current_selection_idx = idx;
        }
        self.clamp_selection();
    }

    fn show_alert(&mut self, message: String) {
        self.alert_message = message;
        self.mode = AppMode::Alert;
    }

    pub(super) fn begin_rename(&mut self) {
        let Some(handle) = self.session.handle(self.current_selection_idx) else {
            return;
        };
        let Some(entry) = self.session.lookup(handle) else {
            return;
        };
        self.input = LineInput::with_text(entry.display_name());
        self.rename_target = Some(handle);
        self.mode = AppMode::Renaming;
    }

    pub(super) fn begin_pick_root(&mut self) {
        let current = self
            .session
            .root()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.input = LineInput::with_text(&current);
        self.mode = AppMode::PickingRoot;
    }

    /// Apply the edited name to the row the edit was started on.
    pub(super) fn commit_rename(&mut self) {
        self.mode = AppMode::Normal;
        let Some(handle) = self.rename_target.take() else {
            return;
        };
        let new_name = self.input.text().to_string();
        match self.session.rename(handle, &new_name) {
            Ok(RenameOutcome::Unchanged) => {
                debug!("rename skipped: empty or unchanged name");
            }
            Ok(RenameOutcome::Renamed(path)) => {
                if let Some(idx) = self.session.position_of(&path) {
                    self.current_selection_idx = idx;
                }
                self.clamp_selection();
            }
            Err(SessionError::StaleHandle) => {
                self.clamp_selection();
                self.show_alert("Rename failed: the file list changed.".to_string());
            }
            Err(SessionError::Rename(e)) => {
                self.show_alert(format!("Rename failed: {}", e));
            }
        }
    }

    pub(super) fn commit_pick_root(&mut self) {
        let typed = self.input.text().to_string();
        match utils::resolve_dir(&typed) {
            Some(dir) => {
                self.session.select_root(dir);
                self.current_selection_idx = 0;
                self.scroll_offset = 0;
                self.mode = AppMode::Normal;
            }
            None => self.show_alert(format!("'{}' is not a directory.", typed.trim())),
        }
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(self.page()),
            KeyCode::PageUp => self.move_selection(-self.page()),
            KeyCode::Home | KeyCode::Char('g') => self.current_selection_idx = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.current_selection_idx = self.session.entries().len().saturating_sub(1)
            }
            KeyCode::F(2) | KeyCode::Enter => self.begin_rename(),
            KeyCode::Char('o') => self.begin_pick_root(),
            KeyCode::Char('r') => self.refresh_keeping_selection(),
            _ => {}
        }
    }

    pub(super) fn handle_line_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => match self.mode {
                AppMode::Renaming => self.commit_rename(),
                AppMode::PickingRoot => self.commit_pick_root(),
                _ => {}
            },
            KeyCode::Esc => {
                self.rename_target = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.left(),
            KeyCode::Right => self.input.right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            _ => {}
        }
    }

    pub(super) fn handle_alert_input(&mut self, key_event: KeyEvent) {
        if matches!(
            key_event.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
        ) {
            self.alert_message.clear();
            self.mode = AppMode::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_scanner::ScanOptions;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_for(root: &Path) -> TuiApp {
        let mut session = Session::new(ScanOptions::default());
        session.select_root(root.to_path_buf());
        TuiApp::new(session)
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.handle_line_input(key(KeyCode::Char(c)));
        }
    }

    fn clear_input(app: &mut TuiApp) {
        app.handle_line_input(key(KeyCode::End));
        for _ in 0..64 {
            app.handle_line_input(key(KeyCode::Backspace));
        }
    }

    fn selected_name(app: &TuiApp) -> &str {
        app.session.entries()[app.current_selection_idx].display_name()
    }

    #[test]
    fn starts_in_root_picker_without_root() {
        let app = TuiApp::new(Session::default());
        assert_eq!(app.mode, AppMode::PickingRoot);
    }

    #[test]
    fn root_picker_scans_typed_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x  y.txt"), "").unwrap();
        let mut app = TuiApp::new(Session::default());
        type_text(&mut app, &dir.path().display().to_string());
        app.handle_line_input(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.session.entries().len(), 1);
        assert_eq!(app.session.flagged_count(), 1);
    }

    #[test]
    fn root_picker_rejects_non_directory() {
        let mut app = TuiApp::new(Session::default());
        type_text(&mut app, "/no/such/dir/for/spacecheck");
        app.handle_line_input(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Alert);
        app.handle_alert_input(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.session.root().is_none());
    }

    #[test]
    fn f2_edits_selected_row_and_selection_follows_rename() {
        let dir = tempdir().unwrap();
        for name in ["a.txt", "b  b.txt", "c.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let mut app = app_for(dir.path());
        assert_eq!(selected_name(&app), "b  b.txt");

        app.handle_normal_mode_input(key(KeyCode::F(2)));
        assert_eq!(app.mode, AppMode::Renaming);
        assert_eq!(app.input.text(), "b  b.txt");

        clear_input(&mut app);
        type_text(&mut app, "d.txt");
        app.handle_line_input(key(KeyCode::Enter));

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.session.flagged_count(), 0);
        assert_eq!(selected_name(&app), "d.txt");
        assert_eq!(app.current_selection_idx, 2);
    }

    #[test]
    fn failed_rename_raises_alert_and_keeps_list() {
        let dir = tempdir().unwrap();
        for name in ["a.txt", "c.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let mut app = app_for(dir.path());
        let generation = app.session.generation();

        app.handle_normal_mode_input(key(KeyCode::F(2)));
        clear_input(&mut app);
        type_text(&mut app, "c.txt");
        app.handle_line_input(key(KeyCode::Enter));

        assert_eq!(app.mode, AppMode::Alert);
        assert!(app.alert_message.starts_with("Rename failed"));
        assert_eq!(app.session.generation(), generation);
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn escape_cancels_edit_without_touching_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep  me.txt"), "").unwrap();
        let mut app = app_for(dir.path());
        app.handle_normal_mode_input(key(KeyCode::Enter));
        type_text(&mut app, "zzz");
        app.handle_line_input(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.rename_target.is_none());
        assert!(dir.path().join("keep  me.txt").exists());
    }

    #[test]
    fn navigation_clamps_and_scrolls() {
        let dir = tempdir().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("f{i}.txt")), "").unwrap();
        }
        let mut app = app_for(dir.path());
        app.list_viewport_height = 3;
        app.handle_normal_mode_input(key(KeyCode::Up));
        assert_eq!(app.current_selection_idx, 0);
        app.handle_normal_mode_input(key(KeyCode::PageDown));
        app.handle_normal_mode_input(key(KeyCode::PageDown));
        assert_eq!(app.current_selection_idx, 6);
        app.ensure_selection_is_visible_in_viewport();
        assert_eq!(app.scroll_offset, 4);
        app.handle_normal_mode_input(key(KeyCode::End));
        assert_eq!(app.current_selection_idx, 9);
        app.handle_normal_mode_input(key(KeyCode::Down));
        assert_eq!(app.current_selection_idx, 9);
    }
}
