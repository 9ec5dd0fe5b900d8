use crate::app::AppState;
use crate::domain::{Tab, UiMode, ViewMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingTask => handle_edit_form_mode(app, key),
        UiMode::AddingInterval => handle_interval_form_mode(app, key),
        UiMode::GoToDate => handle_date_prompt_mode(app, key),
    }
}

/// Keys shared by every tab, then the tab's own keys
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        KeyCode::Char('1') => {
            app.set_tab(Tab::Calendar);
            return Ok(false);
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Notes);
            return Ok(false);
        }
        KeyCode::Char('3') => {
            app.set_tab(Tab::Settings);
            return Ok(false);
        }
        _ => {}
    }

    match app.tab {
        Tab::Calendar => match app.snapshot.mode {
            ViewMode::Calendar => handle_month_keys(app, key),
            ViewMode::Day => handle_day_keys(app, key),
        },
        Tab::Notes => Ok(false),
        Tab::Settings => handle_settings_keys(app, key),
    }
}

/// Month grid navigation
fn handle_month_keys(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Left => app.move_selected_date(-1),
        KeyCode::Right => app.move_selected_date(1),
        KeyCode::Up => app.move_selected_date(-7),
        KeyCode::Down => app.move_selected_date(7),
        KeyCode::Char('[') => app.shift_month(-1),
        KeyCode::Char(']') => app.shift_month(1),
        KeyCode::Char('t') => {
            let today = app.today;
            app.go_to_date(today);
        }
        KeyCode::Enter | KeyCode::Char('v') => app.set_mode(ViewMode::Day),
        KeyCode::Char('g') => app.open_date_prompt(),
        _ => {}
    }
    Ok(false)
}

/// Timeline of the selected date
fn handle_day_keys(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::Left => app.move_selected_date(-1),
        KeyCode::Right => app.move_selected_date(1),
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        KeyCode::Char('a') => app.add_point_at_cursor(),
        KeyCode::Char('i') => app.open_interval_form(),
        KeyCode::Char(' ') => app.toggle_focused_done(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_focused(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('v') | KeyCode::Esc => app.set_mode(ViewMode::Calendar),
        _ => {}
    }
    Ok(false)
}

fn handle_settings_keys(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.move_settings_selection(-1),
        KeyCode::Down => app.move_settings_selection(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            // Keep running with the in-memory value if the file can't be written
            if let Err(e) = app.activate_setting() {
                warn!(error = %e, "settings not saved");
                app.status_message = Some(format!("Error: {e}"));
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Edit sheet: typing edits the title, Tab flips the done flag
fn handle_edit_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        app.delete_from_edit_form();
        return Ok(false);
    }

    match key.code {
        KeyCode::Enter => app.save_edit_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab => {
            if let Some(form) = app.edit_form.as_mut() {
                form.done = !form.done;
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.edit_form.as_mut() {
                form.title.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.edit_form.as_mut() {
                form.title.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_interval_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_interval_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab => {
            if let Some(form) = app.interval_form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.interval_form.as_mut() {
                form.active_text().pop();
                form.error = None;
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.interval_form.as_mut() {
                form.active_text().push(c);
                form.error = None;
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_date_prompt_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_date_prompt(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Backspace => {
            if let Some(prompt) = app.date_prompt.as_mut() {
                prompt.text.pop();
                prompt.error = None;
            }
        }
        KeyCode::Char(c) => {
            if let Some(prompt) = app.date_prompt.as_mut() {
                prompt.text.push(c);
                prompt.error = None;
            }
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::enums::TaskKind;
    use crate::planner::Planner;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        AppState::new(Planner::with_demo_data(today), Settings::default(), None, today, 8 * 60)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_tab_switch() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.tab, Tab::Settings);
        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.tab, Tab::Notes);
        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.tab, Tab::Calendar);
    }

    #[test]
    fn test_handle_month_navigation() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.snapshot.selected_date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());

        handle_key(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.snapshot.display_month.month(), 11);
        assert_eq!(app.snapshot.selected_date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
    }

    #[test]
    fn test_handle_enter_and_leave_day_view() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.snapshot.mode, ViewMode::Day);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.snapshot.mode, ViewMode::Calendar);
    }

    #[test]
    fn test_handle_add_point_in_day_view() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        let before = app.snapshot.tasks_for_selected_date.len();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.snapshot.tasks_for_selected_date.len(), before + 1);
        assert_eq!(app.focused().unwrap().kind, TaskKind::Point);
    }

    #[test]
    fn test_handle_add_key_ignored_in_month_view() {
        let mut app = create_test_app();
        let before = app.snapshot.tasks_for_selected_date.len();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.snapshot.tasks_for_selected_date.len(), before);
    }

    #[test]
    fn test_handle_interval_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('i'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingInterval);

        // Form opens on the title field
        type_text(&mut app, "Lunch");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let task = app.focused().unwrap();
        assert_eq!(task.title, "Lunch");
        assert_eq!(task.kind, TaskKind::Interval);
    }

    #[test]
    fn test_handle_edit_form_tab_toggles_done() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingTask);

        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        let task = app.focused().unwrap();
        assert_eq!(task.title, "Check emai");
        assert!(task.is_done);
    }

    #[test]
    fn test_handle_edit_form_ctrl_d_deletes() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.snapshot.tasks_for_selected_date.len(), 3);
    }

    #[test]
    fn test_handle_delete_with_delete_key() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert_eq!(app.snapshot.tasks_for_selected_date.len(), 3);
    }

    #[test]
    fn test_handle_space_toggles_done() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('v'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.focused().unwrap().is_done);
    }

    #[test]
    fn test_handle_quit_key_types_inside_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::GoToDate);

        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!should_quit);
        assert!(app.date_prompt.as_ref().unwrap().text.ends_with('q'));
    }

    #[test]
    fn test_handle_date_prompt() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('g'))).unwrap();
        for _ in 0..10 {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "2026-12-25");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.snapshot.selected_date, NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        assert_eq!(app.snapshot.display_month.month(), 12);
    }
}
