use crate::app::handlers::form::handle_form_key;
use crate::app::state::{FormField, Focus, Route, SidebarItem};
use crate::app::util::{sanitize_paste, ClipboardWriter};
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;

/// Routes a key press to the open form, the sidebar, or the current page.
/// Returns true when the screen needs a redraw.
pub(crate) fn handle_key(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
    clipboard: &mut dyn ClipboardWriter,
    now: Instant,
) -> bool {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return false;
    }
    if app.form.is_some() {
        return handle_form_key(app, key, modifiers, clipboard, now);
    }

    match (key, modifiers) {
        (KeyCode::Char('q'), mods) if mods.is_empty() => {
            app.should_quit = true;
            false
        }
        (KeyCode::Char('?'), _) => {
            app.toggle_status_line_mode();
            true
        }
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            app.toggle_focus();
            true
        }
        (KeyCode::Char('1'), _) => {
            app.navigate(Route::Dashboard);
            app.focus = Focus::Content;
            true
        }
        (KeyCode::Char('2'), _) => {
            app.navigate(Route::Advertisements);
            app.focus = Focus::Content;
            true
        }
        (KeyCode::Char('n'), mods) if mods.is_empty() => {
            app.open_create_form();
            true
        }
        _ => match (app.focus, app.route) {
            (Focus::Sidebar, _) => handle_sidebar_key(app, key),
            (Focus::Content, Route::Dashboard) => handle_dashboard_key(app, key),
            (Focus::Content, Route::Advertisements) => {
                handle_list_key(app, key, clipboard, now)
            }
        },
    }
}

fn handle_sidebar_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.sidebar_selected = app.sidebar_selected.saturating_sub(1);
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let max_index = SidebarItem::ALL.len().saturating_sub(1);
            app.sidebar_selected = usize::min(app.sidebar_selected + 1, max_index);
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_sidebar_item();
            true
        }
        KeyCode::Right | KeyCode::Esc => {
            app.focus = Focus::Content;
            true
        }
        _ => false,
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.navigate(Route::Advertisements);
            true
        }
        KeyCode::Esc => {
            app.focus = Focus::Sidebar;
            true
        }
        _ => false,
    }
}

fn handle_list_key(
    app: &mut AppState,
    key: KeyCode,
    clipboard: &mut dyn ClipboardWriter,
    now: Instant,
) -> bool {
    if app.store.is_empty() {
        return match key {
            KeyCode::Enter => {
                app.open_create_form();
                true
            }
            KeyCode::Esc => {
                app.focus = Focus::Sidebar;
                true
            }
            _ => false,
        };
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_card(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_card(),
        KeyCode::Home | KeyCode::Char('g') => {
            app.selected_card = 0;
            true
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.selected_card = app.store.len().saturating_sub(1);
            true
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let prev = app.selected_field.prev();
            let changed = prev != app.selected_field;
            app.selected_field = prev;
            changed
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let next = app.selected_field.next();
            let changed = next != app.selected_field;
            app.selected_field = next;
            changed
        }
        KeyCode::Char('c') => app.copy_selected_field(clipboard, now),
        KeyCode::Char('y') => app.copy_selected_record_json(clipboard, now),
        KeyCode::Char('a') => app.enhance_selected_field(now),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(now),
        KeyCode::Char('f') => app.create_facebook_ad(now),
        KeyCode::Esc => {
            app.focus = Focus::Sidebar;
            true
        }
        _ => false,
    }
}

/// Inserts bracketed-paste text into the focused form input.
pub(crate) fn handle_paste(app: &mut AppState, text: &str) -> bool {
    let Some(form) = app.form.as_mut() else {
        return false;
    };
    let multiline = form.focus == FormField::Description;
    let cleaned = sanitize_paste(text, multiline);
    if cleaned.is_empty() {
        return false;
    }
    let Some(input) = form.active_input_mut() else {
        return false;
    };
    input.insert_str(&cleaned);
    form.revalidate();
    true
}

#[cfg(test)]
mod tests {
    use super::{handle_key, handle_paste};
    use crate::app::state::{Focus, FormField, Route, StatusLineMode};
    use crate::app::store::AdField;
    use crate::app::util::clipboard::fake::FakeClipboard;
    use crate::app::AppState;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Instant;

    fn press(app: &mut AppState, clipboard: &mut FakeClipboard, key: KeyCode) -> bool {
        handle_key(app, key, KeyModifiers::NONE, clipboard, Instant::now())
    }

    fn type_text(app: &mut AppState, clipboard: &mut FakeClipboard, text: &str) {
        for ch in text.chars() {
            press(app, clipboard, KeyCode::Char(ch));
        }
    }

    fn create_via_keys(app: &mut AppState, clipboard: &mut FakeClipboard) {
        press(app, clipboard, KeyCode::Char('n'));
        type_text(app, clipboard, "Bike");
        press(app, clipboard, KeyCode::Tab);
        type_text(app, clipboard, "Used bike");
        press(app, clipboard, KeyCode::Tab);
        type_text(app, clipboard, "120");
        handle_key(
            app,
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
            clipboard,
            Instant::now(),
        );
    }

    #[test]
    fn number_keys_switch_routes() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        assert!(press(&mut app, &mut clipboard, KeyCode::Char('2')));
        assert_eq!(app.route, Route::Advertisements);
        assert!(press(&mut app, &mut clipboard, KeyCode::Char('1')));
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn create_flow_through_keys_adds_record() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        create_via_keys(&mut app, &mut clipboard);

        assert!(app.form.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.list()[0].name, "Bike");
        assert_eq!(app.route, Route::Advertisements);
    }

    #[test]
    fn card_keys_drive_copy_and_edit() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        create_via_keys(&mut app, &mut clipboard);

        press(&mut app, &mut clipboard, KeyCode::Right);
        assert_eq!(app.selected_field, AdField::Description);
        press(&mut app, &mut clipboard, KeyCode::Char('c'));
        assert_eq!(clipboard.written, vec!["Used bike".to_string()]);

        press(&mut app, &mut clipboard, KeyCode::Char('e'));
        let form = app.form.as_ref().expect("edit form open");
        assert!(form.is_edit());
        assert_eq!(form.name.current(), "Bike");
    }

    #[test]
    fn delete_key_removes_selected_card() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        create_via_keys(&mut app, &mut clipboard);
        assert!(press(&mut app, &mut clipboard, KeyCode::Char('d')));
        assert!(app.store.is_empty());
    }

    #[test]
    fn enter_on_empty_list_opens_create_form() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Char('2'));
        assert!(press(&mut app, &mut clipboard, KeyCode::Enter));
        assert!(app.form.is_some());
    }

    #[test]
    fn sidebar_navigation_activates_items() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, &mut clipboard, KeyCode::Down);
        press(&mut app, &mut clipboard, KeyCode::Enter);
        assert_eq!(app.route, Route::Advertisements);
        assert_eq!(app.focus, Focus::Content);
    }

    #[test]
    fn help_toggle_and_quit() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Char('?'));
        assert_eq!(app.status_line_mode, StatusLineMode::Help);
        press(&mut app, &mut clipboard, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn q_types_into_form_instead_of_quitting() {
        let mut app = AppState::default();
        let mut clipboard = FakeClipboard::default();
        press(&mut app, &mut clipboard, KeyCode::Char('n'));
        press(&mut app, &mut clipboard, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.as_ref().map(|form| form.name.current()), Some("q".to_string()));
    }

    #[test]
    fn paste_respects_field_line_mode() {
        let mut app = AppState::default();
        assert!(!handle_paste(&mut app, "ignored"));

        app.open_create_form();
        assert!(handle_paste(&mut app, "Road\nBike"));
        let form = app.form.as_mut().expect("form");
        assert_eq!(form.name.current(), "Road Bike");

        form.focus = FormField::Description;
        assert!(handle_paste(&mut app, "line one\r\nline two"));
        assert_eq!(
            app.form.as_ref().map(|form| form.description.current()),
            Some("line one\nline two".to_string())
        );
    }
}
