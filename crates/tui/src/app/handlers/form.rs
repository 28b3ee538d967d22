use crate::app::state::{FormField, InputState};
use crate::app::util::ClipboardWriter;
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;
use tracing::debug;

pub(crate) fn handle_form_key(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
    clipboard: &mut dyn ClipboardWriter,
    now: Instant,
) -> bool {
    match (key, modifiers) {
        (KeyCode::Esc, _) => {
            app.cancel_form();
            return true;
        }
        (KeyCode::Char('s'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            return app.submit_form(now);
        }
        (KeyCode::Char('v'), mods) if mods.contains(KeyModifiers::ALT) => {
            return app.paste_clipboard_image(clipboard, now);
        }
        _ => {}
    }

    let Some(form) = app.form.as_mut() else {
        return false;
    };
    match (key, modifiers) {
        (KeyCode::Tab, _) => {
            form.focus_next();
            return true;
        }
        (KeyCode::BackTab, _) => {
            form.focus_prev();
            return true;
        }
        _ => {}
    }

    match form.focus {
        FormField::Submit | FormField::Cancel => {
            let focus = form.focus;
            match key {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if focus == FormField::Submit {
                        app.submit_form(now)
                    } else {
                        app.cancel_form();
                        true
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    form.focus = if focus == FormField::Submit {
                        FormField::Cancel
                    } else {
                        FormField::Submit
                    };
                    true
                }
                KeyCode::Up => {
                    form.focus_prev();
                    true
                }
                KeyCode::Down => {
                    form.focus_next();
                    true
                }
                _ => false,
            }
        }
        FormField::Images => {
            let path_empty = form.image_path.is_blank();
            match (key, modifiers) {
                (KeyCode::Enter, _) if path_empty => {
                    form.focus_next();
                    true
                }
                (KeyCode::Enter, _) => {
                    match form.add_image_paths(&mut app.images) {
                        Ok(added) => debug!(added, "image paths selected"),
                        Err(error) => debug!(%error, "image path input rejected"),
                    }
                    true
                }
                (KeyCode::Left, mods) if mods.contains(KeyModifiers::ALT) => {
                    form.move_image_cursor(-1);
                    true
                }
                (KeyCode::Right, mods) if mods.contains(KeyModifiers::ALT) => {
                    form.move_image_cursor(1);
                    true
                }
                (KeyCode::Delete, _) | (KeyCode::Backspace, _) if path_empty => {
                    let index = form.image_cursor;
                    form.remove_image(index, &mut app.images)
                }
                (KeyCode::Up, _) => {
                    form.focus_prev();
                    true
                }
                (KeyCode::Down, _) => {
                    form.focus_next();
                    true
                }
                _ => {
                    let changed =
                        handle_input_edit_key(&mut form.image_path, key, modifiers, false)
                            .unwrap_or(false);
                    if changed {
                        form.errors.images = None;
                    }
                    changed
                }
            }
        }
        FormField::Description => {
            let newline = matches!(
                (key, modifiers),
                (KeyCode::Enter, mods) if mods.contains(KeyModifiers::SHIFT) || mods.contains(KeyModifiers::ALT)
            );
            if newline {
                form.description.insert_char('\n');
                form.revalidate();
                return true;
            }
            if key == KeyCode::Enter {
                form.focus_next();
                return true;
            }
            match handle_input_edit_key(&mut form.description, key, modifiers, true) {
                Some(true) => {
                    form.revalidate();
                    true
                }
                Some(false) => match key {
                    KeyCode::Up => {
                        form.focus_prev();
                        true
                    }
                    KeyCode::Down => {
                        form.focus_next();
                        true
                    }
                    _ => false,
                },
                None => false,
            }
        }
        FormField::Name | FormField::Price => match key {
            KeyCode::Enter | KeyCode::Down => {
                form.focus_next();
                true
            }
            KeyCode::Up => {
                form.focus_prev();
                true
            }
            _ => {
                let Some(input) = form.active_input_mut() else {
                    return false;
                };
                let changed = handle_input_edit_key(input, key, modifiers, false).unwrap_or(false);
                if changed {
                    form.revalidate();
                }
                changed
            }
        },
    }
}

/// Shared line-editing keys. `Some(false)` means the key was recognised but had no
/// effect, which lets multi-line callers fall through to focus movement.
fn handle_input_edit_key(
    input: &mut InputState,
    key: KeyCode,
    modifiers: KeyModifiers,
    allow_ctrl_j: bool,
) -> Option<bool> {
    match (key, modifiers) {
        (KeyCode::Char('u'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            input.kill_line();
            Some(true)
        }
        (KeyCode::Char('w'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            input.delete_word_back();
            Some(true)
        }
        (KeyCode::Char('a'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            input.move_home();
            Some(true)
        }
        (KeyCode::Char('e'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            input.move_end();
            Some(true)
        }
        (KeyCode::Char('j'), mods) if allow_ctrl_j && mods.contains(KeyModifiers::CONTROL) => {
            input.insert_char('\n');
            Some(true)
        }
        (KeyCode::Up, _) => Some(input.move_up()),
        (KeyCode::Down, _) => Some(input.move_down()),
        (KeyCode::Left, _) => {
            input.move_left();
            Some(true)
        }
        (KeyCode::Right, _) => {
            input.move_right();
            Some(true)
        }
        (KeyCode::Home, _) => {
            input.move_home();
            Some(true)
        }
        (KeyCode::End, _) => {
            input.move_end();
            Some(true)
        }
        (KeyCode::Delete, _) => {
            input.delete();
            Some(true)
        }
        (KeyCode::Backspace, _) => {
            input.backspace();
            Some(true)
        }
        (KeyCode::Char(ch), mods) => {
            if !mods.contains(KeyModifiers::CONTROL) && !mods.contains(KeyModifiers::ALT) {
                input.insert_char(ch);
                Some(true)
            } else {
                Some(false)
            }
        }
        _ => None,
    }
}
