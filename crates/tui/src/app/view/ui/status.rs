use crate::app::state::{FormField, Route, StatusLineMode, ToastTone};
use crate::app::util::text::truncate_to_width;
use crate::app::AppState;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::super::theme::ui_colors;

pub(super) fn build_header_line(app: &AppState) -> Line<'static> {
    let theme = ui_colors();
    let mut spans = vec![
        Span::styled(
            app.route.title().to_string(),
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.route.path()),
            Style::default().fg(theme.muted_fg).add_modifier(Modifier::DIM),
        ),
    ];
    if app.route == Route::Advertisements {
        let count = app.store.len();
        let noun = if count == 1 {
            "advertisement"
        } else {
            "advertisements"
        };
        spans.push(Span::styled(
            format!("  •  {count} {noun}"),
            Style::default().fg(theme.muted_fg),
        ));
    }
    Line::from(spans)
}

pub(super) fn build_status_line(app: &AppState) -> Line<'static> {
    let mut segments: Vec<String> = Vec::new();
    match (app.status_line_mode, app.form.as_ref()) {
        (StatusLineMode::Info, Some(form)) => {
            segments.push("Tab next field".to_string());
            if form.focus == FormField::Images {
                segments.push("Enter add paths".to_string());
                segments.push("Alt+V paste image".to_string());
            } else if form.focus == FormField::Description {
                segments.push("Ctrl+J/Shift+Enter newline".to_string());
            }
            segments.push("Ctrl+S save".to_string());
            segments.push("Esc cancel".to_string());
        }
        (StatusLineMode::Info, None) => {
            segments.push(format!("page: {}", app.route.path()));
            if app.route == Route::Advertisements && !app.store.is_empty() {
                segments.push("c copy".to_string());
                segments.push("a enhance".to_string());
                segments.push("e edit".to_string());
                segments.push("d delete".to_string());
            }
            segments.push("n new".to_string());
            segments.push("? help".to_string());
        }
        (StatusLineMode::Help, _) => {
            segments.push("1/2 switch page".to_string());
            segments.push("Tab sidebar/content".to_string());
            segments.push("↑↓ card  ←→ field".to_string());
            segments.push("f Facebook ad".to_string());
            segments.push("y copy JSON".to_string());
            segments.push("Alt+←/→ pick image, Del remove".to_string());
            segments.push("q/Ctrl+C quit".to_string());
            segments.push("? info".to_string());
        }
    }
    let status_text = segments.join("  •  ");
    Line::from(Span::styled(
        status_text,
        Style::default().add_modifier(Modifier::DIM),
    ))
}

pub(super) fn build_toast_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    if width == 0 || app.toasts.is_empty() {
        return Vec::new();
    }
    let theme = ui_colors();
    app.toasts
        .visible()
        .map(|toast| {
            let (icon, color) = match toast.tone {
                ToastTone::Success => ("✓", theme.success_fg),
                ToastTone::Failure => ("✗", theme.error_fg),
                ToastTone::Info => ("•", theme.info_fg),
            };
            let text = truncate_to_width(&format!("{icon} {}", toast.message), width);
            Line::from(Span::styled(text, Style::default().fg(color)))
        })
        .collect()
}
