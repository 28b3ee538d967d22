use crate::app::state::{FormField, FormState, InputState};
use crate::app::util::text::{char_width, truncate_to_width, visual_width};
use crate::app::util::ImageRegistry;
use crate::app::AppState;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::super::theme::ui_colors;
use super::constants::{FORM_MARGIN, FORM_MAX_WIDTH, MAX_FORM_DESCRIPTION_ROWS};

const INPUT_INDENT: usize = 1;

pub(super) struct FormView {
    pub(super) lines: Vec<Line<'static>>,
    /// Cursor cell relative to the dialog's inner area.
    pub(super) cursor: Option<(u16, u16)>,
    pub(super) focus_row: usize,
}

/// Slice of a single input row that keeps the cursor visible. Returns the text and the
/// cursor column within it.
fn input_window(chars: &[char], cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor = cursor.min(chars.len());
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().map(|ch| char_width(*ch)).sum();
    while before >= width && start < cursor {
        before -= char_width(chars[start]);
        start += 1;
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = char_width(*ch);
        if used + w > width {
            break;
        }
        out.push(*ch);
        used += w;
    }
    (out, before)
}

fn input_line(text: String, width: usize) -> Line<'static> {
    let theme = ui_colors();
    let pad = width.saturating_sub(visual_width(&text));
    Line::from(vec![
        Span::raw(" ".repeat(INPUT_INDENT)),
        Span::styled(
            format!("{text}{}", " ".repeat(pad)),
            Style::default().fg(theme.primary_fg).bg(theme.input_bg),
        ),
    ])
}

/// Rendered rows of an input plus the cursor position when focused.
fn build_input_rows(
    input: &InputState,
    width: usize,
    max_rows: usize,
    focused: bool,
) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
    let mut rows: Vec<Vec<char>> = vec![Vec::new()];
    let mut cursor_row = 0;
    let mut cursor_col = 0;
    for (index, ch) in input.buffer.iter().enumerate() {
        if index == input.cursor {
            cursor_row = rows.len() - 1;
            cursor_col = rows[cursor_row].len();
        }
        if *ch == '\n' {
            rows.push(Vec::new());
        } else if let Some(row) = rows.last_mut() {
            row.push(*ch);
        }
    }
    if input.cursor >= input.buffer.len() {
        cursor_row = rows.len() - 1;
        cursor_col = rows[cursor_row].len();
    }

    let max_rows = max_rows.max(1);
    let top = if cursor_row >= max_rows {
        cursor_row + 1 - max_rows
    } else {
        0
    };
    let mut lines = Vec::new();
    let mut cursor = None;
    for (offset, row) in rows.iter().enumerate().skip(top).take(max_rows) {
        if offset == cursor_row {
            let (text, col) = input_window(row, cursor_col, width);
            if focused {
                cursor = Some((offset - top, INPUT_INDENT + col));
            }
            lines.push(input_line(text, width));
        } else {
            let text: String = row.iter().collect();
            lines.push(input_line(truncate_to_width(&text, width), width));
        }
    }
    (lines, cursor)
}

fn label_line(field: FormField, focused: bool, extra: Option<String>) -> Line<'static> {
    let theme = ui_colors();
    let marker = if focused { "▸ " } else { "  " };
    let style = if focused {
        Style::default()
            .fg(theme.accent_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted_fg)
    };
    let mut spans = vec![Span::styled(format!("{marker}{}", field.label()), style)];
    if let Some(extra) = extra {
        spans.push(Span::styled(
            format!("  {extra}"),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

fn error_line(message: &str, width: usize) -> Line<'static> {
    let theme = ui_colors();
    Line::from(Span::styled(
        truncate_to_width(&format!("  ! {message}"), width),
        Style::default().fg(theme.error_fg),
    ))
}

fn button_span(label: &str, focused: bool) -> Span<'static> {
    let theme = ui_colors();
    let text = format!("[ {label} ]");
    if focused {
        Span::styled(
            text,
            Style::default()
                .fg(theme.primary_fg)
                .bg(theme.sidebar_active_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(text, Style::default().fg(theme.muted_fg))
    }
}

pub(super) fn build_form_view(form: &FormState, images: &ImageRegistry, width: usize) -> FormView {
    let theme = ui_colors();
    let input_width = width.saturating_sub(INPUT_INDENT * 2).max(1);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor = None;
    let mut focus_row = 0;

    for field in [FormField::Name, FormField::Description, FormField::Price] {
        let focused = form.focus == field;
        if focused {
            focus_row = lines.len();
        }
        lines.push(label_line(field, focused, None));
        let Some(input) = form.input_for(field) else {
            continue;
        };
        let max_rows = if field == FormField::Description {
            MAX_FORM_DESCRIPTION_ROWS
        } else {
            1
        };
        let (rows, input_cursor) = build_input_rows(input, input_width, max_rows, focused);
        if let Some((row, col)) = input_cursor {
            cursor = Some((col as u16, (lines.len() + row) as u16));
        }
        lines.extend(rows);
        if let Some(message) = form.errors.for_field(field) {
            lines.push(error_line(message, width));
        }
        lines.push(Line::from(""));
    }

    let images_focused = form.focus == FormField::Images;
    if images_focused {
        focus_row = lines.len();
    }
    lines.push(label_line(
        FormField::Images,
        images_focused,
        Some(format!("{} selected", form.image_count())),
    ));
    let (rows, input_cursor) =
        build_input_rows(&form.image_path, input_width, 1, images_focused);
    if let Some((row, col)) = input_cursor {
        cursor = Some((col as u16, (lines.len() + row) as u16));
    }
    lines.extend(rows);
    lines.push(Line::from(Span::styled(
        truncate_to_width(
            "  paths + Enter add  •  Alt+V paste image  •  Alt+←/→ pick  •  Del remove",
            width,
        ),
        Style::default().add_modifier(Modifier::DIM),
    )));

    let strip: Vec<(String, bool)> = form
        .existing_images
        .iter()
        .map(|reference| (images.label_for(reference), true))
        .chain(
            form.selected_images
                .iter()
                .map(|selected| (selected.label.clone(), false)),
        )
        .collect();
    if strip.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No images selected",
            Style::default().fg(theme.muted_fg).add_modifier(Modifier::DIM),
        )));
    }
    for (index, (label, saved)) in strip.iter().enumerate() {
        let highlighted = images_focused && index == form.image_cursor;
        let marker = if highlighted { "▸" } else { " " };
        let suffix = if *saved { " (saved)" } else { "" };
        let text = truncate_to_width(&format!("  {marker} {}. {label}{suffix}", index + 1), width);
        let style = if highlighted {
            Style::default()
                .fg(theme.accent_fg)
                .bg(theme.field_selected_bg)
        } else {
            Style::default().fg(theme.primary_fg)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if let Some(message) = form.errors.for_field(FormField::Images) {
        lines.push(error_line(message, width));
    }
    lines.push(Line::from(""));

    if matches!(form.focus, FormField::Submit | FormField::Cancel) {
        focus_row = lines.len();
    }
    lines.push(Line::from(vec![
        Span::raw("  "),
        button_span(form.submit_label(), form.focus == FormField::Submit),
        Span::raw("  "),
        button_span("Cancel", form.focus == FormField::Cancel),
    ]));

    FormView {
        lines,
        cursor,
        focus_row,
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(super) fn render_form(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let dialog_width = FORM_MAX_WIDTH.min(area.width.saturating_sub(FORM_MARGIN * 2));
    if dialog_width < 4 || area.height < 4 {
        return;
    }
    let inner_width = dialog_width.saturating_sub(2) as usize;
    let view = build_form_view(form, &app.images, inner_width);
    let dialog_height = (view.lines.len() as u16).saturating_add(2);
    let rect = centered_rect(area, dialog_width, dialog_height);

    let theme = ui_colors();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.card_selected_border_fg))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(rect);
    if inner.height == 0 {
        return;
    }

    let target_row = view
        .cursor
        .map(|(_, row)| row as usize)
        .unwrap_or(view.focus_row);
    let visible = inner.height as usize;
    let scroll = if target_row >= visible {
        target_row + 1 - visible
    } else {
        0
    };

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(Text::from(view.lines))
            .block(block)
            .scroll((scroll as u16, 0)),
        rect,
    );
    if let Some((col, row)) = view.cursor {
        let row = row as usize;
        if row >= scroll && row < scroll + visible {
            f.set_cursor_position(Position::new(
                inner.x + col.min(inner.width.saturating_sub(1)),
                inner.y + (row - scroll) as u16,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_form_view, input_window};
    use crate::app::state::form::FormErrors;
    use crate::app::state::{FormField, FormState};
    use crate::app::store::{Advertisement, AdvertisementId};
    use crate::app::util::ImageRegistry;

    fn rows(view: &super::FormView) -> Vec<String> {
        view.lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn input_window_scrolls_to_cursor() {
        let chars: Vec<char> = "abcdefghij".chars().collect();
        assert_eq!(input_window(&chars, 2, 5), ("abcde".to_string(), 2));
        assert_eq!(input_window(&chars, 10, 5), ("ghij".to_string(), 4));
        assert_eq!(input_window(&chars, 0, 0), (String::new(), 0));
    }

    #[test]
    fn create_form_lists_all_controls() {
        let form = FormState::create();
        let view = build_form_view(&form, &ImageRegistry::default(), 50);
        let text = rows(&view);
        assert_eq!(text[0], "▸ Post Name");
        assert!(text.iter().any(|row| row.contains("Description")));
        assert!(text.iter().any(|row| row.contains("Price")));
        assert!(text.iter().any(|row| row.contains("Images  0 selected")));
        assert!(text.iter().any(|row| row.contains("No images selected")));
        assert!(text
            .last()
            .is_some_and(|row| row.contains("[ Create Advertisement ]") && row.contains("[ Cancel ]")));
        assert_eq!(view.cursor, Some((1, 1)));
        assert_eq!(view.focus_row, 0);
    }

    #[test]
    fn inline_errors_follow_their_fields() {
        let mut form = FormState::create();
        form.errors = FormErrors {
            name: Some("Post name is required".to_string()),
            price: Some("Price must be a number".to_string()),
            ..FormErrors::default()
        };
        let text = rows(&build_form_view(&form, &ImageRegistry::default(), 50));
        let name_error = text
            .iter()
            .position(|row| row.contains("Post name is required"))
            .expect("name error");
        assert_eq!(name_error, 2);
        let price_label = text
            .iter()
            .position(|row| row.trim_start_matches(['▸', ' ']) == "Price")
            .expect("price label");
        assert!(text[price_label + 2].contains("Price must be a number"));
    }

    #[test]
    fn edit_form_marks_saved_images_and_cursor_in_description() {
        let record = Advertisement {
            id: AdvertisementId::from("ad-1"),
            name: "Bike".to_string(),
            description: "Used\nbike".to_string(),
            price: 120.0,
            images: vec!["blob:adboard/old".to_string()],
        };
        let mut form = FormState::edit(&record);
        form.focus = FormField::Description;
        let view = build_form_view(&form, &ImageRegistry::default(), 50);
        let text = rows(&view);

        assert!(text.iter().any(|row| row.contains("(saved)")));
        assert!(text.iter().any(|row| row.contains("Images  1 selected")));
        assert!(text
            .last()
            .is_some_and(|row| row.contains("[ Update Advertisement ]")));
        // Description label at row 3, its two input rows at 4 and 5; cursor after "bike".
        assert_eq!(view.focus_row, 3);
        assert_eq!(view.cursor, Some((5, 5)));
    }
}
