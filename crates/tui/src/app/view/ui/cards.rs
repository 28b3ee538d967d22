use crate::app::state::Focus;
use crate::app::store::{format_price, AdField, Advertisement};
use crate::app::util::text::{truncate_to_width, visual_width, wrap_line};
use crate::app::AppState;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::ops::Range;

use super::super::theme::ui_colors;
use super::constants::{FIELD_LABEL_WIDTH, MAX_CARD_DESCRIPTION_ROWS};

const CARD_BORDER_HEIGHT: u16 = 2;

/// Inner lines of one advertisement card.
pub(super) fn build_card_lines(
    app: &AppState,
    record: &Advertisement,
    selected: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let theme = ui_colors();
    let mut lines = Vec::new();
    let value_width = width.saturating_sub(FIELD_LABEL_WIDTH).max(1);

    for field in AdField::ALL {
        let focused = selected && app.focus == Focus::Content && app.selected_field == field;
        let value = match field {
            AdField::Name => record.name.clone(),
            AdField::Price => format_price(record.price),
            AdField::Description => String::new(),
        };
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme.accent_fg)
                .bg(theme.field_selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        let label = format!(
            "{marker}{:<width$}",
            field_label(field),
            width = FIELD_LABEL_WIDTH.saturating_sub(2)
        );

        let mut spans = vec![Span::styled(label, label_style)];
        let controls = field_controls(app, record, field, focused);
        let controls_width: usize = controls
            .iter()
            .map(|span| visual_width(span.content.as_ref()))
            .sum();
        if field != AdField::Description {
            let room = value_width.saturating_sub(controls_width + 1);
            spans.push(Span::styled(
                truncate_to_width(&value, room),
                Style::default().fg(theme.primary_fg),
            ));
            spans.push(Span::raw(" "));
        }
        spans.extend(controls);
        lines.push(Line::from(spans));

        if field == AdField::Description {
            let mut rows: Vec<String> = record
                .description
                .lines()
                .flat_map(|line| wrap_line(line, value_width.saturating_sub(2).max(1)))
                .collect();
            if rows.len() > MAX_CARD_DESCRIPTION_ROWS {
                rows.truncate(MAX_CARD_DESCRIPTION_ROWS);
                if let Some(last) = rows.last_mut() {
                    *last = truncate_to_width(&format!("{last}..."), value_width);
                }
            }
            let indent = " ".repeat(FIELD_LABEL_WIDTH);
            for row in rows {
                lines.push(Line::from(Span::styled(
                    format!("{indent}{row}"),
                    Style::default().fg(theme.primary_fg),
                )));
            }
        }
    }

    let images = if record.images.is_empty() {
        "none".to_string()
    } else {
        record
            .images
            .iter()
            .map(|reference| app.images.label_for(reference))
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {:<width$}", "Images", width = FIELD_LABEL_WIDTH - 2),
            Style::default().fg(theme.muted_fg),
        ),
        Span::styled(
            truncate_to_width(&images, value_width),
            Style::default().fg(theme.muted_fg).add_modifier(Modifier::DIM),
        ),
    ]));

    if selected {
        lines.push(Line::from(Span::styled(
            truncate_to_width("  [e] edit  [d] delete  [f] Facebook ad  [y] copy JSON", width),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines
}

fn field_label(field: AdField) -> &'static str {
    match field {
        AdField::Name => "Name",
        AdField::Description => "Description",
        AdField::Price => "Price",
    }
}

/// Per-field copy and enhance indicators. Hints are only shown on the focused field.
fn field_controls(
    app: &AppState,
    record: &Advertisement,
    field: AdField,
    focused: bool,
) -> Vec<Span<'static>> {
    let theme = ui_colors();
    let mut spans = Vec::new();
    if app.is_copied(&record.id, field) {
        spans.push(Span::styled(
            "✓ copied",
            Style::default().fg(theme.success_fg),
        ));
    } else if focused {
        spans.push(Span::styled(
            "[c] copy",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    if app.is_enhancing(&record.id, field) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{} enhancing", app.spinner_frame()),
            Style::default().fg(theme.enhance_fg),
        ));
    } else if focused {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            "[a] enhance with AI",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    spans
}

pub(super) fn card_height(lines: usize) -> u16 {
    (lines as u16).saturating_add(CARD_BORDER_HEIGHT)
}

/// Cards that fit in `available` rows, scrolled just enough to keep `selected` visible.
/// A card taller than the area is still shown alone.
pub(super) fn visible_card_range(heights: &[u16], selected: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let selected = selected.min(heights.len() - 1);
    let fits_from = |start: usize| -> usize {
        let mut used = 0_u16;
        let mut end = start;
        while end < heights.len() && used.saturating_add(heights[end]) <= available {
            used = used.saturating_add(heights[end]);
            end += 1;
        }
        end.max(start + 1)
    };
    let mut start = 0;
    loop {
        let end = fits_from(start);
        if selected < end || start == selected {
            return start..end;
        }
        start += 1;
    }
}

pub(super) fn build_empty_state_lines() -> Vec<Line<'static>> {
    let theme = ui_colors();
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "No advertisements yet",
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[ + Create Advertisement ]",
            Style::default()
                .fg(theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press Enter or n to create one.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

pub(super) fn render_cards(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let records = app.store.list();
    if records.is_empty() {
        f.render_widget(
            Paragraph::new(Text::from(build_empty_state_lines()))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let theme = ui_colors();
    let inner_width = area.width.saturating_sub(CARD_BORDER_HEIGHT) as usize;
    let mut card_lines: Vec<Vec<Line<'static>>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            build_card_lines(app, record, index == app.selected_card, inner_width)
        })
        .collect();
    let heights: Vec<u16> = card_lines.iter().map(|lines| card_height(lines.len())).collect();
    let range = visible_card_range(&heights, app.selected_card, area.height);

    let mut y = area.y;
    let bottom = area.y.saturating_add(area.height);
    for index in range {
        if y >= bottom {
            break;
        }
        let record = &records[index];
        let height = heights[index].min(bottom - y);
        let card_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let selected = index == app.selected_card;
        let border_style = if selected {
            Style::default().fg(theme.card_selected_border_fg)
        } else {
            Style::default().fg(theme.card_border_fg)
        };
        let title = truncate_to_width(
            &format!(" {} · {} ", record.name, record.id.short()),
            inner_width,
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, border_style.add_modifier(Modifier::BOLD)));
        let lines = std::mem::take(&mut card_lines[index]);
        f.render_widget(Paragraph::new(Text::from(lines)).block(block), card_area);
        y = y.saturating_add(height);
    }
}
