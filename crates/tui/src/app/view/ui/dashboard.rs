use crate::app::store::format_price;
use crate::app::util::text::truncate_to_width;
use crate::app::AppState;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::super::theme::ui_colors;
use super::constants::MAX_DASHBOARD_INTENTS;

struct DashboardStats {
    count: usize,
    total_price: f64,
    image_count: usize,
}

impl DashboardStats {
    fn collect(app: &AppState) -> Self {
        let records = app.store.snapshot().records;
        Self {
            count: records.len(),
            total_price: records.iter().map(|record| record.price).sum(),
            image_count: records.iter().map(|record| record.images.len()).sum(),
        }
    }

    fn average_price(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_price / self.count as f64)
    }
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    let theme = ui_colors();
    Line::from(vec![
        Span::styled(
            format!("  {label:<18}"),
            Style::default().fg(theme.muted_fg),
        ),
        Span::styled(
            value,
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub(super) fn build_dashboard_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    let theme = ui_colors();
    let stats = DashboardStats::collect(app);
    let heading = Style::default()
        .fg(theme.accent_fg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled("Overview", heading)),
        stat_line("Advertisements", stats.count.to_string()),
        stat_line("Total value", format_price(stats.total_price)),
        stat_line(
            "Average price",
            stats
                .average_price()
                .map(|price| format_price((price * 100.0).round() / 100.0))
                .unwrap_or_else(|| "-".to_string()),
        ),
        stat_line("Images attached", stats.image_count.to_string()),
    ];
    if let Some(photo) = app.store.recent_photo() {
        let label = app.images.label_for(photo);
        lines.push(stat_line(
            "Latest photo",
            truncate_to_width(&label, width.saturating_sub(20)),
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recent activity", heading)));
    let mut any_intent = false;
    for intent in app.store.recent_intents().take(MAX_DASHBOARD_INTENTS) {
        any_intent = true;
        let subject = app
            .store
            .get(&intent.id)
            .map(|record| record.name.clone())
            .unwrap_or_else(|| format!("deleted {}", intent.id.short()));
        let field = intent
            .field
            .map(|field| format!(" ({})", field.label()))
            .unwrap_or_default();
        let text = format!("  #{} {}{field}: {subject}", intent.seq, intent.kind.label());
        lines.push(Line::from(Span::styled(
            truncate_to_width(&text, width),
            Style::default().fg(theme.muted_fg),
        )));
    }
    if !any_intent {
        lines.push(Line::from(Span::styled(
            "  No activity yet",
            Style::default().fg(theme.muted_fg).add_modifier(Modifier::DIM),
        )));
    }

    lines.push(Line::from(""));
    let hint = if stats.count == 0 {
        "Press n to create your first advertisement."
    } else {
        "Press 2 or Enter to browse advertisements, n to create one."
    };
    lines.push(Line::from(Span::styled(
        truncate_to_width(hint, width),
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines
}
