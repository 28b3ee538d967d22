use crate::app::state::{Focus, SidebarItem};
use crate::app::util::text::{truncate_to_width, visual_width};
use crate::app::AppState;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::super::theme::ui_colors;

/// Sidebar rows: the create action, a spacer, then one row per page.
pub(super) fn build_sidebar_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    let theme = ui_colors();
    let mut lines = Vec::with_capacity(SidebarItem::ALL.len() + 1);
    for (index, item) in SidebarItem::ALL.iter().enumerate() {
        let is_cursor = app.focus == Focus::Sidebar && index == app.sidebar_selected;
        let marker = if is_cursor { "▸ " } else { "  " };
        let label = truncate_to_width(item.label(), width.saturating_sub(2));
        let mut padded = format!("{marker}{label}");
        let used = visual_width(&padded);
        padded.push_str(&" ".repeat(width.saturating_sub(used)));

        let style = match item {
            SidebarItem::CreateAdvertisement => Style::default()
                .fg(theme.accent_fg)
                .add_modifier(Modifier::BOLD),
            SidebarItem::Page(route) if *route == app.route => Style::default()
                .fg(theme.primary_fg)
                .bg(theme.sidebar_active_bg)
                .add_modifier(Modifier::BOLD),
            SidebarItem::Page(_) => Style::default().fg(theme.muted_fg),
        };
        lines.push(Line::from(Span::styled(padded, style)));
        if *item == SidebarItem::CreateAdvertisement {
            lines.push(Line::from(""));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::build_sidebar_lines;
    use crate::app::state::{Focus, Route};
    use crate::app::AppState;

    fn rows(app: &AppState) -> Vec<String> {
        build_sidebar_lines(app, 24)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn lists_create_action_and_pages() {
        let app = AppState::default();
        assert_eq!(
            rows(&app),
            vec![
                "  + Create Advertisement".to_string(),
                String::new(),
                "  Dashboard".to_string(),
                "  Advertisements".to_string(),
            ]
        );
    }

    #[test]
    fn cursor_marker_follows_sidebar_focus() {
        let mut app = AppState::default();
        app.navigate(Route::Advertisements);
        app.focus = Focus::Sidebar;
        let rows = rows(&app);
        assert_eq!(rows[3], "▸ Advertisements");
        assert_eq!(rows[2], "  Dashboard");
    }
}
