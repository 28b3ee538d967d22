mod cards;
mod constants;
mod dashboard;
mod form;
mod sidebar;
mod status;

use crate::app::state::{Focus, Route};
use crate::app::AppState;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use self::cards::render_cards;
use self::constants::{CONTENT_PADDING_X, MIN_CONTENT_WIDTH, SIDEBAR_WIDTH};
use self::dashboard::build_dashboard_lines;
use self::form::render_form;
use self::sidebar::build_sidebar_lines;
use self::status::{build_header_line, build_status_line, build_toast_lines};
use super::theme::ui_colors;

const HEADER_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

/// Sidebar on the left, page content on the right, toasts and the status line along the
/// bottom. The form is drawn as a modal over everything else.
pub fn draw_ui(f: &mut ratatui::Frame, app: &AppState) {
    let size = f.area();
    if size.width == 0 || size.height == 0 {
        return;
    }
    f.render_widget(Clear, size);

    let theme = ui_colors();
    let show_sidebar = size.width >= SIDEBAR_WIDTH + MIN_CONTENT_WIDTH;
    let sidebar_width = if show_sidebar { SIDEBAR_WIDTH } else { 0 };

    if show_sidebar {
        let sidebar_area = Rect {
            x: size.x,
            y: size.y,
            width: sidebar_width,
            height: size.height,
        };
        let border_style = if app.focus == Focus::Sidebar && app.form.is_none() {
            Style::default().fg(theme.accent_fg)
        } else {
            Style::default().fg(theme.panel_divider_fg)
        };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(border_style)
            .title(" adboard ");
        let inner = block.inner(sidebar_area);
        let lines = build_sidebar_lines(app, inner.width as usize);
        f.render_widget(Paragraph::new(Text::from(lines)).block(block), sidebar_area);
    }

    let main_area = Rect {
        x: size.x + sidebar_width + CONTENT_PADDING_X,
        y: size.y,
        width: size
            .width
            .saturating_sub(sidebar_width + CONTENT_PADDING_X * 2),
        height: size.height,
    };
    if main_area.width == 0 {
        return;
    }

    let toast_lines = build_toast_lines(app, main_area.width as usize);
    let toast_height = (toast_lines.len() as u16)
        .min(main_area.height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT + 1));
    let reserved = HEADER_HEIGHT + STATUS_HEIGHT + toast_height;
    if main_area.height <= reserved {
        f.render_widget(Paragraph::new(build_status_line(app)), main_area);
        return;
    }

    let header_area = Rect {
        height: HEADER_HEIGHT,
        ..main_area
    };
    f.render_widget(Paragraph::new(build_header_line(app)), header_area);

    let content_area = Rect {
        y: main_area.y + HEADER_HEIGHT,
        height: main_area.height - reserved,
        ..main_area
    };
    match app.route {
        Route::Dashboard => {
            let lines = build_dashboard_lines(app, content_area.width as usize);
            f.render_widget(Paragraph::new(Text::from(lines)), content_area);
        }
        Route::Advertisements => render_cards(f, content_area, app),
    }

    if toast_height > 0 {
        let toast_area = Rect {
            y: content_area.y + content_area.height,
            height: toast_height,
            ..main_area
        };
        let lines = toast_lines.into_iter().take(toast_height as usize).collect::<Vec<_>>();
        f.render_widget(Paragraph::new(Text::from(lines)), toast_area);
    }

    let status_area = Rect {
        y: main_area.y + main_area.height - STATUS_HEIGHT,
        height: STATUS_HEIGHT,
        ..main_area
    };
    f.render_widget(Paragraph::new(build_status_line(app)), status_area);

    if app.form.is_some() {
        render_form(f, size, app);
    }
}
