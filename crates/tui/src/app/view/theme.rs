use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct UiColors {
    pub(crate) input_bg: Color,
    pub(crate) primary_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) accent_fg: Color,
    pub(crate) sidebar_active_bg: Color,
    pub(crate) card_border_fg: Color,
    pub(crate) card_selected_border_fg: Color,
    pub(crate) field_selected_bg: Color,
    pub(crate) success_fg: Color,
    pub(crate) error_fg: Color,
    pub(crate) info_fg: Color,
    pub(crate) enhance_fg: Color,
    pub(crate) panel_divider_fg: Color,
}

const DEFAULT_COLORS: UiColors = UiColors {
    input_bg: Color::Rgb(40, 40, 40),
    primary_fg: Color::White,
    muted_fg: Color::Gray,
    accent_fg: Color::Rgb(96, 165, 250),
    sidebar_active_bg: Color::Rgb(37, 99, 235),
    card_border_fg: Color::Rgb(75, 85, 99),
    card_selected_border_fg: Color::Rgb(96, 165, 250),
    field_selected_bg: Color::Rgb(30, 41, 59),
    success_fg: Color::LightGreen,
    error_fg: Color::Rgb(239, 68, 68),
    info_fg: Color::Cyan,
    enhance_fg: Color::Rgb(192, 132, 252),
    panel_divider_fg: Color::DarkGray,
};

const MONOCHROME_COLORS: UiColors = UiColors {
    input_bg: Color::Reset,
    primary_fg: Color::Reset,
    muted_fg: Color::Reset,
    accent_fg: Color::Reset,
    sidebar_active_bg: Color::Reset,
    card_border_fg: Color::Reset,
    card_selected_border_fg: Color::Reset,
    field_selected_bg: Color::Reset,
    success_fg: Color::Reset,
    error_fg: Color::Reset,
    info_fg: Color::Reset,
    enhance_fg: Color::Reset,
    panel_divider_fg: Color::Reset,
};

/// Palette for every view. `NO_COLOR` switches to the terminal's default colors.
pub(crate) fn ui_colors() -> UiColors {
    if std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        MONOCHROME_COLORS
    } else {
        DEFAULT_COLORS
    }
}
