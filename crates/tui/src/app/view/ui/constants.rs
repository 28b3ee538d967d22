pub(super) const SIDEBAR_WIDTH: u16 = 28;
pub(super) const MIN_CONTENT_WIDTH: u16 = 30;
pub(super) const CONTENT_PADDING_X: u16 = 1;
pub(super) const FIELD_LABEL_WIDTH: usize = 13;
pub(super) const MAX_CARD_DESCRIPTION_ROWS: usize = 4;
pub(super) const FORM_MAX_WIDTH: u16 = 72;
pub(super) const FORM_MARGIN: u16 = 2;
pub(super) const MAX_FORM_DESCRIPTION_ROWS: usize = 4;
pub(super) const MAX_DASHBOARD_INTENTS: usize = 5;
