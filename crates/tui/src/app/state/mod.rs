pub(crate) mod form;
pub(crate) mod input;
pub(crate) mod nav;
pub(crate) mod timers;
pub(crate) mod toast;

pub(crate) use form::{FormField, FormState};
pub(crate) use input::InputState;
pub(crate) use nav::{Focus, Route, SidebarItem, StatusLineMode};
pub(crate) use timers::{FieldAction, FieldTimers, TimerKey};
pub(crate) use toast::{ToastTone, Toasts};
