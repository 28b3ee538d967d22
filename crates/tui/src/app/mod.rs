pub(crate) mod handlers;
pub(crate) mod state;
pub(crate) mod store;
pub(crate) mod util;
pub(crate) mod view;

use crate::app::state::{
    FieldAction, FieldTimers, Focus, FormField, FormState, Route, SidebarItem, StatusLineMode,
    TimerKey, ToastTone, Toasts,
};
use crate::app::store::{
    AdAction, AdField, Advertisement, AdvertisementId, AdvertisementStore, DispatchOutcome,
};
use crate::app::util::{ClipboardError, ClipboardWriter, ImageRegistry};
use crate::config::AdboardConfig;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const MAX_CLIPBOARD_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

pub struct AppState {
    pub store: AdvertisementStore,
    pub images: ImageRegistry,
    pub route: Route,
    pub focus: Focus,
    pub sidebar_selected: usize,
    pub selected_card: usize,
    pub selected_field: AdField,
    pub form: Option<FormState>,
    pub timers: FieldTimers,
    pub toasts: Toasts,
    pub status_line_mode: StatusLineMode,
    pub spinner_index: usize,
    pub spinner_last_tick: Instant,
    pub should_quit: bool,
    seen_version: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AdboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &AdboardConfig) -> Self {
        Self {
            store: AdvertisementStore::new(),
            images: ImageRegistry::default(),
            route: Route::Dashboard,
            focus: Focus::Content,
            sidebar_selected: 1,
            selected_card: 0,
            selected_field: AdField::Name,
            form: None,
            timers: FieldTimers::new(config.copy_feedback(), config.enhance_duration()),
            toasts: Toasts::new(config.toast_lifetime()),
            status_line_mode: StatusLineMode::Info,
            spinner_index: 0,
            spinner_last_tick: Instant::now(),
            should_quit: false,
            seen_version: 0,
        }
    }

    /// Switches pages. Leaving the advertisement page tears down its field timers.
    pub fn navigate(&mut self, route: Route) {
        if let Some(index) = SidebarItem::ALL
            .iter()
            .position(|item| *item == SidebarItem::Page(route))
        {
            self.sidebar_selected = index;
        }
        if self.route == route {
            return;
        }
        if self.route == Route::Advertisements {
            let cancelled = self.timers.cancel_all();
            if cancelled > 0 {
                debug!(cancelled, "cancelled field timers on page exit");
            }
        }
        debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
        };
    }

    pub fn toggle_status_line_mode(&mut self) {
        self.status_line_mode = match self.status_line_mode {
            StatusLineMode::Info => StatusLineMode::Help,
            StatusLineMode::Help => StatusLineMode::Info,
        };
    }

    pub fn activate_sidebar_item(&mut self) {
        match SidebarItem::ALL.get(self.sidebar_selected).copied() {
            Some(SidebarItem::CreateAdvertisement) => self.open_create_form(),
            Some(SidebarItem::Page(route)) => {
                self.navigate(route);
                self.focus = Focus::Content;
            }
            None => {}
        }
    }

    pub fn selected_record(&self) -> Option<&Advertisement> {
        self.store.list().get(self.selected_card)
    }

    pub fn select_next_card(&mut self) -> bool {
        if self.selected_card + 1 < self.store.len() {
            self.selected_card += 1;
            return true;
        }
        false
    }

    pub fn select_prev_card(&mut self) -> bool {
        if self.selected_card > 0 {
            self.selected_card -= 1;
            return true;
        }
        false
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(FormState::create());
    }

    pub fn open_edit_form(&mut self) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        self.form = Some(FormState::edit(record));
        true
    }

    pub fn cancel_form(&mut self) {
        if let Some(form) = self.form.take() {
            form.cancel(&mut self.images);
        }
    }

    /// Validates and dispatches the open form. The form stays open on validation failure.
    pub fn submit_form(&mut self, now: Instant) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        let action = match form.submit() {
            Ok(action) => action,
            Err(errors) => {
                if let Some(field) = [FormField::Name, FormField::Description, FormField::Price]
                    .into_iter()
                    .find(|field| errors.for_field(*field).is_some())
                {
                    form.focus = field;
                }
                debug!(?errors, "form submit blocked by validation");
                return true;
            }
        };

        let (created, record) = match &action {
            AdAction::Add(record) => (true, record.clone()),
            AdAction::Update(record) => (false, record.clone()),
            _ => return false,
        };

        match self.store.dispatch(action) {
            Ok(DispatchOutcome::Unchanged) => {
                warn!(id = %record.id, "edited advertisement no longer exists");
                self.cancel_form();
                self.toasts.push(
                    ToastTone::Failure,
                    "Advertisement no longer exists",
                    now,
                );
            }
            Ok(_) => {
                if let Some(form) = self.form.take() {
                    form.commit(&mut self.images);
                }
                let recent_is_stale = self
                    .store
                    .recent_photo()
                    .is_some_and(|photo| self.images.resolve(photo).is_none());
                if let Some(last) = record.images.last() {
                    let _ = self
                        .store
                        .dispatch(AdAction::SetRecentPhoto(Some(last.clone())));
                } else if recent_is_stale {
                    let _ = self.store.dispatch(AdAction::SetRecentPhoto(None));
                }
                let message = if created {
                    "Advertisement created"
                } else {
                    "Advertisement updated"
                };
                self.toasts.push(ToastTone::Success, message, now);
                self.navigate(Route::Advertisements);
                self.focus = Focus::Content;
                if let Some(index) = self
                    .store
                    .list()
                    .iter()
                    .position(|item| item.id == record.id)
                {
                    self.selected_card = index;
                }
            }
            Err(error) => {
                warn!(%error, "store rejected form submission");
                self.toasts
                    .push(ToastTone::Failure, format!("Could not save: {error}"), now);
            }
        }
        self.sync_with_store();
        true
    }

    pub fn delete_selected(&mut self, now: Instant) -> bool {
        let Some(record) = self.selected_record().cloned() else {
            return false;
        };
        self.timers.cancel_record(&record.id);
        match self.store.dispatch(AdAction::Delete(record.id.clone())) {
            Ok(DispatchOutcome::Changed) => {
                if self
                    .store
                    .recent_photo()
                    .is_some_and(|photo| record.images.iter().any(|image| image == photo))
                {
                    let _ = self.store.dispatch(AdAction::SetRecentPhoto(None));
                }
                self.images.revoke_all(record.images.iter());
                self.toasts.push(
                    ToastTone::Info,
                    format!("Deleted \"{}\"", record.name),
                    now,
                );
            }
            Ok(_) | Err(_) => {}
        }
        self.sync_with_store();
        true
    }

    pub fn is_copied(&self, id: &AdvertisementId, field: AdField) -> bool {
        self.timers.is_active(id, field, FieldAction::Copy)
    }

    pub fn is_enhancing(&self, id: &AdvertisementId, field: AdField) -> bool {
        self.timers.is_active(id, field, FieldAction::Enhance)
    }

    pub fn copy_selected_field(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> bool {
        let field = self.selected_field;
        let Some(record) = self.selected_record() else {
            return false;
        };
        let id = record.id.clone();
        if self.is_copied(&id, field) {
            return false;
        }
        let text = record.field_text(field);
        match clipboard.set_text(&text) {
            Ok(()) => {
                self.timers
                    .start(TimerKey::new(id, field, FieldAction::Copy), now);
            }
            Err(error) => self.report_clipboard_error(field.label(), error, now),
        }
        true
    }

    pub fn copy_selected_record_json(
        &mut self,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        let mut export = record.clone();
        export.images = export
            .images
            .iter()
            .map(|reference| {
                self.images
                    .export_url(reference)
                    .unwrap_or_else(|| reference.clone())
            })
            .collect();
        let json = match serde_json::to_string_pretty(&export) {
            Ok(json) => json,
            Err(error) => {
                self.toasts
                    .push(ToastTone::Failure, format!("Could not encode record: {error}"), now);
                return true;
            }
        };
        match clipboard.set_text(&json) {
            Ok(()) => self
                .toasts
                .push(ToastTone::Success, "Copied record as JSON", now),
            Err(error) => self.report_clipboard_error("record", error, now),
        }
        true
    }

    fn report_clipboard_error(&mut self, what: &str, error: ClipboardError, now: Instant) {
        warn!(%error, what, "clipboard write failed");
        self.toasts
            .push(ToastTone::Failure, format!("Failed to copy {what}: {error}"), now);
    }

    /// Starts the simulated enhancement. The record is not modified.
    pub fn enhance_selected_field(&mut self, now: Instant) -> bool {
        let field = self.selected_field;
        let Some(record) = self.selected_record() else {
            return false;
        };
        let key = TimerKey::new(record.id.clone(), field, FieldAction::Enhance);
        if !self.timers.start(key, now) {
            return false;
        }
        debug!(field = field.label(), "enhancement started");
        true
    }

    pub fn create_facebook_ad(&mut self, now: Instant) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        let id = record.id.clone();
        let name = record.name.clone();
        if self.store.dispatch(AdAction::FacebookAdIntent(id)).is_ok() {
            self.toasts.push(
                ToastTone::Info,
                format!("Facebook ad requested for \"{name}\""),
                now,
            );
        }
        true
    }

    pub fn paste_clipboard_image(
        &mut self,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> bool {
        if self.form.is_none() {
            return false;
        }
        match clipboard.read_image(MAX_CLIPBOARD_IMAGE_BYTES) {
            Ok(image) => {
                if let Some(form) = self.form.as_mut() {
                    form.add_clipboard_image(image, &mut self.images);
                }
            }
            Err(ClipboardError::NotAvailable) => {
                self.toasts
                    .push(ToastTone::Info, "No image found in clipboard", now);
            }
            Err(ClipboardError::TooLarge { bytes, max_bytes }) => {
                self.toasts.push(
                    ToastTone::Failure,
                    format!(
                        "Clipboard image is too large ({}KB > {}KB)",
                        bytes / 1024,
                        max_bytes / 1024
                    ),
                    now,
                );
            }
            Err(error) => {
                warn!(%error, "clipboard image paste failed");
                self.toasts
                    .push(ToastTone::Failure, format!("Image paste failed: {error}"), now);
            }
        }
        true
    }

    /// Advances timers, notifications and the spinner. Returns true when a redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        let expired = if self.timers.is_empty() {
            Vec::new()
        } else {
            self.timers.tick(now)
        };
        for key in expired {
            changed = true;
            if key.action != FieldAction::Enhance {
                continue;
            }
            if self.store.get(&key.id).is_none() {
                continue;
            }
            let field = key.field;
            let result = self.store.dispatch(AdAction::EnhanceIntent {
                id: key.id,
                field: Some(field),
            });
            if result.is_ok() {
                info!(field = field.label(), "simulated enhancement finished");
                let mut label = field.label().to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                self.toasts
                    .push(ToastTone::Success, format!("{label} enhanced with AI"), now);
            }
        }
        if self.toasts.prune(now) {
            changed = true;
        }
        if self.update_spinner(now) {
            changed = true;
        }
        if self.sync_with_store() {
            changed = true;
        }
        changed
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_index % SPINNER_FRAMES.len()]
    }

    fn update_spinner(&mut self, now: Instant) -> bool {
        if !self.timers.any_active(FieldAction::Enhance) {
            self.spinner_index = 0;
            self.spinner_last_tick = now;
            return false;
        }
        if now.duration_since(self.spinner_last_tick) >= SPINNER_INTERVAL {
            self.spinner_last_tick = now;
            self.spinner_index = self.spinner_index.wrapping_add(1);
            return true;
        }
        false
    }

    /// Re-derives view selection after the store changed.
    pub fn sync_with_store(&mut self) -> bool {
        let snapshot = self.store.snapshot();
        if snapshot.version == self.seen_version {
            return false;
        }
        self.seen_version = snapshot.version;
        self.selected_card = self
            .selected_card
            .min(snapshot.records.len().saturating_sub(1));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::app::state::{Focus, FormField, Route, ToastTone};
    use crate::app::store::{AdField, IntentKind};
    use crate::app::util::clipboard::fake::FakeClipboard;
    use crate::app::util::ClipboardImage;
    use std::time::{Duration, Instant};

    fn pasted_image() -> ClipboardImage {
        ClipboardImage {
            data_url: "data:image/png;base64,AAAA".to_string(),
            width: 4,
            height: 3,
            encoded_bytes: 3,
        }
    }

    fn create(app: &mut AppState, name: &str, description: &str, price: &str, now: Instant) {
        app.open_create_form();
        let form = app.form.as_mut().expect("form open");
        form.name.set_from(name);
        form.description.set_from(description);
        form.price.set_from(price);
        assert!(app.submit_form(now));
        assert!(app.form.is_none(), "form should close after valid submit");
    }

    #[test]
    fn create_bike_from_empty_collection() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);

        assert_eq!(app.store.len(), 1);
        let record = &app.store.list()[0];
        assert_eq!(record.price, 120.0);
        assert!(!record.id.as_str().is_empty());
        assert_eq!(app.route, Route::Advertisements);
        assert_eq!(
            app.toasts.latest().map(|toast| toast.tone),
            Some(ToastTone::Success)
        );
    }

    #[test]
    fn every_valid_submission_gets_a_fresh_id() {
        let mut app = AppState::default();
        let now = Instant::now();
        for index in 0..5 {
            create(&mut app, &format!("Item {index}"), "desc", "1", now);
        }
        let mut ids: Vec<String> = app
            .store
            .list()
            .iter()
            .map(|record| record.id.to_string())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn invalid_submit_keeps_form_open_and_focuses_first_error() {
        let mut app = AppState::default();
        app.open_create_form();
        if let Some(form) = app.form.as_mut() {
            form.name.set_from("Bike");
            form.focus = FormField::Cancel;
        }
        assert!(app.submit_form(Instant::now()));
        let form = app.form.as_ref().expect("form still open");
        assert_eq!(form.focus, FormField::Description);
        assert!(app.store.is_empty());
    }

    #[test]
    fn deleting_only_record_returns_to_empty_state() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        assert!(app.delete_selected(now));
        assert!(app.store.is_empty());
        assert!(app.selected_record().is_none());
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn edit_price_keeps_id_and_other_fields() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let before = app.store.list()[0].clone();

        assert!(app.open_edit_form());
        app.form.as_mut().expect("form").price.set_from("150");
        assert!(app.submit_form(now));

        let after = &app.store.list()[0];
        assert_eq!(after.id, before.id);
        assert_eq!(after.price, 150.0);
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.images, before.images);
    }

    #[test]
    fn editing_a_record_deleted_meanwhile_reports_failure() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let id = app.store.list()[0].id.clone();

        assert!(app.open_edit_form());
        if let Some(form) = app.form.as_mut() {
            form.add_clipboard_image(pasted_image(), &mut app.images);
        }
        assert_eq!(app.images.len(), 1);
        app.store.delete(&id);
        assert!(app.submit_form(now));

        assert!(app.form.is_none());
        assert!(app.store.is_empty());
        assert_eq!(app.images.len(), 0);
        assert_eq!(
            app.toasts.latest().map(|toast| toast.tone),
            Some(ToastTone::Failure)
        );
    }

    #[test]
    fn copy_sets_indicator_then_reverts() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let id = app.store.list()[0].id.clone();
        let mut clipboard = FakeClipboard::default();

        app.selected_field = AdField::Price;
        assert!(app.copy_selected_field(&mut clipboard, now));
        assert_eq!(clipboard.written, vec!["120".to_string()]);
        assert!(app.is_copied(&id, AdField::Price));
        assert!(!app.is_copied(&id, AdField::Name));

        app.tick(now + Duration::from_millis(1999));
        assert!(app.is_copied(&id, AdField::Price));
        app.tick(now + Duration::from_millis(2000));
        assert!(!app.is_copied(&id, AdField::Price));
    }

    #[test]
    fn copy_failure_reports_toast_and_keeps_record() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let before = app.store.list().to_vec();
        let mut clipboard = FakeClipboard {
            fail: true,
            ..FakeClipboard::default()
        };

        assert!(app.copy_selected_field(&mut clipboard, now));
        let id = app.store.list()[0].id.clone();
        assert!(!app.is_copied(&id, AdField::Name));
        assert_eq!(
            app.toasts.latest().map(|toast| toast.tone),
            Some(ToastTone::Failure)
        );
        assert_eq!(app.store.list(), before.as_slice());
    }

    #[test]
    fn copy_record_json_contains_fields() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let mut clipboard = FakeClipboard::default();
        assert!(app.copy_selected_record_json(&mut clipboard, now));
        let value: serde_json::Value =
            serde_json::from_str(&clipboard.written[0]).expect("json");
        assert_eq!(value["name"], "Bike");
        assert_eq!(value["price"], 120.0);
    }

    #[test]
    fn copy_record_json_exports_portable_image_urls() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bike.png");
        std::fs::write(&path, b"png").expect("write image");

        let mut app = AppState::default();
        let now = Instant::now();
        app.open_create_form();
        if let Some(form) = app.form.as_mut() {
            form.name.set_from("Bike");
            form.description.set_from("Used bike");
            form.price.set_from("120");
            form.image_path.set_from(&format!("'{}'", path.display()));
            form.add_image_paths(&mut app.images).expect("valid path");
        }
        assert!(app.submit_form(now));

        let mut clipboard = FakeClipboard::default();
        assert!(app.copy_selected_record_json(&mut clipboard, now));
        let value: serde_json::Value =
            serde_json::from_str(&clipboard.written[0]).expect("json");
        let image = value["images"][0].as_str().expect("image url");
        assert!(image.starts_with("file://"));
        assert!(image.ends_with("bike.png"));
        assert!(app.store.list()[0].images[0].starts_with("blob:adboard/"));
    }

    #[test]
    fn removing_every_image_on_edit_clears_recent_photo() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bike.png");
        std::fs::write(&path, b"png").expect("write image");

        let mut app = AppState::default();
        let now = Instant::now();
        app.open_create_form();
        if let Some(form) = app.form.as_mut() {
            form.name.set_from("Bike");
            form.description.set_from("Used bike");
            form.price.set_from("120");
            form.image_path.set_from(&path.display().to_string());
            form.add_image_paths(&mut app.images).expect("valid path");
        }
        assert!(app.submit_form(now));
        let photo = app.store.list()[0].images[0].clone();
        assert_eq!(app.store.recent_photo(), Some(photo.as_str()));

        assert!(app.open_edit_form());
        if let Some(form) = app.form.as_mut() {
            assert!(form.remove_image(0, &mut app.images));
        }
        assert!(app.submit_form(now));

        assert!(app.store.list()[0].images.is_empty());
        assert!(app.images.resolve(&photo).is_none());
        assert_eq!(app.store.recent_photo(), None);
    }

    #[test]
    fn edit_without_images_keeps_another_records_photo() {
        let mut app = AppState::default();
        let now = Instant::now();
        app.open_create_form();
        if let Some(form) = app.form.as_mut() {
            form.name.set_from("Lamp");
            form.description.set_from("Desk lamp");
            form.price.set_from("20");
            form.add_clipboard_image(pasted_image(), &mut app.images);
        }
        assert!(app.submit_form(now));
        let photo = app.store.list()[0].images[0].clone();
        create(&mut app, "Bike", "Used bike", "120", now);

        assert!(app.open_edit_form());
        if let Some(form) = app.form.as_mut() {
            form.price.set_from("110");
        }
        assert!(app.submit_form(now));
        assert_eq!(app.store.recent_photo(), Some(photo.as_str()));
    }

    #[test]
    fn enhance_disables_then_records_intent_without_changing_record() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let before = app.store.list().to_vec();
        let id = before[0].id.clone();

        app.selected_field = AdField::Description;
        assert!(app.enhance_selected_field(now));
        assert!(app.is_enhancing(&id, AdField::Description));
        assert!(!app.enhance_selected_field(now + Duration::from_millis(100)));

        app.tick(now + Duration::from_millis(1499));
        assert!(app.is_enhancing(&id, AdField::Description));
        assert_eq!(app.store.recent_intents().count(), 0);

        app.tick(now + Duration::from_millis(1500));
        assert!(!app.is_enhancing(&id, AdField::Description));
        let intent = app.store.recent_intents().next().expect("intent recorded");
        assert_eq!(intent.kind, IntentKind::Enhance);
        assert_eq!(intent.field, Some(AdField::Description));
        assert_eq!(app.store.list(), before.as_slice());
    }

    #[test]
    fn leaving_page_cancels_pending_enhancement() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        assert!(app.enhance_selected_field(now));

        app.navigate(Route::Dashboard);
        app.tick(now + Duration::from_secs(5));
        assert_eq!(app.store.recent_intents().count(), 0);
    }

    #[test]
    fn deleting_record_cancels_its_timers() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        assert!(app.enhance_selected_field(now));
        assert!(app.delete_selected(now));
        app.tick(now + Duration::from_secs(5));
        assert_eq!(app.store.recent_intents().count(), 0);
        assert!(app.timers.is_empty());
    }

    #[test]
    fn facebook_ad_is_intent_only() {
        let mut app = AppState::default();
        let now = Instant::now();
        create(&mut app, "Bike", "Used bike", "120", now);
        let version = app.store.version();
        assert!(app.create_facebook_ad(now));
        assert_eq!(app.store.version(), version);
        assert_eq!(
            app.store.recent_intents().next().map(|intent| intent.kind),
            Some(IntentKind::FacebookAd)
        );
    }

    #[test]
    fn cancel_discards_form_without_dispatch() {
        let mut app = AppState::default();
        app.open_create_form();
        app.form.as_mut().expect("form").name.set_from("Bike");
        app.cancel_form();
        assert!(app.form.is_none());
        assert!(app.store.is_empty());
        assert!(app.images.is_empty());
    }

    #[test]
    fn sidebar_create_item_opens_form() {
        let mut app = AppState::default();
        app.focus = Focus::Sidebar;
        app.sidebar_selected = 0;
        app.activate_sidebar_item();
        assert!(app.form.is_some());

        app.cancel_form();
        app.sidebar_selected = 2;
        app.activate_sidebar_item();
        assert_eq!(app.route, Route::Advertisements);
        assert_eq!(app.focus, Focus::Content);
    }

    #[test]
    fn clipboard_image_paste_adds_selection() {
        let mut app = AppState::default();
        let now = Instant::now();
        let mut clipboard = FakeClipboard {
            image: Some(crate::app::util::ClipboardImage {
                data_url: "data:image/png;base64,AAAA".to_string(),
                width: 2,
                height: 2,
                encoded_bytes: 3,
            }),
            ..FakeClipboard::default()
        };
        assert!(!app.paste_clipboard_image(&mut clipboard, now));

        app.open_create_form();
        assert!(app.paste_clipboard_image(&mut clipboard, now));
        assert_eq!(app.form.as_ref().map(|form| form.image_count()), Some(1));
        assert_eq!(app.images.len(), 1);
    }
}
