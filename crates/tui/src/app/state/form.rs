use crate::app::store::{format_price, AdAction, Advertisement, AdvertisementId};
use crate::app::util::{
    parse_image_paths, ClipboardImage, ImageRegistry, ImageSelectionError, ImageSource,
};
use tracing::debug;

use super::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
    Images,
    Submit,
    Cancel,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Description,
        FormField::Price,
        FormField::Images,
        FormField::Submit,
        FormField::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Post Name",
            FormField::Description => "Description",
            FormField::Price => "Price",
            FormField::Images => "Images",
            FormField::Submit => "Submit",
            FormField::Cancel => "Cancel",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(AdvertisementId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedImage {
    pub reference: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub images: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.images.is_none()
    }

    pub fn for_field(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::Description => self.description.as_deref(),
            FormField::Price => self.price.as_deref(),
            FormField::Images => self.images.as_deref(),
            FormField::Submit | FormField::Cancel => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedForm {
    pub name: String,
    pub description: String,
    pub price: f64,
}

pub struct FormState {
    pub mode: FormMode,
    pub name: InputState,
    pub description: InputState,
    pub price: InputState,
    pub image_path: InputState,
    pub focus: FormField,
    pub existing_images: Vec<String>,
    pub selected_images: Vec<SelectedImage>,
    pub image_cursor: usize,
    pub errors: FormErrors,
    removed_existing: Vec<String>,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: InputState::default(),
            description: InputState::default(),
            price: InputState::default(),
            image_path: InputState::default(),
            focus: FormField::Name,
            existing_images: Vec::new(),
            selected_images: Vec::new(),
            image_cursor: 0,
            errors: FormErrors::default(),
            removed_existing: Vec::new(),
        }
    }

    pub fn edit(record: &Advertisement) -> Self {
        let mut form = Self::create();
        form.mode = FormMode::Edit(record.id.clone());
        form.name.set_from(&record.name);
        form.description.set_from(&record.description);
        form.price.set_from(&format_price(record.price));
        form.existing_images = record.images.clone();
        form
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Advertisement"
        } else {
            "Create Advertisement"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Advertisement"
        } else {
            "Create Advertisement"
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn active_input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Price => Some(&mut self.price),
            FormField::Images => Some(&mut self.image_path),
            FormField::Submit | FormField::Cancel => None,
        }
    }

    pub fn input_for(&self, field: FormField) -> Option<&InputState> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Description => Some(&self.description),
            FormField::Price => Some(&self.price),
            FormField::Images => Some(&self.image_path),
            FormField::Submit | FormField::Cancel => None,
        }
    }

    /// Total entries in the image strip: kept existing images, then new selections.
    pub fn image_count(&self) -> usize {
        self.existing_images.len() + self.selected_images.len()
    }

    pub fn validate(&self) -> Result<ValidatedForm, FormErrors> {
        let mut errors = FormErrors::default();
        let name = self.name.current().trim().to_string();
        let description = self.description.current().trim().to_string();
        let price_text = self.price.current().trim().to_string();

        if name.is_empty() {
            errors.name = Some("Post name is required".to_string());
        }
        if description.is_empty() {
            errors.description = Some("Description is required".to_string());
        }
        let price = if price_text.is_empty() {
            errors.price = Some("Price is required".to_string());
            None
        } else {
            match price_text.parse::<f64>() {
                Ok(value) if !value.is_finite() => {
                    errors.price = Some("Price must be a number".to_string());
                    None
                }
                Ok(value) if value < 0.0 => {
                    errors.price = Some("Price cannot be negative".to_string());
                    None
                }
                // Folds -0 into 0.
                Ok(value) => Some(value + 0.0),
                Err(_) => {
                    errors.price = Some("Price must be a number".to_string());
                    None
                }
            }
        };

        match price {
            Some(price) if errors.is_empty() => Ok(ValidatedForm {
                name,
                description,
                price,
            }),
            _ => Err(errors),
        }
    }

    /// Refreshes field errors after an edit. Only runs once a submit has surfaced errors.
    pub fn revalidate(&mut self) {
        if self.errors.name.is_none()
            && self.errors.description.is_none()
            && self.errors.price.is_none()
        {
            return;
        }
        let images = self.errors.images.take();
        self.errors = self.validate().err().unwrap_or_default();
        self.errors.images = images;
    }

    /// Parses the picker input and appends one transient reference per valid path.
    /// Nothing is added when any path is rejected.
    pub fn add_image_paths(
        &mut self,
        registry: &mut ImageRegistry,
    ) -> Result<usize, ImageSelectionError> {
        let paths = match parse_image_paths(&self.image_path.current()) {
            Ok(paths) => paths,
            Err(error) => {
                self.errors.images = Some(error.to_string());
                return Err(error);
            }
        };
        let added = paths.len();
        for path in paths {
            let source = ImageSource::File(path);
            let label = source.label();
            let reference = registry.create(source);
            self.selected_images.push(SelectedImage { reference, label });
        }
        self.image_path.clear();
        self.errors.images = None;
        self.image_cursor = self.image_count().saturating_sub(1);
        Ok(added)
    }

    pub fn add_clipboard_image(&mut self, image: ClipboardImage, registry: &mut ImageRegistry) {
        let source = ImageSource::Clipboard(image);
        let label = source.label();
        let reference = registry.create(source);
        self.selected_images.push(SelectedImage { reference, label });
        self.errors.images = None;
        self.image_cursor = self.image_count().saturating_sub(1);
    }

    /// Removes the image at `index` in the combined strip. New selections are revoked
    /// immediately; existing ones are revoked only once the edit is submitted.
    pub fn remove_image(&mut self, index: usize, registry: &mut ImageRegistry) -> bool {
        let existing_len = self.existing_images.len();
        if index < existing_len {
            let reference = self.existing_images.remove(index);
            self.removed_existing.push(reference);
        } else if index - existing_len < self.selected_images.len() {
            let selected = self.selected_images.remove(index - existing_len);
            registry.revoke(&selected.reference);
        } else {
            return false;
        }
        self.image_cursor = self.image_cursor.min(self.image_count().saturating_sub(1));
        true
    }

    pub fn move_image_cursor(&mut self, delta: isize) {
        let count = self.image_count();
        if count == 0 {
            self.image_cursor = 0;
            return;
        }
        let next = self.image_cursor as isize + delta;
        self.image_cursor = next.clamp(0, count as isize - 1) as usize;
    }

    /// Validates and builds the store action. Image state is left untouched so the
    /// form can still be cancelled or retried if the store rejects the action.
    pub fn submit(&mut self) -> Result<AdAction, FormErrors> {
        let validated = match self.validate() {
            Ok(validated) => validated,
            Err(mut errors) => {
                errors.images = self.errors.images.take();
                self.errors = errors;
                return Err(self.errors.clone());
            }
        };
        self.errors = FormErrors::default();

        let new_images = self
            .selected_images
            .iter()
            .map(|selected| selected.reference.clone());
        let action = match &self.mode {
            FormMode::Create => AdAction::Add(Advertisement {
                id: AdvertisementId::generate(),
                name: validated.name,
                description: validated.description,
                price: validated.price,
                images: new_images.collect(),
            }),
            FormMode::Edit(id) => AdAction::Update(Advertisement {
                id: id.clone(),
                name: validated.name,
                description: validated.description,
                price: validated.price,
                images: self.existing_images.iter().cloned().chain(new_images).collect(),
            }),
        };
        debug!(mode = ?self.mode, "form submitted");
        Ok(action)
    }

    /// Closes the form after the store accepted its action. New selections now belong to
    /// the record; existing images removed during the edit are revoked.
    pub fn commit(self, registry: &mut ImageRegistry) {
        registry.revoke_all(self.removed_existing.iter());
        debug!(
            mode = ?self.mode,
            revoked = self.removed_existing.len(),
            "form committed"
        );
    }

    /// Drops all pending state. New selections are revoked; the record's existing
    /// images are left alone.
    pub fn cancel(mut self, registry: &mut ImageRegistry) {
        let references: Vec<String> = self
            .selected_images
            .drain(..)
            .map(|selected| selected.reference)
            .collect();
        registry.revoke_all(references.iter());
        debug!(mode = ?self.mode, discarded = references.len(), "form cancelled");
    }
}
