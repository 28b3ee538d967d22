use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvertisementId(String);

impl AdvertisementId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> String {
        self.0.chars().take(8).collect()
    }
}

impl From<&str> for AdvertisementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AdvertisementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AdvertisementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: AdvertisementId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
}

impl Advertisement {
    pub fn field_text(&self, field: AdField) -> String {
        match field {
            AdField::Name => self.name.clone(),
            AdField::Description => self.description.clone(),
            AdField::Price => format_price(self.price),
        }
    }
}

/// Renders a price without a trailing `.0` for whole values.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{price:.0}")
    } else {
        price.to_string()
    }
}

/// Text fields of a record that carry per-field card controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdField {
    Name,
    Description,
    Price,
}

impl AdField {
    pub const ALL: [AdField; 3] = [AdField::Name, AdField::Description, AdField::Price];

    pub fn label(self) -> &'static str {
        match self {
            AdField::Name => "name",
            AdField::Description => "description",
            AdField::Price => "price",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AdField::Name => AdField::Description,
            AdField::Description => AdField::Price,
            AdField::Price => AdField::Price,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AdField::Name => AdField::Name,
            AdField::Description => AdField::Name,
            AdField::Price => AdField::Description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_price, AdField, AdvertisementId};

    #[test]
    fn generated_ids_are_distinct() {
        let a = AdvertisementId::generate();
        let b = AdvertisementId::generate();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn format_price_drops_trailing_zero_fraction() {
        assert_eq!(format_price(120.0), "120");
        assert_eq!(format_price(19.5), "19.5");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn field_navigation_clamps_at_edges() {
        assert_eq!(AdField::Name.prev(), AdField::Name);
        assert_eq!(AdField::Price.next(), AdField::Price);
        assert_eq!(AdField::Name.next().next(), AdField::Price);
    }
}
