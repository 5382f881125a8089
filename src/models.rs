//! Domain types for the product catalog.

/// A single catalog record as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub location: Option<String>,
}

impl Product {
    /// Value of the stocked quantity at the unit price.
    pub fn line_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Field values for a product that does not exist yet.
///
/// Optional text fields are plain strings here; the store treats an
/// empty or whitespace-only value as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub location: String,
}

/// A partial update for an existing product.
///
/// `None` leaves the field unchanged. For the optional text fields an
/// empty string clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub location: Option<String>,
}

impl ProductChanges {
    /// True when no field is set at all.
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.location.is_none()
    }
}

/// Columns a product listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Code,
    Name,
    Quantity,
    Price,
    Category,
    Location,
}

impl SortKey {
    /// The database column backing this key.
    pub(crate) fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Code => "code",
            SortKey::Name => "name",
            SortKey::Quantity => "quantity",
            SortKey::Price => "price",
            SortKey::Category => "category",
            SortKey::Location => "location",
        }
    }

    /// Human-readable column label.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Code => "Code",
            SortKey::Name => "Name",
            SortKey::Quantity => "Quantity",
            SortKey::Price => "Price",
            SortKey::Category => "Category",
            SortKey::Location => "Location",
        }
    }

    /// Parses a user-supplied field name, case-insensitively.
    pub fn parse(input: &str) -> Option<SortKey> {
        match input.trim().to_lowercase().as_str() {
            "id" | "identifier" => Some(SortKey::Id),
            "code" => Some(SortKey::Code),
            "name" => Some(SortKey::Name),
            "quantity" => Some(SortKey::Quantity),
            "price" => Some(SortKey::Price),
            "category" => Some(SortKey::Category),
            "location" => Some(SortKey::Location),
            _ => None,
        }
    }

    /// All keys in display order.
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Id,
            SortKey::Code,
            SortKey::Name,
            SortKey::Quantity,
            SortKey::Price,
            SortKey::Category,
            SortKey::Location,
        ]
    }
}
