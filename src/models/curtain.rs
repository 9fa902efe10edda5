use serde::{Deserialize, Serialize};

use crate::models::category::CategoryId;

pub type CurtainId = u64;

/// Extensions the backend accepts for uploaded sample images
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// A curtain fabric sample as served by the backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Curtain {
    pub id: CurtainId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub is_new: bool,
    pub category_id: CategoryId,
    #[serde(default)]
    pub category_name: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

/// Raw image attached to a create/update request
#[derive(Clone, PartialEq, Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lowercased extension, if the filename has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

/// One field of a multipart body
#[derive(Clone, PartialEq, Debug)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, upload: ImageUpload },
}

impl FormPart {
    pub fn text(name: &str, value: impl ToString) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Payload for creating or updating a sample
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CurtainForm {
    pub name: String,
    pub category_id: CategoryId,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub material: Option<String>,
    pub width: Option<String>,
    pub pattern: Option<String>,
    pub style: Option<String>,
    pub features: Option<String>,
    pub in_stock: bool,
    pub is_new: bool,
    pub image: Option<ImageUpload>,
}

impl CurtainForm {
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            category_id,
            in_stock: true,
            ..Self::default()
        }
    }

    /// Prefills a form from an existing record, without an image
    pub fn from_curtain(curtain: &Curtain) -> Self {
        Self {
            name: curtain.name.clone(),
            category_id: curtain.category_id,
            description: curtain.description.clone(),
            price: curtain.price,
            material: curtain.material.clone(),
            width: curtain.width.clone(),
            pattern: curtain.pattern.clone(),
            style: curtain.style.clone(),
            features: curtain.features.clone(),
            in_stock: curtain.in_stock,
            is_new: curtain.is_new,
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Checks the rules the backend enforces on uploads
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(format!("invalid price {}", price));
            }
        }
        if let Some(image) = &self.image {
            if !image.has_allowed_extension() {
                return Err(format!(
                    "image '{}' must be one of: {}",
                    image.filename,
                    ALLOWED_IMAGE_EXTENSIONS.join(", ")
                ));
            }
        }
        Ok(())
    }

    /// Multipart fields in submission order; unset optionals are omitted
    pub fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("name", self.name.trim()),
            FormPart::text("category_id", self.category_id),
        ];

        let optional = [
            ("description", &self.description),
            ("material", &self.material),
            ("width", &self.width),
            ("pattern", &self.pattern),
            ("style", &self.style),
            ("features", &self.features),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                parts.push(FormPart::text(name, value));
            }
        }

        if let Some(price) = self.price {
            parts.push(FormPart::text("price", price));
        }
        parts.push(FormPart::text("in_stock", self.in_stock));
        parts.push(FormPart::text("is_new", self.is_new));

        if let Some(image) = &self.image {
            parts.push(FormPart::File {
                name: "image".to_string(),
                upload: image.clone(),
            });
        }
        parts
    }
}
