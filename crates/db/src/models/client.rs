//! Client entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use restring_core::error::CoreError;
use restring_core::resolve::{ClientPreferences, TENSION_MAX, TENSION_MIN};
use restring_core::types::{CatalogId, Timestamp};

/// A row from the `clients` table.
///
/// Preference fields are independently nullable; a client may store a main
/// string preference and nothing for the cross side.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: Uuid,
    pub stringer_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub default_tension_main: Option<f64>,
    pub default_tension_cross: Option<f64>,
    pub preferred_main_brand_id: Option<CatalogId>,
    pub preferred_main_model_id: Option<CatalogId>,
    pub preferred_cross_brand_id: Option<CatalogId>,
    pub preferred_cross_model_id: Option<CatalogId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Client {
    /// The preference slice of this row, in the shape the resolver takes.
    pub fn preferences(&self) -> ClientPreferences {
        ClientPreferences {
            preferred_main_brand_id: self.preferred_main_brand_id,
            preferred_main_model_id: self.preferred_main_model_id,
            default_tension_main: self.default_tension_main,
            preferred_cross_brand_id: self.preferred_cross_brand_id,
            preferred_cross_model_id: self.preferred_cross_model_id,
            default_tension_cross: self.default_tension_cross,
        }
    }
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub stringer_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub default_tension_main: Option<f64>,
    pub default_tension_cross: Option<f64>,
    pub preferred_main_brand_id: Option<CatalogId>,
    pub preferred_main_model_id: Option<CatalogId>,
    pub preferred_cross_brand_id: Option<CatalogId>,
    pub preferred_cross_model_id: Option<CatalogId>,
}

impl CreateClient {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_full_name(&self.full_name)?;
        validate_email(self.email.as_deref())?;
        validate_tension("default_tension_main", self.default_tension_main)?;
        validate_tension("default_tension_cross", self.default_tension_cross)
    }
}

/// DTO for updating an existing client. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub default_tension_main: Option<f64>,
    pub default_tension_cross: Option<f64>,
    pub preferred_main_brand_id: Option<CatalogId>,
    pub preferred_main_model_id: Option<CatalogId>,
    pub preferred_cross_brand_id: Option<CatalogId>,
    pub preferred_cross_model_id: Option<CatalogId>,
}

impl UpdateClient {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(full_name) = &self.full_name {
            validate_full_name(full_name)?;
        }
        validate_email(self.email.as_deref())?;
        validate_tension("default_tension_main", self.default_tension_main)?;
        validate_tension("default_tension_cross", self.default_tension_cross)
    }
}

/// Query parameters for listing clients.
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    pub stringer_id: Option<Uuid>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

fn validate_full_name(full_name: &str) -> Result<(), CoreError> {
    if full_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "full_name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: Option<&str>) -> Result<(), CoreError> {
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(CoreError::Validation(format!(
                "email {email:?} is not a valid address"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_tension(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    if let Some(tension) = value {
        if !(TENSION_MIN..=TENSION_MAX).contains(&tension) {
            return Err(CoreError::Validation(format!(
                "{field} must be between {TENSION_MIN} and {TENSION_MAX}, got {tension}"
            )));
        }
    }
    Ok(())
}
