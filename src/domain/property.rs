//! Property listing model and search-response ingestion.
//!
//! A [`PropertyRecord`] is one listing as returned by the remote search provider.
//! Records are immutable values keyed by `property_id`; favorite state is never
//! stored on them (see [`crate::favorites::FavoriteStore`]).

use super::error::{PropfolioError, Result};
use serde::{Deserialize, Serialize};

/// One listing returned by the remote property search.
///
/// Only `property_id` is required. Every other field may be missing from the
/// provider payload; numeric fields read as `0` through the accessor methods,
/// which is how the filter and sort pipelines compare them.
///
/// Field names follow the camelCase wire names (`propertyId`, `imageUrl`, ...).
/// The provider's native names (`zpid`, `imgSrc`, `lotAreaValue`,
/// `daysOnZillow`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(alias = "zpid")]
    pub property_id: String,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub bedrooms: Option<f64>,

    #[serde(default)]
    pub bathrooms: Option<f64>,

    #[serde(default, alias = "imgSrc")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub property_type: Option<String>,

    #[serde(default)]
    pub listing_status: Option<String>,

    /// Lot area; `-1` is the provider's "unknown" sentinel.
    #[serde(default, alias = "lotAreaValue")]
    pub lot_area: Option<f64>,

    #[serde(default, alias = "daysOnZillow")]
    pub days_on_listing: Option<i64>,
}

/// Lot-area value the provider uses for "unknown".
pub const LOT_AREA_UNKNOWN: f64 = -1.0;

impl PropertyRecord {
    /// Creates a record with only its identifier set.
    ///
    /// # Examples
    ///
    /// ```
    /// use propfolio::PropertyRecord;
    ///
    /// let record = PropertyRecord::new("a").with_bedrooms(3.0).with_price(300_000.0);
    /// assert_eq!(record.property_id, "a");
    /// assert_eq!(record.bathrooms_or_zero(), 0.0);
    /// ```
    #[must_use]
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            address: None,
            price: None,
            bedrooms: None,
            bathrooms: None,
            image_url: None,
            property_type: None,
            listing_status: None,
            lot_area: None,
            days_on_listing: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_bedrooms(mut self, bedrooms: f64) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    #[must_use]
    pub fn with_bathrooms(mut self, bathrooms: f64) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    #[must_use]
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    #[must_use]
    pub fn with_listing_status(mut self, listing_status: impl Into<String>) -> Self {
        self.listing_status = Some(listing_status.into());
        self
    }

    #[must_use]
    pub fn with_lot_area(mut self, lot_area: f64) -> Self {
        self.lot_area = Some(lot_area);
        self
    }

    #[must_use]
    pub fn with_days_on_listing(mut self, days: i64) -> Self {
        self.days_on_listing = Some(days);
        self
    }

    #[must_use]
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    #[must_use]
    pub fn bedrooms_or_zero(&self) -> f64 {
        self.bedrooms.unwrap_or(0.0)
    }

    #[must_use]
    pub fn bathrooms_or_zero(&self) -> f64 {
        self.bathrooms.unwrap_or(0.0)
    }

    #[must_use]
    pub fn days_on_listing_or_zero(&self) -> i64 {
        self.days_on_listing.unwrap_or(0)
    }
}

/// Top-level shape of a search provider response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub props: Vec<PropertyRecord>,
}

/// Decodes a search response document into its listing records.
///
/// Missing optional fields are tolerated per record. Any structural problem
/// (invalid JSON, no `props` array, a record without an id, a field of the
/// wrong type) rejects the whole batch.
///
/// # Errors
///
/// Returns [`PropfolioError::Ingestion`] when the document cannot be decoded.
///
/// # Examples
///
/// ```
/// use propfolio::parse_search_response;
///
/// let records = parse_search_response(r#"{"props": [{"zpid": "42", "price": 1.0}]}"#)?;
/// assert_eq!(records[0].property_id, "42");
/// # Ok::<(), propfolio::PropfolioError>(())
/// ```
pub fn parse_search_response(json: &str) -> Result<Vec<PropertyRecord>> {
    let response: SearchResponse = serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, "rejecting search response batch");
        PropfolioError::Ingestion(format!("failed to decode search response: {e}"))
    })?;

    tracing::debug!(count = response.props.len(), "search response decoded");
    Ok(response.props)
}
