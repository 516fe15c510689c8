//! Multi-criteria narrowing of search results.
//!
//! Every present criterion is an independent predicate and a record survives only
//! if it passes all of them, so the order criteria are applied in never changes
//! the result. Filtering is stable and never mutates its input.

use crate::domain::{PropertyRecord, LOT_AREA_UNKNOWN};
use std::collections::BTreeMap;

/// Optional constraints on a listing set.
///
/// `None` means "no constraint". Text input is converted with
/// [`FilterCriteria::from_text_fields`], which turns unparseable numbers into
/// `None` rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_beds: Option<f64>,
    pub min_baths: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Records reporting the `-1` "unknown" lot area never pass this criterion.
    pub min_lot_area: Option<f64>,
    pub max_days_on_listing: Option<i64>,
    /// Case-insensitive substring of the record's property type.
    pub property_type: Option<String>,
    /// Case-insensitive exact match of the record's listing status.
    pub listing_status: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from the search form's raw text fields.
    ///
    /// Recognised keys: `minBeds`, `minBaths`, `minPrice`, `maxPrice`,
    /// `minLotArea`, `maxDaysOnListing`, `propertyType`, `listingStatus`.
    /// Unknown keys are ignored.
    ///
    /// # Parsing Rules
    ///
    /// - Numeric fields: trimmed, parsed as `f64`; empty, unparseable or
    ///   non-finite text is treated as absent
    /// - `maxDaysOnListing`: must parse as an integer
    /// - Text fields: trimmed; empty text is absent
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use propfolio::search::FilterCriteria;
    ///
    /// let mut fields = BTreeMap::new();
    /// fields.insert("minBeds".to_string(), "3".to_string());
    /// fields.insert("maxPrice".to_string(), "lots".to_string());
    ///
    /// let criteria = FilterCriteria::from_text_fields(&fields);
    /// assert_eq!(criteria.min_beds, Some(3.0));
    /// assert_eq!(criteria.max_price, None);
    /// ```
    #[must_use]
    pub fn from_text_fields(fields: &BTreeMap<String, String>) -> Self {
        let number = |key: &str| fields.get(key).and_then(|s| parse_number(s));
        let text = |key: &str| {
            fields
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            min_beds: number("minBeds"),
            min_baths: number("minBaths"),
            min_price: number("minPrice"),
            max_price: number("maxPrice"),
            min_lot_area: number("minLotArea"),
            max_days_on_listing: fields
                .get("maxDaysOnListing")
                .and_then(|s| s.trim().parse::<i64>().ok()),
            property_type: text("propertyType"),
            listing_status: text("listingStatus"),
        }
    }

    /// Returns `true` if no criterion is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parses numeric filter text, treating anything unusable as absent.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Criteria with their text lowered once per pass.
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    property_type: Option<String>,
    listing_status: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            property_type: criteria.property_type.as_deref().map(str::to_lowercase),
            listing_status: criteria.listing_status.as_deref().map(str::to_lowercase),
        }
    }

    // Equality first, substring scan last.
    fn matches(&self, record: &PropertyRecord) -> bool {
        self.matches_listing_status(record)
            && self.matches_numbers(record)
            && self.matches_property_type(record)
    }

    fn matches_listing_status(&self, record: &PropertyRecord) -> bool {
        self.listing_status.as_ref().map_or(true, |wanted| {
            record
                .listing_status
                .as_deref()
                .is_some_and(|status| status.to_lowercase() == *wanted)
        })
    }

    fn matches_property_type(&self, record: &PropertyRecord) -> bool {
        self.property_type.as_ref().map_or(true, |wanted| {
            record
                .property_type
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(wanted.as_str())
        })
    }

    fn matches_numbers(&self, record: &PropertyRecord) -> bool {
        let c = self.criteria;

        c.min_beds.map_or(true, |min| record.bedrooms_or_zero() >= min)
            && c.min_baths.map_or(true, |min| record.bathrooms_or_zero() >= min)
            && c.min_price.map_or(true, |min| record.price_or_zero() >= min)
            && c.max_price.map_or(true, |max| record.price_or_zero() <= max)
            && c.max_days_on_listing
                .map_or(true, |max| record.days_on_listing_or_zero() <= max)
            && c.min_lot_area.map_or(true, |min| match record.lot_area {
                None => true,
                Some(area) => area != LOT_AREA_UNKNOWN && area >= min,
            })
    }
}

/// Returns the records that pass every present criterion, in input order.
///
/// # Example
///
/// ```
/// use propfolio::PropertyRecord;
/// use propfolio::search::{apply, FilterCriteria};
///
/// let records = vec![
///     PropertyRecord::new("a").with_bedrooms(3.0),
///     PropertyRecord::new("b").with_bedrooms(2.0),
/// ];
/// let criteria = FilterCriteria { min_beds: Some(3.0), ..Default::default() };
///
/// let kept = apply(&records, &criteria);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].property_id, "a");
/// ```
#[must_use]
pub fn apply(records: &[PropertyRecord], criteria: &FilterCriteria) -> Vec<PropertyRecord> {
    let _span = tracing::debug_span!("apply_filters",
        total_records = records.len(),
        criteria = ?criteria
    ).entered();

    if criteria.is_empty() {
        return records.to_vec();
    }

    let matcher = Matcher::new(criteria);
    let kept: Vec<PropertyRecord> = records
        .iter()
        .filter(|record| matcher.matches(record))
        .cloned()
        .collect();

    tracing::debug!(kept_count = kept.len(), "filters applied");
    kept
}
