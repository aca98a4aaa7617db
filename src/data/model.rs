use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one row of the price list
// ---------------------------------------------------------------------------

/// A single catalog entry.
///
/// The serialized field names are the wire contract consumed by existing
/// clients and must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Item code, opaque.
    #[serde(rename = "SPC")]
    pub code: String,
    /// Display name; the target of name queries.
    #[serde(rename = "SPN")]
    pub name: String,
    /// Unit-of-sale descriptor, e.g. "EA" or "BOX 12".
    #[serde(rename = "SPPS")]
    pub unit: String,
    /// Unit price; unparseable source text is stored as 0.0.
    #[serde(rename = "SPP")]
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded price list
// ---------------------------------------------------------------------------

/// All records of the source, in file order.
///
/// Order is significant: pages are positional windows over it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

/// At most [`PAGE_SIZE`](super::filter::PAGE_SIZE) records, in working-sequence order.
pub type Page = Vec<Record>;

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// JSON body of both list endpoints: `{"data": [...]}`.
///
/// Carries no totals or has-more flag; anything added here must be additive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceListResponse {
    pub data: Page,
}

impl From<Page> for PriceListResponse {
    fn from(data: Page) -> Self {
        PriceListResponse { data }
    }
}
