//! Invoice records sourced from the payment processor.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Days a settled invoice counts as membership proof.
pub const MEMBERSHIP_WINDOW_DAYS: i64 = 30;

/// Invoice status on the payment processor.
///
/// `Complete` is the legacy name some processors still emit for a settled
/// invoice; both count as paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    New,
    Processing,
    Settled,
    Complete,
    Expired,
    Invalid,
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Whether the payment has fully cleared.
    pub fn is_settled(&self) -> bool {
        matches!(self, InvoiceStatus::Settled | InvoiceStatus::Complete)
    }

    /// Wire name used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::New => "New",
            InvoiceStatus::Processing => "Processing",
            InvoiceStatus::Settled => "Settled",
            InvoiceStatus::Complete => "Complete",
            InvoiceStatus::Expired => "Expired",
            InvoiceStatus::Invalid => "Invalid",
            InvoiceStatus::Unknown => "Unknown",
        }
    }
}

/// An invoice as returned by the payment processor. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,

    pub status: InvoiceStatus,

    /// Creation time; unix seconds on the wire.
    #[serde(rename = "createdTime", with = "chrono::serde::ts_seconds")]
    pub created_time: DateTime<Utc>,

    /// Amount as a decimal string, exactly as the processor reports it.
    pub amount: String,

    pub currency: String,

    /// Free-form key/value metadata attached at invoice creation.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Invoice {
    /// When this invoice stops counting as membership proof.
    pub fn membership_expiry(&self) -> DateTime<Utc> {
        self.created_time + Duration::days(MEMBERSHIP_WINDOW_DAYS)
    }

    /// Whether the invoice was created within the membership window ending
    /// at `now`. The boundary is inclusive: an invoice created exactly
    /// `MEMBERSHIP_WINDOW_DAYS` ago still qualifies.
    pub fn within_window(&self, now: DateTime<Utc>) -> bool {
        self.created_time >= now - Duration::days(MEMBERSHIP_WINDOW_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn invoice_created_at(created: DateTime<Utc>) -> Invoice {
        Invoice {
            id: "inv-1".to_string(),
            status: InvoiceStatus::Settled,
            created_time: created,
            amount: "21.00".to_string(),
            currency: "EUR".to_string(),
            metadata: Map::new(),
        }
    }

    #[test]
    fn settled_and_complete_count_as_paid() {
        assert!(InvoiceStatus::Settled.is_settled());
        assert!(InvoiceStatus::Complete.is_settled());
        assert!(!InvoiceStatus::New.is_settled());
        assert!(!InvoiceStatus::Expired.is_settled());
    }

    #[test]
    fn expiry_is_thirty_days_after_creation() {
        let created = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let invoice = invoice_created_at(created);
        assert_eq!(
            invoice.membership_expiry(),
            Utc.with_ymd_and_hms(2026, 2, 9, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2026, 2, 9, 12, 0, 0).unwrap();
        let exactly_thirty = invoice_created_at(now - Duration::days(30));
        assert!(exactly_thirty.within_window(now));

        let one_second_older =
            invoice_created_at(now - Duration::days(30) - Duration::seconds(1));
        assert!(!one_second_older.within_window(now));
    }

    #[test]
    fn deserializes_processor_json() {
        let json = r#"{
            "id": "FdQ1",
            "status": "Settled",
            "createdTime": 1767052800,
            "amount": "15.00",
            "currency": "EUR",
            "metadata": {"type": "membership", "orderUrl": "https://pay.example/apps/1"}
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Settled);
        assert_eq!(invoice.created_time.timestamp(), 1767052800);
        assert_eq!(invoice.metadata.get("type").unwrap(), "membership");
    }

    #[test]
    fn unknown_status_deserializes_to_unknown() {
        let json = r#"{
            "id": "x",
            "status": "SomethingNew",
            "createdTime": 1767052800,
            "amount": "1",
            "currency": "EUR"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Unknown);
        assert!(invoice.metadata.is_empty());
    }
}
