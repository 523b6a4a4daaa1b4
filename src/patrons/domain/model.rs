use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::{HoldLimits, PatronId};
use crate::core::library::PatronType;
use crate::patrons::domain::{Hold, OverdueCheckout, PatronInformation};
use crate::patrons::domain::aggregate::PatronBooks;
use crate::utils::date::serializer;

// PatronBooksEntity is the stored shape of a patron's lending state.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronBooksEntity {
    pub patron_id: String,
    pub version: i64,
    pub patron_type: PatronType,
    #[serde(default)]
    pub holds: Vec<Hold>,
    #[serde(default)]
    pub overdue_checkouts: Vec<OverdueCheckout>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronBooksEntity {
    pub fn new(patron_type: PatronType) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            version: 0,
            patron_type,
            holds: vec![],
            overdue_checkouts: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn to_aggregate(&self, limits: HoldLimits) -> PatronBooks {
        PatronBooks::new(
            PatronInformation::new(PatronId::new(self.patron_id.as_str()), self.patron_type),
            self.holds.clone(),
            self.overdue_checkouts.clone(),
            limits,
            self.version,
        )
    }

    // copies aggregate state over the stored row, keeping the version the row was read at
    pub fn merge(&mut self, patron: &PatronBooks) {
        self.patron_type = patron.patron().patron_type;
        self.holds = patron.holds().to_vec();
        self.overdue_checkouts = patron.overdue_checkouts().to_vec();
    }
}
