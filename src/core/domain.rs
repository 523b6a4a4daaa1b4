use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: &str) -> Self {
                $name(id.to_string())
            }

            pub fn random() -> Self {
                $name(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(BookId);
string_id!(PatronId);
string_id!(LibraryBranchId);

// HoldLimits are the thresholds the placing-on-hold policies check against
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub struct HoldLimits {
    pub max_holds: usize,
    pub max_overdue_checkouts: usize,
}

impl Default for HoldLimits {
    fn default() -> Self {
        HoldLimits {
            max_holds: 5,
            max_overdue_checkouts: 2,
        }
    }
}

// Configuration abstracts config options for the lending system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_holds: usize,
    pub max_overdue_checkouts: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        let limits = HoldLimits::default();
        Configuration {
            branch_id: branch_id.to_string(),
            max_holds: limits.max_holds,
            max_overdue_checkouts: limits.max_overdue_checkouts,
        }
    }

    pub fn hold_limits(&self) -> HoldLimits {
        HoldLimits {
            max_holds: self.max_holds,
            max_overdue_checkouts: self.max_overdue_checkouts,
        }
    }
}
