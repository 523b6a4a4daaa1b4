use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;
use crate::hold::domain::model::PlaceOnHoldCommand;

pub mod model;
pub mod service;

// PlaceOnHoldResult is all a caller learns about a hold attempt
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PlaceOnHoldResult {
    Success,
    Rejection,
}

impl Display for PlaceOnHoldResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PlaceOnHoldResult::Success => write!(f, "Success"),
            PlaceOnHoldResult::Rejection => write!(f, "Rejection"),
        }
    }
}

#[async_trait]
pub trait HoldService: Sync + Send {
    // Err when a lookup fails or does not resolve
    async fn place_on_hold(&self, cmd: &PlaceOnHoldCommand) -> LibraryResult<PlaceOnHoldResult>;
}
