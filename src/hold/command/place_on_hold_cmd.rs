use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::domain::{BookId, LibraryBranchId, PatronId};
use crate::hold::domain::{HoldService, PlaceOnHoldResult};
use crate::hold::domain::model::PlaceOnHoldCommand;
use crate::patrons::domain::duration::NumberOfDays;

pub struct PlaceOnHoldBookCommand {
    hold_service: Box<dyn HoldService>,
}

impl PlaceOnHoldBookCommand {
    pub fn new(hold_service: Box<dyn HoldService>) -> Self {
        Self {
            hold_service,
        }
    }
}

// zero or negative no_of_days fails deserialization
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceOnHoldBookCommandRequest {
    patron_id: PatronId,
    library_branch_id: LibraryBranchId,
    book_id: BookId,
    #[serde(default)]
    no_of_days: Option<NumberOfDays>,
}

impl PlaceOnHoldBookCommandRequest {
    pub fn new(patron_id: &PatronId, library_branch_id: &LibraryBranchId, book_id: &BookId,
               no_of_days: Option<NumberOfDays>) -> Self {
        Self {
            patron_id: patron_id.clone(),
            library_branch_id: library_branch_id.clone(),
            book_id: book_id.clone(),
            no_of_days,
        }
    }

    fn to_command(&self) -> Result<PlaceOnHoldCommand, CommandError> {
        match self.no_of_days {
            Some(days) => PlaceOnHoldCommand::close_ended(
                self.patron_id.clone(), self.library_branch_id.clone(), self.book_id.clone(), days.into())
                .map_err(CommandError::from),
            None => Ok(PlaceOnHoldCommand::open_ended(
                self.patron_id.clone(), self.library_branch_id.clone(), self.book_id.clone())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceOnHoldBookCommandResponse {
    pub result: PlaceOnHoldResult,
}

impl PlaceOnHoldBookCommandResponse {
    pub fn new(result: PlaceOnHoldResult) -> Self {
        Self {
            result,
        }
    }
}

#[async_trait]
impl Command<PlaceOnHoldBookCommandRequest, PlaceOnHoldBookCommandResponse> for PlaceOnHoldBookCommand {
    async fn execute(&self, req: PlaceOnHoldBookCommandRequest) -> Result<PlaceOnHoldBookCommandResponse, CommandError> {
        let cmd = req.to_command()?;
        self.hold_service.place_on_hold(&cmd)
            .await.map_err(CommandError::from).map(PlaceOnHoldBookCommandResponse::new)
    }
}
