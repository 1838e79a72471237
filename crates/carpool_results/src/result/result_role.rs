use serde::Serialize;

use super::result_item::ResultItem;

/// The result legs for one role of the counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRole {
    pub seats: u32,
    pub outward: ResultItem,
    #[serde(rename = "return")]
    pub return_item: Option<ResultItem>,
}

impl ResultRole {
    pub fn new(seats: u32, outward: ResultItem) -> Self {
        ResultRole {
            seats,
            outward,
            return_item: None,
        }
    }

    pub fn with_return(mut self, return_item: Option<ResultItem>) -> Self {
        self.return_item = return_item;
        self
    }

    pub fn has_return(&self) -> bool {
        self.return_item.is_some()
    }
}
