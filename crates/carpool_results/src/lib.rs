pub mod proposal;
pub mod result;
mod utils;

pub mod json;

pub use result::{
    assembler::{Diagnostic, ResultManager, ResultSet},
    carpool_result::CarpoolResult,
    fare::{PriceRounder, StepRounder},
    params::ResultParams,
};

#[cfg(test)]
pub(crate) mod test_utils;
