pub mod analyze;
pub mod rules;
pub mod session;

use formforge::analysis::Movement;
use formforge::error::{FormError, FormResult};

pub(crate) fn parse_movement(name: &str) -> FormResult<Movement> {
    name.trim()
        .parse()
        .map_err(|_| FormError::UnsupportedMovement(name.to_string()))
}
