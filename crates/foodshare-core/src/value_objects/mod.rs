//! Value objects - immutable domain primitives

mod quantity;
mod snowflake;

pub use quantity::{Phase, Quantity, QuantityUnit, UnitParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
