mod bracket_schedule;
mod labor_cost;
mod wage_table;

pub use bracket_schedule::{Bracket, BracketSchedule, ScheduleError};
pub use labor_cost::LaborCostTransform;
pub use wage_table::{WageBin, WageTable, WageTableError};
