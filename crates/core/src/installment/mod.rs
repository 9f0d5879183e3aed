//! Fixed-count installment plans for debts.

pub mod scheduler;
pub mod types;


pub use scheduler::{InstallmentScheduler, ScheduleError};
pub use types::{Installment, InstallmentStatus};
