pub mod bonus;
pub mod payroll;
