pub mod advertisement;
pub mod capture_run;
