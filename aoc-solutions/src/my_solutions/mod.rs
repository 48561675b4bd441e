pub mod year_2017;
