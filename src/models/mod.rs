pub mod financials;
