/// CSV writers for the appliance, hourly and summary tables.
pub mod export;
