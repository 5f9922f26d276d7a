//! Services for data aggregation and processing

pub mod aggregator;
pub mod catalog;
pub mod dashboard_client;
pub mod goals;
pub mod insights;
pub mod metrics;
pub mod normalizer;

pub use aggregator::Aggregator;
pub use dashboard_client::DashboardClient;
pub use metrics::EmissionsReport;
pub use normalizer::Normalizer;
