use thiserror::Error;

/// Terminal states of one dashboard run that stop rendering of KPIs and charts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// The table could not be fetched or parsed.  Fatal for the session.
    #[error("Error loading data from {origin}: {message}")]
    DataLoad { origin: String, message: String },

    /// The source loaded but holds no rows at all.
    #[error("The data source contains no sales records.")]
    EmptySource,

    /// The current selection matches no rows.
    #[error("No data available based on the current filter settings!")]
    EmptySelection,
}

pub type DashboardResult<T> = Result<T, DashboardError>;
