use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Calculation error: Decimal overflow while computing '{0}'")]
    Overflow(&'static str),
}
