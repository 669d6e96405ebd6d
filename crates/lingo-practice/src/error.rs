use lingo_srs::SchedulerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PracticeError {
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error("Expected answer is empty")]
    EmptyExpectedAnswer,
}
