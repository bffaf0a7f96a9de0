use rtc_core::{Day, RtcError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] RtcError),

    #[error("cannot advance past the horizon: {0} is not a simulated day")]
    HorizonReached(Day),
}

pub type SimResult<T> = Result<T, SimError>;
