/*
[INPUT]:  Log level directive from configuration
[OUTPUT]: Installed global tracing subscriber
[POS]:    Observability - optional subscriber bootstrap for applications
[UPDATE]: When changing log output format or filter handling
*/

use tracing_subscriber::EnvFilter;

use crate::config::UpholdConfig;
use crate::http::{Result, UpholdError};

/// Install a fmt subscriber filtered by `log_level` (an `EnvFilter` directive)
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)
        .map_err(|err| UpholdError::Configuration(format!("invalid log level {log_level}: {err}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| UpholdError::Configuration(format!("initialize tracing subscriber: {err}")))
}

pub fn init_from_config(config: &UpholdConfig) -> Result<()> {
    init(&config.log_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        let err = init("uphold_client=loudest").unwrap_err();
        assert!(matches!(err, UpholdError::Configuration(_)));
    }
}
