use common::{Error, Result};
use connectors::ConnectorConfig;

/// Screen shown when the dashboard starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartView {
    Home,
    #[default]
    List,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub connector: ConnectorConfig,
    pub start_view: StartView,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let connector = ConnectorConfig::from_env()?;
        let start_view = parse_start_view(std::env::var("COINDASH_START_VIEW").ok().as_deref())?;

        Ok(Self {
            connector,
            start_view,
        })
    }
}

fn parse_start_view(raw: Option<&str>) -> Result<StartView> {
    match raw.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("list") | Some("trending") => Ok(StartView::List),
        Some("home") => Ok(StartView::Home),
        Some(other) => Err(Error::ConfigError(format!(
            "Unknown COINDASH_START_VIEW: {}. Supported views: home, list",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_view_defaults_to_list() {
        assert_eq!(parse_start_view(None).unwrap(), StartView::List);
        assert_eq!(parse_start_view(Some("")).unwrap(), StartView::List);
        assert_eq!(parse_start_view(Some("Home")).unwrap(), StartView::Home);
    }

    #[test]
    fn unknown_start_view_is_rejected() {
        assert!(matches!(
            parse_start_view(Some("charts")),
            Err(Error::ConfigError(_))
        ));
    }
}
