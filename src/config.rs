use clap::Parser;
use tungstenite::{client::IntoClientRequest, error::UrlError, Error as WsError};

pub const DEFAULT_URL: &str = "ws://localhost:2082";

/// Keeps the latest playlist status reported by a status server
#[derive(Parser, Debug, Clone)]
#[command(name = "status_link", version, about)]
pub struct Config {
    /// WebSocket address of the status server
    #[arg(long, env = "STATUS_LINK_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// How many link events may queue up before the link waits for the renderer
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..))]
    pub channel_capacity: u16,
}

impl Config {
    /// Checks that the address is a usable ws:// or wss:// request URI.
    pub fn validate(&self) -> Result<(), WsError> {
        let request = self.url.as_str().into_client_request()?;
        match request.uri().scheme_str() {
            Some("ws") | Some("wss") => Ok(()),
            _ => Err(WsError::Url(UrlError::UnsupportedUrlScheme)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins() {
        let config =
            Config::try_parse_from(["status_link", "--url", "ws://10.0.0.5:2082"]).unwrap();
        assert_eq!(config.url, "ws://10.0.0.5:2082");
        assert_eq!(config.channel_capacity, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_url_is_valid() {
        let config = Config {
            url: DEFAULT_URL.to_string(),
            channel_capacity: 32,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_websocket_schemes() {
        let config =
            Config::try_parse_from(["status_link", "--url", "http://localhost:2082"]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(WsError::Url(UrlError::UnsupportedUrlScheme))
        ));
    }

    #[test]
    fn rejects_garbage_urls() {
        let config = Config::try_parse_from(["status_link", "--url", "not a url"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_refused() {
        assert!(Config::try_parse_from(["status_link", "--channel-capacity", "0"]).is_err());
    }
}
