use serde::Deserialize;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub topics: TopicSettings,
    pub logging: LoggingSettings,
}

/// Address the WebSocket server binds to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Limits the request layer applies before calling into the store.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TopicSettings {
    /// Longest accepted topic name, counted in characters.
    pub max_name_len: usize,
    /// Page size for ranked listings.
    pub top_limit: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub topics: Option<PartialTopicSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialTopicSettings {
    pub max_name_len: Option<usize>,
    pub top_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            topics: TopicSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            max_name_len: 255,
            top_limit: 20,
        }
    }
}

impl PartialSettings {
    /// Overlays the values present in `self` on top of `default`.
    pub fn merge(self, default: Settings) -> Settings {
        let server = self.server;
        let topics = self.topics;
        let logging = self.logging;

        Settings {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.server.port),
            },
            topics: TopicSettings {
                max_name_len: topics
                    .as_ref()
                    .and_then(|t| t.max_name_len)
                    .unwrap_or(default.topics.max_name_len),
                top_limit: topics
                    .as_ref()
                    .and_then(|t| t.top_limit)
                    .unwrap_or(default.topics.top_limit),
            },
            logging: LoggingSettings {
                level: logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
