use anyhow::Result;
use datespot_core::util::validate::GateConfig;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "datespots.toml";

const ENV_NAME_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_SNAPSHOT_FILE: &str = "DATESPOTS_SNAPSHOT_FILE";

pub struct Config {
    pub store: Store,
    pub remote: Remote,
    pub gate: GateConfig,
    pub sentiment: Sentiment,
    pub geocoding: Geocoding,
    pub upload: Upload,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        raw_config.apply_env_overrides(|name| env::var(name).ok());
        Self::try_from(raw_config)
    }
}

pub struct Store {
    /// JSON file the store is loaded from and written to.
    pub snapshot_file: Option<PathBuf>,
    pub seed_sample_data: bool,
}

pub struct Remote {
    pub timeout: Duration,
}

pub struct Sentiment {
    pub gateway: Option<SentimentGateway>,
}

pub enum SentimentGateway {
    OpenAi {
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    },
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

pub struct Upload {
    pub endpoint: Option<String>,
}

impl raw::Config {
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_NAME_SNAPSHOT_FILE) {
            self.store.get_or_insert_with(raw::Store::default).snapshot_file = Some(path.into());
        }
        if let Some(api_key) = lookup(ENV_NAME_OPENAI_API_KEY) {
            let gateway = self.gateway.get_or_insert_with(Default::default);
            gateway.openai.get_or_insert_with(Default::default).api_key = Some(api_key);
        }
        if let Some(api_key) = lookup(ENV_NAME_OPENCAGE_API_KEY) {
            let gateway = self.gateway.get_or_insert_with(Default::default);
            gateway.opencage.get_or_insert_with(Default::default).api_key = Some(api_key);
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            store,
            remote,
            gate,
            sentiment,
            geocoding,
            upload,
            gateway,
        } = from;

        let raw::Store {
            snapshot_file,
            seed_sample_data,
        } = store.unwrap_or_default();
        let store = Store {
            snapshot_file,
            seed_sample_data,
        };

        let raw::Remote { timeout } = remote.unwrap_or_default();
        if timeout.is_zero() {
            return Err(anyhow::anyhow!("The remote timeout must not be zero"));
        }
        let remote = Remote { timeout };

        let raw::Gate {
            sentiment_threshold,
            require_coordinates,
        } = gate.unwrap_or_default();
        if !(-1.0..=1.0).contains(&sentiment_threshold) {
            return Err(anyhow::anyhow!(
                "The sentiment threshold {sentiment_threshold} is not within [-1, 1]"
            ));
        }
        let gate = GateConfig {
            sentiment_threshold,
            require_coordinates,
        };

        let gateway = gateway.unwrap_or_default();

        let sentiment_gateway = match sentiment.and_then(|s| s.gateway) {
            Some(raw::SentimentGateway::Openai) => {
                let raw::OpenAi {
                    api_key,
                    model,
                    base_url,
                } = gateway.openai.clone().unwrap_or_default();
                match api_key.filter(|key| !key.trim().is_empty()) {
                    Some(api_key) => {
                        log::info!("Use OpenAI sentiment gateway");
                        Some(SentimentGateway::OpenAi {
                            api_key,
                            model,
                            base_url,
                        })
                    }
                    None => {
                        log::warn!(
                            "No API key for the sentiment service: new spots will be rejected"
                        );
                        None
                    }
                }
            }
            None => None,
        };
        let sentiment = Sentiment {
            gateway: sentiment_gateway,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(raw::GeocodingGateway::Opencage) => {
                let raw::OpenCage { api_key } = gateway.opencage.unwrap_or_default();
                match api_key.filter(|key| !key.trim().is_empty()) {
                    Some(api_key) => Some(GeocodingGateway::OpenCage { api_key }),
                    None => {
                        log::warn!("No OpenCage API key found");
                        None
                    }
                }
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Upload { endpoint } = upload.unwrap_or_default();
        let upload = Upload {
            endpoint: endpoint.filter(|url| !url.trim().is_empty()),
        };

        Ok(Self {
            store,
            remote,
            gate,
            sentiment,
            geocoding,
            upload,
        })
    }
}
