use crate::config::{Config, RetryPolicy};
use crate::domain::Tier;
use crate::error::AppError;
use crate::rate_limit::{Clock, RateLimiter, SystemClock};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints::Endpoints;
use super::models::*;
use super::transport::{Transport, UreqTransport};

const DEFAULT_RETRY_AFTER_SECS: u64 = 1;
const TOKEN_HEADER: &str = "X-Riot-Token";

pub struct RiotApiClient<T: Transport = UreqTransport> {
    config: Config,
    endpoints: Endpoints,
    transport: T,
    clock: Arc<dyn Clock>,
    rate_limiter: Mutex<RateLimiter>,
}

impl RiotApiClient<UreqTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, UreqTransport::new(), Arc::new(SystemClock))
    }
}

impl<T: Transport> RiotApiClient<T> {
    pub fn with_transport(config: Config, transport: T, clock: Arc<dyn Clock>) -> Self {
        let rate_limiter = Mutex::new(RateLimiter::new(config.rate_limits, clock.clone()));
        RiotApiClient {
            endpoints: Endpoints::for_region(&config.region),
            config,
            transport,
            clock,
            rate_limiter,
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.config.retry
    }

    fn acquire_slot(&self) {
        let mut limiter = self
            .rate_limiter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter.acquire();
    }

    /// Rate-limited, authenticated GET. 429s are retried after the
    /// server-advertised delay until the retry policy runs out.
    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let policy = self.retry_policy();
        let mut retries = 0;

        loop {
            self.acquire_slot();
            let response = self
                .transport
                .get(url, &[(TOKEN_HEADER, self.config.api_key.as_str())])?;

            if response.is_success() {
                return Ok(response.body);
            }

            if response.status != 429 {
                return Err(AppError::RequestError {
                    status: response.status,
                    body: response.body,
                });
            }

            if !policy.allows(retries) {
                return Err(AppError::RateLimited {
                    attempts: retries + 1,
                });
            }

            let wait =
                Duration::from_secs(response.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS));
            warn!(url, wait_secs = wait.as_secs(), retry = retries + 1, "Rate limited, retrying");
            self.clock.sleep(wait);
            retries += 1;
        }
    }

    /// Unauthenticated GET for static reference data. Bypasses the limiter.
    fn execute_static(&self, url: &str) -> Result<String, AppError> {
        let response = self.transport.get(url, &[])?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(AppError::RequestError {
                status: response.status,
                body: response.body,
            })
        }
    }

    pub fn request<D: DeserializeOwned>(&self, url: &str) -> Result<D, AppError> {
        let body = self.execute_request(url)?;
        parse(&body)
    }

    pub fn get_league(&self, tier: Tier) -> Result<LeagueListDto, AppError> {
        self.request(&self.endpoints.league(tier))
    }

    pub fn get_summoner(&self, summoner_id: &str) -> Result<SummonerDto, AppError> {
        self.request(&self.endpoints.summoner(summoner_id))
    }

    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        self.request(&self.endpoints.match_ids(puuid, count))
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.request(&self.endpoints.match_detail(match_id))
    }

    pub fn get_latest_version(&self) -> Result<String, AppError> {
        let body = self.execute_static(&Endpoints::versions())?;
        let versions: Vec<String> = parse(&body)?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::JsonError("Data Dragon returned no versions".to_string()))
    }

    pub fn get_champion_catalogue(&self) -> Result<ChampionCatalogue, AppError> {
        let version = self.get_latest_version()?;
        debug!(%version, "Fetching champion catalogue");

        let body = self.execute_static(&Endpoints::champions(&version))?;
        let champions: DataDragonChampions = parse(&body)?;
        Ok(champions.into())
    }
}

fn parse<D: DeserializeOwned>(body: &str) -> Result<D, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))
}
