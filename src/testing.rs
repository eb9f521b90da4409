use crate::api::client::RiotApiClient;
use crate::api::transport::{HttpResponse, Transport};
use crate::config::Config;
use crate::error::AppError;
use crate::rate_limit::Clock;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Virtual clock: `sleep` records the duration and advances time.
pub struct ManualClock {
    now: Mutex<Instant>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(ManualClock {
            now: Mutex::new(Instant::now()),
            sleeps: Mutex::new(Vec::new()),
        })
    }

    pub fn advance(&self, duration: Duration) {
        *self.now.lock().unwrap() += duration;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

type Reply = Result<HttpResponse, String>;

#[derive(Default)]
struct Routes {
    routes: Vec<(String, VecDeque<Reply>)>,
    requests: Vec<String>,
}

/// Scripted transport. Routes match on the URL path suffix; the last queued
/// reply for a route repeats. Unrouted URLs answer 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Mutex<Routes>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path_suffix: &str, response: HttpResponse) -> &Self {
        self.push(path_suffix, Ok(response))
    }

    pub fn ok(&self, path_suffix: &str, body: serde_json::Value) -> &Self {
        self.reply(
            path_suffix,
            HttpResponse {
                status: 200,
                retry_after: None,
                body: body.to_string(),
            },
        )
    }

    pub fn status(&self, path_suffix: &str, status: u16, retry_after: Option<u64>) -> &Self {
        self.reply(
            path_suffix,
            HttpResponse {
                status,
                retry_after,
                body: format!("status {}", status),
            },
        )
    }

    pub fn fail(&self, path_suffix: &str, message: &str) -> &Self {
        self.push(path_suffix, Err(message.to_string()))
    }

    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn count(&self, path_suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| path_of(url).ends_with(path_suffix))
            .count()
    }

    fn push(&self, path_suffix: &str, reply: Reply) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        match inner.routes.iter().position(|(p, _)| p == path_suffix) {
            Some(index) => inner.routes[index].1.push_back(reply),
            None => inner
                .routes
                .push((path_suffix.to_string(), VecDeque::from([reply]))),
        }
        drop(inner);
        self
    }
}

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(url.to_string());

        let path = path_of(url);
        let reply = inner
            .routes
            .iter_mut()
            .find(|(suffix, _)| path.ends_with(suffix.as_str()))
            .map(|(_, queue)| {
                if queue.len() > 1 {
                    queue.pop_front().unwrap()
                } else {
                    queue.front().cloned().unwrap()
                }
            });

        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(AppError::TransportError(message)),
            None => Ok(HttpResponse {
                status: 404,
                retry_after: None,
                body: "not found".to_string(),
            }),
        }
    }
}

pub fn test_client(
    transport: &FakeTransport,
    clock: &Arc<ManualClock>,
) -> RiotApiClient<FakeTransport> {
    RiotApiClient::with_transport(
        Config::new("test-key", "euw1"),
        transport.clone(),
        clock.clone(),
    )
}

/// One participant: (champion, teamPosition, role, teamId, win).
pub type Seat<'a> = (&'a str, &'a str, &'a str, i32, bool);

pub fn match_json(
    id: &str,
    queue_id: u32,
    mode: &str,
    duration: i64,
    seats: &[Seat],
) -> serde_json::Value {
    let participants: Vec<_> = seats
        .iter()
        .map(|(champion, position, role, team, win)| {
            json!({
                "championName": champion,
                "teamPosition": position,
                "role": role,
                "teamId": team,
                "win": win,
            })
        })
        .collect();

    json!({
        "metadata": { "matchId": id },
        "info": {
            "gameDuration": duration,
            "gameMode": mode,
            "queueId": queue_id,
            "participants": participants,
        }
    })
}

/// A valid ranked solo game where team 100 wins every lane.
pub fn ranked_match(id: &str, blue: [&str; 5], red: [&str; 5]) -> serde_json::Value {
    let positions = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];
    let mut seats: Vec<Seat> = Vec::new();
    for (champion, position) in blue.iter().zip(positions) {
        seats.push((*champion, position, "", 100, true));
    }
    for (champion, position) in red.iter().zip(positions) {
        seats.push((*champion, position, "", 200, false));
    }
    match_json(id, 420, "CLASSIC", 1800, &seats)
}
