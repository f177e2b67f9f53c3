use std::{env, fmt::Display, str::FromStr};

use tracing::warn;

pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: require("PORT"),
            mongo_uri: require("MONGO_URI"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found");
    })
}

fn require<T: FromStr>(key: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .expect("Environment misconfigured!")
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
