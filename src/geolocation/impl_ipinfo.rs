use crate::geolocation::interface::{Coordinates, Geolocation};
use crate::library::logger::interface::Logger;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    loc: Option<String>,
}

/// Approximate location of the caller's public IP, as reported by ipinfo.io.
pub struct GeolocationIpInfo {
    url: String,
    timeout: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl GeolocationIpInfo {
    pub fn new(url: &str, timeout: Duration, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            url: url.to_string(),
            timeout,
            logger: logger.with_namespace("geolocation").with_namespace("ipinfo"),
        }
    }
}

impl Geolocation for GeolocationIpInfo {
    fn locate(&self) -> Result<Coordinates, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Requesting {}", self.url))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response: IpInfoResponse = client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()?;

        let loc = response.loc.ok_or("Response has no location")?;
        let coordinates = parse_loc(&loc)?;

        self.logger.info(&format!("Located at {}", coordinates))?;

        Ok(coordinates)
    }
}

/// Parses ipinfo's `"lat,lng"` field.
pub fn parse_loc(loc: &str) -> Result<Coordinates, Box<dyn std::error::Error + Send + Sync>> {
    let (lat, lng) = loc
        .split_once(',')
        .ok_or_else(|| format!("Malformed location: {:?}", loc))?;

    Ok(Coordinates {
        latitude: lat.trim().parse()?,
        longitude: lng.trim().parse()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loc() {
        let coordinates = parse_loc("37.3860,-122.0838").unwrap();
        assert_eq!(coordinates.latitude, 37.386);
        assert_eq!(coordinates.longitude, -122.0838);
        assert_eq!(coordinates.to_string(), "[37.386, -122.0838]");
    }

    #[test]
    fn test_parse_loc_rejects_garbage() {
        assert!(parse_loc("nowhere").is_err());
        assert!(parse_loc("north,south").is_err());
    }

    #[test]
    fn test_response_without_loc_deserializes() {
        let response: IpInfoResponse = serde_json::from_str(r#"{"ip": "1.2.3.4"}"#).unwrap();
        assert!(response.loc.is_none());
    }
}
