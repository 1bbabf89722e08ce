//! Parameter parsing for the `/vehicles` endpoints.
//!
//! Path and query values arrive as raw strings and are parsed here so that a
//! bad value produces a 400 naming the offending field before any query runs.

use axum::{
    extract::{
        path::{ErrorKind, Path},
        rejection::PathRejection,
        FromRequestParts,
    },
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use fleetquery_lib::SearchQuery;

use crate::ApiError;

/// Path extractor that answers undecodable segments with the JSON error
/// envelope instead of axum's plain-text rejection.
///
/// A segment that is not valid UTF-8 after percent-decoding yields
/// `invalid <param>`.
#[derive(Debug)]
pub struct VehiclePath<T>(pub T);

impl<S, T> FromRequestParts<S> for VehiclePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(path = %parts.uri.path(), error = %rejection, "rejected path parameters");
                Err(path_rejection_problem(&rejection))
            }
        }
    }
}

fn path_rejection_problem(rejection: &PathRejection) -> ApiError {
    let key = match rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } => Some(key.as_str()),
            ErrorKind::ParseErrorAtKey { key, .. } => Some(key.as_str()),
            _ => None,
        },
        _ => None,
    };
    match key {
        Some(key) => ApiError::bad_request(format!("invalid {key}")),
        None => ApiError::bad_request("invalid path parameters"),
    }
}

/// Parse an integer path parameter such as `year` or `start_year`.
///
/// On failure the error message is `invalid <field>`.
pub fn parse_year_param(field: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("invalid {field}")))
}

/// Query string of `GET /vehicles/weight`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightRangeParams {
    /// Lower inclusive weight bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_min: Option<String>,

    /// Upper inclusive weight bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_max: Option<String>,
}

impl WeightRangeParams {
    /// Read the bounds from a raw query string.
    ///
    /// A repeated key keeps its first value and unknown keys are ignored, so
    /// no query string is ever rejected at this stage.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "weight_min" => &mut params.weight_min,
                "weight_max" => &mut params.weight_max,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Resolve the parameters into a search query and its filter flag.
    ///
    /// With neither bound present the flag is `false` and the query is the
    /// zero default. With at least one present the flag is `true` and a
    /// missing bound becomes `0.0`. Empty values count as absent.
    pub fn to_search_query(&self) -> Result<(SearchQuery, bool), ApiError> {
        let weight_min = parse_weight("weight_min", self.weight_min.as_deref())?;
        let weight_max = parse_weight("weight_max", self.weight_max.as_deref())?;

        if weight_min.is_none() && weight_max.is_none() {
            return Ok((SearchQuery::default(), false));
        }

        let query = SearchQuery::new(weight_min.unwrap_or(0.0), weight_max.unwrap_or(0.0));
        Ok((query, true))
    }
}

fn parse_weight(field: &str, raw: Option<&str>) -> Result<Option<f64>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("invalid {field}"))),
    }
}
