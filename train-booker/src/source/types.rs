//! Routing API response DTOs.
//!
//! These map the parts of the transit routing JSON we read. Everything is
//! optional and read leniently: a field that is absent, `null` or of an
//! unexpected type becomes `None` (or empty), and normalization fills in a
//! default. One odd field never fails the whole response.

use serde::Deserialize;

/// Top-level response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
    /// Alternative itineraries. `None` when the body has an unexpected shape.
    /// Entries that are not objects are skipped.
    #[serde(default, deserialize_with = "lenient::routes")]
    pub routes: Option<Vec<RouteDto>>,
}

/// One itinerary; becomes one offer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    #[serde(default, deserialize_with = "lenient::text")]
    pub route_id: Option<String>,

    /// Numbers are accepted and kept as their decimal text.
    #[serde(default, deserialize_with = "lenient::text")]
    pub train_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    /// Only the first leg is read.
    #[serde(default, deserialize_with = "lenient::list")]
    pub legs: Vec<LegDto>,

    /// Fare list. Kept raw because the API sometimes sends a non-array here,
    /// which is treated as "no fare data".
    #[serde(default)]
    pub fare: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    #[serde(default, deserialize_with = "lenient::object")]
    pub departure: Option<StopTimeDto>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub arrival: Option<StopTimeDto>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub duration: Option<DurationDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopTimeDto {
    /// "HH:MM"
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DurationDto {
    /// Minutes.
    #[serde(default, deserialize_with = "lenient::count")]
    pub value: Option<u32>,
}

/// One entry of a route's fare list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FareDto {
    /// Class code, e.g. "3A".
    #[serde(default, deserialize_with = "lenient::text")]
    pub class: Option<String>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub amount: Option<u32>,

    /// "available", "rac" or "waitlist".
    #[serde(default, deserialize_with = "lenient::text")]
    pub availability: Option<String>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub seats: Option<u32>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub waitlist: Option<u32>,
}

/// Field deserializers that map mismatched values to "absent" instead of
/// failing.
mod lenient {
    use serde::de::{DeserializeOwned, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    /// A string, or a number or boolean as its JSON text.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// A non-negative whole number that fits in `u32`, from a number or a
    /// numeric string. Fractions are rounded.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let n = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(n.filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(|n| n.round() as u32))
    }

    /// A nested object; anything that does not parse as `T` is `None`.
    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(T::deserialize(Value::deserialize(d)?).ok())
    }

    /// An array, keeping the elements that parse as `T`. Non-arrays are empty.
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(elements(Value::deserialize(d)?).unwrap_or_default())
    }

    /// Like [`list`], but a non-array is `None`.
    pub fn routes<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(elements(Value::deserialize(d)?))
    }

    fn elements<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
        match value {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| T::deserialize(item).ok())
                    .collect(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_route() {
        let json = r#"{
            "routes": [
                {
                    "routeId": "r-1",
                    "legs": [{ "departure": { "time": "06:15" }, "duration": { "value": 385 } }],
                    "fare": [{ "class": "CC", "amount": 850 }]
                },
                {}
            ]
        }"#;

        let response: RoutesResponse = serde_json::from_str(json).unwrap();
        let routes = response.routes.unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].route_id.as_deref(), Some("r-1"));
        assert_eq!(routes[0].legs[0].duration.as_ref().unwrap().value, Some(385));
        assert!(routes[0].legs[0].arrival.is_none());
        assert!(routes[1].legs.is_empty());
        assert!(routes[1].fare.is_none());
    }

    #[test]
    fn null_legs_and_numeric_train_number() {
        let json = r#"{
            "routes": [
                { "routeId": "r-1", "trainNumber": 12301, "legs": null },
                { "routeId": 7, "name": null, "legs": [null, { "duration": { "value": "385" } }] },
                "not a route",
                { "legs": "soon", "trainNumber": { "n": 1 } }
            ]
        }"#;

        let routes = serde_json::from_str::<RoutesResponse>(json).unwrap().routes.unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].train_number.as_deref(), Some("12301"));
        assert!(routes[0].legs.is_empty());
        assert_eq!(routes[1].route_id.as_deref(), Some("7"));
        assert!(routes[1].name.is_none());
        assert_eq!(routes[1].legs.len(), 1);
        assert_eq!(routes[1].legs[0].duration.as_ref().unwrap().value, Some(385));
        assert!(routes[2].legs.is_empty());
        assert!(routes[2].train_number.is_none());
    }

    #[test]
    fn mismatched_leg_fields_become_absent() {
        let json = r#"{
            "routes": [{
                "legs": [{
                    "departure": "16:50",
                    "arrival": { "time": 1020 },
                    "duration": { "value": -5 }
                }]
            }]
        }"#;

        let routes = serde_json::from_str::<RoutesResponse>(json).unwrap().routes.unwrap();
        let leg = &routes[0].legs[0];
        assert!(leg.departure.is_none());
        assert_eq!(leg.arrival.as_ref().unwrap().time.as_deref(), Some("1020"));
        assert_eq!(leg.duration.as_ref().unwrap().value, None);
    }

    #[test]
    fn lenient_fare_numbers() {
        let fare: FareDto = serde_json::from_str(
            r#"{ "class": "3A", "amount": "1245", "seats": 42.0, "waitlist": null }"#,
        )
        .unwrap();
        assert_eq!(fare.amount, Some(1245));
        assert_eq!(fare.seats, Some(42));
        assert_eq!(fare.waitlist, None);
    }

    #[test]
    fn non_array_routes_is_unexpected_shape() {
        let response: RoutesResponse = serde_json::from_str(r#"{"routes":{"a":1}}"#).unwrap();
        assert!(response.routes.is_none());
    }

    #[test]
    fn missing_routes_key() {
        let response: RoutesResponse = serde_json::from_str(r#"{"status":"ZERO_RESULTS"}"#).unwrap();
        assert!(response.routes.is_none());
    }
}
