use crate::domain::ResolvedAddress;
use serde::Deserialize;

/// Body of `GET /reverse?format=jsonv2`. Nominatim answers with HTTP 200 and an `error` member when nothing is found.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReverseResponse {
    NotFound { error: String },
    Place(Place),
}

#[derive(Debug, Deserialize)]
pub struct Place {
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: PlaceAddress,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub pedestrian: Option<String>,
    pub footway: Option<String>,
    pub path: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl From<PlaceAddress> for ResolvedAddress {
    fn from(address: PlaceAddress) -> Self {
        ResolvedAddress {
            house_number: address.house_number,
            street: address.road.or(address.pedestrian).or(address.footway).or(address.path),
            locality: address.city.or(address.town).or(address.village).or(address.hamlet),
            postal_code: address.postcode,
            country: address.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_a_city_address() -> Result<(), serde_json::Error> {
        let response: ReverseResponse = serde_json::from_str(include_str!("../../tests/resources/nominatim_reverse_response.json"))?;

        let ReverseResponse::Place(place) = response else {
            panic!("Expected a place, got {:?}", response);
        };
        assert_eq!(
            ResolvedAddress::from(place.address),
            ResolvedAddress {
                house_number: Some("1600".to_string()),
                street: Some("Amphitheatre Parkway".to_string()),
                locality: Some("Mountain View".to_string()),
                postal_code: Some("94043".to_string()),
                country: Some("United States".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn deserialize_a_rural_address_falls_back_to_path_and_village() -> Result<(), serde_json::Error> {
        let response: ReverseResponse = serde_json::from_str(include_str!("../../tests/resources/nominatim_rural_response.json"))?;

        let ReverseResponse::Place(place) = response else {
            panic!("Expected a place, got {:?}", response);
        };
        assert_eq!(
            ResolvedAddress::from(place.address),
            ResolvedAddress {
                house_number: None,
                street: Some("Eigertrail".to_string()),
                locality: Some("Grindelwald".to_string()),
                postal_code: None,
                country: Some("Schweiz/Suisse/Svizzera/Svizra".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn deserialize_an_error_response() -> Result<(), serde_json::Error> {
        let response: ReverseResponse = serde_json::from_str(include_str!("../../tests/resources/nominatim_error_response.json"))?;

        assert!(matches!(response, ReverseResponse::NotFound { error } if error == "Unable to geocode"));
        Ok(())
    }
}
