//! Locations and journeys between them.

use crate::codec::{NodeReader, NodeWriter, Record};
use crate::error::{DecodeError, EncodeError};
use crate::model::Timestamp;
use crate::schema::PostalAddress;

crate::attribute_keys! {
    pub enum GeoCoordinatesKey {
        Latitude = "latitude",
        Longitude = "longitude",
        Elevation = "elevation",
    }
}

/// WGS 84 coordinates in degrees, elevation in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }
}

impl Record for GeoCoordinates {
    const TYPE_TAG: &'static str = "GeoCoordinates";
    type Key = GeoCoordinatesKey;

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, GeoCoordinatesKey>,
    ) -> Result<(), EncodeError> {
        node.write_f64(GeoCoordinatesKey::Latitude, self.latitude)?;
        node.write_f64(GeoCoordinatesKey::Longitude, self.longitude)?;
        node.write_opt_f64(GeoCoordinatesKey::Elevation, self.elevation)
    }

    fn decode_attributes(node: &NodeReader<'_, GeoCoordinatesKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            latitude: node.read_f64(GeoCoordinatesKey::Latitude)?,
            longitude: node.read_f64(GeoCoordinatesKey::Longitude)?,
            elevation: node.read_opt_f64(GeoCoordinatesKey::Elevation)?,
        })
    }
}

crate::attribute_keys! {
    pub enum PlaceKey {
        Name = "name",
        Address = "address",
        Geo = "geo",
        Telephone = "telephone",
        Url = "url",
        Description = "description",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<PostalAddress>,
    pub geo: Option<GeoCoordinates>,
    pub telephone: Option<String>,
    pub url: Option<String>,
}

impl Place {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Record for Place {
    const TYPE_TAG: &'static str = "Place";
    type Key = PlaceKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, PlaceKey>) -> Result<(), EncodeError> {
        node.write_opt_string(PlaceKey::Name, self.name.as_deref());
        node.write_opt_record(PlaceKey::Address, self.address.as_ref())?;
        node.write_opt_record(PlaceKey::Geo, self.geo.as_ref())?;
        node.write_opt_string(PlaceKey::Telephone, self.telephone.as_deref());
        node.write_opt_string(PlaceKey::Url, self.url.as_deref());
        node.write_opt_string(PlaceKey::Description, self.description.as_deref());
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, PlaceKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(PlaceKey::Name)?,
            description: node.read_opt_string(PlaceKey::Description)?,
            address: node.read_opt_record(PlaceKey::Address)?,
            geo: node.read_opt_record(PlaceKey::Geo)?,
            telephone: node.read_opt_string(PlaceKey::Telephone)?,
            url: node.read_opt_string(PlaceKey::Url)?,
        })
    }
}

crate::attribute_keys! {
    pub enum TripKey {
        Name = "name",
        Description = "description",
        ArrivalTime = "arrivalTime",
        DepartureTime = "departureTime",
        Itinerary = "itinerary",
        TripOrigin = "tripOrigin",
    }
}

/// A journey through an ordered list of places.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trip {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub arrival_time: Option<Timestamp>,
    pub departure_time: Option<Timestamp>,
    pub itinerary: Option<Vec<Place>>,
    pub trip_origin: Option<Place>,
}

impl Record for Trip {
    const TYPE_TAG: &'static str = "Trip";
    type Key = TripKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, TripKey>) -> Result<(), EncodeError> {
        node.write_opt_string(TripKey::Name, self.name.as_deref());
        node.write_opt_string(TripKey::Description, self.description.as_deref());
        node.write_opt_timestamp(TripKey::ArrivalTime, self.arrival_time.as_ref());
        node.write_opt_timestamp(TripKey::DepartureTime, self.departure_time.as_ref());
        node.write_opt_records(TripKey::Itinerary, self.itinerary.as_deref())?;
        node.write_opt_record(TripKey::TripOrigin, self.trip_origin.as_ref())
    }

    fn decode_attributes(node: &NodeReader<'_, TripKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(TripKey::Name)?,
            description: node.read_opt_string(TripKey::Description)?,
            arrival_time: node.read_opt_timestamp(TripKey::ArrivalTime)?,
            departure_time: node.read_opt_timestamp(TripKey::DepartureTime)?,
            itinerary: node.read_opt_records(TripKey::Itinerary)?,
            trip_origin: node.read_opt_record(TripKey::TripOrigin)?,
        })
    }
}
