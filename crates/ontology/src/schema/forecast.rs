//! National Weather Service forecasts.
//!
//! A forecast is a GeoJSON-LD `Feature` rather than a schema.org record: its
//! root `@context` is an array naming the GeoJSON-LD context plus the
//! `wx`, `geo` and `unit` vocabularies, and its `geometry` and `properties`
//! members are plain objects without `@type`. Times inside the periods are
//! ordinary timestamp strings and keep their offsets.

use serde_json::{json, Number, Value};

use crate::codec::{AttributeKey, Embedded, NodeReader, NodeWriter, Record};
use crate::error::{json_kind, DecodeError, EncodeError};
use crate::model::Timestamp;
use crate::units::{Measurement, TemperatureUnit};

/// GeoJSON-LD base context.
pub const GEOJSON_LD_CONTEXT: &str = "https://geojson.org/geojson-ld/geojson-context.jsonld";

/// NWS ontology namespace, also the default vocabulary.
pub const WEATHER_SERVICE_VOCABULARY: &str = "https://api.weather.gov/ontology#";

/// Unit code of NWS percentages.
pub const PERCENT_UNIT_CODE: &str = "wmoUnit:percent";

const POLYGON: &str = "Polygon";

crate::attribute_keys! {
    pub enum WeatherForecastKey {
        Geometry = "geometry",
        Properties = "properties",
    }
}

crate::attribute_keys! {
    pub enum PolygonKey {
        Type = "type",
        Coordinates = "coordinates",
    }
}

crate::attribute_keys! {
    pub enum ForecastPropertiesKey {
        Units = "units",
        ForecastGenerator = "forecastGenerator",
        GeneratedAt = "generatedAt",
        UpdateTime = "updateTime",
        ValidTimes = "validTimes",
        Elevation = "elevation",
        Periods = "periods",
    }
}

crate::attribute_keys! {
    pub enum ForecastPeriodKey {
        Number = "number",
        Name = "name",
        StartTime = "startTime",
        EndTime = "endTime",
        IsDaytime = "isDaytime",
        Temperature = "temperature",
        TemperatureUnit = "temperatureUnit",
        TemperatureTrend = "temperatureTrend",
        ProbabilityOfPrecipitation = "probabilityOfPrecipitation",
        WindSpeed = "windSpeed",
        WindDirection = "windDirection",
        Icon = "icon",
        ShortForecast = "shortForecast",
        DetailedForecast = "detailedForecast",
    }
}

crate::attribute_keys! {
    pub enum UnitValueKey {
        UnitCode = "unitCode",
        Value = "value",
    }
}

/// A forecast for one area.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherForecast {
    pub id: Option<String>,
    pub geometry: Polygon,
    pub properties: ForecastProperties,
}

/// The area a forecast covers, as GeoJSON polygon rings of
/// `[longitude, latitude]` positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastProperties {
    /// Unit system, `"us"` or `"si"`.
    pub units: String,
    pub forecast_generator: String,
    pub generated_at: Timestamp,
    pub update_time: Timestamp,
    /// ISO 8601 interval, e.g. `2025-03-14T12:00:00+00:00/P7DT13H`.
    pub valid_times: String,
    pub elevation: UnitValue,
    pub periods: Vec<ForecastPeriod>,
}

/// One named period, e.g. "Tonight".
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub number: i64,
    pub name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub is_daytime: bool,
    pub temperature: i64,
    /// `"F"` or `"C"`.
    pub temperature_unit: String,
    pub temperature_trend: Option<String>,
    pub probability_of_precipitation: Option<UnitValue>,
    pub wind_speed: String,
    pub wind_direction: String,
    pub icon: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
}

/// A WMO-coded value such as `{"unitCode": "wmoUnit:m", "value": 12.5}`.
/// The value is `null` when the service has no figure.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    pub unit_code: String,
    pub value: Option<f64>,
}

impl UnitValue {
    pub fn new(unit_code: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            unit_code: unit_code.into(),
            value,
        }
    }

    /// The value as a ratio from 0 to 1, if this is a percentage.
    pub fn ratio(&self) -> Option<f64> {
        if self.unit_code != PERCENT_UNIT_CODE {
            return None;
        }
        self.value.map(|v| v / 100.0)
    }
}

impl ForecastPeriod {
    /// The temperature as a measurement, if its unit is known.
    pub fn temperature_measurement(&self) -> Option<Measurement<TemperatureUnit>> {
        let unit = match self.temperature_unit.as_str() {
            "F" => TemperatureUnit::Fahrenheit,
            "C" => TemperatureUnit::Celsius,
            _ => return None,
        };
        Some(Measurement::new(self.temperature as f64, unit))
    }

    /// Chance of precipitation as a ratio from 0 to 1.
    pub fn precipitation_chance(&self) -> Option<f64> {
        self.probability_of_precipitation
            .as_ref()
            .and_then(UnitValue::ratio)
    }
}

fn forecast_context() -> Value {
    json!([
        GEOJSON_LD_CONTEXT,
        {
            "@version": "1.1",
            "wx": WEATHER_SERVICE_VOCABULARY,
            "geo": "http://www.opengis.net/ont/geosparql#",
            "unit": "http://codes.wmo.int/common/unit/",
            "@vocab": WEATHER_SERVICE_VOCABULARY
        }
    ])
}

impl Record for WeatherForecast {
    const TYPE_TAG: &'static str = "Feature";
    type Key = WeatherForecastKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn context() -> Value {
        forecast_context()
    }

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, WeatherForecastKey>,
    ) -> Result<(), EncodeError> {
        node.write_embedded(WeatherForecastKey::Geometry, &self.geometry)?;
        node.write_embedded(WeatherForecastKey::Properties, &self.properties)
    }

    fn decode_attributes(node: &NodeReader<'_, WeatherForecastKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            geometry: node.read_embedded(WeatherForecastKey::Geometry)?,
            properties: node.read_embedded(WeatherForecastKey::Properties)?,
        })
    }
}

impl Embedded for Polygon {
    type Key = PolygonKey;

    fn encode_members(&self, node: &mut NodeWriter<'_, PolygonKey>) -> Result<(), EncodeError> {
        node.write_string(PolygonKey::Type, POLYGON);
        let path = format!("{}.{}", node.path(), PolygonKey::Coordinates.as_str());
        let rings = self
            .coordinates
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let positions = ring
                    .iter()
                    .enumerate()
                    .map(|(j, position)| {
                        let numbers = position
                            .iter()
                            .enumerate()
                            .map(|(k, &n)| number(n, format!("{}[{}][{}][{}]", path, i, j, k)))
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Value::Array(numbers))
                    })
                    .collect::<Result<Vec<_>, EncodeError>>()?;
                Ok(Value::Array(positions))
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;
        node.write_value(PolygonKey::Coordinates, Value::Array(rings));
        Ok(())
    }

    /// `type` is informational and not checked.
    fn decode_members(node: &NodeReader<'_, PolygonKey>) -> Result<Self, DecodeError> {
        let (value, path) = node.read_value(PolygonKey::Coordinates)?;
        let coordinates = array(value, &path)?
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let ring_path = format!("{}[{}]", path, i);
                array(ring, &ring_path)?
                    .iter()
                    .enumerate()
                    .map(|(j, position)| {
                        let position_path = format!("{}[{}]", ring_path, j);
                        array(position, &position_path)?
                            .iter()
                            .enumerate()
                            .map(|(k, n)| {
                                n.as_f64().ok_or_else(|| DecodeError::InvalidField {
                                    expected: "a number",
                                    found: json_kind(n),
                                    path: format!("{}[{}]", position_path, k),
                                })
                            })
                            .collect::<Result<Vec<f64>, DecodeError>>()
                    })
                    .collect::<Result<Vec<_>, DecodeError>>()
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(Self { coordinates })
    }
}

fn number(value: f64, path: String) -> Result<Value, EncodeError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(EncodeError::NonFiniteNumber { value, path })
}

fn array<'v>(value: &'v Value, path: &str) -> Result<&'v Vec<Value>, DecodeError> {
    value.as_array().ok_or_else(|| DecodeError::InvalidField {
        expected: "an array",
        found: json_kind(value),
        path: path.to_string(),
    })
}

impl Embedded for ForecastProperties {
    type Key = ForecastPropertiesKey;

    fn encode_members(
        &self,
        node: &mut NodeWriter<'_, ForecastPropertiesKey>,
    ) -> Result<(), EncodeError> {
        use ForecastPropertiesKey as K;

        node.write_string(K::Units, &self.units);
        node.write_string(K::ForecastGenerator, &self.forecast_generator);
        node.write_timestamp(K::GeneratedAt, &self.generated_at);
        node.write_timestamp(K::UpdateTime, &self.update_time);
        node.write_string(K::ValidTimes, &self.valid_times);
        node.write_embedded(K::Elevation, &self.elevation)?;
        node.write_embedded_list(K::Periods, &self.periods)
    }

    fn decode_members(node: &NodeReader<'_, ForecastPropertiesKey>) -> Result<Self, DecodeError> {
        use ForecastPropertiesKey as K;

        Ok(Self {
            units: node.read_string(K::Units)?,
            forecast_generator: node.read_string(K::ForecastGenerator)?,
            generated_at: node.read_timestamp(K::GeneratedAt)?,
            update_time: node.read_timestamp(K::UpdateTime)?,
            valid_times: node.read_string(K::ValidTimes)?,
            elevation: node.read_embedded(K::Elevation)?,
            periods: node.read_embedded_list(K::Periods)?,
        })
    }
}

impl Embedded for ForecastPeriod {
    type Key = ForecastPeriodKey;

    fn encode_members(
        &self,
        node: &mut NodeWriter<'_, ForecastPeriodKey>,
    ) -> Result<(), EncodeError> {
        use ForecastPeriodKey as K;

        node.write_i64(K::Number, self.number);
        node.write_string(K::Name, &self.name);
        node.write_timestamp(K::StartTime, &self.start_time);
        node.write_timestamp(K::EndTime, &self.end_time);
        node.write_bool(K::IsDaytime, self.is_daytime);
        node.write_i64(K::Temperature, self.temperature);
        node.write_string(K::TemperatureUnit, &self.temperature_unit);
        node.write_opt_string(K::TemperatureTrend, self.temperature_trend.as_deref());
        node.write_opt_embedded(
            K::ProbabilityOfPrecipitation,
            self.probability_of_precipitation.as_ref(),
        )?;
        node.write_string(K::WindSpeed, &self.wind_speed);
        node.write_string(K::WindDirection, &self.wind_direction);
        node.write_string(K::Icon, &self.icon);
        node.write_string(K::ShortForecast, &self.short_forecast);
        node.write_string(K::DetailedForecast, &self.detailed_forecast);
        Ok(())
    }

    fn decode_members(node: &NodeReader<'_, ForecastPeriodKey>) -> Result<Self, DecodeError> {
        use ForecastPeriodKey as K;

        Ok(Self {
            number: node.read_i64(K::Number)?,
            name: node.read_string(K::Name)?,
            start_time: node.read_timestamp(K::StartTime)?,
            end_time: node.read_timestamp(K::EndTime)?,
            is_daytime: node.read_bool(K::IsDaytime)?,
            temperature: node.read_i64(K::Temperature)?,
            temperature_unit: node.read_string(K::TemperatureUnit)?,
            temperature_trend: node.read_opt_string(K::TemperatureTrend)?,
            probability_of_precipitation: node.read_opt_embedded(K::ProbabilityOfPrecipitation)?,
            wind_speed: node.read_string(K::WindSpeed)?,
            wind_direction: node.read_string(K::WindDirection)?,
            icon: node.read_string(K::Icon)?,
            short_forecast: node.read_string(K::ShortForecast)?,
            detailed_forecast: node.read_string(K::DetailedForecast)?,
        })
    }
}

impl Embedded for UnitValue {
    type Key = UnitValueKey;

    fn encode_members(&self, node: &mut NodeWriter<'_, UnitValueKey>) -> Result<(), EncodeError> {
        node.write_string(UnitValueKey::UnitCode, &self.unit_code);
        node.write_opt_f64(UnitValueKey::Value, self.value)
    }

    fn decode_members(node: &NodeReader<'_, UnitValueKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            unit_code: node.read_string(UnitValueKey::UnitCode)?,
            value: node.read_opt_f64(UnitValueKey::Value)?,
        })
    }
}
