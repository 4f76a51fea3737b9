//! Observed weather.

use crate::codec::{Measured, NodeReader, NodeWriter, Record};
use crate::error::{DecodeError, EncodeError};
use crate::model::Timestamp;
use crate::units::{Measurement, SpeedUnit, TemperatureUnit};

crate::attribute_keys! {
    pub enum WeatherConditionsKey {
        Temperature = "temperature",
        ApparentTemperature = "apparentTemperature",
        Humidity = "humidity",
        WindSpeed = "windSpeed",
        Condition = "condition",
        PrecipitationChance = "precipitationChance",
        DateTime = "dateTime",
    }
}

/// Conditions at one place and time.
///
/// Measurements are written as `QuantitativeValue`s in the registry's
/// canonical units; a value whose unit code belongs to another dimension
/// reads back as `None`. `humidity` and `precipitation_chance` are ratios
/// from 0 to 1, written as percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConditions {
    pub temperature: Option<Measurement<TemperatureUnit>>,
    pub apparent_temperature: Option<Measurement<TemperatureUnit>>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<Measurement<SpeedUnit>>,
    pub condition: String,
    pub precipitation_chance: Option<f64>,
    pub date_time: Timestamp,
}

impl WeatherConditions {
    pub fn new(condition: impl Into<String>, date_time: Timestamp) -> Self {
        Self {
            temperature: None,
            apparent_temperature: None,
            humidity: None,
            wind_speed: None,
            condition: condition.into(),
            precipitation_chance: None,
            date_time,
        }
    }
}

impl Record for WeatherConditions {
    const TYPE_TAG: &'static str = "https://developer.apple.com/WeatherKit/#/WeatherConditions";
    type Key = WeatherConditionsKey;

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, WeatherConditionsKey>,
    ) -> Result<(), EncodeError> {
        use WeatherConditionsKey as K;

        Measured::encode_opt(self.temperature.as_ref(), node, K::Temperature)?;
        Measured::encode_opt(self.apparent_temperature.as_ref(), node, K::ApparentTemperature)?;
        node.write_opt_percentage(K::Humidity, self.humidity)?;
        Measured::encode_opt(self.wind_speed.as_ref(), node, K::WindSpeed)?;
        node.write_string(K::Condition, &self.condition);
        node.write_opt_percentage(K::PrecipitationChance, self.precipitation_chance)?;
        node.write_timestamp(K::DateTime, &self.date_time);
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, WeatherConditionsKey>) -> Result<Self, DecodeError> {
        use WeatherConditionsKey as K;

        Ok(Self {
            temperature: Measured::<TemperatureUnit>::decode(node, K::Temperature)?
                .map(Measured::into_inner),
            apparent_temperature: Measured::<TemperatureUnit>::decode(node, K::ApparentTemperature)?
                .map(Measured::into_inner),
            humidity: node.read_opt_percentage(K::Humidity)?,
            wind_speed: Measured::<SpeedUnit>::decode(node, K::WindSpeed)?
                .map(Measured::into_inner),
            condition: node.read_string(K::Condition)?,
            precipitation_chance: node.read_opt_percentage(K::PrecipitationChance)?,
            date_time: node.read_timestamp(K::DateTime)?,
        })
    }
}
