//! Simple decoder to inspect JSON-LD files.
//!
//! Accepts a single document or an array of documents.

use std::fs;

use ontology::schema::Thing;
use ontology::units::{SpeedUnit, TemperatureUnit};
use ontology::{EncodingContext, Timestamp};
use serde_json::Value;

fn format_time(ts: &Option<Timestamp>) -> String {
    match ts {
        Some(ts) => ts.to_string(),
        None => "-".to_string(),
    }
}

fn describe(thing: &Thing) -> String {
    match thing {
        Thing::Person(p) => format!(
            "{} ({} emails, {} phones)",
            p.display_name().unwrap_or_default(),
            p.email.as_ref().map_or(0, Vec::len),
            p.telephone.as_ref().map_or(0, Vec::len)
        ),
        Thing::Organization(o) => o.name.clone().unwrap_or_default(),
        Thing::ContactPoint(c) => format!("{}: {}", c.contact_type, c.identifier),
        Thing::PostalAddress(a) => format!(
            "{}, {}",
            a.address_locality.as_deref().unwrap_or("?"),
            a.address_country.as_deref().unwrap_or("?")
        ),
        Thing::GeoCoordinates(g) => format!("({}, {})", g.latitude, g.longitude),
        Thing::Place(p) => p.name.clone().unwrap_or_default(),
        Thing::Event(e) => format!(
            "{} [{} .. {}]",
            e.name.as_deref().unwrap_or(""),
            format_time(&e.start_date),
            format_time(&e.end_date)
        ),
        Thing::PlanAction(a) => format!(
            "{} status={}",
            a.name.as_deref().unwrap_or(""),
            a.status.map_or("-", |s| s.as_str())
        ),
        Thing::ItemList(l) => format!(
            "{} ({} items)",
            l.name.as_deref().unwrap_or(""),
            l.number_of_items.unwrap_or(0)
        ),
        Thing::Trip(t) => format!(
            "{} via {} stops, departs {}",
            t.name.as_deref().unwrap_or(""),
            t.itinerary.as_ref().map_or(0, Vec::len),
            format_time(&t.departure_time)
        ),
        Thing::WeatherConditions(w) => format!(
            "{} at {}: {} / wind {}",
            w.condition,
            w.date_time,
            w.temperature
                .map(|t| t.converted_to(TemperatureUnit::Celsius).to_string())
                .unwrap_or_else(|| "-".to_string()),
            w.wind_speed
                .map(|s| s.converted_to(SpeedUnit::KilometersPerHour).to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        Thing::WeatherForecast(f) => format!(
            "{} periods, generated {}",
            f.properties.periods.len(),
            f.properties.generated_at
        ),
        Thing::DateTime(ts) => ts.to_string(),
        Thing::QuantitativeValue(q) => format!("{} {}", q.value, q.unit_code),
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "document.jsonld".to_string());

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    let value: Value = serde_json::from_str(&text).expect("Failed to parse JSON");

    let documents = match value {
        Value::Array(items) => items,
        single => vec![single],
    };
    println!("Documents: {}", documents.len());

    let ctx = EncodingContext::new().with_pretty(true);
    for (i, document) in documents.iter().enumerate() {
        match Thing::decode(document) {
            Ok(thing) => {
                println!("[{}] {} {}", i, thing.type_tag(), describe(&thing));
                if let Ok(Value::Object(map)) = thing.encode(true, &ctx) {
                    println!("      {} keys after re-encoding", map.len());
                }
            }
            Err(err) => println!("[{}] error {}: {}", i, err.code().code(), err),
        }
    }
}
