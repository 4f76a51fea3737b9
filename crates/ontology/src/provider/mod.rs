//! Sources of records.
//!
//! A [`Provider`] adapts one external source (an address book, a calendar
//! store, a weather service) into [`Thing`]s. The codec never talks to
//! sources directly; hosts register providers in a [`ProviderRegistry`] and
//! export them as JSON-LD documents. Which capability families a build
//! accepts is chosen with cargo features (`contacts`, `calendar`, `maps`,
//! `weather`).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::codec::{EncodingContext, Record};
use crate::error::EncodeError;
use crate::model::Timestamp;
use crate::schema::{
    ContactPoint, Event, GeoCoordinates, ItemList, Organization, Person, Place, PlanAction,
    PostalAddress, Thing, Trip, WeatherConditions, WeatherForecast,
};

/// A family of external record sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Contacts,
    Calendar,
    Reminders,
    Maps,
    Weather,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Contacts,
        Capability::Calendar,
        Capability::Reminders,
        Capability::Maps,
        Capability::Weather,
    ];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Calendar => "calendar",
            Self::Reminders => "reminders",
            Self::Maps => "maps",
            Self::Weather => "weather",
        }
    }

    pub fn parse(value: &str) -> Option<Capability> {
        Self::ALL.into_iter().find(|c| c.as_str() == value.trim())
    }

    /// Returns true if this build accepts providers of this capability.
    /// Reminders ride on the `calendar` feature.
    pub fn is_linked(self) -> bool {
        match self {
            Self::Contacts => cfg!(feature = "contacts"),
            Self::Calendar | Self::Reminders => cfg!(feature = "calendar"),
            Self::Maps => cfg!(feature = "maps"),
            Self::Weather => cfg!(feature = "weather"),
        }
    }

    /// Type tags a provider of this capability may produce.
    pub fn type_tags(self) -> &'static [&'static str] {
        const CONTACTS: &[&str] = &[
            Person::TYPE_TAG,
            Organization::TYPE_TAG,
            ContactPoint::TYPE_TAG,
            PostalAddress::TYPE_TAG,
        ];
        const CALENDAR: &[&str] = &[Event::TYPE_TAG];
        const REMINDERS: &[&str] = &[PlanAction::TYPE_TAG, ItemList::TYPE_TAG];
        const MAPS: &[&str] = &[Place::TYPE_TAG, Trip::TYPE_TAG, GeoCoordinates::TYPE_TAG];
        const WEATHER: &[&str] = &[
            WeatherConditions::TYPE_TAG,
            WeatherForecast::TYPE_TAG,
            Timestamp::TYPE_TAG,
        ];

        match self {
            Self::Contacts => CONTACTS,
            Self::Calendar => CALENDAR,
            Self::Reminders => REMINDERS,
            Self::Maps => MAPS,
            Self::Weather => WEATHER,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider registration and export errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("provider id is invalid: {0:?}")]
    InvalidId(String),

    #[error("provider id already registered: {0}")]
    DuplicateId(String),

    #[error("provider not found: {0}")]
    NotFound(String),

    #[error("capability '{0}' is not enabled in this build")]
    NotLinked(Capability),

    #[error("provider '{provider}' failed: {message}")]
    Fetch { provider: String, message: String },

    #[error(
        "provider '{provider}' returned a {type_tag} record, which is not a {capability} record"
    )]
    UnexpectedRecord {
        provider: String,
        capability: Capability,
        type_tag: &'static str,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// One external source of records.
pub trait Provider: Send + Sync {
    /// Registry id: lowercase ASCII letters, digits, `_` and `-`, with no
    /// surrounding whitespace.
    fn id(&self) -> &str;

    fn capability(&self) -> Capability;

    /// Returns the source's current records.
    fn fetch(&self) -> Result<Vec<Thing>, ProviderError>;
}

/// Providers keyed by id.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider.
    ///
    /// Fails if the id is malformed or taken, or if the provider's capability
    /// is not enabled in this build.
    pub fn register(&mut self, provider: Arc<dyn Provider>) -> Result<(), ProviderError> {
        let id = provider.id().to_string();
        if !is_valid_provider_id(&id) {
            return Err(ProviderError::InvalidId(id));
        }
        if self.providers.contains_key(&id) {
            return Err(ProviderError::DuplicateId(id));
        }
        let capability = provider.capability();
        if !capability.is_linked() {
            return Err(ProviderError::NotLinked(capability));
        }
        debug!("registered {} provider {}", capability, id);
        self.providers.insert(id, provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns sorted provider ids.
    pub fn ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(id).cloned()
    }

    /// Providers of one capability, in id order.
    pub fn providers_for(
        &self,
        capability: Capability,
    ) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers
            .values()
            .filter(move |p| p.capability() == capability)
    }

    /// Fetches every record of a capability, checking each record's type.
    pub fn fetch(&self, capability: Capability) -> Result<Vec<Thing>, ProviderError> {
        let mut records = Vec::new();
        for provider in self.providers_for(capability) {
            records.extend(fetch_checked(provider.as_ref())?);
        }
        Ok(records)
    }

    /// Fetches every record of a capability as a root JSON-LD document.
    pub fn export(
        &self,
        capability: Capability,
        ctx: &EncodingContext,
    ) -> Result<Vec<Value>, ProviderError> {
        let documents = self
            .fetch(capability)?
            .iter()
            .map(|record| record.encode(true, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("exported {} {} documents", documents.len(), capability);
        Ok(documents)
    }

    /// Fetches one provider's records as root JSON-LD documents.
    pub fn export_provider(
        &self,
        id: &str,
        ctx: &EncodingContext,
    ) -> Result<Vec<Value>, ProviderError> {
        let provider = self
            .get(id)
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))?;
        let documents = fetch_checked(provider.as_ref())?
            .iter()
            .map(|record| record.encode(true, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(documents)
    }
}

/// Fetches a provider's records, rejecting any outside its capability.
fn fetch_checked(provider: &dyn Provider) -> Result<Vec<Thing>, ProviderError> {
    let capability = provider.capability();
    let allowed = capability.type_tags();
    let records = provider.fetch()?;
    if let Some(record) = records.iter().find(|r| !allowed.contains(&r.type_tag())) {
        return Err(ProviderError::UnexpectedRecord {
            provider: provider.id().to_string(),
            capability,
            type_tag: record.type_tag(),
        });
    }
    Ok(records)
}

fn is_valid_provider_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// A provider serving records converted ahead of time.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    id: String,
    capability: Capability,
    records: Vec<Thing>,
}

impl StaticProvider {
    pub fn new(id: impl Into<String>, capability: Capability) -> Self {
        Self {
            id: id.into(),
            capability,
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: impl Into<Thing>) -> Self {
        self.records.push(record.into());
        self
    }

    pub fn push(&mut self, record: impl Into<Thing>) {
        self.records.push(record.into());
    }
}

impl Provider for StaticProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn fetch(&self) -> Result<Vec<Thing>, ProviderError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "weather")]
    struct FailingProvider;

    #[cfg(feature = "weather")]
    impl Provider for FailingProvider {
        fn id(&self) -> &str {
            "offline"
        }

        fn capability(&self) -> Capability {
            Capability::Weather
        }

        fn fetch(&self) -> Result<Vec<Thing>, ProviderError> {
            Err(ProviderError::Fetch {
                provider: self.id().to_string(),
                message: "no network".to_string(),
            })
        }
    }

    #[cfg(feature = "contacts")]
    fn contacts() -> StaticProvider {
        StaticProvider::new("address_book", Capability::Contacts)
            .with_record(Person::from_name("Ada Lovelace"))
            .with_record(Organization::named("Acme"))
    }

    #[test]
    fn test_capability_ids() {
        for capability in Capability::ALL {
            assert_eq!(Capability::parse(capability.as_str()), Some(capability));
        }
        assert_eq!(Capability::parse("health"), None);
    }

    #[cfg(feature = "contacts")]
    #[test]
    fn test_register_rejects_invalid_and_duplicate_ids() {
        let mut registry = ProviderRegistry::new();
        let invalid = StaticProvider::new("Address Book", Capability::Contacts);
        let invalid = registry.register(Arc::new(invalid));
        assert!(matches!(invalid, Err(ProviderError::InvalidId(_))));
        let blank = registry.register(Arc::new(StaticProvider::new("  ", Capability::Contacts)));
        assert!(matches!(blank, Err(ProviderError::InvalidId(_))));
        let padded = StaticProvider::new(" book ", Capability::Contacts);
        let padded = registry.register(Arc::new(padded));
        assert_eq!(padded, Err(ProviderError::InvalidId(" book ".to_string())));
        assert!(registry.is_empty());

        registry.register(Arc::new(contacts())).unwrap();
        let duplicate = registry.register(Arc::new(contacts()));
        assert_eq!(duplicate, Err(ProviderError::DuplicateId("address_book".to_string())));
        assert_eq!(registry.ids(), vec!["address_book"]);
    }

    #[cfg(feature = "contacts")]
    #[test]
    fn test_export_root_documents() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(contacts())).unwrap();
        let documents = registry
            .export(Capability::Contacts, &EncodingContext::default())
            .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["@context"], "https://schema.org");
        assert_eq!(documents[0]["@type"], "Person");
        assert_eq!(documents[1]["@type"], "Organization");
        assert!(registry.export(Capability::Maps, &EncodingContext::default()).unwrap().is_empty());

        let single = registry
            .export_provider("address_book", &EncodingContext::default())
            .unwrap();
        assert_eq!(single, documents);
        assert!(registry.get(" address_book ").is_none());
        assert_eq!(
            registry.export_provider("calendar", &EncodingContext::default()),
            Err(ProviderError::NotFound("calendar".to_string()))
        );
    }

    #[cfg(feature = "maps")]
    #[test]
    fn test_fetch_rejects_foreign_records() {
        let mut registry = ProviderRegistry::new();
        let provider =
            StaticProvider::new("places", Capability::Maps).with_record(Event::default());
        registry.register(Arc::new(provider)).unwrap();
        let err = registry.fetch(Capability::Maps).unwrap_err();
        assert_eq!(
            err,
            ProviderError::UnexpectedRecord {
                provider: "places".to_string(),
                capability: Capability::Maps,
                type_tag: "Event",
            }
        );
        let exported = registry.export_provider("places", &EncodingContext::default());
        assert_eq!(exported, Err(err));
    }

    #[cfg(feature = "weather")]
    #[test]
    fn test_fetch_error_propagates() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(FailingProvider)).unwrap();
        assert!(matches!(
            registry.fetch(Capability::Weather),
            Err(ProviderError::Fetch { .. })
        ));
    }
}
