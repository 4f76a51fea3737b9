//! People, organizations and how to reach them.

use crate::codec::{NodeReader, NodeWriter, Record};
use crate::error::{DecodeError, EncodeError};

crate::attribute_keys! {
    pub enum ContactPointKey {
        ContactType = "contactType",
        Identifier = "identifier",
    }
}

/// A channel for reaching someone, such as a phone number or handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPoint {
    pub contact_type: String,
    pub identifier: String,
}

impl ContactPoint {
    pub fn new(contact_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            contact_type: contact_type.into(),
            identifier: identifier.into(),
        }
    }
}

impl Record for ContactPoint {
    const TYPE_TAG: &'static str = "ContactPoint";
    type Key = ContactPointKey;

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, ContactPointKey>,
    ) -> Result<(), EncodeError> {
        node.write_string(ContactPointKey::ContactType, &self.contact_type);
        node.write_string(ContactPointKey::Identifier, &self.identifier);
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, ContactPointKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            contact_type: node.read_string(ContactPointKey::ContactType)?,
            identifier: node.read_string(ContactPointKey::Identifier)?,
        })
    }
}

crate::attribute_keys! {
    pub enum PostalAddressKey {
        StreetAddress = "streetAddress",
        AddressLocality = "addressLocality",
        AddressRegion = "addressRegion",
        PostalCode = "postalCode",
        AddressCountry = "addressCountry",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
    pub address_country: Option<String>,
}

impl Record for PostalAddress {
    const TYPE_TAG: &'static str = "PostalAddress";
    type Key = PostalAddressKey;

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, PostalAddressKey>,
    ) -> Result<(), EncodeError> {
        node.write_opt_string(PostalAddressKey::StreetAddress, self.street_address.as_deref());
        node.write_opt_string(PostalAddressKey::AddressLocality, self.address_locality.as_deref());
        node.write_opt_string(PostalAddressKey::AddressRegion, self.address_region.as_deref());
        node.write_opt_string(PostalAddressKey::PostalCode, self.postal_code.as_deref());
        node.write_opt_string(PostalAddressKey::AddressCountry, self.address_country.as_deref());
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, PostalAddressKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            street_address: node.read_opt_string(PostalAddressKey::StreetAddress)?,
            address_locality: node.read_opt_string(PostalAddressKey::AddressLocality)?,
            address_region: node.read_opt_string(PostalAddressKey::AddressRegion)?,
            postal_code: node.read_opt_string(PostalAddressKey::PostalCode)?,
            address_country: node.read_opt_string(PostalAddressKey::AddressCountry)?,
        })
    }
}

crate::attribute_keys! {
    pub enum OrganizationKey {
        Name = "name",
        Email = "email",
        Telephone = "telephone",
        Address = "address",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<Vec<String>>,
    pub telephone: Option<Vec<String>>,
    pub address: Option<Vec<PostalAddress>>,
}

impl Organization {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Record for Organization {
    const TYPE_TAG: &'static str = "Organization";
    type Key = OrganizationKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, OrganizationKey>,
    ) -> Result<(), EncodeError> {
        node.write_opt_string(OrganizationKey::Name, self.name.as_deref());
        node.write_opt_strings(OrganizationKey::Email, self.email.as_deref());
        node.write_opt_strings(OrganizationKey::Telephone, self.telephone.as_deref());
        node.write_opt_records(OrganizationKey::Address, self.address.as_deref())
    }

    fn decode_attributes(node: &NodeReader<'_, OrganizationKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(OrganizationKey::Name)?,
            email: node.read_opt_strings(OrganizationKey::Email)?,
            telephone: node.read_opt_strings(OrganizationKey::Telephone)?,
            address: node.read_opt_records(OrganizationKey::Address)?,
        })
    }
}

crate::attribute_keys! {
    pub enum PersonKey {
        GivenName = "givenName",
        FamilyName = "familyName",
        Email = "email",
        Telephone = "telephone",
        Address = "address",
        JobTitle = "jobTitle",
        WorksFor = "worksFor",
        Url = "url",
        BirthDate = "birthDate",
        SameAs = "sameAs",
        ContactPoint = "contactPoint",
        KnowsLanguage = "knowsLanguage",
        Spouse = "spouse",
        Children = "children",
        Siblings = "siblings",
        Parents = "parents",
        RelatedTo = "relatedTo",
    }
}

/// A person and their relations.
///
/// Relatives are themselves `Person` nodes, usually carrying only a name.
/// `birth_date` is a calendar date (`YYYY-MM-DD`), not an instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<Vec<String>>,
    pub telephone: Option<Vec<String>>,
    pub address: Option<Vec<PostalAddress>>,
    pub job_title: Option<String>,
    pub works_for: Option<Organization>,
    pub url: Option<Vec<String>>,
    pub birth_date: Option<String>,
    pub same_as: Option<Vec<String>>,
    pub contact_point: Option<Vec<ContactPoint>>,
    pub knows_language: Option<Vec<String>>,
    pub spouse: Option<Vec<Person>>,
    pub children: Option<Vec<Person>>,
    pub siblings: Option<Vec<Person>>,
    pub parents: Option<Vec<Person>>,
    pub related_to: Option<Vec<Person>>,
}

impl Person {
    /// Builds a person from a display name: the first word is the given
    /// name and, if there is more than one word, the last is the family name.
    pub fn from_name(name: &str) -> Self {
        let mut words = name.split_whitespace();
        let given_name = words.next().map(str::to_string);
        let family_name = words.last().map(str::to_string);
        Self {
            given_name,
            family_name,
            ..Self::default()
        }
    }

    /// Given and family name joined by a space.
    pub fn display_name(&self) -> Option<String> {
        match (&self.given_name, &self.family_name) {
            (Some(given), Some(family)) => Some(format!("{} {}", given, family)),
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

impl Record for Person {
    const TYPE_TAG: &'static str = "Person";
    type Key = PersonKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, PersonKey>) -> Result<(), EncodeError> {
        node.write_opt_string(PersonKey::GivenName, self.given_name.as_deref());
        node.write_opt_string(PersonKey::FamilyName, self.family_name.as_deref());
        node.write_opt_strings(PersonKey::Email, self.email.as_deref());
        node.write_opt_strings(PersonKey::Telephone, self.telephone.as_deref());
        node.write_opt_records(PersonKey::Address, self.address.as_deref())?;
        node.write_opt_string(PersonKey::JobTitle, self.job_title.as_deref());
        node.write_opt_record(PersonKey::WorksFor, self.works_for.as_ref())?;
        node.write_opt_strings(PersonKey::Url, self.url.as_deref());
        node.write_opt_string(PersonKey::BirthDate, self.birth_date.as_deref());
        node.write_opt_strings(PersonKey::SameAs, self.same_as.as_deref());
        node.write_opt_records(PersonKey::ContactPoint, self.contact_point.as_deref())?;
        node.write_opt_strings(PersonKey::KnowsLanguage, self.knows_language.as_deref());
        node.write_opt_records(PersonKey::Spouse, self.spouse.as_deref())?;
        node.write_opt_records(PersonKey::Children, self.children.as_deref())?;
        node.write_opt_records(PersonKey::Siblings, self.siblings.as_deref())?;
        node.write_opt_records(PersonKey::Parents, self.parents.as_deref())?;
        node.write_opt_records(PersonKey::RelatedTo, self.related_to.as_deref())
    }

    fn decode_attributes(node: &NodeReader<'_, PersonKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            given_name: node.read_opt_string(PersonKey::GivenName)?,
            family_name: node.read_opt_string(PersonKey::FamilyName)?,
            email: node.read_opt_strings(PersonKey::Email)?,
            telephone: node.read_opt_strings(PersonKey::Telephone)?,
            address: node.read_opt_records(PersonKey::Address)?,
            job_title: node.read_opt_string(PersonKey::JobTitle)?,
            works_for: node.read_opt_record(PersonKey::WorksFor)?,
            url: node.read_opt_strings(PersonKey::Url)?,
            birth_date: node.read_opt_string(PersonKey::BirthDate)?,
            same_as: node.read_opt_strings(PersonKey::SameAs)?,
            contact_point: node.read_opt_records(PersonKey::ContactPoint)?,
            knows_language: node.read_opt_strings(PersonKey::KnowsLanguage)?,
            spouse: node.read_opt_records(PersonKey::Spouse)?,
            children: node.read_opt_records(PersonKey::Children)?,
            siblings: node.read_opt_records(PersonKey::Siblings)?,
            parents: node.read_opt_records(PersonKey::Parents)?,
            related_to: node.read_opt_records(PersonKey::RelatedTo)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode, EncodingContext};
    use serde_json::json;

    #[test]
    fn test_contact_point_shape() {
        let cp = ContactPoint::new("email", "alice@example.com");
        let value = encode(&cp, true, &EncodingContext::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "@context": "https://schema.org",
                "@type": "ContactPoint",
                "contactType": "email",
                "identifier": "alice@example.com"
            })
        );
        assert_eq!(decode::<ContactPoint>(&value).unwrap(), cp);
    }

    #[test]
    fn test_contact_point_requires_fields() {
        let value = json!({"@type": "ContactPoint", "contactType": "phone"});
        assert!(matches!(
            decode::<ContactPoint>(&value),
            Err(DecodeError::MissingField { key: "identifier", .. })
        ));
    }

    #[test]
    fn test_person_from_name() {
        let person = Person::from_name("Ada King Lovelace");
        assert_eq!(person.given_name.as_deref(), Some("Ada"));
        assert_eq!(person.family_name.as_deref(), Some("Lovelace"));

        let mononym = Person::from_name("Plato");
        assert_eq!(mononym.given_name.as_deref(), Some("Plato"));
        assert_eq!(mononym.family_name, None);
        assert_eq!(mononym.display_name().as_deref(), Some("Plato"));

        assert_eq!(Person::from_name("  ").given_name, None);
    }

    #[test]
    fn test_person_nested_records() {
        let person = Person {
            id: Some("urn:person:1".to_string()),
            email: Some(vec!["a@example.com".to_string()]),
            works_for: Some(Organization::named("Analytical Engines")),
            spouse: Some(vec![Person::from_name("William King")]),
            address: Some(vec![PostalAddress {
                address_locality: Some("London".to_string()),
                ..PostalAddress::default()
            }]),
            ..Person::from_name("Ada Lovelace")
        };
        let value = encode(&person, true, &EncodingContext::default()).unwrap();
        assert_eq!(value["@id"], "urn:person:1");
        assert_eq!(
            value["worksFor"],
            json!({"@type": "Organization", "name": "Analytical Engines"})
        );
        assert!(value["spouse"][0].get("@context").is_none());
        assert_eq!(value["address"][0]["@type"], "PostalAddress");
        assert_eq!(decode::<Person>(&value).unwrap(), person);
    }

    #[test]
    fn test_nested_type_mismatch_reports_path() {
        let value = json!({
            "@type": "Person",
            "worksFor": {"@type": "Person", "givenName": "Bob"}
        });
        let err = decode::<Person>(&value).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeTagMismatch {
                expected: "Organization".to_string(),
                found: "Person".to_string(),
                path: "$.worksFor".to_string(),
            }
        );
    }

    #[test]
    fn test_organization_without_id() {
        let org = Organization {
            telephone: Some(vec!["+1 555 0100".to_string()]),
            ..Organization::named("Acme")
        };
        let value = encode(&org, false, &EncodingContext::default()).unwrap();
        assert!(value.get("@id").is_none());
        assert!(value.get("@context").is_none());
        assert_eq!(decode::<Organization>(&value).unwrap(), org);
    }
}
