//! Property form model — field schema, validation and submission.
//!
//! The schema in [`FIELDS`] is the single source for labels, placeholders and
//! validation messages; the HTML page, the CLI and [`validate`] all read it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::completion::ChatMessage;
use crate::session::ChatSession;

/// Schema entry for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Wire name (camelCase) of the field.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Input placeholder hint.
    pub placeholder: &'static str,
    /// Whether an empty value is rejected.
    pub required: bool,
    /// Message reported when a required value is missing.
    pub message: &'static str,
}

const fn required(
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    message: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        placeholder,
        required: true,
        message,
    }
}

const fn optional(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        placeholder,
        required: false,
        message: "",
    }
}

/// All property fields, in form order.
pub static FIELDS: [FieldSpec; 12] = [
    required(
        "propertyName",
        "Property Name and Address",
        "Enter the name of the property and address",
        "Property Name and Address is required.",
    ),
    required(
        "yearOfConstruction",
        "Year of Construction",
        "Enter the year of construction",
        "Year of Construction is required.",
    ),
    required(
        "sizeOfTheProperty",
        "Size of the Property (in acres)",
        "Enter the size of the property",
        "Size of the Property (in acres) is required.",
    ),
    required(
        "sizeOfTheHome",
        "Size of the Home (in square meters)",
        "Enter the size of the home",
        "Size of the Home (in square meters) is required.",
    ),
    required(
        "numberOfRooms",
        "Number of Rooms",
        "Enter the number of rooms",
        "Number of Rooms is required.",
    ),
    optional(
        "architecturalStyle",
        "Architectural Style",
        "Enter the architectural style",
    ),
    optional(
        "outbuildings",
        "Outbuildings",
        "Enter details or standard/none",
    ),
    required(
        "nearbyAmenities",
        "Nearby Amenities",
        "Enter services like schools, hospitals, shops, etc.",
        "Nearby Amenities is required.",
    ),
    optional(
        "localAttractions",
        "Local Attractions",
        "Enter attractions or none",
    ),
    required(
        "geographicalFeatures",
        "Geographical Features",
        "Enter features, e.g., \"Near a lake, surrounded by hills\"",
        "Geographical Features is required.",
    ),
    optional(
        "interiorDetails",
        "Interior Details",
        "Enter type of flooring, brand of appliances, design of fixtures, etc.",
    ),
    optional(
        "uniqueSellingPoints",
        "Unique Selling Points",
        "Enter any aspect of the property that stands out",
    ),
];

/// Look up a field's schema entry by wire name.
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Raw, unvalidated form values. `None` means the field was never filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyForm {
    pub property_name: Option<String>,
    pub year_of_construction: Option<String>,
    pub size_of_the_property: Option<String>,
    pub size_of_the_home: Option<String>,
    pub number_of_rooms: Option<String>,
    pub architectural_style: Option<String>,
    pub outbuildings: Option<String>,
    pub nearby_amenities: Option<String>,
    pub local_attractions: Option<String>,
    pub geographical_features: Option<String>,
    pub interior_details: Option<String>,
    pub unique_selling_points: Option<String>,
}

impl PropertyForm {
    /// Value of the field with the given wire name, if filled in.
    pub fn value(&self, name: &str) -> Option<&str> {
        let v = match name {
            "propertyName" => &self.property_name,
            "yearOfConstruction" => &self.year_of_construction,
            "sizeOfTheProperty" => &self.size_of_the_property,
            "sizeOfTheHome" => &self.size_of_the_home,
            "numberOfRooms" => &self.number_of_rooms,
            "architecturalStyle" => &self.architectural_style,
            "outbuildings" => &self.outbuildings,
            "nearbyAmenities" => &self.nearby_amenities,
            "localAttractions" => &self.local_attractions,
            "geographicalFeatures" => &self.geographical_features,
            "interiorDetails" => &self.interior_details,
            "uniqueSellingPoints" => &self.unique_selling_points,
            _ => return None,
        };
        v.as_deref()
    }
}

/// A validated set of property details.
///
/// Every required field is non-empty; optional fields may be empty strings.
/// Fields absent from a transport string deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFieldSet {
    pub property_name: String,
    pub year_of_construction: String,
    pub size_of_the_property: String,
    pub size_of_the_home: String,
    pub number_of_rooms: String,
    pub architectural_style: String,
    pub outbuildings: String,
    pub nearby_amenities: String,
    pub local_attractions: String,
    pub geographical_features: String,
    pub interior_details: String,
    pub unique_selling_points: String,
}

impl PropertyFieldSet {
    /// Value of the field with the given wire name (empty for unknown names).
    pub fn value(&self, name: &str) -> &str {
        match name {
            "propertyName" => self.property_name.as_str(),
            "yearOfConstruction" => self.year_of_construction.as_str(),
            "sizeOfTheProperty" => self.size_of_the_property.as_str(),
            "sizeOfTheHome" => self.size_of_the_home.as_str(),
            "numberOfRooms" => self.number_of_rooms.as_str(),
            "architecturalStyle" => self.architectural_style.as_str(),
            "outbuildings" => self.outbuildings.as_str(),
            "nearbyAmenities" => self.nearby_amenities.as_str(),
            "localAttractions" => self.local_attractions.as_str(),
            "geographicalFeatures" => self.geographical_features.as_str(),
            "interiorDetails" => self.interior_details.as_str(),
            "uniqueSellingPoints" => self.unique_selling_points.as_str(),
            _ => "",
        }
    }

    /// Serialize for transport as the content of a chat message.
    pub fn to_transport(&self) -> String {
        // A struct of plain strings always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a transport string produced by [`PropertyFieldSet::to_transport`].
    pub fn from_transport(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// All validation failures for one submission, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid property details: {}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Whether the given field is among the failures.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate raw form values against [`FIELDS`].
pub fn validate(input: PropertyForm) -> Result<PropertyFieldSet, ValidationErrors> {
    let errors: Vec<FieldError> = FIELDS
        .iter()
        .filter(|spec| spec.required)
        .filter(|spec| input.value(spec.name).is_none_or(|v| v.trim().is_empty()))
        .map(|spec| FieldError {
            field: spec.name,
            message: spec.message,
        })
        .collect();

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    Ok(PropertyFieldSet {
        property_name: input.property_name.unwrap_or_default(),
        year_of_construction: input.year_of_construction.unwrap_or_default(),
        size_of_the_property: input.size_of_the_property.unwrap_or_default(),
        size_of_the_home: input.size_of_the_home.unwrap_or_default(),
        number_of_rooms: input.number_of_rooms.unwrap_or_default(),
        architectural_style: input.architectural_style.unwrap_or_default(),
        outbuildings: input.outbuildings.unwrap_or_default(),
        nearby_amenities: input.nearby_amenities.unwrap_or_default(),
        local_attractions: input.local_attractions.unwrap_or_default(),
        geographical_features: input.geographical_features.unwrap_or_default(),
        interior_details: input.interior_details.unwrap_or_default(),
        unique_selling_points: input.unique_selling_points.unwrap_or_default(),
    })
}

/// Validate `input` and hand its transport string to `on_submit`.
///
/// On failure `on_submit` is not called and the session is left untouched.
/// On success the session's prior conversation is cleared and the serialized
/// field set becomes its only user message.
pub fn submit<F, R>(
    session: &mut ChatSession,
    input: PropertyForm,
    on_submit: F,
) -> Result<R, ValidationErrors>
where
    F: FnOnce(String) -> R,
{
    let fields = validate(input)?;
    let message = fields.to_transport();
    debug!(property = %fields.property_name, "submitting property details");

    session.clear();
    session.append(ChatMessage::user(message.clone()));

    Ok(on_submit(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oak_manor() -> PropertyForm {
        PropertyForm {
            property_name: Some("Oak Manor".into()),
            year_of_construction: Some("1925".into()),
            size_of_the_property: Some("2".into()),
            size_of_the_home: Some("180".into()),
            number_of_rooms: Some("6".into()),
            nearby_amenities: Some("schools".into()),
            geographical_features: Some("near a lake".into()),
            ..Default::default()
        }
    }

    #[test]
    fn schema_has_twelve_unique_fields() {
        let mut names: Vec<_> = FIELDS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn required_fields_carry_messages() {
        for spec in FIELDS.iter().filter(|f| f.required) {
            assert!(!spec.message.is_empty(), "{} has no message", spec.name);
        }
        assert_eq!(FIELDS.iter().filter(|f| f.required).count(), 7);
    }

    #[test]
    fn field_spec_lookup() {
        assert!(field_spec("geographicalFeatures").unwrap().required);
        assert!(!field_spec("outbuildings").unwrap().required);
        assert!(field_spec("garden").is_none());
    }

    #[test]
    fn validate_accepts_required_only() {
        let fields = validate(oak_manor()).unwrap();
        assert_eq!(fields.property_name, "Oak Manor");
        assert_eq!(fields.architectural_style, "");
    }

    #[test]
    fn validate_reports_each_missing_required_field() {
        let input = PropertyForm {
            property_name: None,
            number_of_rooms: Some("   ".into()),
            ..oak_manor()
        };
        let err = validate(input).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].field, "propertyName");
        assert_eq!(err.errors[1].field, "numberOfRooms");
        assert!(err.to_string().contains("Number of Rooms is required."));
    }

    #[test]
    fn validate_empty_form_fails_every_required_field() {
        let err = validate(PropertyForm::default()).unwrap_err();
        for spec in FIELDS.iter().filter(|f| f.required) {
            assert!(err.contains(spec.name), "missing error for {}", spec.name);
        }
        assert!(!err.contains("outbuildings"));
    }

    #[test]
    fn transport_uses_camel_case_names() {
        let fields = validate(oak_manor()).unwrap();
        let json = fields.to_transport();
        assert!(json.contains(r#""propertyName":"Oak Manor""#));
        assert!(json.contains(r#""geographicalFeatures":"near a lake""#));
        assert_eq!(PropertyFieldSet::from_transport(&json).unwrap(), fields);
    }

    #[test]
    fn transport_missing_fields_default_to_empty() {
        let fields = PropertyFieldSet::from_transport(r#"{"propertyName":"Oak Manor"}"#).unwrap();
        assert_eq!(fields.property_name, "Oak Manor");
        assert_eq!(fields.nearby_amenities, "");
    }

    #[test]
    fn transport_rejects_garbage() {
        assert!(PropertyFieldSet::from_transport("not json").is_err());
        assert!(PropertyFieldSet::from_transport(r#"{"propertyName": 3}"#).is_err());
    }

    #[test]
    fn submit_invalid_does_not_invoke_callback() {
        let mut session = ChatSession::new();
        session.append(ChatMessage::user("earlier".to_string()));
        let mut called = false;
        let result = submit(&mut session, PropertyForm::default(), |_| called = true);
        assert!(result.is_err());
        assert!(!called);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn submit_clears_session_and_passes_transport() {
        let mut session = ChatSession::new();
        session.append(ChatMessage::user("earlier".to_string()));
        session.begin_response();
        session.push_chunk("old text");
        session.finish();

        let sent = submit(&mut session, oak_manor(), |message| message).unwrap();

        assert!(sent.contains("Oak Manor"));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, sent);
        assert!(session.displayed_text().is_none());
    }
}
