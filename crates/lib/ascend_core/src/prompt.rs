//! Prompt construction for sales-description requests.

use std::fmt::Write;

use crate::form::PropertyFieldSet;

/// Agency the generated descriptions are written for.
pub const AGENCY: &str = "Ascend Realtors";

/// Fixed system-role instruction sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "The following is a conversation with an AI assistant. \
The assistant is helpful, creative, clever, and very friendly.";

const SECTIONS: &str = "\
Using the provided information, craft a compelling sales description for the property. \
Ensure the content is divided into three main sections:

1. Standard Description: Introduce the property with an engaging tone. Highlight its age, size, \
and any special architectural features that would appeal to a potential buyer. Make sure to touch \
upon the property's condition, history, and any unique selling points.

2. Property Features: Describe the property's layout in a way that allows potential buyers to \
visualize living there. Emphasize functional and aesthetic aspects, detailing the flow from one \
room to another, and highlight any recent renovations, bespoke features, or technological \
integrations. Also, mention any additional structures, such as garages or sheds, and their \
current condition.

3. Location Description: Convey the advantages of the property's location. Discuss proximity to \
essential services, local attractions, geographical features, and the overall ambiance of the \
neighborhood. If the area has any historical or cultural significance, use this to enhance the \
appeal.
";

/// Render the user prompt for a field set.
///
/// Output depends only on `fields`. Every field gets its own line under
/// `Inputs:`; empty optional fields keep their line with an empty value.
pub fn build_prompt(fields: &PropertyFieldSet) -> String {
    let inputs: [(&str, &str); 12] = [
        ("Property Name and address", fields.property_name.as_str()),
        ("Year of Construction", fields.year_of_construction.as_str()),
        ("Size of the Property (in acres)", fields.size_of_the_property.as_str()),
        ("Size of the Home (in square meters)", fields.size_of_the_home.as_str()),
        ("Number of Rooms", fields.number_of_rooms.as_str()),
        ("Architectural Style", fields.architectural_style.as_str()),
        ("Outbuildings", fields.outbuildings.as_str()),
        ("Nearby Amenities", fields.nearby_amenities.as_str()),
        ("Local Attractions", fields.local_attractions.as_str()),
        ("Geographical Features", fields.geographical_features.as_str()),
        ("Interior Details", fields.interior_details.as_str()),
        ("Unique Selling Points", fields.unique_selling_points.as_str()),
    ];

    let mut out = String::with_capacity(2048);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Sales Description Request for {}", fields.property_name);
    let _ = writeln!(out, "Representing Realtor/Agency: {AGENCY}");
    out.push('\n');
    out.push_str(SECTIONS);
    out.push_str("\nInputs:\n");
    for (label, value) in inputs {
        let _ = writeln!(out, "- {label}: {value}");
    }
    out
}
