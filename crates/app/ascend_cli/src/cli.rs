use ascend_core::form::PropertyForm;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ascend", version, about = "Generate property sales descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream a sales description from an Ascend server.
    Generate {
        /// Base URL of the Ascend server.
        #[arg(long, env = "ASCEND_SERVER", default_value = "http://127.0.0.1:3100")]
        server: String,

        #[command(flatten)]
        property: PropertyArgs,
    },
    /// Print the prompt that would be sent upstream, without sending it.
    Prompt {
        #[command(flatten)]
        property: PropertyArgs,
    },
    /// Print the version.
    Version,
}

/// Property details, one flag per form field.
#[derive(Args, Debug, Clone, Default)]
pub struct PropertyArgs {
    /// Property name and address (required).
    #[arg(long)]
    pub property_name: Option<String>,
    /// Year of construction (required).
    #[arg(long)]
    pub year_of_construction: Option<String>,
    /// Size of the property in acres (required).
    #[arg(long)]
    pub size_of_the_property: Option<String>,
    /// Size of the home in square meters (required).
    #[arg(long)]
    pub size_of_the_home: Option<String>,
    /// Number of rooms (required).
    #[arg(long)]
    pub number_of_rooms: Option<String>,
    #[arg(long)]
    pub architectural_style: Option<String>,
    #[arg(long)]
    pub outbuildings: Option<String>,
    /// Schools, hospitals, shops, etc. (required).
    #[arg(long)]
    pub nearby_amenities: Option<String>,
    #[arg(long)]
    pub local_attractions: Option<String>,
    /// E.g. "Near a lake, surrounded by hills" (required).
    #[arg(long)]
    pub geographical_features: Option<String>,
    #[arg(long)]
    pub interior_details: Option<String>,
    #[arg(long)]
    pub unique_selling_points: Option<String>,
}

impl From<PropertyArgs> for PropertyForm {
    fn from(args: PropertyArgs) -> Self {
        PropertyForm {
            property_name: args.property_name,
            year_of_construction: args.year_of_construction,
            size_of_the_property: args.size_of_the_property,
            size_of_the_home: args.size_of_the_home,
            number_of_rooms: args.number_of_rooms,
            architectural_style: args.architectural_style,
            outbuildings: args.outbuildings,
            nearby_amenities: args.nearby_amenities,
            local_attractions: args.local_attractions,
            geographical_features: args.geographical_features,
            interior_details: args.interior_details,
            unique_selling_points: args.unique_selling_points,
        }
    }
}
