pub mod location_handler;

pub use location_handler::{
    __path_list_locations, __path_suggest_locations, list_locations, suggest_locations,
};
