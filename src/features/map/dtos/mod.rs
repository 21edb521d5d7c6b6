pub mod map_session_dto;

pub use map_session_dto::{
    CreateMapSessionDto, MapFeatureDto, MapSessionDto, SelectRouteDto, UpdateLocationDto,
    UpdateSearchTextDto, ViewportDto,
};
