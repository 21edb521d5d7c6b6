mod map_session;
mod map_session_service;

pub use map_session::MapSession;
pub use map_session_service::MapSessionService;
