pub mod map_session_handler;

pub use map_session_handler::{
    __path_confirm_route, __path_create_map_session, __path_delete_map_session,
    __path_get_map_session, __path_select_route, __path_set_end, __path_set_start,
    __path_toggle_route_mode, __path_toggle_view_mode, __path_update_location, confirm_route,
    create_map_session, delete_map_session, get_map_session, select_route, set_end, set_start,
    toggle_route_mode, toggle_view_mode, update_location,
};
