pub mod profile_handler;

pub use profile_handler::{
    __path_get_profile, __path_save_profile, __path_save_profile_for_username, get_profile,
    save_profile, save_profile_for_username,
};
